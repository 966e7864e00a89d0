use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),
}

/// Owned XML element. Namespace prefixes are dropped from names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    /// Concatenated, trimmed text of the direct text children.
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Text of the first child called `name`, if it is not blank.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name)
            .map(|c| c.text.as_str())
            .filter(|t| !t.is_empty())
    }

    fn from_node(node: roxmltree::Node<'_, '_>) -> Self {
        let mut text = String::new();
        let mut children = Vec::new();
        for child in node.children() {
            if child.is_element() {
                children.push(Self::from_node(child));
            } else if child.is_text() {
                text.push_str(child.text().unwrap_or_default());
            }
        }

        Self {
            name: node.tag_name().name().to_string(),
            attributes: node
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            text: text.trim().to_string(),
            children,
        }
    }
}

/// A parsed manifest file. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    root: XmlElement,
}

impl RawDocument {
    pub fn parse(bytes: &[u8]) -> Result<Self, DocumentError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        let text = std::str::from_utf8(bytes)?;

        // Plugin manifests commonly carry a DOCTYPE line.
        let mut options = roxmltree::ParsingOptions::default();
        options.allow_dtd = true;

        let document = roxmltree::Document::parse_with_options(text, options)?;
        Ok(Self {
            root: XmlElement::from_node(document.root_element()),
        })
    }

    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_owned_tree() {
        let doc = RawDocument::parse(
            br#"<?xml version="1.0"?>
            <!DOCTYPE idea-plugin PUBLIC "Plugin/DTD" "http://plugins.intellij.net/plugin.dtd">
            <idea-plugin>
              <name>  Sample  </name>
              <depends optional="true" config-file="opt.xml">com.dep</depends>
            </idea-plugin>"#,
        )
        .unwrap();

        let root = doc.root();
        assert_eq!(root.name, "idea-plugin");
        assert_eq!(root.child_text("name"), Some("Sample"));

        let depends = root.child("depends").unwrap();
        assert_eq!(depends.text, "com.dep");
        assert_eq!(depends.attribute("config-file"), Some("opt.xml"));
        assert_eq!(root.children_named("depends").count(), 1);
    }

    #[test]
    fn test_parse_rejects_malformed_xml() {
        let err = RawDocument::parse(b"<idea-plugin><name>x</idea-plugin>").unwrap_err();
        assert!(matches!(err, DocumentError::Xml(_)));
    }

    #[test]
    fn test_parse_skips_byte_order_mark() {
        let doc = RawDocument::parse(b"\xEF\xBB\xBF<idea-plugin/>").unwrap();
        assert_eq!(doc.root().name, "idea-plugin");
    }
}
