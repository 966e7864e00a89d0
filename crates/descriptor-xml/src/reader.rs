use crate::ROOT_ELEMENT;
use plugscope_api::{
    DescriptorReader, PluginDependency, PluginDescriptor, Problem, ProblemResult, RawDocument,
    SourceReference, Validator, XmlElement,
};
use tracing::debug;

#[derive(Debug, Default, Clone, Copy)]
pub struct XmlDescriptorReader;

impl XmlDescriptorReader {
    pub fn new() -> Self {
        Self
    }

    fn read_dependencies(
        root: &XmlElement,
        descriptor: &mut PluginDescriptor,
        validator: &mut Validator<'_>,
    ) -> ProblemResult<()> {
        for depends in root.children_named("depends") {
            if depends.text.is_empty() {
                validator.report(Problem::missing_config_element(format!(
                    "Empty <depends> element in {}",
                    descriptor.source
                )))?;
                continue;
            }

            let optional = depends
                .attribute("optional")
                .is_some_and(|v| v.eq_ignore_ascii_case("true"));
            descriptor.dependencies.push(PluginDependency {
                id: depends.text.clone(),
                optional,
            });

            if let Some(config) = depends.attribute("config-file").filter(|c| !c.is_empty()) {
                if !optional {
                    debug!(
                        "Non-optional dependency {} declares config-file {}",
                        depends.text, config
                    );
                }
                descriptor
                    .optional_dependency_configs
                    .insert(depends.text.clone(), config.to_string());
            }
        }
        Ok(())
    }
}

impl DescriptorReader for XmlDescriptorReader {
    fn read_descriptor(
        &self,
        document: &RawDocument,
        source: &SourceReference,
        validator: &mut Validator<'_>,
    ) -> ProblemResult<PluginDescriptor> {
        let root = document.root();
        let mut descriptor = PluginDescriptor::new(source.clone());

        if root.name != ROOT_ELEMENT {
            validator.report(Problem::missing_config_element(format!(
                "Root element <{ROOT_ELEMENT}> is not found in {source}, found <{}>",
                root.name
            )))?;
            return Ok(descriptor);
        }

        descriptor.name = root.child_text("name").map(str::to_string);
        if descriptor.name.is_none() {
            validator.report(Problem::missing_config_element(format!(
                "<name> is not specified in {source}"
            )))?;
        }

        // The id falls back to the name.
        descriptor.id = root
            .child_text("id")
            .map(str::to_string)
            .or_else(|| descriptor.name.clone());

        descriptor.version = root.child_text("version").map(str::to_string);
        if descriptor.version.is_none() {
            validator.report(Problem::missing_config_element(format!(
                "<version> is not specified in {source}"
            )))?;
        }

        if let Some(vendor) = root.child("vendor") {
            descriptor.vendor = Some(vendor.text.clone()).filter(|v| !v.is_empty());
            descriptor.vendor_logo = vendor
                .attribute("logo")
                .filter(|l| !l.is_empty())
                .map(str::to_string);
        }

        descriptor.description = root.child_text("description").map(str::to_string);

        if let Some(idea_version) = root.child("idea-version") {
            descriptor.since_build = idea_version.attribute("since-build").map(str::to_string);
            descriptor.until_build = idea_version.attribute("until-build").map(str::to_string);
        }

        Self::read_dependencies(root, &mut descriptor, validator)?;
        Ok(descriptor)
    }

    fn name(&self) -> &str {
        "idea-plugin XML reader"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugscope_api::{LeniencyPolicy, ProblemKind};

    fn source() -> SourceReference {
        SourceReference::for_file(&std::env::temp_dir().join("plugin.xml")).unwrap()
    }

    fn read(xml: &str, policy: LeniencyPolicy) -> (ProblemResult<PluginDescriptor>, Vec<Problem>) {
        let document = RawDocument::parse(xml.as_bytes()).unwrap();
        let mut warnings = Vec::new();
        let result = {
            let mut validator = Validator::new(policy, &mut warnings);
            XmlDescriptorReader::new().read_descriptor(&document, &source(), &mut validator)
        };
        (result, warnings)
    }

    #[test]
    fn test_reads_identity_and_dependencies() {
        let (result, warnings) = read(
            r#"<idea-plugin>
                 <id>com.example.sample</id>
                 <name>Sample</name>
                 <version>1.2.3</version>
                 <vendor logo="/icons/logo.png">Example Corp</vendor>
                 <idea-version since-build="203.1" until-build="203.*"/>
                 <depends>com.intellij.modules.platform</depends>
                 <depends optional="true" config-file="sample-java.xml">com.intellij.java</depends>
               </idea-plugin>"#,
            LeniencyPolicy::STRICT,
        );

        let descriptor = result.unwrap();
        assert!(warnings.is_empty());
        assert_eq!(descriptor.id.as_deref(), Some("com.example.sample"));
        assert_eq!(descriptor.version.as_deref(), Some("1.2.3"));
        assert_eq!(descriptor.vendor.as_deref(), Some("Example Corp"));
        assert_eq!(descriptor.vendor_logo.as_deref(), Some("/icons/logo.png"));
        assert_eq!(descriptor.since_build.as_deref(), Some("203.1"));
        assert_eq!(descriptor.dependencies.len(), 2);
        assert!(descriptor.dependencies[1].optional);
        assert_eq!(
            descriptor
                .optional_dependency_configs
                .get("com.intellij.java")
                .map(String::as_str),
            Some("sample-java.xml")
        );
        assert!(descriptor.optional_descriptors.is_empty());
    }

    #[test]
    fn test_id_falls_back_to_name() {
        let (result, _) = read(
            "<idea-plugin><name>Sample</name><version>1</version></idea-plugin>",
            LeniencyPolicy::STRICT,
        );
        assert_eq!(result.unwrap().id.as_deref(), Some("Sample"));
    }

    #[test]
    fn test_missing_name_is_fatal_when_strict() {
        let (result, _) = read(
            "<idea-plugin><version>1</version></idea-plugin>",
            LeniencyPolicy::STRICT,
        );
        assert_eq!(result.unwrap_err().kind, ProblemKind::MissingConfigElement);
    }

    #[test]
    fn test_optional_manifest_reads_leniently() {
        let (result, warnings) = read(
            "<idea-plugin><extensions defaultExtensionNs=\"com.intellij\"/></idea-plugin>",
            LeniencyPolicy::STRICT.ignoring_missing_config_element(),
        );

        let descriptor = result.unwrap();
        assert!(descriptor.name.is_none());
        assert_eq!(warnings.len(), 2);
        assert!(
            warnings
                .iter()
                .all(|w| w.kind == ProblemKind::MissingConfigElement)
        );
    }

    #[test]
    fn test_wrong_root_element() {
        let (result, _) = read("<plugin><name>x</name></plugin>", LeniencyPolicy::STRICT);
        assert!(
            result
                .unwrap_err()
                .message
                .contains("Root element <idea-plugin>")
        );
    }
}
