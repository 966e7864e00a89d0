#![allow(dead_code)]

use plugscope_core::{PluginResolver, ResolverOptions};
use plugscope_xml::XmlDescriptorReader;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::Arc;

pub fn resolver() -> PluginResolver {
    PluginResolver::new(Arc::new(XmlDescriptorReader::new()))
}

pub fn resolver_with(options: ResolverOptions) -> PluginResolver {
    resolver().with_options(options)
}

/// A complete `<idea-plugin>` manifest; `extra` is spliced in before the end tag.
pub fn manifest(name: &str, extra: &str) -> String {
    format!(
        "<idea-plugin>
  <id>com.example.{}</id>
  <name>{name}</name>
  <version>1.0</version>
  <vendor>Example</vendor>
{extra}
</idea-plugin>
",
        name.to_lowercase()
    )
}

/// In-memory jar with the given entries, in order.
pub fn jar(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    for (name, body) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(body).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// In-memory jar written without seeking, so every entry carries a data
/// descriptor, as `jar` and `ZipOutputStream` produce.
pub fn streamed_jar(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new_stream(Vec::new());
    let options = zip::write::SimpleFileOptions::default();
    for (name, body) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(body).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

pub fn write_jar(path: &Path, entries: &[(&str, &[u8])]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, jar(entries)).unwrap();
}

pub fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}
