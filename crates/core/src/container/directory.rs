use super::{Container, ContainerError, Entry, EntryVisitor, ScanError};
use std::io;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Directory tree on disk. Entries are visited in file-name order.
pub struct DirectoryContainer {
    name: String,
    root: PathBuf,
}

impl DirectoryContainer {
    pub fn new(root: PathBuf) -> Self {
        Self {
            name: root.display().to_string(),
            root,
        }
    }
}

impl Container for DirectoryContainer {
    fn for_each_entry(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), ScanError> {
        for item in WalkDir::new(&self.root).sort_by_file_name() {
            let item = item.map_err(ContainerError::from)?;
            if item.file_type().is_dir() {
                continue;
            }
            let Ok(relative) = item.path().strip_prefix(&self.root) else {
                continue;
            };
            let path = relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            visit(&mut Entry::file(&path, item.path()))?;
        }
        Ok(())
    }

    fn open(&mut self, path: &str) -> Result<Option<Vec<u8>>, ContainerError> {
        let file = self.root.join(path);
        if !file.is_file() {
            return Ok(None);
        }
        match std::fs::read(&file) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
