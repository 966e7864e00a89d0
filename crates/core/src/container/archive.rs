use super::{Container, ContainerError, Entry, EntryVisitor, ScanError};
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use zip::ZipArchive;
use zip::result::ZipError;

/// Random-access archive: supports enumeration and direct lookup.
pub struct ArchiveContainer<R: Read + Seek> {
    name: String,
    archive: ZipArchive<R>,
}

impl ArchiveContainer<File> {
    pub fn open_file(path: &Path) -> Result<Self, ContainerError> {
        let file = File::open(path)?;
        Self::new(path.display().to_string(), file)
    }
}

impl<R: Read + Seek> ArchiveContainer<R> {
    pub fn new(name: impl Into<String>, reader: R) -> Result<Self, ContainerError> {
        Ok(Self {
            name: name.into(),
            archive: ZipArchive::new(reader)?,
        })
    }
}

impl<R: Read + Seek> Container for ArchiveContainer<R> {
    fn for_each_entry(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), ScanError> {
        for i in 0..self.archive.len() {
            let mut file = self.archive.by_index(i).map_err(ContainerError::from)?;
            if file.is_dir() {
                continue;
            }
            let path = file.name().to_string();
            visit(&mut Entry::stream(&path, &mut file))?;
        }
        Ok(())
    }

    fn open(&mut self, path: &str) -> Result<Option<Vec<u8>>, ContainerError> {
        let mut file = match self.archive.by_name(path) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn sample_archive() -> Vec<u8> {
        let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default();

        zip.add_directory("META-INF/", options).unwrap();
        zip.start_file("META-INF/plugin.xml", options).unwrap();
        zip.write_all(b"<idea-plugin/>").unwrap();
        zip.start_file("com/example/Main.class", options).unwrap();
        zip.write_all(&[0xCA, 0xFE, 0xBA, 0xBE]).unwrap();

        zip.finish().unwrap().into_inner()
    }

    #[test]
    fn test_enumeration_skips_directories() {
        let mut container = ArchiveContainer::new("sample", Cursor::new(sample_archive())).unwrap();

        let mut seen = Vec::new();
        container
            .for_each_entry(&mut |entry| {
                seen.push(entry.path().to_string());
                Ok(())
            })
            .unwrap();

        assert_eq!(seen, vec!["META-INF/plugin.xml", "com/example/Main.class"]);
    }

    #[test]
    fn test_direct_lookup() {
        let mut container = ArchiveContainer::new("sample", Cursor::new(sample_archive())).unwrap();

        assert_eq!(
            container.open("META-INF/plugin.xml").unwrap().as_deref(),
            Some(&b"<idea-plugin/>"[..])
        );
        assert!(container.open("META-INF/absent.xml").unwrap().is_none());
    }

    #[test]
    fn test_visitor_problem_stops_enumeration() {
        let mut container = ArchiveContainer::new("sample", Cursor::new(sample_archive())).unwrap();

        let mut visited = 0;
        let err = container
            .for_each_entry(&mut |_| {
                visited += 1;
                Err(plugscope_api::Problem::incorrect_structure("stop"))
            })
            .unwrap_err();

        assert_eq!(visited, 1);
        assert!(matches!(err, ScanError::Aborted(_)));
    }
}
