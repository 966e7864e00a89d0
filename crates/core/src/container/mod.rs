//! Uniform view over the places a plugin package keeps its files.
//!
//! Two implementations exist:
//! - [`DirectoryContainer`]: a directory tree on disk
//! - [`ArchiveContainer`]: a `.zip`/`.jar` read through its central directory,
//!   either from disk or from the buffered bytes of a nested archive
//!
//! Enumeration is visitor based. An entry's bytes are only read (and
//! decompressed) when the visitor asks for them, and every handle opened by a
//! container is dropped before `for_each_entry` returns, whichever way it exits.

use plugscope_api::Problem;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

mod archive;
mod directory;

pub use archive::ArchiveContainer;
pub use directory::DirectoryContainer;

#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// Why an enumeration stopped early.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error(transparent)]
    Container(#[from] ContainerError),
    /// Raised by the visitor; carried through unchanged.
    #[error(transparent)]
    Aborted(#[from] Problem),
}

impl ScanError {
    /// Container failures become checked problems described by `context`.
    pub fn into_problem(self, context: impl FnOnce() -> String) -> Problem {
        match self {
            ScanError::Container(err) => Problem::checked(context(), err),
            ScanError::Aborted(problem) => problem,
        }
    }
}

pub type EntryVisitor<'v> = dyn FnMut(&mut Entry<'_>) -> Result<(), Problem> + 'v;

pub trait Container {
    /// Visits every non-directory entry in container order.
    fn for_each_entry(&mut self, visit: &mut EntryVisitor<'_>) -> Result<(), ScanError>;

    /// Reads one entry by path. `Ok(None)` when it does not exist.
    fn open(&mut self, path: &str) -> Result<Option<Vec<u8>>, ContainerError>;

    /// Container name (for logging/debugging)
    fn name(&self) -> &str;
}

enum EntryBody<'a> {
    Stream(&'a mut dyn Read),
    File(&'a Path),
}

/// One file inside a container.
pub struct Entry<'a> {
    path: &'a str,
    body: EntryBody<'a>,
}

impl<'a> Entry<'a> {
    pub(crate) fn stream(path: &'a str, reader: &'a mut dyn Read) -> Self {
        Self {
            path,
            body: EntryBody::Stream(reader),
        }
    }

    pub(crate) fn file(path: &'a str, file: &'a Path) -> Self {
        Self {
            path,
            body: EntryBody::File(file),
        }
    }

    /// Slash-separated path relative to the container root.
    pub fn path(&self) -> &str {
        self.path
    }

    /// Opens the entry's bytes. Nothing is read before this is called.
    pub fn open(&mut self) -> io::Result<Box<dyn Read + '_>> {
        match &mut self.body {
            EntryBody::Stream(reader) => Ok(Box::new(&mut **reader)),
            EntryBody::File(path) => Ok(Box::new(File::open(*path)?)),
        }
    }

    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.open()?.read_to_end(&mut bytes)?;
        Ok(bytes)
    }
}
