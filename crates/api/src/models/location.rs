use crate::error::{Problem, ProblemResult};
use std::path::{Path, PathBuf};

/// Where a plugin package lives on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PackageLocation {
    Directory(PathBuf),
    Archive(PathBuf),
}

impl PackageLocation {
    pub fn detect(path: &Path) -> ProblemResult<Self> {
        if path.is_dir() {
            Ok(Self::Directory(path.to_path_buf()))
        } else if path.exists() && is_jar_or_zip(path) {
            Ok(Self::Archive(path.to_path_buf()))
        } else if !path.exists() {
            Err(Problem::incorrect_structure(format!(
                "Plugin file is not found {}",
                path.display()
            )))
        } else {
            Err(Problem::incorrect_structure(format!(
                "Incorrect plugin file type {}. Should be a .zip or .jar archive or a directory.",
                path.display()
            )))
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::Archive(path) => path,
        }
    }
}

pub fn is_jar_or_zip(path: &Path) -> bool {
    if path.is_dir() {
        return false;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jar") || ext.eq_ignore_ascii_case("zip"))
}
