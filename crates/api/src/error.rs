use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Category of a problem found while resolving a plugin package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProblemKind {
    /// The package layout violates an assumed invariant. Never relaxable.
    IncorrectStructure,
    /// An expected manifest or directory is absent.
    MissingFile,
    /// A manifest lacks a required element, or an optional manifest could not be resolved.
    MissingConfigElement,
    /// The package (or one of its entries) is unreadable.
    CheckedFailure,
}

impl fmt::Display for ProblemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProblemKind::IncorrectStructure => "incorrect structure",
            ProblemKind::MissingFile => "missing file",
            ProblemKind::MissingConfigElement => "missing config element",
            ProblemKind::CheckedFailure => "checked failure",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Problem {
    pub kind: ProblemKind,
    pub message: String,
}

impl Problem {
    pub fn new(kind: ProblemKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn incorrect_structure(message: impl Into<String>) -> Self {
        Self::new(ProblemKind::IncorrectStructure, message)
    }

    pub fn missing_file(message: impl Into<String>) -> Self {
        Self::new(ProblemKind::MissingFile, message)
    }

    pub fn missing_config_element(message: impl Into<String>) -> Self {
        Self::new(ProblemKind::MissingConfigElement, message)
    }

    /// Wraps an underlying I/O, archive or parse failure.
    pub fn checked(context: impl fmt::Display, cause: impl fmt::Display) -> Self {
        Self::new(ProblemKind::CheckedFailure, format!("{context}: {cause}"))
    }
}

/// Failure of a top-level resolution: exactly one fatal problem, plus the
/// warnings that had been recorded before it was raised.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unable to create plugin from {}: {problem}", location.display())]
pub struct PluginCreationFail {
    pub location: PathBuf,
    pub problem: Problem,
    pub warnings: Vec<Problem>,
}

pub type ProblemResult<T> = std::result::Result<T, Problem>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_display_includes_kind() {
        let problem = Problem::missing_file("META-INF/plugin.xml is not found");
        assert_eq!(
            problem.to_string(),
            "missing file: META-INF/plugin.xml is not found"
        );
    }

    #[test]
    fn test_checked_problem_wraps_cause() {
        let cause = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "truncated");
        let problem = Problem::checked("Unable to read plugin file a.zip", cause);
        assert_eq!(problem.kind, ProblemKind::CheckedFailure);
        assert!(problem.message.ends_with("truncated"));
    }
}
