//! Leniency policy and the validator that applies it.
//!
//! A [`LeniencyPolicy`] is a plain `Copy` value. Deriving a more lenient policy
//! returns a new value, so sibling recursive calls that each relax the same
//! parent never observe each other's relaxations.

use crate::error::{Problem, ProblemKind, ProblemResult};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct LeniencyPolicy {
    ignore_missing_file: bool,
    ignore_missing_config_element: bool,
}

impl LeniencyPolicy {
    /// Both relaxations off: every problem is fatal.
    pub const STRICT: LeniencyPolicy = LeniencyPolicy {
        ignore_missing_file: false,
        ignore_missing_config_element: false,
    };

    pub fn ignoring_missing_file(self) -> Self {
        Self {
            ignore_missing_file: true,
            ..self
        }
    }

    pub fn ignoring_missing_config_element(self) -> Self {
        Self {
            ignore_missing_config_element: true,
            ..self
        }
    }

    pub fn ignores_missing_file(&self) -> bool {
        self.ignore_missing_file
    }

    pub fn ignores_missing_config_element(&self) -> bool {
        self.ignore_missing_config_element
    }

    /// Whether a problem of this kind aborts resolution under this policy.
    pub fn is_fatal(&self, kind: ProblemKind) -> bool {
        match kind {
            ProblemKind::MissingFile => !self.ignore_missing_file,
            ProblemKind::MissingConfigElement => !self.ignore_missing_config_element,
            ProblemKind::IncorrectStructure | ProblemKind::CheckedFailure => true,
        }
    }
}

/// Applies a policy to reported problems.
///
/// Fatal problems come back as `Err`; relaxed ones are appended to the
/// warning list shared by the whole resolution.
pub struct Validator<'a> {
    policy: LeniencyPolicy,
    warnings: &'a mut Vec<Problem>,
}

impl<'a> Validator<'a> {
    pub fn new(policy: LeniencyPolicy, warnings: &'a mut Vec<Problem>) -> Self {
        Self { policy, warnings }
    }

    pub fn policy(&self) -> LeniencyPolicy {
        self.policy
    }

    pub fn report(&mut self, problem: Problem) -> ProblemResult<()> {
        if self.policy.is_fatal(problem.kind) {
            return Err(problem);
        }
        self.warnings.push(problem);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strict_policy_is_default() {
        assert_eq!(LeniencyPolicy::default(), LeniencyPolicy::STRICT);
        assert!(LeniencyPolicy::STRICT.is_fatal(ProblemKind::MissingFile));
        assert!(LeniencyPolicy::STRICT.is_fatal(ProblemKind::MissingConfigElement));
    }

    #[test]
    fn test_derivation_leaves_parent_untouched() {
        let parent = LeniencyPolicy::STRICT;
        let files = parent.ignoring_missing_file();
        let configs = parent.ignoring_missing_config_element();

        assert!(!parent.ignores_missing_file());
        assert!(!parent.ignores_missing_config_element());

        assert!(files.ignores_missing_file());
        assert!(!files.ignores_missing_config_element());

        assert!(configs.ignores_missing_config_element());
        assert!(!configs.ignores_missing_file());
    }

    #[test]
    fn test_structure_and_checked_failures_never_relax() {
        let lenient = LeniencyPolicy::STRICT
            .ignoring_missing_file()
            .ignoring_missing_config_element();
        assert!(lenient.is_fatal(ProblemKind::IncorrectStructure));
        assert!(lenient.is_fatal(ProblemKind::CheckedFailure));
        assert!(!lenient.is_fatal(ProblemKind::MissingFile));
    }

    #[test]
    fn test_validator_records_relaxed_problems() {
        let mut warnings = Vec::new();
        let mut validator =
            Validator::new(LeniencyPolicy::STRICT.ignoring_missing_file(), &mut warnings);

        validator
            .report(Problem::missing_file("lib is absent"))
            .unwrap();
        let fatal = validator
            .report(Problem::missing_config_element("<name> is not specified"))
            .unwrap_err();

        assert_eq!(fatal.kind, ProblemKind::MissingConfigElement);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, ProblemKind::MissingFile);
    }
}
