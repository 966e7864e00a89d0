use crate::cache::ManifestCache;
use plugscope_api::{LeniencyPolicy, ManifestPath, Problem, ProblemResult, Validator};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// State of one top-level resolution, threaded by reference through every
/// recursive call and dropped when the call returns.
pub struct ResolutionContext {
    package: PathBuf,
    cache: ManifestCache,
    warnings: Vec<Problem>,
    /// Manifest paths whose resolution is on the current call stack.
    in_progress: HashSet<ManifestPath>,
}

impl ResolutionContext {
    pub fn new(package: PathBuf) -> Self {
        Self {
            package,
            cache: ManifestCache::new(),
            warnings: Vec::new(),
            in_progress: HashSet::new(),
        }
    }

    pub fn package(&self) -> &Path {
        &self.package
    }

    pub fn cache(&self) -> &ManifestCache {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ManifestCache {
        &mut self.cache
    }

    pub fn validator(&mut self, policy: LeniencyPolicy) -> Validator<'_> {
        Validator::new(policy, &mut self.warnings)
    }

    /// Fatal problems come back as `Err`; relaxed ones become warnings.
    pub fn report(&mut self, policy: LeniencyPolicy, problem: Problem) -> ProblemResult<()> {
        debug!("Reporting {} under {:?}", problem, policy);
        self.validator(policy).report(problem)
    }

    /// Records a problem that never aborts resolution.
    pub fn warn(&mut self, problem: Problem) {
        warn!("{}", problem);
        self.warnings.push(problem);
    }

    /// Marks `path` as being resolved. `false` if it already is.
    pub fn enter(&mut self, path: &ManifestPath) -> bool {
        self.in_progress.insert(path.clone())
    }

    pub fn leave(&mut self, path: &ManifestPath) {
        self.in_progress.remove(path);
    }

    pub fn into_warnings(self) -> Vec<Problem> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plugscope_api::ProblemKind;

    #[test]
    fn test_report_respects_policy() {
        let mut ctx = ResolutionContext::new(PathBuf::from("/plugins/sample"));

        ctx.report(
            LeniencyPolicy::STRICT.ignoring_missing_file(),
            Problem::missing_file("lib is absent"),
        )
        .unwrap();
        let fatal = ctx
            .report(LeniencyPolicy::STRICT, Problem::missing_file("plugin.xml"))
            .unwrap_err();

        assert_eq!(fatal.kind, ProblemKind::MissingFile);
        assert_eq!(ctx.into_warnings().len(), 1);
    }

    #[test]
    fn test_in_progress_tracking() {
        let mut ctx = ResolutionContext::new(PathBuf::from("/plugins/sample"));
        let path = ManifestPath::new("opt.xml");

        assert!(ctx.enter(&path));
        assert!(!ctx.enter(&path));
        ctx.leave(&path);
        assert!(ctx.enter(&path));
    }
}
