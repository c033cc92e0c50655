use tracing::debug;

use super::{CandidateLocator, LOWEST_PRIORITY};
use crate::context::LaunchContext;
use crate::error::DiscoveryResult;
use crate::pipeline::DiscoveryPipeline;

/// Catch-all: any regular file left on the search path becomes a plain
/// library. Runs last so every other locator gets to claim its paths first.
pub struct ClasspathLibrariesLocator;

impl CandidateLocator for ClasspathLibrariesLocator {
    fn name(&self) -> &'static str {
        "classpath libraries locator"
    }

    fn priority(&self) -> i32 {
        LOWEST_PRIORITY
    }

    fn find_candidates(
        &self,
        context: &LaunchContext,
        pipeline: &mut DiscoveryPipeline,
    ) -> DiscoveryResult<()> {
        // When the top-level application scope is reachable we are not in a
        // nested launch; its search path is not ours to sweep.
        if context.loading_scope.reaches_application() {
            debug!("Skipping search path sweep at application scope");
            return Ok(());
        }

        for entry in &context.search_path {
            if entry.is_file() && !pipeline.is_located(entry) {
                pipeline.add_library(entry);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Distribution, LoadingScope};
    use crate::pipeline::UnitKind;
    use std::fs;

    fn context_with_files(dir: &std::path::Path, nested: bool) -> LaunchContext {
        let jar = dir.join("lib.jar");
        fs::write(&jar, b"zip").unwrap();
        let folder = dir.join("classes");
        fs::create_dir_all(&folder).unwrap();

        let mut context = LaunchContext::new(Distribution::Client);
        context.search_path = vec![jar, folder, dir.join("missing.jar")];
        context.loading_scope = if nested {
            LoadingScope::detached()
        } else {
            LoadingScope::application()
        };
        context
    }

    #[test]
    fn contributes_nothing_at_application_scope() {
        let dir = tempfile::tempdir().unwrap();
        let context = context_with_files(dir.path(), false);

        let mut pipeline = DiscoveryPipeline::new();
        ClasspathLibrariesLocator
            .find_candidates(&context, &mut pipeline)
            .unwrap();
        assert!(pipeline.resolved().is_empty());
    }

    #[test]
    fn sweeps_unclaimed_regular_files_when_nested() {
        let dir = tempfile::tempdir().unwrap();
        let context = context_with_files(dir.path(), true);

        let mut pipeline = DiscoveryPipeline::new();
        ClasspathLibrariesLocator
            .find_candidates(&context, &mut pipeline)
            .unwrap();

        // Only the regular file; directories and missing entries are skipped.
        let resolved = pipeline.resolved();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].kind, UnitKind::Library);
        assert_eq!(resolved[0].unit.roots().len(), 1);
    }

    #[test]
    fn skips_paths_claimed_by_an_earlier_locator() {
        let dir = tempfile::tempdir().unwrap();
        let context = context_with_files(dir.path(), true);

        let mut pipeline = DiscoveryPipeline::new();
        pipeline.claim(&context.search_path[0]);
        ClasspathLibrariesLocator
            .find_candidates(&context, &mut pipeline)
            .unwrap();
        assert!(pipeline.resolved().is_empty());
    }
}
