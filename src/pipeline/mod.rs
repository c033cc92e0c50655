// ─── Discovery Pipeline ───
// Owns all mutable state of one discovery run: the claimed-path set, the
// resolved units and the accumulated issues. Locators contribute through
// the methods below and never touch the containers directly. One instance
// is built per run and discarded with its output.

pub mod issue;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, error, info};

use crate::content::ContentUnit;
use crate::context::LaunchContext;
use crate::locator::Locator;

pub use issue::{keys, Issue, Severity};

/// How the external module builder should treat a resolved unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// A fully-built mod content unit.
    Mod,
    /// A plain support library, never inspected for mod metadata.
    Library,
    /// A bare path left for the module builder to classify.
    Candidate,
}

/// Trust level of the locator that produced a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trust {
    /// Shipped with the loader itself (the game locator).
    System,
    /// Discovered from the surrounding environment.
    #[default]
    Environment,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DiscoveryAttributes {
    /// Name of the locator that contributed the unit. Filled in by the
    /// pipeline when left unset.
    pub locator: Option<&'static str>,
    pub trust: Trust,
    /// Version metadata for the module builder, when the locator knows it.
    pub version: Option<String>,
}

impl DiscoveryAttributes {
    pub fn system(version: Option<String>) -> Self {
        Self {
            locator: None,
            trust: Trust::System,
            version,
        }
    }
}

/// Final output item: a content unit plus the metadata the module builder
/// needs to turn it into an executable unit.
#[derive(Debug)]
pub struct ResolvedUnit {
    pub unit: ContentUnit,
    pub kind: UnitKind,
    pub attributes: DiscoveryAttributes,
}

/// Result of one full discovery run.
#[derive(Debug)]
pub struct DiscoveryOutcome {
    pub resolved: Vec<ResolvedUnit>,
    pub issues: Vec<Issue>,
}

impl DiscoveryOutcome {
    /// Any error-severity issue makes the run unusable downstream.
    pub fn has_errors(&self) -> bool {
        self.issues.iter().any(Issue::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.is_error())
    }
}

/// Claims and contributions are keyed by canonical path, so the same file
/// reached through different spellings is still deduplicated. Paths that do
/// not exist (yet) are keyed by their literal form.
fn canonical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[derive(Default)]
pub struct DiscoveryPipeline {
    located: HashSet<PathBuf>,
    resolved: Vec<ResolvedUnit>,
    issues: Vec<Issue>,
    current_locator: Option<&'static str>,
}

impl DiscoveryPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every locator, highest priority first, and collect the outcome.
    pub fn run(context: &LaunchContext, mut locators: Vec<Locator>) -> DiscoveryOutcome {
        // Stable sort: registration order breaks priority ties.
        locators.sort_by_key(|locator| std::cmp::Reverse(locator.priority()));

        let mut pipeline = DiscoveryPipeline::new();
        for locator in &locators {
            debug!("Running locator: {}", locator.name());
            pipeline.current_locator = Some(locator.name());
            if let Err(e) = locator.find_candidates(context, &mut pipeline) {
                // Locator boundary: unexpected faults become an error issue
                // instead of tearing down the whole run.
                error!("Locator {} failed: {e}", locator.name());
                pipeline.add_issue(Issue::error(keys::LOCATOR_FAILURE).with_cause(e));
            }
        }
        pipeline.current_locator = None;

        info!(
            "Discovery finished: {} unit(s), {} issue(s)",
            pipeline.resolved.len(),
            pipeline.issues.len()
        );
        DiscoveryOutcome {
            resolved: pipeline.resolved,
            issues: pipeline.issues,
        }
    }

    /// Units contributed so far.
    pub fn resolved(&self) -> &[ResolvedUnit] {
        &self.resolved
    }

    /// Issues reported so far.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Whether some locator already consumed `path` in this run.
    pub fn is_located(&self, path: &Path) -> bool {
        self.located.contains(&canonical(path))
    }

    /// Mark `path` consumed without contributing a unit for it. Returns
    /// `false` when it was already claimed.
    pub fn claim(&mut self, path: &Path) -> bool {
        self.located.insert(canonical(path))
    }

    /// Contribute a bare path for generic downstream treatment. Rejected
    /// when the path is already claimed.
    pub fn add_path(&mut self, path: &Path, attributes: DiscoveryAttributes) -> bool {
        self.add_single_root(path, UnitKind::Candidate, attributes)
    }

    /// Contribute a non-mod support library.
    pub fn add_library(&mut self, path: &Path) -> bool {
        self.add_single_root(path, UnitKind::Library, DiscoveryAttributes::default())
    }

    /// Accept a fully-built content unit and claim all of its roots. Roots
    /// the contributing locator claimed up front stay claimed; this never
    /// rejects.
    pub fn add_mod_file(&mut self, unit: ContentUnit, attributes: DiscoveryAttributes) {
        for root in unit.roots() {
            self.located.insert(canonical(root));
        }
        self.push(ResolvedUnit {
            unit,
            kind: UnitKind::Mod,
            attributes,
        });
    }

    /// Always accepted; claims nothing.
    pub fn add_issue(&mut self, issue: Issue) {
        if issue.is_error() {
            error!("Discovery issue: {issue}");
        } else {
            debug!("Discovery issue: {issue}");
        }
        self.issues.push(issue);
    }

    fn add_single_root(
        &mut self,
        path: &Path,
        kind: UnitKind,
        attributes: DiscoveryAttributes,
    ) -> bool {
        if !self.claim(path) {
            debug!("Skipping already-claimed path: {path:?}");
            return false;
        }
        self.push(ResolvedUnit {
            unit: ContentUnit::from_root(path),
            kind,
            attributes,
        });
        true
    }

    fn push(&mut self, mut unit: ResolvedUnit) {
        if unit.attributes.locator.is_none() {
            unit.attributes.locator = self.current_locator;
        }
        self.resolved.push(unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_paths_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("lib.jar");
        std::fs::write(&jar, b"zip").unwrap();

        let mut pipeline = DiscoveryPipeline::new();
        assert!(pipeline.add_library(&jar));
        assert!(!pipeline.add_library(&jar));
        assert!(!pipeline.add_path(&jar, DiscoveryAttributes::default()));
        assert_eq!(pipeline.resolved.len(), 1);
    }

    #[test]
    fn claim_blocks_later_contributions() {
        let dir = tempfile::tempdir().unwrap();
        let jar = dir.path().join("game.jar");
        std::fs::write(&jar, b"zip").unwrap();

        let mut pipeline = DiscoveryPipeline::new();
        assert!(pipeline.claim(&jar));
        assert!(pipeline.is_located(&jar));
        assert!(!pipeline.add_library(&jar));
        assert!(pipeline.resolved.is_empty());
    }

    #[test]
    fn mod_file_claims_every_root() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.jar");
        let b = dir.path().join("b.jar");
        std::fs::write(&a, b"zip").unwrap();
        std::fs::write(&b, b"zip").unwrap();

        let mut pipeline = DiscoveryPipeline::new();
        let unit = crate::content::ContentUnitBuilder::new()
            .root(&a)
            .root(&b)
            .build();
        pipeline.add_mod_file(unit, DiscoveryAttributes::default());
        assert!(pipeline.is_located(&a));
        assert!(pipeline.is_located(&b));
        assert!(!pipeline.add_library(&b));
    }

    #[test]
    fn issues_never_claim_and_errors_flag_the_outcome() {
        let mut pipeline = DiscoveryPipeline::new();
        pipeline.add_issue(Issue::warning(keys::CORRUPTED_INSTALLATION));
        pipeline.add_issue(Issue::error(keys::CORRUPTED_INSTALLATION));

        let outcome = DiscoveryOutcome {
            resolved: pipeline.resolved,
            issues: pipeline.issues,
        };
        assert!(outcome.has_errors());
        assert_eq!(outcome.errors().count(), 1);
    }

    #[test]
    fn locator_fault_is_converted_to_an_error_issue() {
        use crate::context::{Distribution, LaunchContext};
        use crate::locator::{FaultingLocator, Locator};

        let context = LaunchContext::new(Distribution::Client);
        let outcome =
            DiscoveryPipeline::run(&context, vec![Locator::Faulting(FaultingLocator)]);

        assert!(outcome.has_errors());
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].key, keys::LOCATOR_FAILURE);
        assert!(outcome.issues[0].cause.is_some());
        assert!(outcome.resolved.is_empty());
    }

    #[test]
    fn issue_serializes_with_cause_flattened() {
        let issue = Issue::error(keys::CORRUPTED_INSTALLATION).with_cause(
            crate::error::DiscoveryError::MissingInstallation("client.jar".into()),
        );
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["severity"], "error");
        assert_eq!(json["key"], keys::CORRUPTED_INSTALLATION);
        assert!(json["cause"].as_str().unwrap().contains("client.jar"));
    }
}
