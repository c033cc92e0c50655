// ─── Quarry Discovery Core ───
// Archive discovery and composition pipeline for Minecraft mod loading.
//
// Architecture:
//   context   — external launch inputs (distribution, versions, search path)
//   maven     — coordinate model + local repository path resolution
//   content   — content units: ordered root overlays with entry filters
//   locator   — game + classpath locators, priority-ranked
//   pipeline  — per-run orchestrator: claims, resolved units, issues
//   conflict  — obfuscated entry-point pre-claiming
//   cache     — cross-process archive freshness records
//
// One discovery run happens at process startup: the pipeline drives every
// locator in priority order and hands the resolved units plus issues to the
// module builder, which lives outside this crate.

pub mod cache;
pub mod conflict;
pub mod content;
pub mod context;
pub mod error;
pub mod locator;
pub mod maven;
pub mod pipeline;

pub use cache::FileCacheKey;
pub use content::{ContentUnit, ContentUnitBuilder};
pub use context::{Distribution, LaunchContext, LoadingScope, VersionInfo};
pub use error::{DiscoveryError, DiscoveryResult};
pub use locator::{CandidateLocator, ClasspathLibrariesLocator, GameLocator, Locator};
pub use maven::MavenArtifact;
pub use pipeline::{
    DiscoveryAttributes, DiscoveryOutcome, DiscoveryPipeline, Issue, ResolvedUnit, Severity,
    Trust, UnitKind,
};
