// ─── Candidate Locators ───
// Each locator inspects one source of content (the game distribution, the
// surrounding search path) and contributes candidates to the pipeline.
// The set is fixed; there is no runtime plugin discovery here.

pub mod classpath;
pub mod game;

use crate::context::LaunchContext;
use crate::error::DiscoveryResult;
use crate::pipeline::DiscoveryPipeline;

pub use classpath::ClasspathLibrariesLocator;
pub use game::GameLocator;

/// Sentinel priorities bounding the ordering. Ordinary locators sit at 0.
pub const HIGHEST_PRIORITY: i32 = i32::MAX;
pub const LOWEST_PRIORITY: i32 = i32::MIN;

pub trait CandidateLocator {
    fn name(&self) -> &'static str;

    fn priority(&self) -> i32 {
        0
    }

    /// Inspect the environment and contribute candidates. Recoverable
    /// problems are reported as issues on the pipeline; an `Err` is reserved
    /// for unexpected faults and converted to an error issue by the caller.
    fn find_candidates(
        &self,
        context: &LaunchContext,
        pipeline: &mut DiscoveryPipeline,
    ) -> DiscoveryResult<()>;
}

/// A locator that always faults, for exercising the pipeline's boundary
/// handling.
#[cfg(test)]
pub struct FaultingLocator;

#[cfg(test)]
impl CandidateLocator for FaultingLocator {
    fn name(&self) -> &'static str {
        "faulting locator"
    }

    fn find_candidates(
        &self,
        _context: &LaunchContext,
        _pipeline: &mut DiscoveryPipeline,
    ) -> DiscoveryResult<()> {
        Err(crate::error::DiscoveryError::InvalidLayout(
            "simulated locator fault".to_string(),
        ))
    }
}

/// Dispatcher without `Box<dyn>` — the locator set is closed.
pub enum Locator {
    Game(GameLocator),
    ClasspathLibraries(ClasspathLibrariesLocator),
    #[cfg(test)]
    Faulting(FaultingLocator),
}

impl Locator {
    /// The standard locator set, in registration order.
    pub fn defaults() -> Vec<Locator> {
        vec![
            Locator::Game(GameLocator),
            Locator::ClasspathLibraries(ClasspathLibrariesLocator),
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Locator::Game(l) => l.name(),
            Locator::ClasspathLibraries(l) => l.name(),
            #[cfg(test)]
            Locator::Faulting(l) => l.name(),
        }
    }

    pub fn priority(&self) -> i32 {
        match self {
            Locator::Game(l) => l.priority(),
            Locator::ClasspathLibraries(l) => l.priority(),
            #[cfg(test)]
            Locator::Faulting(l) => l.priority(),
        }
    }

    pub fn find_candidates(
        &self,
        context: &LaunchContext,
        pipeline: &mut DiscoveryPipeline,
    ) -> DiscoveryResult<()> {
        match self {
            Locator::Game(l) => l.find_candidates(context, pipeline),
            Locator::ClasspathLibraries(l) => l.find_candidates(context, pipeline),
            #[cfg(test)]
            Locator::Faulting(l) => l.find_candidates(context, pipeline),
        }
    }
}
