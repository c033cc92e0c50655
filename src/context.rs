// ─── Launch Context ───
// External inputs to a discovery run. The caller (argument/config parsing
// lives outside this crate) fills these in; discovery only reads them.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Which side of the game this process hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    Client,
    DedicatedServer,
}

/// Versions supplied on the command line in production. Both stay `None` in
/// development layouts, where the jars are already on the search path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VersionInfo {
    pub game_version: Option<String>,
    pub loader_version: Option<String>,
}

/// Kind of a single link in the loading-scope chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    /// The process-wide top-level loading scope.
    Application,
    /// A nested, plugin-style loading scope with its own search path.
    Plugin,
}

/// The chain of loading scopes the discovery run executes under, innermost
/// first. Mirrors a classloader parent chain: a scope whose chain reaches
/// the application scope is running at the top level.
#[derive(Debug, Clone)]
pub struct LoadingScope {
    kind: ScopeKind,
    parent: Option<Box<LoadingScope>>,
}

impl LoadingScope {
    pub fn application() -> Self {
        Self {
            kind: ScopeKind::Application,
            parent: None,
        }
    }

    /// A plugin scope detached from the application chain.
    pub fn detached() -> Self {
        Self {
            kind: ScopeKind::Plugin,
            parent: None,
        }
    }

    /// A plugin scope delegating to `parent`.
    pub fn nested_in(parent: LoadingScope) -> Self {
        Self {
            kind: ScopeKind::Plugin,
            parent: Some(Box::new(parent)),
        }
    }

    /// Walk the parent chain looking for the top-level application scope.
    pub fn reaches_application(&self) -> bool {
        let mut scope = Some(self);
        while let Some(current) = scope {
            if current.kind == ScopeKind::Application {
                return true;
            }
            scope = current.parent.as_deref();
        }
        false
    }
}

/// Everything a locator may consult about the environment.
#[derive(Debug, Clone)]
pub struct LaunchContext {
    pub distribution: Distribution,
    pub version_info: VersionInfo,
    /// Root of the Maven-style libraries tree, when launching in production.
    pub libraries_root: Option<PathBuf>,
    /// Entries of the active search path, classpath-style: jars and exploded
    /// directories, in order.
    pub search_path: Vec<PathBuf>,
    pub loading_scope: LoadingScope,
}

impl LaunchContext {
    pub fn new(distribution: Distribution) -> Self {
        Self {
            distribution,
            version_info: VersionInfo::default(),
            libraries_root: None,
            search_path: Vec::new(),
            loading_scope: LoadingScope::application(),
        }
    }
}
