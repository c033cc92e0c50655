use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the discovery backend.
/// Every module returns `Result<T, DiscoveryError>`.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Installation ────────────────────────────────────
    #[error("Required installation file is missing: {0:?}")]
    MissingInstallation(PathBuf),

    #[error("Archive is present but not readable: {path:?}: {source}")]
    UnreadableArchive {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("Unexpected installation layout: {0}")]
    InvalidLayout(String),

    // ── Maven ───────────────────────────────────────────
    #[error("Invalid Maven coordinate: {0}")]
    InvalidMavenCoordinate(String),
}

/// Convenience alias used throughout the crate.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

impl DiscoveryError {
    /// Attach a path to a bare `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DiscoveryError::Io {
            path: path.into(),
            source,
        }
    }
}

// ── Serialization for diagnostics export ────────────────
// Issues carry their cause; serializing flattens it to the display string.
impl serde::Serialize for DiscoveryError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
