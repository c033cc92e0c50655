use std::fmt;

use serde::Serialize;

use crate::error::DiscoveryError;

/// Stable message keys surfaced to the frontend / crash report.
pub mod keys {
    pub const CORRUPTED_INSTALLATION: &str = "discovery.corrupted_installation";
    pub const LOCATOR_FAILURE: &str = "discovery.locator_failure";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

/// One diagnostic produced during discovery. Errors accumulated over a run
/// make the whole run fail; warnings are reported and ignored.
#[derive(Debug, Serialize)]
pub struct Issue {
    pub severity: Severity,
    /// Stable, translatable message key.
    pub key: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<DiscoveryError>,
}

impl Issue {
    pub fn error(key: &'static str) -> Self {
        Self {
            severity: Severity::Error,
            key,
            cause: None,
        }
    }

    pub fn warning(key: &'static str) -> Self {
        Self {
            severity: Severity::Warning,
            key,
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: DiscoveryError) -> Self {
        self.cause = Some(cause);
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {cause}", self.key),
            None => f.write_str(self.key),
        }
    }
}
