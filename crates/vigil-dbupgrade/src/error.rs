//! Error types for vigil-dbupgrade.

use thiserror::Error;

/// Result type alias using the crate Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while registering or running upgrade patches
#[derive(Error, Debug)]
pub enum Error {
    // Database errors
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("database lock poisoned")]
    LockPoisoned,

    // Registration errors. These are configuration mistakes in a patch
    // table and surface at startup, before anything runs.
    #[error("patch version {version} already registered without the duplicates flag")]
    DuplicateVersion { version: u32 },

    #[error("patch version {version} registered after {previous}; versions must ascend")]
    VersionOrder { version: u32, previous: u32 },

    // Run errors
    #[error("mandatory patch {version} failed: {source}")]
    MandatoryPatchFailed {
        version: u32,
        #[source]
        source: Box<Error>,
    },

    // Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] crate::config::ConfigValidationError),

    #[error("configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a patch failure that must abort the upgrade run
    pub(crate) fn mandatory_failure(version: u32, source: Error) -> Self {
        Self::MandatoryPatchFailed {
            version,
            source: Box::new(source),
        }
    }

    /// Check if this error aborted an upgrade run
    pub fn is_mandatory_failure(&self) -> bool {
        matches!(self, Self::MandatoryPatchFailed { .. })
    }

    /// Version of the mandatory patch that aborted the run, if any
    pub fn failed_version(&self) -> Option<u32> {
        match self {
            Self::MandatoryPatchFailed { version, .. } => Some(*version),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mandatory_failure_reports_version() {
        let err = Error::mandatory_failure(7020001, Error::LockPoisoned);
        assert!(err.is_mandatory_failure());
        assert_eq!(err.failed_version(), Some(7020001));
        assert!(err.to_string().contains("7020001"));
    }

    #[test]
    fn test_other_errors_have_no_failed_version() {
        let err = Error::DuplicateVersion { version: 5 };
        assert!(!err.is_mandatory_failure());
        assert_eq!(err.failed_version(), None);
    }
}
