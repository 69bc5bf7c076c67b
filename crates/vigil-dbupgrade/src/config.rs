//! Upgrade process configuration.
//!
//! The driver tells this component two things: where the database lives and
//! which roles the current process is acting as. Everything else (stored
//! schema version, branch selection) stays on the driver side.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::program::{ProgramRole, ProgramRoles};

/// Upgrade configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpgradeConfig {
    /// Path to the SQLite database file
    pub database_path: PathBuf,

    /// Roles the current process is acting as
    pub roles: Vec<ProgramRole>,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("vigil.db"),
            roles: vec![ProgramRole::Server],
        }
    }
}

impl UpgradeConfig {
    /// Create a config with the given database path and default roles
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            ..Default::default()
        }
    }

    /// Replace the role list
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = ProgramRole>) -> Self {
        self.roles = roles.into_iter().collect();
        self
    }

    /// Role set for building a patch context
    pub fn program_roles(&self) -> ProgramRoles {
        ProgramRoles::new(self.roles.iter().copied())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::MissingDatabasePath);
        }
        if self.roles.is_empty() {
            return Err(ConfigValidationError::NoRoles);
        }
        Ok(())
    }

    /// Parse and validate a TOML configuration string
    pub fn from_toml_str(s: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> crate::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("database_path is required")]
    MissingDatabasePath,

    #[error("at least one program role is required")]
    NoRoles,
}
