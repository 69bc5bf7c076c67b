//! vigil-dbupgrade - versioned database patches for the Vigil monitoring stack
//!
//! This crate holds the patch registry and runner used when upgrading a Vigil
//! database from one release to the next:
//!
//! - **db**: SQLite access seam that patches issue statements through
//! - **program**: process role identification (server, proxy, agent, ...)
//! - **patch**: individual patch units and the context they run in
//! - **registry**: ordered patch registration and the upgrade runner
//! - **patches**: shipped patch branches, one module per release line
//! - **config**: upgrade process configuration
//!
//! The upgrade driver builds a branch registry (for example
//! [`patches::v7_2::registry`]), constructs a [`PatchContext`] from its open
//! database and the configured process roles, and calls
//! [`PatchRegistry::run`]. Version persistence, locking and transaction
//! boundaries stay with the driver.

pub mod config;
pub mod db;
pub mod error;
pub mod patch;
pub mod patches;
pub mod program;
pub mod registry;

// Re-export commonly used types
pub use config::UpgradeConfig;
pub use db::Database;
pub use error::{Error, Result};
pub use patch::{Patch, PatchContext, PatchFn};
pub use program::{ProgramRole, ProgramRoles};
pub use registry::{PatchRegistry, UpgradeSummary};
