//! Patch units and the context they run in.

use crate::db::Database;
use crate::error::Result;
use crate::program::{ProgramRole, ProgramRoles};

/// What a patch sees while it runs: the open database and the roles of the
/// current process. The context owns neither; both belong to the driver.
pub struct PatchContext<'a> {
    db: &'a Database,
    roles: ProgramRoles,
}

impl<'a> PatchContext<'a> {
    pub fn new(db: &'a Database, roles: ProgramRoles) -> Self {
        Self { db, roles }
    }

    pub fn db(&self) -> &Database {
        self.db
    }

    /// Guard test used by role-specific patches
    pub fn has_role(&self, role: ProgramRole) -> bool {
        self.roles.contains(role)
    }
}

/// A patch body. Returning Err marks the patch as failed; whether that
/// aborts the run depends on the entry's mandatory flag.
pub type PatchFn = fn(&PatchContext) -> Result<()>;

/// One versioned, self-contained database change unit.
///
/// Immutable once registered; constructed only through
/// [`PatchRegistry::register`](crate::registry::PatchRegistry::register).
#[derive(Debug, Clone)]
pub struct Patch {
    pub version: u32,
    pub allow_duplicate: bool,
    pub mandatory: bool,
    pub apply: PatchFn,
}
