//! Patch registry and upgrade runner.
//!
//! A [`PatchRegistry`] holds the ordered patch list of one release branch.
//! Registration validates the table shape (ascending versions, duplicates
//! only where flagged); [`PatchRegistry::run`] applies the list once, in
//! order, and reports what happened to the upgrade driver.

use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::patch::{Patch, PatchContext, PatchFn};

/// Ordered patch list for one release branch
pub struct PatchRegistry {
    branch: u32,
    patches: Vec<Patch>,
}

/// Outcome of a completed run, for the driver's progress record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradeSummary {
    /// Last version whose patch applied successfully
    pub last_applied: Option<u32>,
    /// Every version applied, in execution order
    pub applied: Vec<u32>,
    /// Non-mandatory patches that failed and were skipped over
    pub soft_failures: Vec<u32>,
}

impl PatchRegistry {
    /// Create an empty registry for a release branch (e.g. 7020 for 7.2)
    pub fn new(branch: u32) -> Self {
        Self {
            branch,
            patches: Vec::new(),
        }
    }

    pub fn branch(&self) -> u32 {
        self.branch
    }

    pub fn len(&self) -> usize {
        self.patches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patches.is_empty()
    }

    /// Versions in registration order
    pub fn versions(&self) -> impl Iterator<Item = u32> + '_ {
        self.patches.iter().map(|p| p.version)
    }

    /// Append one patch to the branch table.
    ///
    /// Versions must ascend strictly; registering at the same version as the
    /// previous entry is accepted only when `allow_duplicate` is set. Both
    /// violations are configuration errors caught at startup.
    pub fn register(
        &mut self,
        version: u32,
        allow_duplicate: bool,
        mandatory: bool,
        apply: PatchFn,
    ) -> Result<()> {
        if let Some(last) = self.patches.last() {
            if version < last.version {
                return Err(Error::VersionOrder {
                    version,
                    previous: last.version,
                });
            }
            if version == last.version && !allow_duplicate {
                return Err(Error::DuplicateVersion { version });
            }
        }

        self.patches.push(Patch {
            version,
            allow_duplicate,
            mandatory,
            apply,
        });
        Ok(())
    }

    /// Apply every registered patch once, in ascending version order.
    ///
    /// A failed mandatory patch aborts the run with
    /// [`Error::MandatoryPatchFailed`]; a failed non-mandatory patch is
    /// logged and skipped over. There are no retries and no rollback here:
    /// each patch must leave the database self-consistent even when it
    /// fails, and system-wide re-run policy belongs to the driver.
    pub fn run(&self, ctx: &PatchContext) -> Result<UpgradeSummary> {
        let mut summary = UpgradeSummary::default();

        for patch in &self.patches {
            debug!(version = patch.version, "applying patch");
            match (patch.apply)(ctx) {
                Ok(()) => {
                    summary.applied.push(patch.version);
                    summary.last_applied = Some(patch.version);
                }
                Err(err) if patch.mandatory => {
                    error!(
                        version = patch.version,
                        last_applied = ?summary.last_applied,
                        "mandatory patch failed, aborting upgrade"
                    );
                    return Err(Error::mandatory_failure(patch.version, err));
                }
                Err(err) => {
                    warn!(
                        version = patch.version,
                        error = %err,
                        "optional patch failed, continuing"
                    );
                    summary.soft_failures.push(patch.version);
                }
            }
        }

        info!(
            branch = self.branch,
            applied = summary.applied.len(),
            soft_failures = summary.soft_failures.len(),
            "upgrade branch complete"
        );
        Ok(summary)
    }
}
