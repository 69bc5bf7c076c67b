//! 7.2 maintenance branch patches.

use crate::error::Result;
use crate::patch::PatchContext;
use crate::program::ProgramRole;
use crate::registry::PatchRegistry;

/// Branch start marker, no schema or data change
fn patch_7020000(_ctx: &PatchContext) -> Result<()> {
    Ok(())
}

/// Drop trigger map elements whose backing trigger link rows are gone.
///
/// Server-only: other roles return immediately without touching the
/// database. Deleting zero rows is a success.
fn patch_7020001(ctx: &PatchContext) -> Result<()> {
    if !ctx.has_role(ProgramRole::Server) {
        return Ok(());
    }

    // elementtype 2 = trigger
    ctx.db().execute(
        "DELETE FROM sysmaps_elements
         WHERE elementtype = 2
           AND selementid NOT IN (
               SELECT DISTINCT selementid FROM sysmap_element_trigger
           )",
    )?;

    Ok(())
}

/// Ordered patch table for the 7.2 maintenance line
pub fn registry() -> Result<PatchRegistry> {
    let mut patches = PatchRegistry::new(7020);

    // version, duplicates flag, mandatory flag
    patches.register(7020000, false, true, patch_7020000)?;
    patches.register(7020001, false, false, patch_7020001)?;

    Ok(patches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use crate::program::{ProgramRole, ProgramRoles};

    fn setup_map_tables() -> Database {
        let db = Database::open_in_memory().unwrap();
        db.execute_batch(
            "CREATE TABLE sysmaps_elements (
                 selementid INTEGER PRIMARY KEY,
                 elementtype INTEGER NOT NULL
             );
             CREATE TABLE sysmap_element_trigger (
                 selement_triggerid INTEGER PRIMARY KEY,
                 selementid INTEGER NOT NULL,
                 triggerid INTEGER NOT NULL
             );",
        )
        .unwrap();
        db
    }

    fn element_count(db: &Database) -> i64 {
        db.query_one("SELECT COUNT(*) FROM sysmaps_elements").unwrap()
    }

    #[test]
    fn test_branch_table_shape() {
        let registry = registry().unwrap();
        assert_eq!(registry.branch(), 7020);
        assert_eq!(registry.versions().collect::<Vec<_>>(), vec![7020000, 7020001]);
    }

    #[test]
    fn test_server_run_applies_both_patches() {
        let db = setup_map_tables();
        let ctx = PatchContext::new(&db, ProgramRoles::server());

        let summary = registry().unwrap().run(&ctx).unwrap();
        assert_eq!(summary.applied, vec![7020000, 7020001]);
        assert_eq!(summary.last_applied, Some(7020001));
        assert!(summary.soft_failures.is_empty());
    }

    #[test]
    fn test_guard_issues_no_statements_off_server() {
        // No map tables exist here, so any statement the cleanup patch
        // issued would fail. The guard must return before touching the
        // database.
        let db = Database::open_in_memory().unwrap();
        let ctx = PatchContext::new(&db, ProgramRoles::new([ProgramRole::Agent]));

        let summary = registry().unwrap().run(&ctx).unwrap();
        assert_eq!(summary.last_applied, Some(7020001));
        assert!(summary.soft_failures.is_empty());
    }

    #[test]
    fn test_cleanup_removes_only_orphaned_trigger_elements() {
        let db = setup_map_tables();
        db.execute_batch(
            "INSERT INTO sysmaps_elements (selementid, elementtype) VALUES (1, 2);
             INSERT INTO sysmaps_elements (selementid, elementtype) VALUES (2, 2);
             INSERT INTO sysmaps_elements (selementid, elementtype) VALUES (3, 0);
             INSERT INTO sysmap_element_trigger (selement_triggerid, selementid, triggerid)
                 VALUES (10, 2, 100);",
        )
        .unwrap();

        let ctx = PatchContext::new(&db, ProgramRoles::server());
        patch_7020001(&ctx).unwrap();

        // Element 1 was an orphaned trigger element; 2 is still referenced
        // and 3 is not a trigger element at all.
        assert_eq!(element_count(&db), 2);
        let survivors: i64 = db
            .query_one("SELECT COUNT(*) FROM sysmaps_elements WHERE selementid IN (2, 3)")
            .unwrap();
        assert_eq!(survivors, 2);
    }

    #[test]
    fn test_cleanup_is_idempotent() {
        let db = setup_map_tables();
        db.execute_batch(
            "INSERT INTO sysmaps_elements (selementid, elementtype) VALUES (1, 2);",
        )
        .unwrap();

        let ctx = PatchContext::new(&db, ProgramRoles::server());
        patch_7020001(&ctx).unwrap();
        assert_eq!(element_count(&db), 0);

        // Second run affects zero rows and still succeeds
        patch_7020001(&ctx).unwrap();
        assert_eq!(element_count(&db), 0);
    }
}
