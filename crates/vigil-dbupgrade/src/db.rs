//! SQLite access seam for upgrade patches.
//!
//! Patches never hold a connection themselves; they issue statements through
//! [`Database`], which owns the connection for the duration of the upgrade.
//! Any statement error is surfaced as [`Error::Database`] and it is the
//! runner's job to decide whether that aborts the run.

use crate::error::{Error, Result};
use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

/// Database connection wrapper.
///
/// Thread-safe via internal Mutex, although the upgrade runner itself is
/// strictly sequential. All operations acquire the lock.
pub struct Database {
    conn: Mutex<Connection>,
}

impl Database {
    /// Open database at a specific path
    pub fn open_path(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(Error::Database)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (test fixtures and dry runs)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(Error::Database)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Check database connectivity
    pub fn ping(&self) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        conn.execute_batch("SELECT 1").map_err(Error::Database)
    }

    /// Execute a single data-mutating statement, returning rows affected
    pub fn execute(&self, sql: &str) -> Result<usize> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(conn.execute(sql, [])?)
    }

    /// Execute a batch of statements (schema setup, driver bootstrap)
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(conn.execute_batch(sql)?)
    }

    /// Query a single scalar value
    pub fn query_one<T: rusqlite::types::FromSql>(&self, sql: &str) -> Result<T> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        Ok(conn.query_row(sql, [], |row| row.get(0))?)
    }
}
