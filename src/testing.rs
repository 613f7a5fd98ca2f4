//! Test utilities for database setup.
//!
//! Reuses the authoritative migrations so test schemas never drift from
//! production.

use rusqlite::Connection;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::db::{self, SqliteStore};

/// Test environment with a migrated study database in a temporary directory.
///
/// The directory (and database) is removed when dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub temp: TempDir,
    /// Direct connection for the `db` function tests
    pub conn: Connection,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let conn = Connection::open(temp.path().join("study.db"))?;
        db::run_migrations(&conn)?;

        Ok(Self { temp, conn })
    }

    pub fn db_path(&self) -> PathBuf {
        self.temp.path().join("study.db")
    }

    /// A pooled store on the same database file as `conn`
    pub fn store(&self) -> SqliteStore {
        let pool = db::init_db(&self.db_path()).expect("open test database");
        SqliteStore::new(pool)
    }
}
