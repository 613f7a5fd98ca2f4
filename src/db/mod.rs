pub mod deadlines;
pub mod reviews;
pub mod revisions;
pub mod schema;
pub mod sessions;
pub mod store;

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, Result, Row};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::EngineError;

// Re-export all public items from submodules
pub use deadlines::*;
pub use reviews::*;
pub use revisions::*;
pub use schema::run_migrations;
pub use sessions::*;
pub use store::{HistoryStore, SqliteStore};

pub type DbPool = Arc<Mutex<Connection>>;

/// Extension trait for logging errors before discarding them
pub trait LogOnError<T> {
    /// Log the error at warn level and return None
    fn log_warn(self, context: &str) -> Option<T>;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
    fn log_warn(self, context: &str) -> Option<T> {
        match self {
            Ok(v) => Some(v),
            Err(e) => {
                tracing::warn!("{}: {}", context, e);
                None
            }
        }
    }
}

/// Try to acquire the database lock, returning an error if poisoned
pub fn try_lock(pool: &DbPool) -> std::result::Result<MutexGuard<'_, Connection>, EngineError> {
  pool.lock().map_err(|_: PoisonError<_>| {
    tracing::error!("Database mutex poisoned - a thread panicked while holding the lock");
    EngineError::Unavailable
  })
}

pub fn init_db(path: &Path) -> Result<DbPool> {
  if let Some(parent) = path.parent() {
    std::fs::create_dir_all(parent).log_warn("Could not create database directory");
  }

  // Create backup before migrations if database exists
  if path.exists() {
    let backup_path = path.with_extension("db.backup");
    std::fs::copy(path, &backup_path).log_warn("Could not create database backup");
  }

  let conn = Connection::open(path)?;
  run_migrations(&conn)?;
  tracing::info!("Opened study database at {}", path.display());
  Ok(Arc::new(Mutex::new(conn)))
}

// ==================== Column codecs ====================

const DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn format_date(date: NaiveDate) -> String {
  date.format(DATE_FORMAT).to_string()
}

/// Fixed-width UTC timestamp, so text comparison in SQL is chronological
pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
  at.to_rfc3339_opts(SecondsFormat::Secs, false)
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

pub(crate) fn date_column(row: &Row, idx: usize) -> Result<NaiveDate> {
  let raw: String = row.get(idx)?;
  NaiveDate::parse_from_str(&raw, DATE_FORMAT).map_err(|e| conversion_error(idx, e))
}

pub(crate) fn timestamp_column(row: &Row, idx: usize) -> Result<DateTime<Utc>> {
  let raw: String = row.get(idx)?;
  DateTime::parse_from_rfc3339(&raw)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| conversion_error(idx, e))
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_timestamp_format_is_fixed_width() {
    let a = Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap();
    let b = a + chrono::Duration::milliseconds(1500);
    assert_eq!(format_timestamp(a), "2025-02-01T09:00:00+00:00");
    assert_eq!(format_timestamp(a).len(), format_timestamp(b).len());
  }

  #[test]
  fn test_log_warn() {
    let err: std::result::Result<u32, String> = Err("boom".into());
    assert_eq!(err.log_warn("ctx"), None);
    let ok: std::result::Result<u32, String> = Ok(7);
    assert_eq!(ok.log_warn("ctx"), Some(7));
  }

  #[test]
  fn test_init_db_creates_file_and_backup() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("nested/study.db");
    init_db(&path).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("db.backup").exists());

    init_db(&path).unwrap();
    assert!(path.with_extension("db.backup").exists());
  }

  #[test]
  fn test_poisoned_pool_is_unavailable() {
    let pool: DbPool = Arc::new(Mutex::new(Connection::open_in_memory().unwrap()));
    let clone = Arc::clone(&pool);
    let _ = std::thread::spawn(move || {
      let _guard = clone.lock().unwrap();
      panic!("poison the lock");
    })
    .join();
    assert!(matches!(try_lock(&pool), Err(EngineError::Unavailable)));
  }
}
