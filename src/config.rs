//! Application configuration.
//!
//! Values are resolved with priority config.toml > environment (.env is
//! loaded first) > built-in default. Algorithm tuning constants are not
//! configurable; they live next to the scheduler or scorer that uses them.

use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::clock::offset_from_minutes;
use crate::paths;

/// Config file looked up in the working directory
pub const CONFIG_FILE: &str = "config.toml";

/// Log filter used when neither config nor environment sets one
pub const DEFAULT_LOG_FILTER: &str = "study_progress=info";

/// Trailing window for the break recommendation, in hours
pub const RECENT_STUDY_WINDOW_HOURS: i64 = 24;

// ==================== File format ====================

/// Configuration file structure for config.toml
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    database: Option<DatabaseSection>,
    study: Option<StudySection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Deserialize)]
struct DatabaseSection {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StudySection {
    /// Minutes east of UTC used to cut calendar days
    utc_offset_minutes: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct LoggingSection {
    filter: Option<String>,
}

// ==================== Resolved configuration ====================

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub utc_offset_minutes: i32,
    pub log_filter: String,
}

impl Config {
    /// Load from config.toml, .env and the process environment
    pub fn load() -> Self {
        // Load .env file if present
        let _ = dotenvy::dotenv();
        let file = read_config_file(Path::new(CONFIG_FILE));
        Self::resolve(file, |key| std::env::var(key).ok())
    }

    fn resolve(file: Option<ConfigFile>, env: impl Fn(&str) -> Option<String>) -> Self {
        let file = file.unwrap_or_default();

        let database_path = file
            .database
            .and_then(|db| db.path)
            .or_else(|| env("DATABASE_PATH"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(paths::db_path()));

        let utc_offset_minutes = file
            .study
            .and_then(|s| s.utc_offset_minutes)
            .or_else(|| env("STUDY_UTC_OFFSET_MINUTES").and_then(|v| v.trim().parse().ok()))
            .unwrap_or(0);

        let log_filter = file
            .logging
            .and_then(|l| l.filter)
            .or_else(|| env("STUDY_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            database_path,
            utc_offset_minutes,
            log_filter,
        }
    }

    /// The user's day boundary
    pub fn utc_offset(&self) -> FixedOffset {
        offset_from_minutes(self.utc_offset_minutes)
    }
}

fn read_config_file(path: &Path) -> Option<ConfigFile> {
    let contents = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<ConfigFile>(&contents) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Ignoring malformed {}: {}", path.display(), e);
            None
        }
    }
}
