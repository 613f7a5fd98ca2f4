//! Study session log

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};

use super::{format_timestamp, timestamp_column};

pub fn insert_study_session(
    conn: &Connection,
    topic_id: i64,
    started_at: DateTime<Utc>,
    duration_minutes: u32,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO study_sessions (topic_id, started_at, duration_minutes) VALUES (?1, ?2, ?3)",
        params![topic_id, format_timestamp(started_at), duration_minutes],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Cumulative study minutes for a topic
pub fn get_topic_study_minutes(conn: &Connection, topic_id: i64) -> Result<u32> {
    let total: i64 = conn.query_row(
        "SELECT COALESCE(SUM(duration_minutes), 0) FROM study_sessions WHERE topic_id = ?1",
        params![topic_id],
        |row| row.get(0),
    )?;
    Ok(u32::try_from(total.max(0)).unwrap_or(u32::MAX))
}

/// Study minutes of sessions started at or after `since`, across all topics
pub fn get_study_minutes_since(conn: &Connection, since: DateTime<Utc>) -> Result<u32> {
    // Timestamps share one fixed-width UTC format, so text order is time order
    let total: i64 = conn.query_row(
        "SELECT COALESCE(SUM(duration_minutes), 0) FROM study_sessions WHERE started_at >= ?1",
        params![format_timestamp(since)],
        |row| row.get(0),
    )?;
    Ok(u32::try_from(total.max(0)).unwrap_or(u32::MAX))
}

/// Start times of every study session
pub fn get_session_timestamps(conn: &Connection) -> Result<Vec<DateTime<Utc>>> {
    let mut stmt = conn.prepare("SELECT started_at FROM study_sessions ORDER BY started_at")?;
    let timestamps = stmt
        .query_map([], |row| timestamp_column(row, 0))?
        .collect::<Result<Vec<_>>>()?;
    Ok(timestamps)
}
