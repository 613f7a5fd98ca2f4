//! Topics and their revision history

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use super::{date_column, format_date, format_timestamp, timestamp_column};
use crate::domain::{RevisionRecord, Topic};

pub fn insert_topic(conn: &Connection, name: &str, created_at: DateTime<Utc>) -> Result<i64> {
    conn.execute(
        "INSERT INTO topics (name, created_at) VALUES (?1, ?2)",
        params![name, format_timestamp(created_at)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_topic(conn: &Connection, topic_id: i64) -> Result<Option<Topic>> {
    conn.query_row(
        "SELECT id, name FROM topics WHERE id = ?1",
        params![topic_id],
        |row| {
            Ok(Topic {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        },
    )
    .optional()
}

pub fn get_topics(conn: &Connection) -> Result<Vec<Topic>> {
    let mut stmt = conn.prepare("SELECT id, name FROM topics ORDER BY id")?;
    let topics = stmt
        .query_map([], |row| {
            Ok(Topic {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;
    Ok(topics)
}

/// Append a revision record to a topic's history
pub fn insert_revision_record(
    conn: &Connection,
    topic_id: i64,
    record: &RevisionRecord,
    recorded_at: DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO topic_revisions
      (topic_id, revision_number, revision_date, confidence_level, next_revision_date, recorded_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
        params![
            topic_id,
            record.revision_number,
            format_date(record.revision_date),
            record.confidence_level,
            format_date(record.next_revision_date),
            format_timestamp(recorded_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Revision history of a topic, oldest first
pub fn get_revisions(conn: &Connection, topic_id: i64) -> Result<Vec<RevisionRecord>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT revision_number, revision_date, confidence_level, next_revision_date
    FROM topic_revisions
    WHERE topic_id = ?1
    ORDER BY revision_number
    "#,
    )?;

    let revisions = stmt
        .query_map(params![topic_id], row_to_revision_record)?
        .collect::<Result<Vec<_>>>()?;

    Ok(revisions)
}

/// Wall-clock times of every recorded revision, across all topics
pub fn get_revision_timestamps(conn: &Connection) -> Result<Vec<DateTime<Utc>>> {
    let mut stmt = conn.prepare("SELECT recorded_at FROM topic_revisions ORDER BY id")?;
    let timestamps = stmt
        .query_map([], |row| timestamp_column(row, 0))?
        .collect::<Result<Vec<_>>>()?;
    Ok(timestamps)
}

/// Convert a database row to RevisionRecord
fn row_to_revision_record(row: &Row) -> Result<RevisionRecord> {
    Ok(RevisionRecord {
        revision_number: row.get(0)?,
        revision_date: date_column(row, 1)?,
        confidence_level: row.get(2)?,
        next_revision_date: date_column(row, 3)?,
    })
}
