//! Flashcard review history

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

use super::{date_column, format_date, format_timestamp};
use crate::domain::ReviewRecord;

/// Append a review record to a card's history
pub fn insert_review_record(
    conn: &Connection,
    card_id: i64,
    record: &ReviewRecord,
    reviewed_at: DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO flashcard_reviews
      (card_id, quality, ease_factor, interval_days, repetitions, next_review_date, reviewed_at)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    "#,
        params![
            card_id,
            record.quality,
            record.ease_factor,
            record.interval_days,
            record.repetitions,
            format_date(record.next_review_date),
            format_timestamp(reviewed_at),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Most recent record for a card, if it was ever reviewed
pub fn get_latest_review(conn: &Connection, card_id: i64) -> Result<Option<ReviewRecord>> {
    conn.query_row(
        r#"
    SELECT quality, ease_factor, interval_days, repetitions, next_review_date
    FROM flashcard_reviews
    WHERE card_id = ?1
    ORDER BY id DESC
    LIMIT 1
    "#,
        params![card_id],
        row_to_review_record,
    )
    .optional()
}

/// Full history of a card, newest first
pub fn get_review_history(conn: &Connection, card_id: i64) -> Result<Vec<ReviewRecord>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT quality, ease_factor, interval_days, repetitions, next_review_date
    FROM flashcard_reviews
    WHERE card_id = ?1
    ORDER BY id DESC
    "#,
    )?;

    let records = stmt
        .query_map(params![card_id], row_to_review_record)?
        .collect::<Result<Vec<_>>>()?;

    Ok(records)
}

/// Latest record of every card that has a history, by card id
pub fn get_latest_reviews(conn: &Connection) -> Result<Vec<(i64, ReviewRecord)>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT card_id, quality, ease_factor, interval_days, repetitions, next_review_date
    FROM flashcard_reviews
    WHERE id IN (SELECT MAX(id) FROM flashcard_reviews GROUP BY card_id)
    ORDER BY card_id
    "#,
    )?;

    let latest = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?,
                ReviewRecord {
                    quality: row.get(1)?,
                    ease_factor: row.get(2)?,
                    interval_days: row.get(3)?,
                    repetitions: row.get(4)?,
                    next_review_date: date_column(row, 5)?,
                },
            ))
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(latest)
}

/// Convert a database row to ReviewRecord
fn row_to_review_record(row: &Row) -> Result<ReviewRecord> {
    Ok(ReviewRecord {
        quality: row.get(0)?,
        ease_factor: row.get(1)?,
        interval_days: row.get(2)?,
        repetitions: row.get(3)?,
        next_review_date: date_column(row, 4)?,
    })
}
