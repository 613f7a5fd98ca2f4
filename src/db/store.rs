//! History store boundary.
//!
//! The services read and append record chains only through [`HistoryStore`];
//! records are never updated or deleted once written.

use chrono::{DateTime, NaiveDate, Utc};

use super::{try_lock, DbPool};
use crate::domain::{Deadline, DeadlineStatus, ReviewRecord, RevisionRecord, Topic};
use crate::error::Result;

pub trait HistoryStore {
    /// Most recent review of a flashcard, `None` if it was never reviewed
    fn latest_review(&self, card_id: i64) -> Result<Option<ReviewRecord>>;
    /// Latest review of every reviewed flashcard
    fn latest_reviews(&self) -> Result<Vec<(i64, ReviewRecord)>>;
    /// Full review chain of a flashcard, newest first
    fn review_history(&self, card_id: i64) -> Result<Vec<ReviewRecord>>;
    fn append_review(&self, card_id: i64, record: &ReviewRecord, reviewed_at: DateTime<Utc>) -> Result<i64>;

    fn topic(&self, topic_id: i64) -> Result<Option<Topic>>;
    fn topics(&self) -> Result<Vec<Topic>>;
    /// Revision history of a topic, oldest first
    fn revisions(&self, topic_id: i64) -> Result<Vec<RevisionRecord>>;
    fn append_revision(&self, topic_id: i64, record: &RevisionRecord, recorded_at: DateTime<Utc>) -> Result<i64>;

    fn append_session(&self, topic_id: i64, started_at: DateTime<Utc>, duration_minutes: u32) -> Result<i64>;
    fn topic_study_minutes(&self, topic_id: i64) -> Result<u32>;
    fn study_minutes_since(&self, since: DateTime<Utc>) -> Result<u32>;
    /// Timestamps of every session and revision, unordered
    fn activity_timestamps(&self) -> Result<Vec<DateTime<Utc>>>;

    /// Deadlines due between `from` and `to`, inclusive
    fn deadlines_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Deadline>>;
}

/// SQLite-backed history store sharing the application's connection pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn add_topic(&self, name: &str, created_at: DateTime<Utc>) -> Result<i64> {
        let conn = try_lock(&self.pool)?;
        Ok(super::insert_topic(&conn, name, created_at)?)
    }

    pub fn add_deadline(&self, title: &str, due_date: NaiveDate) -> Result<i64> {
        let conn = try_lock(&self.pool)?;
        Ok(super::insert_deadline(&conn, title, due_date, DeadlineStatus::Pending)?)
    }

    pub fn complete_deadline(&self, id: i64) -> Result<bool> {
        let conn = try_lock(&self.pool)?;
        Ok(super::set_deadline_status(&conn, id, DeadlineStatus::Completed)?)
    }
}

impl HistoryStore for SqliteStore {
    fn latest_review(&self, card_id: i64) -> Result<Option<ReviewRecord>> {
        let conn = try_lock(&self.pool)?;
        Ok(super::get_latest_review(&conn, card_id)?)
    }

    fn latest_reviews(&self) -> Result<Vec<(i64, ReviewRecord)>> {
        let conn = try_lock(&self.pool)?;
        Ok(super::get_latest_reviews(&conn)?)
    }

    fn review_history(&self, card_id: i64) -> Result<Vec<ReviewRecord>> {
        let conn = try_lock(&self.pool)?;
        Ok(super::get_review_history(&conn, card_id)?)
    }

    fn append_review(&self, card_id: i64, record: &ReviewRecord, reviewed_at: DateTime<Utc>) -> Result<i64> {
        let conn = try_lock(&self.pool)?;
        Ok(super::insert_review_record(&conn, card_id, record, reviewed_at)?)
    }

    fn topic(&self, topic_id: i64) -> Result<Option<Topic>> {
        let conn = try_lock(&self.pool)?;
        Ok(super::get_topic(&conn, topic_id)?)
    }

    fn topics(&self) -> Result<Vec<Topic>> {
        let conn = try_lock(&self.pool)?;
        Ok(super::get_topics(&conn)?)
    }

    fn revisions(&self, topic_id: i64) -> Result<Vec<RevisionRecord>> {
        let conn = try_lock(&self.pool)?;
        Ok(super::get_revisions(&conn, topic_id)?)
    }

    fn append_revision(&self, topic_id: i64, record: &RevisionRecord, recorded_at: DateTime<Utc>) -> Result<i64> {
        let conn = try_lock(&self.pool)?;
        Ok(super::insert_revision_record(&conn, topic_id, record, recorded_at)?)
    }

    fn append_session(&self, topic_id: i64, started_at: DateTime<Utc>, duration_minutes: u32) -> Result<i64> {
        let conn = try_lock(&self.pool)?;
        Ok(super::insert_study_session(&conn, topic_id, started_at, duration_minutes)?)
    }

    fn topic_study_minutes(&self, topic_id: i64) -> Result<u32> {
        let conn = try_lock(&self.pool)?;
        Ok(super::get_topic_study_minutes(&conn, topic_id)?)
    }

    fn study_minutes_since(&self, since: DateTime<Utc>) -> Result<u32> {
        let conn = try_lock(&self.pool)?;
        Ok(super::get_study_minutes_since(&conn, since)?)
    }

    fn activity_timestamps(&self) -> Result<Vec<DateTime<Utc>>> {
        let conn = try_lock(&self.pool)?;
        let mut timestamps = super::get_session_timestamps(&conn)?;
        timestamps.extend(super::get_revision_timestamps(&conn)?);
        Ok(timestamps)
    }

    fn deadlines_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Deadline>> {
        let conn = try_lock(&self.pool)?;
        Ok(super::get_deadlines_between(&conn, from, to)?)
    }
}
