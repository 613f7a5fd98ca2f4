//! Read-compute-append cycles around the pure engine functions.
//!
//! Each call fetches history through the injected [`HistoryStore`], derives
//! "today" from the injected [`Clock`] in the user's day boundary, runs the
//! engine and appends any new record. Nothing is cached between calls.

use chrono::{Duration, FixedOffset, NaiveDate};

use crate::clock::{local_day, local_time, Clock};
use crate::config::RECENT_STUDY_WINDOW_HOURS;
use crate::db::HistoryStore;
use crate::domain::{Recommendation, ReviewRecord, RevisionRecord, TopicProgress};
use crate::error::{EngineError, Result};
use crate::progress::recommend::DEADLINE_WINDOW_DAYS;
use crate::progress::{self, Streak, TopicHistory};
use crate::srs;

pub struct ProgressService<S, C> {
    store: S,
    clock: C,
    offset: FixedOffset,
}

impl<S: HistoryStore, C: Clock> ProgressService<S, C> {
    pub fn new(store: S, clock: C, offset: FixedOffset) -> Self {
        Self { store, clock, offset }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Today in the user's day boundary
    pub fn today(&self) -> NaiveDate {
        local_day(self.clock.now(), self.offset)
    }

    /// Review a flashcard and append the resulting record to its chain
    pub fn record_review(&self, card_id: i64, quality: u8) -> Result<ReviewRecord> {
        let prior = self
            .store
            .latest_review(card_id)?
            .map(|r| r.state())
            .unwrap_or_default();
        let record = srs::next_review(quality, prior, self.today())?;
        self.store.append_review(card_id, &record, self.clock.now())?;

        tracing::info!(
            card_id,
            quality,
            interval_days = record.interval_days,
            next_review = %record.next_review_date,
            "Recorded review"
        );
        Ok(record)
    }

    /// Every review of a flashcard, newest first
    pub fn review_history(&self, card_id: i64) -> Result<Vec<ReviewRecord>> {
        let history = self.store.review_history(card_id)?;
        tracing::debug!(card_id, reviews = history.len(), "Loaded review history");
        Ok(history)
    }

    /// Cards due today or earlier, most overdue first
    pub fn due_cards(&self) -> Result<Vec<i64>> {
        let latest = self.store.latest_reviews()?;
        Ok(srs::due_cards(latest.iter().map(|(id, r)| (*id, r)), self.today()))
    }

    /// Revise a topic and append the resulting record to its chain
    pub fn record_revision(&self, topic_id: i64, confidence_level: u8) -> Result<RevisionRecord> {
        self.require_topic(topic_id)?;
        let revision_count = u32::try_from(self.store.revisions(topic_id)?.len()).unwrap_or(u32::MAX);
        let today = self.today();
        let record = srs::next_revision(confidence_level, revision_count, today)?
            .into_record(confidence_level, today);
        self.store.append_revision(topic_id, &record, self.clock.now())?;

        tracing::info!(
            topic_id,
            confidence_level,
            revision_number = record.revision_number,
            next_revision = %record.next_revision_date,
            "Recorded revision"
        );
        Ok(record)
    }

    /// Log a study session that just ended after `duration_minutes`
    pub fn log_session(&self, topic_id: i64, duration_minutes: u32) -> Result<i64> {
        self.require_topic(topic_id)?;
        let started_at = self.clock.now() - Duration::minutes(duration_minutes as i64);
        let id = self.store.append_session(topic_id, started_at, duration_minutes)?;
        tracing::info!(topic_id, duration_minutes, "Logged study session");
        Ok(id)
    }

    /// Current difficulty snapshot of one topic
    pub fn topic_progress(&self, topic_id: i64) -> Result<TopicProgress> {
        let topic = self.require_topic(topic_id)?;
        let minutes = self.store.topic_study_minutes(topic_id)?;
        let revisions = self.store.revisions(topic_id)?;
        let snapshot = progress::score(minutes, &revisions, self.today());
        tracing::debug!(topic_id, score = snapshot.difficulty_score, "Scored topic");
        Ok(TopicProgress {
            topic_id,
            name: topic.name,
            snapshot,
        })
    }

    /// Snapshots of every topic, scored in parallel
    pub fn all_topic_progress(&self) -> Result<Vec<TopicProgress>> {
        let topics = self.store.topics()?;
        let mut histories = Vec::with_capacity(topics.len());
        for topic in &topics {
            histories.push(TopicHistory {
                topic_id: topic.id,
                total_study_minutes: self.store.topic_study_minutes(topic.id)?,
                revisions: self.store.revisions(topic.id)?,
            });
        }

        let scored = progress::score_topics(&histories, self.today());
        Ok(topics
            .into_iter()
            .zip(scored)
            .map(|(topic, (topic_id, snapshot))| TopicProgress {
                topic_id,
                name: topic.name,
                snapshot,
            })
            .collect())
    }

    /// Activity streak over study sessions and revisions
    pub fn streak(&self) -> Result<Streak> {
        let events = self
            .store
            .activity_timestamps()?
            .into_iter()
            .map(|at| local_time(at, self.offset));
        Ok(progress::compute_streak(events, self.today()))
    }

    /// Ranked suggestions for what to do next
    pub fn recommendations(&self) -> Result<Vec<Recommendation>> {
        let today = self.today();
        let topics = self.all_topic_progress()?;
        let deadlines = self
            .store
            .deadlines_between(today, today + Duration::days(DEADLINE_WINDOW_DAYS))?;
        let recent_minutes = self
            .store
            .study_minutes_since(self.clock.now() - Duration::hours(RECENT_STUDY_WINDOW_HOURS))?;

        Ok(progress::recommend(&topics, &deadlines, recent_minutes, today))
    }

    fn require_topic(&self, topic_id: i64) -> Result<crate::domain::Topic> {
        self.store
            .topic(topic_id)?
            .ok_or(EngineError::UnknownTopic(topic_id))
    }
}
