use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One revision of a topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionRecord {
  /// 1 for the first revision of a topic, then strictly increasing
  pub revision_number: u32,
  pub revision_date: NaiveDate,
  /// Self-reported confidence, 0-100
  pub confidence_level: u8,
  pub next_revision_date: NaiveDate,
}

/// Derived difficulty view of a topic.
///
/// Always recomputed from the full history; never patched incrementally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultySnapshot {
  pub difficulty_score: u8,
  pub confidence_level: u8,
  pub time_spent_minutes: u32,
  pub revision_count: u32,
  pub predicted_mastery_date: NaiveDate,
}

/// A topic together with its current snapshot, as fed to the recommender
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicProgress {
  pub topic_id: i64,
  pub name: String,
  pub snapshot: DifficultySnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
  pub id: i64,
  pub name: String,
}
