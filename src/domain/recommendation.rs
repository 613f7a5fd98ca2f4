use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
  /// Study a weak topic
  Topic,
  /// Revise for an upcoming deadline
  Revision,
  /// Take a break after a long stretch of study
  Break,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
  pub kind: RecommendationKind,
  pub title: String,
  pub description: String,
  /// Higher is more urgent. Only the relative order is meaningful.
  pub priority: i32,
  /// References the entity the recommendation was generated from
  pub metadata: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
  Pending,
  Completed,
}

impl DeadlineStatus {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "pending" => Some(Self::Pending),
      "completed" => Some(Self::Completed),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Completed => "completed",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deadline {
  pub id: i64,
  pub title: String,
  pub due_date: NaiveDate,
  pub status: DeadlineStatus,
}
