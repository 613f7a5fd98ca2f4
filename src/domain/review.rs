use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ease factor every new flashcard starts from
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Floor under which the ease factor may never drop
pub const MIN_EASE_FACTOR: f64 = 1.3;

/// Scheduling state carried from one review of a flashcard to the next.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewState {
  pub ease_factor: f64,
  pub interval_days: u32,
  pub repetitions: u32,
}

impl Default for ReviewState {
  /// State of a flashcard that has never been reviewed
  fn default() -> Self {
    Self {
      ease_factor: DEFAULT_EASE_FACTOR,
      interval_days: 1,
      repetitions: 0,
    }
  }
}

/// One review event of a flashcard.
///
/// Records are immutable: a new review appends a new record derived from the
/// previous one rather than updating it in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
  pub quality: u8,
  pub ease_factor: f64,
  pub interval_days: u32,
  pub repetitions: u32,
  pub next_review_date: NaiveDate,
}

impl ReviewRecord {
  /// State the next review of the same flashcard starts from
  pub fn state(&self) -> ReviewState {
    ReviewState {
      ease_factor: self.ease_factor,
      interval_days: self.interval_days,
      repetitions: self.repetitions,
    }
  }
}
