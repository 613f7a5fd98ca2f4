//! Topic revision planning.
//!
//! Coarser than flashcard scheduling: intervals come from a fixed table
//! indexed by how many times the topic was revised, and a single confidence
//! scalar shortens the next gap when the learner feels unsure.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::RevisionRecord;
use crate::error::ValidationError;

/// Days until the next revision, indexed by revisions done so far
pub const REVISION_INTERVALS: [u32; 7] = [1, 3, 7, 14, 30, 60, 90];

/// Confidence below which the next revision comes sooner
pub const LOW_CONFIDENCE_THRESHOLD: u8 = 50;

/// Share of the table interval kept for low-confidence revisions, in percent.
/// Integer math keeps floor(90 * 0.7) at 63.
const LOW_CONFIDENCE_PERCENT: u32 = 70;

const MAX_CONFIDENCE: u8 = 100;

/// When and as which number the next revision of a topic happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionPlan {
  pub interval_days: u32,
  pub next_revision_date: NaiveDate,
  pub revision_number: u32,
}

impl RevisionPlan {
  /// The record to append for the revision this plan was computed from
  pub fn into_record(self, confidence_level: u8, revision_date: NaiveDate) -> RevisionRecord {
    RevisionRecord {
      revision_number: self.revision_number,
      revision_date,
      confidence_level,
      next_revision_date: self.next_revision_date,
    }
  }
}

/// Table interval for a topic revised `revision_count` times, capped at 90 days
pub fn base_interval(revision_count: u32) -> u32 {
  let last = REVISION_INTERVALS.len() - 1;
  let index = usize::try_from(revision_count).map_or(last, |i| i.min(last));
  REVISION_INTERVALS[index]
}

/// Plan the next revision of a topic.
///
/// `revision_count` is the number of revisions recorded before this one. A
/// confidence under 50 cuts the table interval to 70%, rounded down, so a
/// shaky first revision comes back the same day.
pub fn next_revision(
  confidence_level: u8,
  revision_count: u32,
  today: NaiveDate,
) -> Result<RevisionPlan, ValidationError> {
  if confidence_level > MAX_CONFIDENCE {
    return Err(ValidationError::ConfidenceOutOfRange(confidence_level));
  }

  let mut interval_days = base_interval(revision_count);
  if confidence_level < LOW_CONFIDENCE_THRESHOLD {
    interval_days = interval_days * LOW_CONFIDENCE_PERCENT / 100;
  }

  let next_revision_date = today
    .checked_add_days(Days::new(interval_days as u64))
    .unwrap_or(NaiveDate::MAX);

  Ok(RevisionPlan {
    interval_days,
    next_revision_date,
    revision_number: revision_count.saturating_add(1),
  })
}
