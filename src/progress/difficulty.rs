//! Topic difficulty and predicted mastery.
//!
//! Deliberately a simple additive heuristic so every score can be explained:
//! start from 50, add or subtract fixed amounts for long study time, low or
//! high confidence and many revisions, then clamp to 0-100.

use chrono::{Days, NaiveDate};
use rayon::prelude::*;

use crate::domain::{DifficultySnapshot, RevisionRecord};

const BASELINE_SCORE: i32 = 50;

/// Confidence assumed for a topic that was never revised
const NEUTRAL_CONFIDENCE: f64 = 50.0;

/// Focused hours needed per 10 points of missing confidence
const HOURS_PER_CONFIDENCE_STEP: f64 = 2.0;

/// Study pace assumed for the mastery prediction
const HOURS_PER_DAY: f64 = 2.0;

/// Mean confidence over the history, 50 when there is none
pub fn average_confidence(revisions: &[RevisionRecord]) -> f64 {
  if revisions.is_empty() {
    return NEUTRAL_CONFIDENCE;
  }
  let total: f64 = revisions.iter().map(|r| r.confidence_level as f64).sum();
  total / revisions.len() as f64
}

fn time_adjustment(total_study_minutes: u32) -> i32 {
  if total_study_minutes > 300 {
    20
  } else if total_study_minutes > 180 {
    10
  } else {
    0
  }
}

fn confidence_adjustment(confidence_level: u8) -> i32 {
  if confidence_level < 40 {
    20
  } else if confidence_level < 60 {
    10
  } else if confidence_level > 80 {
    -20
  } else {
    0
  }
}

fn revision_adjustment(revision_count: usize) -> i32 {
  if revision_count > 5 {
    15
  } else if revision_count > 3 {
    10
  } else {
    0
  }
}

/// Days of study until the topic is expected to be mastered
pub fn days_to_mastery(avg_confidence: f64) -> u64 {
  let missing = (100.0 - avg_confidence).max(0.0);
  let hours_needed = (missing / 10.0).ceil() * HOURS_PER_CONFIDENCE_STEP;
  (hours_needed / HOURS_PER_DAY).ceil() as u64
}

/// Score a topic from its cumulative study time and full revision history.
///
/// Total over its inputs: an empty history yields the neutral baseline.
pub fn score(
  total_study_minutes: u32,
  revisions: &[RevisionRecord],
  today: NaiveDate,
) -> DifficultySnapshot {
  let avg_confidence = average_confidence(revisions);
  // Bands read the same rounded value the snapshot reports, so the
  // recommender's weak-topic cut agrees with the score.
  let confidence_level = avg_confidence.round().clamp(0.0, 100.0) as u8;

  // No revisions means no confidence evidence: the neutral prior only feeds
  // the mastery prediction.
  let confidence = if revisions.is_empty() {
    0
  } else {
    confidence_adjustment(confidence_level)
  };
  let raw = BASELINE_SCORE
    + time_adjustment(total_study_minutes)
    + confidence
    + revision_adjustment(revisions.len());
  let difficulty_score = raw.clamp(0, 100) as u8;

  let predicted_mastery_date = today
    .checked_add_days(Days::new(days_to_mastery(avg_confidence)))
    .unwrap_or(NaiveDate::MAX);

  DifficultySnapshot {
    difficulty_score,
    confidence_level,
    time_spent_minutes: total_study_minutes,
    revision_count: u32::try_from(revisions.len()).unwrap_or(u32::MAX),
    predicted_mastery_date,
  }
}

/// Study history of one topic, as read from storage
#[derive(Debug, Clone)]
pub struct TopicHistory {
  pub topic_id: i64,
  pub total_study_minutes: u32,
  pub revisions: Vec<RevisionRecord>,
}

/// Score many topics at once. Topics are independent, so the work is spread
/// across the rayon pool; output order follows input order.
pub fn score_topics(histories: &[TopicHistory], today: NaiveDate) -> Vec<(i64, DifficultySnapshot)> {
  histories
    .par_iter()
    .map(|h| (h.topic_id, score(h.total_study_minutes, &h.revisions, today)))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn revisions(confidences: &[u8]) -> Vec<RevisionRecord> {
    confidences
      .iter()
      .enumerate()
      .map(|(i, &confidence_level)| RevisionRecord {
        revision_number: i as u32 + 1,
        revision_date: day(2025, 1, 1),
        confidence_level,
        next_revision_date: day(2025, 1, 2),
      })
      .collect()
  }

  #[test]
  fn test_empty_history_is_neutral() {
    let today = day(2025, 5, 1);
    let snapshot = score(0, &[], today);
    assert_eq!(snapshot.difficulty_score, 50);
    assert_eq!(snapshot.confidence_level, 50);
    assert_eq!(snapshot.revision_count, 0);
    // ceil(50 / 10) * 2 = 10 hours -> 5 days
    assert_eq!(snapshot.predicted_mastery_date, day(2025, 5, 6));
  }

  #[test]
  fn test_long_study_time() {
    let today = day(2025, 5, 1);
    // avg 70: no confidence adjustment
    assert_eq!(score(181, &revisions(&[70]), today).difficulty_score, 60);
    assert_eq!(score(300, &revisions(&[70]), today).difficulty_score, 60);
    assert_eq!(score(301, &revisions(&[70]), today).difficulty_score, 70);
    assert_eq!(score(180, &revisions(&[70]), today).difficulty_score, 50);
  }

  #[test]
  fn test_confidence_bands() {
    let today = day(2025, 5, 1);
    assert_eq!(score(0, &revisions(&[39]), today).difficulty_score, 70);
    assert_eq!(score(0, &revisions(&[40]), today).difficulty_score, 60);
    assert_eq!(score(0, &revisions(&[59]), today).difficulty_score, 60);
    assert_eq!(score(0, &revisions(&[60]), today).difficulty_score, 50);
    assert_eq!(score(0, &revisions(&[80]), today).difficulty_score, 50);
    assert_eq!(score(0, &revisions(&[81]), today).difficulty_score, 30);
  }

  #[test]
  fn test_revision_count_bands() {
    let today = day(2025, 5, 1);
    assert_eq!(score(0, &revisions(&[70; 3]), today).difficulty_score, 50);
    assert_eq!(score(0, &revisions(&[70; 4]), today).difficulty_score, 60);
    assert_eq!(score(0, &revisions(&[70; 5]), today).difficulty_score, 60);
    assert_eq!(score(0, &revisions(&[70; 6]), today).difficulty_score, 65);
  }

  #[test]
  fn test_all_penalties_clamp_to_hundred() {
    // 50 + 20 + 20 + 15 = 105
    let snapshot = score(600, &revisions(&[10; 8]), day(2025, 5, 1));
    assert_eq!(snapshot.difficulty_score, 100);
    assert_eq!(snapshot.revision_count, 8);
    assert_eq!(snapshot.time_spent_minutes, 600);
  }

  #[test]
  fn test_band_uses_reported_confidence() {
    let today = day(2025, 5, 1);
    // mean 59.5 reports as 60: not a weak topic, no +10
    let snapshot = score(0, &revisions(&[59, 60]), today);
    assert_eq!(snapshot.confidence_level, 60);
    assert_eq!(snapshot.difficulty_score, 50);

    let snapshot = score(0, &revisions(&[59, 59]), today);
    assert_eq!(snapshot.confidence_level, 59);
    assert_eq!(snapshot.difficulty_score, 60);
  }

  #[test]
  fn test_reported_confidence_ignores_revision_order() {
    let today = day(2025, 5, 1);
    let oldest_low = score(0, &revisions(&[10, 90]), today);
    let oldest_high = score(0, &revisions(&[90, 10]), today);
    assert_eq!(oldest_low.confidence_level, 50);
    assert_eq!(oldest_low, oldest_high);
  }

  #[test]
  fn test_average_is_mean() {
    assert_eq!(average_confidence(&revisions(&[20, 40, 90])), 50.0);
    assert_eq!(average_confidence(&[]), 50.0);
  }

  #[test]
  fn test_days_to_mastery() {
    assert_eq!(days_to_mastery(100.0), 0);
    // ceil(0.5) * 2 = 2 hours -> 1 day
    assert_eq!(days_to_mastery(95.0), 1);
    assert_eq!(days_to_mastery(50.0), 5);
    // ceil(8.5) * 2 = 18 hours -> 9 days
    assert_eq!(days_to_mastery(15.0), 9);
    assert_eq!(days_to_mastery(0.0), 10);
  }

  #[test]
  fn test_confident_topic_masters_soon() {
    let today = day(2025, 5, 1);
    let snapshot = score(30, &revisions(&[90, 100]), today);
    assert_eq!(snapshot.confidence_level, 95);
    assert_eq!(snapshot.difficulty_score, 30);
    assert_eq!(snapshot.predicted_mastery_date, day(2025, 5, 2));
  }

  #[test]
  fn test_score_topics_keeps_order() {
    let today = day(2025, 5, 1);
    let histories: Vec<TopicHistory> = (0..50)
      .map(|i| TopicHistory {
        topic_id: i,
        total_study_minutes: (i as u32) * 10,
        revisions: revisions(&[(i as u8) * 2]),
      })
      .collect();
    let scored = score_topics(&histories, today);
    assert_eq!(scored.len(), 50);
    for (history, (topic_id, snapshot)) in histories.iter().zip(&scored) {
      assert_eq!(history.topic_id, *topic_id);
      assert_eq!(*snapshot, score(history.total_study_minutes, &history.revisions, today));
    }
  }
}
