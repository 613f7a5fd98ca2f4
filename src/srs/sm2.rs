use chrono::{Days, NaiveDate};

use crate::domain::{ReviewRecord, ReviewState, MIN_EASE_FACTOR};
use crate::error::ValidationError;

const MAX_QUALITY: u8 = 5;

/// Quality below which a recall counts as failed
const PASSING_QUALITY: u8 = 3;

/// Interval after the second consecutive successful review
const SECOND_INTERVAL_DAYS: u32 = 6;

fn validate(quality: u8, prior: &ReviewState) -> Result<(), ValidationError> {
  if quality > MAX_QUALITY {
    return Err(ValidationError::QualityOutOfRange(quality));
  }
  if !prior.ease_factor.is_finite() || prior.ease_factor < MIN_EASE_FACTOR {
    return Err(ValidationError::EaseFactorTooLow(prior.ease_factor));
  }
  if prior.interval_days == 0 {
    return Err(ValidationError::ZeroInterval);
  }
  Ok(())
}

/// New ease factor after a review of the given quality, floored at 1.3
pub fn next_ease_factor(quality: u8, prior_ease: f64) -> f64 {
  let q = quality as f64;
  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  (prior_ease + ease_delta).max(MIN_EASE_FACTOR)
}

/// Schedule the next review of a flashcard (SM-2).
///
/// `prior` is the state of the most recent record for the card, or
/// `ReviewState::default()` for a card that was never reviewed. A failed
/// recall (quality < 3) always resets to a one-day interval.
pub fn next_review(
  quality: u8,
  prior: ReviewState,
  today: NaiveDate,
) -> Result<ReviewRecord, ValidationError> {
  validate(quality, &prior)?;

  let ease_factor = next_ease_factor(quality, prior.ease_factor);

  let (interval_days, repetitions) = if quality < PASSING_QUALITY {
    // Failed review: reset
    (1, 0)
  } else {
    let interval = match prior.repetitions {
      0 => 1,
      1 => SECOND_INTERVAL_DAYS,
      _ => ((prior.interval_days as f64) * ease_factor)
        .round()
        .clamp(1.0, u32::MAX as f64) as u32,
    };
    (interval, prior.repetitions.saturating_add(1))
  };

  let next_review_date = today
    .checked_add_days(Days::new(interval_days as u64))
    .unwrap_or(NaiveDate::MAX);

  Ok(ReviewRecord {
    quality,
    ease_factor,
    interval_days,
    repetitions,
    next_review_date,
  })
}

/// Whether a card whose latest record is `record` is due on `today`
pub fn is_due(record: &ReviewRecord, today: NaiveDate) -> bool {
  record.next_review_date <= today
}

/// Select due cards from `(card_id, latest record)` pairs.
///
/// Most overdue first; ties by card id.
pub fn due_cards<'a, I>(latest: I, today: NaiveDate) -> Vec<i64>
where
  I: IntoIterator<Item = (i64, &'a ReviewRecord)>,
{
  let mut due: Vec<(NaiveDate, i64)> = latest
    .into_iter()
    .filter(|(_, record)| is_due(record, today))
    .map(|(card_id, record)| (record.next_review_date, card_id))
    .collect();
  due.sort();
  due.into_iter().map(|(_, card_id)| card_id).collect()
}
