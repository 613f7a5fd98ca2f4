//! Consecutive-day activity streaks.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Run of active days ending today or yesterday, 0 once lapsed
    pub current: u32,
    /// Longest run of consecutive active days ever seen
    pub longest: u32,
}

/// Compute the current and longest streak from activity timestamps.
///
/// Timestamps must already be in the user's local time; each one is reduced
/// to its calendar day. Days after `today` are ignored.
pub fn compute_streak<I>(events: I, today: NaiveDate) -> Streak
where
    I: IntoIterator<Item = NaiveDateTime>,
{
    let mut days: Vec<NaiveDate> = events
        .into_iter()
        .map(|at| at.date())
        .filter(|day| *day <= today)
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some(&latest) = days.first() else {
        return Streak::default();
    };

    let current = if (today - latest).num_days() <= 1 {
        1 + days
            .windows(2)
            .take_while(|pair| (pair[0] - pair[1]).num_days() == 1)
            .count() as u32
    } else {
        0
    };

    let mut longest = 1;
    let mut running = 1;
    for pair in days.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            running += 1;
        } else {
            running = 1;
        }
        longest = longest.max(running);
    }

    let streak = Streak {
        current,
        longest: longest.max(current),
    };
    tracing::debug!(active_days = days.len(), ?streak, "Computed streak");
    streak
}
