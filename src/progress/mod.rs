//! Derived learning signals: streaks, topic difficulty and recommendations.

pub mod difficulty;
pub mod recommend;
pub mod streak;

pub use difficulty::{score, score_topics, TopicHistory};
pub use recommend::recommend;
pub use streak::{compute_streak, Streak};
