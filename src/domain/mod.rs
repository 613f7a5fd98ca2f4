pub mod recommendation;
pub mod review;
pub mod revision;

pub use recommendation::{Deadline, DeadlineStatus, Recommendation, RecommendationKind};
pub use review::{ReviewRecord, ReviewState, DEFAULT_EASE_FACTOR, MIN_EASE_FACTOR};
pub use revision::{DifficultySnapshot, RevisionRecord, Topic, TopicProgress};
