//! Error types for the progress engine and its storage adapter.

/// Contract violations on engine inputs.
///
/// Business conditions such as an empty history are never errors; they are
/// handled with explicit defaults by each scorer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("quality {0} is outside 0..=5")]
    QualityOutOfRange(u8),
    #[error("ease factor {0} is below the 1.3 floor")]
    EaseFactorTooLow(f64),
    #[error("interval must be at least one day")]
    ZeroInterval,
    #[error("confidence level {0} is outside 0..=100")]
    ConfidenceOutOfRange(u8),
}

/// Errors surfaced by the read-compute-write cycles in `services`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("database error: {0}")]
    Db(#[from] rusqlite::Error),
    #[error("unknown topic {0}")]
    UnknownTopic(i64),
    #[error("database unavailable")]
    Unavailable,
}

pub type Result<T> = std::result::Result<T, EngineError>;
