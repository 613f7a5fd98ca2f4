//! Schedulers. Flashcards and topics are scheduled independently: `sm2` adapts
//! per card through an evolving ease factor, `revision` walks a fixed table
//! adjusted by a single confidence value.

pub mod revision;
pub mod sm2;

pub use revision::{next_revision, RevisionPlan};
pub use sm2::{due_cards, is_due, next_review};
