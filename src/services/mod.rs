//! Application services.
//!
//! Thin read-compute-append layer between the history store and the pure
//! engine functions in `srs` and `progress`.

pub mod progress;

pub use progress::ProgressService;
