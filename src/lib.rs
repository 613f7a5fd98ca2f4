pub mod clock;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod paths;
pub mod progress;
pub mod services;
pub mod srs;

#[cfg(test)]
pub mod testing;
