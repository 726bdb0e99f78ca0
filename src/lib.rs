pub mod challenge;
pub mod codeforces;
pub mod config;
pub mod daily_log;
pub mod error;
pub mod progress;
pub mod reconcile;
pub mod roster;
pub mod streak;
pub mod summary;
pub mod tracker;
pub mod webhook;

pub use error::{Result, TrackerError};
