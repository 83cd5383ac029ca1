//! Error types for the threat intelligence subsystem.

use thiserror::Error;

/// Failure while importing a blacklist feed file.
///
/// Import errors never corrupt an already-loaded blacklist: entries added
/// before the failure remain valid and the caller decides whether to keep
/// running on them.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("could not read feed file: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FeedError>;
