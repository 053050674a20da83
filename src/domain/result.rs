//! Crate-wide result alias

use super::errors::SyncError;

/// `std::result::Result` fixed to [`SyncError`]
pub type Result<T> = std::result::Result<T, SyncError>;
