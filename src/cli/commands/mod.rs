//! CLI command implementations
//!
//! Commands return the process exit code: 0 success, 2 configuration error,
//! 3 schema mismatch or aborted load, 4 connection error, 5 anything else.

pub mod init;
pub mod sync;
pub mod validate;
