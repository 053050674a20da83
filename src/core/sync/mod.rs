//! Sync orchestration
//!
//! - Paginated fetch from the task source
//! - Type coercion of report values
//! - Run coordination and summary

pub mod coercion;
pub mod coordinator;
pub mod fetch;
pub mod summary;

pub use coordinator::SyncCoordinator;
pub use fetch::{fetch_all_tasks, FetchedTasks, PaginationStop};
pub use summary::{LoadStatus, SyncSummary};
