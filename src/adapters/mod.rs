//! External system integrations.
//!
//! - [`clickup`] - ClickUp view task source ([`clickup::TaskSource`])
//! - [`database`] - Report sink abstraction ([`database::ReportSink`])
//! - [`postgresql`] - PostgreSQL report sink
//!
//! # Design Pattern
//!
//! Adapters isolate the HTTP and SQL clients behind traits so the sync
//! coordinator can be exercised with in-memory implementations.

pub mod clickup;
pub mod database;
pub mod postgresql;
