//! ClickUp task source
//!
//! Reads tasks page by page from a ClickUp view endpoint.

pub mod client;
pub mod models;

pub use client::{ClickUpClient, TaskSource};
pub use models::TasksPage;
