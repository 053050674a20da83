//! PostgreSQL report table integration

pub mod adapter;
pub mod client;
pub mod statements;

pub use adapter::PostgreSQLAdapter;
pub use client::PostgreSQLClient;
