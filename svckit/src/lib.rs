//! Shared building blocks for the failover demos.
//!
//! - [`database`]: Scylla/Cassandra session bootstrap, backoff retry and the
//!   `mutant_data` catalog.
//! - [`cache`]: Redis Sentinel backed key-value store.
//! - [`config`], [`errors`], [`logging`], [`metrics`]: ambient plumbing used
//!   by both binaries.

pub mod cache;
pub mod config;
pub mod database;
pub mod errors;
pub mod logging;
pub mod metrics;
pub mod types;
