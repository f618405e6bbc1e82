//! Taikai - badminton tournament aggregation and search.
//!
//! Ingests tournament listings from federation sites, normalizes and
//! deduplicates them into a canonical store, and serves them through a
//! filtered, paginated, sanitized search API.

pub mod cli;
pub mod config;
pub mod ingest;
pub mod models;
pub mod query;
pub mod rate_limit;
pub mod scrapers;
pub mod seed;
pub mod server;
pub mod store;
pub mod validation;
