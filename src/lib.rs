//! Idempotent SQLite bootstrap.
//!
//! # Intention
//!
//! - Bring a file-backed SQLite store to a fixed schema, any number of times,
//!   without dropping or rewriting existing rows.
//! - Record a few deployment facts in `app_info` and describe how to connect.
//!
//! # Architectural Boundaries
//!
//! - Schema definition and convergence only. No query layer, no migrations.
//! - One writer at a time; callers serialize concurrent bootstraps themselves.

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod metadata;
pub mod report;
pub mod schema;
pub mod sqlite;
pub mod time;

pub use config::Config;
pub use error::{Error, Result};
pub use metadata::AppInfo;
pub use sqlite::ensure_schema;
pub use time::now_utc_iso8601;
