//! Core domain library for PasteBox (config, storage, models, export).

/// Directory paste zip export.
pub mod archive;
/// Configuration loading and defaults.
pub mod config;
/// Shared constants.
pub mod constants;
/// Database access layer.
pub mod db;
/// Filename-based language tagging.
pub mod detection;
/// Application error types (storage/domain).
pub mod error;
/// Public paste identifier generation.
pub mod ids;
/// Data models for API requests and persistence.
pub mod models;
#[cfg(test)]
pub(crate) mod test_support;

pub use config::{Config, RetentionConfig};
pub use constants::{DEFAULT_LANGUAGE, DEFAULT_PORT, DEFAULT_RECENT_LIMIT};
pub use db::Database;
pub use error::AppError;
