//! Data models for persistence and HTTP payloads.

/// Directory file rows and their creation payloads.
pub mod directory;
/// Paste rows, summaries, and creation payloads.
pub mod paste;
