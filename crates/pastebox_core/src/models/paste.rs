//! Paste data models.

use crate::constants::{DEFAULT_DIRECTORY_TITLE, DEFAULT_PASTE_TITLE};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::directory::NewFile;

/// Top-level stored entry, either a single snippet or a directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Paste {
    pub id: String,
    pub title: String,
    /// Body text; always empty for directory pastes.
    pub content: String,
    pub language: String,
    pub created_at: DateTime<Utc>,
    pub is_directory: bool,
}

/// Listing row returned by the recent-pastes endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasteSummary {
    pub id: String,
    pub title: String,
    pub is_directory: bool,
    pub created_at: DateTime<Utc>,
}

/// Form payload for creating a single-file paste.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePasteForm {
    pub title: Option<String>,
    pub content: Option<String>,
    pub language: Option<String>,
}

/// JSON payload for creating a directory paste.
#[derive(Debug, Deserialize)]
pub struct CreateDirectoryRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub files: Vec<NewFile>,
}

/// Response body for a created directory paste.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedDirectory {
    pub id: String,
    pub url: String,
}

impl From<&Paste> for PasteSummary {
    fn from(value: &Paste) -> Self {
        Self {
            id: value.id.clone(),
            title: value.title.clone(),
            is_directory: value.is_directory,
            created_at: value.created_at,
        }
    }
}

/// Non-blank titles are kept exactly as submitted; blank or missing ones
/// fall back to `fallback`.
fn title_or(title: Option<String>, fallback: &str) -> String {
    match title {
        Some(title) if !title.trim().is_empty() => title,
        _ => fallback.to_string(),
    }
}

/// Resolve the stored title for a single-file paste.
pub fn paste_title(title: Option<String>) -> String {
    title_or(title, DEFAULT_PASTE_TITLE)
}

/// Resolve the stored title for a directory paste.
pub fn directory_title(title: Option<String>) -> String {
    title_or(title, DEFAULT_DIRECTORY_TITLE)
}
