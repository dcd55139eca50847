//! Directory file models.

use serde::{Deserialize, Serialize};

/// One file belonging to a directory paste.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DirectoryFile {
    pub id: u64,
    pub paste_id: String,
    pub filename: String,
    pub content: String,
    /// Derived from `filename`; clients cannot set it.
    pub language: String,
}

/// Client-supplied file for a new directory paste.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewFile {
    pub filename: String,
    #[serde(default)]
    pub content: String,
}

impl NewFile {
    /// Build a file payload.
    pub fn new(filename: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            content: content.into(),
        }
    }
}
