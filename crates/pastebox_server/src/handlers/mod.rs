//! HTTP request handlers.

/// Paste creation, raw content, download, and listing endpoints.
pub mod paste;
/// HTML pages.
pub mod view;

use crate::{AppError, AppState};
use pastebox_core::{ids, models::paste::Paste};

/// Resolve a path id to a stored paste.
///
/// Ids that could never have been generated are rejected before touching
/// storage.
pub(crate) fn lookup_paste(state: &AppState, id: &str) -> Result<Paste, AppError> {
    if !ids::is_valid_id(id) {
        return Err(AppError::NotFound);
    }
    state.db.pastes.get(id)
}
