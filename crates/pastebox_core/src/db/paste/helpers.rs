//! Helper functions shared by paste storage operations.

use crate::db::tables::DIRECTORY_FILE_SEQUENCE;
use crate::error::AppError;
use crate::models::directory::{DirectoryFile, NewFile};
use crate::models::paste::Paste;
use chrono::{DateTime, Utc};
use redb::ReadableTable;
use std::collections::HashSet;

pub(crate) fn reverse_timestamp_key(created_at: DateTime<Utc>) -> u64 {
    // Pre-epoch timestamps are clamped to avoid negative->u64 underflow.
    let millis = created_at.timestamp_millis().max(0) as u64;
    u64::MAX.saturating_sub(millis)
}

pub(crate) fn deserialize_paste(bytes: &[u8]) -> Result<Paste, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

pub(crate) fn deserialize_file(bytes: &[u8]) -> Result<DirectoryFile, AppError> {
    Ok(bincode::deserialize(bytes)?)
}

pub(super) fn ensure_id_available(
    pastes: &redb::Table<&str, &[u8]>,
    id: &str,
) -> Result<(), AppError> {
    if pastes.get(id)?.is_some() {
        return Err(AppError::Conflict(format!("Paste id '{}' already exists", id)));
    }
    Ok(())
}

/// Creation time for a new row, never earlier than the newest stored row.
pub(super) fn next_created_at(
    pastes: &redb::Table<&str, &[u8]>,
    by_created: &redb::Table<(u64, &str), ()>,
) -> Result<DateTime<Utc>, AppError> {
    let now = Utc::now();
    let Some((key, _)) = by_created.first()? else {
        return Ok(now);
    };
    let (_, newest_id) = key.value();
    let Some(newest) = pastes.get(newest_id)? else {
        return Ok(now);
    };
    let newest = deserialize_paste(newest.value())?;
    Ok(now.max(newest.created_at))
}

pub(super) fn next_file_id(sequences: &redb::Table<&str, u64>) -> Result<u64, AppError> {
    let current = sequences
        .get(DIRECTORY_FILE_SEQUENCE)?
        .map(|guard| guard.value())
        .unwrap_or(0);
    current.checked_add(1).ok_or_else(|| {
        AppError::StorageMessage("Directory file id sequence exhausted".to_string())
    })
}

pub(super) fn validate_single_content(content: &str) -> Result<(), AppError> {
    if content.trim().is_empty() {
        return Err(AppError::Validation(
            "Paste content must not be empty".to_string(),
        ));
    }
    Ok(())
}

pub(super) fn validate_directory_files(files: &[NewFile]) -> Result<(), AppError> {
    if files.is_empty() {
        return Err(AppError::Validation(
            "A directory needs at least one file".to_string(),
        ));
    }
    let mut seen = HashSet::with_capacity(files.len());
    for file in files {
        if file.filename.trim().is_empty() {
            return Err(AppError::Validation(
                "File names must not be empty".to_string(),
            ));
        }
        if !seen.insert(file.filename.as_str()) {
            return Err(AppError::Validation(format!(
                "Duplicate file name '{}'",
                file.filename
            )));
        }
    }
    Ok(())
}
