//! Paste storage operations backed by redb.

mod expiry;
mod helpers;

use crate::{
    db::tables::*,
    detection::{classify, normalize_language},
    error::AppError,
    ids::new_id,
    models::{directory::*, paste::*},
};
use redb::{ReadableDatabase, ReadableTable, ReadableTableMetadata};
use std::sync::Arc;

use self::helpers::{
    ensure_id_available, next_created_at, next_file_id, validate_directory_files,
    validate_single_content,
};

pub(crate) use self::helpers::{deserialize_file, deserialize_paste, reverse_timestamp_key};

/// Fresh ids tried before a create gives up with [`AppError::Conflict`].
pub const MAX_ID_ATTEMPTS: usize = 3;

/// Accessor for paste and directory file tables.
pub struct PasteDb {
    db: Arc<redb::Database>,
}

impl PasteDb {
    /// Initialize paste tables if they do not exist yet.
    ///
    /// # Returns
    /// A new [`PasteDb`] accessor bound to `db`.
    ///
    /// # Errors
    /// Returns an error when redb transaction/table initialization fails.
    pub fn new(db: Arc<redb::Database>) -> Result<Self, AppError> {
        let write_txn = db.begin_write()?;
        write_txn.open_table(PASTES)?;
        write_txn.open_table(PASTES_BY_CREATED)?;
        write_txn.open_table(DIRECTORY_FILES)?;
        write_txn.open_table(FILES_BY_PASTE)?;
        write_txn.open_table(SEQUENCES)?;
        write_txn.commit()?;
        Ok(Self { db })
    }

    /// Run `insert` with ids drawn from `next_id` until one is not taken,
    /// giving up after [`MAX_ID_ATTEMPTS`] conflicts.
    fn with_ids<T>(
        &self,
        mut next_id: impl FnMut() -> String,
        mut insert: impl FnMut(&str) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut last_conflict = String::new();
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let id = next_id();
            match insert(&id) {
                Err(AppError::Conflict(message)) => {
                    tracing::warn!(attempt, "Paste id collision on '{}'", id);
                    last_conflict = message;
                }
                other => return other,
            }
        }
        Err(AppError::Conflict(last_conflict))
    }

    /// Store a single-file paste under a fresh id.
    ///
    /// # Arguments
    /// - `title`: Display title.
    /// - `content`: Body text; must contain a non-whitespace character.
    /// - `language`: Client-supplied tag; blank becomes `plaintext`.
    ///
    /// # Returns
    /// The new paste id.
    ///
    /// # Errors
    /// [`AppError::Validation`] for blank content, [`AppError::Conflict`] when
    /// every id attempt collided, or storage errors.
    pub fn create_single(
        &self,
        title: &str,
        content: &str,
        language: &str,
    ) -> Result<String, AppError> {
        validate_single_content(content)?;
        let language = normalize_language(Some(language));
        let paste =
            self.with_ids(new_id, |id| self.insert_single(id, title, content, &language))?;
        Ok(paste.id)
    }

    /// Insert a single-file paste with a caller-chosen id.
    ///
    /// # Errors
    /// [`AppError::Conflict`] if `id` is taken; the existing row is untouched.
    pub(crate) fn insert_single(
        &self,
        id: &str,
        title: &str,
        content: &str,
        language: &str,
    ) -> Result<Paste, AppError> {
        validate_single_content(content)?;
        let write_txn = self.db.begin_write()?;
        let paste = {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut by_created = write_txn.open_table(PASTES_BY_CREATED)?;

            ensure_id_available(&pastes, id)?;
            let paste = Paste {
                id: id.to_string(),
                title: title.to_string(),
                content: content.to_string(),
                language: language.to_string(),
                created_at: next_created_at(&pastes, &by_created)?,
                is_directory: false,
            };
            let encoded = bincode::serialize(&paste)?;

            pastes.insert(id, encoded.as_slice())?;
            by_created.insert((reverse_timestamp_key(paste.created_at), id), ())?;
            paste
        };
        write_txn.commit()?;
        Ok(paste)
    }

    /// Store a directory paste and its files under a fresh id.
    ///
    /// Files are inserted in the given order; each file's language comes
    /// from its filename. Blank and repeated filenames are refused; zip
    /// entry names must be unique within one archive.
    ///
    /// # Returns
    /// The new paste id.
    ///
    /// # Errors
    /// [`AppError::Validation`] for an empty list, blank or duplicate file
    /// names; [`AppError::Conflict`] when every id attempt collided; or
    /// storage errors.
    pub fn create_directory(&self, title: &str, files: &[NewFile]) -> Result<String, AppError> {
        validate_directory_files(files)?;
        let paste = self.with_ids(new_id, |id| self.insert_directory(id, title, files))?;
        Ok(paste.id)
    }

    /// Insert a directory paste with a caller-chosen id.
    pub(crate) fn insert_directory(
        &self,
        id: &str,
        title: &str,
        files: &[NewFile],
    ) -> Result<Paste, AppError> {
        validate_directory_files(files)?;
        let write_txn = self.db.begin_write()?;
        let paste = {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut by_created = write_txn.open_table(PASTES_BY_CREATED)?;
            let mut file_rows = write_txn.open_table(DIRECTORY_FILES)?;
            let mut files_by_paste = write_txn.open_table(FILES_BY_PASTE)?;
            let mut sequences = write_txn.open_table(SEQUENCES)?;

            ensure_id_available(&pastes, id)?;
            let paste = Paste {
                id: id.to_string(),
                title: title.to_string(),
                content: String::new(),
                language: crate::DEFAULT_LANGUAGE.to_string(),
                created_at: next_created_at(&pastes, &by_created)?,
                is_directory: true,
            };
            let encoded = bincode::serialize(&paste)?;
            pastes.insert(id, encoded.as_slice())?;
            by_created.insert((reverse_timestamp_key(paste.created_at), id), ())?;

            for file in files {
                let file_id = next_file_id(&sequences)?;
                let row = DirectoryFile {
                    id: file_id,
                    paste_id: id.to_string(),
                    filename: file.filename.clone(),
                    content: file.content.clone(),
                    language: classify(&file.filename).to_string(),
                };
                let encoded_file = bincode::serialize(&row)?;
                file_rows.insert(file_id, encoded_file.as_slice())?;
                files_by_paste.insert((id, file_id), ())?;
                sequences.insert(DIRECTORY_FILE_SEQUENCE, file_id)?;
            }
            paste
        };
        write_txn.commit()?;
        Ok(paste)
    }

    /// Fetch a paste by id.
    ///
    /// # Returns
    /// `Ok(Some(paste))` when found, `Ok(None)` when missing.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn find(&self, id: &str) -> Result<Option<Paste>, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        match pastes.get(id)? {
            Some(value) => Ok(Some(deserialize_paste(value.value())?)),
            None => Ok(None),
        }
    }

    /// Fetch a paste by id.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when no paste has this id.
    pub fn get(&self, id: &str) -> Result<Paste, AppError> {
        self.find(id)?.ok_or(AppError::NotFound)
    }

    /// List a directory paste's files ordered by filename.
    ///
    /// # Returns
    /// Files sorted by filename ascending (ties by id); empty for unknown ids
    /// and single-file pastes.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list_files(&self, paste_id: &str) -> Result<Vec<DirectoryFile>, AppError> {
        let read_txn = self.db.begin_read()?;
        let files_by_paste = read_txn.open_table(FILES_BY_PASTE)?;
        let file_rows = read_txn.open_table(DIRECTORY_FILES)?;

        let mut files = Vec::new();
        for item in files_by_paste.range((paste_id, 0u64)..=(paste_id, u64::MAX))? {
            let (key, _) = item?;
            let (_, file_id) = key.value();
            let Some(guard) = file_rows.get(file_id)? else {
                tracing::warn!("Index row for missing file {} in paste {}", file_id, paste_id);
                continue;
            };
            files.push(deserialize_file(guard.value())?);
        }
        files.sort_by(|a, b| a.filename.cmp(&b.filename).then(a.id.cmp(&b.id)));
        Ok(files)
    }

    /// Fetch one file of a directory paste.
    ///
    /// The file must belong to `paste_id`; a valid id from another paste is
    /// reported as missing.
    ///
    /// # Errors
    /// [`AppError::NotFound`] when the pair does not resolve.
    pub fn get_file(&self, paste_id: &str, file_id: u64) -> Result<DirectoryFile, AppError> {
        let read_txn = self.db.begin_read()?;
        let files_by_paste = read_txn.open_table(FILES_BY_PASTE)?;
        let file_rows = read_txn.open_table(DIRECTORY_FILES)?;

        if files_by_paste.get((paste_id, file_id))?.is_none() {
            return Err(AppError::NotFound);
        }
        let Some(guard) = file_rows.get(file_id)? else {
            return Err(AppError::NotFound);
        };
        let file = deserialize_file(guard.value())?;
        if file.paste_id != paste_id {
            return Err(AppError::NotFound);
        }
        Ok(file)
    }

    /// List the newest pastes.
    ///
    /// # Returns
    /// Up to `limit` summaries, newest first.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails.
    pub fn list_recent(&self, limit: usize) -> Result<Vec<PasteSummary>, AppError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let read_txn = self.db.begin_read()?;
        let by_created = read_txn.open_table(PASTES_BY_CREATED)?;
        let pastes = read_txn.open_table(PASTES)?;

        let mut summaries = Vec::with_capacity(limit);
        for item in by_created.iter()? {
            let (key, _) = item?;
            let (_, paste_id) = key.value();
            let Some(guard) = pastes.get(paste_id)? else {
                continue;
            };
            summaries.push(PasteSummary::from(&deserialize_paste(guard.value())?));
            if summaries.len() >= limit {
                break;
            }
        }
        Ok(summaries)
    }

    /// Number of stored pastes.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn count(&self) -> Result<usize, AppError> {
        let read_txn = self.db.begin_read()?;
        let pastes = read_txn.open_table(PASTES)?;
        Ok(pastes.len()? as usize)
    }

    /// Number of stored directory files across all pastes.
    ///
    /// # Errors
    /// Returns an error when storage access fails.
    pub fn count_files(&self) -> Result<usize, AppError> {
        let read_txn = self.db.begin_read()?;
        let file_rows = read_txn.open_table(DIRECTORY_FILES)?;
        Ok(file_rows.len()? as usize)
    }
}
