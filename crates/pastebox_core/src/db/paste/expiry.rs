//! Age-based deletion used by the retention sweeper.

use super::{deserialize_paste, reverse_timestamp_key, PasteDb};
use crate::db::tables::*;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use redb::ReadableTable;

impl PasteDb {
    /// Delete every paste created before `cutoff`, together with its files.
    ///
    /// Files are removed before their parent and everything commits in one
    /// write transaction, so an interrupted sweep leaves no orphans.
    ///
    /// # Returns
    /// Number of pastes removed.
    ///
    /// # Errors
    /// Returns an error when storage access or deserialization fails; nothing
    /// is deleted in that case.
    pub fn delete_expired(&self, cutoff: DateTime<Utc>) -> Result<usize, AppError> {
        // Rows older than `cutoff` sort at or after this key; equal keys share
        // the cutoff millisecond and are filtered on the exact timestamp.
        let threshold = reverse_timestamp_key(cutoff);

        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut pastes = write_txn.open_table(PASTES)?;
            let mut by_created = write_txn.open_table(PASTES_BY_CREATED)?;
            let mut file_rows = write_txn.open_table(DIRECTORY_FILES)?;
            let mut files_by_paste = write_txn.open_table(FILES_BY_PASTE)?;

            let mut candidates: Vec<(u64, String)> = Vec::new();
            for item in by_created.range((threshold, "")..)? {
                let (key, _) = item?;
                let (recency_key, paste_id) = key.value();
                candidates.push((recency_key, paste_id.to_string()));
            }

            let mut deleted = 0usize;
            for (recency_key, paste_id) in candidates {
                let paste = match pastes.get(paste_id.as_str())? {
                    Some(guard) => deserialize_paste(guard.value())?,
                    None => {
                        let _ = by_created.remove((recency_key, paste_id.as_str()))?;
                        continue;
                    }
                };
                if paste.created_at >= cutoff {
                    continue;
                }

                let mut file_ids = Vec::new();
                for item in
                    files_by_paste.range((paste_id.as_str(), 0u64)..=(paste_id.as_str(), u64::MAX))?
                {
                    let (key, _) = item?;
                    file_ids.push(key.value().1);
                }
                for file_id in file_ids {
                    let _ = file_rows.remove(file_id)?;
                    let _ = files_by_paste.remove((paste_id.as_str(), file_id))?;
                }

                let _ = by_created.remove((recency_key, paste_id.as_str()))?;
                let _ = pastes.remove(paste_id.as_str())?;
                deleted += 1;
            }
            deleted
        };
        write_txn.commit()?;
        Ok(deleted)
    }
}
