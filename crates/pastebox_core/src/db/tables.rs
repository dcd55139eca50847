//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Canonical paste rows (`Paste`, bincode-encoded).
pub const PASTES: TableDefinition<&str, &[u8]> = TableDefinition::new("pastes");
/// Creation index ordered by reverse-millis then id (newest first).
pub const PASTES_BY_CREATED: TableDefinition<(u64, &str), ()> =
    TableDefinition::new("pastes_by_created");
/// Directory file rows (`DirectoryFile`, bincode-encoded) by file id.
pub const DIRECTORY_FILES: TableDefinition<u64, &[u8]> = TableDefinition::new("directory_files");
/// Ownership index from paste id to file id.
pub const FILES_BY_PASTE: TableDefinition<(&str, u64), ()> =
    TableDefinition::new("files_by_paste");
/// Monotonic id counters.
pub const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

/// Sequence key for [`DIRECTORY_FILES`] ids.
pub const DIRECTORY_FILE_SEQUENCE: &str = "directory_files";
