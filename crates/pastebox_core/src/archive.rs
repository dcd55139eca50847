//! Zip export for directory pastes.

use crate::models::directory::DirectoryFile;
use crate::{AppError, Database};
use std::io::{Cursor, Write};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// A fully built archive held in memory.
#[derive(Debug)]
pub struct ExportedArchive {
    /// Title of the exported paste.
    pub title: String,
    /// Zip bytes, positioned at the start.
    pub data: Cursor<Vec<u8>>,
}

impl ExportedArchive {
    /// Suggested download file name, `<title>.zip`.
    pub fn download_name(&self) -> String {
        format!("{}.zip", self.title)
    }

    /// Consume the archive and return the raw zip bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data.into_inner()
    }
}

/// Export a directory paste as a zip archive.
///
/// Entry names are the stored filenames, unmodified; callers must not assume
/// they are safe to extract as paths.
///
/// # Errors
/// [`AppError::NotFound`] for unknown ids, [`AppError::InvalidOperation`]
/// for single-file pastes, or storage/archive errors.
pub fn export_zip(db: &Database, paste_id: &str) -> Result<ExportedArchive, AppError> {
    let paste = db.pastes.get(paste_id)?;
    if !paste.is_directory {
        return Err(AppError::InvalidOperation(format!(
            "Paste '{}' is not a directory",
            paste_id
        )));
    }
    let files = db.pastes.list_files(paste_id)?;
    Ok(ExportedArchive {
        title: paste.title,
        data: build_zip(&files)?,
    })
}

/// Build a deflate-compressed zip with one entry per file, in slice order.
///
/// Timestamps and permissions are fixed so identical inputs produce
/// identical bytes.
///
/// # Errors
/// Returns [`AppError::Archive`] when the zip writer fails.
pub fn build_zip(files: &[DirectoryFile]) -> Result<Cursor<Vec<u8>>, AppError> {
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default())
        .unix_permissions(0o644);

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for file in files {
        writer.start_file(file.filename.as_str(), options.clone())?;
        writer
            .write_all(file.content.as_bytes())
            .map_err(ZipError::from)?;
    }
    let mut data = writer.finish()?;
    data.set_position(0);
    Ok(data)
}
