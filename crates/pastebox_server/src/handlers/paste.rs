//! Paste HTTP handlers.

use super::lookup_paste;
use crate::{error::HttpError, AppError, AppState};
use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use pastebox_core::{
    archive::export_zip,
    ids,
    models::paste::{
        directory_title, paste_title, CreateDirectoryRequest, CreatePasteForm, CreatedDirectory,
        PasteSummary,
    },
    DEFAULT_RECENT_LIMIT,
};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

const TEXT_PLAIN_UTF8: &str = "text/plain; charset=utf-8";
const APPLICATION_ZIP: &str = "application/zip";

fn ensure_within_size_limit(state: &AppState, size: usize) -> Result<(), AppError> {
    if size > state.config.max_paste_size {
        return Err(AppError::Validation(format!(
            "Paste size exceeds maximum of {} bytes",
            state.config.max_paste_size
        )));
    }
    Ok(())
}

fn plain_text(body: String) -> Response {
    ([(header::CONTENT_TYPE, TEXT_PLAIN_UTF8)], body).into_response()
}

/// Build an RFC 6266 attachment header with an ASCII fallback name.
pub(crate) fn attachment_disposition(file_name: &str) -> HeaderValue {
    let fallback: String = file_name
        .chars()
        .map(|c| {
            if c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(file_name, NON_ALPHANUMERIC);
    let value = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    );
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

/// Create a single-file paste from a submitted form.
///
/// Blank content sends the client back to the index page without storing
/// anything.
///
/// # Returns
/// A `303 See Other` redirect to the new paste page.
///
/// # Errors
/// Returns an error if the content is too large or persistence fails.
pub async fn create_paste(
    State(state): State<AppState>,
    Form(form): Form<CreatePasteForm>,
) -> Result<Response, HttpError> {
    let content = form.content.unwrap_or_default();
    if content.trim().is_empty() {
        return Ok(Redirect::to("/").into_response());
    }
    ensure_within_size_limit(&state, content.len())?;

    let title = paste_title(form.title);
    let language = form.language.unwrap_or_default();
    let id = state.db.pastes.create_single(&title, &content, &language)?;
    tracing::debug!("Created paste {}", id);

    Ok(Redirect::to(&format!("/p/{}", id)).into_response())
}

/// Create a directory paste from a JSON file list.
///
/// # Returns
/// The new id and its page URL as JSON.
///
/// # Errors
/// Returns an error if the file list is empty, too large, or persistence fails.
pub async fn create_directory(
    State(state): State<AppState>,
    Json(req): Json<CreateDirectoryRequest>,
) -> Result<Json<CreatedDirectory>, HttpError> {
    let total_size = req
        .files
        .iter()
        .map(|file| file.filename.len() + file.content.len())
        .sum();
    ensure_within_size_limit(&state, total_size)?;

    let title = directory_title(req.title);
    let id = state.db.pastes.create_directory(&title, &req.files)?;
    tracing::debug!("Created directory paste {} with {} files", id, req.files.len());

    let url = format!("/p/{}", id);
    Ok(Json(CreatedDirectory { id, url }))
}

/// Serve a paste's body as plain text.
///
/// # Errors
/// Returns an error if the paste does not exist or lookup fails.
pub async fn raw_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    let paste = lookup_paste(&state, &id)?;
    Ok(plain_text(paste.content))
}

/// Serve one file of a directory paste as plain text.
///
/// # Errors
/// Returns an error if the file does not belong to the paste or lookup fails.
pub async fn raw_file(
    State(state): State<AppState>,
    Path((id, file_id)): Path<(String, String)>,
) -> Result<Response, HttpError> {
    if !ids::is_valid_id(&id) {
        return Err(AppError::NotFound.into());
    }
    // Non-numeric file ids name no file.
    let file_id: u64 = file_id.parse().map_err(|_| AppError::NotFound)?;
    let file = state.db.pastes.get_file(&id, file_id)?;
    Ok(plain_text(file.content))
}

/// Download a directory paste as a zip archive.
///
/// # Errors
/// Returns an error if the paste is missing, is not a directory, or the
/// archive cannot be built.
pub async fn download_zip(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, HttpError> {
    if !ids::is_valid_id(&id) {
        return Err(AppError::NotFound.into());
    }
    let archive = export_zip(&state.db, &id)?;
    let disposition = attachment_disposition(&archive.download_name());
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(APPLICATION_ZIP)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        archive.into_bytes(),
    )
        .into_response())
}

/// List the newest pastes.
///
/// # Errors
/// Returns an error if listing fails.
pub async fn recent_pastes(
    State(state): State<AppState>,
) -> Result<Json<Vec<PasteSummary>>, HttpError> {
    Ok(Json(state.db.pastes.list_recent(DEFAULT_RECENT_LIMIT)?))
}

#[cfg(test)]
mod tests {
    use super::attachment_disposition;

    #[test]
    fn attachment_disposition_escapes_quotes_and_non_ascii() {
        let value = attachment_disposition("my \"demo\" 项目.zip");
        let value = value.to_str().expect("ascii header");
        assert!(value.starts_with("attachment; filename=\"my _demo_ __.zip\""));
        assert!(value.contains("filename*=UTF-8''my%20%22demo%22%20%E9%A1%B9%E7%9B%AE%2Ezip"));
    }

    #[test]
    fn attachment_disposition_keeps_plain_names() {
        let value = attachment_disposition("demo.zip");
        assert_eq!(
            value.to_str().expect("ascii header"),
            "attachment; filename=\"demo.zip\"; filename*=UTF-8''demo%2Ezip"
        );
    }
}
