//! Server-rendered HTML pages.

use super::lookup_paste;
use crate::{error::HttpError, AppState};
use axum::{
    extract::{Path, State},
    response::Html,
};
use pastebox_core::models::{directory::DirectoryFile, paste::Paste};
use std::fmt::Write;

const PAGE_STYLE: &str = "body{font-family:sans-serif;max-width:960px;margin:2rem auto;padding:0 1rem}\
pre{background:#f6f8fa;padding:1rem;overflow:auto}\
textarea{width:100%;min-height:20rem;font-family:monospace}";

/// Escape text for inclusion in HTML element bodies and quoted attributes.
pub(crate) fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>{} - PasteBox</title>\
<style>{}</style></head><body>{}</body></html>",
        escape_html(title),
        PAGE_STYLE,
        body
    ))
}

/// Render the paste submission form.
pub async fn index() -> Html<String> {
    page(
        "New paste",
        "<h1>PasteBox</h1>\
<form method=\"post\" action=\"/paste\">\
<p><input name=\"title\" placeholder=\"Title\"></p>\
<p><input name=\"language\" placeholder=\"Language (optional)\"></p>\
<p><textarea name=\"content\" placeholder=\"Paste text here\"></textarea></p>\
<p><button type=\"submit\">Create paste</button></p>\
</form>",
    )
}

/// Render a paste page.
///
/// Single pastes show their body inline. Directory pastes list each file
/// with a raw link and offer the zip download.
///
/// # Errors
/// Returns an error if the paste does not exist or lookup fails.
pub async fn view_paste(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, HttpError> {
    let paste = lookup_paste(&state, &id)?;
    let share_url = state.config.share_url(&paste.id);
    let body = if paste.is_directory {
        let files = state.db.pastes.list_files(&paste.id)?;
        render_directory(&paste, &files, &share_url)
    } else {
        render_single(&paste, &share_url)
    };
    Ok(page(&paste.title, &body))
}

fn render_header(paste: &Paste, share_url: &str) -> String {
    format!(
        "<h1>{}</h1><p>Created {} &middot; Share: <a href=\"{url}\">{url}</a></p>",
        escape_html(&paste.title),
        paste.created_at.format("%Y-%m-%d %H:%M UTC"),
        url = escape_html(share_url)
    )
}

fn render_single(paste: &Paste, share_url: &str) -> String {
    format!(
        "{}<p>{} &middot; <a href=\"/p/{}/raw\">raw</a></p><pre><code class=\"language-{}\">{}</code></pre>",
        render_header(paste, share_url),
        escape_html(&paste.language),
        paste.id,
        escape_html(&paste.language),
        escape_html(&paste.content)
    )
}

fn render_directory(paste: &Paste, files: &[DirectoryFile], share_url: &str) -> String {
    let mut body = render_header(paste, share_url);
    let _ = write!(
        body,
        "<p>{} files &middot; <a href=\"/p/{}/download\">download zip</a></p>",
        files.len(),
        paste.id
    );
    for file in files {
        let _ = write!(
            body,
            "<h2>{}</h2><p>{} &middot; <a href=\"/p/{}/file/{}/raw\">raw</a></p>\
<pre><code class=\"language-{}\">{}</code></pre>",
            escape_html(&file.filename),
            escape_html(&file.language),
            paste.id,
            file.id,
            escape_html(&file.language),
            escape_html(&file.content)
        );
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_paste(is_directory: bool) -> Paste {
        Paste {
            id: "0a1b2c3d".to_string(),
            title: "<b>demo</b>".to_string(),
            content: if is_directory {
                String::new()
            } else {
                "if a < b && c > d {}".to_string()
            },
            language: "rust".to_string(),
            created_at: Utc::now(),
            is_directory,
        }
    }

    #[test]
    fn escape_html_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }

    #[test]
    fn single_page_escapes_title_and_body() {
        let html = render_single(&sample_paste(false), "http://localhost:5000/p/0a1b2c3d");
        assert!(html.contains("&lt;b&gt;demo&lt;/b&gt;"));
        assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d {}"));
        assert!(html.contains("/p/0a1b2c3d/raw"));
        assert!(!html.contains("<b>demo</b>"));
    }

    #[test]
    fn directory_page_links_every_file_and_download() {
        let files = vec![
            DirectoryFile {
                id: 1,
                paste_id: "0a1b2c3d".to_string(),
                filename: "a.py".to_string(),
                content: "print(1)".to_string(),
                language: "python".to_string(),
            },
            DirectoryFile {
                id: 2,
                paste_id: "0a1b2c3d".to_string(),
                filename: "b.js".to_string(),
                content: "x".to_string(),
                language: "javascript".to_string(),
            },
        ];
        let html = render_directory(&sample_paste(true), &files, "http://h/p/0a1b2c3d");
        assert!(html.contains("/p/0a1b2c3d/download"));
        assert!(html.contains("/p/0a1b2c3d/file/1/raw"));
        assert!(html.contains("/p/0a1b2c3d/file/2/raw"));
        assert!(html.find("a.py") < html.find("b.js"));
    }
}
