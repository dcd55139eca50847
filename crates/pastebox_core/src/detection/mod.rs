//! Language tagging from file extensions.

use crate::constants::DEFAULT_LANGUAGE;


const EXTENSION_LANGUAGES: &[(&str, &str)] = &[
    ("py", "python"),
    ("js", "javascript"),
    ("ts", "typescript"),
    ("html", "html"),
    ("css", "css"),
    ("json", "json"),
    ("java", "java"),
    ("cpp", "cpp"),
    ("c", "c"),
    ("go", "go"),
    ("rs", "rust"),
    ("rb", "ruby"),
    ("php", "php"),
    ("sql", "sql"),
    ("sh", "bash"),
    ("yaml", "yaml"),
    ("yml", "yaml"),
    ("xml", "xml"),
    ("md", "markdown"),
    ("txt", "plaintext"),
];

/// Map a filename to a language tag.
///
/// Matching is case-insensitive and only looks at the suffix after the last
/// `.` of the final path component. A leading dot (`.env`) marks a hidden
/// file, not an extension.
///
/// # Returns
/// The tag for a known extension, otherwise [`DEFAULT_LANGUAGE`].
pub fn classify(filename: &str) -> &'static str {
    let lower = filename.to_lowercase();
    let base = lower
        .rsplit(|c| c == '/' || c == '\\')
        .next()
        .unwrap_or_default();
    let Some((stem, ext)) = base.rsplit_once('.') else {
        return DEFAULT_LANGUAGE;
    };
    if stem.trim_start_matches('.').is_empty() {
        return DEFAULT_LANGUAGE;
    }
    EXTENSION_LANGUAGES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, language)| *language)
        .unwrap_or(DEFAULT_LANGUAGE)
}

/// Normalize a client-supplied language tag.
///
/// # Returns
/// The trimmed, lowercased tag, or [`DEFAULT_LANGUAGE`] when blank.
pub fn normalize_language(language: Option<&str>) -> String {
    language
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string())
}
