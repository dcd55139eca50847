//! Configuration loading from environment variables.

use crate::constants::{
    DEFAULT_MAX_PASTE_SIZE, DEFAULT_PORT, DEFAULT_SITE_URL, RETENTION_WINDOW, SWEEP_INTERVAL,
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Retention policy handed to the sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionConfig {
    /// Pastes older than this are deleted.
    pub retention_window: Duration,
    /// Delay between sweeps after the startup sweep.
    pub sweep_interval: Duration,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self {
            retention_window: RETENTION_WINDOW,
            sweep_interval: SWEEP_INTERVAL,
        }
    }
}

/// Runtime configuration for PasteBox.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: String,
    pub port: u16,
    /// Public base URL without a trailing slash.
    pub site_url: String,
    pub max_paste_size: usize,
    pub retention: RetentionConfig,
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: String) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = resolve_home_dir() {
            return home.join(rest).to_string_lossy().to_string();
        }
    }
    path
}

fn resolve_home_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        if !home.trim().is_empty() {
            return Some(PathBuf::from(home));
        }
    }

    // Windows
    if let Ok(profile) = env::var("USERPROFILE") {
        if !profile.trim().is_empty() {
            return Some(PathBuf::from(profile));
        }
    }

    std::env::current_dir().ok()
}

/// Strip trailing slashes so share links can be joined with `/p/{id}`.
///
/// # Returns
/// The trimmed URL, or [`DEFAULT_SITE_URL`] when nothing is left.
pub fn normalize_site_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_SITE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The retention policy is fixed and never read from the environment.
    ///
    /// # Returns
    /// A populated [`Config`] with defaults applied when env vars are missing.
    pub fn from_env() -> Self {
        Self {
            db_path: env::var("DB_PATH").map(expand_tilde).unwrap_or_else(|_| {
                let home = resolve_home_dir().unwrap_or_else(|| PathBuf::from("."));
                let cache_dir = home.join(".cache").join("pastebox");
                cache_dir.join("db").to_string_lossy().to_string()
            }),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            site_url: env::var("SITE_URL")
                .map(|url| normalize_site_url(&url))
                .unwrap_or_else(|_| DEFAULT_SITE_URL.to_string()),
            max_paste_size: env::var("MAX_PASTE_SIZE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_PASTE_SIZE),
            retention: RetentionConfig::default(),
        }
    }

    /// Public share link for a paste.
    pub fn share_url(&self, paste_id: &str) -> String {
        format!("{}/p/{}", self.site_url, paste_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_site_url_strips_trailing_slashes() {
        assert_eq!(
            normalize_site_url("https://code.example.org//"),
            "https://code.example.org"
        );
        assert_eq!(normalize_site_url("  "), DEFAULT_SITE_URL);
    }

    #[test]
    fn retention_defaults_are_seven_days_and_daily_sweeps() {
        let retention = RetentionConfig::default();
        assert_eq!(retention.retention_window, Duration::from_secs(604_800));
        assert_eq!(retention.sweep_interval, Duration::from_secs(86_400));
    }

    #[test]
    fn share_url_joins_site_and_id() {
        let config = Config {
            db_path: "/tmp/pastebox-db".to_string(),
            port: 5000,
            site_url: "https://code.example.org".to_string(),
            max_paste_size: 1024,
            retention: RetentionConfig::default(),
        };
        assert_eq!(config.share_url("0a1b2c3d"), "https://code.example.org/p/0a1b2c3d");
    }
}
