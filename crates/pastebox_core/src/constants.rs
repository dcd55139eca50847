//! Shared constants used across PasteBox crates.

use std::time::Duration;

/// Default HTTP port for PasteBox.
pub const DEFAULT_PORT: u16 = 5000;

/// Default maximum paste size accepted by the HTTP layer.
pub const DEFAULT_MAX_PASTE_SIZE: usize = 10 * 1024 * 1024;

/// Default public base URL used when building share links.
pub const DEFAULT_SITE_URL: &str = "http://localhost:5000";

/// Age after which pastes are removed by the retention sweeper.
pub const RETENTION_WINDOW: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Delay between retention sweeps.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Number of summaries returned by the recent-pastes listing.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Language tag used when none is given or the extension is unknown.
pub const DEFAULT_LANGUAGE: &str = "plaintext";

/// Title used for single-file pastes submitted without one.
pub const DEFAULT_PASTE_TITLE: &str = "Untitled";

/// Title used for directory pastes submitted without one.
pub const DEFAULT_DIRECTORY_TITLE: &str = "Untitled project";
