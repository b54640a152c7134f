//! Filesystem locations for the session file and trace output.
//!
//! Everything lives under one data directory. It is taken from the
//! `data_dir` config key when set, otherwise from the platform data
//! directory resolved by `directories`.

use crate::Config;
use directories::ProjectDirs;
use std::path::PathBuf;

/// File name of the persisted session inside the data directory.
pub const SESSION_FILE: &str = "session.json";

/// File name of the span export inside the data directory.
pub const TRACE_FILE: &str = "studio-gallery-traces.json";

/// Returns the data directory for this configuration.
///
/// Falls back to `./.studio-gallery` when the platform has no home
/// directory (some containers).
///
/// # Examples
///
/// ```
/// use std::path::PathBuf;
/// use studio_gallery::infrastructure::data_dir;
/// use studio_gallery::Config;
///
/// let config = Config {
///     data_dir: Some(PathBuf::from("/tmp/gallery")),
///     ..Default::default()
/// };
/// assert_eq!(data_dir(&config), PathBuf::from("/tmp/gallery"));
/// ```
#[must_use]
pub fn data_dir(config: &Config) -> PathBuf {
    config
        .data_dir
        .clone()
        .or_else(|| ProjectDirs::from("", "", "studio-gallery").map(|dirs| dirs.data_dir().to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(".studio-gallery"))
}

#[must_use]
pub fn session_file(config: &Config) -> PathBuf {
    data_dir(config).join(SESSION_FILE)
}

#[must_use]
pub fn trace_file(config: &Config) -> PathBuf {
    data_dir(config).join(TRACE_FILE)
}
