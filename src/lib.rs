//! Studio Gallery: view-state synchronization for a paginated, searchable
//! image gallery with optimistic likes.
//!
//! The engine keeps a local view of a remote gallery in step with user
//! intent:
//! - Debounced list fetches where the last-issued request always wins
//! - Optimistic like toggles with snapshot rollback and a re-fetch on failure
//! - Double-tap-to-like gesture recognition
//! - A persisted session token with a hydration gate and change notifications

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI shell (main.rs)                                │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime/)                                 │  ← tokio event loop
//! │  - Timers, worker tasks, session bus                │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← Pure state machine
//! │  - Event handling, action emission                  │
//! │  - Debounce, ordering, like ledger, gestures        │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Session/Store │   │ Worker Layer  │
//! │ (ui/)         │   │ (session/,    │   │ (worker/,     │
//! │ - View model  │   │  storage/)    │   │  api/)        │
//! │ - Text render │   │ - Token file  │   │ - HTTP calls  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, infrastructure, observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```toml
//! api_url = "http://localhost:5000"
//! debounce_ms = 300
//! double_tap_ms = 300
//! pulse_ms = 800
//! gesture_scope = "per-item"
//! request_timeout_secs = 15
//! trace_level = "debug"
//! theme = "catppuccin-mocha"
//! offline = false
//! ```
//!
//! # Example
//!
//! ```
//! use studio_gallery::{handle_event, AppState, Config, Event};
//! use studio_gallery::domain::Hydration;
//!
//! let mut state = AppState::new(&Config::default());
//! handle_event(&mut state, &Event::Hydrated { token: None })?;
//! assert_eq!(state.hydration, Hydration::Ready);
//!
//! let (render, actions) = handle_event(&mut state, &Event::SetSearch("sunset".into()))?;
//! assert!(render);
//! assert!(!actions.is_empty());
//! # Ok::<(), studio_gallery::GalleryError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod runtime;
pub mod session;
pub mod shell;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, GestureScope, Notice, ViewMode};
pub use domain::{GalleryError, Result};
pub use runtime::{Runtime, RuntimeHandle};
pub use ui::Theme;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use worker::GalleryWorker;

/// Engine and shell configuration.
///
/// Every key has a default, so a partial TOML file or a handful of
/// `key=value` arguments is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the gallery API. Default: `http://localhost:5000`
    pub api_url: String,

    /// Quiet period before a query change is fetched. Default: 300
    pub debounce_ms: u64,

    /// Maximum gap between the taps of a double tap. Default: 300
    pub double_tap_ms: u64,

    /// How long a freshly liked card pulses. Default: 800
    pub pulse_ms: u64,

    pub gesture_scope: GestureScope,

    /// Per-request HTTP timeout. Default: 15
    pub request_timeout_secs: u64,

    /// Where the session file and traces live. Defaults to the platform
    /// data directory.
    pub data_dir: Option<PathBuf>,

    /// Tracing filter, e.g. `debug` or `studio_gallery=trace`.
    pub trace_level: Option<String>,

    /// Built-in theme name or a path to a theme TOML file.
    pub theme: Option<String>,

    /// Use the in-process demo gallery instead of the HTTP API.
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:5000".to_string(),
            debounce_ms: 300,
            double_tap_ms: 300,
            pulse_ms: 800,
            gesture_scope: GestureScope::PerItem,
            request_timeout_secs: 15,
            data_dir: None,
            trace_level: None,
            theme: None,
            offline: false,
        }
    }
}

impl Config {
    #[must_use]
    pub const fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    #[must_use]
    pub const fn double_tap(&self) -> Duration {
        Duration::from_millis(self.double_tap_ms)
    }

    #[must_use]
    pub const fn pulse(&self) -> Duration {
        Duration::from_millis(self.pulse_ms)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid TOML or a key has the
    /// wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&source)
    }

    /// Builds a config from a string map, falling back to defaults per key.
    ///
    /// Values that fail to parse keep the default.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use studio_gallery::{Config, GestureScope};
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_ms".to_string(), "150".to_string());
    /// map.insert("gesture_scope".to_string(), "shared".to_string());
    /// map.insert("pulse_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.debounce_ms, 150);
    /// assert_eq!(config.gesture_scope, GestureScope::Shared);
    /// assert_eq!(config.pulse_ms, 800);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        Self::default().with_overrides(map)
    }

    /// Applies the keys present in `map` on top of `self`.
    #[must_use]
    pub fn with_overrides(mut self, map: &BTreeMap<String, String>) -> Self {
        fn parsed<T: std::str::FromStr>(map: &BTreeMap<String, String>, key: &str) -> Option<T> {
            let raw = map.get(key)?;
            let value = raw.trim().parse().ok();
            if value.is_none() {
                tracing::warn!(key, value = %raw, "ignoring unparseable config value");
            }
            value
        }

        if let Some(url) = map.get("api_url").filter(|s| !s.trim().is_empty()) {
            self.api_url = url.trim().to_string();
        }
        if let Some(ms) = parsed(map, "debounce_ms") {
            self.debounce_ms = ms;
        }
        if let Some(ms) = parsed(map, "double_tap_ms") {
            self.double_tap_ms = ms;
        }
        if let Some(ms) = parsed(map, "pulse_ms") {
            self.pulse_ms = ms;
        }
        if let Some(scope) = parsed(map, "gesture_scope") {
            self.gesture_scope = scope;
        }
        if let Some(secs) = parsed(map, "request_timeout_secs") {
            self.request_timeout_secs = secs;
        }
        if let Some(offline) = parsed(map, "offline") {
            self.offline = offline;
        }
        if let Some(dir) = map.get("data_dir") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Some(level) = map.get("trace_level") {
            self.trace_level = Some(level.clone());
        }
        if let Some(theme) = map.get("theme") {
            self.theme = Some(theme.clone());
        }
        self
    }

    /// Builds a config from command-line `key=value` pairs.
    ///
    /// A `config=<file>` pair loads that TOML file first; the other pairs
    /// override it. A bare `--offline` is shorthand for `offline=true`.
    ///
    /// # Errors
    ///
    /// Returns an error if a named config file cannot be loaded or an
    /// argument is not a `key=value` pair.
    pub fn from_args<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = BTreeMap::new();
        for arg in args {
            let arg = arg.as_ref();
            if arg == "--offline" {
                map.insert("offline".to_string(), "true".to_string());
                continue;
            }
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| GalleryError::Config(format!("expected key=value, got `{arg}`")))?;
            map.insert(key.trim().to_string(), value.to_string());
        }

        let base = match map.remove("config") {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        Ok(base.with_overrides(&map))
    }

    /// Resolves the configured theme, falling back to the default one.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        let Some(theme) = &self.theme else {
            return Theme::default();
        };
        if let Some(builtin) = Theme::from_name(theme) {
            return builtin;
        }
        Theme::from_file(theme).unwrap_or_else(|e| {
            tracing::debug!(theme = %theme, error = %e, "failed to load theme, using default");
            Theme::default()
        })
    }
}

/// Wires storage, API and identity for `config` into a ready [`Runtime`].
///
/// The runtime is not started; call [`Runtime::start`] from inside a tokio
/// runtime to hydrate the session and open the gate.
///
/// # Errors
///
/// Returns an error if the session file or the HTTP client cannot be set up.
///
/// ```no_run
/// use studio_gallery::{initialize, Config};
///
/// # async fn run() -> studio_gallery::Result<()> {
/// let config = Config { offline: true, ..Default::default() };
/// let mut runtime = initialize(&config)?;
/// runtime.start()?;
/// runtime.settle().await?;
/// # Ok(())
/// # }
/// ```
pub fn initialize(config: &Config) -> Result<Runtime> {
    tracing::debug!(offline = config.offline, api_url = %config.api_url, "initializing gallery engine");

    let storage = infrastructure::build_storage(config)?;
    let (api, identity) = infrastructure::build_collaborators(config)?;
    Ok(Runtime::new(config, storage, GalleryWorker::new(api, identity)))
}
