//! Double-tap recognition.
//!
//! A tap that lands within the window of the previous tap counts as a
//! double tap. The previous-tap timestamp is updated on every tap, so a
//! single tap never fires. Per-item timestamps older than the window are
//! dropped as new taps arrive.

use crate::domain::ImageId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use tokio::time::Instant;

/// Whose previous tap a new tap is compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GestureScope {
    /// Each image keeps its own previous-tap time.
    #[default]
    PerItem,

    /// One previous-tap time for all images: tapping A then B quickly likes B.
    Shared,
}

impl fmt::Display for GestureScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PerItem => f.write_str("per-item"),
            Self::Shared => f.write_str("shared"),
        }
    }
}

impl FromStr for GestureScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-item" | "per_item" | "item" => Ok(Self::PerItem),
            "shared" | "global" => Ok(Self::Shared),
            other => Err(format!("unknown gesture scope: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    window: Duration,
    scope: GestureScope,
    per_item: HashMap<ImageId, Instant>,
    shared: Option<Instant>,
}

impl GestureRecognizer {
    #[must_use]
    pub fn new(window: Duration, scope: GestureScope) -> Self {
        Self {
            window,
            scope,
            per_item: HashMap::new(),
            shared: None,
        }
    }

    /// Registers a tap on `id` at `at`. Returns `true` if it completes a
    /// double tap.
    pub fn register(&mut self, id: &ImageId, at: Instant) -> bool {
        let window = self.window;
        let last = match self.scope {
            GestureScope::PerItem => {
                self.per_item
                    .retain(|_, last| at.saturating_duration_since(*last) < window);
                self.per_item.insert(id.clone(), at)
            }
            GestureScope::Shared => self.shared.replace(at),
        };
        last.is_some_and(|last| at.saturating_duration_since(last) < window)
    }
}
