//! Color schemes and ANSI escape sequences.
//!
//! Built-in themes are TOML files compiled into the binary. `plain` has no
//! colors at all and is what tests and non-terminal output use.
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! header_bg = "#313244"   # optional
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! accent = "#f5c2e7"
//! liked = "#f38ba8"
//! notice = "#f9e2af"
//! ```

use crate::domain::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    /// `None` renders without escape sequences.
    #[serde(default)]
    pub colors: Option<ThemeColors>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,
    pub text_normal: String,
    pub text_dim: String,
    pub border: String,
    /// Pulse highlight and the active sort.
    pub accent: String,
    /// Filled heart.
    pub liked: String,
    pub notice: String,
}

impl Theme {
    #[must_use]
    pub fn plain() -> Self {
        Self {
            name: "plain".to_string(),
            colors: None,
        }
    }

    /// Looks up a built-in theme: `plain`, `catppuccin-mocha` or
    /// `catppuccin-latte`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let source = match name {
            "plain" => return Some(Self::plain()),
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };
        toml::from_str(source).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid theme.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Wraps `text` in the color chosen by `pick`, if this theme has colors.
    pub fn paint(&self, pick: impl Fn(&ThemeColors) -> &str, text: &str) -> String {
        match &self.colors {
            Some(colors) => format!("{}{text}{}", fg(pick(colors)), RESET),
            None => text.to_string(),
        }
    }

    /// Bold header line, with the header background when the theme has one.
    #[must_use]
    pub fn header(&self, text: &str) -> String {
        match &self.colors {
            Some(colors) => {
                let bg = colors.header_bg.as_deref().map(bg).unwrap_or_default();
                format!("{BOLD}{}{bg}{text}{RESET}", fg(&colors.header_fg))
            }
            None => text.to_string(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").unwrap_or_else(Self::plain)
    }
}

const BOLD: &str = "\u{001b}[1m";
const RESET: &str = "\u{001b}[0m";

/// Parses `#rrggbb`. Malformed colors render white.
fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
    let hex = hex.trim().trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        hex.get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
            .unwrap_or(255)
    };
    if hex.len() != 6 {
        return (255, 255, 255);
    }
    (channel(0..2), channel(2..4), channel(4..6))
}

fn fg(hex: &str) -> String {
    let (r, g, b) = hex_to_rgb(hex);
    format!("\u{001b}[38;2;{r};{g};{b}m")
}

fn bg(hex: &str) -> String {
    let (r, g, b) = hex_to_rgb(hex);
    format!("\u{001b}[48;2;{r};{g};{b}m")
}
