//! Text components of the gallery screen.
//!
//! Each component appends its lines to an output buffer. The layout is:
//!
//! ```text
//! [Header]
//! [Border]
//! [Query bar]          gallery view only
//! [Cards | spinner | empty state]
//! [Border]
//! [Pagination]         gallery view only
//! [Notice]             when present
//! ```

mod cards;
mod empty;
mod footer;
mod header;

pub use cards::render_cards;
pub use empty::{render_empty_state, render_spinner};
pub use footer::{render_notice, render_pagination};
pub use header::{render_header, render_query_bar};

use crate::ui::theme::Theme;

pub fn render_border(out: &mut String, theme: &Theme, cols: usize) {
    out.push_str(&theme.paint(|c| c.border.as_str(), &"─".repeat(cols)));
    out.push('\n');
}
