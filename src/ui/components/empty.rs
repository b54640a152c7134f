//! Placeholder shown when there is nothing to list.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

pub fn render_empty_state(out: &mut String, empty: &EmptyState, theme: &Theme, cols: usize) {
    let padding = cols.saturating_sub(empty.message.chars().count()) / 2;
    out.push('\n');
    out.push_str(&" ".repeat(padding));
    out.push_str(&theme.paint(|c| c.text_dim.as_str(), &empty.message));
    out.push_str("\n\n");
}

pub fn render_spinner(out: &mut String, theme: &Theme, cols: usize) {
    let text = "Loading…";
    let padding = cols.saturating_sub(text.chars().count()) / 2;
    out.push('\n');
    out.push_str(&" ".repeat(padding));
    out.push_str(&theme.paint(|c| c.accent.as_str(), text));
    out.push_str("\n\n");
}
