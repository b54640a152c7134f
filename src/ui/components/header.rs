//! Title bar and query bar.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::{HeaderInfo, QueryBarInfo};
use crate::domain::SortMode;

/// Centers the view title and appends the session status on the right.
pub fn render_header(out: &mut String, header: &HeaderInfo, theme: &Theme, cols: usize) {
    let status = if header.auth_busy {
        "signing in…"
    } else if header.signed_in {
        "signed in"
    } else {
        "signed out"
    };

    let title = format!("Studio Gallery · {}", header.title);
    let title_len = title.chars().count();
    let status_len = status.chars().count();
    let left = cols.saturating_sub(title_len) / 2;
    let right = cols.saturating_sub(left + title_len + status_len);

    let line = format!("{}{title}{}{status}", " ".repeat(left), " ".repeat(right));
    out.push_str(&theme.header(&line));
    out.push('\n');
}

/// Search text and the sort options, with the active one bracketed.
pub fn render_query_bar(out: &mut String, bar: &QueryBarInfo, theme: &Theme) {
    let search = if bar.search.is_empty() {
        theme.paint(|c| c.text_dim.as_str(), "(all)")
    } else {
        format!("\"{}\"", bar.search)
    };

    let sorts: Vec<String> = SortMode::ALL
        .iter()
        .map(|mode| {
            if *mode == bar.sort {
                theme.paint(|c| c.accent.as_str(), &format!("[{}]", mode.label()))
            } else {
                mode.label().to_string()
            }
        })
        .collect();

    out.push_str(&format!("search: {search}   sort: {}\n", sorts.join(" ")));
}
