//! Pagination controls and the notice line.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::PaginationInfo;

pub fn render_pagination(out: &mut String, pagination: &PaginationInfo, theme: &Theme) {
    let control = |enabled: bool, label: &str| {
        if enabled {
            label.to_string()
        } else {
            theme.paint(|c| c.text_dim.as_str(), label)
        }
    };
    out.push_str(&format!(
        "{}  page {}  {}\n",
        control(pagination.has_previous, "< prev"),
        pagination.page,
        control(pagination.has_next, "next >"),
    ));
}

pub fn render_notice(out: &mut String, notice: &str, theme: &Theme) {
    out.push_str(&theme.paint(|c| c.notice.as_str(), &format!("! {notice}")));
    out.push('\n');
}
