//! Image card list.

use crate::ui::theme::Theme;
use crate::ui::viewmodel::ImageCard;

/// Width reserved for the like column, including the heart.
const LIKE_COLUMN: usize = 8;

/// One line per card: position, title, heart and count.
///
/// The position is what the CLI's `tap`/`like` commands accept. A pulsing
/// card is marked with `*`.
pub fn render_cards(out: &mut String, cards: &[ImageCard], theme: &Theme, cols: usize) {
    let title_width = cols.saturating_sub(LIKE_COLUMN + 8).max(8);

    for (index, card) in cards.iter().enumerate() {
        let heart = if card.liked_by_me {
            theme.paint(|c| c.liked.as_str(), "♥")
        } else {
            "♡".to_string()
        };
        let marker = if card.pulsing {
            theme.paint(|c| c.accent.as_str(), "*")
        } else {
            " ".to_string()
        };

        out.push_str(&format!(
            "{marker}{:>3}  {:<title_width$} {heart} {:>4}\n",
            index + 1,
            truncate(&card.title, title_width),
            card.like_count,
        ));
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_titles_are_cut() {
        assert_eq!(truncate("Harbor at Dawn", 6), "Harbo…");
        assert_eq!(truncate("Pier", 6), "Pier");
    }
}
