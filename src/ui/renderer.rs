//! Top-level rendering coordinator.
//!
//! Turns a [`GalleryViewModel`] into a block of text. The renderer never
//! looks at `AppState`; whatever it shows was decided by
//! `AppState::compute_viewmodel`.
//!
//! ```
//! use studio_gallery::ui::{render_to_string, Theme};
//! use studio_gallery::ui::viewmodel::{GalleryViewModel, HeaderInfo};
//! use studio_gallery::app::ViewMode;
//!
//! let vm = GalleryViewModel {
//!     view_mode: ViewMode::Liked,
//!     header: HeaderInfo { title: "My Likes".into(), signed_in: true, auth_busy: false },
//!     query_bar: None,
//!     cards: vec![],
//!     pagination: None,
//!     loading: true,
//!     show_spinner: true,
//!     empty_state: None,
//!     notice: None,
//! };
//! assert!(render_to_string(&vm, &Theme::plain(), 60).contains("Loading"));
//! ```

use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::GalleryViewModel;

/// Renders `vm` at `cols` columns wide.
#[must_use]
pub fn render_to_string(vm: &GalleryViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::new();

    components::render_header(&mut out, &vm.header, theme, cols);
    components::render_border(&mut out, theme, cols);

    if let Some(bar) = &vm.query_bar {
        components::render_query_bar(&mut out, bar, theme);
    }

    if vm.show_spinner {
        components::render_spinner(&mut out, theme, cols);
    } else if let Some(empty) = &vm.empty_state {
        components::render_empty_state(&mut out, empty, theme, cols);
    } else {
        components::render_cards(&mut out, &vm.cards, theme, cols);
    }

    components::render_border(&mut out, theme, cols);

    if let Some(pagination) = &vm.pagination {
        components::render_pagination(&mut out, pagination, theme);
    }
    if let Some(notice) = &vm.notice {
        components::render_notice(&mut out, notice, theme);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ViewMode;
    use crate::domain::{ImageId, SortMode};
    use crate::ui::viewmodel::{EmptyState, HeaderInfo, ImageCard, PaginationInfo, QueryBarInfo};

    fn gallery_vm() -> GalleryViewModel {
        GalleryViewModel {
            view_mode: ViewMode::Gallery,
            header: HeaderInfo {
                title: "Gallery".into(),
                signed_in: false,
                auth_busy: false,
            },
            query_bar: Some(QueryBarInfo {
                search: "sunset".into(),
                sort: SortMode::Popular,
                sort_label: SortMode::Popular.label(),
            }),
            cards: vec![
                ImageCard {
                    id: ImageId::new("2"),
                    title: "Sunset over Dunes".into(),
                    image_url: "https://img.example/2.jpg".into(),
                    like_count: 12,
                    liked_by_me: true,
                    pulsing: true,
                },
                ImageCard {
                    id: ImageId::new("5"),
                    title: "Sunset Pier".into(),
                    image_url: "https://img.example/5.jpg".into(),
                    like_count: 12,
                    liked_by_me: false,
                    pulsing: false,
                },
            ],
            pagination: Some(PaginationInfo {
                page: 1,
                has_previous: false,
                has_next: false,
            }),
            loading: false,
            show_spinner: false,
            empty_state: None,
            notice: Some("Access Denied: Please Login to Like".into()),
        }
    }

    #[test]
    fn gallery_frame_lists_cards_in_order() {
        let text = render_to_string(&gallery_vm(), &Theme::plain(), 60);

        assert!(text.contains("Studio Gallery · Gallery"));
        assert!(text.contains("signed out"));
        assert!(text.contains("search: \"sunset\""));
        assert!(text.contains("[Most Liked]"));
        assert!(text.contains("page 1"));
        assert!(text.contains("! Access Denied: Please Login to Like"));

        let dunes = text.find("Sunset over Dunes").unwrap();
        let pier = text.find("Sunset Pier").unwrap();
        assert!(dunes < pier);
        assert!(text.lines().any(|l| l.starts_with('*') && l.contains("♥") && l.contains("12")));
    }

    #[test]
    fn empty_state_replaces_cards() {
        let mut vm = gallery_vm();
        vm.cards.clear();
        vm.notice = None;
        vm.empty_state = Some(EmptyState {
            message: "No images match \"zzz\"".into(),
        });

        let text = render_to_string(&vm, &Theme::plain(), 60);
        assert!(text.contains("No images match \"zzz\""));
        assert!(!text.contains('!'));
    }

    #[test]
    fn colored_theme_emits_escapes() {
        let text = render_to_string(&gallery_vm(), &Theme::default(), 60);
        assert!(text.contains('\u{001b}'));
    }
}
