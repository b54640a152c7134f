//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They hold
//! display-ready data only; nothing here decides what to fetch or when.

use crate::app::ViewMode;
use crate::domain::{ImageId, SortMode};

/// Complete view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryViewModel {
    pub view_mode: ViewMode,

    pub header: HeaderInfo,

    /// Search and sort controls. Only shown in the gallery view.
    pub query_bar: Option<QueryBarInfo>,

    pub cards: Vec<ImageCard>,

    /// Page controls. Only shown in the gallery view.
    pub pagination: Option<PaginationInfo>,

    /// A request for the visible list is outstanding.
    pub loading: bool,

    /// Full-area spinner: loading with nothing to show yet.
    pub show_spinner: bool,

    pub empty_state: Option<EmptyState>,

    pub notice: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
    pub signed_in: bool,
    /// Sign-in handshake in progress.
    pub auth_busy: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryBarInfo {
    pub search: String,
    pub sort: SortMode,
    pub sort_label: &'static str,
}

/// Display information for a single image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCard {
    pub id: ImageId,
    pub title: String,
    pub image_url: String,
    pub like_count: u32,
    pub liked_by_me: bool,
    /// The heart animation is running for this card.
    pub pulsing: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationInfo {
    pub page: u32,
    pub has_previous: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}
