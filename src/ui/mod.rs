//! Text rendering of the gallery screen.
//!
//! ```text
//! AppState → compute_viewmodel → GalleryViewModel → render_to_string → text
//! ```
//!
//! - [`viewmodel`]: display-ready data computed from application state
//! - [`renderer`]: top-level layout
//! - [`components`]: header, cards, pagination and notice pieces
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render_to_string;
pub use theme::Theme;
pub use viewmodel::{EmptyState, GalleryViewModel, HeaderInfo, ImageCard, PaginationInfo, QueryBarInfo};
