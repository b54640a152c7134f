//! Application state management and view model computation.
//!
//! [`AppState`] is the single owner of everything the view shows: the query,
//! the current list, the session as last announced by the session bus, and
//! the bookkeeping for fetches, optimistic likes, gestures and the pulse.
//! It is mutated only by the event handler.
//!
//! # State Components
//!
//! - **Hydration**: nothing is fetched or rendered until the session store
//!   has been read
//! - **Query**: search text, sort mode and page
//! - **Images**: the current page, replaced wholesale by each fresh fetch
//! - **Liked images**: the liked view's list, loaded on demand
//! - **Fetch tracker / like ledger / gestures**: ordering and optimistic state

use super::fetch::FetchTracker;
use super::gesture::GestureRecognizer;
use super::likes::LikeLedger;
use super::modes::{Notice, ViewMode};
use super::Action;
use crate::domain::{Hydration, Image, ImageId, LikeState, QueryState, SessionToken, PAGE_SIZE};
use crate::ui::viewmodel::{
    EmptyState, GalleryViewModel, HeaderInfo, ImageCard, PaginationInfo, QueryBarInfo,
};
use crate::worker::WorkerMessage;
use crate::Config;
use std::time::Duration;

/// Delays the engine schedules with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub debounce: Duration,
    pub pulse: Duration,
}

/// The image currently running its like animation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pulse {
    pub id: ImageId,
    pub generation: u64,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub hydration: Hydration,

    pub query: QueryState,

    /// The gallery page on screen.
    pub images: Vec<Image>,

    /// Last token announced on the session bus.
    pub session: Option<SessionToken>,

    pub view_mode: ViewMode,

    pub liked_images: Vec<Image>,

    pub liked_loading: bool,

    pub notice: Option<Notice>,

    pub auth_in_progress: bool,

    pub fetches: FetchTracker,

    pub likes: LikeLedger,

    pub gestures: GestureRecognizer,

    pub pulse: Option<Pulse>,

    pulse_generation: u64,

    pub timings: Timings,
}

impl AppState {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            hydration: Hydration::Uninitialized,
            query: QueryState::default(),
            images: Vec::new(),
            session: None,
            view_mode: ViewMode::Gallery,
            liked_images: Vec::new(),
            liked_loading: false,
            notice: None,
            auth_in_progress: false,
            fetches: FetchTracker::default(),
            likes: LikeLedger::default(),
            gestures: GestureRecognizer::new(config.double_tap(), config.gesture_scope),
            pulse: None,
            pulse_generation: 0,
            timings: Timings {
                debounce: config.debounce(),
                pulse: config.pulse(),
            },
        }
    }

    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.hydration.is_ready()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.fetches.is_loading()
    }

    /// Inferred from a full page. A full last page therefore allows one more
    /// "next" that comes back empty.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.images.len() >= PAGE_SIZE as usize
    }

    #[must_use]
    pub const fn has_previous_page(&self) -> bool {
        self.query.page() > 1
    }

    /// Arms the debounce for the current query. Does nothing before hydration.
    pub fn schedule_fetch(&mut self) -> Vec<Action> {
        if !self.is_ready() {
            tracing::debug!("not hydrated, fetch not scheduled");
            return vec![];
        }
        let generation = self.fetches.schedule();
        tracing::debug!(generation, delay_ms = self.timings.debounce.as_millis() as u64, "fetch scheduled");
        vec![Action::ScheduleFetch {
            generation,
            delay: self.timings.debounce,
        }]
    }

    /// Sends a fetch for the current query now, cancelling any armed debounce.
    pub fn fetch_now(&mut self) -> Vec<Action> {
        let mut actions = vec![];
        if self.fetches.cancel_pending() {
            actions.push(Action::CancelScheduledFetch);
        }
        let seq = self.fetches.issue();
        let request = self.query.to_request();
        tracing::debug!(
            seq,
            search = %request.search,
            sort = %request.sort,
            page = request.page,
            "fetch issued"
        );
        actions.push(Action::PostToWorker(WorkerMessage::fetch_images(
            seq,
            request,
            self.session.clone(),
        )));
        actions
    }

    pub fn find_image(&self, id: &ImageId) -> Option<&Image> {
        self.images.iter().find(|image| &image.id == id)
    }

    /// Writes `state` into every list that shows `id`.
    pub fn write_like_state(&mut self, id: &ImageId, state: LikeState) {
        for image in self.images.iter_mut().chain(self.liked_images.iter_mut()) {
            if &image.id == id {
                image.apply_like_state(state);
            }
        }
    }

    /// Lays the optimistic target of every in-flight like over freshly
    /// loaded lists, so a fetch that lands mid-toggle does not undo it.
    pub fn overlay_pending_likes(&mut self) {
        for image in self.images.iter_mut().chain(self.liked_images.iter_mut()) {
            if let Some(pending) = self.likes.get(&image.id) {
                image.apply_like_state(pending.target);
            }
        }
    }

    /// Starts the like animation on `id`, replacing any running one.
    pub fn start_pulse(&mut self, id: &ImageId) -> Action {
        self.pulse_generation += 1;
        self.pulse = Some(Pulse {
            id: id.clone(),
            generation: self.pulse_generation,
        });
        Action::SchedulePulseClear {
            generation: self.pulse_generation,
            delay: self.timings.pulse,
        }
    }

    /// Clears the pulse if `generation` is still the running one.
    pub fn clear_pulse(&mut self, generation: u64) -> bool {
        if self.pulse.as_ref().is_some_and(|p| p.generation == generation) {
            self.pulse = None;
            true
        } else {
            false
        }
    }

    /// Computes the view model for rendering. `None` until hydrated.
    #[must_use]
    pub fn compute_viewmodel(&self) -> Option<GalleryViewModel> {
        if !self.is_ready() {
            return None;
        }

        let (source, loading) = match self.view_mode {
            ViewMode::Gallery => (&self.images, self.is_loading()),
            ViewMode::Liked => (&self.liked_images, self.liked_loading),
        };

        let cards: Vec<ImageCard> = source.iter().map(|image| self.compute_card(image)).collect();
        let show_spinner = loading && cards.is_empty();
        let empty_state = (!loading && cards.is_empty()).then(|| self.compute_empty_state());

        let (query_bar, pagination) = match self.view_mode {
            ViewMode::Gallery => (
                Some(QueryBarInfo {
                    search: self.query.search_text().to_string(),
                    sort: self.query.sort_mode(),
                    sort_label: self.query.sort_mode().label(),
                }),
                Some(PaginationInfo {
                    page: self.query.page(),
                    has_previous: self.has_previous_page(),
                    has_next: self.has_next_page(),
                }),
            ),
            ViewMode::Liked => (None, None),
        };

        Some(GalleryViewModel {
            view_mode: self.view_mode,
            header: HeaderInfo {
                title: self.view_mode.title().to_string(),
                signed_in: self.session.is_some(),
                auth_busy: self.auth_in_progress,
            },
            query_bar,
            cards,
            pagination,
            loading,
            show_spinner,
            empty_state,
            notice: self.notice.as_ref().map(ToString::to_string),
        })
    }

    fn compute_card(&self, image: &Image) -> ImageCard {
        ImageCard {
            id: image.id.clone(),
            title: image.display_title().to_string(),
            image_url: image.image_url.clone(),
            like_count: image.like_count,
            liked_by_me: image.liked_by_me.unwrap_or(false),
            pulsing: self.pulse.as_ref().is_some_and(|p| p.id == image.id),
        }
    }

    fn compute_empty_state(&self) -> EmptyState {
        let message = match self.view_mode {
            ViewMode::Liked => "You have not liked anything yet".to_string(),
            ViewMode::Gallery if self.query.search_text().is_empty() => "No images yet".to_string(),
            ViewMode::Gallery => format!("No images match \"{}\"", self.query.search_text()),
        };
        EmptyState { message }
    }
}
