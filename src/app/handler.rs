//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user intent,
//! timer expiries, session changes and worker responses, translating them
//! into state changes and action sequences.
//!
//! # Architecture
//!
//! 1. Events arrive from the runtime inbox
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via `AppState` methods
//! 4. Actions are collected and returned for execution
//!
//! The handler runs to completion without awaiting; everything asynchronous
//! is expressed as an [`Action`].
//!
//! # Example
//!
//! ```rust
//! use studio_gallery::app::{handle_event, AppState, Event};
//! use studio_gallery::Config;
//!
//! let mut state = AppState::new(&Config::default());
//! let (render, actions) = handle_event(&mut state, &Event::Hydrated { token: None })?;
//! assert!(render);
//! assert_eq!(actions.len(), 1); // debounced first fetch
//! # Ok::<(), studio_gallery::GalleryError>(())
//! ```

use super::fetch::Completion;
use super::modes::{Notice, ViewMode};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::{Hydration, ImageId, SessionToken, SortMode};
use crate::worker::{WorkerMessage, WorkerResponse};
use tokio::time::Instant;

/// Events triggered by user intent, timers, the session bus, or the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The session store has been read. Opens the hydration gate.
    Hydrated { token: Option<SessionToken> },

    SetSearch(String),
    SetSort(SortMode),
    SetPage(u32),
    NextPage,
    PreviousPage,

    /// The debounce timer for `generation` fired.
    DebounceElapsed { generation: u64 },

    /// The session bus announced a new token (or sign-out).
    SessionChanged { token: Option<SessionToken> },

    /// A tap on an image card.
    Tap { id: ImageId, at: Instant },

    /// Explicit like toggle (the heart button, or a recognised double tap).
    ToggleLike { id: ImageId },

    /// The pulse timer for `generation` fired.
    PulseElapsed { generation: u64 },

    SignIn,
    SignOut,
    ShowGallery,
    ShowLiked,
    DismissNotice,

    /// Re-fetch the visible list immediately.
    Refresh,

    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// Returns `(render, actions)`: whether the view changed, and the side
/// effects to run in order.
///
/// # Errors
///
/// Reserved for state transitions that cannot be completed; every current
/// event degrades to a notice instead.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    match event {
        Event::Hydrated { token } => {
            state.hydration = Hydration::Ready;
            state.session.clone_from(token);
            tracing::debug!(signed_in = token.is_some(), "hydrated");
            Ok((true, state.schedule_fetch()))
        }
        Event::SetSearch(text) => {
            if !state.query.set_search_text(text.as_str()) {
                return Ok((false, vec![]));
            }
            tracing::trace!(search = %text, "search text updated");
            Ok((true, state.schedule_fetch()))
        }
        Event::SetSort(sort) => {
            if !state.query.set_sort_mode(*sort) {
                return Ok((false, vec![]));
            }
            tracing::debug!(sort = %sort, "sort mode updated");
            Ok((true, state.schedule_fetch()))
        }
        Event::SetPage(page) => set_page(state, *page),
        Event::NextPage => {
            if !state.has_next_page() {
                tracing::debug!("no next page");
                return Ok((false, vec![]));
            }
            let next = state.query.page().saturating_add(1);
            set_page(state, next)
        }
        Event::PreviousPage => {
            if !state.has_previous_page() {
                return Ok((false, vec![]));
            }
            let previous = state.query.page() - 1;
            set_page(state, previous)
        }
        Event::DebounceElapsed { generation } => {
            if !state.fetches.take_if_current(*generation) {
                tracing::debug!(generation, "superseded debounce ignored");
                return Ok((false, vec![]));
            }
            Ok((true, state.fetch_now()))
        }
        Event::SessionChanged { token } => {
            state.session.clone_from(token);
            if token.is_some() {
                state.auth_in_progress = false;
            } else if state.view_mode == ViewMode::Liked {
                state.view_mode = ViewMode::Gallery;
                state.liked_images.clear();
                state.liked_loading = false;
            }
            tracing::debug!(signed_in = token.is_some(), "session changed");

            if !state.is_ready() {
                return Ok((false, vec![]));
            }
            state.query.set_page(1);
            Ok((true, state.fetch_now()))
        }
        Event::Tap { id, at } => {
            if state.gestures.register(id, *at) {
                tracing::debug!(image_id = %id, "double tap");
                toggle_like(state, id)
            } else {
                Ok((false, vec![]))
            }
        }
        Event::ToggleLike { id } => toggle_like(state, id),
        Event::PulseElapsed { generation } => Ok((state.clear_pulse(*generation), vec![])),
        Event::SignIn => {
            if state.auth_in_progress || state.session.is_some() {
                return Ok((false, vec![]));
            }
            state.auth_in_progress = true;
            Ok((true, vec![Action::PostToWorker(WorkerMessage::sign_in())]))
        }
        Event::SignOut => {
            if state.session.is_none() {
                return Ok((false, vec![]));
            }
            tracing::debug!("signing out");
            Ok((false, vec![Action::ClearSession]))
        }
        Event::ShowGallery => {
            let changed = state.view_mode != ViewMode::Gallery;
            state.view_mode = ViewMode::Gallery;
            Ok((changed, vec![]))
        }
        Event::ShowLiked => {
            let Some(token) = state.session.clone() else {
                state.notice = Some(Notice::SignInRequired);
                return Ok((true, vec![]));
            };
            state.view_mode = ViewMode::Liked;
            state.liked_loading = true;
            Ok((true, vec![Action::PostToWorker(WorkerMessage::fetch_my_likes(token))]))
        }
        Event::DismissNotice => Ok((state.notice.take().is_some(), vec![])),
        Event::Refresh => {
            if !state.is_ready() {
                return Ok((false, vec![]));
            }
            match (state.view_mode, state.session.clone()) {
                (ViewMode::Liked, Some(token)) => {
                    state.liked_loading = true;
                    Ok((true, vec![Action::PostToWorker(WorkerMessage::fetch_my_likes(token))]))
                }
                _ => Ok((true, state.fetch_now())),
            }
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn set_page(state: &mut AppState, page: u32) -> Result<(bool, Vec<Action>)> {
    if !state.query.set_page(page) {
        return Ok((false, vec![]));
    }
    tracing::debug!(page = state.query.page(), "page updated");
    Ok((true, state.schedule_fetch()))
}

fn toggle_like(state: &mut AppState, id: &ImageId) -> Result<(bool, Vec<Action>)> {
    let Some(token) = state.session.clone() else {
        tracing::debug!(image_id = %id, "like denied without session");
        state.notice = Some(Notice::AccessDenied);
        return Ok((true, vec![]));
    };
    let Some(current) = state.find_image(id).map(crate::domain::Image::like_state) else {
        tracing::debug!(image_id = %id, "like target not in view");
        return Ok((false, vec![]));
    };

    let optimistic = state.likes.begin(id, current);
    state.write_like_state(id, optimistic);
    tracing::debug!(
        image_id = %id,
        liked = optimistic.liked_by_me,
        like_count = optimistic.like_count,
        "optimistic like applied"
    );

    let mut actions = vec![Action::PostToWorker(WorkerMessage::toggle_like(id.clone(), token))];
    if optimistic.liked_by_me {
        actions.push(state.start_pulse(id));
    }
    Ok((true, actions))
}

fn handle_worker_response(state: &mut AppState, response: &WorkerResponse) -> Result<(bool, Vec<Action>)> {
    match response {
        WorkerResponse::ImagesLoaded { seq, images } => match state.fetches.complete(*seq) {
            Completion::Fresh => {
                tracing::debug!(seq, image_count = images.len(), "images applied");
                state.images.clone_from(images);
                state.overlay_pending_likes();
                Ok((true, vec![]))
            }
            Completion::Stale => {
                tracing::debug!(seq, applied = state.fetches.applied_seq(), "stale images discarded");
                Ok((true, vec![]))
            }
        },
        WorkerResponse::FetchFailed { seq, message } => {
            if state.fetches.complete(*seq) == Completion::Fresh {
                tracing::warn!(seq, error = %message, "fetch failed, keeping last list");
                state.notice = Some(Notice::FetchFailed(message.clone()));
            }
            Ok((true, vec![]))
        }
        WorkerResponse::LikeConfirmed { id, state: canonical } => {
            match state.likes.confirm(id, *canonical) {
                Some(settled) => {
                    tracing::debug!(image_id = %id, like_count = settled.like_count, "like settled");
                    state.write_like_state(id, settled);
                    Ok((true, vec![]))
                }
                None => Ok((false, vec![])),
            }
        }
        WorkerResponse::LikeFailed { id, message } => {
            tracing::warn!(image_id = %id, error = %message, "like failed, rolling back");
            if let Some(snapshot) = state.likes.fail(id) {
                state.write_like_state(id, snapshot);
            }
            state.notice = Some(Notice::LikeFailed(message.clone()));
            Ok((true, state.fetch_now()))
        }
        WorkerResponse::SessionIssued { token } => {
            state.auth_in_progress = false;
            Ok((true, vec![Action::StoreSession(token.clone())]))
        }
        WorkerResponse::AuthFailed { message } => {
            tracing::warn!(error = %message, "sign-in failed");
            state.auth_in_progress = false;
            state.notice = Some(Notice::AuthFailed(message.clone()));
            Ok((true, vec![]))
        }
        WorkerResponse::MyLikesLoaded { images } => {
            state.liked_loading = false;
            state.liked_images.clone_from(images);
            state.overlay_pending_likes();
            Ok((true, vec![]))
        }
        WorkerResponse::MyLikesFailed { message } => {
            state.liked_loading = false;
            state.notice = Some(Notice::LikesFailed(message.clone()));
            Ok((true, vec![]))
        }
    }
}

/// Span field for an event; never carries tokens or free text.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Hydrated { .. } => "hydrated",
        Event::SetSearch(_) => "set_search",
        Event::SetSort(_) => "set_sort",
        Event::SetPage(_) => "set_page",
        Event::NextPage => "next_page",
        Event::PreviousPage => "previous_page",
        Event::DebounceElapsed { .. } => "debounce_elapsed",
        Event::SessionChanged { .. } => "session_changed",
        Event::Tap { .. } => "tap",
        Event::ToggleLike { .. } => "toggle_like",
        Event::PulseElapsed { .. } => "pulse_elapsed",
        Event::SignIn => "sign_in",
        Event::SignOut => "sign_out",
        Event::ShowGallery => "show_gallery",
        Event::ShowLiked => "show_liked",
        Event::DismissNotice => "dismiss_notice",
        Event::Refresh => "refresh",
        Event::WorkerResponse(_) => "worker_response",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Image, LikeState};
    use crate::Config;
    use std::time::Duration;

    fn hydrated(token: Option<&str>) -> AppState {
        let mut state = AppState::new(&Config::default());
        handle_event(&mut state, &Event::Hydrated { token: token.map(SessionToken::new) }).unwrap();
        state
    }

    fn with_images(mut state: AppState) -> AppState {
        let mut liked = Image::new("b", "u", "Liked");
        liked.like_count = 1;
        liked.liked_by_me = Some(true);
        state.images = vec![Image::new("a", "u", "Plain"), liked];
        state
    }

    fn posted(actions: &[Action]) -> Vec<&WorkerMessage> {
        actions
            .iter()
            .filter_map(|a| match a {
                Action::PostToWorker(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn query_changes_before_hydration_do_not_schedule() {
        let mut state = AppState::new(&Config::default());
        let (_, actions) = handle_event(&mut state, &Event::SetSearch("sea".into())).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.query.search_text(), "sea");
    }

    #[test]
    fn search_and_sort_reset_page() {
        let mut state = hydrated(None);
        handle_event(&mut state, &Event::SetPage(4)).unwrap();
        handle_event(&mut state, &Event::SetSearch("x".into())).unwrap();
        assert_eq!(state.query.page(), 1);

        handle_event(&mut state, &Event::SetPage(3)).unwrap();
        handle_event(&mut state, &Event::SetSort(SortMode::Latest)).unwrap();
        assert_eq!(state.query.page(), 1);
    }

    #[test]
    fn only_latest_debounce_generation_fetches() {
        let mut state = hydrated(None);
        handle_event(&mut state, &Event::SetSearch("s".into())).unwrap();
        handle_event(&mut state, &Event::SetSearch("su".into())).unwrap();

        let (_, stale) = handle_event(&mut state, &Event::DebounceElapsed { generation: 2 }).unwrap();
        assert!(stale.is_empty());

        let (_, actions) = handle_event(&mut state, &Event::DebounceElapsed { generation: 3 }).unwrap();
        match posted(&actions).as_slice() {
            [WorkerMessage::FetchImages { request, .. }] => assert_eq!(request.search, "su"),
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn unauthenticated_like_is_denied_without_request() {
        let mut state = with_images(hydrated(None));
        let (render, actions) = handle_event(&mut state, &Event::ToggleLike { id: ImageId::new("a") }).unwrap();

        assert!(render);
        assert!(actions.is_empty());
        assert_eq!(state.notice, Some(Notice::AccessDenied));
        assert_eq!(state.images[0].like_count, 0);
    }

    #[test]
    fn like_applies_optimistically_and_pulses() {
        let mut state = with_images(hydrated(Some("t")));
        let (_, actions) = handle_event(&mut state, &Event::ToggleLike { id: ImageId::new("a") }).unwrap();

        assert_eq!(state.images[0].like_state(), LikeState { liked_by_me: true, like_count: 1 });
        assert_eq!(posted(&actions).len(), 1);
        assert!(actions.iter().any(|a| matches!(
            a,
            Action::SchedulePulseClear { delay, .. } if *delay == Duration::from_millis(800)
        )));
        assert_eq!(state.pulse.as_ref().map(|p| p.id.as_str()), Some("a"));
    }

    #[test]
    fn unlike_does_not_pulse_and_floors_at_zero() {
        let mut state = with_images(hydrated(Some("t")));
        state.images[1].like_count = 0;
        let (_, actions) = handle_event(&mut state, &Event::ToggleLike { id: ImageId::new("b") }).unwrap();

        assert_eq!(state.images[1].like_state(), LikeState { liked_by_me: false, like_count: 0 });
        assert!(!actions.iter().any(|a| matches!(a, Action::SchedulePulseClear { .. })));
        assert!(state.pulse.is_none());
    }

    #[test]
    fn missing_image_is_ignored() {
        let mut state = with_images(hydrated(Some("t")));
        let (render, actions) = handle_event(&mut state, &Event::ToggleLike { id: ImageId::new("zz") }).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn failed_like_rolls_back_and_refetches() {
        let mut state = with_images(hydrated(Some("t")));
        let id = ImageId::new("a");
        handle_event(&mut state, &Event::ToggleLike { id: id.clone() }).unwrap();

        let failure = WorkerResponse::LikeFailed { id, message: "500".into() };
        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(failure)).unwrap();

        assert_eq!(state.images[0].like_state(), LikeState { liked_by_me: false, like_count: 0 });
        assert!(matches!(state.notice, Some(Notice::LikeFailed(_))));
        assert!(matches!(posted(&actions).as_slice(), [WorkerMessage::FetchImages { .. }]));
    }

    #[test]
    fn canonical_confirmation_overrides_optimistic_count() {
        let mut state = with_images(hydrated(Some("t")));
        let id = ImageId::new("a");
        handle_event(&mut state, &Event::ToggleLike { id: id.clone() }).unwrap();

        let canonical = LikeState { liked_by_me: true, like_count: 42 };
        let confirmed = WorkerResponse::LikeConfirmed { id, state: Some(canonical) };
        handle_event(&mut state, &Event::WorkerResponse(confirmed)).unwrap();

        assert_eq!(state.images[0].like_state(), canonical);
    }

    #[test]
    fn fetch_landing_mid_like_keeps_optimistic_state() {
        let mut state = hydrated(Some("t"));
        let mut unliked = Image::new("b", "u", "Sunset");
        unliked.like_count = 5;
        unliked.liked_by_me = Some(false);
        state.images = vec![unliked.clone()];
        let id = ImageId::new("b");
        let optimistic = LikeState { liked_by_me: true, like_count: 6 };

        handle_event(&mut state, &Event::Refresh).unwrap();
        handle_event(&mut state, &Event::ToggleLike { id: id.clone() }).unwrap();
        assert_eq!(state.images[0].like_state(), optimistic);

        let loaded = WorkerResponse::ImagesLoaded { seq: 1, images: vec![unliked] };
        handle_event(&mut state, &Event::WorkerResponse(loaded)).unwrap();
        assert_eq!(state.images[0].like_state(), optimistic);

        let confirmed = WorkerResponse::LikeConfirmed { id: id.clone(), state: None };
        let (render, _) = handle_event(&mut state, &Event::WorkerResponse(confirmed)).unwrap();
        assert!(render);
        assert_eq!(state.images[0].like_state(), optimistic);
        assert!(!state.likes.is_pending(&id));
    }

    #[test]
    fn double_tap_toggles_once() {
        let mut state = with_images(hydrated(Some("t")));
        let id = ImageId::new("a");
        let start = Instant::now();

        let (_, first) = handle_event(&mut state, &Event::Tap { id: id.clone(), at: start }).unwrap();
        assert!(first.is_empty());

        let second = Event::Tap { id, at: start + Duration::from_millis(100) };
        let (_, actions) = handle_event(&mut state, &second).unwrap();
        assert_eq!(posted(&actions).len(), 1);
        assert!(state.images[0].like_state().liked_by_me);
    }

    #[test]
    fn stale_images_are_discarded_but_loading_clears() {
        let mut state = hydrated(None);
        state.fetch_now();
        state.fetch_now();

        let newer = WorkerResponse::ImagesLoaded { seq: 2, images: vec![Image::new("new", "u", "t")] };
        let older = WorkerResponse::ImagesLoaded { seq: 1, images: vec![Image::new("old", "u", "t")] };
        handle_event(&mut state, &Event::WorkerResponse(newer)).unwrap();
        handle_event(&mut state, &Event::WorkerResponse(older)).unwrap();

        assert_eq!(state.images[0].id.as_str(), "new");
        assert!(!state.is_loading());
    }

    #[test]
    fn fetch_failure_keeps_list_and_notifies() {
        let mut state = with_images(hydrated(None));
        state.fetch_now();
        let failure = WorkerResponse::FetchFailed { seq: 1, message: "503".into() };
        handle_event(&mut state, &Event::WorkerResponse(failure)).unwrap();

        assert_eq!(state.images.len(), 2);
        assert!(matches!(state.notice, Some(Notice::FetchFailed(_))));
        assert!(!state.is_loading());
    }

    #[test]
    fn session_change_fetches_immediately_from_page_one() {
        let mut state = hydrated(None);
        handle_event(&mut state, &Event::SetPage(3)).unwrap();

        let event = Event::SessionChanged { token: Some(SessionToken::new("t")) };
        let (_, actions) = handle_event(&mut state, &event).unwrap();

        assert_eq!(actions[0], Action::CancelScheduledFetch);
        match posted(&actions).as_slice() {
            [WorkerMessage::FetchImages { request, token, .. }] => {
                assert_eq!(request.page, 1);
                assert!(token.is_some());
            }
            other => panic!("unexpected actions: {other:?}"),
        }
    }

    #[test]
    fn sign_out_leaves_liked_view() {
        let mut state = hydrated(Some("t"));
        handle_event(&mut state, &Event::ShowLiked).unwrap();
        assert_eq!(state.view_mode, ViewMode::Liked);

        let (_, actions) = handle_event(&mut state, &Event::SignOut).unwrap();
        assert_eq!(actions, vec![Action::ClearSession]);

        handle_event(&mut state, &Event::SessionChanged { token: None }).unwrap();
        assert_eq!(state.view_mode, ViewMode::Gallery);
    }

    #[test]
    fn liked_view_requires_session() {
        let mut state = hydrated(None);
        let (_, actions) = handle_event(&mut state, &Event::ShowLiked).unwrap();

        assert!(actions.is_empty());
        assert_eq!(state.view_mode, ViewMode::Gallery);
        assert_eq!(state.notice, Some(Notice::SignInRequired));
    }

    #[test]
    fn sign_in_round_trip_sets_busy_flag() {
        let mut state = hydrated(None);
        let (_, actions) = handle_event(&mut state, &Event::SignIn).unwrap();
        assert!(state.auth_in_progress);
        assert_eq!(posted(&actions).len(), 1);

        let issued = WorkerResponse::SessionIssued { token: SessionToken::new("fresh") };
        let (_, actions) = handle_event(&mut state, &Event::WorkerResponse(issued)).unwrap();
        assert!(!state.auth_in_progress);
        assert_eq!(actions, vec![Action::StoreSession(SessionToken::new("fresh"))]);
    }

    #[test]
    fn failed_sign_in_is_a_notice() {
        let mut state = hydrated(None);
        handle_event(&mut state, &Event::SignIn).unwrap();
        let failed = WorkerResponse::AuthFailed { message: "popup closed".into() };
        handle_event(&mut state, &Event::WorkerResponse(failed)).unwrap();

        assert!(!state.auth_in_progress);
        assert!(state.session.is_none());
        assert!(matches!(state.notice, Some(Notice::AuthFailed(_))));
    }

    #[test]
    fn next_page_requires_full_page() {
        let mut state = with_images(hydrated(None));
        let (_, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(actions.is_empty());
        assert_eq!(state.query.page(), 1);

        state.images = (0..6).map(|i| Image::new(i.to_string(), "u", "t")).collect();
        handle_event(&mut state, &Event::NextPage).unwrap();
        assert_eq!(state.query.page(), 2);
        handle_event(&mut state, &Event::PreviousPage).unwrap();
        assert_eq!(state.query.page(), 1);
    }

    #[test]
    fn next_page_at_last_representable_page_is_a_no_op() {
        let mut state = hydrated(None);
        handle_event(&mut state, &Event::SetPage(u32::MAX)).unwrap();
        state.images = (0..6).map(|i| Image::new(i.to_string(), "u", "t")).collect();

        let (render, actions) = handle_event(&mut state, &Event::NextPage).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
        assert_eq!(state.query.page(), u32::MAX);
    }
}
