use std::sync::Arc;
use std::time::Duration;
use studio_gallery::api::{GalleryApi, MemoryGallery, StaticIdentityProvider};
use studio_gallery::domain::{Hydration, IdentityAssertion, ImageId, SortMode, PAGE_SIZE};
use studio_gallery::storage::{JsonStorage, MemoryStorage, TokenStorage};
use studio_gallery::worker::GalleryWorker;
use studio_gallery::{Config, Event, Notice, Runtime, ViewMode};
use tempfile::TempDir;
use tokio::time::Instant;

fn runtime_with(gallery: &Arc<MemoryGallery>, storage: Box<dyn TokenStorage>) -> Runtime {
    let worker = GalleryWorker::new(gallery.clone(), Arc::new(StaticIdentityProvider::new("ada")));
    Runtime::new(&Config::default(), storage, worker)
}

async fn started(gallery: &Arc<MemoryGallery>) -> Runtime {
    let mut runtime = runtime_with(gallery, Box::new(MemoryStorage::new()));
    runtime.start().unwrap();
    runtime.settle().await.unwrap();
    runtime
}

async fn signed_in(gallery: &Arc<MemoryGallery>) -> Runtime {
    let mut runtime = started(gallery).await;
    runtime.dispatch(Event::SignIn).unwrap();
    runtime.settle().await.unwrap();
    assert!(runtime.state().session.is_some());
    runtime
}

fn ids(runtime: &Runtime) -> Vec<&str> {
    runtime.state().images.iter().map(|i| i.id.as_str()).collect()
}

fn image(runtime: &Runtime, id: &str) -> (u32, Option<bool>) {
    let image = runtime.state().find_image(&ImageId::new(id)).unwrap();
    (image.like_count, image.liked_by_me)
}

#[tokio::test(start_paused = true)]
async fn first_fetch_waits_for_hydration_then_loads_latest() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = runtime_with(&gallery, Box::new(MemoryStorage::new()));

    assert!(runtime.viewmodel().is_none());
    runtime.start().unwrap();
    assert_eq!(runtime.state().hydration, Hydration::Ready);
    runtime.settle().await.unwrap();

    let calls = gallery.list_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].sort, SortMode::Latest);
    assert_eq!(calls[0].limit, PAGE_SIZE);
    assert_eq!(ids(&runtime), ["8", "7", "6", "5", "4", "3"]);

    let vm = runtime.viewmodel().unwrap();
    assert!(!vm.loading);
    assert_eq!(vm.cards.len(), 6);
    assert!(vm.pagination.unwrap().has_next);
}

#[tokio::test(start_paused = true)]
async fn typing_burst_produces_one_request_with_final_query() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = started(&gallery).await;
    runtime.dispatch(Event::SetPage(2)).unwrap();
    runtime.settle().await.unwrap();
    let before = gallery.list_calls().len();

    for text in ["s", "su", "sun", "suns", "sunse", "sunset"] {
        runtime.dispatch(Event::SetSearch(text.to_string())).unwrap();
        tokio::time::advance(Duration::from_millis(50)).await;
    }
    runtime.dispatch(Event::SetSort(SortMode::Popular)).unwrap();
    assert_eq!(runtime.state().query.page(), 1);
    runtime.settle().await.unwrap();

    let calls = gallery.list_calls();
    assert_eq!(calls.len(), before + 1);
    let last = calls.last().unwrap();
    assert_eq!(last.search, "sunset");
    assert_eq!(last.sort, SortMode::Popular);
    assert_eq!(last.page, 1);
    assert_eq!(last.limit, 6);
    assert_eq!(ids(&runtime), ["2", "5"]);
}

#[tokio::test(start_paused = true)]
async fn late_response_from_older_request_is_discarded() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = started(&gallery).await;

    gallery.delay_next_list(Duration::from_millis(1_000));
    runtime.dispatch(Event::Refresh).unwrap();
    runtime.dispatch(Event::SetSort(SortMode::Alphabetical)).unwrap();
    assert!(runtime.viewmodel().unwrap().loading);
    runtime.settle().await.unwrap();

    assert_eq!(gallery.list_calls().len(), 3);
    assert_eq!(ids(&runtime), ["4", "3", "7", "6", "1", "8"]);
    assert!(!runtime.state().is_loading());
}

#[tokio::test(start_paused = true)]
async fn failed_fetch_keeps_last_good_list() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = started(&gallery).await;
    let before: Vec<String> = ids(&runtime).into_iter().map(String::from).collect();

    gallery.fail_next_list();
    runtime.dispatch(Event::Refresh).unwrap();
    runtime.settle().await.unwrap();

    assert_eq!(ids(&runtime), before);
    assert!(matches!(runtime.state().notice, Some(Notice::FetchFailed(_))));
    assert!(!runtime.state().is_loading());
}

#[tokio::test(start_paused = true)]
async fn like_without_session_is_denied_locally() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = started(&gallery).await;

    runtime.dispatch(Event::ToggleLike { id: ImageId::new("5") }).unwrap();
    runtime.settle().await.unwrap();

    assert!(gallery.like_calls().is_empty());
    assert_eq!(image(&runtime, "5"), (12, None));
    assert_eq!(
        runtime.viewmodel().unwrap().notice.as_deref(),
        Some("Access Denied: Please Login to Like")
    );
}

#[tokio::test(start_paused = true)]
async fn sign_in_stores_token_and_refetches_immediately() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = started(&gallery).await;
    runtime.dispatch(Event::SetPage(2)).unwrap();
    runtime.settle().await.unwrap();
    let before = gallery.list_calls().len();

    runtime.dispatch(Event::SignIn).unwrap();
    assert!(runtime.viewmodel().unwrap().header.auth_busy);

    // Only the worker round trips; no debounce period passes.
    let started_at = Instant::now();
    runtime.settle().await.unwrap();
    assert!(started_at.elapsed() < Config::default().debounce());

    assert!(runtime.session_token().is_some());
    assert!(!runtime.state().auth_in_progress);
    let calls = gallery.list_calls();
    assert_eq!(calls.len(), before + 1);
    assert_eq!(calls.last().unwrap().page, 1);
    assert_eq!(image(&runtime, "5").1, Some(false));
}

#[tokio::test(start_paused = true)]
async fn like_is_optimistic_and_pulses() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = signed_in(&gallery).await;

    runtime.dispatch(Event::ToggleLike { id: ImageId::new("5") }).unwrap();
    assert_eq!(image(&runtime, "5"), (13, Some(true)));
    assert!(runtime.viewmodel().unwrap().cards.iter().any(|c| c.pulsing));

    runtime.settle().await.unwrap();
    assert_eq!(image(&runtime, "5"), (13, Some(true)));
    assert_eq!(gallery.like_count(&ImageId::new("5")), Some(13));
    assert!(runtime.state().pulse.is_none());
}

#[tokio::test(start_paused = true)]
async fn failed_like_rolls_back_and_converges() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = signed_in(&gallery).await;
    let id = ImageId::new("5");

    // Someone else likes the image after our list was loaded.
    let other = gallery.exchange_identity(&IdentityAssertion::new("grace")).await.unwrap();
    gallery.toggle_like(&id, &other).await.unwrap();
    assert_eq!(gallery.like_count(&id), Some(13));
    assert_eq!(image(&runtime, "5"), (12, Some(false)));
    let before = gallery.list_calls().len();

    gallery.fail_next_like();
    runtime.dispatch(Event::ToggleLike { id: id.clone() }).unwrap();
    assert_eq!(image(&runtime, "5"), (13, Some(true)));
    runtime.settle().await.unwrap();

    // The snapshot said 12; the re-fetch brings the server's 13.
    assert_eq!(image(&runtime, "5"), (13, Some(false)));
    assert_eq!(gallery.like_count(&id), Some(13));
    assert_eq!(gallery.list_calls().len(), before + 1);
    assert_eq!(gallery.like_calls().len(), 2);
    assert!(matches!(runtime.state().notice, Some(Notice::LikeFailed(_))));
}

#[tokio::test(start_paused = true)]
async fn teardown_cancels_pending_debounce() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = started(&gallery).await;
    let before = gallery.list_calls().len();

    runtime.dispatch(Event::SetSearch("sunset".to_string())).unwrap();
    runtime.teardown();
    tokio::time::sleep(Config::default().debounce() + Duration::from_millis(200)).await;

    assert_eq!(gallery.list_calls().len(), before);
    runtime.settle().await.unwrap();
    assert_eq!(gallery.list_calls().len(), before);
    assert_eq!(ids(&runtime), ["8", "7", "6", "5", "4", "3"]);
}

#[tokio::test(start_paused = true)]
async fn double_tap_toggles_once_and_slow_taps_never() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = signed_in(&gallery).await;
    let id = ImageId::new("4");

    let now = Instant::now();
    runtime.dispatch(Event::Tap { id: id.clone(), at: now }).unwrap();
    runtime.dispatch(Event::Tap { id: id.clone(), at: now + Duration::from_millis(120) }).unwrap();
    runtime.settle().await.unwrap();
    assert_eq!(gallery.like_calls(), vec![id.clone()]);
    assert_eq!(image(&runtime, "4"), (1, Some(true)));

    let later = Instant::now();
    runtime.dispatch(Event::Tap { id: id.clone(), at: later }).unwrap();
    runtime.dispatch(Event::Tap { id: id.clone(), at: later + Duration::from_millis(400) }).unwrap();
    runtime.settle().await.unwrap();
    assert_eq!(gallery.like_calls().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn liked_view_and_sign_out() {
    let gallery = Arc::new(MemoryGallery::demo());
    let mut runtime = signed_in(&gallery).await;

    runtime.dispatch(Event::ToggleLike { id: ImageId::new("3") }).unwrap();
    runtime.settle().await.unwrap();

    runtime.dispatch(Event::ShowLiked).unwrap();
    runtime.settle().await.unwrap();
    let vm = runtime.viewmodel().unwrap();
    assert_eq!(vm.view_mode, ViewMode::Liked);
    assert!(vm.query_bar.is_none());
    let liked: Vec<&str> = vm.cards.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(liked, ["3"]);

    runtime.dispatch(Event::SignOut).unwrap();
    runtime.settle().await.unwrap();
    assert!(runtime.session_token().is_none());
    assert_eq!(runtime.state().view_mode, ViewMode::Gallery);
    assert_eq!(image(&runtime, "3").1, None);

    runtime.dispatch(Event::ShowLiked).unwrap();
    assert_eq!(runtime.state().view_mode, ViewMode::Gallery);
    assert_eq!(runtime.state().notice, Some(Notice::SignInRequired));
}

#[tokio::test(start_paused = true)]
async fn session_survives_restart() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");
    let gallery = Arc::new(MemoryGallery::demo());

    let token = {
        let mut runtime = runtime_with(&gallery, Box::new(JsonStorage::new(path.clone()).unwrap()));
        runtime.start().unwrap();
        runtime.dispatch(Event::SignIn).unwrap();
        runtime.settle().await.unwrap();
        runtime.session_token().cloned().unwrap()
    };

    let mut runtime = runtime_with(&gallery, Box::new(JsonStorage::new(path).unwrap()));
    assert!(runtime.viewmodel().is_none());
    runtime.start().unwrap();
    assert_eq!(runtime.state().session.as_ref(), Some(&token));
    runtime.settle().await.unwrap();

    assert!(runtime.viewmodel().unwrap().header.signed_in);
    assert_eq!(image(&runtime, "5").1, Some(false));
}
