//! In-process gallery backend.
//!
//! Serves the offline shell and the test suite. It implements the same
//! list/sort/paginate/like contract as the remote service, keeps likes per
//! user, and can be told to fail or stall the next call so ordering and
//! rollback paths can be exercised deterministically.

use super::client::GalleryApi;
use crate::domain::error::{GalleryError, Result};
use crate::domain::{IdentityAssertion, Image, ImageId, LikeState, ListRequest, SessionToken, SortMode};
use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Default)]
struct Inner {
    /// Insertion order is upload order.
    images: Vec<Image>,
    likes: HashMap<String, BTreeSet<ImageId>>,
    sessions: HashMap<String, String>,
    minted: u64,
    fail_next_list: bool,
    fail_next_like: bool,
    list_delays: VecDeque<Duration>,
    like_delays: VecDeque<Duration>,
    list_calls: Vec<ListRequest>,
    like_calls: Vec<ImageId>,
}

#[derive(Debug, Default)]
pub struct MemoryGallery {
    inner: Mutex<Inner>,
}

impl MemoryGallery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the gallery; earlier entries count as older uploads.
    #[must_use]
    pub fn with_images(images: Vec<Image>) -> Self {
        let gallery = Self::new();
        if let Ok(mut inner) = gallery.inner.lock() {
            inner.images = images;
        }
        gallery
    }

    /// A small fixed catalogue for the offline shell.
    #[must_use]
    pub fn demo() -> Self {
        let seed = [
            ("1", "Harbor at Dawn", 3),
            ("2", "Sunset over Dunes", 12),
            ("3", "city lights", 7),
            ("4", "Alpine Lake", 0),
            ("5", "Sunset Pier", 12),
            ("6", "Forest Path", 4),
            ("7", "Desert Bloom", 1),
            ("8", "Northern Sky", 9),
        ];
        let images = seed
            .into_iter()
            .map(|(id, title, likes)| {
                let mut image = Image::new(id, format!("https://images.example/{id}.jpg"), title);
                image.like_count = likes;
                image
            })
            .collect();
        Self::with_images(images)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|e| GalleryError::Worker(format!("memory gallery poisoned: {e}")))
    }

    /// Makes the next `list_images` call fail with a server error.
    pub fn fail_next_list(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_next_list = true;
        }
    }

    /// Makes the next `toggle_like` call fail with a server error.
    pub fn fail_next_like(&self) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.fail_next_like = true;
        }
    }

    /// Queues a delay for the next `list_images` call.
    pub fn delay_next_list(&self, delay: Duration) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.list_delays.push_back(delay);
        }
    }

    pub fn delay_next_like(&self, delay: Duration) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.like_delays.push_back(delay);
        }
    }

    /// Every list request received so far, in arrival order.
    #[must_use]
    pub fn list_calls(&self) -> Vec<ListRequest> {
        self.inner.lock().map(|i| i.list_calls.clone()).unwrap_or_default()
    }

    #[must_use]
    pub fn like_calls(&self) -> Vec<ImageId> {
        self.inner.lock().map(|i| i.like_calls.clone()).unwrap_or_default()
    }

    /// Server-side truth for one image as seen by an anonymous caller.
    #[must_use]
    pub fn like_count(&self, id: &ImageId) -> Option<u32> {
        let inner = self.inner.lock().ok()?;
        inner.images.iter().find(|i| &i.id == id).map(|i| i.like_count)
    }

    fn user_for(inner: &Inner, token: &SessionToken) -> Option<String> {
        inner.sessions.get(token.expose()).cloned()
    }

    fn page_of(inner: &Inner, request: &ListRequest, user: Option<&str>) -> Vec<Image> {
        let needle = request.search.to_lowercase();
        let mut matching: Vec<(usize, &Image)> = inner
            .images
            .iter()
            .enumerate()
            .filter(|(_, image)| needle.is_empty() || image.title.to_lowercase().contains(&needle))
            .collect();

        match request.sort {
            SortMode::Latest => matching.sort_by(|a, b| b.0.cmp(&a.0)),
            SortMode::Popular => matching.sort_by(|a, b| b.1.like_count.cmp(&a.1.like_count).then(a.0.cmp(&b.0))),
            SortMode::Alphabetical => {
                matching.sort_by(|a, b| a.1.title.to_lowercase().cmp(&b.1.title.to_lowercase()).then(a.0.cmp(&b.0)));
            }
        }

        let liked = user.and_then(|u| inner.likes.get(u));
        let skip = (request.page.max(1) as usize - 1) * request.limit as usize;
        matching
            .into_iter()
            .skip(skip)
            .take(request.limit as usize)
            .map(|(_, image)| {
                let liked_by_me = user.map(|_| liked.is_some_and(|set| set.contains(&image.id)));
                let mut image = image.clone();
                image.liked_by_me = liked_by_me;
                image
            })
            .collect()
    }
}

#[async_trait]
impl GalleryApi for MemoryGallery {
    async fn list_images(&self, request: &ListRequest, token: Option<&SessionToken>) -> Result<Vec<Image>> {
        let (delay, fail) = {
            let mut inner = self.lock()?;
            inner.list_calls.push(request.clone());
            (inner.list_delays.pop_front(), std::mem::take(&mut inner.fail_next_list))
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(GalleryError::Server {
                status: 503,
                message: "archive unavailable".to_string(),
            });
        }

        let inner = self.lock()?;
        let user = token.and_then(|t| Self::user_for(&inner, t));
        Ok(Self::page_of(&inner, request, user.as_deref()))
    }

    async fn toggle_like(&self, id: &ImageId, token: &SessionToken) -> Result<Option<LikeState>> {
        let (delay, fail) = {
            let mut inner = self.lock()?;
            inner.like_calls.push(id.clone());
            (inner.like_delays.pop_front(), std::mem::take(&mut inner.fail_next_like))
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if fail {
            return Err(GalleryError::Server {
                status: 500,
                message: "registry update failed".to_string(),
            });
        }

        let mut inner = self.lock()?;
        let user = Self::user_for(&inner, token).ok_or(GalleryError::Server {
            status: 401,
            message: "unknown session".to_string(),
        })?;

        let index = inner
            .images
            .iter()
            .position(|i| &i.id == id)
            .ok_or_else(|| GalleryError::Server {
                status: 404,
                message: format!("no image {id}"),
            })?;

        let set = inner.likes.entry(user).or_default();
        let now_liked = if set.remove(id) {
            false
        } else {
            set.insert(id.clone());
            true
        };

        let image = &mut inner.images[index];
        image.like_count = if now_liked {
            image.like_count.saturating_add(1)
        } else {
            image.like_count.saturating_sub(1)
        };

        Ok(Some(LikeState {
            liked_by_me: now_liked,
            like_count: image.like_count,
        }))
    }

    async fn exchange_identity(&self, assertion: &IdentityAssertion) -> Result<SessionToken> {
        let user = assertion.expose().trim();
        if user.is_empty() {
            return Err(GalleryError::Auth("empty identity assertion".to_string()));
        }
        let mut inner = self.lock()?;
        inner.minted += 1;
        let token = format!("session-{}", inner.minted);
        inner.sessions.insert(token.clone(), user.to_string());
        Ok(SessionToken::new(token))
    }

    async fn my_likes(&self, token: &SessionToken) -> Result<Vec<Image>> {
        let inner = self.lock()?;
        let user = Self::user_for(&inner, token).ok_or(GalleryError::Server {
            status: 401,
            message: "unknown session".to_string(),
        })?;
        let liked = inner.likes.get(&user);
        Ok(inner
            .images
            .iter()
            .filter(|image| liked.is_some_and(|set| set.contains(&image.id)))
            .map(|image| {
                let mut image = image.clone();
                image.liked_by_me = Some(true);
                image
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::QueryState;

    fn request(search: &str, sort: SortMode, page: u32) -> ListRequest {
        let mut query = QueryState::default();
        query.set_search_text(search);
        query.set_sort_mode(sort);
        query.set_page(page);
        query.to_request()
    }

    fn ids(images: &[Image]) -> Vec<&str> {
        images.iter().map(|i| i.id.as_str()).collect()
    }

    #[tokio::test]
    async fn popular_keeps_insertion_order_for_ties() {
        let gallery = MemoryGallery::demo();
        let page = gallery.list_images(&request("sunset", SortMode::Popular, 1), None).await.unwrap();

        assert_eq!(ids(&page), vec!["2", "5"]);
        assert!(page.iter().all(|i| i.liked_by_me.is_none()));
    }

    #[tokio::test]
    async fn latest_is_newest_first_and_paginates() {
        let gallery = MemoryGallery::demo();
        let first = gallery.list_images(&request("", SortMode::Latest, 1), None).await.unwrap();
        let second = gallery.list_images(&request("", SortMode::Latest, 2), None).await.unwrap();

        assert_eq!(ids(&first), vec!["8", "7", "6", "5", "4", "3"]);
        assert_eq!(ids(&second), vec!["2", "1"]);
    }

    #[tokio::test]
    async fn alphabetical_ignores_case() {
        let gallery = MemoryGallery::demo();
        let page = gallery.list_images(&request("", SortMode::Alphabetical, 1), None).await.unwrap();

        assert_eq!(page[0].title, "Alpine Lake");
        assert_eq!(page[1].title, "city lights");
    }

    #[tokio::test]
    async fn likes_are_per_user() {
        let gallery = MemoryGallery::demo();
        let alice = gallery.exchange_identity(&IdentityAssertion::new("alice")).await.unwrap();
        let bob = gallery.exchange_identity(&IdentityAssertion::new("bob")).await.unwrap();
        let id = ImageId::new("4");

        let state = gallery.toggle_like(&id, &alice).await.unwrap().unwrap();
        assert_eq!(state, LikeState { liked_by_me: true, like_count: 1 });

        let as_bob = gallery.list_images(&request("alpine", SortMode::Latest, 1), Some(&bob)).await.unwrap();
        assert_eq!(as_bob[0].liked_by_me, Some(false));
        assert_eq!(as_bob[0].like_count, 1);

        assert_eq!(ids(&gallery.my_likes(&alice).await.unwrap()), vec!["4"]);
        assert!(gallery.my_likes(&bob).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn injected_failure_applies_once() {
        let gallery = MemoryGallery::demo();
        gallery.fail_next_list();

        assert!(gallery.list_images(&request("", SortMode::Latest, 1), None).await.is_err());
        assert!(gallery.list_images(&request("", SortMode::Latest, 1), None).await.is_ok());
        assert_eq!(gallery.list_calls().len(), 2);
    }

    #[tokio::test]
    async fn unknown_session_cannot_like() {
        let gallery = MemoryGallery::demo();
        let err = gallery
            .toggle_like(&ImageId::new("1"), &SessionToken::new("forged"))
            .await
            .unwrap_err();

        assert!(matches!(err, GalleryError::Server { status: 401, .. }));
        assert_eq!(gallery.like_count(&ImageId::new("1")), Some(3));
    }
}
