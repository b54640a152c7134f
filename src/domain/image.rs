//! Image domain model.
//!
//! Defines the [`Image`] record shown in the gallery grid and the small value
//! types around it. The serde layout matches the gallery API's JSON
//! (`_id`, `imageUrl`, `likeCount`, `likedByMe`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque image identifier assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    /// Wraps a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// An image as displayed in the view list.
///
/// `liked_by_me` is `None` when the server did not say, which is what
/// unauthenticated callers receive. `None` is treated as "not liked" when
/// toggling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    #[serde(rename = "_id")]
    pub id: ImageId,

    #[serde(rename = "imageUrl")]
    pub image_url: String,

    #[serde(default)]
    pub title: String,

    #[serde(rename = "likeCount", default)]
    pub like_count: u32,

    #[serde(rename = "likedByMe", default, skip_serializing_if = "Option::is_none")]
    pub liked_by_me: Option<bool>,
}

impl Image {
    /// Creates an image with no likes and unknown like state.
    pub fn new(id: impl Into<String>, image_url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: ImageId::new(id),
            image_url: image_url.into(),
            title: title.into(),
            like_count: 0,
            liked_by_me: None,
        }
    }

    /// Returns the current like state of this image.
    #[must_use]
    pub fn like_state(&self) -> LikeState {
        LikeState {
            liked_by_me: self.liked_by_me.unwrap_or(false),
            like_count: self.like_count,
        }
    }

    /// Overwrites the like fields with `state`.
    pub fn apply_like_state(&mut self, state: LikeState) {
        self.liked_by_me = Some(state.liked_by_me);
        self.like_count = state.like_count;
    }

    /// Title used for display; empty titles render as "Untitled".
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}

/// Like-related fields of an image, as returned by the like-toggle endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LikeState {
    #[serde(rename = "likedByMe")]
    pub liked_by_me: bool,

    #[serde(rename = "likeCount")]
    pub like_count: u32,
}

impl LikeState {
    /// Returns the state after one toggle.
    ///
    /// Liking increments the count, unliking decrements it with a floor of
    /// zero so a desynchronized count can never go negative.
    #[must_use]
    pub const fn toggled(self) -> Self {
        if self.liked_by_me {
            Self {
                liked_by_me: false,
                like_count: self.like_count.saturating_sub(1),
            }
        } else {
            Self {
                liked_by_me: true,
                like_count: self.like_count.saturating_add(1),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_api_payload_without_liked_flag() {
        let json = r#"{"_id":"abc","imageUrl":"https://cdn/x.jpg","title":"Sunset","likeCount":4}"#;
        let image: Image = serde_json::from_str(json).unwrap();

        assert_eq!(image.id.as_str(), "abc");
        assert_eq!(image.like_count, 4);
        assert_eq!(image.liked_by_me, None);
        assert!(!image.like_state().liked_by_me);
    }

    #[test]
    fn unlike_floors_at_zero() {
        let state = LikeState { liked_by_me: true, like_count: 0 };
        let toggled = state.toggled();

        assert!(!toggled.liked_by_me);
        assert_eq!(toggled.like_count, 0);
    }

    #[test]
    fn like_then_unlike_restores_count() {
        let state = LikeState { liked_by_me: false, like_count: 7 };
        assert_eq!(state.toggled().toggled(), state);
    }

    #[test]
    fn empty_title_displays_placeholder() {
        let image = Image::new("1", "u", "");
        assert_eq!(image.display_title(), "Untitled");
    }
}
