//! Query state: the parameters that decide which page of images to request.
//!
//! [`QueryState`] owns the page-reset rule. Changing the search text or the
//! sort mode puts the page back to 1, because page N of a previous filter
//! means nothing under a new one. Changing the page touches nothing else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed page size of the list endpoint.
pub const PAGE_SIZE: u32 = 6;

/// Server-side ordering of the image list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Newest first by creation time.
    #[default]
    Latest,
    /// Most liked first; ties keep insertion order.
    Popular,
    /// Title ascending, case-insensitive.
    Alphabetical,
}

impl SortMode {
    /// Every sort mode, in the order the filter bar shows them.
    pub const ALL: [Self; 3] = [Self::Latest, Self::Popular, Self::Alphabetical];

    /// Query-string value sent to the list endpoint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Popular => "popular",
            Self::Alphabetical => "alphabetical",
        }
    }

    /// Human-readable label for the filter bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Latest => "Newest",
            Self::Popular => "Most Liked",
            Self::Alphabetical => "A-Z Order",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" | "newest" => Ok(Self::Latest),
            "popular" | "liked" => Ok(Self::Popular),
            "alphabetical" | "az" | "a-z" => Ok(Self::Alphabetical),
            other => Err(format!("unknown sort mode: {other}")),
        }
    }
}

/// Search text, sort mode, and 1-indexed page number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryState {
    search_text: String,
    sort_mode: SortMode,
    page: u32,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            sort_mode: SortMode::Latest,
            page: 1,
        }
    }
}

impl QueryState {
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Sets the search text and resets the page to 1.
    ///
    /// The reset happens even when `text` equals the current value. Returns
    /// `true` if any field of the query changed.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        let changed = self.search_text != text || self.page != 1;
        self.search_text = text;
        self.page = 1;
        changed
    }

    /// Sets the sort mode and resets the page to 1.
    ///
    /// Returns `true` if any field of the query changed.
    pub fn set_sort_mode(&mut self, sort_mode: SortMode) -> bool {
        let changed = self.sort_mode != sort_mode || self.page != 1;
        self.sort_mode = sort_mode;
        self.page = 1;
        changed
    }

    /// Sets the page number, clamped to at least 1.
    ///
    /// Search text and sort mode are left untouched. Returns `true` if the
    /// page changed.
    pub fn set_page(&mut self, page: u32) -> bool {
        let page = page.max(1);
        let changed = self.page != page;
        self.page = page;
        changed
    }

    /// Builds the list request for the current query.
    #[must_use]
    pub fn to_request(&self) -> ListRequest {
        ListRequest {
            search: self.search_text.clone(),
            sort: self.sort_mode,
            page: self.page,
            limit: PAGE_SIZE,
        }
    }
}

/// Parameters of one list-endpoint call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequest {
    pub search: String,
    pub sort: SortMode,
    pub page: u32,
    pub limit: u32,
}

impl ListRequest {
    /// Query-string pairs in the order the endpoint documents them.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("sort", self.sort.as_str().to_string()),
            ("search", self.search.clone()),
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_change_resets_page() {
        let mut query = QueryState::default();
        query.set_page(5);

        assert!(query.set_search_text("sunset"));
        assert_eq!(query.page(), 1);
        assert_eq!(query.search_text(), "sunset");
    }

    #[test]
    fn sort_change_resets_page() {
        let mut query = QueryState::default();
        query.set_page(3);

        assert!(query.set_sort_mode(SortMode::Popular));
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn same_search_text_still_resets_page() {
        let mut query = QueryState::default();
        query.set_search_text("sea");
        query.set_page(4);

        assert!(query.set_search_text("sea"));
        assert_eq!(query.page(), 1);
        assert!(!query.set_search_text("sea"));
    }

    #[test]
    fn page_change_keeps_filters() {
        let mut query = QueryState::default();
        query.set_search_text("dune");
        query.set_sort_mode(SortMode::Alphabetical);

        assert!(query.set_page(2));
        assert_eq!(query.search_text(), "dune");
        assert_eq!(query.sort_mode(), SortMode::Alphabetical);
    }

    #[test]
    fn page_is_clamped_to_one() {
        let mut query = QueryState::default();
        assert!(!query.set_page(0));
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn request_uses_fixed_limit() {
        let mut query = QueryState::default();
        query.set_search_text("sunset");
        query.set_sort_mode(SortMode::Popular);

        let request = query.to_request();
        assert_eq!(
            request,
            ListRequest { search: "sunset".into(), sort: SortMode::Popular, page: 1, limit: 6 }
        );
    }

    #[test]
    fn parses_sort_aliases() {
        assert_eq!("A-Z".parse::<SortMode>(), Ok(SortMode::Alphabetical));
        assert_eq!("Newest".parse::<SortMode>(), Ok(SortMode::Latest));
        assert!("random".parse::<SortMode>().is_err());
    }
}
