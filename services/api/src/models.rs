//! Request and response payloads for the API service

use app_store::UserProfile;
use cms::search::{SearchState, SearchStatus};
use cms::{HomePage, MediaItem, NewsItem};
use serde::{Deserialize, Serialize};

/// Shown instead of the hero banner when no featured item is configured
pub const NO_FEATURED_CONTENT: &str = "No Featured Content";
/// Shown on the watch page when the item has no stream
pub const VIDEO_UNAVAILABLE: &str = "Video Source Unavailable";

/// Landing page plus the news section
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeResponse {
    #[serde(flatten)]
    pub home: HomePage,
    pub news: Vec<NewsItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl HomeResponse {
    pub fn new(home: HomePage, news: Vec<NewsItem>) -> Self {
        let notice = home
            .hero
            .is_none()
            .then(|| NO_FEATURED_CONTENT.to_string());
        Self { home, news, notice }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub term: String,
    pub results: Vec<MediaItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl SearchResponse {
    /// Empty result for terms too short to query
    pub fn idle(term: String) -> Self {
        Self {
            term,
            results: Vec::new(),
            message: None,
        }
    }

    pub fn found(term: String, results: Vec<MediaItem>) -> Self {
        let message = results
            .is_empty()
            .then(|| format!("No results found for \"{}\"", term));
        Self {
            term,
            results,
            message,
        }
    }
}

/// Keystroke forwarded to the debounced search
#[derive(Debug, Deserialize)]
pub struct SearchInput {
    pub term: String,
}

/// Snapshot of the debounced search
#[derive(Debug, Serialize)]
pub struct SearchStateView {
    pub term: String,
    pub sequence: u64,
    pub status: &'static str,
    pub results: Vec<MediaItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<SearchState> for SearchStateView {
    fn from(state: SearchState) -> Self {
        let SearchState {
            term,
            sequence,
            status,
        } = state;

        let (status, results, message) = match status {
            SearchStatus::Idle => ("idle", Vec::new(), None),
            SearchStatus::Loading => ("loading", Vec::new(), None),
            SearchStatus::Results(items) => ("results", items, None),
            SearchStatus::NoResults => (
                "no_results",
                Vec::new(),
                Some(format!("No results found for \"{}\"", term)),
            ),
            SearchStatus::Failed(err) => ("failed", Vec::new(), Some(err)),
        };

        Self {
            term,
            sequence,
            status,
            results,
            message,
        }
    }
}

/// What the player should do with an item
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Playback {
    Ready {
        url: String,
        poster: String,
        title: String,
    },
    Unavailable {
        message: String,
    },
}

impl Playback {
    pub fn for_item(item: &MediaItem) -> Self {
        match item.video_url.as_deref().filter(|url| !url.trim().is_empty()) {
            Some(url) => Playback::Ready {
                url: url.to_string(),
                poster: item.poster().to_string(),
                title: item.title.clone(),
            },
            None => Playback::Unavailable {
                message: VIDEO_UNAVAILABLE.to_string(),
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchResponse {
    pub item: MediaItem,
    pub playback: Playback,
    pub in_watchlist: bool,
}

/// Demo sign-in; without a profile the demo viewer is used
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

#[derive(Debug, Deserialize)]
pub struct WatchlistAdd {
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistMembership {
    pub id: String,
    pub in_watchlist: bool,
}

#[derive(Debug, Deserialize)]
pub struct OverlayRequest {
    pub open: bool,
}
