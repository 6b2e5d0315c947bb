//! View records produced from content store documents

use serde::{Deserialize, Serialize};

/// Kind of a piece of content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[default]
    Movie,
    Series,
    Live,
    News,
}

impl ContentKind {
    /// Parse a CMS label; unknown labels fall back to `Movie`
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "series" => ContentKind::Series,
            "live" => ContentKind::Live,
            "news" => ContentKind::News,
            _ => ContentKind::Movie,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Movie => "movie",
            ContentKind::Series => "series",
            ContentKind::Live => "live",
            ContentKind::News => "news",
        }
    }
}

/// Normalized content record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub thumbnail_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub rating: String,
    pub year: i32,
    pub duration: String,
    pub categories: Vec<String>,
    /// True iff a backdrop image is present
    pub featured: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default)]
    pub is_original: bool,
}

impl MediaItem {
    /// Image to show before playback starts
    pub fn poster(&self) -> &str {
        self.backdrop_url.as_deref().unwrap_or(&self.thumbnail_url)
    }
}

/// Normalized news record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub headline: String,
    pub excerpt: String,
    pub author: String,
    /// Human readable date, empty when the document carries none
    pub published_at: String,
    pub thumbnail_url: String,
    pub tag: String,
}

/// The "live TV" banner on the landing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveSection {
    pub title: String,
    pub description: String,
    pub cover_image: String,
}

/// Everything the landing page renders, gathered in one aggregate fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub ticker_text: String,
    pub hero: Option<MediaItem>,
    pub trending: Vec<MediaItem>,
    pub originals: Vec<MediaItem>,
    pub new_releases: Vec<MediaItem>,
    pub kids_family: Vec<MediaItem>,
    pub bento_grid: Vec<MediaItem>,
    /// Most recently created content, independent of the editors' picks
    pub recent_library: Vec<MediaItem>,
    pub live_section: LiveSection,
}
