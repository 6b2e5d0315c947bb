//! Mapping from loosely typed CMS documents to view records
//!
//! Documents arrive as untyped JSON. Editors routinely leave optional fields
//! blank, so every field has a default and the mapping functions are total:
//! they never fail and never panic, whatever shape the input has.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde_json::{Map, Value};

use crate::image::{BACKDROP_WIDTH, COVER_QUALITY, ImageUrlBuilder, THUMBNAIL_WIDTH};
use crate::models::{ContentKind, LiveSection, MediaItem, NewsItem};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_RATING: &str = "NR";
pub const DEFAULT_HEADLINE: &str = "No Headline";
pub const DEFAULT_AUTHOR: &str = "Editorial Team";
pub const DEFAULT_TAG: &str = "General";
pub const DEFAULT_LIVE_TITLE: &str = "EBS Live";
pub const DEFAULT_LIVE_DESCRIPTION: &str = "Watch Now";

/// Read-only view over a document's fields. Nulls and empty strings read as
/// absent.
struct Fields<'a>(Option<&'a Map<String, Value>>);

impl<'a> Fields<'a> {
    fn of(doc: &'a Value) -> Self {
        Fields(doc.as_object())
    }

    fn value(&self, key: &str) -> Option<&'a Value> {
        self.0?.get(key).filter(|v| !v.is_null())
    }

    fn text(&self, key: &str) -> Option<&'a str> {
        self.value(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    fn text_or(&self, key: &str, default: &str) -> String {
        self.text(key).unwrap_or(default).to_string()
    }

    fn year(&self, key: &str) -> Option<i32> {
        let number = self.value(key)?;
        let year = number
            .as_i64()
            .or_else(|| number.as_f64().map(|f| f.trunc() as i64))?;
        i32::try_from(year).ok().filter(|y| *y != 0)
    }

    fn flag(&self, key: &str) -> bool {
        self.value(key).and_then(Value::as_bool).unwrap_or(false)
    }

    fn strings(&self, key: &str) -> Vec<String> {
        match self.value(key) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    fn image(&self, key: &str, images: &ImageUrlBuilder, width: u32, quality: Option<u8>) -> Option<String> {
        self.value(key)
            .and_then(|source| images.url(source, width, quality))
    }
}

/// Current calendar year, used for documents without a release year
pub fn current_year() -> i32 {
    Utc::now().year()
}

/// Convert a movie/series/live document into a [`MediaItem`]
///
/// A null or non-object document produces an all-defaults record.
pub fn map_media(doc: &Value, images: &ImageUrlBuilder) -> MediaItem {
    let fields = Fields::of(doc);
    let backdrop_url = fields.image("backdrop", images, BACKDROP_WIDTH, None);

    MediaItem {
        id: fields.text_or("_id", ""),
        title: fields.text_or("title", DEFAULT_TITLE),
        description: fields.text_or("description", ""),
        kind: fields
            .text("type")
            .map(ContentKind::from_label)
            .unwrap_or_default(),
        thumbnail_url: fields
            .image("thumbnail", images, THUMBNAIL_WIDTH, None)
            .unwrap_or_default(),
        featured: fields.value("backdrop").is_some_and(|b| b.as_str() != Some("")),
        backdrop_url,
        video_url: fields.text("videoUrl").map(str::to_string),
        rating: fields.text_or("rating", DEFAULT_RATING),
        year: fields.year("year").unwrap_or_else(current_year),
        duration: fields.text_or("duration", ""),
        categories: fields.strings("categories"),
        slug: fields
            .value("slug")
            .and_then(|slug| Fields::of(slug).text("current"))
            .map(str::to_string),
        is_original: fields.flag("isOriginal"),
    }
}

/// Convert a news document into a [`NewsItem`]
pub fn map_news(doc: &Value, images: &ImageUrlBuilder) -> NewsItem {
    let fields = Fields::of(doc);

    NewsItem {
        id: fields.text_or("_id", ""),
        headline: fields.text_or("headline", DEFAULT_HEADLINE),
        excerpt: fields.text_or("excerpt", ""),
        author: fields.text_or("author", DEFAULT_AUTHOR),
        published_at: fields
            .text("publishedAt")
            .map(format_published_date)
            .unwrap_or_default(),
        thumbnail_url: fields
            .image("thumbnail", images, THUMBNAIL_WIDTH, None)
            .unwrap_or_default(),
        tag: fields.text_or("tag", DEFAULT_TAG),
    }
}

/// Convert the home page's `liveSection` object
pub fn map_live_section(section: &Value, images: &ImageUrlBuilder) -> LiveSection {
    let fields = Fields::of(section);

    LiveSection {
        title: fields.text_or("title", DEFAULT_LIVE_TITLE),
        description: fields.text_or("description", DEFAULT_LIVE_DESCRIPTION),
        cover_image: fields
            .image("coverImage", images, BACKDROP_WIDTH, Some(COVER_QUALITY))
            .unwrap_or_default(),
    }
}

/// Map an array of referenced documents, skipping dangling references.
///
/// A deleted document leaves a null in an expanded reference list; rendering
/// it as an all-defaults card would show a blank tile, so it is dropped.
pub fn map_media_list(docs: Option<&Value>, images: &ImageUrlBuilder) -> Vec<MediaItem> {
    match docs {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|doc| doc.is_object())
            .map(|doc| map_media(doc, images))
            .collect(),
        _ => Vec::new(),
    }
}

/// Format an RFC 3339 timestamp (or plain date) as `M/D/YYYY` in UTC.
///
/// Unparseable input yields an empty string.
pub fn format_published_date(raw: &str) -> String {
    let date = DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .or_else(|_| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d"));

    match date {
        Ok(date) => date.format("%-m/%-d/%Y").to_string(),
        Err(_) => String::new(),
    }
}
