//! Shared helpers for the content client integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cms::config::CmsConfig;
use cms::error::{CmsError, CmsResult};
use cms::fixtures::FixtureStore;
use cms::query::ContentQuery;
use cms::store::ContentStore;
use serde_json::{Value, json};

/// Wraps a fixture store, records every query and optionally delays or fails
#[derive(Clone, Default)]
pub struct RecordingStore {
    inner: FixtureStore,
    queries: Arc<Mutex<Vec<ContentQuery>>>,
    delays: Arc<HashMap<String, Duration>>,
    failing: Option<&'static str>,
}

impl RecordingStore {
    pub fn new(documents: Vec<Value>) -> Self {
        Self {
            inner: FixtureStore::from_documents(documents),
            ..Self::default()
        }
    }

    /// Delay search responses for patterns starting with the given prefix
    pub fn with_search_delay(mut self, prefix: &str, delay: Duration) -> Self {
        Arc::make_mut(&mut self.delays).insert(prefix.to_string(), delay);
        self
    }

    /// Fail every query whose log name matches
    pub fn failing(mut self, query_name: &'static str) -> Self {
        self.failing = Some(query_name);
        self
    }

    pub fn queries(&self) -> Vec<ContentQuery> {
        self.queries.lock().unwrap().clone()
    }
}

impl ContentStore for RecordingStore {
    fn fetch(&self, query: &ContentQuery) -> impl Future<Output = CmsResult<Value>> + Send {
        self.queries.lock().unwrap().push(query.clone());

        let delay = match query {
            ContentQuery::SearchTitles { pattern } => self
                .delays
                .iter()
                .find(|(prefix, _)| pattern.starts_with(prefix.as_str()))
                .map(|(_, delay)| *delay),
            _ => None,
        };
        let fail = self.failing == Some(query.name());
        let inner = self.inner.clone();
        let query = query.clone();

        async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if fail {
                return Err(CmsError::Status {
                    status: 503,
                    message: "content store unavailable".to_string(),
                });
            }
            inner.fetch(&query).await
        }
    }
}

pub fn config() -> CmsConfig {
    CmsConfig {
        project_id: "proj".to_string(),
        ..CmsConfig::default()
    }
}

pub fn movie(id: &str, title: &str) -> Value {
    json!({"_id": id, "_type": "movie", "title": title})
}

/// A small dataset with a configured home page
pub fn catalog() -> Vec<Value> {
    vec![
        json!({
            "_id": "hero-1",
            "_type": "movie",
            "_createdAt": "2025-02-01T00:00:00Z",
            "title": "ADDIS HORIZON",
            "type": "movie",
            "backdrop": {"asset": {"_ref": "image-hero-1920x1080-jpg"}},
            "thumbnail": {"asset": {"_ref": "image-heroThumb-600x900-jpg"}},
            "videoUrl": "https://stream.example.com/hero.m3u8",
            "rating": "PG-13",
            "year": 2025,
            "duration": "2h 15m",
            "categories": ["Sci-Fi", "Drama"]
        }),
        json!({
            "_id": "orig-1",
            "_type": "movie",
            "_createdAt": "2025-01-01T00:00:00Z",
            "title": "The Blue Nile",
            "type": "series",
            "isOriginal": true
        }),
        json!({
            "_id": "kids-1",
            "_type": "movie",
            "_createdAt": "2024-12-01T00:00:00Z",
            "title": "Rift Valley Rangers",
            "type": "series"
        }),
        json!({
            "_id": "n-1",
            "_type": "news",
            "headline": "EBS Launches 8K Studio",
            "publishedAt": "2025-03-01T09:00:00Z",
            "tag": "Technology"
        }),
        json!({
            "_id": "n-2",
            "_type": "news",
            "publishedAt": "2025-03-05T09:00:00Z"
        }),
        json!({
            "_id": "homePage",
            "_type": "homePage",
            "tickerText": "Breaking: new season tonight",
            "heroMovie": {"_ref": "hero-1"},
            "trendingList": [{"_ref": "hero-1"}, {"_ref": "orig-1"}],
            "originalsList": [{"_ref": "orig-1"}],
            "kidsFamily": [{"_ref": "kids-1"}, {"_ref": "deleted-doc"}],
            "curatedCollections": [{"_ref": "orig-1"}, {"_ref": "kids-1"}],
            "liveSection": {
                "title": "EBS 24",
                "coverImage": {"asset": {"_ref": "image-live-1920x1080-jpg"}}
            }
        }),
    ]
}
