//! Content-access facade
//!
//! The only component allowed to talk to the content store. Each operation
//! issues its queries and maps the raw documents into view records.

use serde_json::Value;
use tracing::{debug, info};

use crate::config::CmsConfig;
use crate::error::CmsResult;
use crate::image::ImageUrlBuilder;
use crate::mapper::{map_live_section, map_media, map_media_list, map_news};
use crate::models::{HomePage, LiveSection, MediaItem, NewsItem};
use crate::query::ContentQuery;
use crate::store::ContentStore;

/// Ticker shown when no home page configuration exists yet
pub const FALLBACK_TICKER: &str = "Welcome to EBS Premier+";
pub const FALLBACK_LIVE_TITLE: &str = "Live TV";
pub const FALLBACK_LIVE_DESCRIPTION: &str = "Stream Offline";

/// Facade over a [`ContentStore`]
#[derive(Debug, Clone)]
pub struct ContentApi<S> {
    store: S,
    images: ImageUrlBuilder,
    news_limit: u32,
    recent_limit: u32,
}

impl<S: ContentStore> ContentApi<S> {
    /// Create a new facade over `store`
    pub fn new(store: S, config: &CmsConfig) -> Self {
        Self {
            store,
            images: ImageUrlBuilder::new(&config.image_host, &config.project_id, &config.dataset),
            news_limit: config.news_limit,
            recent_limit: config.recent_limit,
        }
    }

    /// Gather everything the landing page needs.
    ///
    /// The configuration and "recently added" queries run concurrently; if
    /// either fails the whole aggregate fails.
    pub async fn home_page(&self) -> CmsResult<HomePage> {
        let recent_query = ContentQuery::RecentContent {
            limit: self.recent_limit,
        };
        let (config, recent) = tokio::try_join!(
            self.store.fetch(&ContentQuery::HomePage),
            self.store.fetch(&recent_query),
        )?;

        let recent_library = map_media_list(Some(&recent), &self.images);

        let home = match config {
            Value::Object(_) => HomePage {
                ticker_text: config
                    .get("tickerText")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                hero: config
                    .get("heroMovie")
                    .filter(|hero| hero.is_object())
                    .map(|hero| map_media(hero, &self.images)),
                trending: map_media_list(config.get("trendingList"), &self.images),
                originals: map_media_list(config.get("originalsList"), &self.images),
                new_releases: map_media_list(config.get("newReleases"), &self.images),
                kids_family: map_media_list(config.get("kidsFamily"), &self.images),
                bento_grid: map_media_list(config.get("curatedCollections"), &self.images),
                recent_library,
                live_section: map_live_section(
                    config.get("liveSection").unwrap_or(&Value::Null),
                    &self.images,
                ),
            },
            _ => {
                info!("No home page configuration found, serving fallback layout");
                HomePage {
                    ticker_text: FALLBACK_TICKER.to_string(),
                    hero: None,
                    trending: Vec::new(),
                    originals: Vec::new(),
                    new_releases: Vec::new(),
                    kids_family: Vec::new(),
                    bento_grid: Vec::new(),
                    recent_library,
                    live_section: LiveSection {
                        title: FALLBACK_LIVE_TITLE.to_string(),
                        description: FALLBACK_LIVE_DESCRIPTION.to_string(),
                        cover_image: String::new(),
                    },
                }
            }
        };

        Ok(home)
    }

    /// Latest news, newest first
    pub async fn news(&self) -> CmsResult<Vec<NewsItem>> {
        let result = self
            .store
            .fetch(&ContentQuery::LatestNews {
                limit: self.news_limit,
            })
            .await?;

        Ok(match result {
            Value::Array(docs) => docs.iter().map(|doc| map_news(doc, &self.images)).collect(),
            _ => Vec::new(),
        })
    }

    /// Titles starting with `term`, case-insensitively
    pub async fn search(&self, term: &str) -> CmsResult<Vec<MediaItem>> {
        let query = ContentQuery::search(term);
        let result = self.store.fetch(&query).await?;
        let items = map_media_list(Some(&result), &self.images);
        debug!("Search for {:?} returned {} items", term, items.len());
        Ok(items)
    }

    /// A single content item, or `None` when no document has this id
    pub async fn content_by_id(&self, id: &str) -> CmsResult<Option<MediaItem>> {
        let result = self.store.fetch(&ContentQuery::by_id(id)).await?;
        Ok(match result {
            Value::Object(_) => Some(map_media(&result, &self.images)),
            _ => None,
        })
    }
}
