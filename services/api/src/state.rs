//! Application state shared across handlers

use std::sync::Arc;
use std::time::Duration;

use app_store::{AppStore, StateBackend, StatePersistence};
use cms::search::SearchScheduler;
use cms::store::{ContentBackend, ContentStore};
use cms::ContentApi;
use tokio::sync::Mutex;

/// Application state shared across handlers
pub struct AppState<S = ContentBackend, P = StateBackend> {
    pub content: Arc<ContentApi<S>>,
    pub store: Arc<Mutex<AppStore<P>>>,
    pub search: Arc<SearchScheduler<S>>,
}

impl<S: ContentStore + 'static, P: StatePersistence> AppState<S, P> {
    /// Wrap a facade and an already hydrated store
    pub fn new(content: ContentApi<S>, store: AppStore<P>, search_debounce: Duration) -> Self {
        let content = Arc::new(content);
        let search = SearchScheduler::new(Arc::clone(&content), search_debounce);
        Self {
            content,
            store: Arc::new(Mutex::new(store)),
            search: Arc::new(search),
        }
    }
}

impl<S, P> Clone for AppState<S, P> {
    fn clone(&self) -> Self {
        Self {
            content: Arc::clone(&self.content),
            store: Arc::clone(&self.store),
            search: Arc::clone(&self.search),
        }
    }
}
