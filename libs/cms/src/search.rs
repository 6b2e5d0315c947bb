//! Debounced, last-query-wins search scheduling
//!
//! Typing into the search overlay calls [`SearchScheduler::input`] on every
//! keystroke. A query is only issued after a quiet period without new input,
//! and responses are tagged with a sequence number so a slow response for an
//! old term can never overwrite the results of a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::ContentApi;
use crate::models::MediaItem;
use crate::store::ContentStore;

/// Quiet period before a search is issued
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);
/// Terms shorter than this clear the results instead of querying
pub const MIN_TERM_CHARS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchStatus {
    #[default]
    Idle,
    Loading,
    Results(Vec<MediaItem>),
    NoResults,
    Failed(String),
}

/// What the overlay should render
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub term: String,
    /// Sequence number of the request these results belong to
    pub sequence: u64,
    pub status: SearchStatus,
}

pub struct SearchScheduler<S> {
    api: Arc<ContentApi<S>>,
    quiet_period: Duration,
    latest: Arc<AtomicU64>,
    pending: Mutex<Option<JoinHandle<()>>>,
    state: Arc<watch::Sender<SearchState>>,
}

impl<S: ContentStore + 'static> SearchScheduler<S> {
    pub fn new(api: Arc<ContentApi<S>>, quiet_period: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            api,
            quiet_period,
            latest: Arc::new(AtomicU64::new(0)),
            pending: Mutex::new(None),
            state: Arc::new(state),
        }
    }

    /// Receive every published [`SearchState`]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    /// Current state without waiting
    pub fn current(&self) -> SearchState {
        self.state.borrow().clone()
    }

    /// Register new input. Must be called from within a tokio runtime.
    ///
    /// The sequence number is taken here, under the same lock that replaces
    /// the pending timer, so a timer for older input can never issue a query.
    pub fn input(&self, term: impl Into<String>) {
        let term = term.into();
        let mut pending = self.lock_pending();
        if let Some(timer) = pending.take() {
            timer.abort();
        }
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        if term.trim().chars().count() < MIN_TERM_CHARS {
            self.state.send_replace(SearchState {
                term,
                sequence,
                status: SearchStatus::Idle,
            });
            return;
        }

        let api = Arc::clone(&self.api);
        let latest = Arc::clone(&self.latest);
        let state = Arc::clone(&self.state);
        let quiet_period = self.quiet_period;

        let timer = tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;

            let issued = state.send_if_modified(|current| {
                if latest.load(Ordering::SeqCst) != sequence {
                    return false;
                }
                *current = SearchState {
                    term: term.clone(),
                    sequence,
                    status: SearchStatus::Loading,
                };
                true
            });
            if !issued {
                debug!("Search #{} for {:?} superseded before issue", sequence, term);
                return;
            }
            debug!("Issuing search #{} for {:?}", sequence, term);

            // The query runs detached so newer input only cancels timers,
            // never a request that is already in flight.
            tokio::spawn(async move {
                let outcome = api.search(&term).await;
                let status = match outcome {
                    Ok(items) if items.is_empty() => SearchStatus::NoResults,
                    Ok(items) => SearchStatus::Results(items),
                    Err(err) => {
                        warn!("Search for {:?} failed: {}", term, err);
                        SearchStatus::Failed(err.to_string())
                    }
                };

                let published = state.send_if_modified(|current| {
                    if latest.load(Ordering::SeqCst) != sequence {
                        return false;
                    }
                    *current = SearchState {
                        term: term.clone(),
                        sequence,
                        status,
                    };
                    true
                });
                if !published {
                    debug!("Discarding stale search #{} for {:?}", sequence, term);
                }
            });
        });

        *pending = Some(timer);
    }

    /// Drop pending input, ignore any response still in flight and go back
    /// to idle
    pub fn cancel(&self) {
        let mut pending = self.lock_pending();
        if let Some(timer) = pending.take() {
            timer.abort();
        }
        let sequence = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(SearchState {
            term: String::new(),
            sequence,
            status: SearchStatus::Idle,
        });
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S> Drop for SearchScheduler<S> {
    fn drop(&mut self) {
        let pending = match self.pending.get_mut() {
            Ok(pending) => pending,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(timer) = pending.take() {
            timer.abort();
        }
    }
}
