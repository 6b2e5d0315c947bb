//! The client application state store
//!
//! One explicit object owns all client state. Callers read through shared
//! references and mutate only through the named operations below; watchlist
//! and theme changes are written through to the persistence backend.

use std::collections::HashSet;

use cms::MediaItem;
use tracing::{debug, info, warn};

use crate::models::{AppState, PersistedState, Theme, UserProfile};
use crate::persistence::StatePersistence;

/// Key under which the persisted slice is stored
pub const STORAGE_KEY: &str = "ebs-premier-storage";

pub struct AppStore<P> {
    persistence: P,
    state: AppState,
    /// Ids currently in the watchlist, kept in sync with `state.watchlist`
    watchlist_ids: HashSet<String>,
}

impl<P: StatePersistence> AppStore<P> {
    /// A fresh store with default state: signed out, empty watchlist, both
    /// overlays closed, dark theme
    pub fn new(persistence: P) -> Self {
        Self {
            persistence,
            state: AppState::default(),
            watchlist_ids: HashSet::new(),
        }
    }

    /// Restore the persisted slice, falling back to defaults when it is
    /// missing, unreadable or corrupt
    pub async fn hydrate(persistence: P) -> Self {
        let mut store = Self::new(persistence);

        let raw = match store.persistence.load(STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!("No persisted client state found, starting with defaults");
                return store;
            }
            Err(err) => {
                warn!("Failed to read persisted client state: {}", err);
                return store;
            }
        };

        match serde_json::from_str::<PersistedState>(&raw) {
            Ok(persisted) => {
                store.state.theme = persisted.theme;
                for item in persisted.watchlist {
                    store.insert_unique(item);
                }
                info!(
                    "Restored client state: {} watchlist items, {:?} theme",
                    store.state.watchlist.len(),
                    store.state.theme
                );
            }
            Err(err) => warn!("Ignoring corrupt persisted client state: {}", err),
        }

        store
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn watchlist(&self) -> &[MediaItem] {
        &self.state.watchlist
    }

    pub fn theme(&self) -> Theme {
        self.state.theme
    }

    pub fn is_search_open(&self) -> bool {
        self.state.is_search_open
    }

    pub fn is_auth_modal_open(&self) -> bool {
        self.state.is_auth_modal_open
    }

    /// Sign in with any profile and close the auth modal.
    ///
    /// Demo authentication only: no credential is checked.
    pub fn login(&mut self, profile: UserProfile) {
        info!("Signed in as {}", profile.id);
        self.state.user = Some(profile);
        self.state.is_authenticated = true;
        self.state.is_auth_modal_open = false;
    }

    /// Sign out. Watchlist and theme are kept.
    pub fn logout(&mut self) {
        self.state.user = None;
        self.state.is_authenticated = false;
    }

    /// Add an item unless one with the same id is already present.
    ///
    /// Returns whether the watchlist changed.
    pub async fn add_to_watchlist(&mut self, item: MediaItem) -> bool {
        let id = item.id.clone();
        if !self.insert_unique(item) {
            debug!("{} is already in the watchlist", id);
            return false;
        }
        self.persist().await;
        true
    }

    /// Remove the item with this id. Returns whether the watchlist changed.
    pub async fn remove_from_watchlist(&mut self, id: &str) -> bool {
        if !self.watchlist_ids.remove(id) {
            return false;
        }
        self.state.watchlist.retain(|item| item.id != id);
        self.persist().await;
        true
    }

    pub fn is_in_watchlist(&self, id: &str) -> bool {
        self.watchlist_ids.contains(id)
    }

    /// Set (not flip) the auth modal visibility
    pub fn toggle_auth_modal(&mut self, open: bool) {
        self.state.is_auth_modal_open = open;
    }

    /// Set (not flip) the search overlay visibility
    pub fn toggle_search(&mut self, open: bool) {
        self.state.is_search_open = open;
    }

    /// Flip between dark and light; returns the new theme
    pub async fn toggle_theme(&mut self) -> Theme {
        self.state.theme = self.state.theme.toggled();
        self.persist().await;
        self.state.theme
    }

    /// The slice written to durable storage
    pub fn persisted(&self) -> PersistedState {
        PersistedState {
            watchlist: self.state.watchlist.clone(),
            theme: self.state.theme,
        }
    }

    fn insert_unique(&mut self, item: MediaItem) -> bool {
        if !self.watchlist_ids.insert(item.id.clone()) {
            return false;
        }
        self.state.watchlist.push(item);
        true
    }

    async fn persist(&self) {
        let payload = match serde_json::to_string(&self.persisted()) {
            Ok(payload) => payload,
            Err(err) => {
                warn!("Failed to serialize client state: {}", err);
                return;
            }
        };

        if let Err(err) = self.persistence.save(STORAGE_KEY, &payload).await {
            warn!("Failed to persist client state: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryPersistence;
    use cms::ContentKind;

    fn item(id: &str) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            title: format!("Title {}", id),
            description: String::new(),
            kind: ContentKind::Movie,
            thumbnail_url: String::new(),
            backdrop_url: None,
            video_url: None,
            rating: "NR".to_string(),
            year: 2024,
            duration: String::new(),
            categories: vec![],
            featured: false,
            slug: None,
            is_original: false,
        }
    }

    #[test]
    fn test_defaults() {
        let store = AppStore::new(MemoryPersistence::new());
        assert!(store.user().is_none());
        assert!(!store.is_authenticated());
        assert!(store.watchlist().is_empty());
        assert!(!store.is_search_open());
        assert!(!store.is_auth_modal_open());
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_login_closes_modal_and_logout_clears_identity() {
        let mut store = AppStore::new(MemoryPersistence::new());
        store.toggle_auth_modal(true);
        assert!(store.is_auth_modal_open());

        store.login(UserProfile::demo());
        assert!(store.is_authenticated());
        assert_eq!(store.user().map(|u| u.name.as_str()), Some("Demo User"));
        assert!(!store.is_auth_modal_open());

        store.logout();
        assert!(!store.is_authenticated());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_overlay_toggles_set_rather_than_flip() {
        let mut store = AppStore::new(MemoryPersistence::new());
        store.toggle_search(true);
        store.toggle_search(true);
        assert!(store.is_search_open());
        store.toggle_search(false);
        assert!(!store.is_search_open());

        store.toggle_auth_modal(false);
        assert!(!store.is_auth_modal_open());
    }

    #[tokio::test]
    async fn test_watchlist_membership() {
        let mut store = AppStore::new(MemoryPersistence::new());

        assert!(store.add_to_watchlist(item("m1")).await);
        assert!(store.is_in_watchlist("m1"));

        assert!(store.remove_from_watchlist("m1").await);
        assert!(!store.is_in_watchlist("m1"));

        assert!(!store.remove_from_watchlist("m1").await);
    }

    #[tokio::test]
    async fn test_adding_twice_keeps_one_entry() {
        let mut store = AppStore::new(MemoryPersistence::new());

        assert!(store.add_to_watchlist(item("m1")).await);
        assert!(!store.add_to_watchlist(item("m1")).await);
        assert!(store.add_to_watchlist(item("m2")).await);

        let ids: Vec<_> = store.watchlist().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_toggle_theme_twice_restores() {
        let mut store = AppStore::new(MemoryPersistence::new());
        assert_eq!(store.toggle_theme().await, Theme::Light);
        assert_eq!(store.toggle_theme().await, Theme::Dark);
    }

    #[tokio::test]
    async fn test_logout_keeps_watchlist_and_theme() {
        let mut store = AppStore::new(MemoryPersistence::new());
        store.login(UserProfile::demo());
        store.add_to_watchlist(item("m1")).await;
        store.toggle_theme().await;

        store.logout();
        assert!(store.is_in_watchlist("m1"));
        assert_eq!(store.theme(), Theme::Light);
    }
}
