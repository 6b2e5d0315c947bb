//! Client application state for the Premier+ front end
//!
//! Holds the viewer's identity, watchlist, overlay visibility and theme in a
//! single [`AppStore`]. The watchlist and theme are written through to a
//! [`StatePersistence`] backend and restored with [`AppStore::hydrate`].

pub mod error;
pub mod models;
pub mod persistence;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use models::{AppState, PersistedState, Theme, UserProfile};
pub use persistence::{
    FilePersistence, MemoryPersistence, RedisPersistence, StateBackend, StatePersistence,
};
pub use store::{AppStore, STORAGE_KEY};
