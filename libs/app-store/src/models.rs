//! Client state types

use cms::MediaItem;
use serde::{Deserialize, Serialize};

/// Identity of the signed-in viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub avatar: String,
}

impl UserProfile {
    /// Profile used by the demo sign-in flow. Not a real account.
    pub fn demo() -> Self {
        Self {
            id: "u1".to_string(),
            name: "Demo User".to_string(),
            avatar: "https://i.pravatar.cc/150?u=ebs".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Full client state. Handed out by shared reference only.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub user: Option<UserProfile>,
    pub is_authenticated: bool,
    pub watchlist: Vec<MediaItem>,
    pub is_auth_modal_open: bool,
    pub is_search_open: bool,
    pub theme: Theme,
}

/// The slice of [`AppState`] that survives restarts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    #[serde(default)]
    pub watchlist: Vec<MediaItem>,
    #[serde(default)]
    pub theme: Theme,
}
