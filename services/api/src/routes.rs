//! API service routes

use app_store::{StatePersistence, UserProfile};
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use cms::search::MIN_TERM_CHARS;
use cms::store::ContentStore;
use serde_json::json;
use tracing::{debug, info};

use crate::{
    error::{ApiError, ApiResult},
    models::{
        HomeResponse, LoginRequest, OverlayRequest, Playback, SearchInput, SearchQuery,
        SearchResponse, SearchStateView, WatchResponse, WatchlistAdd, WatchlistMembership,
    },
    state::AppState,
};

/// Create the router for the API service
pub fn create_router<S, P>(state: AppState<S, P>) -> Router
where
    S: ContentStore + 'static,
    P: StatePersistence + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/home", get(home::<S, P>))
        .route("/news", get(news::<S, P>))
        .route("/search", get(search::<S, P>))
        .route("/search/input", post(search_input::<S, P>))
        .route("/search/state", get(search_state::<S, P>))
        .route("/watch/:id", get(watch::<S, P>))
        .route("/session", get(session::<S, P>))
        .route("/session/login", post(login::<S, P>))
        .route("/session/logout", post(logout::<S, P>))
        .route(
            "/watchlist",
            get(get_watchlist::<S, P>).post(add_to_watchlist::<S, P>),
        )
        .route(
            "/watchlist/:id",
            get(watchlist_membership::<S, P>).delete(remove_from_watchlist::<S, P>),
        )
        .route("/theme/toggle", post(toggle_theme::<S, P>))
        .route("/overlays/search", put(toggle_search::<S, P>))
        .route("/overlays/auth", put(toggle_auth_modal::<S, P>))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "api-service"
    }))
}

/// Landing page and news section, fetched together
pub async fn home<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
) -> ApiResult<impl IntoResponse> {
    let (home, news) = tokio::try_join!(state.content.home_page(), state.content.news())?;
    Ok(Json(HomeResponse::new(home, news)))
}

pub async fn news<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.content.news().await?))
}

/// One-shot title search
pub async fn search<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<impl IntoResponse> {
    let term = query.q.trim().to_string();
    if term.chars().count() < MIN_TERM_CHARS {
        debug!("Search term {:?} too short, not querying", term);
        return Ok(Json(SearchResponse::idle(term)));
    }

    let results = state.content.search(&term).await?;
    Ok(Json(SearchResponse::found(term, results)))
}

/// Feed a keystroke to the debounced search
pub async fn search_input<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
    Json(payload): Json<SearchInput>,
) -> impl IntoResponse {
    state.search.input(payload.term);
    (
        StatusCode::ACCEPTED,
        Json(SearchStateView::from(state.search.current())),
    )
}

pub async fn search_state<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
) -> impl IntoResponse {
    Json(SearchStateView::from(state.search.current()))
}

/// Item details and what the player should do with them
pub async fn watch<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let item = state
        .content
        .content_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Content {} not found", id)))?;

    let in_watchlist = state.store.lock().await.is_in_watchlist(&item.id);
    let playback = Playback::for_item(&item);

    Ok(Json(WatchResponse {
        item,
        playback,
        in_watchlist,
    }))
}

pub async fn session<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
) -> impl IntoResponse {
    Json(state.store.lock().await.state().clone())
}

/// Demo sign-in. No credential is checked.
pub async fn login<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
    payload: Option<Json<LoginRequest>>,
) -> impl IntoResponse {
    let profile = payload
        .and_then(|Json(request)| request.profile)
        .unwrap_or_else(UserProfile::demo);

    let mut store = state.store.lock().await;
    store.login(profile);
    Json(store.state().clone())
}

pub async fn logout<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
) -> impl IntoResponse {
    let mut store = state.store.lock().await;
    store.logout();
    Json(store.state().clone())
}

pub async fn get_watchlist<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
) -> impl IntoResponse {
    Json(state.store.lock().await.watchlist().to_vec())
}

/// Add a content item by id; unknown ids are rejected
pub async fn add_to_watchlist<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
    Json(payload): Json<WatchlistAdd>,
) -> ApiResult<impl IntoResponse> {
    if payload.id.trim().is_empty() {
        return Err(ApiError::BadRequest("Content id is required".to_string()));
    }

    let item = state
        .content
        .content_by_id(&payload.id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Content {} not found", payload.id)))?;

    let id = item.id.clone();
    let added = state.store.lock().await.add_to_watchlist(item).await;
    if added {
        info!("Added {} to the watchlist", id);
    }

    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(WatchlistMembership {
            id,
            in_watchlist: true,
        }),
    ))
}

/// Removing an absent id is a no-op
pub async fn remove_from_watchlist<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    if state.store.lock().await.remove_from_watchlist(&id).await {
        info!("Removed {} from the watchlist", id);
    }
    Json(WatchlistMembership {
        id,
        in_watchlist: false,
    })
}

pub async fn watchlist_membership<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let in_watchlist = state.store.lock().await.is_in_watchlist(&id);
    Json(WatchlistMembership { id, in_watchlist })
}

pub async fn toggle_theme<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
) -> impl IntoResponse {
    let theme = state.store.lock().await.toggle_theme().await;
    Json(json!({ "theme": theme }))
}

/// Open or close the search overlay. Closing it drops any pending search.
pub async fn toggle_search<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
    Json(payload): Json<OverlayRequest>,
) -> impl IntoResponse {
    if !payload.open {
        state.search.cancel();
    }
    let mut store = state.store.lock().await;
    store.toggle_search(payload.open);
    Json(store.state().clone())
}

pub async fn toggle_auth_modal<S: ContentStore + 'static, P: StatePersistence>(
    State(state): State<AppState<S, P>>,
    Json(payload): Json<OverlayRequest>,
) -> impl IntoResponse {
    let mut store = state.store.lock().await;
    store.toggle_auth_modal(payload.open);
    Json(store.state().clone())
}
