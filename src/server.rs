use std::{net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use axum::{
    Extension, Router,
    routing::{get, post},
};
use reqwest::Client;
use tower_http::cors::CorsLayer;

use crate::{
    Res, api, config,
    errors::ApiError,
    management::{SessionStore, TokenManager},
    recommend::ChatCompletion,
    spotify::SpotifyClient,
    types::{PendingLogin, UserSession},
};

/// How long a started login may wait for its callback.
const PENDING_LOGIN_TTL: Duration = Duration::from_secs(10 * 60);

const PURGE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// State shared by all handlers.
pub struct AppState {
    pub http: Client,
    pub pending: SessionStore<PendingLogin>,
    pub users: SessionStore<UserSession>,
    pub llm: Option<Arc<dyn ChatCompletion>>,
    /// Where the OAuth callback redirects to. `None` answers with a plain page.
    pub frontend_url: Option<String>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(
        http: Client,
        llm: Option<Arc<dyn ChatCompletion>>,
        frontend_url: Option<String>,
        session_ttl: Duration,
    ) -> Self {
        Self {
            http,
            pending: SessionStore::new(PENDING_LOGIN_TTL),
            users: SessionStore::new(session_ttl),
            llm,
            frontend_url,
        }
    }

    /// Spotify client for an authenticated user, refreshing the token first
    /// when it is close to expiry.
    pub async fn spotify_for(&self, user_id: &str) -> Result<SpotifyClient, ApiError> {
        let session = self.users.get(user_id).await.ok_or(ApiError::Unauthorized)?;

        let mut token_mgr = TokenManager::new(session.token);
        if token_mgr.refresh_if_expired(&self.http).await? {
            let refreshed = UserSession {
                user_id: session.user_id,
                token: token_mgr.current_token().clone(),
            };
            self.users.replace(user_id, refreshed).await;
        }

        Ok(SpotifyClient::new(
            self.http.clone(),
            token_mgr.into_token().access_token,
        ))
    }

    pub fn llm(&self) -> Result<&dyn ChatCompletion, ApiError> {
        self.llm
            .as_deref()
            .ok_or_else(|| ApiError::Internal("GROQ_API_KEY not set".to_string()))
    }
}

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(api::root))
        .route("/health", get(api::health))
        .route("/request-access", post(api::request_access))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/me", get(api::me))
        .route("/playlists", get(api::playlists))
        .route("/match-tracks", get(api::match_tracks))
        .route("/recommendations", get(api::recommendations))
        .route("/enhance-playlist", get(api::enhance_playlist))
        .route("/add-to-playlist", post(api::add_to_playlist))
        .route("/convert", get(api::convert))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}

pub async fn start_api_server(state: SharedState) -> Res<()> {
    let addr = SocketAddr::from_str(&config::server_addr())?;

    let purge_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = purge_state.pending.purge_expired().await
                + purge_state.users.purge_expired().await;
            if purged > 0 {
                log::debug!("Purged {} expired sessions", purged);
            }
        }
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Listening on {}", addr);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
