use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use reqwest::Client;

use crate::{
    config, error, info,
    management::TokenManager,
    server::{AppState, SharedState, start_api_server},
    success,
    types::Token,
    warning,
};

/// How long to wait for the user to finish the login in the browser.
const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the PKCE login through a local callback server and stores the token.
///
/// The server is the regular API server without a frontend, so the
/// `/callback` route answers with a short HTML page. The first session that
/// shows up in the user store is the one persisted.
pub async fn auth() {
    let state: SharedState = Arc::new(AppState::new(
        Client::new(),
        None,
        None,
        config::session_ttl(),
    ));

    let server_state = Arc::clone(&state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    let login_url = format!("http://{}/login", config::server_addr());
    info!("Waiting for Spotify authorization...");
    if webbrowser::open(&login_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            login_url
        )
    }

    let token = wait_for_token(&state).await;
    server.abort();

    match token {
        Some(token) => {
            if let Err(e) = TokenManager::new(token).persist().await {
                error!("Failed to save token to cache: {}", e);
            }
            success!("Authentication successful!");
        }
        None => error!("Authentication failed or timed out."),
    }
}

async fn wait_for_token(state: &SharedState) -> Option<Token> {
    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        if let Some((_, session)) = state.users.snapshot().await.into_iter().next() {
            return Some(session.token);
        }
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}
