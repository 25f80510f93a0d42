use axum::{
    Extension,
    extract::Query,
    response::{Html, IntoResponse, Redirect, Response},
};
use reqwest::Url;
use serde::Deserialize;

use crate::{
    errors::ApiError,
    server::SharedState,
    spotify::{self, SpotifyClient},
    types::{PendingLogin, UserSession},
    utils,
};

pub async fn login(Extension(state): Extension<SharedState>) -> Result<Redirect, ApiError> {
    let session_id = utils::generate_state();
    let code_verifier = utils::generate_code_verifier();
    let auth_url = spotify::auth::authorize_url(&session_id, &code_verifier)?;

    state
        .pending
        .insert(session_id.clone(), PendingLogin { code_verifier })
        .await;

    log::info!("Login initiated: {}", session_id);
    Ok(Redirect::to(&auth_url))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<SharedState>,
) -> Response {
    if let Some(error) = params.error.as_deref() {
        log::warn!("Authorization denied: {}", error);
        return finish(&state, &[("error", error)]);
    }

    let (Some(code), Some(session_id)) = (params.code.as_deref(), params.state.as_deref()) else {
        return finish(&state, &[("error", "invalid_session")]);
    };

    // Single use, a replayed callback finds nothing.
    let Some(pending) = state.pending.remove(session_id).await else {
        return finish(&state, &[("error", "invalid_session")]);
    };

    let token = match spotify::auth::exchange_code_pkce(&state.http, code, &pending.code_verifier).await {
        Ok(token) => token,
        Err(e) => {
            log::error!("Token exchange failed: {}", e);
            return finish(&state, &[("error", "auth_failed")]);
        }
    };

    let client = SpotifyClient::new(state.http.clone(), token.access_token.clone());
    let user = match client.current_user().await {
        Ok(user) => user,
        Err(e) => {
            log::error!("OAuth callback error: {}", e);
            return finish(&state, &[("error", "auth_failed")]);
        }
    };

    state
        .users
        .insert(
            user.id.clone(),
            UserSession {
                user_id: user.id.clone(),
                token,
            },
        )
        .await;

    log::info!("User authorized: {}", user.id);
    finish(&state, &[("spotify_user_id", user.id.as_str()), ("status", "success")])
}

/// Redirects back to the frontend, or renders a short page when none is configured.
fn finish(state: &SharedState, params: &[(&str, &str)]) -> Response {
    let Some(frontend) = state.frontend_url.as_deref() else {
        let failed = params.iter().any(|(k, _)| *k == "error");
        return if failed {
            Html("<h4>Login failed.</h4>").into_response()
        } else {
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>").into_response()
        };
    };

    match Url::parse_with_params(frontend, params) {
        Ok(url) => Redirect::to(url.as_str()).into_response(),
        Err(e) => ApiError::Internal(format!("invalid FRONTEND_URL: {}", e)).into_response(),
    }
}
