use chrono::Utc;
use reqwest::{Client, Url};

use crate::{
    config,
    errors::{CatalogError, ConfigError},
    types::{Token, TokenResponse},
    utils,
};

use super::{decode, send};

/// Builds the Spotify authorize URL for a PKCE login.
///
/// # Arguments
///
/// * `state` - Opaque OAuth state that keys the pending login
/// * `code_verifier` - PKCE verifier, sent as its S256 challenge
///
/// # Errors
///
/// Returns [`ConfigError`] when the client ID is missing or
/// `SPOTIFY_API_AUTH_URL` is not a valid URL.
pub fn authorize_url(state: &str, code_verifier: &str) -> Result<String, ConfigError> {
    let code_challenge = utils::generate_code_challenge(code_verifier);
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();
    let scope = config::spotify_scope();
    let params = [
        ("client_id", client_id.as_str()),
        ("response_type", "code"),
        ("redirect_uri", redirect_uri.as_str()),
        ("code_challenge", code_challenge.as_str()),
        ("code_challenge_method", "S256"),
        ("scope", scope.as_str()),
        ("state", state),
    ];

    let base = config::spotify_apiauth_url();
    Url::parse_with_params(&base, &params)
        .map(String::from)
        .map_err(|e| ConfigError::Invalid("SPOTIFY_API_AUTH_URL", e.to_string()))
}

/// Exchanges an authorization code for a token.
///
/// # Arguments
///
/// * `http` - Shared reqwest client
/// * `code` - Authorization code from the callback
/// * `verifier` - PKCE verifier stored when the login started
///
/// # Returns
///
/// A [`Token`] stamped with the current time as `obtained_at`.
///
/// # Errors
///
/// A missing client ID is systemic. Request failures are classified as in
/// [`super::classify_status`].
pub async fn exchange_code_pkce(
    http: &Client,
    code: &str,
    verifier: &str,
) -> Result<Token, CatalogError> {
    let client_id = config::spotify_client_id().map_err(|e| CatalogError::Systemic(e.to_string()))?;
    let redirect_uri = config::spotify_redirect_uri();

    let request = http.post(config::spotify_apitoken_url()).form(&[
        ("grant_type", "authorization_code"),
        ("client_id", client_id.as_str()),
        ("code", code),
        ("code_verifier", verifier),
        ("redirect_uri", redirect_uri.as_str()),
    ]);

    let res: TokenResponse = decode(send(request).await?).await?;
    Ok(into_token(res, None))
}

/// Exchanges a refresh token for a new access token.
///
/// Spotify may omit the refresh token in the answer, in which case the old one
/// stays valid and is kept.
pub async fn refresh_token(http: &Client, refresh_token: &str) -> Result<Token, CatalogError> {
    let client_id = config::spotify_client_id().map_err(|e| CatalogError::Systemic(e.to_string()))?;

    let request = http.post(config::spotify_apitoken_url()).form(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id.as_str()),
    ]);

    let res: TokenResponse = decode(send(request).await?).await?;
    Ok(into_token(res, Some(refresh_token)))
}

fn into_token(res: TokenResponse, previous_refresh: Option<&str>) -> Token {
    Token {
        access_token: res.access_token,
        refresh_token: res
            .refresh_token
            .or_else(|| previous_refresh.map(String::from))
            .unwrap_or_default(),
        scope: res.scope.unwrap_or_default(),
        expires_in: res.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    }
}
