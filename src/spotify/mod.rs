//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API musikai needs: OAuth 2.0
//! PKCE token exchange and refresh, track search, track lookup, the current
//! user's profile and playlist management.
//!
//! ## Error classification
//!
//! Every request goes through [`send`], which maps failures onto
//! [`CatalogError`]:
//!
//! - `401`/`403` are systemic (token revoked, missing scope, user not
//!   allow-listed in development mode)
//! - `429` with a `Retry-After` above [`MAX_RETRY_AFTER_SECS`] is systemic
//!   (quota exhausted), any other `429` is transient
//! - `5xx`, timeouts, connection and decode failures are transient
//!
//! ## API Coverage
//!
//! - `GET /search` - track search ([`crate::matching::TrackCatalog`])
//! - `GET /tracks/{id}` - single track lookup
//! - `GET /me` - current user
//! - `GET /me/playlists` - user's playlists
//! - `GET /playlists/{id}/tracks` - playlist contents
//! - `POST /users/{user_id}/playlists` - create playlist
//! - `POST /playlists/{id}/tracks` - add tracks
//! - `POST /api/token` - token exchange and refresh

pub mod auth;
mod playlist;
mod search;
mod tracks;
mod user;

use reqwest::{Client, RequestBuilder, Response, StatusCode};

use crate::{config, errors::CatalogError};

/// Longest `Retry-After` still treated as a passing rate limit.
pub const MAX_RETRY_AFTER_SECS: u64 = 120;

/// Spotify Web API client bound to one user's access token.
#[derive(Clone)]
pub struct SpotifyClient {
    http: Client,
    token: String,
    api_url: String,
}

impl SpotifyClient {
    /// Creates a client for the API URL configured in `SPOTIFY_API_URL`.
    ///
    /// # Arguments
    ///
    /// * `http` - Shared reqwest client
    /// * `token` - OAuth access token of the user
    pub fn new(http: Client, token: impl Into<String>) -> Self {
        Self::with_api_url(http, token, config::spotify_apiurl())
    }

    /// Creates a client against an explicit API base URL.
    ///
    /// A trailing `/` on `api_url` is ignored.
    pub fn with_api_url(http: Client, token: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            http,
            token: token.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.url(path)).bearer_auth(&self.token)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.url(path)).bearer_auth(&self.token)
    }

    /// Follows an absolute `next` URL from a paged response.
    fn get_absolute(&self, url: &str) -> RequestBuilder {
        self.http.get(url).bearer_auth(&self.token)
    }
}

/// Sends a request and classifies any failure.
///
/// # Errors
///
/// Transport failures are [`CatalogError::Transient`]. Non-success statuses
/// are classified by [`classify_status`] with the `Retry-After` header.
pub(crate) async fn send(request: RequestBuilder) -> Result<Response, CatalogError> {
    let response = request
        .send()
        .await
        .map_err(|e| CatalogError::Transient(e.to_string()))?;

    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    Err(classify_status(status, retry_after(&response)))
}

pub(crate) async fn decode<T: serde::de::DeserializeOwned>(
    response: Response,
) -> Result<T, CatalogError> {
    response
        .json::<T>()
        .await
        .map_err(|e| CatalogError::Transient(format!("unexpected response: {}", e)))
}

fn retry_after(response: &Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
}

/// Maps a failed Spotify status onto the catalog error taxonomy.
///
/// # Arguments
///
/// * `status` - HTTP status of the failed response
/// * `retry_after` - Parsed `Retry-After` header in seconds, if present
///
/// # Returns
///
/// [`CatalogError::Systemic`] for `401`, `403` and a `429` asking to wait
/// longer than [`MAX_RETRY_AFTER_SECS`]. [`CatalogError::Transient`] for
/// everything else.
pub fn classify_status(status: StatusCode, retry_after: Option<u64>) -> CatalogError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            CatalogError::Systemic(format!("authorization rejected ({})", status))
        }
        StatusCode::TOO_MANY_REQUESTS => match retry_after {
            Some(secs) if secs > MAX_RETRY_AFTER_SECS => {
                CatalogError::Systemic(format!("quota exhausted, retry after {} seconds", secs))
            }
            _ => CatalogError::Transient("rate limited".to_string()),
        },
        _ => CatalogError::Transient(format!("request failed ({})", status)),
    }
}
