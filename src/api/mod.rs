//! # API Module
//!
//! HTTP endpoints of the musikai server, built on [Axum](https://docs.rs/axum).
//! Every handler receives the [`SharedState`](crate::server::SharedState) as an
//! `Extension`.
//!
//! ## Endpoints
//!
//! ### Service
//! - [`root`] - service name, version and endpoint list
//! - [`health`] - health check for monitoring
//! - [`request_access`] - asks the admin to allow-list a new user
//!
//! ### Authentication
//! - [`login`] - starts the Spotify OAuth 2.0 PKCE flow
//! - [`callback`] - completes it and registers the user session
//!
//! ### Spotify data
//! - [`me`] - current user profile
//! - [`playlists`] - the user's playlists
//!
//! ### Conversion
//! - [`match_tracks`] - resolves a YouTube playlist against Spotify
//! - [`convert`] - creates a Spotify playlist from URIs or a YouTube playlist
//! - [`add_to_playlist`] - appends tracks to an existing playlist
//!
//! ### Recommendations
//! - [`recommendations`] - LLM recommendations seeded by track URIs
//! - [`enhance_playlist`] - LLM recommendations seeded by an existing playlist
//!
//! User scoped endpoints take a `spotify_user_id` query parameter and answer
//! `401` when no live session exists for it. Errors are returned as
//! `{"detail": "..."}`.

mod access;
mod auth;
mod health;
mod matching;
mod recommendations;
mod user;

pub use access::request_access;
pub use auth::{callback, login};
pub use health::{health, root};
pub use matching::{add_to_playlist, convert, match_tracks};
pub use recommendations::{enhance_playlist, recommendations};
pub use user::{me, playlists};

use crate::errors::ApiError;

/// Trimmed value of an optional query parameter, `None` when blank.
fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn missing_parameters() -> ApiError {
    ApiError::BadRequest("Missing required parameters".to_string())
}
