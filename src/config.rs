//! Configuration management for musikai.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify, YouTube and Groq credentials, server settings
//! and session lifetimes.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

use crate::errors::ConfigError;

/// Loads environment variables from `.env` files.
///
/// Creates the local data directory if it doesn't exist and loads
/// `musikai/.env` from it, then a `.env` in the working directory. Variables
/// that are already set are never overwritten. Missing files are fine.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/musikai/.env`
/// - macOS: `~/Library/Application Support/musikai/.env`
/// - Windows: `%LOCALAPPDATA%/musikai/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if dotenv::from_path(&path).is_err() {
        log::debug!("No env file at {}", path.display());
    }
    dotenv::dotenv().ok();
    Ok(())
}

/// Checks that every key the API server needs is present.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] naming the first absent key.
pub fn validate() -> Result<(), ConfigError> {
    spotify_client_id()?;
    youtube_api_key()?;
    groq_api_key()?;
    Ok(())
}

/// Platform local data directory for musikai (`.../musikai`).
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("musikai");
    path
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(key)),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn or_default(key: &str, default: &str) -> String {
    optional(key).unwrap_or_else(|| default.to_string())
}

/// Address the HTTP API binds to, e.g. `127.0.0.1:8888`.
pub fn server_addr() -> String {
    or_default("SERVER_ADDRESS", "127.0.0.1:8888")
}

/// Frontend that OAuth callbacks redirect back to.
pub fn frontend_url() -> String {
    or_default("FRONTEND_URL", "http://localhost:5173")
}

/// Client ID registered on Spotify's developer platform.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Callback URL Spotify redirects to after authorization. Must match the
/// redirect URI registered in the Spotify application settings.
pub fn spotify_redirect_uri() -> String {
    or_default("SPOTIFY_API_REDIRECT_URI", "http://127.0.0.1:8888/callback")
}

/// Space separated OAuth scopes requested at login.
pub fn spotify_scope() -> String {
    or_default(
        "SPOTIFY_API_AUTH_SCOPE",
        "playlist-modify-private playlist-modify-public playlist-read-private user-read-email",
    )
}

/// Spotify accounts authorize endpoint.
pub fn spotify_apiauth_url() -> String {
    or_default(
        "SPOTIFY_API_AUTH_URL",
        "https://accounts.spotify.com/authorize",
    )
}

/// Spotify accounts token endpoint used for code exchange and refresh.
pub fn spotify_apitoken_url() -> String {
    or_default(
        "SPOTIFY_API_TOKEN_URL",
        "https://accounts.spotify.com/api/token",
    )
}

/// Base URL of the Spotify Web API, without a trailing slash.
pub fn spotify_apiurl() -> String {
    or_default("SPOTIFY_API_URL", "https://api.spotify.com/v1")
}

/// API key for the YouTube Data API v3.
///
/// # Errors
///
/// Returns [`ConfigError::Missing`] when `YOUTUBE_API_KEY` is unset or blank.
/// This is a server misconfiguration, not a caller mistake.
pub fn youtube_api_key() -> Result<String, ConfigError> {
    required("YOUTUBE_API_KEY")
}

pub fn youtube_apiurl() -> String {
    or_default("YOUTUBE_API_URL", "https://www.googleapis.com/youtube/v3")
}

/// API key for the Groq chat completion endpoint (https://console.groq.com).
pub fn groq_api_key() -> Result<String, ConfigError> {
    required("GROQ_API_KEY")
}

/// Model name sent with every chat completion request.
pub fn groq_model() -> String {
    or_default("GROQ_MODEL", "llama-3.3-70b-versatile")
}

pub fn groq_apiurl() -> String {
    or_default("GROQ_API_URL", "https://api.groq.com/openai/v1")
}

/// Resend API key. Without it access requests are only logged.
pub fn resend_api_key() -> Option<String> {
    optional("RESEND_API_KEY")
}

/// Sender address of access request emails.
pub fn resend_from_email() -> String {
    or_default("RESEND_FROM_EMAIL", "onboarding@resend.dev")
}

/// Recipient of access request emails.
pub fn admin_email() -> Option<String> {
    optional("ADMIN_EMAIL")
}

/// Lifetime of an authenticated API session.
pub fn session_ttl() -> Duration {
    let secs = optional("SESSION_TTL_SECS")
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(86_400);
    Duration::from_secs(secs)
}
