use std::path::PathBuf;

use chrono::Utc;
use reqwest::Client;

use crate::{config, errors::CatalogError, spotify, types::Token};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN_SECS: u64 = 240;

pub struct TokenManager {
    token: Token,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager { token }
    }

    pub async fn load() -> Result<Self, String> {
        let path = Self::token_path();
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(|e| e.to_string())?;
        let token: Token = serde_json::from_str(&content).map_err(|e| e.to_string())?;
        Ok(Self { token })
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::token_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(&self.token).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Refreshes the token if it is about to expire.
    ///
    /// Returns whether a refresh happened, so callers can write the new token
    /// back to wherever they keep it.
    pub async fn refresh_if_expired(&mut self, http: &Client) -> Result<bool, CatalogError> {
        if !self.is_expired() {
            return Ok(false);
        }

        log::debug!("Access token expired, refreshing");
        self.token = spotify::auth::refresh_token(http, &self.token.refresh_token).await?;
        Ok(true)
    }

    /// A usable access token, refreshed and persisted to disk when needed.
    pub async fn get_valid_token(&mut self, http: &Client) -> Result<String, CatalogError> {
        if self.refresh_if_expired(http).await? {
            if let Err(e) = self.persist().await {
                log::warn!("Failed to persist refreshed token: {}", e);
            }
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        let valid_until = (self.token.obtained_at + self.token.expires_in)
            .saturating_sub(EXPIRY_MARGIN_SECS);
        now >= valid_until
    }

    fn token_path() -> PathBuf {
        config::data_dir().join("cache/token.json")
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    pub fn into_token(self) -> Token {
        self.token
    }
}
