//! Typed errors for title matching, recommendations and the HTTP layer.
//!
//! The split between [`CatalogError::Transient`] and [`CatalogError::Systemic`]
//! drives batch behaviour: transient failures stay local to one title, systemic
//! ones abort the whole request.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Failure of a single catalog round trip.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Rate limit, timeout, 5xx or an undecodable body. Local to one query.
    #[error("transient catalog error: {0}")]
    Transient(String),

    /// Authentication failure or exhausted quota. The catalog is unusable.
    #[error("catalog unavailable: {0}")]
    Systemic(String),
}

impl CatalogError {
    pub fn is_systemic(&self) -> bool {
        matches!(self, CatalogError::Systemic(_))
    }

    /// Prefixes the message, keeping the classification.
    pub fn with_context(self, context: impl std::fmt::Display) -> Self {
        match self {
            CatalogError::Transient(msg) => CatalogError::Transient(format!("{}: {}", context, msg)),
            CatalogError::Systemic(msg) => CatalogError::Systemic(format!("{}: {}", context, msg)),
        }
    }
}

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("LLM request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("LLM API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("unexpected LLM payload: {0}")]
    Payload(String),
}

#[derive(Debug, Error)]
pub enum RecommendationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("LLM did not answer within {0} seconds")]
    Timeout(u64),

    #[error("malformed LLM response: {0}")]
    MalformedResponse(String),

    #[error("LLM response contained no usable recommendations")]
    EmptyRecommendations,

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Error)]
pub enum YoutubeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("YouTube playlist not found: {0}")]
    NotFound(String),

    #[error("access denied, playlist may be private: {0}")]
    AccessDenied(String),

    #[error("YouTube API error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{0} is invalid: {1}")]
    Invalid(&'static str, String),
}

/// Errors returned by the HTTP handlers, rendered as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Not authenticated")]
    Unauthorized,

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Upstream(format!("Spotify error: {}", err))
    }
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        match err {
            MatchError::InvalidInput(msg) => ApiError::BadRequest(msg),
            MatchError::Catalog(e) => e.into(),
        }
    }
}

impl From<RecommendationError> for ApiError {
    fn from(err: RecommendationError) -> Self {
        match err {
            RecommendationError::InvalidInput(msg) => ApiError::BadRequest(msg),
            RecommendationError::Catalog(e) => e.into(),
            other => ApiError::Upstream(other.to_string()),
        }
    }
}

impl From<YoutubeError> for ApiError {
    fn from(err: YoutubeError) -> Self {
        match err {
            YoutubeError::InvalidInput(msg) => ApiError::BadRequest(msg),
            YoutubeError::NotFound(_) => ApiError::NotFound(err.to_string()),
            YoutubeError::AccessDenied(_) => ApiError::BadRequest(err.to_string()),
            YoutubeError::Http(e) => ApiError::Upstream(e.to_string()),
            YoutubeError::Config(e) => e.into(),
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
