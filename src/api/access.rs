use axum::{Extension, Json, extract::Query};
use serde::{Deserialize, Serialize};

use crate::{errors::ApiError, notify, server::SharedState, utils};

#[derive(Debug, Deserialize)]
pub struct AccessRequestParams {
    email: Option<String>,
    name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessRequestResponse {
    status: &'static str,
    message: &'static str,
}

/// Handles `GET /request-access`.
///
/// The admin email is best effort. The caller gets a success response as
/// long as the email address is plausible.
///
/// # Errors
///
/// Returns [`ApiError::BadRequest`] for a missing or implausible email.
pub async fn request_access(
    Query(params): Query<AccessRequestParams>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<AccessRequestResponse>, ApiError> {
    let email = params
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| utils::is_plausible_email(e))
        .ok_or_else(|| ApiError::BadRequest("Invalid email".to_string()))?;

    if !notify::send_signup_notification(&state.http, email, params.name.as_deref()).await {
        log::warn!("Admin was not notified about access request from {}", email);
    }

    Ok(Json(AccessRequestResponse {
        status: "success",
        message: "Access request submitted. Admin will add you within 24 hours.",
    }))
}
