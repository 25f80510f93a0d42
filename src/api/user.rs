use axum::{Extension, Json, extract::Query};
use serde::{Deserialize, Serialize};

use super::{missing_parameters, non_blank};
use crate::{
    errors::ApiError,
    server::SharedState,
    types::{Image, PlaylistSummary},
};

#[derive(Debug, Deserialize)]
pub struct UserParams {
    spotify_user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    id: String,
    display_name: String,
    email: Option<String>,
    images: Vec<Image>,
}

#[derive(Debug, Serialize)]
pub struct PlaylistsResponse {
    status: &'static str,
    playlists: Vec<PlaylistSummary>,
}

pub async fn me(
    Query(params): Query<UserParams>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<UserInfo>, ApiError> {
    let user_id = non_blank(&params.spotify_user_id).ok_or_else(missing_parameters)?;
    let user = state.spotify_for(user_id).await?.current_user().await?;

    Ok(Json(UserInfo {
        display_name: user.display_name.unwrap_or_else(|| user.id.clone()),
        id: user.id,
        email: user.email,
        images: user.images,
    }))
}

pub async fn playlists(
    Query(params): Query<UserParams>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<PlaylistsResponse>, ApiError> {
    let user_id = non_blank(&params.spotify_user_id).ok_or_else(missing_parameters)?;
    let playlists = state.spotify_for(user_id).await?.user_playlists().await?;

    Ok(Json(PlaylistsResponse {
        status: "success",
        playlists,
    }))
}
