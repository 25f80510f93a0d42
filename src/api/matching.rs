use axum::{Extension, Json, extract::Query};
use serde::{Deserialize, Serialize};

use super::{missing_parameters, non_blank};
use crate::{
    errors::ApiError,
    matching::{PlaylistMatch, TrackResolver},
    server::SharedState,
    spotify::SpotifyClient,
    utils, youtube,
};

/// Failed titles reported back per request.
const MAX_REPORTED_FAILURES: usize = 10;

#[derive(Debug, Deserialize)]
pub struct MatchTracksParams {
    spotify_user_id: Option<String>,
    yt_playlist_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MatchTracksResponse {
    status: &'static str,
    matched_tracks: Vec<String>,
    total_videos: usize,
    failed_matches: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConvertParams {
    spotify_user_id: Option<String>,
    playlist_name: Option<String>,
    track_uris: Option<String>,
    yt_playlist_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    status: &'static str,
    playlist_name: String,
    playlist_id: String,
    playlist_url: Option<String>,
    total_tracks: usize,
    matched_tracks: usize,
    total_videos: usize,
    failed_matches: usize,
    failed_match_titles: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddToPlaylistParams {
    spotify_user_id: Option<String>,
    playlist_id: Option<String>,
    track_uris: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddToPlaylistResponse {
    status: &'static str,
    tracks_added: usize,
}

/// Fetches the YouTube playlist and resolves every title against Spotify.
async fn match_youtube_playlist(
    state: &SharedState,
    client: &SpotifyClient,
    yt_playlist_id: &str,
) -> Result<PlaylistMatch, ApiError> {
    let titles = youtube::playlist_titles(&state.http, yt_playlist_id).await?;
    if titles.is_empty() {
        return Err(ApiError::BadRequest("YouTube playlist is empty".to_string()));
    }

    let result = TrackResolver::new(client).resolve_playlist(&titles).await?;
    if result.matched.is_empty() {
        return Err(ApiError::NotFound("No matching tracks found".to_string()));
    }

    Ok(result)
}

/// Handles `GET /match-tracks`: resolves a YouTube playlist without
/// creating anything on Spotify.
pub async fn match_tracks(
    Query(params): Query<MatchTracksParams>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<MatchTracksResponse>, ApiError> {
    let (Some(user_id), Some(yt_playlist_id)) = (
        non_blank(&params.spotify_user_id),
        non_blank(&params.yt_playlist_id),
    ) else {
        return Err(missing_parameters());
    };

    let client = state.spotify_for(user_id).await?;
    let result = match_youtube_playlist(&state, &client, yt_playlist_id).await?;
    let total_videos = result.total();

    Ok(Json(MatchTracksResponse {
        status: "success",
        matched_tracks: result.matched,
        total_videos,
        failed_matches: result
            .unmatched
            .into_iter()
            .take(MAX_REPORTED_FAILURES)
            .collect(),
    }))
}

/// Creates a playlist from explicit track URIs, or from a fresh match of a
/// YouTube playlist when no URIs are given.
pub async fn convert(
    Query(params): Query<ConvertParams>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<ConversionResponse>, ApiError> {
    let (Some(user_id), Some(playlist_name)) = (
        non_blank(&params.spotify_user_id),
        non_blank(&params.playlist_name),
    ) else {
        return Err(missing_parameters());
    };

    let client = state.spotify_for(user_id).await?;

    let uris = non_blank(&params.track_uris)
        .map(utils::split_csv)
        .unwrap_or_default();

    let (result, description) = if !uris.is_empty() {
        let result = PlaylistMatch {
            matched: uris,
            unmatched: Vec::new(),
        };
        (result, "Created with musikai".to_string())
    } else if let Some(yt_playlist_id) = non_blank(&params.yt_playlist_id) {
        let result = match_youtube_playlist(&state, &client, yt_playlist_id).await?;
        (result, format!("Converted from YouTube playlist {}", yt_playlist_id))
    } else if params.track_uris.is_some() {
        return Err(ApiError::BadRequest("No valid track URIs".to_string()));
    } else {
        return Err(missing_parameters());
    };

    log::info!(
        "Creating playlist '{}' with {} tracks",
        playlist_name,
        result.matched.len()
    );

    let playlist = client
        .create_playlist(user_id, playlist_name, &description)
        .await?;
    if let Err(e) = client.add_tracks(&playlist.id, &result.matched).await {
        log::error!(
            "Playlist '{}' ({}) was created but not filled: {}",
            playlist_name,
            playlist.id,
            e
        );
        return Err(e.into());
    }

    log::info!("Successfully created playlist '{}'", playlist_name);

    Ok(Json(ConversionResponse {
        status: "success",
        playlist_name: playlist_name.to_string(),
        playlist_id: playlist.id,
        playlist_url: playlist.external_urls.spotify,
        total_tracks: result.matched.len(),
        matched_tracks: result.matched.len(),
        total_videos: result.total(),
        failed_matches: result.unmatched.len(),
        failed_match_titles: result
            .unmatched
            .into_iter()
            .take(MAX_REPORTED_FAILURES)
            .collect(),
    }))
}

pub async fn add_to_playlist(
    Query(params): Query<AddToPlaylistParams>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<AddToPlaylistResponse>, ApiError> {
    let (Some(user_id), Some(playlist_id), Some(track_uris)) = (
        non_blank(&params.spotify_user_id),
        non_blank(&params.playlist_id),
        non_blank(&params.track_uris),
    ) else {
        return Err(missing_parameters());
    };

    let uris = utils::split_csv(track_uris);
    if uris.is_empty() {
        return Err(ApiError::BadRequest("No valid track URIs".to_string()));
    }

    let client = state.spotify_for(user_id).await?;
    client.add_tracks(playlist_id, &uris).await?;

    Ok(Json(AddToPlaylistResponse {
        status: "success",
        tracks_added: uris.len(),
    }))
}
