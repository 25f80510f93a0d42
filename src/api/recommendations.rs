use axum::{Extension, Json, extract::Query};
use serde::{Deserialize, Serialize};

use super::{missing_parameters, non_blank};
use crate::{
    errors::ApiError,
    recommend,
    server::SharedState,
    spotify::SpotifyClient,
    types::{CatalogTrack, SeedTrack},
    utils,
};

/// Seeds looked up from explicit URIs.
const MAX_URI_SEEDS: usize = 10;

/// Seeds taken from the start of an existing playlist.
const MAX_PLAYLIST_SEEDS: usize = 20;

#[derive(Debug, Deserialize)]
pub struct RecommendationParams {
    spotify_user_id: Option<String>,
    track_uris: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EnhancePlaylistParams {
    spotify_user_id: Option<String>,
    playlist_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendedTrack {
    uri: String,
    name: String,
    artist: String,
    album: Option<String>,
    image: Option<String>,
}

impl From<CatalogTrack> for RecommendedTrack {
    fn from(track: CatalogTrack) -> Self {
        Self {
            uri: track.uri,
            name: track.name,
            artist: track.artists.join(", "),
            album: track.album,
            image: track.image,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    status: &'static str,
    recommendations: Vec<RecommendedTrack>,
}

async fn recommend_from_seeds(
    state: &SharedState,
    client: &SpotifyClient,
    seeds: &[SeedTrack],
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let tracks = recommend::recommend_tracks(seeds, state.llm()?, client).await?;
    if tracks.is_empty() {
        return Err(ApiError::NotFound(
            "No recommendations found on Spotify".to_string(),
        ));
    }

    Ok(Json(RecommendationsResponse {
        status: "success",
        recommendations: tracks.into_iter().map(RecommendedTrack::from).collect(),
    }))
}

pub async fn recommendations(
    Query(params): Query<RecommendationParams>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let (Some(user_id), Some(track_uris)) = (
        non_blank(&params.spotify_user_id),
        non_blank(&params.track_uris),
    ) else {
        return Err(missing_parameters());
    };

    let client = state.spotify_for(user_id).await?;
    let uris: Vec<String> = utils::split_csv(track_uris)
        .into_iter()
        .take(MAX_URI_SEEDS)
        .collect();

    let seeds = client.seed_tracks(&uris).await?;
    if seeds.is_empty() {
        return Err(ApiError::BadRequest(
            "Could not get track information".to_string(),
        ));
    }

    recommend_from_seeds(&state, &client, &seeds).await
}

/// Handles `GET /enhance-playlist`.
///
/// Seeds come from the first [`MAX_PLAYLIST_SEEDS`] usable tracks of the
/// playlist. Later pages are never fetched.
///
/// # Errors
///
/// - [`ApiError::BadRequest`] when a parameter is missing or the playlist has
///   no usable tracks
/// - [`ApiError::NotFound`] when none of the suggestions resolve on Spotify
pub async fn enhance_playlist(
    Query(params): Query<EnhancePlaylistParams>,
    Extension(state): Extension<SharedState>,
) -> Result<Json<RecommendationsResponse>, ApiError> {
    let (Some(user_id), Some(playlist_id)) = (
        non_blank(&params.spotify_user_id),
        non_blank(&params.playlist_id),
    ) else {
        return Err(missing_parameters());
    };

    let client = state.spotify_for(user_id).await?;
    let seeds: Vec<SeedTrack> = client
        .playlist_tracks(playlist_id, MAX_PLAYLIST_SEEDS)
        .await?
        .into_iter()
        .map(|track| {
            let track = CatalogTrack::from(track);
            SeedTrack {
                name: track.name,
                artist: track.primary_artist,
            }
        })
        .collect();

    if seeds.is_empty() {
        return Err(ApiError::BadRequest("Playlist is empty".to_string()));
    }

    recommend_from_seeds(&state, &client, &seeds).await
}
