use reqwest::Client;
use tabled::Table;

use super::spinner;
use crate::{
    error, info,
    llm::GroqClient,
    management::TokenManager,
    matching::{PlaylistMatch, TrackResolver, normalize},
    recommend::{self, MAX_SEEDS},
    spotify::SpotifyClient,
    success,
    types::{CatalogTrack, RecommendationTableRow, UnmatchedTableRow},
    warning, youtube,
};

/// Converts a YouTube playlist into a private Spotify playlist.
///
/// With `recommend`, up to [`MAX_SEEDS`] matched tracks seed an LLM request
/// and the suggestions found on Spotify are appended. With `dry_run` nothing
/// is written to Spotify.
pub async fn convert(yt_playlist_id: &str, name: Option<String>, recommend: bool, dry_run: bool) {
    let http = Client::new();

    let mut token_mgr = match TokenManager::load().await {
        Ok(manager) => manager,
        Err(e) => error!("No token found, run `musikai auth` first. Err: {}", e),
    };
    let token = match token_mgr.get_valid_token(&http).await {
        Ok(token) => token,
        Err(e) => error!("Cannot get a valid token: {}", e),
    };
    let client = SpotifyClient::new(http.clone(), token);

    let pb = spinner("Fetching YouTube playlist...");
    let titles = youtube::playlist_titles(&http, yt_playlist_id).await;
    pb.finish_and_clear();
    let titles = match titles {
        Ok(titles) if titles.is_empty() => {
            warning!("YouTube playlist {} has no videos", yt_playlist_id);
            return;
        }
        Ok(titles) => titles,
        Err(e) => error!("Failed to read YouTube playlist: {}", e),
    };
    info!("Found {} videos", titles.len());

    let pb = spinner(format!("Matching {} titles on Spotify...", titles.len()));
    let result = TrackResolver::new(&client).resolve_playlist(&titles).await;
    pb.finish_and_clear();
    let result = match result {
        Ok(result) => result,
        Err(e) => error!("Matching aborted: {}", e),
    };

    success!("Matched {}/{} tracks", result.matched.len(), result.total());
    print_unmatched(&result);

    let mut uris = result.matched.clone();
    if recommend {
        for track in recommendations(&client, &result).await {
            if !uris.contains(&track.uri) {
                uris.push(track.uri);
            }
        }
    }

    if dry_run {
        info!("Dry run, no playlist created");
        return;
    }

    if uris.is_empty() {
        warning!("No tracks to add, playlist not created");
        return;
    }

    let user = match client.current_user().await {
        Ok(user) => user,
        Err(e) => error!("Failed to get Spotify user: {}", e),
    };

    let playlist_name = name.unwrap_or_else(|| format!("From YouTube {}", yt_playlist_id));
    let description = format!("Converted from YouTube playlist {}", yt_playlist_id);
    let playlist = match client
        .create_playlist(&user.id, &playlist_name, &description)
        .await
    {
        Ok(playlist) => playlist,
        Err(e) => error!("Failed to create playlist: {}", e),
    };

    if let Err(e) = client.add_tracks(&playlist.id, &uris).await {
        error!("Playlist {} was created but adding tracks failed: {}", playlist_name, e);
    }

    success!(
        "Created playlist {} with {} tracks{}",
        playlist_name,
        uris.len(),
        playlist
            .external_urls
            .spotify
            .map(|url| format!(": {}", url))
            .unwrap_or_default()
    );
}

fn print_unmatched(result: &PlaylistMatch) {
    if result.unmatched.is_empty() {
        return;
    }

    let rows: Vec<UnmatchedTableRow> = result
        .unmatched
        .iter()
        .map(|title| UnmatchedTableRow {
            title: title.clone(),
            normalized: normalize(title),
        })
        .collect();

    warning!("{} titles had no match", rows.len());
    println!("{}", Table::new(rows));
}

/// LLM suggestions found on Spotify. Failures only warn.
async fn recommendations(client: &SpotifyClient, result: &PlaylistMatch) -> Vec<CatalogTrack> {
    let llm = match GroqClient::from_env() {
        Ok(llm) => llm,
        Err(e) => {
            warning!("Skipping recommendations: {}", e);
            return Vec::new();
        }
    };

    let seed_uris: Vec<String> = result.matched.iter().take(MAX_SEEDS).cloned().collect();
    let seeds = match client.seed_tracks(&seed_uris).await {
        Ok(seeds) => seeds,
        Err(e) => {
            warning!("Could not get seed tracks: {}", e);
            return Vec::new();
        }
    };

    let pb = spinner("Asking for recommendations...");
    let tracks = recommend::recommend_tracks(&seeds, &llm, client).await;
    pb.finish_and_clear();

    match tracks {
        Ok(tracks) => {
            let rows: Vec<RecommendationTableRow> = tracks
                .iter()
                .map(|t| RecommendationTableRow {
                    name: t.name.clone(),
                    artists: t.artists.join(", "),
                    album: t.album.clone().unwrap_or_default(),
                })
                .collect();
            success!("{} recommendations found on Spotify", rows.len());
            println!("{}", Table::new(rows));
            tracks
        }
        Err(e) => {
            warning!("Recommendations failed: {}", e);
            Vec::new()
        }
    }
}
