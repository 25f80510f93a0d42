//! YouTube Data API v3: video titles of a playlist.

use reqwest::{Client, StatusCode};

use crate::{config, errors::YoutubeError, types::PlaylistItemListResponse};

/// Page size requested from `playlistItems.list` (the API maximum).
const PAGE_SIZE: &str = "50";

/// Fetches every video title of a playlist in playlist order.
///
/// Items without a title (deleted or private videos) are skipped.
pub async fn playlist_titles(http: &Client, playlist_id: &str) -> Result<Vec<String>, YoutubeError> {
    let playlist_id = playlist_id.trim();
    if playlist_id.is_empty() {
        return Err(YoutubeError::InvalidInput(
            "playlist_id cannot be empty".to_string(),
        ));
    }

    let api_key = config::youtube_api_key()?;
    let url = format!("{}/playlistItems", config::youtube_apiurl());

    let mut titles = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        let mut request = http.get(&url).query(&[
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", PAGE_SIZE),
            ("key", api_key.as_str()),
        ]);
        if let Some(token) = &page_token {
            request = request.query(&[("pageToken", token.as_str())]);
        }

        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => return Err(YoutubeError::NotFound(playlist_id.to_string())),
            StatusCode::FORBIDDEN => {
                return Err(YoutubeError::AccessDenied(playlist_id.to_string()));
            }
            _ => {}
        }

        let page = response
            .error_for_status()?
            .json::<PlaylistItemListResponse>()
            .await?;

        titles.extend(
            page.items
                .into_iter()
                .filter_map(|item| item.snippet.and_then(|s| s.title))
                .filter(|title| !title.is_empty()),
        );

        match page.next_page_token {
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    log::info!("Fetched {} videos from playlist {}", titles.len(), playlist_id);
    Ok(titles)
}
