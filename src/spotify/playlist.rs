use super::{SpotifyClient, decode, send};
use crate::{
    errors::CatalogError,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, GetUserPlaylistsResponse, PlaylistItemsResponse, PlaylistSummary,
        Track,
    },
};

/// Spotify accepts at most this many URIs per add request.
const ADD_TRACKS_CHUNK: usize = 100;

/// Largest page Spotify serves for playlist listings.
const PAGE_SIZE: usize = 50;

impl SpotifyClient {
    /// Fetches all playlists of the current user.
    ///
    /// Follows the `next` links of `GET /me/playlists` until the last page.
    ///
    /// # Returns
    ///
    /// One [`PlaylistSummary`] per playlist, in the order Spotify lists them.
    ///
    /// # Errors
    ///
    /// Returns the [`CatalogError`] of the first page request that fails.
    pub async fn user_playlists(&self) -> Result<Vec<PlaylistSummary>, CatalogError> {
        let mut playlists = Vec::new();
        let page_size = PAGE_SIZE.to_string();
        let mut request = self
            .get("/me/playlists")
            .query(&[("limit", page_size.as_str())]);

        loop {
            let page: GetUserPlaylistsResponse = decode(send(request).await?).await?;
            playlists.extend(page.items.into_iter().map(PlaylistSummary::from));

            match page.next {
                Some(next) => request = self.get_absolute(&next),
                None => break,
            }
        }

        log::info!("Fetched {} playlists", playlists.len());
        Ok(playlists)
    }

    /// Fetches the first `limit` tracks of a playlist.
    ///
    /// Local files and removed entries are skipped and do not count towards
    /// `limit`. Further pages are only requested while fewer than `limit`
    /// usable tracks have been collected, so a long playlist costs no more
    /// round trips than the caller needs.
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Spotify playlist ID
    /// * `limit` - Maximum number of tracks to return
    ///
    /// # Errors
    ///
    /// Returns the [`CatalogError`] of the first page request that fails.
    pub async fn playlist_tracks(
        &self,
        playlist_id: &str,
        limit: usize,
    ) -> Result<Vec<Track>, CatalogError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut tracks = Vec::with_capacity(limit);
        let page_size = limit.min(PAGE_SIZE).to_string();
        let mut request = self
            .get(&format!("/playlists/{}/tracks", playlist_id))
            .query(&[("limit", page_size.as_str())]);

        loop {
            let page: PlaylistItemsResponse = decode(send(request).await?).await?;
            tracks.extend(
                page.items
                    .into_iter()
                    .filter_map(|item| item.track)
                    .filter(|track| track.id.is_some() && !track.name.is_empty()),
            );

            match page.next {
                Some(next) if tracks.len() < limit => request = self.get_absolute(&next),
                _ => break,
            }
        }

        tracks.truncate(limit);
        Ok(tracks)
    }

    /// Creates a private playlist for a user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - Spotify user ID that will own the playlist
    /// * `name` - Playlist name
    /// * `description` - Playlist description shown in Spotify
    ///
    /// # Returns
    ///
    /// The created playlist, including its ID and external URL.
    pub async fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        description: &str,
    ) -> Result<CreatePlaylistResponse, CatalogError> {
        let request = self
            .post(&format!("/users/{}/playlists", user_id))
            .json(&CreatePlaylistRequest {
                name: name.to_string(),
                description: description.to_string(),
                public: false,
            });

        decode(send(request).await?).await
    }

    /// Adds tracks to a playlist in chunks of [`ADD_TRACKS_CHUNK`].
    ///
    /// # Arguments
    ///
    /// * `playlist_id` - Target playlist ID
    /// * `uris` - Track URIs in the order they should appear
    ///
    /// # Returns
    ///
    /// The snapshot ID after the last chunk, or `None` when `uris` is empty.
    ///
    /// # Errors
    ///
    /// Chunks are not rolled back. When a chunk fails, the error names the
    /// playlist and how many tracks it already holds.
    pub async fn add_tracks(
        &self,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<Option<String>, CatalogError> {
        let mut snapshot = None;
        let mut added = 0;

        for chunk in uris.chunks(ADD_TRACKS_CHUNK) {
            let request = self
                .post(&format!("/playlists/{}/tracks", playlist_id))
                .json(&AddTrackToPlaylistRequest {
                    uris: chunk.to_vec(),
                });

            let res: AddTrackToPlaylistResponse = match send(request).await {
                Ok(response) => decode(response).await,
                Err(e) => Err(e),
            }
            .map_err(|e| {
                log::error!(
                    "Playlist {} left with {} of {} tracks",
                    playlist_id,
                    added,
                    uris.len()
                );
                e.with_context(format!(
                    "playlist {} holds {} of {} tracks",
                    playlist_id,
                    added,
                    uris.len()
                ))
            })?;

            added += chunk.len();
            snapshot = Some(res.snapshot_id);
        }

        log::info!("Added {} tracks to playlist {}", uris.len(), playlist_id);
        Ok(snapshot)
    }
}
