use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// A login that was started but whose callback has not arrived yet.
#[derive(Debug, Clone)]
pub struct PendingLogin {
    pub code_verifier: String,
}

#[derive(Debug, Clone)]
pub struct UserSession {
    pub user_id: String,
    pub token: Token,
}

/// Track as returned by a catalog search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogTrack {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub primary_artist: String,
    pub artists: Vec<String>,
    pub album: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTrack {
    pub name: String,
    pub artist: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationCandidate {
    pub name: String,
    pub artist: String,
}

#[derive(Tabled)]
pub struct RecommendationTableRow {
    pub name: String,
    pub artists: String,
    pub album: String,
}

#[derive(Tabled)]
pub struct UnmatchedTableRow {
    pub title: String,
    pub normalized: String,
}

// Spotify Web API payloads

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyUser {
    pub id: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: TrackPage,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Track {
    /// `null` for local files.
    pub id: Option<String>,
    pub name: String,
    pub uri: String,
    #[serde(default)]
    pub artists: Vec<TrackArtist>,
    pub album: Option<TrackAlbum>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackArtist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackAlbum {
    pub name: String,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl From<Track> for CatalogTrack {
    fn from(track: Track) -> Self {
        let artists: Vec<String> = track.artists.into_iter().map(|a| a.name).collect();
        Self {
            id: track.id.unwrap_or_default(),
            uri: track.uri,
            name: track.name,
            primary_artist: artists.first().cloned().unwrap_or_default(),
            artists,
            image: track
                .album
                .as_ref()
                .and_then(|a| a.images.first().map(|i| i.url.clone())),
            album: track.album.map(|a| a.name),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
    pub name: String,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GetUserPlaylistsResponse {
    pub items: Vec<Playlist>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistTrackCount {
    pub total: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub tracks: Option<PlaylistTrackCount>,
    #[serde(default)]
    pub images: Option<Vec<Image>>,
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaylistSummary {
    pub id: String,
    pub name: String,
    pub tracks_count: u64,
    pub image: Option<String>,
    pub external_url: Option<String>,
}

impl From<Playlist> for PlaylistSummary {
    fn from(playlist: Playlist) -> Self {
        Self {
            id: playlist.id,
            name: playlist.name,
            tracks_count: playlist.tracks.map_or(0, |t| t.total),
            image: playlist
                .images
                .and_then(|images| images.into_iter().next().map(|i| i.url)),
            external_url: playlist.external_urls.spotify,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItemsResponse {
    pub items: Vec<PlaylistItem>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    pub track: Option<Track>,
}

// YouTube Data API payloads

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: Vec<YoutubePlaylistItem>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct YoutubePlaylistItem {
    pub snippet: Option<Snippet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Snippet {
    pub title: Option<String>,
}
