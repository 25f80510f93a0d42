use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use axum::{
    Extension, Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use musikai::{errors::CatalogError, matching::TrackCatalog, spotify::SpotifyClient};
use reqwest::Client;
use serde_json::{Value, json};

/// Tracks in the stubbed long playlist.
const LONG_PLAYLIST_LEN: usize = 1000;

#[derive(Clone)]
struct Stub {
    base: String,
    playlist_pages: Arc<AtomicUsize>,
}

fn track_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Track {}", id),
        "uri": format!("spotify:track:{}", id),
        "artists": [{ "name": "Artist" }],
        "album": { "name": "Album", "images": [{ "url": "http://img/1" }] }
    })
}

async fn search(Query(params): Query<HashMap<String, String>>) -> Response {
    match params.get("q").map(String::as_str) {
        Some("nothing") => Json(json!({ "tracks": { "items": [] } })).into_response(),
        Some("quota") => {
            (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "600")], "quota").into_response()
        }
        Some("burst") => {
            (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "5")], "slow down").into_response()
        }
        Some("revoked") => (StatusCode::UNAUTHORIZED, "revoked").into_response(),
        Some("garbage") => (StatusCode::OK, "<html>maintenance</html>").into_response(),
        _ => Json(json!({ "tracks": { "items": [track_json("1")] } })).into_response(),
    }
}

async fn playlist_tracks(
    Extension(stub): Extension<Stub>,
    Path(playlist_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    stub.playlist_pages.fetch_add(1, Ordering::SeqCst);

    let offset: usize = params
        .get("offset")
        .and_then(|o| o.parse().ok())
        .unwrap_or(0);
    let limit: usize = params
        .get("limit")
        .and_then(|l| l.parse().ok())
        .unwrap_or(50);
    let end = (offset + limit).min(LONG_PLAYLIST_LEN);

    let items: Vec<Value> = (offset..end)
        .map(|i| {
            if i == 0 && playlist_id == "with-local" {
                json!({ "track": { "id": null, "name": "Local", "uri": "spotify:local:x", "artists": [] } })
            } else {
                json!({ "track": track_json(&i.to_string()) })
            }
        })
        .collect();
    let next = (end < LONG_PLAYLIST_LEN).then(|| {
        format!(
            "{}/playlists/{}/tracks?offset={}&limit={}",
            stub.base, playlist_id, end, limit
        )
    });

    Json(json!({ "items": items, "next": next }))
}

async fn add_tracks(Json(body): Json<Value>) -> Response {
    let failing = body["uris"]
        .as_array()
        .is_some_and(|uris| uris.iter().any(|u| u == "spotify:track:fail"));

    if failing {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    Json(json!({ "snapshot_id": "snap" })).into_response()
}

/// Serves a stubbed Spotify Web API and returns a client bound to it.
async fn spawn_stub() -> (SpotifyClient, Stub) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let stub = Stub {
        base: base.clone(),
        playlist_pages: Arc::new(AtomicUsize::new(0)),
    };

    let app = Router::new()
        .route("/search", get(search))
        .route("/playlists/{id}/tracks", get(playlist_tracks).post(add_tracks))
        .layer(Extension(stub.clone()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = SpotifyClient::with_api_url(Client::new(), "token", base);
    (client, stub)
}

#[tokio::test]
async fn test_search_returns_first_track() {
    let (client, _) = spawn_stub().await;

    let track = client.search_track("artist:Artist track:Track 1").await.unwrap();

    let track = track.expect("track should be found");
    assert_eq!(track.uri, "spotify:track:1");
    assert_eq!(track.primary_artist, "Artist");
    assert_eq!(track.album.as_deref(), Some("Album"));
    assert_eq!(track.image.as_deref(), Some("http://img/1"));
}

#[tokio::test]
async fn test_search_without_items_is_none() {
    let (client, _) = spawn_stub().await;

    assert_eq!(client.search_track("nothing").await, Ok(None));
}

#[tokio::test]
async fn test_long_retry_after_is_systemic() {
    let (client, _) = spawn_stub().await;

    let err = client.search_track("quota").await.unwrap_err();

    assert!(err.is_systemic(), "{:?}", err);
}

#[tokio::test]
async fn test_short_retry_after_is_transient() {
    let (client, _) = spawn_stub().await;

    let err = client.search_track("burst").await.unwrap_err();

    assert!(matches!(err, CatalogError::Transient(_)), "{:?}", err);
}

#[tokio::test]
async fn test_unauthorized_is_systemic() {
    let (client, _) = spawn_stub().await;

    let err = client.search_track("revoked").await.unwrap_err();

    assert!(err.is_systemic(), "{:?}", err);
}

#[tokio::test]
async fn test_undecodable_body_is_transient() {
    let (client, _) = spawn_stub().await;

    let err = client.search_track("garbage").await.unwrap_err();

    assert!(matches!(err, CatalogError::Transient(_)), "{:?}", err);
}

#[tokio::test]
async fn test_playlist_tracks_stops_at_limit() {
    let (client, stub) = spawn_stub().await;

    let tracks = client.playlist_tracks("long", 20).await.unwrap();

    assert_eq!(tracks.len(), 20);
    assert_eq!(tracks[0].uri, "spotify:track:0");
    assert_eq!(stub.playlist_pages.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_playlist_tracks_follows_pages_until_limit() {
    let (client, stub) = spawn_stub().await;

    let tracks = client.playlist_tracks("long", 120).await.unwrap();

    assert_eq!(tracks.len(), 120);
    assert_eq!(tracks[119].uri, "spotify:track:119");
    assert_eq!(stub.playlist_pages.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_playlist_tracks_skips_local_files() {
    let (client, stub) = spawn_stub().await;

    let tracks = client.playlist_tracks("with-local", 20).await.unwrap();

    assert_eq!(tracks.len(), 20);
    assert!(tracks.iter().all(|t| t.id.is_some()));
    assert_eq!(tracks[0].uri, "spotify:track:1");
    assert_eq!(tracks[19].uri, "spotify:track:20");
    assert_eq!(stub.playlist_pages.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_playlist_tracks_zero_limit_makes_no_request() {
    let (client, stub) = spawn_stub().await;

    assert!(client.playlist_tracks("long", 0).await.unwrap().is_empty());
    assert_eq!(stub.playlist_pages.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_add_tracks_in_chunks() {
    let (client, _) = spawn_stub().await;
    let uris: Vec<String> = (0..250).map(|i| format!("spotify:track:{}", i)).collect();

    let snapshot = client.add_tracks("target", &uris).await.unwrap();

    assert_eq!(snapshot.as_deref(), Some("snap"));
}

#[tokio::test]
async fn test_add_tracks_failure_names_partly_filled_playlist() {
    let (client, _) = spawn_stub().await;
    let mut uris: Vec<String> = (0..150).map(|i| format!("spotify:track:{}", i)).collect();
    uris[120] = "spotify:track:fail".to_string();

    let err = client.add_tracks("target", &uris).await.unwrap_err();

    let message = err.to_string();
    assert!(matches!(err, CatalogError::Transient(_)), "{:?}", err);
    assert!(message.contains("playlist target holds 100 of 150 tracks"), "{}", message);
}
