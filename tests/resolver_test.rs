use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use musikai::{
    errors::{CatalogError, MatchError},
    matching::{MatchResult, PlaylistMatch, TrackCatalog, TrackResolver},
    spotify::classify_status,
    types::{CatalogTrack, RecommendationCandidate},
};
use reqwest::StatusCode;

/// Catalog that answers from a script and records every query it receives.
/// Queries without a scripted answer find nothing.
#[derive(Default)]
struct FakeCatalog {
    answers: HashMap<String, Result<Option<CatalogTrack>, CatalogError>>,
    queries: Mutex<Vec<String>>,
}

impl FakeCatalog {
    fn with(mut self, query: &str, answer: Result<Option<CatalogTrack>, CatalogError>) -> Self {
        self.answers.insert(query.to_string(), answer);
        self
    }

    fn found(self, query: &str, id: &str) -> Self {
        self.with(query, Ok(Some(track(id))))
    }

    fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackCatalog for FakeCatalog {
    async fn search_track(&self, query: &str) -> Result<Option<CatalogTrack>, CatalogError> {
        self.queries.lock().unwrap().push(query.to_string());
        self.answers.get(query).cloned().unwrap_or(Ok(None))
    }
}

fn track(id: &str) -> CatalogTrack {
    CatalogTrack {
        id: id.to_string(),
        uri: format!("spotify:track:{}", id),
        name: format!("Track {}", id),
        primary_artist: "Artist".to_string(),
        artists: vec!["Artist".to_string()],
        album: None,
        image: None,
    }
}

fn titles(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_fallback_stops_at_first_hit() {
    let catalog = FakeCatalog::default().found("One More Time", "1");
    let resolver = TrackResolver::new(&catalog);

    let result = resolver.resolve("Daft Punk - One More Time").await.unwrap();

    assert_eq!(result, MatchResult::Matched("spotify:track:1".to_string()));
    assert_eq!(
        catalog.queries(),
        vec!["artist:Daft Punk track:One More Time", "One More Time"]
    );
}

#[tokio::test]
async fn test_exhausted_attempts_leave_title_unmatched_and_batch_continues() {
    let catalog =
        FakeCatalog::default().found("artist:Daft Punk track:One More Time", "1");
    let resolver = TrackResolver::new(&catalog);

    let result = resolver
        .resolve_playlist(&titles(&[
            "Unknown Band - Lost Song",
            "Daft Punk - One More Time",
        ]))
        .await
        .unwrap();

    assert_eq!(
        result,
        PlaylistMatch {
            matched: vec!["spotify:track:1".to_string()],
            unmatched: vec!["Unknown Band - Lost Song".to_string()],
        }
    );
    assert_eq!(
        catalog.queries(),
        vec![
            "artist:Unknown Band track:Lost Song",
            "Lost Song",
            "Unknown Band - Lost Song",
            "artist:Daft Punk track:One More Time",
        ]
    );
}

#[tokio::test]
async fn test_transient_error_marks_title_unmatched() {
    let catalog = FakeCatalog::default()
        .with(
            "artist:Band track:Song",
            Err(CatalogError::Transient("rate limited".to_string())),
        )
        .found("artist:Other track:Hit", "2");
    let resolver = TrackResolver::new(&catalog);

    let result = resolver
        .resolve_playlist(&titles(&["Band - Song", "Other - Hit"]))
        .await
        .unwrap();

    assert_eq!(result.matched, vec!["spotify:track:2"]);
    assert_eq!(result.unmatched, vec!["Band - Song"]);
    assert_eq!(
        catalog.queries(),
        vec!["artist:Band track:Song", "artist:Other track:Hit"]
    );
}

#[tokio::test]
async fn test_systemic_error_aborts_batch() {
    let catalog = FakeCatalog::default().with(
        "artist:Band track:Song",
        Err(CatalogError::Systemic("authorization rejected".to_string())),
    );
    let resolver = TrackResolver::new(&catalog);

    let result = resolver
        .resolve_playlist(&titles(&["Band - Song", "Other - Hit"]))
        .await;

    assert!(matches!(
        result,
        Err(MatchError::Catalog(CatalogError::Systemic(_)))
    ));
    assert_eq!(catalog.queries(), vec!["artist:Band track:Song"]);
}

#[tokio::test]
async fn test_blank_title_makes_no_calls() {
    let catalog = FakeCatalog::default();
    let resolver = TrackResolver::new(&catalog);

    let result = resolver.resolve("   ").await.unwrap();

    assert_eq!(result, MatchResult::Unmatched("   ".to_string()));
    assert!(catalog.queries().is_empty());
}

#[tokio::test]
async fn test_unparsed_unchanged_title_makes_no_calls() {
    let catalog = FakeCatalog::default();
    let resolver = TrackResolver::new(&catalog);

    let result = resolver.resolve("Just A Title").await.unwrap();

    assert_eq!(result, MatchResult::Unmatched("Just A Title".to_string()));
    assert!(catalog.queries().is_empty());
}

#[tokio::test]
async fn test_unparsed_tagged_title_searches_original() {
    let catalog = FakeCatalog::default().found("Just A Title [HD]", "3");
    let resolver = TrackResolver::new(&catalog);

    let result = resolver.resolve("Just A Title [HD]").await.unwrap();

    assert_eq!(result, MatchResult::Matched("spotify:track:3".to_string()));
    assert_eq!(catalog.queries(), vec!["Just A Title [HD]"]);
}

#[tokio::test]
async fn test_playlist_keeps_input_order() {
    let catalog = FakeCatalog::default()
        .found("artist:A1 track:S1", "1")
        .found("artist:A3 track:S3", "3")
        .found("artist:A5 track:S5", "5");
    let resolver = TrackResolver::new(&catalog);

    let result = resolver
        .resolve_playlist(&titles(&[
            "A5 - S5", "A4 - S4", "A1 - S1", "A2 - S2", "A3 - S3",
        ]))
        .await
        .unwrap();

    assert_eq!(
        result.matched,
        vec!["spotify:track:5", "spotify:track:1", "spotify:track:3"]
    );
    assert_eq!(result.unmatched, vec!["A4 - S4", "A2 - S2"]);
    assert_eq!(result.total(), 5);
}

#[tokio::test]
async fn test_empty_playlist_is_invalid_input() {
    let catalog = FakeCatalog::default();
    let resolver = TrackResolver::new(&catalog);

    let result = resolver.resolve_playlist(&[]).await;

    assert!(matches!(result, Err(MatchError::InvalidInput(_))));
    assert!(catalog.queries().is_empty());
}

#[tokio::test]
async fn test_resolve_candidates_skips_missing_and_transient() {
    let catalog = FakeCatalog::default()
        .found("One More Time Daft Punk", "1")
        .with(
            "Flaky Song Flaky Band",
            Err(CatalogError::Transient("timeout".to_string())),
        );
    let resolver = TrackResolver::new(&catalog);

    let candidates = vec![
        RecommendationCandidate {
            name: "One More Time".to_string(),
            artist: "Daft Punk".to_string(),
        },
        RecommendationCandidate {
            name: "Nope".to_string(),
            artist: "Nobody".to_string(),
        },
        RecommendationCandidate {
            name: "Flaky Song".to_string(),
            artist: "Flaky Band".to_string(),
        },
    ];

    let found = resolver.resolve_candidates(&candidates).await.unwrap();

    assert_eq!(found, vec![track("1")]);
    assert_eq!(
        catalog.queries(),
        vec![
            "One More Time Daft Punk",
            "Nope Nobody",
            "Flaky Song Flaky Band"
        ]
    );
}

#[tokio::test]
async fn test_resolve_candidates_stops_on_systemic_error() {
    let catalog = FakeCatalog::default().with(
        "Song Band",
        Err(CatalogError::Systemic("quota exhausted".to_string())),
    );
    let resolver = TrackResolver::new(&catalog);

    let candidates = vec![
        RecommendationCandidate {
            name: "Song".to_string(),
            artist: "Band".to_string(),
        },
        RecommendationCandidate {
            name: "Other".to_string(),
            artist: "Band".to_string(),
        },
    ];

    let result = resolver.resolve_candidates(&candidates).await;

    assert!(matches!(result, Err(CatalogError::Systemic(_))));
    assert_eq!(catalog.queries(), vec!["Song Band"]);
}

#[test]
fn test_classify_status() {
    assert!(classify_status(StatusCode::UNAUTHORIZED, None).is_systemic());
    assert!(classify_status(StatusCode::FORBIDDEN, None).is_systemic());
    assert!(!classify_status(StatusCode::TOO_MANY_REQUESTS, None).is_systemic());
    assert!(!classify_status(StatusCode::TOO_MANY_REQUESTS, Some(30)).is_systemic());
    assert!(!classify_status(StatusCode::TOO_MANY_REQUESTS, Some(120)).is_systemic());
    assert!(classify_status(StatusCode::TOO_MANY_REQUESTS, Some(121)).is_systemic());
    assert!(!classify_status(StatusCode::INTERNAL_SERVER_ERROR, None).is_systemic());
    assert!(!classify_status(StatusCode::BAD_GATEWAY, Some(600)).is_systemic());
}
