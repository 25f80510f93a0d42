use async_trait::async_trait;
use serde::Serialize;

use super::{ParsedQuery, parse};
use crate::{
    errors::{CatalogError, MatchError},
    types::{CatalogTrack, RecommendationCandidate},
};

/// Track search against an external catalog, one round trip per call.
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    async fn search_track(&self, query: &str) -> Result<Option<CatalogTrack>, CatalogError>;
}

/// One catalog query in the fallback chain of a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAttempt {
    /// Field-scoped query, lowest false-positive rate.
    ArtistAndTrack { artist: String, track: String },
    TrackOnly(String),
    OriginalTitle(String),
}

impl SearchAttempt {
    pub fn query(&self) -> String {
        match self {
            SearchAttempt::ArtistAndTrack { artist, track } => {
                format!("artist:{} track:{}", artist, track)
            }
            SearchAttempt::TrackOnly(track) => track.clone(),
            SearchAttempt::OriginalTitle(title) => title.clone(),
        }
    }
}

/// Derives the ordered attempts for a raw title (at most three).
///
/// The artist-scoped and track-only queries need a parsed artist; the original
/// title is only retried when parsing or normalization changed something.
/// Blank titles yield no attempts at all.
pub fn search_attempts(raw: &str) -> Vec<SearchAttempt> {
    if raw.trim().is_empty() {
        return Vec::new();
    }

    let ParsedQuery { artist, track } = parse(raw);
    let mut attempts = Vec::with_capacity(3);
    let parsed = artist.is_some();

    if let Some(artist) = artist {
        attempts.push(SearchAttempt::ArtistAndTrack {
            artist,
            track: track.clone(),
        });
        attempts.push(SearchAttempt::TrackOnly(track.clone()));
    }

    if parsed || track != raw {
        attempts.push(SearchAttempt::OriginalTitle(raw.to_string()));
    }

    attempts
}

/// Terminal outcome for one title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// Catalog URI of the matched track.
    Matched(String),
    /// The original title.
    Unmatched(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlaylistMatch {
    pub matched: Vec<String>,
    pub unmatched: Vec<String>,
}

impl PlaylistMatch {
    pub fn total(&self) -> usize {
        self.matched.len() + self.unmatched.len()
    }

    fn push(&mut self, result: MatchResult) {
        match result {
            MatchResult::Matched(uri) => self.matched.push(uri),
            MatchResult::Unmatched(title) => self.unmatched.push(title),
        }
    }
}

/// Resolves video titles to catalog tracks with progressively looser queries.
pub struct TrackResolver<'a, C: TrackCatalog + ?Sized> {
    catalog: &'a C,
}

impl<'a, C: TrackCatalog + ?Sized> TrackResolver<'a, C> {
    pub fn new(catalog: &'a C) -> Self {
        Self { catalog }
    }

    /// Resolves a single title.
    ///
    /// A transient catalog error ends this title as unmatched; a systemic one
    /// is returned to the caller.
    pub async fn resolve(&self, raw: &str) -> Result<MatchResult, MatchError> {
        if raw.trim().is_empty() {
            log::warn!("Skipping blank title");
            return Ok(MatchResult::Unmatched(raw.to_string()));
        }

        // An unparsed title that normalization left untouched has no applicable
        // attempt and ends unmatched without a round trip.
        for attempt in search_attempts(raw) {
            let query = attempt.query();
            log::debug!("Searching {:?}: {}", attempt, query);

            match self.catalog.search_track(&query).await {
                Ok(Some(found)) => {
                    log::debug!("Found '{}' by '{}' for '{}'", found.name, found.primary_artist, raw);
                    return Ok(MatchResult::Matched(found.uri));
                }
                Ok(None) => continue,
                Err(CatalogError::Transient(reason)) => {
                    log::warn!("Search failed for '{}': {}", raw, reason);
                    return Ok(MatchResult::Unmatched(raw.to_string()));
                }
                Err(err) => return Err(err.into()),
            }
        }

        log::debug!("No match found for '{}'", raw);
        Ok(MatchResult::Unmatched(raw.to_string()))
    }

    /// Resolves titles one after another, keeping input order in both lists.
    pub async fn resolve_playlist(&self, titles: &[String]) -> Result<PlaylistMatch, MatchError> {
        if titles.is_empty() {
            return Err(MatchError::InvalidInput("no titles to resolve".to_string()));
        }

        let mut result = PlaylistMatch::default();
        for title in titles {
            result.push(self.resolve(title).await?);
        }

        log::info!("Matched {}/{} tracks", result.matched.len(), result.total());
        Ok(result)
    }

    /// Looks up LLM candidates with a single `"name artist"` query each.
    ///
    /// Candidates that are not found, or whose search fails transiently, are
    /// dropped.
    pub async fn resolve_candidates(
        &self,
        candidates: &[RecommendationCandidate],
    ) -> Result<Vec<CatalogTrack>, CatalogError> {
        let mut found = Vec::new();

        for candidate in candidates {
            let query = format!("{} {}", candidate.name, candidate.artist);
            match self.catalog.search_track(&query).await {
                Ok(Some(track)) => found.push(track),
                Ok(None) => log::debug!("No catalog match for '{}'", query),
                Err(CatalogError::Transient(reason)) => {
                    log::warn!("Error searching for '{}': {}", candidate.name, reason)
                }
                Err(err) => return Err(err),
            }
        }

        Ok(found)
    }
}
