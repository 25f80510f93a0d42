//! LLM-backed playlist recommendations.
//!
//! [`build_prompt`] turns seed tracks into a curator prompt, a [`ChatCompletion`]
//! backend answers it, and [`parse_response`] turns the reply into clean
//! [`RecommendationCandidate`]s. Candidates are then looked up in the catalog
//! with one query each (see [`recommend_tracks`]).

mod prompt;
mod response;

use std::time::Duration;

use async_trait::async_trait;

pub use prompt::{MAX_SEEDS, SYSTEM_PROMPT, build_prompt, select_seeds};
pub use response::{MAX_RECOMMENDATIONS, ResponseShape, WRAPPER_KEYS, classify, parse_response};

use crate::{
    errors::{LlmError, RecommendationError},
    matching::{TrackCatalog, TrackResolver},
    types::{CatalogTrack, RecommendationCandidate, SeedTrack},
};

/// Upper bound for one LLM round trip. Exceeding it fails the request.
pub const LLM_TIMEOUT: Duration = Duration::from_secs(30);

/// Text completion against an LLM backend.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete_chat(&self, prompt: &str, system_prompt: &str) -> Result<String, LlmError>;
}

pub async fn build_recommendations<L: ChatCompletion + ?Sized>(
    seeds: &[SeedTrack],
    llm: &L,
) -> Result<Vec<RecommendationCandidate>, RecommendationError> {
    build_recommendations_within(seeds, llm, LLM_TIMEOUT).await
}

/// Same as [`build_recommendations`] with an explicit LLM timeout.
pub async fn build_recommendations_within<L: ChatCompletion + ?Sized>(
    seeds: &[SeedTrack],
    llm: &L,
    timeout: Duration,
) -> Result<Vec<RecommendationCandidate>, RecommendationError> {
    if seeds.is_empty() {
        return Err(RecommendationError::InvalidInput(
            "no seed tracks provided".to_string(),
        ));
    }

    let prompt = build_prompt(seeds);
    log::info!(
        "Requesting recommendations for {} seed tracks",
        select_seeds(seeds).len()
    );

    let raw = tokio::time::timeout(timeout, llm.complete_chat(&prompt, SYSTEM_PROMPT))
        .await
        .map_err(|_| RecommendationError::Timeout(timeout.as_secs()))??;

    let candidates = parse_response(&raw)?;
    log::info!("LLM suggested {} tracks", candidates.len());
    Ok(candidates)
}

/// Builds recommendations and looks each candidate up in the catalog.
pub async fn recommend_tracks<L, C>(
    seeds: &[SeedTrack],
    llm: &L,
    catalog: &C,
) -> Result<Vec<CatalogTrack>, RecommendationError>
where
    L: ChatCompletion + ?Sized,
    C: TrackCatalog + ?Sized,
{
    let candidates = build_recommendations(seeds, llm).await?;
    let tracks = TrackResolver::new(catalog)
        .resolve_candidates(&candidates)
        .await?;

    log::info!("Found {} recommendations in the catalog", tracks.len());
    Ok(tracks)
}
