use serde_json::Value;

use crate::{errors::RecommendationError, types::RecommendationCandidate};

pub const MAX_RECOMMENDATIONS: usize = 15;

/// Keys an LLM may wrap its list under, checked in this order.
pub const WRAPPER_KEYS: [&str; 4] = ["recommendations", "songs", "tracks", "playlist"];

/// Example values from the prompt format that models sometimes echo back.
const PLACEHOLDER: (&str, &str) = ("Song Title", "Artist Name");

/// Top-level shape of a decoded LLM reply.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    List(Vec<Value>),
    WrappedUnderKey(&'static str, Vec<Value>),
    Malformed(String),
}

pub fn classify(value: Value) -> ResponseShape {
    match value {
        Value::Array(items) => ResponseShape::List(items),
        Value::Object(mut map) => {
            let Some(key) = WRAPPER_KEYS.into_iter().find(|k| map.contains_key(*k)) else {
                return ResponseShape::Malformed("object has no recommendation list".to_string());
            };
            match map.remove(key) {
                Some(Value::Array(items)) => ResponseShape::WrappedUnderKey(key, items),
                _ => ResponseShape::Malformed(format!("'{}' is not a list", key)),
            }
        }
        other => ResponseShape::Malformed(format!("expected a list or object, got {}", other)),
    }
}

/// Parses raw LLM text into at most [`MAX_RECOMMENDATIONS`] candidates.
///
/// Nested lists are flattened one level. Items without string `name` and
/// `artist` fields, and the placeholder pair, are dropped. Order is kept.
pub fn parse_response(raw: &str) -> Result<Vec<RecommendationCandidate>, RecommendationError> {
    let value: Value = serde_json::from_str(raw)
        .map_err(|e| RecommendationError::MalformedResponse(e.to_string()))?;

    let items = match classify(value) {
        ResponseShape::List(items) => items,
        ResponseShape::WrappedUnderKey(key, items) => {
            log::debug!("Unwrapped recommendations from '{}'", key);
            items
        }
        ResponseShape::Malformed(reason) => {
            return Err(RecommendationError::MalformedResponse(reason));
        }
    };

    let candidates: Vec<RecommendationCandidate> = items
        .iter()
        .flat_map(|item| match item {
            Value::Array(inner) => inner.iter().collect::<Vec<_>>(),
            other => vec![other],
        })
        .filter_map(candidate)
        .take(MAX_RECOMMENDATIONS)
        .collect();

    if candidates.is_empty() {
        return Err(RecommendationError::EmptyRecommendations);
    }

    Ok(candidates)
}

fn candidate(item: &Value) -> Option<RecommendationCandidate> {
    let name = item.get("name")?.as_str()?;
    let artist = item.get("artist")?.as_str()?;

    if (name, artist) == PLACEHOLDER {
        return None;
    }

    Some(RecommendationCandidate {
        name: name.to_string(),
        artist: artist.to_string(),
    })
}
