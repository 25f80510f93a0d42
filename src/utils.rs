use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use sha2::{Digest, Sha256};

fn random_alphanumeric(len: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

pub fn generate_code_verifier() -> String {
    random_alphanumeric(128)
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Opaque OAuth `state` value that keys a pending login.
pub fn generate_state() -> String {
    random_alphanumeric(32)
}

/// Splits a comma separated list, dropping blank entries.
pub fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Bare track ID from either `spotify:track:<id>` or a plain ID.
pub fn track_id_from_uri(uri: &str) -> &str {
    uri.strip_prefix("spotify:track:").unwrap_or(uri)
}

/// A minimal plausibility check for an email address.
pub fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();
    !email.is_empty() && email.contains('@') && email.contains('.')
}
