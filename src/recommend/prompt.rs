use crate::types::SeedTrack;

/// Seeds beyond this count are ignored; the first ones in caller order win.
pub const MAX_SEEDS: usize = 15;

pub const SYSTEM_PROMPT: &str = "You are an expert music curator with encyclopedic knowledge of \
genres, artists and songs. You recommend only real, released songs that can be found on \
Spotify. You always answer with valid JSON and nothing else.";

const INSTRUCTIONS: &str = r#"REQUIREMENTS:
1. GENRE CONSISTENCY: identify the dominant genre(s) of the playlist and stay within them or closely related subgenres.
2. ERA CONSISTENCY: match the time period of the playlist.
3. ENERGY MATCH: match the energy level and mood (chill, upbeat, aggressive, mellow).
4. REAL SONGS ONLY: every song must actually exist on Spotify.
5. ARTIST DIVERSITY: at most 2 songs per artist.
6. POPULARITY MIX: include both popular and lesser-known tracks.

OUTPUT FORMAT:
Return ONLY a JSON array of objects with a "name" and an "artist" field.
Do not add explanations, reasoning or any text outside the JSON.

Format: [{"name": "...", "artist": "..."}]"#;

/// The seeds that make it into the prompt.
pub fn select_seeds(seeds: &[SeedTrack]) -> &[SeedTrack] {
    &seeds[..seeds.len().min(MAX_SEEDS)]
}

/// Renders the curator prompt for a set of seed tracks.
///
/// Output is deterministic for a given seed list.
pub fn build_prompt(seeds: &[SeedTrack]) -> String {
    let track_list = select_seeds(seeds)
        .iter()
        .map(|seed| format!("- {} by {}", seed.name, seed.artist))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Analyze this playlist:\n{track_list}\n\n{INSTRUCTIONS}\n\nNow provide exactly {MAX_SEEDS} recommendations that match the genre and vibe:"
    )
}
