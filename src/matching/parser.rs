use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::Serialize;

use super::normalize;

/// Artist/track split of a video title.
///
/// When `artist` is present both fields are longer than one character.
/// Otherwise `track` holds the whole normalized title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedQuery {
    pub artist: Option<String>,
    pub track: String,
}

impl ParsedQuery {
    fn unparsed(title: String) -> Self {
        Self {
            artist: None,
            track: title,
        }
    }
}

/// Which capture group holds the artist; the other one is the track.
#[derive(Clone, Copy)]
enum ArtistSide {
    Left,
    Right,
}

struct TitlePattern {
    regex: Regex,
    artist: ArtistSide,
}

// Priority order matters: the first pattern with two usable segments wins.
static TITLE_PATTERNS: LazyLock<Vec<TitlePattern>> = LazyLock::new(|| {
    [
        (r"^(.+?)\s*[-–—]\s*(.+)$", ArtistSide::Left),
        (r"(?i)^(.+?)\s+by\s+(.+)$", ArtistSide::Right),
        (r"^(.+?):\s*(.+)$", ArtistSide::Left),
    ]
    .into_iter()
    .map(|(pattern, artist)| TitlePattern {
        regex: Regex::new(pattern).expect("title pattern is valid"),
        artist,
    })
    .collect()
});

/// Splits a raw video title into artist and track.
///
/// Tries `Artist - Track` (hyphen, en dash or em dash), then `Track by Artist`,
/// then `Artist: Track`. A pattern only counts when both trimmed segments are
/// longer than one character, so `"A - Track Name"` falls through every rule
/// and comes back unparsed.
pub fn parse(raw: &str) -> ParsedQuery {
    let title = normalize(raw);

    for pattern in TITLE_PATTERNS.iter() {
        let Some(caps) = pattern.regex.captures(&title) else {
            continue;
        };

        let (artist, track) = match pattern.artist {
            ArtistSide::Left => (segment(&caps, 1), segment(&caps, 2)),
            ArtistSide::Right => (segment(&caps, 2), segment(&caps, 1)),
        };

        if is_usable(artist) && is_usable(track) {
            return ParsedQuery {
                artist: Some(artist.to_string()),
                track: track.to_string(),
            };
        }
    }

    ParsedQuery::unparsed(title)
}

fn segment<'t>(caps: &Captures<'t>, group: usize) -> &'t str {
    caps.get(group).map_or("", |m| m.as_str().trim())
}

fn is_usable(segment: &str) -> bool {
    segment.chars().count() > 1
}
