use std::sync::LazyLock;

use regex::Regex;

/// Tag bodies that are stripped when wrapped in `[...]` or `(...)`.
const DECORATIVE_TAGS: &[&str] = &[
    r"official (?:video|music video|audio|lyric video)",
    r"lyrics?",
    r"hd|hq|4k|official",
    r"music video|audio",
];

static TAG_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DECORATIVE_TAGS
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?i)\[(?:{tag})\]|\((?:{tag})\)"))
                .expect("decorative tag pattern is valid")
        })
        .collect()
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

/// Strips decorative markup such as `[Official Video]` or `(HD)` from a video
/// title and collapses whitespace.
///
/// Every tag pattern is applied, so a title carrying several tags loses all of
/// them. The passes repeat until the title stops changing, which makes the
/// function idempotent even when removing one tag (or collapsing whitespace)
/// uncovers another.
///
/// # Example
///
/// ```
/// use musikai::matching::normalize;
///
/// assert_eq!(normalize("Song  Name [official video] (HD)"), "Song Name");
/// ```
pub fn normalize(raw: &str) -> String {
    let mut current = raw.to_string();

    loop {
        let mut next = current.clone();
        for pattern in TAG_PATTERNS.iter() {
            next = pattern.replace_all(&next, "").into_owned();
        }
        let next = WHITESPACE.replace_all(&next, " ").trim().to_string();

        if next == current {
            return next;
        }
        current = next;
    }
}
