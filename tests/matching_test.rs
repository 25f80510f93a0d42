use musikai::matching::{ParsedQuery, SearchAttempt, normalize, parse, search_attempts};

fn parsed(artist: &str, track: &str) -> ParsedQuery {
    ParsedQuery {
        artist: Some(artist.to_string()),
        track: track.to_string(),
    }
}

fn unparsed(track: &str) -> ParsedQuery {
    ParsedQuery {
        artist: None,
        track: track.to_string(),
    }
}

#[test]
fn test_normalize_strips_decorative_tags() {
    assert_eq!(normalize("Song [Official Video]"), "Song");
    assert_eq!(normalize("Song (Official Music Video)"), "Song");
    assert_eq!(normalize("Song (official audio)"), "Song");
    assert_eq!(normalize("Song [Official Lyric Video]"), "Song");
    assert_eq!(normalize("Song (Lyrics)"), "Song");
    assert_eq!(normalize("Song (Lyric)"), "Song");
    assert_eq!(normalize("Song [HD]"), "Song");
    assert_eq!(normalize("Song (HQ)"), "Song");
    assert_eq!(normalize("Song [4K]"), "Song");
    assert_eq!(normalize("Song (Official)"), "Song");
    assert_eq!(normalize("Song [Music Video]"), "Song");
    assert_eq!(normalize("Song (Audio)"), "Song");
}

#[test]
fn test_normalize_is_case_insensitive() {
    assert_eq!(normalize("Song [OFFICIAL VIDEO]"), "Song");
    assert_eq!(normalize("Song (hd)"), "Song");
}

#[test]
fn test_normalize_removes_every_tag() {
    assert_eq!(normalize("Song  Name [official video] (HD)"), "Song Name");
    assert_eq!(normalize("Artist - Song (Official Video) [Lyrics] (4K)"), "Artist - Song");
}

#[test]
fn test_normalize_keeps_other_brackets() {
    assert_eq!(normalize("Song (Live)"), "Song (Live)");
    assert_eq!(normalize("Song [Remix]"), "Song [Remix]");
    assert_eq!(normalize("Song (Official Video"), "Song (Official Video");
}

#[test]
fn test_normalize_collapses_whitespace() {
    assert_eq!(normalize("  Artist   -  Song\t Name  "), "Artist - Song Name");
    assert_eq!(normalize("Intro (HD) Outro"), "Intro Outro");
}

#[test]
fn test_normalize_empty_input() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   "), "");
    assert_eq!(normalize("[HD]"), "");
}

#[test]
fn test_normalize_is_idempotent() {
    let titles = [
        "Song [Official  Video]",
        "Daft Punk - One More Time (Official Video)",
        "  a   b  [Lyrics] ",
        "Song (Live) [HD]",
        "Nothing to strip",
    ];

    for title in titles {
        let once = normalize(title);
        assert_eq!(normalize(&once), once, "not idempotent for {:?}", title);
    }

    assert_eq!(normalize("Song [Official  Video]"), "Song");
}

#[test]
fn test_parse_artist_dash_track() {
    assert_eq!(
        parse("Daft Punk - One More Time (Official Video)"),
        parsed("Daft Punk", "One More Time")
    );
    assert_eq!(parse("Artist-Track"), parsed("Artist", "Track"));
}

#[test]
fn test_parse_en_and_em_dash() {
    assert_eq!(parse("Artist – Track"), parsed("Artist", "Track"));
    assert_eq!(parse("Artist — Track"), parsed("Artist", "Track"));
}

#[test]
fn test_parse_track_by_artist() {
    assert_eq!(
        parse("Yesterday by The Beatles"),
        parsed("The Beatles", "Yesterday")
    );
    assert_eq!(
        parse("Yesterday BY The Beatles"),
        parsed("The Beatles", "Yesterday")
    );
}

#[test]
fn test_parse_artist_colon_track() {
    assert_eq!(parse("Artist: Track"), parsed("Artist", "Track"));
}

#[test]
fn test_parse_dash_takes_priority() {
    assert_eq!(
        parse("Artist - Song by Someone"),
        parsed("Artist", "Song by Someone")
    );
}

#[test]
fn test_parse_without_separator_is_unparsed() {
    assert_eq!(parse("Just A Title"), unparsed("Just A Title"));
    assert_eq!(parse("Just A Title [HD]"), unparsed("Just A Title"));
}

#[test]
fn test_parse_rejects_single_character_segments() {
    assert_eq!(parse("A - Track Name"), unparsed("A - Track Name"));
    assert_eq!(parse("Artist - B"), unparsed("Artist - B"));
}

#[test]
fn test_parse_trims_segments() {
    assert_eq!(parse("  Artist   -   Track  "), parsed("Artist", "Track"));
}

#[test]
fn test_search_attempts_for_parsed_title() {
    let attempts = search_attempts("Daft Punk - One More Time");

    assert_eq!(
        attempts,
        vec![
            SearchAttempt::ArtistAndTrack {
                artist: "Daft Punk".to_string(),
                track: "One More Time".to_string(),
            },
            SearchAttempt::TrackOnly("One More Time".to_string()),
            SearchAttempt::OriginalTitle("Daft Punk - One More Time".to_string()),
        ]
    );

    let queries: Vec<String> = attempts.iter().map(SearchAttempt::query).collect();
    assert_eq!(
        queries,
        vec![
            "artist:Daft Punk track:One More Time",
            "One More Time",
            "Daft Punk - One More Time",
        ]
    );
}

#[test]
fn test_search_attempts_for_unparsed_title() {
    assert!(search_attempts("Just A Title").is_empty());
    assert_eq!(
        search_attempts("Just A Title [HD]"),
        vec![SearchAttempt::OriginalTitle("Just A Title [HD]".to_string())]
    );
}

#[test]
fn test_search_attempts_for_blank_title() {
    assert!(search_attempts("").is_empty());
    assert!(search_attempts("   ").is_empty());
}
