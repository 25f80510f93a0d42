use colored::Colorize;

use crate::{
    info,
    matching::{self, normalize, search_attempts},
};

/// Prints normalization, parse result and search queries for each title.
pub fn parse(titles: &[String]) {
    for title in titles {
        let query = matching::parse(title);
        let attempts = search_attempts(title);

        info!("{}", title.bold());
        println!("    normalized: {}", normalize(title));
        println!(
            "    artist:     {}",
            query.artist.as_deref().unwrap_or("-")
        );
        println!("    track:      {}", query.track);

        if attempts.is_empty() {
            println!("    {}", "no search attempts".dimmed());
        }
        for (i, attempt) in attempts.iter().enumerate() {
            println!("    query {}:    {}", i + 1, attempt.query());
        }
    }
}
