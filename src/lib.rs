//! musikai library
//!
//! Converts YouTube playlists into Spotify playlists and suggests new tracks
//! with an LLM. The crate exposes the HTTP API used by the web frontend as
//! well as the pieces the command-line tool is built from.
//!
//! # Modules
//!
//! - `api` - HTTP handlers of the API server
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `errors` - Error types shared across the crate
//! - `llm` - Groq chat completion client
//! - `management` - Token persistence and in-memory session stores
//! - `matching` - Title normalization, parsing and track resolution
//! - `notify` - Access request notifications
//! - `recommend` - LLM recommendation pipeline
//! - `server` - Axum router and shared application state
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//! - `youtube` - YouTube Data API playlist reader

pub mod api;
pub mod cli;
pub mod config;
pub mod errors;
pub mod llm;
pub mod management;
pub mod matching;
pub mod notify;
pub mod recommend;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;
pub mod youtube;

/// A convenient Result type alias for operations that may fail.
///
/// Used at the outer edges (server startup, CLI commands) where errors of
/// different kinds only need to be reported, not matched on.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Arguments
///
/// Accepts the same arguments as `println!`.
///
/// # Example
///
/// ```
/// info!("Matching {} titles", titles.len());
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for fatal errors in CLI commands. Code after the macro does not run.
///
/// # Example
///
/// ```
/// error!("Failed to fetch YouTube playlist: {}", e);
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
