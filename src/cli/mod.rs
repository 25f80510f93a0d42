//! # CLI Module
//!
//! Command-line front end for musikai. Every command talks to the same
//! building blocks the HTTP API uses, but keeps a single user's Spotify token
//! on disk instead of in a session store.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the HTTP API for the web frontend
//! - [`auth`] - Authorizes with Spotify through the OAuth 2.0 PKCE flow and
//!   stores the token in the local data directory
//! - [`convert`] - Converts a YouTube playlist into a Spotify playlist,
//!   optionally extended with LLM recommendations
//! - [`parse`] - Shows how video titles are normalized and which search
//!   queries they turn into, without touching any remote service
//!
//! ## Usage
//!
//! ```bash
//! musikai auth
//! musikai convert PLxxxxxxxx --name "Road Trip" --recommend
//! musikai parse "Daft Punk - One More Time (Official Video)"
//! ```
//!
//! Fatal failures print through the crate's `error!` macro and exit with
//! status 1.

mod auth;
mod convert;
mod parse;
mod serve;

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub use auth::auth;
pub use convert::convert;
pub use parse::parse;
pub use serve::serve;

fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
