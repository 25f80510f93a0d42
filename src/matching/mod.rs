//! Title-to-track resolution.
//!
//! A raw video title goes through [`normalize`], is split by [`parse`] and is
//! then looked up by a [`TrackResolver`] through the [`TrackCatalog`]
//! capability, producing a [`MatchResult`].

mod normalize;
mod parser;
mod resolver;

pub use normalize::normalize;
pub use parser::{ParsedQuery, parse};
pub use resolver::{
    MatchResult, PlaylistMatch, SearchAttempt, TrackCatalog, TrackResolver, search_attempts,
};
