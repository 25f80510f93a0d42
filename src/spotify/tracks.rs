use super::{SpotifyClient, decode, send};
use crate::{
    errors::CatalogError,
    types::{CatalogTrack, SeedTrack, Track},
    utils,
};

impl SpotifyClient {
    /// Looks up a track by URI (`spotify:track:<id>`) or bare ID.
    ///
    /// # Errors
    ///
    /// An unknown ID answers `404`, which is transient.
    pub async fn get_track(&self, uri: &str) -> Result<CatalogTrack, CatalogError> {
        let id = utils::track_id_from_uri(uri);
        let track: Track = decode(send(self.get(&format!("/tracks/{}", id))).await?).await?;
        Ok(track.into())
    }

    /// Resolves track URIs into seed tracks for recommendations.
    ///
    /// Lookups that fail transiently are skipped; systemic failures abort.
    ///
    /// # Arguments
    ///
    /// * `uris` - Track URIs or IDs, looked up one by one in order
    ///
    /// # Returns
    ///
    /// One [`SeedTrack`] per successful lookup, named after the track's
    /// primary artist.
    pub async fn seed_tracks(&self, uris: &[String]) -> Result<Vec<SeedTrack>, CatalogError> {
        let mut seeds = Vec::with_capacity(uris.len());

        for uri in uris {
            match self.get_track(uri).await {
                Ok(track) => seeds.push(SeedTrack {
                    name: track.name,
                    artist: track.primary_artist,
                }),
                Err(CatalogError::Transient(reason)) => {
                    log::warn!("Could not get info for {}: {}", uri, reason)
                }
                Err(err) => return Err(err),
            }
        }

        Ok(seeds)
    }
}
