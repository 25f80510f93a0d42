use async_trait::async_trait;

use super::{SpotifyClient, decode, send};
use crate::{
    errors::CatalogError,
    matching::TrackCatalog,
    types::{CatalogTrack, SearchResponse},
};

impl SpotifyClient {
    /// Returns the best track hit for a search query, if any.
    ///
    /// Field filters such as `artist:Foo track:Bar` are passed through as-is.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the search has no track items.
    ///
    /// # Errors
    ///
    /// A body that does not decode as a search response is transient.
    pub async fn search_first_track(&self, query: &str) -> Result<Option<CatalogTrack>, CatalogError> {
        let request = self
            .get("/search")
            .query(&[("q", query), ("type", "track"), ("limit", "1")]);

        let res: SearchResponse = decode(send(request).await?).await?;
        Ok(res.tracks.items.into_iter().next().map(CatalogTrack::from))
    }
}

#[async_trait]
impl TrackCatalog for SpotifyClient {
    async fn search_track(&self, query: &str) -> Result<Option<CatalogTrack>, CatalogError> {
        self.search_first_track(query).await
    }
}
