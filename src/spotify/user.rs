use super::{SpotifyClient, decode, send};
use crate::{errors::CatalogError, types::SpotifyUser};

impl SpotifyClient {
    /// Profile of the user the access token belongs to (`GET /me`).
    pub async fn current_user(&self) -> Result<SpotifyUser, CatalogError> {
        decode(send(self.get("/me")).await?).await
    }
}
