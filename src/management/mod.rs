//! Token persistence for the CLI and in-memory session stores for the server.

mod auth;
mod session;

pub use auth::TokenManager;
pub use session::SessionStore;
