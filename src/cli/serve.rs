use std::sync::Arc;

use reqwest::Client;

use crate::{
    config, error,
    llm::GroqClient,
    recommend::ChatCompletion,
    server::{AppState, start_api_server},
    warning,
};

pub async fn serve() {
    if let Err(e) = config::validate() {
        error!("Invalid configuration: {}", e);
    }

    let llm: Option<Arc<dyn ChatCompletion>> = match GroqClient::from_env() {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warning!("Recommendations disabled: {}", e);
            None
        }
    };

    let state = AppState::new(
        Client::new(),
        llm,
        Some(config::frontend_url()),
        config::session_ttl(),
    );

    if let Err(e) = start_api_server(Arc::new(state)).await {
        error!("API server stopped: {}", e);
    }
}
