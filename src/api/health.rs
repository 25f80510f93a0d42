use axum::response::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn root() -> Json<Value> {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "endpoints": {
            "health": "/health",
            "login": "/login",
            "callback": "/callback",
            "match_tracks": "/match-tracks",
            "convert": "/convert",
            "recommendations": "/recommendations",
            "enhance_playlist": "/enhance-playlist"
        }
    }))
}
