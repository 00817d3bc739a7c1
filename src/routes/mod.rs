use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::relay::ContactRelay;

mod contact;
mod health;

pub use contact::send_contact;
pub use health::health;

pub const CONTACT_PATH: &str = "/api/send-contact";

#[derive(Clone)]
pub struct AppState {
    pub relay: ContactRelay,
}

/// Relay endpoint, health probe, and the static front-end for every other path.
pub fn router(app_state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        // Health check endpoint (no state required)
        .route("/health", get(health::health))
        .route(CONTACT_PATH, post(contact::send_contact))
        // `/` resolves to index.html inside the public directory
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .with_state(app_state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}
