//! Route definitions for the HTTP API.

mod chat;
mod health;
mod index;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::middleware::session_middleware;
use crate::state::AppState;

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let session_routes = Router::new()
        .route("/chat", post(chat::chat))
        .route("/reset", post(chat::reset))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ));

    let router = Router::new()
        .route("/", get(index::index))
        .route("/health", get(health::health_check))
        .merge(session_routes);

    let router = match state.server.static_dir.clone() {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.with_state(state)
}

pub use chat::*;
pub use health::*;
pub use index::*;
