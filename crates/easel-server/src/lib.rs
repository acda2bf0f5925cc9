//! easel-server - HTTP chat relay server for easel.
//!
//! Exposes `POST /chat` and `POST /reset` keyed by a session cookie, plus a
//! health endpoint and the embedded browser client at `/`.
//!
//! # Example
//!
//! ```ignore
//! use easel_core::EaselConfig;
//! use easel_server::{create_orchestrator, create_server, AppState};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = EaselConfig::load().unwrap();
//!     let orchestrator = create_orchestrator(&config).unwrap();
//!     let state = AppState::new(orchestrator, config.server.clone(), config.relay.session_ttl_secs);
//!     let app = create_server(state);
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```

pub mod error;
pub mod factory;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use factory::create_orchestrator;
pub use state::{spawn_session_sweeper, AppState};

use axum::{middleware as axum_middleware, Router};
use tower_http::trace::TraceLayer;

/// Create the server with all routes and middleware.
pub fn create_server(state: AppState) -> Router {
    routes::create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors_layer())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
}
