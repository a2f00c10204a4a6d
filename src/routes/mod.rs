//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the push stream, the tools-panel API and the health
//! check under a single Axum router. Image bytes are served from the image
//! directory under `/image`, and the page, wasm bundle and sprite are served
//! from the static directory for everything else.

pub mod events;
pub mod stream;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::state::AppState;

/// Full application router.
pub fn app(state: AppState, config: &Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/stream", get(stream::handle_stream))
        .route("/api/state", get(events::get_state))
        .route("/api/event", post(events::post_event))
        .route("/healthz", get(healthz))
        .nest_service("/image", ServeDir::new(&config.image_dir))
        .nest_service("/static", ServeDir::new(&config.static_dir))
        .fallback_service(ServeDir::new(&config.static_dir).append_index_html_on_directories(true))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
