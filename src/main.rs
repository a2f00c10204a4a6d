mod config;
mod routes;
mod services;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env before the filter reads RUST_LOG.
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env file loaded");
    }
    let config = config::Config::from_env().expect("invalid configuration");

    let image_ids = services::catalog::scan_images(&config.image_dir).expect("image catalog unavailable");
    tracing::info!(image_dir = %config.image_dir.display(), images = image_ids.len(), "image catalog loaded");

    let points = services::points::PointsState::new(image_ids);
    let state = state::AppState::new(points, config.sync_channel_capacity);

    let app = routes::app(state, &config);
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "annotator listening");
    axum::serve(listener, app).await.expect("server failed");
}
