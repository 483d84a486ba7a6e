pub mod handlers;
pub mod types;

use crate::{
    Result,
    batcher::Batcher,
    config::Config,
    engine::{InferenceEngine, OpenAiEngine},
};
use axum::{Router, routing::post};
use std::{net::SocketAddr, sync::Arc};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Builds the HTTP router around an already-initialized engine.
pub fn router(engine: Arc<dyn InferenceEngine>) -> Router {
    let app_state = handlers::AppState {
        batcher: Batcher::new(engine),
    };

    Router::new()
        .route("/chat", post(handlers::chat))
        .route("/generate_batch", post(handlers::generate_batch))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

pub async fn run(config: Config) -> Result<()> {
    // The engine is built once and shared read-only by every request
    let engine = OpenAiEngine::new(config.engine.clone(), config.generation.clone())?;
    info!(
        "Inference engine ready: model {} at {} (max {} concurrent calls)",
        config.engine.model, config.engine.base_url, config.engine.max_concurrency
    );

    let app = router(Arc::new(engine));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
