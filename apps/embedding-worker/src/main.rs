//! Embedding worker - computes and attaches review embeddings
//!
//! Receives `{text, restaurant_id}` (optionally with a `review_id`) from
//! the intake API, computes the embedding via the configured model
//! endpoint, and writes the vector back onto the matching review row.

use axum::Router;
use axum_helpers::errors::handlers::not_found;
use axum_helpers::server::{create_app, health_router};
use core_config::tracing::init_tracing;
use database::postgres::connect_from_config_with_retry;
use domain_feedback::{EmbeddingService, HttpEmbedder, PgFeedbackRepository, WorkerApiDoc, handlers};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = connect_from_config_with_retry(config.postgres.clone(), None).await?;

    let repository = PgFeedbackRepository::new(db);
    let embedder = HttpEmbedder::new(&config.embedding)
        .map_err(|e| eyre::eyre!("Failed to build embedding client: {}", e))?;
    let service = EmbeddingService::new(repository, embedder);

    // The trigger path is service-to-service, so the worker serves its
    // endpoint at the root rather than under /api
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", WorkerApiDoc::openapi()))
        .merge(handlers::embedding_router(service))
        .merge(health_router(config.app))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .fallback(not_found);

    info!(
        "Starting embedding worker on port {} (model at {})",
        config.server.port, config.embedding.api_url
    );

    create_app(app, &config.server).await?;

    info!("Embedding worker shutdown complete");
    Ok(())
}
