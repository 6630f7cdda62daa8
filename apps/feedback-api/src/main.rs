//! Feedback API - guest feedback intake server

use axum::Router;
use axum_helpers::server::{create_app, health_router};
use core_config::tracing::init_tracing;
use database::postgres::{connect_from_config_with_retry, run_migrations};
use domain_feedback::{FeedbackService, HttpEmbeddingTrigger, PgFeedbackRepository, handlers};
use migration::Migrator;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db = connect_from_config_with_retry(config.postgres.clone(), None).await?;
    run_migrations::<Migrator>(&db, config.app.name).await?;

    let repository = PgFeedbackRepository::new(db.clone());
    let trigger = HttpEmbeddingTrigger::new(&config.worker_url)
        .map_err(|e| eyre::eyre!("Failed to build embedding trigger: {}", e))?;
    let service = FeedbackService::new(repository, trigger);

    let api_routes = Router::new().nest("/feedback", handlers::feedback_router(service));
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(db));

    info!(
        "Starting Feedback API on port {} (embedding worker at {})",
        config.server.port, config.worker_url
    );

    create_app(app, &config.server).await?;

    info!("Feedback API shutdown complete");
    Ok(())
}
