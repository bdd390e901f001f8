//! AHP Ranker server
//!
//! Run with: cargo run --bin ahp-ranker

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use http::Method;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use ahp_ranker::adapters::http::{ranking_router, RankingAppState};
use ahp_ranker::adapters::{
    InMemoryCriteriaStore, InMemoryScoreStore, SeedData, StaticCategoryThresholds,
};
use ahp_ranker::application::new_shared_ledger;
use ahp_ranker::config::AppConfig;
use ahp_ranker::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config.server)?;

    let (criteria, scores) = match &config.seed_path {
        Some(path) => {
            info!(path = %path.display(), "Loading seed data");
            SeedData::load(path).await?.into_stores()
        }
        None => {
            info!("No seed configured; starting with empty providers");
            (
                InMemoryCriteriaStore::new(Vec::new(), Vec::new()),
                InMemoryScoreStore::default(),
            )
        }
    };

    let state = RankingAppState::new(
        Arc::new(criteria),
        Arc::new(scores),
        Arc::new(StaticCategoryThresholds::new(config.categories.clone())),
    )
    .with_ledger(new_shared_ledger(config.engine.history_capacity))
    .with_settings(config.engine.to_settings())
    .with_snapshot_attempts(config.engine.snapshot_attempts)
    .in_background(config.engine.run_in_background);

    let cors = if config.is_production() {
        CorsLayer::new().allow_methods([Method::GET, Method::POST])
    } else {
        CorsLayer::permissive()
    };

    let app = Router::new()
        .nest("/api", ranking_router())
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors)
        .with_state(state);

    let addr = config.server.socket_addr()?;
    info!(%addr, environment = ?config.server.environment, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
