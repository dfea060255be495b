//! # API Module
//!
//! Axum routes for the what-if HTTP API.
//!
//! The server is stateless: every simulate request carries its own table
//! and round, and the engine runs in-process. Nothing here touches the
//! CLI's table file.

use axum::routing::{get, post};
use axum::{Json, Router};
use capsim_core::{simulate_round, CapTable, FundingRound, LegendEntry, Reporter, RoundOutcome};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::cli::CliError;

/// Health probe payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Body for `POST /simulate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateRequest {
    pub table: CapTable,
    pub round: FundingRound,
}

/// Body returned by `POST /simulate`: the outcome plus a ready-made
/// legend for chart rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub outcome: RoundOutcome,
    pub legend: Vec<LegendEntry>,
}

/// Build the API router.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/template", get(template))
        .route("/simulate", post(simulate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

async fn template() -> Json<CapTable> {
    Json(CapTable::template())
}

async fn simulate(Json(request): Json<SimulateRequest>) -> Json<SimulateResponse> {
    let outcome = simulate_round(&request.table, &request.round);
    tracing::debug!(
        round = %outcome.round_name,
        investor_shares = outcome.new_investor.shares,
        total_shares = outcome.post_round.total_shares,
        "simulated round"
    );
    let legend = Reporter::legend(&outcome.post_round);
    Json(SimulateResponse { outcome, legend })
}

/// Bind and serve the API until ctrl-c.
pub async fn serve(addr: &str) -> Result<(), CliError> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {addr}");
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutting down");
}
