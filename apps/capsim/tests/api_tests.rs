//! Integration tests for the capsim HTTP API.
//!
//! Uses axum-test to drive the router in-process, no sockets involved.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum_test::TestServer;
use capsim::api::{router, HealthResponse, SimulateRequest, SimulateResponse};
use capsim_core::{CapTable, FundingRound};

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn test_server() -> TestServer {
    TestServer::new(router()).expect("Failed to build test server")
}

fn seed_request() -> SimulateRequest {
    SimulateRequest {
        table: CapTable::template(),
        round: FundingRound::new("Seed", 8_000_000.0, 2_000_000.0, 10.0),
    }
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_reports_ok() {
    let server = test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: HealthResponse = response.json();
    assert_eq!(body.status, "ok");
    assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// TEMPLATE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_template_returns_starter_table() {
    let server = test_server();

    let response = server.get("/template").await;
    response.assert_status_ok();

    let table: CapTable = response.json();
    assert_eq!(table, CapTable::template());
}

// =============================================================================
// SIMULATE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_simulate_returns_outcome_and_legend() {
    let server = test_server();

    let response = server.post("/simulate").json(&seed_request()).await;
    response.assert_status_ok();

    let body: SimulateResponse = response.json();
    assert_eq!(body.outcome.new_investor.shares, 2_500_000);
    assert_eq!(body.outcome.post_round.total_shares, 12_750_000);
    // Two founders, one investor, plus the ESOP pool entry.
    assert_eq!(body.legend.len(), 4);
    assert!(body.legend.iter().all(|e| e.color.starts_with("hsl(")));
}

#[tokio::test]
async fn test_simulate_is_stateless_across_requests() {
    let server = test_server();

    let first = server.post("/simulate").json(&seed_request()).await;
    let second = server.post("/simulate").json(&seed_request()).await;

    let a: SimulateResponse = first.json();
    let b: SimulateResponse = second.json();
    assert_eq!(a.outcome, b.outcome);
}

#[tokio::test]
async fn test_simulate_degrades_on_degenerate_table() {
    let server = test_server();

    let request = SimulateRequest {
        table: CapTable::new(0, 0.0),
        round: FundingRound::new("Seed", 8_000_000.0, 2_000_000.0, 10.0),
    };
    let response = server.post("/simulate").json(&request).await;
    response.assert_status_ok();

    let body: SimulateResponse = response.json();
    assert_eq!(body.outcome.new_investor.shares, 0);
    assert_eq!(body.outcome.post_round.total_shares, 0);
}

#[tokio::test]
async fn test_simulate_rejects_malformed_body() {
    let server = test_server();

    let response = server
        .post("/simulate")
        .text("this is not a simulate request")
        .await;
    assert!(response.status_code().is_client_error());
}
