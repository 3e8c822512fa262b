//! REST API server for the banking query pipeline
//!
//! Exposes the pipeline via HTTP endpoints

use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::BankQueryError;
use crate::models::{BankQuery, QueryReply};
use crate::pipeline::Pipeline;

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub pipeline: Arc<Pipeline>,
}

/// =============================
/// Error Body
/// =============================

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Map a pipeline failure to a client-facing status code.
///
/// Unrecognized queries and backend failures are client errors carrying a
/// human-readable detail; generation-service failures are server errors.
fn error_status(err: &BankQueryError) -> StatusCode {
    match err {
        BankQueryError::UnrecognizedQuery | BankQueryError::Backend(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Bank Query Endpoint
/// =============================

async fn bank_query(
    State(state): State<ApiState>,
    Json(query): Json<BankQuery>,
) -> Result<Json<QueryReply>, (StatusCode, Json<ErrorBody>)> {
    info!("Received bank query request");

    match state.pipeline.run(query).await {
        Ok(reply) => Ok(Json(reply)),
        Err(e) => Err((
            error_status(&e),
            Json(ErrorBody {
                detail: e.to_string(),
            }),
        )),
    }
}

/// =============================
/// Router
/// =============================

pub fn create_router(pipeline: Arc<Pipeline>) -> Router {
    let state = ApiState { pipeline };

    Router::new()
        .route("/health", get(health))
        .route("/bank_query", post(bank_query))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(
    pipeline: Arc<Pipeline>,
    port: u16,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let router = create_router(pipeline);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}
