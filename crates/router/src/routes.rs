//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! POST /query  - Route a natural-language query against the catalog
//! ```
//!
//! Health endpoints (`/health`, `/health/ready`) live in `main.rs`.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;

use crate::catalog::{CatalogRepository, Envelope};
use crate::error::AppError;
use crate::router::route_query;
use crate::state::AppState;

/// Build the query router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/query", post(query))
}

/// Request to route a natural-language query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The user's free-text query.
    pub query: String,
}

/// Route one user query.
///
/// Always responds 200 with an envelope: tool results, an error message, or
/// the model's conversational reply.
async fn query(
    State(state): State<AppState>,
    Json(request): Json<QueryRequest>,
) -> Result<Json<Envelope>, AppError> {
    if request.query.trim().is_empty() {
        return Err(AppError::BadRequest("query must not be empty".to_string()));
    }

    let repository = CatalogRepository::new(state.pool());
    let envelope = route_query(state.gemini(), &repository, &request.query).await;
    Ok(Json(envelope))
}
