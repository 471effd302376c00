//! Read-only vocabulary and health endpoints

use axum::{extract::State, Json};
use serde::Serialize;

use crate::state::AppState;
use crate::vocabulary::ValidInputs;

/// `GET /api/valid-inputs`
pub async fn valid_inputs(State(state): State<AppState>) -> Json<ValidInputs> {
    Json(state.vocabulary.valid_inputs().clone())
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub success: bool,
    pub status: &'static str,
    pub advisory_enabled: bool,
}

/// `GET /api/health`
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        success: true,
        status: "ok",
        advisory_enabled: state.advisory.is_enabled(),
    })
}
