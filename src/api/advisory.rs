//! `POST /api/advisory`

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use crate::advisory::{AdvisoryDocument, AdvisoryError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdvisoryRequest {
    #[serde(default)]
    pub crop: String,
}

#[derive(Debug, Serialize)]
pub struct AdvisoryResponse {
    pub success: bool,
    pub advisory: AdvisoryDocument,
}

pub async fn advisory(
    State(state): State<AppState>,
    body: Result<Json<AdvisoryRequest>, JsonRejection>,
) -> Result<Json<AdvisoryResponse>, ApiError> {
    // An unreadable body carries no crop name.
    let crop = match body {
        Ok(Json(req)) => req.crop,
        Err(rejection) => {
            tracing::debug!(%rejection, "advisory body rejected");
            return Err(AdvisoryError::MissingCrop.into());
        }
    };

    let advisory = state.advisory.get_advisory(&crop).await?;
    Ok(Json(AdvisoryResponse {
        success: true,
        advisory,
    }))
}
