//! `POST /predict`
//!
//! Accepts `application/x-www-form-urlencoded` and `multipart/form-data`
//! (what a browser `FormData` post sends). A repeated field keeps its first
//! value in both encodings.

use axum::{
    extract::{FromRequest, Multipart, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json,
};
use serde::Serialize;

use super::error::ApiError;
use crate::predictor::{PredictionForm, YieldPrediction};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub success: bool,
    #[serde(flatten)]
    pub prediction: YieldPrediction,
}

pub async fn predict(
    State(state): State<AppState>,
    request: Request,
) -> Result<Json<PredictResponse>, ApiError> {
    let form = read_form(request).await?;
    let prediction = state.predictor.predict(&form)?;

    tracing::info!(
        area = %prediction.matched_area,
        item = %prediction.matched_item,
        yield_hg = prediction.predicted_yield_hg,
        "prediction served"
    );

    Ok(Json(PredictResponse {
        success: true,
        prediction,
    }))
}

async fn read_form(request: Request) -> Result<PredictionForm, ApiError> {
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if is_multipart {
        let multipart = Multipart::from_request(request, &())
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid form data: {e}")))?;
        read_multipart(multipart).await
    } else {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid form data: {e}")))?;
        let mut form = PredictionForm::default();
        for (name, value) in pairs {
            keep_first(&mut form, &name, value);
        }
        Ok(form)
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<PredictionForm, ApiError> {
    let mut form = PredictionForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid form data: {e}")))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let value = field
            .text()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid form data: {e}")))?;
        keep_first(&mut form, &name, value);
    }
    Ok(form)
}

/// Store `value` under its form field unless that field is already set.
/// Unknown names are ignored.
fn keep_first(form: &mut PredictionForm, name: &str, value: String) {
    let slot = match name {
        "Year" => &mut form.year,
        "average_rain_fall_mm_per_year" => &mut form.average_rain_fall_mm_per_year,
        "pesticides_tonnes" => &mut form.pesticides_tonnes,
        "avg_temp" => &mut form.avg_temp,
        "Area" => &mut form.area,
        "Item" => &mut form.item,
        _ => return,
    };
    slot.get_or_insert(value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_first_ignores_repeats_and_unknown_names() {
        let mut form = PredictionForm::default();
        keep_first(&mut form, "Area", "India".to_string());
        keep_first(&mut form, "Area", "Kenya".to_string());
        keep_first(&mut form, "Colour", "green".to_string());
        keep_first(&mut form, "Year", "2013".to_string());

        assert_eq!(form.area.as_deref(), Some("India"));
        assert_eq!(form.year.as_deref(), Some("2013"));
        assert!(form.item.is_none());
    }
}
