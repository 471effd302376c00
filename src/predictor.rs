//! Yield prediction from the submitted form
//!
//! Validation happens in a fixed order (presence, vocabulary, numerics) and
//! the model is only called once all three pass.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::model::{FeatureRecord, ModelError, YieldModel};
use crate::vocabulary::Vocabulary;

/// Hectograms per kilogram
const HG_PER_KG: f64 = 10.0;

/// How many areas to list when an area is not recognised
const AREA_HINT_LIMIT: usize = 10;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("All fields are required (missing: {}).", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("Country/Area \"{input}\" not found in our dataset. Supported areas include: {suggestions}... and more.")]
    AreaNotFound { input: String, suggestions: String },

    #[error("Crop \"{input}\" not found in our dataset. Supported crops: {supported}.")]
    ItemNotFound { input: String, supported: String },

    #[error("Invalid numeric input: {field} = \"{value}\"")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Prediction failed: {0}")]
    Pipeline(#[from] ModelError),
}

/// Raw `/predict` form fields. The front-end posts them as `Year`,
/// `average_rain_fall_mm_per_year`, `pesticides_tonnes`, `avg_temp`, `Area`
/// and `Item`.
#[derive(Debug, Clone, Default)]
pub struct PredictionForm {
    pub year: Option<String>,
    pub average_rain_fall_mm_per_year: Option<String>,
    pub pesticides_tonnes: Option<String>,
    pub avg_temp: Option<String>,
    pub area: Option<String>,
    pub item: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldPrediction {
    pub predicted_yield_hg: f64,
    pub predicted_yield_kg: f64,
    pub matched_area: String,
    pub matched_item: String,
}

/// Matches form input against the vocabulary and runs the model
#[derive(Clone)]
pub struct YieldPredictor {
    vocabulary: Arc<Vocabulary>,
    model: Arc<dyn YieldModel>,
}

impl YieldPredictor {
    pub fn new(vocabulary: Arc<Vocabulary>, model: Arc<dyn YieldModel>) -> Self {
        Self { vocabulary, model }
    }

    pub fn predict(&self, form: &PredictionForm) -> Result<YieldPrediction, PredictError> {
        let fields = [
            ("Year", form.year.as_deref()),
            (
                "average_rain_fall_mm_per_year",
                form.average_rain_fall_mm_per_year.as_deref(),
            ),
            ("pesticides_tonnes", form.pesticides_tonnes.as_deref()),
            ("avg_temp", form.avg_temp.as_deref()),
            ("Area", form.area.as_deref()),
            ("Item", form.item.as_deref()),
        ]
        .map(|(name, value)| (name, value.map(str::trim).unwrap_or_default()));

        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, v)| v.is_empty())
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(PredictError::MissingFields(missing));
        }

        let [(_, year), (_, rain), (_, pesticides), (_, temp), (_, area), (_, item)] = fields;

        let matched_area = self.vocabulary.match_area(area).ok_or_else(|| {
            let areas = self.vocabulary.areas();
            PredictError::AreaNotFound {
                input: area.to_string(),
                suggestions: areas[..areas.len().min(AREA_HINT_LIMIT)].join(", "),
            }
        })?;
        let matched_item =
            self.vocabulary
                .match_item(item)
                .ok_or_else(|| PredictError::ItemNotFound {
                    input: item.to_string(),
                    supported: self.vocabulary.items().join(", "),
                })?;

        let record = FeatureRecord {
            year: parse_number("Year", year)?,
            average_rain_fall_mm_per_year: parse_number("average_rain_fall_mm_per_year", rain)?,
            pesticides_tonnes: parse_number("pesticides_tonnes", pesticides)?,
            avg_temp: parse_number("avg_temp", temp)?,
            area: matched_area.to_string(),
            item: matched_item.to_string(),
        };

        let raw = self.model.predict(&record)?;
        if !raw.is_finite() {
            return Err(ModelError::NonFinite(raw).into());
        }

        let predicted_yield_hg = round2(raw);
        tracing::debug!(
            area = %record.area,
            item = %record.item,
            predicted_yield_hg,
            "yield predicted"
        );

        Ok(YieldPrediction {
            predicted_yield_hg,
            predicted_yield_kg: round2(predicted_yield_hg / HG_PER_KG),
            matched_area: record.area,
            matched_item: record.item,
        })
    }
}

fn parse_number(field: &'static str, value: &str) -> Result<f64, PredictError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PredictError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

/// Round to two decimals, correctly rounded from the exact binary value
/// with exact ties going to the even digit: 0.125 gives 0.12, 2.675
/// (stored just below) gives 2.67.
pub fn round2(x: f64) -> f64 {
    format!("{x:.2}").parse().unwrap_or(x)
}
