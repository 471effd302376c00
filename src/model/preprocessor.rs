//! Fitted feature transformer
//!
//! Mirrors the column transformer the model was trained with: a standard
//! scaler over the numeric columns followed by a one-hot encoder over
//! `area` and `item`. Output layout is
//! `[scaled numerics.., one-hot area.., one-hot item..]`.

use serde::{Deserialize, Serialize};

use super::error::{ModelError, Result};
use super::features::{FeatureRecord, NUMERIC_FEATURES};

const CATEGORICAL_COLUMNS: [&str; 2] = ["Area", "Item"];

/// `(x - mean) / scale` per numeric column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StandardScaler {
    pub mean: [f64; NUMERIC_FEATURES],
    pub scale: [f64; NUMERIC_FEATURES],
}

impl StandardScaler {
    fn validate(&self) -> Result<()> {
        for (i, s) in self.scale.iter().enumerate() {
            if !s.is_finite() || *s == 0.0 {
                return Err(ModelError::InvalidArtifact(format!(
                    "scaler scale[{i}] must be finite and non-zero, got {s}"
                )));
            }
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err(ModelError::InvalidArtifact(
                "scaler mean must be finite".to_string(),
            ));
        }
        Ok(())
    }

    fn transform_into(&self, values: [f64; NUMERIC_FEATURES], out: &mut Vec<f64>) {
        out.extend(
            values
                .iter()
                .zip(self.mean.iter().zip(&self.scale))
                .map(|(x, (mean, scale))| (x - mean) / scale),
        );
    }
}

/// What to do with a category not seen during fitting
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HandleUnknown {
    #[default]
    Error,
    /// Emit an all-zero block
    Ignore,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OneHotEncoder {
    /// `categories[0]` for Area, `categories[1]` for Item
    pub categories: Vec<Vec<String>>,
    #[serde(default)]
    pub handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    fn validate(&self) -> Result<()> {
        if self.categories.len() != CATEGORICAL_COLUMNS.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "one-hot encoder needs {} category lists, got {}",
                CATEGORICAL_COLUMNS.len(),
                self.categories.len()
            )));
        }
        for (column, cats) in CATEGORICAL_COLUMNS.iter().zip(&self.categories) {
            if cats.is_empty() {
                return Err(ModelError::InvalidArtifact(format!(
                    "one-hot encoder has no categories for column '{column}'"
                )));
            }
        }
        Ok(())
    }

    fn width(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    fn transform_into(&self, values: [&str; 2], out: &mut Vec<f64>) -> Result<()> {
        for ((column, cats), value) in CATEGORICAL_COLUMNS.iter().zip(&self.categories).zip(values)
        {
            let start = out.len();
            out.resize(start + cats.len(), 0.0);
            match cats.iter().position(|c| c == value) {
                Some(idx) => out[start + idx] = 1.0,
                None if self.handle_unknown == HandleUnknown::Ignore => {}
                None => {
                    return Err(ModelError::UnknownCategory {
                        column: *column,
                        value: value.to_string(),
                    })
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preprocessor {
    pub scaler: StandardScaler,
    pub encoder: OneHotEncoder,
}

impl Preprocessor {
    pub fn validate(&self) -> Result<()> {
        self.scaler.validate()?;
        self.encoder.validate()
    }

    /// Width of the transformed feature vector
    pub fn output_width(&self) -> usize {
        NUMERIC_FEATURES + self.encoder.width()
    }

    pub fn area_categories(&self) -> &[String] {
        self.encoder.categories.first().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn item_categories(&self) -> &[String] {
        self.encoder.categories.get(1).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn transform(&self, record: &FeatureRecord) -> Result<Vec<f64>> {
        let mut out = Vec::with_capacity(self.output_width());
        self.scaler.transform_into(record.numeric(), &mut out);
        self.encoder.transform_into(record.categorical(), &mut out)?;
        Ok(out)
    }
}
