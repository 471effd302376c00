//! Feature record consumed by the yield pipeline

use serde::{Deserialize, Serialize};

/// Number of numeric columns ahead of the categorical ones
pub const NUMERIC_FEATURES: usize = 4;

/// One row of model input, in training column order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub year: f64,
    pub average_rain_fall_mm_per_year: f64,
    pub pesticides_tonnes: f64,
    pub avg_temp: f64,
    pub area: String,
    pub item: String,
}

impl FeatureRecord {
    pub fn numeric(&self) -> [f64; NUMERIC_FEATURES] {
        [
            self.year,
            self.average_rain_fall_mm_per_year,
            self.pesticides_tonnes,
            self.avg_temp,
        ]
    }

    pub fn categorical(&self) -> [&str; 2] {
        [self.area.as_str(), self.item.as_str()]
    }
}
