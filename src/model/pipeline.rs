//! Transform-then-predict pipeline

use std::path::Path;

use super::artifact;
use super::error::{ModelError, Result};
use super::features::FeatureRecord;
use super::preprocessor::Preprocessor;
use super::regressor::Regressor;

/// Anything that can turn a feature record into a raw yield (hg/ha)
///
/// Implementations are read-only after construction and shared across
/// requests.
pub trait YieldModel: Send + Sync {
    fn predict(&self, record: &FeatureRecord) -> Result<f64>;
}

/// Fitted preprocessor plus regressor loaded from disk
#[derive(Debug, Clone)]
pub struct ArtifactPipeline {
    preprocessor: Preprocessor,
    regressor: Regressor,
}

impl ArtifactPipeline {
    pub fn new(preprocessor: Preprocessor, regressor: Regressor) -> Result<Self> {
        preprocessor.validate()?;
        regressor.validate()?;

        let width = preprocessor.output_width();
        if width != regressor.n_features() {
            return Err(ModelError::InvalidArtifact(format!(
                "preprocessor emits {width} features but model expects {}",
                regressor.n_features()
            )));
        }

        Ok(Self {
            preprocessor,
            regressor,
        })
    }

    pub fn load(model_path: impl AsRef<Path>, preprocessor_path: impl AsRef<Path>) -> Result<Self> {
        let preprocessor: Preprocessor = artifact::load(preprocessor_path)?;
        let regressor: Regressor = artifact::load(model_path)?;
        Self::new(preprocessor, regressor)
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn regressor(&self) -> &Regressor {
        &self.regressor
    }
}

impl YieldModel for ArtifactPipeline {
    fn predict(&self, record: &FeatureRecord) -> Result<f64> {
        let x = self.preprocessor.transform(record)?;
        self.regressor.predict(&x)
    }
}
