//! Yield model: fitted feature transformer and regressor
//!
//! ```text
//! FeatureRecord → Preprocessor (scale + one-hot) → Regressor → hg/ha
//! ```

mod artifact;
pub mod error;
pub mod features;
pub mod pipeline;
pub mod preprocessor;
pub mod regressor;

pub use error::ModelError;
pub use features::FeatureRecord;
pub use pipeline::{ArtifactPipeline, YieldModel};
pub use preprocessor::Preprocessor;
pub use regressor::Regressor;
