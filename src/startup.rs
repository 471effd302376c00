//! Start-up wiring: load artifacts and build [`AppState`]

use std::sync::Arc;

use anyhow::Context;

use crate::advisory::{AdvisoryService, ChatCompletionClient, GroqClient};
use crate::config::Config;
use crate::model::{ArtifactPipeline, Preprocessor};
use crate::state::AppState;
use crate::vocabulary::Vocabulary;

pub fn load_state(config: &Config) -> anyhow::Result<AppState> {
    let vocab_path = config.valid_inputs_path();
    let vocabulary = Vocabulary::from_file(&vocab_path)
        .with_context(|| format!("loading vocabulary from {}", vocab_path.display()))?;
    tracing::info!(
        path = %vocab_path.display(),
        areas = vocabulary.areas().len(),
        items = vocabulary.items().len(),
        "vocabulary loaded"
    );

    let model_path = config.model_path();
    let preprocessor_path = config.preprocessor_path();
    let pipeline = ArtifactPipeline::load(&model_path, &preprocessor_path).with_context(|| {
        format!(
            "loading model {} with preprocessor {}",
            model_path.display(),
            preprocessor_path.display()
        )
    })?;
    tracing::info!(
        model = %model_path.display(),
        preprocessor = %preprocessor_path.display(),
        features = pipeline.regressor().n_features(),
        "model loaded"
    );

    for gap in uncovered_entries(&vocabulary, pipeline.preprocessor()) {
        tracing::warn!(entry = %gap, "vocabulary entry unknown to the one-hot encoder");
    }

    let advisory = match config.groq_settings() {
        Some(settings) => {
            let client = GroqClient::new(settings).context("building advisory client")?;
            tracing::info!(model = client.model_name(), "advisory API key loaded");
            AdvisoryService::new(Some(Arc::new(client)))
        }
        None => {
            tracing::warn!("GROQ_API_KEY not set; /api/advisory will report a configuration error");
            AdvisoryService::disabled()
        }
    };

    AppState::new(Arc::new(vocabulary), Arc::new(pipeline), advisory)
}

/// Vocabulary entries the encoder has no column for
pub fn uncovered_entries(vocabulary: &Vocabulary, preprocessor: &Preprocessor) -> Vec<String> {
    let areas = vocabulary
        .areas()
        .iter()
        .filter(|a| !preprocessor.area_categories().contains(a))
        .map(|a| format!("Area: {a}"));
    let items = vocabulary
        .items()
        .iter()
        .filter(|i| !preprocessor.item_categories().contains(i))
        .map(|i| format!("Item: {i}"));
    areas.chain(items).collect()
}
