//! The sample artifacts under `artifacts/` must load and serve predictions.

use std::path::PathBuf;

use clap::Parser;
use farmai::model::{ArtifactPipeline, FeatureRecord, YieldModel};
use farmai::startup::{load_state, uncovered_entries};
use farmai::vocabulary::Vocabulary;
use farmai::Config;

fn artifacts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("artifacts")
}

fn record(area: &str, item: &str) -> FeatureRecord {
    FeatureRecord {
        year: 2010.0,
        average_rain_fall_mm_per_year: 1200.0,
        pesticides_tonnes: 5000.0,
        avg_temp: 18.0,
        area: area.to_string(),
        item: item.to_string(),
    }
}

#[test]
fn sample_artifacts_are_consistent() {
    let dir = artifacts_dir();
    let vocab = Vocabulary::from_file(dir.join("valid_inputs.json")).unwrap();
    let pipeline =
        ArtifactPipeline::load(dir.join("model.json"), dir.join("preprocessor.json")).unwrap();

    assert!(uncovered_entries(&vocab, pipeline.preprocessor()).is_empty());

    let potatoes = pipeline.predict(&record("India", "Potatoes")).unwrap();
    let wheat = pipeline.predict(&record("India", "Wheat")).unwrap();
    assert!(potatoes > wheat, "potatoes {potatoes} vs wheat {wheat}");
}

#[test]
fn sample_artifacts_build_state() {
    let config = Config::try_parse_from([
        "farmai-server",
        "--artifacts-dir",
        artifacts_dir().to_str().unwrap(),
        "--groq-api-key",
        "your-groq-api-key-here",
    ])
    .unwrap();

    let state = load_state(&config).unwrap();
    assert!(!state.advisory.is_enabled());
    assert_eq!(state.vocabulary.areas().len(), 5);
}
