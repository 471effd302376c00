use thiserror::Error;

/// Errors from loading or running the yield model
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode JSON artifact {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode binary artifact {path}: {source}")]
    Bincode {
        path: String,
        #[source]
        source: bincode::Error,
    },

    #[error("invalid artifact: {0}")]
    InvalidArtifact(String),

    #[error("unknown category '{value}' for column '{column}'")]
    UnknownCategory { column: &'static str, value: String },

    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },

    #[error("model produced a non-finite prediction ({0})")]
    NonFinite(f64),
}

pub type Result<T> = std::result::Result<T, ModelError>;
