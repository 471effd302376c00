//! FarmAI server
//!
//! Crop yield prediction from a pre-trained regression model, plus an AI crop
//! advisory relayed from an OpenAI-compatible chat-completion API.
//!
//! ## Architecture
//!
//! ```text
//! POST /predict       → Vocabulary match → Preprocessor → Regressor → JSON
//! POST /api/advisory  → prompt → chat completion → slice {..} → JSON
//! ```
//!
//! All shared data (vocabulary, model, upstream client) is loaded once into
//! [`state::AppState`] and is read-only afterwards.

pub mod advisory;
pub mod api;
pub mod config;
pub mod model;
pub mod predictor;
pub mod startup;
pub mod state;
pub mod vocabulary;

pub use api::build_router;
pub use config::Config;
pub use state::AppState;
