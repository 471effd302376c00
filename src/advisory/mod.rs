//! AI crop advisory relay
//!
//! ```text
//! crop name → prompt → chat completion → slice {..} → AdvisoryDocument
//! ```

pub mod client;
pub mod document;
pub mod error;
pub mod extract;
pub mod prompt;
pub mod service;

pub use client::{ChatCompletionClient, GroqClient, GroqSettings};
pub use document::AdvisoryDocument;
pub use error::AdvisoryError;
pub use service::AdvisoryService;
