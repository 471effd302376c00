//! Advisory relay: prompt the chat model and parse its reply
//!
//! Blank crop names are rejected before the credential check, and neither
//! case reaches the upstream.

use std::sync::Arc;

use super::client::ChatCompletionClient;
use super::document::AdvisoryDocument;
use super::error::AdvisoryError;
use super::extract::parse_advisory;
use super::prompt::build_prompt;

/// Crop advisory relay
///
/// `client` is `None` when no usable API key was configured; requests then
/// fail with [`AdvisoryError::MissingCredential`] instead of reaching out.
#[derive(Clone)]
pub struct AdvisoryService {
    client: Option<Arc<dyn ChatCompletionClient>>,
}

impl AdvisoryService {
    pub fn new(client: Option<Arc<dyn ChatCompletionClient>>) -> Self {
        Self { client }
    }

    pub fn disabled() -> Self {
        Self { client: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.client.is_some()
    }

    pub async fn get_advisory(&self, crop: &str) -> Result<AdvisoryDocument, AdvisoryError> {
        let crop = crop.trim();
        if crop.is_empty() {
            return Err(AdvisoryError::MissingCrop);
        }
        let client = self
            .client
            .as_ref()
            .ok_or(AdvisoryError::MissingCredential)?;

        tracing::info!(crop, model = client.model_name(), "requesting crop advisory");
        let reply = client.complete(&build_prompt(crop)).await?;
        parse_advisory(&reply)
    }
}
