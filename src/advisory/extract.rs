//! Pull the JSON object out of a chat reply
//!
//! Models often wrap the object in prose or a ```json fence. Everything
//! outside the first `{` and the last `}` is dropped.

use super::document::AdvisoryDocument;
use super::error::AdvisoryError;

/// Slice from the first `{` to the last `}` inclusive
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

pub fn parse_advisory(text: &str) -> Result<AdvisoryDocument, AdvisoryError> {
    let unparsable = || AdvisoryError::Unparsable {
        raw: text.trim().to_string(),
    };

    let json = extract_json_object(text).ok_or_else(unparsable)?;
    serde_json::from_str(json).map_err(|e| {
        tracing::debug!(error = %e, "advisory reply is not valid JSON");
        unparsable()
    })
}
