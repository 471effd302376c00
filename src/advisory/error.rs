use thiserror::Error;

/// Failures of the advisory relay
#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("No crop name provided.")]
    MissingCrop,

    #[error("Groq API key not set. Set GROQ_API_KEY in the environment or .env file. Get a free key at https://console.groq.com")]
    MissingCredential,

    #[error("Groq API error: {status}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Failed to parse AI response.")]
    Unparsable { raw: String },

    #[error("Server error: malformed completion response: {0}")]
    MalformedEnvelope(String),

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Server error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for AdvisoryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            AdvisoryError::Timeout
        } else {
            AdvisoryError::Transport(e.to_string())
        }
    }
}
