//! Chat-completion client
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. The default
//! target is Groq.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::AdvisoryError;

pub const DEFAULT_GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

/// Value shipped in old `.env` templates; treated as "not configured"
pub const PLACEHOLDER_API_KEY: &str = "your-groq-api-key-here";

const TEMPERATURE: f32 = 0.3;
const MAX_TOKENS: u32 = 1500;

/// Single-prompt chat completion
#[async_trait]
pub trait ChatCompletionClient: Send + Sync {
    /// Send `prompt` as one user message and return the reply text
    async fn complete(&self, prompt: &str) -> Result<String, AdvisoryError>;

    /// Model name for logging
    fn model_name(&self) -> &str;
}

/// Connection settings for [`GroqClient`]
#[derive(Debug, Clone)]
pub struct GroqSettings {
    pub api_key: String,
    pub url: String,
    pub model: String,
    pub timeout: Duration,
}

impl GroqSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            url: DEFAULT_GROQ_URL.to_string(),
            model: DEFAULT_GROQ_MODEL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Returns `false` for a missing, blank or placeholder key
pub fn is_usable_api_key(key: Option<&str>) -> bool {
    key.map(str::trim)
        .is_some_and(|k| !k.is_empty() && k != PLACEHOLDER_API_KEY)
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: String,
}

#[derive(Clone)]
pub struct GroqClient {
    settings: GroqSettings,
    client: reqwest::Client,
}

impl GroqClient {
    pub fn new(settings: GroqSettings) -> Result<Self, AdvisoryError> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;
        Ok(Self { settings, client })
    }
}

#[async_trait]
impl ChatCompletionClient for GroqClient {
    async fn complete(&self, prompt: &str) -> Result<String, AdvisoryError> {
        let body = ChatRequest {
            model: &self.settings.model,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.settings.url)
            .bearer_auth(&self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(AdvisoryError::UpstreamStatus {
                status: status.as_u16(),
                body: text,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&text)
            .map_err(|e| AdvisoryError::MalformedEnvelope(e.to_string()))?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AdvisoryError::MalformedEnvelope("no choices returned".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;

    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    use super::*;

    async fn spawn_upstream(app: Router) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn client_for(addr: SocketAddr, timeout: Duration) -> GroqClient {
        let mut settings = GroqSettings::new("test-key");
        settings.url = format!("http://{addr}/openai/v1/chat/completions");
        settings.timeout = timeout;
        GroqClient::new(settings).unwrap()
    }

    #[test]
    fn test_usable_api_key() {
        assert!(is_usable_api_key(Some("gsk_abc")));
        assert!(!is_usable_api_key(None));
        assert!(!is_usable_api_key(Some("  ")));
        assert!(!is_usable_api_key(Some(PLACEHOLDER_API_KEY)));
    }

    #[test]
    fn test_default_settings() {
        let settings = GroqSettings::new("k");
        assert_eq!(settings.url, DEFAULT_GROQ_URL);
        assert_eq!(settings.model, DEFAULT_GROQ_MODEL);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_complete_sends_request_and_reads_content() {
        async fn handler(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
            assert_eq!(headers["authorization"], "Bearer test-key");
            assert_eq!(body["model"], DEFAULT_GROQ_MODEL);
            assert_eq!(body["max_tokens"], 1500);
            assert_eq!(body["messages"][0]["role"], "user");
            assert_eq!(body["messages"][0]["content"], "hello");
            Json(json!({"choices": [{"message": {"role": "assistant", "content": "{\"ok\":true}"}}]}))
        }
        let addr = spawn_upstream(Router::new().route("/openai/v1/chat/completions", post(handler))).await;

        let client = client_for(addr, Duration::from_secs(5));
        assert_eq!(client.complete("hello").await.unwrap(), "{\"ok\":true}");
    }

    #[tokio::test]
    async fn test_non_success_status_carries_body() {
        let app = Router::new().route(
            "/openai/v1/chat/completions",
            post(|| async { (StatusCode::UNAUTHORIZED, "invalid api key") }),
        );
        let addr = spawn_upstream(app).await;

        let err = client_for(addr, Duration::from_secs(5))
            .complete("hi")
            .await
            .unwrap_err();
        match err {
            AdvisoryError::UpstreamStatus { status, body } => {
                assert_eq!(status, 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_empty_choices_is_malformed() {
        let app = Router::new().route(
            "/openai/v1/chat/completions",
            post(|| async { Json(json!({"choices": []})) }),
        );
        let addr = spawn_upstream(app).await;

        let err = client_for(addr, Duration::from_secs(5))
            .complete("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisoryError::MalformedEnvelope(_)));
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out() {
        let app = Router::new().route(
            "/openai/v1/chat/completions",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({"choices": []}))
            }),
        );
        let addr = spawn_upstream(app).await;

        let err = client_for(addr, Duration::from_millis(200))
            .complete("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisoryError::Timeout), "got {err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(addr, Duration::from_secs(5))
            .complete("hi")
            .await
            .unwrap_err();
        assert!(matches!(err, AdvisoryError::Transport(_)), "got {err:?}");
    }
}
