//! [`TextGenerator`] over a messages-style LLM API.

use std::time::Duration;

use gsplit_core::{TextGenerationError, TextGenerator};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Bridge, ClientBuildError, DEFAULT_USER_AGENT, Failure, build_client};

/// Default messages API base URL.
pub const DEFAULT_GENERATION_URL: &str = "https://api.anthropic.com";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
/// API version header value.
pub const API_VERSION: &str = "2023-06-01";

const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Configuration for [`HttpTextGenerator`].
#[derive(Clone)]
pub struct TextGeneratorConfig {
    /// Service base URL.
    pub base_url: String,
    /// API key; without one every call fails with
    /// [`TextGenerationError::MissingCredential`].
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl std::fmt::Debug for TextGeneratorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextGeneratorConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for TextGeneratorConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GENERATION_URL.to_owned(),
            api_key: None,
            model: DEFAULT_MODEL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl TextGeneratorConfig {
    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the service base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

/// First non-empty text block of a messages response, trimmed.
fn reply_text(body: &[u8]) -> Result<String, TextGenerationError> {
    let response: MessagesResponse =
        serde_json::from_slice(body).map_err(|err| TextGenerationError::Parse {
            message: err.to_string(),
        })?;
    response
        .content
        .into_iter()
        .filter(|block| block.kind == "text")
        .find_map(|block| block.text)
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty())
        .ok_or(TextGenerationError::EmptyResponse)
}

/// Text generator backed by the messages API.
#[derive(Debug)]
pub struct HttpTextGenerator {
    client: Client,
    config: TextGeneratorConfig,
    bridge: Bridge,
}

impl HttpTextGenerator {
    /// Build a generator from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: TextGeneratorConfig) -> Result<Self, ClientBuildError> {
        Ok(Self {
            client: build_client(&config.user_agent, config.timeout)?,
            bridge: Bridge::new()?,
            config,
        })
    }

    /// Whether an API key is configured.
    #[must_use]
    pub const fn has_credential(&self) -> bool {
        self.config.api_key.is_some()
    }

    async fn generate_async(
        &self,
        api_key: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String, TextGenerationError> {
        let url = self.config.endpoint();
        let request = MessagesRequest {
            model: &self.config.model,
            max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };
        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        reply_text(&bytes)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> TextGenerationError {
        let url = url.to_owned();
        match Failure::classify(error) {
            Failure::Timeout => TextGenerationError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            },
            Failure::Status(status) => TextGenerationError::Http {
                url,
                status,
                message: error.to_string(),
            },
            Failure::Network => TextGenerationError::Network {
                url,
                message: error.to_string(),
            },
        }
    }
}

impl TextGenerator for HttpTextGenerator {
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, TextGenerationError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(TextGenerationError::MissingCredential);
        };
        self.bridge
            .block_on(self.generate_async(api_key, prompt, max_tokens))
    }
}
