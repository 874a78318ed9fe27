//! [`DetectionClient`] over the hosted detection workflow.

use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use gsplit_core::{DetectionClient, DetectionClientError, DetectionResults};
use reqwest::Client;
use serde::Serialize;

use super::{Bridge, ClientBuildError, DEFAULT_USER_AGENT, Failure, build_client};
use crate::workflow::parse_workflow_response;

/// Default workflow service base URL.
pub const DEFAULT_DETECTION_URL: &str = "https://detect.roboflow.com";

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for [`HttpDetectionClient`].
#[derive(Clone)]
pub struct DetectionClientConfig {
    /// Service base URL.
    pub base_url: String,
    /// Workspace owning the workflow.
    pub workspace: String,
    /// Workflow identifier.
    pub workflow_id: String,
    /// API key sent in the request body.
    pub api_key: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl std::fmt::Debug for DetectionClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionClientConfig")
            .field("base_url", &self.base_url)
            .field("workspace", &self.workspace)
            .field("workflow_id", &self.workflow_id)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl DetectionClientConfig {
    /// Configuration for `workflow_id` in `workspace` against the default
    /// service.
    #[must_use]
    pub fn new(workspace: impl Into<String>, workflow_id: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_DETECTION_URL.to_owned(),
            workspace: workspace.into(),
            workflow_id: workflow_id.into(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }

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

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Workflow endpoint: `{base_url}/infer/workflows/{workspace}/{workflow_id}`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}/infer/workflows/{}/{}",
            self.base_url.trim_end_matches('/'),
            self.workspace,
            self.workflow_id
        )
    }
}

#[derive(Debug, Serialize)]
struct ImageInput<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    value: &'a str,
}

#[derive(Debug, Serialize)]
struct Inputs<'a> {
    image: ImageInput<'a>,
}

#[derive(Debug, Serialize)]
struct WorkflowRequest<'a> {
    api_key: &'a str,
    inputs: Inputs<'a>,
}

/// Encode `image` as the workflow request body.
fn request_body(api_key: &str, image: &[u8]) -> Result<Vec<u8>, DetectionClientError> {
    let encoded = STANDARD.encode(image);
    let request = WorkflowRequest {
        api_key,
        inputs: Inputs {
            image: ImageInput {
                kind: "base64",
                value: &encoded,
            },
        },
    };
    serde_json::to_vec(&request).map_err(|err| DetectionClientError::Parse {
        message: err.to_string(),
    })
}

/// Detection client that posts base64 images to the workflow endpoint.
///
/// # Example
///
/// ```no_run
/// use gsplit_core::DetectionClient;
/// use gsplit_data::{DetectionClientConfig, HttpDetectionClient};
///
/// let config = DetectionClientConfig::new("my-workspace", "split-g")
///     .with_api_key("key-from-the-environment");
/// let client = HttpDetectionClient::with_config(config)?;
/// let results = client.detect(&std::fs::read("pint.jpg")?)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HttpDetectionClient {
    client: Client,
    config: DetectionClientConfig,
    bridge: Bridge,
}

impl HttpDetectionClient {
    /// Build a client from `config`.
    ///
    /// # Errors
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: DetectionClientConfig) -> Result<Self, ClientBuildError> {
        Ok(Self {
            client: build_client(&config.user_agent, config.timeout)?,
            bridge: Bridge::new()?,
            config,
        })
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &DetectionClientConfig {
        &self.config
    }

    async fn detect_async(
        &self,
        api_key: &str,
        image: &[u8],
    ) -> Result<DetectionResults, DetectionClientError> {
        let url = self.config.endpoint();
        let body = request_body(api_key, image)?;
        log::debug!("posting {} byte image to {url}", image.len());

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &url))?;
        parse_workflow_response(&bytes)
    }

    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> DetectionClientError {
        let url = url.to_owned();
        match Failure::classify(error) {
            Failure::Timeout => DetectionClientError::Timeout {
                url,
                timeout_secs: self.config.timeout.as_secs(),
            },
            Failure::Status(status) => DetectionClientError::Http {
                url,
                status,
                message: error.to_string(),
            },
            Failure::Network => DetectionClientError::Network {
                url,
                message: error.to_string(),
            },
        }
    }
}

impl DetectionClient for HttpDetectionClient {
    fn detect(&self, image: &[u8]) -> Result<DetectionResults, DetectionClientError> {
        if image.is_empty() {
            return Err(DetectionClientError::EmptyImage);
        }
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(DetectionClientError::MissingCredential);
        };
        self.bridge.block_on(self.detect_async(api_key, image))
    }
}
