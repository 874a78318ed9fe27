//! HTTP clients for the detection workflow and the text generation service.
//!
//! Both client traits are synchronous to keep the engine embeddable in
//! synchronous callers. Each client owns a current-thread Tokio runtime and
//! bridges to it with [`Bridge::block_on`].

mod detection;
mod generation;

use std::future::Future;

use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

pub use detection::{DEFAULT_DETECTION_URL, DetectionClientConfig, HttpDetectionClient};
pub use generation::{
    API_VERSION, DEFAULT_GENERATION_URL, DEFAULT_MODEL, HttpTextGenerator, TextGeneratorConfig,
};

/// Default user agent for outgoing requests.
pub const DEFAULT_USER_AGENT: &str = "gsplit-engine/0.1";

/// Error type for HTTP client construction failures.
#[derive(Debug)]
pub enum ClientBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ClientBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ClientBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Transport failure classes shared by both clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Failure {
    Timeout,
    Status(u16),
    Network,
}

impl Failure {
    pub(crate) fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if let Some(status) = error.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Network
        }
    }
}

/// Owned runtime plus the logic for choosing where to block.
pub(crate) struct Bridge {
    runtime: Runtime,
}

impl std::fmt::Debug for Bridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("<tokio::runtime::Runtime>")
    }
}

impl Bridge {
    pub(crate) fn new() -> Result<Self, ClientBuildError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ClientBuildError::Runtime)?;
        Ok(Self { runtime })
    }

    /// Drive `future` to completion.
    ///
    /// Inside a multi-threaded runtime the caller's runtime is reused via
    /// `block_in_place`. Outside any runtime, or inside a `current_thread`
    /// runtime, the owned runtime is used; the latter may deadlock if the
    /// caller's runtime drives IO this request depends on.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }
}

pub(crate) fn build_client(
    user_agent: &str,
    timeout: std::time::Duration,
) -> Result<reqwest::Client, ClientBuildError> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(ClientBuildError::HttpClient)
}
