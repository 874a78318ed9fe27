//! Text generation interface.

use thiserror::Error;

/// Errors from [`TextGenerator::generate`].
///
/// Feedback selection absorbs all of these and falls back to canned text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextGenerationError {
    /// No credential is configured; no request was attempted.
    #[error("text generation is unavailable: no credential configured")]
    MissingCredential,
    /// The request exceeded its timeout.
    #[error("text generation request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service could not be reached.
    #[error("text generation request to {url} failed: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service answered with an error status.
    #[error("text generation service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body was malformed.
    #[error("failed to parse text generation response: {message}")]
    Parse {
        /// Parser error description.
        message: String,
    },
    /// The service returned no usable text.
    #[error("text generation returned no text")]
    EmptyResponse,
}

/// Produce a short piece of text for a prompt.
pub trait TextGenerator: Send + Sync {
    /// Generate at most `max_tokens` tokens in reply to `prompt`.
    ///
    /// # Errors
    /// Returns [`TextGenerationError`] on any failure, including a missing
    /// credential.
    fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, TextGenerationError>;
}
