//! Detection service interface.

use thiserror::Error;

use crate::detection::DetectionResults;

/// Errors from [`DetectionClient::detect`].
///
/// Any of these fails the analysis as a whole; no partial score is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DetectionClientError {
    /// No image bytes were supplied.
    #[error("image payload is empty")]
    EmptyImage,
    /// The client has no credential for the detection service.
    #[error("detection service credential is not configured")]
    MissingCredential,
    /// The request exceeded its timeout.
    #[error("detection request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Request URL.
        url: String,
        /// Configured timeout in seconds.
        timeout_secs: u64,
    },
    /// The service could not be reached.
    #[error("detection request to {url} failed: {message}")]
    Network {
        /// Request URL.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service answered with an error status.
    #[error("detection service at {url} returned HTTP {status}: {message}")]
    Http {
        /// Request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body was not a recognisable workflow result.
    #[error("failed to parse detection response: {message}")]
    Parse {
        /// Parser error description.
        message: String,
    },
}

/// Run the external multi-model detection workflow on an image.
///
/// Implementations return one [`DetectionSet`](crate::DetectionSet) per model
/// output. Outputs the service omitted must be empty sets rather than errors.
///
/// # Examples
///
/// ```rust
/// use gsplit_core::{DetectionClient, DetectionClientError, DetectionResults};
///
/// struct NothingFound;
///
/// impl DetectionClient for NothingFound {
///     fn detect(&self, image: &[u8]) -> Result<DetectionResults, DetectionClientError> {
///         if image.is_empty() {
///             return Err(DetectionClientError::EmptyImage);
///         }
///         Ok(DetectionResults::new())
///     }
/// }
///
/// let results = NothingFound.detect(b"jpeg")?;
/// assert!(results.line.is_empty());
/// # Ok::<(), DetectionClientError>(())
/// ```
pub trait DetectionClient: Send + Sync {
    /// Detect objects in `image`.
    ///
    /// # Errors
    /// Returns [`DetectionClientError`] when the service call fails.
    fn detect(&self, image: &[u8]) -> Result<DetectionResults, DetectionClientError>;
}
