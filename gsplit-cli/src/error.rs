//! Error types emitted by the gsplit CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use gsplit_core::{AnalysisError, DetectionClientError};
use gsplit_data::ClientBuildError;
use gsplit_feedback::FeedbackTableError;
use gsplit_scorer::ScoringConfigError;
use thiserror::Error;

/// Errors emitted by the gsplit CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Option name.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected or read.
    #[error("failed to read {field} path {path:?}: {source}")]
    ReadSource {
        /// Option name.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The scoring constants file was not valid JSON.
    #[error("failed to parse scoring constants at {path:?}: {source}")]
    ParseConstants {
        /// Constants file.
        path: Utf8PathBuf,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// Scoring constants failed validation.
    #[error(transparent)]
    InvalidConstants(#[from] ScoringConfigError),
    /// The feedback table or generation policy failed validation.
    #[error(transparent)]
    InvalidFeedback(#[from] FeedbackTableError),
    /// A rating lay outside `0.0..=5.0`.
    #[error("{field} must be between 0 and 5, got {value}")]
    InvalidRating {
        /// Option name.
        field: &'static str,
        /// Offending value.
        value: f64,
    },
    /// A saved workflow response could not be parsed.
    #[error("failed to parse workflow response at {path:?}: {source}")]
    ParseResponse {
        /// Response file.
        path: Utf8PathBuf,
        /// Parser error.
        #[source]
        source: DetectionClientError,
    },
    /// Building an HTTP client failed.
    #[error("failed to build {service} client: {source}")]
    BuildClient {
        /// Which service the client talks to.
        service: &'static str,
        /// Construction error.
        #[source]
        source: ClientBuildError,
    },
    /// The analysis failed.
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
    /// Serialising the output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing the output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
