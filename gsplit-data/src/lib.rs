//! Adapters between the scoring engine and the outside world.
//!
//! Responsibilities:
//! - Parse the detection workflow's JSON into typed detection sets.
//! - Implement [`gsplit_core::DetectionClient`] and
//!   [`gsplit_core::TextGenerator`] over HTTP.
//! - Persist visualisation frames as JSON annotation documents.
//!
//! Boundaries:
//! - No scoring rules live here; those belong to `gsplit-scorer`.
//! - Clients are synchronous at the trait boundary and own the runtime that
//!   drives their async transport.
#![forbid(unsafe_code)]

pub mod http;
mod sink;
pub mod workflow;

pub use http::{
    ClientBuildError, DEFAULT_USER_AGENT, DetectionClientConfig, HttpDetectionClient,
    HttpTextGenerator, TextGeneratorConfig,
};
pub use sink::FileVisualizationSink;
pub use workflow::parse_workflow_response;
