//! Narrow interfaces to the two external services.
//!
//! Both traits are synchronous so the scoring core stays embeddable in
//! synchronous contexts. HTTP implementations live in `gsplit-data`.

mod detection;
mod generation;

pub use detection::{DetectionClient, DetectionClientError};
pub use generation::{TextGenerationError, TextGenerator};
