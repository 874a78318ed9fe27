//! Core domain types for the split-the-G scoring engine.
//!
//! This crate holds the detection model, the geometry normaliser, score and
//! analysis payloads, and the narrow traits through which the engine reaches
//! the detection service, the text generation service and an optional
//! visualisation sink. It performs no IO of its own.

#![forbid(unsafe_code)]

pub mod analysis;
pub mod anchor;
pub mod client;
pub mod detection;
pub mod geometry;
pub mod score;
pub mod visualization;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use analysis::{
    AnalysisError, AnalysisResult, DEFAULT_CONFIDENCE, DetectionAvailability, ZONE_CONFIDENCE,
    confidence_for,
};
pub use anchor::{AnchorLine, AnchorRole, Provenance};
pub use client::{DetectionClient, DetectionClientError, TextGenerationError, TextGenerator};
pub use detection::{
    CropOrigin, Detection, DetectionError, DetectionResults, DetectionSet, ImageSize, ModelOutput,
};
pub use geometry::{CropWindow, GeometryError};
pub use score::{ScoreAnchors, ScoreResult, ScoreTier, ScoreWarning};
pub use visualization::{NullSink, VisualizationError, VisualizationFrame, VisualizationSink};
