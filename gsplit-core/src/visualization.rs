//! Optional debug visualisation capability.
//!
//! Scoring never touches the filesystem itself. Callers that want annotated
//! output inject a [`VisualizationSink`]; sink failures are reported to the
//! caller, which logs and ignores them.

use thiserror::Error;

use crate::anchor::AnchorLine;
use crate::geometry::CropWindow;
use crate::score::ScoreTier;

/// Annotation data for one analysed image.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisualizationFrame {
    /// Name of the source image, typically its file stem.
    pub label: String,
    /// Tier that produced the score.
    pub tier: ScoreTier,
    /// Region of the full image the anchors are expressed in.
    pub window: CropWindow,
    /// Anchor lines, normalised to [`VisualizationFrame::window`].
    pub lines: Vec<AnchorLine>,
    /// Distance label drawn next to the lines.
    pub distance_mm: f64,
    /// Score drawn in the caption.
    pub score: f64,
}

/// Errors raised by a [`VisualizationSink`].
#[derive(Debug, Error)]
pub enum VisualizationError {
    /// Writing the annotation failed.
    #[error("failed to write visualisation to {target}: {source}")]
    Io {
        /// Destination that could not be written.
        target: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The frame could not be encoded.
    #[error("failed to encode visualisation: {message}")]
    Encode {
        /// Encoder error description.
        message: String,
    },
}

/// Receives one [`VisualizationFrame`] per analysis.
pub trait VisualizationSink: Send + Sync {
    /// Record `frame`.
    ///
    /// # Errors
    /// Returns [`VisualizationError`] when the frame cannot be persisted.
    fn record(&self, frame: &VisualizationFrame) -> Result<(), VisualizationError>;
}

/// Sink that discards every frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl VisualizationSink for NullSink {
    fn record(&self, _frame: &VisualizationFrame) -> Result<(), VisualizationError> {
        Ok(())
    }
}
