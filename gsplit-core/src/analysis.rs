//! The full analysis payload handed to the boundary layer.

use thiserror::Error;

use crate::client::DetectionClientError;
use crate::geometry::GeometryError;
use crate::score::{ScoreAnchors, ScoreResult, ScoreTier, ScoreWarning};

/// Confidence reported when the beer line entered the target zone.
pub const ZONE_CONFIDENCE: f64 = 0.95;
/// Confidence reported otherwise.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// Fixed confidence projection of `zone_entered`.
///
/// This is not a model probability.
#[must_use]
pub const fn confidence_for(zone_entered: bool) -> f64 {
    if zone_entered {
        ZONE_CONFIDENCE
    } else {
        DEFAULT_CONFIDENCE
    }
}

/// Which signals the detection workflow produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionAvailability {
    /// A qualifying beer-line prediction.
    pub beer_line: bool,
    /// A qualifying reference-bar prediction.
    pub reference_bar: bool,
    /// A coarse liquid-region prediction.
    pub liquid_region: bool,
    /// A coarse logo prediction.
    pub logo: bool,
}

/// Response payload for one analysed image.
///
/// The first five fields form the stable external contract; the remainder
/// are diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisResult {
    /// Surfaced score after the boundary policy.
    pub score: f64,
    /// Distance proxy from the engine.
    pub distance_from_line_mm: f64,
    /// Whether the beer line sat inside the target zone.
    pub zone_entered: bool,
    /// See [`confidence_for`].
    pub confidence: f64,
    /// Feedback text.
    pub feedback: String,
    /// Whether the feedback came from the text generation service.
    #[cfg_attr(feature = "serde", serde(default))]
    pub feedback_generated: bool,
    /// Tier that produced the score.
    pub tier: ScoreTier,
    /// Signals that were available.
    #[cfg_attr(feature = "serde", serde(default))]
    pub detections: DetectionAvailability,
    /// Anchors that fed the score.
    #[cfg_attr(feature = "serde", serde(default))]
    pub anchors: ScoreAnchors,
    /// Non-fatal scoring conditions.
    #[cfg_attr(feature = "serde", serde(default))]
    pub warnings: Vec<ScoreWarning>,
    /// Width of the coarse logo box in pixels, when detected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub logo_width: Option<f64>,
    /// Height of the coarse logo box in pixels, when detected.
    #[cfg_attr(feature = "serde", serde(default))]
    pub logo_height: Option<f64>,
}

impl AnalysisResult {
    /// Combine a raw score with its feedback text.
    ///
    /// The score is copied unchanged; boundary policies are applied
    /// separately, exactly once.
    #[must_use]
    pub fn new(score: ScoreResult, feedback: String, feedback_generated: bool) -> Self {
        Self {
            score: score.score,
            distance_from_line_mm: score.distance_mm,
            zone_entered: score.zone_entered,
            confidence: confidence_for(score.zone_entered),
            feedback,
            feedback_generated,
            tier: score.tier,
            detections: DetectionAvailability::default(),
            anchors: score.anchors,
            warnings: score.warnings,
            logo_width: None,
            logo_height: None,
        }
    }

    /// Attach detection availability flags.
    #[must_use]
    pub const fn with_detections(mut self, detections: DetectionAvailability) -> Self {
        self.detections = detections;
        self
    }

    /// Attach the coarse logo box dimensions.
    #[must_use]
    pub const fn with_logo_size(mut self, width: f64, height: f64) -> Self {
        self.logo_width = Some(width);
        self.logo_height = Some(height);
        self
    }
}

/// Errors that fail an analysis.
///
/// Insufficient detections are not an error: they produce the UNMATCHED
/// floor result. Text generation failures never reach this level.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The detection service call failed.
    #[error("detection unavailable: {0}")]
    DetectionUnavailable(#[from] DetectionClientError),
    /// Detection geometry was malformed.
    #[error("invalid detection: {0}")]
    InvalidDetection(#[from] GeometryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, 0.95)]
    #[case(false, 0.5)]
    fn confidence_is_a_fixed_projection(#[case] zone_entered: bool, #[case] expected: f64) {
        assert_eq!(confidence_for(zone_entered), expected);
    }

    #[rstest]
    fn new_copies_score_fields() {
        let mut raw = ScoreResult::floor(10.0, 50.0);
        raw.zone_entered = true;
        let result = AnalysisResult::new(raw, "Grim.".to_owned(), false).with_logo_size(80.0, 120.0);
        assert_eq!(result.score, 10.0);
        assert_eq!(result.distance_from_line_mm, 50.0);
        assert_eq!(result.confidence, 0.95);
        assert_eq!(result.logo_height, Some(120.0));
    }
}
