//! Outlier clamp applied once, after the engine, before a score is surfaced.

use gsplit_core::AnalysisResult;
use serde::{Deserialize, Serialize};

use crate::ScoringConfigError;
use crate::engine::round_to;

/// Caps and penalties applied to surfaced scores.
///
/// Steps run in order and compound: the headroom cap, then the distance cap,
/// then the low-confidence penalty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryPolicy {
    /// Highest score ever surfaced.
    pub score_cap: f64,
    /// Distance above which [`BoundaryPolicy::far_score_cap`] applies.
    pub far_distance_mm: f64,
    /// Score cap for far beer lines.
    pub far_score_cap: f64,
    /// Confidence below which the penalty applies.
    pub low_confidence: f64,
    /// Multiplier applied to low-confidence scores.
    pub low_confidence_factor: f64,
}

impl Default for BoundaryPolicy {
    fn default() -> Self {
        Self {
            score_cap: 99.5,
            far_distance_mm: 50.0,
            far_score_cap: 40.0,
            low_confidence: 0.4,
            low_confidence_factor: 0.95,
        }
    }
}

impl BoundaryPolicy {
    /// Validate the policy and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when a value is not finite or the
    /// penalty factor lies outside `0.0..=1.0`.
    pub fn validate(self) -> Result<Self, ScoringConfigError> {
        for (field, value) in [
            ("score_cap", self.score_cap),
            ("far_distance_mm", self.far_distance_mm),
            ("far_score_cap", self.far_score_cap),
            ("low_confidence", self.low_confidence),
            ("low_confidence_factor", self.low_confidence_factor),
        ] {
            if !value.is_finite() {
                return Err(ScoringConfigError::NonFinite { field });
            }
        }
        if !(0.0..=1.0).contains(&self.low_confidence_factor) {
            return Err(ScoringConfigError::OutOfRange {
                field: "low_confidence_factor",
                range: "0.0..=1.0",
            });
        }
        Ok(self)
    }

    /// Clamp a raw score given its distance and reported confidence.
    ///
    /// # Examples
    ///
    /// ```
    /// use gsplit_scorer::BoundaryPolicy;
    ///
    /// let policy = BoundaryPolicy::default();
    /// assert_eq!(policy.clamp_score(99.8, 0.0, 0.95), 99.5);
    /// assert_eq!(policy.clamp_score(80.0, 60.0, 0.5), 40.0);
    /// ```
    #[expect(clippy::float_arithmetic, reason = "multiplicative penalty")]
    #[must_use]
    pub fn clamp_score(&self, score: f64, distance_mm: f64, confidence: f64) -> f64 {
        let mut surfaced = score.min(self.score_cap);
        if distance_mm > self.far_distance_mm {
            surfaced = surfaced.min(self.far_score_cap);
        }
        if confidence < self.low_confidence {
            surfaced *= self.low_confidence_factor;
        }
        round_to(surfaced, 1)
    }

    /// Apply [`BoundaryPolicy::clamp_score`] to an assembled result.
    #[must_use]
    pub fn apply(&self, mut result: AnalysisResult) -> AnalysisResult {
        let surfaced = self.clamp_score(
            result.score,
            result.distance_from_line_mm,
            result.confidence,
        );
        if surfaced != result.score {
            log::debug!("boundary policy adjusted score {} -> {surfaced}", result.score);
        }
        result.score = surfaced;
        result
    }
}
