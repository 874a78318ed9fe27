//! Tunable constants and detection label sets for the score engine.

use serde::{Deserialize, Serialize};

use crate::ScoringConfigError;

/// Calibrated constants driving both scoring tiers.
///
/// Values are injected into [`ScoreEngine`](crate::ScoreEngine) and validated
/// once on construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConstants {
    /// Exponential decay rate of the MATCHED base score.
    pub decay_rate: f64,
    /// Normalised offset that maps to a normalised distance of `1.0`.
    pub half_range: f64,
    /// MATCHED distance scale, applied to the normalised distance.
    pub matched_distance_scale: f64,
    /// Height of the target zone above the reference bar.
    pub zone_offset: f64,
    /// Distance below which the zone bonus is zero.
    pub bonus_ramp_start: f64,
    /// Distance at which the zone bonus reaches its maximum.
    pub bonus_ramp_end: f64,
    /// Zone bonus awarded regardless of centring.
    pub bonus_base: f64,
    /// Extra zone bonus for a perfectly centred beer line.
    pub bonus_centering: f64,
    /// Ceiling of every score.
    pub max_score: f64,
    /// Ceiling of the UNMATCHED tier.
    pub unmatched_max_score: f64,
    /// UNMATCHED distance scale, applied to the raw normalised offset.
    pub unmatched_distance_scale: f64,
    /// Score returned when neither tier has usable inputs.
    pub floor_score: f64,
    /// Distance returned alongside [`ScoringConstants::floor_score`].
    pub floor_distance_mm: f64,
    /// Reference bar position assumed when the bar was not detected.
    pub reference_bar_fallback: f64,
    /// Minimum confidence for a prediction to qualify.
    pub min_confidence: f64,
    /// Padding in pixels around the logo for the fallback crop window.
    pub crop_padding: f64,
}

impl Default for ScoringConstants {
    fn default() -> Self {
        Self {
            decay_rate: 1.0,
            half_range: 0.5,
            matched_distance_scale: 50.0,
            zone_offset: 0.18,
            bonus_ramp_start: 10.0,
            bonus_ramp_end: 20.0,
            bonus_base: 13.0,
            bonus_centering: 5.0,
            max_score: 100.0,
            unmatched_max_score: 45.0,
            unmatched_distance_scale: 200.0,
            floor_score: 10.0,
            floor_distance_mm: 50.0,
            reference_bar_fallback: 0.5,
            min_confidence: 0.0,
            crop_padding: 20.0,
        }
    }
}

impl ScoringConstants {
    /// Validate the constants and return a copy.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when a constant is not finite, a scale
    /// or ceiling is negative, a fraction falls outside `[0, 1]`, the bonus
    /// ramp is inverted, or the UNMATCHED ceiling exceeds the maximum score.
    pub fn validate(self) -> Result<Self, ScoringConfigError> {
        for (field, value) in self.named_values() {
            if !value.is_finite() {
                return Err(ScoringConfigError::NonFinite { field });
            }
        }
        if self.half_range <= 0.0 {
            return Err(ScoringConfigError::NonPositive {
                field: "half_range",
            });
        }
        if self.max_score <= 0.0 {
            return Err(ScoringConfigError::NonPositive { field: "max_score" });
        }
        for (field, value) in [
            ("zone_offset", self.zone_offset),
            ("reference_bar_fallback", self.reference_bar_fallback),
            ("min_confidence", self.min_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScoringConfigError::OutOfRange {
                    field,
                    range: "0.0..=1.0",
                });
            }
        }
        for (field, value) in [
            ("decay_rate", self.decay_rate),
            ("matched_distance_scale", self.matched_distance_scale),
            ("unmatched_distance_scale", self.unmatched_distance_scale),
            ("bonus_base", self.bonus_base),
            ("bonus_centering", self.bonus_centering),
            ("unmatched_max_score", self.unmatched_max_score),
            ("floor_score", self.floor_score),
            ("floor_distance_mm", self.floor_distance_mm),
            ("crop_padding", self.crop_padding),
        ] {
            if value < 0.0 {
                return Err(ScoringConfigError::OutOfRange {
                    field,
                    range: "0.0 or greater",
                });
            }
        }
        if self.bonus_ramp_end <= self.bonus_ramp_start {
            return Err(ScoringConfigError::InvertedRamp);
        }
        if self.unmatched_max_score > self.max_score {
            return Err(ScoringConfigError::UnmatchedCeilingTooHigh);
        }
        Ok(self)
    }

    const fn named_values(&self) -> [(&'static str, f64); 16] {
        [
            ("decay_rate", self.decay_rate),
            ("half_range", self.half_range),
            ("matched_distance_scale", self.matched_distance_scale),
            ("zone_offset", self.zone_offset),
            ("bonus_ramp_start", self.bonus_ramp_start),
            ("bonus_ramp_end", self.bonus_ramp_end),
            ("bonus_base", self.bonus_base),
            ("bonus_centering", self.bonus_centering),
            ("max_score", self.max_score),
            ("unmatched_max_score", self.unmatched_max_score),
            ("unmatched_distance_scale", self.unmatched_distance_scale),
            ("floor_score", self.floor_score),
            ("floor_distance_mm", self.floor_distance_mm),
            ("reference_bar_fallback", self.reference_bar_fallback),
            ("min_confidence", self.min_confidence),
            ("crop_padding", self.crop_padding),
        ]
    }
}

/// Class labels the engine looks for in each model's predictions.
///
/// Matching ignores ASCII case. An empty list accepts every class, which is
/// how the single-class line detector is configured by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionLabels {
    /// Beer-line classes in the line detector's output.
    pub beer_line: Vec<String>,
    /// Reference-bar classes in the reference detector's output.
    pub reference_bar: Vec<String>,
    /// Liquid-region classes in the region detector's output.
    pub liquid: Vec<String>,
    /// Logo classes in the region detector's output.
    pub logo: Vec<String>,
}

fn owned(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| (*label).to_owned()).collect()
}

impl Default for DetectionLabels {
    fn default() -> Self {
        Self {
            beer_line: Vec::new(),
            reference_bar: owned(&["g-bar", "bar"]),
            liquid: owned(&["beer", "liquid", "pint"]),
            logo: owned(&["g-logo", "G"]),
        }
    }
}
