//! The two-tier score engine.
//!
//! The tier is chosen by the precise line detector. When it produced a
//! qualifying prediction the engine compares the beer line against the logo's
//! reference bar (MATCHED). Otherwise it falls back to the coarse region
//! detector's liquid box and logo box (UNMATCHED), whose score is capped well
//! below the MATCHED range.

use gsplit_core::geometry::{self, GeometryError};
use gsplit_core::{
    AnchorLine, AnchorRole, Detection, DetectionAvailability, DetectionResults, DetectionSet,
    ScoreAnchors, ScoreResult, ScoreTier, ScoreWarning,
};

use crate::{DetectionLabels, ScoringConfigError, ScoringConstants};

/// Round `value` to `decimals` places, half away from zero.
#[expect(clippy::float_arithmetic, reason = "decimal rounding")]
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10_f64.powi(decimals);
    (value * factor).round() / factor
}

/// Stateless scorer over one image's detection results.
///
/// # Examples
///
/// ```
/// use gsplit_core::DetectionResults;
/// use gsplit_scorer::ScoreEngine;
///
/// let engine = ScoreEngine::default();
/// let result = engine.score(&DetectionResults::new())?;
/// assert_eq!((result.score, result.distance_mm, result.zone_entered), (10.0, 50.0, false));
/// # Ok::<(), gsplit_core::GeometryError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    constants: ScoringConstants,
    labels: DetectionLabels,
}

impl ScoreEngine {
    /// Build an engine from validated constants.
    ///
    /// # Errors
    /// Returns [`ScoringConfigError`] when `constants` fail validation.
    pub fn new(
        constants: ScoringConstants,
        labels: DetectionLabels,
    ) -> Result<Self, ScoringConfigError> {
        Ok(Self {
            constants: constants.validate()?,
            labels,
        })
    }

    /// Constants in use.
    #[must_use]
    pub const fn constants(&self) -> &ScoringConstants {
        &self.constants
    }

    /// Labels in use.
    #[must_use]
    pub const fn labels(&self) -> &DetectionLabels {
        &self.labels
    }

    /// Qualifying beer-line prediction, if any.
    #[must_use]
    pub fn beer_line<'a>(&self, results: &'a DetectionResults) -> Option<&'a Detection> {
        results
            .line
            .best_matching(&self.labels.beer_line, self.constants.min_confidence)
    }

    /// Qualifying reference-bar prediction, if any.
    #[must_use]
    pub fn reference_bar<'a>(&self, results: &'a DetectionResults) -> Option<&'a Detection> {
        results
            .reference
            .best_matching(&self.labels.reference_bar, self.constants.min_confidence)
    }

    /// Qualifying coarse liquid-region prediction, if any.
    #[must_use]
    pub fn liquid<'a>(&self, results: &'a DetectionResults) -> Option<&'a Detection> {
        results
            .region
            .best_matching(&self.labels.liquid, self.constants.min_confidence)
    }

    /// Qualifying coarse logo prediction, if any.
    #[must_use]
    pub fn logo<'a>(&self, results: &'a DetectionResults) -> Option<&'a Detection> {
        results
            .region
            .best_matching(&self.labels.logo, self.constants.min_confidence)
    }

    /// Report which signals are present in `results`.
    #[must_use]
    pub fn availability(&self, results: &DetectionResults) -> DetectionAvailability {
        DetectionAvailability {
            beer_line: self.beer_line(results).is_some(),
            reference_bar: self.reference_bar(results).is_some(),
            liquid_region: self.liquid(results).is_some(),
            logo: self.logo(results).is_some(),
        }
    }

    /// Score one image.
    ///
    /// Missing detections never fail: a missing reference bar is replaced by
    /// its fallback position, and an UNMATCHED tier without both coarse boxes
    /// returns the floor result.
    ///
    /// # Errors
    /// Returns [`GeometryError`] when a frame needed for scoring has a
    /// non-positive height.
    pub fn score(&self, results: &DetectionResults) -> Result<ScoreResult, GeometryError> {
        let result = match self.beer_line(results) {
            Some(beer) => self.score_matched(results, beer)?,
            None => self.score_unmatched(results)?,
        };
        log::info!(
            "{} tier scored {} at distance {}",
            result.tier.as_str(),
            result.score,
            result.distance_mm
        );
        Ok(result)
    }

    /// Normalised reference bar in the line detector's frame.
    fn measured_reference_bar(
        &self,
        results: &DetectionResults,
    ) -> Result<Option<f64>, GeometryError> {
        self.reference_bar(results)
            .map(|bar| {
                let row = geometry::reproject_y(bar.center_y, &results.reference, &results.line);
                geometry::normalise_y(row, &results.line)
            })
            .transpose()
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "matched tier blends an exponential decay with a zone bonus"
    )]
    fn score_matched(
        &self,
        results: &DetectionResults,
        beer: &Detection,
    ) -> Result<ScoreResult, GeometryError> {
        let c = &self.constants;
        let beer_line = AnchorLine::detected(
            AnchorRole::BeerLine,
            geometry::top_edge(beer, &results.line)?,
        );
        let reference_bar = geometry::anchor_or_fallback(
            AnchorRole::ReferenceBar,
            self.measured_reference_bar(results)?,
            c.reference_bar_fallback,
        );
        let beer_y = beer_line.position();
        let bar_y = reference_bar.position();

        let normalized = ((beer_y - bar_y).abs() / c.half_range).clamp(0.0, 1.0);
        let distance_mm = normalized * c.matched_distance_scale;
        let base = c.max_score * (-normalized * c.decay_rate).exp();

        let mut warnings = Vec::new();
        let raw_top = bar_y - c.zone_offset;
        if raw_top < 0.0 {
            log::warn!("reference top {raw_top} lies above the frame; clamping to 0");
            warnings.push(ScoreWarning::ReferenceTopClamped { raw: raw_top });
        }
        let reference_top =
            AnchorLine::new(AnchorRole::ReferenceTop, raw_top, reference_bar.provenance());
        let top_y = reference_top.position();

        let zone_entered = (top_y..=bar_y).contains(&beer_y);
        let bonus = if zone_entered {
            self.zone_bonus(distance_mm, centering_quality(beer_y, top_y, bar_y))
        } else {
            0.0
        };

        Ok(ScoreResult {
            score: round_to((base + bonus).min(c.max_score), 1),
            distance_mm: round_to(distance_mm, 2),
            zone_entered,
            tier: ScoreTier::Matched,
            anchors: ScoreAnchors {
                beer_line: Some(beer_line),
                reference_bar: Some(reference_bar),
                reference_top: Some(reference_top),
                ..ScoreAnchors::default()
            },
            warnings,
        })
    }

    /// Bonus for a beer line inside the zone, ramping in with distance.
    #[expect(clippy::float_arithmetic, reason = "linear bonus ramp")]
    fn zone_bonus(&self, distance_mm: f64, centering: f64) -> f64 {
        let c = &self.constants;
        let ramp = ((distance_mm - c.bonus_ramp_start) / (c.bonus_ramp_end - c.bonus_ramp_start))
            .clamp(0.0, 1.0);
        (c.bonus_base + c.bonus_centering * centering) * ramp
    }

    #[expect(
        clippy::float_arithmetic,
        reason = "unmatched tier applies a quadratic decay"
    )]
    fn score_unmatched(&self, results: &DetectionResults) -> Result<ScoreResult, GeometryError> {
        let c = &self.constants;
        let (Some(liquid), Some(logo)) = (self.liquid(results), self.logo(results)) else {
            log::info!("no usable detections; returning floor score");
            return Ok(ScoreResult::floor(c.floor_score, c.floor_distance_mm));
        };
        let region: &DetectionSet = &results.region;
        let liquid_top = AnchorLine::detected(
            AnchorRole::LiquidTop,
            geometry::top_edge(liquid, region)?,
        );
        let logo_center = AnchorLine::detected(
            AnchorRole::LogoCenter,
            geometry::vertical_center(logo, region)?,
        );

        let distance = (liquid_top.position() - logo_center.position()).abs();
        let normalized = (distance / c.half_range).clamp(0.0, 1.0);
        let remaining = 1.0 - normalized;
        let score = c.unmatched_max_score * remaining * remaining;

        Ok(ScoreResult {
            score: round_to(score, 1),
            distance_mm: round_to(distance * c.unmatched_distance_scale, 2),
            zone_entered: false,
            tier: ScoreTier::Unmatched,
            anchors: ScoreAnchors {
                liquid_top: Some(liquid_top),
                logo_center: Some(logo_center),
                ..ScoreAnchors::default()
            },
            warnings: Vec::new(),
        })
    }
}

/// `1.0` at the zone midpoint, falling linearly to `0.0` at either edge.
#[expect(clippy::float_arithmetic, reason = "distance from zone midpoint")]
pub(crate) fn centering_quality(beer_y: f64, top_y: f64, bar_y: f64) -> f64 {
    let half_width = (bar_y - top_y) / 2.0;
    if half_width <= 0.0 {
        return 1.0;
    }
    let midpoint = top_y + half_width;
    (1.0 - (beer_y - midpoint).abs() / half_width).clamp(0.0, 1.0)
}

