//! Score engine output types.

use crate::anchor::AnchorLine;

/// Which detection signal the score was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScoreTier {
    /// The precise line detector produced a qualifying prediction.
    Matched,
    /// Only the coarse region detector was usable.
    Unmatched,
}

impl ScoreTier {
    /// Lower-case tier name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Unmatched => "unmatched",
        }
    }
}

/// Non-fatal conditions noticed while scoring.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ScoreWarning {
    /// The zone's upper edge fell above the frame and was clamped to `0.0`.
    ReferenceTopClamped {
        /// Unclamped position.
        raw: f64,
    },
}

/// Anchor positions used to compute a score, kept for debugging.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreAnchors {
    /// Beer line (MATCHED).
    pub beer_line: Option<AnchorLine>,
    /// Reference bar (MATCHED).
    pub reference_bar: Option<AnchorLine>,
    /// Zone upper edge (MATCHED).
    pub reference_top: Option<AnchorLine>,
    /// Coarse liquid top (UNMATCHED).
    pub liquid_top: Option<AnchorLine>,
    /// Coarse logo centre (UNMATCHED).
    pub logo_center: Option<AnchorLine>,
}

/// Raw output of the score engine, before any boundary policy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreResult {
    /// Score in `[0, 100]`, one decimal place.
    pub score: f64,
    /// Distance proxy; the scale depends on [`ScoreResult::tier`].
    pub distance_mm: f64,
    /// Whether the beer line sat inside the target zone.
    pub zone_entered: bool,
    /// Tier that produced the score.
    pub tier: ScoreTier,
    /// Anchors that fed the computation.
    pub anchors: ScoreAnchors,
    /// Non-fatal conditions.
    pub warnings: Vec<ScoreWarning>,
}

impl ScoreResult {
    /// The UNMATCHED result used when no usable signal was detected.
    #[must_use]
    pub fn floor(score: f64, distance_mm: f64) -> Self {
        Self {
            score,
            distance_mm,
            zone_entered: false,
            tier: ScoreTier::Unmatched,
            anchors: ScoreAnchors::default(),
            warnings: Vec::new(),
        }
    }

    /// Whether any anchor was substituted from a fallback constant.
    #[must_use]
    pub fn uses_estimates(&self) -> bool {
        [
            self.anchors.beer_line,
            self.anchors.reference_bar,
            self.anchors.reference_top,
            self.anchors.liquid_top,
            self.anchors.logo_center,
        ]
        .iter()
        .flatten()
        .any(AnchorLine::is_estimated)
    }
}
