//! Normalised anchor lines derived from detections.

/// Semantic role of an [`AnchorLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AnchorRole {
    /// Foam/liquid boundary from the line detector.
    BeerLine,
    /// Horizontal stroke of the logo.
    ReferenceBar,
    /// Upper edge of the target zone.
    ReferenceTop,
    /// Top of the coarse liquid region.
    LiquidTop,
    /// Vertical centre of the coarse logo box.
    LogoCenter,
}

/// Where an [`AnchorLine`]'s position came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Provenance {
    /// Measured from a model prediction.
    Detected,
    /// Substituted from a calibrated constant or derived from another anchor.
    EstimatedFallback,
}

/// A vertical position in `[0.0, 1.0]` of the analysed frame.
///
/// Positions are clamped on construction; a non-finite input becomes `0.0`.
///
/// # Examples
///
/// ```
/// use gsplit_core::{AnchorLine, AnchorRole, Provenance};
///
/// let bar = AnchorLine::detected(AnchorRole::ReferenceBar, 1.3);
/// assert_eq!(bar.position(), 1.0);
/// assert_eq!(bar.provenance(), Provenance::Detected);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnchorLine {
    role: AnchorRole,
    position: f64,
    provenance: Provenance,
}

impl AnchorLine {
    /// Build an anchor with explicit provenance.
    #[must_use]
    pub fn new(role: AnchorRole, position: f64, provenance: Provenance) -> Self {
        Self {
            role,
            position: clamp_unit(position),
            provenance,
        }
    }

    /// Build an anchor measured from a detection.
    #[must_use]
    pub fn detected(role: AnchorRole, position: f64) -> Self {
        Self::new(role, position, Provenance::Detected)
    }

    /// Build an anchor from a fallback constant.
    #[must_use]
    pub fn estimated(role: AnchorRole, position: f64) -> Self {
        Self::new(role, position, Provenance::EstimatedFallback)
    }

    /// The anchor's role.
    #[must_use]
    pub const fn role(&self) -> AnchorRole {
        self.role
    }

    /// Normalised vertical position.
    #[must_use]
    pub const fn position(&self) -> f64 {
        self.position
    }

    /// Whether the position was detected or estimated.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Convenience for `provenance() == EstimatedFallback`.
    #[must_use]
    pub fn is_estimated(&self) -> bool {
        self.provenance == Provenance::EstimatedFallback
    }
}

/// Clamp `value` into `[0.0, 1.0]`, mapping NaN and infinities to `0.0`.
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
