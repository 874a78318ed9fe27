//! Typed detections produced by the external object-detection workflow.
//!
//! The detection service returns one prediction set per model. Each set is
//! expressed in the pixel space of the frame that model looked at, which may
//! be the full photograph or a crop of it (see [`CropOrigin`]).

use thiserror::Error;

/// Pixel dimensions of the frame a [`DetectionSet`] is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImageSize {
    /// Frame width in pixels.
    pub width: f64,
    /// Frame height in pixels; the normalisation denominator.
    pub height: f64,
}

impl ImageSize {
    /// Build an image size from pixel dimensions.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Top-left corner of a crop frame, in full-image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropOrigin {
    /// Horizontal offset of the crop inside the full image.
    pub offset_x: f64,
    /// Vertical offset of the crop inside the full image.
    pub offset_y: f64,
}

impl CropOrigin {
    /// Build a crop origin from full-image pixel offsets.
    #[must_use]
    pub const fn new(offset_x: f64, offset_y: f64) -> Self {
        Self { offset_x, offset_y }
    }

    /// Express a full-image vertical pixel position relative to this crop.
    #[expect(
        clippy::float_arithmetic,
        reason = "frame conversion subtracts the crop offset"
    )]
    #[must_use]
    pub fn to_crop_y(self, full_image_y: f64) -> f64 {
        full_image_y - self.offset_y
    }

    /// Express a crop-relative vertical pixel position in full-image pixels.
    #[expect(
        clippy::float_arithmetic,
        reason = "frame conversion adds the crop offset"
    )]
    #[must_use]
    pub fn to_full_y(self, crop_y: f64) -> f64 {
        crop_y + self.offset_y
    }
}

/// One bounding-box observation from a detection model.
///
/// Coordinates are pixels in the owning [`DetectionSet`]'s frame. The box is
/// described by its centre and extent, matching the detection service.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Detection {
    /// Class label assigned by the model.
    pub class_label: String,
    /// Horizontal centre of the box.
    pub center_x: f64,
    /// Vertical centre of the box.
    pub center_y: f64,
    /// Box width.
    pub width: f64,
    /// Box height.
    pub height: f64,
    /// Model confidence in `0.0..=1.0`.
    pub confidence: f64,
}

/// Errors returned by [`Detection::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DetectionError {
    /// A coordinate or extent was NaN or infinite.
    #[error("detection geometry must be finite")]
    NonFinite,
    /// Width or height was negative.
    #[error("detection extent must not be negative")]
    NegativeExtent,
    /// Confidence fell outside `0.0..=1.0`.
    #[error("detection confidence must be between 0.0 and 1.0")]
    ConfidenceOutOfRange,
}

impl Detection {
    /// Validates and constructs a [`Detection`].
    ///
    /// # Errors
    /// Returns [`DetectionError`] when the geometry is not finite, the extent
    /// is negative, or the confidence is outside `0.0..=1.0`.
    pub fn new(
        class_label: impl Into<String>,
        center_x: f64,
        center_y: f64,
        width: f64,
        height: f64,
        confidence: f64,
    ) -> Result<Self, DetectionError> {
        if ![center_x, center_y, width, height].iter().all(|v| v.is_finite()) {
            return Err(DetectionError::NonFinite);
        }
        if width < 0.0 || height < 0.0 {
            return Err(DetectionError::NegativeExtent);
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DetectionError::ConfidenceOutOfRange);
        }
        Ok(Self {
            class_label: class_label.into(),
            center_x,
            center_y,
            width,
            height,
            confidence,
        })
    }

    /// Pixel row of the box's top edge.
    #[expect(clippy::float_arithmetic, reason = "box edge from centre and extent")]
    #[must_use]
    pub fn top_px(&self) -> f64 {
        self.center_y - self.height / 2.0
    }

    /// Report whether the class label matches any of `labels`.
    ///
    /// Matching ignores ASCII case. An empty label list accepts every class.
    #[must_use]
    pub fn has_label(&self, labels: &[String]) -> bool {
        labels.is_empty()
            || labels
                .iter()
                .any(|label| label.eq_ignore_ascii_case(&self.class_label))
    }
}

/// Predictions from one model for one image.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionSet {
    /// Predictions in model order.
    pub predictions: Vec<Detection>,
    /// Dimensions of the frame the predictions refer to.
    pub image: ImageSize,
    /// Crop origin when the model ran on a sub-region of the photograph.
    pub origin: Option<CropOrigin>,
}

impl DetectionSet {
    /// Build a set for a full-image frame.
    #[must_use]
    pub const fn new(image: ImageSize, predictions: Vec<Detection>) -> Self {
        Self {
            predictions,
            image,
            origin: None,
        }
    }

    /// A set with no predictions and no frame, used for absent model outputs.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Attach the crop origin of the frame the predictions refer to.
    #[must_use]
    pub const fn with_origin(mut self, origin: CropOrigin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// Report whether the model produced no predictions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Return the most confident prediction carrying one of `labels`.
    ///
    /// Predictions below `min_confidence` do not qualify. Ties keep the
    /// earliest prediction so selection is stable for identical inputs.
    #[must_use]
    pub fn best_matching(&self, labels: &[String], min_confidence: f64) -> Option<&Detection> {
        self.predictions
            .iter()
            .filter(|detection| detection.confidence >= min_confidence)
            .filter(|detection| detection.has_label(labels))
            .reduce(|best, candidate| {
                if candidate.confidence > best.confidence {
                    candidate
                } else {
                    best
                }
            })
    }
}

/// Named outputs of the detection workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelOutput {
    /// Coarse detector covering the whole glass (liquid region, logo).
    Region,
    /// Precise beer-line detector run on the logo crop.
    Line,
    /// Reference-bar detector for the logo's horizontal stroke.
    Reference,
}

impl ModelOutput {
    /// Every output, in the order the workflow reports them.
    pub const ALL: [Self; 3] = [Self::Region, Self::Line, Self::Reference];

    /// Canonical (normalised) output key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Region => "pint_results",
            Self::Line => "split_results",
            Self::Reference => "g_bar_results",
        }
    }
}

impl std::fmt::Display for ModelOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prediction sets for every model output of one analysed image.
///
/// Outputs the service did not return are empty sets rather than errors.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DetectionResults {
    /// Coarse region detector output.
    #[cfg_attr(feature = "serde", serde(default))]
    pub region: DetectionSet,
    /// Beer-line detector output.
    #[cfg_attr(feature = "serde", serde(default))]
    pub line: DetectionSet,
    /// Reference-bar detector output.
    #[cfg_attr(feature = "serde", serde(default))]
    pub reference: DetectionSet,
}

impl DetectionResults {
    /// Results with every output empty.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace one output, enabling chaining.
    #[must_use]
    pub fn with(mut self, output: ModelOutput, set: DetectionSet) -> Self {
        self.insert(output, set);
        self
    }

    /// Replace one output in place.
    pub fn insert(&mut self, output: ModelOutput, set: DetectionSet) {
        *self.get_mut(output) = set;
    }

    /// Borrow the set for `output`.
    #[must_use]
    pub const fn get(&self, output: ModelOutput) -> &DetectionSet {
        match output {
            ModelOutput::Region => &self.region,
            ModelOutput::Line => &self.line,
            ModelOutput::Reference => &self.reference,
        }
    }

    const fn get_mut(&mut self, output: ModelOutput) -> &mut DetectionSet {
        match output {
            ModelOutput::Region => &mut self.region,
            ModelOutput::Line => &mut self.line,
            ModelOutput::Reference => &mut self.reference,
        }
    }
}
