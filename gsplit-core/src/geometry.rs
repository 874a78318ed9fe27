//! Geometry normaliser: pixel boxes to frame-relative anchor positions.
//!
//! Every position produced here is a fraction of the owning frame's height,
//! measured from the top. Crop frames are reconciled through full-image
//! pixels using each set's [`CropOrigin`].

use thiserror::Error;

use crate::anchor::{AnchorLine, AnchorRole, clamp_unit};
use crate::detection::{CropOrigin, Detection, DetectionSet, ImageSize};

/// Errors raised for malformed detection geometry.
///
/// These are fatal for the analysis that produced them: the same input
/// always yields the same error.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Frame height was zero, negative, or not finite.
    #[error("image height must be positive, got {height}")]
    NonPositiveHeight {
        /// Offending height in pixels.
        height: f64,
    },
    /// Frame width was zero, negative, or not finite.
    #[error("image width must be positive, got {width}")]
    NonPositiveWidth {
        /// Offending width in pixels.
        width: f64,
    },
    /// A crop window collapsed to zero area after clamping to the image.
    #[error("crop window is empty after clamping to the image bounds")]
    EmptyCropWindow,
}

fn checked_height(image: ImageSize) -> Result<f64, GeometryError> {
    if image.height.is_finite() && image.height > 0.0 {
        Ok(image.height)
    } else {
        Err(GeometryError::NonPositiveHeight {
            height: image.height,
        })
    }
}

fn checked_width(image: ImageSize) -> Result<f64, GeometryError> {
    if image.width.is_finite() && image.width > 0.0 {
        Ok(image.width)
    } else {
        Err(GeometryError::NonPositiveWidth { width: image.width })
    }
}

/// Normalise a pixel row of `set`'s frame into `[0.0, 1.0]`.
///
/// # Errors
/// Returns [`GeometryError::NonPositiveHeight`] when the frame height is not
/// a positive finite number.
#[expect(clippy::float_arithmetic, reason = "pixel to fraction conversion")]
pub fn normalise_y(pixel_y: f64, set: &DetectionSet) -> Result<f64, GeometryError> {
    let height = checked_height(set.image)?;
    Ok(clamp_unit(pixel_y / height))
}

/// Normalised top edge of `detection`: `(center_y - height / 2) / image_height`.
///
/// # Errors
/// Returns [`GeometryError::NonPositiveHeight`] for a degenerate frame.
///
/// # Examples
///
/// ```
/// use gsplit_core::{Detection, DetectionSet, ImageSize, geometry};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let set = DetectionSet::new(ImageSize::new(100.0, 200.0), Vec::new());
/// let line = Detection::new("line", 50.0, 110.0, 40.0, 20.0, 0.9)?;
/// assert_eq!(geometry::top_edge(&line, &set)?, 0.5);
/// # Ok(())
/// # }
/// ```
pub fn top_edge(detection: &Detection, set: &DetectionSet) -> Result<f64, GeometryError> {
    normalise_y(detection.top_px(), set)
}

/// Normalised vertical centre of `detection`.
///
/// # Errors
/// Returns [`GeometryError::NonPositiveHeight`] for a degenerate frame.
pub fn vertical_center(detection: &Detection, set: &DetectionSet) -> Result<f64, GeometryError> {
    normalise_y(detection.center_y, set)
}

/// Use a measured position when present, otherwise the calibrated fallback.
///
/// The fallback anchor is tagged as estimated so callers can surface that
/// the tier ran on substituted data.
#[must_use]
pub fn anchor_or_fallback(role: AnchorRole, measured: Option<f64>, fallback: f64) -> AnchorLine {
    measured.map_or_else(
        || {
            log::debug!("{role:?} not detected; using fallback position {fallback}");
            AnchorLine::estimated(role, fallback)
        },
        |position| AnchorLine::detected(role, position),
    )
}

/// Express a pixel row of `from`'s frame in `to`'s frame.
///
/// Rows pass through full-image pixels: `crop_relative = full - offset`.
/// Sets without an origin are treated as full-image frames.
#[must_use]
pub fn reproject_y(pixel_y: f64, from: &DetectionSet, to: &DetectionSet) -> f64 {
    let full = from
        .origin
        .map_or(pixel_y, |origin| origin.to_full_y(pixel_y));
    to.origin.map_or(full, |origin| origin.to_crop_y(full))
}

/// A rectangular sub-region of the full image, in full-image pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CropWindow {
    /// Top-left corner of the window.
    pub origin: CropOrigin,
    /// Window width in pixels.
    pub width: f64,
    /// Window height in pixels.
    pub height: f64,
}

impl CropWindow {
    /// The whole image as a window.
    ///
    /// # Errors
    /// Returns [`GeometryError`] when either image dimension is not positive.
    pub fn full(image: ImageSize) -> Result<Self, GeometryError> {
        Ok(Self {
            origin: CropOrigin::default(),
            width: checked_width(image)?,
            height: checked_height(image)?,
        })
    }

    /// Window around `detection` grown by `padding` pixels on each side.
    ///
    /// The box's top-left corner is floored to whole pixels before padding.
    /// The corner is clamped at the image origin and the extent at the far
    /// image edges.
    ///
    /// # Errors
    /// Returns [`GeometryError`] for a degenerate image or when the clamped
    /// window has no area.
    #[expect(clippy::float_arithmetic, reason = "window edges from box extent")]
    pub fn around(
        detection: &Detection,
        image: ImageSize,
        padding: f64,
    ) -> Result<Self, GeometryError> {
        let image_width = checked_width(image)?;
        let image_height = checked_height(image)?;

        let left = ((detection.center_x - detection.width / 2.0).floor() - padding).max(0.0);
        let top = ((detection.center_y - detection.height / 2.0).floor() - padding).max(0.0);
        let width = (detection.width.floor() + 2.0 * padding).min(image_width - left);
        let height = (detection.height.floor() + 2.0 * padding).min(image_height - top);

        if width <= 0.0 || height <= 0.0 {
            return Err(GeometryError::EmptyCropWindow);
        }
        Ok(Self {
            origin: CropOrigin::new(left, top),
            width,
            height,
        })
    }

    /// Normalise a full-image pixel row into this window, clamped to `[0, 1]`.
    #[expect(clippy::float_arithmetic, reason = "pixel to fraction conversion")]
    #[must_use]
    pub fn normalise_y(&self, full_image_y: f64) -> f64 {
        clamp_unit(self.origin.to_crop_y(full_image_y) / self.height)
    }
}
