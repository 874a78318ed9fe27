//! Builds debug visualisation frames from a scored image.

use gsplit_core::geometry::{CropWindow, GeometryError};
use gsplit_core::{
    AnchorLine, DetectionResults, DetectionSet, ScoreResult, ScoreTier, VisualizationFrame,
};

use crate::ScoreEngine;

/// The window a detection set's frame covers in the full image.
fn frame_window(set: &DetectionSet) -> Result<CropWindow, GeometryError> {
    let mut window = CropWindow::full(set.image)?;
    if let Some(origin) = set.origin {
        window.origin = origin;
    }
    Ok(window)
}

/// Move a normalised anchor from `set`'s frame into `window`.
#[expect(clippy::float_arithmetic, reason = "fraction to pixel conversion")]
fn into_window(anchor: AnchorLine, set: &DetectionSet, window: &CropWindow) -> AnchorLine {
    let frame_row = anchor.position() * set.image.height;
    let full_row = set
        .origin
        .map_or(frame_row, |origin| origin.to_full_y(frame_row));
    AnchorLine::new(
        anchor.role(),
        window.normalise_y(full_row),
        anchor.provenance(),
    )
}

impl ScoreEngine {
    /// Describe `score` for a visualisation sink.
    ///
    /// MATCHED frames use the line detector's crop. UNMATCHED frames use a
    /// padded window around the coarse logo box, with the liquid top and logo
    /// centre reprojected into it. The floor result has nothing to draw and
    /// yields `None`.
    ///
    /// # Errors
    /// Returns [`GeometryError`] when the relevant frame is degenerate or the
    /// fallback window is empty.
    pub fn visualization_frame(
        &self,
        label: &str,
        results: &DetectionResults,
        score: &ScoreResult,
    ) -> Result<Option<VisualizationFrame>, GeometryError> {
        let anchors = &score.anchors;
        let (window, lines) = match score.tier {
            ScoreTier::Matched => {
                let lines = [
                    anchors.beer_line,
                    anchors.reference_bar,
                    anchors.reference_top,
                ]
                .into_iter()
                .flatten()
                .collect();
                (frame_window(&results.line)?, lines)
            }
            ScoreTier::Unmatched => {
                let Some(logo) = self.logo(results) else {
                    return Ok(None);
                };
                if anchors.liquid_top.is_none() {
                    return Ok(None);
                }
                let window =
                    CropWindow::around(logo, results.region.image, self.constants().crop_padding)?;
                let lines = [anchors.liquid_top, anchors.logo_center]
                    .into_iter()
                    .flatten()
                    .map(|anchor| into_window(anchor, &results.region, &window))
                    .collect();
                (window, lines)
            }
        };
        Ok(Some(VisualizationFrame {
            label: label.to_owned(),
            tier: score.tier,
            window,
            lines,
            distance_mm: score.distance_mm,
            score: score.score,
        }))
    }
}

