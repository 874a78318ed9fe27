//! Behavioural tests for the geometry normaliser.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;

use gsplit_core::test_support::detection_with_top;
use gsplit_core::{
    AnchorLine, AnchorRole, CropOrigin, DetectionSet, GeometryError, ImageSize, Provenance,
    geometry,
};

type FrameCell = RefCell<Option<DetectionSet>>;
type OutcomeCell = RefCell<Option<Result<f64, GeometryError>>>;
type AnchorCell = RefCell<Option<AnchorLine>>;

#[fixture]
fn frame() -> FrameCell {
    RefCell::new(None)
}

#[fixture]
fn outcome() -> OutcomeCell {
    RefCell::new(None)
}

#[fixture]
fn anchor() -> AnchorCell {
    RefCell::new(None)
}

fn current_frame(frame: &FrameCell) -> DetectionSet {
    frame.borrow().clone().expect("frame should be set by a given step")
}

// --- Given steps ---

#[given("a full image frame 1000 pixels tall")]
fn full_frame(#[from(frame)] frame: &FrameCell) {
    *frame.borrow_mut() = Some(DetectionSet::new(ImageSize::new(600.0, 1000.0), Vec::new()));
}

#[given("a frame with zero height")]
fn zero_height_frame(#[from(frame)] frame: &FrameCell) {
    *frame.borrow_mut() = Some(DetectionSet::new(ImageSize::new(600.0, 0.0), Vec::new()));
}

#[given("a crop frame offset 300 pixels from the top")]
fn crop_frame(#[from(frame)] frame: &FrameCell) {
    *frame.borrow_mut() = Some(
        DetectionSet::new(ImageSize::new(200.0, 400.0), Vec::new())
            .with_origin(CropOrigin::new(150.0, 300.0)),
    );
}

// --- When steps ---

#[when("I normalise a box whose top edge sits at row 420")]
fn normalise_box(#[from(frame)] frame: &FrameCell, #[from(outcome)] outcome: &OutcomeCell) {
    let set = current_frame(frame);
    let detection = detection_with_top("split", 420.0, 60.0, 0.9);
    *outcome.borrow_mut() = Some(geometry::top_edge(&detection, &set));
}

#[when("the reference bar is missing")]
fn reference_missing(#[from(frame)] frame: &FrameCell, #[from(anchor)] anchor: &AnchorCell) {
    let set = current_frame(frame);
    let labels = vec!["g-bar".to_owned()];
    let measured = set
        .best_matching(&labels, 0.0)
        .map(|bar| geometry::vertical_center(bar, &set))
        .transpose()
        .expect("frame is valid");
    *anchor.borrow_mut() = Some(geometry::anchor_or_fallback(
        AnchorRole::ReferenceBar,
        measured,
        0.5,
    ));
}

#[when("I reproject full image row 500 into the crop")]
fn reproject(#[from(frame)] frame: &FrameCell, #[from(outcome)] outcome: &OutcomeCell) {
    let crop = current_frame(frame);
    let full = DetectionSet::new(ImageSize::new(1200.0, 1600.0), Vec::new());
    *outcome.borrow_mut() = Some(Ok(geometry::reproject_y(500.0, &full, &crop)));
}

// --- Then steps ---

#[then("the anchor position is 0.42")]
fn anchor_position(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    let value = borrowed
        .as_ref()
        .and_then(|result| result.as_ref().ok())
        .copied()
        .expect("expected a normalised position");
    assert!((value - 0.42).abs() < 1e-9, "unexpected position {value}");
}

#[then("an invalid detection error is returned")]
fn invalid_detection(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(&*borrowed, Some(Err(GeometryError::NonPositiveHeight { .. }))),
        "expected NonPositiveHeight, got {borrowed:?}"
    );
}

#[then("an estimated reference bar is produced at 0.5")]
fn estimated_bar(#[from(anchor)] anchor: &AnchorCell) {
    let line = anchor.borrow().expect("anchor should be computed");
    assert_eq!(line.role(), AnchorRole::ReferenceBar);
    assert_eq!(line.position(), 0.5);
    assert_eq!(line.provenance(), Provenance::EstimatedFallback);
}

#[then("the crop relative row is 200")]
fn crop_row(#[from(outcome)] outcome: &OutcomeCell) {
    let borrowed = outcome.borrow();
    assert!(
        matches!(&*borrowed, Some(Ok(row)) if (*row - 200.0).abs() < 1e-9),
        "expected row 200, got {borrowed:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/geometry.feature", name = $title)]
        fn $fn_name(frame: FrameCell, outcome: OutcomeCell, anchor: AnchorCell) {
            let _ = (frame, outcome, anchor);
        }
    };
}

register_scenario!(normalising_top_edge, "normalising the top edge of a detection");
register_scenario!(rejecting_zero_height, "rejecting a frame with no height");
register_scenario!(substituting_reference_bar, "substituting a missing reference bar");
register_scenario!(reprojecting_into_crop, "reprojecting a coarse row into the crop frame");
