//! Property tests for score engine invariants.

use gsplit_core::test_support::{detection_centered, detection_with_top};
use gsplit_core::{DetectionResults, DetectionSet, ImageSize, ModelOutput, ScoreTier};
use gsplit_scorer::ScoreEngine;
use proptest::prelude::*;

const HEIGHT: f64 = 1000.0;

fn matched(beer_row: f64, bar_row: f64) -> DetectionResults {
    let image = ImageSize::new(600.0, HEIGHT);
    DetectionResults::new()
        .with(
            ModelOutput::Line,
            DetectionSet::new(image, vec![detection_with_top("split", beer_row, 40.0, 0.9)]),
        )
        .with(
            ModelOutput::Reference,
            DetectionSet::new(image, vec![detection_centered("g-bar", bar_row, 20.0, 0.9)]),
        )
}

proptest! {
    #[test]
    fn unmatched_never_exceeds_ceiling(
        liquid_top in 0.0f64..1000.0,
        logo_center in 0.0f64..1000.0,
        height in 1.0f64..3000.0,
    ) {
        let region = DetectionSet::new(
            ImageSize::new(800.0, height),
            vec![
                detection_with_top("beer", liquid_top, 300.0, 0.9),
                detection_centered("G", logo_center, 80.0, 0.9),
            ],
        );
        let results = DetectionResults::new().with(ModelOutput::Region, region);
        let result = ScoreEngine::default().score(&results).expect("positive height");
        prop_assert_eq!(result.tier, ScoreTier::Unmatched);
        prop_assert!(result.score <= 45.0);
        prop_assert!(result.score >= 0.0);
    }

    #[test]
    fn matched_scores_stay_within_bounds(beer in 0.0f64..HEIGHT, bar in 0.0f64..HEIGHT) {
        let result = ScoreEngine::default().score(&matched(beer, bar)).expect("valid frame");
        prop_assert!((0.0..=100.0).contains(&result.score));
        prop_assert!((0.0..=50.0).contains(&result.distance_mm));
    }

    #[test]
    fn matched_decay_is_monotonic_outside_zone(
        bar in 200.0f64..500.0,
        near in 1.0f64..250.0,
        extra in 0.0f64..250.0,
    ) {
        // Beer lines below the bar never enter the zone above it.
        let engine = ScoreEngine::default();
        let closer = engine.score(&matched(bar + near, bar)).expect("valid frame");
        let farther = engine.score(&matched(bar + near + extra, bar)).expect("valid frame");
        prop_assert!(!closer.zone_entered && !farther.zone_entered);
        prop_assert!(farther.score <= closer.score);
    }

    #[test]
    fn scoring_is_a_pure_function(beer in 0.0f64..HEIGHT, bar in 0.0f64..HEIGHT) {
        let engine = ScoreEngine::default();
        let results = matched(beer, bar);
        let first = engine.score(&results).expect("valid frame");
        let second = engine.score(&results).expect("valid frame");
        prop_assert_eq!(first, second);
    }
}
