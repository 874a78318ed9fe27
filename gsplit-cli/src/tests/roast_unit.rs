//! Unit tests for the `roast` command.

use gsplit_core::test_support::{ScriptedTextGenerator, StubDetectionClient};
use gsplit_engine::DetectionResults;
use gsplit_feedback::{PubTier, pub_pool};
use rstest::rstest;

use super::helpers::{StubFactory, output_json};
use super::*;
use crate::roast::{RoastArgs, RoastConfig, execute_roast};

fn args(rating: f64) -> RoastArgs {
    RoastArgs {
        rating: Some(rating),
        pub_name: Some("The Long Hall".to_owned()),
        generation_probability: Some(0.0),
        seed: Some(5),
        ..RoastArgs::default()
    }
}

fn factory() -> StubFactory {
    StubFactory::new(StubDetectionClient::with_results(DetectionResults::new()))
}

#[rstest]
fn missing_rating_names_flag_and_env() {
    let err = RoastConfig::try_from(RoastArgs {
        rating: None,
        ..args(4.0)
    })
    .expect_err("rating is required");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_RATING);
            assert_eq!(env, ENV_RATING);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case::overall(RoastArgs { rating: Some(5.5), ..args(0.0) }, ARG_RATING)]
#[case::negative_taste(RoastArgs { taste: Some(-1.0), ..args(3.0) }, ARG_TASTE)]
#[case::nan_head(RoastArgs { head: Some(f64::NAN), ..args(3.0) }, ARG_HEAD)]
fn ratings_outside_zero_to_five_are_rejected(
    #[case] input: RoastArgs,
    #[case] expected_field: &'static str,
) {
    match RoastConfig::try_from(input) {
        Err(CliError::InvalidRating { field, .. }) => assert_eq!(field, expected_field),
        other => panic!("expected InvalidRating, found {other:?}"),
    }
}

#[rstest]
fn sub_ratings_default_to_overall() {
    let config = RoastConfig::try_from(args(3.5)).expect("config should build");
    assert_eq!(config.rating.taste, 3.5);
    assert_eq!(config.rating.temperature, 3.5);
    assert_eq!(config.rating.head, 3.5);
}

#[rstest]
fn roast_comes_from_tier_pool_without_generator() {
    let config = RoastConfig::try_from(args(4.8)).expect("config should build");
    let mut buffer = Vec::new();
    execute_roast(&config, &factory(), &mut buffer).expect("roast succeeds");
    let output = output_json(&buffer);
    let roast = output["roast"].as_str().expect("roast text");
    assert!(pub_pool(PubTier::Top).contains(&roast), "unexpected roast {roast}");
    assert_eq!(output["is_ai_generated"], false);
}

#[rstest]
fn generated_roast_is_flagged() {
    let config = RoastConfig::try_from(RoastArgs {
        generation_api_key: Some("gen-key".to_owned()),
        generation_probability: Some(1.0),
        ..args(1.0)
    })
    .expect("config should build");
    let factory = factory().with_generator(ScriptedTextGenerator::replying("Call the guards."));
    let mut buffer = Vec::new();
    execute_roast(&config, &factory, &mut buffer).expect("roast succeeds");
    let output = output_json(&buffer);
    assert_eq!(output["roast"], "Call the guards.");
    assert_eq!(output["is_ai_generated"], true);
    assert_eq!(factory.generator_calls(), 1);
}
