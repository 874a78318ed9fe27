//! Unit tests for offline scoring of saved responses.

use gsplit_core::test_support::StubDetectionClient;
use gsplit_engine::DetectionResults;
use rstest::rstest;

use super::helpers::{COARSE_RESPONSE, StubFactory, Workspace, output_json};
use super::*;
use crate::score::{ScoreArgs, ScoreConfig, execute_score};

fn factory() -> StubFactory {
    StubFactory::new(StubDetectionClient::with_results(DetectionResults::new()))
}

#[rstest]
fn missing_response_names_flag_and_env() {
    let err = ScoreConfig::try_from(ScoreArgs::default()).expect_err("response is required");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_RESPONSE);
            assert_eq!(env, ENV_RESPONSE);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
#[case::response(ARG_RESPONSE)]
#[case::constants(ARG_CONSTANTS)]
fn absent_input_files_are_reported_as_missing(#[case] expected_field: &'static str) {
    let workspace = Workspace::new();
    let absent = workspace.root().join("absent.json");
    let response = if expected_field == ARG_RESPONSE {
        absent.clone()
    } else {
        workspace.write("response.json", COARSE_RESPONSE.as_bytes())
    };
    let constants = (expected_field == ARG_CONSTANTS).then(|| absent.clone());
    let config = ScoreConfig::try_from(ScoreArgs {
        response: Some(response),
        constants,
        ..ScoreArgs::default()
    })
    .expect("config should build");

    let mut buffer = Vec::new();
    match execute_score(&config, &factory(), &mut buffer) {
        Err(CliError::MissingSourceFile { field, path }) => {
            assert_eq!(field, expected_field);
            assert_eq!(path, absent);
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn coarse_response_scores_unmatched_tier() {
    let workspace = Workspace::new();
    let response = workspace.write("response.json", COARSE_RESPONSE.as_bytes());
    let config = ScoreConfig::try_from(ScoreArgs {
        response: Some(response),
        seed: Some(3),
        ..ScoreArgs::default()
    })
    .expect("config should build");

    let mut buffer = Vec::new();
    execute_score(&config, &factory(), &mut buffer).expect("scoring succeeds");
    let output = output_json(&buffer);
    assert_eq!(output["score"], 11.3);
    assert_eq!(output["distance_from_line_mm"], 50.0);
    assert_eq!(output["zone_entered"], false);
    assert_eq!(output["confidence"], 0.5);
    assert_eq!(output["logo_height"], 100.0);
}

#[rstest]
fn malformed_response_names_path() {
    let workspace = Workspace::new();
    let response = workspace.write("response.json", b"<html>502</html>");
    let config = ScoreConfig::try_from(ScoreArgs {
        response: Some(response.clone()),
        ..ScoreArgs::default()
    })
    .expect("config should build");

    let mut buffer = Vec::new();
    match execute_score(&config, &factory(), &mut buffer) {
        Err(CliError::ParseResponse { path, .. }) => assert_eq!(path, response),
        other => panic!("expected ParseResponse, found {other:?}"),
    }
    assert!(buffer.is_empty());
}

#[rstest]
fn seeded_runs_print_identical_output() {
    let workspace = Workspace::new();
    let response = workspace.write("response.json", COARSE_RESPONSE.as_bytes());
    let config = ScoreConfig::try_from(ScoreArgs {
        response: Some(response),
        seed: Some(11),
        ..ScoreArgs::default()
    })
    .expect("config should build");

    let mut first = Vec::new();
    let mut second = Vec::new();
    execute_score(&config, &factory(), &mut first).expect("first run");
    execute_score(&config, &factory(), &mut second).expect("second run");
    assert_eq!(first, second);
}
