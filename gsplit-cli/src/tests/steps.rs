//! Behaviour-driven step definitions driving the CLI scenarios.

use std::cell::RefCell;

use camino::Utf8PathBuf;
use gsplit_core::test_support::StubDetectionClient;
use gsplit_engine::DetectionResults;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::helpers::{COARSE_RESPONSE, StubFactory, Workspace, output_json, perfect_split};
use super::*;
use crate::analyze::{AnalyzeConfig, execute_analyze};
use crate::roast::{RoastConfig, execute_roast};
use crate::score::{ScoreConfig, execute_score};

/// Scenario state shared by every step.
struct CliWorld {
    workspace: Workspace,
    input: RefCell<Option<Utf8PathBuf>>,
    detections: RefCell<DetectionResults>,
    outcome: RefCell<Option<Result<Vec<u8>, CliError>>>,
}

impl CliWorld {
    fn new() -> Self {
        Self {
            workspace: Workspace::new(),
            input: RefCell::new(None),
            detections: RefCell::new(DetectionResults::new()),
            outcome: RefCell::new(None),
        }
    }

    fn input(&self) -> String {
        self.input
            .borrow()
            .as_ref()
            .map(ToString::to_string)
            .expect("input recorded")
    }

    /// Parse `argv` as the binary would, then run the command offline
    /// against stub clients, skipping environment and file layering.
    fn invoke(&self, argv: &[&str]) {
        let factory = StubFactory::new(StubDetectionClient::with_results(
            self.detections.borrow().clone(),
        ));
        let mut buffer = Vec::new();
        let outcome = Cli::try_parse_from(argv)
            .map_err(CliError::ArgumentParsing)
            .and_then(|cli| match cli.command {
                Command::Analyze(args) => {
                    let config = AnalyzeConfig::try_from(args)?;
                    execute_analyze(&config, &factory, &mut buffer)
                }
                Command::Score(args) => {
                    let config = ScoreConfig::try_from(args)?;
                    execute_score(&config, &factory, &mut buffer)
                }
                Command::Roast(args) => {
                    let config = RoastConfig::try_from(args)?;
                    execute_roast(&config, &factory, &mut buffer)
                }
            });
        self.outcome.replace(Some(outcome.map(|()| buffer)));
    }
}

#[fixture]
fn world() -> CliWorld {
    CliWorld::new()
}

#[given("a saved workflow response with only coarse boxes")]
fn saved_coarse_response(#[from(world)] world: &CliWorld) {
    let path = world
        .workspace
        .write("response.json", COARSE_RESPONSE.as_bytes());
    world.input.replace(Some(path));
}

#[given("a photo whose detections show a perfect split")]
fn perfect_photo(#[from(world)] world: &CliWorld) {
    let path = world.workspace.write("pint.jpg", b"image bytes");
    world.input.replace(Some(path));
    world.detections.replace(perfect_split());
}

#[given("no saved files")]
fn no_files(#[from(world)] world: &CliWorld) {
    world.input.replace(None);
}

#[when("I run the score command on the saved response")]
fn run_score_command(#[from(world)] world: &CliWorld) {
    let input = world.input();
    world.invoke(&[
        "gsplit",
        "score",
        input.as_str(),
        "--generation-probability",
        "0",
        "--seed",
        "1",
    ]);
}

#[when("I run the analyze command on the photo")]
fn run_analyze_command(#[from(world)] world: &CliWorld) {
    let input = world.input();
    world.invoke(&[
        "gsplit",
        "analyze",
        input.as_str(),
        "--workspace",
        "pubs",
        "--workflow-id",
        "split-the-g",
        "--detection-api-key",
        "test-key",
        "--seed",
        "1",
    ]);
}

#[when("I run the roast command with a rating of 7 stars")]
fn run_roast_command(#[from(world)] world: &CliWorld) {
    world.invoke(&["gsplit", "roast", "--rating", "7", "--pub-name", "Mulligan's"]);
}

#[when("I run an unknown subcommand")]
fn run_unknown_command(#[from(world)] world: &CliWorld) {
    world.invoke(&["gsplit", "pour"]);
}

#[then("the printed result reports a score of 11.3")]
fn reports_unmatched_score(#[from(world)] world: &CliWorld) {
    assert_score(world, 11.3);
}

#[then("the printed result reports a score of 99.5")]
fn reports_clamped_score(#[from(world)] world: &CliWorld) {
    assert_score(world, 99.5);
}

fn assert_score(world: &CliWorld, expected: f64) {
    let borrowed = world.outcome.borrow();
    let buffer = borrowed
        .as_ref()
        .expect("outcome recorded")
        .as_ref()
        .expect("expected success");
    assert_eq!(output_json(buffer)["score"], expected);
}

#[then("the command fails with an invalid rating for \"rating\"")]
fn reports_invalid_rating(#[from(world)] world: &CliWorld) {
    let borrowed = world.outcome.borrow();
    let error = borrowed
        .as_ref()
        .expect("outcome recorded")
        .as_ref()
        .expect_err("expected error");
    match error {
        CliError::InvalidRating { field, value } => {
            assert_eq!(*field, ARG_RATING);
            assert_eq!(*value, 7.0);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[then("the command fails with an argument parsing error")]
fn reports_parse_error(#[from(world)] world: &CliWorld) {
    let borrowed = world.outcome.borrow();
    let error = borrowed
        .as_ref()
        .expect("outcome recorded")
        .as_ref()
        .expect_err("expected error");
    assert!(
        matches!(error, CliError::ArgumentParsing(_)),
        "unexpected error {error:?}"
    );
}

macro_rules! register_cli_scenario {
    ($fn_name:ident, $scenario_title:literal) => {
        #[scenario(path = "tests/features/cli_commands.feature", name = $scenario_title)]
        fn $fn_name(#[from(world)] world: CliWorld) {
            let _ = world;
        }
    };
}

register_cli_scenario!(scoring_saved_response, "scoring a saved coarse response");
register_cli_scenario!(analysing_perfect_split, "analysing a photo with a perfect split");
register_cli_scenario!(rejecting_bad_rating, "rejecting an impossible pub rating");
register_cli_scenario!(rejecting_unknown_command, "rejecting an unknown subcommand");
