//! Command-line interface for scoring split-the-G photos.
//!
//! Options are layered by `ortho_config`: CLI flags win over `GSPLIT_*`
//! environment variables, which win over configuration files.
#![forbid(unsafe_code)]

use std::io::Write;

use clap::{Parser, Subcommand};

mod analyze;
mod clients;
mod error;
mod roast;
mod score;
mod settings;

pub use error::CliError;

use analyze::AnalyzeArgs;
use clients::{ClientFactory, HttpClientFactory};
use roast::RoastArgs;
use score::ScoreArgs;

const ARG_IMAGE: &str = "image";
const ENV_IMAGE: &str = "GSPLIT_CMDS_ANALYZE_IMAGE";
const ARG_WORKSPACE: &str = "workspace";
const ENV_WORKSPACE: &str = "GSPLIT_CMDS_ANALYZE_WORKSPACE";
const ARG_WORKFLOW_ID: &str = "workflow-id";
const ENV_WORKFLOW_ID: &str = "GSPLIT_CMDS_ANALYZE_WORKFLOW_ID";
const ARG_DETECTION_URL: &str = "detection-url";
const ARG_DETECTION_API_KEY: &str = "detection-api-key";
const ENV_DETECTION_API_KEY: &str = "GSPLIT_CMDS_ANALYZE_DETECTION_API_KEY";
const ARG_DETECTION_TIMEOUT: &str = "detection-timeout-secs";
const ARG_RESPONSE: &str = "response";
const ENV_RESPONSE: &str = "GSPLIT_CMDS_SCORE_RESPONSE";
const ARG_CONSTANTS: &str = "constants";
const ARG_DEBUG_DIR: &str = "debug-dir";
const ARG_GENERATION_URL: &str = "generation-url";
const ARG_GENERATION_API_KEY: &str = "generation-api-key";
const ARG_GENERATION_MODEL: &str = "generation-model";
const ARG_GENERATION_TIMEOUT: &str = "generation-timeout-secs";
const ARG_GENERATION_PROBABILITY: &str = "generation-probability";
const ARG_SEED: &str = "seed";
const ARG_RATING: &str = "rating";
const ENV_RATING: &str = "GSPLIT_CMDS_ROAST_RATING";
const ARG_TASTE: &str = "taste";
const ARG_TEMPERATURE: &str = "temperature";
const ARG_HEAD: &str = "head";
const ARG_PUB_NAME: &str = "pub-name";
const ENV_PUB_NAME: &str = "GSPLIT_CMDS_ROAST_PUB_NAME";

/// Run the CLI with the current process arguments and environment, writing
/// JSON to standard output.
///
/// # Errors
/// Returns [`CliError`] when arguments, configuration, inputs or external
/// services fail.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let mut stdout = std::io::stdout().lock();
    run_with(cli.command, &HttpClientFactory, &mut stdout)
}

fn run_with(
    command: Command,
    factory: &dyn ClientFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    match command {
        Command::Analyze(args) => analyze::run_analyze(args, factory, writer),
        Command::Score(args) => score::run_score(args, factory, writer),
        Command::Roast(args) => roast::run_roast(args, factory, writer),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "gsplit",
    about = "Score how well a stout's beer line splits the G",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Detect, score and roast a photo.
    Analyze(AnalyzeArgs),
    /// Score a saved detection workflow response without calling the detector.
    Score(ScoreArgs),
    /// Roast a pub from its rating.
    Roast(RoastArgs),
}

/// Serialise `payload` as pretty JSON followed by a newline.
fn write_json<T: serde::Serialize>(writer: &mut dyn Write, payload: &T) -> Result<(), CliError> {
    let body = serde_json::to_string_pretty(payload).map_err(CliError::SerialiseOutput)?;
    writer
        .write_all(body.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)
}

#[cfg(test)]
mod tests;
