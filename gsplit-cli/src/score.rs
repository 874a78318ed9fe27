//! `score` command: score a saved detection workflow response offline.

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use gsplit_data::parse_workflow_response;
use gsplit_engine::GenerationPolicy;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::clients::ClientFactory;
use crate::settings::{
    GenerationOptions, GenerationSettings, build_analyzer, draw_for, load_scoring, read_input,
};
use crate::{
    ARG_CONSTANTS, ARG_DEBUG_DIR, ARG_GENERATION_API_KEY, ARG_GENERATION_MODEL,
    ARG_GENERATION_PROBABILITY, ARG_GENERATION_TIMEOUT, ARG_GENERATION_URL, ARG_RESPONSE,
    ARG_SEED, CliError, ENV_RESPONSE, write_json,
};

/// CLI arguments for the `score` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Score a detection workflow response saved as JSON. No \
                 detection request is made, which makes this useful for \
                 replaying and recalibrating past photos.",
    about = "Score a saved detection response"
)]
#[ortho_config(prefix = "GSPLIT")]
pub(crate) struct ScoreArgs {
    /// Path to the saved workflow response.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) response: Option<Utf8PathBuf>,
    /// JSON file overriding scoring constants, labels and boundary policy.
    #[arg(long = ARG_CONSTANTS, value_name = "path")]
    #[serde(default)]
    pub(crate) constants: Option<Utf8PathBuf>,
    /// Directory receiving one annotation document per analysis.
    #[arg(long = ARG_DEBUG_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) debug_dir: Option<Utf8PathBuf>,
    /// Text generation service base URL.
    #[arg(long = ARG_GENERATION_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) generation_url: Option<String>,
    /// Text generation API key. Without one, verdicts come from templates.
    #[arg(long = ARG_GENERATION_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) generation_api_key: Option<String>,
    /// Text generation model.
    #[arg(long = ARG_GENERATION_MODEL, value_name = "model")]
    #[serde(default)]
    pub(crate) generation_model: Option<String>,
    /// Text generation timeout in seconds.
    #[arg(long = ARG_GENERATION_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) generation_timeout_secs: Option<u64>,
    /// Probability of asking the generator for the verdict.
    #[arg(long = ARG_GENERATION_PROBABILITY, value_name = "p")]
    #[serde(default)]
    pub(crate) generation_probability: Option<f64>,
    /// Seed for reproducible verdict selection.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl ScoreArgs {
    pub(crate) fn into_config(self) -> Result<ScoreConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ScoreConfig::try_from(merged)
    }
}

/// Resolved `score` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct ScoreConfig {
    pub(crate) response: Utf8PathBuf,
    pub(crate) constants: Option<Utf8PathBuf>,
    pub(crate) debug_dir: Option<Utf8PathBuf>,
    pub(crate) generation: GenerationSettings,
    pub(crate) seed: Option<u64>,
}

impl TryFrom<ScoreArgs> for ScoreConfig {
    type Error = CliError;

    fn try_from(args: ScoreArgs) -> Result<Self, Self::Error> {
        let response = args.response.ok_or(CliError::MissingArgument {
            field: ARG_RESPONSE,
            env: ENV_RESPONSE,
        })?;
        let generation = GenerationSettings::resolve(
            GenerationOptions {
                url: args.generation_url,
                api_key: args.generation_api_key,
                model: args.generation_model,
                timeout_secs: args.generation_timeout_secs,
                probability: args.generation_probability,
            },
            GenerationPolicy::default(),
        )?;
        Ok(Self {
            response,
            constants: args.constants,
            debug_dir: args.debug_dir,
            generation,
            seed: args.seed,
        })
    }
}

pub(crate) fn run_score(
    args: ScoreArgs,
    factory: &dyn ClientFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_score(&config, factory, writer)
}

pub(crate) fn execute_score(
    config: &ScoreConfig,
    factory: &dyn ClientFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let body = read_input(&config.response, ARG_RESPONSE)?;
    let results = parse_workflow_response(&body).map_err(|source| CliError::ParseResponse {
        path: config.response.clone(),
        source,
    })?;
    let (engine, boundary) = load_scoring(config.constants.as_deref())?;
    let analyzer = build_analyzer(
        engine,
        boundary,
        &config.generation,
        config.debug_dir.as_deref(),
        factory,
    )?;
    let label = config.response.file_stem().unwrap_or("response");
    let mut draw = draw_for(config.seed);
    let result = analyzer.analyze_named(label, &results, &mut draw)?;
    write_json(writer, &result)
}
