//! `analyze` command: detect, score and roast one photo.

use std::io::Write;
use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use gsplit_data::DetectionClientConfig;
use gsplit_engine::GenerationPolicy;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::clients::ClientFactory;
use crate::settings::{
    GenerationOptions, GenerationSettings, build_analyzer, draw_for, load_scoring, read_input,
    require_existing,
};
use crate::{
    ARG_CONSTANTS, ARG_DEBUG_DIR, ARG_DETECTION_API_KEY, ARG_DETECTION_TIMEOUT,
    ARG_DETECTION_URL, ARG_GENERATION_API_KEY, ARG_GENERATION_MODEL, ARG_GENERATION_PROBABILITY,
    ARG_GENERATION_TIMEOUT, ARG_GENERATION_URL, ARG_IMAGE, ARG_SEED, ARG_WORKFLOW_ID,
    ARG_WORKSPACE, CliError, ENV_DETECTION_API_KEY, ENV_IMAGE, ENV_WORKFLOW_ID, ENV_WORKSPACE,
    write_json,
};

/// CLI arguments for the `analyze` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Send a photo to the detection workflow, score how well the \
                 beer line splits the G, pick a verdict and print the result \
                 as JSON.",
    about = "Analyse a split-the-G photo"
)]
#[ortho_config(prefix = "GSPLIT")]
pub(crate) struct AnalyzeArgs {
    /// Path to the photo.
    #[arg(value_name = "path")]
    #[serde(default)]
    pub(crate) image: Option<Utf8PathBuf>,
    /// Detection workspace name.
    #[arg(long = ARG_WORKSPACE, value_name = "name")]
    #[serde(default)]
    pub(crate) workspace: Option<String>,
    /// Detection workflow identifier.
    #[arg(long = ARG_WORKFLOW_ID, value_name = "id")]
    #[serde(default)]
    pub(crate) workflow_id: Option<String>,
    /// Detection service base URL.
    #[arg(long = ARG_DETECTION_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) detection_url: Option<String>,
    /// Detection service API key.
    #[arg(long = ARG_DETECTION_API_KEY, value_name = "key")]
    #[serde(default)]
    pub(crate) detection_api_key: Option<String>,
    /// Detection request timeout in seconds.
    #[arg(long = ARG_DETECTION_TIMEOUT, value_name = "secs")]
    #[serde(default)]
    pub(crate) detection_timeout_secs: Option<u64>,
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

impl AnalyzeArgs {
    pub(crate) fn into_config(self) -> Result<AnalyzeConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        AnalyzeConfig::try_from(merged)
    }
}

/// Resolved `analyze` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct AnalyzeConfig {
    pub(crate) image: Utf8PathBuf,
    pub(crate) detection: DetectionClientConfig,
    pub(crate) constants: Option<Utf8PathBuf>,
    pub(crate) debug_dir: Option<Utf8PathBuf>,
    pub(crate) generation: GenerationSettings,
    pub(crate) seed: Option<u64>,
}

impl AnalyzeConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        require_existing(&self.image, ARG_IMAGE)?;
        if let Some(constants) = self.constants.as_deref() {
            require_existing(constants, ARG_CONSTANTS)?;
        }
        Ok(())
    }

    /// Label naming the visualisation frame: the image's file stem.
    pub(crate) fn label(&self) -> &str {
        self.image.file_stem().unwrap_or("image")
    }
}

impl TryFrom<AnalyzeArgs> for AnalyzeConfig {
    type Error = CliError;

    fn try_from(args: AnalyzeArgs) -> Result<Self, Self::Error> {
        let image = args.image.ok_or(CliError::MissingArgument {
            field: ARG_IMAGE,
            env: ENV_IMAGE,
        })?;
        let workspace = args.workspace.ok_or(CliError::MissingArgument {
            field: ARG_WORKSPACE,
            env: ENV_WORKSPACE,
        })?;
        let workflow_id = args.workflow_id.ok_or(CliError::MissingArgument {
            field: ARG_WORKFLOW_ID,
            env: ENV_WORKFLOW_ID,
        })?;
        let api_key = args.detection_api_key.ok_or(CliError::MissingArgument {
            field: ARG_DETECTION_API_KEY,
            env: ENV_DETECTION_API_KEY,
        })?;

        let mut detection = DetectionClientConfig::new(workspace, workflow_id).with_api_key(api_key);
        if let Some(url) = args.detection_url {
            detection = detection.with_base_url(url);
        }
        if let Some(secs) = args.detection_timeout_secs {
            detection = detection.with_timeout(Duration::from_secs(secs));
        }

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
            image,
            detection,
            constants: args.constants,
            debug_dir: args.debug_dir,
            generation,
            seed: args.seed,
        })
    }
}

pub(crate) fn run_analyze(
    args: AnalyzeArgs,
    factory: &dyn ClientFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_analyze(&config, factory, writer)
}

pub(crate) fn execute_analyze(
    config: &AnalyzeConfig,
    factory: &dyn ClientFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    config.validate_sources()?;
    let image = read_input(&config.image, ARG_IMAGE)?;
    let (engine, boundary) = load_scoring(config.constants.as_deref())?;
    let analyzer = build_analyzer(
        engine,
        boundary,
        &config.generation,
        config.debug_dir.as_deref(),
        factory,
    )?;
    let detector = factory.detection(config.detection.clone())?;
    let mut draw = draw_for(config.seed);
    let result = analyzer.analyze_image(detector.as_ref(), config.label(), &image, &mut draw)?;
    write_json(writer, &result)
}
