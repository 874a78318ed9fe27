//! Option resolution shared by the subcommands.

use std::sync::Arc;
use std::time::Duration;

use camino::Utf8Path;
use gsplit_data::{FileVisualizationSink, TextGeneratorConfig};
use gsplit_engine::{
    Analyzer, BoundaryPolicy, DetectionLabels, FeedbackSelector, GenerationPolicy, ScoreEngine,
    ScoringConstants, SeededDraw, default_table,
};
use serde::Deserialize;

use crate::CliError;
use crate::clients::ClientFactory;

/// Contents of a `--constants` file. Every section is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ScoringFile {
    constants: ScoringConstants,
    labels: DetectionLabels,
    boundary: BoundaryPolicy,
}

/// Fail unless `path` names an existing regular file.
pub(crate) fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
    match gsplit_fs::file_is_file(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::SourcePathNotFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            Err(CliError::MissingSourceFile {
                field,
                path: path.to_path_buf(),
            })
        }
        Err(source) => Err(CliError::ReadSource {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read the whole file behind `path`.
pub(crate) fn read_input(path: &Utf8Path, field: &'static str) -> Result<Vec<u8>, CliError> {
    require_existing(path, field)?;
    gsplit_fs::read_file(path).map_err(|source| CliError::ReadSource {
        field,
        path: path.to_path_buf(),
        source,
    })
}

fn read_scoring_file(path: &Utf8Path) -> Result<ScoringFile, CliError> {
    let bytes = read_input(path, crate::ARG_CONSTANTS)?;
    serde_json::from_slice(&bytes).map_err(|source| CliError::ParseConstants {
        path: path.to_path_buf(),
        source,
    })
}

/// Build a validated score engine and boundary policy, using the built-in
/// calibration when no constants file is given.
pub(crate) fn load_scoring(
    path: Option<&Utf8Path>,
) -> Result<(ScoreEngine, BoundaryPolicy), CliError> {
    let file = path
        .map(read_scoring_file)
        .transpose()?
        .unwrap_or_default();
    let engine = ScoreEngine::new(file.constants, file.labels)?;
    let boundary = file.boundary.validate()?;
    Ok((engine, boundary))
}

/// Resolved text generation options.
#[derive(Debug, Clone)]
pub(crate) struct GenerationSettings {
    pub(crate) client: TextGeneratorConfig,
    pub(crate) policy: GenerationPolicy,
}

/// Raw generation options as they arrive from any subcommand.
#[derive(Debug, Default)]
pub(crate) struct GenerationOptions {
    pub(crate) url: Option<String>,
    pub(crate) api_key: Option<String>,
    pub(crate) model: Option<String>,
    pub(crate) timeout_secs: Option<u64>,
    pub(crate) probability: Option<f64>,
}

impl GenerationSettings {
    pub(crate) fn resolve(
        options: GenerationOptions,
        base_policy: GenerationPolicy,
    ) -> Result<Self, CliError> {
        let mut client = TextGeneratorConfig::default();
        if let Some(url) = options.url {
            client = client.with_base_url(url);
        }
        if let Some(model) = options.model {
            client = client.with_model(model);
        }
        if let Some(secs) = options.timeout_secs {
            client = client.with_timeout(Duration::from_secs(secs));
        }
        if let Some(key) = options.api_key {
            client = client.with_api_key(key);
        }
        let policy = options
            .probability
            .map_or(base_policy, |probability| {
                base_policy.with_probability(probability)
            })
            .validate()?;
        Ok(Self { client, policy })
    }
}

/// Draw source for one run: seeded when asked, otherwise from entropy.
pub(crate) fn draw_for(seed: Option<u64>) -> SeededDraw {
    seed.map_or_else(SeededDraw::from_entropy, SeededDraw::from_seed)
}

/// Wire an analyser from resolved settings.
pub(crate) fn build_analyzer(
    engine: ScoreEngine,
    boundary: BoundaryPolicy,
    generation: &GenerationSettings,
    debug_dir: Option<&Utf8Path>,
    factory: &dyn ClientFactory,
) -> Result<Analyzer, CliError> {
    let mut selector = FeedbackSelector::new(default_table()?).with_policy(generation.policy);
    if let Some(generator) = factory.generator(generation.client.clone())? {
        selector = selector.with_generator(generator);
    }
    let mut analyzer = Analyzer::new(engine, selector).with_boundary(boundary);
    if let Some(dir) = debug_dir {
        log::info!("writing visualisation frames to {dir}");
        analyzer = analyzer.with_sink(Arc::new(FileVisualizationSink::new(dir)));
    }
    Ok(analyzer)
}
