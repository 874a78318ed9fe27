//! `roast` command: a one-line verdict on a pub from its rating.

use std::io::Write;

use clap::Parser;
use gsplit_engine::{GenerationPolicy, PubRating, PubRoastSelector};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};

use crate::clients::ClientFactory;
use crate::settings::{GenerationOptions, GenerationSettings, draw_for};
use crate::{
    ARG_GENERATION_API_KEY, ARG_GENERATION_MODEL, ARG_GENERATION_PROBABILITY,
    ARG_GENERATION_TIMEOUT, ARG_GENERATION_URL, ARG_HEAD, ARG_PUB_NAME, ARG_RATING, ARG_SEED,
    ARG_TASTE, ARG_TEMPERATURE, CliError, ENV_PUB_NAME, ENV_RATING, write_json,
};

const RATING_RANGE: std::ops::RangeInclusive<f64> = 0.0..=5.0;

/// CLI arguments for the `roast` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Roast (or praise) a pub from its star rating. Sub-ratings \
                 default to the overall rating.",
    about = "Roast a pub"
)]
#[ortho_config(prefix = "GSPLIT")]
pub(crate) struct RoastArgs {
    /// Overall rating, 0 to 5 stars.
    #[arg(long = ARG_RATING, value_name = "stars")]
    #[serde(default)]
    pub(crate) rating: Option<f64>,
    /// Taste rating, 0 to 5.
    #[arg(long = ARG_TASTE, value_name = "stars")]
    #[serde(default)]
    pub(crate) taste: Option<f64>,
    /// Temperature rating, 0 to 5.
    #[arg(long = ARG_TEMPERATURE, value_name = "stars")]
    #[serde(default)]
    pub(crate) temperature: Option<f64>,
    /// Head rating, 0 to 5.
    #[arg(long = ARG_HEAD, value_name = "stars")]
    #[serde(default)]
    pub(crate) head: Option<f64>,
    /// Name of the pub.
    #[arg(long = ARG_PUB_NAME, value_name = "name")]
    #[serde(default)]
    pub(crate) pub_name: Option<String>,
    /// Text generation service base URL.
    #[arg(long = ARG_GENERATION_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) generation_url: Option<String>,
    /// Text generation API key. Without one, roasts come from the pool.
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
    /// Probability of asking the generator for the roast.
    #[arg(long = ARG_GENERATION_PROBABILITY, value_name = "p")]
    #[serde(default)]
    pub(crate) generation_probability: Option<f64>,
    /// Seed for reproducible roast selection.
    #[arg(long = ARG_SEED, value_name = "n")]
    #[serde(default)]
    pub(crate) seed: Option<u64>,
}

impl RoastArgs {
    pub(crate) fn into_config(self) -> Result<RoastConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RoastConfig::try_from(merged)
    }
}

/// Resolved `roast` command configuration.
#[derive(Debug, Clone)]
pub(crate) struct RoastConfig {
    pub(crate) rating: PubRating,
    pub(crate) generation: GenerationSettings,
    pub(crate) seed: Option<u64>,
}

fn checked_rating(field: &'static str, value: f64) -> Result<f64, CliError> {
    if RATING_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(CliError::InvalidRating { field, value })
    }
}

impl TryFrom<RoastArgs> for RoastConfig {
    type Error = CliError;

    fn try_from(args: RoastArgs) -> Result<Self, Self::Error> {
        let overall = checked_rating(
            ARG_RATING,
            args.rating.ok_or(CliError::MissingArgument {
                field: ARG_RATING,
                env: ENV_RATING,
            })?,
        )?;
        let pub_name = args.pub_name.ok_or(CliError::MissingArgument {
            field: ARG_PUB_NAME,
            env: ENV_PUB_NAME,
        })?;
        let rating = PubRating {
            overall,
            taste: checked_rating(ARG_TASTE, args.taste.unwrap_or(overall))?,
            temperature: checked_rating(ARG_TEMPERATURE, args.temperature.unwrap_or(overall))?,
            head: checked_rating(ARG_HEAD, args.head.unwrap_or(overall))?,
            pub_name,
        };
        let generation = GenerationSettings::resolve(
            GenerationOptions {
                url: args.generation_url,
                api_key: args.generation_api_key,
                model: args.generation_model,
                timeout_secs: args.generation_timeout_secs,
                probability: args.generation_probability,
            },
            GenerationPolicy::pub_roast(),
        )?;
        Ok(Self {
            rating,
            generation,
            seed: args.seed,
        })
    }
}

pub(crate) fn run_roast(
    args: RoastArgs,
    factory: &dyn ClientFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    execute_roast(&config, factory, writer)
}

pub(crate) fn execute_roast(
    config: &RoastConfig,
    factory: &dyn ClientFactory,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let mut selector = PubRoastSelector::default().with_policy(config.generation.policy);
    if let Some(generator) = factory.generator(config.generation.client.clone())? {
        selector = selector.with_generator(generator);
    }
    let mut draw = draw_for(config.seed);
    let roast = selector.select(&config.rating, &mut draw);
    write_json(writer, &roast)
}
