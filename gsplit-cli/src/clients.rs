//! Construction of the external service clients.

use std::sync::Arc;

use gsplit_data::{
    DetectionClientConfig, HttpDetectionClient, HttpTextGenerator, TextGeneratorConfig,
};
use gsplit_engine::{DetectionClient, TextGenerator};

use crate::CliError;

/// Builds service clients for the current invocation.
pub(crate) trait ClientFactory {
    fn detection(
        &self,
        config: DetectionClientConfig,
    ) -> Result<Arc<dyn DetectionClient>, CliError>;

    /// `None` when no generation credential is configured.
    fn generator(
        &self,
        config: TextGeneratorConfig,
    ) -> Result<Option<Arc<dyn TextGenerator>>, CliError>;
}

pub(crate) struct HttpClientFactory;

impl ClientFactory for HttpClientFactory {
    fn detection(
        &self,
        config: DetectionClientConfig,
    ) -> Result<Arc<dyn DetectionClient>, CliError> {
        let client =
            HttpDetectionClient::with_config(config).map_err(|source| CliError::BuildClient {
                service: "detection",
                source,
            })?;
        Ok(Arc::new(client))
    }

    fn generator(
        &self,
        config: TextGeneratorConfig,
    ) -> Result<Option<Arc<dyn TextGenerator>>, CliError> {
        if config.api_key.is_none() {
            log::debug!("no generation API key; feedback comes from templates only");
            return Ok(None);
        }
        let generator =
            HttpTextGenerator::with_config(config).map_err(|source| CliError::BuildClient {
                service: "text generation",
                source,
            })?;
        Ok(Some(Arc::new(generator)))
    }
}
