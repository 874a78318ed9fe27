//! Test doubles and fixtures shared by the CLI tests.

use std::sync::Arc;

use camino::{Utf8Path, Utf8PathBuf};
use gsplit_core::test_support::{
    ScriptedTextGenerator, StubDetectionClient, detection_centered, detection_with_top,
};
use gsplit_data::{DetectionClientConfig, TextGeneratorConfig};
use gsplit_engine::{
    DetectionClient, DetectionResults, DetectionSet, ImageSize, ModelOutput, TextGenerator,
};
use tempfile::TempDir;

use super::*;
use crate::clients::ClientFactory;

/// Saved response holding only coarse boxes: liquid top at 0.25, logo
/// centre at 0.5 of a 1024 px frame.
pub(super) const COARSE_RESPONSE: &str = r#"{
  "pint results": {
    "image": { "width": 768, "height": 1024 },
    "predictions": [
      { "x": 384, "y": 556, "width": 300, "height": 600, "confidence": 0.9, "class": "beer" },
      { "x": 384, "y": 512, "width": 80, "height": 100, "confidence": 0.7, "class": "G" }
    ]
  },
  "split_results": []
}"#;

pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write(&self, name: &str, contents: &[u8]) -> Utf8PathBuf {
        let path = self.root.join(name);
        std::fs::write(&path, contents).expect("write fixture file");
        path
    }
}

/// Beer line and reference bar both at the middle of a 1000 px frame.
pub(super) fn perfect_split() -> DetectionResults {
    let image = ImageSize::new(600.0, 1000.0);
    DetectionResults::new()
        .with(
            ModelOutput::Line,
            DetectionSet::new(image, vec![detection_with_top("split", 500.0, 40.0, 0.9)]),
        )
        .with(
            ModelOutput::Reference,
            DetectionSet::new(image, vec![detection_centered("g-bar", 500.0, 20.0, 0.8)]),
        )
}

/// Client factory handing out canned clients.
pub(super) struct StubFactory {
    detector: StubDetectionClient,
    generator: Arc<ScriptedTextGenerator>,
}

impl StubFactory {
    pub(super) fn new(detector: StubDetectionClient) -> Self {
        Self {
            detector,
            generator: Arc::new(ScriptedTextGenerator::replying("Clinic.")),
        }
    }

    pub(super) fn with_generator(mut self, generator: ScriptedTextGenerator) -> Self {
        self.generator = Arc::new(generator);
        self
    }

    pub(super) fn generator_calls(&self) -> usize {
        self.generator.calls()
    }
}

impl ClientFactory for StubFactory {
    fn detection(
        &self,
        _config: DetectionClientConfig,
    ) -> Result<Arc<dyn DetectionClient>, CliError> {
        Ok(Arc::new(self.detector.clone()))
    }

    fn generator(
        &self,
        config: TextGeneratorConfig,
    ) -> Result<Option<Arc<dyn TextGenerator>>, CliError> {
        if config.api_key.is_none() {
            return Ok(None);
        }
        let generator: Arc<dyn TextGenerator> = self.generator.clone();
        Ok(Some(generator))
    }
}

pub(super) fn output_json(buffer: &[u8]) -> serde_json::Value {
    serde_json::from_slice(buffer).expect("command prints JSON")
}
