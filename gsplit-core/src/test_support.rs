//! Test doubles for the external service traits and the visualisation sink.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    Detection, DetectionClient, DetectionClientError, DetectionResults, TextGenerationError,
    TextGenerator, VisualizationError, VisualizationFrame, VisualizationSink,
};

/// `TextGenerator` that returns a fixed outcome and counts invocations.
#[derive(Debug)]
pub struct ScriptedTextGenerator {
    outcome: Result<String, TextGenerationError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl ScriptedTextGenerator {
    /// Generator that always replies with `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        Self::with_outcome(Ok(text.into()))
    }

    /// Generator that always fails with `error`.
    #[must_use]
    pub fn failing(error: TextGenerationError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<String, TextGenerationError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Number of `generate` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Prompt passed to the most recent call.
    #[must_use]
    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt
            .lock()
            .ok()
            .and_then(|prompt| prompt.clone())
    }
}

impl TextGenerator for ScriptedTextGenerator {
    fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<String, TextGenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_owned());
        }
        self.outcome.clone()
    }
}

/// `VisualizationSink` that keeps every frame in memory.
#[derive(Debug, Default)]
pub struct RecordingSink {
    frames: Mutex<Vec<VisualizationFrame>>,
    fail: bool,
}

impl RecordingSink {
    /// Sink that rejects every frame with an encode error.
    #[must_use]
    pub fn failing() -> Self {
        Self {
            frames: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    /// Frames recorded so far.
    #[must_use]
    pub fn frames(&self) -> Vec<VisualizationFrame> {
        self.frames
            .lock()
            .map(|frames| frames.clone())
            .unwrap_or_default()
    }
}

impl VisualizationSink for RecordingSink {
    fn record(&self, frame: &VisualizationFrame) -> Result<(), VisualizationError> {
        if self.fail {
            return Err(VisualizationError::Encode {
                message: "recording sink configured to fail".to_owned(),
            });
        }
        self.frames
            .lock()
            .map_err(|err| VisualizationError::Encode {
                message: err.to_string(),
            })?
            .push(frame.clone());
        Ok(())
    }
}

/// `DetectionClient` returning canned results.
#[derive(Debug, Clone)]
pub struct StubDetectionClient {
    outcome: Result<DetectionResults, DetectionClientError>,
}

impl StubDetectionClient {
    /// Client that always returns `results`.
    #[must_use]
    pub const fn with_results(results: DetectionResults) -> Self {
        Self {
            outcome: Ok(results),
        }
    }

    /// Client that always fails with `error`.
    #[must_use]
    pub const fn with_error(error: DetectionClientError) -> Self {
        Self {
            outcome: Err(error),
        }
    }
}

impl DetectionClient for StubDetectionClient {
    fn detect(&self, image: &[u8]) -> Result<DetectionResults, DetectionClientError> {
        if image.is_empty() {
            return Err(DetectionClientError::EmptyImage);
        }
        self.outcome.clone()
    }
}

/// Detection whose box top sits at `top_px`.
///
/// # Panics
/// Panics when the arguments do not form a valid detection.
#[expect(clippy::float_arithmetic, reason = "centre from top edge and height")]
#[expect(clippy::expect_used, reason = "test helper with fixed inputs")]
#[must_use]
pub fn detection_with_top(label: &str, top_px: f64, height: f64, confidence: f64) -> Detection {
    Detection::new(label, 100.0, top_px + height / 2.0, 50.0, height, confidence)
        .expect("test detection should be valid")
}

/// Detection whose box is centred vertically on `center_px`.
///
/// # Panics
/// Panics when the arguments do not form a valid detection.
#[expect(clippy::expect_used, reason = "test helper with fixed inputs")]
#[must_use]
pub fn detection_centered(label: &str, center_px: f64, height: f64, confidence: f64) -> Detection {
    Detection::new(label, 100.0, center_px, 50.0, height, confidence)
        .expect("test detection should be valid")
}
