//! Facade crate for the split-the-G scoring engine.
//!
//! [`Analyzer`] wires the score engine, the feedback selector and the
//! boundary policy into a single request-scoped call. The component crates
//! are re-exported for callers that need finer control.

#![forbid(unsafe_code)]

use std::sync::Arc;

pub use gsplit_core::{
    AnalysisError, AnalysisResult, Detection, DetectionAvailability, DetectionClient,
    DetectionClientError, DetectionResults, DetectionSet, ImageSize, ModelOutput, NullSink,
    ScoreResult, ScoreTier, TextGenerationError, TextGenerator, VisualizationFrame,
    VisualizationSink,
};
pub use gsplit_feedback::{
    DrawSource, Feedback, FeedbackSelector, FeedbackTable, FeedbackTableError, GenerationPolicy,
    PubRating, PubRoast, PubRoastSelector, SeededDraw, default_table,
};
pub use gsplit_scorer::{BoundaryPolicy, DetectionLabels, ScoreEngine, ScoringConstants};

/// Combine a raw score, its feedback and detection diagnostics into the
/// response payload, applying `boundary` exactly once.
#[must_use]
pub fn assemble(
    score: ScoreResult,
    feedback: Feedback,
    detections: DetectionAvailability,
    logo: Option<&Detection>,
    boundary: &BoundaryPolicy,
) -> AnalysisResult {
    let generated = feedback.is_generated();
    let mut result = AnalysisResult::new(score, feedback.text, generated).with_detections(detections);
    if let Some(logo_box) = logo {
        result = result.with_logo_size(logo_box.width, logo_box.height);
    }
    boundary.apply(result)
}

/// Request-scoped analysis pipeline.
///
/// # Examples
///
/// ```
/// use gsplit_engine::{Analyzer, DetectionResults, SeededDraw};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let analyzer = Analyzer::with_default_tables()?;
/// let result = analyzer.analyze(&DetectionResults::new(), &mut SeededDraw::from_seed(7))?;
/// assert_eq!(result.score, 10.0);
/// assert_eq!(result.confidence, 0.5);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Analyzer {
    engine: ScoreEngine,
    selector: FeedbackSelector,
    boundary: BoundaryPolicy,
    sink: Option<Arc<dyn VisualizationSink>>,
}

impl std::fmt::Debug for Analyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Analyzer")
            .field("engine", &self.engine)
            .field("selector", &self.selector)
            .field("boundary", &self.boundary)
            .field("sink", &self.sink.as_ref().map(|_| "<dyn VisualizationSink>"))
            .finish()
    }
}

impl Analyzer {
    /// Pipeline over `engine` and `selector` with the default boundary
    /// policy and no visualisation sink.
    #[must_use]
    pub fn new(engine: ScoreEngine, selector: FeedbackSelector) -> Self {
        Self {
            engine,
            selector,
            boundary: BoundaryPolicy::default(),
            sink: None,
        }
    }

    /// Pipeline with the default constants, labels and feedback table.
    ///
    /// # Errors
    /// Propagates [`FeedbackTableError`] from building the built-in table.
    pub fn with_default_tables() -> Result<Self, FeedbackTableError> {
        Ok(Self::new(
            ScoreEngine::default(),
            FeedbackSelector::new(default_table()?),
        ))
    }

    /// Replace the boundary policy.
    #[must_use]
    pub const fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    /// Record a visualisation frame for each analysis.
    #[must_use]
    pub fn with_sink(mut self, sink: Arc<dyn VisualizationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Score engine in use.
    #[must_use]
    pub const fn engine(&self) -> &ScoreEngine {
        &self.engine
    }

    /// Analyse detection results.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidDetection`] for malformed geometry.
    pub fn analyze(
        &self,
        results: &DetectionResults,
        draw: &mut dyn DrawSource,
    ) -> Result<AnalysisResult, AnalysisError> {
        self.analyze_named("image", results, draw)
    }

    /// Analyse detection results for the image called `label`.
    ///
    /// The label only names the visualisation frame.
    ///
    /// # Errors
    /// Returns [`AnalysisError::InvalidDetection`] for malformed geometry.
    pub fn analyze_named(
        &self,
        label: &str,
        results: &DetectionResults,
        draw: &mut dyn DrawSource,
    ) -> Result<AnalysisResult, AnalysisError> {
        let score = self.engine.score(results)?;
        self.visualize(label, results, &score);
        let feedback = self
            .selector
            .select(score.score, score.distance_mm, score.zone_entered, draw);
        Ok(assemble(
            score,
            feedback,
            self.engine.availability(results),
            self.engine.logo(results),
            &self.boundary,
        ))
    }

    /// Run detection on `image` and analyse the outcome.
    ///
    /// # Errors
    /// Returns [`AnalysisError::DetectionUnavailable`] when the detection
    /// call fails, otherwise as [`Analyzer::analyze_named`].
    pub fn analyze_image(
        &self,
        client: &dyn DetectionClient,
        label: &str,
        image: &[u8],
        draw: &mut dyn DrawSource,
    ) -> Result<AnalysisResult, AnalysisError> {
        let results = client.detect(image)?;
        self.analyze_named(label, &results, draw)
    }

    fn visualize(&self, label: &str, results: &DetectionResults, score: &ScoreResult) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        let frame = match self.engine.visualization_frame(label, results, score) {
            Ok(Some(frame)) => frame,
            Ok(None) => return,
            Err(err) => {
                log::warn!("skipping visualisation for {label}: {err}");
                return;
            }
        };
        if let Err(err) = sink.record(&frame) {
            log::warn!("visualisation sink failed for {label}: {err}");
        }
    }
}
