//! Feedback selection: tier lookup, weighted generation, silent fallback.

use std::sync::Arc;

use gsplit_core::TextGenerator;
use serde::{Deserialize, Serialize};

use crate::bank::split_prompt;
use crate::{DrawSource, FeedbackTable, GenerationPolicy, ensure_terminal_punctuation};

/// Where a piece of feedback came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackSource {
    /// A pre-written template.
    Template,
    /// The text generation service.
    Generated,
}

/// Selected feedback text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    /// Text shown to the user.
    pub text: String,
    /// Origin of [`Feedback::text`].
    pub source: FeedbackSource,
}

impl Feedback {
    /// Whether the text came from the generator.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.source == FeedbackSource::Generated
    }
}

/// Ask `generator` for text, absorbing every failure.
///
/// Empty replies count as failures. Returned text is trimmed.
pub(crate) fn try_generate(
    generator: Option<&dyn TextGenerator>,
    prompt: &str,
    max_tokens: u32,
) -> Option<String> {
    let Some(client) = generator else {
        log::debug!("generation selected but no generator is configured");
        return None;
    };
    match client.generate(prompt, max_tokens) {
        Ok(text) if !text.trim().is_empty() => Some(text.trim().to_owned()),
        Ok(_) => {
            log::warn!("text generation returned an empty reply; using canned text");
            None
        }
        Err(err) => {
            log::warn!("text generation failed; using canned text: {err}");
            None
        }
    }
}

/// Turns a score into feedback text.
///
/// Always returns text: generation is a best-effort enhancement over the
/// canned tables.
#[derive(Clone)]
pub struct FeedbackSelector {
    table: FeedbackTable,
    generator: Option<Arc<dyn TextGenerator>>,
    policy: GenerationPolicy,
}

impl std::fmt::Debug for FeedbackSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackSelector")
            .field("table", &self.table)
            .field("generator", &self.generator.as_ref().map(|_| "<dyn TextGenerator>"))
            .field("policy", &self.policy)
            .finish()
    }
}

impl FeedbackSelector {
    /// Selector over `table` with no generator and the default policy.
    #[must_use]
    pub fn new(table: FeedbackTable) -> Self {
        Self {
            table,
            generator: None,
            policy: GenerationPolicy::default(),
        }
    }

    /// Attach a text generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Replace the generation policy.
    #[must_use]
    pub fn with_policy(mut self, policy: GenerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Table in use.
    #[must_use]
    pub const fn table(&self) -> &FeedbackTable {
        &self.table
    }

    /// Select feedback for one analysis.
    ///
    /// One sample is drawn; below the policy probability the generator is
    /// tried with a prompt built from the inputs. Otherwise, or when
    /// generation fails, a template of the score's tier is picked uniformly
    /// and its distance placeholder filled in.
    pub fn select(
        &self,
        score: f64,
        distance_mm: f64,
        zone_entered: bool,
        draw: &mut dyn DrawSource,
    ) -> Feedback {
        let tier = self.table.tier_for(score);
        let sample = draw.draw();
        log::debug!("feedback tier {} for score {score}; draw {sample:.4}", tier.name());

        if self.policy.wants_generation(sample) {
            let prompt = split_prompt(score, distance_mm, zone_entered);
            if let Some(text) =
                try_generate(self.generator.as_deref(), &prompt, self.policy.max_tokens)
            {
                return Feedback {
                    text: ensure_terminal_punctuation(&text),
                    source: FeedbackSource::Generated,
                };
            }
        }

        let template = tier.template(draw.pick(tier.len()));
        Feedback {
            text: template.render(distance_mm),
            source: FeedbackSource::Template,
        }
    }
}
