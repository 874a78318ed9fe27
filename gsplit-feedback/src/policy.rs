//! When to ask the text generator instead of using canned text.

use serde::{Deserialize, Serialize};

use crate::FeedbackTableError;

/// Probability of attempting generation for split feedback.
pub const SPLIT_GENERATION_PROBABILITY: f64 = 0.2;
/// Token bound for split feedback.
pub const SPLIT_MAX_TOKENS: u32 = 50;
/// Token bound for pub roasts.
pub const PUB_MAX_TOKENS: u32 = 30;

/// Weighted choice between canned text and generated text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationPolicy {
    /// A draw strictly below this value attempts generation.
    pub probability: f64,
    /// Token bound passed to the generator.
    pub max_tokens: u32,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            probability: SPLIT_GENERATION_PROBABILITY,
            max_tokens: SPLIT_MAX_TOKENS,
        }
    }
}

impl GenerationPolicy {
    /// Policy for pub roasts: same probability, shorter replies.
    #[must_use]
    pub const fn pub_roast() -> Self {
        Self {
            probability: SPLIT_GENERATION_PROBABILITY,
            max_tokens: PUB_MAX_TOKENS,
        }
    }

    /// Policy that never attempts generation.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            probability: 0.0,
            max_tokens: SPLIT_MAX_TOKENS,
        }
    }

    /// Replace the probability.
    #[must_use]
    pub const fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability;
        self
    }

    /// Validate and return a copy.
    ///
    /// # Errors
    /// Returns [`FeedbackTableError::InvalidProbability`] unless the
    /// probability lies within `0.0..=1.0`.
    pub fn validate(self) -> Result<Self, FeedbackTableError> {
        if (0.0..=1.0).contains(&self.probability) {
            Ok(self)
        } else {
            Err(FeedbackTableError::InvalidProbability {
                value: self.probability,
            })
        }
    }

    /// Whether `sample` selects the generation path.
    #[must_use]
    pub fn wants_generation(&self, sample: f64) -> bool {
        sample < self.probability
    }
}
