//! Roasts for pub ratings.

use std::sync::Arc;

use gsplit_core::TextGenerator;
use serde::{Deserialize, Serialize};

use crate::bank::{pub_pool, pub_prompt};
use crate::selector::try_generate;
use crate::{DrawSource, GenerationPolicy};

/// A visitor's rating of a pub, each component out of five.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PubRating {
    /// Overall stars.
    pub overall: f64,
    /// Taste of the pint.
    pub taste: f64,
    /// Serving temperature.
    pub temperature: f64,
    /// Quality of the head.
    pub head: f64,
    /// Pub name.
    pub pub_name: String,
}

/// Band of an overall pub rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PubTier {
    /// 4.5 stars and up.
    Top,
    /// 3.5 to 4.5.
    Solid,
    /// 2.5 to 3.5.
    Mid,
    /// 1.5 to 2.5.
    Rough,
    /// Below 1.5, or not a number.
    Bottom,
}

impl PubTier {
    /// Band containing `overall`.
    #[must_use]
    pub fn from_rating(overall: f64) -> Self {
        if overall >= 4.5 {
            Self::Top
        } else if overall >= 3.5 {
            Self::Solid
        } else if overall >= 2.5 {
            Self::Mid
        } else if overall >= 1.5 {
            Self::Rough
        } else {
            Self::Bottom
        }
    }

    /// Lower-case name used in prompts.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Solid => "solid",
            Self::Mid => "mid",
            Self::Rough => "rough",
            Self::Bottom => "bottom",
        }
    }
}

/// A selected pub roast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubRoast {
    /// Roast text.
    pub roast: String,
    /// Whether the text came from the generator.
    pub is_ai_generated: bool,
}

/// Picks a roast for a pub rating, optionally via the text generator.
#[derive(Clone)]
pub struct PubRoastSelector {
    generator: Option<Arc<dyn TextGenerator>>,
    policy: GenerationPolicy,
}

impl std::fmt::Debug for PubRoastSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubRoastSelector")
            .field("generator", &self.generator.as_ref().map(|_| "<dyn TextGenerator>"))
            .field("policy", &self.policy)
            .finish()
    }
}

impl Default for PubRoastSelector {
    fn default() -> Self {
        Self {
            generator: None,
            policy: GenerationPolicy::pub_roast(),
        }
    }
}

impl PubRoastSelector {
    /// Attach a text generator.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Replace the generation policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: GenerationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Roast `rating`.
    pub fn select(&self, rating: &PubRating, draw: &mut dyn DrawSource) -> PubRoast {
        let tier = PubTier::from_rating(rating.overall);
        let sample = draw.draw();
        log::debug!("pub tier {} for {}; draw {sample:.4}", tier.as_str(), rating.pub_name);

        if self.policy.wants_generation(sample) {
            let prompt = pub_prompt(rating, tier);
            if let Some(roast) =
                try_generate(self.generator.as_deref(), &prompt, self.policy.max_tokens)
            {
                return PubRoast {
                    roast,
                    is_ai_generated: true,
                };
            }
        }

        let pool = pub_pool(tier);
        let roast = pool
            .get(draw.pick(pool.len()))
            .or_else(|| pool.first())
            .copied()
            .unwrap_or_default()
            .to_owned();
        PubRoast {
            roast,
            is_ai_generated: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedDraw;
    use gsplit_core::test_support::ScriptedTextGenerator;
    use rstest::{fixture, rstest};

    #[fixture]
    fn rating() -> PubRating {
        PubRating {
            overall: 4.8,
            taste: 5.0,
            temperature: 4.0,
            head: 5.0,
            pub_name: "The Long Hall".to_owned(),
        }
    }

    #[rstest]
    #[case(5.0, PubTier::Top)]
    #[case(4.5, PubTier::Top)]
    #[case(4.49, PubTier::Solid)]
    #[case(3.5, PubTier::Solid)]
    #[case(2.5, PubTier::Mid)]
    #[case(1.5, PubTier::Rough)]
    #[case(1.0, PubTier::Bottom)]
    #[case(f64::NAN, PubTier::Bottom)]
    fn ratings_map_to_tiers(#[case] overall: f64, #[case] expected: PubTier) {
        assert_eq!(PubTier::from_rating(overall), expected);
    }

    #[rstest]
    fn high_draw_picks_from_the_tier_pool(rating: PubRating) {
        let roast = PubRoastSelector::default().select(&rating, &mut FixedDraw::new(0.9).with_index(1));
        assert_eq!(roast.roast, "This pub gets it.");
        assert!(!roast.is_ai_generated);
    }

    #[rstest]
    fn low_draw_uses_the_generator(rating: PubRating) {
        let generator = Arc::new(ScriptedTextGenerator::replying(" Found your local. "));
        let selector = PubRoastSelector::default().with_generator(Arc::clone(&generator) as _);
        let roast = selector.select(&rating, &mut FixedDraw::new(0.0));
        assert_eq!(roast.roast, "Found your local.");
        assert!(roast.is_ai_generated);
        let prompt = generator.last_prompt().expect("prompt recorded");
        assert!(prompt.contains("Pub: The Long Hall"));
        assert!(prompt.contains("Tier: top"));
    }
}
