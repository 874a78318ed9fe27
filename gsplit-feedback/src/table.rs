//! Score tiers and their template pools.

use crate::nonempty::NonEmpty;
use crate::{FeedbackTableError, Template};

/// A half-open score range `[lower, upper)` with its templates.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackTier {
    name: String,
    lower: f64,
    upper: f64,
    templates: NonEmpty<Template>,
}

impl FeedbackTier {
    /// Build a tier.
    ///
    /// # Errors
    /// Returns [`FeedbackTableError::EmptyPool`] when `templates` is empty
    /// and [`FeedbackTableError::InvalidRange`] when `upper <= lower` or a
    /// bound is NaN.
    pub fn new(
        name: impl Into<String>,
        lower: f64,
        upper: f64,
        templates: Vec<Template>,
    ) -> Result<Self, FeedbackTableError> {
        let tier = name.into();
        if lower.is_nan() || upper.is_nan() || upper <= lower {
            return Err(FeedbackTableError::InvalidRange { tier });
        }
        let Some(pool) = NonEmpty::from_vec(templates) else {
            return Err(FeedbackTableError::EmptyPool { tier });
        };
        Ok(Self {
            name: tier,
            lower,
            upper,
            templates: pool,
        })
    }

    /// Tier name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inclusive lower bound.
    #[must_use]
    pub const fn lower(&self) -> f64 {
        self.lower
    }

    /// Exclusive upper bound.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        self.upper
    }

    /// Whether `score` falls in `[lower, upper)`.
    #[must_use]
    pub fn contains(&self, score: f64) -> bool {
        (self.lower..self.upper).contains(&score)
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Always `false`: tiers are validated non-empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Template at `index`, saturating at the last template.
    #[must_use]
    pub fn template(&self, index: usize) -> &Template {
        self.templates.get_or_last(index)
    }
}

/// Ordered tiers that map every score in `[0, 100]` to exactly one tier.
///
/// Validation happens once in [`FeedbackTable::new`]; lookups cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackTable {
    tiers: NonEmpty<FeedbackTier>,
}

impl FeedbackTable {
    /// Validate and build a table from tiers ordered by ascending range.
    ///
    /// # Errors
    /// Returns [`FeedbackTableError`] when the tiers are empty, start above
    /// zero, leave a gap or overlap, or stop at or below 100.
    pub fn new(tiers: Vec<FeedbackTier>) -> Result<Self, FeedbackTableError> {
        let tiers = NonEmpty::from_vec(tiers).ok_or(FeedbackTableError::Empty)?;
        let first = tiers.first();
        if first.lower > 0.0 {
            return Err(FeedbackTableError::MissingLowerBound { lower: first.lower });
        }
        for (below, above) in tiers.iter().zip(tiers.iter().skip(1)) {
            if below.upper != above.lower {
                return Err(FeedbackTableError::NotContiguous {
                    below: below.name.clone(),
                    above: above.name.clone(),
                });
            }
        }
        let last = tiers.last();
        if last.upper <= 100.0 {
            return Err(FeedbackTableError::MissingUpperBound { upper: last.upper });
        }
        Ok(Self { tiers })
    }

    /// Tier containing `score`.
    ///
    /// NaN is treated as `0.0` and other scores are clamped to `[0, 100]`.
    #[must_use]
    pub fn tier_for(&self, score: f64) -> &FeedbackTier {
        let sanitised = if score.is_nan() {
            0.0
        } else {
            score.clamp(0.0, 100.0)
        };
        self.tiers
            .iter()
            .rev()
            .find(|tier| tier.lower <= sanitised)
            .unwrap_or_else(|| self.tiers.first())
    }

    /// Iterate tiers from lowest to highest.
    pub fn tiers(&self) -> impl Iterator<Item = &FeedbackTier> {
        self.tiers.iter()
    }
}
