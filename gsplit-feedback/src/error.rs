//! Load-time validation errors for feedback tables and policies.

use thiserror::Error;

/// Rejected [`FeedbackTable`](crate::FeedbackTable) or
/// [`GenerationPolicy`](crate::GenerationPolicy).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeedbackTableError {
    /// The table has no tiers.
    #[error("feedback table must contain at least one tier")]
    Empty,
    /// A tier has no templates.
    #[error("feedback tier `{tier}` has no templates")]
    EmptyPool {
        /// Name of the offending tier.
        tier: String,
    },
    /// A tier's bounds are NaN, or its upper bound does not exceed its lower.
    #[error("feedback tier `{tier}` has an invalid range")]
    InvalidRange {
        /// Name of the offending tier.
        tier: String,
    },
    /// The lowest tier starts above zero, leaving low scores unmapped.
    #[error("lowest feedback tier starts at {lower}, above 0")]
    MissingLowerBound {
        /// Lower bound of the first tier.
        lower: f64,
    },
    /// Adjacent tiers leave a gap or overlap.
    #[error("feedback tiers `{below}` and `{above}` are not contiguous")]
    NotContiguous {
        /// Lower of the two tiers.
        below: String,
        /// Upper of the two tiers.
        above: String,
    },
    /// The highest tier ends at or below 100, leaving a perfect score unmapped.
    #[error("highest feedback tier ends at {upper}, which excludes 100")]
    MissingUpperBound {
        /// Upper bound of the last tier.
        upper: f64,
    },
    /// A generation probability fell outside `0.0..=1.0`.
    #[error("generation probability {value} must be between 0.0 and 1.0")]
    InvalidProbability {
        /// Offending probability.
        value: f64,
    },
}
