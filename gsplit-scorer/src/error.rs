//! Errors raised while validating scoring configuration.

use thiserror::Error;

/// Rejected [`ScoringConstants`](crate::ScoringConstants) or
/// [`BoundaryPolicy`](crate::BoundaryPolicy) values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringConfigError {
    /// A constant was NaN or infinite.
    #[error("scoring constant `{field}` must be finite")]
    NonFinite {
        /// Name of the offending constant.
        field: &'static str,
    },
    /// A constant that must be strictly positive was not.
    #[error("scoring constant `{field}` must be positive")]
    NonPositive {
        /// Name of the offending constant.
        field: &'static str,
    },
    /// A constant fell outside its permitted range.
    #[error("scoring constant `{field}` must lie within {range}")]
    OutOfRange {
        /// Name of the offending constant.
        field: &'static str,
        /// Human-readable permitted range.
        range: &'static str,
    },
    /// The zone bonus ramp ends before it starts.
    #[error("zone bonus ramp must end after it starts")]
    InvertedRamp,
    /// The UNMATCHED ceiling exceeds the overall maximum score.
    #[error("unmatched ceiling must not exceed the maximum score")]
    UnmatchedCeilingTooHigh,
}
