//! Score engine for split-the-G photographs.
//!
//! [`ScoreEngine`] turns one image's [`DetectionResults`](gsplit_core::DetectionResults)
//! into a [`ScoreResult`](gsplit_core::ScoreResult). Its calibration lives in
//! [`ScoringConstants`] and [`DetectionLabels`], both injected at
//! construction. [`BoundaryPolicy`] holds the outlier clamp the boundary
//! layer applies once to every surfaced score.

#![forbid(unsafe_code)]

mod boundary;
mod constants;
mod engine;
mod error;
mod visual;

pub use boundary::BoundaryPolicy;
pub use constants::{DetectionLabels, ScoringConstants};
pub use engine::{ScoreEngine, round_to};
pub use error::ScoringConfigError;
