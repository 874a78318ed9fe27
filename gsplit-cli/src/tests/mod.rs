//! Shared test harness modules for the gsplit CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod roast_unit;
mod score_unit;
mod steps;
