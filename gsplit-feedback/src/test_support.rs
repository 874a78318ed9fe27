//! Deterministic draw sources for tests.

use crate::DrawSource;

/// Draw source returning the same sample and index every time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedDraw {
    sample: f64,
    index: usize,
}

impl FixedDraw {
    /// Always draw `sample` and pick the first template.
    #[must_use]
    pub const fn new(sample: f64) -> Self {
        Self { sample, index: 0 }
    }

    /// Pick `index` instead, saturating at the last template.
    #[must_use]
    pub const fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }
}

impl DrawSource for FixedDraw {
    fn draw(&mut self) -> f64 {
        self.sample
    }

    fn pick(&mut self, len: usize) -> usize {
        self.index.min(len.saturating_sub(1))
    }
}
