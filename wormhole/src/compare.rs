// compare.rs - Pixel comparison between an expected and a generated grid

use crate::error::Result;
use crate::grid::Grid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub mismatched: usize,
    pub total: usize,
    /// Alive where the two grids disagree.
    pub diff: Grid,
}

impl Comparison {
    pub fn is_exact(&self) -> bool {
        self.mismatched == 0
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.mismatched as f64 / self.total as f64 * 100.0
        }
    }
}

/// Fails with [`crate::Error::ShapeMismatch`] when the grids differ in shape.
pub fn compare(expected: &Grid, actual: &Grid) -> Result<Comparison> {
    let diff = expected.xor(actual)?;
    Ok(Comparison {
        mismatched: diff.population(),
        total: expected.rows() * expected.cols(),
        diff,
    })
}
