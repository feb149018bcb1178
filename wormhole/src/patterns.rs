// patterns.rs - Named seed patterns and random fills

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::Grid;

/// Live cells as `(row, col)` offsets from the pattern's top-left corner.
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "Glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "Blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "Toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "Beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "R-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
];

impl Pattern {
    pub fn extent(&self) -> (usize, usize) {
        self.cells
            .iter()
            .fold((0, 0), |(rows, cols), &(r, c)| (rows.max(r + 1), cols.max(c + 1)))
    }
}

/// Clears `grid` and stamps `pattern` with its top-left corner at `origin`.
/// Cells that fall outside the grid are dropped.
pub fn apply_pattern(grid: &mut Grid, pattern: &Pattern, origin: (usize, usize)) {
    grid.clear();
    for &(row, col) in pattern.cells {
        grid.set(origin.0 + row, origin.1 + col, true);
    }
}

/// Stamps `pattern` in the middle of `grid`.
pub fn apply_centered(grid: &mut Grid, pattern: &Pattern) {
    let (rows, cols) = pattern.extent();
    let origin = (
        grid.rows().saturating_sub(rows) / 2,
        grid.cols().saturating_sub(cols) / 2,
    );
    apply_pattern(grid, pattern, origin);
}

/// Fills `grid` with roughly a third of its cells alive, reproducibly per seed.
pub fn apply_random_pattern(grid: &mut Grid, seed_value: u64) {
    // Simple pseudo-random generator
    let mut hasher = DefaultHasher::new();
    seed_value.hash(&mut hasher);
    let mut seed = hasher.finish();

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            seed = seed.wrapping_mul(1103515245).wrapping_add(12345);
            grid.set(row, col, (seed >> 16) % 3 == 0);
        }
    }
}
