// cycle.rs - Detects when a simulation revisits a recent generation

use crate::grid::Grid;

const HISTORY_LEN: usize = 10;

/// Fingerprints of the last ten observed grids, kept as a ring buffer.
#[derive(Debug, Clone, Default)]
pub struct CycleHistory {
    fingerprints: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `grid` matches one of the last ten observed grids; otherwise records it.
    pub fn observe(&mut self, grid: &Grid) -> bool {
        let fingerprint = grid.fingerprint();
        let filled = self.count.min(HISTORY_LEN);
        if self.fingerprints[..filled].contains(&fingerprint) {
            return true;
        }
        self.fingerprints[self.count % HISTORY_LEN] = fingerprint;
        self.count += 1;
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
