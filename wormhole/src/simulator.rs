// simulator.rs - Generation stepping with wormhole neighborhoods

use std::sync::Arc;

use crate::grid::Grid;
use crate::teleport::PortalNetworks;

/// Life rule: survive on 2 or 3, birth on exactly 3.
pub fn next_state(alive: bool, live_neighbors: usize) -> bool {
    match (alive, live_neighbors) {
        (true, 2) | (true, 3) => true,   // Survival
        (false, 3)            => true,   // Birth
        _                     => false,  // Death or stays dead
    }
}

/// Live resolved neighbors of `(row, col)`. Out-of-bounds neighbors are skipped,
/// and a cell reached from two directions counts twice.
pub fn live_neighbors(grid: &Grid, portals: &PortalNetworks, row: usize, col: usize) -> usize {
    portals
        .neighbors((row as isize, col as isize))
        .filter(|&coord| grid.cell(coord) == Some(true))
        .count()
}

/// One row of the next generation, read from the current generation only.
pub fn next_row(grid: &Grid, portals: &PortalNetworks, row: usize) -> Vec<bool> {
    (0..grid.cols())
        .map(|col| next_state(grid.get(row, col), live_neighbors(grid, portals, row, col)))
        .collect()
}

/// Owns the current generation and shares the portal maps read-only.
#[derive(Debug, Clone)]
pub struct Simulator {
    grid: Grid,
    portals: Arc<PortalNetworks>,
    generation: u64,
}

impl Simulator {
    pub fn new(grid: Grid, portals: impl Into<Arc<PortalNetworks>>) -> Self {
        Self {
            grid,
            portals: portals.into(),
            generation: 0,
        }
    }

    // No wormholes: plain Life with dead borders.
    pub fn plain(grid: Grid) -> Self {
        Self::new(grid, PortalNetworks::default())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn portals(&self) -> &Arc<PortalNetworks> {
        &self.portals
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Replaces the grid and restarts the generation count. Portals are kept.
    pub fn reset(&mut self, grid: Grid) {
        self.grid = grid;
        self.generation = 0;
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn step(&mut self) {
        let (rows, cols) = self.grid.shape();
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            cells.extend(next_row(&self.grid, &self.portals, row));
        }
        self.advance_to(Grid::from_cells(rows, cols, cells));
    }

    /// Adopts a next generation computed elsewhere (e.g. row by row in parallel).
    ///
    /// Panics if `next` does not have the current grid's shape.
    pub fn advance_to(&mut self, next: Grid) {
        assert_eq!(next.shape(), self.grid.shape(), "next generation must keep the grid shape");
        self.grid = next;
        self.generation += 1;
    }

    /// Runs `iterations` steps and returns a copy of the resulting grid.
    pub fn simulate(&mut self, iterations: u64) -> Grid {
        for _ in 0..iterations {
            self.step();
        }
        self.grid.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{self, Pattern};
    use crate::portals::PortalMap;
    use proptest::prelude::*;

    fn grid(rows: &[&str]) -> Grid {
        let rows: Vec<Vec<bool>> = rows
            .iter()
            .map(|row| row.bytes().map(|b| b == b'#').collect())
            .collect();
        Grid::from_rows(&rows).unwrap()
    }

    /// Reference Conway step with dead borders.
    fn conway_step(grid: &Grid) -> Grid {
        let (rows, cols) = grid.shape();
        let mut next = Grid::new(rows, cols);
        for row in 0..rows {
            for col in 0..cols {
                let mut count = 0;
                for dr in -1..=1isize {
                    for dc in -1..=1isize {
                        if (dr, dc) != (0, 0) && grid.cell((row as isize + dr, col as isize + dc)) == Some(true) {
                            count += 1;
                        }
                    }
                }
                next.set(row, col, next_state(grid.get(row, col), count));
            }
        }
        next
    }

    #[test]
    fn test_life_rule() {
        assert!(next_state(true, 2));
        assert!(next_state(true, 3));
        assert!(!next_state(true, 1));
        assert!(!next_state(true, 4));
        assert!(next_state(false, 3));
        assert!(!next_state(false, 2));
        assert!(!next_state(false, 8));
    }

    #[test]
    fn test_blinker_oscillates_with_period_two() {
        let horizontal = grid(&["...", "###", "..."]);
        let vertical = grid(&[".#.", ".#.", ".#."]);
        let mut sim = Simulator::plain(horizontal.clone());

        sim.step();
        assert_eq!(sim.grid(), &vertical);
        sim.step();
        assert_eq!(sim.grid(), &horizontal);
        assert_eq!(sim.generation(), 2);
    }

    #[test]
    fn test_simulate_zero_is_identity() {
        let start = grid(&["#.#", ".##", "#.."]);
        let mut sim = Simulator::plain(start.clone());
        assert_eq!(sim.simulate(0), start);
        assert_eq!(sim.generation(), 0);
    }

    #[test]
    fn test_corner_sees_only_in_bounds_neighbors() {
        // A full 3x3 block: the corner has 3 in-bounds live neighbors, the center 8.
        let full = grid(&["###", "###", "###"]);
        let portals = PortalNetworks::default();
        assert_eq!(live_neighbors(&full, &portals, 0, 0), 3);
        assert_eq!(live_neighbors(&full, &portals, 0, 1), 5);
        assert_eq!(live_neighbors(&full, &portals, 1, 1), 8);
    }

    #[test]
    fn test_two_cells_die_out() {
        let mut sim = Simulator::plain(grid(&["#."]));
        sim.step();
        assert_eq!(sim.grid(), &grid(&[".."]));
    }

    #[test]
    fn test_wormhole_carries_neighbors_across_the_grid() {
        // Left column links to right column.
        let mut horizontal = PortalMap::new();
        for row in 0..3 {
            horizontal.link((row, 0), (row, 4)).unwrap();
        }
        let portals = PortalNetworks::new(horizontal, PortalMap::new());
        let start = grid(&["#....", "#....", "#...."]);

        // (1,3) reaches the bar through Right and Down-Right; Up-Right ignores horizontal portals.
        assert_eq!(live_neighbors(&start, &portals, 1, 3), 2);
        // (1,1) steps Left and Down-Left into portal cells and lands on the dead right edge.
        assert_eq!(live_neighbors(&start, &portals, 1, 1), 1);

        // Plain Life would turn the bar into a blinker; here only its center survives.
        let mut sim = Simulator::new(start, portals);
        let next = sim.simulate(1);
        assert_eq!(next.population(), 1);
        assert!(next.get(1, 0));
    }

    #[test]
    fn test_duplicate_neighbors_count_twice() {
        // Right from (0,0) and Down from (0,0) both resolve to (2,2).
        let mut horizontal = PortalMap::new();
        horizontal.link((0, 1), (2, 2)).unwrap();
        let mut vertical = PortalMap::new();
        vertical.link((1, 0), (2, 2)).unwrap();
        let portals = PortalNetworks::new(horizontal, vertical);

        let mut start = Grid::new(3, 3);
        start.set(2, 2, true);
        start.set(1, 1, true);
        assert_eq!(live_neighbors(&start, &portals, 0, 0), 3);

        let mut sim = Simulator::new(start, portals);
        assert!(sim.simulate(1).get(0, 0));
    }

    #[test]
    fn test_portals_are_shared_between_simulators() {
        let portals = Arc::new(PortalNetworks::default());
        let a = Simulator::new(Grid::new(2, 2), Arc::clone(&portals));
        let b = Simulator::new(Grid::new(4, 4), Arc::clone(&portals));
        assert!(Arc::ptr_eq(a.portals(), b.portals()));
    }

    #[test]
    fn test_glider_matches_reference_conway() {
        let mut start = Grid::new(12, 12);
        let glider: &Pattern = &patterns::PATTERNS[0];
        patterns::apply_pattern(&mut start, glider, (1, 1));

        let mut expected = start.clone();
        for _ in 0..8 {
            expected = conway_step(&expected);
        }
        let mut sim = Simulator::plain(start);
        assert_eq!(sim.simulate(8), expected);
    }

    proptest! {
        #[test]
        fn prop_empty_portals_match_plain_life(cells in prop::collection::vec(any::<bool>(), 48)) {
            let rows: Vec<&[bool]> = cells.chunks(8).collect();
            let start = Grid::from_rows(&rows).unwrap();
            let mut sim = Simulator::plain(start.clone());
            sim.step();
            prop_assert_eq!(sim.grid(), &conway_step(&start));
        }

        #[test]
        fn prop_checkpoints_are_additive(
            cells in prop::collection::vec(any::<bool>(), 36),
            a in 0u64..6,
            b in 0u64..6,
        ) {
            let rows: Vec<&[bool]> = cells.chunks(6).collect();
            let start = Grid::from_rows(&rows).unwrap();
            let mut horizontal = PortalMap::new();
            horizontal.link((0, 0), (5, 5)).unwrap();
            horizontal.link((2, 3), (4, 1)).unwrap();
            let mut vertical = PortalMap::new();
            vertical.link((0, 5), (5, 0)).unwrap();
            let portals = Arc::new(PortalNetworks::new(horizontal, vertical));

            let mut split = Simulator::new(start.clone(), Arc::clone(&portals));
            split.simulate(a);
            let split = split.simulate(b);

            let mut whole = Simulator::new(start, portals);
            prop_assert_eq!(split, whole.simulate(a + b));
        }
    }
}
