// grid.rs - Grid types for the wormhole Game of Life

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::error::{Error, Result};

// (row, col), signed: a resolved neighbor may land outside the grid.
pub type Coord = (isize, isize);

pub type Rgb = [u8; 3];

/// Row-major boolean grid, `true` = alive.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    /// Builds a grid from nested rows; every row must have the width of the first.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut cells = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(Error::RaggedRow { row, expected: cols, found: values.len() });
            }
            cells.extend_from_slice(values);
        }
        Ok(Self { rows: rows.len(), cols, cells })
    }

    pub(crate) fn from_cells(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Panics when `(row, col)` is outside the grid.
    pub fn get(&self, row: usize, col: usize) -> bool {
        assert!(row < self.rows && col < self.cols, "cell ({row}, {col}) outside {}x{} grid", self.rows, self.cols);
        self.cells[row * self.cols + col]
    }

    /// Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < self.rows && col < self.cols {
            self.cells[row * self.cols + col] = alive;
        }
    }

    pub fn toggle(&mut self, row: usize, col: usize) {
        if row < self.rows && col < self.cols {
            let cell = &mut self.cells[row * self.cols + col];
            *cell = !*cell;
        }
    }

    pub fn in_bounds(&self, (row, col): Coord) -> bool {
        row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
    }

    pub fn cell(&self, coord: Coord) -> Option<bool> {
        self.in_bounds(coord)
            .then(|| self.cells[coord.0 as usize * self.cols + coord.1 as usize])
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Cell-wise difference of two grids of the same shape.
    pub fn xor(&self, other: &Grid) -> Result<Grid> {
        if self.shape() != other.shape() {
            return Err(Error::ShapeMismatch { expected: self.shape(), found: other.shape() });
        }
        let cells = self.cells.iter().zip(&other.cells).map(|(a, b)| a != b).collect();
        Ok(Self::from_cells(self.rows, self.cols, cells))
    }

    /// Hash of the cell states, for spotting repeated generations.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.rows.hash(&mut hasher);
        self.cols.hash(&mut hasher);
        self.cells.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorMap {
    rows: usize,
    cols: usize,
    pixels: Vec<Rgb>,
}

impl ColorMap {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            pixels: vec![[0, 0, 0]; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Rgb {
        self.pixels[row * self.cols + col]
    }

    pub fn set(&mut self, row: usize, col: usize, color: Rgb) {
        if row < self.rows && col < self.cols {
            self.pixels[row * self.cols + col] = color;
        }
    }
}
