// bitmap.rs - PNG loading and saving for grids and tunnel color maps
//
// Pixel (x, y) is cell (row = y, col = x).

use std::path::Path;

use image::{GrayImage, ImageFormat, Luma, RgbImage};

use crate::error::{Error, Result};
use crate::grid::{ColorMap, Grid};

/// Any non-zero luma is alive.
pub fn grid_from_luma(image: &GrayImage) -> Grid {
    let (width, height) = image.dimensions();
    let mut grid = Grid::new(height as usize, width as usize);
    for (x, y, pixel) in image.enumerate_pixels() {
        grid.set(y as usize, x as usize, pixel.0[0] > 0);
    }
    grid
}

/// Alive is white (255), dead is black (0).
pub fn grid_to_luma(grid: &Grid) -> GrayImage {
    GrayImage::from_fn(grid.cols() as u32, grid.rows() as u32, |x, y| {
        Luma([if grid.get(y as usize, x as usize) { 255 } else { 0 }])
    })
}

pub fn color_map_from_rgb(image: &RgbImage) -> ColorMap {
    let (width, height) = image.dimensions();
    let mut colors = ColorMap::new(height as usize, width as usize);
    for (x, y, pixel) in image.enumerate_pixels() {
        colors.set(y as usize, x as usize, pixel.0);
    }
    colors
}

/// Loads a black/white image as a grid, converting to grayscale first.
pub fn load_grid(path: impl AsRef<Path>) -> Result<Grid> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| Error::ImageRead { path: path.to_path_buf(), source })?;
    Ok(grid_from_luma(&image.to_luma8()))
}

pub fn load_color_map(path: impl AsRef<Path>) -> Result<ColorMap> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| Error::ImageRead { path: path.to_path_buf(), source })?;
    Ok(color_map_from_rgb(&image.to_rgb8()))
}

pub fn save_grid(grid: &Grid, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    grid_to_luma(grid)
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| Error::ImageWrite { path: path.to_path_buf(), source })
}
