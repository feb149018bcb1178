// case.rs - One problem folder: a starting grid and two tunnel bitmaps

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::bitmap;
use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::portals::build_portals;
use crate::teleport::PortalNetworks;

pub const STARTING_POSITION: &str = "starting_position.png";
pub const HORIZONTAL_TUNNEL: &str = "horizontal_tunnel.png";
pub const VERTICAL_TUNNEL: &str = "vertical_tunnel.png";

/// Paths of the three images a case folder must contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFiles {
    pub name: String,
    pub start: PathBuf,
    pub horizontal: PathBuf,
    pub vertical: PathBuf,
}

/// A loaded case, ready to simulate.
#[derive(Debug, Clone)]
pub struct Case {
    pub name: String,
    pub start: Grid,
    pub portals: PortalNetworks,
}

impl CaseFiles {
    pub fn in_dir(dir: &Path) -> Self {
        let name = dir
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| dir.display().to_string());
        Self {
            name,
            start: dir.join(STARTING_POSITION),
            horizontal: dir.join(HORIZONTAL_TUNNEL),
            vertical: dir.join(VERTICAL_TUNNEL),
        }
    }

    pub fn missing(&self) -> Vec<PathBuf> {
        [&self.start, &self.horizontal, &self.vertical]
            .into_iter()
            .filter(|path| !path.is_file())
            .cloned()
            .collect()
    }

    /// Loads the starting grid and parses both tunnel maps.
    pub fn load(&self) -> Result<Case> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(Error::MissingCaseFiles { case: self.name.clone(), missing });
        }

        let start = bitmap::load_grid(&self.start)?;
        let horizontal = bitmap::load_color_map(&self.horizontal)?;
        let vertical = bitmap::load_color_map(&self.vertical)?;

        for (label, colors) in [("horizontal", &horizontal), ("vertical", &vertical)] {
            if (colors.rows(), colors.cols()) != start.shape() {
                warn!(
                    case = %self.name,
                    "{label} tunnel map is {}x{} but the grid is {}x{}",
                    colors.rows(),
                    colors.cols(),
                    start.rows(),
                    start.cols()
                );
            }
        }

        let portals = PortalNetworks::new(build_portals(&horizontal).map, build_portals(&vertical).map);
        Ok(Case { name: self.name.clone(), start, portals })
    }
}
