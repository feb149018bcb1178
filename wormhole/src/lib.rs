// lib.rs - Conway's Game of Life with wormhole neighbor lookups
//
// Bitmaps become portal maps, portal maps redirect neighbor steps, and the
// simulator applies the usual Life rule to the redirected neighborhood.

pub mod bitmap;
pub mod case;
pub mod compare;
pub mod cycle;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod portals;
pub mod simulator;
pub mod teleport;

pub use case::{Case, CaseFiles};
pub use compare::{Comparison, compare};
pub use cycle::CycleHistory;
pub use error::{Error, Result};
pub use grid::{ColorMap, Coord, Grid, Rgb};
pub use portals::{ColoringError, PortalBuild, PortalMap, build_portals};
pub use simulator::{Simulator, next_row};
pub use teleport::{Direction, Network, PortalNetworks};
