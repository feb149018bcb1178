// main.rs - Wormhole Game of Life viewer with row coroutines

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use egui::Color32;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wormhole::{CaseFiles, CycleHistory, Grid, PortalNetworks, Simulator, patterns};

mod rows;  // Row coroutines
mod ui;    // eframe::App for WormholeApp

const EMPTY_SIZE: (usize, usize) = (50, 50);

/// Watch a wormhole Game of Life case evolve.
#[derive(Parser)]
#[command(name = "wormhole_coro")]
struct Args {
    /// Case folder holding starting_position.png and the two tunnel maps.
    case: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let app = match &args.case {
        Some(dir) => {
            let case = CaseFiles::in_dir(dir)
                .load()
                .with_context(|| format!("failed to load case {}", dir.display()))?;
            info!(case = %case.name, rows = case.start.rows(), cols = case.start.cols(), "loaded case");
            WormholeApp::new(case.name, case.start, case.portals)?
        }
        None => WormholeApp::new("empty".to_owned(), Grid::new(EMPTY_SIZE.0, EMPTY_SIZE.1), PortalNetworks::default())?,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 1000.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wormhole Game of Life",
        options,
        Box::new(|_cc| Box::new(app)),
    )
    .map_err(|err| anyhow::anyhow!("viewer failed: {err}"))
}

pub struct WormholeApp {
    sim: Simulator,
    start: Grid,  // Kept for Reset

    pub case_name: String,
    pub is_running: bool,
    pub last_update: Instant,
    pub update_interval: Duration,
    pub live_color: Color32,
    pub dead_color: Color32,
    pub horizontal_color: Color32,
    pub vertical_color: Color32,
    pub show_portals: bool,
    pub selected_pattern: usize,
    pub random_seed: u64,

    runtime: tokio::runtime::Runtime,
    history: CycleHistory,
}

impl WormholeApp {
    pub fn new(case_name: String, start: Grid, portals: PortalNetworks) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;

        Ok(Self {
            sim: Simulator::new(start.clone(), Arc::new(portals)),
            start,
            case_name,
            is_running: false,
            last_update: Instant::now(),
            update_interval: Duration::from_millis(200),
            live_color: Color32::from_rgb(0, 200, 0),
            dead_color: Color32::from_rgb(40, 40, 40),
            horizontal_color: Color32::from_rgb(230, 120, 30),
            vertical_color: Color32::from_rgb(60, 140, 240),
            show_portals: true,
            selected_pattern: 0,
            random_seed: 0,
            runtime,
            history: CycleHistory::new(),
        })
    }

    pub fn grid(&self) -> &Grid {
        self.sim.grid()
    }

    pub fn portals(&self) -> &PortalNetworks {
        self.sim.portals()
    }

    pub fn generation(&self) -> u64 {
        self.sim.generation()
    }

    fn restart_from(&mut self, grid: Grid) {
        self.sim.reset(grid);
        self.history.reset();
    }
}

/// Controls the UI drives between frames.
pub trait SimulationControls {
    fn update_generation(&mut self);
    fn check_for_cycle(&mut self) -> bool;
    fn reset_to_start(&mut self);
    fn clear_grid(&mut self);
    fn apply_selected_pattern(&mut self);
    fn apply_random_pattern(&mut self);
    fn toggle_cell(&mut self, row: usize, col: usize);
}

impl SimulationControls for WormholeApp {
    fn update_generation(&mut self) {
        let grid = Arc::new(self.sim.grid().clone());
        let portals = Arc::clone(self.sim.portals());

        match self.runtime.block_on(rows::next_generation(grid, portals)) {
            Ok(next) => self.sim.advance_to(next),
            Err(err) => {
                error!("generation {} failed: {err:#}", self.sim.generation() + 1);
                self.is_running = false;
                return;
            }
        }

        if self.check_for_cycle() {
            info!(generation = self.sim.generation(), "cycle detected, pausing");
            self.is_running = false;
        }
    }

    fn check_for_cycle(&mut self) -> bool {
        self.history.observe(self.sim.grid())
    }

    fn reset_to_start(&mut self) {
        self.restart_from(self.start.clone());
    }

    fn clear_grid(&mut self) {
        let (rows, cols) = self.sim.grid().shape();
        self.restart_from(Grid::new(rows, cols));
    }

    fn apply_selected_pattern(&mut self) {
        if let Some(pattern) = patterns::PATTERNS.get(self.selected_pattern) {
            let mut grid = self.sim.grid().clone();
            patterns::apply_centered(&mut grid, pattern);
            self.restart_from(grid);
        }
    }

    fn apply_random_pattern(&mut self) {
        let mut grid = self.sim.grid().clone();
        patterns::apply_random_pattern(&mut grid, self.random_seed);
        self.random_seed = self.random_seed.wrapping_add(1);
        self.restart_from(grid);
    }

    fn toggle_cell(&mut self, row: usize, col: usize) {
        self.sim.grid_mut().toggle(row, col);
        self.history.reset();
    }
}
