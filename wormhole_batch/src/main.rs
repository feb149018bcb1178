// main.rs - Batch and verification driver for the wormhole Game of Life

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use wormhole::{ColorMap, PortalMap, PortalNetworks, Simulator, bitmap};

mod batch;
mod cli;
mod config;
mod verify;

use cli::{Cli, Commands};
use config::Settings;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run(paths) => {
            let settings = paths.apply_run(settings);
            let summary = batch::run_cases(&settings, &settings.problem_prefix, &settings.output_dir)?;
            info!(
                processed = summary.processed.len(),
                skipped = summary.skipped.len(),
                "done processing all {}* cases",
                settings.problem_prefix
            );
        }
        Commands::Verify(paths) => {
            let settings = paths.apply_verify(settings);
            let report = verify::verify_examples(&settings)?;
            println!("Verified {} example case(s)", report.cases.len());
            if report.all_passed() {
                println!("All example outputs matched");
            } else {
                let failed: Vec<_> = report.failed().map(|case| case.name.as_str()).collect();
                println!("Cases that did not match: {}", failed.join(", "));
                process::exit(1);
            }
        }
        Commands::Simulate { start, horizontal, vertical, steps, out } => {
            let grid = bitmap::load_grid(&start)?;
            let portals = PortalNetworks::new(
                load_portals(horizontal.as_deref())?,
                load_portals(vertical.as_deref())?,
            );
            let mut sim = Simulator::new(grid, portals);
            let result = sim.simulate(steps);
            bitmap::save_grid(&result, &out).with_context(|| format!("after {steps} steps"))?;
            info!(population = result.population(), "wrote generation {steps} to {}", out.display());
        }
    }
    Ok(())
}

fn load_portals(path: Option<&Path>) -> Result<PortalMap> {
    let colors = match path {
        Some(path) => bitmap::load_color_map(path)?,
        None => ColorMap::new(0, 0),
    };
    Ok(PortalMap::from_color_map(&colors))
}
