// cli.rs - Command-line surface of wormhole-batch

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::Settings;

/// Simulate Game of Life cases with wormholes and check them against expected images.
#[derive(Parser)]
#[command(name = "wormhole-batch", version)]
pub struct Cli {
    /// TOML settings file; flags override its values.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every problem case and save an image per checkpoint.
    Run(Paths),

    /// Run every example case and compare with its expected-<checkpoint>.png images.
    Verify(Paths),

    /// Simulate a single starting image for a fixed number of generations.
    Simulate {
        /// Black/white starting position.
        #[arg(long)]
        start: PathBuf,

        /// Horizontal tunnel color map (no horizontal portals when omitted).
        #[arg(long)]
        horizontal: Option<PathBuf>,

        /// Vertical tunnel color map (no vertical portals when omitted).
        #[arg(long)]
        vertical: Option<PathBuf>,

        #[arg(long, default_value_t = 1)]
        steps: u64,

        /// Output image.
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Args)]
pub struct Paths {
    /// Folder holding the case folders.
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Output folder.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Only case folders whose names start with this prefix.
    #[arg(long)]
    pub prefix: Option<String>,

    /// Comma-separated generation counts, e.g. 1,10,100,1000.
    #[arg(long, value_delimiter = ',')]
    pub checkpoints: Option<Vec<u64>>,
}

impl Paths {
    /// Applies `run` flags on top of `settings`.
    pub fn apply_run(mut self, mut settings: Settings) -> Settings {
        if let Some(output) = self.output.take() {
            settings.output_dir = output;
        }
        if let Some(prefix) = self.prefix.take() {
            settings.problem_prefix = prefix;
        }
        self.apply_common(settings)
    }

    /// Applies `verify` flags on top of `settings`.
    pub fn apply_verify(mut self, mut settings: Settings) -> Settings {
        if let Some(output) = self.output.take() {
            settings.verify_output_dir = output;
        }
        if let Some(prefix) = self.prefix.take() {
            settings.example_prefix = prefix;
        }
        self.apply_common(settings)
    }

    fn apply_common(self, mut settings: Settings) -> Settings {
        if let Some(data) = self.data {
            settings.data_dir = data;
        }
        if let Some(checkpoints) = self.checkpoints {
            settings.checkpoints = checkpoints;
        }
        settings
    }
}
