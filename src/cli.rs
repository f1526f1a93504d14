//! Command-line interface.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{SourceSpec, TempPlotConfig, DEFAULT_LOG_DIR};
use crate::error::Result;
use crate::hotkeys::Hotkeys;

#[derive(Parser, Debug)]
#[command(
    name = "tempplot",
    version,
    about = "Live plotter and CSV logger for serial temperature sensors"
)]
pub struct Cli {
    /// Serial port to plot, or `sim` for synthetic data
    pub port: String,

    /// Serial port baud rate
    pub baud: u32,

    /// Time between plot updates, in milliseconds
    #[arg(
        short = 'u',
        long,
        value_name = "delay_ms",
        default_value_t = 100,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub update_delay: u64,

    /// Output directory for session logs
    #[arg(short = 'o', long, value_name = "path/to/out", default_value = DEFAULT_LOG_DIR)]
    pub output_log_path: PathBuf,

    /// YAML file overriding the default key bindings
    #[arg(long, value_name = "file")]
    pub hotkeys: Option<PathBuf>,

    /// Open a normal window instead of going fullscreen
    #[arg(long)]
    pub windowed: bool,

    /// Seed for the synthetic source (`sim` only)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    /// Build the runtime configuration, reading the hotkeys file if given.
    pub fn into_config(self) -> Result<TempPlotConfig> {
        let hotkeys = match &self.hotkeys {
            Some(path) => Hotkeys::load_from_path(path)?,
            None => Hotkeys::default(),
        };
        Ok(TempPlotConfig {
            source: SourceSpec::from_port(&self.port, self.baud, self.seed),
            update_delay: Duration::from_millis(self.update_delay),
            output_log_path: self.output_log_path,
            fullscreen: !self.windowed,
            hotkeys,
            ..TempPlotConfig::default()
        })
    }
}
