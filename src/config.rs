//! Runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::hotkeys::Hotkeys;
use crate::sample_loop::DEFAULT_UPDATE_DELAY;

/// Port name that selects the synthetic source instead of a serial device.
pub const SIMULATED_PORT: &str = "sim";

/// Default directory for session logs.
pub const DEFAULT_LOG_DIR: &str = "./temp_logs/";

/// Which data source to open at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSpec {
    Serial { port: String, baud: u32 },
    /// Synthetic data; `seed: None` seeds from entropy.
    Synthetic { seed: Option<u64> },
}

impl SourceSpec {
    /// `"sim"` selects the synthetic source; anything else is a serial port.
    pub fn from_port(port: &str, baud: u32, seed: Option<u64>) -> Self {
        if port == SIMULATED_PORT {
            SourceSpec::Synthetic { seed }
        } else {
            SourceSpec::Serial {
                port: port.to_string(),
                baud,
            }
        }
    }
}

/// Top-level configuration.
///
/// | Field             | Purpose |
/// |-------------------|---------|
/// | `source`          | Serial port or synthetic generator |
/// | `update_delay`    | Period between sampling ticks |
/// | `output_log_path` | Directory receiving the session CSV |
/// | `hotkeys`         | Key bindings |
#[derive(Clone, Debug)]
pub struct TempPlotConfig {
    pub source: SourceSpec,
    pub update_delay: Duration,
    pub output_log_path: PathBuf,

    /// Native window title.
    pub title: String,
    /// Start fullscreen.
    pub fullscreen: bool,
    pub hotkeys: Hotkeys,
}

impl Default for TempPlotConfig {
    fn default() -> Self {
        Self {
            source: SourceSpec::Synthetic { seed: None },
            update_delay: DEFAULT_UPDATE_DELAY,
            output_log_path: PathBuf::from(DEFAULT_LOG_DIR),
            title: "Serial temperature plotter".to_string(),
            fullscreen: true,
            hotkeys: Hotkeys::default(),
        }
    }
}
