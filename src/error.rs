//! Error types shared by the sampling pipeline and the application shell.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal and I/O errors surfaced by tempplot.
///
/// Per-tick parse failures are not represented here; see
/// [`MalformedSample`](crate::protocol::MalformedSample).
#[derive(Debug, Error)]
pub enum Error {
    /// The serial port could not be opened. Startup must abort before any log file is created.
    #[error("could not open serial port {port}@{baud}: {source}")]
    PortOpen {
        port: String,
        baud: u32,
        #[source]
        source: serialport::Error,
    },

    /// The log output directory could not be created.
    #[error("could not create log directory {path:?}: {source}")]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Creating or appending to the log file failed.
    #[error("log file {path:?}: {source}")]
    Log {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The hotkeys file could not be read or parsed.
    #[error("hotkeys file {path:?}: {reason}")]
    Hotkeys { path: PathBuf, reason: String },

    #[error("GUI error: {0}")]
    Gui(#[from] eframe::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
