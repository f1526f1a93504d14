//! tempplot crate root: re-exports and module wiring.
//!
//! Reads temperature/duty-cycle telemetry from a serial device (or a synthetic
//! generator), plots it live with egui/eframe and appends every sample to a
//! CSV log.
//!
//! Modules, leaf first:
//! - `protocol`: wire line parsing/formatting and [`Sample`]
//! - `source`: serial and synthetic data sources
//! - `store`: append-only in-memory series
//! - `logger`: append-only CSV session log
//! - `plot`: view modes and the [`PlotSurface`] bridge; `surface` draws it with egui_plot
//! - `sample_loop`: the fixed-period tick driver
//! - `app` / `run`: the eframe application and its entry point
//! - `config`, `cli`, `hotkeys`, `error`: configuration and plumbing

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod hotkeys;
pub mod logger;
pub mod plot;
pub mod protocol;
pub mod run;
pub mod sample_loop;
pub mod source;
pub mod store;
pub mod surface;

// Public re-exports for a compact external API
pub use app::TempPlotApp;
pub use config::{SourceSpec, TempPlotConfig};
pub use error::{Error, Result};
pub use logger::Logger;
pub use plot::{Curve, Panel, PlotController, PlotSurface, ViewMode};
pub use protocol::{MalformedSample, Sample};
pub use run::{build_sampler, open_source, run};
pub use sample_loop::{SampleLoop, Tick, Ticker};
pub use source::{DataSource, SerialSource, SyntheticSource};
pub use store::{SeriesSnapshot, SeriesStore};
pub use surface::EguiSurface;
