//! Top-level entry point: open the source and the log, then enter the eframe
//! event loop.

use chrono::Local;
use eframe::egui;

use crate::app::TempPlotApp;
use crate::config::{SourceSpec, TempPlotConfig};
use crate::error::Result;
use crate::logger::Logger;
use crate::plot::PlotController;
use crate::sample_loop::SampleLoop;
use crate::source::{DataSource, SerialSource, SyntheticSource};
use crate::surface::EguiSurface;

/// Open the configured data source.
pub fn open_source(spec: &SourceSpec) -> Result<DataSource> {
    Ok(match spec {
        SourceSpec::Serial { port, baud } => SerialSource::open(port, *baud)?.into(),
        SourceSpec::Synthetic { seed: Some(seed) } => SyntheticSource::with_seed(*seed).into(),
        SourceSpec::Synthetic { seed: None } => SyntheticSource::new().into(),
    })
}

/// Build the sampling pipeline for `config`.
///
/// The source is opened first so that a port failure aborts before any log
/// file is created.
pub fn build_sampler(config: &TempPlotConfig) -> Result<SampleLoop<EguiSurface>> {
    let source = open_source(&config.source)?;
    let logger = Logger::open(&config.output_log_path, Local::now())?;
    log::info!("saving data to {}", logger.path().display());
    let plot = PlotController::new(EguiSurface::new());
    Ok(SampleLoop::new(source, logger, plot))
}

/// Run the plotter in a native window. Blocks until the window is closed.
pub fn run(config: TempPlotConfig) -> Result<()> {
    let sampler = build_sampler(&config)?;
    let app = TempPlotApp::new(sampler, &config);

    let mut viewport = egui::ViewportBuilder::default()
        .with_title(config.title.clone())
        .with_inner_size(egui::vec2(1400.0, 900.0));
    if config.fullscreen {
        viewport = viewport.with_fullscreen(true);
    }
    let opts = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(&config.title, opts, Box::new(move |_cc| Ok(Box::new(app))))?;
    Ok(())
}
