//! eframe application: drives the sampling ticks from the UI event loop.
//!
//! There are no background threads. Every frame the app checks its
//! [`Ticker`]; when a tick is due it runs one [`SampleLoop`] step inline, then
//! draws the charts and asks egui to wake it up again when the next tick is due.

use std::time::Instant;

use eframe::egui;

use crate::config::TempPlotConfig;
use crate::hotkeys::{HotkeyName, Hotkeys};
use crate::sample_loop::{SampleLoop, Tick, Ticker};
use crate::surface::EguiSurface;

pub struct TempPlotApp {
    sampler: SampleLoop<EguiSurface>,
    ticker: Ticker,
    hotkeys: Hotkeys,
    quit_requested: bool,
    /// Most recent tick error, shown in the status bar until a tick succeeds.
    last_error: Option<String>,
}

impl TempPlotApp {
    pub fn new(sampler: SampleLoop<EguiSurface>, config: &TempPlotConfig) -> Self {
        Self {
            sampler,
            ticker: Ticker::new(config.update_delay),
            hotkeys: config.hotkeys.clone(),
            quit_requested: false,
            last_error: None,
        }
    }

    pub fn sampler(&self) -> &SampleLoop<EguiSurface> {
        &self.sampler
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn handle_action(&mut self, action: HotkeyName) {
        match action {
            HotkeyName::ToggleView => {
                self.sampler.plot_mut().toggle();
            }
            HotkeyName::Quit => self.quit_requested = true,
        }
    }

    /// Run a tick if one is due at `now`. Returns the tick outcome, if any ran.
    pub fn step(&mut self, now: Instant) -> Option<Tick> {
        if !self.ticker.poll_due(now) {
            return None;
        }
        match self.sampler.tick() {
            Ok(tick) => {
                if matches!(tick, Tick::Accepted(_)) {
                    self.last_error = None;
                }
                Some(tick)
            }
            Err(e) => {
                log::error!("{e}");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }

    fn status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(format!("Source: {}", self.sampler.source().describe()));
            ui.separator();
            ui.label(format!("View: {}", self.sampler.plot().mode()));
            ui.separator();
            ui.label(format!("Samples: {}", self.sampler.store().len()));
            if self.sampler.rejected() > 0 {
                ui.label(format!("(rejected lines: {})", self.sampler.rejected()));
            }
            ui.separator();
            ui.label(format!("Log: {}", self.sampler.logger().path().display()));
            if let Some(err) = &self.last_error {
                ui.separator();
                ui.colored_label(egui::Color32::LIGHT_RED, err.as_str());
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!(
                    "[{}] cycle view  [{}] quit",
                    self.hotkeys.toggle_view, self.hotkeys.quit
                ));
            });
        });
    }
}

impl eframe::App for TempPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for action in self.hotkeys.detect_actions(ctx) {
            self.handle_action(action);
        }

        self.step(Instant::now());

        if self.quit_requested {
            self.sampler.shutdown();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        egui::TopBottomPanel::bottom("tempplot_status").show(ctx, |ui| {
            self.status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.sampler.plot().surface().ui(ui);
        });

        ctx.request_repaint_after(self.ticker.time_until_due(Instant::now()));
    }
}
