//! egui/egui_plot implementation of [`PlotSurface`].
//!
//! Panels are laid out like a 2x2 grid: the left column holds the combined
//! temperature chart above the duty chart, the right column holds the two
//! individual temperature charts. Hidden panels are skipped and the remaining
//! ones share the space.

use std::collections::HashMap;

use egui::Color32;
use egui_plot::{Legend, Line, Plot};

use crate::plot::{Curve, Panel, PlotSurface};

const COLUMNS: [[Panel; 2]; 2] = [[Panel::Combined, Panel::Duty], [Panel::TempA, Panel::TempB]];

pub fn curve_color(curve: Curve) -> Color32 {
    match curve {
        Curve::CombinedA | Curve::TempA => Color32::from_rgb(0, 200, 220),
        Curve::CombinedB | Curve::TempB => Color32::from_rgb(60, 200, 60),
        Curve::Duty => Color32::from_rgb(220, 50, 50),
    }
}

#[derive(Default)]
pub struct EguiSurface {
    visible: HashMap<Panel, bool>,
    curves: HashMap<Curve, Vec<[f64; 2]>>,
}

impl EguiSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self, panel: Panel) -> bool {
        self.visible.get(&panel).copied().unwrap_or(false)
    }

    pub fn points(&self, curve: Curve) -> &[[f64; 2]] {
        self.curves.get(&curve).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Draw all visible panels into `ui`.
    pub fn ui(&self, ui: &mut egui::Ui) {
        let columns: Vec<Vec<Panel>> = COLUMNS
            .iter()
            .map(|col| col.iter().copied().filter(|p| self.is_visible(*p)).collect::<Vec<_>>())
            .filter(|col| !col.is_empty())
            .collect();
        if columns.is_empty() {
            return;
        }

        ui.columns(columns.len(), |uis| {
            for (col_ui, panels) in uis.iter_mut().zip(&columns) {
                let spacing = col_ui.spacing().item_spacing.y;
                let n = panels.len() as f32;
                let height = ((col_ui.available_height() - spacing * (n - 1.0)) / n).max(0.0);
                let width = col_ui.available_width();
                for panel in panels {
                    col_ui.allocate_ui(egui::vec2(width, height), |panel_ui| {
                        self.panel_ui(panel_ui, *panel);
                    });
                }
            }
        });
    }

    fn panel_ui(&self, ui: &mut egui::Ui, panel: Panel) {
        ui.strong(panel.title());
        let mut plot = Plot::new(("tempplot_panel", panel))
            .height(ui.available_height())
            .x_axis_label("Elapsed time (s)")
            .y_axis_label(panel.y_label())
            .show_grid(true);
        if panel.curves().len() > 1 {
            plot = plot.legend(Legend::default());
        }
        plot.show(ui, |plot_ui| {
            for curve in panel.curves() {
                let line = Line::new(curve.name(), self.points(*curve).to_vec())
                    .color(curve_color(*curve));
                plot_ui.line(line);
            }
        });
    }
}

impl PlotSurface for EguiSurface {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool) {
        self.visible.insert(panel, visible);
    }

    fn set_curve_data(&mut self, curve: Curve, xs: &[f64], ys: &[f64]) {
        let points = self.curves.entry(curve).or_default();
        points.clear();
        points.extend(xs.iter().zip(ys).map(|(x, y)| [*x, *y]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{PlotController, ViewMode};
    use crate::protocol::Sample;
    use crate::store::SeriesStore;
    use chrono::{Local, TimeDelta};

    #[test]
    fn controller_drives_egui_surface() {
        let mut ctrl = PlotController::new(EguiSurface::new());
        assert!(ctrl.surface().is_visible(Panel::Combined));
        assert!(ctrl.surface().is_visible(Panel::Duty));
        assert!(!ctrl.surface().is_visible(Panel::TempA));

        let t0 = Local::now();
        let mut store = SeriesStore::new();
        store.append(&Sample::new(20.0, 21.0, 50.0, t0));
        store.append(&Sample::new(20.5, 21.5, 55.0, t0 + TimeDelta::milliseconds(500)));
        ctrl.refresh(&store.snapshot());

        assert_eq!(ctrl.surface().points(Curve::TempA), &[[0.0, 20.0], [0.5, 20.5]]);
        assert_eq!(ctrl.surface().points(Curve::CombinedB), &[[0.0, 21.0], [0.5, 21.5]]);
        assert_eq!(ctrl.surface().points(Curve::Duty), &[[0.0, 50.0], [0.5, 55.0]]);

        assert_eq!(ctrl.toggle(), ViewMode::IndividualCombined);
        assert!(ctrl.surface().is_visible(Panel::TempA));
        assert!(ctrl.surface().is_visible(Panel::TempB));
        assert!(!ctrl.surface().is_visible(Panel::Combined));
    }
}
