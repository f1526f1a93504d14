//! View-mode state machine and the bridge from series data to chart curves.
//!
//! The [`PlotController`] decides which chart panels are visible and pushes the
//! latest series into every curve of a [`PlotSurface`]. It never draws
//! anything itself; see [`crate::surface::EguiSurface`] for the egui renderer.

use std::fmt;

use crate::store::SeriesSnapshot;

/// Chart panels, in grid order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    /// Temperatures A and B overlaid.
    Combined,
    TempA,
    TempB,
    Duty,
}

impl Panel {
    pub const ALL: [Panel; 4] = [Panel::Combined, Panel::TempA, Panel::TempB, Panel::Duty];

    pub fn title(self) -> &'static str {
        match self {
            Panel::Combined => "Temperature A and B",
            Panel::TempA => "Temperature A",
            Panel::TempB => "Temperature B",
            Panel::Duty => "Duty",
        }
    }

    pub fn y_label(self) -> &'static str {
        match self {
            Panel::Duty => "Duty cycle (%)",
            _ => "Temperature (°C)",
        }
    }

    /// Curves drawn inside this panel.
    pub fn curves(self) -> &'static [Curve] {
        match self {
            Panel::Combined => &[Curve::CombinedA, Curve::CombinedB],
            Panel::TempA => &[Curve::TempA],
            Panel::TempB => &[Curve::TempB],
            Panel::Duty => &[Curve::Duty],
        }
    }
}

/// Individual data curves. Temperatures appear twice: once in the combined
/// panel and once in their own panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Curve {
    CombinedA,
    CombinedB,
    TempA,
    TempB,
    Duty,
}

impl Curve {
    pub const ALL: [Curve; 5] = [
        Curve::CombinedA,
        Curve::CombinedB,
        Curve::TempA,
        Curve::TempB,
        Curve::Duty,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Curve::CombinedA | Curve::TempA => "Temperature A",
            Curve::CombinedB | Curve::TempB => "Temperature B",
            Curve::Duty => "Duty",
        }
    }

    /// The series this curve displays.
    fn values<'a>(self, snapshot: &SeriesSnapshot<'a>) -> &'a [f64] {
        match self {
            Curve::CombinedA | Curve::TempA => snapshot.temp_a,
            Curve::CombinedB | Curve::TempB => snapshot.temp_b,
            Curve::Duty => snapshot.duty,
        }
    }
}

/// Which subset of panels is visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ViewMode {
    /// Combined temperatures plus duty.
    #[default]
    Combined,
    /// Both individual temperature panels.
    IndividualCombined,
    OnlyA,
    OnlyB,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Combined,
        ViewMode::IndividualCombined,
        ViewMode::OnlyA,
        ViewMode::OnlyB,
    ];

    /// Transition taken on a toggle.
    pub fn next(self) -> ViewMode {
        match self {
            ViewMode::Combined => ViewMode::IndividualCombined,
            ViewMode::IndividualCombined => ViewMode::OnlyA,
            ViewMode::OnlyA => ViewMode::OnlyB,
            ViewMode::OnlyB => ViewMode::Combined,
        }
    }

    pub fn is_visible(self, panel: Panel) -> bool {
        matches!(
            (self, panel),
            (ViewMode::Combined, Panel::Combined)
                | (ViewMode::Combined, Panel::Duty)
                | (ViewMode::IndividualCombined, Panel::TempA)
                | (ViewMode::IndividualCombined, Panel::TempB)
                | (ViewMode::OnlyA, Panel::TempA)
                | (ViewMode::OnlyB, Panel::TempB)
        )
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ViewMode::Combined => "Combined",
            ViewMode::IndividualCombined => "Individual",
            ViewMode::OnlyA => "Only A",
            ViewMode::OnlyB => "Only B",
        };
        write!(f, "{}", s)
    }
}

/// Rendering backend seen by the controller.
pub trait PlotSurface {
    fn set_panel_visible(&mut self, panel: Panel, visible: bool);
    /// Replace the data of `curve`. `xs` and `ys` have equal length.
    fn set_curve_data(&mut self, curve: Curve, xs: &[f64], ys: &[f64]);
}

pub struct PlotController<S: PlotSurface> {
    mode: ViewMode,
    surface: S,
}

impl<S: PlotSurface> PlotController<S> {
    /// Wrap `surface` and apply the initial [`ViewMode::Combined`] layout.
    pub fn new(surface: S) -> Self {
        let mut ctrl = Self {
            mode: ViewMode::default(),
            surface,
        };
        ctrl.apply_mode();
        ctrl
    }

    pub fn mode(&self) -> ViewMode {
        self.mode
    }

    /// Advance to the next view mode and update panel visibility.
    pub fn toggle(&mut self) -> ViewMode {
        self.mode = self.mode.next();
        log::debug!("view mode: {}", self.mode);
        self.apply_mode();
        self.mode
    }

    /// Push the latest series into every curve, visible or not.
    pub fn refresh(&mut self, snapshot: &SeriesSnapshot<'_>) {
        for curve in Curve::ALL {
            self.surface
                .set_curve_data(curve, &snapshot.elapsed, curve.values(snapshot));
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn apply_mode(&mut self) {
        for panel in Panel::ALL {
            self.surface.set_panel_visible(panel, self.mode.is_visible(panel));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_has_period_four() {
        for mode in ViewMode::ALL {
            let mut m = mode;
            for _ in 0..4 {
                m = m.next();
            }
            assert_eq!(m, mode);
            assert_ne!(mode.next(), mode);
        }
    }

    #[test]
    fn every_mode_shows_something() {
        for mode in ViewMode::ALL {
            assert!(Panel::ALL.iter().any(|p| mode.is_visible(*p)), "{mode}");
        }
    }

    #[test]
    fn each_curve_belongs_to_one_panel() {
        for curve in Curve::ALL {
            let owners = Panel::ALL
                .iter()
                .filter(|p| p.curves().contains(&curve))
                .count();
            assert_eq!(owners, 1, "{curve:?}");
        }
    }
}
