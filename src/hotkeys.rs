//! Keyboard bindings: one key cycles the view mode, one key quits.
//!
//! Bindings are written as `"Space"`, `"Escape"`, `"Ctrl+Q"` and can be loaded
//! from a YAML file:
//!
//! ```yaml
//! toggle_view: "V"
//! quit: "Ctrl+Q"
//! ```

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Modifier {
    None,
    Ctrl,
    Alt,
    Shift,
    CtrlAlt,
    CtrlShift,
    AltShift,
    CtrlAltShift,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Modifier::None => "",
            Modifier::Ctrl => "Ctrl",
            Modifier::Alt => "Alt",
            Modifier::Shift => "Shift",
            Modifier::CtrlAlt => "Ctrl+Alt",
            Modifier::CtrlShift => "Ctrl+Shift",
            Modifier::AltShift => "Alt+Shift",
            Modifier::CtrlAltShift => "Ctrl+Alt+Shift",
        };
        write!(f, "{}", s)
    }
}

impl Modifier {
    fn from_flags(ctrl: bool, alt: bool, shift: bool) -> Modifier {
        match (ctrl, alt, shift) {
            (false, false, false) => Modifier::None,
            (true, false, false) => Modifier::Ctrl,
            (false, true, false) => Modifier::Alt,
            (false, false, true) => Modifier::Shift,
            (true, true, false) => Modifier::CtrlAlt,
            (true, false, true) => Modifier::CtrlShift,
            (false, true, true) => Modifier::AltShift,
            (true, true, true) => Modifier::CtrlAltShift,
        }
    }

    /// Exact match against the currently held modifiers.
    pub fn matches(self, mods: &egui::Modifiers) -> bool {
        self == Modifier::from_flags(mods.ctrl || mods.command, mods.alt, mods.shift)
    }
}

/// A key plus modifiers.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hotkey {
    pub modifier: Modifier,
    pub key: egui::Key,
}

impl Hotkey {
    pub fn new(modifier: Modifier, key: egui::Key) -> Self {
        Self { modifier, key }
    }

    pub fn is_pressed(&self, input: &egui::InputState) -> bool {
        self.modifier.matches(&input.modifiers) && input.key_pressed(self.key)
    }
}

impl fmt::Display for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifier == Modifier::None {
            write!(f, "{}", self.key.name())
        } else {
            write!(f, "{}+{}", self.modifier, self.key.name())
        }
    }
}

impl FromStr for Hotkey {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty hotkey".to_string());
        }
        let parts: Vec<&str> = s.split('+').map(|p| p.trim()).collect();
        let (last, mods) = parts
            .split_last()
            .ok_or_else(|| "invalid hotkey".to_string())?;
        let key = parse_key(last).ok_or_else(|| format!("unknown key '{}'", last))?;

        let (mut ctrl, mut alt, mut shift) = (false, false, false);
        for m in mods {
            let flag = match m.to_lowercase().as_str() {
                "ctrl" | "control" => &mut ctrl,
                "alt" => &mut alt,
                "shift" => &mut shift,
                other => return Err(format!("unknown modifier '{}'", other)),
            };
            if *flag {
                return Err(format!("duplicate modifier '{}'", m));
            }
            *flag = true;
        }
        Ok(Hotkey::new(Modifier::from_flags(ctrl, alt, shift), key))
    }
}

fn parse_key(name: &str) -> Option<egui::Key> {
    egui::Key::from_name(name).or_else(|| {
        // Accept lowercase single letters and common spellings.
        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => egui::Key::from_name(&c.to_ascii_uppercase().to_string()),
            _ => match name.to_lowercase().as_str() {
                "esc" | "escape" => Some(egui::Key::Escape),
                "space" => Some(egui::Key::Space),
                "enter" | "return" => Some(egui::Key::Enter),
                "tab" => Some(egui::Key::Tab),
                _ => None,
            },
        }
    })
}

impl TryFrom<String> for Hotkey {
    type Error = String;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Hotkey> for String {
    fn from(hk: Hotkey) -> String {
        hk.to_string()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HotkeyName {
    ToggleView,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotkeys {
    pub toggle_view: Hotkey,
    pub quit: Hotkey,
}

impl Default for Hotkeys {
    fn default() -> Self {
        Self {
            toggle_view: Hotkey::new(Modifier::None, egui::Key::Space),
            quit: Hotkey::new(Modifier::None, egui::Key::Escape),
        }
    }
}

impl Hotkeys {
    pub fn get(&self, name: HotkeyName) -> &Hotkey {
        match name {
            HotkeyName::ToggleView => &self.toggle_view,
            HotkeyName::Quit => &self.quit,
        }
    }

    pub fn from_yaml(s: &str) -> Result<Hotkeys, String> {
        serde_yaml::from_str(s).map_err(|e| format!("Deserialization error: {}", e))
    }

    pub fn to_yaml(&self) -> Result<String, String> {
        serde_yaml::to_string(self).map_err(|e| format!("Serialization error: {}", e))
    }

    pub fn load_from_path(path: &Path) -> Result<Hotkeys> {
        let err = |reason: String| Error::Hotkeys {
            path: path.to_path_buf(),
            reason,
        };
        let s = fs::read_to_string(path).map_err(|e| err(format!("Failed to read: {}", e)))?;
        Hotkeys::from_yaml(&s).map_err(err)
    }

    /// Actions whose hotkey was pressed this frame, in declaration order.
    pub fn detect_actions(&self, ctx: &egui::Context) -> Vec<HotkeyName> {
        if ctx.wants_keyboard_input() {
            return Vec::new();
        }
        ctx.input(|input| {
            [HotkeyName::ToggleView, HotkeyName::Quit]
                .into_iter()
                .filter(|name| self.get(*name).is_pressed(input))
                .collect()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_space_and_escape() {
        let hk = Hotkeys::default();
        assert_eq!(hk.toggle_view.to_string(), "Space");
        assert_eq!(hk.quit.to_string(), "Escape");
    }

    #[test]
    fn parse_with_modifiers() {
        let hk: Hotkey = "Ctrl+Q".parse().unwrap();
        assert_eq!(hk, Hotkey::new(Modifier::Ctrl, egui::Key::Q));
        assert_eq!(hk.to_string(), "Ctrl+Q");

        let hk: Hotkey = "shift + alt + v".parse().unwrap();
        assert_eq!(hk.modifier, Modifier::AltShift);
        assert_eq!(hk.key, egui::Key::V);

        let hk: Hotkey = "esc".parse().unwrap();
        assert_eq!(hk.key, egui::Key::Escape);
    }

    #[test]
    fn parse_errors() {
        assert!("".parse::<Hotkey>().is_err());
        assert!("Hyper+Q".parse::<Hotkey>().is_err());
        assert!("Ctrl+Ctrl+Q".parse::<Hotkey>().is_err());
        assert!("Ctrl+Nope".parse::<Hotkey>().is_err());
    }

    #[test]
    fn modifiers_match_exactly() {
        let ctrl = egui::Modifiers {
            ctrl: true,
            ..Default::default()
        };
        assert!(Modifier::Ctrl.matches(&ctrl));
        assert!(!Modifier::None.matches(&ctrl));
        assert!(Modifier::None.matches(&egui::Modifiers::default()));
    }

    #[test]
    fn yaml_partial_override_keeps_defaults() {
        let hk = Hotkeys::from_yaml("quit: \"Ctrl+Q\"\n").unwrap();
        assert_eq!(hk.quit, Hotkey::new(Modifier::Ctrl, egui::Key::Q));
        assert_eq!(hk.toggle_view, Hotkeys::default().toggle_view);

        let yaml = hk.to_yaml().unwrap();
        assert_eq!(Hotkeys::from_yaml(&yaml).unwrap(), hk);

        assert!(Hotkeys::from_yaml("quit: \"Ctrl+\"\n").is_err());
    }
}
