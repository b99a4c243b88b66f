//! Light/dark theme flag and the colour palettes it selects

use serde::{Deserialize, Serialize};

use crate::store::actions::Action;

/// Named colours used by the views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: &'static str,
    pub card: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub primary: &'static str,
    pub border: &'static str,
    pub input_bg: &'static str,
    pub danger_bg: &'static str,
    pub surface: &'static str,
    pub placeholder: &'static str,
}

pub const DARK: Palette = Palette {
    background: "rgba(15,23,36,0.95)",
    card: "rgba(17,24,39,0.88)",
    text: "#d6e1ea",
    muted: "#8f9aa6",
    primary: "rgba(247,115,22,0.85)",
    border: "rgba(31,41,55,0.6)",
    input_bg: "rgba(11,18,32,0.72)",
    danger_bg: "rgba(59,15,15,0.48)",
    surface: "rgba(11,18,32,0.72)",
    placeholder: "#6f7d8a",
};

pub const LIGHT: Palette = Palette {
    background: "#f8f8f8",
    card: "#ffffff",
    text: "#111827",
    muted: "#666666",
    primary: "#944545",
    border: "#e6e6e6",
    input_bg: "#ffffff",
    danger_bg: "#ffecec",
    surface: "#ffffff",
    placeholder: "#aaa",
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeState {
    pub dark_mode: bool,
}

impl ThemeState {
    pub fn palette(&self) -> &'static Palette {
        if self.dark_mode {
            &DARK
        } else {
            &LIGHT
        }
    }

    pub fn name(&self) -> &'static str {
        if self.dark_mode {
            "dark"
        } else {
            "light"
        }
    }
}

pub fn reduce(state: ThemeState, action: &Action) -> ThemeState {
    match action {
        Action::ToggleTheme => ThemeState {
            dark_mode: !state.dark_mode,
        },
        Action::SetDark(dark_mode) => ThemeState {
            dark_mode: *dark_mode,
        },
        _ => state,
    }
}
