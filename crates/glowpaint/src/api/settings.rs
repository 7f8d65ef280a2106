use serde::{Deserialize, Serialize};

use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::error::StudioResult;
use crate::systems::pens::PenKind;
use crate::systems::symmetry::Symmetry;

/// Persisted user settings. Loaded at startup and written back on every
/// change by the host; missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pen: PenKind,
    pub pen_size: f32,
    /// Pen color as `#rrggbb`.
    pub color: String,
    pub rainbow: bool,
    pub fade: bool,
    pub auto: bool,
    pub dark: bool,
    pub rainbow_saturation: f32,
    pub rainbow_brightness: f32,
    pub show_cursor: bool,
    pub symmetry: Symmetry,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pen: PenKind::default(),
            pen_size: DrawingContext::DEFAULT_PEN_SIZE,
            color: Color::default().to_hex(),
            rainbow: false,
            fade: false,
            auto: false,
            dark: false,
            rainbow_saturation: 1.0,
            rainbow_brightness: 1.0,
            show_cursor: true,
            symmetry: Symmetry::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> StudioResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> StudioResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// The stored color, if it parses.
    pub fn pen_color(&self) -> Option<Color> {
        Color::from_hex(&self.color)
    }
}
