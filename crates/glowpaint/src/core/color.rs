//! Pen colors and their resolved, renderable form.

use serde::{Deserialize, Serialize};

/// Channel multiplier applied to every paint while dark mode is on.
pub const DARK_FACTOR: f32 = 0.35;

/// An RGB pen color. Channels are nominally 0–255 but are not clamped until
/// they are resolved into a [`Paint`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color::new(255.0, 255.0, 255.0);
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// HSV to RGB. `hue` in degrees (wrapped), `saturation` and `value` in [0, 1].
    pub fn from_hsv(hue: f32, saturation: f32, value: f32) -> Self {
        let h = hue.rem_euclid(360.0) / 60.0;
        let s = saturation.clamp(0.0, 1.0);
        let v = value.clamp(0.0, 1.0);
        let c = v * s;
        let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
        let m = v - c;
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        Self::new((r + m) * 255.0, (g + m) * 255.0, (b + m) * 255.0)
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(
            channel(0)? as f32,
            channel(2)? as f32,
            channel(4)? as f32,
        ))
    }

    /// `#rrggbb`, channels rounded and clamped.
    pub fn to_hex(&self) -> String {
        let c = |v: f32| v.round().clamp(0.0, 255.0) as u8;
        format!("#{:02x}{:02x}{:02x}", c(self.r), c(self.g), c(self.b))
    }

    /// Resolve into a paint, optionally darkened.
    pub fn paint(&self, alpha: f32, dark: bool) -> Paint {
        let k = if dark { DARK_FACTOR } else { 1.0 };
        let channel = |c: f32| (c * k).round().clamp(0.0, 255.0) as u8;
        let alpha = if alpha.is_finite() { alpha.clamp(0.0, 1.0) } else { 0.0 };
        Paint {
            r: channel(self.r),
            g: channel(self.g),
            b: channel(self.b),
            a: alpha,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(255.0, 60.0, 90.0)
    }
}

/// A clamped color plus opacity, ready for a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Paint {
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a: a.clamp(0.0, 1.0), ..self }
    }

    /// CSS `rgba()` form, as a browser canvas would take it.
    pub fn css(&self) -> String {
        format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
    }
}
