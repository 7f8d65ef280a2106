//! Drawing surface contract.
//!
//! Pens and effects only ever talk to a `Surface`. The CPU raster in
//! `raster.rs` backs the real canvas; `recording.rs` captures calls for tests.

use glam::Vec2;

use crate::core::color::Paint;

/// How a draw call combines with what is already on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Saturating add ("lighter"): overlapping strokes brighten.
    Additive,
    /// Source-over: strokes cover what is beneath them.
    Replace,
}

impl CompositeMode {
    /// Canvas 2D `globalCompositeOperation` name.
    pub fn css_name(&self) -> &'static str {
        match self {
            Self::Additive => "lighter",
            Self::Replace => "source-over",
        }
    }
}

/// The ambient composite policy. Dark mode swaps additive blending for
/// source-over so dark strokes pull the canvas toward black.
pub fn composite_for_dark_mode(dark: bool) -> CompositeMode {
    if dark {
        CompositeMode::Replace
    } else {
        CompositeMode::Additive
    }
}

/// Primitive raster operations against an owned 2D canvas.
///
/// Geometry arrives already computed in pixel space. Implementations must
/// ignore non-finite coordinates rather than panic.
pub trait Surface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn composite(&self) -> CompositeMode;

    fn set_composite(&mut self, mode: CompositeMode);

    /// Paint the whole surface opaque black, then switch to `mode`.
    fn clear(&mut self, mode: CompositeMode);

    /// Reset every pixel to fully transparent (HUD layer).
    fn clear_transparent(&mut self);

    fn fill_rect(&mut self, min: Vec2, max: Vec2, paint: Paint);

    /// Filled circle with a two-stop radial gradient: `0.7 * paint.a` up to
    /// `inner_stop`, fading to transparent at `outer_stop`. Stops are
    /// fractions of `radius`.
    fn radial_blob(
        &mut self,
        center: Vec2,
        radius: f32,
        paint: Paint,
        inner_stop: f32,
        outer_stop: f32,
    );

    fn line(&mut self, from: Vec2, to: Vec2, paint: Paint, width: f32);

    /// Connected segments through `points`. Fewer than two points draw nothing.
    fn polyline(&mut self, points: &[Vec2], paint: Paint, width: f32) {
        if points.len() < 2 {
            return;
        }
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], paint, width);
        }
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, paint: Paint);

    fn pixel_dot(&mut self, p: Vec2, paint: Paint);

    /// Replace every RGB channel with `255 - value`, leaving alpha untouched.
    fn invert_colors(&mut self);
}
