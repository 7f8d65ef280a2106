use glam::Vec2;

use crate::core::color::{Color, Paint};
use crate::core::math::out_of_bounds;
use crate::core::rng::Rng;
use crate::renderer::traits::{composite_for_dark_mode, CompositeMode};
use crate::systems::symmetry::Symmetry;

/// Static configuration for a studio, fixed at construction.
#[derive(Debug, Clone)]
pub struct StudioConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// How far outside the canvas an effect may wander before it dies.
    pub margin: f32,
    /// Duration of one simulation frame in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Most simulation frames run for a single display refresh (default: 4).
    pub max_steps_per_frame: u32,
    /// Traced samples consumed per frame (default: 8).
    pub trace_points_per_frame: usize,
    /// Seed for the shared random stream.
    pub seed: u64,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            margin: 100.0,
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 4,
            trace_points_per_frame: 8,
            seed: 42,
        }
    }
}

/// Global toggles that change what the render loop does each frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmbientModes {
    pub rainbow: bool,
    pub fade: bool,
    pub auto: bool,
    pub dark: bool,
    pub show_cursor: bool,
}

/// Shared drawing state read by every pen and effect.
///
/// Passed explicitly instead of living in a global, so several studios can
/// run side by side (live previews) and tests can build one directly.
#[derive(Debug, Clone)]
pub struct DrawingContext {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
    pub pen_size: f32,
    pub pen_color: Color,
    /// Frames rendered so far.
    pub tick: u64,
    pub modes: AmbientModes,
    pub rainbow_saturation: f32,
    pub rainbow_brightness: f32,
    pub symmetry: Symmetry,
    pub rng: Rng,
}

impl DrawingContext {
    pub const DEFAULT_PEN_SIZE: f32 = 20.0;

    pub fn new(width: f32, height: f32, margin: f32, seed: u64) -> Self {
        Self {
            width,
            height,
            margin,
            pen_size: Self::DEFAULT_PEN_SIZE,
            pen_color: Color::default(),
            tick: 0,
            modes: AmbientModes::default(),
            rainbow_saturation: 1.0,
            rainbow_brightness: 1.0,
            symmetry: Symmetry::default(),
            rng: Rng::new(seed),
        }
    }

    pub fn from_config(config: &StudioConfig) -> Self {
        Self::new(config.width as f32, config.height as f32, config.margin, config.seed)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Composite mode every draw should run under right now.
    pub fn composite(&self) -> CompositeMode {
        composite_for_dark_mode(self.modes.dark)
    }

    /// Resolve `color` at `alpha` under the current dark-mode setting.
    pub fn paint(&self, color: Color, alpha: f32) -> Paint {
        color.paint(alpha, self.modes.dark)
    }

    /// True once `p` has left the canvas by more than the margin. A
    /// non-finite position counts as escaped so it can never linger.
    pub fn escaped(&self, p: Vec2) -> bool {
        !p.is_finite() || out_of_bounds(p, self.width, self.height, self.margin)
    }

    /// Rainbow pen color for the current tick: the hue steps 6° per frame
    /// and wraps every 60 frames.
    pub fn rainbow_color(&self) -> Color {
        let hue = (self.tick % 60) as f32 * 6.0;
        Color::from_hsv(hue, self.rainbow_saturation, self.rainbow_brightness)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_never_escapes() {
        for (w, h) in [(1.0, 1.0), (800.0, 600.0), (3.0, 5000.0)] {
            let ctx = DrawingContext::new(w, h, 0.0, 1);
            assert!(!ctx.escaped(ctx.center()));
        }
    }

    #[test]
    fn nan_counts_as_escaped() {
        let ctx = DrawingContext::new(100.0, 100.0, 10.0, 1);
        assert!(ctx.escaped(Vec2::new(f32::NAN, 50.0)));
        assert!(ctx.escaped(Vec2::new(50.0, 111.0)));
        assert!(!ctx.escaped(Vec2::new(-10.0, 110.0)));
    }

    #[test]
    fn rainbow_wraps_every_sixty_ticks() {
        let mut ctx = DrawingContext::new(10.0, 10.0, 0.0, 1);
        ctx.tick = 5;
        let a = ctx.rainbow_color();
        ctx.tick = 65;
        assert_eq!(a, ctx.rainbow_color());
        ctx.tick = 0;
        assert_eq!(ctx.rainbow_color(), Color::new(255.0, 0.0, 0.0));
    }

    #[test]
    fn dark_mode_switches_composite() {
        let mut ctx = DrawingContext::new(10.0, 10.0, 0.0, 1);
        assert_eq!(ctx.composite(), CompositeMode::Additive);
        ctx.modes.dark = true;
        assert_eq!(ctx.composite(), CompositeMode::Replace);
    }
}
