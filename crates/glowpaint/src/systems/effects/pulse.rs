//! The "vein": a wandering line with a heartbeat glow at its head.

use glam::Vec2;

use super::trail::Trail;
use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::core::math::move_point;
use crate::renderer::traits::Surface;

const WOBBLE: f32 = 25.0;
const WOBBLE_RATE: f32 = 0.15;
const PULSE_RATE: f32 = 0.2;
const ALPHA_KEEP: f32 = 0.985;
const LIFE: u32 = 150;
const HISTORY: usize = 12;
const SATELLITE_PHASE: f32 = 0.92;
const VISIBLE: f32 = 0.01;

pub struct Vein {
    pos: Vec2,
    base_heading: f32,
    speed: f32,
    age: u32,
    life: u32,
    alpha: f32,
    size: f32,
    color: Color,
    trail: Trail,
    dead: bool,
}

impl Vein {
    pub fn new(pos: Vec2, ctx: &mut DrawingContext) -> Self {
        let mut trail = Trail::new(HISTORY);
        trail.push(pos);
        Self {
            pos,
            base_heading: ctx.rng.range(0.0, 360.0),
            speed: (ctx.pen_size / 12.0).max(0.5),
            age: 0,
            life: LIFE,
            alpha: 1.0,
            size: ctx.pen_size,
            color: ctx.pen_color,
            trail,
            dead: ctx.escaped(pos),
        }
    }

    /// Heartbeat oscillator in [-1, 1].
    pub fn phase(&self) -> f32 {
        (self.age as f32 * PULSE_RATE).sin()
    }

    fn heading(&self) -> f32 {
        self.base_heading + WOBBLE * (self.age as f32 * WOBBLE_RATE).sin()
    }

    fn glow_alpha(&self) -> f32 {
        self.alpha * (0.35 + 0.25 * self.phase())
    }

    fn glow_radius(&self) -> f32 {
        self.size * (0.3 + 0.2 * self.phase())
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl Effect for Vein {
    fn name(&self) -> &'static str {
        "vein"
    }

    fn advance(&mut self, ctx: &mut DrawingContext, _spawned: &mut Spawned) {
        self.age += 1;
        self.life = self.life.saturating_sub(1);
        self.pos = move_point(self.pos, self.speed, self.heading());
        self.trail.push(self.pos);
        self.alpha *= ALPHA_KEEP;
        if self.life == 0 || self.glow_alpha() < VISIBLE || ctx.escaped(self.pos) {
            self.dead = true;
        }
    }

    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) {
        let line_width = (self.size / 10.0).max(1.0);
        self.trail.draw_fading(surface, ctx.paint(self.color, self.alpha), line_width);

        let glow = ctx.paint(self.color, self.glow_alpha());
        let radius = self.glow_radius().max(1.0);
        surface.radial_blob(self.pos, radius * 2.0, glow.with_alpha(glow.a * 0.5), 0.3, 1.0);
        surface.radial_blob(self.pos, radius, glow, 0.0, 1.0);

        if self.phase() > SATELLITE_PHASE {
            for _ in 0..2 {
                let offset = Vec2::new(
                    ctx.rng.range(-self.size, self.size),
                    ctx.rng.range(-self.size, self.size),
                );
                surface.radial_blob(self.pos + offset, radius * 0.5, glow, 0.0, 1.0);
            }
        }
    }

    fn kill(&mut self) {
        self.dead = true;
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCall, RecordingSurface};

    #[test]
    fn life_runs_out() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 1000.0, 6);
        let mut vein = Vein::new(ctx.center(), &mut ctx);
        let mut frames = 0;
        while !vein.is_dead() {
            vein.advance(&mut ctx, &mut Vec::new());
            frames += 1;
        }
        assert!(frames <= LIFE);
    }

    #[test]
    fn crawls_at_pen_speed() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 6);
        ctx.pen_size = 24.0;
        let mut vein = Vein::new(ctx.center(), &mut ctx);
        let before = vein.pos();
        vein.advance(&mut ctx, &mut Vec::new());
        assert!((vein.pos().distance(before) - 2.0).abs() < 1e-4);

        ctx.pen_size = 1.0;
        let mut slow = Vein::new(ctx.center(), &mut ctx);
        slow.advance(&mut ctx, &mut Vec::new());
        assert!((slow.pos().distance(ctx.center()) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn satellites_only_near_pulse_peak() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 1000.0, 6);
        let mut vein = Vein::new(ctx.center(), &mut ctx);
        // sin(0.2 * 8) is just under 1, sin(0.2 * 16) is negative
        vein.age = 8;
        let mut surface = RecordingSurface::new(800, 600);
        vein.render(&mut ctx, &mut surface);
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Blob { .. })), 4);

        vein.age = 16;
        surface.reset();
        vein.render(&mut ctx, &mut surface);
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Blob { .. })), 2);
    }
}
