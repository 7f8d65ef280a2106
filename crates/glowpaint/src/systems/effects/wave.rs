use glam::Vec2;

use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::core::math::move_point;
use crate::renderer::traits::Surface;

const PERIOD: u64 = 60;
const AMPLITUDE: f32 = 30.0;
const START_ALPHA: f32 = 0.6;
const FADE: f32 = 0.008;
const MAX_AGE: u32 = 120;
const BRISTLES: usize = 4;
const BRISTLE_SPACING: f32 = 15.0;
const BRISTLE_JITTER: f32 = 5.0;

/// Brush stroke whose heading swings sinusoidally with the global tick.
pub struct Wave {
    pos: Vec2,
    prev: Vec2,
    heading: f32,
    phase_offset: f32,
    speed: f32,
    alpha: f32,
    age: u32,
    size: f32,
    color: Color,
    dead: bool,
}

impl Wave {
    pub fn new(pos: Vec2, ctx: &mut DrawingContext) -> Self {
        let phase_offset = ctx.rng.range(0.0, 360.0);
        Self {
            pos,
            prev: pos,
            heading: phase_offset,
            phase_offset,
            speed: (ctx.pen_size / 8.0).max(1.0),
            alpha: START_ALPHA,
            age: 0,
            size: ctx.pen_size,
            color: ctx.pen_color,
            dead: ctx.escaped(pos),
        }
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    fn heading_at(&self, tick: u64) -> f32 {
        let t = (tick % PERIOD) as f32 / PERIOD as f32;
        (std::f32::consts::TAU * t).sin() * AMPLITUDE + self.phase_offset
    }
}

impl Effect for Wave {
    fn name(&self) -> &'static str {
        "wave"
    }

    fn advance(&mut self, ctx: &mut DrawingContext, _spawned: &mut Spawned) {
        self.heading = self.heading_at(ctx.tick);
        self.prev = self.pos;
        self.pos = move_point(self.pos, self.speed, self.heading);
        self.alpha -= FADE;
        self.age += 1;
        if self.alpha <= 0.0 || self.age > MAX_AGE || ctx.escaped(self.pos) {
            self.dead = true;
        }
    }

    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) {
        let paint = ctx.paint(self.color, self.alpha);
        surface.line(self.prev, self.pos, paint, 1.5);

        let back = self.heading + 180.0;
        let centre = (BRISTLES as f32 - 1.0) / 2.0;
        let bristle = paint.with_alpha(self.alpha * 0.5);
        for k in 0..BRISTLES {
            let jitter = ctx.rng.range(-BRISTLE_JITTER, BRISTLE_JITTER);
            let angle = back + (k as f32 - centre) * BRISTLE_SPACING + jitter;
            let tip = move_point(self.pos, self.size / 2.0, angle);
            surface.line(self.pos, tip, bristle, 1.0);
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
    fn heading_oscillates_around_spawn_phase() {
        let mut ctx = DrawingContext::new(10_000.0, 10_000.0, 0.0, 4);
        let mut wave = Wave::new(Vec2::splat(5000.0), &mut ctx);
        let base = wave.phase_offset;
        let mut spawned = Vec::new();
        for tick in 0..PERIOD {
            ctx.tick = tick;
            wave.advance(&mut ctx, &mut spawned);
            assert!((wave.heading() - base).abs() <= AMPLITUDE + 1e-3);
        }
        ctx.tick = PERIOD / 4;
        assert!((wave.heading_at(ctx.tick) - (base + AMPLITUDE)).abs() < 1e-3);
    }

    #[test]
    fn age_cap_ends_the_stroke() {
        let mut ctx = DrawingContext::new(10_000.0, 10_000.0, 0.0, 4);
        let mut wave = Wave::new(Vec2::splat(5000.0), &mut ctx);
        let mut spawned = Vec::new();
        let mut frames = 0;
        while !wave.is_dead() {
            ctx.tick += 1;
            wave.advance(&mut ctx, &mut spawned);
            frames += 1;
        }
        // alpha runs out (75 frames) before the age cap
        assert!(frames <= MAX_AGE + 1);
    }

    #[test]
    fn draws_tail_and_bristles() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 4);
        let mut wave = Wave::new(Vec2::new(400.0, 300.0), &mut ctx);
        let mut surface = RecordingSurface::new(800, 600);
        wave.render(&mut ctx, &mut surface);
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Line { .. })), 1 + BRISTLES);
    }
}
