use glam::Vec2;

use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::core::math::move_point;
use crate::renderer::traits::Surface;

/// Flakes released per pen call.
pub const SNOW_FAN_OUT: usize = 5;

const START_SPEED: f32 = 1.0;
const ACCELERATION: f32 = 0.2;
const FADE: f32 = 0.01;

/// A confetti flake that speeds up along a fixed heading while fading out.
/// Its triangle is re-jittered on every render.
pub struct Snow {
    pos: Vec2,
    heading: f32,
    speed: f32,
    alpha: f32,
    spread: f32,
    color: Color,
    dead: bool,
}

impl Snow {
    pub fn new(pos: Vec2, heading: f32, ctx: &DrawingContext) -> Self {
        Self {
            pos,
            heading,
            speed: START_SPEED,
            alpha: 1.0,
            spread: ctx.pen_size / 4.0,
            color: ctx.pen_color,
            dead: ctx.escaped(pos),
        }
    }

    /// One pen call's worth of flakes at random headings.
    pub fn burst(pos: Vec2, ctx: &mut DrawingContext) -> Vec<Snow> {
        (0..SNOW_FAN_OUT)
            .map(|_| {
                let heading = ctx.rng.range(0.0, 360.0);
                Snow::new(pos, heading, ctx)
            })
            .collect()
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Effect for Snow {
    fn name(&self) -> &'static str {
        "snow"
    }

    fn advance(&mut self, ctx: &mut DrawingContext, _spawned: &mut Spawned) {
        self.pos = move_point(self.pos, self.speed, self.heading);
        self.speed += ACCELERATION;
        self.alpha -= FADE;
        if self.alpha <= 0.0 || ctx.escaped(self.pos) {
            self.dead = true;
        }
    }

    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) {
        let s = self.spread;
        let mut corner = || self.pos + Vec2::new(ctx.rng.range(-s, s), ctx.rng.range(-s, s));
        let (a, b, c) = (corner(), corner(), corner());
        surface.triangle(a, b, c, ctx.paint(self.color, self.alpha));
    }

    fn kill(&mut self) {
        self.dead = true;
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
