use glam::Vec2;

use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::core::math::move_point;
use crate::renderer::traits::Surface;

const GRAVITY: Vec2 = Vec2::new(0.0, 0.25);
const DRAG: f32 = 0.987;
const BOUNCE_DAMPING: f32 = 0.6;
const DECAY: f32 = 0.004;
const BOUNCED_DECAY: f32 = 0.02;
const MAX_AGE: u32 = 180;
const START_ALPHA: f32 = 0.8;

/// Falling drop under constant acceleration and drag. Bouncing is off unless
/// enabled with [`RainDrop::with_max_bounces`].
pub struct RainDrop {
    origin: Vec2,
    pos: Vec2,
    vel: Vec2,
    bounce_distance: f32,
    bounces: u32,
    max_bounces: u32,
    alpha: f32,
    age: u32,
    size: f32,
    color: Color,
    dead: bool,
}

impl RainDrop {
    pub fn new(pos: Vec2, ctx: &mut DrawingContext) -> Self {
        let heading = ctx.rng.range(0.0, 360.0);
        let vel = move_point(Vec2::ZERO, ctx.pen_size / 10.0, heading);
        Self {
            origin: pos,
            pos,
            vel,
            bounce_distance: 3.0 * ctx.pen_size,
            bounces: 0,
            max_bounces: 0,
            alpha: START_ALPHA,
            age: 0,
            size: ctx.pen_size,
            color: ctx.pen_color,
            dead: ctx.escaped(pos),
        }
    }

    pub fn with_max_bounces(mut self, max_bounces: u32) -> Self {
        self.max_bounces = max_bounces;
        self
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn bounces(&self) -> u32 {
        self.bounces
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl Effect for RainDrop {
    fn name(&self) -> &'static str {
        "rain"
    }

    fn advance(&mut self, ctx: &mut DrawingContext, _spawned: &mut Spawned) {
        self.age += 1;
        self.vel = (self.vel + GRAVITY) * DRAG;
        self.pos += self.vel;

        let falling = self.vel.y > 0.0;
        let far = self.pos.distance(self.origin) > self.bounce_distance;
        if self.bounces < self.max_bounces && falling && far {
            self.vel.y = -self.vel.y * BOUNCE_DAMPING;
            self.bounces += 1;
        }

        self.alpha -= if self.bounces > 0 { BOUNCED_DECAY } else { DECAY };
        if self.age >= MAX_AGE || self.alpha <= 0.0 || ctx.escaped(self.pos) {
            self.dead = true;
        }
    }

    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) {
        let paint = ctx.paint(self.color, self.alpha);
        surface.line(self.pos - self.vel * 2.0, self.pos, paint, (self.size / 10.0).max(1.0));
        surface.radial_blob(self.pos, (self.size / 5.0).max(1.0), paint, 0.0, 1.0);
    }

    fn kill(&mut self) {
        self.dead = true;
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
