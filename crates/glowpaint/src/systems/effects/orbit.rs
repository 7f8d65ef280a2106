use glam::Vec2;

use super::trail::Trail;
use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::core::math::{polar_to_cartesian, to_radians};
use crate::renderer::traits::Surface;

const START_ALPHA: f32 = 0.8;
const DECAY: f32 = 0.003;
const DRIFT: f32 = 0.5;
const BREATH_DEPTH: f32 = 0.3;
const BREATH_RATE: f32 = 0.1;
const HISTORY: usize = 8;
const SPAWN_CHANCE: f32 = 1.0 / 40.0;
const SPAWN_MIN_ALPHA: f32 = 0.3;
const MAX_AGE: u32 = 300;
const TRAIL_ALPHA: f32 = 0.3;

/// A point circling a wandering centre on a breathing radius.
pub struct Orbit {
    center: Vec2,
    pos: Vec2,
    base_radius: f32,
    /// Degrees.
    angle: f32,
    /// Degrees per frame.
    angular_speed: f32,
    alpha: f32,
    decay: f32,
    age: u32,
    size: f32,
    color: Color,
    trail: Trail,
    dead: bool,
}

impl Orbit {
    pub fn new(center: Vec2, ctx: &mut DrawingContext) -> Self {
        let base_radius = ctx.pen_size * ctx.rng.range(0.5, 1.5);
        let angular_speed = ctx.rng.range(4.0, 8.0);
        let angle = ctx.rng.range(0.0, 360.0);
        Self::with_orbit(center, base_radius, angle, angular_speed, DECAY, ctx)
    }

    fn with_orbit(
        center: Vec2,
        base_radius: f32,
        angle: f32,
        angular_speed: f32,
        decay: f32,
        ctx: &DrawingContext,
    ) -> Self {
        let pos = center + polar_to_cartesian(base_radius, to_radians(angle));
        let mut trail = Trail::new(HISTORY);
        trail.push(pos);
        Self {
            center,
            pos,
            base_radius,
            angle,
            angular_speed,
            alpha: START_ALPHA,
            decay,
            age: 0,
            size: ctx.pen_size,
            color: ctx.pen_color,
            trail,
            dead: ctx.escaped(center),
        }
    }

    /// Smaller, quicker orbit around the current position that fades twice as fast.
    fn child(&self, ctx: &mut DrawingContext) -> Orbit {
        let angle = ctx.rng.range(0.0, 360.0);
        let mut child = Self::with_orbit(
            self.pos,
            self.base_radius * 0.5,
            angle,
            self.angular_speed * 1.5,
            self.decay * 2.0,
            ctx,
        );
        child.color = self.color;
        child.size = self.size * 0.5;
        child
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn center(&self) -> Vec2 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.base_radius * (1.0 + BREATH_DEPTH * (self.age as f32 * BREATH_RATE).sin())
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }
}

impl Effect for Orbit {
    fn name(&self) -> &'static str {
        "orbit"
    }

    fn advance(&mut self, ctx: &mut DrawingContext, spawned: &mut Spawned) {
        self.age += 1;
        self.center += Vec2::new(ctx.rng.range(-DRIFT, DRIFT), ctx.rng.range(-DRIFT, DRIFT));
        self.angle = (self.angle + self.angular_speed) % 360.0;
        self.pos = self.center + polar_to_cartesian(self.radius(), to_radians(self.angle));
        self.trail.push(self.pos);
        self.alpha -= self.decay;

        if !self.dead && self.alpha > SPAWN_MIN_ALPHA && ctx.rng.chance(SPAWN_CHANCE) {
            spawned.push(Box::new(self.child(ctx)));
        }
        if self.age >= MAX_AGE || self.alpha <= 0.0 || ctx.escaped(self.pos) {
            self.dead = true;
        }
    }

    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) {
        let paint = ctx.paint(self.color, self.alpha);
        surface.polyline(self.trail.points(), paint.with_alpha(self.alpha * TRAIL_ALPHA), 1.0);
        surface.radial_blob(self.pos, (self.size / 6.0).max(2.0), paint, 0.0, 1.0);
    }

    fn kill(&mut self) {
        self.dead = true;
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
