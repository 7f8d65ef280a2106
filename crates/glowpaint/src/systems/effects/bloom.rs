use std::f32::consts::TAU;

use glam::Vec2;

use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::renderer::traits::Surface;

const T_STEP: f32 = 0.05;
const DRIFT: f32 = 0.3;
const ALPHA_KEEP: f32 = 0.988;
const SPAWN_CHANCE: f32 = 0.02;
const MAX_DEPTH: u32 = 1;
const CHILD_SCALE: f32 = 0.5;
const VISIBLE: f32 = 0.01;
const MAX_AGE: u32 = 240;

/// (radius fraction of size, alpha multiplier): core, mid bloom, outer bloom.
const GLOWS: [(f32, f32); 3] = [(0.15, 1.0), (0.4, 0.5), (0.9, 0.2)];

/// Lissajous-like flower traced around a drifting centre.
pub struct Bloom {
    center: Vec2,
    pos: Vec2,
    prev: Vec2,
    t: f32,
    phase: f32,
    scale: f32,
    depth: u32,
    spawned_child: bool,
    alpha: f32,
    age: u32,
    size: f32,
    color: Color,
    dead: bool,
}

impl Bloom {
    pub fn new(center: Vec2, ctx: &mut DrawingContext) -> Self {
        let phase = ctx.rng.range(0.0, TAU);
        Self::with_scale(center, 1.0, 0, phase, ctx)
    }

    fn with_scale(center: Vec2, scale: f32, depth: u32, phase: f32, ctx: &DrawingContext) -> Self {
        let mut bloom = Self {
            center,
            pos: center,
            prev: center,
            t: 0.0,
            phase,
            scale,
            depth,
            spawned_child: false,
            alpha: 1.0,
            age: 0,
            size: ctx.pen_size * scale,
            color: ctx.pen_color,
            dead: ctx.escaped(center),
        };
        bloom.pos = bloom.figure_point();
        bloom.prev = bloom.pos;
        bloom
    }

    fn orbit_radius(&self) -> f32 {
        self.size
    }

    fn figure_point(&self) -> Vec2 {
        let (t, phi) = (self.t, self.phase);
        let offset = Vec2::new(
            t.cos() + 0.5 * (3.0 * t + phi).cos(),
            t.sin() + 0.5 * (2.0 * t + phi).sin(),
        );
        self.center + offset * self.orbit_radius()
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }
}

impl Effect for Bloom {
    fn name(&self) -> &'static str {
        "bloom"
    }

    fn advance(&mut self, ctx: &mut DrawingContext, spawned: &mut Spawned) {
        self.age += 1;
        self.t += T_STEP;
        self.center += Vec2::new(ctx.rng.range(-DRIFT, DRIFT), ctx.rng.range(-DRIFT, DRIFT));
        self.prev = self.pos;
        self.pos = self.figure_point();
        self.alpha *= ALPHA_KEEP;

        let p = SPAWN_CHANCE / (self.depth + 1) as f32;
        if !self.dead && !self.spawned_child && self.depth < MAX_DEPTH && ctx.rng.chance(p) {
            self.spawned_child = true;
            let phase = ctx.rng.range(0.0, TAU);
            let scale = self.scale * CHILD_SCALE;
            let mut child = Bloom::with_scale(self.pos, scale, self.depth + 1, phase, ctx);
            child.size = self.size * CHILD_SCALE;
            child.color = self.color;
            child.alpha = self.alpha;
            spawned.push(Box::new(child));
        }

        let outer = self.alpha * GLOWS[2].1;
        if self.age > MAX_AGE || outer < VISIBLE || ctx.escaped(self.pos) {
            self.dead = true;
        }
    }

    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) {
        for (reach, weight) in GLOWS {
            let paint = ctx.paint(self.color, self.alpha * weight);
            surface.radial_blob(self.pos, (self.size * reach).max(0.5), paint, 0.0, 1.0);
        }
        surface.line(self.prev, self.pos, ctx.paint(self.color, self.alpha * 0.5), 1.0);
    }

    fn kill(&mut self) {
        self.dead = true;
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
