//! Random-walk trails: the "blood" drip and its rectilinear "digital" cousin.

use glam::Vec2;

use super::trail::Trail;
use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::core::math::move_point;
use crate::renderer::traits::Surface;

const START_ALPHA: f32 = 0.3;
const START_DECAY: f32 = 0.001;
const DECAY_ACCEL: f32 = 0.0004;
const TURN_JITTER: f32 = 40.0;
const CHILD_CHANCE: f32 = 1.0 / 20.0;
const CHILD_JITTER: f32 = 60.0;
const HISTORY: usize = 3;
const CARDINALS: [f32; 4] = [0.0, 90.0, 180.0, 270.0];

/// How a walker picks a new heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Steering {
    /// Nudge the heading by up to ±40° (children: ±60°).
    Jitter,
    /// Snap to one of the four axis directions.
    Cardinal,
}

pub struct Walker {
    steering: Steering,
    pos: Vec2,
    heading: f32,
    speed: f32,
    rotate_count: u32,
    alpha: f32,
    decay: f32,
    width: f32,
    color: Color,
    trail: Trail,
    dead: bool,
}

impl Walker {
    pub fn new(pos: Vec2, steering: Steering, ctx: &mut DrawingContext) -> Self {
        let heading = match steering {
            Steering::Jitter => ctx.rng.range(0.0, 360.0),
            Steering::Cardinal => pick_cardinal(ctx),
        };
        Self::with_heading(pos, heading, START_ALPHA, steering, ctx)
    }

    pub fn blood(pos: Vec2, ctx: &mut DrawingContext) -> Self {
        Self::new(pos, Steering::Jitter, ctx)
    }

    pub fn digital(pos: Vec2, ctx: &mut DrawingContext) -> Self {
        Self::new(pos, Steering::Cardinal, ctx)
    }

    fn with_heading(
        pos: Vec2,
        heading: f32,
        alpha: f32,
        steering: Steering,
        ctx: &mut DrawingContext,
    ) -> Self {
        let mut trail = Trail::new(HISTORY);
        trail.push(pos);
        Self {
            steering,
            pos,
            heading,
            speed: ctx.pen_size / 10.0,
            rotate_count: ctx.rng.int_range(2, 6),
            alpha,
            decay: START_DECAY,
            width: (ctx.pen_size / 8.0).max(1.0),
            color: ctx.pen_color,
            trail,
            dead: ctx.escaped(pos),
        }
    }

    fn child(&self, ctx: &mut DrawingContext) -> Walker {
        let heading = match self.steering {
            Steering::Jitter => self.heading + ctx.rng.range(-CHILD_JITTER, CHILD_JITTER),
            Steering::Cardinal => pick_cardinal(ctx),
        };
        let mut child = Self::with_heading(self.pos, heading, self.alpha, self.steering, ctx);
        child.speed = self.speed;
        child.width = self.width;
        child.color = self.color;
        child
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn history(&self) -> &[Vec2] {
        self.trail.points()
    }
}

fn pick_cardinal(ctx: &mut DrawingContext) -> f32 {
    ctx.rng.pick(&CARDINALS).copied().unwrap_or(0.0)
}

impl Effect for Walker {
    fn name(&self) -> &'static str {
        match self.steering {
            Steering::Jitter => "blood",
            Steering::Cardinal => "digital",
        }
    }

    fn advance(&mut self, ctx: &mut DrawingContext, spawned: &mut Spawned) {
        self.rotate_count = self.rotate_count.saturating_sub(1);
        if self.rotate_count == 0 {
            self.heading = match self.steering {
                Steering::Jitter => self.heading + ctx.rng.range(-TURN_JITTER, TURN_JITTER),
                Steering::Cardinal => pick_cardinal(ctx),
            };
            self.rotate_count = ctx.rng.int_range(2, 6);
        }

        self.pos = move_point(self.pos, self.speed, self.heading);
        self.trail.push(self.pos);

        // Decay keeps accelerating, even past death.
        self.alpha -= self.decay;
        self.decay += DECAY_ACCEL;

        if !self.dead && self.alpha > 0.0 && ctx.rng.chance(CHILD_CHANCE) {
            spawned.push(Box::new(self.child(ctx)));
        }
        if self.alpha <= 0.0 || ctx.escaped(self.pos) {
            self.dead = true;
        }
    }

    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) {
        let paint = ctx.paint(self.color, self.alpha);
        self.trail.draw_fading(surface, paint, self.width);
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

    fn ctx() -> DrawingContext {
        DrawingContext::new(800.0, 600.0, 100.0, 42)
    }

    #[test]
    fn blood_fades_with_accelerating_decay() {
        let mut ctx = ctx();
        ctx.pen_size = 20.0;
        let mut blood = Walker::blood(Vec2::new(100.0, 100.0), &mut ctx);
        let mut spawned = Vec::new();
        let mut last = blood.alpha();
        for _ in 0..50 {
            blood.advance(&mut ctx, &mut spawned);
            assert!(blood.alpha() < last);
            assert!(blood.history().len() <= 3);
            last = blood.alpha();
        }
        assert!(blood.alpha() <= 0.3 - 50.0 * 0.001);
        assert!(blood.is_dead());
    }

    #[test]
    fn spawns_children_of_same_kind() {
        let mut ctx = ctx();
        let mut spawned = Vec::new();
        // 1-in-20 per frame: across 20 walkers x 30 live frames a child is certain in practice
        for _ in 0..20 {
            let mut blood = Walker::blood(Vec2::new(400.0, 300.0), &mut ctx);
            for _ in 0..30 {
                blood.advance(&mut ctx, &mut spawned);
            }
        }
        assert!(!spawned.is_empty());
        assert!(spawned.iter().all(|c| c.name() == "blood" && !c.is_dead()));
    }

    #[test]
    fn digital_moves_along_axes() {
        let mut ctx = ctx();
        let mut digital = Walker::digital(Vec2::new(400.0, 300.0), &mut ctx);
        let mut spawned = Vec::new();
        for _ in 0..20 {
            let before = digital.pos();
            digital.advance(&mut ctx, &mut spawned);
            let step = digital.pos() - before;
            assert!(step.x.abs() < 1e-3 || step.y.abs() < 1e-3, "diagonal step {:?}", step);
        }
        assert_eq!(digital.name(), "digital");
    }

    #[test]
    fn nan_spawn_point_is_born_dead() {
        let mut ctx = ctx();
        let blood = Walker::blood(Vec2::new(f32::NAN, 10.0), &mut ctx);
        assert!(blood.is_dead());
    }

    #[test]
    fn death_is_permanent() {
        let mut ctx = ctx();
        let mut blood = Walker::blood(Vec2::new(100.0, 100.0), &mut ctx);
        blood.kill();
        let mut spawned = Vec::new();
        for _ in 0..5 {
            blood.advance(&mut ctx, &mut spawned);
            assert!(blood.is_dead());
        }
        assert!(spawned.is_empty());
    }
}
