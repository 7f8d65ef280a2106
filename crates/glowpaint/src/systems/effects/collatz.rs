use glam::Vec2;

use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::core::math::{collatz_sequence, move_point};
use crate::renderer::traits::Surface;

const ALPHA: f32 = 0.5;

/// Hops through a Collatz sequence, one value per frame. Each value sets
/// both the circle radius and the hop length (value / 2).
pub struct CollatzCircle {
    pos: Vec2,
    sequence: Vec<u64>,
    cursor: usize,
    color: Color,
    dead: bool,
}

impl CollatzCircle {
    /// Seeded from a random start in `[2, pen_size]`.
    pub fn new(pos: Vec2, ctx: &mut DrawingContext) -> Self {
        let top = (ctx.pen_size.max(2.0)) as u32;
        let seed = ctx.rng.int_range(2, top) as u64;
        Self::from_seed(pos, seed, ctx)
    }

    pub fn from_seed(pos: Vec2, seed: u64, ctx: &DrawingContext) -> Self {
        let sequence = collatz_sequence(seed);
        let dead = sequence.len() <= 1 || !pos.is_finite();
        Self {
            pos,
            sequence,
            cursor: 0,
            color: ctx.pen_color,
            dead,
        }
    }

    pub fn value(&self) -> u64 {
        self.sequence.get(self.cursor).copied().unwrap_or(1)
    }

    fn half_value(&self) -> f32 {
        self.value() as f32 / 2.0
    }
}

impl Effect for CollatzCircle {
    fn name(&self) -> &'static str {
        "collatz"
    }

    fn advance(&mut self, ctx: &mut DrawingContext, _spawned: &mut Spawned) {
        if self.cursor + 1 < self.sequence.len() {
            self.cursor += 1;
            let heading = ctx.rng.range(0.0, 360.0);
            self.pos = move_point(self.pos, self.half_value(), heading);
        }
        if self.cursor + 1 >= self.sequence.len() {
            self.dead = true;
        }
    }

    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) {
        let radius = self.half_value().max(1.0);
        surface.radial_blob(self.pos, radius, ctx.paint(self.color, ALPHA), 0.6, 1.0);
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

    #[test]
    fn walks_sequence_to_its_last_element() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 5);
        let mut circle = CollatzCircle::from_seed(Vec2::new(400.0, 300.0), 6, &ctx);
        let mut spawned = Vec::new();
        let mut seen = vec![circle.value()];
        while !circle.is_dead() {
            circle.advance(&mut ctx, &mut spawned);
            seen.push(circle.value());
        }
        assert_eq!(seen, vec![6, 3, 10, 5, 16, 8, 4, 2, 1]);
    }

    #[test]
    fn hop_length_is_half_the_value() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 5);
        let start = Vec2::new(400.0, 300.0);
        let mut circle = CollatzCircle::from_seed(start, 6, &ctx);
        circle.advance(&mut ctx, &mut Vec::new());
        assert!((circle.pos.distance(start) - 1.5).abs() < 1e-4);
    }

    #[test]
    fn seed_of_one_is_already_exhausted() {
        let ctx = DrawingContext::new(800.0, 600.0, 100.0, 5);
        assert!(CollatzCircle::from_seed(Vec2::new(1.0, 1.0), 1, &ctx).is_dead());
    }

    #[test]
    fn random_seed_respects_pen_size() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 5);
        ctx.pen_size = 12.0;
        for _ in 0..50 {
            let circle = CollatzCircle::new(Vec2::new(400.0, 300.0), &mut ctx);
            assert!((2..=12).contains(&circle.sequence[0]));
        }
    }
}
