use glam::Vec2;

use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::core::math::spiral_trace;
use crate::renderer::traits::Surface;

const ALPHA: f32 = 0.8;

/// Shape presets for [`SpiralLine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiralKind {
    /// Tight spiral as wide as the pen.
    Star,
    /// Loose spiral three pens wide.
    Feather,
}

impl SpiralKind {
    /// `(extent, angle factor)` for a given pen size.
    fn shape(&self, pen_size: f32) -> (f32, f32) {
        match self {
            Self::Star => (pen_size, 10.0),
            Self::Feather => (pen_size * 3.0, 3.0),
        }
    }
}

/// Walks a precomputed spiral one segment at a time.
pub struct SpiralLine {
    kind: SpiralKind,
    origin: Vec2,
    points: Vec<Vec2>,
    cursor: usize,
    step: usize,
    width: f32,
    color: Color,
    dead: bool,
}

impl SpiralLine {
    pub fn new(origin: Vec2, kind: SpiralKind, ctx: &DrawingContext) -> Self {
        let (extent, factor) = kind.shape(ctx.pen_size);
        Self::with_shape(origin, kind, extent, factor, 1, ctx)
    }

    /// Spiral of radius `extent` whose angle is scaled by `factor`, advancing
    /// `step` points per frame.
    pub fn with_shape(
        origin: Vec2,
        kind: SpiralKind,
        extent: f32,
        factor: f32,
        step: usize,
        ctx: &DrawingContext,
    ) -> Self {
        let points = spiral_trace(extent, factor, ctx.tick);
        let dead = points.len() <= 2 || ctx.escaped(origin);
        Self {
            kind,
            origin,
            points,
            cursor: 0,
            step: step.max(1),
            width: (ctx.pen_size / 10.0).max(1.0),
            color: ctx.pen_color,
            dead,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Effect for SpiralLine {
    fn name(&self) -> &'static str {
        match self.kind {
            SpiralKind::Star => "star",
            SpiralKind::Feather => "feather",
        }
    }

    fn advance(&mut self, _ctx: &mut DrawingContext, _spawned: &mut Spawned) {
        self.cursor += self.step;
        if self.cursor + 2 >= self.points.len() {
            self.dead = true;
        }
    }

    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) {
        let segment = (self.points.get(self.cursor), self.points.get(self.cursor + 1));
        if let (Some(a), Some(b)) = segment {
            let paint = ctx.paint(self.color, ALPHA);
            surface.line(self.origin + *a, self.origin + *b, paint, self.width);
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
    fn star_walks_its_whole_path() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 9);
        ctx.pen_size = 30.0;
        let origin = Vec2::new(400.0, 300.0);
        let mut star = SpiralLine::with_shape(origin, SpiralKind::Star, 30.0, 10.0, 1, &ctx);
        let expected = ((30.0f32 - 1.0) / (30.0 / 40.0)).ceil() as usize;
        assert_eq!(star.len(), expected);

        let mut spawned = Vec::new();
        let mut steps = 0;
        while !star.is_dead() {
            star.advance(&mut ctx, &mut spawned);
            steps += 1;
            assert!(steps <= star.len());
        }
        assert!(steps >= star.len() - 2);
    }

    #[test]
    fn renders_consecutive_segment() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 9);
        let mut star = SpiralLine::new(Vec2::new(400.0, 300.0), SpiralKind::Star, &ctx);
        let mut surface = RecordingSurface::new(800, 600);
        star.render(&mut ctx, &mut surface);
        assert_eq!(surface.count(|c| matches!(c, DrawCall::Line { .. })), 1);
    }

    #[test]
    fn feather_is_wider_than_star() {
        let ctx = DrawingContext::new(800.0, 600.0, 100.0, 9);
        let origin = Vec2::new(400.0, 300.0);
        let star = SpiralLine::new(origin, SpiralKind::Star, &ctx);
        let feather = SpiralLine::new(origin, SpiralKind::Feather, &ctx);
        let reach = |s: &SpiralLine| s.points.iter().map(|p| p.length()).fold(0.0, f32::max);
        assert!(reach(&feather) > reach(&star));
    }

    #[test]
    fn tiny_pen_spiral_is_born_dead() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 9);
        ctx.pen_size = 1.0;
        assert!(SpiralLine::new(Vec2::new(10.0, 10.0), SpiralKind::Star, &ctx).is_dead());
    }
}
