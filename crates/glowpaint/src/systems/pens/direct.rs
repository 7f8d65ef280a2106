use std::collections::HashMap;

use glam::Vec2;

use super::Pen;
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::core::math::move_point;
use crate::renderer::traits::{CompositeMode, Surface};
use crate::systems::effects::EffectRegistry;

const FUR_STRANDS: usize = 6;
const SPRAY_DOTS_PER_SIZE: f32 = 20.0;

/// Soft round blob the size of the pen.
pub struct Normal;

impl Pen for Normal {
    fn draw(
        &mut self,
        p: Vec2,
        _copy: usize,
        ctx: &mut DrawingContext,
        surface: &mut dyn Surface,
        _effects: &mut EffectRegistry,
    ) {
        surface.radial_blob(p, ctx.pen_size, ctx.paint(ctx.pen_color, 0.5), 0.0, 1.0);
    }
}

/// Connected line through successive points of a stroke, one stroke per
/// symmetry copy.
#[derive(Default)]
pub struct Ink {
    last: HashMap<usize, Vec2>,
}

impl Pen for Ink {
    fn draw(
        &mut self,
        p: Vec2,
        copy: usize,
        ctx: &mut DrawingContext,
        surface: &mut dyn Surface,
        _effects: &mut EffectRegistry,
    ) {
        let width = (ctx.pen_size / 4.0).max(1.0);
        let paint = ctx.paint(ctx.pen_color, 0.8);
        match self.last.insert(copy, p) {
            Some(prev) => surface.line(prev, p, paint, width),
            None => surface.pixel_dot(p, paint),
        }
    }

    fn lift(&mut self) {
        self.last.clear();
    }
}

/// Short hairs scattered around the point.
pub struct Fur;

impl Pen for Fur {
    fn draw(
        &mut self,
        p: Vec2,
        _copy: usize,
        ctx: &mut DrawingContext,
        surface: &mut dyn Surface,
        _effects: &mut EffectRegistry,
    ) {
        let paint = ctx.paint(ctx.pen_color, 0.25);
        let reach = ctx.pen_size / 2.0;
        for _ in 0..FUR_STRANDS {
            let root = p + Vec2::new(ctx.rng.range(-reach, reach), ctx.rng.range(-reach, reach));
            let heading = ctx.rng.range(0.0, 360.0);
            let tip = move_point(root, ctx.rng.range(reach * 0.5, reach * 1.5), heading);
            surface.line(root, tip, paint, 1.0);
        }
    }
}

/// Airbrush: `pen_size * 20` single-pixel dots in a gaussian cloud.
pub struct Spray;

impl Pen for Spray {
    fn draw(
        &mut self,
        p: Vec2,
        _copy: usize,
        ctx: &mut DrawingContext,
        surface: &mut dyn Surface,
        _effects: &mut EffectRegistry,
    ) {
        let dots = (ctx.pen_size * SPRAY_DOTS_PER_SIZE).max(0.0) as usize;
        let stddev = ctx.pen_size / 2.0;
        let paint = ctx.paint(ctx.pen_color, 0.5);
        for _ in 0..dots {
            let at = Vec2::new(ctx.rng.gaussian(p.x, stddev), ctx.rng.gaussian(p.y, stddev));
            surface.pixel_dot(at, paint);
        }
    }
}

/// Hollow-looking ring of random size.
pub struct Bubble;

impl Pen for Bubble {
    fn draw(
        &mut self,
        p: Vec2,
        _copy: usize,
        ctx: &mut DrawingContext,
        surface: &mut dyn Surface,
        _effects: &mut EffectRegistry,
    ) {
        let radius = ctx.pen_size * ctx.rng.range(0.5, 1.5);
        surface.radial_blob(p, radius, ctx.paint(ctx.pen_color, 0.6), 0.75, 1.0);
    }
}

/// Black disc stamped in replace mode, then the ambient composite is put back.
pub struct DarkCircle;

impl Pen for DarkCircle {
    fn draw(
        &mut self,
        p: Vec2,
        _copy: usize,
        ctx: &mut DrawingContext,
        surface: &mut dyn Surface,
        _effects: &mut EffectRegistry,
    ) {
        surface.set_composite(CompositeMode::Replace);
        surface.radial_blob(p, ctx.pen_size, ctx.paint(Color::BLACK, 1.0), 0.0, 1.0);
        surface.set_composite(ctx.composite());
    }
}
