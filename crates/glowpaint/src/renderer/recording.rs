//! A surface that records draw calls instead of rasterizing them.

use glam::Vec2;

use super::traits::{CompositeMode, Surface};
use crate::core::color::Paint;

/// One recorded primitive, with the composite mode active when it was issued.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    ClearTransparent,
    FillRect { min: Vec2, max: Vec2, paint: Paint, mode: CompositeMode },
    Blob { center: Vec2, radius: f32, paint: Paint, mode: CompositeMode },
    Line { from: Vec2, to: Vec2, paint: Paint, width: f32, mode: CompositeMode },
    Polyline { points: Vec<Vec2>, paint: Paint, width: f32, mode: CompositeMode },
    Triangle { points: [Vec2; 3], paint: Paint, mode: CompositeMode },
    Dot { at: Vec2, paint: Paint, mode: CompositeMode },
    Invert,
}

pub struct RecordingSurface {
    width: u32,
    height: u32,
    mode: CompositeMode,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            mode: CompositeMode::Additive,
            calls: Vec::new(),
        }
    }

    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    pub fn reset(&mut self) {
        self.calls.clear();
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn composite(&self) -> CompositeMode {
        self.mode
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.mode = mode;
    }

    fn clear(&mut self, mode: CompositeMode) {
        self.calls.push(DrawCall::Clear);
        self.mode = mode;
    }

    fn clear_transparent(&mut self) {
        self.calls.push(DrawCall::ClearTransparent);
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, paint: Paint) {
        let mode = self.mode;
        self.calls.push(DrawCall::FillRect { min, max, paint, mode });
    }

    fn radial_blob(
        &mut self,
        center: Vec2,
        radius: f32,
        paint: Paint,
        _inner_stop: f32,
        _outer_stop: f32,
    ) {
        let mode = self.mode;
        self.calls.push(DrawCall::Blob { center, radius, paint, mode });
    }

    fn line(&mut self, from: Vec2, to: Vec2, paint: Paint, width: f32) {
        let mode = self.mode;
        self.calls.push(DrawCall::Line { from, to, paint, width, mode });
    }

    fn polyline(&mut self, points: &[Vec2], paint: Paint, width: f32) {
        if points.len() < 2 {
            return;
        }
        let mode = self.mode;
        self.calls.push(DrawCall::Polyline { points: points.to_vec(), paint, width, mode });
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, paint: Paint) {
        let mode = self.mode;
        self.calls.push(DrawCall::Triangle { points: [a, b, c], paint, mode });
    }

    fn pixel_dot(&mut self, at: Vec2, paint: Paint) {
        let mode = self.mode;
        self.calls.push(DrawCall::Dot { at, paint, mode });
    }

    fn invert_colors(&mut self) {
        self.calls.push(DrawCall::Invert);
    }
}
