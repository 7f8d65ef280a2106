use glam::Vec2;

use crate::core::color::Paint;
use crate::renderer::traits::Surface;

/// Bounded history of recent positions, oldest first.
#[derive(Debug, Clone)]
pub struct Trail {
    points: Vec<Vec2>,
    cap: usize,
}

impl Trail {
    pub fn new(cap: usize) -> Self {
        Self {
            points: Vec::with_capacity(cap + 1),
            cap: cap.max(1),
        }
    }

    pub fn push(&mut self, p: Vec2) {
        self.points.push(p);
        if self.points.len() > self.cap {
            self.points.remove(0);
        }
    }

    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Draw as a strip whose segments fade out toward the oldest point.
    pub fn draw_fading(&self, surface: &mut dyn Surface, paint: Paint, width: f32) {
        let segments = self.points.len().saturating_sub(1);
        for (i, pair) in self.points.windows(2).enumerate() {
            let fade = (i + 1) as f32 / segments as f32;
            surface.line(pair[0], pair[1], paint.with_alpha(paint.a * fade), width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::recording::{DrawCall, RecordingSurface};

    #[test]
    fn keeps_only_newest() {
        let mut trail = Trail::new(3);
        for i in 0..10 {
            trail.push(Vec2::splat(i as f32));
            assert!(trail.len() <= 3);
        }
        assert_eq!(trail.points()[0], Vec2::splat(7.0));
        assert_eq!(trail.points()[2], Vec2::splat(9.0));
    }

    #[test]
    fn newest_segment_is_brightest() {
        let mut trail = Trail::new(4);
        for i in 0..4 {
            trail.push(Vec2::new(i as f32 * 10.0, 0.0));
        }
        let mut surface = RecordingSurface::new(100, 100);
        trail.draw_fading(&mut surface, Paint::opaque(255, 255, 255).with_alpha(0.9), 1.0);
        let alphas: Vec<f32> = surface
            .calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Line { paint, .. } => Some(paint.a),
                _ => None,
            })
            .collect();
        assert_eq!(alphas.len(), 3);
        assert!(alphas[0] < alphas[1] && alphas[1] < alphas[2]);
        assert!((alphas[2] - 0.9).abs() < 1e-6);
    }
}
