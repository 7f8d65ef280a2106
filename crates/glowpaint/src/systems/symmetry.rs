//! N-fold rotational and mirror symmetry.
//!
//! Every point source (pointer, autonomous painter, tracers) goes through
//! [`Symmetry::fan_out`] before reaching a pen, so all of them honour the
//! same configuration.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::math::rotate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Symmetry {
    /// Number of rotated copies. 0 turns symmetry off.
    pub count: u32,
    /// Origin as a fraction of canvas width.
    pub origin_x: f32,
    /// Origin as a fraction of canvas height.
    pub origin_y: f32,
    /// Also emit the reflection of every rotated copy.
    pub mirror: bool,
}

impl Default for Symmetry {
    fn default() -> Self {
        Self {
            count: 0,
            origin_x: 0.5,
            origin_y: 0.5,
            mirror: false,
        }
    }
}

/// Most rotated copies a single point may fan out to.
pub const MAX_COPIES: u32 = 64;

impl Symmetry {
    pub fn new(count: u32, mirror: bool) -> Self {
        Self {
            count,
            mirror,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.count > 0
    }

    /// Copy with the count capped at [`MAX_COPIES`] and the origin clamped
    /// to the canvas. A non-finite origin falls back to the centre.
    pub fn sanitized(self) -> Self {
        let fraction = |v: f32| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.5 };
        Self {
            count: self.count.min(MAX_COPIES),
            origin_x: fraction(self.origin_x),
            origin_y: fraction(self.origin_y),
            mirror: self.mirror,
        }
    }

    /// Origin in pixels for a `width`×`height` canvas.
    pub fn origin(&self, width: f32, height: f32) -> Vec2 {
        Vec2::new(self.origin_x * width, self.origin_y * height)
    }

    /// Angles (radians) of the rotated copies.
    fn angles(&self) -> impl Iterator<Item = f32> {
        let n = self.count.min(MAX_COPIES);
        (0..n).map(move |k| std::f32::consts::TAU * k as f32 / n as f32)
    }

    /// All points a single input fans out to. Non-finite input yields nothing.
    ///
    /// Inactive symmetry returns the input unchanged. Otherwise each angle
    /// contributes its rotated copy, followed by the mirrored copy (y
    /// component negated about the origin) when mirroring.
    pub fn fan_out(&self, p: Vec2, width: f32, height: f32) -> Vec<Vec2> {
        if !p.is_finite() {
            return Vec::new();
        }
        if !self.is_active() {
            return vec![p];
        }
        let origin = self.origin(width, height);
        let offset = p - origin;
        let per_angle = if self.mirror { 2 } else { 1 };
        let mut out = Vec::with_capacity(self.count.min(MAX_COPIES) as usize * per_angle);
        for angle in self.angles() {
            let r = rotate(offset, angle);
            out.push(origin + r);
            if self.mirror {
                out.push(origin + Vec2::new(r.x, -r.y));
            }
        }
        out
    }

    /// Guide spokes from the origin to `reach` pixels out, one per copy
    /// axis, for the HUD.
    pub fn guide_spokes(&self, width: f32, height: f32, reach: f32) -> Vec<(Vec2, Vec2)> {
        if !self.is_active() {
            return Vec::new();
        }
        let origin = self.origin(width, height);
        let mut spokes = Vec::new();
        for angle in self.angles() {
            let dir = Vec2::from_angle(angle);
            spokes.push((origin, origin + dir * reach));
            if self.mirror {
                spokes.push((origin, origin + Vec2::new(dir.x, -dir.y) * reach));
            }
        }
        spokes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        a.distance(b) < 1e-3
    }

    #[test]
    fn inactive_passes_point_through() {
        let s = Symmetry::default();
        assert_eq!(s.fan_out(Vec2::new(3.0, 4.0), 100.0, 100.0), vec![Vec2::new(3.0, 4.0)]);
    }

    #[test]
    fn four_fold_makes_a_square() {
        let s = Symmetry::new(4, false);
        let c = Vec2::new(50.0, 40.0);
        let pts = s.fan_out(c + Vec2::new(10.0, 0.0), 100.0, 80.0);
        assert_eq!(pts.len(), 4);
        assert!(close(pts[0], c + Vec2::new(10.0, 0.0)));
        assert!(close(pts[1], c + Vec2::new(0.0, 10.0)));
        assert!(close(pts[2], c + Vec2::new(-10.0, 0.0)));
        assert!(close(pts[3], c + Vec2::new(0.0, -10.0)));
        for p in pts {
            assert!((p.distance(c) - 10.0).abs() < 1e-3);
        }
    }

    #[test]
    fn mirror_doubles_emissions() {
        let s = Symmetry::new(4, true);
        let pts = s.fan_out(Vec2::new(60.0, 50.0), 100.0, 100.0);
        assert_eq!(pts.len(), 8);
    }

    #[test]
    fn mirror_reflects_off_axis_points() {
        let s = Symmetry::new(1, true);
        let pts = s.fan_out(Vec2::new(60.0, 53.0), 100.0, 100.0);
        assert_eq!(pts.len(), 2);
        assert!(close(pts[1], Vec2::new(60.0, 47.0)));
    }

    #[test]
    fn non_finite_input_is_dropped() {
        let s = Symmetry::new(6, true);
        assert!(s.fan_out(Vec2::new(f32::NAN, 1.0), 100.0, 100.0).is_empty());
        assert!(Symmetry::default().fan_out(Vec2::new(1.0, f32::INFINITY), 10.0, 10.0).is_empty());
    }

    #[test]
    fn huge_counts_are_capped() {
        let s = Symmetry::new(u32::MAX, true);
        assert_eq!(s.fan_out(Vec2::new(10.0, 10.0), 100.0, 100.0).len(), 2 * MAX_COPIES as usize);
        assert_eq!(s.guide_spokes(100.0, 100.0, 50.0).len(), 2 * MAX_COPIES as usize);
    }

    #[test]
    fn sanitized_clamps_origin_and_count() {
        let s = Symmetry {
            count: 1000,
            origin_x: f32::NAN,
            origin_y: 7.0,
            mirror: true,
        }
        .sanitized();
        assert_eq!(s.count, MAX_COPIES);
        assert_eq!(s.origin_x, 0.5);
        assert_eq!(s.origin_y, 1.0);
        assert!(s.mirror);
    }

    #[test]
    fn spokes_follow_count() {
        assert!(Symmetry::default().guide_spokes(100.0, 100.0, 50.0).is_empty());
        assert_eq!(Symmetry::new(6, false).guide_spokes(100.0, 100.0, 50.0).len(), 6);
        assert_eq!(Symmetry::new(6, true).guide_spokes(100.0, 100.0, 50.0).len(), 12);
    }
}
