//! Stateless vector and sequence helpers shared by pens and effects.
//!
//! Headings are in degrees everywhere outside this module; conversion to
//! radians happens here.

use glam::Vec2;

/// Hard stop for Collatz walks, far above any sequence reachable from pen-sized seeds.
pub const COLLATZ_MAX_STEPS: usize = 10_000;

/// Number of segments a spiral trace is divided into.
pub const SPIRAL_SEGMENTS: f32 = 40.0;

pub fn to_radians(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Step `speed` pixels from `point` along `heading_deg`.
pub fn move_point(point: Vec2, speed: f32, heading_deg: f32) -> Vec2 {
    let rad = to_radians(heading_deg);
    point + speed * Vec2::new(rad.cos(), rad.sin())
}

pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Rotate `v` counter-clockwise by `rad` radians.
pub fn rotate(v: Vec2, rad: f32) -> Vec2 {
    Vec2::from_angle(rad).rotate(v)
}

/// True when `p` lies further than `margin` outside a `width`×`height` canvas.
pub fn out_of_bounds(p: Vec2, width: f32, height: f32, margin: f32) -> bool {
    p.x < -margin || p.x > width + margin || p.y < -margin || p.y > height + margin
}

/// Every value visited by the Collatz map from `n` down to 1, both ends included.
///
/// Returns an empty list for 0. Stops early on overflow or after
/// [`COLLATZ_MAX_STEPS`] values.
pub fn collatz_sequence(n: u64) -> Vec<u64> {
    if n == 0 {
        return Vec::new();
    }
    let mut seq = vec![n];
    let mut v = n;
    while v != 1 && seq.len() < COLLATZ_MAX_STEPS {
        v = if v % 2 == 0 {
            v / 2
        } else {
            match v.checked_mul(3).and_then(|t| t.checked_add(1)) {
                Some(next) => next,
                None => break,
            }
        };
        seq.push(v);
    }
    seq
}

/// Points of an outward spiral, relative to its centre.
///
/// The radius walks from 1 towards `n` in steps of `n / 40`; the angle starts
/// at `tick` degrees and grows by one degree per point before being scaled by
/// `factor`. Yields `ceil((n - 1) / (n / 40))` points, or none when `n <= 1`.
pub fn spiral_trace(n: f32, factor: f32, tick: u64) -> Vec<Vec2> {
    if !n.is_finite() || n <= 1.0 {
        return Vec::new();
    }
    let step = n / SPIRAL_SEGMENTS;
    let count = ((n - 1.0) / step).ceil() as usize;
    let mut angle = (tick % 360) as f32;
    let mut points = Vec::with_capacity(count);
    for k in 0..count {
        let radius = 1.0 + k as f32 * step;
        angle += 1.0;
        points.push(polar_to_cartesian(radius, to_radians(angle * factor)));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radians_of_half_turn() {
        assert!((to_radians(180.0) - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn move_point_follows_heading() {
        let p = move_point(Vec2::new(10.0, 10.0), 5.0, 90.0);
        assert!((p.x - 10.0).abs() < 1e-4);
        assert!((p.y - 15.0).abs() < 1e-4);
    }

    #[test]
    fn polar_on_axes() {
        let p = polar_to_cartesian(2.0, 0.0);
        assert_eq!(p, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn collatz_known_sequences() {
        assert_eq!(collatz_sequence(1), vec![1]);
        assert_eq!(collatz_sequence(6), vec![6, 3, 10, 5, 16, 8, 4, 2, 1]);
        assert!(collatz_sequence(0).is_empty());
    }

    #[test]
    fn collatz_terminates_for_small_inputs() {
        for n in 1..2000u64 {
            let seq = collatz_sequence(n);
            assert_eq!(*seq.last().unwrap(), 1, "n = {}", n);
            assert!(seq.len() < COLLATZ_MAX_STEPS);
        }
    }

    #[test]
    fn spiral_length_matches_segment_count() {
        let pts = spiral_trace(30.0, 10.0, 0);
        assert_eq!(pts.len(), 39);
        assert!(spiral_trace(1.0, 10.0, 0).is_empty());
        assert!(spiral_trace(f32::NAN, 10.0, 0).is_empty());
    }

    #[test]
    fn spiral_radius_grows() {
        let pts = spiral_trace(30.0, 10.0, 17);
        for pair in pts.windows(2) {
            assert!(pair[1].length() > pair[0].length());
        }
    }

    #[test]
    fn out_of_bounds_respects_margin() {
        assert!(!out_of_bounds(Vec2::new(-10.0, 5.0), 100.0, 100.0, 20.0));
        assert!(out_of_bounds(Vec2::new(-21.0, 5.0), 100.0, 100.0, 20.0));
        assert!(out_of_bounds(Vec2::new(50.0, 121.0), 100.0, 100.0, 20.0));
        assert!(!out_of_bounds(Vec2::new(50.0, 50.0), 100.0, 100.0, 0.0));
    }
}
