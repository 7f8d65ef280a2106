//! CPU rasterizer backing the canvas and the HUD overlay.

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use super::traits::{CompositeMode, Surface};
use crate::core::color::Paint;
use crate::error::{StudioError, StudioResult};

/// Peak opacity of a radial blob relative to its paint alpha.
pub const BLOB_PEAK: f32 = 0.7;

/// One RGBA8 pixel, laid out the way a browser `ImageData` expects.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba { r: 0, g: 0, b: 0, a: 255 };
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };
}

/// Owned RGBA8 raster.
pub struct PixelSurface {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
    mode: CompositeMode,
}

impl PixelSurface {
    /// Create an opaque black surface.
    pub fn new(width: u32, height: u32) -> StudioResult<Self> {
        Self::filled(width, height, Rgba::BLACK)
    }

    /// Create a fully transparent surface (for overlays).
    pub fn transparent(width: u32, height: u32) -> StudioResult<Self> {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    fn filled(width: u32, height: u32, fill: Rgba) -> StudioResult<Self> {
        if width == 0 || height == 0 {
            return Err(StudioError::EmptySurface { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
            mode: CompositeMode::Additive,
        })
    }

    /// Wrap an existing buffer. `None` if the length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
            mode: CompositeMode::Additive,
        })
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Pixel-centre bounding box of `[min, max]`, clipped to the surface.
    fn clip(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let x0 = min.x.floor().max(0.0);
        let y0 = min.y.floor().max(0.0);
        let x1 = max.x.ceil().min(self.width as f32 - 1.0);
        let y1 = max.y.ceil().min(self.height as f32 - 1.0);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    /// Pixels whose centres fall inside the half-open rect `[min, max)`,
    /// clipped to the surface. Adjacent rects never share a pixel.
    fn centre_span(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        if !min.is_finite() || !max.is_finite() {
            return None;
        }
        let x0 = (min.x - 0.5).ceil().max(0.0);
        let y0 = (min.y - 0.5).ceil().max(0.0);
        let x1 = ((max.x - 0.5).ceil() - 1.0).min(self.width as f32 - 1.0);
        let y1 = ((max.y - 0.5).ceil() - 1.0).min(self.height as f32 - 1.0);
        if x0 > x1 || y0 > y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    #[inline]
    fn blend(&mut self, x: u32, y: u32, paint: Paint, coverage: f32) {
        let a = paint.a * coverage;
        if a <= 0.0 {
            return;
        }
        let idx = (y * self.width + x) as usize;
        let Some(px) = self.pixels.get_mut(idx) else {
            return;
        };
        match self.mode {
            CompositeMode::Additive => {
                let add = |d: u8, s: u8| (d as f32 + s as f32 * a).round().min(255.0) as u8;
                px.r = add(px.r, paint.r);
                px.g = add(px.g, paint.g);
                px.b = add(px.b, paint.b);
                px.a = (px.a as f32 + 255.0 * a).round().min(255.0) as u8;
            }
            CompositeMode::Replace => {
                let over = |d: u8, s: u8| (d as f32 * (1.0 - a) + s as f32 * a).round() as u8;
                px.r = over(px.r, paint.r);
                px.g = over(px.g, paint.g);
                px.b = over(px.b, paint.b);
                px.a = (255.0 * a + px.a as f32 * (1.0 - a)).round().min(255.0) as u8;
            }
        }
    }
}

/// Distance from `p` to the segment `a`–`b`.
fn segment_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len2 = ab.length_squared();
    if len2 <= f32::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

impl Surface for PixelSurface {
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
        self.pixels.fill(Rgba::BLACK);
        self.mode = mode;
    }

    fn clear_transparent(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, paint: Paint) {
        let Some((x0, y0, x1, y1)) = self.centre_span(min, max) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                self.blend(x, y, paint, 1.0);
            }
        }
    }

    fn radial_blob(
        &mut self,
        center: Vec2,
        radius: f32,
        paint: Paint,
        inner_stop: f32,
        outer_stop: f32,
    ) {
        if !(radius > 0.0) || !radius.is_finite() {
            return;
        }
        let reach = Vec2::splat(radius);
        let Some((x0, y0, x1, y1)) = self.clip(center - reach, center + reach) else {
            return;
        };
        let inner = inner_stop.clamp(0.0, 1.0);
        let outer = outer_stop.clamp(inner, 1.0);
        let span = outer - inner;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center) / radius;
                if d >= outer {
                    continue;
                }
                let falloff = if d <= inner || span <= f32::EPSILON {
                    1.0
                } else {
                    1.0 - (d - inner) / span
                };
                self.blend(x, y, paint, BLOB_PEAK * falloff);
            }
        }
    }

    fn line(&mut self, from: Vec2, to: Vec2, paint: Paint, width: f32) {
        let half = width.max(1.0) * 0.5;
        let pad = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.clip(from.min(to) - pad, from.max(to) + pad) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = segment_distance(Vec2::new(x as f32 + 0.5, y as f32 + 0.5), from, to);
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, paint, coverage);
                }
            }
        }
    }

    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, paint: Paint) {
        let area = (b - a).perp_dot(c - a);
        if area.abs() <= f32::EPSILON {
            return;
        }
        let Some((x0, y0, x1, y1)) = self.clip(a.min(b).min(c), a.max(b).max(c)) else {
            return;
        };
        let sign = area.signum();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let w0 = (b - a).perp_dot(p - a) * sign;
                let w1 = (c - b).perp_dot(p - b) * sign;
                let w2 = (a - c).perp_dot(p - c) * sign;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.blend(x, y, paint, 1.0);
                }
            }
        }
    }

    fn pixel_dot(&mut self, p: Vec2, paint: Paint) {
        if !p.is_finite() || p.x < 0.0 || p.y < 0.0 {
            return;
        }
        let (x, y) = (p.x as u32, p.y as u32);
        if x < self.width && y < self.height {
            self.blend(x, y, paint, 1.0);
        }
    }

    fn invert_colors(&mut self) {
        for px in &mut self.pixels {
            px.r = 255 - px.r;
            px.g = 255 - px.g;
            px.b = 255 - px.b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red(a: f32) -> Paint {
        Paint { r: 200, g: 0, b: 0, a }
    }

    #[test]
    fn zero_sized_surface_is_rejected() {
        assert!(matches!(
            PixelSurface::new(0, 5),
            Err(StudioError::EmptySurface { width: 0, height: 5 })
        ));
    }

    #[test]
    fn clear_paints_black_and_sets_mode() {
        let mut s = PixelSurface::new(4, 4).unwrap();
        s.pixel_dot(Vec2::new(1.0, 1.0), red(1.0));
        s.clear(CompositeMode::Replace);
        assert!(s.pixels().iter().all(|p| *p == Rgba::BLACK));
        assert_eq!(s.composite(), CompositeMode::Replace);
    }

    #[test]
    fn additive_saturates() {
        let mut s = PixelSurface::new(2, 2).unwrap();
        for _ in 0..3 {
            s.pixel_dot(Vec2::new(0.0, 0.0), red(1.0));
        }
        assert_eq!(s.pixel(0, 0).unwrap().r, 255);
    }

    #[test]
    fn replace_mode_covers() {
        let mut s = PixelSurface::new(2, 2).unwrap();
        s.set_composite(CompositeMode::Replace);
        s.pixel_dot(Vec2::new(1.0, 1.0), red(1.0));
        s.pixel_dot(Vec2::new(1.0, 1.0), Paint::opaque(0, 0, 0));
        assert_eq!(s.pixel(1, 1).unwrap(), Rgba::BLACK);
    }

    #[test]
    fn blob_is_brightest_at_centre() {
        let mut s = PixelSurface::new(41, 41).unwrap();
        s.radial_blob(Vec2::new(20.5, 20.5), 15.0, Paint::opaque(255, 255, 255), 0.0, 1.0);
        let centre = s.pixel(20, 20).unwrap().r;
        let edge = s.pixel(33, 20).unwrap().r;
        assert!(centre > edge, "centre {} edge {}", centre, edge);
        assert_eq!(centre, (255.0 * BLOB_PEAK).round() as u8);
        assert_eq!(s.pixel(0, 0).unwrap().r, 0);
    }

    #[test]
    fn line_covers_its_path() {
        let mut s = PixelSurface::new(20, 20).unwrap();
        s.line(Vec2::new(2.0, 10.5), Vec2::new(18.0, 10.5), red(1.0), 1.0);
        assert!(s.pixel(10, 10).unwrap().r > 0);
        assert_eq!(s.pixel(10, 2).unwrap().r, 0);
    }

    #[test]
    fn polyline_needs_two_points() {
        let mut s = PixelSurface::new(10, 10).unwrap();
        s.polyline(&[Vec2::new(5.0, 5.0)], red(1.0), 3.0);
        assert!(s.pixels().iter().all(|p| *p == Rgba::BLACK));
    }

    #[test]
    fn triangle_fills_interior_only() {
        let mut s = PixelSurface::new(20, 20).unwrap();
        s.triangle(Vec2::new(0.0, 0.0), Vec2::new(19.0, 0.0), Vec2::new(0.0, 19.0), red(1.0));
        assert!(s.pixel(3, 3).unwrap().r > 0);
        assert_eq!(s.pixel(18, 18).unwrap().r, 0);
    }

    #[test]
    fn non_finite_geometry_is_ignored() {
        let mut s = PixelSurface::new(10, 10).unwrap();
        s.radial_blob(Vec2::new(f32::NAN, 2.0), 4.0, red(1.0), 0.0, 1.0);
        s.line(Vec2::new(0.0, 0.0), Vec2::new(f32::INFINITY, 1.0), red(1.0), 2.0);
        s.pixel_dot(Vec2::new(f32::NAN, f32::NAN), red(1.0));
        assert!(s.pixels().iter().all(|p| *p == Rgba::BLACK));
    }

    #[test]
    fn fill_rect_with_low_alpha_fades() {
        let mut s = PixelSurface::new(4, 4).unwrap();
        s.pixel_dot(Vec2::new(2.0, 2.0), Paint::opaque(200, 200, 200));
        s.set_composite(CompositeMode::Replace);
        s.fill_rect(Vec2::ZERO, Vec2::new(4.0, 4.0), Paint::opaque(0, 0, 0).with_alpha(0.05));
        assert_eq!(s.pixel(2, 2).unwrap().r, 190);
    }

    #[test]
    fn adjacent_fractional_rects_do_not_overlap() {
        let mut s = PixelSurface::new(8, 1).unwrap();
        let paint = Paint::opaque(100, 0, 0);
        s.fill_rect(Vec2::new(0.5, 0.0), Vec2::new(2.5, 1.0), paint);
        s.fill_rect(Vec2::new(2.5, 0.0), Vec2::new(4.5, 1.0), paint);
        let row: Vec<u8> = s.pixels().iter().map(|p| p.r).collect();
        assert_eq!(row, vec![100, 100, 100, 100, 0, 0, 0, 0]);
    }

    #[test]
    fn rect_covers_its_width_exactly() {
        let mut s = PixelSurface::new(10, 10).unwrap();
        s.fill_rect(Vec2::new(2.3, 2.3), Vec2::new(5.3, 4.3), red(1.0));
        let lit = s.pixels().iter().filter(|p| p.r > 0).count();
        assert_eq!(lit, 3 * 2);
        assert!(s.pixel(2, 2).unwrap().r > 0);
        assert_eq!(s.pixel(5, 2).unwrap().r, 0);
    }

    #[test]
    fn invert_keeps_alpha() {
        let px = Rgba { r: 10, g: 20, b: 30, a: 40 };
        let mut s = PixelSurface::from_pixels(1, 1, vec![px]).unwrap();
        s.invert_colors();
        assert_eq!(s.pixel(0, 0).unwrap(), Rgba { r: 245, g: 235, b: 225, a: 40 });
    }

    #[test]
    fn bytes_are_rgba_ordered() {
        let s = PixelSurface::new(1, 1).unwrap();
        assert_eq!(s.as_bytes(), &[0, 0, 0, 255]);
    }
}
