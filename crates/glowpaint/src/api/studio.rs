use std::f32::consts::TAU;

use glam::Vec2;
use log::{debug, info, warn};

use crate::api::context::{DrawingContext, StudioConfig};
use crate::api::settings::Settings;
use crate::core::color::Color;
use crate::core::math::polar_to_cartesian;
use crate::core::time::FramePacer;
use crate::error::StudioResult;
use crate::input::queue::{InputEvent, InputQueue};
use crate::input::trace::{TracePoint, TraceQueue};
use crate::renderer::raster::PixelSurface;
use crate::renderer::traits::{CompositeMode, Surface};
use crate::systems::effects::EffectRegistry;
use crate::systems::pens::{pen_for, Pen, PenKind};

/// Alpha of the black veil laid over the canvas each frame in fade mode.
const FADE_ALPHA: f32 = 0.05;
const GUIDE_ALPHA: f32 = 0.15;
const CURSOR_ALPHA: f32 = 0.8;
const CURSOR_SEGMENTS: usize = 32;
pub const MIN_PEN_SIZE: f32 = 1.0;
pub const MAX_PEN_SIZE: f32 = 200.0;

/// Clamp to `[0, 1]`, treating NaN as full strength.
fn unit(v: f32) -> f32 {
    if v.is_nan() {
        1.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

/// The painting session: drawing context, canvas, HUD overlay, live effects,
/// the active pen and the queues that feed it.
///
/// `frame` is one pass of the render loop. `tick` paces those passes against
/// the display clock.
pub struct Studio<S: Surface = PixelSurface> {
    config: StudioConfig,
    ctx: DrawingContext,
    surface: S,
    overlay: S,
    effects: EffectRegistry,
    pen_kind: PenKind,
    pen: Box<dyn Pen>,
    input: InputQueue,
    traces: TraceQueue,
    pacer: FramePacer,
    pointer: Option<Vec2>,
    pointer_down: bool,
}

impl Studio<PixelSurface> {
    /// Create a studio with CPU-rasterized canvas and overlay. Fails if the
    /// configured canvas is empty.
    pub fn new(config: StudioConfig) -> StudioResult<Self> {
        let surface = PixelSurface::new(config.width, config.height)?;
        let overlay = PixelSurface::transparent(config.width, config.height)?;
        Ok(Self::with_surfaces(config, surface, overlay))
    }

    /// Replace both surfaces with fresh ones of the new size. Live effects
    /// are dropped since their coordinates no longer mean anything.
    pub fn resize(&mut self, width: u32, height: u32) -> StudioResult<()> {
        let mut surface = PixelSurface::new(width, height)?;
        let mut overlay = PixelSurface::transparent(width, height)?;
        surface.set_composite(self.ctx.composite());
        overlay.set_composite(CompositeMode::Replace);
        self.surface = surface;
        self.overlay = overlay;
        self.config.width = width;
        self.config.height = height;
        self.ctx.width = width as f32;
        self.ctx.height = height as f32;
        self.effects.clear();
        self.pen.lift();
        info!("studio resized to {}x{}", width, height);
        Ok(())
    }

    /// Main canvas as RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        self.surface.as_bytes()
    }

    /// HUD overlay as RGBA bytes.
    pub fn overlay_pixels(&self) -> &[u8] {
        self.overlay.as_bytes()
    }
}

impl<S: Surface> Studio<S> {
    pub fn with_surfaces(config: StudioConfig, mut surface: S, mut overlay: S) -> Self {
        let ctx = DrawingContext::from_config(&config);
        surface.clear(ctx.composite());
        overlay.clear_transparent();
        overlay.set_composite(CompositeMode::Replace);
        let pen_kind = PenKind::default();
        info!(
            "studio {}x{} seed={} pen={}",
            config.width, config.height, config.seed, pen_kind
        );
        Self {
            pacer: FramePacer::new(config.fixed_dt, config.max_steps_per_frame),
            config,
            ctx,
            surface,
            overlay,
            effects: EffectRegistry::new(),
            pen_kind,
            pen: pen_for(pen_kind),
            input: InputQueue::new(),
            traces: TraceQueue::new(),
            pointer: None,
            pointer_down: false,
        }
    }

    pub fn config(&self) -> &StudioConfig {
        &self.config
    }

    pub fn ctx(&self) -> &DrawingContext {
        &self.ctx
    }

    pub fn ctx_mut(&mut self) -> &mut DrawingContext {
        &mut self.ctx
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn overlay(&self) -> &S {
        &self.overlay
    }

    pub fn effects(&self) -> &EffectRegistry {
        &self.effects
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub fn pen_kind(&self) -> PenKind {
        self.pen_kind
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    pub fn set_pen(&mut self, kind: PenKind) {
        if kind == self.pen_kind {
            return;
        }
        debug!("pen {} -> {}", self.pen_kind, kind);
        self.pen_kind = kind;
        self.pen = pen_for(kind);
    }

    /// Copy persisted settings into the drawing context. Values that cannot
    /// be used (bad color, non-positive size) keep their current setting.
    pub fn apply_settings(&mut self, settings: &Settings) {
        if settings.pen_size.is_finite() && settings.pen_size > 0.0 {
            let size = settings.pen_size.clamp(MIN_PEN_SIZE, MAX_PEN_SIZE);
            if size != settings.pen_size {
                warn!("pen size {} clamped to {}", settings.pen_size, size);
            }
            self.ctx.pen_size = size;
        } else {
            warn!("ignoring pen size {}", settings.pen_size);
        }
        match settings.pen_color() {
            Some(color) => self.ctx.pen_color = color,
            None => warn!("ignoring pen color {:?}", settings.color),
        }
        self.ctx.modes.rainbow = settings.rainbow;
        self.ctx.modes.fade = settings.fade;
        self.ctx.modes.auto = settings.auto;
        self.ctx.modes.dark = settings.dark;
        self.ctx.modes.show_cursor = settings.show_cursor;
        self.ctx.rainbow_saturation = unit(settings.rainbow_saturation);
        self.ctx.rainbow_brightness = unit(settings.rainbow_brightness);
        let symmetry = settings.symmetry.sanitized();
        if symmetry != settings.symmetry {
            warn!("symmetry {:?} clamped to {:?}", settings.symmetry, symmetry);
        }
        self.ctx.symmetry = symmetry;
        self.set_pen(settings.pen);
        self.surface.set_composite(self.ctx.composite());
        info!(
            "settings applied: pen={} size={} dark={} symmetry={}",
            self.pen_kind, self.ctx.pen_size, self.ctx.modes.dark, self.ctx.symmetry.count
        );
    }

    pub fn apply_settings_json(&mut self, json: &str) -> StudioResult<()> {
        let settings = Settings::from_json(json).inspect_err(|e| warn!("{e}"))?;
        self.apply_settings(&settings);
        Ok(())
    }

    /// Snapshot of the current settings, ready to persist.
    pub fn settings(&self) -> Settings {
        Settings {
            pen: self.pen_kind,
            pen_size: self.ctx.pen_size,
            color: self.ctx.pen_color.to_hex(),
            rainbow: self.ctx.modes.rainbow,
            fade: self.ctx.modes.fade,
            auto: self.ctx.modes.auto,
            dark: self.ctx.modes.dark,
            rainbow_saturation: self.ctx.rainbow_saturation,
            rainbow_brightness: self.ctx.rainbow_brightness,
            show_cursor: self.ctx.modes.show_cursor,
            symmetry: self.ctx.symmetry,
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn queue_trace(&mut self, points: impl IntoIterator<Item = TracePoint>) {
        self.traces.extend(points);
    }

    /// Queue a flat `[x, y, pen, ...]` trace buffer. Returns the number of
    /// samples queued.
    pub fn queue_trace_flat(&mut self, flat: &[f32]) -> StudioResult<usize> {
        self.traces.extend_flat(flat)
    }

    pub fn pending_trace_points(&self) -> usize {
        self.traces.len()
    }

    /// Route one input point through the symmetry fan-out into the pen.
    pub fn stroke(&mut self, p: Vec2) {
        if !p.is_finite() {
            warn!("dropping non-finite point {p}");
            return;
        }
        self.surface.set_composite(self.ctx.composite());
        let points = self.ctx.symmetry.fan_out(p, self.ctx.width, self.ctx.height);
        for (copy, q) in points.into_iter().enumerate() {
            self.pen.draw(q, copy, &mut self.ctx, &mut self.surface, &mut self.effects);
        }
    }

    /// End the current stroke.
    pub fn lift(&mut self) {
        self.pen.lift();
    }

    /// Advance by a display delta in seconds. Returns the number of frames run.
    pub fn tick(&mut self, dt: f32) -> u32 {
        let steps = self.pacer.accumulate(dt);
        for _ in 0..steps {
            self.frame();
        }
        steps
    }

    /// One pass of the render loop.
    pub fn frame(&mut self) {
        self.handle_input();
        self.consume_traces();
        self.surface.set_composite(self.ctx.composite());

        self.ctx.tick += 1;

        if self.ctx.modes.fade {
            let veil = self.ctx.paint(Color::BLACK, FADE_ALPHA);
            let size = Vec2::new(self.ctx.width, self.ctx.height);
            self.surface.set_composite(CompositeMode::Replace);
            self.surface.fill_rect(Vec2::ZERO, size, veil);
            self.surface.set_composite(self.ctx.composite());
        }

        if self.ctx.modes.auto {
            let p = Vec2::new(
                self.ctx.rng.range(0.0, self.ctx.width),
                self.ctx.rng.range(0.0, self.ctx.height),
            );
            self.pen.lift();
            self.stroke(p);
            self.pen.lift();
        }

        if self.ctx.modes.rainbow {
            self.ctx.pen_color = self.ctx.rainbow_color();
        }

        self.effects.step(&mut self.ctx, &mut self.surface);
        self.draw_overlay();
    }

    fn handle_input(&mut self) {
        for event in self.input.drain() {
            let (x, y) = event.position();
            let p = Vec2::new(x, y);
            if p.is_finite() {
                self.pointer = Some(p);
            }
            match event {
                InputEvent::PointerDown { .. } => {
                    self.pointer_down = true;
                    self.pen.lift();
                    self.stroke(p);
                }
                InputEvent::PointerMove { .. } => {
                    if self.pointer_down {
                        self.stroke(p);
                    }
                }
                InputEvent::PointerUp { .. } => {
                    self.pointer_down = false;
                    self.pen.lift();
                }
            }
        }
    }

    fn consume_traces(&mut self) {
        for point in self.traces.take(self.config.trace_points_per_frame) {
            if point.pen_down {
                self.stroke(Vec2::new(point.x, point.y));
            } else {
                self.pen.lift();
            }
        }
    }

    /// Redraw the HUD from scratch: symmetry guides and the cursor ring.
    fn draw_overlay(&mut self) {
        self.overlay.clear_transparent();
        let (w, h) = (self.ctx.width, self.ctx.height);

        let guide = Color::WHITE.paint(GUIDE_ALPHA, false);
        for (from, to) in self.ctx.symmetry.guide_spokes(w, h, w.hypot(h)) {
            self.overlay.line(from, to, guide, 1.0);
        }

        if let (true, Some(at)) = (self.ctx.modes.show_cursor, self.pointer) {
            let pulse = 1.0 + 0.2 * (self.ctx.tick as f32 * 0.1).sin();
            let radius = (self.ctx.pen_size / 2.0).max(2.0) * pulse;
            let paint = self.ctx.pen_color.paint(CURSOR_ALPHA, false);
            let ring: Vec<Vec2> = (0..=CURSOR_SEGMENTS)
                .map(|i| at + polar_to_cartesian(radius, TAU * i as f32 / CURSOR_SEGMENTS as f32))
                .collect();
            self.overlay.polyline(&ring, paint, 1.5);
        }
    }

    /// Wipe the canvas to black and drop every live effect.
    pub fn clear_canvas(&mut self) {
        self.surface.clear(self.ctx.composite());
        self.effects.clear();
        debug!("canvas cleared");
    }

    /// One-shot color inversion of the whole canvas.
    pub fn invert(&mut self) {
        self.surface.invert_colors();
    }
}
