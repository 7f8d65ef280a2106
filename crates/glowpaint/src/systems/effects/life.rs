//! Conway's Game of Life stamped onto the canvas.

use glam::Vec2;

use super::{Effect, Spawned};
use crate::api::context::DrawingContext;
use crate::core::color::Color;
use crate::core::rng::Rng;
use crate::renderer::traits::Surface;

pub const GRID_SIZE: usize = 32;
const GENERATION_CAP: u32 = 4 * GRID_SIZE as u32;
const FADE: f32 = 0.002;
const ALPHA_FLOOR: f32 = 0.05;
/// Generations a cell takes to reach full brightness.
const FADE_IN: f32 = 5.0;

/// Square grid of cells plus how many consecutive generations each has lived.
/// Cells beyond the edge count as dead.
#[derive(Debug, Clone, PartialEq)]
pub struct LifeGrid {
    size: usize,
    cells: Vec<bool>,
    ages: Vec<u16>,
}

impl LifeGrid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
            ages: vec![0; size * size],
        }
    }

    /// Random fill that is densest at the centre and empty at the corners.
    pub fn seeded(size: usize, rng: &mut Rng) -> Self {
        let mut grid = Self::new(size);
        let mid = (size as f32 - 1.0) / 2.0;
        let max_dist = (mid * mid * 2.0).sqrt().max(1.0);
        for y in 0..size {
            for x in 0..size {
                let d = Vec2::new(x as f32 - mid, y as f32 - mid).length();
                let density = 0.5 * (1.0 - d / max_dist);
                if rng.chance(density) {
                    grid.set(x, y, true);
                }
            }
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.cells[y * self.size + x]
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if x < self.size && y < self.size {
            let i = y * self.size + x;
            self.cells[i] = alive;
            self.ages[i] = if alive { self.ages[i].max(1) } else { 0 };
        }
    }

    pub fn age(&self, x: usize, y: usize) -> u16 {
        if x < self.size && y < self.size {
            self.ages[y * self.size + x]
        } else {
            0
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    fn neighbours(&self, x: usize, y: usize) -> u8 {
        let mut n = 0;
        for dy in [-1i32, 0, 1] {
            for dx in [-1i32, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let (nx, ny) = (x as i32 + dx, y as i32 + dy);
                if nx >= 0 && ny >= 0 && self.get(nx as usize, ny as usize) {
                    n += 1;
                }
            }
        }
        n
    }

    /// Next generation: live cells survive on 2 or 3 neighbours, dead cells
    /// are born on exactly 3.
    pub fn step(&self) -> LifeGrid {
        let mut next = LifeGrid::new(self.size);
        for y in 0..self.size {
            for x in 0..self.size {
                let i = y * self.size + x;
                let n = self.neighbours(x, y);
                let alive = if self.cells[i] { n == 2 || n == 3 } else { n == 3 };
                if alive {
                    next.cells[i] = true;
                    next.ages[i] = self.ages[i].saturating_add(1);
                }
            }
        }
        next
    }
}

/// Runs a seeded grid for a bounded number of generations, fading slowly.
pub struct LifePainter {
    origin: Vec2,
    cell: f32,
    grid: LifeGrid,
    generation: u32,
    alpha: f32,
    color: Color,
    dead: bool,
}

impl LifePainter {
    pub fn new(center: Vec2, ctx: &mut DrawingContext) -> Self {
        let grid = LifeGrid::seeded(GRID_SIZE, &mut ctx.rng);
        Self::with_grid(center, grid, ctx)
    }

    pub fn with_grid(center: Vec2, grid: LifeGrid, ctx: &DrawingContext) -> Self {
        let cell = (ctx.pen_size / 4.0).max(2.0);
        let half = grid.size() as f32 * cell / 2.0;
        let dead = grid.population() == 0 || !center.is_finite();
        Self {
            origin: center - Vec2::splat(half),
            cell,
            grid,
            generation: 0,
            alpha: 1.0,
            color: ctx.pen_color,
            dead,
        }
    }

    pub fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl Effect for LifePainter {
    fn name(&self) -> &'static str {
        "life"
    }

    fn advance(&mut self, _ctx: &mut DrawingContext, _spawned: &mut Spawned) {
        self.grid = self.grid.step();
        self.generation += 1;
        self.alpha -= FADE;
        if self.grid.population() == 0
            || self.generation >= GENERATION_CAP
            || self.alpha < ALPHA_FLOOR
        {
            self.dead = true;
        }
    }

    fn render(&mut self, ctx: &mut DrawingContext, surface: &mut dyn Surface) {
        let size = self.grid.size();
        for y in 0..size {
            for x in 0..size {
                if !self.grid.get(x, y) {
                    continue;
                }
                let fade_in = (self.grid.age(x, y) as f32 / FADE_IN).min(1.0);
                let min = self.origin + Vec2::new(x as f32, y as f32) * self.cell;
                let paint = ctx.paint(self.color, self.alpha * fade_in);
                surface.fill_rect(min, min + Vec2::splat(self.cell), paint);
            }
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

    fn grid_with(size: usize, live: &[(usize, usize)]) -> LifeGrid {
        let mut g = LifeGrid::new(size);
        for &(x, y) in live {
            g.set(x, y, true);
        }
        g
    }

    #[test]
    fn empty_grid_stays_empty() {
        let next = LifeGrid::new(8).step();
        assert_eq!(next, LifeGrid::new(8));
        assert_eq!(next.population(), 0);
    }

    #[test]
    fn lonely_cell_dies() {
        let g = grid_with(8, &[(4, 4)]);
        assert_eq!(g.step().population(), 0);
    }

    #[test]
    fn blinker_oscillates() {
        let g = grid_with(5, &[(1, 2), (2, 2), (3, 2)]);
        let next = g.step();
        assert!(next.get(2, 1) && next.get(2, 2) && next.get(2, 3));
        assert!(!next.get(1, 2) && !next.get(3, 2));
        assert_eq!(next.step(), {
            let mut expected = g.clone();
            // the centre cell survived both generations
            expected.ages[2 * 5 + 2] = 3;
            expected
        });
    }

    #[test]
    fn block_ages_while_stable() {
        let g = grid_with(4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let g3 = g.step().step();
        assert_eq!(g3.population(), 4);
        assert_eq!(g3.age(1, 1), 3);
    }

    #[test]
    fn edges_count_as_dead() {
        let g = grid_with(3, &[(0, 0), (1, 0), (0, 1)]);
        // corner L-tromino becomes a block
        let next = g.step();
        assert!(next.get(1, 1));
        assert_eq!(next.population(), 4);
    }

    #[test]
    fn seeding_favours_the_centre() {
        let mut rng = Rng::new(11);
        let g = LifeGrid::seeded(GRID_SIZE, &mut rng);
        assert!(g.population() > 0);
        assert!(!g.get(0, 0));
        assert!(!g.get(GRID_SIZE - 1, GRID_SIZE - 1));
    }

    #[test]
    fn painter_dies_when_population_collapses() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 2);
        let lonely = grid_with(8, &[(4, 4)]);
        let mut painter = LifePainter::with_grid(Vec2::new(400.0, 300.0), lonely, &ctx);
        assert!(!painter.is_dead());
        painter.advance(&mut ctx, &mut Vec::new());
        assert!(painter.is_dead());
    }

    #[test]
    fn still_life_hits_generation_cap() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 2);
        let block = grid_with(4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let mut painter = LifePainter::with_grid(Vec2::new(400.0, 300.0), block, &ctx);
        let mut frames = 0;
        while !painter.is_dead() {
            painter.advance(&mut ctx, &mut Vec::new());
            frames += 1;
        }
        assert_eq!(frames, GENERATION_CAP);
        assert_eq!(painter.generation(), GENERATION_CAP);
    }

    #[test]
    fn renders_one_rect_per_live_cell() {
        let mut ctx = DrawingContext::new(800.0, 600.0, 100.0, 2);
        let block = grid_with(4, &[(1, 1), (2, 1), (1, 2), (2, 2)]);
        let mut painter = LifePainter::with_grid(Vec2::new(400.0, 300.0), block, &ctx);
        let mut surface = RecordingSurface::new(800, 600);
        painter.render(&mut ctx, &mut surface);
        assert_eq!(surface.count(|c| matches!(c, DrawCall::FillRect { .. })), 4);
    }
}
