//! Coarse grid of decaying noise values that records where the pointer has
//! lingered. Drives the scanline warp and the static-grain overlay.

use super::random_photo_color;
use crate::color::Color;
use crate::surface::Surface;
use crate::viewport::Viewport;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

pub const NOISE_CELL: f32 = 20.0; // px per grid cell
const DECAY: f32 = 0.995;
const DEPOSIT: f32 = 0.05;
const DEPOSIT_RADIUS: i32 = 3; // cells
const GRAIN_THRESHOLD: f32 = 0.02;
const GRAIN_PER_UNIT: f32 = 8.0;

#[derive(Clone, Debug, Default)]
pub struct NoiseGrid {
    cols: usize,
    rows: usize,
    cells: Vec<f32>,
}

impl NoiseGrid {
    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Reallocate (zeroed) when the viewport no longer matches the grid.
    pub fn fit(&mut self, viewport: &Viewport) {
        let cols = (viewport.width / NOISE_CELL).ceil() as usize;
        let rows = (viewport.height / NOISE_CELL).ceil() as usize;
        if cols != self.cols || rows != self.rows || self.cells.len() != cols * rows {
            self.cols = cols;
            self.rows = rows;
            self.cells = vec![0.0; cols * rows];
        }
    }

    #[inline]
    pub fn get(&self, col: usize, row: usize) -> f32 {
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col]
        } else {
            0.0
        }
    }

    pub fn decay(&mut self) {
        for v in &mut self.cells {
            *v *= DECAY;
        }
    }

    /// Add inverse-distance weighted noise around the cell under `pos`.
    pub fn deposit(&mut self, pos: Vec2) {
        if !pos.is_finite() || pos.x < 0.0 || pos.y < 0.0 {
            return;
        }
        let gx = (pos.x / NOISE_CELL).floor() as i32;
        let gy = (pos.y / NOISE_CELL).floor() as i32;
        for dy in -DEPOSIT_RADIUS..=DEPOSIT_RADIUS {
            for dx in -DEPOSIT_RADIUS..=DEPOSIT_RADIUS {
                let (nx, ny) = (gx + dx, gy + dy);
                if nx < 0 || ny < 0 || nx as usize >= self.cols || ny as usize >= self.rows {
                    continue;
                }
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                let cell = &mut self.cells[ny as usize * self.cols + nx as usize];
                *cell = (*cell + DEPOSIT / (1.0 + dist)).min(1.0);
            }
        }
    }

    /// Warp amount for a scanline at height `y`, taken from the row's first cell.
    pub fn row_warp(&self, y: f32) -> f32 {
        let row = (y / NOISE_CELL).floor();
        if row < 0.0 {
            return 0.0;
        }
        self.get(0, row as usize)
    }

    pub fn clear(&mut self) {
        self.cells.fill(0.0);
    }

    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(|v| *v == 0.0)
    }

    pub fn draw_grain(&self, surface: &mut dyn Surface, transition: f32, rng: &mut StdRng) {
        for row in 0..self.rows {
            for col in 0..self.cols {
                let val = self.cells[row * self.cols + col];
                if val <= GRAIN_THRESHOLD {
                    continue;
                }
                let origin = Vec2::new(col as f32, row as f32) * NOISE_CELL;
                let grains = (val * GRAIN_PER_UNIT).floor() as u32;
                for _ in 0..grains {
                    let p = origin + Vec2::new(rng.gen::<f32>(), rng.gen::<f32>()) * NOISE_CELL;
                    let size = 0.5 + rng.gen::<f32>() * 2.0 * val;
                    let color = random_photo_color(rng);
                    surface.set_fill_color(Color::Rgba(color, val * transition * 0.4));
                    surface.fill_rect(p.x, p.y, size, size);
                }
            }
        }
    }
}
