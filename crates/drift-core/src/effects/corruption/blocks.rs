use super::random_photo_color;
use crate::color::{Color, Rgb};
use crate::surface::Surface;
use crate::viewport::Viewport;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

pub const MAX_PIXEL_BLOCKS: usize = 120;
const NOISE_DECAY: f32 = 0.98;
const DISTURB_RADIUS: f32 = 150.0;
const DISTURB_GAIN: f32 = 0.03;
const WRAP_OUTER: f32 = 30.0;
const WRAP_INNER: f32 = 20.0;
const SPLIT_THRESHOLD: f32 = 0.15;

/// A floating rectangle of "photo data" drifting upward at some depth.
#[derive(Clone, Debug)]
pub struct PixelBlock {
    pub pos: Vec2,
    pub z: f32,
    pub size: Vec2,
    pub color: Rgb,
    pub alpha: f32,
    pub vel: Vec2,
    pub rotation: f32,
    pub spin: f32,
    /// Corruption accumulated near the pointer, decaying every frame.
    pub noise: f32,
}

impl PixelBlock {
    pub fn spawn(viewport: &Viewport, rng: &mut StdRng) -> Self {
        let z = 0.2 + rng.gen::<f32>() * 0.8;
        Self {
            pos: Vec2::new(rng.gen::<f32>() * viewport.width, rng.gen::<f32>() * viewport.height),
            z,
            size: Vec2::new(
                3.0 + rng.gen::<f32>() * 12.0 * z,
                3.0 + rng.gen::<f32>() * 12.0 * z,
            ),
            color: random_photo_color(rng),
            alpha: 0.3 + z * 0.5,
            vel: Vec2::new(
                (rng.gen::<f32>() - 0.5) * 0.3 * z,
                -0.1 - rng.gen::<f32>() * 0.4 * z,
            ),
            rotation: (rng.gen::<f32>() - 0.5) * 0.1,
            spin: (rng.gen::<f32>() - 0.5) * 0.005,
            noise: 0.0,
        }
    }

    pub fn update(&mut self, viewport: &Viewport, transition: f32, rng: &mut StdRng) {
        self.pos += self.vel * (1.0 + transition * 0.5);
        self.rotation += self.spin * (1.0 + self.noise * 5.0);
        self.noise *= NOISE_DECAY;

        if self.pos.x < -WRAP_OUTER {
            self.pos.x = viewport.width + WRAP_INNER;
        }
        if self.pos.x > viewport.width + WRAP_OUTER {
            self.pos.x = -WRAP_INNER;
        }
        if self.pos.y < -WRAP_OUTER {
            self.pos.y = viewport.height + WRAP_INNER;
        }
        if self.pos.y > viewport.height + WRAP_OUTER {
            self.pos.y = -WRAP_INNER;
            self.color = random_photo_color(rng);
        }
    }

    /// Accumulate noise when the pointer is within reach.
    pub fn disturb(&mut self, pointer: Vec2) {
        let d = self.pos.distance(pointer);
        if d < DISTURB_RADIUS {
            self.noise = (self.noise + DISTURB_GAIN * (1.0 - d / DISTURB_RADIUS)).min(1.0);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, transition: f32) {
        if !self.pos.is_finite() {
            return;
        }
        let a = self.alpha * transition;
        let n = self.noise;
        let scale = 0.5 + self.z * 0.5;
        let bw = self.size.x * scale * (1.0 + n * 2.0);
        let bh = self.size.y * scale * (1.0 + n * 0.5);

        surface.save();
        surface.translate(self.pos.x, self.pos.y);
        surface.rotate(self.rotation);

        surface.set_fill_color(self.color.alpha(a * (0.6 + n * 0.4)));
        surface.fill_rect(-bw / 2.0, -bh / 2.0, bw, bh);

        // RGB channel split when corrupted
        if n > SPLIT_THRESHOLD {
            let shift = n * 6.0;
            surface.set_global_alpha(n * 0.5 * transition);
            surface.set_fill_color(self.color.red_only().alpha(0.5));
            surface.fill_rect(-bw / 2.0 + shift, -bh / 2.0 - shift * 0.5, bw, bh);
            surface.set_fill_color(self.color.blue_only().alpha(0.5));
            surface.fill_rect(-bw / 2.0 - shift, -bh / 2.0 + shift * 0.5, bw, bh);
            surface.set_global_alpha(1.0);
        }

        if self.z > 0.5 {
            surface.set_stroke_color(Color::white(a * 0.15 * self.z));
            surface.set_line_width(0.5);
            surface.stroke_rect(-bw / 2.0, -bh / 2.0, bw, bh);
        }

        surface.restore();
    }
}
