use super::random_photo_color;
use crate::color::{LinearGradient, Paint, Rgb};
use crate::surface::Surface;
use crate::viewport::Viewport;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

pub const MAX_DATA_STREAMS: usize = 15;
pub const STREAM_SPAWN_INTERVAL: u64 = 8; // frames
const ENTRY_OFFSET: f32 = 20.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// A gradient line segment crossing the canvas once.
#[derive(Clone, Debug)]
pub struct DataStream {
    pub orientation: Orientation,
    /// Leading end of the segment.
    pub head: Vec2,
    pub len: f32,
    pub speed: f32,
    pub color: Rgb,
    pub alpha: f32,
    pub width: f32,
    pub alive: bool,
}

impl DataStream {
    pub fn spawn(viewport: &Viewport, rng: &mut StdRng) -> Self {
        let orientation = if rng.gen::<f32>() > 0.3 {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        let head = match orientation {
            Orientation::Vertical => Vec2::new(rng.gen::<f32>() * viewport.width, -ENTRY_OFFSET),
            Orientation::Horizontal => Vec2::new(-ENTRY_OFFSET, rng.gen::<f32>() * viewport.height),
        };
        Self {
            orientation,
            head,
            len: 40.0 + rng.gen::<f32>() * 120.0,
            speed: 1.5 + rng.gen::<f32>() * 3.0,
            color: random_photo_color(rng),
            alpha: 0.1 + rng.gen::<f32>() * 0.2,
            width: 0.5 + rng.gen::<f32>() * 1.5,
            alive: true,
        }
    }

    fn tail(&self) -> Vec2 {
        match self.orientation {
            Orientation::Vertical => self.head - Vec2::new(0.0, self.len),
            Orientation::Horizontal => self.head - Vec2::new(self.len, 0.0),
        }
    }

    pub fn update(&mut self, viewport: &Viewport) {
        match self.orientation {
            Orientation::Vertical => {
                self.head.y += self.speed;
                if self.head.y - self.len > viewport.height {
                    self.alive = false;
                }
            }
            Orientation::Horizontal => {
                self.head.x += self.speed;
                if self.head.x - self.len > viewport.width {
                    self.alive = false;
                }
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface, transition: f32) {
        if !self.alive {
            return;
        }
        let a = self.alpha * transition;
        let tail = self.tail();
        let grad = LinearGradient::new(tail, self.head)
            .stop(0.0, self.color.alpha(0.0))
            .stop(0.6, self.color.alpha(a))
            .stop(1.0, self.color.alpha(a * 1.5));
        surface.begin_path();
        surface.set_stroke(&Paint::Linear(grad));
        surface.move_to(tail.x, tail.y);
        surface.line_to(self.head.x, self.head.y);
        surface.set_line_width(self.width);
        surface.stroke();
    }
}
