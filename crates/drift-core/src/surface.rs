//! Drawing surface used by the engine and by every effect.
//!
//! The method set is the subset of the Canvas2D API the background needs. The
//! web front-end implements it over `CanvasRenderingContext2d`; tests use a
//! recorder. Coordinates are CSS pixels.

use crate::color::{Color, Paint};
use glam::Vec2;
use std::f32::consts::TAU;

pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);

    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn set_global_alpha(&mut self, alpha: f32);

    fn set_fill(&mut self, paint: &Paint);
    fn set_stroke(&mut self, paint: &Paint);
    fn set_line_width(&mut self, width: f32);
    /// Empty slice restores solid lines.
    fn set_line_dash(&mut self, segments: &[f32]);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);
    fn stroke(&mut self);
    fn fill(&mut self);

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    // ---- helpers ----

    #[inline]
    fn set_fill_color(&mut self, color: Color) {
        self.set_fill(&color.into());
    }

    #[inline]
    fn set_stroke_color(&mut self, color: Color) {
        self.set_stroke(&color.into());
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.begin_path();
        self.arc(center.x, center.y, radius, 0.0, TAU);
        self.fill();
    }
}

/// Begin a new path through `points` without stroking it.
pub fn trace_path<I>(surface: &mut dyn Surface, points: I)
where
    I: IntoIterator<Item = Vec2>,
{
    surface.begin_path();
    let mut iter = points.into_iter();
    if let Some(first) = iter.next() {
        surface.move_to(first.x, first.y);
        for p in iter {
            surface.line_to(p.x, p.y);
        }
    }
}
