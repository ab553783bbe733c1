// Shared helpers for drift-core integration tests.

#![allow(dead_code)]

use drift_core::effects::FxContext;
use drift_core::{Paint, Surface};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Clear(f32, f32),
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    GlobalAlpha(f32),
    Fill(Paint),
    Stroke(Paint),
    LineWidth(f32),
    LineDash(Vec<f32>),
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Arc { x: f32, y: f32, r: f32 },
    ClosePath,
    StrokePath,
    FillPath,
    FillRect(f32, f32, f32, f32),
    StrokeRect(f32, f32, f32, f32),
}

/// Records every drawing call instead of rasterising.
#[derive(Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn take(&mut self) -> Vec<Op> {
        std::mem::take(&mut self.ops)
    }

    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn strokes(&self) -> usize {
        self.count(|op| matches!(op, Op::StrokePath))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ops.push(Op::Clear(width, height));
    }
    fn save(&mut self) {
        self.ops.push(Op::Save);
    }
    fn restore(&mut self) {
        self.ops.push(Op::Restore);
    }
    fn translate(&mut self, x: f32, y: f32) {
        self.ops.push(Op::Translate(x, y));
    }
    fn rotate(&mut self, radians: f32) {
        self.ops.push(Op::Rotate(radians));
    }
    fn set_global_alpha(&mut self, alpha: f32) {
        self.ops.push(Op::GlobalAlpha(alpha));
    }
    fn set_fill(&mut self, paint: &Paint) {
        self.ops.push(Op::Fill(paint.clone()));
    }
    fn set_stroke(&mut self, paint: &Paint) {
        self.ops.push(Op::Stroke(paint.clone()));
    }
    fn set_line_width(&mut self, width: f32) {
        self.ops.push(Op::LineWidth(width));
    }
    fn set_line_dash(&mut self, segments: &[f32]) {
        self.ops.push(Op::LineDash(segments.to_vec()));
    }
    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }
    fn move_to(&mut self, x: f32, y: f32) {
        self.ops.push(Op::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f32, y: f32) {
        self.ops.push(Op::LineTo(x, y));
    }
    fn arc(&mut self, x: f32, y: f32, radius: f32, _start: f32, _end: f32) {
        self.ops.push(Op::Arc { x, y, r: radius });
    }
    fn close_path(&mut self) {
        self.ops.push(Op::ClosePath);
    }
    fn stroke(&mut self) {
        self.ops.push(Op::StrokePath);
    }
    fn fill(&mut self) {
        self.ops.push(Op::FillPath);
    }
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Op::FillRect(x, y, w, h));
    }
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Op::StrokeRect(x, y, w, h));
    }
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn fx(transition: f32, rng: &mut StdRng) -> FxContext<'_> {
    FxContext {
        transition,
        now_ms: 1_700_000_000_000.0,
        rng,
    }
}
