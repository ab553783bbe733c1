use drift_core::{LinearGradient, Paint, Surface};
use wasm_bindgen::JsValue;
use web_sys as web;

/// `Surface` over a Canvas2D context. Coordinates arrive in CSS pixels and
/// are scaled to the backing store on every `clear`.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &web::CanvasRenderingContext2d {
        &self.ctx
    }

    fn gradient(&self, g: &LinearGradient) -> web::CanvasGradient {
        let grad = self.ctx.create_linear_gradient(
            g.from.x as f64,
            g.from.y as f64,
            g.to.x as f64,
            g.to.y as f64,
        );
        for stop in &g.stops {
            _ = grad.add_color_stop(stop.offset.clamp(0.0, 1.0), &stop.color.to_string());
        }
        grad
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        let scale = match self.ctx.canvas() {
            Some(c) if width > 0.0 => c.width() as f64 / width as f64,
            _ => 1.0,
        };
        _ = self.ctx.set_transform(scale, 0.0, 0.0, scale, 0.0, 0.0);
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f32, y: f32) {
        _ = self.ctx.translate(x as f64, y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        _ = self.ctx.rotate(radians as f64);
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha.clamp(0.0, 1.0) as f64);
    }

    fn set_fill(&mut self, paint: &Paint) {
        match paint {
            Paint::Solid(c) => self.ctx.set_fill_style_str(&c.to_string()),
            Paint::Linear(g) => {
                let grad = self.gradient(g);
                self.ctx.set_fill_style_canvas_gradient(&grad);
            }
        }
    }

    fn set_stroke(&mut self, paint: &Paint) {
        match paint {
            Paint::Solid(c) => self.ctx.set_stroke_style_str(&c.to_string()),
            Paint::Linear(g) => {
                let grad = self.gradient(g);
                self.ctx.set_stroke_style_canvas_gradient(&grad);
            }
        }
    }

    fn set_line_width(&mut self, width: f32) {
        self.ctx.set_line_width(width as f64);
    }

    fn set_line_dash(&mut self, segments: &[f32]) {
        let arr = js_sys::Array::new();
        for s in segments {
            arr.push(&JsValue::from_f64(*s as f64));
        }
        _ = self.ctx.set_line_dash(&arr);
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.ctx.move_to(x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.ctx.line_to(x as f64, y as f64);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        // negative radii throw IndexSizeError
        _ = self.ctx.arc(
            x as f64,
            y as f64,
            radius.max(0.0) as f64,
            start as f64,
            end as f64,
        );
    }

    fn close_path(&mut self) {
        self.ctx.close_path();
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.ctx.stroke_rect(x as f64, y as f64, w as f64, h as f64);
    }
}
