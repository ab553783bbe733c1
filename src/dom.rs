use crate::style::{CANVAS_ID, CANVAS_STYLE};
use drift_core::{AppGate, BackgroundConfig, Viewport};
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Create the full-viewport canvas and insert it as the first child of `<body>`.
/// An existing `#cyber-bg` is reused.
pub fn create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(existing) = document.get_element_by_id(CANVAS_ID) {
        return existing
            .dyn_into::<web::HtmlCanvasElement>()
            .map_err(|_| anyhow::anyhow!("#{CANVAS_ID} is not a canvas"));
    }
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("create canvas: {:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|_| anyhow::anyhow!("created element is not a canvas"))?;
    canvas.set_id(CANVAS_ID);
    let style = canvas.style();
    for (name, value) in CANVAS_STYLE {
        _ = style.set_property(name, value);
    }
    let body = document.body().ok_or_else(|| anyhow::anyhow!("no body"))?;
    body.prepend_with_node_1(&canvas)
        .map_err(|e| anyhow::anyhow!("insert canvas: {:?}", e))?;
    Ok(canvas)
}

pub fn context_2d(
    canvas: &web::HtmlCanvasElement,
) -> anyhow::Result<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("get_context: {:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into::<web::CanvasRenderingContext2d>()
        .map_err(|_| anyhow::anyhow!("context is not 2d"))
}

/// Match the canvas backing store to the window and return the CSS-pixel viewport.
pub fn sync_canvas_size(canvas: &web::HtmlCanvasElement) -> Viewport {
    let Some(w) = web::window() else {
        return Viewport::new(canvas.width() as f32, canvas.height() as f32);
    };
    let css_w = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let css_h = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let dpr = w.device_pixel_ratio().max(1.0);
    canvas.set_width(((css_w * dpr) as u32).max(1));
    canvas.set_height(((css_h * dpr) as u32).max(1));
    Viewport::new(css_w as f32, css_h as f32)
}

/// Read-only view of the host page's application state object.
#[derive(Clone)]
pub struct AppStateHandle {
    obj: JsValue,
}

impl AppStateHandle {
    pub fn new(obj: JsValue) -> Self {
        Self { obj }
    }

    pub fn gate(&self) -> AppGate {
        if !self.obj.is_object() {
            return AppGate::default();
        }
        AppGate {
            has_started: self.flag("hasStarted"),
            is_demo_loaded: self.flag("isDemoLoaded"),
        }
    }

    fn flag(&self, key: &str) -> bool {
        js_sys::Reflect::get(&self.obj, &JsValue::from_str(key))
            .map(|v| v.is_truthy())
            .unwrap_or(false)
    }
}

/// Overlay `mouseRadius`, `triggerMargin`, `maxParticles` and `seed` from a
/// plain options object onto the defaults. Invalid results fall back to the
/// defaults with a warning.
pub fn parse_options(options: &js_sys::Object) -> BackgroundConfig {
    let defaults = BackgroundConfig::default();
    let mut config = defaults.clone();
    if let Some(v) = number(options, "mouseRadius") {
        config.mouse_radius = v as f32;
    }
    if let Some(v) = number(options, "triggerMargin") {
        config.trigger_margin = v as f32;
    }
    if let Some(v) = number(options, "maxParticles") {
        config.max_particles = if v > 0.0 { v as usize } else { 0 };
    }
    if let Some(v) = number(options, "seed") {
        config.seed = Some(v as u64);
    }
    match config.validate() {
        Ok(()) => config,
        Err(e) => {
            log::warn!("[init] ignoring options: {e}");
            defaults
        }
    }
}

fn number(obj: &js_sys::Object, key: &str) -> Option<f64> {
    js_sys::Reflect::get(obj, &JsValue::from_str(key))
        .ok()
        .and_then(|v| v.as_f64())
}
