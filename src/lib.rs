#![cfg(target_arch = "wasm32")]
use drift_core::{Background, BackgroundConfig};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;

mod constants;
pub mod dom;
mod events;
mod frame;
mod panel;
pub mod style;
pub mod surface;

pub use surface::CanvasSurface;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("signaldrift-web loaded");
    Ok(())
}

/// Mount the animated background behind the page.
///
/// `app_state` is any object exposing `hasStarted` / `isDemoLoaded`; it is
/// read on every pointer move and never written. `options` may override
/// `mouseRadius`, `triggerMargin`, `maxParticles` and `seed`.
///
/// Never throws: when the page cannot host a canvas the failure is logged and
/// the page runs without a background. A failed mount may be retried.
#[wasm_bindgen(js_name = initBackground)]
pub fn init_background(app_state: JsValue, options: Option<js_sys::Object>) {
    static STARTED: AtomicBool = AtomicBool::new(false);
    if STARTED.load(Ordering::SeqCst) {
        log::warn!("initBackground called twice; ignoring");
        return;
    }
    match init(app_state, options) {
        Ok(()) => STARTED.store(true, Ordering::SeqCst),
        Err(e) => log::error!("init error, running without background: {:?}", e),
    }
}

fn init(app_state: JsValue, options: Option<js_sys::Object>) -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas = dom::create_canvas(&document)?;
    let ctx = dom::context_2d(&canvas)?;
    let viewport = dom::sync_canvas_size(&canvas);

    let config = options
        .as_ref()
        .map(dom::parse_options)
        .unwrap_or_else(BackgroundConfig::default);
    let bg = Background::new(config, viewport)?;
    log::info!(
        "[init] {}x{} canvas, {} particles",
        viewport.width,
        viewport.height,
        bg.particles().len()
    );
    let bg = Rc::new(RefCell::new(bg));

    let panel = panel::Panel::find(&document);
    panel.install_transition();

    events::wire_resize(bg.clone(), canvas.clone());
    events::wire_pointer(bg.clone(), dom::AppStateHandle::new(app_state), panel.clone());
    events::wire_keydown(bg.clone(), panel);

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext::new(
        bg,
        CanvasSurface::new(ctx),
    )));
    frame::start_loop(frame_ctx);
    Ok(())
}
