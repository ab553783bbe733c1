use crate::constants::{SLOW_FRAME_MS, SLOW_FRAME_REPORT_SECS};
use crate::surface::CanvasSurface;
use drift_core::Background;
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub background: Rc<RefCell<Background>>,
    pub surface: CanvasSurface,
    slow_frames: u32,
    last_report: Option<Instant>,
}

impl FrameContext {
    pub fn new(background: Rc<RefCell<Background>>, surface: CanvasSurface) -> Self {
        Self {
            background,
            surface,
            slow_frames: 0,
            last_report: None,
        }
    }

    pub fn frame(&mut self) {
        let started = Instant::now();
        let now_ms = js_sys::Date::now();
        let particles = {
            let mut bg = self.background.borrow_mut();
            bg.frame(&mut self.surface, now_ms);
            bg.particles().len()
        };

        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
        if elapsed_ms > SLOW_FRAME_MS {
            self.slow_frames += 1;
            let due = self
                .last_report
                .map_or(true, |t| t.elapsed() >= Duration::from_secs(SLOW_FRAME_REPORT_SECS));
            if due {
                log::warn!(
                    "[frame] {:.1} ms with {} particles ({} slow frames)",
                    elapsed_ms,
                    particles,
                    self.slow_frames
                );
                self.slow_frames = 0;
                self.last_report = Some(Instant::now());
            }
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx.borrow_mut().frame();
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
