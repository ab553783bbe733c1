use crate::dom::{self, AppStateHandle};
use crate::panel::Panel;
use drift_core::Background;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_pointer(bg: Rc<RefCell<Background>>, app_state: AppStateHandle, panel: Panel) {
    let Some(window) = web::window() else { return };

    {
        let bg = bg.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            let pos = Vec2::new(ev.client_x() as f32, ev.client_y() as f32);
            // release the engine before touching the DOM
            let change = bg.borrow_mut().pointer_moved(pos, app_state.gate());
            if let Some(change) = change {
                panel.apply(change);
            }
        }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    // `mouseout` with no related target means the pointer left the window
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if ev.related_target().is_none() {
            bg.borrow_mut().pointer_left();
        }
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref());
    closure.forget();
}

pub fn wire_resize(bg: Rc<RefCell<Background>>, canvas: web::HtmlCanvasElement) {
    if let Some(window) = web::window() {
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move || {
            let viewport = dom::sync_canvas_size(&canvas);
            bg.borrow_mut().resize(viewport);
        }) as Box<dyn FnMut()>);
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
