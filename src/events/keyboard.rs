use super::keys::{intent_for_key, KeyIntent};
use crate::panel::Panel;
use drift_core::Background;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn handle_keydown(ev: &web::KeyboardEvent, bg: &Rc<RefCell<Background>>, panel: &Panel) {
    if let Some(KeyIntent::Exit) = intent_for_key(&ev.key()) {
        let change = bg.borrow_mut().escape();
        if let Some(change) = change {
            panel.apply(change);
        }
    }
}

pub fn wire_keydown(bg: Rc<RefCell<Background>>, panel: Panel) {
    if let Some(window) = web::window() {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
                handle_keydown(&ev, &bg, &panel);
            }) as Box<dyn FnMut(_)>);
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
