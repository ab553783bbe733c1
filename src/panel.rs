use crate::style::{panel_declarations, PANEL_ID, PANEL_TRANSITION};
use drift_core::ActivationChange;
use wasm_bindgen::JsCast;
use web_sys as web;

/// The page's main content panel. A page without `#app` simply gets no
/// show/hide behaviour.
#[derive(Clone)]
pub struct Panel {
    el: Option<web::HtmlElement>,
}

impl Panel {
    pub fn find(document: &web::Document) -> Self {
        let el = document
            .get_element_by_id(PANEL_ID)
            .and_then(|e| e.dyn_into::<web::HtmlElement>().ok());
        if el.is_none() {
            log::debug!("[panel] #{PANEL_ID} not found");
        }
        Self { el }
    }

    pub fn install_transition(&self) {
        if let Some(el) = &self.el {
            _ = el.style().set_property("transition", PANEL_TRANSITION);
        }
    }

    pub fn apply(&self, change: ActivationChange) {
        let Some(el) = &self.el else { return };
        let style = el.style();
        for (name, value) in panel_declarations(change.panel_hidden()) {
            _ = style.set_property(name, value);
        }
    }
}
