// Host-side tests for the canvas and panel style tables.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]

mod style {
    include!("../src/style.rs");
}
use style::*;

fn value<'a>(decls: &'a [(&str, &str)], name: &str) -> Option<&'a str> {
    decls.iter().find(|(n, _)| *n == name).map(|(_, v)| *v)
}

#[test]
fn canvas_sits_behind_the_page() {
    assert_eq!(value(CANVAS_STYLE, "position"), Some("fixed"));
    assert_eq!(value(CANVAS_STYLE, "z-index"), Some("-1"));
    assert_eq!(value(CANVAS_STYLE, "pointer-events"), Some("none"));
    assert_eq!(value(CANVAS_STYLE, "width"), Some("100%"));
    assert_eq!(value(CANVAS_STYLE, "height"), Some("100%"));
}

#[test]
fn hidden_panel_is_blurred_and_inert() {
    let d = panel_declarations(true);
    assert_eq!(value(d, "opacity"), Some("0"));
    assert_eq!(value(d, "pointer-events"), Some("none"));
    assert_eq!(value(d, "filter"), Some("blur(10px)"));
    assert_eq!(value(d, "transform"), Some("scale(0.95)"));
    assert_eq!(value(d, "visibility"), Some("hidden"));
}

#[test]
fn visible_panel_restores_every_hidden_property() {
    let hidden = panel_declarations(true);
    let visible = panel_declarations(false);
    for (name, _) in hidden {
        assert!(value(visible, name).is_some(), "{name} not restored");
    }
    assert_eq!(value(visible, "opacity"), Some("1"));
    assert_eq!(value(visible, "pointer-events"), Some("auto"));
    assert_eq!(value(visible, "filter"), Some("blur(0px)"));
    // visibility comes back before the fade starts
    assert_eq!(visible[0], ("visibility", "visible"));
}

#[test]
fn transition_covers_animated_properties() {
    for prop in ["opacity", "filter", "transform"] {
        assert!(PANEL_TRANSITION.contains(&format!("{prop} 0.8s")), "{prop}");
    }
}
