// CSS declarations applied to the background canvas and the companion panel.
// Kept free of web-sys so the tables can be checked on the host.

pub const CANVAS_ID: &str = "cyber-bg";
pub const PANEL_ID: &str = "app";

/// Full viewport, behind all content, invisible to hit-testing.
pub const CANVAS_STYLE: &[(&str, &str)] = &[
    ("position", "fixed"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("z-index", "-1"),
    ("pointer-events", "none"),
    ("opacity", "1"),
];

pub const PANEL_TRANSITION: &str = "opacity 0.8s cubic-bezier(0.4, 0, 0.2, 1), \
     filter 0.8s cubic-bezier(0.4, 0, 0.2, 1), \
     transform 0.8s cubic-bezier(0.4, 0, 0.2, 1)";

const PANEL_HIDDEN: &[(&str, &str)] = &[
    ("opacity", "0"),
    ("pointer-events", "none"),
    ("filter", "blur(10px)"),
    ("transform", "scale(0.95)"),
    ("visibility", "hidden"),
];

const PANEL_VISIBLE: &[(&str, &str)] = &[
    ("visibility", "visible"),
    ("opacity", "1"),
    ("pointer-events", "auto"),
    ("filter", "blur(0px)"),
    ("transform", "scale(1)"),
];

/// Declarations for the panel while an effect is (or is not) active.
#[inline]
pub fn panel_declarations(hidden: bool) -> &'static [(&'static str, &'static str)] {
    if hidden {
        PANEL_HIDDEN
    } else {
        PANEL_VISIBLE
    }
}
