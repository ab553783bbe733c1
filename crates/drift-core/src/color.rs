//! Colors and paints expressed independently of the drawing backend.
//!
//! `Color` renders to a CSS color string through `Display`, which is what the
//! Canvas2D backend consumes. Alpha is clamped on output so effects can scale
//! opacities freely (e.g. `opacity * 1.8`) without producing invalid CSS.

use glam::Vec2;
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn alpha(self, a: f32) -> Color {
        Color::Rgba(self, a)
    }

    /// Channel-wise average, rounding down.
    #[inline]
    pub fn mix(self, other: Rgb) -> Rgb {
        Rgb::new(
            ((self.r as u16 + other.r as u16) >> 1) as u8,
            ((self.g as u16 + other.g as u16) >> 1) as u8,
            ((self.b as u16 + other.b as u16) >> 1) as u8,
        )
    }

    #[inline]
    pub fn red_only(self) -> Rgb {
        Rgb::new(self.r, 0, 0)
    }

    #[inline]
    pub fn blue_only(self) -> Rgb {
        Rgb::new(0, 0, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Rgba(Rgb, f32),
    Hsla { h: f32, s: f32, l: f32, a: f32 },
}

impl Color {
    pub const WHITE: Color = Color::Rgba(Rgb::new(255, 255, 255), 1.0);

    #[inline]
    pub fn hsla(h: f32, s: f32, l: f32, a: f32) -> Color {
        Color::Hsla { h, s, l, a }
    }

    #[inline]
    pub fn white(a: f32) -> Color {
        Color::Rgba(Rgb::new(255, 255, 255), a)
    }

    #[inline]
    pub fn black(a: f32) -> Color {
        Color::Rgba(Rgb::new(0, 0, 0), a)
    }
}

#[inline]
fn css_alpha(a: f32) -> f32 {
    if a.is_finite() {
        a.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Color::Rgba(c, a) => write!(f, "rgba({}, {}, {}, {:.3})", c.r, c.g, c.b, css_alpha(a)),
            Color::Hsla { h, s, l, a } => write!(
                f,
                "hsla({:.1}, {:.0}%, {:.0}%, {:.3})",
                h.rem_euclid(360.0),
                s,
                l,
                css_alpha(a)
            ),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    pub offset: f32,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinearGradient {
    pub from: Vec2,
    pub to: Vec2,
    pub stops: SmallVec<[ColorStop; 3]>,
}

impl LinearGradient {
    pub fn new(from: Vec2, to: Vec2) -> Self {
        Self {
            from,
            to,
            stops: SmallVec::new(),
        }
    }

    pub fn stop(mut self, offset: f32, color: Color) -> Self {
        self.stops.push(ColorStop { offset, color });
        self
    }

    /// Two-stop gradient from `a` at the start to `b` at the end.
    pub fn between(from: Vec2, to: Vec2, a: Color, b: Color) -> Self {
        Self::new(from, to).stop(0.0, a).stop(1.0, b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    Linear(LinearGradient),
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl From<LinearGradient> for Paint {
    fn from(g: LinearGradient) -> Self {
        Paint::Linear(g)
    }
}
