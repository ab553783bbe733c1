//! Chromatic effect: continuous rainbow hue cycling, triggered from the
//! bottom-right corner.
//!
//! Pointer interaction bends nodes with a smooth sinusoidal flow instead of
//! the default random static. Trails and connections are hue gradients,
//! nodes are circles with a glow while disturbed.

use super::{Effect, EffectKind, EffectPhase, FrameShared, FxContext, Link, PointerHit};
use crate::color::{Color, LinearGradient};
use crate::constants::LINK_JAG;
use crate::node::SignalNode;
use crate::surface::{trace_path, Surface};
use glam::Vec2;
use rand::Rng;

const HUE_DRIFT_PER_DEPTH: f32 = 2.5;
const POINTER_HUE_KICK: f32 = 15.0;
const FREAK_HUE_RATE: f64 = 0.5; // degrees per millisecond while disturbed
const FLOW_GAIN: f32 = 6.0;
const SPAWN_CHANCE: f64 = 0.25;
const SPAWN_DEPTH: f32 = 0.2;
const SATURATION: f32 = 100.0;
const LIGHTNESS: f32 = 65.0;
const LIGHTNESS_FREAK: f32 = 75.0;

#[derive(Debug, Default)]
pub struct ChromaticEffect;

#[inline]
fn cycled(hue: f32, now_ms: f64) -> f32 {
    ((hue as f64 + now_ms * FREAK_HUE_RATE) % 360.0) as f32
}

impl Effect for ChromaticEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Chromatic
    }

    fn modify_particle_update(&mut self, node: &mut SignalNode, _fx: &mut FxContext<'_>) {
        node.hue_offset += node.z * HUE_DRIFT_PER_DEPTH;
    }

    fn modify_mouse_interact(
        &mut self,
        node: &mut SignalNode,
        hit: PointerHit,
        fx: &mut FxContext<'_>,
    ) -> bool {
        let now = fx.now_ms;
        node.hue_offset += POINTER_HUE_KICK * hit.intensity;
        node.hue = ((node.hue as f64 + now * 0.1 * hit.intensity as f64) % 360.0) as f32;

        let force = hit.static_force * FLOW_GAIN;
        node.jitter = Vec2::new(
            (now * 0.005 + node.pos.y as f64 * 0.05).sin() as f32 * force,
            (now * 0.004 + node.pos.x as f64 * 0.05).cos() as f32 * force,
        );
        true
    }

    fn draw_trail(
        &mut self,
        surface: &mut dyn Surface,
        node: &SignalNode,
        fx: &mut FxContext<'_>,
    ) -> bool {
        let (Some(first), Some(last)) = (node.history.front(), node.history.back()) else {
            return true;
        };
        if node.history.len() <= 1 {
            return true;
        }
        let t = fx.transition;
        let opacity = node.opacity(t);
        let (first, last) = (*first, *last);

        let rng = &mut *fx.rng;
        let points = node.history.iter().enumerate().map(|(i, pt)| {
            if i > 0 && pt.freak {
                pt.pos + Vec2::new((rng.gen::<f32>() - 0.5) * 5.0, (rng.gen::<f32>() - 0.5) * 5.0)
            } else {
                pt.pos
            }
        });
        trace_path(surface, points);

        let mut h1 = first.hue;
        let mut h2 = last.hue;
        if first.intensity > 0.0 {
            h1 = cycled(h1, fx.now_ms);
        }
        if last.intensity > 0.0 {
            h2 = cycled(h2, fx.now_ms);
        }
        let grad = LinearGradient::between(
            first.pos,
            last.pos,
            Color::hsla(h1, SATURATION, LIGHTNESS, opacity * 0.55),
            Color::hsla(h2, SATURATION, LIGHTNESS, 0.0),
        );
        surface.set_stroke(&grad.into());
        surface.set_line_width((0.8 + t) * node.z * 0.75);
        surface.stroke();
        true
    }

    fn draw_node(
        &mut self,
        surface: &mut dyn Surface,
        node: &SignalNode,
        fx: &mut FxContext<'_>,
    ) -> bool {
        let t = fx.transition;
        let opacity = node.opacity(t);
        let size = node.size(t);

        if node.freaking_out {
            let hue = cycled(node.hue, fx.now_ms);
            surface.set_fill_color(Color::hsla(hue, SATURATION, LIGHTNESS, opacity));
            surface.fill_circle(node.draw, size * 2.0);
            surface.set_fill_color(Color::hsla(hue, SATURATION, LIGHTNESS, opacity * 0.3));
            surface.fill_circle(node.draw, size * 3.5);
        } else {
            surface.set_fill_color(Color::hsla(node.hue, SATURATION, LIGHTNESS, opacity));
            surface.fill_circle(node.draw, size * 0.8);
        }
        true
    }

    fn draw_connection(
        &mut self,
        surface: &mut dyn Surface,
        link: &Link<'_>,
        fx: &mut FxContext<'_>,
    ) -> bool {
        let (a, b) = (link.a.draw, link.b.draw);
        surface.begin_path();
        if link.freaking {
            let alpha = link.opacity * 2.0;
            let grad = LinearGradient::between(
                a,
                b,
                Color::hsla(cycled(link.a.hue, fx.now_ms), SATURATION, LIGHTNESS_FREAK, alpha),
                Color::hsla(cycled(link.b.hue, fx.now_ms), SATURATION, LIGHTNESS_FREAK, alpha),
            );
            surface.set_stroke(&grad.into());
            surface.set_line_width(3.5);
            let mid = (a + b) / 2.0
                + Vec2::new(
                    (fx.rng.gen::<f32>() - 0.5) * LINK_JAG,
                    (fx.rng.gen::<f32>() - 0.5) * LINK_JAG,
                );
            surface.move_to(a.x, a.y);
            surface.line_to(mid.x, mid.y);
            surface.line_to(b.x, b.y);
        } else {
            let grad = LinearGradient::between(
                a,
                b,
                Color::hsla(link.a.hue, SATURATION, LIGHTNESS, link.opacity),
                Color::hsla(link.b.hue, SATURATION, LIGHTNESS, link.opacity),
            );
            surface.set_stroke(&grad.into());
            surface.set_line_width(1.2 * (0.7 + fx.transition * 0.4));
            surface.move_to(a.x, a.y);
            surface.line_to(b.x, b.y);
        }
        surface.stroke();
        true
    }

    fn on_frame(&mut self, _surface: &mut dyn Surface, shared: &mut FrameShared<'_>) {
        if shared.phase != EffectPhase::Active {
            return;
        }
        if shared.rng.gen_bool(SPAWN_CHANCE) {
            let center = shared.center;
            let half = Vec2::new(shared.viewport.width, shared.viewport.height) / 2.0;
            shared.spawn(|node, rng| {
                node.pos = center
                    + Vec2::new(
                        (rng.gen::<f32>() - 0.5) * half.x,
                        (rng.gen::<f32>() - 0.5) * half.y,
                    );
                node.screen = node.pos;
                node.draw = node.pos;
                node.z = SPAWN_DEPTH;
            });
        }
    }
}
