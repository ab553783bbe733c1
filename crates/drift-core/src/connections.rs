//! Pairwise connections between nearby nodes.
//!
//! Every unordered pair is tested each frame, so the cost is O(n²) in the
//! population. The baseline population scales with the viewport area (one
//! node per [`crate::constants::AREA_PER_PARTICLE`] px², uncapped) and only
//! effect spawns are bounded by [`crate::constants::MAX_PARTICLES`], so a 4K
//! viewport means well over a thousand nodes and roughly a million pair tests
//! per frame. A spatial index behind [`for_each_link`] would remove that cost.

use crate::color::Color;
use crate::constants::*;
use crate::effects::Link;
use crate::node::SignalNode;
use crate::surface::Surface;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

/// Link reach at the given transition.
#[inline]
pub fn max_link_distance(transition: f32) -> f32 {
    LINK_BASE_DIST + transition * LINK_DIST_BOOST
}

/// Visit every eligible pair `i < j`: draw positions closer than
/// [`max_link_distance`] and depths differing by less than
/// [`LINK_MAX_DEPTH_DIFF`]. Pairs whose distance is not finite are skipped.
pub fn for_each_link<'a>(nodes: &'a [SignalNode], transition: f32, mut visit: impl FnMut(Link<'a>)) {
    let max_dist = max_link_distance(transition);
    let opacity_scale = LINK_BASE_OPACITY + transition * LINK_OPACITY_BOOST;

    for (i, a) in nodes.iter().enumerate() {
        for b in &nodes[i + 1..] {
            let distance = a.draw.distance(b.draw);
            if !distance.is_finite() {
                continue;
            }
            if distance >= max_dist || (a.z - b.z).abs() >= LINK_MAX_DEPTH_DIFF {
                continue;
            }
            visit(Link {
                a,
                b,
                distance,
                max_dist,
                opacity: (1.0 - distance / max_dist) * opacity_scale,
                freaking: a.freaking_out || b.freaking_out,
            });
        }
    }
}

/// Straight translucent line in the first node's accent colour, or a bright
/// jagged two-segment line when either end is reacting to the pointer.
pub fn draw_connection_default(
    surface: &mut dyn Surface,
    link: &Link<'_>,
    transition: f32,
    rng: &mut StdRng,
) {
    let (a, b) = (link.a.draw, link.b.draw);
    surface.begin_path();
    if link.freaking {
        surface.set_stroke_color(Color::white(link.opacity * 1.8));
        surface.set_line_width(2.0);
        let mid = (a + b) / 2.0
            + Vec2::new(
                (rng.gen::<f32>() - 0.5) * LINK_JAG,
                (rng.gen::<f32>() - 0.5) * LINK_JAG,
            );
        surface.move_to(a.x, a.y);
        surface.line_to(mid.x, mid.y);
        surface.line_to(b.x, b.y);
    } else {
        surface.set_stroke_color(link.a.accent.alpha(link.opacity));
        surface.set_line_width(0.6 * (0.7 + transition * 0.4));
        surface.move_to(a.x, a.y);
        surface.line_to(b.x, b.y);
    }
    surface.stroke();
}
