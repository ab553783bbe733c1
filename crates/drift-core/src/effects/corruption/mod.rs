//! Data-corruption effect, triggered from the top-right corner.
//!
//! A machine reconstructing photo data while the pointer acts as
//! interference. Nodes become rotating coloured pixel shapes at pseudo-3D
//! depths, and four private subsystems run alongside the field:
//!
//! - pixel blocks drifting upward, corrupted (RGB split) near the pointer;
//! - glitch fragments ejected from heavily disturbed nodes;
//! - data streams crossing the canvas;
//! - a decaying noise grid that warps scanlines and accumulates static grain.
//!
//! All of it is torn down once the transition falls below
//! [`TEARDOWN_EPSILON`], so nothing leaks into the next activation.

pub mod blocks;
pub mod fragments;
pub mod noise;
pub mod streams;

pub use blocks::{PixelBlock, MAX_PIXEL_BLOCKS};
pub use fragments::{GlitchFragment, MAX_GLITCH_FRAGMENTS};
pub use noise::{NoiseGrid, NOISE_CELL};
pub use streams::{DataStream, Orientation, MAX_DATA_STREAMS, STREAM_SPAWN_INTERVAL};

use super::{Effect, EffectKind, EffectPhase, EffectState, FrameShared, FxContext, Link, PointerHit};
use crate::color::{Color, Rgb};
use crate::constants::TEARDOWN_EPSILON;
use crate::node::SignalNode;
use crate::surface::{trace_path, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::f32::consts::{FRAC_PI_4, TAU};

pub const PHOTO_COLORS: [Rgb; 15] = [
    Rgb::new(255, 87, 51),   // coral red
    Rgb::new(255, 195, 0),   // golden yellow
    Rgb::new(0, 200, 83),    // vivid green
    Rgb::new(0, 176, 255),   // sky blue
    Rgb::new(156, 39, 176),  // deep purple
    Rgb::new(255, 64, 129),  // hot pink
    Rgb::new(0, 230, 180),   // turquoise
    Rgb::new(255, 145, 77),  // tangerine
    Rgb::new(100, 120, 255), // periwinkle
    Rgb::new(230, 230, 230), // near white
    Rgb::new(255, 82, 82),   // bright red
    Rgb::new(38, 166, 154),  // teal
    Rgb::new(255, 215, 140), // cream
    Rgb::new(120, 200, 120), // soft green
    Rgb::new(200, 150, 255), // lavender
];

/// Link depth gate, stricter than the engine default.
pub const LINK_MAX_DEPTH_DIFF: f32 = 0.35;

const NEUTRAL_COLOR: Rgb = Rgb::new(180, 190, 200);
const NODE_NOISE_DECAY: f32 = 0.97;
const NODE_NOISE_GAIN: f32 = 0.35;
const ROTATION_SPEED: f32 = 0.003;
const PARALLAX_GAIN: f32 = 0.06;
const FRAGMENT_CHANCE: f32 = 0.12;
const NODE_FLASH_FRAMES: u8 = 3;
const SPAWN_CHANCE: f32 = 0.12;
const SCANLINE_SPACING: f32 = 40.0;
const SCANLINE_WARP: f32 = 15.0;
const RING_SEGMENTS: usize = 8;

#[inline]
pub(crate) fn random_photo_color(rng: &mut StdRng) -> Rgb {
    PHOTO_COLORS[rng.gen_range(0..PHOTO_COLORS.len())]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
    Rect,
    Triangle,
    Diamond,
    Cross,
}

impl NodeShape {
    const ALL: [NodeShape; 4] = [
        NodeShape::Rect,
        NodeShape::Triangle,
        NodeShape::Diamond,
        NodeShape::Cross,
    ];

    /// Fill the shape centred on the current origin, shifted by `offset`.
    fn fill(self, surface: &mut dyn Surface, bw: f32, bh: f32, offset: f32) {
        let o = Vec2::splat(offset);
        match self {
            NodeShape::Rect => surface.fill_rect(-bw / 2.0 + o.x, -bh / 2.0 + o.y, bw, bh),
            NodeShape::Triangle => {
                let pts = [
                    Vec2::new(0.0, -bh),
                    Vec2::new(bw * 0.8, bh * 0.6),
                    Vec2::new(-bw * 0.8, bh * 0.6),
                ];
                trace_path(surface, pts.into_iter().map(|p| p + o));
                surface.close_path();
                surface.fill();
            }
            NodeShape::Diamond => {
                let pts = [
                    Vec2::new(0.0, -bh),
                    Vec2::new(bw, 0.0),
                    Vec2::new(0.0, bh),
                    Vec2::new(-bw, 0.0),
                ];
                trace_path(surface, pts.into_iter().map(|p| p + o));
                surface.close_path();
                surface.fill();
            }
            NodeShape::Cross => {
                let cw = bw * 0.35;
                surface.fill_rect(-cw / 2.0 + o.x, -bh + o.y, cw, bh * 2.0);
                surface.fill_rect(-bw + o.x, -cw / 2.0 + o.y, bw * 2.0, cw);
            }
        }
    }
}

/// Per-node state owned by the corruption effect.
#[derive(Clone, Debug, PartialEq)]
pub struct CorruptionNodeState {
    pub photo_color: Rgb,
    pub noise: f32,
    /// Pseudo-3D depth in [0.3, 1.0], independent of the node's `z`.
    pub depth: f32,
    pub rotation: f32,
    pub shape: NodeShape,
    pub block: Vec2,
}

impl CorruptionNodeState {
    fn random(rng: &mut StdRng) -> Self {
        Self {
            photo_color: random_photo_color(rng),
            noise: 0.0,
            depth: 0.3 + rng.gen::<f32>() * 0.7,
            rotation: rng.gen::<f32>() * TAU,
            shape: NodeShape::ALL[rng.gen_range(0..NodeShape::ALL.len())],
            block: Vec2::new(1.5 + rng.gen::<f32>() * 3.0, 1.5 + rng.gen::<f32>() * 3.0),
        }
    }

    /// Stand-in for nodes that have not been touched by the update hook yet.
    fn neutral() -> Self {
        Self {
            photo_color: NEUTRAL_COLOR,
            noise: 0.0,
            depth: 0.5,
            rotation: 0.0,
            shape: NodeShape::Rect,
            block: Vec2::splat(2.0),
        }
    }

    pub fn of(node: &SignalNode) -> Option<&CorruptionNodeState> {
        match &node.effect_state {
            Some(EffectState::Corruption(s)) => Some(s),
            None => None,
        }
    }

    fn of_mut<'n>(node: &'n mut SignalNode, rng: &mut StdRng) -> &'n mut CorruptionNodeState {
        let state = node
            .effect_state
            .get_or_insert_with(|| EffectState::Corruption(CorruptionNodeState::random(rng)));
        match state {
            EffectState::Corruption(s) => s,
        }
    }
}

/// Colour with per-channel noise shifts; unchanged at zero noise.
fn corrupted(base: Rgb, noise: f32, rng: &mut StdRng) -> Rgb {
    let n = noise.min(1.0);
    let mut channel = |v: u8, amount: f32| {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -0.5 };
        (v as f32 + n * amount * sign).clamp(0.0, 255.0) as u8
    };
    Rgb::new(channel(base.r, 80.0), channel(base.g, 60.0), channel(base.b, 80.0))
}

#[derive(Debug, Default)]
pub struct CorruptionEffect {
    frame: u64,
    blocks: Vec<PixelBlock>,
    fragments: Vec<GlitchFragment>,
    streams: Vec<DataStream>,
    noise: NoiseGrid,
}

impl CorruptionEffect {
    pub fn pixel_blocks(&self) -> &[PixelBlock] {
        &self.blocks
    }

    pub fn fragments(&self) -> &[GlitchFragment] {
        &self.fragments
    }

    pub fn streams(&self) -> &[DataStream] {
        &self.streams
    }

    pub fn noise(&self) -> &NoiseGrid {
        &self.noise
    }

    /// No auxiliary state left and the noise grid is flat.
    pub fn is_clear(&self) -> bool {
        self.blocks.is_empty()
            && self.fragments.is_empty()
            && self.streams.is_empty()
            && self.noise.is_clear()
    }

    fn draw_scanlines(&self, surface: &mut dyn Surface, width: f32, height: f32, t: f32) {
        surface.set_stroke_color(Color::Rgba(Rgb::new(120, 160, 200), 0.025 * t));
        surface.set_line_width(0.3);

        let mut y = 0.0;
        while y < height {
            let warp = self.noise.row_warp(y) * SCANLINE_WARP;
            surface.begin_path();
            surface.move_to(0.0, y + warp);
            surface.line_to(width, y - warp);
            surface.stroke();
            y += SCANLINE_SPACING;
        }

        let mut x = 0.0;
        while x < width {
            surface.begin_path();
            surface.move_to(x, 0.0);
            surface.line_to(x, height);
            surface.stroke();
            x += SCANLINE_SPACING * 2.0;
        }
    }

    fn draw_ring(&self, surface: &mut dyn Surface, center: Vec2, t: f32) {
        let frame = self.frame as f32;
        let radius = 35.0 + (frame * 0.02).sin() * 5.0;
        let rot = frame * 0.008;
        let seg = TAU / RING_SEGMENTS as f32;
        let gap = 0.15;

        surface.save();
        surface.translate(center.x, center.y);
        for i in 0..RING_SEGMENTS {
            let a = rot + seg * i as f32;
            surface.begin_path();
            surface.arc(0.0, 0.0, radius, a + gap, a + seg - gap);
            surface.set_stroke_color(PHOTO_COLORS[i % PHOTO_COLORS.len()].alpha(0.06 * t));
            surface.set_line_width(1.5);
            surface.stroke();
        }
        surface.restore();
    }
}

impl Effect for CorruptionEffect {
    fn kind(&self) -> EffectKind {
        EffectKind::Corruption
    }

    fn modify_particle_update(&mut self, node: &mut SignalNode, fx: &mut FxContext<'_>) {
        let depth = {
            let s = CorruptionNodeState::of_mut(node, fx.rng);
            s.rotation += ROTATION_SPEED * (1.0 + s.noise * 8.0);
            s.noise *= NODE_NOISE_DECAY;
            s.depth
        };
        let parallax = (depth - 0.5) * fx.transition * PARALLAX_GAIN;
        node.screen += (node.screen - node.pos) * parallax;
    }

    fn modify_mouse_interact(
        &mut self,
        node: &mut SignalNode,
        hit: PointerHit,
        fx: &mut FxContext<'_>,
    ) -> bool {
        let (noise, color) = {
            let s = CorruptionNodeState::of_mut(node, fx.rng);
            s.noise = (s.noise + hit.intensity * NODE_NOISE_GAIN).min(1.0);
            (s.noise, s.photo_color)
        };

        // sharp displacement along one of eight directions
        let angle = fx.rng.gen_range(0..8) as f32 * FRAC_PI_4;
        let force = hit.static_force * (1.0 + noise * 2.0);
        node.jitter = Vec2::new(angle.cos(), angle.sin()) * force;
        node.flash = NODE_FLASH_FRAMES;

        if fx.rng.gen::<f32>() < hit.intensity * FRAGMENT_CHANCE
            && self.fragments.len() < MAX_GLITCH_FRAGMENTS
        {
            self.fragments
                .push(GlitchFragment::spawn(node.draw, color, fx.rng));
        }
        true
    }

    fn draw_trail(
        &mut self,
        surface: &mut dyn Surface,
        node: &SignalNode,
        fx: &mut FxContext<'_>,
    ) -> bool {
        if node.history.len() <= 2 {
            return true;
        }
        let neutral = CorruptionNodeState::neutral();
        let s = CorruptionNodeState::of(node).unwrap_or(&neutral);
        let n = s.noise;
        let base_alpha = (0.1 + s.depth * 0.15 + n * 0.15) * fx.transition;
        let points = || node.history.iter().map(|pt| pt.pos);

        trace_path(surface, points());
        surface.set_stroke_color(s.photo_color.alpha(base_alpha * 0.5));
        surface.set_line_width((0.4 + n * 1.2) * s.depth);
        surface.stroke();

        // chromatic ghost trails when corrupted
        if n > 0.1 && node.history.len() > 3 {
            let shift = Vec2::new(n * 4.0, 0.0);
            surface.set_line_width(0.5);

            trace_path(surface, points().map(|p| p + shift));
            surface.set_stroke_color(s.photo_color.red_only().alpha(base_alpha * 0.25 * n));
            surface.stroke();

            trace_path(surface, points().map(|p| p - shift));
            surface.set_stroke_color(s.photo_color.blue_only().alpha(base_alpha * 0.25 * n));
            surface.stroke();
        }
        true
    }

    fn draw_node(
        &mut self,
        surface: &mut dyn Surface,
        node: &SignalNode,
        fx: &mut FxContext<'_>,
    ) -> bool {
        if !node.draw.is_finite() {
            return true;
        }
        let t = fx.transition;
        let neutral = CorruptionNodeState::neutral();
        let s = CorruptionNodeState::of(node).unwrap_or(&neutral);
        let n = s.noise;
        let base_alpha = (0.2 + s.depth * 0.4 + n * 0.3) * t;
        let scale = 0.8 + s.depth * 0.8 + t * 0.5 + n * 0.8;
        let bw = s.block.x * scale;
        let bh = s.block.y * scale;

        surface.save();
        surface.translate(node.draw.x, node.draw.y);
        surface.rotate(s.rotation);

        // drop shadow for depth, solid shapes only
        if s.depth > 0.4 && matches!(s.shape, NodeShape::Rect | NodeShape::Diamond) {
            surface.set_fill_color(Color::black(0.1 * s.depth * t));
            s.shape.fill(surface, bw, bh, s.depth * 3.0);
        }

        let col = corrupted(s.photo_color, n, fx.rng);
        surface.set_fill_color(col.alpha(base_alpha));
        s.shape.fill(surface, bw, bh, 0.0);

        // RGB channel split at high noise
        if n > 0.25 {
            let shift = n * 4.0;
            surface.set_global_alpha(n * 0.4 * t);
            surface.set_fill_color(s.photo_color.red_only().alpha(0.6));
            surface.fill_rect(-bw / 2.0 + shift, -bh / 2.0, bw, bh);
            surface.set_fill_color(s.photo_color.blue_only().alpha(0.6));
            surface.fill_rect(-bw / 2.0 - shift, -bh / 2.0, bw, bh);
            surface.set_global_alpha(1.0);
        }

        if node.flash > 0 {
            surface.set_fill_color(Color::white(0.6 * t));
            surface.fill_rect(-bw / 2.0 - 1.0, -bh / 2.0 - 1.0, bw + 2.0, bh + 2.0);
        }

        surface.restore();
        true
    }

    fn draw_connection(
        &mut self,
        surface: &mut dyn Surface,
        link: &Link<'_>,
        _fx: &mut FxContext<'_>,
    ) -> bool {
        let neutral = CorruptionNodeState::neutral();
        let s1 = CorruptionNodeState::of(link.a).unwrap_or(&neutral);
        let s2 = CorruptionNodeState::of(link.b).unwrap_or(&neutral);

        // only connect nodes at similar depths
        if (s1.depth - s2.depth).abs() >= LINK_MAX_DEPTH_DIFF {
            return true;
        }

        let avg_depth = (s1.depth + s2.depth) / 2.0;
        let depth_fade = avg_depth * 0.6;
        let avg_noise = (s1.noise + s2.noise) / 2.0;
        let color = s1.photo_color.mix(s2.photo_color);
        let (a, b) = (link.a.draw, link.b.draw);

        surface.save();
        if link.freaking {
            // stepped data-bus path: alternate horizontal and vertical runs
            let segs = 3 + (avg_noise * 5.0).floor() as usize;
            let d = b - a;
            let step = 1.0 / segs as f32;
            surface.begin_path();
            surface.move_to(a.x, a.y);
            for i in 1..segs {
                let t = i as f32 / segs as f32;
                let p = if i % 2 == 1 {
                    a + d * Vec2::new(t, t - step)
                } else {
                    a + d * Vec2::new(t - step, t)
                };
                surface.line_to(p.x, p.y);
            }
            surface.line_to(b.x, b.y);
            surface.set_stroke_color(color.alpha(link.opacity * depth_fade * 2.0));
            surface.set_line_width(1.0 + avg_noise * 2.0);
            surface.stroke();
        } else {
            surface.set_line_dash(&[1.0, 4.0 + (1.0 - avg_depth) * 4.0]);
            surface.begin_path();
            surface.move_to(a.x, a.y);
            surface.line_to(b.x, b.y);
            surface.set_stroke_color(color.alpha(link.opacity * depth_fade * 0.5));
            surface.set_line_width(0.4 + avg_depth * 0.3);
            surface.stroke();
            surface.set_line_dash(&[]);
        }
        surface.restore();
        true
    }

    fn on_frame(&mut self, surface: &mut dyn Surface, shared: &mut FrameShared<'_>) {
        self.frame = self.frame.wrapping_add(1);
        let t = shared.transition;
        let vp = shared.viewport;
        let pointer = shared.pointer.filter(|p| p.x > 0.0 && p.y > 0.0);

        self.noise.fit(&vp);
        self.noise.decay();
        if let Some(p) = pointer {
            self.noise.deposit(p);
        }

        if t > 0.1 {
            self.draw_scanlines(surface, vp.width, vp.height, t);
        }
        if t > 0.2 {
            self.noise.draw_grain(surface, t, shared.rng);
        }

        // pixel blocks follow the transition: more of them as it ramps up
        let target = MAX_PIXEL_BLOCKS as f32 * t;
        while (self.blocks.len() as f32) < target {
            self.blocks.push(PixelBlock::spawn(&vp, shared.rng));
        }
        for block in &mut self.blocks {
            block.update(&vp, t, shared.rng);
            if let Some(p) = pointer {
                block.disturb(p);
            }
            block.draw(surface, t);
        }
        while self.blocks.len() as f32 > target + 1.0 {
            self.blocks.pop();
        }

        if t > 0.2
            && self.frame % STREAM_SPAWN_INTERVAL == 0
            && self.streams.len() < MAX_DATA_STREAMS
        {
            self.streams.push(DataStream::spawn(&vp, shared.rng));
        }
        for stream in &mut self.streams {
            stream.update(&vp);
            stream.draw(surface, t);
        }
        self.streams.retain(|s| s.alive);

        for frag in &mut self.fragments {
            frag.update();
            frag.draw(surface, t);
        }
        self.fragments.retain(|f| !f.is_dead());

        if t > 0.3 {
            self.draw_ring(surface, shared.center, t);
        }

        if shared.phase == EffectPhase::Active && shared.rng.gen::<f32>() < SPAWN_CHANCE * t {
            shared.spawn(|node, rng| {
                node.pos = Vec2::new(rng.gen::<f32>() * vp.width, rng.gen::<f32>() * vp.height);
                node.screen = node.pos;
                node.draw = node.pos;
                node.z = 0.3 + rng.gen::<f32>() * 0.5;
            });
        }

        if t < TEARDOWN_EPSILON {
            self.teardown(&mut shared.particles[..]);
        }
    }

    fn teardown(&mut self, particles: &mut [SignalNode]) {
        self.blocks.clear();
        self.fragments.clear();
        self.streams.clear();
        self.noise.clear();
        for p in particles.iter_mut() {
            if matches!(p.effect_state, Some(EffectState::Corruption(_))) {
                p.effect_state = None;
            }
        }
        log::debug!("[corruption] torn down");
    }
}
