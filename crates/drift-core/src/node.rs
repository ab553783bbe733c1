//! Signal nodes: the particles of the background field.
//!
//! A node travels in a straight line along one axis, keeps a short trail of
//! recent draw positions, reacts to the pointer, and recycles itself once it
//! has left the viewport. Effects can hook into the update and take over the
//! drawing; see [`crate::effects::Effect`].

use crate::color::{Color, Rgb};
use crate::constants::*;
use crate::effects::{Effect, EffectState, FxContext, PointerHit};
use crate::surface::{trace_path, Surface};
use crate::viewport::Viewport;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Direction::Forward => 1.0,
            Direction::Backward => -1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    pub pos: Vec2,
    pub freak: bool,
    pub flash: bool,
    pub hue: f32,
    pub intensity: f32,
}

/// Pointer position and its base interaction radius for this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pointer {
    pub pos: Vec2,
    pub radius: f32,
}

/// Per-frame values shared by every node update.
#[derive(Clone, Copy, Debug)]
pub struct NodeFrame {
    pub viewport: Viewport,
    pub center: Vec2,
    pub scale_offset: f32,
}

#[derive(Clone, Debug)]
pub struct SignalNode {
    pub axis: Axis,
    pub dir: Direction,
    pub pos: Vec2,
    pub z: f32,
    pub base_speed: f32,
    pub screen: Vec2,
    pub draw: Vec2,
    pub history: VecDeque<TrailPoint>,
    pub history_len: usize,
    pub accent: Rgb,
    pub hue: f32,
    pub hue_offset: f32,
    pub freaking_out: bool,
    pub jitter: Vec2,
    pub flash: u8,
    /// Owned by whichever effect initialised it; the engine never reads it.
    pub effect_state: Option<EffectState>,
}

impl SignalNode {
    /// Create a node spread over the viewport using a 6x6 placement grid.
    pub fn spawn(viewport: &Viewport, rng: &mut StdRng) -> Self {
        let mut node = SignalNode {
            axis: Axis::X,
            dir: Direction::Forward,
            pos: Vec2::ZERO,
            z: Z_MIN,
            base_speed: 0.0,
            screen: Vec2::ZERO,
            draw: Vec2::ZERO,
            history: VecDeque::with_capacity(HISTORY_LEN_MIN + HISTORY_LEN_SPAN + 8),
            history_len: HISTORY_LEN_MIN,
            accent: ACCENT_COLORS[0],
            hue: 0.0,
            hue_offset: 0.0,
            freaking_out: false,
            jitter: Vec2::ZERO,
            flash: 0,
            effect_state: None,
        };
        node.randomize(rng);

        let slices = SPAWN_GRID_SLICES as f32;
        let cell = Vec2::new(viewport.width / slices, viewport.height / slices);
        let sx = rng.gen_range(0..SPAWN_GRID_SLICES) as f32;
        let sy = rng.gen_range(0..SPAWN_GRID_SLICES) as f32;
        node.pos = Vec2::new(
            cell.x * sx + SPAWN_GRID_INSET + rng.gen::<f32>() * (cell.x - 2.0 * SPAWN_GRID_INSET).max(0.0),
            cell.y * sy + SPAWN_GRID_INSET + rng.gen::<f32>() * (cell.y - 2.0 * SPAWN_GRID_INSET).max(0.0),
        );
        node.screen = node.pos;
        node.draw = node.pos;
        node
    }

    /// Re-randomize travel and appearance and start again just outside the
    /// edge the node now travels away from. The trail restarts empty.
    pub fn reset(&mut self, viewport: &Viewport, rng: &mut StdRng) {
        self.randomize(rng);
        let outside = |dir: Direction, extent: f32| match dir {
            Direction::Forward => -RESPAWN_OFFSET,
            Direction::Backward => extent + RESPAWN_OFFSET,
        };
        self.pos = match self.axis {
            Axis::X => Vec2::new(
                outside(self.dir, viewport.width),
                rng.gen::<f32>() * viewport.height,
            ),
            Axis::Y => Vec2::new(
                rng.gen::<f32>() * viewport.width,
                outside(self.dir, viewport.height),
            ),
        };
        self.screen = self.pos;
        self.draw = self.pos;
    }

    fn randomize(&mut self, rng: &mut StdRng) {
        self.axis = if rng.gen_bool(0.5) { Axis::X } else { Axis::Y };
        self.dir = if rng.gen_bool(0.5) {
            Direction::Forward
        } else {
            Direction::Backward
        };
        self.z = rng.gen::<f32>() * Z_SPAN + Z_MIN;
        self.base_speed = (rng.gen::<f32>() * SPEED_SPAN + SPEED_MIN) * self.z;
        self.accent = ACCENT_COLORS[rng.gen_range(0..ACCENT_COLORS.len())];
        self.history.clear();
        self.history_len = HISTORY_LEN_MIN + rng.gen_range(0..HISTORY_LEN_SPAN);
        self.jitter = Vec2::ZERO;
        self.flash = 0;
        self.hue_offset = 0.0;
    }

    /// Trail capacity at the given transition (grows while an effect ramps in).
    #[inline]
    pub fn max_history(&self, transition: f32) -> usize {
        (self.history_len as f32 + transition * HISTORY_TRANSITION_SLACK).floor() as usize
    }

    #[inline]
    pub fn opacity(&self, transition: f32) -> f32 {
        let base = (0.3 + self.z * 0.25).min(0.9);
        (base + transition * 0.3).min(1.0)
    }

    #[inline]
    pub fn size(&self, transition: f32) -> f32 {
        (1.8 + transition * 1.2) * self.z
    }

    fn past_edge(&self, viewport: &Viewport) -> bool {
        match (self.axis, self.dir) {
            (Axis::X, Direction::Forward) => self.pos.x > viewport.width + RESET_MARGIN,
            (Axis::X, Direction::Backward) => self.pos.x < -RESET_MARGIN,
            (Axis::Y, Direction::Forward) => self.pos.y > viewport.height + RESET_MARGIN,
            (Axis::Y, Direction::Backward) => self.pos.y < -RESET_MARGIN,
        }
    }

    pub fn update(
        &mut self,
        frame: &NodeFrame,
        pointer: Option<Pointer>,
        mut effect: Option<&mut dyn Effect>,
        fx: &mut FxContext<'_>,
    ) {
        let t = fx.transition;
        let step = self.base_speed * self.dir.sign() * (1.0 + t * TRANSITION_SPEED_BOOST);
        match self.axis {
            Axis::X => self.pos.x += step,
            Axis::Y => self.pos.y += step,
        }

        let scale = 1.0 + frame.scale_offset * self.z * PARALLAX_DEPTH_FACTOR;
        self.screen = frame.center + (self.pos - frame.center) * scale;

        if let Some(e) = effect.as_deref_mut() {
            e.modify_particle_update(self, fx);
        }
        let hue = fx.now_ms * HUE_TIME_RATE
            + ((self.screen.x + self.screen.y) * HUE_POSITION_RATE
                + self.z * HUE_DEPTH_RATE
                + self.hue_offset) as f64;
        self.hue = hue.rem_euclid(360.0) as f32;

        self.jitter = Vec2::ZERO;
        self.freaking_out = false;
        self.flash = self.flash.saturating_sub(1);

        if let Some(p) = pointer {
            let dist = p.pos.distance(self.screen);
            let interact_radius = p.radius * (1.0 + t * INTERACT_RADIUS_BOOST);
            if dist < interact_radius {
                self.freaking_out = true;
                let intensity = (interact_radius - dist) / interact_radius;
                let static_force = STATIC_FORCE * intensity * (1.0 + t * STATIC_FORCE_BOOST);
                let hit = PointerHit {
                    intensity,
                    static_force,
                };
                let handled = match effect.as_deref_mut() {
                    Some(e) => e.modify_mouse_interact(self, hit, fx),
                    None => false,
                };
                if !handled {
                    self.jitter = Vec2::new(
                        (fx.rng.gen::<f32>() - 0.5) * static_force * 2.0,
                        (fx.rng.gen::<f32>() - 0.5) * static_force * 2.0,
                    );
                    self.flash = FLASH_FRAMES;
                }
            }
        }

        self.draw = self.screen + self.jitter;
        self.history.push_front(TrailPoint {
            pos: self.draw,
            freak: self.freaking_out,
            flash: self.flash > 0,
            hue: self.hue,
            intensity: if self.freaking_out { 1.0 } else { 0.0 },
        });
        let max_len = self.max_history(t);
        while self.history.len() > max_len {
            self.history.pop_back();
        }

        // A node with a non-finite position can never come back on screen.
        if !self.draw.is_finite() || self.past_edge(&frame.viewport) {
            self.reset(&frame.viewport, fx.rng);
        }
    }

    // ---------------- Drawing ----------------

    pub fn draw_trail(
        &self,
        surface: &mut dyn Surface,
        effect: Option<&mut dyn Effect>,
        fx: &mut FxContext<'_>,
    ) {
        if let Some(e) = effect {
            if e.draw_trail(surface, self, fx) {
                return;
            }
        }
        self.draw_trail_default(surface, fx);
    }

    pub fn draw_node(
        &self,
        surface: &mut dyn Surface,
        effect: Option<&mut dyn Effect>,
        fx: &mut FxContext<'_>,
    ) {
        if let Some(e) = effect {
            if e.draw_node(surface, self, fx) {
                return;
            }
        }
        self.draw_node_default(surface, fx.transition);
    }

    pub fn draw_trail_default(&self, surface: &mut dyn Surface, fx: &mut FxContext<'_>) {
        if self.history.len() <= 1 {
            return;
        }
        let t = fx.transition;
        let rng = &mut *fx.rng;
        let points = self.history.iter().enumerate().map(|(i, pt)| {
            if i > 0 && pt.freak {
                pt.pos + Vec2::new((rng.gen::<f32>() - 0.5) * 5.0, (rng.gen::<f32>() - 0.5) * 5.0)
            } else {
                pt.pos
            }
        });
        trace_path(surface, points);
        surface.set_stroke_color(self.accent.alpha(self.opacity(t) * 0.55));
        surface.set_line_width((0.8 + t) * self.z * 0.75);
        surface.stroke();
    }

    pub fn draw_node_default(&self, surface: &mut dyn Surface, transition: f32) {
        let size = self.size(transition);
        let Vec2 { x, y } = self.draw;
        if self.flash > 0 {
            surface.set_fill_color(Color::WHITE);
            surface.fill_rect(x - size * 1.4, y - size * 1.4, size * 2.8, size * 2.8);
            surface.set_fill_color(self.accent.alpha(1.0));
            surface.fill_rect(x - size, y - size, size * 2.0, size * 2.0);
        } else {
            surface.set_fill_color(self.accent.alpha(self.opacity(transition)));
            surface.fill_rect(x - size / 2.0, y - size / 2.0, size, size);
        }
    }
}
