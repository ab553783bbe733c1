//! The background orchestrator.
//!
//! [`Background`] owns the particle population, the activation state and the
//! built-in effects, and renders one frame per [`Background::frame`] call.
//! Frame order is fixed: transition step, clear, effect per-frame hook, trim,
//! connections, node update and trail, then nodes on top.
//!
//! A deactivated effect moves to a retiring slot and keeps receiving
//! `on_frame` until the transition falls below [`TEARDOWN_EPSILON`], so it can
//! fade its auxiliary systems out and tear them down itself.

use crate::config::BackgroundConfig;
use crate::connections::{draw_connection_default, for_each_link};
use crate::constants::{POINTER_PARKED, SCALE_OFFSET_PER_TRANSITION, TEARDOWN_EPSILON};
use crate::effects::{
    Effect, EffectKind, EffectPhase, EffectSet, FrameShared, FxContext, NodeFactory,
};
use crate::error::ConfigError;
use crate::node::{NodeFrame, Pointer, SignalNode};
use crate::surface::Surface;
use crate::transition::{ActivationChange, AppGate, CornerAction, CornerRegistry, TransitionController};
use crate::viewport::Viewport;
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct Background {
    config: BackgroundConfig,
    viewport: Viewport,
    particles: Vec<SignalNode>,
    controller: TransitionController,
    effects: EffectSet,
    retiring: Option<EffectKind>,
    pointer: Vec2,
    pointer_active: bool,
    rng: StdRng,
}

fn effect_of(effects: &mut EffectSet, kind: Option<EffectKind>) -> Option<&mut dyn Effect> {
    match kind {
        Some(k) => Some(effects.get_mut(k)),
        None => None,
    }
}

impl Background {
    pub fn new(config: BackgroundConfig, viewport: Viewport) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let controller = TransitionController::new(
            CornerRegistry::default(),
            config.trigger_margin,
            config.transition_rate,
        );
        let mut bg = Self {
            config,
            viewport,
            particles: Vec::new(),
            controller,
            effects: EffectSet::default(),
            retiring: None,
            pointer: Vec2::splat(POINTER_PARKED),
            pointer_active: false,
            rng,
        };
        bg.init_particles();
        Ok(bg)
    }

    fn init_particles(&mut self) {
        let n = self.baseline_count();
        let vp = self.viewport;
        let rng = &mut self.rng;
        self.particles = (0..n).map(|_| SignalNode::spawn(&vp, rng)).collect();
    }

    /// Resize the canvas area and rebuild the whole population.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.init_particles();
        log::debug!(
            "[engine] resized to {}x{}, {} particles",
            viewport.width,
            viewport.height,
            self.particles.len()
        );
    }

    /// Population the field returns to when no effect is active.
    pub fn baseline_count(&self) -> usize {
        self.viewport.baseline_count(self.config.area_per_particle)
    }

    // ---------------- Input ----------------

    pub fn pointer_moved(&mut self, pos: Vec2, gate: AppGate) -> Option<ActivationChange> {
        if gate.engaged() {
            self.pointer_active = false;
            return self.deactivate();
        }
        self.pointer = pos;
        self.pointer_active = true;
        match self.controller.detect(pos, &self.viewport)? {
            CornerAction::Exit => self.deactivate(),
            CornerAction::Activate(kind) => self.activate(kind),
        }
    }

    /// The pointer left the window.
    pub fn pointer_left(&mut self) {
        self.pointer_active = false;
        self.pointer = Vec2::splat(POINTER_PARKED);
    }

    pub fn escape(&mut self) -> Option<ActivationChange> {
        self.deactivate()
    }

    pub fn activate(&mut self, kind: EffectKind) -> Option<ActivationChange> {
        if self.controller.active() == Some(kind) {
            return None;
        }
        // only one effect may hold private state at a time
        if let Some(previous) = self.controller.active() {
            self.effects.get_mut(previous).teardown(&mut self.particles);
        }
        if let Some(retiring) = self.retiring.take() {
            if retiring != kind {
                self.effects.get_mut(retiring).teardown(&mut self.particles);
            }
        }
        let change = self.controller.activate(kind);
        log::info!("[engine] effect activated: {}", kind.name());
        change
    }

    pub fn deactivate(&mut self) -> Option<ActivationChange> {
        let change = self.controller.deactivate()?;
        if let ActivationChange::Deactivated(kind) = change {
            self.retiring = Some(kind);
            log::info!("[engine] effect deactivated: {}", kind.name());
        }
        Some(change)
    }

    // ---------------- Frame ----------------

    pub fn frame(&mut self, surface: &mut dyn Surface, now_ms: f64) {
        let t = self.controller.step();
        let vp = self.viewport;
        surface.clear(vp.width, vp.height);

        let center = vp.center();
        let scale_offset = t * SCALE_OFFSET_PER_TRANSITION;
        let active = self.controller.active();

        let (slot, phase) = match active {
            Some(kind) => (Some(kind), EffectPhase::Active),
            None => (self.retiring, EffectPhase::Retiring),
        };
        if let Some(kind) = slot {
            let mut shared = FrameShared {
                viewport: vp,
                center,
                transition: t,
                now_ms,
                pointer: self.pointer(),
                phase,
                particles: &mut self.particles,
                factory: NodeFactory::new(vp),
                rng: &mut self.rng,
                max_particles: self.config.max_particles,
            };
            self.effects.get_mut(kind).on_frame(surface, &mut shared);
            if phase == EffectPhase::Retiring && t < TEARDOWN_EPSILON {
                self.retiring = None;
                log::debug!("[engine] {} retired", kind.name());
            }
        }

        // drop one surplus node per frame so the field thins out gradually
        if active.is_none() && self.particles.len() > self.baseline_count() {
            self.particles.pop();
        }

        {
            let mut effect = effect_of(&mut self.effects, active);
            let rng = &mut self.rng;
            for_each_link(&self.particles, t, |link| {
                let mut fx = FxContext {
                    transition: t,
                    now_ms,
                    rng: &mut *rng,
                };
                let handled = match effect.as_deref_mut() {
                    Some(e) => e.draw_connection(surface, &link, &mut fx),
                    None => false,
                };
                if !handled {
                    draw_connection_default(surface, &link, t, fx.rng);
                }
            });
        }

        let frame = NodeFrame {
            viewport: vp,
            center,
            scale_offset,
        };
        let pointer = self.pointer().map(|pos| Pointer {
            pos,
            radius: self.config.mouse_radius,
        });
        let mut fx = FxContext {
            transition: t,
            now_ms,
            rng: &mut self.rng,
        };
        for node in self.particles.iter_mut() {
            node.update(&frame, pointer, effect_of(&mut self.effects, active), &mut fx);
            node.draw_trail(surface, effect_of(&mut self.effects, active), &mut fx);
        }
        for node in &self.particles {
            node.draw_node(surface, effect_of(&mut self.effects, active), &mut fx);
        }
    }

    // ---------------- Accessors ----------------

    pub fn config(&self) -> &BackgroundConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[SignalNode] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut Vec<SignalNode> {
        &mut self.particles
    }

    pub fn transition(&self) -> f32 {
        self.controller.transition()
    }

    pub fn active_effect(&self) -> Option<EffectKind> {
        self.controller.active()
    }

    /// The most recently deactivated effect while it is still fading out.
    pub fn retiring_effect(&self) -> Option<EffectKind> {
        self.retiring
    }

    pub fn effects(&self) -> &EffectSet {
        &self.effects
    }

    pub fn corners_mut(&mut self) -> &mut CornerRegistry {
        self.controller.registry_mut()
    }

    /// Tracked pointer position, `None` while interaction is disabled.
    pub fn pointer(&self) -> Option<Vec2> {
        self.pointer_active.then_some(self.pointer)
    }
}
