//! Effect plugins.
//!
//! An effect temporarily takes over parts of the particle field: it can
//! perturb node updates, replace the default pointer jitter, draw trails,
//! nodes and connections itself, and run private auxiliary simulations once
//! per frame. Every hook has a default implementation that declines (returns
//! `false` or does nothing), in which case the engine's default behaviour
//! applies.
//!
//! At most one effect is active at a time; the corner registry in
//! [`crate::transition`] decides which one a pointer gesture selects.

pub mod chromatic;
pub mod corruption;

pub use chromatic::ChromaticEffect;
pub use corruption::{CorruptionEffect, CorruptionNodeState, NodeShape};

use crate::node::SignalNode;
use crate::surface::Surface;
use crate::viewport::Viewport;
use glam::Vec2;
use rand::rngs::StdRng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    /// Rainbow hue cycling with smooth sinusoidal distortion.
    Chromatic,
    /// Pixel blocks, glitch fragments, data streams and a noise field.
    Corruption,
}

impl EffectKind {
    pub fn name(self) -> &'static str {
        match self {
            EffectKind::Chromatic => "chromatic",
            EffectKind::Corruption => "corruption",
        }
    }
}

/// Effect-private per-node state, initialised lazily by the owning effect and
/// cleared when that effect tears down.
#[derive(Clone, Debug, PartialEq)]
pub enum EffectState {
    Corruption(CorruptionNodeState),
}

/// Values every per-node hook receives.
pub struct FxContext<'a> {
    pub transition: f32,
    /// Wall-clock milliseconds, used by time-keyed colour cycling.
    pub now_ms: f64,
    pub rng: &'a mut StdRng,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerHit {
    /// 1 at the pointer, falling linearly to 0 at the interaction radius.
    pub intensity: f32,
    pub static_force: f32,
}

/// An eligible connection between two nodes.
#[derive(Clone, Copy, Debug)]
pub struct Link<'a> {
    pub a: &'a SignalNode,
    pub b: &'a SignalNode,
    pub distance: f32,
    pub max_dist: f32,
    pub opacity: f32,
    /// Either endpoint is reacting to the pointer.
    pub freaking: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectPhase {
    Active,
    /// Deactivated but still fading out its auxiliary systems.
    Retiring,
}

/// Constructor handed to effects so they can create engine-tracked nodes.
#[derive(Clone, Copy, Debug)]
pub struct NodeFactory {
    viewport: Viewport,
}

impl NodeFactory {
    pub fn new(viewport: Viewport) -> Self {
        Self { viewport }
    }

    pub fn spawn(&self, rng: &mut StdRng) -> SignalNode {
        SignalNode::spawn(&self.viewport, rng)
    }
}

/// Shared context for [`Effect::on_frame`].
pub struct FrameShared<'a> {
    pub viewport: Viewport,
    pub center: Vec2,
    pub transition: f32,
    pub now_ms: f64,
    /// Pointer position while it is tracked over the canvas.
    pub pointer: Option<Vec2>,
    pub phase: EffectPhase,
    pub particles: &'a mut Vec<SignalNode>,
    pub factory: NodeFactory,
    pub rng: &'a mut StdRng,
    pub max_particles: usize,
}

impl FrameShared<'_> {
    /// Create a node, let `place` adjust it, and add it to the field.
    /// Returns `false` without spawning once the population cap is reached.
    pub fn spawn(&mut self, place: impl FnOnce(&mut SignalNode, &mut StdRng)) -> bool {
        if self.particles.len() >= self.max_particles {
            return false;
        }
        let mut node = self.factory.spawn(self.rng);
        place(&mut node, self.rng);
        self.particles.push(node);
        true
    }
}

pub trait Effect {
    fn kind(&self) -> EffectKind;

    /// Runs once per node per frame after the parallax projection and before
    /// the hue is computed. Must not assume any particular node order.
    fn modify_particle_update(&mut self, _node: &mut SignalNode, _fx: &mut FxContext<'_>) {}

    /// Runs only for nodes inside the pointer radius. Returning `true`
    /// suppresses the default random jitter and flash.
    fn modify_mouse_interact(
        &mut self,
        _node: &mut SignalNode,
        _hit: PointerHit,
        _fx: &mut FxContext<'_>,
    ) -> bool {
        false
    }

    /// Return `true` to own the trail rendering for this node.
    fn draw_trail(
        &mut self,
        _surface: &mut dyn Surface,
        _node: &SignalNode,
        _fx: &mut FxContext<'_>,
    ) -> bool {
        false
    }

    /// Return `true` to own the node rendering.
    fn draw_node(
        &mut self,
        _surface: &mut dyn Surface,
        _node: &SignalNode,
        _fx: &mut FxContext<'_>,
    ) -> bool {
        false
    }

    /// Return `true` to own the connection. Returning `true` without drawing
    /// suppresses it, which is how effects apply stricter eligibility rules.
    fn draw_connection(
        &mut self,
        _surface: &mut dyn Surface,
        _link: &Link<'_>,
        _fx: &mut FxContext<'_>,
    ) -> bool {
        false
    }

    /// Runs once per frame before connections are drawn, while active and
    /// while retiring. Effects with auxiliary state must call
    /// [`Effect::teardown`] themselves once the transition falls below
    /// [`crate::constants::TEARDOWN_EPSILON`].
    fn on_frame(&mut self, _surface: &mut dyn Surface, _shared: &mut FrameShared<'_>) {}

    /// Drop all private state, including per-node [`EffectState`].
    fn teardown(&mut self, _particles: &mut [SignalNode]) {}
}

/// The built-in effects, one instance each for the lifetime of the engine.
#[derive(Default)]
pub struct EffectSet {
    pub chromatic: ChromaticEffect,
    pub corruption: CorruptionEffect,
}

impl EffectSet {
    pub fn get_mut(&mut self, kind: EffectKind) -> &mut dyn Effect {
        match kind {
            EffectKind::Chromatic => &mut self.chromatic,
            EffectKind::Corruption => &mut self.corruption,
        }
    }
}
