//! Corner triggers and the activation state machine.
//!
//! The pointer selects effects by visiting screen corners. Top-left always
//! exits; the remaining corners activate whatever the [`CornerRegistry`]
//! assigns to them, but only while nothing is active. The blend between the
//! plain field and the active effect is the [`Transition`] scalar, eased a
//! fixed fraction of the remaining distance each frame.

use crate::constants::{TRANSITION_RATE, TRIGGER_MARGIN};
use crate::effects::EffectKind;
use crate::viewport::Viewport;
use glam::Vec2;

/// Exponentially eased blend value in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    value: f32,
    rate: f32,
}

impl Default for Transition {
    fn default() -> Self {
        Self::new(TRANSITION_RATE)
    }
}

impl Transition {
    pub fn new(rate: f32) -> Self {
        Self {
            value: 0.0,
            rate: rate.clamp(f32::EPSILON, 1.0),
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Move toward 1 while `active`, otherwise toward 0. One call per frame;
    /// there is no elapsed-time scaling.
    pub fn step(&mut self, active: bool) -> f32 {
        let target = if active { 1.0 } else { 0.0 };
        self.value = (self.value + (target - self.value) * self.rate).clamp(0.0, 1.0);
        self.value
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// Whether `pos` lies strictly inside this corner's square zone.
    pub fn contains(self, pos: Vec2, viewport: &Viewport, margin: f32) -> bool {
        let left = pos.x < margin;
        let right = pos.x > viewport.width - margin;
        let top = pos.y < margin;
        let bottom = pos.y > viewport.height - margin;
        match self {
            Corner::TopLeft => left && top,
            Corner::TopRight => right && top,
            Corner::BottomRight => right && bottom,
            Corner::BottomLeft => left && bottom,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerAction {
    Exit,
    Activate(EffectKind),
}

/// Which effect each activation corner selects. Top-left is reserved for exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CornerRegistry {
    top_right: Option<EffectKind>,
    bottom_right: Option<EffectKind>,
    bottom_left: Option<EffectKind>,
}

impl Default for CornerRegistry {
    fn default() -> Self {
        Self {
            top_right: Some(EffectKind::Corruption),
            bottom_right: Some(EffectKind::Chromatic),
            bottom_left: None,
        }
    }
}

impl CornerRegistry {
    /// Detection order for activation corners.
    const ACTIVATION_ORDER: [Corner; 3] = [Corner::BottomRight, Corner::TopRight, Corner::BottomLeft];

    pub fn get(&self, corner: Corner) -> Option<EffectKind> {
        match corner {
            Corner::TopLeft => None,
            Corner::TopRight => self.top_right,
            Corner::BottomRight => self.bottom_right,
            Corner::BottomLeft => self.bottom_left,
        }
    }

    /// Assign an effect to an activation corner. Top-left cannot be assigned.
    pub fn set(&mut self, corner: Corner, effect: Option<EffectKind>) -> bool {
        match corner {
            Corner::TopLeft => return false,
            Corner::TopRight => self.top_right = effect,
            Corner::BottomRight => self.bottom_right = effect,
            Corner::BottomLeft => self.bottom_left = effect,
        }
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivationChange {
    Activated(EffectKind),
    Deactivated(EffectKind),
}

impl ActivationChange {
    /// The companion panel hides while an effect is active.
    pub fn panel_hidden(self) -> bool {
        matches!(self, ActivationChange::Activated(_))
    }
}

/// State of the host application read on every pointer move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppGate {
    pub has_started: bool,
    pub is_demo_loaded: bool,
}

impl AppGate {
    /// Past the landing page, the background stays passive.
    #[inline]
    pub fn engaged(self) -> bool {
        self.has_started || self.is_demo_loaded
    }
}

#[derive(Clone, Debug)]
pub struct TransitionController {
    registry: CornerRegistry,
    trigger_margin: f32,
    active: Option<EffectKind>,
    transition: Transition,
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new(CornerRegistry::default(), TRIGGER_MARGIN, TRANSITION_RATE)
    }
}

impl TransitionController {
    pub fn new(registry: CornerRegistry, trigger_margin: f32, rate: f32) -> Self {
        Self {
            registry,
            trigger_margin,
            active: None,
            transition: Transition::new(rate),
        }
    }

    #[inline]
    pub fn active(&self) -> Option<EffectKind> {
        self.active
    }

    #[inline]
    pub fn transition(&self) -> f32 {
        self.transition.value()
    }

    pub fn registry_mut(&mut self) -> &mut CornerRegistry {
        &mut self.registry
    }

    /// Map a pointer position to an intent. Activation corners are locked
    /// out while an effect runs; the exit corner always wins.
    pub fn detect(&self, pos: Vec2, viewport: &Viewport) -> Option<CornerAction> {
        let m = self.trigger_margin;
        if Corner::TopLeft.contains(pos, viewport, m) {
            return Some(CornerAction::Exit);
        }
        if self.active.is_some() {
            return None;
        }
        CornerRegistry::ACTIVATION_ORDER
            .into_iter()
            .find(|c| c.contains(pos, viewport, m))
            .and_then(|c| self.registry.get(c))
            .map(CornerAction::Activate)
    }

    /// Make `kind` the active effect. No-op if it already is.
    pub fn activate(&mut self, kind: EffectKind) -> Option<ActivationChange> {
        if self.active == Some(kind) {
            return None;
        }
        self.active = Some(kind);
        Some(ActivationChange::Activated(kind))
    }

    /// Clear the active effect. No-op if nothing is active.
    pub fn deactivate(&mut self) -> Option<ActivationChange> {
        self.active.take().map(ActivationChange::Deactivated)
    }

    /// Advance the transition one frame and return it.
    pub fn step(&mut self) -> f32 {
        self.transition.step(self.active.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn detects_corners_in_registry_order() {
        let c = TransitionController::default();
        let v = vp();
        assert_eq!(c.detect(Vec2::new(10.0, 10.0), &v), Some(CornerAction::Exit));
        assert_eq!(
            c.detect(Vec2::new(790.0, 10.0), &v),
            Some(CornerAction::Activate(EffectKind::Corruption))
        );
        assert_eq!(
            c.detect(Vec2::new(790.0, 590.0), &v),
            Some(CornerAction::Activate(EffectKind::Chromatic))
        );
        // reserved corner
        assert_eq!(c.detect(Vec2::new(10.0, 590.0), &v), None);
        assert_eq!(c.detect(Vec2::new(400.0, 300.0), &v), None);
    }

    #[test]
    fn zones_are_strict() {
        let c = TransitionController::default();
        assert_eq!(c.detect(Vec2::new(60.0, 10.0), &vp()), None);
        assert_eq!(c.detect(Vec2::new(740.0, 10.0), &vp()), None);
    }

    #[test]
    fn top_left_cannot_be_reassigned() {
        let mut r = CornerRegistry::default();
        assert!(!r.set(Corner::TopLeft, Some(EffectKind::Chromatic)));
        assert!(r.set(Corner::BottomLeft, Some(EffectKind::Chromatic)));
        assert_eq!(r.get(Corner::BottomLeft), Some(EffectKind::Chromatic));
        assert_eq!(r.get(Corner::TopLeft), None);
    }

    #[test]
    fn activation_is_idempotent() {
        let mut c = TransitionController::default();
        assert_eq!(
            c.activate(EffectKind::Chromatic),
            Some(ActivationChange::Activated(EffectKind::Chromatic))
        );
        assert_eq!(c.activate(EffectKind::Chromatic), None);
        assert_eq!(
            c.deactivate(),
            Some(ActivationChange::Deactivated(EffectKind::Chromatic))
        );
        assert_eq!(c.deactivate(), None);
    }

    #[test]
    fn transition_eases_without_snapping() {
        let mut t = Transition::default();
        assert!((t.step(true) - 0.04).abs() < 1e-6);
        for _ in 0..10 {
            let before = t.value();
            let after = t.step(true);
            assert!(after > before && after < 1.0);
        }
    }
}
