//! Runtime-tunable settings for the background.
//!
//! Everything else is a compile-time constant in `constants.rs`; this struct
//! holds only what the host page may override through `initBackground`.

use crate::constants::{
    AREA_PER_PARTICLE, MAX_PARTICLES, MOUSE_RADIUS, TRANSITION_RATE, TRIGGER_MARGIN,
};
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundConfig {
    /// Base pointer interaction radius (px), widened while an effect is active.
    pub mouse_radius: f32,
    /// Size of the square corner zones (px).
    pub trigger_margin: f32,
    pub area_per_particle: f32,
    pub max_particles: usize,
    pub transition_rate: f32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            mouse_radius: MOUSE_RADIUS,
            trigger_margin: TRIGGER_MARGIN,
            area_per_particle: AREA_PER_PARTICLE,
            max_particles: MAX_PARTICLES,
            transition_rate: TRANSITION_RATE,
            seed: None,
        }
    }
}

impl BackgroundConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("mouse_radius", self.mouse_radius)?;
        positive("trigger_margin", self.trigger_margin)?;
        positive("area_per_particle", self.area_per_particle)?;
        if self.max_particles == 0 {
            return Err(ConfigError::NoParticles);
        }
        let rate = self.transition_rate;
        if !(rate > 0.0 && rate <= 1.0) {
            return Err(ConfigError::TransitionRate(rate));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(BackgroundConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let cfg = BackgroundConfig {
            mouse_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NotPositive { field: "mouse_radius", .. })
        ));

        let cfg = BackgroundConfig {
            transition_rate: 1.5,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::TransitionRate(1.5)));

        let cfg = BackgroundConfig {
            max_particles: 0,
            ..Default::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::NoParticles));
    }
}
