use thiserror::Error;

/// Rejected runtime configuration. The front-end falls back to defaults.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NotPositive { field: &'static str, value: f32 },
    #[error("transition rate must be in (0, 1], got {0}")]
    TransitionRate(f32),
    #[error("max_particles must be at least 1")]
    NoParticles,
}
