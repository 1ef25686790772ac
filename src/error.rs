//! Error types for simulation setup.

use thiserror::Error;

/// Errors that can occur while configuring a simulation.
///
/// All of these are parameter errors surfaced at setup time; the step
/// pipeline itself never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// Mass must be positive and finite.
    #[error("mass must be positive and finite")]
    InvalidMass,
    /// Stiffness must be non-negative and finite.
    #[error("stiffness must be non-negative and finite")]
    InvalidStiffness,
    /// Damping ratio must be in [0, 1).
    #[error("damping ratio must be in [0, 1)")]
    InvalidDampingRatio,
    /// Damping constant must be non-negative and finite.
    #[error("damping constant must be non-negative and finite")]
    InvalidDampingConstant,
    /// Restitution must be in [0, 1].
    #[error("restitution must be in [0, 1]")]
    InvalidRestitution,
    /// Pin and impulse strengths must be non-negative and finite.
    #[error("strength must be non-negative and finite")]
    InvalidStrength,
    /// Impulse randomness must be in [0, 1].
    #[error("randomness must be in [0, 1]")]
    InvalidRandomness,
    /// An explicit optimum distance must be non-negative and finite.
    #[error("optimum distance must be non-negative and finite")]
    InvalidOptimumDistance,
    /// Fixed timestep must be positive and finite.
    #[error("fixed timestep must be positive and finite")]
    InvalidTimestep,
    /// A pin cannot follow the body it pulls.
    #[error("body {index} cannot be pinned to itself")]
    SelfPin { index: usize },
    /// Body id does not refer to a registered body.
    #[error("body index {index} out of bounds (count: {count})")]
    UnknownBody { index: usize, count: usize },
}
