//! Configuration for the simulator.

use crate::damping::DampingModel;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::floor::FloorParams;
use serde::{Deserialize, Serialize};

/// How pin forces are turned into velocity changes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinForceMode {
    /// Added straight to velocity each step, independent of delta.
    #[default]
    Instant,
    /// Scaled by delta like spring forces.
    DeltaScaled,
}

/// How impulse randomness shapes the kick magnitude.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpulseJitter {
    /// `strength * u` with `u` uniform in `[0, randomness)`.
    #[default]
    Uniform,
    /// `strength * (1 - u)`: randomness only weakens an otherwise full kick.
    Attenuate,
}

/// Scenario-wide constants. Every field can be overridden.
///
/// # Builder Pattern
/// ```
/// use springy::config::{PinForceMode, SimConfig};
///
/// let config: SimConfig<f64> = SimConfig::new()
///     .with_stiffness(2.0)
///     .with_floor_y(300.0)
///     .with_pin_force_mode(PinForceMode::DeltaScaled);
/// ```
///
/// Missing fields fall back to their defaults when deserializing, so a host
/// can override a handful of constants from JSON or YAML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig<F: Float> {
    /// Stiffness used when a spring is added without one. Default: 1.0.
    pub stiffness: F,
    /// Subtracted from the initial separation for `OptimumDistance::Auto`. Default: 20.
    pub spring_offset: F,
    /// Damping given to bodies built from scenarios. Default: ratio 0.02, constant 0.5.
    pub damping: DampingModel<F>,
    /// Base gravity acceleration. Default: 39.8.
    pub gravity: F,
    /// Gravity multiplier for grounded bodies. Default: 0.4.
    pub grounded_gravity_scale: F,
    /// Floor height (y grows downward). Default: 500.
    pub floor_y: F,
    /// Floor bounce restitution. Default: 0.6.
    pub restitution: F,
    /// Multiplier on every spring and pin force. Default: 1.0.
    pub force_scale: F,
    pub pin_force_mode: PinForceMode,
    /// Impulse strength for click injection. Default: 1.0.
    pub impulse_strength: F,
    /// Impulse randomness in [0, 1]. Default: 0.3.
    pub impulse_randomness: F,
    /// How randomness scales the kick. Default: `Uniform`.
    pub impulse_jitter: ImpulseJitter,
    /// Tick length used by `Simulator::advance`. Default: 1/60.
    pub fixed_timestep: F,
    /// Most ticks `Simulator::advance` runs per call. Default: 4.
    pub max_substeps: usize,
}

impl<F: Float> SimConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SimConfig {
            stiffness: F::one(),
            spring_offset: F::from_f32(20.0),
            damping: DampingModel::default(),
            gravity: F::from_f32(39.8),
            grounded_gravity_scale: F::from_f32(0.4),
            floor_y: F::from_f32(500.0),
            restitution: F::from_f32(0.6),
            force_scale: F::one(),
            pin_force_mode: PinForceMode::Instant,
            impulse_strength: F::one(),
            impulse_randomness: F::from_f32(0.3),
            impulse_jitter: ImpulseJitter::Uniform,
            fixed_timestep: F::one() / F::from_f32(60.0),
            max_substeps: 4,
        }
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_spring_offset(mut self, offset: F) -> Self {
        self.spring_offset = offset;
        self
    }

    pub fn with_damping(mut self, damping: DampingModel<F>) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_grounded_gravity_scale(mut self, scale: F) -> Self {
        self.grounded_gravity_scale = scale;
        self
    }

    pub fn with_floor_y(mut self, floor_y: F) -> Self {
        self.floor_y = floor_y;
        self
    }

    pub fn with_restitution(mut self, restitution: F) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_force_scale(mut self, force_scale: F) -> Self {
        self.force_scale = force_scale;
        self
    }

    pub fn with_pin_force_mode(mut self, mode: PinForceMode) -> Self {
        self.pin_force_mode = mode;
        self
    }

    pub fn with_impulse(mut self, strength: F, randomness: F) -> Self {
        self.impulse_strength = strength;
        self.impulse_randomness = randomness;
        self
    }

    pub fn with_impulse_jitter(mut self, jitter: ImpulseJitter) -> Self {
        self.impulse_jitter = jitter;
        self
    }

    /// Set the tick length and the per-call tick cap for `Simulator::advance`.
    pub fn with_fixed_timestep(mut self, fixed_timestep: F, max_substeps: usize) -> Self {
        self.fixed_timestep = fixed_timestep;
        self.max_substeps = max_substeps.max(1);
        self
    }

    /// Floor parameters for a grounded body: gravity scaled by `grounded_gravity_scale`.
    pub fn floor_params(&self) -> FloorParams<F> {
        FloorParams {
            gravity_accel: self.gravity * self.grounded_gravity_scale,
            floor_y: self.floor_y,
            restitution: self.restitution,
        }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.stiffness.is_finite() && self.stiffness >= F::zero()) {
            return Err(PhysicsError::InvalidStiffness);
        }
        self.damping.validate()?;
        self.floor_params().validate()?;
        if !(self.impulse_strength.is_finite() && self.impulse_strength >= F::zero()) {
            return Err(PhysicsError::InvalidStrength);
        }
        if !(self.impulse_randomness >= F::zero() && self.impulse_randomness <= F::one()) {
            return Err(PhysicsError::InvalidRandomness);
        }
        if !(self.fixed_timestep.is_finite() && self.fixed_timestep > F::zero()) {
            return Err(PhysicsError::InvalidTimestep);
        }
        Ok(())
    }
}

impl<F: Float> Default for SimConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
