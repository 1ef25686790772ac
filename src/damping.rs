//! Dual velocity damping: proportional decay followed by a clamped constant drag.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;
use serde::{Deserialize, Serialize};

/// Per-body damping parameters.
///
/// Both passes work on per-step velocity and are frame-rate dependent.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DampingModel<F: Float> {
    /// Fraction of velocity removed every step, in [0, 1).
    pub ratio: F,
    /// Fixed speed removed every step, clamped so it never reverses velocity.
    pub constant: F,
}

impl<F: Float> DampingModel<F> {
    pub fn new(ratio: F, constant: F) -> Result<Self, PhysicsError> {
        let model = DampingModel { ratio, constant };
        model.validate()?;
        Ok(model)
    }

    /// No damping at all.
    pub fn none() -> Self {
        DampingModel { ratio: F::zero(), constant: F::zero() }
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.ratio.is_finite() && self.ratio >= F::zero() && self.ratio < F::one()) {
            return Err(PhysicsError::InvalidDampingRatio);
        }
        if !(self.constant.is_finite() && self.constant >= F::zero()) {
            return Err(PhysicsError::InvalidDampingConstant);
        }
        Ok(())
    }

    /// Proportional pass: `v - v * ratio`.
    pub fn proportional(&self, velocity: Vec2<F>) -> Vec2<F> {
        velocity - velocity.scale(self.ratio)
    }

    /// Constant-magnitude pass. Falls back to the proportional formula when the
    /// constant drag would overshoot zero and flip the velocity.
    pub fn clamped_constant(&self, velocity: Vec2<F>) -> Vec2<F> {
        let mut dv = -velocity.normalize().scale(self.constant);
        if dv.length_sq() > velocity.length_sq() {
            dv = -velocity.scale(self.ratio);
        }
        velocity + dv
    }

    /// Both passes, in order.
    pub fn apply(&self, velocity: Vec2<F>) -> Vec2<F> {
        self.clamped_constant(self.proportional(velocity))
    }
}

impl<F: Float> Default for DampingModel<F> {
    fn default() -> Self {
        DampingModel {
            ratio: F::from_f32(0.02),
            constant: F::from_f32(0.5),
        }
    }
}
