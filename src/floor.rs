//! Gravity and floor collision for bodies that integrate themselves.

use crate::error::PhysicsError;
use crate::float::Float;
use crate::vec::Vec2;
use serde::{Deserialize, Serialize};

/// Contact state, derived from position every time it is queried.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FloorContact {
    Airborne,
    Grounded,
}

/// Gravity and floor parameters of a grounded body.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FloorParams<F: Float> {
    /// Downward (`+y`) acceleration, scaled by delta when applied.
    pub gravity_accel: F,
    /// Y coordinate of the floor. Bodies never end a step below it.
    pub floor_y: F,
    /// Fraction of downward speed kept, reversed, after an impact.
    pub restitution: F,
}

impl<F: Float> FloorParams<F> {
    pub fn new(gravity_accel: F, floor_y: F, restitution: F) -> Result<Self, PhysicsError> {
        let params = FloorParams { gravity_accel, floor_y, restitution };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.restitution.is_finite()
            && self.restitution >= F::zero()
            && self.restitution <= F::one())
        {
            return Err(PhysicsError::InvalidRestitution);
        }
        Ok(())
    }

    pub fn contact(&self, position: Vec2<F>) -> FloorContact {
        if position.y < self.floor_y {
            FloorContact::Airborne
        } else {
            FloorContact::Grounded
        }
    }

    /// Clamp onto the floor and reflect downward motion.
    fn resolve_contact(&self, position: &mut Vec2<F>, velocity: &mut Vec2<F>) {
        if self.contact(*position) == FloorContact::Grounded {
            position.y = self.floor_y;
            if velocity.y > F::zero() {
                velocity.y = -velocity.y * self.restitution;
            }
        }
    }

    /// Gravity, collision and position integration for one step.
    ///
    /// Gravity only accumulates while strictly above the floor, so a resting
    /// body does not build up downward speed while clamped.
    pub fn step(&self, position: &mut Vec2<F>, velocity: &mut Vec2<F>, delta: F) {
        if self.contact(*position) == FloorContact::Airborne {
            velocity.y = velocity.y + self.gravity_accel * delta;
        }
        self.resolve_contact(position, velocity);
        *position += *velocity;
        self.resolve_contact(position, velocity);
    }
}
