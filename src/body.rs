//! Point-mass bodies.

use crate::damping::DampingModel;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::floor::{FloorContact, FloorParams};
use crate::vec::Vec2;
use serde::{Deserialize, Serialize};

/// Index of a body inside a [`Simulator`](crate::Simulator).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BodyId(usize);

impl BodyId {
    /// Wrap a raw index. The simulator rejects ids it did not hand out.
    pub const fn new(index: usize) -> Self { BodyId(index) }
    pub const fn index(self) -> usize { self.0 }
}

/// How a body takes part in the step pipeline.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyKind<F: Float> {
    /// Damped and integrated by the global passes.
    Free,
    /// Falls under gravity, bounces on a floor and integrates itself during
    /// the floor pass. Skips global damping and integration.
    GravityFloor(FloorParams<F>),
}

/// A point mass. Velocity is expressed in units per step.
#[derive(Clone, Debug, PartialEq)]
pub struct Body<F: Float> {
    pub mass: F,
    pub position: Vec2<F>,
    pub velocity: Vec2<F>,
    /// Spring and pin contributions accumulated during the current step.
    pub force: Vec2<F>,
    pub damping: DampingModel<F>,
    /// Disabled bodies are frozen but still act as spring ends and pin sources.
    pub enabled: bool,
    pub kind: BodyKind<F>,
}

impl<F: Float> Body<F> {
    /// A free body at rest with default damping.
    pub fn new(position: Vec2<F>, mass: F) -> Self {
        Body {
            mass,
            position,
            velocity: Vec2::zero(),
            force: Vec2::zero(),
            damping: DampingModel::default(),
            enabled: true,
            kind: BodyKind::Free,
        }
    }

    /// A body that falls onto the given floor.
    pub fn grounded(position: Vec2<F>, mass: F, floor: FloorParams<F>) -> Self {
        Body {
            kind: BodyKind::GravityFloor(floor),
            ..Body::new(position, mass)
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2<F>) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_damping(mut self, damping: DampingModel<F>) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), PhysicsError> {
        if !(self.mass.is_finite() && self.mass > F::zero()) {
            return Err(PhysicsError::InvalidMass);
        }
        self.damping.validate()?;
        if let BodyKind::GravityFloor(floor) = &self.kind {
            floor.validate()?;
        }
        Ok(())
    }

    /// True for bodies integrated by the floor pass instead of the global one.
    pub fn steps_independently(&self) -> bool {
        matches!(self.kind, BodyKind::GravityFloor(_))
    }

    pub fn floor(&self) -> Option<&FloorParams<F>> {
        match &self.kind {
            BodyKind::GravityFloor(floor) => Some(floor),
            BodyKind::Free => None,
        }
    }

    /// Floor contact state, `None` for free bodies.
    pub fn contact(&self) -> Option<FloorContact> {
        self.floor().map(|floor| floor.contact(self.position))
    }

    /// Record a force and add `force * scale` to velocity.
    pub fn accumulate(&mut self, force: Vec2<F>, scale: F) {
        if !self.enabled {
            return;
        }
        self.force += force;
        self.velocity += force.scale(scale);
    }

    pub(crate) fn reset_force(&mut self) {
        self.force = Vec2::zero();
    }

    pub(crate) fn step_floor(&mut self, delta: F) {
        if !self.enabled {
            return;
        }
        if let BodyKind::GravityFloor(floor) = self.kind {
            floor.step(&mut self.position, &mut self.velocity, delta);
        }
    }

    pub(crate) fn damp(&mut self) {
        if self.enabled && !self.steps_independently() {
            self.velocity = self.damping.apply(self.velocity);
        }
    }

    pub(crate) fn integrate(&mut self) {
        if self.enabled && !self.steps_independently() {
            self.position += self.velocity;
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}
