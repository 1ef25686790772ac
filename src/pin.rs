//! Pin constraints pulling a body toward a fixed or moving point.

use crate::body::{Body, BodyId};
use crate::float::Float;
use crate::vec::{Vec2, LENGTH_EPSILON};
use serde::{Deserialize, Serialize};

/// Where a pin's anchor comes from.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinSource<F: Float> {
    /// A fixed point in scene space.
    Fixed(Vec2<F>),
    /// Another body's position plus an offset, re-read every step.
    Follow { body: BodyId, offset: Vec2<F> },
}

/// Pull exerted on a body at `target` by a pin at `pin`.
///
/// Tension is always `-distance` and the direction runs pin to target, so
/// the product points from the target back toward the pin. Flipping either
/// sign on its own turns the attraction into a runaway push.
pub fn pin_pull<F: Float>(pin: Vec2<F>, target: Vec2<F>, strength: F) -> Vec2<F> {
    let tension = -pin.distance(target);
    let accel = strength * tension;
    pin.direction_to(target).scale(accel)
}

/// Unidirectional attraction of `target` toward its anchor.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PinConstraint<F: Float> {
    pub target: BodyId,
    pub source: PinSource<F>,
    pub strength: F,
    anchor: Vec2<F>,
}

impl<F: Float> PinConstraint<F> {
    pub fn new(target: BodyId, source: PinSource<F>, strength: F) -> Self {
        let anchor = match source {
            PinSource::Fixed(point) => point,
            PinSource::Follow { offset, .. } => offset,
        };
        PinConstraint { target, source, strength, anchor }
    }

    /// Anchor position for the current body positions.
    pub fn resolve_anchor(&self, bodies: &[Body<F>]) -> Vec2<F> {
        match self.source {
            PinSource::Fixed(point) => point,
            PinSource::Follow { body, offset } => bodies[body.index()].position + offset,
        }
    }

    /// Anchor as of the last resolve; what a debug overlay should draw.
    pub fn anchor(&self) -> Vec2<F> {
        self.anchor
    }

    pub(crate) fn update_anchor(&mut self, bodies: &[Body<F>]) {
        self.anchor = self.resolve_anchor(bodies);
    }

    /// Distance from the cached anchor to the target.
    pub fn distance(&self, bodies: &[Body<F>]) -> F {
        self.anchor.distance(bodies[self.target.index()].position)
    }

    /// Target sitting exactly on its anchor.
    pub fn is_degenerate(&self, bodies: &[Body<F>]) -> bool {
        self.distance(bodies).is_near_zero(F::from_f32(LENGTH_EPSILON))
    }

    /// Force on the target toward the cached anchor. Zero when the target
    /// sits on the anchor.
    pub fn compute_force(&self, bodies: &[Body<F>]) -> Vec2<F> {
        pin_pull(self.anchor, bodies[self.target.index()].position, self.strength)
    }
}
