//! Mass-ratio-scaled spring constraints between two bodies.

use crate::body::{Body, BodyId};
use crate::float::Float;
use crate::vec::{Vec2, LENGTH_EPSILON};
use serde::{Deserialize, Serialize};

/// How a spring's equilibrium separation is chosen when it is added.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimumDistance<F: Float> {
    /// Initial separation minus the configured spring offset, floored at zero.
    Auto,
    /// Explicit separation.
    Fixed(F),
}

impl<F: Float> Default for OptimumDistance<F> {
    fn default() -> Self {
        OptimumDistance::Auto
    }
}

/// A spring between bodies `a` and `b`.
///
/// Forces are not Newton-symmetric: each end is scaled by the mass ratio
/// other/own, so the lighter body reacts more strongly.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpringConstraint<F: Float> {
    pub a: BodyId,
    pub b: BodyId,
    /// Separation at which the spring exerts no force. Frozen at setup.
    pub optimum_distance: F,
    pub stiffness: F,
}

impl<F: Float> SpringConstraint<F> {
    pub fn new(a: BodyId, b: BodyId, optimum_distance: F, stiffness: F) -> Self {
        SpringConstraint { a, b, optimum_distance, stiffness }
    }

    /// Current separation of the two ends.
    pub fn distance(&self, bodies: &[Body<F>]) -> F {
        bodies[self.a.index()].position.distance(bodies[self.b.index()].position)
    }

    /// Positive when the ends are too close, negative when too far apart.
    pub fn tension(&self, bodies: &[Body<F>]) -> F {
        self.optimum_distance - self.distance(bodies)
    }

    /// Coincident ends leave the force direction undefined.
    pub fn is_degenerate(&self, bodies: &[Body<F>]) -> bool {
        self.distance(bodies).is_near_zero(F::from_f32(LENGTH_EPSILON))
    }

    /// Returns `(force_on_a, force_on_b)`. Zero for coincident ends.
    pub fn compute_forces(&self, bodies: &[Body<F>]) -> (Vec2<F>, Vec2<F>) {
        let body_a = &bodies[self.a.index()];
        let body_b = &bodies[self.b.index()];

        let tension = self.optimum_distance - body_a.position.distance(body_b.position);
        let accel_on_a = self.stiffness * (body_b.mass / body_a.mass) * tension;
        let accel_on_b = self.stiffness * (body_a.mass / body_b.mass) * tension;

        let force_on_a = body_b.position.direction_to(body_a.position).scale(accel_on_a);
        let force_on_b = body_a.position.direction_to(body_b.position).scale(accel_on_b);
        (force_on_a, force_on_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn pair(distance: f64, mass_a: f64, mass_b: f64) -> alloc::vec::Vec<Body<f64>> {
        vec![
            Body::new(Vec2::new(0.0, 0.0), mass_a),
            Body::new(Vec2::new(distance, 0.0), mass_b),
        ]
    }

    fn spring(optimum: f64) -> SpringConstraint<f64> {
        SpringConstraint::new(BodyId::new(0), BodyId::new(1), optimum, 1.0)
    }

    #[test]
    fn stretched_spring_pulls_together() {
        let bodies = pair(80.0, 1.0, 1.0);
        let (fa, fb) = spring(60.0).compute_forces(&bodies);
        assert_eq!(fa, Vec2::new(20.0, 0.0));
        assert_eq!(fb, Vec2::new(-20.0, 0.0));
    }

    #[test]
    fn compressed_spring_pushes_apart() {
        let bodies = pair(50.0, 1.0, 1.0);
        let (fa, fb) = spring(60.0).compute_forces(&bodies);
        assert!(fa.x < 0.0);
        assert!(fb.x > 0.0);
    }

    #[test]
    fn coincident_bodies_produce_no_force() {
        let bodies = pair(0.0, 2.0, 1.0);
        let s = spring(10.0);
        assert!(s.is_degenerate(&bodies));
        assert_eq!(s.compute_forces(&bodies), (Vec2::zero(), Vec2::zero()));
    }

    #[test]
    fn tension_sign() {
        let bodies = pair(80.0, 1.0, 1.0);
        assert_eq!(spring(60.0).tension(&bodies), -20.0);
        assert_eq!(spring(100.0).tension(&bodies), 20.0);
    }
}
