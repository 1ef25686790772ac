//! The simulator: owns every body and constraint and runs the step pipeline.

use crate::body::{Body, BodyId};
use crate::config::{PinForceMode, SimConfig};
use crate::error::PhysicsError;
use crate::float::Float;
use crate::observer::{Degeneracy, NoOpStepObserver, StepObserver};
use crate::pin::{PinConstraint, PinSource};
use crate::spring::{OptimumDistance, SpringConstraint};
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;
use tracing::{debug, trace, warn};

/// Explicit-Euler spring/pin integrator.
///
/// Bodies live in an arena addressed by [`BodyId`]. Springs and pins are
/// applied in insertion order, which makes force accumulation deterministic.
pub struct Simulator<F: Float> {
    bodies: AllocVec<Body<F>>,
    springs: AllocVec<SpringConstraint<F>>,
    pins: AllocVec<PinConstraint<F>>,
    config: SimConfig<F>,
    accumulator: F,
}

impl<F: Float> Simulator<F> {
    pub fn new(config: SimConfig<F>) -> Result<Self, PhysicsError> {
        config.validate()?;
        Ok(Simulator {
            bodies: AllocVec::new(),
            springs: AllocVec::new(),
            pins: AllocVec::new(),
            config,
            accumulator: F::zero(),
        })
    }

    pub fn config(&self) -> &SimConfig<F> {
        &self.config
    }

    pub fn add_body(&mut self, body: Body<F>) -> Result<BodyId, PhysicsError> {
        body.validate()?;
        let id = BodyId::new(self.bodies.len());
        debug!(
            index = id.index(),
            mass = body.mass.to_f64(),
            grounded = body.steps_independently(),
            "added body"
        );
        self.bodies.push(body);
        Ok(id)
    }

    /// Connect `a` and `b`. Returns the spring's index.
    pub fn add_spring(
        &mut self,
        a: BodyId,
        b: BodyId,
        stiffness: F,
        optimum: OptimumDistance<F>,
    ) -> Result<usize, PhysicsError> {
        self.check_body(a)?;
        self.check_body(b)?;
        if !(stiffness.is_finite() && stiffness >= F::zero()) {
            return Err(PhysicsError::InvalidStiffness);
        }
        let optimum_distance = match optimum {
            OptimumDistance::Fixed(distance) => {
                if !(distance.is_finite() && distance >= F::zero()) {
                    return Err(PhysicsError::InvalidOptimumDistance);
                }
                distance
            }
            OptimumDistance::Auto => {
                let initial = self.bodies[a.index()].position.distance(self.bodies[b.index()].position);
                (initial - self.config.spring_offset).max(F::zero())
            }
        };
        let index = self.springs.len();
        debug!(
            a = a.index(),
            b = b.index(),
            optimum_distance = optimum_distance.to_f64(),
            stiffness = stiffness.to_f64(),
            "added spring"
        );
        self.springs.push(SpringConstraint::new(a, b, optimum_distance, stiffness));
        Ok(index)
    }

    /// Pin `target` to `source`. Returns the pin's index.
    pub fn add_pin(
        &mut self,
        target: BodyId,
        source: PinSource<F>,
        strength: F,
    ) -> Result<usize, PhysicsError> {
        self.check_body(target)?;
        if let PinSource::Follow { body, .. } = source {
            self.check_body(body)?;
            if body == target {
                return Err(PhysicsError::SelfPin { index: target.index() });
            }
        }
        if !(strength.is_finite() && strength >= F::zero()) {
            return Err(PhysicsError::InvalidStrength);
        }
        let mut pin = PinConstraint::new(target, source, strength);
        pin.update_anchor(&self.bodies);
        let index = self.pins.len();
        debug!(body = target.index(), strength = strength.to_f64(), "added pin");
        self.pins.push(pin);
        Ok(index)
    }

    pub fn check_body(&self, id: BodyId) -> Result<(), PhysicsError> {
        if id.index() < self.bodies.len() {
            Ok(())
        } else {
            Err(PhysicsError::UnknownBody { index: id.index(), count: self.bodies.len() })
        }
    }

    /// Advance by one tick of `delta` seconds.
    pub fn step(&mut self, delta: F) {
        self.step_observed(delta, &mut NoOpStepObserver);
    }

    /// Advance by one tick, reporting each pipeline stage to `observer`.
    pub fn step_observed<O: StepObserver>(&mut self, delta: F, observer: &mut O) {
        let delta = sanitize_delta(delta);
        trace!(delta = delta.to_f64(), bodies = self.bodies.len(), "step");

        for body in self.bodies.iter_mut() {
            body.reset_force();
        }

        for body in self.bodies.iter_mut() {
            body.step_floor(delta);
        }
        observer.on_floor_pass();

        for pin in self.pins.iter_mut() {
            pin.update_anchor(&self.bodies);
        }

        let force_scale = self.config.force_scale;
        for spring in self.springs.iter() {
            if spring.is_degenerate(&self.bodies) {
                warn!(a = spring.a.index(), b = spring.b.index(), "spring ends coincide; force skipped");
                observer.on_degenerate(Degeneracy::CoincidentSpring { a: spring.a, b: spring.b });
                continue;
            }
            let (force_on_a, force_on_b) = spring.compute_forces(&self.bodies);
            self.bodies[spring.a.index()].accumulate(force_on_a.scale(force_scale), delta);
            self.bodies[spring.b.index()].accumulate(force_on_b.scale(force_scale), delta);
        }
        observer.on_springs();

        let pin_scale = match self.config.pin_force_mode {
            PinForceMode::Instant => F::one(),
            PinForceMode::DeltaScaled => delta,
        };
        for pin in self.pins.iter() {
            if pin.is_degenerate(&self.bodies) {
                warn!(body = pin.target.index(), "pinned body sits on its anchor; force skipped");
                observer.on_degenerate(Degeneracy::PinAtTarget { target: pin.target });
                continue;
            }
            let force = pin.compute_force(&self.bodies);
            self.bodies[pin.target.index()].accumulate(force.scale(force_scale), pin_scale);
        }
        observer.on_pins();

        for body in self.bodies.iter_mut() {
            body.damp();
        }
        observer.on_damping();

        for body in self.bodies.iter_mut() {
            body.integrate();
        }
        observer.on_integrate();

        debug_assert!(
            self.bodies.iter().all(Body::is_finite),
            "non-finite body state after step"
        );
        observer.on_step_complete();
    }

    /// Feed host frame time and run as many whole fixed ticks as fit, up to
    /// `max_substeps`. Returns the number of ticks run.
    pub fn advance(&mut self, frame_delta: F) -> usize {
        self.advance_observed(frame_delta, &mut NoOpStepObserver)
    }

    pub fn advance_observed<O: StepObserver>(&mut self, frame_delta: F, observer: &mut O) -> usize {
        let fixed = self.config.fixed_timestep;
        self.accumulator = self.accumulator + sanitize_delta(frame_delta);

        let mut ticks = 0;
        while self.accumulator >= fixed && ticks < self.config.max_substeps {
            self.step_observed(fixed, observer);
            self.accumulator = self.accumulator - fixed;
            ticks += 1;
        }

        // Drop the backlog instead of spiralling.
        if self.accumulator > fixed * F::from_f32(self.config.max_substeps as f32) {
            debug!(backlog = self.accumulator.to_f64(), "dropping simulation backlog");
            self.accumulator = F::zero();
        }
        ticks
    }

    /// Overwrite a body's position, e.g. when the host moves its node.
    pub fn set_position(&mut self, id: BodyId, position: Vec2<F>) -> Result<(), PhysicsError> {
        self.body_mut(id)?.position = position;
        Ok(())
    }

    pub fn set_enabled(&mut self, id: BodyId, enabled: bool) -> Result<(), PhysicsError> {
        self.body_mut(id)?.enabled = enabled;
        Ok(())
    }

    pub(crate) fn body_mut(&mut self, id: BodyId) -> Result<&mut Body<F>, PhysicsError> {
        let count = self.bodies.len();
        self.bodies
            .get_mut(id.index())
            .ok_or(PhysicsError::UnknownBody { index: id.index(), count })
    }

    pub fn body(&self, id: BodyId) -> Option<&Body<F>> { self.bodies.get(id.index()) }
    pub fn position(&self, id: BodyId) -> Option<Vec2<F>> { self.body(id).map(|b| b.position) }
    pub fn velocity(&self, id: BodyId) -> Option<Vec2<F>> { self.body(id).map(|b| b.velocity) }
    pub fn bodies(&self) -> &[Body<F>] { &self.bodies }
    pub fn springs(&self) -> &[SpringConstraint<F>] { &self.springs }
    pub fn pins(&self) -> &[PinConstraint<F>] { &self.pins }
    pub fn body_count(&self) -> usize { self.bodies.len() }

    pub fn positions(&self) -> AllocVec<Vec2<F>> {
        self.bodies.iter().map(|b| b.position).collect()
    }
}

fn sanitize_delta<F: Float>(delta: F) -> F {
    if delta.is_finite() && delta >= F::zero() {
        delta
    } else {
        warn!(delta = delta.to_f64(), "rejected step delta; using zero");
        F::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim() -> Simulator<f64> {
        Simulator::new(SimConfig::new()).unwrap()
    }

    #[test]
    fn auto_optimum_subtracts_offset() {
        let mut sim = sim();
        let a = sim.add_body(Body::new(Vec2::new(0.0, 0.0), 1.0)).unwrap();
        let b = sim.add_body(Body::new(Vec2::new(0.0, 100.0), 1.0)).unwrap();
        let c = sim.add_body(Body::new(Vec2::new(5.0, 0.0), 1.0)).unwrap();
        sim.add_spring(a, b, 1.0, OptimumDistance::Auto).unwrap();
        sim.add_spring(a, c, 1.0, OptimumDistance::Auto).unwrap();
        assert_eq!(sim.springs()[0].optimum_distance, 80.0);
        assert_eq!(sim.springs()[1].optimum_distance, 0.0);
    }

    #[test]
    fn negative_delta_is_treated_as_zero() {
        let mut sim = sim();
        let a = sim.add_body(Body::new(Vec2::new(0.0, 0.0), 1.0)).unwrap();
        let b = sim.add_body(Body::new(Vec2::new(100.0, 0.0), 1.0)).unwrap();
        sim.add_spring(a, b, 1.0, OptimumDistance::Fixed(10.0)).unwrap();
        sim.step(-1.0);
        assert_eq!(sim.velocity(a), Some(Vec2::zero()));
        sim.step(f64::NAN);
        assert_eq!(sim.position(b), Some(Vec2::new(100.0, 0.0)));
    }

    #[test]
    fn advance_runs_whole_ticks() {
        let mut sim = Simulator::new(SimConfig::<f64>::new().with_fixed_timestep(0.25, 4)).unwrap();
        assert_eq!(sim.advance(0.1), 0);
        assert_eq!(sim.advance(0.2), 1);
        assert_eq!(sim.advance(0.5), 2);
    }

    #[test]
    fn advance_drops_backlog() {
        let mut sim = Simulator::new(SimConfig::<f64>::new().with_fixed_timestep(0.25, 2)).unwrap();
        assert_eq!(sim.advance(10.0), 2);
        assert_eq!(sim.advance(0.0), 0);
    }

    #[test]
    fn disabled_body_is_frozen_but_still_pulls() {
        let mut sim = sim();
        let a = sim.add_body(Body::new(Vec2::new(0.0, 0.0), 1.0)).unwrap();
        let b = sim.add_body(Body::new(Vec2::new(100.0, 0.0), 1.0)).unwrap();
        sim.add_spring(a, b, 1.0, OptimumDistance::Fixed(50.0)).unwrap();
        sim.set_enabled(a, false).unwrap();
        for _ in 0..10 {
            sim.step(1.0 / 60.0);
        }
        assert_eq!(sim.position(a), Some(Vec2::new(0.0, 0.0)));
        assert_eq!(sim.velocity(a), Some(Vec2::zero()));
        assert!(sim.position(b).unwrap().x < 100.0);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let mut sim = sim();
        let a = sim.add_body(Body::new(Vec2::new(0.0, 0.0), 1.0)).unwrap();
        let ghost = BodyId::new(7);
        assert_eq!(
            sim.add_spring(a, ghost, 1.0, OptimumDistance::Auto),
            Err(PhysicsError::UnknownBody { index: 7, count: 1 })
        );
        assert_eq!(
            sim.set_position(ghost, Vec2::zero()),
            Err(PhysicsError::UnknownBody { index: 7, count: 1 })
        );
        assert!(sim.body(ghost).is_none());
    }
}
