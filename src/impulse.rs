//! One-shot velocity kicks injected by the host between steps.

use crate::body::BodyId;
use crate::config::ImpulseJitter;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::pin::pin_pull;
use crate::simulator::Simulator;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Velocity change that pushes a body at `target` away from `point`.
///
/// The pin pull formula with its sign flipped, so the kick grows with the
/// distance from the click.
pub fn impulse_delta<F: Float>(point: Vec2<F>, target: Vec2<F>, magnitude: F) -> Vec2<F> {
    -pin_pull(point, target, magnitude)
}

/// Host entry point for click-driven impulses.
///
/// Impulses only touch velocity and are applied immediately; they are not
/// queued into the step pipeline. The host calls in from its input callback
/// between steps.
pub struct ImpulseInjector<F: Float, R: Rng = SmallRng> {
    candidates: AllocVec<BodyId>,
    strength: F,
    randomness: F,
    jitter: ImpulseJitter,
    rng: R,
}

impl<F: Float> ImpulseInjector<F, SmallRng> {
    /// Injector with a reproducible random stream.
    pub fn seeded(
        candidates: AllocVec<BodyId>,
        strength: F,
        randomness: F,
        seed: u64,
    ) -> Result<Self, PhysicsError> {
        Self::new(candidates, strength, randomness, SmallRng::seed_from_u64(seed))
    }
}

impl<F: Float, R: Rng> ImpulseInjector<F, R> {
    pub fn new(
        candidates: AllocVec<BodyId>,
        strength: F,
        randomness: F,
        rng: R,
    ) -> Result<Self, PhysicsError> {
        validate_strength(strength)?;
        validate_randomness(randomness)?;
        Ok(ImpulseInjector {
            candidates,
            strength,
            randomness,
            jitter: ImpulseJitter::default(),
            rng,
        })
    }

    pub fn with_jitter(mut self, jitter: ImpulseJitter) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn jitter(&self) -> ImpulseJitter {
        self.jitter
    }

    pub fn candidates(&self) -> &[BodyId] {
        &self.candidates
    }

    /// Uniform pick among the candidates, `None` when there are none.
    pub fn choose_target(&mut self) -> Option<BodyId> {
        if self.candidates.is_empty() {
            return None;
        }
        let index = self.rng.gen_range(0..self.candidates.len());
        Some(self.candidates[index])
    }

    /// Kick `target` away from `point`. Returns the velocity change applied.
    ///
    /// `u` is drawn uniformly from `[0, randomness)`. The magnitude is
    /// `strength * u` under [`ImpulseJitter::Uniform`] and `strength * (1 - u)`
    /// under [`ImpulseJitter::Attenuate`]. A randomness of zero draws nothing.
    pub fn apply_impulse(
        &mut self,
        sim: &mut Simulator<F>,
        point: Vec2<F>,
        target: BodyId,
        strength: F,
        randomness: F,
    ) -> Result<Vec2<F>, PhysicsError> {
        sim.check_body(target)?;
        validate_strength(strength)?;
        validate_randomness(randomness)?;

        let u = if randomness > F::zero() {
            randomness * F::from_f64(self.rng.gen::<f64>())
        } else {
            F::zero()
        };
        let magnitude = match self.jitter {
            ImpulseJitter::Uniform => strength * u,
            ImpulseJitter::Attenuate => strength * (F::one() - u),
        };

        let body = sim.body_mut(target)?;
        let delta = impulse_delta(point, body.position, magnitude);
        body.velocity += delta;
        debug!(
            body = target.index(),
            dx = delta.x.to_f64(),
            dy = delta.y.to_f64(),
            "applied impulse"
        );
        Ok(delta)
    }

    /// Handle a click: pick a candidate and kick it with the configured
    /// strength and randomness.
    pub fn inject(
        &mut self,
        sim: &mut Simulator<F>,
        point: Vec2<F>,
    ) -> Result<Option<(BodyId, Vec2<F>)>, PhysicsError> {
        let Some(target) = self.choose_target() else {
            return Ok(None);
        };
        let (strength, randomness) = (self.strength, self.randomness);
        let delta = self.apply_impulse(sim, point, target, strength, randomness)?;
        Ok(Some((target, delta)))
    }
}

fn validate_strength<F: Float>(strength: F) -> Result<(), PhysicsError> {
    if strength.is_finite() && strength >= F::zero() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidStrength)
    }
}

fn validate_randomness<F: Float>(randomness: F) -> Result<(), PhysicsError> {
    if randomness >= F::zero() && randomness <= F::one() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidRandomness)
    }
}
