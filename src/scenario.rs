//! Serde-loadable scenario descriptions and the reference scene.
//!
//! A scenario lists bodies, springs, pins and impulse settings. Bodies are
//! referenced by their position in `bodies`. An example in JSON:
//!
//! ```json
//! {
//!   "sim": { "floor_y": 400.0 },
//!   "bodies": [
//!     { "position": { "x": 0.0, "y": 400.0 }, "mass": 1.0, "grounded": true },
//!     { "position": { "x": -50.0, "y": 250.0 }, "mass": 5.0 }
//!   ],
//!   "springs": [],
//!   "pins": [
//!     { "target": 1, "source": { "follow": { "body": 0, "offset": { "x": -50.0, "y": -150.0 } } }, "strength": 0.1 }
//!   ],
//!   "impulse": { "candidates": [1], "seed": 7 }
//! }
//! ```

use crate::body::{Body, BodyId};
use crate::config::SimConfig;
use crate::damping::DampingModel;
use crate::error::PhysicsError;
use crate::float::Float;
use crate::impulse::ImpulseInjector;
use crate::pin::PinSource;
use crate::simulator::Simulator;
use crate::spring::OptimumDistance;
use crate::vec::Vec2;
use alloc::vec;
use alloc::vec::Vec as AllocVec;
use serde::{Deserialize, Serialize};
use tracing::info;

fn enabled_by_default() -> bool {
    true
}

/// Initial state of one body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig<F: Float> {
    pub position: Vec2<F>,
    #[serde(default)]
    pub velocity: Vec2<F>,
    pub mass: F,
    /// Falls under scaled gravity and bounces on the configured floor.
    #[serde(default)]
    pub grounded: bool,
    /// Overrides `SimConfig::damping` for this body.
    #[serde(default)]
    pub damping: Option<DampingModel<F>>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig<F: Float> {
    pub a: usize,
    pub b: usize,
    /// Defaults to `SimConfig::stiffness`.
    #[serde(default)]
    pub stiffness: Option<F>,
    /// Defaults to the initial separation minus `SimConfig::spring_offset`.
    #[serde(default)]
    pub optimum_distance: Option<F>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PinConfig<F: Float> {
    pub target: usize,
    pub source: PinSource<F>,
    pub strength: F,
}

/// Click-impulse targets and the seed of their random stream.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ImpulseConfig {
    #[serde(default)]
    pub candidates: AllocVec<usize>,
    #[serde(default)]
    pub seed: u64,
}

/// Everything needed to build a running scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig<F: Float> {
    #[serde(default)]
    pub sim: SimConfig<F>,
    pub bodies: AllocVec<BodyConfig<F>>,
    #[serde(default)]
    pub springs: AllocVec<SpringConfig<F>>,
    #[serde(default)]
    pub pins: AllocVec<PinConfig<F>>,
    #[serde(default)]
    pub impulse: ImpulseConfig,
}

/// A built scenario: the simulator, its click injector and the body ids in
/// scenario order.
pub struct Scene<F: Float> {
    pub simulator: Simulator<F>,
    pub injector: ImpulseInjector<F>,
    pub bodies: AllocVec<BodyId>,
}

impl<F: Float> ScenarioConfig<F> {
    /// The reference scene: a grounded body resting on the floor and two free
    /// bodies (masses 5 and 1) hanging off it by follow pins of strength 0.1
    /// and 0.2, joined by an auto-length spring. Clicks kick either free
    /// body with equal odds.
    pub fn reference() -> Self {
        let sim = SimConfig::new();
        let floor_y = sim.floor_y;
        let f = F::from_f32;
        let ground = Vec2::new(f(400.0), floor_y);
        let heavy = Vec2::new(f(320.0), floor_y - f(200.0));
        let light = Vec2::new(f(480.0), floor_y - f(200.0));

        ScenarioConfig {
            sim,
            bodies: vec![
                BodyConfig {
                    position: ground,
                    velocity: Vec2::zero(),
                    mass: F::one(),
                    grounded: true,
                    damping: None,
                    enabled: true,
                },
                BodyConfig {
                    position: heavy,
                    velocity: Vec2::zero(),
                    mass: f(5.0),
                    grounded: false,
                    damping: None,
                    enabled: true,
                },
                BodyConfig {
                    position: light,
                    velocity: Vec2::zero(),
                    mass: F::one(),
                    grounded: false,
                    damping: None,
                    enabled: true,
                },
            ],
            springs: vec![SpringConfig { a: 1, b: 2, stiffness: None, optimum_distance: None }],
            pins: vec![
                PinConfig {
                    target: 1,
                    source: PinSource::Follow { body: BodyId::new(0), offset: heavy - ground },
                    strength: f(0.1),
                },
                PinConfig {
                    target: 2,
                    source: PinSource::Follow { body: BodyId::new(0), offset: light - ground },
                    strength: f(0.2),
                },
            ],
            impulse: ImpulseConfig { candidates: vec![1, 2], seed: 0 },
        }
    }

    pub fn build(&self) -> Result<Scene<F>, PhysicsError> {
        let mut simulator = Simulator::new(self.sim.clone())?;

        let mut bodies = AllocVec::with_capacity(self.bodies.len());
        for cfg in &self.bodies {
            let body = if cfg.grounded {
                Body::grounded(cfg.position, cfg.mass, self.sim.floor_params())
            } else {
                Body::new(cfg.position, cfg.mass)
            };
            let body = body
                .with_velocity(cfg.velocity)
                .with_damping(cfg.damping.unwrap_or(self.sim.damping))
                .with_enabled(cfg.enabled);
            bodies.push(simulator.add_body(body)?);
        }

        for cfg in &self.springs {
            let optimum = cfg
                .optimum_distance
                .map_or(OptimumDistance::Auto, OptimumDistance::Fixed);
            simulator.add_spring(
                BodyId::new(cfg.a),
                BodyId::new(cfg.b),
                cfg.stiffness.unwrap_or(self.sim.stiffness),
                optimum,
            )?;
        }

        for cfg in &self.pins {
            simulator.add_pin(BodyId::new(cfg.target), cfg.source, cfg.strength)?;
        }

        let mut candidates = AllocVec::with_capacity(self.impulse.candidates.len());
        for &index in &self.impulse.candidates {
            let id = BodyId::new(index);
            simulator.check_body(id)?;
            candidates.push(id);
        }
        let injector = ImpulseInjector::seeded(
            candidates,
            self.sim.impulse_strength,
            self.sim.impulse_randomness,
            self.impulse.seed,
        )?
        .with_jitter(self.sim.impulse_jitter);

        info!(
            bodies = simulator.body_count(),
            springs = simulator.springs().len(),
            pins = simulator.pins().len(),
            "built scenario"
        );
        Ok(Scene { simulator, injector, bodies })
    }
}

impl<F: Float> Default for ScenarioConfig<F> {
    fn default() -> Self {
        Self::reference()
    }
}
