//! Tunable 2D spring, pin and floor-bounce particle integrator for games.
//!
//! `springy` advances a fixed set of point masses with explicit Euler steps.
//! It is a stylized, hand-tuned model rather than a physically accurate
//! engine: spring forces are scaled by mass ratios so lighter bodies react
//! more, and pin forces land as instant velocity changes.
//!
//! # Features
//!
//! - **Springs**: Mass-ratio-scaled springs with automatic rest length
//! - **Pins**: Pull bodies toward fixed points or toward other bodies
//! - **Damping**: Proportional decay plus a clamped constant drag
//! - **Floor bodies**: Gravity with restitutive bouncing on a floor line
//! - **Impulses**: Click-driven kicks injected between steps
//! - **Scenarios**: Serde-loadable scene descriptions and config overrides
//! - **Observable**: Monitor the pipeline via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//! ```
//! use springy::{Body, OptimumDistance, SimConfig, Simulator, Vec2};
//!
//! let mut sim = Simulator::new(SimConfig::<f64>::new()).unwrap();
//! let a = sim.add_body(Body::new(Vec2::new(0.0, 0.0), 5.0)).unwrap();
//! let b = sim.add_body(Body::new(Vec2::new(80.0, 0.0), 1.0)).unwrap();
//! sim.add_spring(a, b, 1.0, OptimumDistance::Fixed(60.0)).unwrap();
//! for _ in 0..100 {
//!     sim.step(1.0 / 60.0);
//! }
//! let gap = sim.position(a).unwrap().distance(sim.position(b).unwrap());
//! assert!((gap - 60.0).abs() < 1.0);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod body;
pub mod damping;
pub mod floor;
pub mod spring;
pub mod pin;
pub mod impulse;
pub mod simulator;
pub mod scenario;
pub mod overlay;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec2;
pub use body::{Body, BodyId, BodyKind};
pub use damping::DampingModel;
pub use floor::{FloorContact, FloorParams};
pub use spring::{OptimumDistance, SpringConstraint};
pub use pin::{PinConstraint, PinSource};
pub use impulse::ImpulseInjector;
pub use simulator::Simulator;
pub use scenario::{ScenarioConfig, Scene};
pub use overlay::DebugShape;
pub use config::{ImpulseJitter, PinForceMode, SimConfig};
pub use observer::{Degeneracy, StepObserver, NoOpStepObserver};
pub use error::PhysicsError;
