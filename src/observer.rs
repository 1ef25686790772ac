//! Step observer trait for monitoring the step pipeline.

use crate::body::BodyId;

/// Geometry for which a force direction is undefined. The affected force is
/// skipped for the step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Degeneracy {
    /// Both ends of a spring share a position.
    CoincidentSpring { a: BodyId, b: BodyId },
    /// A pinned body sits exactly on its anchor.
    PinAtTarget { target: BodyId },
}

/// Trait for observing simulation steps.
///
/// Implement this trait to drive debug overlays, count events or profile
/// the pipeline. All methods have default no-op implementations.
pub trait StepObserver {
    /// Called after grounded bodies applied gravity, collided and moved.
    fn on_floor_pass(&mut self) {}

    /// Called after all spring forces were accumulated.
    fn on_springs(&mut self) {}

    /// Called after all pin forces were accumulated.
    fn on_pins(&mut self) {}

    /// Called after free bodies were damped.
    fn on_damping(&mut self) {}

    /// Called after free bodies were integrated.
    fn on_integrate(&mut self) {}

    /// Called when a constraint is skipped because of degenerate geometry.
    fn on_degenerate(&mut self, _degeneracy: Degeneracy) {}

    /// Called when a simulation step is fully complete.
    fn on_step_complete(&mut self) {}
}

/// A no-op observer that does nothing. Use as default when no observation needed.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
