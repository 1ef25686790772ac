//! Debug-draw primitives for a host overlay.

use crate::float::Float;
use crate::simulator::Simulator;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// Something a debug overlay can draw.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DebugShape<F: Float> {
    /// Spring segment. Positive tension means compressed.
    Spring { from: Vec2<F>, to: Vec2<F>, tension: F },
    /// Segment from a pin's anchor to its body.
    Pin { anchor: Vec2<F>, target: Vec2<F> },
    /// Per-step velocity of a moving, enabled body.
    Velocity { origin: Vec2<F>, velocity: Vec2<F> },
}

/// Shapes for the current simulator state: springs, then pins, then velocities.
pub fn debug_shapes<F: Float>(sim: &Simulator<F>) -> AllocVec<DebugShape<F>> {
    let bodies = sim.bodies();
    let mut shapes = AllocVec::with_capacity(sim.springs().len() + sim.pins().len() + bodies.len());

    for spring in sim.springs() {
        shapes.push(DebugShape::Spring {
            from: bodies[spring.a.index()].position,
            to: bodies[spring.b.index()].position,
            tension: spring.tension(bodies),
        });
    }

    for pin in sim.pins() {
        shapes.push(DebugShape::Pin {
            anchor: pin.anchor(),
            target: bodies[pin.target.index()].position,
        });
    }

    for body in bodies.iter().filter(|b| b.enabled && b.velocity != Vec2::zero()) {
        shapes.push(DebugShape::Velocity { origin: body.position, velocity: body.velocity });
    }

    shapes
}
