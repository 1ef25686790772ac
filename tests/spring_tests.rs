use springy::{
    Body, BodyId, Degeneracy, OptimumDistance, SimConfig, Simulator, SpringConstraint,
    StepObserver, Vec2,
};

fn two_bodies(distance: f64, optimum: f64, mass_a: f64, mass_b: f64) -> (Simulator<f64>, BodyId, BodyId) {
    let mut sim = Simulator::new(SimConfig::new()).unwrap();
    let a = sim.add_body(Body::new(Vec2::new(0.0, 0.0), mass_a)).unwrap();
    let b = sim.add_body(Body::new(Vec2::new(distance, 0.0), mass_b)).unwrap();
    sim.add_spring(a, b, 1.0, OptimumDistance::Fixed(optimum)).unwrap();
    (sim, a, b)
}

#[test]
fn equilibrium_holds_at_optimum_distance() {
    let (mut sim, a, b) = two_bodies(60.0, 60.0, 5.0, 1.0);
    for _ in 0..10 {
        sim.step(1.0 / 60.0);
    }
    assert_eq!(sim.velocity(a).unwrap().length(), 0.0);
    assert_eq!(sim.velocity(b).unwrap().length(), 0.0);
    assert_eq!(sim.position(a), Some(Vec2::new(0.0, 0.0)));
    assert_eq!(sim.position(b), Some(Vec2::new(60.0, 0.0)));
}

#[test]
fn each_end_is_scaled_by_the_mass_ratio() {
    // Heavy body a (mass 5), light body b (mass 1), tension -20.
    let bodies = vec![
        Body::new(Vec2::new(0.0f64, 0.0), 5.0),
        Body::new(Vec2::new(80.0f64, 0.0), 1.0),
    ];
    let spring = SpringConstraint::new(BodyId::new(0), BodyId::new(1), 60.0, 1.0);
    let (on_heavy, on_light) = spring.compute_forces(&bodies);

    // stiffness * (other / own) * |tension|
    assert!((on_heavy.length() - 20.0 / 5.0).abs() < 1e-12, "heavy: {}", on_heavy.length());
    assert!((on_light.length() - 20.0 * 5.0).abs() < 1e-12, "light: {}", on_light.length());
    assert!(on_light.length() > on_heavy.length());

    // Same tension with equal masses gives the unscaled force.
    let equal = vec![
        Body::new(Vec2::new(0.0f64, 0.0), 1.0),
        Body::new(Vec2::new(80.0f64, 0.0), 1.0),
    ];
    let (unit_a, unit_b) = spring.compute_forces(&equal);
    assert!((on_light.length() / unit_b.length() - 5.0).abs() < 1e-12);
    assert!((unit_a.length() / on_heavy.length() - 5.0).abs() < 1e-12);
}

#[test]
fn two_body_scenario_converges_to_optimum() {
    let (mut sim, heavy, light) = two_bodies(80.0, 60.0, 5.0, 1.0);
    let dt = 1.0 / 60.0;

    sim.step(dt);
    let heavy_moved = sim.position(heavy).unwrap().distance(Vec2::new(0.0, 0.0));
    let light_moved = sim.position(light).unwrap().distance(Vec2::new(80.0, 0.0));
    assert!(heavy_moved > 0.0);
    assert!(
        light_moved >= 5.0 * heavy_moved,
        "light moved {}, heavy moved {}",
        light_moved,
        heavy_moved
    );

    let separation = |sim: &Simulator<f64>| {
        sim.position(heavy).unwrap().distance(sim.position(light).unwrap())
    };

    // Approach is monotonic until the pair first reaches the optimum.
    let mut previous = separation(&sim);
    let mut steps = 1;
    while previous > 60.0 {
        sim.step(dt);
        steps += 1;
        let current = separation(&sim);
        assert!(current < previous, "separation grew from {} to {}", previous, current);
        previous = current;
    }

    while steps < 100 {
        sim.step(dt);
        steps += 1;
    }
    let last = separation(&sim);
    assert!((last - 60.0).abs() < 1.0, "separation after 100 steps: {}", last);
}

#[test]
fn compressed_pair_separates() {
    let (mut sim, a, b) = two_bodies(30.0, 60.0, 1.0, 1.0);
    for _ in 0..5 {
        sim.step(1.0 / 60.0);
    }
    let gap = sim.position(a).unwrap().distance(sim.position(b).unwrap());
    assert!(gap > 30.0, "gap = {}", gap);
}

#[test]
fn stiffness_is_validated() {
    let mut sim = Simulator::<f64>::new(SimConfig::new()).unwrap();
    let a = sim.add_body(Body::new(Vec2::new(0.0, 0.0), 1.0)).unwrap();
    let b = sim.add_body(Body::new(Vec2::new(1.0, 0.0), 1.0)).unwrap();
    assert_eq!(
        sim.add_spring(a, b, -0.5, OptimumDistance::Auto),
        Err(springy::PhysicsError::InvalidStiffness)
    );
    assert_eq!(
        sim.add_spring(a, b, 1.0, OptimumDistance::Fixed(-3.0)),
        Err(springy::PhysicsError::InvalidOptimumDistance)
    );
    assert!(sim.springs().is_empty());
}

#[derive(Default)]
struct CoincidentCounter {
    springs: Vec<(BodyId, BodyId)>,
}

impl StepObserver for CoincidentCounter {
    fn on_degenerate(&mut self, degeneracy: Degeneracy) {
        if let Degeneracy::CoincidentSpring { a, b } = degeneracy {
            self.springs.push((a, b));
        }
    }
}

#[test]
fn coincident_ends_are_skipped_and_reported() {
    let mut sim = Simulator::new(SimConfig::<f64>::new()).unwrap();
    let a = sim.add_body(Body::new(Vec2::new(7.0, 7.0), 2.0)).unwrap();
    let b = sim.add_body(Body::new(Vec2::new(7.0, 7.0), 1.0)).unwrap();
    sim.add_spring(a, b, 1.0, OptimumDistance::Fixed(30.0)).unwrap();

    let mut counter = CoincidentCounter::default();
    for _ in 0..5 {
        sim.step_observed(1.0 / 60.0, &mut counter);
    }
    assert_eq!(counter.springs, vec![(a, b); 5]);
    assert_eq!(sim.velocity(a), Some(Vec2::zero()));
    assert_eq!(sim.velocity(b), Some(Vec2::zero()));
    assert_eq!(sim.body(a).unwrap().force, Vec2::zero());
    assert!(sim.bodies().iter().all(|body| body.is_finite()));
}
