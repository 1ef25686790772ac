use springy::{Body, FloorContact, FloorParams, SimConfig, Simulator, Vec2};

const DT: f64 = 1.0 / 60.0;

fn dropped(y: f64, vy: f64, floor: FloorParams<f64>) -> (Simulator<f64>, springy::BodyId) {
    let mut sim = Simulator::new(SimConfig::new()).unwrap();
    let id = sim
        .add_body(Body::grounded(Vec2::new(0.0, y), 1.0, floor).with_velocity(Vec2::new(0.0, vy)))
        .unwrap();
    (sim, id)
}

#[test]
fn crossing_the_floor_clamps_and_reflects() {
    let floor = FloorParams::new(0.0, 500.0, 0.6).unwrap();
    let (mut sim, id) = dropped(490.0, 15.0, floor);
    sim.step(DT);
    assert_eq!(sim.position(id).unwrap().y, 500.0);
    assert_eq!(sim.velocity(id).unwrap().y, -15.0 * 0.6);
}

#[test]
fn crossing_under_gravity_reflects_the_accelerated_speed() {
    let floor = FloorParams::new(39.8 * 0.4, 500.0, 0.6).unwrap();
    let (mut sim, id) = dropped(490.0, 15.0, floor);
    sim.step(DT);
    let v = 15.0 + floor.gravity_accel * DT;
    assert_eq!(sim.position(id).unwrap().y, 500.0);
    assert_eq!(sim.velocity(id).unwrap().y, -v * 0.6);
}

#[test]
fn drop_and_bounce_loses_energy() {
    let floor = FloorParams::new(39.8 * 0.4, 500.0, 0.6).unwrap();
    let (mut sim, id) = dropped(0.0, 0.0, floor);

    let mut ys = Vec::new();
    for _ in 0..2000 {
        sim.step(DT);
        let y = sim.position(id).unwrap().y;
        assert!(y <= 500.0, "body tunnelled to {}", y);
        ys.push(y);
    }
    assert!(ys.iter().any(|&y| y == 500.0), "body never reached the floor");

    // Peak heights above the floor: local minima of y.
    let mut peaks = vec![500.0];
    for i in 1..ys.len() - 1 {
        if ys[i] <= ys[i - 1] && ys[i] < ys[i + 1] {
            peaks.push(500.0 - ys[i]);
        }
    }
    assert!(peaks.len() >= 4, "expected several bounces, got {:?}", peaks);

    // Each bounce keeps restitution^2 of the height, within one step of
    // discretisation slack.
    for pair in peaks.windows(2).take(3) {
        let bound = pair[0] * 0.6 * 0.6 * 1.1;
        assert!(pair[1] <= bound, "peak {} after {} exceeds {}", pair[1], pair[0], bound);
    }
    // Below about a unit the hop settles into a small steady bounce.
    let large: Vec<f64> = peaks.iter().copied().take_while(|&p| p > 1.0).collect();
    assert!(large.len() >= 6, "too few large bounces: {:?}", large);
    for pair in large.windows(2) {
        assert!(pair[1] < pair[0], "peaks did not shrink: {:?}", large);
    }
}

#[test]
fn resting_body_stays_put() {
    let floor = FloorParams::new(39.8 * 0.4, 500.0, 0.6).unwrap();
    let (mut sim, id) = dropped(500.0, 0.0, floor);
    for _ in 0..300 {
        sim.step(DT);
    }
    assert_eq!(sim.position(id), Some(Vec2::new(0.0, 500.0)));
    assert_eq!(sim.velocity(id), Some(Vec2::zero()));
    assert_eq!(sim.body(id).unwrap().contact(), Some(FloorContact::Grounded));
}

#[test]
fn grounded_body_is_not_damped() {
    let floor = FloorParams::new(0.0, 500.0, 0.6).unwrap();
    let mut sim = Simulator::new(SimConfig::new()).unwrap();
    let id = sim
        .add_body(Body::grounded(Vec2::new(0.0, 500.0), 1.0, floor).with_velocity(Vec2::new(2.0, 0.0)))
        .unwrap();
    for _ in 0..10 {
        sim.step(DT);
    }
    assert_eq!(sim.velocity(id), Some(Vec2::new(2.0, 0.0)));
    assert_eq!(sim.position(id), Some(Vec2::new(20.0, 500.0)));
}

#[test]
fn config_floor_uses_scaled_gravity() {
    let config = SimConfig::<f64>::new();
    let floor = config.floor_params();
    let mut sim = Simulator::new(config).unwrap();
    let id = sim.add_body(Body::grounded(Vec2::new(0.0, 0.0), 1.0, floor)).unwrap();
    sim.step(DT);
    let expected = floor.gravity_accel * DT;
    assert!((sim.velocity(id).unwrap().y - expected).abs() < 1e-12);
    assert!((floor.gravity_accel - 39.8 * 0.4).abs() < 1e-5);
}
