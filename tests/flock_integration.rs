use boids3d::{
    Boid, Clock, Flock, ManualClock, PointSink, RuleWeights, SimulationParams, UpdateMode,
};
use nannou::prelude::*;

fn pair_at_rest() -> Vec<Boid> {
    vec![
        Boid::new(vec3(0.0, 0.0, 0.0), Vec3::ZERO, 5.0, 0.2),
        Boid::new(vec3(10.0, 0.0, 0.0), Vec3::ZERO, 5.0, 0.2),
    ]
}

fn run(params: SimulationParams, steps: usize) -> Vec<f32> {
    let mut flock = Flock::new(params).expect("flock");
    let mut clock = ManualClock::default();
    for _ in 0..steps {
        flock.tick(&clock);
        clock.advance(1.0 / 60.0);
    }
    flock.positions().to_vec()
}

#[test]
fn separation_dominates_cohesion_for_close_pair() {
    let flock = Flock::from_boids(pair_at_rest(), SimulationParams::default()).expect("flock");
    let steering = flock.steering_for(0, 0.0).expect("boid 0");

    // Pushed away from boid 1 (towards -x), pulled towards it by cohesion (+x)
    assert!(steering.separation.x < 0.0);
    assert!(steering.cohesion.x > 0.0);
    assert_eq!(steering.alignment, Vec3::ZERO);
    assert!(steering.separation.y.abs() < 1.0e-6 && steering.separation.z.abs() < 1.0e-6);

    let weights = RuleWeights::default();
    let local = steering.separation * weights.separate + steering.cohesion * weights.cohere;
    assert!(local.x < 0.0);
    assert!((local.x + 0.1).abs() < 1.0e-5);
}

#[test]
fn one_step_moves_close_pair_apart() {
    let params = SimulationParams {
        weights: RuleWeights {
            attract: 0.0,
            ..RuleWeights::default()
        },
        ..SimulationParams::default()
    };
    let mut flock = Flock::from_boids(pair_at_rest(), params).expect("flock");
    flock.step(0.0);

    let boids = flock.boids();
    assert!((boids[0].velocity.x + 0.1).abs() < 1.0e-5);
    assert!((boids[1].velocity.x - 0.1).abs() < 1.0e-5);
    assert!(boids[0].position.x < 0.0);
    assert!(boids[1].position.x > 10.0);
}

#[test]
fn seeded_runs_are_deterministic() {
    let params = SimulationParams {
        population_size: 80,
        seed: Some(0xB01D5),
        ..SimulationParams::default()
    };

    let a = run(params.clone(), 40);
    let b = run(params.clone(), 40);
    assert_eq!(a, b, "identical seeds should produce identical frames");

    let c = run(
        SimulationParams {
            seed: Some(0xF00D),
            ..params
        },
        40,
    );
    assert_ne!(a, c, "different seeds should produce different frames");
}

#[test]
fn explicit_initial_state_is_deterministic_in_both_modes() {
    for mode in [UpdateMode::Snapshot, UpdateMode::Interleaved] {
        let params = SimulationParams {
            update_mode: mode,
            ..SimulationParams::default()
        };
        let boids: Vec<Boid> = (0..30)
            .map(|i| {
                let f = i as f32;
                Boid::new(
                    vec3(f * 7.0 - 100.0, (f * 1.3).sin() * 50.0, (f * 0.7).cos() * 50.0),
                    vec3((f * 0.1).sin(), (f * 0.2).cos(), 0.5),
                    5.0,
                    0.2,
                )
            })
            .collect();

        let mut first = Flock::from_boids(boids.clone(), params.clone()).expect("flock");
        let mut second = Flock::from_boids(boids, params).expect("flock");
        for step in 0..25 {
            let t = step as f32 * 0.016;
            first.step(t);
            second.step(t);
        }
        assert_eq!(first.positions(), second.positions());
    }
}

#[test]
fn lone_boid_feels_only_the_attractor_every_step() {
    let params = SimulationParams {
        population_size: 1,
        seed: Some(4),
        ..SimulationParams::default()
    };
    let mut flock = Flock::new(params).expect("flock");
    let mut clock = ManualClock::new(10.0);

    for _ in 0..100 {
        let steering = flock.steering_for(0, clock.elapsed_secs()).expect("boid");
        assert_eq!(steering.alignment, Vec3::ZERO);
        assert_eq!(steering.cohesion, Vec3::ZERO);
        assert_eq!(steering.separation, Vec3::ZERO);
        assert!(steering.attraction.length() <= 0.2 + 1.0e-5);

        flock.tick(&clock);
        clock.advance(0.05);
    }
}

#[test]
fn boids_stay_inside_domain_and_under_speed_limit() {
    let params = SimulationParams {
        population_size: 150,
        bounds: 60.0,
        spawn_extent: 60.0,
        seed: Some(21),
        ..SimulationParams::default()
    };
    let mut flock = Flock::new(params).expect("flock");
    for step in 0..200 {
        flock.step(step as f32 / 60.0);
        for boid in flock.boids() {
            assert!(boid.velocity.length() <= 5.0 + 1.0e-4);
            assert!(boid.position.x.abs() <= 60.0);
            assert!(boid.position.y.abs() <= 60.0);
            assert!(boid.position.z.abs() <= 60.0);
        }
    }
}

#[test]
fn boundary_wrap_is_exact() {
    let params = SimulationParams {
        weights: RuleWeights {
            align: 0.0,
            cohere: 0.0,
            separate: 0.0,
            attract: 0.0,
        },
        ..SimulationParams::default()
    };
    let boid = Boid::new(vec3(249.5, 0.0, 0.0), vec3(1.5, 0.0, 0.0), 5.0, 0.2);
    let mut flock = Flock::from_boids(vec![boid], params).expect("flock");
    flock.step(0.0);

    assert_eq!(flock.positions(), &[-250.0, 0.0, 0.0]);
    assert_eq!(flock.boids()[0].velocity, vec3(1.5, 0.0, 0.0));
}

struct CountingSink {
    frames: usize,
    last: Vec<f32>,
}

impl PointSink for CountingSink {
    fn update_positions(&mut self, positions: &[f32]) {
        self.frames += 1;
        self.last = positions.to_vec();
    }
}

#[test]
fn renderer_receives_one_triple_per_boid_in_order() {
    let params = SimulationParams {
        population_size: 7,
        seed: Some(99),
        ..SimulationParams::default()
    };
    let mut flock = Flock::new(params).expect("flock");
    let mut sink = CountingSink {
        frames: 0,
        last: Vec::new(),
    };

    for step in 0..3 {
        flock.step(step as f32);
        flock.publish(&mut sink);
    }

    assert_eq!(sink.frames, 3);
    assert_eq!(sink.last.len(), 21);
    for (i, boid) in flock.boids().iter().enumerate() {
        assert_eq!(&sink.last[i * 3..i * 3 + 3], &[boid.position.x, boid.position.y, boid.position.z]);
    }
}

#[test]
fn params_file_round_trip() {
    let dir = std::env::temp_dir().join(format!("boids3d-params-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("params.json");

    let params = SimulationParams {
        population_size: 42,
        bounds: 120.0,
        update_mode: UpdateMode::Interleaved,
        ..SimulationParams::default()
    };
    std::fs::write(&path, params.to_json_string().expect("json")).expect("write");

    let loaded = SimulationParams::load(&path).expect("load");
    assert_eq!(loaded.population_size, 42);
    assert_eq!(loaded.bounds, 120.0);
    assert_eq!(loaded.update_mode, UpdateMode::Interleaved);

    let missing = SimulationParams::load(dir.join("missing.json"));
    assert!(matches!(missing, Err(boids3d::ConfigError::Io(_))));

    std::fs::remove_dir_all(&dir).ok();
}
