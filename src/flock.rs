/*
 * Flock Module
 *
 * This module owns the population and drives one discrete time-step:
 * every boid computes its steering against the rest of the flock, the weighted
 * sum becomes its acceleration, it integrates, wraps at the domain faces, and
 * finally the whole frame of positions is published for rendering.
 *
 * Neighbor lookup is a brute-force O(n²) scan.
 */

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use crate::boid::{Boid, SteeringResult};
use crate::buffer::{PointSink, PositionBuffer};
use crate::clock::Clock;
use crate::error::ConfigError;
use crate::params::{RuleWeights, SimulationParams, UpdateMode};

pub struct Flock {
    boids: Vec<Boid>,
    params: SimulationParams,
    buffer: PositionBuffer,
    steps: u64,
}

impl Flock {
    /// Seeds `population_size` boids at random. Uses `params.seed` when set,
    /// otherwise draws a seed from entropy and logs it.
    pub fn new(params: SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;

        let seed = params.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let boids = (0..params.population_size)
            .map(|_| Boid::random(&mut rng, &params))
            .collect();

        debug!(
            population = params.population_size,
            bounds = params.bounds,
            seed,
            mode = ?params.update_mode,
            "seeded flock"
        );
        Ok(Self::assemble(boids, params))
    }

    /// Builds a flock from an explicit set of boids. `population_size` is
    /// taken from `boids.len()`.
    ///
    /// Each boid keeps its own speed and force limits, which may differ from
    /// `params.max_speed`/`params.max_force`; those only apply to seeded
    /// boids. Limits must still be usable and state must be finite.
    pub fn from_boids(boids: Vec<Boid>, mut params: SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        for boid in &boids {
            check_boid(boid)?;
        }
        params.population_size = boids.len();
        Ok(Self::assemble(boids, params))
    }

    fn assemble(boids: Vec<Boid>, params: SimulationParams) -> Self {
        let mut buffer = PositionBuffer::new();
        buffer.publish(boids.iter().map(|b| b.position));
        Self {
            boids,
            params,
            buffer,
            steps: 0,
        }
    }

    /// Advances the flock by one tick. `elapsed` is the time in seconds fed to
    /// the attractor.
    pub fn step(&mut self, elapsed: f32) {
        match self.params.update_mode {
            UpdateMode::Snapshot => self.step_snapshot(elapsed),
            UpdateMode::Interleaved => self.step_interleaved(elapsed),
        }

        self.buffer.publish(self.boids.iter().map(|b| b.position));
        self.steps += 1;
        trace!(step = self.steps, elapsed, "flock stepped");
    }

    // Step using the time reported by the clock
    pub fn tick(&mut self, clock: &dyn Clock) {
        self.step(clock.elapsed_secs());
    }

    // Every boid reads the same pre-step state of the flock
    fn step_snapshot(&mut self, elapsed: f32) {
        let snapshot = self.boids.clone();
        let params = &self.params;

        for (i, boid) in self.boids.iter_mut().enumerate() {
            let steering = snapshot[i].compute_steering(i, &snapshot, params, elapsed);
            boid.apply_force(steering.weighted(&params.weights));
            boid.integrate();
            boid.wrap_bounds(params.bounds);
        }
    }

    // Each boid moves before the next one looks around
    fn step_interleaved(&mut self, elapsed: f32) {
        for i in 0..self.boids.len() {
            let steering = self.boids[i].compute_steering(i, &self.boids, &self.params, elapsed);
            let boid = &mut self.boids[i];
            boid.apply_force(steering.weighted(&self.params.weights));
            boid.integrate();
            boid.wrap_bounds(self.params.bounds);
        }
    }

    /// The unweighted steering the boid at `index` would compute right now,
    /// or `None` if the index is out of range.
    pub fn steering_for(&self, index: usize, elapsed: f32) -> Option<SteeringResult> {
        let boid = self.boids.get(index)?;
        Some(boid.compute_steering(index, &self.boids, &self.params, elapsed))
    }

    // Hand the latest frame to the renderer
    pub fn publish(&self, sink: &mut dyn PointSink) {
        sink.update_positions(self.buffer.front());
    }

    /// Flattened x,y,z positions from the last published frame.
    pub fn positions(&self) -> &[f32] {
        self.buffer.front()
    }

    pub fn frame_generation(&self) -> u64 {
        self.buffer.generation()
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    // Non-finite weights are ignored
    pub fn set_weights(&mut self, weights: RuleWeights) {
        if weights.is_finite() {
            self.params.weights = weights;
        }
    }

    // Update the perception radii without reseeding the flock
    pub fn set_radii(&mut self, align: f32, cohere: f32, separate: f32) {
        self.params.align_radius = align.max(0.0);
        self.params.cohere_radius = cohere.max(0.0);
        self.params.separate_radius = separate.max(0.0);
    }

    pub fn set_attractor(&mut self, attractor: crate::attractor::Attractor) {
        self.params.attractor = attractor;
    }
}

fn check_boid(boid: &Boid) -> Result<(), ConfigError> {
    if !boid.max_speed().is_finite() || boid.max_speed() <= 0.0 {
        return Err(ConfigError::Invalid("boid maxSpeed must be positive"));
    }
    if !boid.max_force().is_finite() || boid.max_force() < 0.0 {
        return Err(ConfigError::Invalid("boid maxForce must be non-negative"));
    }
    if !boid.position.is_finite()
        || !boid.velocity.is_finite()
        || !boid.acceleration.is_finite()
    {
        return Err(ConfigError::Invalid("boid state must be finite"));
    }
    Ok(())
}
