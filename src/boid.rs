/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid steers by four contributions:
 * 1. Alignment: Steer towards the average heading of neighbors
 * 2. Cohesion: Steer towards the average position of neighbors
 * 3. Separation: Avoid crowding neighbors (inverse-square repulsion)
 * 4. Attraction: Steer towards the drifting global attractor
 *
 * Neighbors are found by a brute-force scan over the whole flock. A boid is
 * excluded from its own scan by index, never by comparing positions.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::math::{self, MIN_DISTANCE_SQ};
use crate::params::{RuleWeights, SimulationParams};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boid {
    pub position: Vec3,
    pub velocity: Vec3,
    pub acceleration: Vec3,
    max_speed: f32,
    max_force: f32,
}

/// The four unweighted steering contributions computed for one boid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SteeringResult {
    pub alignment: Vec3,
    pub cohesion: Vec3,
    pub separation: Vec3,
    pub attraction: Vec3,
}

impl SteeringResult {
    // Combine the contributions with the rule weights
    pub fn weighted(&self, weights: &RuleWeights) -> Vec3 {
        self.alignment * weights.align
            + self.cohesion * weights.cohere
            + self.separation * weights.separate
            + self.attraction * weights.attract
    }
}

impl Boid {
    pub fn new(position: Vec3, velocity: Vec3, max_speed: f32, max_force: f32) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            max_speed,
            max_force,
        }
    }

    // Spawn a boid somewhere in the spawn cube with a small random velocity
    pub fn random<R: Rng>(rng: &mut R, params: &SimulationParams) -> Self {
        let position = vec3(
            sample_symmetric(rng, params.spawn_extent),
            sample_symmetric(rng, params.spawn_extent),
            sample_symmetric(rng, params.spawn_extent),
        );
        let velocity = vec3(
            sample_symmetric(rng, params.initial_speed),
            sample_symmetric(rng, params.initial_speed),
            sample_symmetric(rng, params.initial_speed),
        );
        Self::new(position, velocity, params.max_speed, params.max_force)
    }

    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    pub fn max_force(&self) -> f32 {
        self.max_force
    }

    // Apply a force to the boid
    pub fn apply_force(&mut self, force: Vec3) {
        self.acceleration += force;
    }

    // Update the boid's velocity and position from the accumulated acceleration
    pub fn integrate(&mut self) {
        self.velocity += self.acceleration;

        // Limit speed before moving so a boid never covers more than max_speed per tick
        self.velocity = math::limit(self.velocity, self.max_speed);

        self.position += self.velocity;

        self.acceleration = Vec3::ZERO;
    }

    // Wrap the boid around the faces of the cubic domain
    pub fn wrap_bounds(&mut self, bounds: f32) {
        self.position.x = wrap_axis(self.position.x, bounds);
        self.position.y = wrap_axis(self.position.y, bounds);
        self.position.z = wrap_axis(self.position.z, bounds);
    }

    /// Computes all four steering contributions for the boid stored at
    /// `index` in `flock`, against the state of `flock` as given.
    pub fn compute_steering(
        &self,
        index: usize,
        flock: &[Boid],
        params: &SimulationParams,
        elapsed: f32,
    ) -> SteeringResult {
        SteeringResult {
            alignment: self.alignment(index, flock, params.align_radius),
            cohesion: self.cohesion(index, flock, params.cohere_radius),
            separation: self.separation(index, flock, params.separate_radius),
            attraction: self.attraction(params.attractor.target(elapsed)),
        }
    }

    // Calculate alignment force (steer towards average heading of neighbors)
    pub fn alignment(&self, index: usize, flock: &[Boid], perception_radius: f32) -> Vec3 {
        match self.average_neighbor_velocity(index, flock, perception_radius) {
            Some(average) => self.steer(average),
            None => Vec3::ZERO,
        }
    }

    // Calculate cohesion force (steer towards average position of neighbors)
    pub fn cohesion(&self, index: usize, flock: &[Boid], perception_radius: f32) -> Vec3 {
        match self.average_neighbor_position(index, flock, perception_radius) {
            Some(centroid) => self.steer(centroid - self.position),
            None => Vec3::ZERO,
        }
    }

    // Calculate separation force (avoid crowding neighbors)
    pub fn separation(&self, index: usize, flock: &[Boid], perception_radius: f32) -> Vec3 {
        match self.average_repulsion(index, flock, perception_radius) {
            Some(repulsion) => self.steer(repulsion),
            None => Vec3::ZERO,
        }
    }

    // Steer towards the attractor at full force regardless of distance
    pub fn attraction(&self, target: Vec3) -> Vec3 {
        math::set_magnitude(target - self.position, self.max_force)
    }

    /// Mean velocity of the other boids strictly inside `perception_radius`,
    /// or `None` when there are none.
    pub fn average_neighbor_velocity(
        &self,
        index: usize,
        flock: &[Boid],
        perception_radius: f32,
    ) -> Option<Vec3> {
        let mut sum = Vec3::ZERO;
        let mut count = 0;
        for other in neighbors(self.position, index, flock, perception_radius) {
            sum += other.velocity;
            count += 1;
        }
        (count > 0).then(|| sum / count as f32)
    }

    /// Centroid of the other boids strictly inside `perception_radius`.
    pub fn average_neighbor_position(
        &self,
        index: usize,
        flock: &[Boid],
        perception_radius: f32,
    ) -> Option<Vec3> {
        let mut sum = Vec3::ZERO;
        let mut count = 0;
        for other in neighbors(self.position, index, flock, perception_radius) {
            sum += other.position;
            count += 1;
        }
        (count > 0).then(|| sum / count as f32)
    }

    /// Mean of `(self - other) / d²` over the neighbors, before any steering
    /// is derived from it. Coincident boids contribute nothing.
    pub fn average_repulsion(
        &self,
        index: usize,
        flock: &[Boid],
        perception_radius: f32,
    ) -> Option<Vec3> {
        let mut sum = Vec3::ZERO;
        let mut count = 0;
        for other in neighbors(self.position, index, flock, perception_radius) {
            let diff = self.position - other.position;
            let d_squared = diff.length_squared().max(MIN_DISTANCE_SQ);
            sum += diff / d_squared;
            count += 1;
        }
        (count > 0).then(|| sum / count as f32)
    }

    fn steer(&self, desired: Vec3) -> Vec3 {
        math::steer(desired, self.velocity, self.max_speed, self.max_force)
    }
}

// Every boid other than flock[index] strictly inside the radius
fn neighbors<'a>(
    position: Vec3,
    index: usize,
    flock: &'a [Boid],
    perception_radius: f32,
) -> impl Iterator<Item = &'a Boid> + 'a {
    let radius_squared = perception_radius * perception_radius;
    flock
        .iter()
        .enumerate()
        .filter(move |&(j, other)| {
            j != index && position.distance_squared(other.position) < radius_squared
        })
        .map(|(_, other)| other)
}

fn wrap_axis(value: f32, bounds: f32) -> f32 {
    if value > bounds {
        -bounds
    } else if value < -bounds {
        bounds
    } else {
        value
    }
}

fn sample_symmetric<R: Rng>(rng: &mut R, extent: f32) -> f32 {
    if extent > 0.0 {
        rng.gen_range(-extent..extent)
    } else {
        0.0
    }
}
