/*
 * Vector Math Module
 *
 * Guarded helpers for the steering math. Every helper returns the zero vector
 * instead of NaN when asked to rescale a vanishing vector.
 */

use nannou::prelude::*;

/// Squared lengths at or below this are treated as the zero vector. Anything
/// above it still has a direction that survives rescaling.
pub const EPSILON: f32 = f32::MIN_POSITIVE;

/// Floor applied to squared distances before dividing by them.
pub const MIN_DISTANCE_SQ: f32 = 1.0e-4;

// Rescale a vector to the given magnitude, or zero if it has no direction
#[inline]
pub fn set_magnitude(v: Vec3, magnitude: f32) -> Vec3 {
    let length_squared = v.length_squared();
    if length_squared <= EPSILON {
        return Vec3::ZERO;
    }
    v * (magnitude / length_squared.sqrt())
}

// Clamp the vector's magnitude to max_magnitude
#[inline]
pub fn limit(v: Vec3, max_magnitude: f32) -> Vec3 {
    if max_magnitude <= 0.0 {
        return Vec3::ZERO;
    }

    let length_squared = v.length_squared();
    if length_squared <= max_magnitude * max_magnitude {
        return v;
    }
    v * (max_magnitude / length_squared.sqrt())
}

/// Reynolds steering: scale `desired` to `max_speed`, subtract the current
/// velocity, and clamp the result to `max_force`.
///
/// A `desired` vector with no direction produces no steering at all.
#[inline]
pub fn steer(desired: Vec3, velocity: Vec3, max_speed: f32, max_force: f32) -> Vec3 {
    if desired.length_squared() <= EPSILON {
        return Vec3::ZERO;
    }
    let steering = set_magnitude(desired, max_speed) - velocity;
    limit(steering, max_force)
}
