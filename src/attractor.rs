/*
 * Attractor Module
 *
 * A global target point that drifts along a Lissajous path. Each axis follows
 * its own sinusoid with a distinct frequency, so the flock is led around the
 * volume without settling into a short repeating loop.
 */

use nannou::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attractor {
    /// Half-extent of the path on each axis.
    pub amplitude: [f32; 3],
    /// Angular frequency per axis, in radians per second.
    pub frequency: [f32; 3],
    pub phase: [f32; 3],
}

impl Default for Attractor {
    fn default() -> Self {
        Self {
            amplitude: [150.0, 150.0, 150.0],
            frequency: [0.31, 0.47, 0.23],
            phase: [0.0, std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_4],
        }
    }
}

impl Attractor {
    // Position of the attractor after `elapsed` seconds
    pub fn target(&self, elapsed: f32) -> Vec3 {
        vec3(
            self.amplitude[0] * (self.frequency[0] * elapsed + self.phase[0]).sin(),
            self.amplitude[1] * (self.frequency[1] * elapsed + self.phase[1]).sin(),
            self.amplitude[2] * (self.frequency[2] * elapsed + self.phase[2]).sin(),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.amplitude
            .iter()
            .chain(self.frequency.iter())
            .chain(self.phase.iter())
            .all(|v| v.is_finite())
    }
}
