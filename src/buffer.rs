/*
 * Position Buffer Module
 *
 * The hand-off between the simulation and whatever draws it. The simulation
 * is the only writer: it fills the back half, then swaps. Readers only ever see
 * the front half, a complete frame of flattened x,y,z triples in boid order.
 */

use nannou::prelude::*;

/// The rendering side of the hand-off: "display these points".
pub trait PointSink {
    /// `positions` holds one x,y,z triple per boid, in boid order.
    fn update_positions(&mut self, positions: &[f32]);
}

impl PointSink for Vec<f32> {
    fn update_positions(&mut self, positions: &[f32]) {
        self.clear();
        self.extend_from_slice(positions);
    }
}

#[derive(Debug, Clone, Default)]
pub struct PositionBuffer {
    front: Vec<f32>,
    back: Vec<f32>,
    generation: u64,
}

impl PositionBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    // Write a full frame into the back half and make it visible
    pub fn publish<I>(&mut self, positions: I)
    where
        I: IntoIterator<Item = Vec3>,
    {
        self.back.clear();
        for p in positions {
            self.back.extend_from_slice(&[p.x, p.y, p.z]);
        }
        std::mem::swap(&mut self.front, &mut self.back);
        self.generation = self.generation.wrapping_add(1);
    }

    /// The latest complete frame.
    pub fn front(&self) -> &[f32] {
        &self.front
    }

    /// Incremented on every publish; readers compare it to spot a new frame.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn point_count(&self) -> usize {
        self.front.len() / 3
    }
}
