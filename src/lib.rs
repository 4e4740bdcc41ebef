/*
 * Boid Flocking Simulation in 3D - Module Definitions
 *
 * The simulation core (boid, flock, params, attractor, clock, buffer, math)
 * has no knowledge of windows or drawing; it publishes positions through the
 * PointSink trait. The remaining modules make up the nannou viewer that
 * consumes them.
 */

// Re-export key components for easier access
pub use attractor::Attractor;
pub use boid::{Boid, SteeringResult};
pub use buffer::{PointSink, PositionBuffer};
pub use clock::{Clock, ManualClock};
pub use error::ConfigError;
pub use flock::Flock;
pub use params::{ParamChanges, RuleWeights, SimulationParams, UpdateMode};

// Simulation core
pub mod attractor;
pub mod boid;
pub mod buffer;
pub mod clock;
pub mod error;
pub mod flock;
pub mod math;
pub mod params;

// Viewer
pub mod app;
pub mod camera;
pub mod debug;
pub mod input;
pub mod renderer;
pub mod ui;
