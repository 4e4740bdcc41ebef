/*
 * Clock Module
 *
 * Monotonic time sources for the attractor. The simulation never reads the
 * wall clock itself; callers hand it a Clock so the viewer can freeze time
 * while paused and tests can drive time by hand.
 */

/// A monotonic source of seconds elapsed since some fixed start.
pub trait Clock {
    fn elapsed_secs(&self) -> f32;
}

/// A clock that only moves when told to.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ManualClock {
    now: f32,
}

impl ManualClock {
    pub fn new(start: f32) -> Self {
        Self { now: start }
    }

    // Move time forward; negative steps are ignored to stay monotonic
    pub fn advance(&mut self, dt: f32) {
        if dt > 0.0 {
            self.now += dt;
        }
    }

    pub fn reset(&mut self) {
        self.now = 0.0;
    }
}

impl Clock for ManualClock {
    fn elapsed_secs(&self) -> f32 {
        self.now
    }
}
