//! Fixed-step accumulator
//!
//! Display refresh rates vary (60, 120, 144 Hz, or a throttled background
//! tab) while the simulation's balance is per 60 Hz frame. The clock turns
//! elapsed wall time into a whole number of simulation ticks.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt` seconds of wall time and return how many ticks to run.
    ///
    /// Long stalls are clamped and at most [`MAX_SUBSTEPS`] ticks are
    /// returned per call; time beyond that is dropped rather than queued.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        steps
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
