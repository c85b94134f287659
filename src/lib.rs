//! Sky Dash - an endless side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level generation)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction (keyboard input)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use tuning::{Span, Tuning, TuningError};

/// Timing constants for the frame loop
pub mod consts {
    /// Fixed simulation timestep (60 Hz; all balance values are per tick)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock gap fed to the clock in one frame (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;
}
