//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (platforms sorted by x, enemies in spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod enemy;
pub mod geometry;
pub mod level;
pub mod player;
pub mod state;
pub mod tick;

pub use autopilot::autopilot;
pub use clock::FixedStep;
pub use geometry::{Rect, intersects};
pub use level::{cleanup_world, extend_world, generate_segment};
pub use state::{Enemy, FrameView, GameEvent, GameState, MAX_JUMPS, Platform, Player};
pub use tick::{TickInput, tick};
