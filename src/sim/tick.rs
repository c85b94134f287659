//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::enemy::update_enemies;
use super::level::{cleanup_world, extend_world};
use super::player::update_player;
use super::state::GameState;
use crate::tuning::Tuning;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Move left (held)
    pub left: bool,
    /// Move right (held); wins when both directions are held
    pub right: bool,
    /// Jump (one-shot: true only on the tick after a press)
    pub jump: bool,
    /// Dash (held; re-triggers when the previous dash runs out)
    pub dash: bool,
}

/// Advance the game state by one frame
///
/// Order matters: the player moves first so enemies test against the new
/// position, and generation/cleanup see this frame's camera.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    state.events.clear();
    state.frame += 1;

    update_player(state, input, tuning);
    update_enemies(state, tuning);
    extend_world(state, tuning);
    cleanup_world(state, tuning);
}
