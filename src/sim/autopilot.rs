//! Demo player
//!
//! A greedy controller that produces one [`TickInput`] from the current
//! state: always run right, jump at ledges and in front of enemies, and burn
//! the air jump when falling with nothing underneath. Used by the headless
//! runner and for soak-testing the world lifecycle.

use super::state::GameState;
use super::tick::TickInput;

/// How far past the player's front edge to look for ground
const LEDGE_LOOKAHEAD: f32 = 12.0;
/// Enemies closer than this (horizontally, in front) trigger a jump
const ENEMY_RANGE: f32 = 60.0;

/// Decide the input for the next tick
pub fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player;
    let body = player.rect();
    let feet = body.bottom();

    let mut input = TickInput {
        right: true,
        ..Default::default()
    };

    if player.on_ground {
        let probe_x = body.right() + LEDGE_LOOKAHEAD;
        let ground_ahead = state.platforms.iter().any(|p| {
            p.rect.left() <= probe_x && p.rect.right() >= probe_x && p.rect.top() >= feet - 1.0
        });

        let enemy_ahead = state.enemies.iter().any(|e| {
            e.rect.left() >= body.left()
                && e.rect.left() - body.right() < ENEMY_RANGE
                && body.overlaps_y(&e.rect)
        });

        input.jump = !ground_ahead || enemy_ahead;
    } else if player.vel.y > 0.0 && player.jumps_left > 0 {
        let ground_below = state
            .platforms
            .iter()
            .any(|p| body.overlaps_x(&p.rect) && p.rect.top() >= feet);
        input.jump = !ground_below;
    }

    input
}
