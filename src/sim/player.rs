//! Player controller
//!
//! Runs once per tick, before enemies: turns the input snapshot into
//! velocity, integrates, lands on platforms and keeps the camera locked to
//! the player.

use super::geometry::{Rect, intersects};
use super::state::{GameEvent, GameState, MAX_JUMPS, Platform, Player};
use super::tick::TickInput;
use crate::tuning::Tuning;

/// Advance the player by one tick and update the camera
pub fn update_player(state: &mut GameState, input: &TickInput, tuning: &Tuning) {
    let was_on_ground = state.player.on_ground;

    apply_intent(&mut state.player, input, tuning);

    if input.jump {
        if let Some(double) = try_jump(&mut state.player, tuning) {
            state.emit(GameEvent::Jumped { double });
        }
    }

    if input.dash && start_dash(&mut state.player, tuning) {
        state.emit(GameEvent::DashStarted);
    }
    apply_dash(&mut state.player, tuning);

    integrate(&mut state.player, tuning);

    if resolve_landing(&mut state.player, &state.platforms, tuning) && !was_on_ground {
        state.emit(GameEvent::Landed);
    }

    recover_size(&mut state.player, &state.platforms, tuning);

    if state.player.pos.y > tuning.viewport_height {
        state.player.lives -= 1;
        state.player.respawn(state.camera_x, tuning);
        log::debug!(
            "frame {}: fell out of the world, {} lives left",
            state.frame,
            state.player.lives
        );
        state.emit(GameEvent::FellOut);
    }

    state.camera_x = state.player.pos.x - tuning.camera_lead;
}

/// Horizontal velocity from held direction keys. Right wins over left.
fn apply_intent(player: &mut Player, input: &TickInput, tuning: &Tuning) {
    let speed = if player.is_small {
        tuning.crawl_speed
    } else {
        tuning.move_speed
    };

    player.vel.x = if input.right {
        speed
    } else if input.left {
        -speed
    } else {
        0.0
    };
}

/// Spend a jump if one is left. Returns `Some(is_double_jump)` on success.
fn try_jump(player: &mut Player, tuning: &Tuning) -> Option<bool> {
    if player.jumps_left == 0 {
        return None;
    }

    let double = player.jumps_left < MAX_JUMPS;
    player.vel.y = if double {
        -tuning.double_jump_force
    } else {
        -tuning.jump_force
    };
    player.jumps_left -= 1;
    Some(double)
}

/// Begin a dash unless one is already running
fn start_dash(player: &mut Player, tuning: &Tuning) -> bool {
    if player.dash_timer > 0 {
        return false;
    }
    player.dash_timer = tuning.dash_frames;
    player.set_small(true);
    true
}

/// While a dash is active it overrides horizontal intent
fn apply_dash(player: &mut Player, tuning: &Tuning) {
    if player.dash_timer > 0 {
        player.vel.x = tuning.dash_speed;
        player.dash_timer -= 1;
    }
}

fn integrate(player: &mut Player, tuning: &Tuning) {
    player.vel.y += tuning.gravity;
    player.pos += player.vel;
}

/// Swept, top-only landing test against every platform.
///
/// A platform catches the player when they overlap horizontally, the feet
/// are at most `landing_tolerance` below its top, and this tick's fall
/// reaches the top. Candidates are applied in list order, so with
/// overlapping platforms the last match decides where the player ends up.
fn resolve_landing(player: &mut Player, platforms: &[Platform], tuning: &Tuning) -> bool {
    player.on_ground = false;

    for platform in platforms {
        let top = platform.rect.top();
        let feet = player.bottom();
        if player.rect().overlaps_x(&platform.rect)
            && feet <= top + tuning.landing_tolerance
            && feet + player.vel.y >= top
        {
            player.pos.y = top - player.height();
            player.vel.y = 0.0;
            player.on_ground = true;
            player.jumps_left = MAX_JUMPS;
        }
    }

    player.on_ground
}

/// True when a platform occupies the space above the player's head.
///
/// While crouched the probe covers everything the standing body would
/// fill, never less than `ceiling_probe`.
fn under_low_ceiling(player: &Player, platforms: &[Platform], tuning: &Tuning) -> bool {
    let mut headroom = tuning.ceiling_probe;
    if player.is_small {
        headroom = headroom.max(player.normal_height - player.small_height);
    }
    let probe = Rect::new(player.pos.x, player.pos.y - headroom, player.width, headroom);
    platforms.iter().any(|p| intersects(&probe, &p.rect))
}

/// Stand back up once grounded, done dashing, and there is headroom
fn recover_size(player: &mut Player, platforms: &[Platform], tuning: &Tuning) {
    if player.is_small
        && player.on_ground
        && player.dash_timer == 0
        && !under_low_ceiling(player, platforms, tuning)
    {
        player.set_small(false);
    }
}
