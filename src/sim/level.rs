//! Procedural level generation and world cleanup
//!
//! The world is an endless strip of floating platforms. New segments are
//! appended just ahead of the view and anything that has scrolled far
//! enough behind it is dropped, so the live entity count stays bounded.

use rand::Rng;

use super::geometry::Rect;
use super::state::{Enemy, GameEvent, GameState, Platform};
use crate::tuning::Tuning;

/// Append one segment of platform clusters starting at `start_x`.
///
/// Each cluster is a platform with random width and height, optionally
/// carrying an enemy centred on it. Returns the number of enemies spawned.
pub fn generate_segment(state: &mut GameState, start_x: f32, tuning: &Tuning) -> usize {
    let mut x = start_x;
    let mut spawned = 0;

    for _ in 0..tuning.clusters_per_segment {
        let width = tuning.platform_width.sample(&mut state.rng);
        let y = tuning.platform_y.sample(&mut state.rng);
        let rect = Rect::new(x, y, width, tuning.platform_height);
        state.platforms.push(Platform::new(rect));

        if state.rng.random::<f32>() < tuning.enemy_chance {
            let size = tuning.enemy_size;
            state.enemies.push(Enemy {
                rect: Rect::new(rect.center_x() - size / 2.0, y - tuning.enemy_hover, size, size),
                speed: tuning.enemy_speed.sample(&mut state.rng),
            });
            spawned += 1;
        }

        x += width + tuning.platform_gap.sample(&mut state.rng);
    }

    spawned
}

/// Whether the generated world needs to grow this frame
///
/// True once the rightmost platform's right edge is no more than one
/// viewport width beyond the camera's right edge.
pub fn needs_extension(state: &GameState, tuning: &Tuning) -> bool {
    let view_right = state.camera_x + tuning.viewport_width;
    match state.rightmost_platform() {
        Some(last) => last.rect.right() - view_right <= tuning.viewport_width,
        None => true,
    }
}

/// Generate one segment ahead of the view if the world is running out
pub fn extend_world(state: &mut GameState, tuning: &Tuning) {
    if !needs_extension(state, tuning) {
        return;
    }

    let start_x = match state.rightmost_platform().map(|p| p.rect.right()) {
        Some(right) => right + tuning.platform_gap.sample(&mut state.rng),
        None => state.camera_x + tuning.viewport_width,
    };

    let enemies = generate_segment(state, start_x, tuning);
    log::debug!(
        "frame {}: segment at x={:.0} ({} enemies, {} platforms live)",
        state.frame,
        start_x,
        enemies,
        state.platforms.len()
    );
    state.emit(GameEvent::SegmentGenerated { start_x, enemies });
}

/// Drop platforms and enemies whose right edge is at or behind
/// `camera_x - cull_margin`. Survivors keep their relative order.
pub fn cleanup_world(state: &mut GameState, tuning: &Tuning) {
    let cutoff = state.camera_x - tuning.cull_margin;

    let platforms_before = state.platforms.len();
    let enemies_before = state.enemies.len();
    state.platforms.retain(|p| p.rect.right() > cutoff);
    state.enemies.retain(|e| e.rect.right() > cutoff);

    let platforms = platforms_before - state.platforms.len();
    let enemies = enemies_before - state.enemies.len();
    if platforms > 0 || enemies > 0 {
        log::debug!(
            "frame {}: culled {} platforms, {} enemies behind x={:.0}",
            state.frame,
            platforms,
            enemies,
            cutoff
        );
        state.emit(GameEvent::Culled { platforms, enemies });
    }
}
