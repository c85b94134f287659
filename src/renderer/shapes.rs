//! Shape generation for 2D primitives

use super::vertex::{Vertex, colors};
use crate::sim::{FrameView, Rect};

/// Two triangles covering `rect`, shifted left by `camera_x`
pub fn rect(rect: &Rect, camera_x: f32, color: [f32; 4]) -> [Vertex; 6] {
    let left = rect.left() - camera_x;
    let right = rect.right() - camera_x;
    let top = rect.top();
    let bottom = rect.bottom();

    [
        Vertex::new(left, top, color),
        Vertex::new(left, bottom, color),
        Vertex::new(right, top, color),
        Vertex::new(right, top, color),
        Vertex::new(left, bottom, color),
        Vertex::new(right, bottom, color),
    ]
}

/// Whether any part of `rect` falls inside the visible strip
fn on_screen(rect: &Rect, camera_x: f32, view_width: f32) -> bool {
    rect.right() > camera_x && rect.left() < camera_x + view_width
}

/// Build the full frame in view space: platforms, then enemies, then the
/// player on top. Off-screen entities are skipped.
pub fn scene(view: &FrameView<'_>, view_width: f32) -> Vec<Vertex> {
    let cam = view.camera_x;
    let mut vertices = Vec::with_capacity((view.platforms.len() + view.enemies.len() + 1) * 6);

    for platform in view.platforms {
        if on_screen(&platform.rect, cam, view_width) {
            vertices.extend_from_slice(&rect(&platform.rect, cam, colors::PLATFORM));
        }
    }
    for enemy in view.enemies {
        if on_screen(&enemy.rect, cam, view_width) {
            vertices.extend_from_slice(&rect(&enemy.rect, cam, colors::ENEMY));
        }
    }

    let player_color = if view.dashing {
        colors::PLAYER_DASH
    } else {
        colors::PLAYER
    };
    vertices.extend_from_slice(&rect(&view.player, cam, player_color));

    vertices
}
