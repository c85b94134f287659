//! Enemy controller: movement and player contact

use super::geometry::intersects;
use super::state::{GameEvent, GameState};
use crate::tuning::Tuning;

/// Move every enemy and resolve contact with the player.
///
/// Falling onto an enemy (`vel.y > 0`) stomps it: the enemy is removed, the
/// player bounces and scores. Any other contact costs a life, removes the
/// enemy and respawns the player. Enemies are visited back to front so
/// removal never skips one, and each resolves at most once per tick.
pub fn update_enemies(state: &mut GameState, tuning: &Tuning) {
    for i in (0..state.enemies.len()).rev() {
        let enemy = &mut state.enemies[i];
        enemy.rect.x -= enemy.speed;

        if !intersects(&state.player.rect(), &enemy.rect) {
            continue;
        }

        state.enemies.remove(i);
        if state.player.vel.y > 0.0 {
            state.player.vel.y = -tuning.stomp_bounce;
            state.player.score += tuning.stomp_reward;
            log::debug!("frame {}: stomp, score {}", state.frame, state.player.score);
            state.emit(GameEvent::Stomped {
                score: state.player.score,
            });
        } else {
            state.player.lives -= 1;
            state.player.respawn(state.camera_x, tuning);
            log::debug!(
                "frame {}: hit by enemy, {} lives left",
                state.frame,
                state.player.lives
            );
            state.emit(GameEvent::Hurt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Rect;
    use crate::sim::state::Enemy;
    use glam::Vec2;

    fn state_with_enemy_on_player(vy: f32) -> GameState {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.camera_x = 200.0;
        state.player.pos = Vec2::new(350.0, 360.0);
        state.player.vel = Vec2::new(0.0, vy);
        state.enemies.push(Enemy {
            rect: Rect::new(372.0, 390.0, 30.0, 30.0),
            speed: 2.0,
        });
        state
    }

    #[test]
    fn test_enemies_move_left() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.enemies.push(Enemy {
            rect: Rect::new(2000.0, 300.0, 30.0, 30.0),
            speed: 1.5,
        });
        state.enemies.push(Enemy {
            rect: Rect::new(3000.0, 300.0, 30.0, 30.0),
            speed: 2.25,
        });

        update_enemies(&mut state, &tuning);

        assert_eq!(state.enemies[0].rect.x, 1998.5);
        assert_eq!(state.enemies[1].rect.x, 2997.75);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_stomp() {
        let tuning = Tuning::default();
        let mut state = state_with_enemy_on_player(3.0);

        update_enemies(&mut state, &tuning);

        assert!(state.enemies.is_empty());
        assert_eq!(state.player.score, 100);
        assert_eq!(state.player.vel.y, -6.0);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.player.pos, Vec2::new(350.0, 360.0));
        assert_eq!(state.events, vec![GameEvent::Stomped { score: 100 }]);
    }

    #[test]
    fn test_side_hit_costs_a_life() {
        let tuning = Tuning::default();
        for vy in [0.0, -4.0] {
            let mut state = state_with_enemy_on_player(vy);

            update_enemies(&mut state, &tuning);

            assert!(state.enemies.is_empty());
            assert_eq!(state.player.lives, 2);
            assert_eq!(state.player.score, 0);
            assert_eq!(state.player.pos, Vec2::new(300.0, 300.0));
            assert_eq!(state.player.vel, Vec2::ZERO);
            assert_eq!(state.events, vec![GameEvent::Hurt]);
        }
    }

    #[test]
    fn test_only_touching_enemies_are_removed() {
        let tuning = Tuning::default();
        let mut state = state_with_enemy_on_player(3.0);
        state.enemies.insert(
            0,
            Enemy {
                rect: Rect::new(900.0, 300.0, 30.0, 30.0),
                speed: 2.0,
            },
        );
        state.enemies.push(Enemy {
            rect: Rect::new(1200.0, 300.0, 30.0, 30.0),
            speed: 2.0,
        });

        update_enemies(&mut state, &tuning);

        let xs: Vec<f32> = state.enemies.iter().map(|e| e.rect.x).collect();
        assert_eq!(xs, vec![898.0, 1198.0]);
        assert_eq!(state.player.score, 100);
    }

    #[test]
    fn test_edge_contact_is_not_a_hit() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.player.pos = Vec2::new(100.0, 300.0);
        // After moving 2 left its left edge sits exactly on the player's right edge
        state.enemies.push(Enemy {
            rect: Rect::new(142.0, 300.0, 30.0, 30.0),
            speed: 2.0,
        });

        update_enemies(&mut state, &tuning);

        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.player.lives, 3);
    }
}
