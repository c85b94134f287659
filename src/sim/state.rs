//! Game state and core simulation types
//!
//! Everything one run needs lives in [`GameState`]; the controllers in the
//! sibling modules mutate it in a fixed order each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::tuning::Tuning;

/// Maximum number of jumps available between landings
pub const MAX_JUMPS: u8 = 2;

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub width: f32,
    pub normal_height: f32,
    pub small_height: f32,
    pub on_ground: bool,
    /// Always within `0..=MAX_JUMPS`
    pub jumps_left: u8,
    /// Crouched: set while dashing or when a low ceiling blocks standing up
    pub is_small: bool,
    /// Frames of dash remaining (0 = not dashing)
    pub dash_timer: u32,
    /// Not clamped; the front end decides what zero or less means
    pub lives: i32,
    pub score: u64,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: tuning.spawn,
            vel: Vec2::ZERO,
            width: tuning.player_width,
            normal_height: tuning.player_height,
            small_height: tuning.player_small_height,
            on_ground: false,
            jumps_left: MAX_JUMPS,
            is_small: false,
            dash_timer: 0,
            lives: tuning.start_lives,
            score: 0,
        }
    }

    /// Current collision height
    #[inline]
    pub fn height(&self) -> f32 {
        if self.is_small {
            self.small_height
        } else {
            self.normal_height
        }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.height()
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height())
    }

    /// Switch between standing and crouched height, keeping the feet in place
    pub fn set_small(&mut self, small: bool) {
        if self.is_small == small {
            return;
        }
        let feet = self.bottom();
        self.is_small = small;
        self.pos.y = feet - self.height();
    }

    /// Put the player back into play near the left side of the view
    pub fn respawn(&mut self, camera_x: f32, tuning: &Tuning) {
        self.pos = Vec2::new(camera_x + tuning.respawn_offset_x, tuning.respawn_y);
        self.vel = Vec2::ZERO;
        self.jumps_left = MAX_JUMPS;
    }
}

/// A static platform (top surface is walkable)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub rect: Rect,
}

impl Platform {
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// A walker that drifts left at a constant speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub rect: Rect,
    /// Leftward speed per frame
    pub speed: f32,
}

/// Things that happened during the last tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A jump was spent (`double` = it was the air jump)
    Jumped { double: bool },
    DashStarted,
    /// Touched down after being airborne
    Landed,
    /// Fell below the viewport and lost a life
    FellOut,
    /// Killed an enemy from above
    Stomped { score: u64 },
    /// Ran into an enemy and lost a life
    Hurt,
    /// A new batch of platforms was appended
    SegmentGenerated { start_x: f32, enemies: usize },
    /// Entities were dropped behind the camera
    Culled { platforms: usize, enemies: usize },
}

/// Borrowed snapshot of everything a renderer or HUD needs for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub platforms: &'a [Platform],
    pub enemies: &'a [Enemy],
    pub player: Rect,
    pub dashing: bool,
    /// Horizontal view translation (world x of the left screen edge)
    pub camera_x: f32,
    pub lives: i32,
    pub score: u64,
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Level generation RNG
    pub rng: Pcg32,
    /// Simulation tick counter
    pub frame: u64,
    pub player: Player,
    /// Sorted by ascending x; generation only ever appends
    pub platforms: Vec<Platform>,
    pub enemies: Vec<Enemy>,
    /// World x of the left edge of the view
    pub camera_x: f32,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new run with the given seed: the player above the ground slab
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        let player = Player::new(tuning);
        let camera_x = player.pos.x - tuning.camera_lead;
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            player,
            platforms: vec![Platform::new(tuning.ground)],
            enemies: Vec::new(),
            camera_x,
            events: Vec::new(),
        }
    }

    /// Rightmost platform (last in the sorted list)
    pub fn rightmost_platform(&self) -> Option<&Platform> {
        self.platforms.last()
    }

    /// Whether the run has run out of lives; the core keeps simulating anyway
    pub fn is_out_of_lives(&self) -> bool {
        self.player.lives <= 0
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            platforms: &self.platforms,
            enemies: &self.enemies,
            player: self.player.rect(),
            dashing: self.player.dash_timer > 0,
            camera_x: self.camera_x,
            lives: self.player.lives,
            score: self.player.score,
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state() {
        let tuning = Tuning::default();
        let state = GameState::new(1, &tuning);
        assert_eq!(state.platforms.len(), 1);
        assert_eq!(state.platforms[0].rect, Rect::new(0.0, 420.0, 600.0, 60.0));
        assert!(state.enemies.is_empty());
        assert_eq!(state.player.pos, Vec2::new(100.0, 300.0));
        assert_eq!(state.player.jumps_left, MAX_JUMPS);
        assert_eq!(state.player.lives, 3);
        assert_eq!(state.camera_x, -50.0);
    }

    #[test]
    fn test_height_variants() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        assert_eq!(player.height(), 40.0);
        player.set_small(true);
        assert_eq!(player.height(), 20.0);
        player.set_small(false);
        assert_eq!(player.height(), 40.0);
    }

    #[test]
    fn test_set_small_keeps_feet() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.pos.y = 380.0;
        player.set_small(true);
        assert_eq!(player.bottom(), 420.0);
        assert_eq!(player.pos.y, 400.0);
        player.set_small(false);
        assert_eq!(player.bottom(), 420.0);
        assert_eq!(player.pos.y, 380.0);
    }

    #[test]
    fn test_respawn() {
        let tuning = Tuning::default();
        let mut player = Player::new(&tuning);
        player.vel = Vec2::new(4.0, 9.0);
        player.jumps_left = 0;
        player.respawn(250.0, &tuning);
        assert_eq!(player.pos, Vec2::new(350.0, 300.0));
        assert_eq!(player.vel, Vec2::ZERO);
        assert_eq!(player.jumps_left, MAX_JUMPS);
    }

    #[test]
    fn test_view_reports_hud() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, &tuning);
        state.player.score = 300;
        state.player.lives = -1;
        let view = state.view();
        assert_eq!(view.score, 300);
        assert_eq!(view.lives, -1);
        assert_eq!(view.platforms.len(), 1);
        assert_eq!(view.player, state.player.rect());
        assert!(state.is_out_of_lives());
    }
}
