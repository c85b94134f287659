//! Data-driven game balance
//!
//! Every constant the simulation reads lives in [`Tuning`]. The defaults are
//! the shipped balance; a JSON file can override any subset of fields at
//! start-up. Values are per frame and assume the 60 Hz tick in
//! [`crate::consts::SIM_DT`].

use std::fmt;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::geometry::Rect;

/// Half-open range `[min, max)` used for procedural rolls
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Roll a value in `[min, max)`. A degenerate span yields `min`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }
}

/// Reasons a tuning file is rejected
#[derive(Debug)]
pub enum TuningError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A size, speed or count that must be positive is not
    NotPositive(&'static str),
    /// A margin or tolerance that must not be negative is
    Negative(&'static str),
    /// A span whose `max` is not above its `min`
    EmptySpan(&'static str),
    /// A probability outside `[0, 1]`
    Probability(&'static str),
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(e) => write!(f, "invalid tuning JSON: {e}"),
            TuningError::NotPositive(field) => write!(f, "`{field}` must be greater than zero"),
            TuningError::Negative(field) => write!(f, "`{field}` must not be negative"),
            TuningError::EmptySpan(field) => write!(f, "`{field}` must have max > min"),
            TuningError::Probability(field) => write!(f, "`{field}` must be within 0..=1"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(e: serde_json::Error) -> Self {
        TuningError::Parse(e)
    }
}

/// Game balance constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    /// Visible world width (also the generation look-ahead)
    pub viewport_width: f32,
    /// Visible world height; falling below it costs a life
    pub viewport_height: f32,

    // === Player physics ===
    pub gravity: f32,
    pub jump_force: f32,
    pub double_jump_force: f32,
    pub move_speed: f32,
    pub crawl_speed: f32,
    pub dash_speed: f32,
    /// Dash length in frames
    pub dash_frames: u32,
    /// How far below a platform top the feet may already be and still land
    pub landing_tolerance: f32,
    /// Height of the probe above the head used to detect a low ceiling
    pub ceiling_probe: f32,

    // === Player body ===
    pub player_width: f32,
    pub player_height: f32,
    /// Height while dashing or crawling
    pub player_small_height: f32,
    pub start_lives: i32,
    /// Initial top-left position
    pub spawn: Vec2,
    /// Respawn offset from the camera's left edge
    pub respawn_offset_x: f32,
    pub respawn_y: f32,

    // === Camera / world lifecycle ===
    /// Distance between the camera's left edge and the player
    pub camera_lead: f32,
    /// Entities this far behind the camera are removed
    pub cull_margin: f32,
    /// The platform the run starts on
    pub ground: Rect,

    // === Level generation ===
    pub clusters_per_segment: u32,
    pub platform_width: Span,
    pub platform_height: f32,
    pub platform_y: Span,
    pub platform_gap: Span,
    /// Chance that a platform carries an enemy
    pub enemy_chance: f32,
    pub enemy_size: f32,
    /// Distance from the platform top to the enemy's top edge
    pub enemy_hover: f32,
    pub enemy_speed: Span,

    // === Scoring ===
    /// Upward speed after a stomp
    pub stomp_bounce: f32,
    pub stomp_reward: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: 800.0,
            viewport_height: 480.0,

            gravity: 0.6,
            jump_force: 12.0,
            double_jump_force: 10.0,
            move_speed: 4.0,
            crawl_speed: 2.0,
            dash_speed: 10.0,
            dash_frames: 12,
            landing_tolerance: 10.0,
            ceiling_probe: 5.0,

            player_width: 40.0,
            player_height: 40.0,
            player_small_height: 20.0,
            start_lives: 3,
            spawn: Vec2::new(100.0, 300.0),
            respawn_offset_x: 100.0,
            respawn_y: 300.0,

            camera_lead: 150.0,
            cull_margin: 200.0,
            ground: Rect::new(0.0, 420.0, 600.0, 60.0),

            clusters_per_segment: 3,
            platform_width: Span::new(100.0, 220.0),
            platform_height: 20.0,
            platform_y: Span::new(260.0, 380.0),
            platform_gap: Span::new(80.0, 200.0),
            enemy_chance: 0.6,
            enemy_size: 30.0,
            enemy_hover: 30.0,
            enemy_speed: Span::new(1.5, 2.5),

            stomp_bounce: 6.0,
            stomp_reward: 100,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("viewport_width", self.viewport_width),
            ("viewport_height", self.viewport_height),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("player_small_height", self.player_small_height),
            ("platform_height", self.platform_height),
            ("enemy_size", self.enemy_size),
            ("gravity", self.gravity),
            ("jump_force", self.jump_force),
            ("double_jump_force", self.double_jump_force),
            ("move_speed", self.move_speed),
            ("crawl_speed", self.crawl_speed),
            ("dash_speed", self.dash_speed),
        ];
        for (field, value) in positive {
            if value.is_nan() || value <= 0.0 {
                return Err(TuningError::NotPositive(field));
            }
        }

        let non_negative = [
            ("landing_tolerance", self.landing_tolerance),
            ("ceiling_probe", self.ceiling_probe),
            ("camera_lead", self.camera_lead),
            ("cull_margin", self.cull_margin),
        ];
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError::Negative(field));
            }
        }
        if self.dash_frames == 0 {
            return Err(TuningError::NotPositive("dash_frames"));
        }
        if self.clusters_per_segment == 0 {
            return Err(TuningError::NotPositive("clusters_per_segment"));
        }

        let spans = [
            ("platform_width", self.platform_width),
            ("platform_y", self.platform_y),
            ("platform_gap", self.platform_gap),
            ("enemy_speed", self.enemy_speed),
        ];
        for (field, span) in spans {
            if span.min.is_nan() || span.max.is_nan() || span.max <= span.min {
                return Err(TuningError::EmptySpan(field));
            }
        }

        if !(0.0..=1.0).contains(&self.enemy_chance) {
            return Err(TuningError::Probability("enemy_chance"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.5, "dash_frames": 20 }"#).unwrap();
        assert_eq!(tuning.gravity, 0.5);
        assert_eq!(tuning.dash_frames, 20);
        assert_eq!(tuning.jump_force, Tuning::default().jump_force);
        assert_eq!(tuning.ground, Tuning::default().ground);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "player_width": 0 }"#),
            Err(TuningError::NotPositive("player_width"))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "platform_gap": { "min": 50, "max": 50 } }"#),
            Err(TuningError::EmptySpan("platform_gap"))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "enemy_chance": 1.5 }"#),
            Err(TuningError::Probability("enemy_chance"))
        ));
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_rejects_bad_physics_and_margins() {
        assert!(matches!(
            Tuning::from_json(r#"{ "gravity": -0.6 }"#),
            Err(TuningError::NotPositive("gravity"))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "dash_speed": 0 }"#),
            Err(TuningError::NotPositive("dash_speed"))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "cull_margin": -1 }"#),
            Err(TuningError::Negative("cull_margin"))
        ));
        assert!(Tuning::from_json(r#"{ "camera_lead": 0 }"#).is_ok());

        // JSON has no NaN literal, so build these directly
        let tuning = Tuning {
            move_speed: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(tuning.validate(), Err(TuningError::NotPositive("move_speed"))));

        let tuning = Tuning {
            landing_tolerance: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Negative("landing_tolerance"))
        ));
    }

    #[test]
    fn test_span_sample_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);
        let span = Span::new(1.5, 2.5);
        for _ in 0..1000 {
            assert!(span.contains(span.sample(&mut rng)));
        }
        assert_eq!(Span::new(3.0, 3.0).sample(&mut rng), 3.0);
    }
}
