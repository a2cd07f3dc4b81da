//! Game tuning knobs.
//!
//! Defaults reproduce the classic 400×600 canvas.  A JSON file may override
//! any subset of the fields; names are camelCase (`canvasWidth`, `maxBullets`, ...).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Hint shown while the player can shoot.
pub const DEFAULT_HINT: &str = "Press W to shoot, press arrow keys or A/D to move.";
/// Hint shown while the ammo gate is closed.
pub const RELOAD_HINT: &str = "Loading ammo...";
pub const START_PROMPT: &str = "Press Enter to start";
pub const RESTART_PROMPT: &str = "Press W to play again";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    /// Pixels per frame.
    pub player_speed: f32,
    /// Distance from the bottom edge to the player's top edge at spawn.
    pub player_bottom_offset: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    /// Fall speed at the start of every run.
    pub obstacle_speed0: f32,
    /// A new obstacle spawns each time the score hits a multiple of this.
    pub spawn_interval: u32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,
    pub max_bullets: u32,
    pub reload_time_ms: u64,

    // === Scoring ===
    pub hit_score: u32,
    /// Fall speed grows each time the score hits a multiple of this.
    pub difficulty_increase_interval: u32,
    pub difficulty_step: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_width: 400.0,
            canvas_height: 600.0,
            player_width: 40.0,
            player_height: 40.0,
            player_speed: 5.0,
            player_bottom_offset: 50.0,
            obstacle_width: 40.0,
            obstacle_height: 40.0,
            obstacle_speed0: 2.0,
            spawn_interval: 100,
            bullet_width: 5.0,
            bullet_height: 10.0,
            bullet_speed: 5.0,
            max_bullets: 6,
            reload_time_ms: 2000,
            hit_score: 50,
            difficulty_increase_interval: 1000,
            difficulty_step: 0.5,
        }
    }
}

impl GameConfig {
    /// Read a JSON config file.  The result is validated before it is returned.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: display.clone(),
            message: e.to_string(),
        })?;
        let config: GameConfig = serde_json::from_str(&json).map_err(|e| ConfigError::Parse {
            path: display,
            message: e.to_string(),
        })?;
        config.validated()
    }

    /// Reject settings the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("canvasWidth", self.canvas_width),
            ("canvasHeight", self.canvas_height),
            ("playerWidth", self.player_width),
            ("playerHeight", self.player_height),
            ("playerSpeed", self.player_speed),
            ("obstacleWidth", self.obstacle_width),
            ("obstacleHeight", self.obstacle_height),
            ("obstacleSpeed0", self.obstacle_speed0),
            ("bulletWidth", self.bullet_width),
            ("bulletHeight", self.bullet_height),
            ("bulletSpeed", self.bullet_speed),
        ];
        // `!(v > 0.0)` also catches NaN
        if let Some(&(field, value)) = positive.iter().find(|(_, v)| !(*v > 0.0)) {
            return Err(ConfigError::NonPositive { field, value });
        }
        if self.difficulty_step < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "difficultyStep",
                value: self.difficulty_step,
            });
        }

        for (entity, width) in [
            ("player", self.player_width),
            ("obstacle", self.obstacle_width),
            ("bullet", self.bullet_width),
        ] {
            if width > self.canvas_width {
                return Err(ConfigError::EntityTooWide {
                    entity,
                    width,
                    canvas: self.canvas_width,
                });
            }
        }

        if self.max_bullets == 0 {
            return Err(ConfigError::ZeroMaxBullets);
        }
        if self.spawn_interval == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "spawnInterval",
            });
        }
        if self.difficulty_increase_interval == 0 {
            return Err(ConfigError::ZeroInterval {
                field: "difficultyIncreaseInterval",
            });
        }
        Ok(())
    }

    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    /// Where the player appears at session start and after a restart.
    pub fn player_spawn(&self) -> (f32, f32) {
        (
            self.canvas_width / 2.0 - self.player_width / 2.0,
            self.canvas_height - self.player_bottom_offset,
        )
    }
}
