//! Game settings.
//!
//! Defaults reproduce the classic tuning.  A JSON file may override any
//! subset of fields; the binary applies CLI flags on top of that.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound on the Lost screen hold.
const MAX_LOST_HOLD_SECS: u32 = 3600;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Logical display surface, in pixels.
    pub width: u32,
    pub height: u32,
    /// Target frame rate of the loop.
    pub fps: u32,

    pub lives: u32,
    pub player_health: u32,
    /// Player ship is scaled to a square of this many pixels.
    pub player_size: u32,

    // === Velocities, pixels per frame ===
    pub player_velocity: f32,
    pub enemy_velocity: f32,
    pub laser_velocity: f32,

    // === Waves ===
    /// Wave length before the first wave; the first wave already adds
    /// `wave_increment` on top.
    pub initial_wave_length: u32,
    pub wave_increment: u32,
    /// Each enemy fires with probability 1/`enemy_fire_chance` per frame.
    /// Zero disables enemy fire.
    pub enemy_fire_chance: u32,

    /// Seconds the "You Lost" screen is held before the game ends.
    pub lost_hold_secs: u32,

    /// Logical pixels per sprite-text character.
    pub pixel_scale: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 750,
            fps: 60,

            lives: 5,
            player_health: 100,
            player_size: 100,

            player_velocity: 5.0,
            enemy_velocity: 1.0,
            laser_velocity: 4.0,

            initial_wave_length: 5,
            wave_increment: 5,
            enemy_fire_chance: 120,

            lost_hold_secs: 3,

            pixel_scale: 10,
        }
    }
}

impl Settings {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field, reason| Err(ConfigError::Invalid { field, reason });

        if self.width == 0 || self.height == 0 {
            return invalid("width/height", "display surface must be non-empty");
        }
        if self.fps == 0 {
            return invalid("fps", "must be at least 1");
        }
        if self.pixel_scale == 0 {
            return invalid("pixel_scale", "must be at least 1");
        }
        if self.player_size == 0 || self.player_size > self.width.min(self.height) {
            return invalid("player_size", "must fit inside the display surface");
        }

        // Enemies may hover, but nothing may move backwards.
        let speeds = [
            ("player_velocity", self.player_velocity, false),
            ("enemy_velocity", self.enemy_velocity, true),
            ("laser_velocity", self.laser_velocity, false),
        ];
        for (field, speed, zero_ok) in speeds {
            if !speed.is_finite() {
                return invalid(field, "must be a finite number");
            }
            if speed < 0.0 || (speed == 0.0 && !zero_ok) {
                return invalid(field, "must be positive");
            }
        }
        if self.lost_hold_secs > MAX_LOST_HOLD_SECS {
            return invalid("lost_hold_secs", "must be at most one hour");
        }
        Ok(())
    }

    /// Wall-clock budget of one frame.
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Frames the Lost state is held before termination.
    ///
    /// Counted in frames rather than wall time: a frame that overruns its
    /// budget stretches the hold accordingly.
    pub fn lost_hold_frames(&self) -> u32 {
        self.fps.saturating_mul(self.lost_hold_secs)
    }
}
