//! Startup configuration
//!
//! Everything tunable about a run lives here. The field size normally comes
//! from the canvas; the rest can be overridden with a JSON blob. Validated
//! once at startup, never per tick.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::EntitySpec;

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Override JSON did not parse
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Audio preferences (not persisted)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }
}

impl AudioSettings {
    /// Volume actually applied to effects
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume.clamp(0.0, 1.0) * self.sfx_volume.clamp(0.0, 1.0)
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Visible field width in pixels
    pub field_width: f32,
    /// Visible field height in pixels
    pub field_height: f32,
    /// Loop rate in ticks per second (best effort)
    pub tick_rate: u32,
    /// Simulated time between meteor spawns (ms)
    pub spawn_interval_ms: f64,
    /// Simulated time between shots (ms)
    pub reload_ms: f64,
    /// Horizontal slack on each side of a meteor for hit tests
    pub hit_padding: f32,
    /// RNG seed; `None` lets the platform pick one
    pub seed: Option<u64>,
    pub ship: EntitySpec,
    pub laser: EntitySpec,
    pub meteor: EntitySpec,
    pub audio: AudioSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tick_rate: TICK_RATE_HZ,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            reload_ms: RELOAD_MS,
            hit_padding: HIT_PADDING,
            seed: None,
            ship: EntitySpec::new(SHIP_WIDTH, SHIP_HEIGHT, SHIP_SPEED),
            laser: EntitySpec::new(LASER_WIDTH, LASER_HEIGHT, LASER_SPEED),
            meteor: EntitySpec::new(METEOR_WIDTH, METEOR_HEIGHT, METEOR_SPEED),
            audio: AudioSettings::default(),
        }
    }
}

impl GameConfig {
    /// Parse overrides on top of the defaults and validate the result
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config = Self::parse_overrides(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse overrides on top of the defaults without validating, for
    /// callers that still have to fill in the field size
    pub fn parse_overrides(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Same config with a different field size
    pub fn with_field(mut self, width: f32, height: f32) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    /// Simulated duration of one tick (ms)
    pub fn tick_ms(&self) -> f64 {
        1000.0 / self.tick_rate as f64
    }

    /// Ticks in `seconds` of simulated time at the configured rate
    pub fn ticks_in(&self, seconds: u64) -> u64 {
        u64::from(self.tick_rate) * seconds
    }

    /// Check every value once before a run starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width as f64)?;
        positive("field_height", self.field_height as f64)?;
        positive("spawn_interval_ms", self.spawn_interval_ms)?;
        positive("reload_ms", self.reload_ms)?;
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be at least 1"));
        }
        // At most one spawn per tick
        if self.spawn_interval_ms < self.tick_ms() {
            return Err(invalid(
                "spawn_interval_ms",
                format!("{} is shorter than one tick ({} ms)", self.spawn_interval_ms, self.tick_ms()),
            ));
        }
        if !self.hit_padding.is_finite() || self.hit_padding < 0.0 {
            return Err(invalid("hit_padding", "must be finite and >= 0"));
        }

        for (field, spec) in [("ship", &self.ship), ("laser", &self.laser), ("meteor", &self.meteor)] {
            if !spec.is_valid() {
                return Err(invalid(field, format!("size and speed must be finite and > 0, got {spec:?}")));
            }
        }

        if self.meteor.width > self.field_width {
            return Err(invalid(
                "field_width",
                format!("{} is narrower than a meteor ({})", self.field_width, self.meteor.width),
            ));
        }
        if self.ship.height > self.field_height {
            return Err(invalid(
                "field_height",
                format!("{} is shorter than the ship ({})", self.field_height, self.ship.height),
            ));
        }

        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("must be finite and > 0, got {value}")))
    }
}
