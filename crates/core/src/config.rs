//! Engine configuration: canvas size and room-placement bounds.
//!
//! Values come from [`EngineConfig::default`], optionally replaced by a TOML
//! file and then by `CRAWL_*` environment variables.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::terrain::MIN_ROOM_SIDE;

pub const ENV_CANVAS_WIDTH: &str = "CRAWL_CANVAS_WIDTH";
pub const ENV_CANVAS_HEIGHT: &str = "CRAWL_CANVAS_HEIGHT";
pub const ENV_MAX_ROOMS: &str = "CRAWL_MAX_ROOMS";

/// Largest canvas side. Keeps every coordinate well inside `i32`.
pub const MAX_CANVAS_SIDE: usize = 1 << 15;
/// Largest canvas area the tile grid will allocate.
pub const MAX_CANVAS_CELLS: usize = 1 << 22;

/// Whether a `width` x `height` canvas is within the side and area limits.
pub fn canvas_fits(width: usize, height: usize) -> bool {
    width <= MAX_CANVAS_SIDE
        && height <= MAX_CANVAS_SIDE
        && width.checked_mul(height).is_some_and(|cells| cells <= MAX_CANVAS_CELLS)
}

/// Inclusive range of room footprint sizes, walls included.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SizeRange {
    pub min: i32,
    pub max: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub canvas_width: usize,
    pub canvas_height: usize,
    pub max_rooms: usize,
    pub room_width: SizeRange,
    pub room_height: SizeRange,
    pub placement_attempts_per_room: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas_width: 80,
            canvas_height: 30,
            max_rooms: 12,
            room_width: SizeRange { min: 5, max: 14 },
            room_height: SizeRange { min: 5, max: 9 },
            placement_attempts_per_room: 30,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("environment variable {name} has non-numeric value {value:?}")]
    InvalidEnv { name: &'static str, value: String },
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error(
        "canvas {width}x{height} exceeds the limit of {max_side} per side and {max_cells} cells",
        max_side = MAX_CANVAS_SIDE,
        max_cells = MAX_CANVAS_CELLS
    )]
    CanvasTooLarge { width: usize, height: usize },
    #[error("{field} range {min}..={max} is inverted")]
    InvertedRange { field: &'static str, min: i32, max: i32 },
    #[error("{field} minimum {min} is below the smallest room side {smallest}", smallest = MIN_ROOM_SIDE)]
    RoomTooSmall { field: &'static str, min: i32 },
}

impl EngineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Applies `CRAWL_*` overrides using `lookup` to read variables, so
    /// callers can pass `|name| std::env::var(name).ok()` or a fixture.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        for (name, slot) in [
            (ENV_CANVAS_WIDTH, &mut self.canvas_width),
            (ENV_CANVAS_HEIGHT, &mut self.canvas_height),
            (ENV_MAX_ROOMS, &mut self.max_rooms),
        ] {
            if let Some(value) = lookup(name) {
                *slot = value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidEnv { name, value: value.clone() })?;
            }
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.canvas_width == 0 {
            return Err(ConfigError::Zero { field: "canvas_width" });
        }
        if self.canvas_height == 0 {
            return Err(ConfigError::Zero { field: "canvas_height" });
        }
        if !canvas_fits(self.canvas_width, self.canvas_height) {
            return Err(ConfigError::CanvasTooLarge {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        if self.placement_attempts_per_room == 0 {
            return Err(ConfigError::Zero { field: "placement_attempts_per_room" });
        }
        for (field, range) in [("room_width", self.room_width), ("room_height", self.room_height)] {
            if range.min > range.max {
                return Err(ConfigError::InvertedRange { field, min: range.min, max: range.max });
            }
            if range.min < MIN_ROOM_SIDE {
                return Err(ConfigError::RoomTooSmall { field, min: range.min });
            }
        }
        Ok(())
    }
}
