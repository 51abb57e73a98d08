//! Arena configuration: play-area geometry and colour palette.
//!
//! Built once (from defaults or a JSON file) and passed by reference into
//! every system that needs it. Nothing mutates it after construction.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enums::ColorTag;
use crate::types::{Aabb, Hitbox, Position};

/// Reasons an arena configuration is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("arena must have positive size, got {width}x{height}")]
    EmptyArena { width: f64, height: f64 },

    #[error("spawn margin must be non-negative, got {0}")]
    NegativeSpawnMargin(f64),

    #[error("supply inset {inset} leaves no room in a {width}x{height} arena")]
    SupplyInsetTooLarge { inset: f64, width: f64, height: f64 },

    #[error("failed to parse arena config: {0}")]
    Parse(String),
}

/// RGB values for each colour tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub yellow: [u8; 3],
    pub orange: [u8; 3],
    pub blue: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            yellow: [255, 255, 0],
            orange: [255, 165, 0],
            blue: [50, 50, 230],
        }
    }
}

impl Palette {
    pub fn rgb(&self, tag: ColorTag) -> [u8; 3] {
        match tag {
            ColorTag::Yellow => self.yellow,
            ColorTag::Orange => self.orange,
            ColorTag::Blue => self.blue,
        }
    }
}

/// Immutable play-area description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Play-area width (pixels).
    pub width: f64,
    /// Play-area height (pixels).
    pub height: f64,
    /// Distance outside the visible edge at which enemies appear.
    pub spawn_margin: f64,
    /// Supplies appear at least this far inside every edge.
    pub supply_inset: f64,
    pub palette: Palette,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
            spawn_margin: 50.0,
            supply_inset: 100.0,
            palette: Palette::default(),
        }
    }
}

impl ArenaConfig {
    /// Parse a JSON arena description. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: ArenaConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(ConfigError::EmptyArena {
                width: self.width,
                height: self.height,
            });
        }
        if self.spawn_margin.is_nan() || self.spawn_margin < 0.0 {
            return Err(ConfigError::NegativeSpawnMargin(self.spawn_margin));
        }
        if self.supply_inset.is_nan()
            || self.supply_inset < 0.0
            || self.supply_inset * 2.0 > self.width
            || self.supply_inset * 2.0 > self.height
        {
            return Err(ConfigError::SupplyInsetTooLarge {
                inset: self.supply_inset,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// The visible play area.
    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: DVec2::ZERO,
            max: DVec2::new(self.width, self.height),
        }
    }

    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a position so the whole hitbox stays inside the play area.
    pub fn clamp_inside(&self, pos: &mut Position, hitbox: &Hitbox) {
        let half_w = (hitbox.width / 2.0).min(self.width / 2.0);
        let half_h = (hitbox.height / 2.0).min(self.height / 2.0);
        pos.x = pos.x.clamp(half_w, self.width - half_w);
        pos.y = pos.y.clamp(half_h, self.height - half_h);
    }
}
