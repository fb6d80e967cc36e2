//! # Game Settings
//!
//! Runtime configuration loaded from JSON and overridden from the command line.

use crate::{config, EmeraldError, EmeraldResult, GenerationConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings that can change between runs without rebuilding.
///
/// Every field has a default, so a config file only needs to list what it
/// changes.
///
/// # Examples
///
/// ```
/// use emerald::GameConfig;
///
/// let config = GameConfig::from_json(r#"{ "encounter_rate": 4 }"#).unwrap();
/// assert_eq!(config.encounter_rate, 4);
/// assert_eq!(config.map_name, "town");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the session random source; random when absent
    pub seed: Option<u64>,
    /// Map the overworld loads
    pub map_name: String,
    /// One encounter per this many eligible steps, on average
    pub encounter_rate: u32,
    /// Ticks per second
    pub target_fps: u32,
    /// Draw tile outlines and labels over the map
    pub debug_grid: bool,
    /// Map size in pixels, overriding the default extent
    pub map_size: Option<(i32, i32)>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            map_name: config::DEFAULT_MAP_NAME.to_string(),
            encounter_rate: config::DEFAULT_ENCOUNTER_RATE,
            target_fps: config::TARGET_FPS,
            debug_grid: false,
            map_size: None,
        }
    }
}

impl GameConfig {
    /// Parses and validates a JSON document.
    pub fn from_json(json: &str) -> EmeraldResult<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> EmeraldResult<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&contents)?;
        log::info!("Loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Serializes to pretty-printed JSON.
    pub fn save_to_json(&self) -> EmeraldResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the config as JSON to `path`.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> EmeraldResult<()> {
        fs::write(path, self.save_to_json()?)?;
        Ok(())
    }

    /// Checks every value is usable.
    pub fn validate(&self) -> EmeraldResult<()> {
        if self.encounter_rate == 0 {
            return Err(EmeraldError::InvalidConfig(
                "encounter_rate must be at least 1".to_string(),
            ));
        }
        if self.target_fps == 0 {
            return Err(EmeraldError::InvalidConfig(
                "target_fps must be at least 1".to_string(),
            ));
        }
        if self.map_name.trim().is_empty() {
            return Err(EmeraldError::InvalidConfig(
                "map_name must not be empty".to_string(),
            ));
        }
        self.generation_config().validate()
    }

    /// Generation settings for the configured map.
    pub fn generation_config(&self) -> GenerationConfig {
        let (width, height) = self
            .map_size
            .unwrap_or((config::DEFAULT_MAP_WIDTH, config::DEFAULT_MAP_HEIGHT));
        GenerationConfig::new(&self.map_name, width, height)
    }
}
