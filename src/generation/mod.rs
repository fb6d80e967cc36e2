//! # Generation Module
//!
//! Builds tile maps from a small generation configuration.
//!
//! Maps are laid out from fixed offsets relative to the grid size, so the
//! same configuration always produces the same map. Every generator is
//! validated after it runs; a map that breaks the border or partition rules
//! is reported as [`EmeraldError::GenerationFailed`].

pub mod town;

pub use town::*;

use crate::{config, EmeraldError, EmeraldResult};
use serde::{Deserialize, Serialize};

/// Configuration for map generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Map name, also selects the background image
    pub map_name: String,
    /// Map width in pixels
    pub pixel_width: i32,
    /// Map height in pixels
    pub pixel_height: i32,
    /// Edge length of one tile in pixels
    pub tile_size: i32,
}

impl GenerationConfig {
    /// Creates a configuration for a named map of the given pixel size.
    ///
    /// # Examples
    ///
    /// ```
    /// use emerald::GenerationConfig;
    ///
    /// let config = GenerationConfig::new("town", 800, 600);
    /// assert_eq!(config.columns(), 25);
    /// assert_eq!(config.rows(), 19);
    /// ```
    pub fn new(map_name: &str, pixel_width: i32, pixel_height: i32) -> Self {
        Self {
            map_name: map_name.to_string(),
            pixel_width,
            pixel_height,
            tile_size: config::TILE_SIZE,
        }
    }

    /// A tiny map for tests.
    pub fn for_testing() -> Self {
        Self::new("test", 320, 320)
    }

    /// Number of tile columns, rounding partial tiles up.
    pub fn columns(&self) -> usize {
        tiles_for(self.pixel_width, self.tile_size)
    }

    /// Number of tile rows, rounding partial tiles up.
    pub fn rows(&self) -> usize {
        tiles_for(self.pixel_height, self.tile_size)
    }

    /// Checks that the configuration can describe a map.
    pub fn validate(&self) -> EmeraldResult<()> {
        if self.tile_size <= 0 {
            return Err(EmeraldError::InvalidConfig(format!(
                "tile size must be positive, got {}",
                self.tile_size
            )));
        }
        if self.pixel_width <= 0 || self.pixel_height <= 0 {
            return Err(EmeraldError::InvalidConfig(format!(
                "map size must be positive, got {}x{}",
                self.pixel_width, self.pixel_height
            )));
        }
        if self.map_name.trim().is_empty() {
            return Err(EmeraldError::InvalidConfig(
                "map name must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(
            config::DEFAULT_MAP_NAME,
            config::DEFAULT_MAP_WIDTH,
            config::DEFAULT_MAP_HEIGHT,
        )
    }
}

fn tiles_for(pixels: i32, tile_size: i32) -> usize {
    if pixels <= 0 || tile_size <= 0 {
        return 0;
    }
    ((pixels + tile_size - 1) / tile_size) as usize
}

/// Trait for map generators.
///
/// Generators are deterministic: the configuration fully decides the output.
pub trait Generator<T> {
    /// Generates content from the configuration.
    fn generate(&self, config: &GenerationConfig) -> EmeraldResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> EmeraldResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use crate::{EmeraldError, EmeraldResult, TileKind, TileMap};

    /// Checks the structural rules every map must satisfy.
    ///
    /// The outer ring must be walls, and every cell must be counted exactly
    /// once as an obstacle, a grass zone, or road.
    pub fn validate_map(map: &TileMap) -> EmeraldResult<()> {
        let rows = map.rows();
        let columns = map.columns();

        if rows == 0 || columns == 0 {
            return Err(EmeraldError::GenerationFailed(
                "map has no cells".to_string(),
            ));
        }

        for (row_index, row) in map.grid().iter().enumerate() {
            if row.len() != columns {
                return Err(EmeraldError::GenerationFailed(format!(
                    "row {} has {} cells, expected {}",
                    row_index,
                    row.len(),
                    columns
                )));
            }
            for (column_index, tile) in row.iter().enumerate() {
                let on_border = row_index == 0
                    || row_index + 1 == rows
                    || column_index == 0
                    || column_index + 1 == columns;
                if on_border && *tile != TileKind::Wall {
                    return Err(EmeraldError::GenerationFailed(format!(
                        "border cell ({}, {}) is {:?}",
                        column_index, row_index, tile
                    )));
                }
            }
        }

        let roads = map.count(TileKind::Road);
        let partitioned = map.obstacles().len() + map.grass_zones().len() + roads;
        if partitioned != rows * columns {
            return Err(EmeraldError::GenerationFailed(format!(
                "{} cells are classified but the map has {}",
                partitioned,
                rows * columns
            )));
        }

        Ok(())
    }
}
