//! # Town Generator
//!
//! Lays out the starting town: four buildings and four patches of tall grass
//! inside a walled border.

use super::{utils, GenerationConfig, Generator};
use crate::{EmeraldResult, TileKind, TileMap};
use log::debug;

/// A filled block of cells, in tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    column: i32,
    row: i32,
    width: i32,
    height: i32,
}

impl Block {
    fn new(column: i32, row: i32, width: i32, height: i32) -> Self {
        Self {
            column,
            row,
            width,
            height,
        }
    }
}

/// Generator for the town layout.
#[derive(Debug, Default, Clone, Copy)]
pub struct TownGenerator;

impl TownGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator<TileMap> for TownGenerator {
    fn generate(&self, config: &GenerationConfig) -> EmeraldResult<TileMap> {
        config.validate()?;

        let map = build_town(
            &config.map_name,
            config.pixel_width,
            config.pixel_height,
            config.tile_size,
        );
        self.validate(&map, config)?;

        debug!(
            "{} built '{}' with {} obstacles and {} grass cells",
            self.generator_type(),
            map.name(),
            map.obstacles().len(),
            map.grass_zones().len()
        );
        Ok(map)
    }

    fn validate(&self, content: &TileMap, config: &GenerationConfig) -> EmeraldResult<()> {
        if content.columns() != config.columns() || content.rows() != config.rows() {
            return Err(crate::EmeraldError::GenerationFailed(format!(
                "map is {}x{} tiles, expected {}x{}",
                content.columns(),
                content.rows(),
                config.columns(),
                config.rows()
            )));
        }
        utils::validate_map(content)
    }

    fn generator_type(&self) -> &'static str {
        "TownGenerator"
    }
}

/// Builds the town grid for a map of the given pixel size.
///
/// Buildings go down first and grass is painted over them, so a patch that
/// reaches into a house wins the overlapping cells. Blocks that would spill
/// onto the border or outside the grid are clipped to the interior.
pub fn build_town(name: &str, pixel_width: i32, pixel_height: i32, tile_size: i32) -> TileMap {
    let generation = GenerationConfig {
        map_name: name.to_string(),
        pixel_width,
        pixel_height,
        tile_size,
    };
    let columns = generation.columns();
    let rows = generation.rows();
    let mut grid = vec![vec![TileKind::Road; columns]; rows];

    let cols = columns as i32;
    let rws = rows as i32;

    let buildings = [
        Block::new(2, 2, 5, 4),
        Block::new(cols - 7, 2, 5, 4),
        Block::new(cols / 2 - 2, rws / 2 - 2, 4, 4),
        Block::new(cols / 2 - 3, rws - 6, 6, 3),
    ];
    let grass = [
        Block::new(3, 5, 4, 5),
        Block::new(cols - 8, 5, 5, 5),
        Block::new(cols - 8, rws - 10, 5, 5),
        Block::new(3, rws - 10, 4, 5),
    ];

    for block in &buildings {
        paint(&mut grid, *block, TileKind::Building);
    }
    for block in &grass {
        paint(&mut grid, *block, TileKind::Grass);
    }

    TileMap::from_grid(name, grid, tile_size, pixel_width, pixel_height)
}

fn paint(grid: &mut [Vec<TileKind>], block: Block, kind: TileKind) {
    let rows = grid.len() as i32;
    for row in block.row.max(1)..(block.row + block.height).min(rows - 1) {
        let cells = &mut grid[row as usize];
        let columns = cells.len() as i32;
        for column in block.column.max(1)..(block.column + block.width).min(columns - 1) {
            cells[column as usize] = kind;
        }
    }
}
