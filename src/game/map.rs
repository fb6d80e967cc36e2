//! # Tile Map
//!
//! Grid of terrain codes with precomputed obstacle and tall-grass rectangles.
//!
//! The grid is fixed once built. Every query works on pixel-space rectangles,
//! so actors never need to know about tile coordinates.

use crate::{config, Rect};
use serde::{Deserialize, Serialize};

/// Terrain code stored in each grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Road = 0,
    Wall = 1,
    Grass = 2,
    Building = 3,
}

impl TileKind {
    /// Whether actors are blocked by this tile.
    pub fn is_obstacle(self) -> bool {
        matches!(self, TileKind::Wall | TileKind::Building)
    }

    /// Single-letter label for the debug grid overlay.
    pub fn debug_label(self) -> Option<&'static str> {
        match self {
            TileKind::Road => None,
            TileKind::Wall => Some("W"),
            TileKind::Grass => Some("G"),
            TileKind::Building => Some("B"),
        }
    }
}

/// Result of pushing an actor out of the obstacles it overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionOutcome {
    /// Corrected top-left corner of the actor
    pub x: i32,
    pub y: i32,
    /// Whether the actor touched at least one obstacle
    pub collided: bool,
}

/// A rectangular map made of square tiles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    name: String,
    tile_size: i32,
    pixel_width: i32,
    pixel_height: i32,
    grid: Vec<Vec<TileKind>>,
    obstacles: Vec<Rect>,
    grass_zones: Vec<Rect>,
}

impl TileMap {
    /// Builds the standard town layout for a map of the given pixel size.
    ///
    /// # Examples
    ///
    /// ```
    /// use emerald::{TileKind, TileMap};
    ///
    /// let map = TileMap::new("town", 800, 600);
    /// assert_eq!(map.columns(), 25);
    /// assert_eq!(map.rows(), 19);
    /// assert_eq!(map.tile_at(0, 0), Some(TileKind::Wall));
    /// ```
    pub fn new(name: &str, pixel_width: i32, pixel_height: i32) -> Self {
        crate::generation::town::build_town(name, pixel_width, pixel_height, config::TILE_SIZE)
    }

    /// Wraps a prepared grid, forcing the outer ring to walls and deriving
    /// obstacle and grass rectangles.
    pub fn from_grid(
        name: &str,
        mut grid: Vec<Vec<TileKind>>,
        tile_size: i32,
        pixel_width: i32,
        pixel_height: i32,
    ) -> Self {
        let rows = grid.len();
        for (row_index, row) in grid.iter_mut().enumerate() {
            let columns = row.len();
            for (column_index, tile) in row.iter_mut().enumerate() {
                if row_index == 0
                    || row_index + 1 == rows
                    || column_index == 0
                    || column_index + 1 == columns
                {
                    *tile = TileKind::Wall;
                }
            }
        }

        let mut obstacles = Vec::new();
        let mut grass_zones = Vec::new();
        for (row_index, row) in grid.iter().enumerate() {
            for (column_index, tile) in row.iter().enumerate() {
                let cell = Rect::new(
                    column_index as i32 * tile_size,
                    row_index as i32 * tile_size,
                    tile_size,
                    tile_size,
                );
                if tile.is_obstacle() {
                    obstacles.push(cell);
                } else if *tile == TileKind::Grass {
                    grass_zones.push(cell);
                }
            }
        }

        Self {
            name: name.to_string(),
            tile_size,
            pixel_width,
            pixel_height,
            grid,
            obstacles,
            grass_zones,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    /// Width of the walkable area in pixels.
    pub fn pixel_width(&self) -> i32 {
        self.pixel_width
    }

    /// Height of the walkable area in pixels.
    pub fn pixel_height(&self) -> i32 {
        self.pixel_height
    }

    /// Number of tile columns.
    pub fn columns(&self) -> usize {
        self.grid.first().map_or(0, Vec::len)
    }

    /// Number of tile rows.
    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    /// Terrain at a tile coordinate, `None` outside the grid.
    pub fn tile_at(&self, column: usize, row: usize) -> Option<TileKind> {
        self.grid.get(row).and_then(|cells| cells.get(column)).copied()
    }

    /// All grid rows, top to bottom.
    pub fn grid(&self) -> &[Vec<TileKind>] {
        &self.grid
    }

    /// Rectangles of every wall and building cell.
    pub fn obstacles(&self) -> &[Rect] {
        &self.obstacles
    }

    /// Rectangles of every tall-grass cell.
    pub fn grass_zones(&self) -> &[Rect] {
        &self.grass_zones
    }

    /// Logical path of the background image for this map.
    pub fn image_path(&self) -> String {
        map_image_path(&self.name)
    }

    /// Human-readable place name for the map label.
    pub fn display_name(&self) -> &'static str {
        map_display_name(&self.name)
    }

    /// Pushes `actor` out of every obstacle it overlaps.
    ///
    /// Obstacles are visited in row-major order. For each one the actor
    /// intersects, the X axis is corrected first: a right edge inside the
    /// obstacle snaps the actor to its left side, a left edge inside it snaps
    /// the actor to its right side. The Y axis is then corrected by the same
    /// rule, whether or not the X correction already cleared the overlap. The
    /// order is fixed and ignores which overlap is smaller.
    pub fn resolve_collision(&self, actor: Rect) -> CollisionOutcome {
        let mut current = actor;
        let mut collided = false;

        for obstacle in &self.obstacles {
            if !current.intersects(obstacle) {
                continue;
            }
            collided = true;

            if current.right() > obstacle.x && current.x < obstacle.x {
                current.x = obstacle.x - current.width;
            } else if current.x < obstacle.right() && current.right() > obstacle.right() {
                current.x = obstacle.right();
            }

            if current.bottom() > obstacle.y && current.y < obstacle.y {
                current.y = obstacle.y - current.height;
            } else if current.y < obstacle.bottom() && current.bottom() > obstacle.bottom() {
                current.y = obstacle.bottom();
            }
        }

        CollisionOutcome {
            x: current.x,
            y: current.y,
            collided,
        }
    }

    /// Whether `actor` overlaps any obstacle.
    pub fn is_blocked(&self, actor: Rect) -> bool {
        self.obstacles.iter().any(|obstacle| actor.intersects(obstacle))
    }

    /// Whether `actor` overlaps any tall-grass cell.
    pub fn is_in_zone(&self, actor: Rect) -> bool {
        self.grass_zones.iter().any(|grass| actor.intersects(grass))
    }

    /// Finds a place for an actor of the given size to stand.
    ///
    /// Returns `preferred` when the box there stays inside the map and touches
    /// neither obstacles nor grass. Otherwise returns the clear tile-aligned
    /// position closest to it, or `None` when the map has no room at all.
    pub fn find_open_position(
        &self,
        preferred: (i32, i32),
        width: i32,
        height: i32,
    ) -> Option<(i32, i32)> {
        let is_clear = |x: i32, y: i32| {
            let candidate = Rect::new(x, y, width, height);
            candidate.fits_within(self.pixel_width, self.pixel_height)
                && !self.is_blocked(candidate)
                && !self.is_in_zone(candidate)
        };

        if is_clear(preferred.0, preferred.1) {
            return Some(preferred);
        }

        let mut best: Option<((i32, i32), i64)> = None;
        for row in 0..self.rows() as i32 {
            for column in 0..self.columns() as i32 {
                let x = column * self.tile_size;
                let y = row * self.tile_size;
                if !is_clear(x, y) {
                    continue;
                }

                let distance = (x - preferred.0).abs() as i64 + (y - preferred.1).abs() as i64;
                if best.map_or(true, |(_, best_distance)| distance < best_distance) {
                    best = Some(((x, y), distance));
                }
            }
        }

        best.map(|(position, _)| position)
    }

    /// Counts cells of each terrain kind.
    pub fn count(&self, kind: TileKind) -> usize {
        self.grid
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| **tile == kind)
            .count()
    }
}

/// Maps a map name to the logical path of its background image.
///
/// Unknown names fall back to the starting town.
pub fn map_image_path(name: &str) -> String {
    let file = match name.to_lowercase().as_str() {
        "guchen_town" => "gu_chen_zhen.png",
        "professor_home" => "professor_home.png",
        "player_home" => "boy_player_home.png",
        "player_home_2f" => "boy_player_home_2nd_floor.png",
        "chenghua_forest" => "cheng_hua_forest.png",
        "chenghua_city" => "cheng_hua_shi.png",
        "route_101" => "Road_101.png",
        "route_102" => "Road_102.png",
        "route_103" => "Road_103.png",
        "route_104" => "Road_104.png",
        _ => "wei_bai_zhen.png",
    };
    format!("image/map/{}", file)
}

/// Place name shown in the corner of the overworld.
pub fn map_display_name(name: &str) -> &'static str {
    match name.to_lowercase().as_str() {
        "guchen_town" => "Oldale Town",
        "professor_home" => "Professor's Lab",
        "player_home" => "Player's House",
        "player_home_2f" => "Player's Room",
        "chenghua_forest" => "Petalburg Woods",
        "chenghua_city" => "Petalburg City",
        "route_101" => "Route 101",
        "route_102" => "Route 102",
        "route_103" => "Route 103",
        "route_104" => "Route 104",
        _ => "Littleroot Town",
    }
}
