//! # Game Module
//!
//! Core game rules: the tile map, actors, and battle resolution.
//!
//! This module contains the fundamental building blocks of Emerald:
//! - Tile map representation with collision and zone queries
//! - Player and creature state
//! - The battle resolver for damage and capture chances
//! - Runtime game configuration

pub mod combat;
pub mod creature;
pub mod map;
pub mod player;
pub mod settings;

pub use combat::*;
pub use creature::*;
pub use map::*;
pub use player::*;
pub use settings::*;

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel space.
///
/// # Examples
///
/// ```
/// use emerald::Rect;
///
/// let a = Rect::new(0, 0, 32, 32);
/// let b = Rect::new(16, 16, 32, 32);
/// assert!(a.intersects(&b));
/// assert!(!a.intersects(&Rect::new(32, 0, 32, 32))); // touching edges do not overlap
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and size.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// X coordinate one past the right edge.
    pub fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Y coordinate one past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Whether the rectangle covers no area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Checks whether two rectangles share a region of positive area.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }

        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Checks whether the rectangle lies entirely within `0..width` x `0..height`.
    pub fn fits_within(&self, width: i32, height: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.right() <= width && self.bottom() <= height
    }

    /// Returns a copy moved to the given top-left corner.
    pub fn at(&self, x: i32, y: i32) -> Rect {
        Rect::new(x, y, self.width, self.height)
    }
}

/// Facing and movement directions on the overworld.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Converts a direction to a unit pixel delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use emerald::Direction;
    ///
    /// assert_eq!(Direction::Up.to_delta(), (0, -1));
    /// assert_eq!(Direction::Right.to_delta(), (1, 0));
    /// ```
    pub fn to_delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Row of the player sprite sheet holding this direction's walk cycle.
    pub fn sprite_row(self) -> i32 {
        match self {
            Direction::Down => 0,
            Direction::Left => 1,
            Direction::Right => 2,
            Direction::Up => 3,
        }
    }

    /// Returns all 4 directions in input-processing order.
    pub fn all() -> [Direction; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_creation() {
        let rect = Rect::new(5, 10, 32, 48);
        assert_eq!(rect.x, 5);
        assert_eq!(rect.y, 10);
        assert_eq!(rect.right(), 37);
        assert_eq!(rect.bottom(), 58);
    }

    #[test]
    fn test_rect_intersection() {
        let a = Rect::new(0, 0, 32, 32);
        assert!(a.intersects(&Rect::new(31, 31, 10, 10)));
        assert!(!a.intersects(&Rect::new(32, 0, 32, 32)));
        assert!(!a.intersects(&Rect::new(0, 32, 32, 32)));
        assert!(!a.intersects(&Rect::new(-100, -100, 10, 10)));
    }

    #[test]
    fn test_empty_rect_never_intersects() {
        let a = Rect::new(0, 0, 32, 32);
        assert!(!a.intersects(&Rect::new(10, 10, 0, 10)));
        assert!(!Rect::new(10, 10, 10, -1).intersects(&a));
    }

    #[test]
    fn test_edges_saturate_near_the_coordinate_limit() {
        let far = Rect::new(i32::MAX - 2, i32::MAX - 2, 32, 48);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.bottom(), i32::MAX);

        let origin = Rect::new(0, 0, 32, 32);
        assert!(!far.intersects(&origin));
        assert!(!origin.intersects(&far));
        assert!(!far.fits_within(800, 600));
    }

    #[test]
    fn test_rect_fits_within() {
        assert!(Rect::new(0, 0, 32, 48).fits_within(800, 600));
        assert!(!Rect::new(-1, 0, 32, 48).fits_within(800, 600));
        assert!(!Rect::new(770, 0, 32, 48).fits_within(800, 600));
    }

    #[test]
    fn test_direction_to_delta() {
        assert_eq!(Direction::Up.to_delta(), (0, -1));
        assert_eq!(Direction::Down.to_delta(), (0, 1));
        assert_eq!(Direction::Left.to_delta(), (-1, 0));
    }

    #[test]
    fn test_direction_sprite_rows_are_distinct() {
        let mut rows: Vec<i32> = Direction::all().iter().map(|d| d.sprite_row()).collect();
        rows.sort_unstable();
        assert_eq!(rows, vec![0, 1, 2, 3]);
    }
}
