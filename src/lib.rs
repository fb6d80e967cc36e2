//! # Emerald
//!
//! A small tile-based creature-collecting RPG: a menu, an overworld town with
//! tall grass, and turn-based battles against wild creatures.
//!
//! ## Architecture Overview
//!
//! The crate is split into pure game logic and thin platform adapters:
//!
//! - **Game**: tile map, player, creatures and the battle resolver
//! - **Generation**: the town layout generator that builds tile maps
//! - **Scenes**: the screen state machine (menu, overworld, battle)
//! - **Input**: per-tick input snapshots sampled from the keyboard
//! - **Rendering**: an abstract drawing surface plus the macroquad display
//!
//! Game logic never touches the window. Every screen receives an
//! [`InputSnapshot`] in `update` and draws through a [`Surface`] in `render`,
//! which keeps the whole state machine testable without a graphics context.

pub mod game;
pub mod generation;
pub mod input;
pub mod rendering;
pub mod scenes;
pub mod utils;

// Core module re-exports
pub use game::*;
pub use generation::*;
pub use input::*;
pub use rendering::*;
pub use scenes::*;
pub use utils::*;

/// Core error type for the Emerald game.
#[derive(thiserror::Error, Debug)]
pub enum EmeraldError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration value is out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),

    /// Map generation failed validation
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Emerald codebase.
pub type EmeraldResult<T> = Result<T, EmeraldError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Edge length of one map tile in pixels
    pub const TILE_SIZE: i32 = 32;

    /// Window width in pixels
    pub const SCREEN_WIDTH: i32 = 800;

    /// Window height in pixels
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Map width used when the map image is unavailable
    pub const DEFAULT_MAP_WIDTH: i32 = 800;

    /// Map height used when the map image is unavailable
    pub const DEFAULT_MAP_HEIGHT: i32 = 600;

    /// Name of the map the overworld loads on start
    pub const DEFAULT_MAP_NAME: &str = "town";

    /// Player bounding box width in pixels
    pub const PLAYER_WIDTH: i32 = 32;

    /// Player bounding box height in pixels
    pub const PLAYER_HEIGHT: i32 = 48;

    /// Pixels moved per tick while a direction is held
    pub const PLAYER_SPEED: i32 = 4;

    /// Preferred player spawn point in pixels
    pub const PLAYER_SPAWN: (i32, i32) = (400, 300);

    /// Ticks between walk animation frames
    pub const ANIMATION_DELAY: u32 = 10;

    /// One wild encounter per this many eligible steps, on average
    pub const DEFAULT_ENCOUNTER_RATE: u32 = 10;

    /// Ticks a regular battle message stays on screen
    pub const MESSAGE_TICKS: u32 = 60;

    /// Ticks a win/lose message stays on screen before input is accepted
    pub const OUTCOME_MESSAGE_TICKS: u32 = 120;

    /// HP restored by the potion in the battle item menu
    pub const POTION_HEAL: u32 = 20;

    /// Frames per second target for the game loop
    pub const TARGET_FPS: u32 = 60;
}
