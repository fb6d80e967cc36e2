//! # Input Module
//!
//! Keyboard sampling into immutable per-tick snapshots.
//!
//! Screens never query the keyboard themselves. The loop driver samples one
//! [`InputSnapshot`] per tick through [`InputHandler`] and hands it to the
//! screen manager, which makes every screen testable with hand-built input.

use crate::Direction;
use macroquad::prelude::{is_key_down, KeyCode};

/// Held state of every input the game reads, sampled once per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub confirm: bool,
    pub cancel: bool,
    pub space: bool,
}

impl InputSnapshot {
    /// A snapshot with nothing held.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn up() -> Self {
        Self {
            up: true,
            ..Self::default()
        }
    }

    pub fn down() -> Self {
        Self {
            down: true,
            ..Self::default()
        }
    }

    pub fn left() -> Self {
        Self {
            left: true,
            ..Self::default()
        }
    }

    pub fn right() -> Self {
        Self {
            right: true,
            ..Self::default()
        }
    }

    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Self::default()
        }
    }

    pub fn cancel() -> Self {
        Self {
            cancel: true,
            ..Self::default()
        }
    }

    pub fn space() -> Self {
        Self {
            space: true,
            ..Self::default()
        }
    }

    /// Inputs held now that were not held in `previous`.
    ///
    /// # Examples
    ///
    /// ```
    /// use emerald::InputSnapshot;
    ///
    /// let held = InputSnapshot { space: true, up: true, ..Default::default() };
    /// let before = InputSnapshot { up: true, ..Default::default() };
    /// let pressed = held.rising_edges(&before);
    /// assert!(pressed.space);
    /// assert!(!pressed.up);
    /// ```
    pub fn rising_edges(&self, previous: &InputSnapshot) -> InputSnapshot {
        InputSnapshot {
            up: self.up && !previous.up,
            down: self.down && !previous.down,
            left: self.left && !previous.left,
            right: self.right && !previous.right,
            confirm: self.confirm && !previous.confirm,
            cancel: self.cancel && !previous.cancel,
            space: self.space && !previous.space,
        }
    }

    /// Whether the key for `direction` is held.
    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    /// Whether nothing is held.
    pub fn is_idle(&self) -> bool {
        *self == InputSnapshot::default()
    }
}

/// Samples the macroquad keyboard into snapshots.
pub struct InputHandler {
    /// Whether WASD also moves the player
    pub wasd_enabled: bool,
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    ///
    /// # Examples
    ///
    /// ```
    /// use emerald::InputHandler;
    ///
    /// let input_handler = InputHandler::new();
    /// assert!(input_handler.wasd_enabled);
    /// ```
    pub fn new() -> Self {
        Self { wasd_enabled: true }
    }

    /// Reads the keys held right now.
    ///
    /// Must be called from inside the macroquad loop.
    pub fn sample(&self) -> InputSnapshot {
        let held = |primary: KeyCode, alternate: KeyCode| {
            is_key_down(primary) || (self.wasd_enabled && is_key_down(alternate))
        };

        InputSnapshot {
            up: held(KeyCode::Up, KeyCode::W),
            down: held(KeyCode::Down, KeyCode::S),
            left: held(KeyCode::Left, KeyCode::A),
            right: held(KeyCode::Right, KeyCode::D),
            confirm: is_key_down(KeyCode::Enter) || is_key_down(KeyCode::KpEnter),
            cancel: is_key_down(KeyCode::Escape),
            space: is_key_down(KeyCode::Space),
        }
    }
}
