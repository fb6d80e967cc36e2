//! # Utilities Module
//!
//! Helpers for driving the game loop.

pub mod timing;

pub use timing::*;
