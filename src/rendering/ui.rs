//! # User Interface Elements
//!
//! Widgets shared by the screens: health bars, option lists and the message box.

use super::{Rgba, Surface};
use crate::Creature;

/// Width of a health bar in pixels.
pub const HEALTH_BAR_WIDTH: f32 = 150.0;

/// Height of a health bar in pixels.
pub const HEALTH_BAR_HEIGHT: f32 = 10.0;

/// Bar colour for the given HP fraction.
///
/// # Examples
///
/// ```
/// use emerald::{health_color, Rgba};
///
/// assert_eq!(health_color(0.8), Rgba::GREEN);
/// assert_eq!(health_color(0.5), Rgba::YELLOW);
/// assert_eq!(health_color(0.2), Rgba::RED);
/// ```
pub fn health_color(ratio: f64) -> Rgba {
    if ratio > 0.5 {
        Rgba::GREEN
    } else if ratio > 0.2 {
        Rgba::YELLOW
    } else {
        Rgba::RED
    }
}

/// Draws a creature's health bar with its HP numbers and name tag.
pub fn draw_health_bar(surface: &mut dyn Surface, creature: &Creature, x: f32, y: f32) {
    let ratio = creature.hp_ratio();

    surface.fill_rect(x, y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT, Rgba::GRAY);
    surface.fill_rect(
        x,
        y,
        HEALTH_BAR_WIDTH * ratio as f32,
        HEALTH_BAR_HEIGHT,
        health_color(ratio),
    );
    surface.stroke_rect(x, y, HEALTH_BAR_WIDTH, HEALTH_BAR_HEIGHT, 1.0, Rgba::BLACK);

    surface.draw_text(
        &format!("{}/{}", creature.hp(), creature.max_hp()),
        x + HEALTH_BAR_WIDTH + 5.0,
        y + 10.0,
        12.0,
        Rgba::BLACK,
    );
    surface.draw_text(
        &format!("{} Lv.{}", creature.name(), creature.level()),
        x,
        y - 5.0,
        14.0,
        Rgba::BLACK,
    );
}

/// Draws a vertical list of options with the selected one in red.
pub fn draw_option_list(
    surface: &mut dyn Surface,
    options: &[&str],
    selected: usize,
    origin: (f32, f32),
    spacing: f32,
    size: f32,
    color: Rgba,
) {
    for (index, option) in options.iter().enumerate() {
        let tint = if index == selected { Rgba::RED } else { color };
        surface.draw_text(option, origin.0, origin.1 + index as f32 * spacing, size, tint);
    }
}

/// Draws the white message panel along the bottom of the screen.
pub fn draw_message_box(surface: &mut dyn Surface, message: &str, x: f32, y: f32, width: f32, height: f32) {
    surface.fill_rect(x, y, width, height, Rgba::WHITE);
    surface.stroke_rect(x, y, width, height, 2.0, Rgba::BLACK);
    surface.draw_text(message, x + 20.0, y + 30.0, 20.0, Rgba::BLACK);
}
