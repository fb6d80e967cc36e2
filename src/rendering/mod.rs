//! # Rendering Module
//!
//! Abstract 2D drawing surface used by every screen, plus the macroquad
//! implementation and shared UI widgets.
//!
//! Screens issue draw calls against [`Surface`] and never keep surface state
//! between ticks. Images are addressed by logical path; a surface that cannot
//! find an image draws a deterministic placeholder instead of failing.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;

use crate::{map_image_path, CaptureTool, Rect};

/// An RGBA colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const GREEN: Rgba = Rgba::rgb(0, 200, 0);
    pub const YELLOW: Rgba = Rgba::rgb(255, 200, 0);
    pub const GRAY: Rgba = Rgba::rgb(128, 128, 128);
    pub const DARK_GRAY: Rgba = Rgba::rgb(64, 64, 64);
    pub const LIGHT_GRAY: Rgba = Rgba::rgb(200, 200, 200);
}

/// Drawing primitives a screen may use.
pub trait Surface {
    /// Clears the whole surface.
    fn clear(&mut self, color: Rgba);

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, thickness: f32, color: Rgba);

    /// Draws text with its baseline at `y`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba);

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Rgba);

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba);

    /// Fills a convex polygon.
    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba);

    /// Draws an image (or a region of it) scaled into the destination box.
    fn draw_image(&mut self, path: &str, source: Option<Rect>, x: f32, y: f32, width: f32, height: f32);
}

/// Source of image metadata, keyed by logical path.
pub trait AssetProvider {
    /// Pixel size of the image, `None` when it is not available.
    fn image_size(&self, path: &str) -> Option<(u32, u32)>;
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rgba),
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgba,
    },
    Text {
        text: String,
        x: f32,
        y: f32,
        color: Rgba,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        color: Rgba,
    },
    Circle {
        x: f32,
        y: f32,
        radius: f32,
        color: Rgba,
    },
    Polygon {
        points: Vec<(f32, f32)>,
        color: Rgba,
    },
    Image {
        path: String,
        source: Option<Rect>,
        x: f32,
        y: f32,
    },
}

/// Surface that stores every call instead of drawing, for headless tests.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every recorded call.
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    /// All text drawn, in call order.
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Whether any drawn text contains `needle`.
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|text| text.contains(needle))
    }

    /// Colour of the first text containing `needle`.
    pub fn text_color(&self, needle: &str) -> Option<Rgba> {
        self.calls.iter().find_map(|call| match call {
            DrawCall::Text { text, color, .. } if text.contains(needle) => Some(*color),
            _ => None,
        })
    }

    /// Paths of all images drawn, in call order.
    pub fn images(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Image { path, .. } => Some(path.as_str()),
                _ => None,
            })
            .collect()
    }

    /// First image call for `path`.
    pub fn image_call(&self, path: &str) -> Option<&DrawCall> {
        self.calls
            .iter()
            .find(|call| matches!(call, DrawCall::Image { path: p, .. } if p == path))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Rgba) {
        self.calls.push(DrawCall::Clear(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        self.calls.push(DrawCall::FillRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, _thickness: f32, color: Rgba) {
        self.calls.push(DrawCall::StrokeRect {
            x,
            y,
            width,
            height,
            color,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, _size: f32, color: Rgba) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, _thickness: f32, color: Rgba) {
        self.calls.push(DrawCall::Line {
            from: (x1, y1),
            to: (x2, y2),
            color,
        });
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.calls.push(DrawCall::Circle { x, y, radius, color });
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba) {
        self.calls.push(DrawCall::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_image(&mut self, path: &str, source: Option<Rect>, x: f32, y: f32, _width: f32, _height: f32) {
        self.calls.push(DrawCall::Image {
            path: path.to_string(),
            source,
            x,
            y,
        });
    }
}

/// Logical path of the player walk sheet.
pub const PLAYER_SPRITE_PATH: &str = "image/player/player.png";

/// Logical path of the battle backdrop.
pub const BATTLE_BACKGROUND_PATH: &str = "image/battle/background.png";

/// Every image the game may ask for, for preloading.
pub fn asset_manifest() -> Vec<String> {
    let mut paths = vec![
        PLAYER_SPRITE_PATH.to_string(),
        BATTLE_BACKGROUND_PATH.to_string(),
    ];

    for map in [
        "town",
        "guchen_town",
        "professor_home",
        "player_home",
        "player_home_2f",
        "chenghua_forest",
        "chenghua_city",
        "route_101",
        "route_102",
        "route_103",
        "route_104",
    ] {
        paths.push(map_image_path(map));
    }

    for tool in CaptureTool::ALL {
        paths.push(tool.asset_path());
    }

    let mut creatures = vec![crate::Creature::starter()];
    creatures.extend(
        crate::WILD_SPECIES
            .iter()
            .map(|name| crate::Creature::new(*name, 1, 1, 0, 0)),
    );
    for creature in creatures {
        paths.push(creature.front_sprite_path());
        paths.push(creature.back_sprite_path());
    }

    paths
}

/// Draws the stand-in for an image that could not be loaded.
///
/// Capture tool icons get a drawn ball so the throw animation stays readable;
/// anything else becomes a framed box in [`placeholder_color`].
pub fn draw_placeholder(surface: &mut dyn Surface, path: &str, x: f32, y: f32, width: f32, height: f32) {
    if !path.contains("/balls/") {
        surface.fill_rect(x, y, width, height, placeholder_color(path));
        surface.stroke_rect(x, y, width, height, 1.0, Rgba::DARK_GRAY);
        return;
    }

    let radius = width.min(height) / 2.0;
    let (cx, cy) = (x + width / 2.0, y + height / 2.0);
    surface.fill_circle(cx, cy, radius, Rgba::WHITE);

    // Upper half in the tool's colour
    let segments = 12;
    let mut cap = Vec::with_capacity(segments + 1);
    for step in 0..=segments {
        let angle = std::f32::consts::PI * step as f32 / segments as f32;
        cap.push((cx - radius * angle.cos(), cy - radius * angle.sin()));
    }
    surface.fill_polygon(&cap, placeholder_color(path));

    surface.draw_line(cx - radius, cy, cx + radius, cy, 2.0, Rgba::BLACK);
    surface.fill_circle(cx, cy, radius / 4.0, Rgba::WHITE);
}

/// Deterministic stand-in colour for a missing image.
pub fn placeholder_color(path: &str) -> Rgba {
    // FNV-1a over the path bytes
    let mut hash: u32 = 0x811c_9dc5;
    for byte in path.bytes() {
        hash ^= byte as u32;
        hash = hash.wrapping_mul(0x0100_0193);
    }
    let [r, g, b, _] = hash.to_le_bytes();
    Rgba::rgb(r / 2 + 64, g / 2 + 64, b / 2 + 64)
}
