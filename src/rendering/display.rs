//! # Display Management
//!
//! Macroquad implementation of the drawing surface, with a texture cache and
//! placeholder drawing for images that failed to load.

use super::{asset_manifest, AssetProvider, Rgba, Surface};
use crate::{EmeraldError, EmeraldResult, Rect};
use log::{debug, warn};
use macroquad::prelude::{
    clear_background, draw_circle, draw_line, draw_rectangle, draw_rectangle_lines,
    draw_text, draw_texture_ex, draw_triangle, load_texture, screen_height, screen_width,
    vec2, Color, DrawTextureParams, FilterMode, Texture2D,
};
use std::collections::{HashMap, HashSet};

fn to_color(color: Rgba) -> Color {
    Color::from_rgba(color.r, color.g, color.b, color.a)
}

/// Macroquad display manager for the game.
///
/// Textures are loaded once through [`MacroquadDisplay::preload`] and looked
/// up by logical path afterwards. Missing images are drawn as placeholders in
/// a colour derived from the path, so a broken asset folder never stops a game.
pub struct MacroquadDisplay {
    /// Screen width in pixels
    pub screen_width: f32,
    /// Screen height in pixels
    pub screen_height: f32,
    /// Folder the logical image paths are resolved against
    pub asset_root: String,
    /// Loaded textures by logical path
    textures: HashMap<String, Texture2D>,
    /// Paths already reported as missing
    missing: HashSet<String>,
}

impl MacroquadDisplay {
    /// Creates a display and loads every image in the asset manifest.
    ///
    /// Must be awaited inside the macroquad main loop.
    pub async fn new(asset_root: &str) -> EmeraldResult<Self> {
        let mut display = Self {
            screen_width: screen_width(),
            screen_height: screen_height(),
            asset_root: asset_root.trim_end_matches('/').to_string(),
            textures: HashMap::new(),
            missing: HashSet::new(),
        };

        if display.screen_width <= 0.0 || display.screen_height <= 0.0 {
            return Err(EmeraldError::InvalidState(format!(
                "window has no drawable area ({}x{})",
                display.screen_width, display.screen_height
            )));
        }

        display.preload(&asset_manifest()).await;
        Ok(display)
    }

    /// Loads every path not already cached. Failures are remembered and
    /// rendered as placeholders.
    pub async fn preload(&mut self, paths: &[String]) {
        for path in paths {
            if self.textures.contains_key(path) || self.missing.contains(path) {
                continue;
            }

            let file = format!("{}/{}", self.asset_root, path);
            match load_texture(&file).await {
                Ok(texture) => {
                    texture.set_filter(FilterMode::Nearest);
                    self.textures.insert(path.clone(), texture);
                }
                Err(err) => {
                    warn!("Missing image {}: {}", file, err);
                    self.missing.insert(path.clone());
                }
            }
        }

        debug!(
            "Texture cache: {} loaded, {} placeholders",
            self.textures.len(),
            self.missing.len()
        );
    }

    /// Refreshes the cached screen size after a resize.
    pub fn refresh_size(&mut self) {
        self.screen_width = screen_width();
        self.screen_height = screen_height();
    }

    fn draw_placeholder(&mut self, path: &str, x: f32, y: f32, width: f32, height: f32) {
        if self.missing.insert(path.to_string()) {
            warn!("Image {} was never loaded, drawing placeholder", path);
        }

        super::draw_placeholder(self, path, x, y, width, height);
    }
}

impl Surface for MacroquadDisplay {
    fn clear(&mut self, color: Rgba) {
        clear_background(to_color(color));
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba) {
        draw_rectangle(x, y, width, height, to_color(color));
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, thickness: f32, color: Rgba) {
        draw_rectangle_lines(x, y, width, height, thickness, to_color(color));
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32, color: Rgba) {
        draw_text(text, x, y, size, to_color(color));
    }

    fn draw_line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32, color: Rgba) {
        draw_line(x1, y1, x2, y2, thickness, to_color(color));
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        draw_circle(x, y, radius, to_color(color));
    }

    fn fill_polygon(&mut self, points: &[(f32, f32)], color: Rgba) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };

        // Triangle fan from the first vertex
        let color = to_color(color);
        for pair in rest.windows(2) {
            draw_triangle(
                vec2(x0, y0),
                vec2(pair[0].0, pair[0].1),
                vec2(pair[1].0, pair[1].1),
                color,
            );
        }
    }

    fn draw_image(&mut self, path: &str, source: Option<Rect>, x: f32, y: f32, width: f32, height: f32) {
        let Some(texture) = self.textures.get(path).cloned() else {
            self.draw_placeholder(path, x, y, width, height);
            return;
        };

        let source = source.map(|region| {
            macroquad::math::Rect::new(
                region.x as f32,
                region.y as f32,
                region.width as f32,
                region.height as f32,
            )
        });

        draw_texture_ex(
            &texture,
            x,
            y,
            to_color(Rgba::WHITE),
            DrawTextureParams {
                dest_size: Some(vec2(width, height)),
                source,
                ..Default::default()
            },
        );
    }
}

impl AssetProvider for MacroquadDisplay {
    fn image_size(&self, path: &str) -> Option<(u32, u32)> {
        self.textures
            .get(path)
            .map(|texture| (texture.width() as u32, texture.height() as u32))
    }
}
