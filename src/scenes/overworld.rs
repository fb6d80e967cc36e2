//! # Overworld Screen
//!
//! Free movement around the town map. Walking through tall grass can start a
//! wild battle.

use super::{ScreenCommand, ScreenKind};
use crate::{config, Direction, InputSnapshot, Player, Rgba, Surface, TileMap, PLAYER_SPRITE_PATH};
use log::{info, warn};
use rand::Rng;

/// The walkable town screen.
///
/// The map and player live for the whole session; leaving for a battle or the
/// menu and coming back keeps the player where they were.
#[derive(Debug)]
pub struct OverworldScreen {
    map: TileMap,
    player: Player,
    encounter_rate: u32,
    debug_grid: bool,
    visits: u32,
    encounter_rolls: u64,
}

impl OverworldScreen {
    /// Places a fresh player on the nearest open spot to the default spawn.
    pub fn new(map: TileMap, encounter_rate: u32, debug_grid: bool) -> Self {
        let spawn = map
            .find_open_position(config::PLAYER_SPAWN, config::PLAYER_WIDTH, config::PLAYER_HEIGHT)
            .unwrap_or_else(|| {
                warn!("Map '{}' has no open spawn point", map.name());
                config::PLAYER_SPAWN
            });

        Self {
            map,
            player: Player::new(spawn.0, spawn.1),
            encounter_rate: encounter_rate.max(1),
            debug_grid,
            visits: 0,
            encounter_rolls: 0,
        }
    }

    /// Clears movement left over from the previous visit.
    pub fn init(&mut self) {
        self.player.halt();
        self.visits += 1;
    }

    pub fn update<R: Rng + ?Sized>(&mut self, input: InputSnapshot, rng: &mut R) -> ScreenCommand {
        for direction in Direction::all() {
            if input.is_held(direction) {
                self.player
                    .step(direction, self.map.pixel_width(), self.map.pixel_height());
            }
        }

        let outcome = self.map.resolve_collision(self.player.bounds());
        self.player.apply_collision(outcome);

        let moved = self.player.is_moving();
        let in_grass = self.map.is_in_zone(self.player.bounds());
        self.player.update();

        let mut command = ScreenCommand::Stay;
        if moved && in_grass {
            self.encounter_rolls += 1;
            if rng.gen_ratio(1, self.encounter_rate) {
                info!("Wild encounter at {:?}", self.player.position());
                command = ScreenCommand::Switch(ScreenKind::Battle);
            }
        }

        if input.cancel {
            command = ScreenCommand::Switch(ScreenKind::Menu);
        }

        command
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let width = self.map.pixel_width() as f32;
        let height = self.map.pixel_height() as f32;

        surface.clear(Rgba::BLACK);
        surface.draw_image(&self.map.image_path(), None, 0.0, 0.0, width, height);

        if self.debug_grid {
            self.render_debug_grid(surface);
        }

        let (x, y) = self.player.position();
        surface.draw_image(
            PLAYER_SPRITE_PATH,
            Some(self.player.sprite_frame()),
            x as f32,
            y as f32,
            config::PLAYER_WIDTH as f32,
            config::PLAYER_HEIGHT as f32,
        );

        surface.draw_text(self.map.display_name(), 20.0, 20.0, 20.0, Rgba::WHITE);
        surface.draw_text("Esc: back to menu", 630.0, 20.0, 16.0, Rgba::WHITE);
    }

    fn render_debug_grid(&self, surface: &mut dyn Surface) {
        let size = self.map.tile_size() as f32;
        for (row, cells) in self.map.grid().iter().enumerate() {
            for (column, tile) in cells.iter().enumerate() {
                let Some(label) = tile.debug_label() else {
                    continue;
                };
                let x = column as f32 * size;
                let y = row as f32 * size;
                surface.stroke_rect(x, y, size, size, 1.0, Rgba::rgba(255, 255, 255, 96));
                surface.draw_text(label, x + size / 3.0, y + size * 0.7, 14.0, Rgba::LIGHT_GRAY);
            }
        }
    }

    pub fn map(&self) -> &TileMap {
        &self.map
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn encounter_rate(&self) -> u32 {
        self.encounter_rate
    }

    /// Number of times the overworld has been entered.
    pub fn visits(&self) -> u32 {
        self.visits
    }

    /// Encounter rolls made so far.
    pub fn encounter_rolls(&self) -> u64 {
        self.encounter_rolls
    }

    pub fn set_debug_grid(&mut self, enabled: bool) {
        self.debug_grid = enabled;
    }
}
