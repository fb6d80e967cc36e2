//! # Screen Management System
//!
//! The top-level state machine that owns the menu, overworld and battle
//! screens and decides which one receives each tick.
//!
//! All three screens are created up front and live for the whole session.
//! A screen asks for a transition by returning a [`ScreenCommand`] from its
//! `update`; the manager stores the request and applies it at the start of
//! the next `update`, so the render of the current tick still shows the
//! screen that was active when the tick began.

pub mod battle;
pub mod menu;
pub mod overworld;

pub use battle::*;
pub use menu::*;
pub use overworld::*;

use crate::{
    Creature, EmeraldResult, GameConfig, Generator, InputSnapshot, Surface, TownGenerator,
};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The screens the game can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenKind {
    Menu,
    Overworld,
    Battle,
}

/// What a screen wants to happen after its update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenCommand {
    /// Keep the current screen
    Stay,
    /// Switch to another screen on the next tick
    Switch(ScreenKind),
    /// Leave the game
    Quit,
}

/// Owns every screen and the session random source.
pub struct ScreenManager<R: Rng = StdRng> {
    menu: MenuScreen,
    overworld: OverworldScreen,
    battle: BattleScreen,
    active: ScreenKind,
    pending: Option<ScreenKind>,
    quit_requested: bool,
    ally_slot: Option<usize>,
    ticks: u64,
    rng: R,
}

impl ScreenManager<StdRng> {
    /// Builds the game from a config, seeding from it or from entropy.
    pub fn from_config(config: &GameConfig) -> EmeraldResult<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(config, rng)
    }
}

impl<R: Rng> ScreenManager<R> {
    /// Builds every screen and enters the menu.
    pub fn new(config: &GameConfig, rng: R) -> EmeraldResult<Self> {
        config.validate()?;

        let map = TownGenerator::new().generate(&config.generation_config())?;
        let overworld = OverworldScreen::new(map, config.encounter_rate, config.debug_grid);

        let mut manager = Self {
            menu: MenuScreen::new(),
            overworld,
            battle: BattleScreen::new(),
            active: ScreenKind::Menu,
            pending: None,
            quit_requested: false,
            ally_slot: None,
            ticks: 0,
            rng,
        };
        manager.set_state(ScreenKind::Menu);
        Ok(manager)
    }

    /// Makes `kind` the active screen and runs its `init` right away.
    pub fn set_state(&mut self, kind: ScreenKind) {
        if self.active == ScreenKind::Battle && kind != ScreenKind::Battle {
            self.collect_battle_outcome();
        }

        info!("Screen {:?} -> {:?}", self.active, kind);
        self.active = kind;

        match kind {
            ScreenKind::Menu => self.menu.init(),
            ScreenKind::Overworld => self.overworld.init(),
            ScreenKind::Battle => {
                let player = self.overworld.player();
                self.ally_slot = player.lead_index();
                let ally = player
                    .lead_creature()
                    .cloned()
                    .unwrap_or_else(Creature::starter);
                self.battle.init(ally, &mut self.rng);
            }
        }
    }

    /// Runs one tick of game logic on the active screen.
    pub fn update(&mut self, input: InputSnapshot) {
        if let Some(next) = self.pending.take() {
            self.set_state(next);
        }
        self.ticks += 1;

        let command = match self.active {
            ScreenKind::Menu => self.menu.update(input),
            ScreenKind::Overworld => self.overworld.update(input, &mut self.rng),
            ScreenKind::Battle => self.battle.update(input, &mut self.rng),
        };

        match command {
            ScreenCommand::Stay => {}
            ScreenCommand::Switch(kind) => {
                debug!("Tick {}: {:?} requested {:?}", self.ticks, self.active, kind);
                self.pending = Some(kind);
            }
            ScreenCommand::Quit => {
                info!("Quit requested from {:?}", self.active);
                self.quit_requested = true;
            }
        }
    }

    /// Draws the active screen.
    pub fn render(&self, surface: &mut dyn Surface) {
        match self.active {
            ScreenKind::Menu => self.menu.render(surface),
            ScreenKind::Overworld => self.overworld.render(surface),
            ScreenKind::Battle => self.battle.render(surface),
        }
    }

    /// Hands the finished battle back to the player's party.
    fn collect_battle_outcome(&mut self) {
        let Some(outcome) = self.battle.take_outcome() else {
            return;
        };
        info!("Battle finished: {:?}", outcome.result);

        let player = self.overworld.player_mut();
        if let Some(slot) = self.ally_slot.take() {
            player.replace_creature(slot, outcome.ally);
        }
        if let Some(captured) = outcome.captured {
            info!("{} joined the party", captured.name());
            player.add_creature(captured);
        }
        if outcome.result == BattleResult::Lost {
            player.restore_party();
        }
    }

    pub fn active(&self) -> ScreenKind {
        self.active
    }

    /// Transition waiting for the next `update`.
    pub fn pending(&self) -> Option<ScreenKind> {
        self.pending
    }

    /// Whether a screen asked to leave the game.
    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    /// Ticks run since start-up.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn menu(&self) -> &MenuScreen {
        &self.menu
    }

    pub fn overworld(&self) -> &OverworldScreen {
        &self.overworld
    }

    pub fn overworld_mut(&mut self) -> &mut OverworldScreen {
        &mut self.overworld
    }

    pub fn battle(&self) -> &BattleScreen {
        &self.battle
    }

    pub fn battle_mut(&mut self) -> &mut BattleScreen {
        &mut self.battle
    }
}
