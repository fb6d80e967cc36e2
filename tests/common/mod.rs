//! Helpers shared by the screen flow tests.

#![allow(dead_code)]

use emerald::{config, GameConfig, InputSnapshot, Rect, ScreenKind, ScreenManager, TileMap};
use rand::rngs::mock::StepRng;

/// Random source whose every roll succeeds and picks the lowest option.
pub fn always() -> StepRng {
    StepRng::new(0, 0)
}

/// Random source whose every roll fails and picks the highest option.
pub fn never() -> StepRng {
    StepRng::new(u64::MAX, 0)
}

pub fn manager_with(rng: StepRng) -> ScreenManager<StepRng> {
    ScreenManager::new(&GameConfig::default(), rng).expect("default config is valid")
}

/// Runs `ticks` updates with the same input.
pub fn run(manager: &mut ScreenManager<StepRng>, input: InputSnapshot, ticks: u32) {
    for _ in 0..ticks {
        manager.update(input);
    }
}

/// A spot where one step down keeps the player in grass and clear of
/// obstacles.
pub fn grass_start(map: &TileMap) -> (i32, i32) {
    for grass in map.grass_zones() {
        let (x, y) = (grass.x, grass.y - config::PLAYER_SPEED);
        let after_step = Rect::new(
            x,
            y + config::PLAYER_SPEED,
            config::PLAYER_WIDTH,
            config::PLAYER_HEIGHT,
        );
        if after_step.fits_within(map.pixel_width(), map.pixel_height())
            && !map.is_blocked(after_step)
            && map.is_in_zone(after_step)
        {
            return (x, y);
        }
    }
    panic!("map '{}' has no walkable grass", map.name());
}

/// Menu -> overworld, leaving the manager on the overworld with nothing pending.
pub fn enter_overworld(manager: &mut ScreenManager<StepRng>) {
    manager.update(InputSnapshot::confirm());
    manager.update(InputSnapshot::none());
    assert_eq!(manager.active(), ScreenKind::Overworld);
}

/// Walks into grass until a battle starts, then waits out the intro.
///
/// Expects a random source whose encounter rolls succeed.
pub fn enter_battle(manager: &mut ScreenManager<StepRng>) {
    let start = grass_start(manager.overworld().map());
    manager
        .overworld_mut()
        .player_mut()
        .set_position(start.0, start.1);

    manager.update(InputSnapshot::down());
    assert_eq!(manager.pending(), Some(ScreenKind::Battle));

    // The first battle tick already counts down the intro message
    run(manager, InputSnapshot::none(), config::MESSAGE_TICKS);
    assert_eq!(manager.active(), ScreenKind::Battle);
    assert!(manager.battle().awaiting_choice());
}

/// Waits out any message, confirms, and returns to the overworld.
pub fn leave_battle(manager: &mut ScreenManager<StepRng>) {
    run(manager, InputSnapshot::none(), 200);
    manager.update(InputSnapshot::confirm());
    assert_eq!(manager.pending(), Some(ScreenKind::Overworld));
    manager.update(InputSnapshot::none());
    assert_eq!(manager.active(), ScreenKind::Overworld);
}
