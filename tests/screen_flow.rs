//! Screen transitions driven through the manager, tick by tick.

mod common;

use common::{always, enter_battle, enter_overworld, grass_start, manager_with, never, run};
use emerald::{
    BattlePhase, InputSnapshot, RecordingSurface, ScreenKind, BATTLE_BACKGROUND_PATH,
    PLAYER_SPRITE_PATH,
};

#[test]
fn test_menu_to_overworld_and_back() {
    let mut manager = manager_with(never());
    enter_overworld(&mut manager);
    assert_eq!(manager.overworld().visits(), 1);

    manager.update(InputSnapshot::cancel());
    assert_eq!(manager.active(), ScreenKind::Overworld);
    assert_eq!(manager.pending(), Some(ScreenKind::Menu));

    manager.update(InputSnapshot::none());
    assert_eq!(manager.active(), ScreenKind::Menu);
    assert_eq!(manager.menu().visits(), 2);
    assert_eq!(manager.menu().selected(), 0);
}

#[test]
fn test_overworld_position_survives_menu_trip() {
    let mut manager = manager_with(never());
    enter_overworld(&mut manager);

    run(&mut manager, InputSnapshot::left(), 3);
    let position = manager.overworld().player().position();

    manager.update(InputSnapshot::cancel());
    manager.update(InputSnapshot::none());
    enter_overworld(&mut manager);

    assert_eq!(manager.overworld().player().position(), position);
    assert_eq!(manager.overworld().visits(), 2);
}

#[test]
fn test_render_shows_outgoing_screen_until_next_update() {
    let mut manager = manager_with(always());
    enter_overworld(&mut manager);

    let start = grass_start(manager.overworld().map());
    manager
        .overworld_mut()
        .player_mut()
        .set_position(start.0, start.1);
    manager.update(InputSnapshot::down());
    assert_eq!(manager.pending(), Some(ScreenKind::Battle));

    let mut surface = RecordingSurface::new();
    manager.render(&mut surface);
    assert!(surface.images().contains(&PLAYER_SPRITE_PATH));
    assert!(!surface.images().contains(&BATTLE_BACKGROUND_PATH));

    manager.update(InputSnapshot::none());
    surface.reset();
    manager.render(&mut surface);
    assert!(surface.images().contains(&BATTLE_BACKGROUND_PATH));
    assert!(surface.has_text("A wild Charmander appeared!"));
}

#[test]
fn test_failed_rolls_never_start_a_battle() {
    let mut manager = manager_with(never());
    enter_overworld(&mut manager);

    let start = grass_start(manager.overworld().map());
    manager
        .overworld_mut()
        .player_mut()
        .set_position(start.0, start.1);

    manager.update(InputSnapshot::down());
    assert_eq!(manager.pending(), None);
    assert_eq!(manager.overworld().encounter_rolls(), 1);
}

#[test]
fn test_battle_starts_with_lead_creature() {
    let mut manager = manager_with(always());
    enter_overworld(&mut manager);
    enter_battle(&mut manager);

    let battle = manager.battle();
    assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
    assert_eq!(battle.ally().name(), "Pikachu");
    assert_eq!(battle.enemy().name(), "Charmander");
    assert_eq!(battle.enemy().level(), 10);
    assert_eq!(battle.visits(), 1);
}

#[test]
fn test_quit_stops_the_session() {
    let mut manager = manager_with(never());
    manager.update(InputSnapshot::down());
    manager.update(InputSnapshot::confirm());

    assert!(manager.should_quit());
    assert_eq!(manager.active(), ScreenKind::Menu);
    assert_eq!(manager.pending(), None);
}
