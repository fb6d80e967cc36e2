//! Whole battles played through the manager, checking what the party keeps.

mod common;

use common::{always, enter_battle, enter_overworld, leave_battle, manager_with, run};
use emerald::{config, BattlePhase, BattleResult, CaptureTool, InputSnapshot};

#[test]
fn test_knockout_win_keeps_the_ally_as_it_was() {
    let mut manager = manager_with(always());
    enter_overworld(&mut manager);
    enter_battle(&mut manager);

    manager.battle_mut().enemy_mut().take_damage(79);
    manager.update(InputSnapshot::confirm());
    assert_eq!(manager.battle().phase(), BattlePhase::Win);
    assert_eq!(manager.battle().result(), Some(BattleResult::Won));
    assert_eq!(manager.battle().message(), "You defeated Charmander!");

    // Confirm is ignored while the outcome message is up
    run(&mut manager, InputSnapshot::confirm(), config::OUTCOME_MESSAGE_TICKS);
    assert_eq!(manager.pending(), None);

    leave_battle(&mut manager);
    let party = manager.overworld().player().party();
    assert_eq!(party.len(), 1);
    assert_eq!(party[0].level(), 25);
    assert_eq!(party[0].max_hp(), 100);
    assert_eq!(party[0].hp(), 100);
}

#[test]
fn test_capture_adds_creature_to_party() {
    let mut manager = manager_with(always());
    enter_overworld(&mut manager);
    enter_battle(&mut manager);

    manager.update(InputSnapshot::down());
    manager.update(InputSnapshot::confirm());
    assert_eq!(manager.battle().phase(), BattlePhase::Capture);
    assert!(manager.battle().is_animating());
    assert_eq!(manager.battle().animation().map(|ball| ball.tool), Some(CaptureTool::Poke));

    leave_battle(&mut manager);
    let party = manager.overworld().player().party();
    assert_eq!(party.len(), 2);
    assert_eq!(party[1].name(), "Charmander");
    assert_eq!(party[1].level(), 10);
}

#[test]
fn test_losing_restores_the_party() {
    let mut manager = manager_with(always());
    enter_overworld(&mut manager);
    if let Some(lead) = manager.overworld_mut().player_mut().lead_creature_mut() {
        lead.take_damage(99);
    }
    enter_battle(&mut manager);
    assert_eq!(manager.battle().ally().hp(), 1);

    // Fight once, then the enemy's answer knocks the ally out
    manager.update(InputSnapshot::confirm());
    assert_eq!(manager.battle().phase(), BattlePhase::EnemyTurn);
    run(&mut manager, InputSnapshot::none(), config::MESSAGE_TICKS + 1);
    assert_eq!(manager.battle().phase(), BattlePhase::Lose);
    assert!(manager.battle().ally().is_fainted());

    leave_battle(&mut manager);
    let lead = &manager.overworld().player().party()[0];
    assert_eq!(lead.hp(), lead.max_hp());
    assert_eq!(lead.level(), 25);
}

#[test]
fn test_fleeing_keeps_damage_taken() {
    let mut manager = manager_with(always());
    enter_overworld(&mut manager);
    if let Some(lead) = manager.overworld_mut().player_mut().lead_creature_mut() {
        lead.take_damage(30);
    }
    enter_battle(&mut manager);

    run(&mut manager, InputSnapshot::down(), 3);
    manager.update(InputSnapshot::confirm());
    assert_eq!(manager.battle().phase(), BattlePhase::End);
    assert_eq!(manager.battle().result(), Some(BattleResult::Fled));

    leave_battle(&mut manager);
    let party = manager.overworld().player().party();
    assert_eq!(party.len(), 1);
    assert_eq!(party[0].hp(), 70);
}

#[test]
fn test_second_battle_uses_first_standing_creature() {
    let mut manager = manager_with(always());
    enter_overworld(&mut manager);
    enter_battle(&mut manager);

    // Catch the first wild creature
    manager.update(InputSnapshot::down());
    manager.update(InputSnapshot::confirm());
    leave_battle(&mut manager);

    if let Some(lead) = manager.overworld_mut().player_mut().lead_creature_mut() {
        lead.take_damage(500);
    }
    enter_battle(&mut manager);
    assert_eq!(manager.battle().ally().name(), "Charmander");
    assert_eq!(manager.battle().visits(), 2);

    manager.battle_mut().enemy_mut().take_damage(79);
    manager.update(InputSnapshot::confirm());
    leave_battle(&mut manager);

    let party = manager.overworld().player().party();
    assert!(party[0].is_fainted());
    assert_eq!(party[1].level(), 10);
}
