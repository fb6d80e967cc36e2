//! # Battle Screen
//!
//! Turn-based fight against a wild creature, driven by a small phase machine:
//!
//! ```text
//! Start -> PlayerTurn -> EnemyTurn -> PlayerTurn ...
//!              |  \-> Capture (ball animation) -> Win | EnemyTurn
//!              |-> Win | Lose | End
//! ```
//!
//! Every message arms a countdown. While it runs, `update` does nothing but
//! count down, which paces the fight at a readable speed. The capture
//! animation suspends the phase machine the same way; the only phase change
//! it makes is the capture decision on its fortieth step.

use super::{ScreenCommand, ScreenKind};
use crate::{
    capture_rate, capture_succeeds, config, damage, draw_health_bar, draw_message_box,
    draw_option_list, CaptureTool, Creature, InputSnapshot, Rgba, Surface,
    BATTLE_BACKGROUND_PATH,
};
use log::{debug, info};
use rand::Rng;

/// Species that can appear in tall grass.
pub const WILD_SPECIES: [&str; 5] = ["Charmander", "Squirtle", "Bulbasaur", "Psyduck", "Meowth"];

/// Lowest level of a wild creature.
pub const WILD_MIN_LEVEL: u32 = 10;

/// Number of distinct wild levels, starting at [`WILD_MIN_LEVEL`].
pub const WILD_LEVEL_SPAN: u32 = 10;

/// Step on which the thrown ball decides the capture.
pub const CAPTURE_DECISION_STEP: u32 = 40;

/// Step on which the ball animation ends.
pub const CAPTURE_END_STEP: u32 = 60;

const ARC_STEPS: u32 = 30;
const BALL_START: (i32, i32) = (200, 350);
const BALL_SIZE: f32 = 24.0;
const SPRITE_SIZE: f32 = 96.0;

/// Phases of a battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BattlePhase {
    Start,
    PlayerTurn,
    EnemyTurn,
    Capture,
    Win,
    Lose,
    End,
}

impl BattlePhase {
    /// Phases that only wait for confirmation before leaving the battle.
    pub fn is_terminal(self) -> bool {
        matches!(self, BattlePhase::Win | BattlePhase::Lose | BattlePhase::End)
    }
}

/// Entries of the player's battle menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleAction {
    Fight,
    Capture,
    Item,
    Flee,
}

impl BattleAction {
    pub const ALL: [BattleAction; 4] = [
        BattleAction::Fight,
        BattleAction::Capture,
        BattleAction::Item,
        BattleAction::Flee,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BattleAction::Fight => "Fight",
            BattleAction::Capture => "Capture",
            BattleAction::Item => "Item",
            BattleAction::Flee => "Flee",
        }
    }
}

/// How a battle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleResult {
    Won,
    Captured,
    Lost,
    Fled,
}

/// Everything the overworld needs to know once a battle is over.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleOutcome {
    pub result: BattleResult,
    /// The player's creature as it left the battle
    pub ally: Creature,
    /// The wild creature, when it was caught
    pub captured: Option<Creature>,
}

/// A ball in flight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallAnimation {
    pub step: u32,
    pub x: i32,
    pub y: i32,
    pub tool: CaptureTool,
}

impl BallAnimation {
    fn new(tool: CaptureTool) -> Self {
        Self {
            step: 0,
            x: BALL_START.0,
            y: BALL_START.1,
            tool,
        }
    }

    /// Moves one step along the throw arc.
    fn advance(&mut self) {
        self.step += 1;
        if self.step < ARC_STEPS {
            let angle = self.step as f64 * std::f64::consts::PI / ARC_STEPS as f64;
            self.x += 10;
            self.y = BALL_START.1 - (20.0 * angle.sin()) as i32;
        }
    }
}

/// The battle screen.
#[derive(Debug)]
pub struct BattleScreen {
    phase: BattlePhase,
    ally: Creature,
    enemy: Creature,
    message: String,
    message_timer: u32,
    selected: usize,
    tool: CaptureTool,
    animation: Option<BallAnimation>,
    result: Option<BattleResult>,
    captured: Option<Creature>,
    outcome: Option<BattleOutcome>,
    previous_input: InputSnapshot,
    visits: u32,
}

impl Default for BattleScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl BattleScreen {
    pub fn new() -> Self {
        Self {
            phase: BattlePhase::Start,
            ally: Creature::starter(),
            enemy: wild_creature(WILD_SPECIES[0], WILD_MIN_LEVEL),
            message: String::new(),
            message_timer: 0,
            selected: 0,
            tool: CaptureTool::default(),
            animation: None,
            result: None,
            captured: None,
            outcome: None,
            previous_input: InputSnapshot::default(),
            visits: 0,
        }
    }

    /// Starts a battle against a randomly rolled wild creature.
    pub fn init<R: Rng + ?Sized>(&mut self, ally: Creature, rng: &mut R) {
        let enemy = roll_wild_creature(rng);
        self.start_encounter(ally, enemy);
    }

    /// Starts a battle against a known opponent.
    pub fn start_encounter(&mut self, ally: Creature, enemy: Creature) {
        info!(
            "Battle: {} Lv.{} vs wild {} Lv.{}",
            ally.name(),
            ally.level(),
            enemy.name(),
            enemy.level()
        );

        self.phase = BattlePhase::Start;
        self.message = format!("A wild {} appeared!", enemy.name());
        self.message_timer = config::MESSAGE_TICKS;
        self.ally = ally;
        self.enemy = enemy;
        self.selected = 0;
        self.animation = None;
        self.result = None;
        self.captured = None;
        self.outcome = None;
        self.previous_input = InputSnapshot::default();
        self.visits += 1;
    }

    pub fn update<R: Rng + ?Sized>(&mut self, input: InputSnapshot, rng: &mut R) -> ScreenCommand {
        let pressed = input.rising_edges(&self.previous_input);
        self.previous_input = input;

        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 && self.phase == BattlePhase::Start {
                self.phase = BattlePhase::PlayerTurn;
                self.message = format!("What will {} do?", self.ally.name());
            }
            return ScreenCommand::Stay;
        }

        if self.animation.is_some() {
            self.advance_animation(rng);
            return ScreenCommand::Stay;
        }

        match self.phase {
            BattlePhase::Start => {
                self.phase = BattlePhase::PlayerTurn;
                ScreenCommand::Stay
            }
            BattlePhase::PlayerTurn => {
                self.player_turn(input, pressed, rng);
                ScreenCommand::Stay
            }
            BattlePhase::EnemyTurn => {
                self.enemy_turn(rng);
                ScreenCommand::Stay
            }
            BattlePhase::Capture => {
                panic!("capture phase reached with no ball in flight");
            }
            BattlePhase::Win | BattlePhase::Lose | BattlePhase::End => {
                if input.confirm {
                    self.finish();
                    ScreenCommand::Switch(ScreenKind::Overworld)
                } else {
                    ScreenCommand::Stay
                }
            }
        }
    }

    fn player_turn<R: Rng + ?Sized>(&mut self, input: InputSnapshot, pressed: InputSnapshot, rng: &mut R) {
        if input.up && self.selected > 0 {
            self.selected -= 1;
        }
        if input.down && self.selected < BattleAction::ALL.len() - 1 {
            self.selected += 1;
        }
        if pressed.space {
            self.tool = self.tool.next();
            debug!("Selected {}", self.tool);
        }

        if !input.confirm {
            return;
        }

        match self.selected_action() {
            BattleAction::Fight => {
                let dealt = damage(&self.ally, &self.enemy, rng);
                self.enemy.take_damage(dealt);

                if self.enemy.is_fainted() {
                    self.enter_terminal(
                        BattlePhase::Win,
                        BattleResult::Won,
                        format!("You defeated {}!", self.enemy.name()),
                    );
                } else {
                    self.phase = BattlePhase::EnemyTurn;
                    self.message = format!("{} attacks! It deals {} damage!", self.ally.name(), dealt);
                    self.message_timer = config::MESSAGE_TICKS;
                }
            }
            BattleAction::Capture => {
                self.phase = BattlePhase::Capture;
                self.animation = Some(BallAnimation::new(self.tool));
                self.message = format!("You threw a {}!", self.tool);
            }
            BattleAction::Item => {
                self.ally.heal(config::POTION_HEAL);
                self.phase = BattlePhase::EnemyTurn;
                self.message = format!("You used a Potion! {} recovered some HP!", self.ally.name());
                self.message_timer = config::MESSAGE_TICKS;
            }
            BattleAction::Flee => {
                self.phase = BattlePhase::End;
                self.result = Some(BattleResult::Fled);
                self.message = "Got away safely!".to_string();
                self.message_timer = config::MESSAGE_TICKS;
            }
        }
    }

    fn enemy_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let dealt = damage(&self.enemy, &self.ally, rng);
        self.ally.take_damage(dealt);

        if self.ally.is_fainted() {
            self.enter_terminal(
                BattlePhase::Lose,
                BattleResult::Lost,
                format!("{} fainted!", self.ally.name()),
            );
        } else {
            self.phase = BattlePhase::PlayerTurn;
            self.message = format!("{} attacks! It deals {} damage!", self.enemy.name(), dealt);
            self.message_timer = config::MESSAGE_TICKS;
        }
    }

    fn advance_animation<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let Some(mut ball) = self.animation else {
            return;
        };
        ball.advance();

        if ball.step == CAPTURE_DECISION_STEP {
            let rate = capture_rate(&self.enemy, ball.tool);
            if capture_succeeds(rate, rng) {
                self.phase = BattlePhase::Win;
                self.result = Some(BattleResult::Captured);
                self.captured = Some(self.enemy.clone());
                self.message = format!("Gotcha! {} was caught!", self.enemy.name());
            } else {
                self.phase = BattlePhase::EnemyTurn;
                self.message = format!("{} broke free!", self.enemy.name());
            }
            debug!("Capture with {} at rate {:.3}: {:?}", ball.tool, rate, self.phase);
        }

        if ball.step >= CAPTURE_END_STEP {
            self.animation = None;
            self.message_timer = config::MESSAGE_TICKS;
        } else {
            self.animation = Some(ball);
        }
    }

    fn enter_terminal(&mut self, phase: BattlePhase, result: BattleResult, message: String) {
        self.phase = phase;
        self.result = Some(result);
        self.message = message;
        self.message_timer = config::OUTCOME_MESSAGE_TICKS;
    }

    fn finish(&mut self) {
        let result = self
            .result
            .unwrap_or_else(|| panic!("battle left {:?} without a result", self.phase));

        self.outcome = Some(BattleOutcome {
            result,
            ally: self.ally.clone(),
            captured: self.captured.take(),
        });
    }

    /// Removes the outcome of the battle that just ended, if any.
    pub fn take_outcome(&mut self) -> Option<BattleOutcome> {
        self.outcome.take()
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        surface.clear(Rgba::rgb(200, 255, 200));
        surface.draw_image(BATTLE_BACKGROUND_PATH, None, 0.0, 0.0, 800.0, 600.0);

        surface.draw_image(&self.enemy.front_sprite_path(), None, 600.0, 150.0, SPRITE_SIZE, SPRITE_SIZE);
        surface.draw_image(&self.ally.back_sprite_path(), None, 200.0, 300.0, SPRITE_SIZE, SPRITE_SIZE);

        draw_health_bar(surface, &self.enemy, 580.0, 150.0);
        draw_health_bar(surface, &self.ally, 180.0, 300.0);

        draw_message_box(surface, &self.message, 0.0, 450.0, 800.0, 150.0);

        if self.awaiting_choice() {
            let labels: Vec<&str> = BattleAction::ALL.iter().map(|action| action.label()).collect();
            draw_option_list(surface, &labels, self.selected, (500.0, 480.0), 30.0, 18.0, Rgba::BLACK);
            surface.draw_text(
                &format!("Ball: {} (Space to switch)", self.tool),
                20.0,
                530.0,
                16.0,
                Rgba::DARK_GRAY,
            );
        }

        if let Some(ball) = &self.animation {
            surface.draw_image(
                &ball.tool.asset_path(),
                None,
                ball.x as f32,
                ball.y as f32,
                BALL_SIZE,
                BALL_SIZE,
            );
        }
    }

    /// Whether the action menu is open.
    pub fn awaiting_choice(&self) -> bool {
        self.phase == BattlePhase::PlayerTurn && self.message_timer == 0 && self.animation.is_none()
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    pub fn ally(&self) -> &Creature {
        &self.ally
    }

    pub fn enemy(&self) -> &Creature {
        &self.enemy
    }

    pub fn enemy_mut(&mut self) -> &mut Creature {
        &mut self.enemy
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn message_timer(&self) -> u32 {
        self.message_timer
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_action(&self) -> BattleAction {
        BattleAction::ALL[self.selected]
    }

    pub fn tool(&self) -> CaptureTool {
        self.tool
    }

    pub fn set_tool(&mut self, tool: CaptureTool) {
        self.tool = tool;
    }

    pub fn animation(&self) -> Option<&BallAnimation> {
        self.animation.as_ref()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn result(&self) -> Option<BattleResult> {
        self.result
    }

    /// Number of battles started on this screen.
    pub fn visits(&self) -> u32 {
        self.visits
    }
}

fn wild_creature(name: &str, level: u32) -> Creature {
    Creature::new(name, level, 80, 8, 3)
}

/// Uniform index below `len` from a float draw.
fn roll_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    ((rng.gen::<f64>() * len as f64) as usize).min(len - 1)
}

/// Rolls the species and level of a wild creature.
pub fn roll_wild_creature<R: Rng + ?Sized>(rng: &mut R) -> Creature {
    let species = WILD_SPECIES[roll_index(rng, WILD_SPECIES.len())];
    let level = WILD_MIN_LEVEL + roll_index(rng, WILD_LEVEL_SPAN as usize) as u32;
    wild_creature(species, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingSurface;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    /// A battle already past its intro message.
    fn battle_in_player_turn(enemy: Creature) -> BattleScreen {
        let mut battle = BattleScreen::new();
        battle.start_encounter(Creature::starter(), enemy);
        for _ in 0..config::MESSAGE_TICKS {
            battle.update(InputSnapshot::none(), &mut always());
        }
        battle
    }

    #[test]
    fn test_intro_message_then_player_turn() {
        let mut battle = BattleScreen::new();
        battle.start_encounter(Creature::starter(), wild_creature("Meowth", 12));
        assert_eq!(battle.phase(), BattlePhase::Start);
        assert!(battle.message().contains("Meowth"));

        for _ in 0..config::MESSAGE_TICKS - 1 {
            battle.update(InputSnapshot::none(), &mut always());
        }
        assert_eq!(battle.phase(), BattlePhase::Start);

        battle.update(InputSnapshot::none(), &mut always());
        assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
        assert!(battle.awaiting_choice());
    }

    #[test]
    fn test_input_ignored_while_message_shows() {
        let mut battle = BattleScreen::new();
        battle.start_encounter(Creature::starter(), wild_creature("Meowth", 12));
        battle.update(InputSnapshot::confirm(), &mut always());
        assert_eq!(battle.phase(), BattlePhase::Start);
        assert_eq!(battle.enemy().hp(), 80);
    }

    #[test]
    fn test_fight_ko_wins_on_same_tick() {
        let mut battle = battle_in_player_turn(wild_creature("Psyduck", 10));
        battle.enemy_mut().take_damage(79);
        let before = battle.ally().clone();

        battle.update(InputSnapshot::confirm(), &mut always());
        assert_eq!(battle.phase(), BattlePhase::Win);
        assert_eq!(battle.result(), Some(BattleResult::Won));
        assert_eq!(battle.message_timer(), config::OUTCOME_MESSAGE_TICKS);
        assert_eq!(battle.message(), "You defeated Psyduck!");
        // Winning leaves the ally untouched
        assert_eq!(battle.ally().level(), before.level());
        assert_eq!(battle.ally().hp(), before.hp());
        assert_eq!(battle.ally().attack(), before.attack());
    }

    #[test]
    fn test_fight_then_enemy_turn() {
        let mut battle = battle_in_player_turn(wild_creature("Psyduck", 10));

        // Lowest variance: round((25 - 3) * 0.8) = 18
        battle.update(InputSnapshot::confirm(), &mut always());
        assert_eq!(battle.phase(), BattlePhase::EnemyTurn);
        assert_eq!(battle.enemy().hp(), 62);

        for _ in 0..config::MESSAGE_TICKS {
            battle.update(InputSnapshot::none(), &mut always());
        }
        assert_eq!(battle.ally().hp(), 100);

        // Enemy: (8 * 10) / 10 - 5 = 3, scaled by 0.8 rounds to 2
        battle.update(InputSnapshot::none(), &mut always());
        assert_eq!(battle.ally().hp(), 98);
        assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut battle = battle_in_player_turn(wild_creature("Psyduck", 10));
        battle.update(InputSnapshot::up(), &mut always());
        assert_eq!(battle.selected(), 0);

        for _ in 0..10 {
            battle.update(InputSnapshot::down(), &mut always());
        }
        assert_eq!(battle.selected_action(), BattleAction::Flee);
    }

    #[test]
    fn test_item_heals_and_passes_turn() {
        let mut battle = battle_in_player_turn(wild_creature("Psyduck", 10));
        battle.ally.take_damage(50);
        battle.selected = 2;

        battle.update(InputSnapshot::confirm(), &mut always());
        assert_eq!(battle.ally().hp(), 70);
        assert_eq!(battle.phase(), BattlePhase::EnemyTurn);
    }

    #[test]
    fn test_flee_ends_and_confirm_returns() {
        let mut battle = battle_in_player_turn(wild_creature("Psyduck", 10));
        battle.selected = 3;

        battle.update(InputSnapshot::confirm(), &mut always());
        assert_eq!(battle.phase(), BattlePhase::End);

        for _ in 0..config::MESSAGE_TICKS {
            assert_eq!(
                battle.update(InputSnapshot::confirm(), &mut always()),
                ScreenCommand::Stay
            );
        }
        assert_eq!(
            battle.update(InputSnapshot::confirm(), &mut always()),
            ScreenCommand::Switch(ScreenKind::Overworld)
        );

        let outcome = battle.take_outcome().unwrap();
        assert_eq!(outcome.result, BattleResult::Fled);
        assert!(outcome.captured.is_none());
        assert!(battle.take_outcome().is_none());
    }

    #[test]
    fn test_capture_animation_and_success() {
        let mut battle = battle_in_player_turn(wild_creature("Bulbasaur", 12));
        battle.selected = 1;

        battle.update(InputSnapshot::confirm(), &mut always());
        assert_eq!(battle.phase(), BattlePhase::Capture);
        assert!(battle.is_animating());

        for step in 1..CAPTURE_DECISION_STEP {
            battle.update(InputSnapshot::confirm(), &mut always());
            assert_eq!(battle.phase(), BattlePhase::Capture, "step {}", step);
        }
        let ball = *battle.animation().unwrap();
        assert_eq!(ball.x, 200 + 29 * 10);

        battle.update(InputSnapshot::none(), &mut always());
        assert_eq!(battle.phase(), BattlePhase::Win);
        assert_eq!(battle.result(), Some(BattleResult::Captured));
        assert!(battle.is_animating());

        for _ in CAPTURE_DECISION_STEP + 1..=CAPTURE_END_STEP {
            battle.update(InputSnapshot::none(), &mut always());
        }
        assert!(!battle.is_animating());
        assert_eq!(battle.message_timer(), config::MESSAGE_TICKS);
    }

    #[test]
    fn test_failed_capture_gives_enemy_a_turn() {
        let mut battle = battle_in_player_turn(wild_creature("Bulbasaur", 12));
        battle.selected = 1;

        battle.update(InputSnapshot::confirm(), &mut never());
        for _ in 0..CAPTURE_END_STEP {
            battle.update(InputSnapshot::none(), &mut never());
        }
        assert_eq!(battle.phase(), BattlePhase::EnemyTurn);
        assert!(!battle.is_animating());
        assert!(battle.message().contains("broke free"));
    }

    #[test]
    fn test_ball_arc_shape() {
        let mut ball = BallAnimation::new(CaptureTool::Poke);
        ball.advance();
        assert_eq!((ball.x, ball.y), (210, 348));

        for _ in 1..15 {
            ball.advance();
        }
        assert_eq!((ball.x, ball.y), (350, 330));
    }

    #[test]
    fn test_space_cycles_tool_on_press_only() {
        let mut battle = battle_in_player_turn(wild_creature("Meowth", 10));
        battle.update(InputSnapshot::space(), &mut always());
        battle.update(InputSnapshot::space(), &mut always());
        assert_eq!(battle.tool(), CaptureTool::Great);

        battle.update(InputSnapshot::none(), &mut always());
        battle.update(InputSnapshot::space(), &mut always());
        assert_eq!(battle.tool(), CaptureTool::Ultra);
    }

    #[test]
    fn test_wild_rolls_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let creature = roll_wild_creature(&mut rng);
            assert!(WILD_SPECIES.contains(&creature.name()));
            assert!((10..=19).contains(&creature.level()));
            assert_eq!(creature.max_hp(), 80);
        }

        assert_eq!(roll_wild_creature(&mut never()).level(), 19);
        assert_eq!(roll_wild_creature(&mut always()).name(), "Charmander");
    }

    #[test]
    fn test_render_shows_menu_only_on_player_turn() {
        let mut battle = BattleScreen::new();
        battle.start_encounter(Creature::starter(), wild_creature("Meowth", 12));

        let mut surface = RecordingSurface::new();
        battle.render(&mut surface);
        assert!(surface.has_text("A wild Meowth appeared!"));
        assert!(!surface.has_text("Fight"));
        assert!(surface.has_text("Pikachu Lv.25"));

        for _ in 0..config::MESSAGE_TICKS {
            battle.update(InputSnapshot::none(), &mut always());
        }
        surface.reset();
        battle.render(&mut surface);
        assert_eq!(surface.text_color("Fight"), Some(Rgba::RED));
        assert!(surface.images().contains(&"image/pokemon/meowth_front.png"));
    }
}
