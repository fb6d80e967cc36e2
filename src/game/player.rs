//! # Player
//!
//! The trainer walking around the overworld, with walk animation bookkeeping
//! and the party of creatures they carry into battle.

use crate::{config, CollisionOutcome, Creature, Direction, Rect};
use serde::{Deserialize, Serialize};

/// Number of frames in one walk cycle.
pub const WALK_FRAMES: u32 = 3;

/// Frame shown while standing still.
pub const IDLE_FRAME: u32 = 1;

/// The player character.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    bounds: Rect,
    facing: Direction,
    moving: bool,
    frame: u32,
    frame_ticks: u32,
    speed: i32,
    party: Vec<Creature>,
}

impl Player {
    /// Creates a player at the given pixel position, carrying the starter.
    ///
    /// # Examples
    ///
    /// ```
    /// use emerald::{Direction, Player};
    ///
    /// let player = Player::new(64, 64);
    /// assert_eq!(player.position(), (64, 64));
    /// assert_eq!(player.facing(), Direction::Down);
    /// assert_eq!(player.party().len(), 1);
    /// ```
    pub fn new(x: i32, y: i32) -> Self {
        Self {
            bounds: Rect::new(x, y, config::PLAYER_WIDTH, config::PLAYER_HEIGHT),
            facing: Direction::Down,
            moving: false,
            frame: IDLE_FRAME,
            frame_ticks: 0,
            speed: config::PLAYER_SPEED,
            party: vec![Creature::starter()],
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.bounds.x, self.bounds.y)
    }

    /// Bounding box in pixel space.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    /// Whether an accepted move happened since the last animation update.
    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn frame(&self) -> u32 {
        self.frame
    }

    /// Moves the player to an exact position.
    pub fn set_position(&mut self, x: i32, y: i32) {
        self.bounds = self.bounds.at(x, y);
    }

    /// Turns towards `direction` and tries to walk one step.
    ///
    /// A step that would leave `0..map_width` x `0..map_height` is rejected:
    /// the position stays where it was and the moving flag is left alone.
    /// Returns whether the step was taken.
    pub fn step(&mut self, direction: Direction, map_width: i32, map_height: i32) -> bool {
        self.facing = direction;

        let (dx, dy) = direction.to_delta();
        let proposed = self
            .bounds
            .at(self.bounds.x + dx * self.speed, self.bounds.y + dy * self.speed);
        if !proposed.fits_within(map_width, map_height) {
            return false;
        }

        self.bounds = proposed;
        self.moving = true;
        true
    }

    /// Commits a collision correction from the map.
    pub fn apply_collision(&mut self, outcome: CollisionOutcome) {
        self.set_position(outcome.x, outcome.y);
        if outcome.collided {
            self.moving = false;
        }
    }

    /// Advances the walk animation and clears the moving flag.
    pub fn update(&mut self) {
        if self.moving {
            self.frame_ticks += 1;
            if self.frame_ticks >= config::ANIMATION_DELAY {
                self.frame = (self.frame + 1) % WALK_FRAMES;
                self.frame_ticks = 0;
            }
        } else {
            self.frame = IDLE_FRAME;
            self.frame_ticks = 0;
        }

        self.moving = false;
    }

    /// Drops any movement left over from a previous visit.
    pub fn halt(&mut self) {
        self.moving = false;
        self.frame = IDLE_FRAME;
        self.frame_ticks = 0;
    }

    /// Source rectangle of the current frame on the 3x4 walk sprite sheet.
    pub fn sprite_frame(&self) -> Rect {
        Rect::new(
            self.frame as i32 * config::PLAYER_WIDTH,
            self.facing.sprite_row() * config::PLAYER_HEIGHT,
            config::PLAYER_WIDTH,
            config::PLAYER_HEIGHT,
        )
    }

    pub fn party(&self) -> &[Creature] {
        &self.party
    }

    /// Index of the creature sent into battle: the first one still standing,
    /// or the first overall when everyone has fainted.
    pub fn lead_index(&self) -> Option<usize> {
        if self.party.is_empty() {
            return None;
        }
        Some(
            self.party
                .iter()
                .position(|creature| !creature.is_fainted())
                .unwrap_or(0),
        )
    }

    pub fn lead_creature(&self) -> Option<&Creature> {
        self.lead_index().map(|index| &self.party[index])
    }

    pub fn lead_creature_mut(&mut self) -> Option<&mut Creature> {
        self.lead_index().map(move |index| &mut self.party[index])
    }

    /// Replaces the creature at `index`, ignoring out-of-range indices.
    pub fn replace_creature(&mut self, index: usize, creature: Creature) {
        if let Some(slot) = self.party.get_mut(index) {
            *slot = creature;
        }
    }

    pub fn add_creature(&mut self, creature: Creature) {
        self.party.push(creature);
    }

    /// Heals every creature in the party to full.
    pub fn restore_party(&mut self) {
        for creature in &mut self.party {
            creature.restore();
        }
    }
}
