//! # Creatures
//!
//! Stat records for the creatures that fight and get captured in battles.

use serde::{Deserialize, Serialize};

/// A creature with battle stats.
///
/// HP is kept inside `0..=max_hp` by every mutating method. A fainted creature
/// keeps existing with zero HP.
///
/// # Examples
///
/// ```
/// use emerald::Creature;
///
/// let mut pikachu = Creature::new("Pikachu", 25, 100, 10, 5);
/// pikachu.take_damage(130);
/// assert_eq!(pikachu.hp(), 0);
/// pikachu.heal(20);
/// assert_eq!(pikachu.hp(), 20);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    name: String,
    level: u32,
    hp: u32,
    max_hp: u32,
    attack: u32,
    defense: u32,
}

impl Creature {
    /// Creates a creature at full health.
    ///
    /// # Panics
    ///
    /// Panics if `level` or `max_hp` is zero.
    pub fn new(name: impl Into<String>, level: u32, max_hp: u32, attack: u32, defense: u32) -> Self {
        assert!(level >= 1, "creature level must be at least 1");
        assert!(max_hp > 0, "creature max HP must be positive");

        Self {
            name: name.into(),
            level,
            hp: max_hp,
            max_hp,
            attack,
            defense,
        }
    }

    /// The creature every new trainer starts with.
    pub fn starter() -> Self {
        Self::new("Pikachu", 25, 100, 10, 5)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn hp(&self) -> u32 {
        self.hp
    }

    pub fn max_hp(&self) -> u32 {
        self.max_hp
    }

    pub fn attack(&self) -> u32 {
        self.attack
    }

    pub fn defense(&self) -> u32 {
        self.defense
    }

    /// Whether the creature has run out of HP.
    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Fraction of HP remaining, in `0.0..=1.0`.
    pub fn hp_ratio(&self) -> f64 {
        self.hp as f64 / self.max_hp as f64
    }

    /// Removes `amount` HP, stopping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.hp = self.hp.saturating_sub(amount);
        self.check_invariants();
    }

    /// Restores `amount` HP, stopping at the maximum.
    pub fn heal(&mut self, amount: u32) {
        self.hp = self.hp.saturating_add(amount).min(self.max_hp);
        self.check_invariants();
    }

    /// Restores HP to the maximum.
    pub fn restore(&mut self) {
        self.hp = self.max_hp;
    }

    /// Raises the level by one, grows every stat, and fully heals.
    pub fn level_up(&mut self) {
        self.level += 1;
        self.max_hp += 5;
        self.attack += 2;
        self.defense += 1;
        self.hp = self.max_hp;
        self.check_invariants();
    }

    /// Lowercase identifier used to build sprite paths.
    pub fn slug(&self) -> String {
        self.name
            .chars()
            .filter(|c| c.is_alphanumeric() || *c == ' ')
            .collect::<String>()
            .trim()
            .to_lowercase()
            .replace(' ', "_")
    }

    /// Sprite shown when the creature faces the camera (the wild side).
    pub fn front_sprite_path(&self) -> String {
        format!("image/pokemon/{}_front.png", self.slug())
    }

    /// Sprite shown for the trainer's own creature.
    pub fn back_sprite_path(&self) -> String {
        format!("image/pokemon/{}_back.png", self.slug())
    }

    fn check_invariants(&self) {
        assert!(
            self.hp <= self.max_hp,
            "{} has {} HP but only {} max HP",
            self.name,
            self.hp,
            self.max_hp
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_starts_at_full_health() {
        let creature = Creature::new("Meowth", 12, 80, 8, 3);
        assert_eq!(creature.hp(), 80);
        assert_eq!(creature.max_hp(), 80);
        assert!(!creature.is_fainted());
    }

    #[test]
    fn test_take_damage_stops_at_zero() {
        let mut creature = Creature::new("Psyduck", 10, 80, 8, 3);
        creature.take_damage(30);
        assert_eq!(creature.hp(), 50);
        creature.take_damage(500);
        assert_eq!(creature.hp(), 0);
        assert!(creature.is_fainted());
    }

    #[test]
    fn test_heal_stops_at_max() {
        let mut creature = Creature::new("Squirtle", 10, 80, 8, 3);
        creature.take_damage(10);
        creature.heal(u32::MAX);
        assert_eq!(creature.hp(), 80);
    }

    #[test]
    fn test_level_up_grows_stats_and_heals() {
        let mut creature = Creature::starter();
        creature.take_damage(60);
        creature.level_up();

        assert_eq!(creature.level(), 26);
        assert_eq!(creature.max_hp(), 105);
        assert_eq!(creature.attack(), 12);
        assert_eq!(creature.defense(), 6);
        assert_eq!(creature.hp(), 105);
    }

    #[test]
    fn test_sprite_paths() {
        let creature = Creature::new("Mr. Mime", 5, 40, 4, 4);
        assert_eq!(creature.slug(), "mr_mime");
        assert_eq!(creature.front_sprite_path(), "image/pokemon/mr_mime_front.png");
        assert_eq!(Creature::starter().back_sprite_path(), "image/pokemon/pikachu_back.png");
    }

    #[test]
    #[should_panic(expected = "max HP must be positive")]
    fn test_zero_max_hp_is_rejected() {
        let _ = Creature::new("Ghost", 1, 0, 1, 1);
    }
}
