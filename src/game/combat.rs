//! # Battle Resolver
//!
//! Stateless damage and capture formulas. Randomness is always passed in, so
//! callers decide whether rolls come from the session generator or from a
//! fixed source in tests.

use crate::Creature;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lower bound of the damage variance multiplier.
pub const DAMAGE_VARIANCE_MIN: f64 = 0.8;

/// Width of the damage variance range; the upper bound is `MIN + SPREAD`.
pub const DAMAGE_VARIANCE_SPREAD: f64 = 0.4;

/// Smallest capture chance any regular tool can produce.
pub const MIN_CAPTURE_RATE: f64 = 0.1;

/// Largest capture chance any regular tool can produce.
pub const MAX_CAPTURE_RATE: f64 = 0.9;

/// Rolls damage dealt by `attacker` to `defender`.
///
/// The variance multiplier is drawn uniformly from `[0.8, 1.2)` on every
/// call. The result is at least 1.
pub fn damage<R: Rng + ?Sized>(attacker: &Creature, defender: &Creature, rng: &mut R) -> u32 {
    let variance = DAMAGE_VARIANCE_MIN + rng.gen::<f64>() * DAMAGE_VARIANCE_SPREAD;
    damage_with_variance(attacker, defender, variance)
}

/// Damage for a fixed variance multiplier.
///
/// # Examples
///
/// ```
/// use emerald::{damage_with_variance, Creature};
///
/// let attacker = Creature::new("Pikachu", 25, 100, 10, 5);
/// let defender = Creature::new("Meowth", 12, 80, 8, 5);
/// assert_eq!(damage_with_variance(&attacker, &defender, 1.0), 20);
/// ```
pub fn damage_with_variance(attacker: &Creature, defender: &Creature, variance: f64) -> u32 {
    let base = (attacker.attack() as i64 * attacker.level() as i64) / 10 - defender.defense() as i64;
    let scaled = (base as f64 * variance).round();

    if scaled < 1.0 {
        1
    } else {
        scaled.min(u32::MAX as f64) as u32
    }
}

/// Chance in `0.0..=1.0` that throwing `tool` at `creature` captures it.
///
/// Regular tools are clamped into `[0.1, 0.9]`; the master tool always
/// returns exactly `1.0`.
pub fn capture_rate(creature: &Creature, tool: CaptureTool) -> f64 {
    if tool == CaptureTool::Master {
        return 1.0;
    }

    let level = creature.level() as f64;
    let base = (1.0 - creature.hp_ratio()) * (1.0 - level / 100.0) * 0.75;
    let multiplier = match tool {
        CaptureTool::Great | CaptureTool::Net => 1.5,
        CaptureTool::Ultra => 2.0,
        CaptureTool::Nest if creature.level() <= 30 => 2.5 - level / 15.0,
        _ => 1.0,
    };

    (base * multiplier).clamp(MIN_CAPTURE_RATE, MAX_CAPTURE_RATE)
}

/// Draws against a capture chance.
pub fn capture_succeeds<R: Rng + ?Sized>(rate: f64, rng: &mut R) -> bool {
    rng.gen::<f64>() < rate
}

/// Kinds of capture tools (balls) a trainer can throw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CaptureTool {
    #[default]
    Poke,
    Great,
    Ultra,
    Master,
    Safari,
    Net,
    Dive,
    Nest,
    Repeat,
    Timer,
    Luxury,
    Premier,
}

impl CaptureTool {
    /// Every tool, in the order the battle menu cycles through them.
    pub const ALL: [CaptureTool; 12] = [
        CaptureTool::Poke,
        CaptureTool::Great,
        CaptureTool::Ultra,
        CaptureTool::Master,
        CaptureTool::Safari,
        CaptureTool::Net,
        CaptureTool::Dive,
        CaptureTool::Nest,
        CaptureTool::Repeat,
        CaptureTool::Timer,
        CaptureTool::Luxury,
        CaptureTool::Premier,
    ];

    /// Short identifier, e.g. `"great"`.
    pub fn id(self) -> &'static str {
        match self {
            CaptureTool::Poke => "poke",
            CaptureTool::Great => "great",
            CaptureTool::Ultra => "ultra",
            CaptureTool::Master => "master",
            CaptureTool::Safari => "safari",
            CaptureTool::Net => "net",
            CaptureTool::Dive => "dive",
            CaptureTool::Nest => "nest",
            CaptureTool::Repeat => "repeat",
            CaptureTool::Timer => "timer",
            CaptureTool::Luxury => "luxury",
            CaptureTool::Premier => "premier",
        }
    }

    /// Parses `"great"` or `"great_ball"` style identifiers, ignoring case.
    ///
    /// # Examples
    ///
    /// ```
    /// use emerald::CaptureTool;
    ///
    /// assert_eq!(CaptureTool::parse("master"), Some(CaptureTool::Master));
    /// assert_eq!(CaptureTool::parse("Ultra_Ball"), Some(CaptureTool::Ultra));
    /// assert_eq!(CaptureTool::parse("rock"), None);
    /// ```
    pub fn parse(identifier: &str) -> Option<CaptureTool> {
        let lowered = identifier.trim().to_lowercase();
        let id = lowered.strip_suffix("_ball").unwrap_or(&lowered);
        Self::ALL.iter().copied().find(|tool| tool.id() == id)
    }

    /// Logical path of the tool's sprite.
    pub fn asset_path(self) -> String {
        format!("image/item/balls/{}_ball.png", self.id())
    }

    /// Tool following this one in the menu cycle.
    pub fn next(self) -> CaptureTool {
        let index = Self::ALL.iter().position(|tool| *tool == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl From<&str> for CaptureTool {
    /// Unknown identifiers behave like the standard tool.
    fn from(identifier: &str) -> Self {
        CaptureTool::parse(identifier).unwrap_or(CaptureTool::Poke)
    }
}

impl fmt::Display for CaptureTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self.id();
        let mut chars = id.chars();
        if let Some(first) = chars.next() {
            write!(f, "{}{} Ball", first.to_ascii_uppercase(), chars.as_str())?;
        }
        Ok(())
    }
}
