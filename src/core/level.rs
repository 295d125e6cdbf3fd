//! Verbosity level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How much detail a line carries, from least to most verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Level {
    Little,
    Normal,
    Much,
    VeryMuch,
    Insane,
}

impl Level {
    /// Every level, lowest verbosity first.
    pub const ALL: [Level; 5] = [
        Level::Little,
        Level::Normal,
        Level::Much,
        Level::VeryMuch,
        Level::Insane,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Level::Little => "LITTLE",
            Level::Normal => "NORMAL",
            Level::Much => "MUCH",
            Level::VeryMuch => "VERY_MUCH",
            Level::Insane => "INSANE",
        }
    }

    /// This level together with every level below it.
    ///
    /// The bands are spelled out per variant instead of being derived from
    /// declaration order, so reordering the enum cannot silently change them.
    pub fn lower_and_current(&self) -> LevelSet {
        match self {
            Level::Little => LITTLE_BAND,
            Level::Normal => NORMAL_BAND,
            Level::Much => MUCH_BAND,
            Level::VeryMuch => VERY_MUCH_BAND,
            Level::Insane => INSANE_BAND,
        }
    }

    /// Length of the longest display name, handy for aligned level columns.
    pub fn longest_name_len() -> usize {
        Self::ALL
            .iter()
            .map(|level| level.to_str().len())
            .max()
            .unwrap_or(0)
    }

    const fn bit(self) -> u8 {
        match self {
            Level::Little => 1 << 0,
            Level::Normal => 1 << 1,
            Level::Much => 1 << 2,
            Level::VeryMuch => 1 << 3,
            Level::Insane => 1 << 4,
        }
    }
}

const LITTLE_BAND: LevelSet = LevelSet::of(&[Level::Little]);
const NORMAL_BAND: LevelSet = LevelSet::of(&[Level::Little, Level::Normal]);
const MUCH_BAND: LevelSet = LevelSet::of(&[Level::Little, Level::Normal, Level::Much]);
const VERY_MUCH_BAND: LevelSet = LevelSet::of(&[
    Level::Little,
    Level::Normal,
    Level::Much,
    Level::VeryMuch,
]);
const INSANE_BAND: LevelSet = LevelSet::all();

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `pad` keeps width and alignment flags working for `{:>9}` and friends
        f.pad(self.to_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('-', "_").as_str() {
            "LITTLE" => Ok(Level::Little),
            "NORMAL" => Ok(Level::Normal),
            "MUCH" => Ok(Level::Much),
            "VERY_MUCH" | "VERYMUCH" => Ok(Level::VeryMuch),
            "INSANE" => Ok(Level::Insane),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

/// A set of [`Level`]s, stored as one bit per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LevelSet {
    bits: u8,
}

impl LevelSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    pub const fn all() -> Self {
        Self::of(&Level::ALL)
    }

    pub const fn of(levels: &[Level]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < levels.len() {
            bits |= levels[i].bit();
            i += 1;
        }
        Self { bits }
    }

    #[inline]
    pub fn contains(&self, level: Level) -> bool {
        self.bits & level.bit() != 0
    }

    pub fn insert(&mut self, level: Level) {
        self.bits |= level.bit();
    }

    pub fn remove(&mut self, level: Level) {
        self.bits &= !level.bit();
    }

    #[must_use]
    pub fn union(self, other: LevelSet) -> LevelSet {
        LevelSet {
            bits: self.bits | other.bits,
        }
    }

    #[must_use]
    pub fn difference(self, other: LevelSet) -> LevelSet {
        LevelSet {
            bits: self.bits & !other.bits,
        }
    }

    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Members in ascending verbosity.
    pub fn iter(&self) -> impl Iterator<Item = Level> + '_ {
        Level::ALL.into_iter().filter(|level| self.contains(*level))
    }
}

impl FromIterator<Level> for LevelSet {
    fn from_iter<I: IntoIterator<Item = Level>>(iter: I) -> Self {
        let mut set = LevelSet::empty();
        for level in iter {
            set.insert(level);
        }
        set
    }
}

impl fmt::Display for LevelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|level| level.to_str()).collect();
        write!(f, "[{}]", names.join(", "))
    }
}
