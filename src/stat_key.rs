//! Stat key module.
//!
//! Provides the `StatKey` type, a closed enumeration of the nine
//! allocatable base stats. All internal lookups use the enum directly;
//! string parsing happens only at the system boundary (config maps,
//! external callers) via `FromStr`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One of the nine allocatable base stats.
///
/// Every derived formula in the engine reads from these keys. The set is
/// closed: unrecognized external names are rejected at parse time instead
/// of falling through a default arm deep inside a formula.
///
/// # Examples
///
/// ```rust
/// use aurastat::StatKey;
///
/// let tec: StatKey = "TEC".parse().unwrap();
/// assert_eq!(tec, StatKey::Technique);
/// assert_eq!(tec.as_str(), "TEC");
///
/// // Unknown names fail at the boundary
/// assert!("LUCK".parse::<StatKey>().is_err());
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatKey {
    /// Base hit points (feeds max health).
    #[serde(rename = "HP")]
    HitPoints,
    /// Base ki reserve (feeds max ki).
    #[serde(rename = "KI")]
    Ki,
    /// Base stamina reserve (feeds max stamina).
    #[serde(rename = "STA")]
    Stamina,
    /// Strength: physical power, crit damage, knockback.
    #[serde(rename = "STR")]
    Strength,
    /// Vitality: max health, physical/status resistance.
    #[serde(rename = "VIT")]
    Vitality,
    /// Technique: accuracy, crit chance, energy crit damage.
    #[serde(rename = "TEC")]
    Technique,
    /// Wisdom: max ki, status resistance.
    #[serde(rename = "WIS")]
    Wisdom,
    /// Aura: max ki, evasion, energy resistance.
    #[serde(rename = "AURA")]
    Aura,
    /// Agility: evasion, movement, turn order, pursuit.
    #[serde(rename = "AGI")]
    Agility,
}

impl StatKey {
    /// All nine stat keys, in canonical order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use aurastat::StatKey;
    ///
    /// assert_eq!(StatKey::ALL.len(), 9);
    /// assert_eq!(StatKey::ALL[0], StatKey::HitPoints);
    /// ```
    pub const ALL: [StatKey; 9] = [
        StatKey::HitPoints,
        StatKey::Ki,
        StatKey::Stamina,
        StatKey::Strength,
        StatKey::Vitality,
        StatKey::Technique,
        StatKey::Wisdom,
        StatKey::Aura,
        StatKey::Agility,
    ];

    /// Number of stat keys.
    pub const COUNT: usize = 9;

    /// Get the short identifier used in external maps and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            StatKey::HitPoints => "HP",
            StatKey::Ki => "KI",
            StatKey::Stamina => "STA",
            StatKey::Strength => "STR",
            StatKey::Vitality => "VIT",
            StatKey::Technique => "TEC",
            StatKey::Wisdom => "WIS",
            StatKey::Aura => "AURA",
            StatKey::Agility => "AGI",
        }
    }

    /// Dense index for array-backed storage.
    pub(crate) fn index(self) -> usize {
        match self {
            StatKey::HitPoints => 0,
            StatKey::Ki => 1,
            StatKey::Stamina => 2,
            StatKey::Strength => 3,
            StatKey::Vitality => 4,
            StatKey::Technique => 5,
            StatKey::Wisdom => 6,
            StatKey::Aura => 7,
            StatKey::Agility => 8,
        }
    }
}

impl FromStr for StatKey {
    type Err = String;

    /// Parse a stat key from its short identifier (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "HP" => Ok(StatKey::HitPoints),
            "KI" => Ok(StatKey::Ki),
            "STA" => Ok(StatKey::Stamina),
            "STR" => Ok(StatKey::Strength),
            "VIT" => Ok(StatKey::Vitality),
            "TEC" => Ok(StatKey::Technique),
            "WIS" => Ok(StatKey::Wisdom),
            "AURA" => Ok(StatKey::Aura),
            "AGI" => Ok(StatKey::Agility),
            other => Err(format!("unrecognized stat key: {other}")),
        }
    }
}

impl std::fmt::Display for StatKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
