//! Character configuration.
//!
//! Everything is optional with documented defaults, so hosts can build a
//! character from an empty config, a hand-written struct, or a JSON blob
//! via serde. Validation happens once, before any component is built; an
//! invalid config never produces a partially-usable character.

use crate::attributes::{Alignment, Race};
use crate::error::BuildError;
use crate::stat_key::StatKey;
use serde::{Deserialize, Serialize};

fn default_hp() -> f64 {
    100.0
}
fn default_ki() -> f64 {
    50.0
}
fn default_sta() -> f64 {
    75.0
}
fn default_primary() -> f64 {
    10.0
}
fn default_level() -> u32 {
    1
}
fn default_xp_to_next() -> f64 {
    100.0
}
fn default_potential() -> f64 {
    0.1
}
fn default_potential_cap() -> f64 {
    1.0
}
fn default_name() -> String {
    String::from("Unnamed Fighter")
}

/// Initial base stat values.
///
/// # Examples
///
/// ```rust
/// use aurastat::config::StatConfig;
///
/// let stats = StatConfig::default();
/// assert_eq!(stats.hp, 100.0);
/// assert_eq!(stats.str, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatConfig {
    #[serde(default = "default_hp")]
    pub hp: f64,
    #[serde(default = "default_ki")]
    pub ki: f64,
    #[serde(default = "default_sta")]
    pub sta: f64,
    #[serde(default = "default_primary")]
    pub str: f64,
    #[serde(default = "default_primary")]
    pub vit: f64,
    #[serde(default = "default_primary")]
    pub tec: f64,
    #[serde(default = "default_primary")]
    pub wis: f64,
    #[serde(default = "default_primary")]
    pub aura: f64,
    #[serde(default = "default_primary")]
    pub agi: f64,
}

impl Default for StatConfig {
    fn default() -> Self {
        Self {
            hp: default_hp(),
            ki: default_ki(),
            sta: default_sta(),
            str: default_primary(),
            vit: default_primary(),
            tec: default_primary(),
            wis: default_primary(),
            aura: default_primary(),
            agi: default_primary(),
        }
    }
}

impl StatConfig {
    /// Initial value for a stat key.
    pub fn value(&self, key: StatKey) -> f64 {
        match key {
            StatKey::HitPoints => self.hp,
            StatKey::Ki => self.ki,
            StatKey::Stamina => self.sta,
            StatKey::Strength => self.str,
            StatKey::Vitality => self.vit,
            StatKey::Technique => self.tec,
            StatKey::Wisdom => self.wis,
            StatKey::Aura => self.aura,
            StatKey::Agility => self.agi,
        }
    }

    fn validate(&self) -> Result<(), BuildError> {
        for key in StatKey::ALL {
            let value = self.value(key);
            if !value.is_finite() || value < 0.0 {
                return Err(BuildError::InvalidBaseStat {
                    key: key.as_str(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Initial progression values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Starting level, minimum 1.
    #[serde(default = "default_level")]
    pub level: u32,
    /// XP already accumulated toward the next level.
    pub current_xp: f64,
    /// XP threshold for the next level-up, must be at least 1.
    #[serde(default = "default_xp_to_next")]
    pub xp_to_next_level: f64,
    pub race: Race,
    pub alignment: Alignment,
    /// Fractional power-level multiplier, bounded by `potential_cap`.
    #[serde(default = "default_potential")]
    pub potential: f64,
    /// Upper bound on potential, in (0, 1].
    #[serde(default = "default_potential_cap")]
    pub potential_cap: f64,
    pub unallocated_stat_points: u32,
    pub skill_points: u32,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            current_xp: 0.0,
            xp_to_next_level: default_xp_to_next(),
            race: Race::default(),
            alignment: Alignment::default(),
            potential: default_potential(),
            potential_cap: default_potential_cap(),
            unallocated_stat_points: 0,
            skill_points: 0,
        }
    }
}

impl ProgressionConfig {
    fn validate(&self) -> Result<(), BuildError> {
        if self.level < 1 {
            return Err(BuildError::InvalidLevel(self.level));
        }
        if !(self.xp_to_next_level >= 1.0) {
            return Err(BuildError::InvalidXpThreshold(self.xp_to_next_level));
        }
        if !(self.potential_cap > 0.0 && self.potential_cap <= 1.0) {
            return Err(BuildError::InvalidPotentialCap(self.potential_cap));
        }
        if self.potential > self.potential_cap {
            return Err(BuildError::PotentialAboveCap {
                potential: self.potential,
                cap: self.potential_cap,
            });
        }
        Ok(())
    }
}

/// Complete character configuration.
///
/// # Examples
///
/// ```rust
/// use aurastat::CharacterConfig;
///
/// // Everything defaults
/// let config = CharacterConfig::default();
/// assert!(config.validate().is_ok());
///
/// // Or from JSON, with missing fields filled in
/// let config: CharacterConfig =
///     serde_json::from_str(r#"{ "name": "Kael", "stats": { "tec": 40 } }"#).unwrap();
/// assert_eq!(config.stats.tec, 40.0);
/// assert_eq!(config.stats.hp, 100.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    #[serde(default = "default_name")]
    pub name: String,
    pub stats: StatConfig,
    pub progression: ProgressionConfig,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            stats: StatConfig::default(),
            progression: ProgressionConfig::default(),
        }
    }
}

impl CharacterConfig {
    /// Check all invariants the components rely on.
    pub fn validate(&self) -> Result<(), BuildError> {
        self.stats.validate()?;
        self.progression.validate()?;
        Ok(())
    }
}
