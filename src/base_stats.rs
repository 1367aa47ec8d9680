//! Base stat store.
//!
//! Holds the nine allocatable primitive values everything else is derived
//! from. Values never go negative, and the only way to raise one is an
//! explicit positive-amount increase. Reads are total: unknown external
//! names resolve to 0.0 with a diagnostic instead of failing the read
//! path.

use crate::config::StatConfig;
use crate::stat_key::StatKey;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable copy of all nine base stat values.
///
/// Read-only, copyable, and serializable; safe to hand to UI or replay
/// layers without exposing the live store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub hp: f64,
    pub ki: f64,
    pub sta: f64,
    pub str: f64,
    pub vit: f64,
    pub tec: f64,
    pub wis: f64,
    pub aura: f64,
    pub agi: f64,
}

/// Mutable store of the nine base stats.
///
/// # Examples
///
/// ```rust
/// use aurastat::{BaseStats, StatKey};
/// use aurastat::config::StatConfig;
///
/// let mut stats = BaseStats::new(&StatConfig::default());
/// assert_eq!(stats.get(StatKey::Strength), 10.0);
///
/// assert!(stats.increase(StatKey::Strength, 5.0));
/// assert_eq!(stats.get(StatKey::Strength), 15.0);
///
/// // Non-positive amounts are rejected without mutation
/// assert!(!stats.increase(StatKey::Strength, 0.0));
/// assert_eq!(stats.get(StatKey::Strength), 15.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BaseStats {
    values: [f64; StatKey::COUNT],
}

impl BaseStats {
    /// Build the store from validated initial values.
    pub fn new(config: &StatConfig) -> Self {
        let mut values = [0.0; StatKey::COUNT];
        for key in StatKey::ALL {
            values[key.index()] = config.value(key);
        }
        Self { values }
    }

    /// Current value of a stat.
    pub fn get(&self, key: StatKey) -> f64 {
        self.values[key.index()]
    }

    /// Current value of a stat by external name.
    ///
    /// Returns 0.0 and logs a warning for an unrecognized name, keeping
    /// the read path total for external callers.
    pub fn get_by_name(&self, name: &str) -> f64 {
        match name.parse::<StatKey>() {
            Ok(key) => self.get(key),
            Err(_) => {
                log::warn!("read of unrecognized stat key {name:?}, returning 0");
                0.0
            }
        }
    }

    /// Increase a stat by a positive amount.
    ///
    /// Returns `false` without mutation when `amount` is not a positive
    /// finite number.
    pub fn increase(&mut self, key: StatKey, amount: f64) -> bool {
        if !amount.is_finite() || amount <= 0.0 {
            log::warn!("rejected stat increase of {key} by non-positive amount {amount}");
            return false;
        }
        self.values[key.index()] += amount;
        true
    }

    /// Overwrite recognized, non-negative entries from an external map.
    ///
    /// Unknown keys and negative or non-finite values are skipped with a
    /// diagnostic; valid entries still apply.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use aurastat::{BaseStats, StatKey};
    /// use aurastat::config::StatConfig;
    /// use std::collections::HashMap;
    ///
    /// let mut stats = BaseStats::new(&StatConfig::default());
    /// let mut entries = HashMap::new();
    /// entries.insert("VIT".to_string(), 80.0);
    /// entries.insert("LUCK".to_string(), 9.0); // skipped
    /// entries.insert("AGI".to_string(), -4.0); // skipped
    ///
    /// stats.set_all(&entries);
    /// assert_eq!(stats.get(StatKey::Vitality), 80.0);
    /// assert_eq!(stats.get(StatKey::Agility), 10.0);
    /// ```
    pub fn set_all(&mut self, entries: &HashMap<String, f64>) {
        for (name, &value) in entries {
            let key = match name.parse::<StatKey>() {
                Ok(key) => key,
                Err(_) => {
                    log::warn!("set_all skipping unrecognized stat key {name:?}");
                    continue;
                }
            };
            if !value.is_finite() || value < 0.0 {
                log::warn!("set_all skipping invalid value {value} for {key}");
                continue;
            }
            self.values[key.index()] = value;
        }
    }

    /// Immutable copy of all nine values.
    pub fn snapshot(&self) -> StatSnapshot {
        StatSnapshot {
            hp: self.get(StatKey::HitPoints),
            ki: self.get(StatKey::Ki),
            sta: self.get(StatKey::Stamina),
            str: self.get(StatKey::Strength),
            vit: self.get(StatKey::Vitality),
            tec: self.get(StatKey::Technique),
            wis: self.get(StatKey::Wisdom),
            aura: self.get(StatKey::Aura),
            agi: self.get(StatKey::Agility),
        }
    }
}
