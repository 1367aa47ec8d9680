//! Damage resistances.
//!
//! Physical, energy, and status mitigation fractions, each on its own
//! diminishing-returns curve with a hard cap. Lookups by enum are total;
//! lookups by external name fall back to 0.0 with a diagnostic.

use crate::base_stats::BaseStats;
use crate::curve::diminishing;
use crate::stat_key::StatKey;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Hard cap on physical and energy resistance.
const PHYS_ENERGY_CAP: f64 = 0.90;
/// Hard cap on status resistance.
const STATUS_CAP: f64 = 0.85;

/// Kind of incoming damage or effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageKind {
    Physical,
    Energy,
    Status,
}

impl DamageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DamageKind::Physical => "physical",
            DamageKind::Energy => "energy",
            DamageKind::Status => "status",
        }
    }
}

impl FromStr for DamageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "physical" => Ok(DamageKind::Physical),
            "energy" => Ok(DamageKind::Energy),
            "status" => Ok(DamageKind::Status),
            other => Err(format!("unrecognized damage kind: {other}")),
        }
    }
}

impl std::fmt::Display for DamageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Read-only copy of the three mitigation fractions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResistanceSnapshot {
    pub physical: f64,
    pub energy: f64,
    pub status: f64,
}

/// Mitigation fractions recomputed from base stats.
///
/// # Examples
///
/// ```rust
/// use aurastat::{BaseStats, DamageKind, Resistances};
/// use aurastat::config::StatConfig;
///
/// let mut stats = BaseStats::new(&StatConfig::default());
/// let mut entries = std::collections::HashMap::new();
/// entries.insert("VIT".to_string(), 100.0);
/// stats.set_all(&entries);
///
/// let resistances = Resistances::new(&stats);
/// // (100 / 200) * 0.90
/// assert!((resistances.by_kind(DamageKind::Physical) - 0.45).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistances {
    physical: f64,
    energy: f64,
    status: f64,
}

impl Resistances {
    /// Build and compute from the current stats.
    pub fn new(stats: &BaseStats) -> Self {
        let mut resistances = Self {
            physical: 0.0,
            energy: 0.0,
            status: 0.0,
        };
        resistances.recompute(stats);
        resistances
    }

    /// Recompute all three fractions.
    pub fn recompute(&mut self, stats: &BaseStats) {
        let vit = stats.get(StatKey::Vitality);
        let wis = stats.get(StatKey::Wisdom);
        let aura = stats.get(StatKey::Aura);

        self.physical = diminishing(vit, 100.0, PHYS_ENERGY_CAP).min(PHYS_ENERGY_CAP);
        self.energy = diminishing(aura, 100.0, PHYS_ENERGY_CAP).min(PHYS_ENERGY_CAP);
        self.status = (diminishing(vit, 120.0, 0.40)
            + diminishing(wis, 120.0, 0.30)
            + diminishing(aura, 120.0, 0.15))
        .min(STATUS_CAP);
    }

    /// Mitigation fraction for a damage kind.
    pub fn by_kind(&self, kind: DamageKind) -> f64 {
        match kind {
            DamageKind::Physical => self.physical,
            DamageKind::Energy => self.energy,
            DamageKind::Status => self.status,
        }
    }

    /// Mitigation fraction by external name; 0.0 with a diagnostic for
    /// an unrecognized name.
    pub fn by_name(&self, name: &str) -> f64 {
        match name.parse::<DamageKind>() {
            Ok(kind) => self.by_kind(kind),
            Err(_) => {
                log::warn!("resistance lookup for unrecognized kind {name:?}, returning 0");
                0.0
            }
        }
    }

    /// Read-only copy of all three fractions.
    pub fn snapshot(&self) -> ResistanceSnapshot {
        ResistanceSnapshot {
            physical: self.physical,
            energy: self.energy,
            status: self.status,
        }
    }
}
