//! Derived stats: power level, movement, and turn order.
//!
//! Two recompute granularities: a full recompute refreshes everything
//! (stat or level changes), while the resource-only recompute refreshes
//! effective power level alone, since current resource ratios are the
//! only resource-driven input.

use crate::attributes::Attributes;
use crate::base_stats::BaseStats;
use crate::resources::Resources;
use crate::stat_key::StatKey;
use serde::{Deserialize, Serialize};

/// Read-only copy of the derived values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedSnapshot {
    pub base_pl: f64,
    pub effective_pl: f64,
    pub movement_range: f64,
    pub turn_order: f64,
}

/// Power level, movement range, and turn order.
///
/// # Examples
///
/// ```rust
/// use aurastat::DerivedStats;
/// use aurastat::{Attributes, BaseStats, Resources};
/// use aurastat::config::{ProgressionConfig, StatConfig};
///
/// let stats = BaseStats::new(&StatConfig::default());
/// let attrs = Attributes::new(&ProgressionConfig::default());
/// let resources = Resources::new(&stats, &attrs);
///
/// let mut derived = DerivedStats::default();
/// derived.recompute_full(&stats, &attrs, &resources);
///
/// // rawPL = 10*(1.8+0.5+1.5+0.3+0.4+1.0) = 55; basePL = floor(55 * 0.1)
/// assert_eq!(derived.base_pl(), 5.0);
/// // movement = floor(3 + 10/10)
/// assert_eq!(derived.movement_range(), 4.0);
/// // turn order = floor(10 + 10*0.5)
/// assert_eq!(derived.turn_order(), 15.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DerivedStats {
    base_pl: f64,
    effective_pl: f64,
    movement_range: f64,
    turn_order: f64,
}

impl DerivedStats {
    /// Recompute all four values from stats, progression, and resources.
    pub fn recompute_full(&mut self, stats: &BaseStats, attrs: &Attributes, resources: &Resources) {
        let str = stats.get(StatKey::Strength);
        let vit = stats.get(StatKey::Vitality);
        let tec = stats.get(StatKey::Technique);
        let wis = stats.get(StatKey::Wisdom);
        let aura = stats.get(StatKey::Aura);
        let agi = stats.get(StatKey::Agility);

        let raw_pl = str * 1.8 + vit * 0.5 + tec * 1.5 + wis * 0.3 + aura * 0.4 + agi * 1.0;
        self.base_pl = (raw_pl * attrs.potential()).floor();
        self.movement_range = (3.0 + agi / 10.0).floor();
        self.turn_order = (agi + tec * 0.5).floor();
        self.recompute_effective(resources);
    }

    /// Recompute effective power level alone, from current resource state.
    ///
    /// Cheaper than the full recompute; used after damage, resource use,
    /// and recovery, where base PL, movement, and turn order cannot have
    /// changed.
    pub fn recompute_effective(&mut self, resources: &Resources) {
        let modifier = (0.5 + 0.5 * resources.health_pct())
            * (0.8 + 0.2 * resources.ki_pct())
            * (0.7 + 0.3 * resources.stamina_pct())
            * (1.0 - resources.fatigue() / 200.0);
        self.effective_pl = (self.base_pl * modifier).floor().max(0.0);
    }

    pub fn base_pl(&self) -> f64 {
        self.base_pl
    }

    pub fn effective_pl(&self) -> f64 {
        self.effective_pl
    }

    pub fn movement_range(&self) -> f64 {
        self.movement_range
    }

    pub fn turn_order(&self) -> f64 {
        self.turn_order
    }

    /// Read-only copy of all four values.
    pub fn snapshot(&self) -> DerivedSnapshot {
        DerivedSnapshot {
            base_pl: self.base_pl,
            effective_pl: self.effective_pl,
            movement_range: self.movement_range,
            turn_order: self.turn_order,
        }
    }
}
