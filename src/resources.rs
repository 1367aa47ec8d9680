//! Resource pools: health, ki, stamina, and fatigue.
//!
//! Maximums are pure functions of base stats and level, recomputed on
//! demand and never set directly. Current values are clamped to
//! `[0, max]` on every mutation; fatigue lives in `[0, 100]`. Costed
//! actions (`use_ki`, `use_stamina`) fail whole: insufficient funds
//! leaves the pool untouched.

use crate::attributes::Attributes;
use crate::base_stats::BaseStats;
use crate::stat_key::StatKey;

/// Fatigue gained per point of stamina spent, before the ceil.
const FATIGUE_PER_STAMINA: f64 = 0.1;
/// Upper bound on fatigue.
const FATIGUE_MAX: f64 = 100.0;

/// Current and maximum health, ki, stamina, plus fatigue.
///
/// # Examples
///
/// ```rust
/// use aurastat::Resources;
/// use aurastat::{Attributes, BaseStats};
/// use aurastat::config::{ProgressionConfig, StatConfig};
///
/// let stats = BaseStats::new(&StatConfig::default());
/// let attrs = Attributes::new(&ProgressionConfig::default());
/// let mut resources = Resources::new(&stats, &attrs);
///
/// // maxHealth = floor(100 + 1*10 + 10*5) = 160
/// assert_eq!(resources.max_health(), 160.0);
/// assert_eq!(resources.health(), 160.0);
///
/// assert!(resources.take_damage(40.0));
/// assert_eq!(resources.health(), 120.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Resources {
    health: f64,
    ki: f64,
    stamina: f64,
    fatigue: f64,
    max_health: f64,
    max_ki: f64,
    max_stamina: f64,
}

impl Resources {
    /// Build the pools at full current values for the given stats.
    pub fn new(stats: &BaseStats, attrs: &Attributes) -> Self {
        let mut resources = Self {
            health: 0.0,
            ki: 0.0,
            stamina: 0.0,
            fatigue: 0.0,
            max_health: 0.0,
            max_ki: 0.0,
            max_stamina: 0.0,
        };
        resources.recalculate_maximums(stats, attrs);
        resources.health = resources.max_health;
        resources.ki = resources.max_ki;
        resources.stamina = resources.max_stamina;
        resources
    }

    /// Recompute all three maxima from the current stats and level.
    ///
    /// Current values are clamped down to a lowered maximum but are never
    /// raised when a maximum grows.
    pub fn recalculate_maximums(&mut self, stats: &BaseStats, attrs: &Attributes) {
        let level = attrs.level() as f64;
        let vit = stats.get(StatKey::Vitality);
        let wis = stats.get(StatKey::Wisdom);
        let aura = stats.get(StatKey::Aura);
        let agi = stats.get(StatKey::Agility);

        self.max_health = (stats.get(StatKey::HitPoints) + level * 10.0 + vit * 5.0).floor();
        self.max_ki = (stats.get(StatKey::Ki) + level * 5.0 + wis * 3.0 + aura * 2.0).floor();
        self.max_stamina = (stats.get(StatKey::Stamina) + level * 5.0 + vit * 2.0 + agi * 3.0).floor();

        self.health = self.health.min(self.max_health);
        self.ki = self.ki.min(self.max_ki);
        self.stamina = self.stamina.min(self.max_stamina);
    }

    /// Subtract health, clamped at 0. Rejects non-positive amounts.
    pub fn take_damage(&mut self, amount: f64) -> bool {
        if !Self::valid_amount(amount, "take_damage") {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        true
    }

    /// Restore health up to the current maximum.
    pub fn restore_health(&mut self, amount: f64) -> bool {
        if !Self::valid_amount(amount, "restore_health") {
            return false;
        }
        self.health = (self.health + amount).min(self.max_health);
        true
    }

    /// Spend ki. Fails whole when the pool holds less than `amount`.
    pub fn use_ki(&mut self, amount: f64) -> bool {
        if !Self::valid_amount(amount, "use_ki") {
            return false;
        }
        if self.ki < amount {
            log::debug!("insufficient ki: have {}, need {amount}", self.ki);
            return false;
        }
        self.ki -= amount;
        true
    }

    /// Restore ki up to the current maximum.
    pub fn restore_ki(&mut self, amount: f64) -> bool {
        if !Self::valid_amount(amount, "restore_ki") {
            return false;
        }
        self.ki = (self.ki + amount).min(self.max_ki);
        true
    }

    /// Spend stamina; exertion also adds `ceil(amount / 10)` fatigue.
    ///
    /// Fails whole when the pool holds less than `amount`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use aurastat::Resources;
    /// use aurastat::{Attributes, BaseStats};
    /// use aurastat::config::{ProgressionConfig, StatConfig};
    ///
    /// let stats = BaseStats::new(&StatConfig::default());
    /// let attrs = Attributes::new(&ProgressionConfig::default());
    /// let mut resources = Resources::new(&stats, &attrs);
    ///
    /// assert!(resources.use_stamina(25.0));
    /// assert_eq!(resources.fatigue(), 3.0); // ceil(25 * 0.1)
    /// ```
    pub fn use_stamina(&mut self, amount: f64) -> bool {
        if !Self::valid_amount(amount, "use_stamina") {
            return false;
        }
        if self.stamina < amount {
            log::debug!("insufficient stamina: have {}, need {amount}", self.stamina);
            return false;
        }
        self.stamina -= amount;
        self.fatigue = (self.fatigue + (amount * FATIGUE_PER_STAMINA).ceil()).min(FATIGUE_MAX);
        true
    }

    /// Recover stamina up to the current maximum.
    pub fn recover_stamina(&mut self, amount: f64) -> bool {
        if !Self::valid_amount(amount, "recover_stamina") {
            return false;
        }
        self.stamina = (self.stamina + amount).min(self.max_stamina);
        true
    }

    /// Add fatigue, clamped to 100.
    pub fn add_fatigue(&mut self, amount: f64) -> bool {
        if !Self::valid_amount(amount, "add_fatigue") {
            return false;
        }
        self.fatigue = (self.fatigue + amount).min(FATIGUE_MAX);
        true
    }

    /// Reduce fatigue, clamped to 0.
    pub fn reduce_fatigue(&mut self, amount: f64) -> bool {
        if !Self::valid_amount(amount, "reduce_fatigue") {
            return false;
        }
        self.fatigue = (self.fatigue - amount).max(0.0);
        true
    }

    pub fn health(&self) -> f64 {
        self.health
    }

    pub fn max_health(&self) -> f64 {
        self.max_health
    }

    pub fn ki(&self) -> f64 {
        self.ki
    }

    pub fn max_ki(&self) -> f64 {
        self.max_ki
    }

    pub fn stamina(&self) -> f64 {
        self.stamina
    }

    pub fn max_stamina(&self) -> f64 {
        self.max_stamina
    }

    pub fn fatigue(&self) -> f64 {
        self.fatigue
    }

    /// Current/max health ratio; 0 when the maximum is 0.
    pub fn health_pct(&self) -> f64 {
        Self::ratio(self.health, self.max_health)
    }

    /// Current/max ki ratio; 0 when the maximum is 0.
    pub fn ki_pct(&self) -> f64 {
        Self::ratio(self.ki, self.max_ki)
    }

    /// Current/max stamina ratio; 0 when the maximum is 0.
    pub fn stamina_pct(&self) -> f64 {
        Self::ratio(self.stamina, self.max_stamina)
    }

    fn ratio(current: f64, max: f64) -> f64 {
        if max <= 0.0 {
            0.0
        } else {
            current / max
        }
    }

    fn valid_amount(amount: f64, op: &str) -> bool {
        if !amount.is_finite() || amount <= 0.0 {
            log::warn!("{op} rejected non-positive amount {amount}");
            return false;
        }
        true
    }
}
