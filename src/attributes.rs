//! Character progression state.
//!
//! Level, experience, potential, and the point pools spent on base stats
//! and skills. Leveling cascades: one large XP grant fires as many
//! level-ups as the thresholds allow, each granting 5 stat points and
//! 1 skill point and raising the next threshold by 20% (floored).

use crate::base_stats::BaseStats;
use crate::stat_key::StatKey;
use serde::{Deserialize, Serialize};

/// Stat points granted per level-up.
const STAT_POINTS_PER_LEVEL: u32 = 5;
/// Skill points granted per level-up.
const SKILL_POINTS_PER_LEVEL: u32 = 1;
/// Growth factor applied to the XP threshold after each level-up.
const XP_THRESHOLD_GROWTH: f64 = 1.2;

/// Character race.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Race {
    #[default]
    Human,
    Saiyan,
    Namekian,
    Android,
    Majin,
}

/// Moral alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Good,
    #[default]
    Neutral,
    Evil,
}

/// Progression state: level, XP, potential, and point pools.
///
/// # Examples
///
/// ```rust
/// use aurastat::Attributes;
/// use aurastat::config::ProgressionConfig;
///
/// let mut attrs = Attributes::new(&ProgressionConfig::default());
/// assert_eq!(attrs.level(), 1);
///
/// // 100 XP threshold: a 250 XP grant fires two level-ups
/// let levels = attrs.grant_xp(250.0);
/// assert_eq!(levels, 2);
/// assert_eq!(attrs.level(), 3);
/// assert_eq!(attrs.unallocated_stat_points(), 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    level: u32,
    current_xp: f64,
    xp_to_next_level: f64,
    race: Race,
    alignment: Alignment,
    potential: f64,
    potential_cap: f64,
    unallocated_stat_points: u32,
    skill_points: u32,
}

impl Attributes {
    /// Build progression state from validated initial values.
    pub fn new(config: &crate::config::ProgressionConfig) -> Self {
        Self {
            level: config.level,
            current_xp: config.current_xp.max(0.0),
            xp_to_next_level: config.xp_to_next_level,
            race: config.race,
            alignment: config.alignment,
            potential: config.potential,
            potential_cap: config.potential_cap,
            unallocated_stat_points: config.unallocated_stat_points,
            skill_points: config.skill_points,
        }
    }

    /// Grant experience, firing as many level-ups as the thresholds allow.
    ///
    /// Returns the number of level-ups fired. Non-positive amounts are
    /// rejected and return 0.
    pub fn grant_xp(&mut self, amount: f64) -> u32 {
        if !amount.is_finite() || amount <= 0.0 {
            log::warn!("rejected xp grant of non-positive amount {amount}");
            return 0;
        }
        self.current_xp += amount;

        let mut level_ups = 0;
        while self.current_xp >= self.xp_to_next_level {
            self.current_xp -= self.xp_to_next_level;
            self.level += 1;
            self.unallocated_stat_points += STAT_POINTS_PER_LEVEL;
            self.skill_points += SKILL_POINTS_PER_LEVEL;
            // The floor collapses a sub-1 threshold to 0, which would
            // never exit this loop; the threshold stays at least 1
            self.xp_to_next_level =
                (self.xp_to_next_level * XP_THRESHOLD_GROWTH).floor().max(1.0);
            level_ups += 1;
            log::debug!(
                "level up to {} (next threshold {})",
                self.level,
                self.xp_to_next_level
            );
        }
        level_ups
    }

    /// Spend one unallocated stat point on a base stat.
    ///
    /// The point is only consumed if the underlying increase succeeded.
    pub fn allocate_stat_point(&mut self, key: StatKey, stats: &mut BaseStats) -> bool {
        if self.unallocated_stat_points == 0 {
            log::debug!("no unallocated stat points to spend on {key}");
            return false;
        }
        if !stats.increase(key, 1.0) {
            return false;
        }
        self.unallocated_stat_points -= 1;
        true
    }

    /// Spend one skill point.
    ///
    /// The skill effect itself lives outside the core; this only tracks
    /// the pool.
    pub fn spend_skill_point(&mut self) -> bool {
        if self.skill_points == 0 {
            log::debug!("no skill points to spend");
            return false;
        }
        self.skill_points -= 1;
        true
    }

    /// Raise potential, clamped to the potential cap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use aurastat::Attributes;
    /// use aurastat::config::ProgressionConfig;
    ///
    /// let mut attrs = Attributes::new(&ProgressionConfig::default());
    /// attrs.increase_potential(5.0);
    /// assert_eq!(attrs.potential(), 1.0); // clamped to the default cap
    /// ```
    pub fn increase_potential(&mut self, amount: f64) {
        if !amount.is_finite() || amount <= 0.0 {
            log::warn!("rejected potential increase of non-positive amount {amount}");
            return;
        }
        self.potential = (self.potential + amount).min(self.potential_cap);
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn current_xp(&self) -> f64 {
        self.current_xp
    }

    pub fn xp_to_next_level(&self) -> f64 {
        self.xp_to_next_level
    }

    pub fn race(&self) -> Race {
        self.race
    }

    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    pub fn potential(&self) -> f64 {
        self.potential
    }

    pub fn potential_cap(&self) -> f64 {
        self.potential_cap
    }

    pub fn unallocated_stat_points(&self) -> u32 {
        self.unallocated_stat_points
    }

    pub fn skill_points(&self) -> u32 {
        self.skill_points
    }
}
