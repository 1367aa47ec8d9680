//! The character composition root.
//!
//! Owns one instance of every component and is the only mutation
//! surface: external callers never touch a component directly, so every
//! read-through getter reflects the latest primitive values. After each
//! mutating entry point the owned pipeline re-runs the dependent stages
//! in topological order; resource-only changes take the cheaper
//! effective-PL path.

use crate::attributes::{Alignment, Attributes, Race};
use crate::base_stats::{BaseStats, StatSnapshot};
use crate::combat::{CombatStats, CritTier, CritTierTable};
use crate::config::CharacterConfig;
use crate::derived::{DerivedSnapshot, DerivedStats};
use crate::error::BuildError;
use crate::event::{EventSink, NullSink, StatEvent};
use crate::pipeline::{RecomputePipeline, Stage};
use crate::resistances::{DamageKind, ResistanceSnapshot, Resistances};
use crate::resources::Resources;
use crate::stat_key::StatKey;
use rand::Rng;
use std::collections::HashMap;

/// A fully wired character.
///
/// # Examples
///
/// ```rust
/// use aurastat::{Character, CharacterConfig, DamageKind, StatKey};
///
/// let mut character = Character::new(CharacterConfig::default()).unwrap();
/// assert_eq!(character.level(), 1);
/// assert_eq!(character.health(), character.max_health());
///
/// character.grant_xp(100.0);
/// assert_eq!(character.level(), 2);
/// assert!(character.allocate_stat_point(StatKey::Vitality));
///
/// let mitigated = character.apply_damage(50.0, DamageKind::Physical);
/// assert!(mitigated > 0.0);
/// ```
pub struct Character {
    name: String,
    defeated: bool,
    stats: BaseStats,
    attributes: Attributes,
    resources: Resources,
    derived: DerivedStats,
    combat: CombatStats,
    resistances: Resistances,
    pipeline: RecomputePipeline,
    sink: Box<dyn EventSink>,
}

impl Character {
    /// Build a character from a validated configuration.
    ///
    /// Fails without side effects on an invalid configuration; a
    /// `Character` that constructs is fully usable.
    pub fn new(config: CharacterConfig) -> Result<Self, BuildError> {
        Self::with_sink(config, Box::new(NullSink))
    }

    /// Build a character with an injected event sink.
    pub fn with_sink(
        config: CharacterConfig,
        sink: Box<dyn EventSink>,
    ) -> Result<Self, BuildError> {
        config.validate()?;
        let pipeline = RecomputePipeline::new()?;

        let stats = BaseStats::new(&config.stats);
        let attributes = Attributes::new(&config.progression);
        let resources = Resources::new(&stats, &attributes);
        let combat = CombatStats::new(&stats);
        let resistances = Resistances::new(&stats);

        let mut character = Self {
            name: config.name,
            defeated: false,
            stats,
            attributes,
            resources,
            derived: DerivedStats::default(),
            combat,
            resistances,
            pipeline,
            sink,
        };
        character.recompute_all();
        Ok(character)
    }

    /// Run every dependent stage in pipeline order.
    fn recompute_all(&mut self) {
        for i in 0..self.pipeline.order().len() {
            let stage = self.pipeline.order()[i];
            match stage {
                Stage::Resources => self
                    .resources
                    .recalculate_maximums(&self.stats, &self.attributes),
                Stage::Derived => {
                    self.derived
                        .recompute_full(&self.stats, &self.attributes, &self.resources)
                }
                Stage::Combat => self.combat.recompute(&self.stats),
                Stage::Resistances => self.resistances.recompute(&self.stats),
            }
        }
    }

    /// Cheap path after resource-only changes: maxima, base PL, combat,
    /// and resistances cannot have moved, only effective PL can.
    fn recompute_after_resource_change(&mut self) {
        self.derived.recompute_effective(&self.resources);
    }

    // ---- progression -----------------------------------------------------

    /// Grant experience; returns the number of level-ups fired.
    ///
    /// A single large grant can cascade through several levels; each one
    /// emits its own `LevelUp` event.
    pub fn grant_xp(&mut self, amount: f64) -> u32 {
        let level_ups = self.attributes.grant_xp(amount);
        if level_ups > 0 {
            let final_level = self.attributes.level();
            for new_level in (final_level - level_ups + 1)..=final_level {
                self.sink.emit(StatEvent::LevelUp { new_level });
            }
            self.recompute_all();
        }
        level_ups
    }

    /// Spend one unallocated stat point on a base stat.
    pub fn allocate_stat_point(&mut self, key: StatKey) -> bool {
        if !self.attributes.allocate_stat_point(key, &mut self.stats) {
            return false;
        }
        self.sink.emit(StatEvent::StatAllocated {
            key,
            new_value: self.stats.get(key),
        });
        self.recompute_all();
        true
    }

    /// Spend one skill point on a skill.
    ///
    /// The skill effect lives outside the core; only the pool and the
    /// event are handled here.
    pub fn spend_skill_point(&mut self, skill_id: &str) -> bool {
        if !self.attributes.spend_skill_point() {
            return false;
        }
        self.sink.emit(StatEvent::SkillPointSpent {
            skill_id: skill_id.to_string(),
        });
        true
    }

    /// Raise potential, clamped to the cap.
    pub fn increase_potential(&mut self, amount: f64) {
        self.attributes.increase_potential(amount);
        self.recompute_all();
    }

    /// Overwrite base stats from an external map, skipping invalid
    /// entries, then refresh everything.
    pub fn set_base_stats(&mut self, entries: &HashMap<String, f64>) {
        self.stats.set_all(entries);
        self.recompute_all();
    }

    // ---- combat ----------------------------------------------------------

    /// Apply incoming damage of a kind, mitigated by the matching
    /// resistance. Returns the mitigated amount actually forwarded
    /// (0.0 for a rejected non-positive input).
    pub fn apply_damage(&mut self, amount: f64, kind: DamageKind) -> f64 {
        if !amount.is_finite() || amount <= 0.0 {
            log::warn!("apply_damage rejected non-positive amount {amount}");
            return 0.0;
        }
        let resistance = self.resistances.by_kind(kind);
        let mitigated = (amount * (1.0 - resistance)).round().max(0.0);
        if mitigated > 0.0 {
            self.resources.take_damage(mitigated);
            self.recompute_after_resource_change();
        }
        self.sink.emit(StatEvent::DamageApplied {
            raw: amount,
            mitigated,
            remaining_health: self.resources.health(),
        });
        if self.resources.health() <= 0.0 && !self.defeated {
            self.defeated = true;
            self.sink.emit(StatEvent::Defeated);
        }
        mitigated
    }

    /// Resolve the critical tier for one outgoing attack.
    pub fn resolve_critical_tier<R: Rng>(&self, rng: &mut R) -> CritTier {
        self.combat.resolve_critical_tier(rng)
    }

    // ---- resources -------------------------------------------------------

    /// Restore health up to the maximum.
    pub fn restore_health(&mut self, amount: f64) -> bool {
        self.resource_mutation(|resources| resources.restore_health(amount))
    }

    /// Spend ki; fails whole on insufficient funds.
    pub fn use_ki(&mut self, amount: f64) -> bool {
        self.resource_mutation(|resources| resources.use_ki(amount))
    }

    /// Restore ki up to the maximum.
    pub fn restore_ki(&mut self, amount: f64) -> bool {
        self.resource_mutation(|resources| resources.restore_ki(amount))
    }

    /// Spend stamina (adding fatigue); fails whole on insufficient funds.
    pub fn use_stamina(&mut self, amount: f64) -> bool {
        self.resource_mutation(|resources| resources.use_stamina(amount))
    }

    /// Recover stamina up to the maximum.
    pub fn recover_stamina(&mut self, amount: f64) -> bool {
        self.resource_mutation(|resources| resources.recover_stamina(amount))
    }

    /// Add fatigue, clamped to 100.
    pub fn add_fatigue(&mut self, amount: f64) -> bool {
        self.resource_mutation(|resources| resources.add_fatigue(amount))
    }

    /// Reduce fatigue, clamped to 0.
    pub fn reduce_fatigue(&mut self, amount: f64) -> bool {
        self.resource_mutation(|resources| resources.reduce_fatigue(amount))
    }

    fn resource_mutation(&mut self, f: impl FnOnce(&mut Resources) -> bool) -> bool {
        if !f(&mut self.resources) {
            return false;
        }
        self.recompute_after_resource_change();
        true
    }

    // ---- read-only surface ----------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_defeated(&self) -> bool {
        self.defeated
    }

    pub fn base_stat(&self, key: StatKey) -> f64 {
        self.stats.get(key)
    }

    pub fn stat_snapshot(&self) -> StatSnapshot {
        self.stats.snapshot()
    }

    pub fn level(&self) -> u32 {
        self.attributes.level()
    }

    pub fn current_xp(&self) -> f64 {
        self.attributes.current_xp()
    }

    pub fn xp_to_next_level(&self) -> f64 {
        self.attributes.xp_to_next_level()
    }

    pub fn race(&self) -> Race {
        self.attributes.race()
    }

    pub fn alignment(&self) -> Alignment {
        self.attributes.alignment()
    }

    pub fn potential(&self) -> f64 {
        self.attributes.potential()
    }

    pub fn unallocated_stat_points(&self) -> u32 {
        self.attributes.unallocated_stat_points()
    }

    pub fn skill_points(&self) -> u32 {
        self.attributes.skill_points()
    }

    pub fn health(&self) -> f64 {
        self.resources.health()
    }

    pub fn max_health(&self) -> f64 {
        self.resources.max_health()
    }

    pub fn ki(&self) -> f64 {
        self.resources.ki()
    }

    pub fn max_ki(&self) -> f64 {
        self.resources.max_ki()
    }

    pub fn stamina(&self) -> f64 {
        self.resources.stamina()
    }

    pub fn max_stamina(&self) -> f64 {
        self.resources.max_stamina()
    }

    pub fn fatigue(&self) -> f64 {
        self.resources.fatigue()
    }

    pub fn base_pl(&self) -> f64 {
        self.derived.base_pl()
    }

    pub fn effective_pl(&self) -> f64 {
        self.derived.effective_pl()
    }

    pub fn movement_range(&self) -> f64 {
        self.derived.movement_range()
    }

    pub fn turn_order(&self) -> f64 {
        self.derived.turn_order()
    }

    pub fn derived_snapshot(&self) -> DerivedSnapshot {
        self.derived.snapshot()
    }

    pub fn accuracy(&self) -> f64 {
        self.combat.accuracy()
    }

    pub fn evasion(&self) -> f64 {
        self.combat.evasion()
    }

    pub fn crit_chance(&self) -> f64 {
        self.combat.crit_chance()
    }

    pub fn effective_crit_chance(&self) -> f64 {
        self.combat.effective_crit_chance()
    }

    pub fn knockback(&self) -> f64 {
        self.combat.knockback()
    }

    pub fn pursuit(&self) -> f64 {
        self.combat.pursuit()
    }

    pub fn crit_tiers(&self) -> &CritTierTable {
        self.combat.tiers()
    }

    pub fn can_reach_tier(&self, tier: CritTier) -> bool {
        self.combat.can_reach_tier(tier)
    }

    pub fn resistance(&self, kind: DamageKind) -> f64 {
        self.resistances.by_kind(kind)
    }

    pub fn resistance_snapshot(&self) -> ResistanceSnapshot {
        self.resistances.snapshot()
    }
}

impl std::fmt::Debug for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Character")
            .field("name", &self.name)
            .field("level", &self.attributes.level())
            .field("defeated", &self.defeated)
            .field("base_pl", &self.derived.base_pl())
            .field("effective_pl", &self.derived.effective_pl())
            .finish()
    }
}
