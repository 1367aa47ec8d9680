use aurastat::event::{EventSink, StatEvent};
use aurastat::{Character, CharacterConfig, CritTier, DamageKind, StatKey};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Sink that shares its event log with the test through an Rc handle.
#[derive(Clone, Default)]
struct SharedSink(Rc<RefCell<Vec<StatEvent>>>);

impl EventSink for SharedSink {
    fn emit(&mut self, event: StatEvent) {
        self.0.borrow_mut().push(event);
    }
}

fn character_with(f: impl FnOnce(&mut CharacterConfig)) -> Character {
    let mut config = CharacterConfig::default();
    f(&mut config);
    Character::new(config).unwrap()
}

/// Worked example: VIT 100 puts physical resistance at 45%.
#[test]
fn test_physical_resistance_at_vit_100() {
    let character = character_with(|c| c.stats.vit = 100.0);
    assert!((character.resistance(DamageKind::Physical) - 0.45).abs() < 1e-12);
}

/// Worked example: STR 75 puts knockback at floor(3 + 75/125*12) = 10.
#[test]
fn test_knockback_at_str_75() {
    let character = character_with(|c| c.stats.str = 75.0);
    assert_eq!(character.knockback(), 10.0);
}

/// Worked example: TEC 300 reaches super and mega but not omega.
#[test]
fn test_tier_reachability_at_tec_300() {
    let character = character_with(|c| c.stats.tec = 300.0);
    assert!((character.crit_chance() - 2.05).abs() < 1e-12);
    assert_eq!(character.effective_crit_chance(), 1.0);
    assert!(character.can_reach_tier(CritTier::Super));
    assert!(character.can_reach_tier(CritTier::Mega));
    assert!(!character.can_reach_tier(CritTier::Omega));
}

/// Worked example: damage through ~33.9% resistance lands round(50 * 0.661).
#[test]
fn test_apply_damage_rounding() {
    // VIT such that resistance = vit/(vit+100)*0.9 ≈ 0.339 -> vit ≈ 60.4
    let mut character = character_with(|c| c.stats.vit = 60.4);
    let resistance = character.resistance(DamageKind::Physical);
    assert!((resistance - 0.339).abs() < 0.001);

    let before = character.health();
    let mitigated = character.apply_damage(50.0, DamageKind::Physical);
    assert_eq!(mitigated, 33.0);
    assert_eq!(character.health(), before - 33.0);
}

#[test]
fn test_allocate_with_no_points_changes_nothing() {
    let mut character = character_with(|_| {});
    let stats = character.stat_snapshot();
    assert!(!character.allocate_stat_point(StatKey::Technique));
    assert_eq!(character.stat_snapshot(), stats);
}

/// One big XP grant cascades through several levels and emits one
/// event per level.
#[test]
fn test_cascading_level_ups_emit_events() {
    let sink = SharedSink::default();
    let mut character =
        Character::with_sink(CharacterConfig::default(), Box::new(sink.clone())).unwrap();

    // Thresholds 100, 120, 144: 364 XP is exactly three level-ups
    let levels = character.grant_xp(364.0);
    assert_eq!(levels, 3);
    assert_eq!(character.level(), 4);
    assert_eq!(character.unallocated_stat_points(), 15);
    assert_eq!(character.skill_points(), 3);

    let events = sink.0.borrow();
    let level_events: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            StatEvent::LevelUp { new_level } => Some(*new_level),
            _ => None,
        })
        .collect();
    assert_eq!(level_events, vec![2, 3, 4]);
}

/// Defeat fires exactly once, even when damage keeps coming.
#[test]
fn test_defeat_event_fires_once() {
    let sink = SharedSink::default();
    let mut character =
        Character::with_sink(CharacterConfig::default(), Box::new(sink.clone())).unwrap();

    character.apply_damage(1e9, DamageKind::Energy);
    character.apply_damage(1e9, DamageKind::Energy);
    assert!(character.is_defeated());

    let defeats = sink
        .0
        .borrow()
        .iter()
        .filter(|e| matches!(e, StatEvent::Defeated))
        .count();
    assert_eq!(defeats, 1);
}

/// Stat allocation must refresh every dependent value in one call.
#[test]
fn test_allocation_cascade_order() {
    let mut character = character_with(|c| {
        c.progression.unallocated_stat_points = 10;
    });

    let max_health = character.max_health();
    let base_pl = character.base_pl();
    let resistance = character.resistance(DamageKind::Physical);

    assert!(character.allocate_stat_point(StatKey::Vitality));

    // Resources: +5 max health per VIT
    assert_eq!(character.max_health(), max_health + 5.0);
    // Derived: VIT contributes 0.5 to raw PL
    assert!(character.base_pl() >= base_pl);
    // Resistances: physical curve moved
    assert!(character.resistance(DamageKind::Physical) > resistance);
}

/// Raising a maximum never backfills the current value.
#[test]
fn test_max_increase_does_not_heal() {
    let mut character = character_with(|c| {
        c.progression.unallocated_stat_points = 1;
    });
    character.apply_damage(40.0, DamageKind::Physical);
    let health = character.health();

    assert!(character.allocate_stat_point(StatKey::Vitality));
    assert!(character.max_health() > health);
    assert_eq!(character.health(), health);
}

#[test]
fn test_ki_and_stamina_insufficient_funds() {
    let mut character = character_with(|_| {});
    let ki = character.ki();
    let stamina = character.stamina();

    assert!(!character.use_ki(ki + 1.0));
    assert_eq!(character.ki(), ki);

    assert!(!character.use_stamina(stamina + 1.0));
    assert_eq!(character.stamina(), stamina);
    assert_eq!(character.fatigue(), 0.0);
}

#[test]
fn test_stamina_use_accumulates_fatigue_and_drains_pl() {
    let mut character = character_with(|c| c.progression.potential = 1.0);
    let effective = character.effective_pl();

    assert!(character.use_stamina(50.0));
    assert_eq!(character.fatigue(), 5.0);
    assert!(character.effective_pl() < effective);
}

#[test]
fn test_potential_scales_base_pl() {
    let low = character_with(|c| c.progression.potential = 0.1);
    let high = character_with(|c| c.progression.potential = 1.0);
    // rawPL 55 at default stats
    assert_eq!(low.base_pl(), 5.0);
    assert_eq!(high.base_pl(), 55.0);
}

/// Repeated reads with no mutation in between must agree exactly.
#[test]
fn test_read_only_getters_are_stable() {
    let mut character = character_with(|c| c.stats.tec = 120.0);
    character.grant_xp(250.0);
    character.apply_damage(30.0, DamageKind::Physical);

    let derived = character.derived_snapshot();
    let resistances = character.resistance_snapshot();
    let stats = character.stat_snapshot();

    // Reads must not perturb state
    let _ = character.accuracy();
    let _ = character.crit_tiers().rows().to_vec();
    assert_eq!(character.derived_snapshot(), derived);
    assert_eq!(character.resistance_snapshot(), resistances);
    assert_eq!(character.stat_snapshot(), stats);
}

#[test]
fn test_config_from_json() {
    let config: CharacterConfig = serde_json::from_str(
        r#"{
            "name": "Renza",
            "stats": { "tec": 475, "vit": 60 },
            "progression": { "potential": 0.5, "potential_cap": 0.8 }
        }"#,
    )
    .unwrap();
    let character = Character::new(config).unwrap();

    assert_eq!(character.name(), "Renza");
    // 0.05 + 475/150 ≈ 3.217 clears the omega threshold
    assert!(character.crit_chance() > 3.01);
    assert!(character.can_reach_tier(CritTier::Omega));
    assert_eq!(character.effective_crit_chance(), 1.0);
}

/// A fractional XP threshold would shrink to 0 on the first level-up
/// and loop forever; construction refuses it outright.
#[test]
fn test_fractional_xp_threshold_rejected_at_construction() {
    let mut config = CharacterConfig::default();
    config.progression.xp_to_next_level = 0.5;
    assert!(Character::new(config).is_err());
}

#[test]
fn test_set_base_stats_skips_bad_entries_and_recomputes() {
    let mut character = character_with(|_| {});
    let mut entries = HashMap::new();
    entries.insert("VIT".to_string(), 100.0);
    entries.insert("LUCK".to_string(), 50.0);
    entries.insert("STR".to_string(), -3.0);

    character.set_base_stats(&entries);

    assert_eq!(character.base_stat(StatKey::Vitality), 100.0);
    assert_eq!(character.base_stat(StatKey::Strength), 10.0);
    // Cascade happened: the VIT jump shows up downstream
    assert!((character.resistance(DamageKind::Physical) - 0.45).abs() < 1e-12);
}

#[test]
fn test_unknown_boundary_names_fall_back() {
    let character = character_with(|_| {});
    let table = character.crit_tiers();
    assert_eq!(table.multiplier_for_name("hyper", DamageKind::Physical), 1.0);
    assert_eq!(table.defense_ignore_for_name("hyper"), 0.0);
    assert!(!table.grants_knockback_name("hyper"));
}
