//! # aurastat - Deterministic RPG Character Combat Stat Engine
//!
//! A character stat engine for RPGs that provides:
//! - **Deterministic** derived-value computation (same input → same output)
//! - **Closed key spaces** (stat, tier, and damage-kind enums; string
//!   parsing only at the system boundary)
//! - **Ordered recomputation** (a dependency-sorted pipeline runs after
//!   every mutation, so no getter ever reads stale inputs)
//! - **Tiered critical hits** with deliberately unbounded crit chance
//!
//! ## Core Concepts
//!
//! ### Derivation Chain
//!
//! Nine base stats drive everything downstream:
//!
//! ```text
//! [BaseStats] + [Attributes] → [Resources] → [DerivedStats]
//!                            → [CombatStats]
//!                            → [Resistances]
//! ```
//!
//! The [`Character`] composition root owns one instance of each and is
//! the only mutation surface. Every mutating entry point re-runs the
//! dependent stages in topological order.
//!
//! ### Key Features
//!
//! - **Diminishing returns**: every soft-capped formula shares one
//!   saturating curve, monotone and bounded by its cap
//! - **Critical tiers**: crit chance past 100% unlocks super, mega, and
//!   omega tiers; resolution consumes injectable randomness
//! - **Clamped pools**: health/ki/stamina never leave `[0, max]`,
//!   fatigue never leaves `[0, 100]`
//! - **Events, not I/O**: state transitions go to an injectable sink
//!   (no-op by default); diagnostics go through the `log` facade
//!
//! ## Example
//!
//! ```rust
//! use aurastat::{Character, CharacterConfig, DamageKind, StatKey};
//!
//! let mut character = Character::new(CharacterConfig::default()).unwrap();
//!
//! // Leveling grants stat points; spending one refreshes everything
//! character.grant_xp(100.0);
//! character.allocate_stat_point(StatKey::Vitality);
//!
//! // Damage is mitigated by the matching resistance
//! let mitigated = character.apply_damage(50.0, DamageKind::Physical);
//! assert!(mitigated < 50.0);
//! assert!(character.effective_pl() <= character.base_pl());
//! ```
//!
//! ## Modules
//!
//! - [`stat_key`] - Closed base-stat key enum
//! - [`base_stats`] - The nine-stat store
//! - [`attributes`] - Level, XP, potential, point pools
//! - [`resources`] - Health/ki/stamina/fatigue pools
//! - [`derived`] - Power level, movement, turn order
//! - [`combat`] - Accuracy, evasion, tiered criticals
//! - [`resistances`] - Physical/energy/status mitigation
//! - [`character`] - Composition root
//! - [`pipeline`] - Dependency-ordered recompute pipeline
//! - [`config`] - Construction configuration
//! - [`curve`] - Diminishing-returns helper
//! - [`event`] - Structured event sink
//! - [`error`] - Construction error types

pub mod attributes;
pub mod base_stats;
pub mod character;
pub mod combat;
pub mod config;
pub mod curve;
pub mod derived;
pub mod error;
pub mod event;
pub mod pipeline;
pub mod resistances;
pub mod resources;
pub mod stat_key;

// Re-export main types for convenience
pub use attributes::{Alignment, Attributes, Race};
pub use base_stats::{BaseStats, StatSnapshot};
pub use character::Character;
pub use combat::{CombatStats, CritTier, CritTierRow, CritTierTable};
pub use config::{CharacterConfig, ProgressionConfig, StatConfig};
pub use derived::{DerivedSnapshot, DerivedStats};
pub use error::BuildError;
pub use event::{EventSink, LogSink, NullSink, RecordingSink, StatEvent};
pub use pipeline::{RecomputePipeline, Stage};
pub use resistances::{DamageKind, ResistanceSnapshot, Resistances};
pub use resources::Resources;
pub use stat_key::StatKey;
