//! Structured event sink.
//!
//! The engine has no hidden I/O: significant state transitions are
//! reported to an injectable `EventSink` (no-op by default), and low-level
//! diagnostics go through the `log` facade, which is also a no-op unless
//! the host installs a logger. Events are serializable so hosts can feed
//! them to replay logs, combat feeds, or analytics without re-deriving
//! state.

use crate::stat_key::StatKey;
use serde::{Deserialize, Serialize};

/// A significant character state transition.
///
/// # Examples
///
/// ```rust
/// use aurastat::event::StatEvent;
///
/// let event = StatEvent::LevelUp { new_level: 5 };
/// let json = serde_json::to_string(&event).unwrap();
/// assert!(json.contains("level_up"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatEvent {
    /// The character gained a level.
    LevelUp { new_level: u32 },
    /// A stat point was spent on a base stat.
    StatAllocated { key: StatKey, new_value: f64 },
    /// A skill point was spent; the skill effect lives outside the core.
    SkillPointSpent { skill_id: String },
    /// Damage was applied after resistance mitigation.
    DamageApplied {
        raw: f64,
        mitigated: f64,
        remaining_health: f64,
    },
    /// Health reached zero; the character is out of the fight.
    Defeated,
}

/// Receiver for character state transition events.
///
/// Implementations must not assume any threading model: the engine is
/// single-threaded and calls the sink synchronously from mutation entry
/// points.
pub trait EventSink {
    /// Receive one event.
    fn emit(&mut self, event: StatEvent);
}

/// Default sink that discards all events.
///
/// # Examples
///
/// ```rust
/// use aurastat::event::{EventSink, NullSink, StatEvent};
///
/// let mut sink = NullSink;
/// sink.emit(StatEvent::Defeated); // goes nowhere
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: StatEvent) {}
}

/// Sink that forwards events to the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&mut self, event: StatEvent) {
        log::info!("character event: {event:?}");
    }
}

/// Sink that records events in memory, mainly for tests and replays.
///
/// # Examples
///
/// ```rust
/// use aurastat::event::{EventSink, RecordingSink, StatEvent};
///
/// let mut sink = RecordingSink::default();
/// sink.emit(StatEvent::LevelUp { new_level: 2 });
/// assert_eq!(sink.events().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<StatEvent>,
}

impl RecordingSink {
    /// All events received so far, in order.
    pub fn events(&self) -> &[StatEvent] {
        &self.events
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: StatEvent) {
        self.events.push(event);
    }
}
