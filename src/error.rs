//! Error types for character construction.
//!
//! Only construction can fail hard: a bad configuration must never
//! produce a partially-usable `Character`. Every runtime failure after
//! construction is reported through a boolean result (or a defined
//! fallback value) plus a diagnostic, never an error.

use crate::pipeline::Stage;
use thiserror::Error;

/// Format a stage cycle path as a readable string.
fn format_cycle_path(path: &[Stage]) -> String {
    if path.is_empty() {
        return String::from("(empty cycle)");
    }
    path.iter()
        .map(|stage| stage.name())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Errors that can abort `Character` construction.
///
/// # Examples
///
/// ```rust
/// use aurastat::BuildError;
///
/// let err = BuildError::InvalidLevel(0);
/// assert!(err.to_string().contains("level"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BuildError {
    /// Configured level is below the minimum of 1.
    #[error("level must be at least 1, got {0}")]
    InvalidLevel(u32),

    /// Configured XP threshold for the next level is below 1.
    #[error("xp threshold to next level must be at least 1, got {0}")]
    InvalidXpThreshold(f64),

    /// Configured potential cap falls outside (0, 1].
    #[error("potential cap must be in (0, 1], got {0}")]
    InvalidPotentialCap(f64),

    /// Configured potential exceeds the configured cap.
    #[error("potential {potential} exceeds potential cap {cap}")]
    PotentialAboveCap { potential: f64, cap: f64 },

    /// A configured base stat is negative or non-finite.
    #[error("base stat {key} must be a non-negative finite number, got {value}")]
    InvalidBaseStat { key: &'static str, value: f64 },

    /// The recompute stage graph contains a dependency cycle.
    ///
    /// Contains the path of stages involved in the cycle. This can only
    /// happen if stage dependency declarations are edited inconsistently.
    #[error("recompute stage cycle: {}", format_cycle_path(.path))]
    StageCycle { path: Vec<Stage> },
}
