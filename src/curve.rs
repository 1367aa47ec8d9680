//! Diminishing-returns curve.
//!
//! Every soft-capped combat formula in the engine goes through the same
//! saturating curve: `stat / (stat + k) * cap`. The curve starts at 0,
//! rises fastest early, and approaches `cap` asymptotically without ever
//! reaching it.

/// Diminishing-returns bonus for a stat.
///
/// `k` is the half-value point: at `stat == k` the bonus is exactly
/// `cap / 2`. Monotonically non-decreasing in `stat` and strictly below
/// `cap` for any finite `stat >= 0`.
///
/// # Examples
///
/// ```rust
/// use aurastat::curve::diminishing;
///
/// // Half the cap at the half-value point
/// assert_eq!(diminishing(60.0, 60.0, 50.0), 25.0);
///
/// // Zero stat contributes nothing
/// assert_eq!(diminishing(0.0, 60.0, 50.0), 0.0);
/// ```
pub fn diminishing(stat: f64, k: f64, cap: f64) -> f64 {
    if stat <= 0.0 {
        return 0.0;
    }
    stat / (stat + k) * cap
}
