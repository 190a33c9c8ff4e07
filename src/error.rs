//! Spawn-core error types.
//!
//! Systems propagate errors through these types rather than panicking:
//! configuration faults disable the offending component after one logged
//! diagnostic, and pool exhaustion halts the affected chain without touching
//! its siblings.

use std::fmt;

use crate::pool::ArchetypeKey;

/// Top-level error enum for the avoidance spawn core.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The difficulty stage list is empty; the progression controller cannot
    /// operate with undefined stage state.
    EmptyStageList,

    /// A stage threshold fails the ordering rule (first stage at 0, strictly
    /// increasing afterwards).
    BadStageThreshold {
        /// Index of the offending stage.
        index: usize,
        /// The threshold that was rejected.
        threshold: u32,
        /// Threshold of the previous stage (0 for the first stage rule).
        previous: u32,
    },

    /// A geometry constant is outside its workable range.
    /// Returned by validation helpers; not triggered at runtime by default.
    InvalidGeometry {
        /// Name of the constant (for logging).
        name: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the workable range.
        safe_range: &'static str,
    },

    /// A `[min, max]` tuning window is inverted or negative; nothing can be
    /// drawn from it.
    InvalidWindow {
        /// Name of the window (for logging).
        name: &'static str,
        min: f32,
        max: f32,
    },

    /// The pool could not supply an entity for the requested archetype.
    /// Distinct from game-over silence: this is exhaustion or a pool that
    /// was never stocked.
    PoolUnavailable {
        /// Archetype the acquire was for.
        archetype: ArchetypeKey,
    },

    /// No camera and no externally maintained viewport rect exist; bounds
    /// checks cannot run.
    MissingViewport,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::EmptyStageList => {
                write!(f, "no difficulty stages configured (need at least one)")
            }
            CoreError::BadStageThreshold {
                index,
                threshold,
                previous,
            } => write!(
                f,
                "stage {} threshold {} is not above the previous threshold {} \
                 (first stage must be 0, later stages strictly increasing)",
                index, threshold, previous
            ),
            CoreError::InvalidGeometry {
                name,
                value,
                safe_range,
            } => write!(
                f,
                "geometry constant '{}' = {} is outside workable range {}",
                name, value, safe_range
            ),
            CoreError::InvalidWindow { name, min, max } => write!(
                f,
                "tuning window '{}' = [{}, {}] is invalid (need 0 ≤ min ≤ max)",
                name, min, max
            ),
            CoreError::PoolUnavailable { archetype } => {
                write!(f, "pool cannot supply an entity for {:?}", archetype)
            }
            CoreError::MissingViewport => write!(
                f,
                "no 2D camera found and no viewport bounds supplied; bounds checks disabled"
            ),
        }
    }
}

impl std::error::Error for CoreError {}

/// Convenience alias: a `Result` using `CoreError` as the error type.
pub type CoreResult<T> = Result<T, CoreError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Checks the difficulty stage ordering rule: the list is non-empty, the
/// first threshold is 0, and every later threshold is strictly greater than
/// its predecessor.
pub fn validate_stage_thresholds(thresholds: &[u32]) -> CoreResult<()> {
    if thresholds.is_empty() {
        return Err(CoreError::EmptyStageList);
    }
    if thresholds[0] != 0 {
        return Err(CoreError::BadStageThreshold {
            index: 0,
            threshold: thresholds[0],
            previous: 0,
        });
    }
    for (index, pair) in thresholds.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(CoreError::BadStageThreshold {
                index: index + 1,
                threshold: pair[1],
                previous: pair[0],
            });
        }
    }
    Ok(())
}

/// Checks that a pair split interval is non-empty: two minimum-scale halves
/// plus the gap must not exceed the whole axis.
pub fn validate_pair_geometry(minimum_scale: f32, gap: f32) -> CoreResult<()> {
    if minimum_scale <= 0.0 {
        return Err(CoreError::InvalidGeometry {
            name: "minimum_scale",
            value: minimum_scale,
            safe_range: "(0.0, 0.5)",
        });
    }
    if gap <= 0.0 || 2.0 * minimum_scale + gap >= 1.0 {
        return Err(CoreError::InvalidGeometry {
            name: "pair_gap",
            value: gap,
            safe_range: "(0.0, 1.0 − 2 × minimum_scale)",
        });
    }
    Ok(())
}

/// Checks a `[min, max]` tuning window: non-negative and not inverted.
/// Drawing a uniform value from an inverted window panics, so these are
/// rejected at load time instead.
pub fn validate_window(name: &'static str, min: f32, max: f32) -> CoreResult<()> {
    if min < 0.0 || !(min <= max) {
        return Err(CoreError::InvalidWindow { name, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_thresholds_accept_canonical_list() {
        assert!(validate_stage_thresholds(&[0, 100, 300]).is_ok());
    }

    #[test]
    fn stage_thresholds_reject_empty_list() {
        assert_eq!(validate_stage_thresholds(&[]), Err(CoreError::EmptyStageList));
    }

    #[test]
    fn stage_thresholds_reject_nonzero_first_stage() {
        assert!(matches!(
            validate_stage_thresholds(&[10, 100]),
            Err(CoreError::BadStageThreshold { index: 0, .. })
        ));
    }

    #[test]
    fn stage_thresholds_reject_plateau() {
        assert!(matches!(
            validate_stage_thresholds(&[0, 100, 100]),
            Err(CoreError::BadStageThreshold { index: 2, .. })
        ));
    }

    #[test]
    fn pair_geometry_accepts_both_tuned_orientations() {
        use crate::constants::*;
        assert!(validate_pair_geometry(OBSTACLE_MINIMUM_SCALE, HORIZONTAL_PAIR_GAP).is_ok());
        assert!(validate_pair_geometry(OBSTACLE_MINIMUM_SCALE, VERTICAL_PAIR_GAP).is_ok());
    }

    #[test]
    fn pair_geometry_rejects_overfull_axis() {
        // 0.3 + 0.3 + 0.5 > 1: no room for a valid split.
        assert!(validate_pair_geometry(0.3, 0.5).is_err());
    }

    #[test]
    fn windows_accept_degenerate_and_ordered_ranges() {
        assert!(validate_window("window", 1.0, 1.0).is_ok());
        assert!(validate_window("window", 0.0, 2.0).is_ok());
    }

    #[test]
    fn windows_reject_inverted_and_negative_ranges() {
        assert!(matches!(
            validate_window("window", 5.0, 1.0),
            Err(CoreError::InvalidWindow { min, max, .. }) if min == 5.0 && max == 1.0
        ));
        assert!(validate_window("window", -1.0, 1.0).is_err());
    }
}
