//! Centralised spawn and difficulty tuning constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! Runtime overrides come from `assets/spawn.toml` via
//! [`crate::config::SpawnConfig`]; this file remains the authoritative
//! default source.

// ── Viewport ─────────────────────────────────────────────────────────────────

/// World-unit inflation applied to the viewport rect on all sides before any
/// bounds check.
///
/// An entity counts as "on screen" while inside the inflated rect, so spawns
/// placed just past a screen edge register as entered one margin-width early
/// and are not recycled the instant they appear.
pub const BOUNDS_MARGIN: f32 = 1.0;

// ── Obstacle Pair Geometry ───────────────────────────────────────────────────

/// Thickness of an obstacle half along its travel axis, as a fraction of the
/// scale basis (screen height for horizontal pairs, screen width for
/// vertical).
pub const OBSTACLE_THICKNESS: f32 = 0.02;

/// Smallest fraction of the variable axis either half of a pair may occupy.
///
/// Keeps both halves visible: a randomly drawn split can never shrink one
/// half to a sliver. Must satisfy `2 × minimum + gap < 1` for both gap
/// constants or the split interval is empty.
pub const OBSTACLE_MINIMUM_SCALE: f32 = 0.05;

/// Fraction of the screen height left open between the halves of a
/// horizontal pair (the corridor the player dodges through).
pub const HORIZONTAL_PAIR_GAP: f32 = 0.35;

/// Fraction of the screen width left open between the halves of a vertical
/// pair. Wider than the horizontal gap: vertical pairs also move faster.
pub const VERTICAL_PAIR_GAP: f32 = 0.45;

/// Movement speed range (world units/s) for horizontal pairs.
pub const HORIZONTAL_SPEED_MIN: f32 = 1.0;
pub const HORIZONTAL_SPEED_MAX: f32 = 1.5;

/// Movement speed range (world units/s) for vertical pairs.
pub const VERTICAL_SPEED_MIN: f32 = 1.0;
pub const VERTICAL_SPEED_MAX: f32 = 2.0;

// ── Spawn Cadence ────────────────────────────────────────────────────────────

/// Enemy baseline delay (s). This is the difficulty-managed knob; actual
/// waits are drawn from the window below.
pub const ENEMY_SPAWN_DELAY: f32 = 2.0;

/// Randomised wait window (s) between an enemy's removal and its respawn.
pub const ENEMY_WINDOW_MIN: f32 = 1.0;
pub const ENEMY_WINDOW_MAX: f32 = 3.0;

/// Obstacle baseline delay (s), applied once before the first spawn; after
/// that the chain respawns immediately on removal.
pub const OBSTACLE_SPAWN_DELAY: f32 = 1.0;

/// Point pickup interval (s). Points spawn on a fixed timer loop; this value
/// is the difficulty-managed knob.
pub const POINT_SPAWN_DELAY: f32 = 1.0;

/// Randomised interval window (s) between projectile spawn attempts.
pub const PROJECTILE_INTERVAL_MIN: f32 = 2.0;
pub const PROJECTILE_INTERVAL_MAX: f32 = 10.0;

/// Optional randomised delay window (s) before the projectile loop starts.
/// Both zero disables the initial wait.
pub const PROJECTILE_INITIAL_MIN: f32 = 0.0;
pub const PROJECTILE_INITIAL_MAX: f32 = 0.0;

/// Probability that an elapsed projectile interval actually spawns.
pub const PROJECTILE_SPAWN_CHANCE: f32 = 0.5;
