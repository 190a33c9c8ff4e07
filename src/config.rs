//! Runtime spawn configuration loaded from `assets/spawn.toml`.
//!
//! [`SpawnConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`] plus the difficulty stage list. At startup,
//! [`load_spawn_config`] reads `assets/spawn.toml` and overwrites the
//! defaults with any values present in the file. Missing keys fall back to
//! the compile-time defaults, so a minimal TOML can override just the values
//! you care about.
//!
//! Keep `src/constants.rs` in sync: it remains the authoritative default
//! source used by `SpawnConfig::default()`.

use bevy::prelude::*;
use serde::Deserialize;

use crate::constants::*;
use crate::difficulty::{default_stages, DifficultyStage};
use crate::error::{validate_pair_geometry, validate_window};

/// Runtime-tunable spawn and difficulty configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`. Override any subset by setting the value in
/// `assets/spawn.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    // ── Viewport ─────────────────────────────────────────────────────────────
    pub bounds_margin: f32,

    // ── Obstacle Pair Geometry ───────────────────────────────────────────────
    pub obstacle_thickness: f32,
    pub obstacle_minimum_scale: f32,
    pub horizontal_pair_gap: f32,
    pub vertical_pair_gap: f32,
    pub horizontal_speed_min: f32,
    pub horizontal_speed_max: f32,
    pub vertical_speed_min: f32,
    pub vertical_speed_max: f32,

    // ── Spawn Cadence ────────────────────────────────────────────────────────
    pub enemy_spawn_delay: f32,
    pub enemy_window_min: f32,
    pub enemy_window_max: f32,
    pub obstacle_spawn_delay: f32,
    pub point_spawn_delay: f32,
    pub projectile_interval_min: f32,
    pub projectile_interval_max: f32,
    pub projectile_initial_min: f32,
    pub projectile_initial_max: f32,
    pub projectile_spawn_chance: f32,

    // ── Difficulty ───────────────────────────────────────────────────────────
    /// Ordered stage list: first threshold 0, strictly increasing afterwards.
    pub stages: Vec<DifficultyStage>,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            // Viewport
            bounds_margin: BOUNDS_MARGIN,
            // Obstacle Pair Geometry
            obstacle_thickness: OBSTACLE_THICKNESS,
            obstacle_minimum_scale: OBSTACLE_MINIMUM_SCALE,
            horizontal_pair_gap: HORIZONTAL_PAIR_GAP,
            vertical_pair_gap: VERTICAL_PAIR_GAP,
            horizontal_speed_min: HORIZONTAL_SPEED_MIN,
            horizontal_speed_max: HORIZONTAL_SPEED_MAX,
            vertical_speed_min: VERTICAL_SPEED_MIN,
            vertical_speed_max: VERTICAL_SPEED_MAX,
            // Spawn Cadence
            enemy_spawn_delay: ENEMY_SPAWN_DELAY,
            enemy_window_min: ENEMY_WINDOW_MIN,
            enemy_window_max: ENEMY_WINDOW_MAX,
            obstacle_spawn_delay: OBSTACLE_SPAWN_DELAY,
            point_spawn_delay: POINT_SPAWN_DELAY,
            projectile_interval_min: PROJECTILE_INTERVAL_MIN,
            projectile_interval_max: PROJECTILE_INTERVAL_MAX,
            projectile_initial_min: PROJECTILE_INITIAL_MIN,
            projectile_initial_max: PROJECTILE_INITIAL_MAX,
            projectile_spawn_chance: PROJECTILE_SPAWN_CHANCE,
            // Difficulty
            stages: default_stages(),
        }
    }
}

/// Registers [`SpawnConfig`] and the startup loader.
pub struct SpawnConfigPlugin;

impl Plugin for SpawnConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnConfig>()
            .add_systems(Startup, load_spawn_config);
    }
}

/// Startup system: attempt to load `assets/spawn.toml` and overwrite the
/// `SpawnConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults. TOML parse errors are logged
/// but do not abort the game. A missing file is silently ignored (defaults
/// are already in place from `init_resource`). Loaded values that would make
/// the pair split interval empty, or an inverted `[min, max]` window, are
/// rejected in favour of the defaults.
pub fn load_spawn_config(mut config: ResMut<SpawnConfig>) {
    let path = "assets/spawn.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<SpawnConfig>(&contents) {
            Ok(loaded) => {
                if let Err(err) = loaded.check_geometry() {
                    error!("{path}: {err}; keeping compiled defaults");
                    return;
                }
                *config = loaded;
                info!("loaded spawn config from {path}");
            }
            Err(err) => {
                warn!("failed to parse {path}: {err}; using defaults");
            }
        },
        Err(_) => {
            // File not present — defaults are already in place; not an error.
            debug!("no {path} found; using compiled defaults");
        }
    }
}

impl SpawnConfig {
    /// Validates both orientation gap constants against the minimum scale,
    /// and every `[min, max]` tuning window.
    pub fn check_geometry(&self) -> crate::error::CoreResult<()> {
        validate_pair_geometry(self.obstacle_minimum_scale, self.horizontal_pair_gap)?;
        validate_pair_geometry(self.obstacle_minimum_scale, self.vertical_pair_gap)?;
        validate_window(
            "enemy_window",
            self.enemy_window_min,
            self.enemy_window_max,
        )?;
        validate_window(
            "projectile_interval",
            self.projectile_interval_min,
            self.projectile_interval_max,
        )?;
        validate_window(
            "projectile_initial",
            self.projectile_initial_min,
            self.projectile_initial_max,
        )?;
        validate_window(
            "horizontal_speed",
            self.horizontal_speed_min,
            self.horizontal_speed_max,
        )?;
        validate_window(
            "vertical_speed",
            self.vertical_speed_min,
            self.vertical_speed_max,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_mirror_constants() {
        let config = SpawnConfig::default();
        assert_eq!(config.bounds_margin, BOUNDS_MARGIN);
        assert_eq!(config.horizontal_pair_gap, HORIZONTAL_PAIR_GAP);
        assert_eq!(config.vertical_pair_gap, VERTICAL_PAIR_GAP);
        assert_eq!(config.enemy_spawn_delay, ENEMY_SPAWN_DELAY);
        assert_eq!(config.projectile_spawn_chance, PROJECTILE_SPAWN_CHANCE);
        assert!(!config.stages.is_empty());
        assert_eq!(config.stages[0].score_threshold, 0);
    }

    #[test]
    fn default_geometry_is_valid() {
        assert!(SpawnConfig::default().check_geometry().is_ok());
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let loaded: SpawnConfig = toml::from_str("enemy_spawn_delay = 4.5").unwrap();
        assert_eq!(loaded.enemy_spawn_delay, 4.5);
        assert_eq!(loaded.obstacle_spawn_delay, OBSTACLE_SPAWN_DELAY);
    }

    #[test]
    fn inverted_window_is_rejected_at_load() {
        let loaded: SpawnConfig =
            toml::from_str("enemy_window_min = 5.0\nenemy_window_max = 1.0").unwrap();
        assert!(loaded.check_geometry().is_err());
    }

    #[test]
    fn inverted_speed_range_is_rejected_at_load() {
        let loaded: SpawnConfig =
            toml::from_str("horizontal_speed_min = 2.0\nhorizontal_speed_max = 1.5").unwrap();
        assert!(loaded.check_geometry().is_err());
    }

    #[test]
    fn stage_list_is_loadable_from_toml() {
        let toml = r#"
            [[stages]]
            name = "calm"
            score_threshold = 0

            [[stages]]
            name = "busy"
            score_threshold = 50
            enemy_multiplier = 0.5
        "#;
        let loaded: SpawnConfig = toml::from_str(toml).unwrap();
        assert_eq!(loaded.stages.len(), 2);
        assert_eq!(loaded.stages[1].score_threshold, 50);
        assert_eq!(loaded.stages[1].enemy_multiplier, 0.5);
        // Unset multipliers default to neutral.
        assert_eq!(loaded.stages[1].point_multiplier, 1.0);
    }
}
