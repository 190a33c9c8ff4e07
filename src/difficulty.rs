//! Score-driven difficulty progression.
//!
//! The director watches the session score and walks an ordered stage list,
//! rewriting every managed controller's `delay` as
//! `captured baseline × stage multiplier`. Baselines are captured once at
//! startup, so reapplying a stage any number of times lands on the same
//! value — multipliers never compound. Advancement moves at most one stage
//! per tick; a score jump across several thresholds is caught up over the
//! following ticks.

use std::collections::HashMap;

use bevy::prelude::*;
use serde::Deserialize;

use crate::config::SpawnConfig;
use crate::error::validate_stage_thresholds;
use crate::pool::ArchetypeKey;
use crate::session::GameScore;
use crate::spawner::SpawnController;

/// One difficulty tier: the total score that unlocks it and the cadence
/// multipliers it applies (smaller = faster).
#[derive(Debug, Clone, Deserialize)]
pub struct DifficultyStage {
    #[serde(default)]
    pub name: String,
    /// Total collected score required to reach this stage. The first stage
    /// must sit at 0; later thresholds are strictly increasing.
    pub score_threshold: u32,
    #[serde(default = "neutral_multiplier")]
    pub point_multiplier: f32,
    #[serde(default = "neutral_multiplier")]
    pub obstacle_multiplier: f32,
    #[serde(default = "neutral_multiplier")]
    pub enemy_multiplier: f32,
}

fn neutral_multiplier() -> f32 {
    1.0
}

/// Built-in three-stage curve: neutral start, twice the pace at 100 points,
/// four times at 300.
pub fn default_stages() -> Vec<DifficultyStage> {
    let stage = |name: &str, score_threshold: u32, multiplier: f32| DifficultyStage {
        name: name.to_string(),
        score_threshold,
        point_multiplier: multiplier,
        obstacle_multiplier: multiplier,
        enemy_multiplier: multiplier,
    };
    vec![
        stage("warm-up", 0, 1.0),
        stage("crowded", 100, 0.5),
        stage("frantic", 300, 0.25),
    ]
}

/// Progression state: current stage plus the per-controller baseline delays
/// captured at startup.
#[derive(Resource, Default, Debug)]
pub struct DifficultyDirector {
    initialized: bool,
    enabled: bool,
    /// Index into the stage list. Only ever advances during a session.
    pub stage_index: usize,
    baselines: HashMap<Entity, f32>,
}

impl DifficultyDirector {
    /// False after a fatal configuration fault disabled progression.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Baseline delay on record for a controller, including a fallback
    /// recorded for one that appeared after startup capture.
    pub fn baseline_of(&self, entity: Entity) -> Option<f32> {
        self.baselines.get(&entity).copied()
    }
}

/// Registers the director and its per-tick systems.
pub struct DifficultyPlugin;

impl Plugin for DifficultyPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_core_sets(app);
        app.init_resource::<SpawnConfig>()
            .init_resource::<GameScore>()
            .init_resource::<DifficultyDirector>()
            .add_systems(
                Update,
                (init_difficulty, difficulty_progression)
                    .chain()
                    .in_set(crate::CoreSet::Difficulty),
            );
    }
}

/// One-time setup on the first tick: validate the stage list, capture every
/// managed controller's baseline delay, and apply the first stage.
///
/// An invalid stage list is a fatal configuration fault: it is reported once
/// and the director stays disabled rather than operating with undefined
/// stage state.
pub fn init_difficulty(
    mut director: ResMut<DifficultyDirector>,
    config: Res<SpawnConfig>,
    mut controllers: Query<(Entity, &mut SpawnController)>,
) {
    if director.initialized {
        return;
    }
    director.initialized = true;

    let thresholds: Vec<u32> = config.stages.iter().map(|s| s.score_threshold).collect();
    if let Err(err) = validate_stage_thresholds(&thresholds) {
        error!("difficulty progression disabled: {err}");
        return;
    }

    let mut managed = [false; 3];
    for (entity, controller) in controllers.iter() {
        let index = match controller.key {
            ArchetypeKey::Point => 0,
            ArchetypeKey::Enemy => 1,
            ArchetypeKey::Obstacle => 2,
            ArchetypeKey::Projectile => continue,
        };
        managed[index] = true;
        director.baselines.insert(entity, controller.delay);
    }
    for (present, label) in managed.into_iter().zip(["point", "enemy", "obstacle"]) {
        if !present {
            warn!("no {label} spawn controller assigned to difficulty progression");
        }
    }

    director.enabled = true;
    apply_stage(&config.stages[0], &mut director.baselines, &mut controllers);
}

/// Per-tick progression check: while not at the final stage and the score
/// has reached the next threshold, advance exactly one stage and reapply
/// all multipliers from the captured baselines.
pub fn difficulty_progression(
    mut director: ResMut<DifficultyDirector>,
    config: Res<SpawnConfig>,
    score: Res<GameScore>,
    mut controllers: Query<(Entity, &mut SpawnController)>,
) {
    if !director.enabled {
        return;
    }
    // Boundary policy for external stage-list mutation: clamp, don't fault.
    if director.stage_index >= config.stages.len() {
        let Some(last) = config.stages.len().checked_sub(1) else {
            error!("difficulty stage list emptied at runtime; progression disabled");
            director.enabled = false;
            return;
        };
        warn!("difficulty stage index out of range; clamping to final stage");
        director.stage_index = last;
    }

    if director.stage_index + 1 >= config.stages.len() {
        return;
    }
    let next = &config.stages[director.stage_index + 1];
    if score.points < next.score_threshold {
        return;
    }

    director.stage_index += 1;
    let stage = &config.stages[director.stage_index];
    info!(
        "difficulty advanced to stage '{}' (score {})",
        stage.name, score.points
    );
    apply_stage(stage, &mut director.baselines, &mut controllers);
}

/// Rewrites every managed controller's cadence as baseline × multiplier.
///
/// Always multiplies the captured baseline, never the live delay, so
/// reapplication is idempotent. A controller that appeared after capture
/// degrades to a fallback baseline of 1.0, recorded on first sight so the
/// diagnostic fires once per controller — never an error.
fn apply_stage(
    stage: &DifficultyStage,
    baselines: &mut HashMap<Entity, f32>,
    controllers: &mut Query<(Entity, &mut SpawnController)>,
) {
    for (entity, mut controller) in controllers.iter_mut() {
        let multiplier = match controller.key {
            ArchetypeKey::Point => stage.point_multiplier,
            ArchetypeKey::Enemy => stage.enemy_multiplier,
            ArchetypeKey::Obstacle => stage.obstacle_multiplier,
            // Projectiles keep their own cadence regardless of stage.
            ArchetypeKey::Projectile => continue,
        };
        let baseline = *baselines.entry(entity).or_insert_with(|| {
            warn!("controller {entity:?} has no captured baseline; using 1.0");
            1.0
        });
        controller.delay = baseline * multiplier;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stages_0_100_300() -> Vec<DifficultyStage> {
        default_stages()
    }

    fn difficulty_app(stages: Vec<DifficultyStage>) -> App {
        let mut app = App::new();
        app.add_plugins(DifficultyPlugin);
        let mut config = SpawnConfig::default();
        config.stages = stages;
        app.insert_resource(config);
        app
    }

    fn spawn_enemy_controller(app: &mut App, delay: f32) -> Entity {
        app.world_mut()
            .spawn(SpawnController::new(ArchetypeKey::Enemy, delay))
            .id()
    }

    fn delay_of(app: &App, entity: Entity) -> f32 {
        app.world().get::<SpawnController>(entity).unwrap().delay
    }

    fn set_score(app: &mut App, points: u32) {
        app.world_mut().resource_mut::<GameScore>().points = points;
    }

    #[test]
    fn canonical_score_sequence_yields_expected_delays() {
        let mut app = difficulty_app(stages_0_100_300());
        let controller = spawn_enemy_controller(&mut app, 2.0);

        let expectations = [
            (0, 2.0),
            (50, 2.0),
            (100, 1.0),
            (250, 1.0),
            (300, 0.5),
            (999, 0.5),
        ];
        for (score, expected) in expectations {
            set_score(&mut app, score);
            app.update();
            assert!(
                (delay_of(&app, controller) - expected).abs() < 1e-6,
                "score {score} should apply delay {expected}"
            );
        }
    }

    #[test]
    fn multi_threshold_jump_advances_one_stage_per_tick() {
        let mut app = difficulty_app(stages_0_100_300());
        let controller = spawn_enemy_controller(&mut app, 2.0);
        app.update();

        set_score(&mut app, 999);
        app.update();
        assert!((delay_of(&app, controller) - 1.0).abs() < 1e-6);
        app.update();
        assert!((delay_of(&app, controller) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn reapplication_is_idempotent_and_never_mutates_the_baseline() {
        let mut app = difficulty_app(stages_0_100_300());
        let controller = spawn_enemy_controller(&mut app, 2.0);

        set_score(&mut app, 100);
        for _ in 0..20 {
            app.update();
        }
        assert!((delay_of(&app, controller) - 1.0).abs() < 1e-6);

        set_score(&mut app, 300);
        app.update();
        // 0.25 × the untouched baseline 2.0, not 0.25 × the live 1.0.
        assert!((delay_of(&app, controller) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn stage_index_never_decreases() {
        let mut app = difficulty_app(stages_0_100_300());
        let controller = spawn_enemy_controller(&mut app, 2.0);
        set_score(&mut app, 300);
        app.update();
        app.update();

        // Host resets the score (e.g. display glitch); progression holds.
        set_score(&mut app, 0);
        app.update();
        assert_eq!(app.world().resource::<DifficultyDirector>().stage_index, 2);
        assert!((delay_of(&app, controller) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn empty_stage_list_disables_progression() {
        let mut app = difficulty_app(Vec::new());
        let controller = spawn_enemy_controller(&mut app, 2.0);
        set_score(&mut app, 10_000);
        app.update();
        app.update();

        assert!(!app.world().resource::<DifficultyDirector>().is_enabled());
        assert_eq!(delay_of(&app, controller), 2.0);
    }

    #[test]
    fn out_of_range_index_clamps_to_final_stage() {
        let mut app = difficulty_app(stages_0_100_300());
        spawn_enemy_controller(&mut app, 2.0);
        app.update();

        app.world_mut()
            .resource_mut::<DifficultyDirector>()
            .stage_index = 42;
        app.update();
        assert_eq!(app.world().resource::<DifficultyDirector>().stage_index, 2);
    }

    #[test]
    fn late_controller_degrades_to_fallback_baseline() {
        let mut app = difficulty_app(stages_0_100_300());
        spawn_enemy_controller(&mut app, 2.0);
        app.update(); // baselines captured

        // Appears after capture: no baseline on record.
        let late = spawn_enemy_controller(&mut app, 7.0);
        set_score(&mut app, 100);
        app.update();
        assert!((delay_of(&app, late) - 0.5).abs() < 1e-6, "1.0 fallback × 0.5");
    }

    #[test]
    fn fallback_baseline_is_recorded_on_first_miss() {
        let mut app = difficulty_app(stages_0_100_300());
        spawn_enemy_controller(&mut app, 2.0);
        app.update(); // baselines captured

        let late = spawn_enemy_controller(&mut app, 7.0);
        set_score(&mut app, 100);
        app.update();
        // The first miss put the fallback on record; later stages reuse it
        // without re-reporting.
        assert_eq!(
            app.world()
                .resource::<DifficultyDirector>()
                .baseline_of(late),
            Some(1.0)
        );
        set_score(&mut app, 300);
        app.update();
        assert!((delay_of(&app, late) - 0.25).abs() < 1e-6);
    }

    #[test]
    fn projectile_controllers_are_not_difficulty_managed() {
        let mut app = difficulty_app(stages_0_100_300());
        let projectile = app
            .world_mut()
            .spawn(SpawnController::new(ArchetypeKey::Projectile, 3.0))
            .id();
        set_score(&mut app, 300);
        app.update();
        app.update();
        assert_eq!(delay_of(&app, projectile), 3.0);
    }
}
