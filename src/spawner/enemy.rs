//! Enemy chain variant: removal-triggered respawn with a randomised wait.

use bevy::prelude::*;
use rand::thread_rng;

use crate::config::SpawnConfig;
use crate::placement::random_point_within;
use crate::pool::{Active, ArchetypeKey, BaseSize, SpawnPool};
use crate::session::GameOver;
use crate::viewport::ViewportBounds;

use super::{ChainPhase, SpawnController};

/// Marks a controller as the enemy variant and carries its randomised wait
/// window. Every wait (initial and post-removal) draws from the window; the
/// controller's `delay` field stays the difficulty knob.
#[derive(Component, Debug, Clone, Copy)]
pub struct EnemyChain {
    /// `[min, max]` seconds between an enemy's removal and its respawn.
    pub window: Vec2,
}

impl EnemyChain {
    /// Controller bundle with config-supplied cadence.
    pub fn controller(config: &SpawnConfig) -> (SpawnController, EnemyChain) {
        (
            SpawnController::new(ArchetypeKey::Enemy, config.enemy_spawn_delay),
            EnemyChain {
                window: Vec2::new(config.enemy_window_min, config.enemy_window_max),
            },
        )
    }
}

/// Attempts one spawn for every enemy controller whose wait expired.
///
/// Game over parks the controller in permanent `Idle`; pool exhaustion parks
/// it in `Halted`. On success the enemy is placed at a random point fully
/// inside the viewport, activated, and the chain arms on its removal signal.
pub fn spawn_enemies(
    mut commands: Commands,
    game_over: Res<GameOver>,
    bounds: Res<ViewportBounds>,
    mut pool: ResMut<SpawnPool>,
    mut controllers: Query<(&mut SpawnController, &EnemyChain)>,
    mut placements: Query<(&mut Transform, Option<&BaseSize>)>,
) {
    let mut rng = thread_rng();
    for (mut controller, _chain) in &mut controllers {
        if controller.phase != ChainPhase::Spawning {
            continue;
        }
        if game_over.0 {
            controller.phase = ChainPhase::Idle;
            continue;
        }
        match pool.acquire(controller.key) {
            Ok(entity) => {
                if let Ok((mut transform, base)) = placements.get_mut(entity) {
                    let half =
                        base.copied().unwrap_or_default().0 * transform.scale.truncate() / 2.0;
                    transform.translation =
                        random_point_within(bounds.0, half, &mut rng).extend(0.0);
                }
                commands.entity(entity).insert(Active);
                controller.owned = Some(entity);
                controller.phase = ChainPhase::ChainArmed;
            }
            Err(err) => {
                warn!("enemy chain stopped: {err}");
                controller.phase = ChainPhase::Halted;
            }
        }
    }
}
