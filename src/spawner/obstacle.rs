//! Obstacle chain variant: geometry generation plus immediate respawn.
//!
//! The single pre-first-spawn wait uses the controller's `delay`; after
//! that, steady-state density is one pair at a time — each removal triggers
//! the next spawn in the same tick.

use bevy::prelude::*;
use rand::thread_rng;

use crate::config::SpawnConfig;
use crate::obstacle::{apply_plan, ObstacleRig, PairGenerator};
use crate::pool::{Active, ArchetypeKey, BaseSize, SpawnPool};
use crate::session::GameOver;
use crate::viewport::ViewportBounds;

use super::{ChainPhase, SpawnController};

/// Marks a controller as the obstacle variant and owns its pair generator.
/// The generator's parity is re-rolled on every session start.
#[derive(Component, Debug, Clone)]
pub struct ObstacleChain {
    pub generator: PairGenerator,
}

impl ObstacleChain {
    /// Controller bundle with config-supplied cadence and random parity.
    pub fn controller(config: &SpawnConfig) -> (SpawnController, ObstacleChain) {
        (
            SpawnController::new(ArchetypeKey::Obstacle, config.obstacle_spawn_delay),
            ObstacleChain {
                generator: PairGenerator::new(&mut thread_rng()),
            },
        )
    }
}

/// Attempts one spawn for every obstacle controller whose wait expired (or
/// whose chain fired this tick).
///
/// The drawn plan is applied to the rig — scales, edge positions, travel
/// parameters — before the root gains `Active`, so the pair never appears
/// mid-snap. A pooled root without an [`ObstacleRig`] is a stocking mistake:
/// the entity goes straight back and the chain halts.
#[allow(clippy::too_many_arguments)]
pub fn spawn_obstacles(
    mut commands: Commands,
    game_over: Res<GameOver>,
    bounds: Res<ViewportBounds>,
    config: Res<SpawnConfig>,
    mut pool: ResMut<SpawnPool>,
    mut controllers: Query<(&mut SpawnController, &mut ObstacleChain)>,
    rigs: Query<&ObstacleRig>,
    mut transforms: Query<&mut Transform>,
    sizes: Query<&BaseSize>,
) {
    let mut rng = thread_rng();
    for (mut controller, mut chain) in &mut controllers {
        if controller.phase != ChainPhase::Spawning {
            continue;
        }
        if game_over.0 {
            controller.phase = ChainPhase::Idle;
            continue;
        }
        match pool.acquire(controller.key) {
            Ok(root) => {
                let Ok(rig) = rigs.get(root) else {
                    warn!("pooled obstacle {root:?} has no rig; obstacle chain stopped");
                    pool.release(controller.key, root);
                    controller.phase = ChainPhase::Halted;
                    continue;
                };
                let plan = chain.generator.build(&config, &mut rng);
                apply_plan(
                    &plan,
                    bounds.0,
                    root,
                    rig,
                    &mut transforms,
                    &sizes,
                    &mut commands,
                );
                commands.entity(root).insert(Active);
                controller.owned = Some(root);
                controller.phase = ChainPhase::ChainArmed;
            }
            Err(err) => {
                warn!("obstacle chain stopped: {err}");
                controller.phase = ChainPhase::Halted;
            }
        }
    }
}
