//! Spawn-chain controllers.
//!
//! A controller owns a cadence and at most one live entity. It waits, asks
//! the pool for an entity, configures and activates it, and re-arms itself
//! when that entity's removal signal comes back — a self-sustaining chain
//! that keeps exactly one outstanding spawn per controller. The projectile
//! variant runs a continuous timer loop instead of chaining off removals.
//!
//! Coroutine-style waits are plain data here: a controller in `Waiting`
//! holds a remaining-seconds value that [`tick_spawn_waits`] counts down
//! each tick. Faults are isolated by construction — every controller owns
//! independent state, so a halted chain never affects its siblings.

pub mod enemy;
pub mod obstacle;
pub mod projectile;

pub use enemy::EnemyChain;
pub use obstacle::ObstacleChain;
pub use projectile::TimedLoop;

use bevy::prelude::*;
use rand::{thread_rng, Rng};

use crate::config::SpawnConfig;
use crate::obstacle::PairGenerator;
use crate::pool::{ArchetypeKey, Recycled, SpawnPool};
use crate::session::{GameOver, SessionStarted};
use crate::viewport::ViewportBounds;

/// Controller state machine.
///
/// `Idle` is both the pre-start state and the permanent post-game-over
/// state; `Halted` is the permanent pool-exhaustion state. Neither halts the
/// rest of the scene, and neither self-recovers — only a fresh
/// [`SessionStarted`] re-arms a stopped controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainPhase {
    #[default]
    Idle,
    /// Counting down `wait_remaining` seconds.
    Waiting,
    /// Wait expired; the variant system attempts one spawn this tick.
    Spawning,
    /// A live entity is out; waiting for its removal signal.
    ChainArmed,
    /// Pool exhaustion stopped this chain for the rest of the session.
    Halted,
}

/// Cadence and chain state shared by every controller variant.
///
/// `delay` is the difficulty-managed knob: the progression controller
/// rewrites it as `baseline × multiplier`. `owned` is the single-slot chain
/// listener — replacing it on each spawn is the unsubscribe-then-subscribe
/// step, so removal signals from an earlier entity can never cross-talk.
#[derive(Component, Debug, Clone)]
pub struct SpawnController {
    pub key: ArchetypeKey,
    /// Live cadence value (seconds). Rewritten by difficulty progression.
    pub delay: f32,
    pub phase: ChainPhase,
    pub wait_remaining: f32,
    /// The currently-owned live entity whose removal re-arms this chain.
    pub owned: Option<Entity>,
}

impl SpawnController {
    pub fn new(key: ArchetypeKey, delay: f32) -> Self {
        Self {
            key,
            delay,
            phase: ChainPhase::Idle,
            wait_remaining: 0.0,
            owned: None,
        }
    }

    /// Enters `Waiting` for `seconds`.
    pub fn begin_wait(&mut self, seconds: f32) {
        self.phase = ChainPhase::Waiting;
        self.wait_remaining = seconds;
    }
}

/// Uniform draw from a `[min, max]` window stored as a `Vec2`.
pub(crate) fn draw_window(window: Vec2, rng: &mut impl Rng) -> f32 {
    rng.gen_range(window.x..=window.y)
}

/// Registers the three controller variants and the shared chain systems.
pub struct SpawnerPlugin;

impl Plugin for SpawnerPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_core_sets(app);
        app.init_resource::<SpawnConfig>()
            .init_resource::<SpawnPool>()
            .init_resource::<GameOver>()
            .init_resource::<ViewportBounds>()
            .add_message::<SessionStarted>()
            .add_message::<Recycled>()
            .add_systems(
                Update,
                (arm_on_session_start, rearm_chains, tick_spawn_waits)
                    .chain()
                    .in_set(crate::CoreSet::Chain),
            )
            .add_systems(
                Update,
                (
                    enemy::spawn_enemies,
                    obstacle::spawn_obstacles,
                    projectile::run_timed_loops,
                )
                    .in_set(crate::CoreSet::Spawn),
            );
    }
}

/// Arms every controller's first wait when the host starts (or restarts) a
/// session. Also clears any stale owned slot and re-rolls obstacle generator
/// parity, so a restart looks like a fresh scene.
pub fn arm_on_session_start(
    mut starts: MessageReader<SessionStarted>,
    mut controllers: Query<(
        &mut SpawnController,
        Option<&EnemyChain>,
        Option<&mut ObstacleChain>,
        Option<&TimedLoop>,
    )>,
) {
    if starts.is_empty() {
        return;
    }
    starts.clear();

    let mut rng = thread_rng();
    for (mut controller, enemy, obstacle, timed) in &mut controllers {
        controller.owned = None;
        if let Some(chain) = enemy {
            controller.begin_wait(draw_window(chain.window, &mut rng));
        } else if let Some(mut chain) = obstacle {
            chain.generator = PairGenerator::new(&mut rng);
            let delay = controller.delay;
            controller.begin_wait(delay);
        } else if let Some(timer) = timed {
            let initial = if timer.initial == Vec2::ZERO {
                0.0
            } else {
                draw_window(timer.initial, &mut rng)
            };
            let delay = controller.delay;
            controller.begin_wait(initial + timer.next_interval(delay, &mut rng));
        } else {
            let delay = controller.delay;
            controller.begin_wait(delay);
        }
    }
}

/// Reacts to removal signals: the controller owning the recycled entity
/// drops its slot and re-arms per its variant's cadence policy — enemies
/// draw a fresh wait from their window, obstacles respawn immediately.
///
/// The game-over check here is deliberate even though the signal emitter
/// already suppresses during game over; the two guards are independent.
pub fn rearm_chains(
    mut recycled: MessageReader<Recycled>,
    game_over: Res<GameOver>,
    mut controllers: Query<(&mut SpawnController, Option<&EnemyChain>)>,
) {
    let mut rng = thread_rng();
    for signal in recycled.read() {
        for (mut controller, enemy) in &mut controllers {
            if controller.owned != Some(signal.entity)
                || controller.phase != ChainPhase::ChainArmed
            {
                continue;
            }
            controller.owned = None;
            if game_over.0 {
                controller.phase = ChainPhase::Idle;
                continue;
            }
            match enemy {
                Some(chain) => {
                    let window = chain.window;
                    controller.begin_wait(draw_window(window, &mut rng));
                }
                None => controller.phase = ChainPhase::Spawning,
            }
        }
    }
}

/// Counts down every waiting controller; an expired wait becomes a spawn
/// attempt handled by the variant systems later this tick.
pub fn tick_spawn_waits(time: Res<Time>, mut controllers: Query<&mut SpawnController>) {
    for mut controller in &mut controllers {
        if controller.phase != ChainPhase::Waiting {
            continue;
        }
        controller.wait_remaining -= time.delta_secs();
        if controller.wait_remaining <= 0.0 {
            controller.wait_remaining = 0.0;
            controller.phase = ChainPhase::Spawning;
        }
    }
}
