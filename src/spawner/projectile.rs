//! Timer-loop variant: continuous rescheduling with a Bernoulli spawn gate.
//!
//! Unlike the chain variants, this loop never waits on a removal signal: it
//! waits a randomised interval, rolls against its spawn chance, spawns on
//! success, and re-arms either way. Both projectile and point controllers
//! use it — points with a fixed interval (the difficulty-managed `delay`)
//! and a certain spawn.

use bevy::prelude::*;
use rand::{thread_rng, Rng};

use crate::config::SpawnConfig;
use crate::placement::random_point_within;
use crate::pool::{Active, ArchetypeKey, BaseSize, SpawnPool};
use crate::session::GameOver;
use crate::viewport::ViewportBounds;

use super::{draw_window, ChainPhase, SpawnController};

/// Marks a controller as the timer-loop variant.
#[derive(Component, Debug, Clone, Copy)]
pub struct TimedLoop {
    /// `[min, max]` seconds between spawn attempts. All-zero means "use the
    /// controller's `delay` as a fixed interval" — the difficulty-managed
    /// mode the point archetype runs in.
    pub between: Vec2,
    /// Optional `[min, max]` extra wait before the loop's first attempt.
    /// All-zero disables it.
    pub initial: Vec2,
    /// Probability in `[0, 1]` that an elapsed interval actually spawns.
    pub chance: f32,
}

impl TimedLoop {
    /// Projectile controller bundle: randomised interval, coin-flip spawns.
    pub fn projectile_controller(config: &SpawnConfig) -> (SpawnController, TimedLoop) {
        (
            SpawnController::new(ArchetypeKey::Projectile, config.projectile_interval_min),
            TimedLoop {
                between: Vec2::new(config.projectile_interval_min, config.projectile_interval_max),
                initial: Vec2::new(config.projectile_initial_min, config.projectile_initial_max),
                chance: config.projectile_spawn_chance,
            },
        )
    }

    /// Point controller bundle: fixed difficulty-managed interval, certain
    /// spawn.
    pub fn point_controller(config: &SpawnConfig) -> (SpawnController, TimedLoop) {
        (
            SpawnController::new(ArchetypeKey::Point, config.point_spawn_delay),
            TimedLoop {
                between: Vec2::ZERO,
                initial: Vec2::ZERO,
                chance: 1.0,
            },
        )
    }

    /// Seconds until the next attempt.
    pub fn next_interval(&self, delay: f32, rng: &mut impl Rng) -> f32 {
        if self.between == Vec2::ZERO {
            delay
        } else {
            draw_window(self.between, rng)
        }
    }
}

/// Runs every timer-loop controller whose interval expired.
///
/// A failed Bernoulli roll skips the spawn but keeps the loop running; pool
/// exhaustion breaks the loop permanently. Game over parks the loop in
/// `Idle` like every other variant.
pub fn run_timed_loops(
    mut commands: Commands,
    game_over: Res<GameOver>,
    bounds: Res<ViewportBounds>,
    mut pool: ResMut<SpawnPool>,
    mut controllers: Query<(&mut SpawnController, &TimedLoop)>,
    mut placements: Query<(&mut Transform, Option<&BaseSize>)>,
) {
    let mut rng = thread_rng();
    for (mut controller, timer) in &mut controllers {
        if controller.phase != ChainPhase::Spawning {
            continue;
        }
        if game_over.0 {
            controller.phase = ChainPhase::Idle;
            continue;
        }
        if rng.gen::<f32>() > timer.chance {
            let wait = timer.next_interval(controller.delay, &mut rng);
            controller.begin_wait(wait);
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
                let wait = timer.next_interval(controller.delay, &mut rng);
                controller.begin_wait(wait);
            }
            Err(err) => {
                warn!("timer loop stopped: {err}");
                controller.phase = ChainPhase::Halted;
            }
        }
    }
}
