//! Spawn, recycle, and difficulty core for a 2D avoidance arcade game.
//!
//! The crate orchestrates transient gameplay entities: it spawns them on a
//! cadence, watches their on-screen lifetime through a viewport bounds
//! detector, recycles them through a shared pool, chains the next spawn off
//! the recycle signal, and speeds the whole thing up as the score climbs.
//!
//! The host game owns everything visual and physical (sprites, colliders,
//! movement integration, menus). It stocks the [`pool::SpawnPool`] with
//! dormant entities at scene setup, writes [`session::SessionStarted`] when
//! play begins, and bumps [`session::GameScore`] / [`session::GameOver`] as
//! the session unfolds. Everything else happens here.
//!
//! Add [`AvoidancePlugin`] for the full core, or the per-module plugins for
//! a subset.

use bevy::prelude::*;

pub mod bounds;
pub mod config;
pub mod constants;
pub mod difficulty;
pub mod error;
pub mod obstacle;
pub mod placement;
pub mod pool;
pub mod session;
pub mod spawner;
pub mod testing;
pub mod viewport;

/// Per-tick phases of the core, executed in declaration order.
///
/// The chain guarantees that a bounds transition observed this tick is acted
/// on this tick: leave-viewport → recycle → removal signal → chain re-arm →
/// wait tick → spawn, all before the difficulty check.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreSet {
    /// Refresh the world-space viewport rect from the camera.
    Viewport,
    /// Reset latch state for entities activated since the last tick, before
    /// their first bounds evaluation.
    Activate,
    /// Evaluate enter/leave latches for every active entity.
    Bounds,
    /// Deactivate out-of-view entities, release them, emit removal signals.
    Recycle,
    /// React to removal signals and session start; tick spawn waits.
    Chain,
    /// Variant spawn systems: acquire, configure, activate.
    Spawn,
    /// Score-driven stage progression and cadence rewrite.
    Difficulty,
}

/// Orders [`CoreSet`] in the `Update` schedule.
///
/// Every per-module plugin calls this so each one also works standalone;
/// repeated configuration only restates the same constraints.
pub(crate) fn configure_core_sets(app: &mut App) {
    app.configure_sets(
        Update,
        (
            CoreSet::Viewport,
            CoreSet::Activate,
            CoreSet::Bounds,
            CoreSet::Recycle,
            CoreSet::Chain,
            CoreSet::Spawn,
            CoreSet::Difficulty,
        )
            .chain(),
    );
}

/// Umbrella plugin: the whole spawn/recycle/difficulty core.
pub struct AvoidancePlugin;

impl Plugin for AvoidancePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            config::SpawnConfigPlugin,
            session::SessionPlugin,
            viewport::ViewportPlugin,
            pool::PoolPlugin,
            bounds::BoundsPlugin,
            spawner::SpawnerPlugin,
            difficulty::DifficultyPlugin,
        ));
    }
}
