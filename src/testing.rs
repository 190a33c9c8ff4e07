//! Headless test harness for the spawn core.
//!
//! Builds minimal apps with the core plugins, a hand-advanced [`Time`] (so
//! waits elapse exactly as the test dictates), and a fixed viewport rect.
//! Also provides pool-stocking and controller-spawning helpers shared by the
//! module tests and the integration suite.

use std::time::Duration;

use bevy::prelude::*;
use rand::thread_rng;

use crate::bounds::{BoundsPlugin, BoundsTracker};
use crate::difficulty::DifficultyPlugin;
use crate::obstacle::{ObstacleRig, PairGenerator};
use crate::pool::{
    ArchetypeKey, BaseSize, PoolKey, PoolPlugin, RecycleOutOfView, SpawnPool,
};
use crate::session::{SessionPlugin, SessionStarted};
use crate::spawner::{
    EnemyChain, ObstacleChain, SpawnController, SpawnerPlugin, TimedLoop,
};
use crate::viewport::{ViewportBounds, ViewportPlugin};

/// Viewport rect used by every harness app: 16×10 world units around the
/// origin.
pub fn test_view() -> Rect {
    Rect::new(-8.0, -5.0, 8.0, 5.0)
}

/// Full headless core: every plugin, a manual clock, and a valid viewport.
pub fn core_app() -> App {
    let mut app = App::new();
    app.insert_resource(Time::<()>::default());
    app.add_plugins((
        SessionPlugin,
        ViewportPlugin,
        PoolPlugin,
        BoundsPlugin,
        SpawnerPlugin,
        DifficultyPlugin,
    ));
    app.insert_resource(ViewportBounds(test_view()));
    app
}

/// Advances the manual clock by `seconds` and runs one frame.
pub fn step(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

/// Writes the host's session-start trigger.
pub fn start_session(app: &mut App) {
    app.world_mut().write_message(SessionStarted);
}

/// Drains all pending messages of one kind.
pub fn drain_messages<T: Message>(app: &mut App) -> Vec<T> {
    app.world_mut()
        .resource_mut::<Messages<T>>()
        .drain()
        .collect()
}

/// Stocks `count` dormant single-entity archetype instances: pooled,
/// tracked, and recycled when they leave the viewport.
pub fn stock_simple(app: &mut App, key: ArchetypeKey, count: usize) -> Vec<Entity> {
    let mut entities = Vec::new();
    for _ in 0..count {
        let entity = app
            .world_mut()
            .spawn((
                PoolKey(key),
                BaseSize(Vec2::ONE),
                Transform::default(),
                BoundsTracker::default(),
                RecycleOutOfView,
            ))
            .id();
        app.world_mut()
            .resource_mut::<SpawnPool>()
            .stock(key, entity);
        entities.push(entity);
    }
    entities
}

/// Stocks one dormant obstacle rig: a tracked root with two half children.
pub fn stock_obstacle_rig(app: &mut App) -> Entity {
    let world = app.world_mut();
    let first = world.spawn((Transform::default(), BaseSize(Vec2::ONE))).id();
    let second = world.spawn((Transform::default(), BaseSize(Vec2::ONE))).id();
    let root = world
        .spawn((
            PoolKey(ArchetypeKey::Obstacle),
            Transform::default(),
            BoundsTracker::default(),
            RecycleOutOfView,
            ObstacleRig { first, second },
        ))
        .id();
    world.entity_mut(root).add_children(&[first, second]);
    world
        .resource_mut::<SpawnPool>()
        .stock(ArchetypeKey::Obstacle, root);
    root
}

/// Spawns an enemy-chain controller with a fixed-width wait window.
pub fn spawn_enemy_chain(app: &mut App, delay: f32, window: Vec2) -> Entity {
    app.world_mut()
        .spawn((
            SpawnController::new(ArchetypeKey::Enemy, delay),
            EnemyChain { window },
        ))
        .id()
}

/// Spawns an obstacle-chain controller with random generator parity.
pub fn spawn_obstacle_chain(app: &mut App, delay: f32) -> Entity {
    app.world_mut()
        .spawn((
            SpawnController::new(ArchetypeKey::Obstacle, delay),
            ObstacleChain {
                generator: PairGenerator::new(&mut thread_rng()),
            },
        ))
        .id()
}

/// Spawns a timer-loop controller.
pub fn spawn_timed_loop(
    app: &mut App,
    key: ArchetypeKey,
    delay: f32,
    between: Vec2,
    chance: f32,
) -> Entity {
    app.world_mut()
        .spawn((
            SpawnController::new(key, delay),
            TimedLoop {
                between,
                initial: Vec2::ZERO,
                chance,
            },
        ))
        .id()
}
