//! The pool collaborator contract: acquire/release of dormant entities and
//! the one-shot removal signal.
//!
//! The host stocks [`SpawnPool`] with dormant entities at scene setup; prefab
//! construction, visuals, and final destruction stay on the host's side.
//! This core only moves handles between "dormant" and "active". Activation
//! is the explicit last step of every spawn flow — [`SpawnPool::acquire`]
//! always hands back a still-dormant handle so placement and scaling finish
//! before anything becomes visible.

use std::collections::HashMap;

use bevy::prelude::*;

use crate::bounds::LeftViewport;
use crate::error::{CoreError, CoreResult};
use crate::session::GameOver;

/// The fixed catalog of spawnable entity kinds, mapped to pool stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchetypeKey {
    Point,
    Enemy,
    Obstacle,
    Projectile,
}

/// Which archetype's stock a pooled entity belongs to. Attached by the host
/// when stocking; read back on release.
#[derive(Component, Debug, Clone, Copy)]
pub struct PoolKey(pub ArchetypeKey);

/// Marker for a pooled entity that is currently live in the world.
///
/// Inserting it activates the entity; removing it (by any path — out-of-view
/// recycling here, or a host-side kill) deactivates it, releases it back to
/// the pool, and fires the removal signal.
#[derive(Component, Debug, Clone, Copy)]
pub struct Active;

/// Opt-in marker: recycle this entity as soon as its leave-viewport event
/// fires.
#[derive(Component, Debug, Clone, Copy)]
pub struct RecycleOutOfView;

/// Unscaled world extent of a pooled entity, host-supplied. Placement and
/// scaling math use it in place of renderer-derived sizes.
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseSize(pub Vec2);

impl Default for BaseSize {
    fn default() -> Self {
        Self(Vec2::ONE)
    }
}

/// Removal signal: fired exactly once when a live entity is deactivated,
/// unless the game is already over (suppressed so no chain re-arms after the
/// session ends).
#[derive(Message, Debug, Clone, Copy)]
pub struct Recycled {
    pub entity: Entity,
}

/// Per-archetype registry of dormant entity handles.
#[derive(Resource, Default, Debug)]
pub struct SpawnPool {
    dormant: HashMap<ArchetypeKey, Vec<Entity>>,
    acquire_attempts: HashMap<ArchetypeKey, u64>,
}

impl SpawnPool {
    /// Adds a dormant entity to an archetype's stock. Host-side, at scene
    /// setup or after constructing a replacement.
    pub fn stock(&mut self, key: ArchetypeKey, entity: Entity) {
        self.dormant.entry(key).or_default().push(entity);
    }

    /// Takes a dormant entity out of the stock.
    ///
    /// The handle comes back still dormant; the caller configures it and
    /// activates it by inserting [`Active`]. An empty or never-stocked
    /// archetype reports [`CoreError::PoolUnavailable`].
    pub fn acquire(&mut self, key: ArchetypeKey) -> CoreResult<Entity> {
        *self.acquire_attempts.entry(key).or_default() += 1;
        self.dormant
            .get_mut(&key)
            .and_then(Vec::pop)
            .ok_or(CoreError::PoolUnavailable { archetype: key })
    }

    /// Returns a deactivated entity to its archetype's stock.
    pub fn release(&mut self, key: ArchetypeKey, entity: Entity) {
        self.dormant.entry(key).or_default().push(entity);
    }

    /// Dormant entities currently held for an archetype.
    pub fn dormant_count(&self, key: ArchetypeKey) -> usize {
        self.dormant.get(&key).map_or(0, Vec::len)
    }

    /// Total [`acquire`](Self::acquire) calls seen for an archetype,
    /// successful or not. Lets tests verify a halted chain stays silent.
    pub fn acquire_attempts(&self, key: ArchetypeKey) -> u64 {
        self.acquire_attempts.get(&key).copied().unwrap_or(0)
    }
}

/// Registers the pool resource, the removal signal, and the recycle systems.
pub struct PoolPlugin;

impl Plugin for PoolPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_core_sets(app);
        app.init_resource::<SpawnPool>()
            .init_resource::<GameOver>()
            .add_message::<Recycled>()
            .add_message::<LeftViewport>()
            .add_systems(
                Update,
                (recycle_out_of_view, release_and_signal)
                    .chain()
                    .in_set(crate::CoreSet::Recycle),
            );
    }
}

/// Deactivates [`RecycleOutOfView`] entities whose leave-viewport event
/// fired this tick.
pub fn recycle_out_of_view(
    mut commands: Commands,
    mut left: MessageReader<LeftViewport>,
    recyclable: Query<(), (With<RecycleOutOfView>, With<Active>)>,
) {
    for event in left.read() {
        if recyclable.get(event.entity).is_ok() {
            commands.entity(event.entity).remove::<Active>();
        }
    }
}

/// Observes every [`Active`] removal: returns the entity to its archetype's
/// stock and fires [`Recycled`] — unless the game is already over, in which
/// case only the release happens and the signal stays silent.
pub fn release_and_signal(
    mut removed: RemovedComponents<Active>,
    keys: Query<&PoolKey>,
    game_over: Res<GameOver>,
    mut pool: ResMut<SpawnPool>,
    mut recycled: MessageWriter<Recycled>,
) {
    for entity in removed.read() {
        // Despawned by the host: nothing to release, nothing to signal.
        let Ok(key) = keys.get(entity) else {
            continue;
        };
        pool.release(key.0, entity);
        if !game_over.0 {
            recycled.write(Recycled { entity });
        }
    }
}
