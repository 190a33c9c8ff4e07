//! Viewport bounds transition detector.
//!
//! Every active entity with a [`BoundsTracker`] raises `EnteredViewport` and
//! `LeftViewport` exactly once per activation, in that order. The tracker is
//! a pair of one-shot latches: "entered" passes once the position has been
//! inside the margin-inflated viewport for at least one sample, and "left"
//! passes only after "entered" has, once the position falls outside the same
//! rect. Sticky evaluation means a single out-of-bounds sample at spawn time
//! (before entry) can never satisfy "left".

use bevy::prelude::*;

use crate::config::SpawnConfig;
use crate::pool::Active;
use crate::viewport::ViewportBounds;

/// One-shot boolean check: once a probe passes, the result is cached and the
/// probe is never evaluated again until [`reset`](Latch::reset).
#[derive(Debug, Default, Clone, Copy)]
pub struct Latch {
    passed: bool,
}

impl Latch {
    /// Evaluates `probe` unless the latch has already passed.
    pub fn check(&mut self, probe: impl FnOnce() -> bool) -> bool {
        if self.passed {
            return true;
        }
        self.passed = probe();
        self.passed
    }

    /// Whether the latch has passed, without evaluating anything.
    pub fn passed(&self) -> bool {
        self.passed
    }

    pub fn reset(&mut self) {
        self.passed = false;
    }
}

/// Per-entity viewport lifetime state: {Idle, Entered, Left} expressed as
/// two ordered latches. Reset on every (re)activation.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct BoundsTracker {
    entered: Latch,
    left: Latch,
}

impl BoundsTracker {
    pub fn is_entered(&self) -> bool {
        self.entered.passed()
    }

    pub fn is_left(&self) -> bool {
        self.left.passed()
    }

    pub fn reset(&mut self) {
        self.entered.reset();
        self.left.reset();
    }
}

/// Fired the first tick an activation's position is inside the inflated
/// viewport. At most once per activation.
#[derive(Message, Debug, Clone, Copy)]
pub struct EnteredViewport {
    pub entity: Entity,
}

/// Fired the first tick the position is outside the inflated viewport after
/// having entered. At most once per activation, never before
/// [`EnteredViewport`].
#[derive(Message, Debug, Clone, Copy)]
pub struct LeftViewport {
    pub entity: Entity,
}

/// Registers the transition events and the per-tick detector.
pub struct BoundsPlugin;

impl Plugin for BoundsPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_core_sets(app);
        app.init_resource::<ViewportBounds>()
            .init_resource::<SpawnConfig>()
            .add_message::<EnteredViewport>()
            .add_message::<LeftViewport>()
            .add_systems(
                Update,
                bounds_transition.in_set(crate::CoreSet::Bounds),
            )
            .add_systems(
                Update,
                reset_tracker_on_activation.in_set(crate::CoreSet::Activate),
            );
    }
}

/// Evaluates both latches for every active tracked entity.
///
/// The else-if gives "entered" priority: the two events never fire on the
/// same tick, and "left" is only probed once "entered" has latched. An
/// entity whose activation has already raised both events is terminal until
/// the next activation reset.
pub fn bounds_transition(
    bounds: Res<ViewportBounds>,
    config: Res<SpawnConfig>,
    mut trackers: Query<(Entity, &Transform, &mut BoundsTracker), With<Active>>,
    mut entered_events: MessageWriter<EnteredViewport>,
    mut left_events: MessageWriter<LeftViewport>,
) {
    if !bounds.is_valid() {
        // Fatal precondition, reported once at startup by the viewport module.
        return;
    }
    let watched = bounds.0.inflate(config.bounds_margin);
    for (entity, transform, mut tracker) in &mut trackers {
        if tracker.is_entered() && tracker.is_left() {
            continue;
        }
        let inside = watched.contains(transform.translation.truncate());
        if !tracker.entered.passed() {
            if tracker.entered.check(|| inside) {
                entered_events.write(EnteredViewport { entity });
            }
        } else if !tracker.left.passed() {
            let entered_already = tracker.entered.passed();
            if tracker.left.check(|| entered_already && !inside) {
                left_events.write(LeftViewport { entity });
            }
        }
    }
}

/// Clears both latches on every (re)activation so a recycled entity starts a
/// fresh {Idle → Entered → Left} pass. Runs before the activation's first
/// bounds evaluation: spawns happen after [`bounds_transition`] in the tick,
/// so a fresh `Active` is reset here on the following tick, then probed.
pub fn reset_tracker_on_activation(
    mut fresh: Query<&mut BoundsTracker, Added<Active>>,
) {
    for mut tracker in &mut fresh {
        tracker.reset();
    }
}
