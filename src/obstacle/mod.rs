//! Obstacle pair rigs and plan application.
//!
//! An obstacle is a pooled rig: a root entity that travels across the screen
//! plus two half entities parented to it, pinched against opposite edges of
//! the variable axis with a gap between them. The geometry generator in
//! [`geometry`] produces an [`geometry::ObstaclePlan`]; [`apply_plan`]
//! writes it onto the rig's transforms before the rig is activated, so the
//! fully-placed pair appears in one frame with no visible snap.

pub mod geometry;

pub use geometry::{ObstaclePlan, Orientation, PairGenerator, SidePlan};

use bevy::prelude::*;

use crate::placement::{place, scale_for_fraction, Motion};
use crate::pool::BaseSize;

/// The two pooled half entities belonging to an obstacle root.
#[derive(Component, Debug, Clone, Copy)]
pub struct ObstacleRig {
    pub first: Entity,
    pub second: Entity,
}

impl ObstacleRig {
    pub fn sides(&self) -> [Entity; 2] {
        [self.first, self.second]
    }
}

/// Writes a generated plan onto a rig: root travel position and [`Motion`],
/// half scales and edge positions. Must run before the rig gains its
/// `Active` marker.
///
/// The root sits at the parent anchor along the travel axis (its free axis
/// locked at the current coordinate, normally 0). Halves are children of the
/// root, so only their variable-axis coordinate is set locally; the travel
/// coordinate comes from the root.
pub fn apply_plan(
    plan: &ObstaclePlan,
    view: Rect,
    root: Entity,
    rig: &ObstacleRig,
    transforms: &mut Query<&mut Transform>,
    sizes: &Query<&BaseSize>,
    commands: &mut Commands,
) {
    // Largest half extent along the travel axis, so the whole rig starts
    // clear of the screen edge.
    let mut travel_clearance = 0.0f32;

    for (side_entity, side) in [(rig.first, &plan.first), (rig.second, &plan.second)] {
        let base = sizes.get(side_entity).copied().unwrap_or_default().0;
        let scale = scale_for_fraction(view, side.fraction, side.scale_lock, side.height_based, base);
        let half_extent = base * scale / 2.0;

        travel_clearance = match plan.orientation {
            Orientation::Horizontal => travel_clearance.max(half_extent.x),
            Orientation::Vertical => travel_clearance.max(half_extent.y),
        };

        if let Ok(mut transform) = transforms.get_mut(side_entity) {
            let edge = place(view, side.anchor, side.axis_lock, half_extent, Vec2::ZERO);
            // Local to the root: keep only the variable-axis coordinate.
            let local = match plan.orientation {
                Orientation::Horizontal => Vec2::new(0.0, edge.y),
                Orientation::Vertical => Vec2::new(edge.x, 0.0),
            };
            transform.translation = local.extend(0.0);
            transform.scale = scale.extend(1.0);
        }
    }

    if let Ok(mut transform) = transforms.get_mut(root) {
        let clearance = match plan.orientation {
            Orientation::Horizontal => Vec2::new(travel_clearance, 0.0),
            Orientation::Vertical => Vec2::new(0.0, travel_clearance),
        };
        let current = transform.translation.truncate();
        let desired = place(view, plan.parent_anchor, plan.parent_axis_lock, clearance, current);
        transform.translation = desired.extend(0.0);
    }

    commands.entity(root).insert(Motion {
        direction: plan.direction,
        speed: plan.speed,
    });
}
