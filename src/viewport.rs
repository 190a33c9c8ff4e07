//! World-space viewport rect shared by every bounds check.
//!
//! With a 2D camera present, [`sync_viewport_bounds`] refreshes
//! [`ViewportBounds`] from the orthographic projection every tick. Headless
//! hosts (and tests) insert and update the resource directly instead. A
//! missing viewport is a fatal precondition for the bounds detector: it is
//! reported once at startup and bounds checks stay disabled.

use bevy::prelude::*;

use crate::error::CoreError;

/// The camera's visible area in world space, un-inflated.
///
/// A degenerate (zero-area) rect means "no viewport": the bounds detector
/// does nothing until a camera or the host supplies a real rect.
#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct ViewportBounds(pub Rect);

impl ViewportBounds {
    /// True when a usable viewport has been supplied.
    pub fn is_valid(&self) -> bool {
        self.0.width() > 0.0 && self.0.height() > 0.0
    }
}

/// Registers [`ViewportBounds`], the camera sync, and the startup check.
pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        crate::configure_core_sets(app);
        app.init_resource::<ViewportBounds>()
            .add_systems(PostStartup, report_missing_viewport)
            .add_systems(
                Update,
                sync_viewport_bounds.in_set(crate::CoreSet::Viewport),
            );
    }
}

/// Refreshes the viewport rect from the primary 2D camera, when one exists.
///
/// The orthographic `area` is camera-local; offsetting by the camera
/// translation yields world space. Hosts without a camera keep whatever rect
/// they maintain by hand.
pub fn sync_viewport_bounds(
    camera: Query<(&Projection, &GlobalTransform), With<Camera2d>>,
    mut bounds: ResMut<ViewportBounds>,
) {
    let Ok((projection, transform)) = camera.single() else {
        return;
    };
    if let Projection::Orthographic(ortho) = projection {
        let offset = transform.translation().truncate();
        bounds.0 = Rect {
            min: ortho.area.min + offset,
            max: ortho.area.max + offset,
        };
    }
}

/// One-shot startup diagnostic for the fatal missing-viewport precondition.
fn report_missing_viewport(
    camera: Query<(), With<Camera2d>>,
    bounds: Res<ViewportBounds>,
) {
    if camera.is_empty() && !bounds.is_valid() {
        error!("{}", CoreError::MissingViewport);
    }
}
