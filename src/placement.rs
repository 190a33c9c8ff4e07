//! Screen-edge placement, scaling, and travel vocabulary.
//!
//! Everything here is pure math over the viewport rect: where an anchor
//! resolves to, how a screen fraction converts into a transform scale, and
//! which unit vector a travel direction means. The enums replace what would
//! otherwise be one lookup type per variant; each consumer resolves them
//! with an exhaustive `match`.

use bevy::prelude::*;
use rand::Rng;

// ── Enums ─────────────────────────────────────────────────────────────────────

/// Viewport edge an entity is placed against. `OffScreen` variants sit just
/// past the edge (the entity's extent fully outside the visible rect).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundsAnchor {
    Top,
    TopOffScreen,
    Bottom,
    BottomOffScreen,
    Left,
    LeftOffScreen,
    Right,
    RightOffScreen,
}

/// Axis a placement must not move. A locked axis keeps the entity's current
/// coordinate; `Both` turns the placement into a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisLock {
    #[default]
    None,
    X,
    Y,
    Both,
}

/// Forces the two components of a computed scale to match one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleLock {
    #[default]
    None,
    Width,
    Height,
}

/// Travel direction for a moving entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Left,
    Right,
    Up,
    Down,
}

impl MoveDirection {
    /// Unit vector of the direction.
    pub fn unit(self) -> Vec2 {
        match self {
            MoveDirection::Left => Vec2::NEG_X,
            MoveDirection::Right => Vec2::X,
            MoveDirection::Up => Vec2::Y,
            MoveDirection::Down => Vec2::NEG_Y,
        }
    }
}

/// Travel parameters applied to a spawned entity. Movement integration is
/// the host's job; this core only writes the data.
#[derive(Component, Debug, Clone, Copy)]
pub struct Motion {
    pub direction: MoveDirection,
    pub speed: f32,
}

impl Motion {
    /// Velocity vector (world units/s).
    pub fn velocity(&self) -> Vec2 {
        self.direction.unit() * self.speed
    }
}

// ── Placement math ────────────────────────────────────────────────────────────

/// World position of `anchor` for an entity with the given world half
/// extent. On-screen anchors place the entity flush inside the edge,
/// off-screen anchors flush outside; the free axis sits at the viewport
/// centre.
pub fn anchored_position(view: Rect, anchor: BoundsAnchor, half_extent: Vec2) -> Vec2 {
    let center = view.center();
    match anchor {
        BoundsAnchor::Top => Vec2::new(center.x, view.max.y - half_extent.y),
        BoundsAnchor::TopOffScreen => Vec2::new(center.x, view.max.y + half_extent.y),
        BoundsAnchor::Bottom => Vec2::new(center.x, view.min.y + half_extent.y),
        BoundsAnchor::BottomOffScreen => Vec2::new(center.x, view.min.y - half_extent.y),
        BoundsAnchor::Left => Vec2::new(view.min.x + half_extent.x, center.y),
        BoundsAnchor::LeftOffScreen => Vec2::new(view.min.x - half_extent.x, center.y),
        BoundsAnchor::Right => Vec2::new(view.max.x - half_extent.x, center.y),
        BoundsAnchor::RightOffScreen => Vec2::new(view.max.x + half_extent.x, center.y),
    }
}

/// [`anchored_position`] with axis locking: a locked axis keeps the
/// coordinate from `current`.
pub fn place(
    view: Rect,
    anchor: BoundsAnchor,
    lock: AxisLock,
    half_extent: Vec2,
    current: Vec2,
) -> Vec2 {
    if lock == AxisLock::Both {
        return current;
    }
    let mut desired = anchored_position(view, anchor, half_extent);
    match lock {
        AxisLock::X => desired.x = current.x,
        AxisLock::Y => desired.y = current.y,
        AxisLock::None | AxisLock::Both => {}
    }
    desired
}

/// Converts a screen fraction into a transform scale for an entity whose
/// unscaled extent is `base_size`.
///
/// `height_based` uses the viewport height as the basis for both axes (so a
/// width fraction reads "fraction of the screen height"), matching how
/// horizontal obstacle halves are sized.
pub fn scale_for_fraction(
    view: Rect,
    fraction: Vec2,
    lock: ScaleLock,
    height_based: bool,
    base_size: Vec2,
) -> Vec2 {
    let width_basis = if height_based { view.height() } else { view.width() };
    let mut scale = Vec2::new(
        width_basis / base_size.x * fraction.x,
        view.height() / base_size.y * fraction.y,
    );
    match lock {
        ScaleLock::Width => scale.y = scale.x,
        ScaleLock::Height => scale.x = scale.y,
        ScaleLock::None => {}
    }
    scale
}

/// Uniformly random position inside the viewport, inset by the entity's
/// world half extent so the whole entity starts visible. Degenerates to the
/// viewport centre when the entity is larger than the view.
pub fn random_point_within(view: Rect, half_extent: Vec2, rng: &mut impl Rng) -> Vec2 {
    let inset = Rect {
        min: view.min + half_extent,
        max: view.max - half_extent,
    };
    if inset.min.x > inset.max.x || inset.min.y > inset.max.y {
        return view.center();
    }
    Vec2::new(
        rng.gen_range(inset.min.x..=inset.max.x),
        rng.gen_range(inset.min.y..=inset.max.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn view() -> Rect {
        Rect::new(-8.0, -5.0, 8.0, 5.0)
    }

    #[test]
    fn direction_units_are_axis_aligned() {
        assert_eq!(MoveDirection::Left.unit(), Vec2::NEG_X);
        assert_eq!(MoveDirection::Right.unit(), Vec2::X);
        assert_eq!(MoveDirection::Up.unit(), Vec2::Y);
        assert_eq!(MoveDirection::Down.unit(), Vec2::NEG_Y);
    }

    #[test]
    fn off_screen_anchor_clears_the_edge() {
        let pos = anchored_position(view(), BoundsAnchor::RightOffScreen, Vec2::new(0.5, 1.0));
        assert_eq!(pos.x, 8.5);
        // Entity's near edge touches the viewport edge exactly.
        assert_eq!(pos.x - 0.5, view().max.x);
    }

    #[test]
    fn on_screen_anchor_sits_flush_inside() {
        let pos = anchored_position(view(), BoundsAnchor::Top, Vec2::new(0.5, 1.0));
        assert_eq!(pos.y, 4.0);
        assert_eq!(pos.x, 0.0);
    }

    #[test]
    fn locked_axis_keeps_current_coordinate() {
        let current = Vec2::new(3.0, -2.0);
        let pos = place(
            view(),
            BoundsAnchor::LeftOffScreen,
            AxisLock::Y,
            Vec2::splat(0.5),
            current,
        );
        assert_eq!(pos.y, -2.0);
        assert_eq!(pos.x, -8.5);
        assert_eq!(
            place(view(), BoundsAnchor::Top, AxisLock::Both, Vec2::ZERO, current),
            current
        );
    }

    #[test]
    fn height_based_scale_uses_height_for_both_axes() {
        let base = Vec2::ONE;
        let scale = scale_for_fraction(view(), Vec2::new(0.02, 0.3), ScaleLock::None, true, base);
        assert!((scale.x - 0.02 * 10.0).abs() < 1e-6);
        assert!((scale.y - 0.3 * 10.0).abs() < 1e-6);

        let scale = scale_for_fraction(view(), Vec2::new(0.5, 0.5), ScaleLock::None, false, base);
        assert!((scale.x - 8.0).abs() < 1e-6);
        assert!((scale.y - 5.0).abs() < 1e-6);
    }

    #[test]
    fn scale_lock_equalises_components() {
        let scale =
            scale_for_fraction(view(), Vec2::new(0.1, 0.3), ScaleLock::Width, true, Vec2::ONE);
        assert_eq!(scale.x, scale.y);
    }

    #[test]
    fn random_points_stay_fully_inside_the_view() {
        let mut rng = StdRng::seed_from_u64(7);
        let half = Vec2::splat(0.5);
        for _ in 0..200 {
            let p = random_point_within(view(), half, &mut rng);
            assert!(p.x - half.x >= view().min.x && p.x + half.x <= view().max.x);
            assert!(p.y - half.y >= view().min.y && p.y + half.y <= view().max.y);
        }
    }

    #[test]
    fn oversized_entity_falls_back_to_centre() {
        let mut rng = StdRng::seed_from_u64(7);
        let p = random_point_within(view(), Vec2::new(20.0, 20.0), &mut rng);
        assert_eq!(p, view().center());
    }
}
