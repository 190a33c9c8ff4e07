//! Procedural obstacle pair geometry.
//!
//! Each generated plan describes one pair of complementary halves whose
//! combined extent plus a fixed gap exactly fills the variable axis:
//! `first + second + gap == 1`. The generator alternates between the two
//! canonical orientations every build (seeded by a random initial parity),
//! and within each orientation alternates which screen edge the pair enters
//! from. The two orientations carry deliberately different tuning — gap
//! width, speed range, and axis locks are not interchangeable.

use bevy::prelude::*;
use rand::Rng;

use crate::config::SpawnConfig;
use crate::placement::{AxisLock, BoundsAnchor, MoveDirection, ScaleLock};

/// The two canonical pair orientations.
///
/// `Horizontal` pairs travel left/right with halves pinched against the top
/// and bottom edges; `Vertical` pairs travel up/down with halves against the
/// left and right edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }
}

/// Placement and scale description for one half of a pair.
#[derive(Debug, Clone, Copy)]
pub struct SidePlan {
    /// Screen fraction per axis; the variable-axis component carries the
    /// drawn split, the other the fixed thickness.
    pub fraction: Vec2,
    pub scale_lock: ScaleLock,
    pub anchor: BoundsAnchor,
    pub axis_lock: AxisLock,
    /// Scale both axes from the screen height (horizontal pairs only).
    pub height_based: bool,
}

/// Immutable-once-built description of one obstacle pair instance.
#[derive(Debug, Clone, Copy)]
pub struct ObstaclePlan {
    pub orientation: Orientation,
    pub direction: MoveDirection,
    /// World units per second along `direction`.
    pub speed: f32,
    /// Spawn edge of the travelling root.
    pub parent_anchor: BoundsAnchor,
    pub parent_axis_lock: AxisLock,
    pub first: SidePlan,
    pub second: SidePlan,
}

impl ObstaclePlan {
    /// The two drawn split fractions along the variable axis.
    pub fn variable_fractions(&self) -> (f32, f32) {
        match self.orientation {
            Orientation::Horizontal => (self.first.fraction.y, self.second.fraction.y),
            Orientation::Vertical => (self.first.fraction.x, self.second.fraction.x),
        }
    }
}

/// Builds pair plans, toggling orientation deterministically every build.
///
/// Alternation is guaranteed rather than probable: a random draw seeds the
/// starting orientation (and each orientation's starting entry edge), after
/// which every toggle is deterministic — never two consecutive identical
/// orientations.
#[derive(Debug, Clone)]
pub struct PairGenerator {
    orientation: Orientation,
    horizontal_from_right: bool,
    vertical_from_bottom: bool,
}

impl PairGenerator {
    /// Random starting parity for the orientation and both entry edges.
    pub fn new(rng: &mut impl Rng) -> Self {
        Self {
            orientation: if rng.gen_bool(0.5) {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            },
            horizontal_from_right: rng.gen_bool(0.5),
            vertical_from_bottom: rng.gen_bool(0.5),
        }
    }

    /// Orientation the next [`build`](Self::build) will use.
    pub fn next_orientation(&self) -> Orientation {
        self.orientation
    }

    /// Draws one plan for the current orientation, then advances both the
    /// orientation toggle and that orientation's entry-edge toggle.
    pub fn build(&mut self, config: &SpawnConfig, rng: &mut impl Rng) -> ObstaclePlan {
        let plan = match self.orientation {
            Orientation::Horizontal => {
                let plan = self.horizontal_plan(config, rng);
                self.horizontal_from_right = !self.horizontal_from_right;
                plan
            }
            Orientation::Vertical => {
                let plan = self.vertical_plan(config, rng);
                self.vertical_from_bottom = !self.vertical_from_bottom;
                plan
            }
        };
        self.orientation = self.orientation.toggled();
        plan
    }

    /// Left/right traveller: halves against the top and bottom edges, split
    /// along the screen height, everything sized from the height basis.
    fn horizontal_plan(&self, config: &SpawnConfig, rng: &mut impl Rng) -> ObstaclePlan {
        let (direction, parent_anchor) = if self.horizontal_from_right {
            (MoveDirection::Left, BoundsAnchor::RightOffScreen)
        } else {
            (MoveDirection::Right, BoundsAnchor::LeftOffScreen)
        };
        let (top, bottom) = draw_split(
            config.obstacle_minimum_scale,
            config.horizontal_pair_gap,
            rng,
        );

        let side = |anchor: BoundsAnchor, split: f32| SidePlan {
            fraction: Vec2::new(config.obstacle_thickness, split),
            scale_lock: ScaleLock::None,
            anchor,
            axis_lock: AxisLock::None,
            height_based: true,
        };

        ObstaclePlan {
            orientation: Orientation::Horizontal,
            direction,
            speed: rng.gen_range(config.horizontal_speed_min..=config.horizontal_speed_max),
            parent_anchor,
            parent_axis_lock: AxisLock::Y,
            first: side(BoundsAnchor::Top, top),
            second: side(BoundsAnchor::Bottom, bottom),
        }
    }

    /// Up/down traveller: halves against the left and right edges, split
    /// along the screen width.
    fn vertical_plan(&self, config: &SpawnConfig, rng: &mut impl Rng) -> ObstaclePlan {
        let (direction, parent_anchor) = if self.vertical_from_bottom {
            (MoveDirection::Up, BoundsAnchor::BottomOffScreen)
        } else {
            (MoveDirection::Down, BoundsAnchor::TopOffScreen)
        };
        let (left, right) = draw_split(
            config.obstacle_minimum_scale,
            config.vertical_pair_gap,
            rng,
        );

        let side = |anchor: BoundsAnchor, split: f32| SidePlan {
            fraction: Vec2::new(split, config.obstacle_thickness),
            scale_lock: ScaleLock::None,
            anchor,
            axis_lock: AxisLock::None,
            height_based: false,
        };

        ObstaclePlan {
            orientation: Orientation::Vertical,
            direction,
            speed: rng.gen_range(config.vertical_speed_min..=config.vertical_speed_max),
            parent_anchor,
            parent_axis_lock: AxisLock::X,
            first: side(BoundsAnchor::Left, left),
            second: side(BoundsAnchor::Right, right),
        }
    }
}

/// Draws the constrained split: `first` uniform in
/// `[minimum, 1 − gap − minimum]`, `second` the remainder after the gap,
/// with a coin flip deciding which half receives which (removes positional
/// bias). Both results are ≥ `minimum` and sum with the gap to exactly 1.
fn draw_split(minimum: f32, gap: f32, rng: &mut impl Rng) -> (f32, f32) {
    let first = rng.gen_range(minimum..=1.0 - gap - minimum);
    let second = 1.0 - gap - first;
    if rng.gen_bool(0.5) {
        (first, second)
    } else {
        (second, first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TOLERANCE: f32 = 1e-5;

    #[test]
    fn split_satisfies_packing_constraint_across_many_draws() {
        let config = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(42);
        let mut generator = PairGenerator::new(&mut rng);
        for _ in 0..500 {
            let plan = generator.build(&config, &mut rng);
            let gap = match plan.orientation {
                Orientation::Horizontal => config.horizontal_pair_gap,
                Orientation::Vertical => config.vertical_pair_gap,
            };
            let (first, second) = plan.variable_fractions();
            assert!(first >= config.obstacle_minimum_scale - TOLERANCE);
            assert!(second >= config.obstacle_minimum_scale - TOLERANCE);
            assert!(
                (first + second + gap - 1.0).abs() < TOLERANCE,
                "split {first} + {second} + gap {gap} must fill the axis"
            );
        }
    }

    #[test]
    fn orientation_alternates_deterministically() {
        let config = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let mut generator = PairGenerator::new(&mut rng);
        let mut previous: Option<Orientation> = None;
        for _ in 0..32 {
            let plan = generator.build(&config, &mut rng);
            if let Some(last) = previous {
                assert_ne!(plan.orientation, last, "orientations must never repeat");
            }
            previous = Some(plan.orientation);
        }
    }

    #[test]
    fn entry_edge_alternates_within_each_orientation() {
        let config = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(99);
        let mut generator = PairGenerator::new(&mut rng);
        let mut horizontal_anchors = Vec::new();
        let mut vertical_anchors = Vec::new();
        for _ in 0..16 {
            let plan = generator.build(&config, &mut rng);
            match plan.orientation {
                Orientation::Horizontal => horizontal_anchors.push(plan.parent_anchor),
                Orientation::Vertical => vertical_anchors.push(plan.parent_anchor),
            }
        }
        for pair in horizontal_anchors.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        for pair in vertical_anchors.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn orientations_keep_their_distinct_tuning() {
        let config = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut generator = PairGenerator::new(&mut rng);
        for _ in 0..8 {
            let plan = generator.build(&config, &mut rng);
            match plan.orientation {
                Orientation::Horizontal => {
                    assert_eq!(plan.parent_axis_lock, AxisLock::Y);
                    assert!(plan.first.height_based && plan.second.height_based);
                    assert!(matches!(
                        plan.direction,
                        MoveDirection::Left | MoveDirection::Right
                    ));
                    assert!(plan.speed >= config.horizontal_speed_min);
                    assert!(plan.speed <= config.horizontal_speed_max);
                }
                Orientation::Vertical => {
                    assert_eq!(plan.parent_axis_lock, AxisLock::X);
                    assert!(!plan.first.height_based && !plan.second.height_based);
                    assert!(matches!(
                        plan.direction,
                        MoveDirection::Up | MoveDirection::Down
                    ));
                    assert!(plan.speed >= config.vertical_speed_min);
                    assert!(plan.speed <= config.vertical_speed_max);
                }
            }
        }
    }

    #[test]
    fn travel_direction_matches_entry_edge() {
        let config = SpawnConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let mut generator = PairGenerator::new(&mut rng);
        for _ in 0..8 {
            let plan = generator.build(&config, &mut rng);
            match plan.parent_anchor {
                BoundsAnchor::RightOffScreen => assert_eq!(plan.direction, MoveDirection::Left),
                BoundsAnchor::LeftOffScreen => assert_eq!(plan.direction, MoveDirection::Right),
                BoundsAnchor::TopOffScreen => assert_eq!(plan.direction, MoveDirection::Down),
                BoundsAnchor::BottomOffScreen => assert_eq!(plan.direction, MoveDirection::Up),
                other => panic!("unexpected spawn anchor {other:?}"),
            }
        }
    }

    #[test]
    fn side_swap_hits_both_assignments() {
        // Over many draws the coin flip must hand the larger split to each
        // half at least once.
        let mut rng = StdRng::seed_from_u64(5);
        let mut first_larger = false;
        let mut second_larger = false;
        for _ in 0..200 {
            let (first, second) = draw_split(0.05, 0.35, &mut rng);
            if first > second {
                first_larger = true;
            }
            if second > first {
                second_larger = true;
            }
        }
        assert!(first_larger && second_larger);
    }
}
