//! Hill-climbing point movers.

use nalgebra::{Point2, Vector2};
use tf_field::ScalarField;
use tracing::trace;

use crate::config::MoveConfig;
use crate::error::{SnapError, SnapResult};

/// Number of leading points a mover works on.
pub const MOVED_POINTS: usize = 2;

/// Strategy for sliding a diameter pair onto high field values.
///
/// Both variants first push the pair by the configured growth, then climb the
/// field along the change direction until no better position lies within the
/// search radius. Only the first two points are touched; any further points
/// (such as the minor-axis point of a basis) are left as they are.
///
/// # Example
///
/// ```
/// use nalgebra::{Point2, Vector2};
/// use tf_field::ScalarField;
/// use tf_snap::{MoveConfig, PointMover};
///
/// // Energy rises to the right
/// let field = ScalarField::from_fn(10, 3, |x, _| x as f64);
/// let mut points = [Point2::new(2, 1), Point2::new(5, 1)];
///
/// PointMover::Independent
///     .move_points(&field, &mut points, &MoveConfig::along(Vector2::x()))
///     .unwrap();
/// assert_eq!(points, [Point2::new(9, 1), Point2::new(9, 1)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointMover {
    /// Each point climbs on its own.
    #[default]
    Independent,

    /// The pair narrows or widens as a unit, keeping its centre.
    Symmetric,
}

impl PointMover {
    /// Moves `points[0]` and `points[1]` in place.
    ///
    /// Points are given in model coordinates; `config.offset` maps them onto
    /// the field for the search and is removed again on return. Running out of
    /// better neighbours is the normal end of the search, not an error.
    ///
    /// # Errors
    ///
    /// - [`SnapError::InsufficientPoints`] for fewer than two points
    /// - [`SnapError::SeedOutOfBounds`] if a pushed point lies outside `field`;
    ///   `points` is left unchanged in that case
    pub fn move_points(
        self,
        field: &ScalarField,
        points: &mut [Point2<i32>],
        config: &MoveConfig,
    ) -> SnapResult<()> {
        if points.len() < MOVED_POINTS {
            return Err(SnapError::InsufficientPoints {
                required: MOVED_POINTS,
                actual: points.len(),
            });
        }

        let shift = config.offset + config.growth_shift();
        let mut seeds = [points[0] + shift, points[1] + shift];
        if let Some(bad) = seeds.iter().find(|p| !field.contains(**p)) {
            return Err(SnapError::SeedOutOfBounds { x: bad.x, y: bad.y });
        }

        match self {
            Self::Independent => {
                for seed in &mut seeds {
                    *seed = climb(field, *seed, config);
                }
            }
            Self::Symmetric => seeds = climb_pair(field, seeds, config),
        }

        points[0] = seeds[0] - config.offset;
        points[1] = seeds[1] - config.offset;
        Ok(())
    }
}

/// Single-point search: look both ways along the change direction and step
/// to the strictly better side.
fn climb(field: &ScalarField, mut point: Point2<i32>, config: &MoveConfig) -> Point2<i32> {
    let mut radius = 1;
    loop {
        let mut best = energy(field, point);
        let mut next = None;
        for sign in [-1, 1] {
            let candidate = point + config.step(sign * radius);
            if let Some(value) = field.value_at(candidate) {
                if value > best {
                    best = value;
                    next = Some(candidate);
                }
            }
        }

        match next {
            Some(p) => {
                trace!(from = ?point, to = ?p, radius, "point moved");
                point = p;
                radius = 1;
            }
            None => match config.widen(radius) {
                Some(r) => radius = r,
                None => return point,
            },
        }
    }
}

/// Pair search: compare moving both points towards each other against moving
/// them apart by the same step.
fn climb_pair(
    field: &ScalarField,
    mut pair: [Point2<i32>; 2],
    config: &MoveConfig,
) -> [Point2<i32>; 2] {
    // Orient the slide so that a positive step brings the first point closer
    // to the second.
    let span: Vector2<f64> = (pair[1] - pair[0]).cast();
    let inward = if config.change_dir.dot(&span) < 0.0 { -1 } else { 1 };

    let mut radius = 1;
    loop {
        let current = pair_energy(field, pair).unwrap_or(f64::NEG_INFINITY);
        let step = config.step(inward * radius);
        let narrow = [pair[0] + step, pair[1] - step];
        let widen = [pair[0] - step, pair[1] + step];

        let mut best: Option<([Point2<i32>; 2], f64)> = None;
        for candidate in [narrow, widen] {
            if let Some(value) = pair_energy(field, candidate) {
                // `>=` lets the later (widening) candidate win ties
                if best.is_none_or(|(_, b)| value >= b) {
                    best = Some((candidate, value));
                }
            }
        }

        match best {
            Some((candidate, value)) if value > current => {
                trace!(from = ?pair, to = ?candidate, radius, "pair moved");
                pair = candidate;
                radius = 1;
            }
            _ => match config.widen(radius) {
                Some(r) => radius = r,
                None => return pair,
            },
        }
    }
}

fn energy(field: &ScalarField, p: Point2<i32>) -> f64 {
    field.value_at(p).unwrap_or(f64::NEG_INFINITY)
}

fn pair_energy(field: &ScalarField, pair: [Point2<i32>; 2]) -> Option<f64> {
    Some(field.value_at(pair[0])? + field.value_at(pair[1])?)
}
