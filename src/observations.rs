//! Accumulated `(X, y)` observation sets.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{Direction, Point};
use crate::{Error, Result};

/// An ordered set of observations: parallel input rows `x` and outputs `y`.
///
/// Every row of `x` has the same dimensionality and `x.len() == y.len()`
/// always holds. Observation sets are append-only: [`appended`](Self::appended)
/// returns a new set and leaves `self` untouched.
///
/// # Examples
///
/// ```
/// use bayesopt::Observations;
///
/// let seed = Observations::new(vec![vec![0.0, 1.0]], vec![3.0]).unwrap();
/// let next = seed.appended(&[vec![0.5, 0.5]], &[4.0]).unwrap();
///
/// assert_eq!(seed.len(), 1);
/// assert_eq!(next.len(), 2);
/// assert_eq!(next.dim(), 2);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Observations {
    x: Vec<Point>,
    y: Vec<f64>,
}

impl Observations {
    /// Builds an observation set, validating its shape.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyObservations`] if `x` is empty.
    /// - [`Error::LengthMismatch`] if `x` and `y` differ in length.
    /// - [`Error::DimensionMismatch`] if rows differ in dimensionality or
    ///   the rows have zero dimensions.
    pub fn new(x: Vec<Point>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let Some(first) = x.first() else {
            return Err(Error::EmptyObservations);
        };
        let dim = first.len();
        if dim == 0 {
            return Err(Error::DimensionMismatch {
                expected: 1,
                got: 0,
                index: 0,
            });
        }
        check_dims(&x, dim)?;
        Ok(Self { x, y })
    }

    /// Input rows.
    #[must_use]
    pub fn x(&self) -> &[Point] {
        &self.x
    }

    /// Observed outputs, aligned with [`x`](Self::x).
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Always `false` for a validated set; kept for API symmetry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Dimensionality of every input row.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.x.first().map_or(0, Vec::len)
    }

    /// Returns a new set with `x`/`y` appended after the existing rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] or [`Error::DimensionMismatch`] if
    /// the batch does not fit this set's shape.
    pub fn appended(&self, x: &[Point], y: &[f64]) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        check_dims(x, self.dim())?;

        let mut next = self.clone();
        next.x.extend_from_slice(x);
        next.y.extend_from_slice(y);
        Ok(next)
    }

    /// The best observed `(x, y)` pair under `direction`.
    ///
    /// Ties keep the earliest observation.
    #[must_use]
    pub fn best(&self, direction: Direction) -> Option<(&Point, f64)> {
        let mut best: Option<(&Point, f64)> = None;
        for (x, &y) in self.x.iter().zip(&self.y) {
            match best {
                Some((_, incumbent)) if !direction.is_better(y, incumbent) => {}
                _ => best = Some((x, y)),
            }
        }
        best
    }

    /// The best observed value on the "larger is better" axis.
    ///
    /// This is `max(y)` when maximizing and `-min(y)` when minimizing, the
    /// incumbent that improvement-based acquisition functions compare against.
    #[must_use]
    pub(crate) fn oriented_best(&self, direction: Direction) -> Option<f64> {
        self.y
            .iter()
            .map(|&y| direction.orient(y))
            .fold(None, |acc, v| Some(acc.map_or(v, |a: f64| a.max(v))))
    }
}

/// Check that every point has `dim` coordinates.
pub(crate) fn check_dims(points: &[Point], dim: usize) -> Result<()> {
    if let Some((index, p)) = points.iter().enumerate().find(|(_, p)| p.len() != dim) {
        return Err(Error::DimensionMismatch {
            expected: dim,
            got: p.len(),
            index,
        });
    }
    Ok(())
}
