//! Axis-aligned box bounds of a search space.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Per-dimension `(low, high)` bounds defining an axis-aligned hyper-rectangle.
///
/// # Examples
///
/// ```
/// use bayesopt::space::Bounds;
///
/// let bounds = Bounds::new(vec![(0.0, 1.0), (-5.0, 5.0)]).unwrap();
/// assert_eq!(bounds.dim(), 2);
/// assert_eq!(bounds.grid_size(11), Some(121));
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Bounds {
    ranges: Vec<(f64, f64)>,
}

impl Bounds {
    /// Validates and wraps a list of bound pairs.
    ///
    /// # Errors
    ///
    /// - [`Error::MissingSearchSpace`] if `ranges` is empty.
    /// - [`Error::InvalidBounds`] if a pair is not finite or has `low > high`.
    pub fn new(ranges: Vec<(f64, f64)>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(Error::MissingSearchSpace);
        }
        for (dimension, &(low, high)) in ranges.iter().enumerate() {
            if !low.is_finite() || !high.is_finite() || low > high {
                return Err(Error::InvalidBounds {
                    dimension,
                    low,
                    high,
                });
            }
        }
        Ok(Self { ranges })
    }

    /// Number of dimensions.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.ranges.len()
    }

    /// The bound pairs in dimension order.
    #[must_use]
    pub fn ranges(&self) -> &[(f64, f64)] {
        &self.ranges
    }

    /// Number of points a grid with `density` points per dimension would hold.
    ///
    /// Returns `None` if the count overflows `usize`.
    #[must_use]
    pub fn grid_size(&self, density: usize) -> Option<usize> {
        self.ranges
            .iter()
            .try_fold(1_usize, |total, _| total.checked_mul(density))
    }

    /// Returns `true` if every coordinate of `point` lies inside the box.
    #[must_use]
    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.ranges.len()
            && point
                .iter()
                .zip(&self.ranges)
                .all(|(&v, &(low, high))| (low..=high).contains(&v))
    }
}

impl TryFrom<Vec<(f64, f64)>> for Bounds {
    type Error = Error;

    fn try_from(ranges: Vec<(f64, f64)>) -> Result<Self> {
        Self::new(ranges)
    }
}
