//! The discretized search space and its "still unsampled" subset.
//!
//! A [`CandidateSet`] is either enumerated from [`Bounds`] on a regular grid
//! or supplied explicitly as a list of points. As a campaign progresses,
//! points move from "available" to "sampled" and leave the set for good.
//!
//! # Matching sampled points
//!
//! Two removal paths exist:
//!
//! - [`CandidateSet::without_indices`] drops points by their position in the
//!   set. The campaign uses this for the points it just selected, so consumed
//!   points always leave the set regardless of floating-point representation.
//! - [`CandidateSet::without_observed`] drops every candidate whose
//!   coordinates are bit-for-bit equal to an observed row (with `-0.0`
//!   treated as `0.0`). No tolerance is applied. A "same" point re-derived
//!   through different arithmetic (a different bound ordering, say) will not
//!   match and stays in the set.

pub mod bounds;
pub mod grid;

use std::collections::HashSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub use bounds::Bounds;
pub use grid::{DEFAULT_MAX_CANDIDATES, GridIndex};

use crate::observations::check_dims;
use crate::types::Point;
use crate::Result;

/// Hashable exact-value key for a point.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct PointKey(Vec<u64>);

impl PointKey {
    fn new(point: &[f64]) -> Self {
        // 0.0 == -0.0 but their bit patterns differ.
        Self(
            point
                .iter()
                .map(|&v| if v == 0.0 { 0.0_f64.to_bits() } else { v.to_bits() })
                .collect(),
        )
    }
}

/// The set of points still available for querying.
///
/// Points are distinct and keep their insertion order, which is the order
/// acquisition functions use to break score ties.
///
/// # Examples
///
/// ```
/// use bayesopt::space::{Bounds, CandidateSet};
///
/// let bounds = Bounds::new(vec![(0.0, 1.0)]).unwrap();
/// let grid = CandidateSet::from_grid(&bounds, 3, 1000).unwrap();
/// assert_eq!(grid.points(), &[vec![0.0], vec![0.5], vec![1.0]]);
///
/// let remaining = grid.without_observed(&[vec![0.5]]);
/// assert_eq!(remaining.points(), &[vec![0.0], vec![1.0]]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CandidateSet {
    points: Vec<Point>,
    /// Grid position of each point, present only for grid-enumerated sets.
    grid_indices: Option<Vec<GridIndex>>,
    dim: usize,
}

impl CandidateSet {
    /// Builds a candidate set from explicit points.
    ///
    /// Duplicate points are dropped, keeping the first occurrence. An empty
    /// list is allowed and has dimension 0.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`](crate::Error::DimensionMismatch)
    /// if the points differ in dimensionality.
    pub fn from_points(points: Vec<Point>) -> Result<Self> {
        let dim = points.first().map_or(0, Vec::len);
        check_dims(&points, dim)?;

        let mut seen = HashSet::with_capacity(points.len());
        let points: Vec<Point> = points
            .into_iter()
            .filter(|p| seen.insert(PointKey::new(p)))
            .collect();

        Ok(Self {
            points,
            grid_indices: None,
            dim,
        })
    }

    /// Enumerates a regular grid over `bounds` with `density` points per
    /// dimension (see [`grid::enumerate`]).
    ///
    /// # Errors
    ///
    /// Propagates [`Error::InvalidGridDensity`](crate::Error::InvalidGridDensity)
    /// and [`Error::SearchSpaceTooLarge`](crate::Error::SearchSpaceTooLarge).
    pub fn from_grid(bounds: &Bounds, density: usize, max_points: usize) -> Result<Self> {
        let grid = grid::enumerate(bounds, density, max_points)?;
        let mut points = Vec::with_capacity(grid.len());
        let mut indices = Vec::with_capacity(grid.len());
        for (point, index) in grid {
            points.push(point);
            indices.push(index);
        }
        // Degenerate axes repeat a value; collapse those duplicates.
        let mut seen = HashSet::with_capacity(points.len());
        let keep: Vec<bool> = points.iter().map(|p| seen.insert(PointKey::new(p))).collect();
        if keep.iter().all(|&k| k) {
            return Ok(Self {
                points,
                grid_indices: Some(indices),
                dim: bounds.dim(),
            });
        }
        let (points, indices) = points
            .into_iter()
            .zip(indices)
            .zip(keep)
            .filter_map(|(pair, k)| k.then_some(pair))
            .unzip();
        Ok(Self {
            points,
            grid_indices: Some(indices),
            dim: bounds.dim(),
        })
    }

    /// The available points in order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of available points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns `true` if no points remain.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Dimensionality of the points (0 for an empty explicit set).
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Grid position of the point at `position`, if this set came from a grid.
    #[must_use]
    pub fn grid_index(&self, position: usize) -> Option<&GridIndex> {
        self.grid_indices.as_ref()?.get(position)
    }

    /// Returns `true` if a point with exactly these coordinates is available.
    #[must_use]
    pub fn contains(&self, point: &[f64]) -> bool {
        let key = PointKey::new(point);
        self.points.iter().any(|p| PointKey::new(p) == key)
    }

    /// Returns a copy without the points at the given positions.
    ///
    /// Out-of-range positions are ignored.
    #[must_use]
    pub fn without_indices(&self, positions: &[usize]) -> Self {
        let drop: HashSet<usize> = positions.iter().copied().collect();
        self.retain_positions(|i, _| !drop.contains(&i))
    }

    /// Returns a copy without any point that exactly matches an observed row.
    #[must_use]
    pub fn without_observed(&self, observed: &[Point]) -> Self {
        let sampled: HashSet<PointKey> = observed.iter().map(|p| PointKey::new(p)).collect();
        self.retain_positions(|_, p| !sampled.contains(&PointKey::new(p)))
    }

    fn retain_positions(&self, mut keep: impl FnMut(usize, &Point) -> bool) -> Self {
        let mask: Vec<bool> = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| keep(i, p))
            .collect();

        let points = self
            .points
            .iter()
            .zip(&mask)
            .filter(|(_, k)| **k)
            .map(|(p, _)| p.clone())
            .collect();
        let grid_indices = self.grid_indices.as_ref().map(|indices| {
            indices
                .iter()
                .zip(&mask)
                .filter(|(_, k)| **k)
                .map(|(g, _)| g.clone())
                .collect()
        });

        Self {
            points,
            grid_indices,
            dim: self.dim,
        }
    }
}
