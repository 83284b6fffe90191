//! Regular grid enumeration over [`Bounds`].
//!
//! A grid with density `k` over `D` dimensions holds `k^D` points, so the
//! cost is combinatorial in `D`. Grids are meant for low-dimensional
//! experimental parameter spaces; enumeration refuses to materialize more
//! than a caller-supplied number of points.

use super::Bounds;
use crate::types::Point;
use crate::{Error, Result};

/// Integer coordinates of a grid point: one axis position per dimension.
pub type GridIndex = Vec<usize>;

/// Default upper bound on the number of enumerated grid points.
pub const DEFAULT_MAX_CANDIDATES: usize = 1_000_000;

/// Generates `n_points` evenly spaced values from `low` to `high`, inclusive.
///
/// The first value is exactly `low` and the last exactly `high`. A single
/// point yields `[low]`.
///
/// # Examples
///
/// ```
/// use bayesopt::space::grid::linspace;
///
/// assert_eq!(linspace(0.0, 1.0, 3), vec![0.0, 0.5, 1.0]);
/// assert_eq!(linspace(2.0, 4.0, 1), vec![2.0]);
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn linspace(low: f64, high: f64, n_points: usize) -> Vec<f64> {
    if n_points == 0 {
        return vec![];
    }
    if n_points == 1 {
        return vec![low];
    }

    let last = (n_points - 1) as f64;
    let span = high - low;
    let mut result = Vec::with_capacity(n_points);
    for i in 0..n_points - 1 {
        let t = i as f64 / last;
        // `high - low` overflows for bounds near `±f64::MAX`.
        let value = if span.is_finite() {
            low + span * t
        } else {
            low * (1.0 - t) + high * t
        };
        result.push(value);
    }
    // Pin the endpoint so it never drifts from the bound.
    result.push(high);
    result
}

/// Enumerates the full Cartesian grid over `bounds`.
///
/// Points come out in lexicographic order of their [`GridIndex`]: the first
/// dimension varies slowest and the last fastest. Each returned point is
/// paired with its grid index.
///
/// # Errors
///
/// - [`Error::InvalidGridDensity`] if `density` is zero.
/// - [`Error::SearchSpaceTooLarge`] if `density^D` exceeds `max_points` or
///   overflows.
pub fn enumerate(
    bounds: &Bounds,
    density: usize,
    max_points: usize,
) -> Result<Vec<(Point, GridIndex)>> {
    if density == 0 {
        return Err(Error::InvalidGridDensity);
    }
    let size = bounds.grid_size(density);
    let total = match size {
        Some(total) if total <= max_points => total,
        _ => {
            return Err(Error::SearchSpaceTooLarge {
                size,
                limit: max_points,
            });
        }
    };

    let axes: Vec<Vec<f64>> = bounds
        .ranges()
        .iter()
        .map(|&(low, high)| linspace(low, high, density))
        .collect();

    let dim = bounds.dim();
    let mut grid = Vec::with_capacity(total);
    let mut index = vec![0_usize; dim];
    for _ in 0..total {
        let point = index
            .iter()
            .zip(&axes)
            .map(|(&i, axis)| axis[i])
            .collect();
        grid.push((point, index.clone()));
        advance(&mut index, density);
    }
    Ok(grid)
}

/// Step a mixed-radix counter, last digit fastest.
fn advance(index: &mut [usize], radix: usize) {
    for digit in index.iter_mut().rev() {
        *digit += 1;
        if *digit < radix {
            return;
        }
        *digit = 0;
    }
}
