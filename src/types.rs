//! Core types shared across the crate.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in the search space: one coordinate per dimension.
pub type Point = Vec<f64>;

/// The direction of optimization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// Maximize the objective value.
    #[default]
    Maximize,
    /// Minimize the objective value.
    Minimize,
}

impl Direction {
    /// Map a raw objective value onto the "larger is better" axis.
    ///
    /// Acquisition functions always maximize; a minimizing campaign feeds
    /// them negated means and negated observations.
    #[must_use]
    pub fn orient(self, value: f64) -> f64 {
        match self {
            Self::Maximize => value,
            Self::Minimize => -value,
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    #[must_use]
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        self.orient(candidate) > self.orient(incumbent)
    }
}

/// The lifecycle phase of a [`Campaign`](crate::Campaign).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CampaignPhase {
    /// Built but not started.
    Created,
    /// The iteration loop is executing.
    Running,
    /// All requested iterations ran.
    Completed,
    /// A hook stopped the loop between iterations.
    Cancelled,
    /// An iteration returned an error.
    Failed,
}

impl core::fmt::Display for CampaignPhase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}
