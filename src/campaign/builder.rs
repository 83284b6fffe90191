use crate::acquisition::Acquisition;
use crate::observations::Observations;
use crate::oracle::Oracle;
use crate::space::{Bounds, CandidateSet};
use crate::surrogate::Surrogate;
use crate::types::{CampaignPhase, Direction, Point};
use crate::{Error, Result};

use super::record::CampaignResult;
use super::{Campaign, CampaignConfig, SearchSpace};

/// Grid points per dimension when bounds are given without a density.
pub const DEFAULT_GRID_DENSITY: usize = 101;

/// Points queried per iteration unless configured otherwise.
pub const DEFAULT_N_QUERYPTS: usize = 1;

/// A builder for [`Campaign`] instances.
///
/// Created via [`Campaign::builder()`] with the three required parts: the
/// surrogate, the oracle and the starter observations. Everything else has
/// a default.
///
/// # Defaults
///
/// - Direction: [`Maximize`](Direction::Maximize)
/// - Acquisition: [`Acquisition::Ucb`] with `beta = 1`
/// - Query points per iteration: [`DEFAULT_N_QUERYPTS`]
/// - Grid density: [`DEFAULT_GRID_DENSITY`]
/// - Grid size limit: [`DEFAULT_MAX_CANDIDATES`](crate::space::DEFAULT_MAX_CANDIDATES)
///
/// A search space is required: either [`bounds`](Self::bounds) or
/// [`candidates`](Self::candidates). If both are set the explicit candidates
/// win.
pub struct CampaignBuilder<S, O> {
    surrogate: S,
    oracle: O,
    starter: Observations,
    acquisition: Acquisition,
    config: CampaignConfig,
    bounds: Option<Bounds>,
    candidates: Option<Vec<Point>>,
}

impl<S: Surrogate, O: Oracle> CampaignBuilder<S, O> {
    pub(super) fn new(surrogate: S, oracle: O, starter: Observations) -> Self {
        Self {
            surrogate,
            oracle,
            starter,
            acquisition: Acquisition::default(),
            config: CampaignConfig::default(),
            bounds: None,
            candidates: None,
        }
    }

    /// Set the optimization direction explicitly.
    #[must_use]
    pub fn direction(mut self, direction: Direction) -> Self {
        self.config.direction = direction;
        self
    }

    /// Seek the largest oracle output (the default).
    #[must_use]
    pub fn maximize(self) -> Self {
        self.direction(Direction::Maximize)
    }

    /// Seek the smallest oracle output.
    #[must_use]
    pub fn minimize(self) -> Self {
        self.direction(Direction::Minimize)
    }

    /// Set the acquisition rule.
    #[must_use]
    pub fn acquisition(mut self, acquisition: Acquisition) -> Self {
        self.acquisition = acquisition;
        self
    }

    /// Set how many points each iteration queries.
    #[must_use]
    pub fn n_querypts(mut self, n_querypts: usize) -> Self {
        self.config.n_querypts = n_querypts;
        self
    }

    /// Search a regular grid over these bounds.
    #[must_use]
    pub fn bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Points per dimension for the grid built from [`bounds`](Self::bounds).
    #[must_use]
    pub fn grid_density(mut self, density: usize) -> Self {
        self.config.grid_density = density;
        self
    }

    /// Upper limit on the number of enumerated grid points.
    #[must_use]
    pub fn max_candidates(mut self, max_candidates: usize) -> Self {
        self.config.max_candidates = max_candidates;
        self
    }

    /// Search exactly these points instead of a grid.
    #[must_use]
    pub fn candidates(mut self, candidates: Vec<Point>) -> Self {
        self.candidates = Some(candidates);
        self
    }

    /// Replace the scalar settings wholesale.
    #[must_use]
    pub fn config(mut self, config: CampaignConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the configuration and build the [`Campaign`].
    ///
    /// A missing search space is not an error here; it is reported when the
    /// campaign is run.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidAcquisitionParameter`] for a negative or non-finite
    ///   rule parameter, or zero query points.
    /// - [`Error::InvalidGridDensity`] for a zero grid density with bounds.
    /// - [`Error::DimensionMismatch`] if the bounds or candidates disagree
    ///   with the starter data's dimensionality.
    pub fn build(self) -> Result<Campaign<S, O>> {
        self.acquisition.validate()?;
        if self.config.n_querypts == 0 {
            return Err(Error::InvalidAcquisitionParameter {
                name: "n_querypts",
                value: 0.0,
            });
        }

        let dim = self.starter.dim();
        let search_space = match (self.candidates, self.bounds) {
            (Some(points), _) => {
                let set = CandidateSet::from_points(points)?;
                if !set.is_empty() && set.dim() != dim {
                    return Err(Error::DimensionMismatch {
                        expected: dim,
                        got: set.dim(),
                        index: 0,
                    });
                }
                Some(SearchSpace::Explicit(set))
            }
            (None, Some(bounds)) => {
                if bounds.dim() != dim {
                    return Err(Error::DimensionMismatch {
                        expected: dim,
                        got: bounds.dim(),
                        index: 0,
                    });
                }
                if self.config.grid_density == 0 {
                    return Err(Error::InvalidGridDensity);
                }
                Some(SearchSpace::Grid(bounds))
            }
            (None, None) => None,
        };

        Ok(Campaign {
            phase: CampaignPhase::Created,
            config: self.config,
            acquisition: self.acquisition,
            surrogate: self.surrogate,
            oracle: self.oracle,
            starter: self.starter,
            search_space,
            state: None,
            result: CampaignResult::new(),
        })
    }
}
