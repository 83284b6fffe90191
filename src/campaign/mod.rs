//! The campaign controller: a sequential Bayesian optimization loop.
//!
//! A [`Campaign`] owns a surrogate, an oracle, an acquisition rule and the
//! starter observations. [`run`](Campaign::run) drives a fixed number of
//! iterations; each one refits the surrogate, picks the most promising
//! unsampled candidates, queries the oracle at those points and folds the
//! answers back into the data.
//!
//! ```text
//! Created ──run──▶ Running ──all iterations──▶ Completed
//!                     │ ├──hook breaks──────────▶ Cancelled
//!                     │ └──iteration error──────▶ Failed
//! ```
//!
//! Iterations are atomic: the working [`CampaignState`] is only replaced when
//! an iteration succeeds, so after a failure the campaign still exposes the
//! data and candidates as of the last good iteration.

mod builder;
mod hook;
mod record;
mod state;

pub use builder::{CampaignBuilder, DEFAULT_GRID_DENSITY, DEFAULT_N_QUERYPTS};
pub use hook::{CancelToken, IterationHook};
pub use record::{CampaignResult, IterationRecord};
pub use state::CampaignState;

use core::ops::ControlFlow;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::acquisition::Acquisition;
use crate::observations::Observations;
use crate::oracle::Oracle;
use crate::space::{Bounds, CandidateSet, DEFAULT_MAX_CANDIDATES};
use crate::surrogate::Surrogate;
use crate::types::{CampaignPhase, Direction};
use crate::{Error, Result};

/// Scalar campaign settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CampaignConfig {
    /// Whether larger or smaller oracle outputs are better.
    pub direction: Direction,
    /// Points queried per iteration.
    pub n_querypts: usize,
    /// Grid points per dimension when searching bounds.
    pub grid_density: usize,
    /// Upper limit on the number of enumerated grid points.
    pub max_candidates: usize,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Maximize,
            n_querypts: DEFAULT_N_QUERYPTS,
            grid_density: DEFAULT_GRID_DENSITY,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

/// Where candidates come from.
#[derive(Clone, Debug)]
enum SearchSpace {
    Explicit(CandidateSet),
    Grid(Bounds),
}

/// A sequential Bayesian optimization campaign.
///
/// # Examples
///
/// ```
/// use bayesopt::surrogate::{Prediction, Surrogate};
/// use bayesopt::{Acquisition, Bounds, Campaign, CampaignPhase, Observations, Point, Result};
///
/// // Believes the objective grows with x, with constant uncertainty.
/// struct Increasing;
///
/// impl Surrogate for Increasing {
///     fn update(&mut self, _data: &Observations) -> Result<()> {
///         Ok(())
///     }
///
///     fn evaluate(&self, points: &[Point]) -> Result<Prediction> {
///         let means = points.iter().map(|p| p[0]).collect();
///         Ok(Prediction::new(means, vec![0.1; points.len()]))
///     }
/// }
///
/// let starter = Observations::new(vec![vec![0.0]], vec![0.0]).unwrap();
/// let mut campaign = Campaign::builder(Increasing, |x: &[f64]| x[0], starter)
///     .bounds(Bounds::new(vec![(0.0, 1.0)]).unwrap())
///     .grid_density(3)
///     .acquisition(Acquisition::ucb(1.0))
///     .build()
///     .unwrap();
///
/// let result = campaign.run(2).unwrap();
/// assert_eq!(result.get("0").unwrap().query_points, vec![vec![1.0]]);
/// assert_eq!(result.get("1").unwrap().query_points, vec![vec![0.5]]);
/// assert_eq!(campaign.phase(), CampaignPhase::Completed);
/// assert_eq!(campaign.all_data().len(), 3);
/// ```
pub struct Campaign<S, O> {
    phase: CampaignPhase,
    config: CampaignConfig,
    acquisition: Acquisition,
    surrogate: S,
    oracle: O,
    starter: Observations,
    search_space: Option<SearchSpace>,
    /// Set when the loop starts; replaced after every committed iteration.
    state: Option<CampaignState>,
    result: CampaignResult,
}

impl<S: Surrogate, O: Oracle> Campaign<S, O> {
    /// Start building a campaign from its required parts.
    #[must_use]
    pub fn builder(surrogate: S, oracle: O, starter: Observations) -> CampaignBuilder<S, O> {
        CampaignBuilder::new(surrogate, oracle, starter)
    }

    /// Run `n_iterations` iterations to completion.
    ///
    /// A campaign runs once. Zero iterations is valid and completes
    /// immediately with an empty result.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidPhase`] if the campaign already ran.
    /// - [`Error::MissingSearchSpace`] if neither bounds nor candidates were
    ///   configured, and [`Error::SearchSpaceTooLarge`] if the grid exceeds
    ///   the limit. Both abort before the first iteration.
    /// - Any error from an iteration (see [`CampaignState::step`]). The
    ///   campaign moves to [`CampaignPhase::Failed`], and the records and
    ///   state of earlier iterations remain available.
    pub fn run(&mut self, n_iterations: usize) -> Result<CampaignResult> {
        self.run_with(n_iterations, ())
    }

    /// Like [`run`](Self::run), with a hook fired around every iteration.
    ///
    /// A hook that breaks stops the loop and leaves the campaign
    /// [`Cancelled`](CampaignPhase::Cancelled); the records of finished
    /// iterations are returned.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn run_with(
        &mut self,
        n_iterations: usize,
        mut hook: impl IterationHook,
    ) -> Result<CampaignResult> {
        if self.phase != CampaignPhase::Created {
            return Err(Error::InvalidPhase(self.phase));
        }

        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!(
            "campaign",
            n_iterations,
            direction = ?self.config.direction,
            acquisition = self.acquisition.name(),
        )
        .entered();

        let candidates = match self.initial_candidates() {
            Ok(candidates) => candidates,
            Err(e) => {
                self.phase = CampaignPhase::Failed;
                return Err(e);
            }
        };
        let mut state = CampaignState::new(self.starter.clone(), &candidates);
        trace_info!(
            n_candidates = state.candidates().len(),
            n_starter = self.starter.len(),
            "campaign started"
        );
        self.phase = CampaignPhase::Running;

        for _ in 0..n_iterations {
            if let ControlFlow::Break(()) = hook.before_iteration(&state) {
                return Ok(self.cancel(state));
            }

            let step = state.step(
                &mut self.surrogate,
                &mut self.oracle,
                &self.acquisition,
                self.config.n_querypts,
                self.config.direction,
            );
            let (next, record) = match step {
                Ok(committed) => committed,
                Err(e) => {
                    trace_info!(iteration = state.iteration(), error = %e, "iteration failed");
                    self.phase = CampaignPhase::Failed;
                    self.state = Some(state);
                    return Err(e);
                }
            };
            state = next;

            #[cfg(feature = "tracing")]
            {
                let best = state.all_data().best(self.config.direction).map(|(_, y)| y);
                tracing::info!(
                    iteration = state.iteration() - 1,
                    n_remaining = state.candidates().len(),
                    best = ?best,
                    "iteration completed"
                );
            }

            let flow = hook.after_iteration(&state, &record);
            self.result.push(record);
            if let ControlFlow::Break(()) = flow {
                return Ok(self.cancel(state));
            }
        }

        trace_info!(n_iterations, "campaign completed");
        self.phase = CampaignPhase::Completed;
        self.state = Some(state);
        Ok(self.result.clone())
    }

    fn cancel(&mut self, state: CampaignState) -> CampaignResult {
        trace_info!(iteration = state.iteration(), "campaign cancelled");
        self.phase = CampaignPhase::Cancelled;
        self.state = Some(state);
        self.result.clone()
    }

    fn initial_candidates(&self) -> Result<CandidateSet> {
        match &self.search_space {
            Some(SearchSpace::Explicit(set)) => Ok(set.clone()),
            Some(SearchSpace::Grid(bounds)) => {
                #[cfg(feature = "tracing")]
                {
                    let outside = self
                        .starter
                        .x()
                        .iter()
                        .filter(|p| !bounds.contains(p))
                        .count();
                    if outside > 0 {
                        tracing::warn!(
                            n_outside = outside,
                            "starter points lie outside the bounds"
                        );
                    }
                }
                CandidateSet::from_grid(
                    bounds,
                    self.config.grid_density,
                    self.config.max_candidates,
                )
            }
            None => Err(Error::MissingSearchSpace),
        }
    }
}

impl<S, O> Campaign<S, O> {
    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> CampaignPhase {
        self.phase
    }

    /// The scalar settings.
    #[must_use]
    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    /// The acquisition rule.
    #[must_use]
    pub fn acquisition(&self) -> &Acquisition {
        &self.acquisition
    }

    /// The surrogate model.
    #[must_use]
    pub fn surrogate(&self) -> &S {
        &self.surrogate
    }

    /// The oracle.
    #[must_use]
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// The working state, available once [`run`](Self::run) got past
    /// search-space setup.
    #[must_use]
    pub fn state(&self) -> Option<&CampaignState> {
        self.state.as_ref()
    }

    /// Starter data plus all oracle observations committed so far.
    #[must_use]
    pub fn all_data(&self) -> &Observations {
        self.state
            .as_ref()
            .map_or(&self.starter, CampaignState::all_data)
    }

    /// Oracle observations only; `None` before the first committed iteration.
    #[must_use]
    pub fn oracle_data(&self) -> Option<&Observations> {
        self.state.as_ref().and_then(CampaignState::oracle_data)
    }

    /// Candidates not yet queried; `None` before the campaign starts.
    #[must_use]
    pub fn candidates(&self) -> Option<&CandidateSet> {
        self.state.as_ref().map(CampaignState::candidates)
    }

    /// Records of committed iterations, including after a failure.
    #[must_use]
    pub fn result(&self) -> &CampaignResult {
        &self.result
    }

    /// Best observation so far under the campaign's direction, starter data
    /// included.
    #[must_use]
    pub fn best(&self) -> Option<(&crate::types::Point, f64)> {
        self.all_data().best(self.config.direction)
    }

    /// Consume the campaign, returning its surrogate and oracle.
    #[must_use]
    pub fn into_parts(self) -> (S, O) {
        (self.surrogate, self.oracle)
    }
}
