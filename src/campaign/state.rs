//! The campaign's working state and the single-iteration step.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::acquisition::Acquisition;
use crate::observations::Observations;
use crate::oracle::Oracle;
use crate::space::CandidateSet;
use crate::surrogate::Surrogate;
use crate::types::Direction;
use crate::{Error, Result};

use super::record::IterationRecord;

/// Everything a campaign iteration reads and produces.
///
/// A state is never mutated in place. [`step`](Self::step) returns a new
/// state, so a failed iteration leaves the previous one untouched.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CampaignState {
    all_data: Observations,
    oracle_data: Option<Observations>,
    candidates: CandidateSet,
    iteration: usize,
}

impl CampaignState {
    /// Initial state from the starter data and the full candidate set.
    ///
    /// Candidates that coincide exactly with a starter point are dropped.
    #[must_use]
    pub fn new(starter: Observations, candidates: &CandidateSet) -> Self {
        let candidates = candidates.without_observed(starter.x());
        Self {
            all_data: starter,
            oracle_data: None,
            candidates,
            iteration: 0,
        }
    }

    /// Starter data plus every oracle observation so far.
    #[must_use]
    pub fn all_data(&self) -> &Observations {
        &self.all_data
    }

    /// Oracle observations only; `None` until the first iteration commits.
    #[must_use]
    pub fn oracle_data(&self) -> Option<&Observations> {
        self.oracle_data.as_ref()
    }

    /// Candidates not yet queried.
    #[must_use]
    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    /// Number of committed iterations.
    #[must_use]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Run one iteration from this state.
    ///
    /// In order: refit the surrogate on all data, select `n_querypts` points
    /// from the current candidates, query the oracle, append the results,
    /// and drop the queried points from the candidates.
    ///
    /// # Errors
    ///
    /// Any error from the surrogate, the acquisition rule or the oracle, and
    /// [`Error::OracleMismatch`] if the oracle returns the wrong number of
    /// values. On error `self` is unchanged and nothing is recorded.
    pub fn step<S, O>(
        &self,
        surrogate: &mut S,
        oracle: &mut O,
        acquisition: &Acquisition,
        n_querypts: usize,
        direction: Direction,
    ) -> Result<(Self, IterationRecord)>
    where
        S: Surrogate + ?Sized,
        O: Oracle + ?Sized,
    {
        trace_debug!(
            iteration = self.iteration,
            n_observations = self.all_data.len(),
            "updating surrogate"
        );
        surrogate.update(&self.all_data)?;

        let selection = acquisition.select(
            &*surrogate,
            &self.all_data,
            &self.candidates,
            n_querypts,
            direction,
        )?;

        trace_debug!(n_points = selection.points.len(), "querying oracle");
        let values = oracle.predict(&selection.points)?;
        if values.len() != selection.points.len() {
            return Err(Error::OracleMismatch {
                expected: selection.points.len(),
                got: values.len(),
            });
        }

        let all_data = self.all_data.appended(&selection.points, &values)?;
        let oracle_data = match &self.oracle_data {
            Some(data) => data.appended(&selection.points, &values)?,
            None => Observations::new(selection.points.clone(), values.clone())?,
        };
        let candidates = self.candidates.without_indices(&selection.indices);
        trace_debug!(n_remaining = candidates.len(), "committing iteration");

        let next = Self {
            all_data,
            oracle_data: Some(oracle_data),
            candidates,
            iteration: self.iteration + 1,
        };
        let record = IterationRecord {
            query_points: selection.points,
            oracle_result: values,
        };
        Ok((next, record))
    }
}
