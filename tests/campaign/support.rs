use bayesopt::surrogate::{Prediction, Surrogate};
use bayesopt::{Error, Observations, Oracle, Point, Result};

/// Predicts the coordinate sum as the mean, with a constant spread.
pub struct SumModel {
    pub std: f64,
    pub updates: usize,
}

impl SumModel {
    pub fn new(std: f64) -> Self {
        Self { std, updates: 0 }
    }
}

impl Surrogate for SumModel {
    fn update(&mut self, _data: &Observations) -> Result<()> {
        self.updates += 1;
        Ok(())
    }

    fn evaluate(&self, points: &[Point]) -> Result<Prediction> {
        Ok(Prediction::new(
            points.iter().map(|p| p.iter().sum()).collect(),
            vec![self.std; points.len()],
        ))
    }
}

/// Fails on the `fail_on`-th update (0-based).
pub struct FlakyModel {
    pub inner: SumModel,
    pub fail_on: usize,
}

impl Surrogate for FlakyModel {
    fn update(&mut self, data: &Observations) -> Result<()> {
        if self.inner.updates == self.fail_on {
            return Err(Error::Surrogate("fit diverged".to_string()));
        }
        self.inner.update(data)
    }

    fn evaluate(&self, points: &[Point]) -> Result<Prediction> {
        self.inner.evaluate(points)
    }
}

/// An oracle that answers with the coordinate sum and fails on a given call.
pub struct FlakyOracle {
    pub calls: usize,
    pub fail_on: usize,
}

impl Oracle for FlakyOracle {
    fn predict(&mut self, points: &[Point]) -> Result<Vec<f64>> {
        let call = self.calls;
        self.calls += 1;
        if call == self.fail_on {
            return Err(Error::Oracle("instrument offline".to_string()));
        }
        Ok(points.iter().map(|p| p.iter().sum()).collect())
    }
}

pub fn sum(x: &[f64]) -> f64 {
    x.iter().sum()
}

pub fn origin_starter(dim: usize) -> Observations {
    Observations::new(vec![vec![0.0; dim]], vec![0.0]).unwrap()
}
