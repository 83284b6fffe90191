use core::ops::ControlFlow;
use std::collections::HashSet;

use bayesopt::campaign::{CampaignState, IterationHook, IterationRecord};
use bayesopt::{Acquisition, Bounds, Campaign};

use crate::support::{SumModel, origin_starter, sum};

/// Snapshots sizes around every iteration.
#[derive(Default)]
struct Sizes {
    before: Vec<(usize, usize)>,
    after: Vec<(usize, usize, usize)>,
}

impl IterationHook for Sizes {
    fn before_iteration(&mut self, state: &CampaignState) -> ControlFlow<()> {
        self.before
            .push((state.all_data().len(), state.candidates().len()));
        ControlFlow::Continue(())
    }

    fn after_iteration(
        &mut self,
        state: &CampaignState,
        record: &IterationRecord,
    ) -> ControlFlow<()> {
        self.after.push((
            state.all_data().len(),
            state.candidates().len(),
            record.query_points.len(),
        ));
        ControlFlow::Continue(())
    }
}

fn key(point: &[f64]) -> Vec<u64> {
    point.iter().map(|v| v.to_bits()).collect()
}

#[test]
fn data_grows_and_candidates_shrink_by_batch() {
    let mut sizes = Sizes::default();
    let mut campaign = Campaign::builder(SumModel::new(0.2), sum, origin_starter(2))
        .bounds(Bounds::new(vec![(0.0, 1.0), (0.0, 1.0)]).unwrap())
        .grid_density(5)
        .n_querypts(3)
        .build()
        .unwrap();

    let result = campaign.run_with(5, &mut sizes).unwrap();
    assert_eq!(result.len(), 5);

    // 25 grid points minus the starter at the origin.
    assert_eq!(sizes.before[0], (1, 24));
    for (i, &(data, remaining, batch)) in sizes.after.iter().enumerate() {
        assert_eq!(batch, 3);
        assert_eq!(data, 1 + 3 * (i + 1));
        assert_eq!(remaining, 24 - 3 * (i + 1));
    }
    assert_eq!(campaign.all_data().len(), 16);
    assert_eq!(campaign.candidates().unwrap().len(), 9);
}

#[test]
fn queried_points_are_never_repeated() {
    let starter = origin_starter(2);
    let mut campaign = Campaign::builder(SumModel::new(1.0), sum, starter.clone())
        .bounds(Bounds::new(vec![(0.0, 1.0), (0.0, 2.0)]).unwrap())
        .grid_density(4)
        .n_querypts(2)
        .acquisition(Acquisition::ucb(2.0))
        .build()
        .unwrap();

    let result = campaign.run(7).unwrap();

    let mut seen: HashSet<Vec<u64>> = starter.x().iter().map(|p| key(p)).collect();
    for (_, record) in result.iter() {
        for point in &record.query_points {
            assert!(seen.insert(key(point)), "{point:?} queried twice");
        }
    }
    for point in campaign.candidates().unwrap().points() {
        assert!(!seen.contains(&key(point)), "{point:?} still a candidate");
    }
    assert_eq!(seen.len() + campaign.candidates().unwrap().len(), 16);
}

#[test]
fn oracle_only_sees_snapshot_points() {
    let candidates = vec![vec![0.1], vec![0.7], vec![0.4], vec![0.9]];
    let allowed: HashSet<Vec<u64>> = candidates.iter().map(|p| key(p)).collect();
    let mut asked = Vec::new();
    let oracle = |x: &[f64]| {
        asked.push(key(x));
        x[0]
    };

    let mut campaign = Campaign::builder(SumModel::new(0.1), oracle, origin_starter(1))
        .candidates(candidates)
        .build()
        .unwrap();
    campaign.run(4).unwrap();
    drop(campaign);

    assert_eq!(asked.len(), 4);
    assert!(asked.iter().all(|k| allowed.contains(k)));
}
