use core::ops::ControlFlow;
use std::thread;

use bayesopt::campaign::{CampaignState, IterationHook, IterationRecord};
use bayesopt::{Campaign, CampaignPhase, CancelToken};

use crate::support::{SumModel, origin_starter, sum};

fn grid_points(n: usize) -> Vec<Vec<f64>> {
    (1..=n).map(|i| vec![i as f64]).collect()
}

/// Cancels its token once `after` iterations have committed.
struct CancelAfter {
    token: CancelToken,
    after: usize,
}

impl IterationHook for CancelAfter {
    fn before_iteration(&mut self, state: &CampaignState) -> ControlFlow<()> {
        self.token.before_iteration(state)
    }

    fn after_iteration(
        &mut self,
        state: &CampaignState,
        _record: &IterationRecord,
    ) -> ControlFlow<()> {
        if state.iteration() == self.after {
            self.token.cancel();
        }
        ControlFlow::Continue(())
    }
}

#[test]
fn cancelled_before_start_runs_nothing() {
    let token = CancelToken::new();
    token.cancel();

    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .candidates(grid_points(5))
        .build()
        .unwrap();
    let result = campaign.run_with(3, token).unwrap();

    assert!(result.is_empty());
    assert_eq!(campaign.phase(), CampaignPhase::Cancelled);
    assert_eq!(campaign.surrogate().updates, 0);
    assert_eq!(campaign.candidates().unwrap().len(), 5);
}

#[test]
fn cancellation_keeps_finished_iterations() {
    let token = CancelToken::new();
    let hook = CancelAfter {
        token: token.clone(),
        after: 2,
    };

    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .candidates(grid_points(6))
        .build()
        .unwrap();
    let result = campaign.run_with(5, hook).unwrap();

    assert!(token.is_cancelled());
    assert_eq!(result.len(), 2);
    assert_eq!(result.get("0").unwrap().query_points, vec![vec![6.0]]);
    assert_eq!(result.get("1").unwrap().query_points, vec![vec![5.0]]);
    assert_eq!(campaign.phase(), CampaignPhase::Cancelled);
    assert_eq!(campaign.all_data().len(), 3);
    assert_eq!(campaign.candidates().unwrap().len(), 4);
}

#[test]
fn after_iteration_break_stops_immediately() {
    struct StopAbove(f64);

    impl IterationHook for StopAbove {
        fn after_iteration(
            &mut self,
            _state: &CampaignState,
            record: &IterationRecord,
        ) -> ControlFlow<()> {
            if record.oracle_result.iter().any(|&y| y > self.0) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }
    }

    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .candidates(grid_points(4))
        .build()
        .unwrap();
    let result = campaign.run_with(4, StopAbove(3.5)).unwrap();

    // The first pick is 4.0, which already clears the bar.
    assert_eq!(result.len(), 1);
    assert_eq!(campaign.phase(), CampaignPhase::Cancelled);
    assert_eq!(campaign.result().len(), 1);
}

#[test]
fn token_can_be_cancelled_from_another_thread() {
    let token = CancelToken::new();
    let remote = token.clone();
    thread::spawn(move || remote.cancel()).join().unwrap();

    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .candidates(grid_points(3))
        .build()
        .unwrap();
    let result = campaign.run_with(3, token).unwrap();
    assert!(result.is_empty());
    assert_eq!(campaign.phase(), CampaignPhase::Cancelled);
}
