use bayesopt::{Bounds, Campaign, CampaignPhase, Error, Observations, Oracle, Point, Result};

use crate::support::{FlakyModel, FlakyOracle, SumModel, origin_starter, sum};

#[test]
fn too_few_candidates_fails_first_iteration() {
    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .candidates(vec![vec![0.5], vec![1.0]])
        .n_querypts(3)
        .build()
        .unwrap();

    let err = campaign.run(1).unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientCandidates {
            requested: 3,
            available: 2
        }
    ));
    assert_eq!(campaign.phase(), CampaignPhase::Failed);
    assert!(campaign.result().is_empty());
    assert_eq!(campaign.candidates().unwrap().len(), 2);
}

#[test]
fn exhausting_candidates_keeps_completed_iterations() {
    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .candidates(vec![vec![0.2], vec![0.4], vec![0.6]])
        .n_querypts(2)
        .build()
        .unwrap();

    let err = campaign.run(2).unwrap_err();
    assert!(matches!(
        err,
        Error::InsufficientCandidates {
            requested: 2,
            available: 1
        }
    ));
    assert_eq!(campaign.result().len(), 1);
    assert_eq!(campaign.all_data().len(), 3);
    assert_eq!(campaign.candidates().unwrap().points(), &[vec![0.2]]);
}

#[test]
fn missing_search_space_is_fatal() {
    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .build()
        .unwrap();
    assert!(matches!(campaign.run(3), Err(Error::MissingSearchSpace)));
    assert_eq!(campaign.phase(), CampaignPhase::Failed);
    assert_eq!(campaign.surrogate().updates, 0);
}

#[test]
fn dimension_mismatch_is_rejected_at_build() {
    let err = Campaign::builder(SumModel::new(0.1), sum, origin_starter(2))
        .bounds(Bounds::new(vec![(0.0, 1.0)]).unwrap())
        .build()
        .err()
        .unwrap();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            expected: 2,
            got: 1,
            ..
        }
    ));

    let err = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .candidates(vec![vec![0.0], vec![0.0, 1.0]])
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, Error::DimensionMismatch { .. }));
}

#[test]
fn oversized_grid_fails_before_first_iteration() {
    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(3))
        .bounds(Bounds::new(vec![(0.0, 1.0); 3]).unwrap())
        .max_candidates(1000)
        .build()
        .unwrap();

    let err = campaign.run(1).unwrap_err();
    assert!(matches!(
        err,
        Error::SearchSpaceTooLarge {
            size: Some(1_030_301),
            limit: 1000
        }
    ));
    assert_eq!(campaign.phase(), CampaignPhase::Failed);
    assert!(campaign.state().is_none());
}

#[test]
fn oracle_failure_leaves_last_good_state() {
    let oracle = FlakyOracle {
        calls: 0,
        fail_on: 1,
    };
    let mut campaign = Campaign::builder(SumModel::new(0.1), oracle, origin_starter(1))
        .candidates(vec![vec![0.25], vec![0.5], vec![0.75], vec![1.0]])
        .build()
        .unwrap();

    let err = campaign.run(3).unwrap_err();
    assert!(matches!(err, Error::Oracle(_)));
    assert_eq!(campaign.phase(), CampaignPhase::Failed);

    // Iteration 0 committed; iteration 1 left no trace.
    assert_eq!(campaign.result().len(), 1);
    assert_eq!(campaign.all_data().len(), 2);
    assert_eq!(campaign.oracle_data().unwrap().x(), &[vec![1.0]]);
    assert_eq!(
        campaign.candidates().unwrap().points(),
        &[vec![0.25], vec![0.5], vec![0.75]]
    );
    assert_eq!(campaign.state().unwrap().iteration(), 1);
}

#[test]
fn surrogate_failure_aborts_without_querying() {
    let model = FlakyModel {
        inner: SumModel::new(0.1),
        fail_on: 0,
    };
    let oracle = FlakyOracle {
        calls: 0,
        fail_on: usize::MAX,
    };
    let mut campaign = Campaign::builder(model, oracle, origin_starter(1))
        .candidates(vec![vec![0.5]])
        .build()
        .unwrap();

    assert!(matches!(campaign.run(1), Err(Error::Surrogate(_))));
    assert_eq!(campaign.oracle().calls, 0);
    assert!(campaign.oracle_data().is_none());
}

#[test]
fn oracle_answer_count_must_match() {
    struct Echo;

    impl Oracle for Echo {
        fn predict(&mut self, points: &[Point]) -> Result<Vec<f64>> {
            Ok(points.iter().flat_map(|p| [p[0], p[0]]).collect())
        }
    }

    let mut campaign = Campaign::builder(SumModel::new(0.1), Echo, origin_starter(1))
        .candidates(vec![vec![0.5], vec![1.0]])
        .build()
        .unwrap();

    assert!(matches!(
        campaign.run(1),
        Err(Error::OracleMismatch {
            expected: 1,
            got: 2
        })
    ));
    assert_eq!(campaign.all_data().len(), 1);
}

#[test]
fn rerun_after_failure_is_rejected() {
    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .build()
        .unwrap();
    let _ = campaign.run(1);
    assert!(matches!(
        campaign.run(1),
        Err(Error::InvalidPhase(CampaignPhase::Failed))
    ));
}

#[test]
fn starter_data_is_validated() {
    assert!(matches!(
        Observations::new(vec![vec![0.0]], vec![0.0, 1.0]),
        Err(Error::LengthMismatch { x: 1, y: 2 })
    ));
    assert!(matches!(
        Observations::new(Vec::new(), Vec::new()),
        Err(Error::EmptyObservations)
    ));
}
