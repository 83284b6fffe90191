use bayesopt::{Acquisition, Bounds, Campaign, CampaignPhase, NoisyOracle};

use crate::support::{SumModel, origin_starter, sum};

#[test]
fn unit_interval_walkthrough() {
    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .bounds(Bounds::new(vec![(0.0, 1.0)]).unwrap())
        .grid_density(3)
        .acquisition(Acquisition::ucb(1.0))
        .build()
        .unwrap();

    let result = campaign.run(2).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result.get("0").unwrap().query_points, vec![vec![1.0]]);
    assert_eq!(result.get("0").unwrap().oracle_result, vec![1.0]);
    assert_eq!(result.get("1").unwrap().query_points, vec![vec![0.5]]);
    assert_eq!(result.get("1").unwrap().oracle_result, vec![0.5]);

    assert_eq!(campaign.phase(), CampaignPhase::Completed);
    assert_eq!(campaign.all_data().len(), 3);
    assert_eq!(
        campaign.oracle_data().unwrap().x(),
        &[vec![1.0], vec![0.5]]
    );
    assert!(campaign.candidates().unwrap().is_empty());
    assert_eq!(campaign.surrogate().updates, 2);
}

#[test]
fn starter_points_are_removed_from_grid() {
    let starter = bayesopt::Observations::new(vec![vec![0.5]], vec![3.0]).unwrap();
    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, starter)
        .bounds(Bounds::new(vec![(0.0, 1.0)]).unwrap())
        .grid_density(3)
        .build()
        .unwrap();

    campaign.run(0).unwrap();
    assert_eq!(
        campaign.candidates().unwrap().points(),
        &[vec![0.0], vec![1.0]]
    );
}

#[test]
fn batch_is_ordered_best_last() {
    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .candidates(vec![vec![1.0], vec![0.25], vec![0.5]])
        .n_querypts(2)
        .build()
        .unwrap();

    let result = campaign.run(1).unwrap();
    assert_eq!(
        result.get("0").unwrap().query_points,
        vec![vec![0.5], vec![1.0]]
    );
    assert_eq!(campaign.candidates().unwrap().points(), &[vec![0.25]]);
}

#[test]
fn noiseless_oracle_matches_truth() {
    let oracle = NoisyOracle::new(sum, 0.0).unwrap();
    let mut campaign = Campaign::builder(SumModel::new(0.5), oracle, origin_starter(2))
        .bounds(Bounds::new(vec![(0.0, 1.0), (-1.0, 1.0)]).unwrap())
        .grid_density(5)
        .n_querypts(2)
        .build()
        .unwrap();

    let result = campaign.run(3).unwrap();
    for (_, record) in result.iter() {
        for (x, y) in record.query_points.iter().zip(&record.oracle_result) {
            assert_eq!(*y, sum(x));
        }
    }
    assert_eq!(result.best(campaign.config().direction).unwrap().1, 2.0);
    assert_eq!(campaign.best().unwrap().0, &vec![1.0, 1.0]);
}

#[test]
fn into_parts_returns_components() {
    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, origin_starter(1))
        .candidates(vec![vec![0.5], vec![1.0]])
        .build()
        .unwrap();
    campaign.run(2).unwrap();
    let (model, _oracle) = campaign.into_parts();
    assert_eq!(model.updates, 2);
}

#[test]
fn starter_outside_bounds_keeps_full_grid() {
    let starter = bayesopt::Observations::new(vec![vec![2.0]], vec![2.0]).unwrap();
    let mut campaign = Campaign::builder(SumModel::new(0.1), sum, starter)
        .bounds(Bounds::new(vec![(0.0, 1.0)]).unwrap())
        .grid_density(3)
        .build()
        .unwrap();

    campaign.run(1).unwrap();
    assert_eq!(campaign.all_data().len(), 2);
    assert_eq!(
        campaign.candidates().unwrap().points(),
        &[vec![0.0], vec![0.5]]
    );
}
