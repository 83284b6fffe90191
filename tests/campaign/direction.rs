use bayesopt::{Acquisition, Campaign, Direction, Observations};

use crate::support::{SumModel, sum};

fn starter() -> Observations {
    Observations::new(vec![vec![2.0]], vec![5.0]).unwrap()
}

fn candidates() -> Vec<Vec<f64>> {
    vec![vec![0.5], vec![0.0], vec![1.0]]
}

#[test]
fn minimize_prefers_low_predictions() {
    for acquisition in [
        Acquisition::ucb(1.0),
        Acquisition::expected_improvement(0.01),
        Acquisition::probability_of_improvement(0.01),
    ] {
        let mut campaign = Campaign::builder(SumModel::new(1.0), sum, starter())
            .candidates(candidates())
            .acquisition(acquisition)
            .minimize()
            .build()
            .unwrap();

        let result = campaign.run(3).unwrap();
        let order: Vec<f64> = result
            .records()
            .iter()
            .map(|r| r.query_points[0][0])
            .collect();
        assert_eq!(order, vec![0.0, 0.5, 1.0], "{}", acquisition.name());
        assert_eq!(campaign.best().unwrap().1, 0.0);
        assert_eq!(result.best(Direction::Minimize).unwrap().0, &vec![0.0]);
    }
}

#[test]
fn maximize_prefers_high_predictions() {
    let starter = Observations::new(vec![vec![2.0]], vec![-5.0]).unwrap();
    let mut campaign = Campaign::builder(SumModel::new(1.0), sum, starter)
        .candidates(candidates())
        .acquisition(Acquisition::expected_improvement(0.0))
        .maximize()
        .build()
        .unwrap();

    let result = campaign.run(3).unwrap();
    let order: Vec<f64> = result
        .records()
        .iter()
        .map(|r| r.query_points[0][0])
        .collect();
    assert_eq!(order, vec![1.0, 0.5, 0.0]);
    assert_eq!(campaign.best().unwrap(), (&vec![1.0], 1.0));
}
