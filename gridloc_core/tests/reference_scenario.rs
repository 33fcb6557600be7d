// gridloc_core/tests/reference_scenario.rs

use approx::assert_abs_diff_eq;
use gridloc_core::prelude::*;

const EXPECTED: [[f64; 5]; 4] = [
    [0.01105, 0.02464, 0.06799, 0.04472, 0.02465],
    [0.00715, 0.01017, 0.08696, 0.07988, 0.00935],
    [0.00739, 0.00894, 0.11272, 0.35350, 0.04065],
    [0.00910, 0.00715, 0.01434, 0.04313, 0.03642],
];

fn reference_map() -> ColorMap {
    ColorMap::parse_rows(&["RGGRR", "RRGRR", "RRGGR", "RRRRR"]).unwrap()
}

fn reference_motions() -> Vec<Displacement> {
    vec![
        Displacement::STAY,
        Displacement::RIGHT,
        Displacement::DOWN,
        Displacement::DOWN,
        Displacement::RIGHT,
    ]
}

#[test]
fn reference_scenario_matches_published_answer() {
    let tol = Tolerance::default();
    let measurements = vec![Label::from("G"); 5];
    let belief = estimate(&reference_map(), &measurements, &reference_motions(), 0.7, 0.8).unwrap();

    for (r, row) in EXPECTED.iter().enumerate() {
        for (c, expected) in row.iter().enumerate() {
            assert_abs_diff_eq!(belief.get(r, c).unwrap(), *expected, epsilon = tol.entry);
        }
    }
    assert_abs_diff_eq!(belief.total_mass(), 1.0, epsilon = tol.fixture);
    assert_eq!(belief.most_likely(), (2, 3));
}

#[test]
fn incremental_filter_matches_batch_estimate() {
    let map = reference_map();
    let measurements = vec![Label::from("G"); 5];
    let motions = reference_motions();
    let batch = estimate(&map, &measurements, &motions, 0.7, 0.8).unwrap();

    let mut filter = HistogramFilter::new(map, &FilterParams::new(0.7, 0.8).unwrap()).unwrap();
    for (motion, observation) in motions.iter().zip(&measurements) {
        filter
            .process(&FilterInput::Step {
                motion: *motion,
                observation: observation.clone(),
            })
            .unwrap();
        assert_abs_diff_eq!(filter.belief().total_mass(), 1.0, epsilon = 1e-9);
    }
    assert!(filter.belief().approx_eq(&batch, 1e-15));
}

#[test]
fn every_intermediate_belief_is_a_distribution() {
    let map = reference_map();
    let mut belief = Distribution::uniform(map.shape());
    let moves = [(0, 1), (3, -7), (-4, 5), (1, 0), (0, -1), (9, 9)];
    for (i, (dr, dc)) in moves.into_iter().enumerate() {
        belief = predict(&belief, Displacement::new(dr, dc), 0.35).unwrap();
        assert_abs_diff_eq!(belief.total_mass(), 1.0, epsilon = 1e-9);
        let observation = if i % 2 == 0 { "G" } else { "R" };
        belief = correct(&belief, &map, &Label::from(observation), 0.85).unwrap();
        assert_abs_diff_eq!(belief.total_mass(), 1.0, epsilon = 1e-9);
    }
}
