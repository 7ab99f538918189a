//! Determinism tests - identical inputs give identical trajectories

use nbody_core::tests::test_helpers::{results_approx_equal, scattered_bodies, two_body_scenario};
use nbody_core::{new_run, run_scenario, Registry};

fn trajectory(g_schedule: &[f64]) -> Vec<Registry> {
    let (mut registry, mut stepper) = new_run(scattered_bodies(5), false);
    g_schedule
        .iter()
        .map(|&g| {
            stepper.step(&mut registry, g).expect("collision is off");
            registry.clone()
        })
        .collect()
}

#[test]
fn test_repeated_runs_are_bit_identical() {
    let schedule: Vec<f64> = (0..300).map(|i| 0.005 + 0.0005 * (i % 7) as f64).collect();

    let first = trajectory(&schedule);
    let second = trajectory(&schedule);

    assert_eq!(first, second);
}

#[test]
fn test_scenario_determinism() {
    let results: Vec<_> = (0..5)
        .map(|_| run_scenario(&two_body_scenario()).expect("Run failed"))
        .collect();

    for i in 1..results.len() {
        assert!(
            results_approx_equal(&results[0], &results[i], 0.0),
            "Run {} should match run 0",
            i
        );
    }
}
