//! Tests for non-finite state handling

use glam::DVec3;
use nbody_core::tests::test_helpers::resting_body;
use nbody_core::{new_run, Body, HaltReason, SimError, StepResult};

#[test]
fn test_non_finite_velocity_halts_as_degenerate() {
    let (mut registry, mut stepper) = new_run(
        [
            Body::new(1.0, DVec3::ZERO, DVec3::new(f64::INFINITY, 0.0, 0.0)),
            resting_body(1.0, 50.0, 0.0, 0.0),
        ],
        false,
    );

    assert_eq!(
        stepper.step(&mut registry, 1.0),
        Ok(StepResult::Halted(HaltReason::DegenerateState))
    );
    assert_eq!(stepper.halt_reason(), Some(HaltReason::DegenerateState));
}

#[test]
fn test_overflowing_force_halts_before_collision_check() {
    // m_a * m_b overflows to infinity
    let (mut registry, mut stepper) = new_run(
        [
            resting_body(1e300, 0.0, 0.0, 0.0),
            resting_body(1e300, 10.0, 0.0, 0.0),
        ],
        true,
    );

    assert_eq!(
        stepper.step(&mut registry, 1.0),
        Ok(StepResult::Halted(HaltReason::DegenerateState))
    );
    assert_eq!(
        stepper.step(&mut registry, 1.0),
        Err(SimError::AlreadyHalted(HaltReason::DegenerateState))
    );
}

#[test]
fn test_coincident_bodies_stay_finite() {
    let (mut registry, mut stepper) = new_run(
        [
            resting_body(5.0, 1.0, 1.0, 1.0),
            resting_body(5.0, 1.0, 1.0, 1.0),
            resting_body(5.0, 40.0, 0.0, 0.0),
        ],
        false,
    );

    for _ in 0..5 {
        assert_eq!(stepper.step(&mut registry, 1.0), Ok(StepResult::Continuing));
    }
    assert!(registry.bodies().iter().all(Body::is_finite));
}
