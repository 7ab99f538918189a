//! One-step-at-a-time driver for a run.
//!
//! A [`Stepper`] owns the per-run flags (collision checking, update order,
//! halt state) and advances a [`Registry`] it does not own. The driver calls
//! [`Stepper::step`] once per frame with the current gravitational constant
//! and reads positions back from the registry.
//!
//! The stepper does not validate its inputs. A negative `g` turns attraction
//! into repulsion, which is well defined; other nonsensical inputs produce
//! whatever the arithmetic produces, caught only by the finiteness check.

use crate::collision::find_collision;
use crate::config::SimulationConfig;
use crate::engine::{Body, Registry};
use crate::error::SimError;
use crate::integrator;
use std::fmt;
use tracing::{info, trace, warn};

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// Two bodies' spheres overlapped after integration
    Collision,
    /// A position or velocity became non-finite
    DegenerateState,
}

impl fmt::Display for HaltReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Collision => write!(f, "collision"),
            Self::DegenerateState => write!(f, "degenerate state"),
        }
    }
}

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Continuing,
    Halted(HaltReason),
}

impl StepResult {
    pub fn is_halted(&self) -> bool {
        matches!(self, Self::Halted(_))
    }
}

#[derive(Debug, Clone)]
pub struct Stepper {
    config: SimulationConfig,
    halted: Option<HaltReason>,
    steps_taken: u64,
    // Fixed by `new_run*`, or by the first step for a bare `Stepper::new`.
    body_count: Option<usize>,
}

impl Stepper {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            config,
            halted: None,
            steps_taken: 0,
            body_count: None,
        }
    }

    /// Body count of the run this stepper drives, once known
    pub fn body_count(&self) -> Option<usize> {
        self.body_count
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }

    pub fn halt_reason(&self) -> Option<HaltReason> {
        self.halted
    }

    /// Number of steps successfully integrated, including the halting one
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Advance `registry` by one unit step.
    ///
    /// Integration runs first; the finiteness check and then the collision
    /// check look at the updated positions. After a halt every further call
    /// fails with [`SimError::AlreadyHalted`] and leaves `registry` untouched.
    ///
    /// The body count is fixed for a run: a registry whose count differs from
    /// the one the run started with is rejected with
    /// [`SimError::BodyCountChanged`], also without touching it.
    pub fn step(&mut self, registry: &mut Registry, g: f64) -> Result<StepResult, SimError> {
        if let Some(reason) = self.halted {
            return Err(SimError::AlreadyHalted(reason));
        }

        let expected = *self.body_count.get_or_insert(registry.count());
        if registry.count() != expected {
            return Err(SimError::BodyCountChanged {
                expected,
                found: registry.count(),
            });
        }

        integrator::step(registry, g, &self.config);
        self.steps_taken += 1;
        trace!(step = self.steps_taken, bodies = registry.count(), g, "step");

        if let Some(index) = registry.bodies().iter().position(|b| !b.is_finite()) {
            warn!(
                step = self.steps_taken,
                body = index,
                "non-finite body state, halting"
            );
            return Ok(self.halt(HaltReason::DegenerateState));
        }

        if self.config.collision_enabled {
            if let Some((a, b)) = find_collision(registry.bodies()) {
                info!(step = self.steps_taken, a, b, "collision detected");
                return Ok(self.halt(HaltReason::Collision));
            }
        }

        Ok(StepResult::Continuing)
    }

    fn halt(&mut self, reason: HaltReason) -> StepResult {
        self.halted = Some(reason);
        StepResult::Halted(reason)
    }
}

/// Start a fresh run with the default configuration and the given collision flag
pub fn new_run(
    bodies: impl IntoIterator<Item = Body>,
    collision_enabled: bool,
) -> (Registry, Stepper) {
    let config = SimulationConfig {
        collision_enabled,
        ..SimulationConfig::default()
    };
    new_run_with_config(bodies, config)
}

pub fn new_run_with_config(
    bodies: impl IntoIterator<Item = Body>,
    config: SimulationConfig,
) -> (Registry, Stepper) {
    let registry = Registry::initialize(bodies);
    let stepper = Stepper {
        body_count: Some(registry.count()),
        ..Stepper::new(config)
    };
    (registry, stepper)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec3;

    #[test]
    fn empty_registry_keeps_continuing() {
        let (mut registry, mut stepper) = new_run(Vec::new(), true);
        for _ in 0..3 {
            assert_eq!(stepper.step(&mut registry, 1.0), Ok(StepResult::Continuing));
        }
        assert_eq!(stepper.steps_taken(), 3);
        assert!(registry.is_empty());
    }

    #[test]
    fn single_body_drifts() {
        let body = Body::new(5.0, DVec3::ZERO, DVec3::new(1.0, 0.0, 0.0));
        let (mut registry, mut stepper) = new_run([body], true);
        stepper.step(&mut registry, 1.0).unwrap();
        assert_eq!(registry.get(0).unwrap().pos, DVec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn bare_stepper_locks_count_on_first_step() {
        let mut stepper = Stepper::new(SimulationConfig::default());
        assert_eq!(stepper.body_count(), None);

        let mut registry = Registry::initialize([Body::at_rest(1.0, DVec3::ZERO)]);
        stepper.step(&mut registry, 1.0).unwrap();
        assert_eq!(stepper.body_count(), Some(1));

        let mut other = Registry::new();
        assert_eq!(
            stepper.step(&mut other, 1.0),
            Err(SimError::BodyCountChanged {
                expected: 1,
                found: 0
            })
        );
    }

    #[test]
    fn halt_reason_display() {
        assert_eq!(HaltReason::Collision.to_string(), "collision");
        assert_eq!(HaltReason::DegenerateState.to_string(), "degenerate state");
    }
}
