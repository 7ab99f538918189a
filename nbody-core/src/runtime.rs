use crate::config::ScenarioConfig;
use crate::engine::Registry;
use crate::error::{ScenarioError, SimError};
use crate::stepper::{new_run_with_config, HaltReason, StepResult, Stepper};
use glam::DVec3;
use tracing::info;

/// Snapshot of one body, as a driver would poll it each frame
#[derive(Debug, Clone, PartialEq)]
pub struct BodyState {
    pub index: usize,
    pub mass: f64,
    pub pos: DVec3,
    pub vel: DVec3,
}

/// Final result of running a scenario
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub steps_run: u64,
    pub halt: Option<HaltReason>,
    pub bodies: Vec<BodyState>,
}

/// Live state for frame-driven stepping
#[derive(Debug, Clone)]
pub struct SimulationContext {
    pub registry: Registry,
    pub stepper: Stepper,
    pub max_steps: u64,
}

impl SimulationContext {
    pub fn is_halted(&self) -> bool {
        self.stepper.is_halted()
    }

    /// Steps integrated so far, as counted by the stepper
    pub fn current_step(&self) -> u64 {
        self.stepper.steps_taken()
    }

    /// True once the run halted or used up its step allowance
    pub fn is_finished(&self) -> bool {
        self.is_halted() || self.current_step() >= self.max_steps
    }
}

/// Main entry point: run a scenario until it halts or runs out of steps
pub fn run_scenario(
    scenario: &ScenarioConfig,
) -> Result<SimulationResult, Box<dyn std::error::Error>> {
    let mut ctx = build_simulation_context(scenario)?;

    while !ctx.is_finished() {
        step_simulation(&mut ctx, scenario.gravitational_constant)?;
    }

    info!(
        steps = ctx.current_step(),
        halt = ?ctx.stepper.halt_reason(),
        "scenario finished"
    );

    Ok(SimulationResult {
        steps_run: ctx.current_step(),
        halt: ctx.stepper.halt_reason(),
        bodies: get_body_states(&ctx),
    })
}

/// Validate a scenario and set up a fresh run for it
pub fn build_simulation_context(
    scenario: &ScenarioConfig,
) -> Result<SimulationContext, ScenarioError> {
    scenario.validate()?;
    let (registry, stepper) =
        new_run_with_config(scenario.to_bodies(), scenario.simulation_config());

    Ok(SimulationContext {
        registry,
        stepper,
        max_steps: scenario.steps,
    })
}

pub fn build_simulation_context_from_json(
    source: &str,
) -> Result<SimulationContext, ScenarioError> {
    let scenario = ScenarioConfig::from_json(source)?;
    build_simulation_context(&scenario)
}

/// Advance the context by one step with the gravitational constant for this frame
pub fn step_simulation(ctx: &mut SimulationContext, g: f64) -> Result<StepResult, SimError> {
    ctx.stepper.step(&mut ctx.registry, g)
}

pub fn get_body_states(ctx: &SimulationContext) -> Vec<BodyState> {
    ctx.registry
        .bodies()
        .iter()
        .enumerate()
        .map(|(index, b)| BodyState {
            index,
            mass: b.mass,
            pos: b.pos,
            vel: b.vel,
        })
        .collect()
}
