pub mod collision;
pub mod config;
pub mod engine;
pub mod error;
pub mod integrator;
pub mod runtime;
pub mod stepper;

pub use config::{BodyConfig, ScenarioConfig, SimulationConfig, UpdateOrder};
pub use engine::{Body, Registry, DEFAULT_RADIUS};
pub use error::{ScenarioError, SimError};
pub use runtime::{
    build_simulation_context, build_simulation_context_from_json, get_body_states, run_scenario,
    step_simulation, BodyState, SimulationContext, SimulationResult,
};
pub use stepper::{new_run, new_run_with_config, HaltReason, StepResult, Stepper};
