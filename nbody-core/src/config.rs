//! Run configuration and serde-loadable scenarios.
//!
//! A scenario is plain JSON:
//!
//! ```json
//! {
//!   "gravitational_constant": 1.0,
//!   "collision_enabled": true,
//!   "steps": 500,
//!   "order": "simultaneous",
//!   "bodies": [
//!     { "mass": 1000.0, "position": [-10.0, 0.0, 0.0] },
//!     { "mass": 1000.0, "position": [10.0, 0.0, 0.0], "velocity": [0.0, 0.5, 0.0] }
//!   ]
//! }
//! ```
//!
//! Everything except `bodies` has a default. A missing `velocity` means at
//! rest, a missing `radius` means [`DEFAULT_RADIUS`].

use crate::engine::{Body, DEFAULT_RADIUS};
use crate::error::ScenarioError;
use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Squared distance at or below which a pair exerts no force
pub const DEFAULT_MIN_SEPARATION_SQ: f64 = 1e-12;

pub const DEFAULT_STEPS: u64 = 1000;

/// How forces and updates are ordered within a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOrder {
    /// Every force uses the positions from the start of the step
    #[default]
    Simultaneous,
    /// Bodies are moved one at a time; later bodies see earlier updates
    Sequential,
}

/// Per-run stepper settings
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub collision_enabled: bool,
    pub order: UpdateOrder,
    pub min_separation_sq: f64,
    /// Accumulate forces on the rayon pool. Ignored for `Sequential`.
    pub parallel: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            collision_enabled: true,
            order: UpdateOrder::Simultaneous,
            min_separation_sq: DEFAULT_MIN_SEPARATION_SQ,
            parallel: false,
        }
    }
}

/// Initial state of one body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyConfig {
    pub mass: f64,
    pub position: DVec3,
    #[serde(default)]
    pub velocity: DVec3,
    #[serde(default = "default_radius")]
    pub radius: f64,
}

impl BodyConfig {
    fn validate(&self, index: usize) -> Result<(), ScenarioError> {
        if !self.mass.is_finite() || self.mass < 0.0 {
            return Err(ScenarioError::invalid_body(
                index,
                format!("mass must be finite and non-negative, got {}", self.mass),
            ));
        }
        if !self.position.is_finite() {
            return Err(ScenarioError::invalid_body(index, "position is not finite"));
        }
        if !self.velocity.is_finite() {
            return Err(ScenarioError::invalid_body(index, "velocity is not finite"));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ScenarioError::invalid_body(
                index,
                format!("radius must be finite and positive, got {}", self.radius),
            ));
        }
        Ok(())
    }

    pub fn to_body(&self) -> Body {
        Body::new(self.mass, self.position, self.velocity).with_radius(self.radius)
    }
}

/// A complete run description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    #[serde(default = "default_gravitational_constant")]
    pub gravitational_constant: f64,
    #[serde(default = "default_true")]
    pub collision_enabled: bool,
    #[serde(default)]
    pub order: UpdateOrder,
    #[serde(default = "default_steps")]
    pub steps: u64,
    #[serde(default)]
    pub parallel: bool,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Parse and validate a JSON scenario
    pub fn from_json(source: &str) -> Result<Self, ScenarioError> {
        let scenario: Self = serde_json::from_str(source)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check every body's initial values. An empty body list is valid.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        self.bodies
            .iter()
            .enumerate()
            .try_for_each(|(i, body)| body.validate(i))
    }

    pub fn simulation_config(&self) -> SimulationConfig {
        SimulationConfig {
            collision_enabled: self.collision_enabled,
            order: self.order,
            parallel: self.parallel,
            ..SimulationConfig::default()
        }
    }

    pub fn to_bodies(&self) -> Vec<Body> {
        self.bodies.iter().map(BodyConfig::to_body).collect()
    }
}

fn default_radius() -> f64 {
    DEFAULT_RADIUS
}

fn default_gravitational_constant() -> f64 {
    1.0
}

fn default_steps() -> u64 {
    DEFAULT_STEPS
}

fn default_true() -> bool {
    true
}
