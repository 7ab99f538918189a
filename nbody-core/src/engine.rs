use crate::error::SimError;
use glam::DVec3;
use tracing::debug;

/// Radius shared by every body unless a scenario says otherwise
pub const DEFAULT_RADIUS: f64 = 1.0;

/// A point mass in the simulation.
///
/// Gravity treats the body as an ideal point; `radius` only matters for
/// collision detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub mass: f64,
    pub pos: DVec3,
    pub vel: DVec3,
    pub radius: f64,
}

impl Body {
    pub fn new(mass: f64, pos: DVec3, vel: DVec3) -> Self {
        Self {
            mass,
            pos,
            vel,
            radius: DEFAULT_RADIUS,
        }
    }

    /// A body with zero initial velocity
    pub fn at_rest(mass: f64, pos: DVec3) -> Self {
        Self::new(mass, pos, DVec3::ZERO)
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// True when both position and velocity hold finite values
    pub fn is_finite(&self) -> bool {
        self.pos.is_finite() && self.vel.is_finite()
    }
}

/// Gravitational force exerted on `body` by `other`.
///
/// Magnitude is `g * m_body * m_other / d^2`, directed from `body` toward
/// `other`. Returns `None` when the squared separation is at or below
/// `min_separation_sq`; such pairs contribute no force.
pub fn pairwise_force(
    body: &Body,
    other: &Body,
    g: f64,
    min_separation_sq: f64,
) -> Option<DVec3> {
    let r = other.pos - body.pos;
    let dist_sq = r.length_squared();
    if dist_sq <= min_separation_sq {
        return None;
    }
    let force_mag = g * body.mass * other.mass / dist_sq;
    Some(r.normalize() * force_mag)
}

/// The ordered set of bodies for one run.
///
/// A body's index is its identity; the order never changes during a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    bodies: Vec<Body>,
}

impl Registry {
    pub fn new() -> Self {
        Self { bodies: Vec::new() }
    }

    /// Build a registry from bodies in insertion order
    pub fn initialize(bodies: impl IntoIterator<Item = Body>) -> Self {
        Self {
            bodies: bodies.into_iter().collect(),
        }
    }

    pub fn count(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Body, SimError> {
        self.bodies.get(index).ok_or(SimError::IndexOutOfRange {
            index,
            count: self.bodies.len(),
        })
    }

    pub fn set(&mut self, index: usize, body: Body) -> Result<(), SimError> {
        let count = self.bodies.len();
        let slot = self
            .bodies
            .get_mut(index)
            .ok_or(SimError::IndexOutOfRange { index, count })?;
        *slot = body;
        Ok(())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Current positions in registry order
    pub fn positions(&self) -> impl Iterator<Item = DVec3> + '_ {
        self.bodies.iter().map(|b| b.pos)
    }

    /// Net gravitational force on the body at `index` from every other body
    pub fn compute_force(
        &self,
        index: usize,
        g: f64,
        min_separation_sq: f64,
    ) -> Result<DVec3, SimError> {
        self.get(index)?;
        Ok(self.force_on(index, g, min_separation_sq))
    }

    /// Acceleration of the body at `index`; zero for massless bodies
    pub fn compute_acceleration(
        &self,
        index: usize,
        g: f64,
        min_separation_sq: f64,
    ) -> Result<DVec3, SimError> {
        self.get(index)?;
        Ok(self.acceleration_of(index, g, min_separation_sq))
    }

    // Callers guarantee `index < count()`.
    pub(crate) fn force_on(&self, index: usize, g: f64, min_separation_sq: f64) -> DVec3 {
        let body = &self.bodies[index];
        let mut force = DVec3::ZERO;

        for (j, other) in self.bodies.iter().enumerate() {
            if j == index {
                continue;
            }
            match pairwise_force(body, other, g, min_separation_sq) {
                Some(f) => force += f,
                None => debug!(body = index, other = j, "coincident pair skipped"),
            }
        }

        force
    }

    pub(crate) fn acceleration_of(&self, index: usize, g: f64, min_separation_sq: f64) -> DVec3 {
        let mass = self.bodies[index].mass;
        if mass == 0.0 {
            return DVec3::ZERO;
        }
        self.force_on(index, g, min_separation_sq) / mass
    }
}
