use crate::config::{SimulationConfig, UpdateOrder};
use crate::engine::Registry;
use glam::DVec3;
use rayon::prelude::*;

/// Advance every body by one unit step of explicit Euler integration
/// (`v += a`, then `x += v`), using the update order from `config`.
pub fn step(registry: &mut Registry, g: f64, config: &SimulationConfig) {
    match config.order {
        UpdateOrder::Simultaneous => {
            step_simultaneous(registry, g, config.min_separation_sq, config.parallel)
        }
        UpdateOrder::Sequential => step_sequential(registry, g, config.min_separation_sq),
    }
}

/// All accelerations come from the positions at the start of the step.
fn step_simultaneous(registry: &mut Registry, g: f64, min_separation_sq: f64, parallel: bool) {
    let n = registry.count();
    let accelerations: Vec<DVec3> = if parallel {
        let snapshot = &*registry;
        (0..n)
            .into_par_iter()
            .map(|i| snapshot.acceleration_of(i, g, min_separation_sq))
            .collect()
    } else {
        (0..n)
            .map(|i| registry.acceleration_of(i, g, min_separation_sq))
            .collect()
    };

    for (body, accel) in registry.bodies_mut().iter_mut().zip(accelerations) {
        body.vel += accel;
        body.pos += body.vel;
    }
}

/// In-place update: body `i` sees the already moved bodies `0..i`.
fn step_sequential(registry: &mut Registry, g: f64, min_separation_sq: f64) {
    for i in 0..registry.count() {
        let accel = registry.acceleration_of(i, g, min_separation_sq);
        let body = &mut registry.bodies_mut()[i];
        body.vel += accel;
        body.pos += body.vel;
    }
}
