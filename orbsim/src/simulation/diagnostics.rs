//! Conserved quantities used to sanity-check a run
//!
//! Pairs at identical positions are skipped in the potential, matching the
//! zero-force guard in [`crate::simulation::forces::pair_force`].

use super::states::{Body, NVec3};

pub fn kinetic_energy(bodies: &[Body]) -> f64 {
    bodies
        .iter()
        .map(|b| 0.5 * b.mass() * b.velocity().norm_squared())
        .sum()
}

#[allow(non_snake_case)]
pub fn potential_energy(bodies: &[Body], G: f64) -> f64 {
    let mut u = 0.0;
    for (i, bi) in bodies.iter().enumerate() {
        for bj in &bodies[i + 1..] {
            let r = (bj.position() - bi.position()).norm();
            if r > 0.0 {
                u -= G * bi.mass() * bj.mass() / r;
            }
        }
    }
    u
}

#[allow(non_snake_case)]
pub fn total_energy(bodies: &[Body], G: f64) -> f64 {
    kinetic_energy(bodies) + potential_energy(bodies, G)
}

pub fn linear_momentum(bodies: &[Body]) -> NVec3 {
    bodies.iter().map(Body::momentum).sum()
}

/// Total angular momentum about the origin
pub fn angular_momentum(bodies: &[Body]) -> NVec3 {
    bodies
        .iter()
        .map(|b| b.position().cross(&b.momentum()))
        .sum()
}

/// Mass-weighted mean position, or the origin for an empty slice
pub fn center_of_mass(bodies: &[Body]) -> NVec3 {
    let mass: f64 = bodies.iter().map(Body::mass).sum();
    if mass == 0.0 {
        return NVec3::zeros();
    }
    bodies
        .iter()
        .map(|b| b.position() * b.mass())
        .sum::<NVec3>()
        / mass
}
