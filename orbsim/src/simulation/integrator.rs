//! Fixed-step velocity-Verlet integrator
//!
//! One step evaluates the force set twice: once at the current positions and
//! once at the updated positions. Each pass writes into its own buffer, so no
//! body ever sees a half-updated neighbour.

use super::forces::AccelSet;
use super::states::{Body, NVec3};

/// Advance `bodies` by one step of `dt` seconds using velocity-Verlet.
///
/// x(t+dt) = x(t) + v(t) dt + 1/2 a(t) dt^2
/// v(t+dt) = v(t) + 1/2 (a(t) + a(t+dt)) dt
///
/// Every new position is also recorded into that body's history.
pub fn velocity_verlet(bodies: &mut [Body], forces: &AccelSet, dt: f64) {
    let n = bodies.len();
    if n == 0 { // no bodies, return
        return;
    }
    let half_dt = 0.5 * dt;
    let half_dt2 = 0.5 * dt * dt;

    // a(t) from x(t)
    let mut a_old = vec![NVec3::zeros(); n];
    forces.accumulate_accels(bodies, &mut a_old);

    // Positions: only depend on the body's own state and a_old
    for (b, a) in bodies.iter_mut().zip(a_old.iter()) {
        let x_new = b.position() + b.velocity() * dt + *a * half_dt2;
        b.set_position(x_new);
        b.record_position(x_new);
    }

    // a(t+dt) from x(t+dt)
    let mut a_new = vec![NVec3::zeros(); n];
    forces.accumulate_accels(bodies, &mut a_new);

    // Velocities: average of old and new acceleration
    for ((b, a0), a1) in bodies.iter_mut().zip(a_old.iter()).zip(a_new.iter()) {
        let v_new = b.velocity() + (*a0 + *a1) * half_dt;
        b.set_velocity(v_new);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::forces::NewtonianGravity;
    use crate::simulation::states::Rgb;
    use approx::assert_relative_eq;

    #[test]
    fn free_body_moves_in_straight_line() {
        let mut bodies = vec![
            Body::new(1.0, NVec3::zeros(), NVec3::new(2.0, 0.0, -1.0), 0.0, "free", Rgb::WHITE).unwrap(),
        ];
        let forces = AccelSet::new().with(NewtonianGravity { G: 1.0 });

        velocity_verlet(&mut bodies, &forces, 0.5);

        assert_eq!(bodies[0].position(), NVec3::new(1.0, 0.0, -0.5));
        assert_eq!(bodies[0].velocity(), NVec3::new(2.0, 0.0, -1.0));
        assert_eq!(bodies[0].history().len(), 2);
    }

    #[test]
    fn step_matches_hand_computed_verlet() {
        // Two unit masses at x = -1 and x = 1, G = 1: |a| = 1/4 toward the centre
        let mut bodies = vec![
            Body::new(1.0, NVec3::new(-1.0, 0.0, 0.0), NVec3::zeros(), 0.0, "l", Rgb::WHITE).unwrap(),
            Body::new(1.0, NVec3::new(1.0, 0.0, 0.0), NVec3::zeros(), 0.0, "r", Rgb::WHITE).unwrap(),
        ];
        let forces = AccelSet::new().with(NewtonianGravity { G: 1.0 });
        let dt = 0.1;

        velocity_verlet(&mut bodies, &forces, dt);

        let x_l = -1.0 + 0.5 * 0.25 * dt * dt;
        assert_relative_eq!(bodies[0].position().x, x_l, max_relative = 1e-14);
        assert_relative_eq!(bodies[1].position().x, -x_l, max_relative = 1e-14);

        let sep = 2.0 * x_l.abs();
        let a_new = 1.0 / (sep * sep);
        let v_l = 0.5 * (0.25 + a_new) * dt;
        assert_relative_eq!(bodies[0].velocity().x, v_l, max_relative = 1e-14);
        assert_relative_eq!(bodies[1].velocity().x, -v_l, max_relative = 1e-14);
    }

    #[test]
    fn empty_slice_is_a_no_op() {
        let mut bodies: Vec<Body> = Vec::new();
        velocity_verlet(&mut bodies, &AccelSet::new(), 1.0);
        assert!(bodies.is_empty());
    }
}
