use std::time::Instant;

use crate::simulation::engine::Engine;
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::params::{Parameters, G_SI};
use crate::simulation::states::{Body, NVec3, Rgb};
use crate::simulation::time_scale::TimeScaleMapping;

/// Deterministic cloud of `n` asteroid-sized bodies within ~1 AU
fn asteroid_cloud(n: usize) -> Vec<Body> {
    (0..n)
        .filter_map(|i| {
            let i_f = i as f64;
            // deterministic positions, no rand needed
            let x = NVec3::new(
                (i_f * 0.37).sin() * 1.5e11,
                (i_f * 0.13).cos() * 1.5e11,
                (i_f * 0.07).sin() * 1.5e10,
            );
            let v = NVec3::new(-x.y, x.x, 0.0).normalize() * 2.0e4;
            Body::new(1.0e18, x, v, 1.0e4, format!("rock-{i}"), Rgb::WHITE).ok()
        })
        .collect()
}

/// Time one direct-sum acceleration pass for growing n
pub fn bench_gravity() {
    let ns = [50, 100, 200, 400, 800, 1600];

    for n in ns {
        let bodies = asteroid_cloud(n);
        let forces = AccelSet::new().with(NewtonianGravity { G: G_SI });
        let mut out = vec![NVec3::zeros(); bodies.len()];

        // Warm up
        forces.accumulate_accels(&bodies, &mut out);

        let t0 = Instant::now();
        forces.accumulate_accels(&bodies, &mut out);
        let dt_direct = t0.elapsed().as_secs_f64();

        println!("N = {n:5}, accel pass = {dt_direct:10.6} s");
    }
}

/// Time full engine steps (two passes + bookkeeping) for growing n
pub fn bench_verlet() {
    let ns = [50, 100, 200, 400, 800];
    let steps = 10;

    for n in ns {
        let params = Parameters {
            history_len: 64,
            full_trace: false,
            ..Default::default()
        };
        let Ok(mut engine) = Engine::new(params, TimeScaleMapping::Piecewise) else {
            return;
        };
        for body in asteroid_cloud(n) {
            if engine.add_body(body).is_err() {
                return;
            }
        }

        let t0 = Instant::now();
        for _ in 0..steps {
            if let Err(err) = engine.step() {
                println!("N = {n:5}, aborted: {err}");
                break;
            }
        }
        let per_step = t0.elapsed().as_secs_f64() / steps as f64;

        println!("N = {n:5}, verlet step = {per_step:10.6} s");
    }
}
