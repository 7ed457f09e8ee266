//! Force / acceleration contributors for the n-body engine
//!
//! Defines the acceleration trait, an `AccelSet` that sums its terms, and
//! direct-sum Newtonian gravity with a coincident-position guard (no
//! softening: bodies at the same point simply exert no force on each other)

use crate::simulation::states::{Body, NVec3};

/// Collection of acceleration terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new(),
        }
    }

    /// Add an acceleration term
    pub fn with(mut self, term: impl Acceleration + Send + Sync + 'static) -> Self {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total accelerations for all `bodies`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, bodies: &[Body], out: &mut [NVec3]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec3::zeros();
        }
        for term in &self.terms {
            term.acceleration(bodies, out);
        }
    }
}

/// Trait for acceleration sources.
/// Implementations add their contribution into `out[i]` for each body and
/// must only read `bodies`, never write back into them.
pub trait Acceleration {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec3]);
}

/// Force exerted on a body of mass `mi` at `xi` by a body of mass `mj` at `xj`.
///
/// `F = G mi mj / |r|^2` along `r = xj - xi`. Returns zero when the two
/// positions coincide.
#[allow(non_snake_case)]
pub fn pair_force(G: f64, xi: NVec3, mi: f64, xj: NVec3, mj: f64) -> NVec3 {
    let r = xj - xi;
    let r_sq = r.dot(&r);
    if r_sq == 0.0 {
        return NVec3::zeros();
    }

    let f_mag = G * mi * mj / r_sq;
    (f_mag / r_sq.sqrt()) * r
}

/// Direct O(n^2) Newtonian gravity
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, bodies: &[Body], out: &mut [NVec3]) {
        // Each body sums its own incoming forces, so the pass needs no
        // shared accumulator and pair order does not matter
        for (i, bi) in bodies.iter().enumerate() {
            let xi = bi.position();
            let mi = bi.mass();

            let mut total = NVec3::zeros();
            for (j, bj) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }
                total += pair_force(self.G, xi, mi, bj.position(), bj.mass());
            }

            out[i] += total / mi;
        }
    }
}
