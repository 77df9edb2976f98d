//! One generation of reproduction, selection and mutation.

use rand::Rng;
use rand_distr::{Binomial, Distribution, Poisson};

use crate::params::RescueParams;

/// Draw from Poisson(`mean`), with a zero mean giving zero.
fn poisson<R: Rng + ?Sized>(mean: f64, rng: &mut R) -> u64 {
    if mean <= 0.0 {
        return 0;
    }
    match Poisson::new(mean) {
        Ok(p) => p.sample(rng) as u64,
        Err(_) => mean.round() as u64,
    }
}

/// Advance the `(wild type, variant)` populations by one generation.
///
/// 1. Variants reproduce: `sv' ~ Poisson(sv·(1-r)(1+s))`
/// 2. Wild type reproduces: `wt' ~ Poisson(wt·(1-r))`
/// 3. `m ~ Binomial(wt', u)` new wild-type individuals mutate into variants
pub fn update_generation<R: Rng + ?Sized>(
    wt: u64,
    sv: u64,
    params: &RescueParams,
    rng: &mut R,
) -> (u64, u64) {
    let mut sv_new = poisson(sv as f64 * params.variant_fitness(), rng);
    let mut wt_new = poisson(wt as f64 * params.wild_type_fitness(), rng);

    if wt_new > 0 && params.u > 0.0 {
        let mutants = match Binomial::new(wt_new, params.u) {
            Ok(b) => b.sample(rng),
            Err(_) => 0,
        };
        wt_new -= mutants;
        sv_new += mutants;
    }

    (wt_new, sv_new)
}
