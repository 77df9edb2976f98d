//! Random draws of the next event: waiting time (tau) and reaction index (mu).

use rand::distr::Open01;
use rand::Rng;

/// Draw the exponential waiting time to the next event.
///
/// Returns `(1/a0) * ln(1/u)` with `u ~ Uniform(0, 1)`, i.e. an
/// `Exp(a0)` variate. `total_propensity` must be strictly positive.
pub fn sample_wait_time<R: Rng + ?Sized>(total_propensity: f64, rng: &mut R) -> f64 {
    debug_assert!(total_propensity > 0.0, "aggregate propensity must be positive");
    let u: f64 = rng.sample(Open01);
    (1.0 / total_propensity) * (1.0 / u).ln()
}

/// Draw the index of the reaction that fires next.
///
/// Reaction `i` is chosen with probability `propensities[i] / a0`.
pub fn select_reaction<R: Rng + ?Sized>(
    propensities: &[f64],
    total_propensity: f64,
    rng: &mut R,
) -> usize {
    let u: f64 = rng.sample(Open01);
    pick_index(propensities, u * total_propensity)
}

/// First index whose cumulative propensity exceeds `threshold`.
///
/// If rounding leaves the running sum at or below `threshold`, falls back
/// to the last reaction with a positive propensity (or the last index when
/// none is positive).
pub fn pick_index(propensities: &[f64], threshold: f64) -> usize {
    let mut cumulative = 0.0;
    for (index, &p) in propensities.iter().enumerate() {
        cumulative += p;
        if cumulative > threshold {
            return index;
        }
    }

    let fallback = propensities
        .iter()
        .rposition(|&p| p > 0.0)
        .unwrap_or_else(|| propensities.len().saturating_sub(1));
    log::warn!(
        "Reaction selection exhausted (cumulative {cumulative}, threshold {threshold}); using reaction {fallback}"
    );
    fallback
}
