//! Propensity evaluation for the active regime.

use crate::kinetics::PropensityRule;

/// Evaluate every rule against `counts`, preserving rule order.
///
/// Values are returned as computed; a negative or NaN propensity is passed
/// through for the caller to handle.
///
/// # Examples
///
/// ```
/// use gillespie_ssa::kinetics::{evaluate, CombinatorialRule};
///
/// let rules = vec![CombinatorialRule::unimolecular(1.0, 0)];
/// assert_eq!(evaluate(&[10], &rules), vec![10.0]);
/// ```
pub fn evaluate<R: PropensityRule>(counts: &[u64], rules: &[R]) -> Vec<f64> {
    rules.iter().map(|rule| rule.propensity(counts)).collect()
}

/// Same as [`evaluate`], writing into a reusable buffer.
pub fn evaluate_into<R: PropensityRule>(counts: &[u64], rules: &[R], out: &mut Vec<f64>) {
    out.clear();
    out.extend(rules.iter().map(|rule| rule.propensity(counts)));
}

/// Sum of all propensities (the aggregate rate `a0`).
pub fn total_propensity(propensities: &[f64]) -> f64 {
    propensities.iter().sum()
}
