//! Parameters of the evolutionary rescue model.

use serde::{Deserialize, Serialize};

use crate::errors::ParameterError;

/// Starting populations and per-generation rates.
///
/// A stressor lowers wild-type fitness to `1 - r`. Variants carry a
/// selective advantage `s` on top of that, so their fitness is
/// `(1 - r)(1 + s)`. Each new wild-type individual mutates into a variant
/// with probability `u`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RescueParams {
    /// Initial wild-type population
    pub wt: u64,
    /// Initial standing variation (variant) population
    pub sv: u64,
    /// Environmental stress
    pub r: f64,
    /// Selective advantage of variants
    pub s: f64,
    /// Per-individual mutation probability
    pub u: f64,
    /// Upper bound on recorded generations, including the initial one
    pub max_generations: usize,
}

impl RescueParams {
    /// Create and validate a parameter set.
    ///
    /// # Examples
    ///
    /// ```
    /// use gillespie_evo::RescueParams;
    ///
    /// let params = RescueParams::new(1000, 10, 0.2, 0.5, 1e-3, 100).unwrap();
    /// assert!((params.variant_fitness() - 1.2).abs() < 1e-12);
    /// assert!(RescueParams::new(1000, 10, 1.0, 0.5, 1e-3, 100).is_err());
    /// ```
    pub fn new(
        wt: u64,
        sv: u64,
        r: f64,
        s: f64,
        u: f64,
        max_generations: usize,
    ) -> Result<Self, ParameterError> {
        let params = Self {
            wt,
            sv,
            r,
            s,
            u,
            max_generations,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), ParameterError> {
        if !(0.0..1.0).contains(&self.r) {
            return Err(ParameterError::InvalidStress(self.r));
        }
        if !self.s.is_finite() || self.s < 0.0 {
            return Err(ParameterError::InvalidSelection(self.s));
        }
        if !(0.0..=1.0).contains(&self.u) {
            return Err(ParameterError::InvalidMutationRate(self.u));
        }
        if self.max_generations == 0 {
            return Err(ParameterError::InvalidGenerations);
        }
        Ok(())
    }

    pub fn wild_type_fitness(&self) -> f64 {
        1.0 - self.r
    }

    pub fn variant_fitness(&self) -> f64 {
        self.wild_type_fitness() * (1.0 + self.s)
    }
}
