//! Combinatorial rate rules.
//!
//! A rule maps the current molecule counts to a reaction propensity. The
//! named variants follow Gillespie's (1976) combinatorial formulas for each
//! reaction order, scaled by a stochastic rate constant `c`:
//!
//! | Reaction                | Variant             | Propensity                |
//! |-------------------------|---------------------|---------------------------|
//! | `* -> ...`              | `Constant`          | `c`                       |
//! | `Sj -> ...`             | `Unimolecular`      | `c·Xj`                    |
//! | `Sj + Sk -> ...`        | `Bimolecular`       | `c·Xj·Xk`                 |
//! | `2Sj -> ...`            | `Dimerization`      | `c·Xj(Xj-1)/2`            |
//! | `Si + Sj + Sk -> ...`   | `Trimolecular`      | `c·Xi·Xj·Xk`              |
//! | `Sj + 2Sk -> ...`       | `MixedTrimolecular` | `c·Xj·Xk(Xk-1)/2`         |
//! | `3Sj -> ...`            | `Trimerization`     | `c·Xj(Xj-1)(Xj-2)/6`      |
//!
//! Laws outside this table can be supplied as a [`CustomRule`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Anything that can turn molecule counts into a propensity.
///
/// Implementations must be pure: the same counts always give the same value.
pub trait PropensityRule {
    /// Propensity for the given counts. No sign validation is implied.
    fn propensity(&self, counts: &[u64]) -> f64;
}

type RuleFn = dyn Fn(&[u64]) -> f64 + Send + Sync;

/// A user-supplied propensity function with a label for inspection.
#[derive(Clone)]
pub struct CustomRule {
    label: String,
    func: Arc<RuleFn>,
}

impl CustomRule {
    pub fn new<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[u64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl fmt::Debug for CustomRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomRule")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

impl PropensityRule for CustomRule {
    fn propensity(&self, counts: &[u64]) -> f64 {
        (self.func)(counts)
    }
}

/// Reaction-order rule carrying its rate constant and species indices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "order", rename_all = "snake_case")]
pub enum CombinatorialRule {
    Constant {
        rate: f64,
    },
    Unimolecular {
        rate: f64,
        species: usize,
    },
    Bimolecular {
        rate: f64,
        a: usize,
        b: usize,
    },
    Dimerization {
        rate: f64,
        species: usize,
    },
    Trimolecular {
        rate: f64,
        a: usize,
        b: usize,
        c: usize,
    },
    MixedTrimolecular {
        rate: f64,
        single: usize,
        pair: usize,
    },
    Trimerization {
        rate: f64,
        species: usize,
    },
    /// Not serializable; networks containing it cannot be written to JSON.
    #[serde(skip)]
    Custom(CustomRule),
}

impl CombinatorialRule {
    pub fn constant(rate: f64) -> Self {
        Self::Constant { rate }
    }

    pub fn unimolecular(rate: f64, species: usize) -> Self {
        Self::Unimolecular { rate, species }
    }

    pub fn bimolecular(rate: f64, a: usize, b: usize) -> Self {
        Self::Bimolecular { rate, a, b }
    }

    pub fn dimerization(rate: f64, species: usize) -> Self {
        Self::Dimerization { rate, species }
    }

    pub fn trimolecular(rate: f64, a: usize, b: usize, c: usize) -> Self {
        Self::Trimolecular { rate, a, b, c }
    }

    pub fn mixed_trimolecular(rate: f64, single: usize, pair: usize) -> Self {
        Self::MixedTrimolecular { rate, single, pair }
    }

    pub fn trimerization(rate: f64, species: usize) -> Self {
        Self::Trimerization { rate, species }
    }

    pub fn custom<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn(&[u64]) -> f64 + Send + Sync + 'static,
    {
        Self::Custom(CustomRule::new(label, func))
    }

    /// Rate constant, or `None` for custom rules.
    pub fn rate(&self) -> Option<f64> {
        match *self {
            Self::Constant { rate }
            | Self::Unimolecular { rate, .. }
            | Self::Bimolecular { rate, .. }
            | Self::Dimerization { rate, .. }
            | Self::Trimolecular { rate, .. }
            | Self::MixedTrimolecular { rate, .. }
            | Self::Trimerization { rate, .. } => Some(rate),
            Self::Custom(_) => None,
        }
    }

    /// Molecularity of the reaction, or `None` for custom rules.
    pub fn order(&self) -> Option<u8> {
        match self {
            Self::Constant { .. } => Some(0),
            Self::Unimolecular { .. } => Some(1),
            Self::Bimolecular { .. } | Self::Dimerization { .. } => Some(2),
            Self::Trimolecular { .. }
            | Self::MixedTrimolecular { .. }
            | Self::Trimerization { .. } => Some(3),
            Self::Custom(_) => None,
        }
    }

    /// Species indices this rule reads.
    pub fn species(&self) -> Vec<usize> {
        match *self {
            Self::Constant { .. } | Self::Custom(_) => Vec::new(),
            Self::Unimolecular { species, .. }
            | Self::Dimerization { species, .. }
            | Self::Trimerization { species, .. } => vec![species],
            Self::Bimolecular { a, b, .. } => vec![a, b],
            Self::Trimolecular { a, b, c, .. } => vec![a, b, c],
            Self::MixedTrimolecular { single, pair, .. } => vec![single, pair],
        }
    }
}

#[inline]
fn count(counts: &[u64], index: usize) -> f64 {
    counts.get(index).copied().unwrap_or(0) as f64
}

/// `x(x-1)...(x-k+1)` with every factor floored at zero.
#[inline]
fn falling(x: f64, k: u32) -> f64 {
    (0..k).map(|i| (x - i as f64).max(0.0)).product()
}

impl PropensityRule for CombinatorialRule {
    fn propensity(&self, counts: &[u64]) -> f64 {
        match *self {
            Self::Constant { rate } => rate,
            Self::Unimolecular { rate, species } => rate * count(counts, species),
            Self::Bimolecular { rate, a, b } => rate * count(counts, a) * count(counts, b),
            Self::Dimerization { rate, species } => {
                rate * falling(count(counts, species), 2) / 2.0
            }
            Self::Trimolecular { rate, a, b, c } => {
                rate * count(counts, a) * count(counts, b) * count(counts, c)
            }
            Self::MixedTrimolecular { rate, single, pair } => {
                rate * count(counts, single) * falling(count(counts, pair), 2) / 2.0
            }
            Self::Trimerization { rate, species } => {
                rate * falling(count(counts, species), 3) / 6.0
            }
            Self::Custom(ref rule) => rule.propensity(counts),
        }
    }
}
