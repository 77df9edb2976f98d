//! Single rescue trajectory.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::ParameterError;
use crate::generation::update_generation;
use crate::params::RescueParams;

/// How a trajectory ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Both populations reached zero.
    Extinct,
    /// Variants outnumbered the initial wild-type population.
    Rescued,
    /// Neither happened within `max_generations`.
    Undecided,
}

/// Population sizes for every simulated generation.
///
/// Index 0 holds the initial populations. The run stops early on extinction
/// or rescue, so the series may be shorter than `max_generations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvoSim {
    params: RescueParams,
    wild_type: Vec<u64>,
    variants: Vec<u64>,
    outcome: Outcome,
}

impl EvoSim {
    /// Simulate one trajectory to completion.
    pub fn run<R: Rng + ?Sized>(params: RescueParams, rng: &mut R) -> Result<Self, ParameterError> {
        params.validate()?;

        let mut wild_type = Vec::with_capacity(params.max_generations);
        let mut variants = Vec::with_capacity(params.max_generations);
        wild_type.push(params.wt);
        variants.push(params.sv);

        let (mut wt, mut sv) = (params.wt, params.sv);
        let mut outcome = Outcome::Undecided;
        for _ in 1..params.max_generations {
            (wt, sv) = update_generation(wt, sv, &params, rng);
            wild_type.push(wt);
            variants.push(sv);

            if wt + sv == 0 {
                outcome = Outcome::Extinct;
                break;
            }
            if sv > params.wt {
                outcome = Outcome::Rescued;
                break;
            }
        }

        log::trace!(
            "Trajectory ended {outcome:?} after {} generations",
            wild_type.len()
        );

        Ok(Self {
            params,
            wild_type,
            variants,
            outcome,
        })
    }

    pub fn params(&self) -> &RescueParams {
        &self.params
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_rescued(&self) -> bool {
        self.outcome == Outcome::Rescued
    }

    pub fn is_extinct(&self) -> bool {
        self.outcome == Outcome::Extinct
    }

    /// Number of recorded generations, including the initial one.
    pub fn generations(&self) -> usize {
        self.wild_type.len()
    }

    pub fn wild_type(&self) -> &[u64] {
        &self.wild_type
    }

    pub fn variants(&self) -> &[u64] {
        &self.variants
    }

    /// Combined population per generation.
    pub fn totals(&self) -> Vec<u64> {
        self.wild_type
            .iter()
            .zip(&self.variants)
            .map(|(wt, sv)| wt + sv)
            .collect()
    }
}
