//! Many independent rescue trajectories run in parallel.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::collections::BTreeMap;

use crate::errors::{MultiSimError, ParameterError};
use crate::params::RescueParams;
use crate::rescue::EvoSim;

/// Batch execution settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultiSimOptions {
    /// Worker threads; `None` uses the global rayon pool
    pub threads: Option<usize>,
    /// Seed each epoch with its own index
    pub replicable: bool,
}

/// Results of `epochs` independent trajectories sharing one parameter set.
#[derive(Debug, Clone)]
pub struct MultiSim {
    params: RescueParams,
    results: Vec<EvoSim>,
}

impl MultiSim {
    /// Run `epochs` trajectories.
    ///
    /// # Examples
    ///
    /// ```
    /// use gillespie_evo::{MultiSim, MultiSimOptions, RescueParams};
    ///
    /// let params = RescueParams::new(200, 5, 0.2, 0.5, 1e-3, 100).unwrap();
    /// let options = MultiSimOptions { replicable: true, ..Default::default() };
    /// let batch = MultiSim::run(16, params, options).unwrap();
    /// assert_eq!(batch.epochs(), 16);
    /// assert!(batch.rescued_count() <= 16);
    /// ```
    pub fn run(
        epochs: usize,
        params: RescueParams,
        options: MultiSimOptions,
    ) -> Result<Self, MultiSimError> {
        if epochs == 0 {
            return Err(MultiSimError::NoEpochs);
        }
        params.validate()?;

        // Non-replicable epochs still get distinct, thread-independent seeds
        let seeds: Vec<u64> = if options.replicable {
            (0..epochs as u64).collect()
        } else {
            let mut master = rand::rng();
            (0..epochs).map(|_| master.random()).collect()
        };

        let simulate = || -> Result<Vec<EvoSim>, ParameterError> {
            seeds
                .par_iter()
                .map(|&seed| {
                    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
                    EvoSim::run(params, &mut rng)
                })
                .collect()
        };

        let results = match options.threads {
            Some(n) => ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| MultiSimError::ThreadPool(e.to_string()))?
                .install(simulate)?,
            None => simulate()?,
        };

        let batch = Self { params, results };
        log::info!(
            "Completed {epochs} epochs: {rescued} rescued, {extinct} extinct",
            rescued = batch.rescued_count(),
            extinct = batch.results.iter().filter(|sim| sim.is_extinct()).count()
        );
        Ok(batch)
    }

    pub fn params(&self) -> &RescueParams {
        &self.params
    }

    pub fn epochs(&self) -> usize {
        self.results.len()
    }

    /// Trajectories in epoch order.
    pub fn results(&self) -> &[EvoSim] {
        &self.results
    }

    /// Rescued trajectories keyed by epoch.
    pub fn rescued(&self) -> BTreeMap<usize, &EvoSim> {
        self.results
            .iter()
            .enumerate()
            .filter(|(_, sim)| sim.is_rescued())
            .collect()
    }

    pub fn rescued_count(&self) -> usize {
        self.results.iter().filter(|sim| sim.is_rescued()).count()
    }

    /// Fraction of epochs that were rescued.
    pub fn rescue_probability(&self) -> f64 {
        self.rescued_count() as f64 / self.results.len() as f64
    }
}
