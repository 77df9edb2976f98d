//! Independent replicate runs executed in parallel.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::sync::Arc;

use crate::errors::{BatchError, BuilderError};
use crate::simulation::{Configuration, Simulation, SimulationResult};

/// Run `replicates` independent copies of `configuration`.
///
/// Every replicate gets its own generator seeded from a master generator
/// seeded with `seed`, so the whole batch is reproducible regardless of the
/// thread count. `config.run.seed` is ignored. With `threads = None` the
/// global rayon pool is used.
pub fn run_replicates(
    configuration: &Configuration,
    replicates: usize,
    seed: u64,
    threads: Option<usize>,
) -> Result<Vec<SimulationResult>, BatchError> {
    if replicates == 0 {
        return Err(BatchError::NoReplicates);
    }

    let network = Arc::new(configuration.network.clone());

    // Generate one seed per replicate up front
    let mut master = Xoshiro256PlusPlus::seed_from_u64(seed);
    let seeds: Vec<u64> = (0..replicates).map(|_| master.random()).collect();

    // Validate once; failures surface before any thread is spawned
    let mut simulations = Vec::with_capacity(replicates);
    for &replicate_seed in &seeds {
        let simulation = Simulation::with_rng(
            Arc::clone(&network),
            configuration.initial_counts.clone(),
            configuration.run.clone(),
            Xoshiro256PlusPlus::seed_from_u64(replicate_seed),
        )
        .map_err(BuilderError::from)?;
        simulations.push(simulation);
    }

    log::info!("Running {replicates} replicates (master seed {seed})");

    let simulate = move || -> Vec<SimulationResult> {
        simulations
            .into_par_iter()
            .map(|mut simulation| {
                simulation.run();
                simulation.into_result()
            })
            .collect()
    };

    let results = match threads {
        Some(n) => ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map_err(|e| BatchError::ThreadPool(e.to_string()))?
            .install(simulate),
        None => simulate(),
    };

    Ok(results)
}
