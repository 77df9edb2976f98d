//! Builder pattern for creating simulations.
//!
//! Provides a fluent API for configuring and creating simulations with
//! sensible defaults and comprehensive validation.

use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;

use crate::base::ReagentVector;
use crate::errors::BuilderError;
use crate::errors::ConfigError;
use crate::network::ReactionNetwork;
use crate::simulation::{
    NegativeCountPolicy, OscillationConfig, RescaleConfig, Simulation, SimulationConfig,
    StopCondition, TransitionPolicy, DEFAULT_PROGRESS_INTERVAL,
};

/// Builder for constructing Simulation instances with a fluent API.
///
/// # Examples
///
/// ```
/// use gillespie_ssa::kinetics::CombinatorialRule;
/// use gillespie_ssa::network::{Reaction, ReactionNetwork};
/// use gillespie_ssa::simulation::SimulationBuilder;
///
/// let network = ReactionNetwork::single_regime(
///     1,
///     vec![
///         Reaction::new(CombinatorialRule::unimolecular(1.0, 0), [1]),
///         Reaction::new(CombinatorialRule::unimolecular(1.0, 0), [-1]),
///     ],
/// )
/// .unwrap();
///
/// let mut sim = SimulationBuilder::new()
///     .network(network)
///     .initial_counts([100])
///     .max_iterations(1_000)
///     .seed(42)
///     .build()
///     .unwrap();
/// sim.run();
/// assert_eq!(sim.history().len(), sim.history().times().len());
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimulationBuilder {
    // Required parameters
    network: Option<Arc<ReactionNetwork>>,
    initial_counts: Option<ReagentVector>,
    stop: Option<Result<StopCondition, ConfigError>>,

    // Optional behaviour (with defaults)
    fixed_reagents: Vec<usize>,                // Default: none pinned
    rescale: Option<RescaleConfig>,            // Default: no rescaling
    oscillation: Option<OscillationConfig>,    // Default: single regime, no switching
    transitions: Option<TransitionPolicy>,     // Default: round robin
    start_with: Option<String>,                // Default: first regime
    negative_counts: NegativeCountPolicy,      // Default: halt
    progress_interval: Option<u64>,            // Default: every 1e6 iterations
    seed: Option<u64>,                         // Default: None (random)
    rng: Option<Xoshiro256PlusPlus>,
}

impl SimulationBuilder {
    /// Create a new simulation builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reaction network (required).
    pub fn network(mut self, network: impl Into<Arc<ReactionNetwork>>) -> Self {
        self.network = Some(network.into());
        self
    }

    /// Set the initial molecule counts (required).
    pub fn initial_counts(mut self, counts: impl Into<ReagentVector>) -> Self {
        self.initial_counts = Some(counts.into());
        self
    }

    /// Set the stop condition directly.
    pub fn stop_condition(mut self, stop: StopCondition) -> Self {
        self.stop = Some(Ok(stop));
        self
    }

    /// Stop once simulated time reaches `max_time`.
    pub fn max_time(self, max_time: f64) -> Self {
        self.stop_condition(StopCondition::Time(max_time))
    }

    /// Stop after `max_iterations` events.
    pub fn max_iterations(self, max_iterations: u64) -> Self {
        self.stop_condition(StopCondition::Iterations(max_iterations))
    }

    /// Select the stop condition by name (`"time"` or `"iterations"`).
    ///
    /// Errors (unknown name, missing limit) are reported by `build()`.
    pub fn stop_condition_named(
        mut self,
        name: &str,
        max_time: Option<f64>,
        max_iterations: Option<u64>,
    ) -> Self {
        self.stop = Some(StopCondition::from_name(name, max_time, max_iterations));
        self
    }

    /// Hold these species at their initial counts.
    ///
    /// A rescale event still redraws pinned counts in the snapshot it
    /// records; they are reset on the following event.
    pub fn fixed_reagents(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.fixed_reagents = indices.into_iter().collect();
        self
    }

    /// Enable Poisson rescaling above `threshold` towards `target_size`.
    pub fn rescale(mut self, threshold: u64, target_size: u64) -> Self {
        self.rescale = Some(RescaleConfig::new(threshold, target_size));
        self
    }

    /// Enable regime oscillation.
    pub fn oscillation(mut self, oscillation: OscillationConfig) -> Self {
        self.oscillation = Some(oscillation);
        self
    }

    /// Enable regime oscillation from `(regime, interval)` pairs.
    pub fn oscillate<I, S>(self, intervals: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        self.oscillation(OscillationConfig::new(intervals))
    }

    /// Override the next-regime policy used by oscillation.
    pub fn transitions(mut self, transitions: TransitionPolicy) -> Self {
        self.transitions = Some(transitions);
        self
    }

    /// Name of the regime active at time zero.
    pub fn start_with(mut self, regime: impl Into<String>) -> Self {
        self.start_with = Some(regime.into());
        self
    }

    /// Set the negative count policy (default: halt).
    pub fn negative_counts(mut self, policy: NegativeCountPolicy) -> Self {
        self.negative_counts = policy;
        self
    }

    /// Iterations between progress log lines; 0 disables them.
    pub fn progress_interval(mut self, interval: u64) -> Self {
        self.progress_interval = Some(interval);
        self
    }

    /// Set the random seed for reproducibility (default: None = random).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Use an explicit generator; takes precedence over `seed`.
    pub fn rng(mut self, rng: Xoshiro256PlusPlus) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Assemble the run settings without a network.
    pub fn config(&self) -> Result<SimulationConfig, BuilderError> {
        let stop = self
            .stop
            .clone()
            .ok_or(BuilderError::MissingRequired("stop_condition"))??;

        let oscillation = match (&self.oscillation, &self.transitions) {
            (Some(osc), Some(transitions)) => Some(osc.clone().with_transitions(transitions.clone())),
            (osc, _) => osc.clone(),
        };

        Ok(SimulationConfig {
            stop,
            fixed_reagents: self.fixed_reagents.clone(),
            rescale: self.rescale,
            oscillation,
            start_with: self.start_with.clone(),
            negative_counts: self.negative_counts,
            progress_interval: self.progress_interval.unwrap_or(DEFAULT_PROGRESS_INTERVAL),
            seed: self.seed,
        })
    }

    /// Build and validate the simulation.
    pub fn build(self) -> Result<Simulation, BuilderError> {
        let config = self.config()?;
        let network = self.network.ok_or(BuilderError::MissingRequired("network"))?;
        let initial = self
            .initial_counts
            .ok_or(BuilderError::MissingRequired("initial_counts"))?;

        let simulation = match self.rng {
            Some(rng) => Simulation::with_rng(network, initial, config, rng)?,
            None => Simulation::new(network, initial, config)?,
        };
        Ok(simulation)
    }
}
