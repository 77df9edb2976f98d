//! Simulation engine for multi-regime reaction networks.
//!
//! This module provides the event loop that orchestrates propensity
//! evaluation, waiting-time and reaction sampling, regime switching,
//! reagent pinning and population rescaling.

use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Poisson};
use rand_xoshiro::Xoshiro256PlusPlus;
use std::sync::Arc;

use crate::base::{CountError, ReagentVector, SimulationClock};
use crate::errors::ConfigError;
use crate::kinetics::{evaluate_into, sample_wait_time, select_reaction, total_propensity};
use crate::network::{ReactionNetwork, Regime};
use crate::simulation::configs::RegimeSchedule;
use crate::simulation::{
    History, NegativeCountPolicy, RegimeTimeTracker, SimulationConfig, SimulationResult,
    TerminationReason,
};

/// Result of a single call to [`Simulation::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// An event fired after waiting `tau`.
    Fired { reaction: usize, tau: f64 },
    /// The run is over; further calls return the same reason.
    Finished(TerminationReason),
}

/// Main simulation engine.
///
/// Owns all mutable state of one run. The network is shared read-only and
/// may back any number of concurrent simulations.
#[derive(Debug)]
pub struct Simulation {
    /// Shared reaction definitions
    network: Arc<ReactionNetwork>,
    /// Run settings
    config: SimulationConfig,
    /// Counts at time zero (source for pinned reagents)
    initial: ReagentVector,
    /// Live counts
    counts: ReagentVector,
    clock: SimulationClock,
    /// Index of the active regime
    active: usize,
    /// Time spent in the active regime since entering it
    regime_time: f64,
    schedule: Option<RegimeSchedule>,
    tracker: RegimeTimeTracker,
    history: History,
    /// Random number generator (using Xoshiro256++ for better performance)
    rng: Xoshiro256PlusPlus,
    /// Scratch buffer for the active regime's propensities
    propensities: Vec<f64>,
    rescale_events: u64,
    regime_switches: u64,
    termination: Option<TerminationReason>,
}

impl Simulation {
    /// Create a simulation, seeding the RNG from `config.seed` or OS entropy.
    pub fn new(
        network: Arc<ReactionNetwork>,
        initial: ReagentVector,
        config: SimulationConfig,
    ) -> Result<Self, ConfigError> {
        let rng = if let Some(seed) = config.seed {
            Xoshiro256PlusPlus::seed_from_u64(seed)
        } else {
            Xoshiro256PlusPlus::from_seed(rand::rng().random())
        };
        Self::with_rng(network, initial, config, rng)
    }

    /// Create a simulation driven by an explicitly provided generator.
    ///
    /// `config.seed` is ignored.
    pub fn with_rng(
        network: Arc<ReactionNetwork>,
        initial: ReagentVector,
        config: SimulationConfig,
        rng: Xoshiro256PlusPlus,
    ) -> Result<Self, ConfigError> {
        let resolved = config.resolve(&network, &initial)?;

        let mut tracker = RegimeTimeTracker::new(network.regime_names());
        tracker.enter(resolved.start, 0.0);

        let propensities = Vec::with_capacity(
            network.regimes().iter().map(Regime::len).max().unwrap_or(0),
        );

        Ok(Self {
            history: History::new(initial.clone(), 0.0),
            counts: initial.clone(),
            initial,
            clock: SimulationClock::new(),
            active: resolved.start,
            regime_time: 0.0,
            schedule: resolved.schedule,
            tracker,
            rng,
            propensities,
            rescale_events: 0,
            regime_switches: 0,
            termination: None,
            network,
            config,
        })
    }

    pub fn network(&self) -> &ReactionNetwork {
        &self.network
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Current counts.
    pub fn counts(&self) -> &ReagentVector {
        &self.counts
    }

    pub fn initial_counts(&self) -> &ReagentVector {
        &self.initial
    }

    pub fn time(&self) -> f64 {
        self.clock.time()
    }

    pub fn iteration(&self) -> u64 {
        self.clock.iteration()
    }

    pub fn clock(&self) -> SimulationClock {
        self.clock
    }

    /// The active regime.
    pub fn active_regime(&self) -> &Regime {
        &self.network.regimes()[self.active]
    }

    pub fn active_regime_index(&self) -> usize {
        self.active
    }

    /// Time elapsed since the active regime was entered.
    pub fn time_in_regime(&self) -> f64 {
        self.regime_time
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn tracker(&self) -> &RegimeTimeTracker {
        &self.tracker
    }

    /// Propensities computed on the most recent step.
    pub fn last_propensities(&self) -> &[f64] {
        &self.propensities
    }

    pub fn rescale_events(&self) -> u64 {
        self.rescale_events
    }

    pub fn regime_switches(&self) -> u64 {
        self.regime_switches
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    pub fn is_finished(&self) -> bool {
        self.termination.is_some()
    }

    /// Close the active regime's interval and enter the stopped state.
    fn finish(&mut self, reason: TerminationReason) -> StepOutcome {
        self.tracker.exit(self.active, self.clock.time());
        self.termination = Some(reason);
        log::info!(
            "Simulation stopped ({reason}) at iteration {iteration}, time {time}",
            iteration = self.clock.iteration(),
            time = self.clock.time()
        );
        StepOutcome::Finished(reason)
    }

    /// Switch to the next regime if the active one has outlived its interval.
    fn switch_regime_if_due(&mut self) {
        let Some(schedule) = &self.schedule else {
            return;
        };
        if self.regime_time <= schedule.intervals[self.active] {
            return;
        }

        let now = self.clock.time();
        let next = schedule.next[self.active];
        log::debug!(
            "Switching regime '{from}' -> '{to}' at time {now} (in-regime time {elapsed})",
            from = self.network.regimes()[self.active].name(),
            to = self.network.regimes()[next].name(),
            elapsed = self.regime_time
        );
        self.tracker.exit(self.active, now);
        self.active = next;
        self.regime_time = 0.0;
        self.tracker.enter(next, now);
        self.regime_switches += 1;
    }

    /// Overwrite pinned species with their initial counts.
    fn pin_fixed_reagents(&self, counts: &mut ReagentVector) {
        for &index in &self.config.fixed_reagents {
            counts.set(index, self.initial[index]);
        }
    }

    /// Poisson-redraw every count when the total exceeds the threshold.
    fn rescale_if_needed(&mut self, counts: &mut ReagentVector) {
        let Some(rescale) = self.config.rescale else {
            return;
        };
        let total = counts.total();
        if !rescale.should_rescale(total) {
            return;
        }

        let factor = rescale.scale_factor();
        for count in counts.as_mut_slice() {
            let mean = *count as f64 * factor;
            *count = if mean > 0.0 {
                match Poisson::new(mean) {
                    Ok(poisson) => poisson.sample(&mut self.rng) as u64,
                    Err(_) => mean.round() as u64,
                }
            } else {
                0
            };
        }
        self.rescale_events += 1;
        log::debug!(
            "Rescaled population from {total} to {new_total} at time {time}",
            new_total = counts.total(),
            time = self.clock.time()
        );
    }

    /// Advance the simulation by one reaction event.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(reason) = self.termination {
            return StepOutcome::Finished(reason);
        }

        // 1. Stop condition and extinction
        if self
            .config
            .stop
            .is_met(self.clock.time(), self.clock.iteration())
        {
            return self.finish(TerminationReason::StopConditionReached);
        }
        if self.counts.is_extinct() {
            return self.finish(TerminationReason::Extinction);
        }

        // 2. Regime switch
        self.switch_regime_if_due();

        let interval = self.config.progress_interval;
        if interval > 0 && self.clock.iteration() % interval == 0 {
            log::info!(
                "Regime '{regime}', iteration {iteration}, simulation time {time}",
                regime = self.network.regimes()[self.active].name(),
                iteration = self.clock.iteration(),
                time = self.clock.time()
            );
        }

        // 3-4. Propensities and their sum
        let network = Arc::clone(&self.network);
        let regime = &network.regimes()[self.active];
        evaluate_into(self.counts.as_slice(), regime.reactions(), &mut self.propensities);
        let total = total_propensity(&self.propensities);
        if !(total > 0.0 && total.is_finite()) {
            return self.finish(TerminationReason::NoFeasibleReaction);
        }

        // 5-6. Waiting time and firing reaction
        let tau = sample_wait_time(total, &mut self.rng);
        let reaction = select_reaction(&self.propensities, total, &mut self.rng);
        let change = regime.reactions()[reaction].change();

        // 7. Update a fresh snapshot
        let applied = match self.counts.checked_apply(change) {
            Err(CountError::Underflow(species))
                if self.config.negative_counts == NegativeCountPolicy::Clamp =>
            {
                log::warn!("Reaction {reaction} drove species {species} below zero; clamped to 0");
                self.counts.clamped_apply(change)
            }
            applied => applied,
        };
        let mut next = match applied {
            Ok(next) => next,
            Err(CountError::Underflow(species)) => {
                return self.finish(TerminationReason::NegativeCount { reaction, species });
            }
            Err(CountError::Overflow(species)) => {
                return self.finish(TerminationReason::CountOverflow { reaction, species });
            }
        };

        self.clock.advance(tau);
        self.regime_time += tau;

        // 8-9. Pinning, then rescaling
        self.pin_fixed_reagents(&mut next);
        self.rescale_if_needed(&mut next);

        // 10. Record
        self.history.push(next.clone(), self.clock.time());
        self.counts = next;
        self.clock.tick();

        StepOutcome::Fired { reaction, tau }
    }

    /// Run until a terminal condition is reached.
    pub fn run(&mut self) -> TerminationReason {
        if let Some(reason) = self.termination {
            return reason;
        }
        log::info!(
            "Starting simulation in regime '{regime}' with counts {counts} ({stop:?})",
            regime = self.active_regime().name(),
            counts = self.counts,
            stop = self.config.stop
        );
        loop {
            if let StepOutcome::Finished(reason) = self.step() {
                return reason;
            }
        }
    }

    /// Run for at most `events` additional events.
    ///
    /// Returns the termination reason if the run finished meanwhile.
    pub fn run_for(&mut self, events: u64) -> Option<TerminationReason> {
        for _ in 0..events {
            if let StepOutcome::Finished(reason) = self.step() {
                return Some(reason);
            }
        }
        self.termination
    }

    /// Detach the outputs of this run.
    pub fn into_result(self) -> SimulationResult {
        SimulationResult {
            iterations: self.clock.iteration(),
            final_time: self.clock.time(),
            reason: self.termination,
            rescale_events: self.rescale_events,
            regime_switches: self.regime_switches,
            history: self.history,
            tracker: self.tracker,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinetics::CombinatorialRule;
    use crate::network::Reaction;
    use crate::simulation::{OscillationConfig, SimulationBuilder, StopCondition};

    /// Birth-death process on one species with birth rate above death rate.
    fn birth_death(birth: f64, death: f64) -> ReactionNetwork {
        ReactionNetwork::single_regime(
            1,
            vec![
                Reaction::new(CombinatorialRule::unimolecular(birth, 0), [1]),
                Reaction::new(CombinatorialRule::unimolecular(death, 0), [-1]),
            ],
        )
        .unwrap()
    }

    /// Helper function to create a test simulation with standard configuration.
    ///
    /// - Birth-death with rates 1.0 / 0.5 starting from 50 molecules
    /// - Stop after 100 iterations
    /// - Seed: 42 (reproducible)
    fn create_test_simulation() -> Simulation {
        SimulationBuilder::new()
            .network(birth_death(1.0, 0.5))
            .initial_counts([50])
            .max_iterations(100)
            .seed(42)
            .build()
            .unwrap()
    }

    #[test]
    fn test_simulation_new() {
        let sim = create_test_simulation();
        assert_eq!(sim.counts(), &ReagentVector::from([50]));
        assert_eq!(sim.iteration(), 0);
        assert_eq!(sim.time(), 0.0);
        assert_eq!(sim.history().len(), 1);
        assert_eq!(sim.tracker().starts("default"), vec![0.0]);
        assert!(!sim.is_finished());
    }

    #[test]
    fn test_simulation_step() {
        let mut sim = create_test_simulation();
        match sim.step() {
            StepOutcome::Fired { reaction, tau } => {
                assert!(reaction < 2);
                assert!(tau > 0.0);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(sim.iteration(), 1);
        assert_eq!(sim.history().len(), 2);
        assert_eq!(sim.last_propensities(), &[50.0, 25.0]);
        assert_eq!(sim.counts().total(), sim.history().last().unwrap().0.total());
    }

    #[test]
    fn test_simulation_run_stops_at_iterations() {
        let mut sim = create_test_simulation();
        assert_eq!(sim.run(), TerminationReason::StopConditionReached);
        assert_eq!(sim.iteration(), 100);
        assert_eq!(sim.history().len(), 101);
        assert!(sim.tracker().is_closed());
        // Further steps are no-ops
        assert_eq!(
            sim.step(),
            StepOutcome::Finished(TerminationReason::StopConditionReached)
        );
        assert_eq!(sim.iteration(), 100);
    }

    #[test]
    fn test_simulation_run_for() {
        let mut sim = create_test_simulation();
        assert_eq!(sim.run_for(10), None);
        assert_eq!(sim.iteration(), 10);
        assert_eq!(
            sim.run_for(1_000),
            Some(TerminationReason::StopConditionReached)
        );
        assert_eq!(sim.iteration(), 100);
    }

    #[test]
    fn test_time_stop_condition() {
        let mut sim = SimulationBuilder::new()
            .network(birth_death(1.0, 0.5))
            .initial_counts([20])
            .max_time(0.5)
            .seed(1)
            .build()
            .unwrap();
        assert_eq!(sim.run(), TerminationReason::StopConditionReached);
        // The last event may overshoot, the one before may not
        let times = sim.history().times();
        assert!(*times.last().unwrap() >= 0.5);
        assert!(times[times.len() - 2] < 0.5);
    }

    #[test]
    fn test_extinction_from_empty_state() {
        let network = ReactionNetwork::single_regime(
            2,
            vec![Reaction::new(CombinatorialRule::constant(1.0), [1, 1])],
        )
        .unwrap();
        let mut sim = SimulationBuilder::new()
            .network(network)
            .initial_counts([0, 0])
            .max_iterations(10)
            .seed(3)
            .build()
            .unwrap();
        assert_eq!(sim.run(), TerminationReason::Extinction);
        assert_eq!(sim.history().len(), 1);
        assert_eq!(sim.tracker().ends("default"), vec![0.0]);
    }

    #[test]
    fn test_no_feasible_reaction() {
        // Only reaction needs two molecules of species 0
        let network = ReactionNetwork::single_regime(
            2,
            vec![Reaction::new(CombinatorialRule::dimerization(1.0, 0), [-2, 1])],
        )
        .unwrap();
        let mut sim = SimulationBuilder::new()
            .network(network)
            .initial_counts([5, 0])
            .max_iterations(100)
            .seed(9)
            .build()
            .unwrap();
        assert_eq!(sim.run(), TerminationReason::NoFeasibleReaction);
        assert_eq!(sim.counts(), &ReagentVector::from([1, 2]));
        assert_eq!(sim.iteration(), 2);
        assert_eq!(sim.history().len(), sim.history().times().len());
    }

    #[test]
    fn test_negative_count_halts_before_commit() {
        // Malformed network: consumes 3 but fires on any molecule
        let network = ReactionNetwork::single_regime(
            1,
            vec![Reaction::new(CombinatorialRule::unimolecular(1.0, 0), [-3])],
        )
        .unwrap();
        let mut sim = SimulationBuilder::new()
            .network(network)
            .initial_counts([4])
            .max_iterations(10)
            .seed(5)
            .build()
            .unwrap();
        assert_eq!(
            sim.run(),
            TerminationReason::NegativeCount { reaction: 0, species: 0 }
        );
        assert_eq!(sim.counts(), &ReagentVector::from([1]));
        assert_eq!(sim.history().len(), 2);
        assert_eq!(sim.time(), *sim.history().times().last().unwrap());
    }

    #[test]
    fn test_negative_count_clamp() {
        let network = ReactionNetwork::single_regime(
            1,
            vec![Reaction::new(CombinatorialRule::unimolecular(1.0, 0), [-3])],
        )
        .unwrap();
        let mut sim = SimulationBuilder::new()
            .network(network)
            .initial_counts([4])
            .max_iterations(10)
            .negative_counts(NegativeCountPolicy::Clamp)
            .seed(5)
            .build()
            .unwrap();
        assert_eq!(sim.run(), TerminationReason::Extinction);
        assert_eq!(sim.counts(), &ReagentVector::from([0]));
        assert_eq!(sim.history().species_series(0), Some(vec![4, 1, 0]));
    }

    #[test]
    fn test_fixed_reagent_is_pinned() {
        // A + B -> 2B, A is an external reservoir
        let network = ReactionNetwork::single_regime(
            2,
            vec![
                Reaction::new(CombinatorialRule::bimolecular(0.01, 0, 1), [-1, 1]),
                Reaction::new(CombinatorialRule::unimolecular(0.5, 1), [0, -1]),
            ],
        )
        .unwrap();
        let mut sim = SimulationBuilder::new()
            .network(network)
            .initial_counts([100, 10])
            .max_iterations(500)
            .fixed_reagents([0])
            .seed(11)
            .build()
            .unwrap();
        sim.run();
        assert!(sim.history().snapshots().iter().all(|s| s[0] == 100));
    }

    #[test]
    fn test_rescale_triggers_only_above_threshold() {
        // Pure birth quickly exceeds the threshold
        let network = ReactionNetwork::single_regime(
            1,
            vec![Reaction::new(CombinatorialRule::unimolecular(1.0, 0), [1])],
        )
        .unwrap();
        let mut sim = SimulationBuilder::new()
            .network(network)
            .initial_counts([900])
            .max_iterations(2_000)
            .rescale(1_000, 100)
            .seed(13)
            .build()
            .unwrap();
        sim.run();
        assert!(sim.rescale_events() > 0);
        let totals = sim.history().totals();
        assert!(totals.iter().all(|&t| t <= 1_000));
        for pair in totals.windows(2) {
            if pair[1] < pair[0] {
                // Only a rescale can shrink a pure-birth population, and only from above threshold
                assert_eq!(pair[0], 1_000);
            }
        }
    }

    #[test]
    fn test_two_regime_switch_records_shared_time() {
        let grow = Regime::new(
            "A",
            vec![Reaction::new(CombinatorialRule::constant(10.0), [1])],
        );
        let shrink = Regime::new(
            "B",
            vec![Reaction::new(CombinatorialRule::constant(10.0), [1])],
        );
        let network = ReactionNetwork::with_species_count(1, vec![grow, shrink]).unwrap();
        let mut sim = SimulationBuilder::new()
            .network(network)
            .initial_counts([1])
            .max_time(6.0)
            .oscillation(OscillationConfig::new([("A", 5.0), ("B", 5.0)]))
            .start_with("A")
            .seed(17)
            .build()
            .unwrap();
        sim.run();

        let tracker = sim.tracker();
        assert_eq!(tracker.entries("A"), 1);
        assert_eq!(tracker.entries("B"), 1);
        let a_end = tracker.ends("A")[0];
        assert!(a_end > 5.0);
        assert_eq!(tracker.starts("B"), vec![a_end]);
        assert_eq!(sim.regime_switches(), 1);
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let mut a = create_test_simulation();
        let mut b = create_test_simulation();
        a.run();
        b.run();
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn test_into_result() {
        let mut sim = create_test_simulation();
        sim.run();
        let result = sim.into_result();
        assert_eq!(result.reason, Some(TerminationReason::StopConditionReached));
        assert_eq!(result.iterations, 100);
        assert_eq!(result.times().len(), result.snapshots().len());
        assert_eq!(result.final_time, *result.times().last().unwrap());
    }

    #[test]
    fn test_with_rng_ignores_config_seed() {
        let network = Arc::new(birth_death(1.0, 0.5));
        let mut config = SimulationConfig::new(StopCondition::Iterations(20));
        config.seed = Some(1);
        let mut a = Simulation::with_rng(
            Arc::clone(&network),
            ReagentVector::from([10]),
            config.clone(),
            Xoshiro256PlusPlus::seed_from_u64(99),
        )
        .unwrap();
        let mut b = Simulation::with_rng(
            network,
            ReagentVector::from([10]),
            config,
            Xoshiro256PlusPlus::seed_from_u64(99),
        )
        .unwrap();
        a.run();
        b.run();
        assert_eq!(a.history(), b.history());
    }

    #[test]
    fn test_rescale_config_is_validated() {
        let err = SimulationBuilder::new()
            .network(birth_death(1.0, 0.5))
            .initial_counts([10])
            .max_iterations(10)
            .rescale(0, 10)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("rescale"));
    }

    #[test]
    fn test_rescale_target_above_threshold_is_rejected() {
        let err = SimulationBuilder::new()
            .network(birth_death(1.0, 0.5))
            .initial_counts([10])
            .max_iterations(10)
            .rescale(100, 1_000)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("smaller than the threshold"));
    }

    fn saturated_birth(policy: NegativeCountPolicy) -> Simulation {
        let network = ReactionNetwork::single_regime(
            1,
            vec![Reaction::new(CombinatorialRule::constant(1.0), [1])],
        )
        .unwrap();
        SimulationBuilder::new()
            .network(network)
            .initial_counts([u64::MAX - 1])
            .max_iterations(10)
            .negative_counts(policy)
            .seed(21)
            .build()
            .unwrap()
    }

    #[test]
    fn test_count_overflow_is_not_reported_as_negative() {
        let mut sim = saturated_birth(NegativeCountPolicy::Halt);
        assert_eq!(
            sim.run(),
            TerminationReason::CountOverflow { reaction: 0, species: 0 }
        );
        assert_eq!(sim.counts(), &ReagentVector::from([u64::MAX]));
        assert_eq!(sim.history().len(), 2);
        assert_eq!(sim.iteration(), 1);
    }

    #[test]
    fn test_count_overflow_halts_under_clamp() {
        let mut sim = saturated_birth(NegativeCountPolicy::Clamp);
        assert_eq!(
            sim.run(),
            TerminationReason::CountOverflow { reaction: 0, species: 0 }
        );
        assert_eq!(sim.counts(), &ReagentVector::from([u64::MAX]));
        assert_eq!(sim.history().len(), 2);
    }

    fn custom_rate(rate: f64) -> Simulation {
        let network = ReactionNetwork::single_regime(
            1,
            vec![Reaction::new(
                CombinatorialRule::custom("fixed", move |_| rate),
                [1],
            )],
        )
        .unwrap();
        SimulationBuilder::new()
            .network(network)
            .initial_counts([5])
            .max_iterations(10)
            .seed(8)
            .build()
            .unwrap()
    }

    #[test]
    fn test_negative_total_propensity_is_infeasible() {
        let mut sim = custom_rate(-1.0);
        assert_eq!(sim.run(), TerminationReason::NoFeasibleReaction);
        assert_eq!(sim.history().len(), 1);
        assert_eq!(sim.time(), 0.0);
    }

    #[test]
    fn test_non_finite_total_propensity_is_infeasible() {
        for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let mut sim = custom_rate(rate);
            assert_eq!(sim.run(), TerminationReason::NoFeasibleReaction, "rate {rate}");
            assert_eq!(sim.history().len(), 1);
            assert_eq!(sim.counts(), &ReagentVector::from([5]));
        }
    }

    #[test]
    fn test_rescale_keeps_absent_species_at_zero() {
        let network = ReactionNetwork::single_regime(
            2,
            vec![Reaction::new(CombinatorialRule::unimolecular(1.0, 0), [1, 0])],
        )
        .unwrap();
        let mut sim = SimulationBuilder::new()
            .network(network)
            .initial_counts([900, 0])
            .max_iterations(2_000)
            .rescale(1_000, 100)
            .seed(17)
            .build()
            .unwrap();
        sim.run();
        assert!(sim.rescale_events() > 0);
        let absent = sim.history().species_series(1).unwrap();
        assert!(absent.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_pinned_species_redrawn_on_rescale_then_restored() {
        // B grows past the threshold while A is pinned
        let network = ReactionNetwork::single_regime(
            2,
            vec![Reaction::new(CombinatorialRule::unimolecular(1.0, 1), [0, 1])],
        )
        .unwrap();
        let mut sim = SimulationBuilder::new()
            .network(network)
            .initial_counts([500, 500])
            .fixed_reagents([0])
            .rescale(1_000, 500)
            .max_iterations(10)
            .seed(3)
            .build()
            .unwrap();

        sim.step();
        assert_eq!(sim.rescale_events(), 1);
        let redrawn = sim.history().snapshots()[1][0];
        assert_ne!(redrawn, 500);
        assert_eq!(sim.counts()[0], redrawn);

        sim.step();
        assert_eq!(sim.rescale_events(), 1);
        assert_eq!(sim.counts()[0], 500);
        assert_eq!(sim.history().snapshots()[2][0], 500);
    }

    #[test]
    fn test_run_after_finish_returns_stored_reason() {
        let mut sim = create_test_simulation();
        let first = sim.run();
        let iteration = sim.iteration();
        let recorded = sim.history().len();
        assert_eq!(sim.run(), first);
        assert_eq!(sim.iteration(), iteration);
        assert_eq!(sim.history().len(), recorded);
    }
}
