//! Simulation parameters and configuration.
//!
//! This module provides the run settings (stop condition, pinned reagents,
//! rescaling, oscillation between regimes) and the master `Configuration`
//! document that bundles them with a network and initial counts.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::base::ReagentVector;
use crate::errors::{ConfigError, LoadError};
use crate::network::ReactionNetwork;
use crate::simulation::Simulation;

/// Iterations between progress log lines when not configured otherwise.
pub const DEFAULT_PROGRESS_INTERVAL: u64 = 1_000_000;

/// When the event loop stops on its own.
///
/// Serialized as `{"time": 10.0}` or `{"iterations": 100}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopCondition {
    /// Loop while simulated time is below the limit.
    Time(f64),
    /// Loop while the iteration count is below the limit.
    Iterations(u64),
}

impl StopCondition {
    /// Build a stop condition from its name and the matching limit.
    ///
    /// The limit belonging to the other condition is ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use gillespie_ssa::simulation::StopCondition;
    ///
    /// let stop = StopCondition::from_name("iterations", None, Some(100)).unwrap();
    /// assert_eq!(stop, StopCondition::Iterations(100));
    /// assert!(StopCondition::from_name("time", None, Some(100)).is_err());
    /// assert!(StopCondition::from_name("events", Some(1.0), None).is_err());
    /// ```
    pub fn from_name(
        name: &str,
        max_time: Option<f64>,
        max_iterations: Option<u64>,
    ) -> Result<Self, ConfigError> {
        let stop = match name {
            "time" => Self::Time(max_time.ok_or(ConfigError::MissingStopLimit {
                condition: "time",
                limit: "max_time",
            })?),
            "iterations" => Self::Iterations(max_iterations.ok_or(
                ConfigError::MissingStopLimit {
                    condition: "iterations",
                    limit: "max_iteration",
                },
            )?),
            other => return Err(ConfigError::UnknownStopCondition(other.to_string())),
        };
        stop.validate()?;
        Ok(stop)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Time(t) if t.is_nan() || t < 0.0 => Err(ConfigError::InvalidStopLimit(format!(
                "max_time must be a non-negative number, got {t}"
            ))),
            _ => Ok(()),
        }
    }

    /// True once the loop must not run another iteration.
    pub fn is_met(&self, time: f64, iteration: u64) -> bool {
        match *self {
            Self::Time(max_time) => time >= max_time,
            Self::Iterations(max_iterations) => iteration >= max_iterations,
        }
    }
}

/// Poisson renormalization of large populations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RescaleConfig {
    /// Total count above which a rescale is triggered
    pub threshold: u64,
    /// Expected total count right after a rescale
    pub target_size: u64,
}

impl RescaleConfig {
    pub fn new(threshold: u64, target_size: u64) -> Self {
        Self {
            threshold,
            target_size,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threshold == 0 {
            return Err(ConfigError::InvalidRescale(
                "threshold must be greater than zero".into(),
            ));
        }
        if self.target_size == 0 {
            return Err(ConfigError::InvalidRescale(
                "target population size must be greater than zero".into(),
            ));
        }
        if self.target_size >= self.threshold {
            return Err(ConfigError::InvalidRescale(format!(
                "target population size {} must be smaller than the threshold {}",
                self.target_size, self.threshold
            )));
        }
        Ok(())
    }

    /// Multiplier applied to each count to obtain its Poisson mean.
    pub fn scale_factor(&self) -> f64 {
        self.target_size as f64 / self.threshold as f64
    }

    pub fn should_rescale(&self, total: u64) -> bool {
        total > self.threshold
    }
}

/// How the next regime is chosen when the active one's interval elapses.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Next regime in declaration order, wrapping around.
    #[default]
    RoundRobin,
    /// Explicit `from -> to` map covering every regime.
    Table(BTreeMap<String, String>),
}

/// Switching between regimes on a per-regime time interval.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OscillationConfig {
    /// Time spent in each regime before switching
    pub intervals: BTreeMap<String, f64>,
    /// Next-regime selection
    #[serde(default)]
    pub transitions: TransitionPolicy,
}

impl OscillationConfig {
    pub fn new<I, S>(intervals: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            intervals: intervals.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            transitions: TransitionPolicy::RoundRobin,
        }
    }

    pub fn with_transitions(mut self, transitions: TransitionPolicy) -> Self {
        self.transitions = transitions;
        self
    }

    /// Resolve names into an index-based schedule for `network`.
    pub(crate) fn schedule(&self, network: &ReactionNetwork) -> Result<RegimeSchedule, ConfigError> {
        for name in self.intervals.keys() {
            network.regime_index(name)?;
        }

        let intervals = network
            .regime_names()
            .map(|name| {
                let interval = *self
                    .intervals
                    .get(name)
                    .ok_or_else(|| ConfigError::MissingInterval(name.to_string()))?;
                if interval.is_nan() || interval < 0.0 {
                    return Err(ConfigError::InvalidInterval {
                        regime: name.to_string(),
                        interval,
                    });
                }
                Ok(interval)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let n = network.n_regimes();
        let next = match &self.transitions {
            TransitionPolicy::RoundRobin => (0..n).map(|i| (i + 1) % n).collect(),
            TransitionPolicy::Table(table) => {
                for from in table.keys() {
                    network.regime_index(from).map_err(|_| {
                        ConfigError::InvalidTransition(format!("unknown source regime '{from}'"))
                    })?;
                }
                network
                    .regime_names()
                    .map(|from| {
                        let to = table.get(from).ok_or_else(|| {
                            ConfigError::InvalidTransition(format!(
                                "no successor defined for regime '{from}'"
                            ))
                        })?;
                        network.regime_index(to).map_err(|_| {
                            ConfigError::InvalidTransition(format!(
                                "unknown target regime '{to}'"
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        Ok(RegimeSchedule { intervals, next })
    }
}

/// Index-based oscillation plan, aligned with the network's regimes.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RegimeSchedule {
    pub intervals: Vec<f64>,
    pub next: Vec<usize>,
}

/// What to do when a reaction would drive a count below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeCountPolicy {
    /// End the run before the event is committed.
    #[default]
    Halt,
    /// Commit the event with the offending counts set to zero.
    Clamp,
}

fn default_progress_interval() -> u64 {
    DEFAULT_PROGRESS_INTERVAL
}

/// Per-run settings, independent of the network definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Stopping policy
    pub stop: StopCondition,
    /// Species indices held at their initial value
    ///
    /// Pinning runs before rescaling, so the snapshot recorded by a rescale
    /// event holds a Poisson draw of each pinned count. The initial value is
    /// restored at the next event.
    #[serde(default)]
    pub fixed_reagents: Vec<usize>,
    /// Optional population rescaling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rescale: Option<RescaleConfig>,
    /// Optional regime oscillation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oscillation: Option<OscillationConfig>,
    /// Starting regime (first declared regime when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_with: Option<String>,
    /// Negative count handling
    #[serde(default)]
    pub negative_counts: NegativeCountPolicy,
    /// Iterations between progress log lines (0 disables them)
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
    /// Optional RNG seed for reproducibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl SimulationConfig {
    /// Settings with only a stop condition.
    pub fn new(stop: StopCondition) -> Self {
        Self {
            stop,
            fixed_reagents: Vec::new(),
            rescale: None,
            oscillation: None,
            start_with: None,
            negative_counts: NegativeCountPolicy::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            seed: None,
        }
    }

    /// Check these settings against a network and its initial counts.
    pub(crate) fn resolve(
        &self,
        network: &ReactionNetwork,
        initial: &ReagentVector,
    ) -> Result<ResolvedConfig, ConfigError> {
        self.stop.validate()?;

        let n_species = network.n_species();
        if initial.len() != n_species {
            return Err(ConfigError::InitialCountsLength {
                len: initial.len(),
                expected: n_species,
            });
        }

        if let Some(&index) = self.fixed_reagents.iter().find(|&&i| i >= n_species) {
            return Err(ConfigError::FixedReagentOutOfRange { index, n_species });
        }

        if let Some(rescale) = &self.rescale {
            rescale.validate()?;
        }

        let start = match &self.start_with {
            Some(name) => network.regime_index(name)?,
            None => 0,
        };

        let schedule = self
            .oscillation
            .as_ref()
            .map(|osc| osc.schedule(network))
            .transpose()?;

        Ok(ResolvedConfig { start, schedule })
    }
}

/// Settings after name resolution against a specific network.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
    pub start: usize,
    pub schedule: Option<RegimeSchedule>,
}

/// The master configuration document.
///
/// Can be deserialized from a file to fully reproduce a simulation setup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Configuration {
    pub network: ReactionNetwork,
    pub initial_counts: ReagentVector,
    pub run: SimulationConfig,
}

impl Configuration {
    pub fn new(network: ReactionNetwork, initial_counts: ReagentVector, run: SimulationConfig) -> Self {
        Self {
            network,
            initial_counts,
            run,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = std::fs::File::open(path)?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Create a ready-to-run simulation from this document.
    pub fn build(&self) -> Result<Simulation, ConfigError> {
        Simulation::new(
            Arc::new(self.network.clone()),
            self.initial_counts.clone(),
            self.run.clone(),
        )
    }
}
