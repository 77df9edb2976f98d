//! Outcome of a simulation run.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::base::ReagentVector;
use crate::simulation::{History, RegimeTimeTracker};

/// Why the event loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// Every species count reached zero.
    Extinction,
    /// The aggregate propensity was zero, negative or not finite.
    NoFeasibleReaction,
    /// The configured time or iteration limit was reached.
    StopConditionReached,
    /// A reaction would have driven `species` below zero.
    NegativeCount { reaction: usize, species: usize },
    /// A reaction would have pushed `species` past `u64::MAX`.
    CountOverflow { reaction: usize, species: usize },
}

impl TerminationReason {
    /// True when the run ended before its stop condition.
    pub fn is_early(&self) -> bool {
        !matches!(self, Self::StopConditionReached)
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extinction => write!(f, "extinction"),
            Self::NoFeasibleReaction => write!(f, "no feasible reaction"),
            Self::StopConditionReached => write!(f, "stop condition reached"),
            Self::NegativeCount { reaction, species } => {
                write!(f, "reaction {reaction} would make species {species} negative")
            }
            Self::CountOverflow { reaction, species } => {
                write!(f, "reaction {reaction} would overflow the count of species {species}")
            }
        }
    }
}

/// Everything a run produced, detached from the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub history: History,
    pub tracker: RegimeTimeTracker,
    /// `None` if the run was converted before it finished
    pub reason: Option<TerminationReason>,
    pub iterations: u64,
    pub final_time: f64,
    pub rescale_events: u64,
    pub regime_switches: u64,
}

impl SimulationResult {
    /// Last recorded counts.
    pub fn final_counts(&self) -> Option<&ReagentVector> {
        self.history.snapshots().last()
    }

    pub fn times(&self) -> &[f64] {
        self.history.times()
    }

    pub fn snapshots(&self) -> &[ReagentVector] {
        self.history.snapshots()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_display_and_early() {
        assert_eq!(TerminationReason::Extinction.to_string(), "extinction");
        assert!(TerminationReason::NoFeasibleReaction.is_early());
        assert!(!TerminationReason::StopConditionReached.is_early());
        let neg = TerminationReason::NegativeCount { reaction: 2, species: 0 };
        assert_eq!(neg.to_string(), "reaction 2 would make species 0 negative");
        let over = TerminationReason::CountOverflow { reaction: 1, species: 3 };
        assert_eq!(over.to_string(), "reaction 1 would overflow the count of species 3");
        assert!(over.is_early());
    }

    #[test]
    fn test_reason_serde() {
        let json = serde_json::to_string(&TerminationReason::StopConditionReached).unwrap();
        assert_eq!(json, "\"stop_condition_reached\"");
    }
}
