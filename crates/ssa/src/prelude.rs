//! Commonly used imports for convenience.
//!
//! # Example
//!
//! ```
//! use gillespie_ssa::prelude::*;
//!
//! let network = ReactionNetwork::single_regime(
//!     1,
//!     vec![Reaction::new(CombinatorialRule::unimolecular(0.5, 0), [-1])],
//! )
//! .unwrap();
//! let mut sim = SimulationBuilder::new()
//!     .network(network)
//!     .initial_counts([10])
//!     .max_time(100.0)
//!     .seed(1)
//!     .build()
//!     .unwrap();
//! assert_eq!(sim.run(), TerminationReason::Extinction);
//! ```

pub use crate::base::{ReagentVector, StateChange};
pub use crate::errors::{
    BatchError, BuilderError, ConfigError, HistoryError, LoadError, NetworkError,
};
pub use crate::kinetics::{CombinatorialRule, PropensityRule};
pub use crate::network::{Reaction, ReactionNetwork, Regime};
pub use crate::simulation::{
    run_replicates, Configuration, History, NegativeCountPolicy, OscillationConfig,
    RegimeTimeTracker, Simulation, SimulationBuilder, SimulationConfig, SimulationResult,
    StopCondition, TerminationReason,
};
