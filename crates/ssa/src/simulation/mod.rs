//! Simulation engine and run bookkeeping.
//!
//! This module provides the event loop for multi-regime reaction networks
//! together with the records it produces.

//! Re-exports
//!
//! The most commonly used simulation types are re-exported here for
//! convenience so consumers can import them from `gillespie_ssa::simulation`.
//!
//! - `Simulation`: the engine that samples events and applies regime
//!   switching, pinning and rescaling.
//! - `SimulationBuilder`: fluent builder for constructing `Simulation`
//!   instances with sensible defaults and validation.
//! - `Configuration`: serializable document bundling a network, initial
//!   counts and run settings.
//! - `History` / `RegimeTimeTracker`: the trajectory and the per-regime
//!   time intervals of a run.

pub mod batch;
pub mod builder;
pub mod configs;
pub mod engine;
pub mod history;
pub mod result;
pub mod tracker;

pub use batch::run_replicates;
pub use builder::SimulationBuilder;
pub use configs::{
    Configuration, NegativeCountPolicy, OscillationConfig, RescaleConfig, SimulationConfig,
    StopCondition, TransitionPolicy, DEFAULT_PROGRESS_INTERVAL,
};
pub use engine::{Simulation, StepOutcome};
pub use history::History;
pub use result::{SimulationResult, TerminationReason};
pub use tracker::{RegimeInterval, RegimeTimeTracker};
