//! # Gillespie SSA
//!
//! The `gillespie_ssa` crate simulates chemical reaction networks with
//! Gillespie's direct method. A network may define several regimes (sets of
//! reactions over the same species); the engine can oscillate between them
//! on per-regime time intervals, hold selected species at fixed counts, and
//! Poisson-rescale the population once it grows past a threshold.
//!
//! It includes modules for the reagent state, propensity laws and sampling,
//! the network definition, and the simulation engine with its records.

pub mod base;
pub mod errors;
pub mod kinetics;
pub mod network;
pub mod prelude;
pub mod simulation;

pub use base::{ReagentVector, StateChange};
pub use network::ReactionNetwork;
pub use simulation::{Simulation, SimulationBuilder};
