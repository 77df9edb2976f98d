//! Base types for reagent state.
//!
//! This module provides the foundational value types shared by the network
//! definition and the simulation engine: molecule counts, state-change
//! vectors and the simulation clock.

mod clock;
mod reagents;

pub use clock::SimulationClock;
pub use reagents::{CountError, ReagentVector, StateChange};
