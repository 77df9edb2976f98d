//! # Evolutionary Rescue
//!
//! The `gillespie_evo` crate simulates evolutionary rescue in discrete
//! generations. A stressed wild-type population declines while a fitter
//! standing variation, fed by new mutations, may grow fast enough to take
//! over before the population goes extinct.
//!
//! [`EvoSim`] runs one trajectory; [`MultiSim`] runs many in parallel and
//! reports how often rescue happened.

pub mod errors;
pub mod generation;
pub mod multi;
pub mod params;
pub mod prelude;
pub mod rescue;

pub use generation::update_generation;
pub use multi::{MultiSim, MultiSimOptions};
pub use params::RescueParams;
pub use rescue::{EvoSim, Outcome};
