//! Commonly used imports for convenience.

pub use crate::errors::{MultiSimError, ParameterError};
pub use crate::generation::update_generation;
pub use crate::multi::{MultiSim, MultiSimOptions};
pub use crate::params::RescueParams;
pub use crate::rescue::{EvoSim, Outcome};
