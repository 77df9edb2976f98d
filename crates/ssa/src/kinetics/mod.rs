//! Kinetics module providing the per-event building blocks.
//!
//! - **Rules**: combinatorial propensity laws by reaction order
//! - **Propensity**: evaluation of a regime's rules against the counts
//! - **Sampling**: waiting time (tau) and reaction selection (mu)

pub mod propensity;
pub mod rules;
pub mod sampling;

pub use propensity::{evaluate, evaluate_into, total_propensity};
pub use rules::{CombinatorialRule, CustomRule, PropensityRule};
pub use sampling::{pick_index, sample_wait_time, select_reaction};
