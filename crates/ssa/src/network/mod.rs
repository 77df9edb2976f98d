//! Reaction network structures: reactions, regimes, and the network itself.

mod reaction_network;
mod reaction;
mod regime;

pub use reaction_network::ReactionNetwork;
pub use reaction::Reaction;
pub use regime::Regime;
