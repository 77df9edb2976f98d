use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::NetworkError;
use crate::network::{Reaction, Regime};

/// Read-only reaction network: species plus one reaction set per regime.
///
/// Regimes keep their declaration order, which is also the default order
/// used when cycling between them.
///
/// # Examples
///
/// ```
/// use gillespie_ssa::kinetics::CombinatorialRule;
/// use gillespie_ssa::network::{Reaction, ReactionNetwork, Regime};
///
/// let birth_death = Regime::new(
///     "default",
///     vec![
///         Reaction::new(CombinatorialRule::unimolecular(1.0, 0), [1]),
///         Reaction::new(CombinatorialRule::unimolecular(0.9, 0), [-1]),
///     ],
/// );
/// let network = ReactionNetwork::new(vec!["X".into()], vec![birth_death]).unwrap();
/// assert_eq!(network.n_species(), 1);
/// assert_eq!(network.regime_index("default").unwrap(), 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "NetworkRepr", into = "NetworkRepr")]
pub struct ReactionNetwork {
    species: Vec<String>,
    regimes: Vec<Regime>,
}

#[derive(Serialize, Deserialize)]
struct NetworkRepr {
    species: Vec<String>,
    regimes: Vec<Regime>,
}

impl TryFrom<NetworkRepr> for ReactionNetwork {
    type Error = NetworkError;

    fn try_from(repr: NetworkRepr) -> Result<Self, Self::Error> {
        Self::new(repr.species, repr.regimes)
    }
}

impl From<ReactionNetwork> for NetworkRepr {
    fn from(network: ReactionNetwork) -> Self {
        Self {
            species: network.species,
            regimes: network.regimes,
        }
    }
}

impl ReactionNetwork {
    /// Create and validate a network.
    pub fn new(species: Vec<String>, regimes: Vec<Regime>) -> Result<Self, NetworkError> {
        if species.is_empty() {
            return Err(NetworkError::NoSpecies);
        }
        if regimes.is_empty() {
            return Err(NetworkError::NoRegimes);
        }

        let mut seen = HashSet::with_capacity(regimes.len());
        for regime in &regimes {
            if !seen.insert(regime.name()) {
                return Err(NetworkError::DuplicateRegime(regime.name().to_string()));
            }
            regime.validate(species.len())?;
        }

        Ok(Self { species, regimes })
    }

    /// Create a network with species named `S0`, `S1`, ...
    pub fn with_species_count(n_species: usize, regimes: Vec<Regime>) -> Result<Self, NetworkError> {
        let species = (0..n_species).map(|i| format!("S{i}")).collect();
        Self::new(species, regimes)
    }

    /// Single-regime network; the regime is named `default`.
    pub fn single_regime(n_species: usize, reactions: Vec<Reaction>) -> Result<Self, NetworkError> {
        Self::with_species_count(n_species, vec![Regime::new("default", reactions)])
    }

    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    pub fn species(&self) -> &[String] {
        &self.species
    }

    pub fn n_regimes(&self) -> usize {
        self.regimes.len()
    }

    pub fn regimes(&self) -> &[Regime] {
        &self.regimes
    }

    pub fn regime(&self, index: usize) -> Option<&Regime> {
        self.regimes.get(index)
    }

    /// Position of the regime called `name`.
    pub fn regime_index(&self, name: &str) -> Result<usize, NetworkError> {
        self.regimes
            .iter()
            .position(|r| r.name() == name)
            .ok_or_else(|| NetworkError::UnknownRegime(name.to_string()))
    }

    pub fn regime_names(&self) -> impl Iterator<Item = &str> {
        self.regimes.iter().map(Regime::name)
    }

    /// Serialize to a JSON string. Fails if any rule is a custom closure.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
