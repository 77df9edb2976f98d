use serde::{Deserialize, Serialize};

use crate::base::StateChange;
use crate::errors::NetworkError;
use crate::kinetics::CombinatorialRule;
use crate::network::Reaction;

/// A named operating mode with its own reaction set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Regime {
    name: String,
    reactions: Vec<Reaction>,
}

impl Regime {
    pub fn new(name: impl Into<String>, reactions: Vec<Reaction>) -> Self {
        Self {
            name: name.into(),
            reactions,
        }
    }

    /// Build a regime from index-aligned state-change vectors and rules.
    pub fn from_parts(
        name: impl Into<String>,
        changes: Vec<StateChange>,
        rules: Vec<CombinatorialRule>,
    ) -> Result<Self, NetworkError> {
        let name = name.into();
        if changes.len() != rules.len() {
            return Err(NetworkError::RuleCountMismatch {
                regime: name,
                rules: rules.len(),
                changes: changes.len(),
            });
        }
        let reactions = rules
            .into_iter()
            .zip(changes)
            .map(|(rule, change)| Reaction::new(rule, change))
            .collect();
        Ok(Self { name, reactions })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn reaction(&self, index: usize) -> Option<&Reaction> {
        self.reactions.get(index)
    }

    /// Number of reaction channels.
    pub fn len(&self) -> usize {
        self.reactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reactions.is_empty()
    }

    pub(crate) fn validate(&self, n_species: usize) -> Result<(), NetworkError> {
        if self.reactions.is_empty() {
            return Err(NetworkError::EmptyRegime(self.name.clone()));
        }
        for (i, reaction) in self.reactions.iter().enumerate() {
            if reaction.change.len() != n_species {
                return Err(NetworkError::StateChangeLength {
                    regime: self.name.clone(),
                    reaction: i,
                    len: reaction.change.len(),
                    expected: n_species,
                });
            }
            if let Some(&species) = reaction.rule.species().iter().find(|&&s| s >= n_species) {
                return Err(NetworkError::SpeciesOutOfRange {
                    regime: self.name.clone(),
                    reaction: i,
                    species,
                    n_species,
                });
            }
            if let Some(rate) = reaction.rule.rate() {
                if !rate.is_finite() || rate < 0.0 {
                    return Err(NetworkError::InvalidRate {
                        regime: self.name.clone(),
                        reaction: i,
                        rate,
                    });
                }
            }
        }
        Ok(())
    }
}
