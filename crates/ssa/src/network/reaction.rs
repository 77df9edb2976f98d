use serde::{Deserialize, Serialize};

use crate::base::StateChange;
use crate::kinetics::{CombinatorialRule, PropensityRule};

/// One reaction channel: a rate rule paired with its state-change vector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reaction {
    /// Optional human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Combinatorial rule giving the propensity
    pub rule: CombinatorialRule,
    /// Deltas added to the counts when this reaction fires
    pub change: StateChange,
}

impl Reaction {
    pub fn new(rule: CombinatorialRule, change: impl Into<StateChange>) -> Self {
        Self {
            name: None,
            rule,
            change: change.into(),
        }
    }

    /// Attach a label.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn rule(&self) -> &CombinatorialRule {
        &self.rule
    }

    pub fn change(&self) -> &StateChange {
        &self.change
    }
}

impl PropensityRule for Reaction {
    #[inline]
    fn propensity(&self, counts: &[u64]) -> f64 {
        self.rule.propensity(counts)
    }
}
