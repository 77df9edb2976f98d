use std::fmt;
use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Molecule counts, one entry per species.
///
/// The length is fixed when the vector is created; only the engine's
/// update path (checked signed addition, pinning, rescaling) changes values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReagentVector(Vec<u64>);

impl ReagentVector {
    pub fn new(counts: Vec<u64>) -> Self {
        Self(counts)
    }

    /// Vector of `n_species` zero counts.
    pub fn zeros(n_species: usize) -> Self {
        Self(vec![0; n_species])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u64> {
        self.0.iter()
    }

    /// Total number of molecules across all species.
    ///
    /// Saturates instead of wrapping, so a runaway population still compares
    /// as larger than any rescale threshold.
    pub fn total(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Returns true when every species count is zero.
    pub fn is_extinct(&self) -> bool {
        self.0.iter().all(|&c| c == 0)
    }

    /// Apply `change` element-wise, returning the new vector.
    ///
    /// Fails on the first species that would drop below zero or exceed
    /// `u64::MAX`.
    pub fn checked_apply(&self, change: &StateChange) -> Result<Self, CountError> {
        self.0
            .iter()
            .zip(change.iter())
            .enumerate()
            .map(|(i, (&count, &delta))| {
                count
                    .checked_add_signed(delta)
                    .ok_or_else(|| CountError::classify(i, delta))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    /// Apply `change` element-wise, flooring negative results at zero.
    ///
    /// Overflow is still an error.
    pub fn clamped_apply(&self, change: &StateChange) -> Result<Self, CountError> {
        self.0
            .iter()
            .zip(change.iter())
            .enumerate()
            .map(|(i, (&count, &delta))| match count.checked_add_signed(delta) {
                Some(value) => Ok(value),
                None if delta < 0 => Ok(0),
                None => Err(CountError::Overflow(i)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub(crate) fn set(&mut self, index: usize, value: u64) {
        self.0[index] = value;
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [u64] {
        &mut self.0
    }

    pub fn into_inner(self) -> Vec<u64> {
        self.0
    }
}

/// Species whose count left the representable range during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountError {
    /// The count would drop below zero.
    Underflow(usize),
    /// The count would exceed `u64::MAX`.
    Overflow(usize),
}

impl CountError {
    fn classify(species: usize, delta: i64) -> Self {
        if delta < 0 {
            Self::Underflow(species)
        } else {
            Self::Overflow(species)
        }
    }

    pub fn species(&self) -> usize {
        match *self {
            Self::Underflow(species) | Self::Overflow(species) => species,
        }
    }
}

impl From<Vec<u64>> for ReagentVector {
    fn from(counts: Vec<u64>) -> Self {
        Self(counts)
    }
}

impl<const N: usize> From<[u64; N]> for ReagentVector {
    fn from(counts: [u64; N]) -> Self {
        Self(counts.to_vec())
    }
}

impl Index<usize> for ReagentVector {
    type Output = u64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a ReagentVector {
    type Item = &'a u64;
    type IntoIter = std::slice::Iter<'a, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ReagentVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, "]")
    }
}

/// Signed per-species deltas applied when a reaction fires.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateChange(Vec<i64>);

impl StateChange {
    pub fn new(deltas: Vec<i64>) -> Self {
        Self(deltas)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, i64> {
        self.0.iter()
    }
}

impl From<Vec<i64>> for StateChange {
    fn from(deltas: Vec<i64>) -> Self {
        Self(deltas)
    }
}

impl<const N: usize> From<[i64; N]> for StateChange {
    fn from(deltas: [i64; N]) -> Self {
        Self(deltas.to_vec())
    }
}
