//! Append-only trajectory log.

use serde::{Deserialize, Serialize};

use crate::base::ReagentVector;
use crate::errors::HistoryError;

/// Reagent snapshots and their simulated times, one pair per accepted event.
///
/// The first entry is the initial state at time zero. Entries are never
/// modified once pushed, and `snapshots().len() == times().len()` always
/// holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "HistoryRepr")]
pub struct History {
    snapshots: Vec<ReagentVector>,
    times: Vec<f64>,
}

#[derive(Deserialize)]
struct HistoryRepr {
    snapshots: Vec<ReagentVector>,
    times: Vec<f64>,
}

impl TryFrom<HistoryRepr> for History {
    type Error = HistoryError;

    fn try_from(repr: HistoryRepr) -> Result<Self, Self::Error> {
        let HistoryRepr { snapshots, times } = repr;
        if snapshots.len() != times.len() {
            return Err(HistoryError::LengthMismatch {
                snapshots: snapshots.len(),
                times: times.len(),
            });
        }
        let Some(first) = snapshots.first() else {
            return Err(HistoryError::Empty);
        };

        let expected = first.len();
        if let Some((index, snapshot)) = snapshots
            .iter()
            .enumerate()
            .find(|(_, s)| s.len() != expected)
        {
            return Err(HistoryError::RaggedSnapshot {
                index,
                len: snapshot.len(),
                expected,
            });
        }
        // NaN fails this comparison too
        if let Some(index) = times.windows(2).position(|w| !(w[1] >= w[0])) {
            return Err(HistoryError::UnorderedTimes(index + 1));
        }
        Ok(Self { snapshots, times })
    }
}

impl History {
    /// Start a history at `time` with the given state.
    pub fn new(initial: ReagentVector, time: f64) -> Self {
        Self {
            snapshots: vec![initial],
            times: vec![time],
        }
    }

    pub(crate) fn push(&mut self, snapshot: ReagentVector, time: f64) {
        debug_assert!(
            self.times.last().map_or(true, |&last| time >= last),
            "history times must be non-decreasing"
        );
        self.snapshots.push(snapshot);
        self.times.push(time);
    }

    /// Number of recorded states (events + 1).
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn snapshots(&self) -> &[ReagentVector] {
        &self.snapshots
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Most recent state and its time.
    pub fn last(&self) -> Option<(&ReagentVector, f64)> {
        self.snapshots.last().zip(self.times.last().copied())
    }

    /// Iterate `(time, state)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &ReagentVector)> {
        self.times.iter().copied().zip(self.snapshots.iter())
    }

    /// Count of one species across the whole trajectory.
    pub fn species_series(&self, species: usize) -> Option<Vec<u64>> {
        self.snapshots.iter().map(|s| s.get(species)).collect()
    }

    /// Total molecule count at each recorded point.
    pub fn totals(&self) -> Vec<u64> {
        self.snapshots.iter().map(ReagentVector::total).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_history_has_initial_entry() {
        let history = History::new(ReagentVector::from([3, 4]), 0.0);
        assert_eq!(history.len(), 1);
        assert_eq!(history.times(), &[0.0]);
        assert_eq!(history.last(), Some((&ReagentVector::from([3, 4]), 0.0)));
    }

    #[test]
    fn test_push_keeps_sequences_parallel() {
        let mut history = History::new(ReagentVector::from([1]), 0.0);
        history.push(ReagentVector::from([2]), 0.5);
        history.push(ReagentVector::from([3]), 0.5);
        assert_eq!(history.snapshots().len(), history.times().len());
        assert_eq!(history.species_series(0), Some(vec![1, 2, 3]));
        assert_eq!(history.species_series(1), None);
        assert_eq!(history.totals(), vec![1, 2, 3]);
        let pairs: Vec<_> = history.iter().map(|(t, s)| (t, s[0])).collect();
        assert_eq!(pairs, vec![(0.0, 1), (0.5, 2), (0.5, 3)]);
    }

    #[test]
    fn test_deserialize_checks_consistency() {
        let mut history = History::new(ReagentVector::from([1, 0]), 0.0);
        history.push(ReagentVector::from([2, 0]), 0.25);
        let json = serde_json::to_string(&history).unwrap();
        let restored: History = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, history);

        let bad = [
            r#"{"snapshots": [[1], [2]], "times": [0.0]}"#,
            r#"{"snapshots": [], "times": []}"#,
            r#"{"snapshots": [[1], [2, 3]], "times": [0.0, 1.0]}"#,
            r#"{"snapshots": [[1], [2]], "times": [1.0, 0.5]}"#,
        ];
        for json in bad {
            assert!(serde_json::from_str::<History>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn test_deserialize_reports_reason() {
        let repr = HistoryRepr {
            snapshots: vec![ReagentVector::from([1]), ReagentVector::from([2])],
            times: vec![0.0],
        };
        assert_eq!(
            History::try_from(repr),
            Err(HistoryError::LengthMismatch {
                snapshots: 2,
                times: 1
            })
        );
    }
}
