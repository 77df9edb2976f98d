//! Per-regime activity intervals.

use serde::{Deserialize, Serialize};

/// One stretch of simulated time during which a regime was active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegimeInterval {
    pub start: f64,
    /// `None` while the regime is still active
    pub end: Option<f64>,
}

impl RegimeInterval {
    /// Length of a closed interval.
    pub fn duration(&self) -> Option<f64> {
        self.end.map(|end| end - self.start)
    }
}

/// Start/end bookkeeping for every regime of a run.
///
/// Intervals are only appended at regime entry and closed at regime exit
/// (including the final exit when the run terminates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeTimeTracker {
    names: Vec<String>,
    intervals: Vec<Vec<RegimeInterval>>,
}

impl RegimeTimeTracker {
    /// Empty tracker for the given regime names (network order).
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let intervals = vec![Vec::new(); names.len()];
        Self { names, intervals }
    }

    pub(crate) fn enter(&mut self, regime: usize, time: f64) {
        self.intervals[regime].push(RegimeInterval { start: time, end: None });
    }

    /// Close the open interval of `regime`; no-op if none is open.
    pub(crate) fn exit(&mut self, regime: usize, time: f64) {
        if let Some(interval) = self.intervals[regime]
            .last_mut()
            .filter(|interval| interval.end.is_none())
        {
            interval.end = Some(time);
        }
    }

    pub fn regime_names(&self) -> &[String] {
        &self.names
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn intervals(&self, name: &str) -> Option<&[RegimeInterval]> {
        self.position(name).map(|i| self.intervals[i].as_slice())
    }

    pub fn intervals_at(&self, regime: usize) -> Option<&[RegimeInterval]> {
        self.intervals.get(regime).map(Vec::as_slice)
    }

    /// Entry times of `name`.
    pub fn starts(&self, name: &str) -> Vec<f64> {
        self.intervals(name)
            .map(|ivs| ivs.iter().map(|iv| iv.start).collect())
            .unwrap_or_default()
    }

    /// Exit times of `name` (closed intervals only).
    pub fn ends(&self, name: &str) -> Vec<f64> {
        self.intervals(name)
            .map(|ivs| ivs.iter().filter_map(|iv| iv.end).collect())
            .unwrap_or_default()
    }

    /// Number of times `name` was entered.
    pub fn entries(&self, name: &str) -> usize {
        self.intervals(name).map_or(0, <[RegimeInterval]>::len)
    }

    /// Total simulated time spent in `name` over closed intervals.
    pub fn time_in(&self, name: &str) -> f64 {
        self.intervals(name)
            .map(|ivs| ivs.iter().filter_map(RegimeInterval::duration).sum())
            .unwrap_or(0.0)
    }

    /// True when no regime has an open interval.
    pub fn is_closed(&self) -> bool {
        self.intervals
            .iter()
            .all(|ivs| ivs.last().map_or(true, |iv| iv.end.is_some()))
    }
}
