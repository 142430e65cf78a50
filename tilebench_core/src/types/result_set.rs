//! Per-strategy timing data of one benchmark run.
//!
//! A [`ResultSet`] maps every registered strategy name to the durations (in seconds) measured
//! for it, one entry per trial and in trial order. Names keep their registration order.
//! Sequences are created empty for every name up front, so appending never has to check
//! for a missing key.

use super::{Summary, TrialResult};
use anyhow::{Result, ensure};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Series {
	name: String,
	seconds: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
	series: Vec<Series>,
	trials_requested: usize,
	trials_completed: usize,
}

impl ResultSet {
	/// Creates an empty result set with one empty sequence per name.
	pub fn new<S: AsRef<str>>(names: &[S], trials_requested: usize) -> Self {
		Self {
			series: names
				.iter()
				.map(|name| Series {
					name: name.as_ref().to_string(),
					seconds: Vec::with_capacity(trials_requested),
				})
				.collect(),
			trials_requested,
			trials_completed: 0,
		}
	}

	/// Appends a duration to the sequence at `index` (registration order).
	pub(crate) fn push(&mut self, index: usize, seconds: f64) {
		self.series[index].seconds.push(seconds);
	}

	/// Marks the current trial as fully populated.
	pub(crate) fn commit_trial(&mut self) {
		self.trials_completed += 1;
		debug_assert!(self.series.iter().all(|s| s.seconds.len() == self.trials_completed));
	}

	/// Drops every entry that belongs to an uncommitted trial.
	pub(crate) fn rollback(&mut self) {
		for series in &mut self.series {
			series.seconds.truncate(self.trials_completed);
		}
	}

	/// Durations of one strategy, or `None` for an unknown name.
	pub fn get(&self, name: &str) -> Option<&[f64]> {
		self.series.iter().find(|s| s.name == name).map(|s| s.seconds.as_slice())
	}

	/// Iterates over `(name, durations)` in registration order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
		self.series.iter().map(|s| (s.name.as_str(), s.seconds.as_slice()))
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.series.iter().map(|s| s.name.as_str())
	}

	/// Number of strategies.
	pub fn len(&self) -> usize {
		self.series.len()
	}

	pub fn is_empty(&self) -> bool {
		self.series.is_empty()
	}

	pub fn trials_requested(&self) -> usize {
		self.trials_requested
	}

	pub fn trials_completed(&self) -> usize {
		self.trials_completed
	}

	/// `true` once every requested trial has been recorded for every strategy.
	pub fn is_complete(&self) -> bool {
		self.trials_requested > 0 && self.trials_completed == self.trials_requested
	}

	/// Durations of all strategies for trial `trial`, in registration order.
	pub fn trial(&self, trial: usize) -> Vec<Option<f64>> {
		self.series.iter().map(|s| s.seconds.get(trial).copied()).collect()
	}

	/// Flattens the set into single measurements, ordered by trial and then by registration.
	pub fn trial_results(&self) -> Vec<TrialResult> {
		let rows = self.series.iter().map(|s| s.seconds.len()).max().unwrap_or(0);
		(0..rows)
			.flat_map(|trial| {
				self.series
					.iter()
					.filter_map(move |s| s.seconds.get(trial).map(|v| TrialResult::new(&s.name, trial, *v)))
			})
			.collect()
	}

	/// Summary statistics per strategy; strategies without data are skipped.
	pub fn summaries(&self) -> Vec<(&str, Summary)> {
		self
			.iter()
			.filter_map(|(name, seconds)| Summary::from_seconds(seconds).map(|s| (name, s)))
			.collect()
	}

	/// Smallest and largest recorded duration over all strategies.
	pub fn bounds(&self) -> Option<(f64, f64)> {
		self.series.iter().flat_map(|s| s.seconds.iter().copied()).fold(None, |acc, v| {
			Some(match acc {
				None => (v, v),
				Some((min, max)) => (min.min(v), max.max(v)),
			})
		})
	}

	/// Checks that every sequence has exactly `trials_completed` entries.
	pub fn check_aligned(&self) -> Result<()> {
		for series in &self.series {
			ensure!(
				series.seconds.len() == self.trials_completed,
				"strategy {:?} has {} entries, expected {}",
				series.name,
				series.seconds.len(),
				self.trials_completed
			);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn filled() -> ResultSet {
		let mut set = ResultSet::new(&["a", "b"], 2);
		set.push(1, 0.2);
		set.push(0, 0.1);
		set.commit_trial();
		set.push(0, 0.3);
		set.push(1, 0.4);
		set.commit_trial();
		set
	}

	#[test]
	fn starts_with_empty_sequences() {
		let set = ResultSet::new(&["a", "b"], 3);
		assert_eq!(set.len(), 2);
		assert_eq!(set.get("a"), Some(&[][..]));
		assert_eq!(set.get("b"), Some(&[][..]));
		assert_eq!(set.get("c"), None);
		assert!(!set.is_complete());
	}

	#[test]
	fn keeps_registration_order() {
		let set = ResultSet::new(&["zeta", "alpha", "mid"], 1);
		assert_eq!(set.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
	}

	#[test]
	fn complete_after_all_trials() {
		let set = filled();
		assert!(set.is_complete());
		assert_eq!(set.trials_completed(), 2);
		assert_eq!(set.get("a"), Some(&[0.1, 0.3][..]));
		assert_eq!(set.get("b"), Some(&[0.2, 0.4][..]));
		assert_eq!(set.trial(1), vec![Some(0.3), Some(0.4)]);
		set.check_aligned().unwrap();
	}

	#[test]
	fn rollback_drops_partial_trial() {
		let mut set = ResultSet::new(&["a", "b"], 3);
		set.push(0, 0.1);
		set.push(1, 0.2);
		set.commit_trial();
		set.push(1, 0.5);
		assert!(set.check_aligned().is_err());

		set.rollback();
		assert_eq!(set.get("a").unwrap().len(), 1);
		assert_eq!(set.get("b").unwrap().len(), 1);
		assert_eq!(set.trial(1), vec![None, None]);
		assert!(!set.is_complete());
		set.check_aligned().unwrap();
	}

	#[test]
	fn flattens_to_trial_results() {
		assert_eq!(
			filled().trial_results(),
			vec![
				TrialResult::new("a", 0, 0.1),
				TrialResult::new("b", 0, 0.2),
				TrialResult::new("a", 1, 0.3),
				TrialResult::new("b", 1, 0.4),
			]
		);
	}

	#[test]
	fn bounds() {
		assert_eq!(filled().bounds(), Some((0.1, 0.4)));
		assert_eq!(ResultSet::new(&["a"], 1).bounds(), None);
	}

	#[test]
	fn summaries_skip_empty_series() {
		let mut set = ResultSet::new(&["a", "b"], 1);
		set.push(0, 1.0);
		let summaries = set.summaries();
		assert_eq!(summaries.len(), 1);
		assert_eq!(summaries[0].0, "a");
	}
}
