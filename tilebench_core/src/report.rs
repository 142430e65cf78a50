//! The reporter interface and the display attributes handed to it.

use crate::ResultSet;
use anyhow::Result;
use std::collections::HashMap;

/// Display attributes per strategy name, supplied by the caller as configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayAttributes {
	colors: HashMap<String, [u8; 3]>,
}

impl DisplayAttributes {
	pub fn set_color(&mut self, name: &str, color: [u8; 3]) {
		self.colors.insert(name.to_string(), color);
	}

	pub fn color(&self, name: &str) -> Option<[u8; 3]> {
		self.colors.get(name).copied()
	}
}

impl<S: AsRef<str>> FromIterator<(S, [u8; 3])> for DisplayAttributes {
	fn from_iter<I: IntoIterator<Item = (S, [u8; 3])>>(iter: I) -> Self {
		Self {
			colors: iter.into_iter().map(|(name, color)| (name.as_ref().to_string(), color)).collect(),
		}
	}
}

/// Renders or persists the results of a run.
///
/// Reporters only read the [`ResultSet`]. A set that is not complete must not end up looking like
/// a complete one.
pub trait Reporter {
	fn report(&self, results: &ResultSet, attributes: &DisplayAttributes) -> Result<()>;
}

/// Logs summary statistics per strategy at `info` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryReporter;

impl Reporter for SummaryReporter {
	fn report(&self, results: &ResultSet, _attributes: &DisplayAttributes) -> Result<()> {
		if !results.is_complete() {
			log::warn!(
				"incomplete results: {} of {} trials",
				results.trials_completed(),
				results.trials_requested()
			);
		}
		for (name, summary) in results.summaries() {
			log::info!("{name}: {summary}");
		}
		Ok(())
	}
}
