//! CSV export of a result set: one row per trial, one column per strategy.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};
use tilebench_core::{DisplayAttributes, Reporter, ResultSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvReporter {
	pub path: PathBuf,
}

impl CsvReporter {
	pub fn new(path: PathBuf) -> Self {
		Self { path }
	}

	/// Writes the table to any writer. Missing entries of an incomplete set stay empty.
	pub fn write<W: std::io::Write>(&self, results: &ResultSet, writer: W) -> Result<()> {
		let mut csv = csv::Writer::from_writer(writer);

		let mut header = vec!["trial".to_string()];
		header.extend(results.names().map(str::to_string));
		csv.write_record(&header)?;

		for trial in 0..results.trials_requested() {
			let mut row = vec![trial.to_string()];
			row.extend(
				results
					.trial(trial)
					.into_iter()
					.map(|v| v.map(|s| format!("{s:.6}")).unwrap_or_default()),
			);
			csv.write_record(&row)?;
		}

		csv.flush()?;
		Ok(())
	}
}

impl Reporter for CsvReporter {
	fn report(&self, results: &ResultSet, _attributes: &DisplayAttributes) -> Result<()> {
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)?;
		}
		let file = fs::File::create(&self.path).with_context(|| format!("creating {:?}", self.path))?;
		self.write(results, file)?;
		log::info!("table written to {:?}", self.path);
		Ok(())
	}
}
