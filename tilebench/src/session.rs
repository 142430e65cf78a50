//! One complete benchmark session, as run by `tilebench run`:
//!
//! 1. clear the output directories of all strategies
//! 2. run the configured number of trials
//! 3. write the chart (and the CSV table, if configured)
//! 4. clear the output directories again
//!
//! If the run aborts, nothing is rendered. The output directories are left in place unless
//! `cleanup_on_failure` is set.

use crate::config::Config;
use anyhow::{Result, ensure};
use std::{path::PathBuf, sync::Arc};
use tilebench_core::{BenchmarkRunner, CleanupGuard, Reporter, ResultSet, SummaryReporter, remove_if_exists};
use tilebench_image::{ChartReporter, CsvReporter, TilingStrategy};

/// Registers one strategy per configuration entry, with source and tile size bound in.
pub fn build_runner(config: &Config) -> Result<BenchmarkRunner> {
	let mut runner = BenchmarkRunner::new(config.runner_options());

	for entry in &config.strategies {
		let tiler: Arc<dyn TilingStrategy> = Arc::from(entry.build()?);
		let source = Arc::new(config.source.clone());
		let (tile_height, tile_width) = (config.tile_height, config.tile_width);

		runner.register(&entry.name, move || -> Result<()> {
			let tiles = tiler.tile(&source, tile_height, tile_width)?;
			log::trace!("{} tiler produced {} tiles", tiler.kind(), tiles.len());
			Ok(())
		})?;
	}

	Ok(runner)
}

/// The reporters a configuration asks for, in the order they run.
pub fn reporters(config: &Config) -> Vec<Box<dyn Reporter>> {
	let mut chart = ChartReporter::new(config.chart.clone());
	if let Some(title) = &config.title {
		chart.title.clone_from(title);
	}

	let mut reporters: Vec<Box<dyn Reporter>> = vec![Box::new(SummaryReporter), Box::new(chart)];
	if let Some(csv) = &config.csv {
		reporters.push(Box::new(CsvReporter::new(csv.clone())));
	}
	reporters
}

pub fn execute(config: &Config) -> Result<ResultSet> {
	config.validate()?;
	let destinations: Vec<PathBuf> = config.destinations();

	for destination in &destinations {
		if remove_if_exists(destination)? {
			log::info!("removed previous output {destination:?}");
		}
	}
	let guard = config.cleanup_on_failure.then(|| CleanupGuard::new(destinations.clone()));

	let mut runner = build_runner(config)?;
	log::info!(
		"running {} trials of {} strategies on {:?} with {}x{} tiles",
		config.trials,
		config.strategies.len(),
		config.source,
		config.tile_height,
		config.tile_width
	);
	let results = runner.run(config.trials)?.clone();
	ensure!(results.is_complete(), "benchmark finished with incomplete results");

	let attributes = config.display_attributes()?;
	for reporter in reporters(config) {
		reporter.report(&results, &attributes)?;
	}

	for destination in &destinations {
		remove_if_exists(destination)?;
	}
	if let Some(guard) = guard {
		guard.disarm();
	}

	Ok(results)
}
