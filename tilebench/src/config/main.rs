use super::{StrategyConfig, StrategyKind};
use anyhow::{Context, Result, bail, ensure};
use serde::Deserialize;
use std::{
	collections::HashSet,
	fs::File,
	io::{BufReader, Read},
	path::{Path, PathBuf},
	time::Duration,
};
use tilebench_core::{DisplayAttributes, RunnerOptions};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// Source raster that every strategy tiles.
	pub source: PathBuf,

	/// Tile height in pixels.
	#[serde(default = "default_tile_size")]
	pub tile_height: u32,

	/// Tile width in pixels.
	#[serde(default = "default_tile_size")]
	pub tile_width: u32,

	/// Number of trials.
	#[serde(default = "default_trials")]
	pub trials: usize,

	/// Fixed seed for the execution order shuffles.
	#[serde(default)]
	pub seed: Option<u64>,

	/// Abort the run if a single strategy invocation takes longer than this.
	#[serde(default)]
	pub timeout_seconds: Option<f64>,

	/// Remove output directories even when a run aborts.
	#[serde(default)]
	pub cleanup_on_failure: bool,

	/// Where to write the PNG chart.
	pub chart: PathBuf,

	/// Where to write the CSV table, if anywhere.
	#[serde(default)]
	pub csv: Option<PathBuf>,

	/// Chart title; the chart reporter's default if unset.
	#[serde(default)]
	pub title: Option<String>,

	/// Strategies under comparison.
	pub strategies: Vec<StrategyConfig>,
}

fn default_tile_size() -> u32 {
	128
}

fn default_trials() -> usize {
	5
}

impl Config {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		Ok(serde_yaml_ng::from_reader(reader)?)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		Ok(serde_yaml_ng::from_str(text)?)
	}

	/// Parses a configuration file, resolves its relative paths against the file's directory and
	/// validates it.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("opening config {path:?}"))?;
		let mut cfg = Config::from_reader(BufReader::new(file)).with_context(|| format!("parsing config {path:?}"))?;

		let base = path.parent().unwrap_or(Path::new(""));
		cfg.resolve_paths(base);
		cfg.validate()?;
		Ok(cfg)
	}

	pub fn resolve_paths(&mut self, base: &Path) {
		self.source = base.join(&self.source);
		self.chart = base.join(&self.chart);
		if let Some(csv) = &self.csv {
			self.csv = Some(base.join(csv));
		}
		for strategy in &mut self.strategies {
			strategy.resolve_paths(base);
		}
	}

	/// Checks everything that can be checked before the run starts.
	///
	/// Duplicate strategy names are left to the runner, which rejects them on registration.
	pub fn validate(&self) -> Result<()> {
		ensure!(
			self.tile_height > 0 && self.tile_width > 0,
			"tile size must be positive, got {}x{} (height x width)",
			self.tile_height,
			self.tile_width
		);
		ensure!(self.trials > 0, "trials must be at least 1");
		ensure!(!self.strategies.is_empty(), "no strategies configured");
		if let Some(timeout) = self.timeout_seconds {
			ensure!(
				timeout.is_finite() && timeout > 0.0,
				"timeout_seconds must be positive, got {timeout}"
			);
		}

		let mut dest_dirs = HashSet::new();
		for strategy in &self.strategies {
			strategy.validate()?;
			if let Some(dest_dir) = &strategy.dest_dir {
				if !dest_dirs.insert(dest_dir) {
					bail!("strategies must not share the output directory {dest_dir:?}");
				}
			}
		}
		Ok(())
	}

	/// Output directories of all strategies that write to disk.
	pub fn destinations(&self) -> Vec<PathBuf> {
		self
			.strategies
			.iter()
			.filter(|s| s.kind == StrategyKind::Files)
			.filter_map(|s| s.dest_dir.clone())
			.collect()
	}

	pub fn runner_options(&self) -> RunnerOptions {
		RunnerOptions {
			seed: self.seed,
			timeout: self.timeout_seconds.map(Duration::from_secs_f64),
		}
	}

	pub fn display_attributes(&self) -> Result<DisplayAttributes> {
		let mut attributes = DisplayAttributes::default();
		for strategy in &self.strategies {
			if let Some(color) = strategy.color()? {
				attributes.set_color(&strategy.name, color);
			}
		}
		Ok(attributes)
	}
}
