use anyhow::Result;
use std::path::PathBuf;
use tilebench::{config::Config, session};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// benchmark config file (YAML), relative paths in it are resolved against its directory
	#[arg()]
	config_file: PathBuf,

	/// override the number of trials
	#[arg(long, value_name = "int", display_order = 1)]
	trials: Option<usize>,

	/// override the seed of the execution order shuffles
	#[arg(long, value_name = "int", display_order = 1)]
	seed: Option<u64>,

	/// override where the PNG chart is written
	#[arg(long, value_name = "file", display_order = 2)]
	chart: Option<PathBuf>,

	/// also write the timings as CSV table
	#[arg(long, value_name = "file", display_order = 2)]
	csv: Option<PathBuf>,
}

impl Subcommand {
	fn apply(&self, config: &mut Config) {
		if let Some(trials) = self.trials {
			config.trials = trials;
		}
		if self.seed.is_some() {
			config.seed = self.seed;
		}
		if let Some(chart) = &self.chart {
			config.chart.clone_from(chart);
		}
		if self.csv.is_some() {
			config.csv.clone_from(&self.csv);
		}
	}
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let mut config = Config::from_path(&arguments.config_file)?;
	arguments.apply(&mut config);

	eprintln!(
		"benchmarking {} strategies on {:?}",
		config.strategies.len(),
		config.source
	);
	let results = session::execute(&config)?;
	eprintln!(
		"finished {} trials, chart written to {:?}",
		results.trials_completed(),
		config.chart
	);
	Ok(())
}
