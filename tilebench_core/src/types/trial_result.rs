use serde::Serialize;

/// One measured invocation: which strategy, in which trial, and how long it took.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrialResult {
	pub strategy: String,
	pub trial: usize,
	pub seconds: f64,
}

impl TrialResult {
	pub fn new(strategy: &str, trial: usize, seconds: f64) -> Self {
		Self {
			strategy: strategy.to_string(),
			trial,
			seconds,
		}
	}
}
