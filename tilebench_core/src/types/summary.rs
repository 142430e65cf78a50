use serde::Serialize;
use std::fmt;

/// Descriptive statistics of one strategy's durations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
	pub count: usize,
	pub mean: f64,
	pub min: f64,
	pub max: f64,
	/// Population standard deviation.
	pub std_dev: f64,
	pub total: f64,
}

impl Summary {
	/// Returns `None` for an empty slice.
	pub fn from_seconds(seconds: &[f64]) -> Option<Self> {
		if seconds.is_empty() {
			return None;
		}

		let count = seconds.len();
		let total: f64 = seconds.iter().sum();
		let mean = total / count as f64;
		let variance = seconds.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count as f64;

		Some(Self {
			count,
			mean,
			min: seconds.iter().copied().fold(f64::INFINITY, f64::min),
			max: seconds.iter().copied().fold(f64::NEG_INFINITY, f64::max),
			std_dev: variance.sqrt(),
			total,
		})
	}
}

impl fmt::Display for Summary {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"n={} mean={:.4}s min={:.4}s max={:.4}s sd={:.4}s",
			self.count, self.mean, self.min, self.max, self.std_dev
		)
	}
}
