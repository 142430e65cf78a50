//! Randomized, repeated benchmark runs over named strategies.
//!
//! A run consists of `num_trials` trials. In every trial each registered strategy is invoked
//! exactly once, in a freshly shuffled order. Entry `t` of every strategy's sequence belongs to
//! trial `t`, no matter in which position the strategy ran within that trial.
//!
//! Strategies are invoked one after another on the calling thread. A failing strategy aborts the
//! run: its error is returned unchanged, all completed trials stay in the [`ResultSet`] and the
//! entries of the aborted trial are discarded.

use crate::{BenchError, ResultSet, Strategy, measure, measure_with_timeout};
use anyhow::{Result, ensure};
use itertools::Itertools;
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::{sync::Arc, time::Duration};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunnerOptions {
	/// Seed for the per-trial shuffles; `None` seeds from the OS.
	pub seed: Option<u64>,
	/// Upper bound for a single strategy invocation.
	pub timeout: Option<Duration>,
}

#[derive(Default)]
pub struct BenchmarkRunner {
	strategies: Vec<(String, Arc<dyn Strategy>)>,
	options: RunnerOptions,
	results: ResultSet,
}

impl BenchmarkRunner {
	pub fn new(options: RunnerOptions) -> Self {
		Self {
			options,
			..Self::default()
		}
	}

	/// Adds a strategy under a unique name.
	///
	/// Fails with [`BenchError::DuplicateName`] if the name is taken; the earlier registration
	/// stays in effect.
	pub fn register<F>(&mut self, name: &str, strategy: F) -> Result<()>
	where
		F: Fn() -> Result<()> + Send + Sync + 'static,
	{
		self.register_strategy(name, Arc::new(strategy))
	}

	/// Like [`register`](Self::register), for any other [`Strategy`] implementation.
	pub fn register_strategy(&mut self, name: &str, strategy: Arc<dyn Strategy>) -> Result<()> {
		if self.strategies.iter().any(|(n, _)| n == name) {
			return Err(BenchError::DuplicateName(name.to_string()).into());
		}
		log::trace!("register strategy {name:?}");
		self.strategies.push((name.to_string(), strategy));
		Ok(())
	}

	/// Registered names in registration order.
	pub fn names(&self) -> Vec<&str> {
		self.strategies.iter().map(|(n, _)| n.as_str()).collect()
	}

	pub fn options(&self) -> &RunnerOptions {
		&self.options
	}

	/// Results of the latest run; partially filled if that run was aborted.
	pub fn results(&self) -> &ResultSet {
		&self.results
	}

	/// Runs `num_trials` trials and returns the completed results.
	pub fn run(&mut self, num_trials: usize) -> Result<&ResultSet> {
		ensure!(num_trials > 0, "the number of trials must be at least 1");
		ensure!(!self.strategies.is_empty(), "no strategies registered");

		let results = ResultSet::new(&self.names(), num_trials);
		self.results = results;

		let mut rng = match self.options.seed {
			Some(seed) => StdRng::seed_from_u64(seed),
			None => StdRng::from_entropy(),
		};
		let mut order: Vec<usize> = (0..self.strategies.len()).collect();

		for trial in 0..num_trials {
			order.shuffle(&mut rng);
			log::debug!(
				"trial {}/{num_trials}: order {}",
				trial + 1,
				order.iter().map(|&i| &self.strategies[i].0).join(", ")
			);

			for &index in &order {
				let (name, strategy) = &self.strategies[index];
				match invoke(strategy, self.options.timeout) {
					Ok(seconds) => {
						log::debug!("{name}: {seconds:.4}s");
						self.results.push(index, seconds);
					}
					Err(err) => {
						log::error!("strategy {name:?} failed in trial {}: {err}", trial + 1);
						self.results.rollback();
						return Err(err);
					}
				}
			}

			self.results.commit_trial();
			log::info!("finished trial {}/{num_trials}", trial + 1);
		}

		Ok(&self.results)
	}
}

fn invoke(strategy: &Arc<dyn Strategy>, timeout: Option<Duration>) -> Result<f64> {
	let ((), seconds) = match timeout {
		None => measure(|| strategy.invoke())?,
		Some(limit) => {
			let strategy = Arc::clone(strategy);
			measure_with_timeout(move || strategy.invoke(), limit)?
		}
	};
	Ok(seconds)
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::bail;
	use pretty_assertions::assert_eq;
	use rstest::rstest;
	use std::{
		sync::{
			Mutex,
			atomic::{AtomicUsize, Ordering},
		},
		thread,
	};

	/// Strategy that appends its name to a shared log on every call.
	fn logging(
		name: &'static str,
		log: &Arc<Mutex<Vec<&'static str>>>,
	) -> impl Fn() -> Result<()> + Send + Sync + 'static {
		let log = Arc::clone(log);
		move || {
			log.lock().unwrap().push(name);
			Ok(())
		}
	}

	fn sleeping(millis: u64) -> impl Fn() -> Result<()> + Send + Sync + 'static {
		move || {
			thread::sleep(Duration::from_millis(millis));
			Ok(())
		}
	}

	/// Strategy that fails on call number `fail_at` (0-indexed).
	fn failing_at(fail_at: usize) -> impl Fn() -> Result<()> + Send + Sync + 'static {
		let calls = AtomicUsize::new(0);
		move || {
			if calls.fetch_add(1, Ordering::SeqCst) == fail_at {
				bail!("tiler exploded");
			}
			Ok(())
		}
	}

	#[rstest]
	#[case(1, 1)]
	#[case(1, 4)]
	#[case(3, 5)]
	#[case(5, 2)]
	fn equal_length(#[case] strategies: usize, #[case] trials: usize) -> Result<()> {
		let mut runner = BenchmarkRunner::default();
		for i in 0..strategies {
			runner.register(&format!("s{i}"), || Ok(()))?;
		}

		let results = runner.run(trials)?;
		assert!(results.is_complete());
		assert_eq!(results.len(), strategies);
		for (_, seconds) in results.iter() {
			assert_eq!(seconds.len(), trials);
			assert!(seconds.iter().all(|s| *s >= 0.0));
		}
		Ok(())
	}

	#[test]
	fn every_strategy_once_per_trial() -> Result<()> {
		let log = Arc::new(Mutex::new(Vec::new()));
		let mut runner = BenchmarkRunner::default();
		for name in ["a", "b", "c"] {
			runner.register(name, logging(name, &log))?;
		}
		runner.run(20)?;

		let calls = log.lock().unwrap().clone();
		assert_eq!(calls.len(), 60);
		for trial in calls.chunks(3) {
			let mut sorted = trial.to_vec();
			sorted.sort_unstable();
			assert_eq!(sorted, vec!["a", "b", "c"]);
		}
		Ok(())
	}

	#[test]
	fn order_is_shuffled() -> Result<()> {
		let log = Arc::new(Mutex::new(Vec::new()));
		let mut runner = BenchmarkRunner::new(RunnerOptions {
			seed: Some(1),
			timeout: None,
		});
		runner.register("a", logging("a", &log))?;
		runner.register("b", logging("b", &log))?;
		runner.run(64)?;

		let first_a = log.lock().unwrap().chunks(2).filter(|t| t[0] == "a").count();
		// 64 fair coin flips never land on 0 or 64 for this seed
		assert!(first_a > 0 && first_a < 64, "a ran first in {first_a} of 64 trials");
		Ok(())
	}

	#[test]
	fn seed_makes_order_reproducible() -> Result<()> {
		let orders: Vec<Vec<&str>> = (0..2)
			.map(|_| {
				let log = Arc::new(Mutex::new(Vec::new()));
				let mut runner = BenchmarkRunner::new(RunnerOptions {
					seed: Some(42),
					timeout: None,
				});
				for name in ["x", "y", "z", "w"] {
					runner.register(name, logging(name, &log)).unwrap();
				}
				runner.run(10).unwrap();
				let calls = log.lock().unwrap().clone();
				calls
			})
			.collect();
		assert_eq!(orders[0], orders[1]);
		Ok(())
	}

	#[test]
	fn trial_alignment() -> Result<()> {
		// every strategy sleeps longer in each trial, so entry t must reflect trial t
		fn growing(step_ms: u64) -> impl Fn() -> Result<()> + Send + Sync + 'static {
			let calls = AtomicUsize::new(0);
			move || {
				let trial = calls.fetch_add(1, Ordering::SeqCst) as u64;
				thread::sleep(Duration::from_millis(step_ms * (trial + 1)));
				Ok(())
			}
		}

		let mut runner = BenchmarkRunner::default();
		runner.register("a", growing(3))?;
		runner.register("b", growing(4))?;
		let results = runner.run(4)?;

		for (trial, row) in (0..4).map(|t| (t, results.trial(t))) {
			let a = row[0].unwrap();
			let b = row[1].unwrap();
			assert!(a >= 0.003 * (trial + 1) as f64, "a[{trial}] = {a}");
			assert!(b >= 0.004 * (trial + 1) as f64, "b[{trial}] = {b}");
		}
		Ok(())
	}

	#[test]
	fn duplicate_name_is_rejected() -> Result<()> {
		let log = Arc::new(Mutex::new(Vec::new()));
		let mut runner = BenchmarkRunner::default();
		runner.register("fast", logging("first", &log))?;

		let err = runner.register("fast", logging("second", &log)).unwrap_err();
		assert_eq!(
			err.downcast_ref::<BenchError>(),
			Some(&BenchError::DuplicateName("fast".to_string()))
		);
		assert_eq!(runner.names(), vec!["fast"]);

		runner.run(1)?;
		assert_eq!(*log.lock().unwrap(), vec!["first"]);
		Ok(())
	}

	#[rstest]
	#[case(0)]
	#[case(2)]
	#[case(4)]
	fn abort_on_failure(#[case] fail_at: usize) -> Result<()> {
		let mut runner = BenchmarkRunner::default();
		runner.register("ok1", || Ok(()))?;
		runner.register("flaky", failing_at(fail_at))?;
		runner.register("ok2", || Ok(()))?;

		let err = runner.run(10).unwrap_err();
		assert_eq!(err.to_string(), "tiler exploded");

		let results = runner.results();
		assert!(!results.is_complete());
		assert_eq!(results.trials_completed(), fail_at);
		for (_, seconds) in results.iter() {
			assert_eq!(seconds.len(), fail_at);
		}
		assert_eq!(results.trial(fail_at), vec![None, None, None]);
		results.check_aligned()?;
		Ok(())
	}

	#[test]
	fn rejects_zero_trials_and_empty_registry() {
		let mut runner = BenchmarkRunner::default();
		assert_eq!(
			runner.run(1).unwrap_err().to_string(),
			"no strategies registered"
		);
		runner.register("a", || Ok(())).unwrap();
		assert_eq!(
			runner.run(0).unwrap_err().to_string(),
			"the number of trials must be at least 1"
		);
	}

	#[test]
	fn timeout_aborts_run() -> Result<()> {
		let limit = Duration::from_millis(20);
		let mut runner = BenchmarkRunner::new(RunnerOptions {
			seed: Some(7),
			timeout: Some(limit),
		});
		runner.register("hung", sleeping(1_000))?;

		let err = runner.run(3).unwrap_err();
		assert_eq!(err.downcast_ref::<BenchError>(), Some(&BenchError::Timeout { limit }));
		assert_eq!(runner.results().trials_completed(), 0);
		Ok(())
	}

	#[test]
	fn timeout_allows_fast_strategies() -> Result<()> {
		let mut runner = BenchmarkRunner::new(RunnerOptions {
			seed: None,
			timeout: Some(Duration::from_secs(10)),
		});
		runner.register("quick", sleeping(1))?;
		assert!(runner.run(3)?.is_complete());
		Ok(())
	}

	#[test]
	fn fast_versus_slow() -> Result<()> {
		let mut runner = BenchmarkRunner::default();
		runner.register("fast", sleeping(10))?;
		runner.register("slow", sleeping(50))?;
		let results = runner.run(5)?;

		let fast = results.get("fast").unwrap();
		let slow = results.get("slow").unwrap();
		assert_eq!(fast.len(), 5);
		assert_eq!(slow.len(), 5);

		let fast_total: f64 = fast.iter().sum();
		let slow_total: f64 = slow.iter().sum();
		assert!(fast_total < slow_total, "fast {fast_total} >= slow {slow_total}");
		assert!(fast_total / 5.0 < slow_total / 5.0);
		Ok(())
	}

	#[test]
	fn rerun_resets_results() -> Result<()> {
		let mut runner = BenchmarkRunner::default();
		runner.register("a", || Ok(()))?;
		runner.run(4)?;
		let results = runner.run(2)?;
		assert_eq!(results.get("a").unwrap().len(), 2);
		assert_eq!(results.trials_requested(), 2);
		Ok(())
	}

	#[test]
	fn registers_trait_objects() -> Result<()> {
		struct Counter(AtomicUsize);
		impl Strategy for Counter {
			fn invoke(&self) -> Result<()> {
				self.0.fetch_add(1, Ordering::SeqCst);
				Ok(())
			}
		}

		let counter = Arc::new(Counter(AtomicUsize::new(0)));
		let mut runner = BenchmarkRunner::default();
		runner.register_strategy("counter", counter.clone())?;
		runner.register("closure", || Ok(()))?;
		runner.run(3)?;
		assert_eq!(counter.0.load(Ordering::SeqCst), 3);
		Ok(())
	}
}
