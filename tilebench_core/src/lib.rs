//! Contains the benchmark harness: timing, randomized trial scheduling, result collection,
//! destination cleanup and the reporter interface.
//!
//! ```rust
//! use tilebench_core::*;
//!
//! let mut runner = BenchmarkRunner::default();
//! runner.register("noop", || Ok(())).unwrap();
//! let results = runner.run(3).unwrap();
//! assert_eq!(results.get("noop").unwrap().len(), 3);
//! ```

pub mod cleanup;
pub mod error;
pub mod report;
pub mod runner;
pub mod timer;
pub mod types;

pub use cleanup::{CleanupGuard, remove, remove_if_exists};
pub use error::BenchError;
pub use report::{DisplayAttributes, Reporter, SummaryReporter};
pub use runner::{BenchmarkRunner, RunnerOptions};
pub use timer::{measure, measure_with_timeout};
pub use types::*;
