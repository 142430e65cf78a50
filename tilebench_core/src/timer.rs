//! Wall-clock measurement of a single invocation.
//!
//! Both functions use a monotonic clock (`Instant`), so the returned number of seconds is never
//! negative. If the measured closure fails, its error is returned unchanged and no duration exists
//! for that invocation.

use crate::BenchError;
use anyhow::{Result, anyhow};
use std::{
	sync::mpsc::{self, RecvTimeoutError},
	thread,
	time::{Duration, Instant},
};

/// Invokes `f` and returns its value together with the elapsed time in seconds.
pub fn measure<T, F>(f: F) -> Result<(T, f64)>
where
	F: FnOnce() -> Result<T>,
{
	let start = Instant::now();
	let value = f()?;
	Ok((value, start.elapsed().as_secs_f64()))
}

/// Like [`measure`], but gives up after `limit` and fails with [`BenchError::Timeout`].
///
/// `f` runs on its own worker thread. A panic inside `f` is reported as an error. A worker that
/// overruns is detached, not stopped: it runs `f` to completion in the background, including any
/// file system side effects, and its late result is dropped.
pub fn measure_with_timeout<T, F>(f: F, limit: Duration) -> Result<(T, f64)>
where
	T: Send + 'static,
	F: FnOnce() -> Result<T> + Send + 'static,
{
	let (sender, receiver) = mpsc::channel();

	thread::Builder::new()
		.name("tilebench-worker".to_string())
		.spawn(move || {
			// the receiver is gone once the timeout fired
			let _ = sender.send(measure(f));
		})?;

	match receiver.recv_timeout(limit) {
		Ok(result) => result,
		Err(RecvTimeoutError::Timeout) => Err(BenchError::Timeout { limit }.into()),
		Err(RecvTimeoutError::Disconnected) => Err(anyhow!("strategy worker panicked")),
	}
}
