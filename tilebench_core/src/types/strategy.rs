use anyhow::Result;

/// A unit of work under comparison.
///
/// Every input (source path, tile size, destination) is bound when the strategy is built, so an
/// invocation takes no arguments. Whatever the work produces is discarded; only success or failure
/// matters to the harness. Strategies are shared with timeout workers, hence `Send + Sync`.
pub trait Strategy: Send + Sync {
	fn invoke(&self) -> Result<()>;
}

impl<F> Strategy for F
where
	F: Fn() -> Result<()> + Send + Sync,
{
	fn invoke(&self) -> Result<()> {
		self()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};

	struct Counter(AtomicUsize);

	impl Strategy for Counter {
		fn invoke(&self) -> Result<()> {
			self.0.fetch_add(1, Ordering::SeqCst);
			Ok(())
		}
	}

	#[test]
	fn closures_are_strategies() {
		let strategy: Box<dyn Strategy> = Box::new(|| -> Result<()> { Ok(()) });
		assert!(strategy.invoke().is_ok());
	}

	#[test]
	fn custom_strategy() {
		let counter = Counter(AtomicUsize::new(0));
		counter.invoke().unwrap();
		counter.invoke().unwrap();
		assert_eq!(counter.0.load(Ordering::SeqCst), 2);
	}
}
