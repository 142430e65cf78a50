use std::{fmt, path::PathBuf, time::Duration};

/// Named failure conditions of the harness.
///
/// They travel inside `anyhow::Error`; use `downcast_ref::<BenchError>()` to match on them.
/// Errors raised by strategies themselves are never wrapped in this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
	/// A strategy with this name is already registered.
	DuplicateName(String),
	/// The path is neither a regular file, a symbolic link nor a directory (or does not exist).
	InvalidPath(PathBuf),
	/// A strategy invocation exceeded the configured limit.
	Timeout { limit: Duration },
}

impl fmt::Display for BenchError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			BenchError::DuplicateName(name) => write!(f, "duplicate strategy name {name:?}"),
			BenchError::InvalidPath(path) => write!(f, "path {path:?} is not a file, link or directory"),
			BenchError::Timeout { limit } => {
				write!(f, "strategy did not finish within {:.3}s", limit.as_secs_f64())
			}
		}
	}
}

impl std::error::Error for BenchError {}
