//! Removal of benchmark output destinations.
//!
//! The runner never touches the file system. Callers use these helpers to clear the directories
//! strategies write into, before and after a run, so stale tiles of one run are never read back or
//! counted by the next.

use crate::BenchError;
use anyhow::{Context, Result};
use std::{
	fs::{self, FileType},
	io::ErrorKind,
	path::{Path, PathBuf},
};

/// Deletes the file, symbolic link or directory tree at `path`.
///
/// A symbolic link is removed itself; its target is left alone. Any other kind of path, including
/// one that does not exist, fails with [`BenchError::InvalidPath`], so calling this twice on the
/// same path fails the second time. Other lookup errors (e.g. permissions) are passed on.
pub fn remove(path: &Path) -> Result<()> {
	let Some(file_type) = file_type(path)? else {
		return Err(BenchError::InvalidPath(path.to_path_buf()).into());
	};

	if file_type.is_file() || file_type.is_symlink() {
		log::debug!("removing file {path:?}");
		fs::remove_file(path).with_context(|| format!("removing file {path:?}"))
	} else if file_type.is_dir() {
		log::debug!("removing directory {path:?}");
		fs::remove_dir_all(path).with_context(|| format!("removing directory {path:?}"))
	} else {
		Err(BenchError::InvalidPath(path.to_path_buf()).into())
	}
}

/// Like [`remove`], but does nothing when `path` does not exist.
///
/// Returns whether something was removed.
pub fn remove_if_exists(path: &Path) -> Result<bool> {
	if file_type(path)?.is_none() {
		return Ok(false);
	}
	remove(path)?;
	Ok(true)
}

/// Type of the entry at `path` without following links, `None` if there is no such entry.
fn file_type(path: &Path) -> Result<Option<FileType>> {
	match fs::symlink_metadata(path) {
		Ok(meta) => Ok(Some(meta.file_type())),
		Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => Ok(None),
		Err(err) => Err(err).with_context(|| format!("inspecting {path:?}")),
	}
}

/// Removes a set of destinations when dropped, unless disarmed.
///
/// Used to clear output directories even if a run aborts halfway.
///
/// A strategy that overran its timeout keeps running on its detached worker thread (see
/// [`measure_with_timeout`](crate::measure_with_timeout)) and may write into a destination again
/// after the guard removed it.
#[derive(Debug)]
pub struct CleanupGuard {
	paths: Vec<PathBuf>,
	armed: bool,
}

impl CleanupGuard {
	pub fn new(paths: Vec<PathBuf>) -> Self {
		Self { paths, armed: true }
	}

	/// Keeps the destinations in place.
	pub fn disarm(mut self) {
		self.armed = false;
	}
}

impl Drop for CleanupGuard {
	fn drop(&mut self) {
		if !self.armed {
			return;
		}
		for path in &self.paths {
			if let Err(err) = remove_if_exists(path) {
				log::warn!("cleanup of {path:?} failed: {err:#}");
			}
		}
	}
}
