//! Interchangeable ways of cutting a source raster into pixel tiles.

mod file;
mod memory;

pub use file::FileTiler;
pub use memory::MemoryTiler;

use anyhow::{Context, Result};
use image::DynamicImage;
use std::path::Path;

/// Partitions the image at `path` into tiles of `tile_height x tile_width` pixels.
pub trait TilingStrategy: Send + Sync {
	/// Short identifier of the implementation, e.g. for logs.
	fn kind(&self) -> &'static str;

	fn tile(&self, path: &Path, tile_height: u32, tile_width: u32) -> Result<Vec<DynamicImage>>;
}

pub(crate) fn open_source(path: &Path) -> Result<DynamicImage> {
	let image = image::open(path).with_context(|| format!("opening source raster {path:?}"))?;
	log::trace!("decoded {path:?}: {}x{} {:?}", image.width(), image.height(), image.color());
	Ok(image)
}
