use super::{TilingStrategy, open_source};
use crate::TileGrid;
use anyhow::Result;
use image::DynamicImage;
use std::path::Path;

/// Decodes the source once and cuts tiles from it in memory, without touching the disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryTiler;

impl MemoryTiler {
	/// Yields tiles lazily in row-major order.
	pub fn tiles(path: &Path, tile_height: u32, tile_width: u32) -> Result<impl Iterator<Item = DynamicImage>> {
		let image = open_source(path)?;
		let grid = TileGrid::new(image.width(), image.height(), tile_height, tile_width)?;
		Ok(grid
			.windows()
			.map(move |w| image.crop_imm(w.x, w.y, w.width, w.height)))
	}
}

impl TilingStrategy for MemoryTiler {
	fn kind(&self) -> &'static str {
		"memory"
	}

	fn tile(&self, path: &Path, tile_height: u32, tile_width: u32) -> Result<Vec<DynamicImage>> {
		Ok(Self::tiles(path, tile_height, tile_width)?.collect())
	}
}
