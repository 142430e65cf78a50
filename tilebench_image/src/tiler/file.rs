use super::{TilingStrategy, open_source};
use crate::TileGrid;
use anyhow::{Context, Result};
use image::{DynamicImage, ImageFormat};
use std::{
	fs,
	path::{Path, PathBuf},
};

/// Writes every tile as a PNG file into `dest_dir`, then reads all files of that directory back.
///
/// Tile files are named `<source stem>_<x>_<y>.png` after their pixel origin. Whatever regular
/// files already sit in `dest_dir` are read back as well, so callers clear the directory between
/// runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTiler {
	dest_dir: PathBuf,
}

impl FileTiler {
	pub fn new(dest_dir: &Path) -> Self {
		Self {
			dest_dir: dest_dir.to_path_buf(),
		}
	}

	pub fn dest_dir(&self) -> &Path {
		&self.dest_dir
	}

	/// Writes the tiles and returns the number of files written.
	pub fn write_tiles(&self, path: &Path, tile_height: u32, tile_width: u32) -> Result<usize> {
		let image = open_source(path)?;
		let grid = TileGrid::new(image.width(), image.height(), tile_height, tile_width)?;
		let stem = path.file_stem().map_or_else(|| "tile".into(), |s| s.to_string_lossy());

		fs::create_dir_all(&self.dest_dir).with_context(|| format!("creating tile directory {:?}", self.dest_dir))?;

		for window in grid.windows() {
			let filename = self.dest_dir.join(format!("{stem}_{}_{}.png", window.x, window.y));
			image
				.crop_imm(window.x, window.y, window.width, window.height)
				.save_with_format(&filename, ImageFormat::Png)
				.with_context(|| format!("writing tile {filename:?}"))?;
		}

		log::trace!("wrote {} tiles to {:?}", grid.tile_count(), self.dest_dir);
		Ok(grid.tile_count())
	}

	/// Decodes every regular file in `dest_dir`, in directory listing order.
	pub fn read_tiles(&self) -> Result<Vec<DynamicImage>> {
		let mut tiles = Vec::new();
		for entry in fs::read_dir(&self.dest_dir).with_context(|| format!("listing {:?}", self.dest_dir))? {
			let path = entry?.path();
			if !path.is_file() {
				continue;
			}
			tiles.push(image::open(&path).with_context(|| format!("reading tile {path:?}"))?);
		}
		Ok(tiles)
	}
}

impl TilingStrategy for FileTiler {
	fn kind(&self) -> &'static str {
		"files"
	}

	fn tile(&self, path: &Path, tile_height: u32, tile_width: u32) -> Result<Vec<DynamicImage>> {
		self.write_tiles(path, tile_height, tile_width)?;
		self.read_tiles()
	}
}
