//! Pixel windows for cutting an image into fixed-size tiles.
//!
//! Windows run in row-major order starting at the top-left corner. Windows on the right and bottom
//! edges are clipped to the image, so they can be smaller than the requested tile size.

use anyhow::{Result, ensure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileWindow {
	/// Column of the tile in the grid.
	pub col: u32,
	/// Row of the tile in the grid.
	pub row: u32,
	pub x: u32,
	pub y: u32,
	pub width: u32,
	pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
	image_width: u32,
	image_height: u32,
	tile_width: u32,
	tile_height: u32,
}

impl TileGrid {
	pub fn new(image_width: u32, image_height: u32, tile_height: u32, tile_width: u32) -> Result<Self> {
		ensure!(
			tile_width > 0 && tile_height > 0,
			"tile size must be positive, got {tile_height}x{tile_width} (height x width)"
		);
		Ok(Self {
			image_width,
			image_height,
			tile_width,
			tile_height,
		})
	}

	pub fn cols(&self) -> u32 {
		self.image_width.div_ceil(self.tile_width)
	}

	pub fn rows(&self) -> u32 {
		self.image_height.div_ceil(self.tile_height)
	}

	pub fn tile_count(&self) -> usize {
		self.cols() as usize * self.rows() as usize
	}

	pub fn windows(&self) -> impl Iterator<Item = TileWindow> + use<> {
		let grid = *self;
		(0..grid.rows()).flat_map(move |row| {
			(0..grid.cols()).map(move |col| {
				let x = col * grid.tile_width;
				let y = row * grid.tile_height;
				TileWindow {
					col,
					row,
					x,
					y,
					width: grid.tile_width.min(grid.image_width - x),
					height: grid.tile_height.min(grid.image_height - y),
				}
			})
		})
	}
}
