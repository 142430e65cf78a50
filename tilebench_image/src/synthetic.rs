//! Synthetic source rasters, so a benchmark can run without external data.

use anyhow::{Context, Result, ensure};
use image::{DynamicImage, Rgb, RgbImage};
use std::{fs, path::Path};

/// Generates an RGB image with smooth gradients and a coarse 16 px checker pattern.
pub fn create_source_image(width: u32, height: u32) -> DynamicImage {
	DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| -> Rgb<u8> {
		let checker = if (x / 16 + y / 16) % 2 == 0 { 0 } else { 64 };
		Rgb([
			(x % 256) as u8,
			(y % 256) as u8,
			((x ^ y) % 192) as u8 + checker,
		])
	}))
}

/// Writes a synthetic image to `path`; the format follows the file extension (e.g. `.tif`, `.png`).
pub fn save_source_image(path: &Path, width: u32, height: u32) -> Result<()> {
	ensure!(width > 0 && height > 0, "image size must be positive, got {width}x{height}");

	if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
		fs::create_dir_all(parent)?;
	}

	create_source_image(width, height)
		.save(path)
		.with_context(|| format!("writing source raster {path:?}"))?;
	log::debug!("wrote {width}x{height} source raster to {path:?}");
	Ok(())
}
