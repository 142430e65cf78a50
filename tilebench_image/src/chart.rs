//! A PNG line chart of runtimes per trial on a logarithmic time axis.
//!
//! Every strategy is drawn as a dashed line with circle markers in its display color. Horizontal
//! grid lines mark full decades (darker, labeled) and the 2..9 steps in between (lighter). The
//! chart carries a title and both axis labels. The legend right of the plot lists one swatch and
//! name per strategy in registration order. A result set that is not complete gets a red frame
//! around the whole chart.

use crate::color::PALETTE;
use ab_glyph::{FontArc, PxScale};
use anyhow::{Context, Result, ensure};
use image::{Rgb, RgbImage, imageops};
use imageproc::{
	drawing::{
		draw_filled_circle_mut, draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut,
		draw_text_mut, text_size,
	},
	rect::Rect,
};
use std::{fs, path::PathBuf};
use tilebench_core::{DisplayAttributes, Reporter, ResultSet};

static FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

pub const DEFAULT_TITLE: &str = "Comparison of Runtimes When Using Pixel Coordinates";
const X_LABEL: &str = "Trial Number";
const Y_LABEL: &str = "Runtime in Seconds (Logarithmic Scale)";

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const AXIS: Rgb<u8> = Rgb([0, 0, 0]);
const MAJOR_GRID: Rgb<u8> = Rgb([200, 200, 200]);
const MINOR_GRID: Rgb<u8> = Rgb([235, 235, 235]);
const INCOMPLETE: Rgb<u8> = Rgb([220, 0, 0]);

const TITLE_SCALE: f32 = 18.0;
const LABEL_SCALE: f32 = 14.0;
const TICK_SCALE: f32 = 12.0;

const MARGIN_LEFT: u32 = 80;
const MARGIN_RIGHT: u32 = 16;
const MARGIN_TOP: u32 = 40;
const MARGIN_BOTTOM: u32 = 56;
const MARKER_RADIUS: i32 = 4;
const DASH_ON: f32 = 6.0;
const DASH_OFF: f32 = 4.0;
const FRAME_WIDTH: u32 = 4;
const SWATCH: u32 = 12;
const LEGEND_GAP: u32 = 6;
const LEGEND_ROW: u32 = 20;
const MAX_X_TICKS: usize = 10;

/// Shortest duration that can be placed on the logarithmic axis.
const MIN_SECONDS: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartReporter {
	pub path: PathBuf,
	pub width: u32,
	pub height: u32,
	pub title: String,
}

impl ChartReporter {
	pub fn new(path: PathBuf) -> Self {
		Self {
			path,
			width: 800,
			height: 600,
			title: DEFAULT_TITLE.to_string(),
		}
	}

	/// Draws the chart without writing it.
	pub fn render(&self, results: &ResultSet, attributes: &DisplayAttributes) -> Result<RgbImage> {
		let font = load_font()?;
		let plot = self.plot_area(&font, results);
		ensure!(
			plot.right > plot.left + 2.0 * SWATCH as f32 && plot.bottom > plot.top + 2.0 * SWATCH as f32,
			"chart size {}x{} is too small",
			self.width,
			self.height
		);

		let mut canvas = RgbImage::from_pixel(self.width, self.height, BACKGROUND);

		plot.draw_grid(&mut canvas);
		plot.draw_axes(&mut canvas, &font);

		for (index, (name, seconds)) in results.iter().enumerate() {
			let color = Rgb(series_color(attributes, name, index));
			let points: Vec<(f32, f32)> = seconds
				.iter()
				.enumerate()
				.map(|(trial, s)| plot.project(trial, *s))
				.collect();

			for pair in points.windows(2) {
				draw_dashed_line(&mut canvas, pair[0], pair[1], color);
			}
			for (x, y) in &points {
				draw_filled_circle_mut(&mut canvas, (x.round() as i32, y.round() as i32), MARKER_RADIUS, color);
			}
		}

		self.draw_labels(&mut canvas, &font, &plot);
		self.draw_legend(&mut canvas, &font, &plot, results, attributes);

		if !results.is_complete() {
			for inset in 0..FRAME_WIDTH {
				let rect = Rect::at(inset as i32, inset as i32)
					.of_size(self.width - 2 * inset, self.height - 2 * inset);
				draw_hollow_rect_mut(&mut canvas, rect, INCOMPLETE);
			}
		}

		Ok(canvas)
	}

	fn plot_area(&self, font: &FontArc, results: &ResultSet) -> PlotArea {
		let legend = legend_width(font, results);
		PlotArea::new(self.width.saturating_sub(legend), self.height, results)
	}

	fn draw_labels(&self, canvas: &mut RgbImage, font: &FontArc, plot: &PlotArea) {
		draw_text_centered(canvas, font, TITLE_SCALE, self.width as f32 / 2.0, 12, &self.title);
		draw_text_centered(
			canvas,
			font,
			LABEL_SCALE,
			(plot.left + plot.right) / 2.0,
			plot.bottom as i32 + 28,
			X_LABEL,
		);

		// vertical label: draw horizontally, then rotate counterclockwise
		let (w, h) = text_size(PxScale::from(LABEL_SCALE), font, Y_LABEL);
		let mut label = RgbImage::from_pixel(w + 2, h + 4, BACKGROUND);
		draw_text_mut(&mut label, AXIS, 1, 0, PxScale::from(LABEL_SCALE), font, Y_LABEL);
		let label = imageops::rotate270(&label);
		let y = (plot.top + plot.bottom) / 2.0 - label.height() as f32 / 2.0;
		imageops::replace(canvas, &label, 8, i64::from(y.round() as i32));
	}

	fn draw_legend(
		&self,
		canvas: &mut RgbImage,
		font: &FontArc,
		plot: &PlotArea,
		results: &ResultSet,
		attributes: &DisplayAttributes,
	) {
		let x = plot.right as u32 + 2 * LEGEND_GAP;
		for (index, name) in results.names().enumerate() {
			let y = plot.top as u32 + index as u32 * LEGEND_ROW;
			if y + SWATCH > plot.bottom as u32 {
				break;
			}
			let color = Rgb(series_color(attributes, name, index));
			let swatch = Rect::at(x as i32, y as i32).of_size(SWATCH, SWATCH);
			draw_filled_rect_mut(canvas, swatch, color);
			draw_hollow_rect_mut(canvas, swatch, AXIS);
			draw_text_mut(
				canvas,
				AXIS,
				(x + SWATCH + LEGEND_GAP) as i32,
				y as i32 - 1,
				PxScale::from(LABEL_SCALE),
				font,
				name,
			);
		}
	}
}

impl Reporter for ChartReporter {
	fn report(&self, results: &ResultSet, attributes: &DisplayAttributes) -> Result<()> {
		let canvas = self.render(results, attributes)?;
		if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
			fs::create_dir_all(parent)?;
		}
		canvas
			.save_with_format(&self.path, image::ImageFormat::Png)
			.with_context(|| format!("writing chart {:?}", self.path))?;
		log::info!("chart written to {:?}", self.path);
		Ok(())
	}
}

fn load_font() -> Result<FontArc> {
	FontArc::try_from_slice(FONT_DATA).context("loading chart font")
}

/// Horizontal space the legend takes right of the plot, gaps included.
fn legend_width(font: &FontArc, results: &ResultSet) -> u32 {
	let text = results
		.names()
		.map(|name| text_size(PxScale::from(LABEL_SCALE), font, name).0)
		.max()
		.unwrap_or(0);
	2 * LEGEND_GAP + SWATCH + LEGEND_GAP + text
}

fn draw_text_centered(canvas: &mut RgbImage, font: &FontArc, scale: f32, center_x: f32, y: i32, text: &str) {
	let (w, _) = text_size(PxScale::from(scale), font, text);
	let x = (center_x - w as f32 / 2.0).round() as i32;
	draw_text_mut(canvas, AXIS, x, y, PxScale::from(scale), font, text);
}

fn series_color(attributes: &DisplayAttributes, name: &str, index: usize) -> [u8; 3] {
	attributes.color(name).unwrap_or(PALETTE[index % PALETTE.len()])
}

/// Maps trial indices and durations to pixel coordinates.
#[derive(Debug, Clone, Copy)]
struct PlotArea {
	left: f32,
	right: f32,
	top: f32,
	bottom: f32,
	trials: usize,
	/// Lowest and highest decade exponent on the y axis.
	decades: (i32, i32),
}

impl PlotArea {
	fn new(width: u32, height: u32, results: &ResultSet) -> Self {
		let decades = match results.bounds() {
			Some((min, max)) => {
				let lo = min.max(MIN_SECONDS).log10().floor() as i32;
				let hi = max.max(MIN_SECONDS).log10().ceil() as i32;
				(lo, hi.max(lo + 1))
			}
			None => (-3, 0),
		};
		let longest = results.iter().map(|(_, s)| s.len()).max().unwrap_or(0);
		let trials = results.trials_requested().max(longest);

		Self {
			left: MARGIN_LEFT as f32,
			right: width.saturating_sub(MARGIN_RIGHT) as f32,
			top: MARGIN_TOP as f32,
			bottom: height.saturating_sub(MARGIN_BOTTOM) as f32,
			trials,
			decades,
		}
	}

	fn x(&self, trial: usize) -> f32 {
		if self.trials <= 1 {
			return (self.left + self.right) / 2.0;
		}
		self.left + (self.right - self.left) * trial as f32 / (self.trials - 1) as f32
	}

	fn y(&self, seconds: f64) -> f32 {
		let (lo, hi) = self.decades;
		let fraction = (seconds.max(MIN_SECONDS).log10() - f64::from(lo)) / f64::from(hi - lo);
		self.bottom - (self.bottom - self.top) * fraction as f32
	}

	fn project(&self, trial: usize, seconds: f64) -> (f32, f32) {
		(self.x(trial), self.y(seconds))
	}

	fn draw_grid(&self, canvas: &mut RgbImage) {
		let (lo, hi) = self.decades;
		for exponent in lo..hi {
			let decade = 10f64.powi(exponent);
			for step in 2..10 {
				let y = self.y(decade * f64::from(step));
				draw_line_segment_mut(canvas, (self.left, y), (self.right, y), MINOR_GRID);
			}
		}
		for exponent in lo..=hi {
			let y = self.y(10f64.powi(exponent));
			draw_line_segment_mut(canvas, (self.left, y), (self.right, y), MAJOR_GRID);
		}
	}

	fn draw_axes(&self, canvas: &mut RgbImage, font: &FontArc) {
		draw_line_segment_mut(canvas, (self.left, self.bottom), (self.right, self.bottom), AXIS);
		draw_line_segment_mut(canvas, (self.left, self.top), (self.left, self.bottom), AXIS);

		let step = self.trials.div_ceil(MAX_X_TICKS).max(1);
		for trial in 0..self.trials {
			let x = self.x(trial);
			draw_line_segment_mut(canvas, (x, self.bottom), (x, self.bottom + 5.0), AXIS);
			if trial % step == 0 {
				draw_text_centered(canvas, font, TICK_SCALE, x, self.bottom as i32 + 8, &trial.to_string());
			}
		}

		let (lo, hi) = self.decades;
		let scale = PxScale::from(TICK_SCALE);
		for exponent in lo..=hi {
			let y = self.y(10f64.powi(exponent));
			draw_line_segment_mut(canvas, (self.left - 6.0, y), (self.left, y), AXIS);

			let text = format!("1e{exponent}");
			let (w, h) = text_size(scale, font, &text);
			let x = self.left as i32 - 10 - w as i32;
			draw_text_mut(canvas, AXIS, x, y.round() as i32 - h as i32 / 2, scale, font, &text);
		}
	}
}

fn draw_dashed_line(canvas: &mut RgbImage, from: (f32, f32), to: (f32, f32), color: Rgb<u8>) {
	let (dx, dy) = (to.0 - from.0, to.1 - from.1);
	let length = dx.hypot(dy);
	if length == 0.0 {
		return;
	}

	let mut start = 0.0;
	while start < length {
		let end = (start + DASH_ON).min(length);
		let a = (from.0 + dx * start / length, from.1 + dy * start / length);
		let b = (from.0 + dx * end / length, from.1 + dy * end / length);
		draw_line_segment_mut(canvas, a, b, color);
		start += DASH_ON + DASH_OFF;
	}
}
