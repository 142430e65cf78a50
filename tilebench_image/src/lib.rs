//! Tiling strategies and reporters for the TileBench harness.
//!
//! - [`tiler`]: two interchangeable pixel tilers, one going through tile files on disk and one
//!   staying in memory
//! - [`grid`]: the tile windows both tilers cut
//! - [`chart`] and [`table`]: reporters writing a PNG chart and a CSV table
//! - [`synthetic`]: generation of a source raster for running without external data

pub mod chart;
pub mod color;
pub mod grid;
pub mod synthetic;
pub mod table;
pub mod tiler;

pub use chart::ChartReporter;
pub use color::parse_color;
pub use grid::{TileGrid, TileWindow};
pub use table::CsvReporter;
pub use tiler::{FileTiler, MemoryTiler, TilingStrategy};
