//! # TileBench
//!
//! TileBench compares raster tiling strategies: it cuts one large source image into fixed-size
//! pixel tiles with every strategy, repeats that over several trials in randomized order, and
//! plots the runtimes.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use tilebench::{config::Config, session};
//! use std::path::Path;
//!
//! let config = Config::from_path(Path::new("bench.yml")).unwrap();
//! let results = session::execute(&config).unwrap();
//! for (name, seconds) in results.iter() {
//!     println!("{name}: {seconds:?}");
//! }
//! ```

pub mod config;
pub mod session;

pub use tilebench_core as core;
pub use tilebench_image as image;
