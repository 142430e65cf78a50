//! Benchmark configuration.
//!
//! - [`Config`](crate::config::Config): top-level YAML loader, path resolution and validation
//! - [`StrategyConfig`](crate::config::StrategyConfig): one strategy under comparison
//!
//! Relative paths in a configuration file are resolved against the directory of that file.

mod main;
mod strategy;

pub use main::Config;
pub use strategy::{StrategyConfig, StrategyKind};
