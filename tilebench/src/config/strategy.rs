use anyhow::{Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tilebench_image::{FileTiler, MemoryTiler, TilingStrategy, parse_color};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
	/// Write tiles to `dest_dir` and read them back.
	Files,
	/// Cut tiles in memory.
	Memory,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StrategyConfig {
	/// Unique name, used in logs, the chart legend and the CSV header.
	pub name: String,

	pub kind: StrategyKind,

	/// Output directory of a `files` strategy. Cleared before and after every run.
	#[serde(default)]
	pub dest_dir: Option<PathBuf>,

	/// Display color: `#rgb`, `#rrggbb` or one of `b g r c m y k w`.
	#[serde(default)]
	pub color: Option<String>,
}

impl StrategyConfig {
	pub fn resolve_paths(&mut self, base: &Path) {
		if let Some(dest_dir) = &self.dest_dir {
			self.dest_dir = Some(base.join(dest_dir));
		}
	}

	pub fn validate(&self) -> Result<()> {
		match (self.kind, &self.dest_dir) {
			(StrategyKind::Files, None) => bail!("strategy {:?} of kind files needs a dest_dir", self.name),
			(StrategyKind::Memory, Some(_)) => {
				bail!("strategy {:?} of kind memory does not write a dest_dir", self.name)
			}
			_ => {}
		}
		if let Some(color) = &self.color {
			parse_color(color)?;
		}
		Ok(())
	}

	pub fn color(&self) -> Result<Option<[u8; 3]>> {
		self.color.as_deref().map(parse_color).transpose()
	}

	/// Builds the tiler this entry describes.
	pub fn build(&self) -> Result<Box<dyn TilingStrategy>> {
		self.validate()?;
		let tiler: Box<dyn TilingStrategy> = match (self.kind, &self.dest_dir) {
			(StrategyKind::Files, Some(dest_dir)) => Box::new(FileTiler::new(dest_dir)),
			(StrategyKind::Memory, _) => Box::new(MemoryTiler),
			(StrategyKind::Files, None) => bail!("strategy {:?} of kind files needs a dest_dir", self.name),
		};
		Ok(tiler)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	fn parse(yaml: &str) -> StrategyConfig {
		serde_yaml_ng::from_str(yaml).unwrap()
	}

	#[test]
	fn parse_files() {
		let cfg = parse("name: solaris\nkind: files\ndest_dir: out/solaris\ncolor: m");
		assert_eq!(
			cfg,
			StrategyConfig {
				name: "solaris".to_string(),
				kind: StrategyKind::Files,
				dest_dir: Some(PathBuf::from("out/solaris")),
				color: Some("m".to_string()),
			}
		);
		assert_eq!(cfg.color().unwrap(), Some([191, 0, 191]));
		assert_eq!(cfg.build().unwrap().kind(), "files");
	}

	#[test]
	fn parse_memory() {
		let cfg = parse("name: light_pipe\nkind: memory");
		assert_eq!(cfg.color().unwrap(), None);
		assert_eq!(cfg.build().unwrap().kind(), "memory");
	}

	#[test]
	fn resolves_dest_dir() {
		let mut cfg = parse("name: a\nkind: files\ndest_dir: out");
		cfg.resolve_paths(Path::new("/data"));
		assert_eq!(cfg.dest_dir, Some(PathBuf::from("/data/out")));

		let mut cfg = parse("name: a\nkind: files\ndest_dir: /abs/out");
		cfg.resolve_paths(Path::new("/data"));
		assert_eq!(cfg.dest_dir, Some(PathBuf::from("/abs/out")));
	}

	#[test]
	fn invalid_entries() {
		assert!(parse("name: a\nkind: files").validate().is_err());
		assert!(parse("name: a\nkind: memory\ndest_dir: x").validate().is_err());
		assert!(parse("name: a\nkind: memory\ncolor: purple").validate().is_err());
		assert!(serde_yaml_ng::from_str::<StrategyConfig>("name: a\nkind: gdal").is_err());
		assert!(serde_yaml_ng::from_str::<StrategyConfig>("name: a\nkind: memory\nspeed: 3").is_err());
	}
}
