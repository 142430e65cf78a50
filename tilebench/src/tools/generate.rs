use anyhow::Result;
use std::path::PathBuf;
use tilebench_image::synthetic::save_source_image;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// output file, the format follows the extension: *.tif, *.tiff or *.png
	#[arg()]
	output_file: PathBuf,

	/// width in pixels
	#[arg(long, value_name = "int", default_value_t = 4096, display_order = 1)]
	width: u32,

	/// height in pixels
	#[arg(long, value_name = "int", default_value_t = 4096, display_order = 1)]
	height: u32,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	eprintln!(
		"generating {}x{} raster {:?}",
		arguments.width, arguments.height, arguments.output_file
	);
	save_source_image(&arguments.output_file, arguments.width, arguments.height)
}
