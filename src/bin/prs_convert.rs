//! Bidirectional BMP/PRS converter.
//!
//! The conversion direction is the first argument; directory inputs
//! process every matching file directly inside them. BMP images with an
//! alpha channel are compressed with the delta predictor enabled, the
//! same choice the original assets were built with.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::info;
use marble_rs::bmp;

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
	/// Compress BMP images into PRS files
	#[value(name = "bmp2prs")]
	Bmp2Prs,
	/// Decode PRS files into BMP images
	#[value(name = "prs2bmp")]
	Prs2Bmp,
}

#[derive(Parser)]
#[command(name = "prs_convert")]
#[command(version)]
#[command(about = "Convert between BMP and PRS formats", long_about = None)]
struct Cli {
	/// Conversion direction
	#[arg(value_name = "DIRECTION")]
	direction: Direction,

	/// Input file or directory
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Output file or directory
	#[arg(value_name = "OUTPUT")]
	output: PathBuf,
}

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	if cli.input.is_dir() {
		let converted = match cli.direction {
			Direction::Bmp2Prs => bmp::process_bmp_directory(&cli.input, &cli.output)?,
			Direction::Prs2Bmp => bmp::process_prs_directory(&cli.input, &cli.output)?,
		};
		info!("Converted {converted} files");
	} else {
		match cli.direction {
			Direction::Bmp2Prs => bmp::bmp_to_prs(&cli.input, &cli.output)?,
			Direction::Prs2Bmp => bmp::prs_to_bmp(&cli.input, &cli.output)?,
		}
		info!("Converted: {} -> {}", cli.input.display(), cli.output.display());
	}

	Ok(())
}
