//! Converts PRS images to BMP.
//!
//! A directory input converts every `*.prs` directly inside it, skipping
//! files that fail to decode instead of aborting the batch.

use std::path::PathBuf;

use clap::Parser;
use log::info;
use marble_rs::bmp;

#[derive(Parser)]
#[command(name = "prs2bmp")]
#[command(version)]
#[command(about = "Convert PRS images to BMP", long_about = None)]
struct Cli {
	/// Input PRS file or directory
	#[arg(value_name = "INPUT")]
	input: PathBuf,

	/// Output BMP file or directory
	#[arg(value_name = "OUTPUT")]
	output: PathBuf,
}

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	if cli.input.is_dir() {
		let converted = bmp::process_prs_directory(&cli.input, &cli.output)?;
		info!("Converted {converted} files");
	} else {
		bmp::prs_to_bmp(&cli.input, &cli.output)?;
		info!("Converted: {} -> {}", cli.input.display(), cli.output.display());
	}

	Ok(())
}
