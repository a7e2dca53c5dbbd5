//! Unpacks the MarbleEngine image bundle (`mg_gra.mbl`).
//!
//! Entry names are lowercased and given the `.prs` extension;
//! zlib-wrapped payloads are inflated on the way out.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use marble_rs::prelude::*;

#[derive(Parser)]
#[command(name = "ex_mg_gra")]
#[command(version)]
#[command(about = "Unpack the MarbleEngine image bundle archive", long_about = None)]
struct Cli {
	/// Input archive (.mbl)
	#[arg(value_name = "INPUT_MBL")]
	input: PathBuf,

	/// Directory to extract entries into
	#[arg(value_name = "OUTPUT_DIR")]
	output_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	fs::create_dir_all(&cli.output_dir)?;

	let archive = MgGraArchive::open(&cli.input)
		.with_context(|| format!("{}: cannot decode archive", cli.input.display()))?;

	for entry in archive.entries() {
		let payload = archive
			.read_entry(entry)
			.with_context(|| format!("{}: entry '{}'", cli.input.display(), entry.name()))?;
		let path = cli.output_dir.join(entry.name());
		fs::write(&path, payload)?;
		info!("Extracted: {}", path.display());
	}

	Ok(())
}
