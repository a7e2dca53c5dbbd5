//! Unpacks a generic MarbleEngine data archive (`mg_data*.mbl`).
//!
//! Every entry is XOR-decrypted and written into the output directory,
//! together with an `entries.json` sidecar preserving the raw index
//! records for a later byte-exact repack.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use marble_rs::prelude::*;

#[derive(Parser)]
#[command(name = "ex_mg_data")]
#[command(version)]
#[command(about = "Unpack a generic MarbleEngine data archive", long_about = None)]
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

	let archive = MgDataArchive::open(&cli.input)
		.with_context(|| format!("{}: cannot decode archive", cli.input.display()))?;
	info!("decoded index with entry size 0x{:02X}", archive.params().entry_size);

	for entry in archive.entries() {
		debug!("{entry}");
		let payload = archive
			.read_entry(entry)
			.with_context(|| format!("{}: entry '{}'", cli.input.display(), entry.name()))?;
		let path = cli.output_dir.join(entry.name());
		fs::write(&path, payload)?;
		info!("Data saved to: {}", path.display());
	}

	let sidecar_path = cli.output_dir.join("entries.json");
	archive.sidecar().save(&sidecar_path)?;
	info!("JSON data saved to: {}", sidecar_path.display());

	Ok(())
}
