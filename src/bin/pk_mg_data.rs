//! Repacks a generic MarbleEngine data archive from an extracted
//! directory and its `entries.json` sidecar.
//!
//! Entries follow the sidecar order; names missing from the input
//! directory are skipped, which is how partial patch archives
//! (`mg_data2.mbl` and so on) are produced. Patch mode drops the
//! preserved raw index bytes and writes fresh records instead.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use marble_rs::marble_types::file::mbl::data;
use marble_rs::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PatchMode {
	/// Write fresh index records, ignoring the preserved bytes
	Yes,
	/// Restore the preserved index records verbatim
	No,
}

#[derive(Parser)]
#[command(name = "pk_mg_data")]
#[command(version)]
#[command(about = "Repack a generic MarbleEngine data archive", long_about = None)]
struct Cli {
	/// Directory holding the files to pack
	#[arg(value_name = "INPUT_DIR")]
	input_dir: PathBuf,

	/// Output archive (.mbl)
	#[arg(value_name = "OUTPUT_MBL")]
	output: PathBuf,

	/// entries.json written during extraction
	#[arg(value_name = "ENTRIES_JSON")]
	entries_json: PathBuf,

	/// Whether to build a patch archive
	#[arg(value_name = "PATCH")]
	patch: PatchMode,
}

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	let sidecar = Sidecar::open(&cli.entries_json)
		.with_context(|| format!("{}: cannot load sidecar", cli.entries_json.display()))?;

	let packed = data::pack(&cli.input_dir, &sidecar, cli.patch == PatchMode::Yes)
		.with_context(|| format!("{}: packing failed", cli.input_dir.display()))?;
	fs::write(&cli.output, packed)?;

	let count = sidecar.names().filter(|name| cli.input_dir.join(name).is_file()).count();
	info!("Packed {} files into {}", count, cli.output.display());

	Ok(())
}
