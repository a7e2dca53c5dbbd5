//! Packs a directory of PRS images into an image bundle archive.
//!
//! Intended for building patch bundles next to the original `mg_gra.mbl`;
//! payloads are stored exactly as given, so pre-wrapped zlib streams stay
//! untouched.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use log::info;
use marble_rs::marble_types::file::mbl::gra;

#[derive(Parser)]
#[command(name = "pk_mg_gra")]
#[command(version)]
#[command(about = "Pack a MarbleEngine image bundle archive", long_about = None)]
struct Cli {
	/// Directory holding the files to pack
	#[arg(value_name = "INPUT_DIR")]
	input_dir: PathBuf,

	/// Output archive (.mbl)
	#[arg(value_name = "OUTPUT_MBL")]
	output: PathBuf,

	/// Name slot length of the index records
	#[arg(long, default_value_t = gra::DEFAULT_NAME_LEN)]
	name_len: usize,
}

fn main() -> anyhow::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
	let cli = Cli::parse();

	let mut files: Vec<PathBuf> = fs::read_dir(&cli.input_dir)
		.with_context(|| format!("cannot read directory {}", cli.input_dir.display()))?
		.filter_map(|entry| entry.ok().map(|e| e.path()))
		.filter(|path| path.is_file())
		.collect();
	files.sort();

	if files.is_empty() {
		bail!("No files found in directory: {}", cli.input_dir.display());
	}

	let packed = gra::pack(&files, cli.name_len)
		.with_context(|| format!("{}: packing failed", cli.input_dir.display()))?;
	fs::write(&cli.output, packed)?;
	info!("Packed {} files into {}", files.len(), cli.output.display());

	Ok(())
}
