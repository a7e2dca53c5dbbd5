//! BMP conversion glue between PRS pixel buffers and the `image` crate.
//!
//! PRS stores pixels in BGR(A) channel order, so every conversion swaps
//! channels on the way in and out. Images with an alpha channel are
//! compressed with the delta predictor enabled, matching how the original
//! assets were produced; images whose decoded alpha plane is a constant
//! placeholder are downgraded to plain RGB on save.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use image::{ImageFormat, RgbImage, RgbaImage};
use log::{error, info};
use marble_types::file::{FLAG_DELTA_FILTER, PrsFile, prs};

/// Converts a BMP file into a PRS file.
pub fn bmp_to_prs(input: &Path, output: &Path) -> Result<()> {
	let img = image::open(input).with_context(|| format!("cannot read {}", input.display()))?;
	let (width, height) = (img.width(), img.height());
	if width > u16::MAX as u32 || height > u16::MAX as u32 {
		bail!("{}: image dimensions {}x{} exceed the format limit", input.display(), width, height);
	}

	let packed = if img.color().has_alpha() {
		let rgba = img.to_rgba8();
		let mut pixels = Vec::with_capacity(rgba.as_raw().len());
		for px in rgba.as_raw().chunks_exact(4) {
			pixels.extend_from_slice(&[px[2], px[1], px[0], px[3]]);
		}
		prs::encode::compress(&pixels, width as u16, height as u16, 4, FLAG_DELTA_FILTER)?
	} else {
		let rgb = img.to_rgb8();
		let mut pixels = Vec::with_capacity(rgb.as_raw().len());
		for px in rgb.as_raw().chunks_exact(3) {
			pixels.extend_from_slice(&[px[2], px[1], px[0]]);
		}
		prs::encode::compress(&pixels, width as u16, height as u16, 3, 0)?
	};

	fs::write(output, packed).with_context(|| format!("cannot write {}", output.display()))?;
	Ok(())
}

/// Converts a PRS file into a BMP file.
pub fn prs_to_bmp(input: &Path, output: &Path) -> Result<()> {
	let file =
		PrsFile::open(input).with_context(|| format!("cannot decode {}", input.display()))?;
	let width = u32::from(file.header().width);
	let height = u32::from(file.header().height);
	let pixels = file.pixels();

	if file.header().depth == 4 {
		if file.is_dummy_alpha_channel() {
			let rgb: Vec<u8> =
				pixels.chunks_exact(4).flat_map(|px| [px[2], px[1], px[0]]).collect();
			let img = RgbImage::from_raw(width, height, rgb)
				.context("pixel buffer does not match the header dimensions")?;
			img.save_with_format(output, ImageFormat::Bmp)?;
		} else {
			let rgba: Vec<u8> =
				pixels.chunks_exact(4).flat_map(|px| [px[2], px[1], px[0], px[3]]).collect();
			let img = RgbaImage::from_raw(width, height, rgba)
				.context("pixel buffer does not match the header dimensions")?;
			img.save_with_format(output, ImageFormat::Bmp)?;
		}
	} else {
		let rgb: Vec<u8> = pixels.chunks_exact(3).flat_map(|px| [px[2], px[1], px[0]]).collect();
		let img = RgbImage::from_raw(width, height, rgb)
			.context("pixel buffer does not match the header dimensions")?;
		img.save_with_format(output, ImageFormat::Bmp)?;
	}

	Ok(())
}

/// Lists the files directly inside `dir` carrying `extension`, sorted by
/// name for deterministic processing order.
fn files_with_extension(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
	let mut files: Vec<PathBuf> = fs::read_dir(dir)
		.with_context(|| format!("cannot read directory {}", dir.display()))?
		.filter_map(|entry| entry.ok().map(|e| e.path()))
		.filter(|path| {
			path.is_file()
				&& path
					.extension()
					.is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
		})
		.collect();
	files.sort();
	Ok(files)
}

fn convert_directory(
	input_dir: &Path,
	output_dir: &Path,
	from_ext: &str,
	to_ext: &str,
	convert: fn(&Path, &Path) -> Result<()>,
) -> Result<usize> {
	fs::create_dir_all(output_dir)?;

	let mut converted = 0;
	for input in files_with_extension(input_dir, from_ext)? {
		let output = output_dir.join(input.with_extension(to_ext).file_name().unwrap_or_default());
		match convert(&input, &output) {
			Ok(()) => {
				info!("Converted: {} -> {}", input.display(), output.display());
				converted += 1;
			}
			Err(err) => error!("Failed to convert {}: {err:#}", input.display()),
		}
	}
	Ok(converted)
}

/// Converts every `*.bmp` directly inside `input_dir`, continuing past
/// individual failures. Returns the number of files converted.
pub fn process_bmp_directory(input_dir: &Path, output_dir: &Path) -> Result<usize> {
	convert_directory(input_dir, output_dir, "bmp", "prs", bmp_to_prs)
}

/// Converts every `*.prs` directly inside `input_dir`, continuing past
/// individual failures. Returns the number of files converted.
pub fn process_prs_directory(input_dir: &Path, output_dir: &Path) -> Result<usize> {
	convert_directory(input_dir, output_dir, "prs", "bmp", prs_to_bmp)
}
