//! Image bundle `.mbl` archive support (`mg_gra.mbl`).
//!
//! ## Layout
//!
//! | Offset      | Size                     | Field                     |
//! |-------------|--------------------------|---------------------------|
//! | 0x00        | 4                        | `count`                   |
//! | 0x04        | 4                        | `name_len`                |
//! | 0x08        | `count * (name_len + 8)` | index entries             |
//! | after index | rest                     | payloads                  |
//!
//! Each index entry is a NUL-padded name slot followed by the absolute
//! payload offset and size. Payloads are PRS images stored either plain or
//! behind a zlib wrapper (recognized by a leading 0x78 byte). Unlike the
//! data archives nothing is XOR-encrypted here.
//!
//! The format has no magic number, so the reader accepts a file only after
//! a battery of sanity checks on the header fields, the archive file name
//! and every entry's placement.

use std::{
	io::Read,
	path::{Path, PathBuf},
};

use super::super::error::MblError;

mod constants {
	/// Expected base file name of the bundle
	pub const ARCHIVE_TAG: &str = "mg_gra";

	/// Name slot length used by the known archives (and their patches)
	pub const DEFAULT_NAME_LEN: usize = 13;

	/// Accepted name slot length range
	pub const NAME_LEN_RANGE: std::ops::RangeInclusive<usize> = 8..=0x40;

	/// Upper bound on plausible entry counts
	pub const MAX_COUNT: usize = 10_000;

	/// First byte of a zlib stream with the deflate method
	pub const ZLIB_MAGIC: u8 = 0x78;

	/// Extension appended to extracted payloads
	pub const PRS_EXT: &str = ".prs";

	/// Name slot filler placed between the base name and the NUL padding
	pub const NAME_SLOT_FILL: &[u8; 4] = b"\x00PRS";
}

/// Name slot length used when packing, matching the shipped archives.
pub const DEFAULT_NAME_LEN: usize = constants::DEFAULT_NAME_LEN;

/// One parsed index entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	name: String,
	offset: u32,
	size: u32,
}

impl Entry {
	/// Returns the lowercased file name with the `.prs` extension
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the absolute payload offset
	pub fn offset(&self) -> u32 {
		self.offset
	}

	/// Returns the stored payload size in bytes
	pub fn size(&self) -> u32 {
		self.size
	}
}

impl std::fmt::Display for Entry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Entry {{ name: '{}', offset: {}, size: {} }}", self.name, self.offset, self.size)
	}
}

/// An image bundle archive held in memory.
#[derive(Debug)]
pub struct Archive {
	entries: Vec<Entry>,
	data: Vec<u8>,
}

impl Archive {
	/// Opens a bundle file, using its base name for the tag check.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, MblError> {
		let path = path.as_ref();
		let arc_name = path
			.file_stem()
			.map(|stem| stem.to_string_lossy().to_lowercase())
			.unwrap_or_default();
		let data = std::fs::read(path)?;
		Self::from_bytes(data, &arc_name)
	}

	/// Decodes a bundle from bytes.
	///
	/// `arc_name` is the lowercased base file name; the known engine only
	/// ever ships this layout as `mg_gra.mbl`, so anything else is
	/// rejected along with implausible header fields or entries pointing
	/// outside the file.
	pub fn from_bytes(data: Vec<u8>, arc_name: &str) -> Result<Self, MblError> {
		if data.len() < 8 {
			return Err(MblError::InsufficientData {
				expected: 8,
				actual: data.len(),
			});
		}

		let count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
		let name_len = u32::from_le_bytes([data[4], data[5], data[6], data[7]]) as usize;

		if !constants::NAME_LEN_RANGE.contains(&name_len) {
			return Err(MblError::UnrecognizedArchive);
		}
		if count == 0 || count >= constants::MAX_COUNT {
			return Err(MblError::UnrecognizedArchive);
		}
		if arc_name != constants::ARCHIVE_TAG {
			return Err(MblError::UnrecognizedArchive);
		}

		let entry_size = name_len + 8;
		let index_end = 8 + count * entry_size;
		if data.len() < index_end {
			return Err(MblError::InsufficientData {
				expected: index_end,
				actual: data.len(),
			});
		}

		let mut entries = Vec::with_capacity(count);
		for index in 0..count {
			let base = 8 + index * entry_size;
			let slot = &data[base..base + name_len];
			let name_bytes = match slot.iter().position(|&b| b == 0) {
				Some(nul) => &slot[..nul],
				None => slot,
			};
			let name = String::from_utf8_lossy(name_bytes).to_lowercase();

			let offset = u32::from_le_bytes([
				data[base + name_len],
				data[base + name_len + 1],
				data[base + name_len + 2],
				data[base + name_len + 3],
			]);
			let size = u32::from_le_bytes([
				data[base + name_len + 4],
				data[base + name_len + 5],
				data[base + name_len + 6],
				data[base + name_len + 7],
			]);

			if offset as usize + size as usize > data.len() {
				return Err(MblError::UnrecognizedArchive);
			}

			entries.push(Entry {
				name: name + constants::PRS_EXT,
				offset,
				size,
			});
		}

		if entries.is_empty() || (entries.len() == 1 && count > 1) {
			return Err(MblError::UnrecognizedArchive);
		}

		Ok(Self {
			entries,
			data,
		})
	}

	/// Returns the parsed index entries in archive order
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Reads one entry's payload, inflating it when zlib-wrapped.
	pub fn read_entry(&self, entry: &Entry) -> Result<Vec<u8>, MblError> {
		let start = entry.offset as usize;
		let end = start + entry.size as usize;
		let stored = &self.data[start..end];

		if stored.first() == Some(&constants::ZLIB_MAGIC) {
			let mut inflated = Vec::new();
			flate2::read::ZlibDecoder::new(stored).read_to_end(&mut inflated)?;
			return Ok(inflated);
		}

		Ok(stored.to_vec())
	}
}

/// Writes one fixed-length name slot.
///
/// The original packer fills the gap after the base name with the literal
/// bytes `\x00PRS` before NUL padding; readers stop at the first NUL, so
/// the filler only matters for byte-compatibility with shipped archives.
fn write_name_slot(out: &mut Vec<u8>, name: &str, name_len: usize) {
	let bytes = name.as_bytes();
	out.extend_from_slice(bytes);

	if name_len >= 9 {
		let fill = (name_len - bytes.len()).min(constants::NAME_SLOT_FILL.len());
		out.extend_from_slice(&constants::NAME_SLOT_FILL[..fill]);
	} else {
		out.extend_from_slice(constants::NAME_SLOT_FILL);
	}

	let written = bytes.len() + 4;
	if name_len > written {
		out.extend(std::iter::repeat_n(0u8, name_len - written));
	}
}

/// Packs files into a bundle archive.
///
/// Base names are uppercased and truncated to `name_len`; extensions are
/// dropped since the reader re-derives them. Payloads already carrying a
/// zlib header are stored as-is, and nothing is ever re-compressed: the
/// shipped archives mix plain and wrapped payloads freely.
pub fn pack(files: &[PathBuf], name_len: usize) -> Result<Vec<u8>, MblError> {
	let entry_size = name_len + 8;
	let data_start = 8 + files.len() * entry_size;

	let mut index = Vec::with_capacity(data_start - 8);
	let mut payloads = Vec::new();

	for path in files {
		let mut name = path
			.file_stem()
			.map(|stem| stem.to_string_lossy().to_uppercase())
			.unwrap_or_default();
		// Trim whole characters until the name fits its slot.
		while name.len() > name_len {
			name.pop();
		}

		let payload = std::fs::read(path)?;
		let offset = (data_start + payloads.len()) as u32;

		write_name_slot(&mut index, &name, name_len);
		index.extend_from_slice(&offset.to_le_bytes());
		index.extend_from_slice(&(payload.len() as u32).to_le_bytes());
		payloads.extend_from_slice(&payload);
	}

	let mut archive = Vec::with_capacity(data_start + payloads.len());
	archive.extend_from_slice(&(files.len() as u32).to_le_bytes());
	archive.extend_from_slice(&(name_len as u32).to_le_bytes());
	archive.append(&mut index);
	archive.append(&mut payloads);
	Ok(archive)
}
