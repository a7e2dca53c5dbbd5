//! Generic indexed `.mbl` archive support (`mg_data*.mbl`).
//!
//! ## Layout
//!
//! | Offset            | Size               | Field                        |
//! |-------------------|--------------------|------------------------------|
//! | 0x00              | 4                  | `count`                      |
//! | 0x04              | `count * entry_size` | index records              |
//! | after index       | 4                  | zero terminator              |
//! | after terminator  | rest               | XOR-encrypted payloads       |
//!
//! Each index record carries a NUL-terminated cp932 name plus absolute
//! offset and size fields at positions that differ between engine
//! revisions. Two record layouts are known; the reader tries each in turn
//! and keeps the first one whose names all decode. The remaining record
//! bytes have no known meaning and are preserved through the
//! [`Sidecar`](super::sidecar::Sidecar) so a repack can reproduce them.

use std::path::Path;

use encoding_rs::SHIFT_JIS;

use super::super::{error::MblError, keys, xor};
use super::sidecar::{Sidecar, SidecarParams};

mod constants {
	/// Widest name slot ever observed; names are read up to this many
	/// bytes and truncated at the first NUL.
	pub const NAME_READ_LIMIT: usize = 0x20;
}

/// Index record layout parameters for one engine revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
	/// Size of one index record in bytes
	pub entry_size: usize,
	/// Offset of the name slot inside a record
	pub name_offset: usize,
	/// Offset of the data-offset field inside a record
	pub file_offset: usize,
	/// Offset of the data-size field inside a record
	pub size_offset: usize,
	/// XOR key bytes (cp932-encoded)
	pub key: Vec<u8>,
}

impl Params {
	/// Returns the known record layouts, tried in order when reading.
	pub fn presets() -> Vec<Params> {
		let key = keys::to_bytes(keys::MG_DATA).unwrap_or_default();
		vec![
			Params {
				entry_size: 0x40,
				name_offset: 0x00,
				file_offset: 0x38,
				size_offset: 0x3C,
				key: key.clone(),
			},
			Params {
				entry_size: 0x18,
				name_offset: 0x00,
				file_offset: 0x10,
				size_offset: 0x14,
				key,
			},
		]
	}

	/// Builds layout parameters from a sidecar, re-encoding the key to
	/// cp932.
	pub fn from_sidecar(params: &SidecarParams) -> Result<Params, MblError> {
		let key = keys::to_bytes(&params.key).ok_or(MblError::KeyEncode)?;
		let built = Params {
			entry_size: params.entry_size,
			name_offset: params.name_offset,
			file_offset: params.file_offset,
			size_offset: params.size_offset,
			key,
		};
		built.validate()?;
		Ok(built)
	}

	/// Converts to the sidecar representation with a cp932-decoded key.
	pub fn to_sidecar(&self) -> SidecarParams {
		let (key, _, _) = SHIFT_JIS.decode(&self.key);
		SidecarParams {
			entry_size: self.entry_size,
			name_offset: self.name_offset,
			file_offset: self.file_offset,
			size_offset: self.size_offset,
			key: key.into_owned(),
		}
	}

	/// Checks that every field lies inside the record.
	pub fn validate(&self) -> Result<(), MblError> {
		let fits = self.name_offset < self.entry_size
			&& self.file_offset + 4 <= self.entry_size
			&& self.size_offset + 4 <= self.entry_size;
		if !fits {
			return Err(MblError::InvalidParameters {
				entry_size: self.entry_size,
			});
		}
		Ok(())
	}
}

fn read_u32(record: &[u8], offset: usize) -> u32 {
	u32::from_le_bytes([record[offset], record[offset + 1], record[offset + 2], record[offset + 3]])
}

/// One parsed index entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
	name: String,
	offset: u32,
	size: u32,
	raw: Vec<u8>,
}

impl Entry {
	/// Returns the cp932-decoded file name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns the absolute payload offset
	pub fn offset(&self) -> u32 {
		self.offset
	}

	/// Returns the payload size in bytes
	pub fn size(&self) -> u32 {
		self.size
	}

	/// Returns the raw index record, preserved for repacking
	pub fn raw_record(&self) -> &[u8] {
		&self.raw
	}
}

impl std::fmt::Display for Entry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Entry {{ name: '{}', offset: {}, size: {} }}", self.name, self.offset, self.size)
	}
}

/// A generic data archive held in memory.
#[derive(Debug)]
pub struct Archive {
	params: Params,
	entries: Vec<Entry>,
	data: Vec<u8>,
}

impl Archive {
	/// Opens an archive file and decodes its index.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, MblError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(data)
	}

	/// Decodes an archive using the built-in layout presets.
	pub fn from_bytes(data: Vec<u8>) -> Result<Self, MblError> {
		Self::from_bytes_with_presets(data, Params::presets())
	}

	/// Decodes an archive trying the given layouts in order.
	///
	/// A layout is rejected when the index does not fit in the file or an
	/// entry name fails cp932 decoding; the first surviving layout wins.
	pub fn from_bytes_with_presets(data: Vec<u8>, presets: Vec<Params>) -> Result<Self, MblError> {
		if data.len() < 4 {
			return Err(MblError::InsufficientData {
				expected: 4,
				actual: data.len(),
			});
		}
		let count = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;

		for params in presets {
			match Self::read_index(&data, count, &params) {
				Ok(entries) => {
					log::debug!("index decoded with entry size 0x{:02X}", params.entry_size);
					return Ok(Self {
						params,
						entries,
						data,
					});
				}
				Err(err) => {
					log::debug!(
						"entry size 0x{:02X} rejected: {}; trying next layout",
						params.entry_size,
						err
					);
				}
			}
		}

		Err(MblError::UnrecognizedArchive)
	}

	fn read_index(data: &[u8], count: usize, params: &Params) -> Result<Vec<Entry>, MblError> {
		params.validate()?;

		let index_end = 4 + count * params.entry_size;
		if data.len() < index_end {
			return Err(MblError::InsufficientData {
				expected: index_end,
				actual: data.len(),
			});
		}

		let mut entries = Vec::with_capacity(count);
		for index in 0..count {
			let base = 4 + index * params.entry_size;
			let record = &data[base..base + params.entry_size];

			let name_start = base + params.name_offset;
			let name_end = (name_start + constants::NAME_READ_LIMIT).min(data.len());
			let name_window = &data[name_start..name_end];
			let name_bytes = match name_window.iter().position(|&b| b == 0) {
				Some(nul) => &name_window[..nul],
				None => name_window,
			};

			let (name, _, had_errors) = SHIFT_JIS.decode(name_bytes);
			if had_errors {
				return Err(MblError::NameDecode {
					index,
				});
			}

			let offset = read_u32(record, params.file_offset);
			let size = read_u32(record, params.size_offset);

			entries.push(Entry {
				name: name.into_owned(),
				offset,
				size,
				raw: record.to_vec(),
			});
		}

		Ok(entries)
	}

	/// Returns the layout the index was decoded with
	pub fn params(&self) -> &Params {
		&self.params
	}

	/// Returns the parsed index entries in archive order
	pub fn entries(&self) -> &[Entry] {
		&self.entries
	}

	/// Reads and decrypts one entry's payload.
	pub fn read_entry(&self, entry: &Entry) -> Result<Vec<u8>, MblError> {
		let start = entry.offset as usize;
		let end = start + entry.size as usize;
		if end > self.data.len() {
			return Err(MblError::EntryOutOfBounds {
				name: entry.name.clone(),
				offset: entry.offset,
				size: entry.size,
			});
		}

		let mut payload = self.data[start..end].to_vec();
		xor::apply(&mut payload, &self.params.key)?;
		Ok(payload)
	}

	/// Builds the preservation sidecar for this archive.
	pub fn sidecar(&self) -> Sidecar {
		let mut sidecar = Sidecar::new(self.params.to_sidecar());
		for entry in &self.entries {
			sidecar.insert(&entry.name, &entry.raw);
		}
		sidecar
	}
}

/// Repacks a directory of files into an archive.
///
/// Entries follow the sidecar's order, skipping names whose file is
/// missing from `input_dir`. Each record starts from the cp932 name; in
/// normal mode the sidecar's preserved bytes then overwrite the whole
/// record (restoring the unknown fields, name included) before the offset
/// and size fields are patched in. Patch mode keeps the freshly written
/// name and leaves the unknown fields zeroed.
pub fn pack(input_dir: &Path, sidecar: &Sidecar, patch: bool) -> Result<Vec<u8>, MblError> {
	let params = Params::from_sidecar(&sidecar.parameters)?;

	let mut present: Vec<(String, Vec<u8>)> = Vec::new();
	for name in sidecar.names() {
		let path = input_dir.join(name);
		if path.is_file() {
			present.push((name.to_string(), std::fs::read(&path)?));
		}
	}

	let header_size = 4 + present.len() * params.entry_size;
	let mut archive = Vec::with_capacity(header_size + 4);
	archive.extend_from_slice(&(present.len() as u32).to_le_bytes());

	let mut current_offset = (header_size + 4) as u32;
	for (name, payload) in &present {
		let mut record = vec![0u8; params.entry_size];

		let (encoded, _, had_errors) = SHIFT_JIS.encode(name);
		if had_errors {
			return Err(MblError::NameEncode {
				name: name.clone(),
			});
		}
		let slot = &mut record[params.name_offset..];
		let name_len = encoded.len().min(slot.len());
		slot[..name_len].copy_from_slice(&encoded[..name_len]);

		if !patch {
			let raw = sidecar.raw_record(name)?;
			let raw_len = raw.len().min(params.entry_size);
			record[..raw_len].copy_from_slice(&raw[..raw_len]);
		}

		record[params.file_offset..params.file_offset + 4]
			.copy_from_slice(&current_offset.to_le_bytes());
		record[params.size_offset..params.size_offset + 4]
			.copy_from_slice(&(payload.len() as u32).to_le_bytes());

		archive.extend_from_slice(&record);
		current_offset += payload.len() as u32;
	}

	archive.extend_from_slice(&[0u8; 4]);

	for (_, payload) in &present {
		let mut encrypted = payload.clone();
		xor::apply(&mut encrypted, &params.key)?;
		archive.extend_from_slice(&encrypted);
	}

	Ok(archive)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn test_presets() -> Vec<Params> {
		Params::presets()
			.into_iter()
			.map(|mut params| {
				params.key = b"k".to_vec();
				params
			})
			.collect()
	}

	/// Builds a two-entry archive in the 0x18 layout with opaque filler
	/// bytes in the unknown record region.
	fn build_small_archive(payload_a: &[u8], payload_b: &[u8]) -> Vec<u8> {
		let entry_size = 0x18;
		let header_size = 4 + 2 * entry_size;
		let data_start = header_size + 4;

		let mut archive = Vec::new();
		archive.extend_from_slice(&2u32.to_le_bytes());

		for (index, (name, payload)) in
			[("a.bin", payload_a), ("b.bin", payload_b)].iter().enumerate()
		{
			let mut record = vec![0u8; entry_size];
			record[..name.len()].copy_from_slice(name.as_bytes());
			// Unknown fields between the name slot and the offset field.
			record[0x08..0x10].fill(0xEE);

			let offset = if index == 0 {
				data_start
			} else {
				data_start + payload_a.len()
			};
			record[0x10..0x14].copy_from_slice(&(offset as u32).to_le_bytes());
			record[0x14..0x18].copy_from_slice(&(payload.len() as u32).to_le_bytes());
			archive.extend_from_slice(&record);
		}

		archive.extend_from_slice(&[0u8; 4]);
		for payload in [payload_a, payload_b] {
			let mut encrypted = payload.to_vec();
			xor::apply(&mut encrypted, b"k").unwrap();
			archive.extend_from_slice(&encrypted);
		}
		archive
	}

	#[test]
	fn test_fallback_to_smaller_layout() {
		// 4 + 2 * 0x40 bytes do not exist, so the 0x40 layout is rejected
		// before the 0x18 layout parses cleanly.
		let archive_bytes = build_small_archive(b"\xDE\xAD\xBE\xEF", b"hello");
		let archive =
			Archive::from_bytes_with_presets(archive_bytes, test_presets()).unwrap();

		assert_eq!(archive.params().entry_size, 0x18);
		assert_eq!(archive.entries().len(), 2);
		assert_eq!(archive.entries()[0].name(), "a.bin");
		assert_eq!(archive.entries()[1].name(), "b.bin");
	}

	#[test]
	fn test_payload_decryption() {
		let archive_bytes = build_small_archive(b"\xDE\xAD\xBE\xEF", b"hello");

		// The stored payload region must differ from the plaintext by the
		// XOR mask.
		let data_start = 4 + 2 * 0x18 + 4;
		assert_eq!(archive_bytes[data_start], 0xDE ^ 0x6B);

		let archive =
			Archive::from_bytes_with_presets(archive_bytes, test_presets()).unwrap();
		let payload = archive.read_entry(&archive.entries()[0]).unwrap();
		assert_eq!(payload, b"\xDE\xAD\xBE\xEF");
		let payload = archive.read_entry(&archive.entries()[1]).unwrap();
		assert_eq!(payload, b"hello");
	}

	#[test]
	fn test_fallback_on_invalid_name_bytes() {
		// Two 64-byte payloads make the file large enough for the 0x40
		// layout, whose second record then starts inside the encrypted
		// payload region. The plaintext is chosen so those bytes are 0xA0,
		// which is not a valid cp932 lead byte, forcing the name-decode
		// fallback instead of the size fallback.
		let archive_bytes = build_small_archive(&[0xCB; 64], &[0xCB; 64]);
		assert!(archive_bytes.len() >= 4 + 2 * 0x40);
		assert_eq!(archive_bytes[4 + 0x40], 0xA0);

		let archive =
			Archive::from_bytes_with_presets(archive_bytes, test_presets()).unwrap();
		assert_eq!(archive.params().entry_size, 0x18);
		assert_eq!(archive.entries()[0].name(), "a.bin");
	}

	#[test]
	fn test_unrecognized_archive() {
		// Claims one entry but carries no index bytes at all.
		let bytes = 1u32.to_le_bytes().to_vec();
		assert!(matches!(
			Archive::from_bytes_with_presets(bytes, test_presets()),
			Err(MblError::UnrecognizedArchive)
		));
	}

	#[test]
	fn test_entry_out_of_bounds() {
		let mut archive_bytes = build_small_archive(b"\xDE\xAD\xBE\xEF", b"hello");
		// Corrupt the first entry's size field.
		let size_pos = 4 + 0x14;
		archive_bytes[size_pos..size_pos + 4].copy_from_slice(&0xFFFF_u32.to_le_bytes());

		let archive =
			Archive::from_bytes_with_presets(archive_bytes, test_presets()).unwrap();
		assert!(matches!(
			archive.read_entry(&archive.entries()[0]),
			Err(MblError::EntryOutOfBounds { .. })
		));
	}

	#[test]
	fn test_repack_reproduces_archive_bytes() {
		let original = build_small_archive(b"\xDE\xAD\xBE\xEF", b"hello");
		let archive =
			Archive::from_bytes_with_presets(original.clone(), test_presets()).unwrap();

		let dir = tempfile::tempdir().unwrap();
		for entry in archive.entries() {
			let payload = archive.read_entry(entry).unwrap();
			std::fs::write(dir.path().join(entry.name()), payload).unwrap();
		}

		let repacked = pack(dir.path(), &archive.sidecar(), false).unwrap();
		assert_eq!(repacked, original);
	}

	#[test]
	fn test_patch_mode_drops_opaque_bytes() {
		let original = build_small_archive(b"\xDE\xAD\xBE\xEF", b"hi");
		let archive =
			Archive::from_bytes_with_presets(original, test_presets()).unwrap();

		let dir = tempfile::tempdir().unwrap();
		for entry in archive.entries() {
			let payload = archive.read_entry(entry).unwrap();
			std::fs::write(dir.path().join(entry.name()), payload).unwrap();
		}

		let repacked = pack(dir.path(), &archive.sidecar(), true).unwrap();
		// The unknown 0xEE region is zeroed, but names and payloads hold.
		assert_eq!(&repacked[4 + 0x08..4 + 0x10], &[0u8; 8]);
		let reparsed =
			Archive::from_bytes_with_presets(repacked, test_presets()).unwrap();
		assert_eq!(reparsed.entries()[0].name(), "a.bin");
		assert_eq!(reparsed.read_entry(&reparsed.entries()[0]).unwrap(), b"\xDE\xAD\xBE\xEF");
	}

	#[test]
	fn test_repack_skips_missing_files() {
		let original = build_small_archive(b"\xDE\xAD\xBE\xEF", b"hello");
		let archive =
			Archive::from_bytes_with_presets(original, test_presets()).unwrap();

		let dir = tempfile::tempdir().unwrap();
		// Only write the second entry's file.
		let entry = &archive.entries()[1];
		std::fs::write(dir.path().join(entry.name()), archive.read_entry(entry).unwrap())
			.unwrap();

		let repacked = pack(dir.path(), &archive.sidecar(), false).unwrap();
		let reparsed =
			Archive::from_bytes_with_presets(repacked, test_presets()).unwrap();
		assert_eq!(reparsed.entries().len(), 1);
		assert_eq!(reparsed.entries()[0].name(), "b.bin");
	}
}
