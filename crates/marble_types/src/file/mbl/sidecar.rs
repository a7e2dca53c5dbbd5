//! Entry-preservation sidecar for generic `.mbl` archives.
//!
//! The index records of the data archives carry fields nobody has
//! identified yet. Unpacking writes every raw record to `entries.json`
//! next to the extracted files so a later repack can restore those bytes
//! verbatim. The JSON object keeps one `parameters` member describing the
//! index layout, then one member per entry mapping the file name to the
//! lowercase hex dump of its record, in archive order.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::error::MblError;

/// Index layout parameters stored in the sidecar.
///
/// Mirrors [`Params`](super::data::Params) but keeps the key as the cp932
/// string it decodes to, so the file stays human-readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidecarParams {
	/// Size of one index record in bytes
	pub entry_size: usize,
	/// Offset of the name slot inside a record
	pub name_offset: usize,
	/// Offset of the data-offset field inside a record
	pub file_offset: usize,
	/// Offset of the data-size field inside a record
	pub size_offset: usize,
	/// XOR key, cp932-decoded
	pub key: String,
}

/// The `entries.json` document produced by unpacking a data archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sidecar {
	/// Index layout the archive was decoded with
	pub parameters: SidecarParams,

	/// File name to hex-encoded raw record bytes, in archive order
	#[serde(flatten)]
	pub entries: serde_json::Map<String, serde_json::Value>,
}

impl Sidecar {
	/// Creates an empty sidecar for the given layout parameters.
	pub fn new(parameters: SidecarParams) -> Self {
		Self {
			parameters,
			entries: serde_json::Map::new(),
		}
	}

	/// Records the raw index bytes for `name`.
	pub fn insert(&mut self, name: &str, raw_record: &[u8]) {
		self.entries
			.insert(name.to_string(), serde_json::Value::String(hex::encode(raw_record)));
	}

	/// Returns the preserved raw record bytes for `name`.
	pub fn raw_record(&self, name: &str) -> Result<Vec<u8>, MblError> {
		let hex_blob = self.entries.get(name).and_then(|value| value.as_str()).unwrap_or("");
		hex::decode(hex_blob).map_err(|source| MblError::BadHexBlob {
			name: name.to_string(),
			source,
		})
	}

	/// Iterates entry names in archive order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.entries.keys().map(String::as_str)
	}

	/// Loads a sidecar from a JSON file.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, MblError> {
		let text = std::fs::read_to_string(path)?;
		Ok(serde_json::from_str(&text)?)
	}

	/// Writes the sidecar as pretty-printed JSON.
	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), MblError> {
		let text = serde_json::to_string_pretty(self)?;
		std::fs::write(path, text)?;
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn params() -> SidecarParams {
		SidecarParams {
			entry_size: 0x18,
			name_offset: 0,
			file_offset: 0x10,
			size_offset: 0x14,
			key: "key".to_string(),
		}
	}

	#[test]
	fn test_insertion_order_survives_json() {
		let mut sidecar = Sidecar::new(params());
		sidecar.insert("zz.bin", &[0xFF, 0x00]);
		sidecar.insert("aa.bin", &[0x01, 0x02]);
		sidecar.insert("mm.bin", &[0xAB]);

		let json = serde_json::to_string_pretty(&sidecar).unwrap();
		let parsed: Sidecar = serde_json::from_str(&json).unwrap();

		let names: Vec<&str> = parsed.names().collect();
		assert_eq!(names, vec!["zz.bin", "aa.bin", "mm.bin"]);
		assert_eq!(parsed.raw_record("aa.bin").unwrap(), vec![0x01, 0x02]);
	}

	#[test]
	fn test_parameters_member_shape() {
		let sidecar = Sidecar::new(params());
		let value = serde_json::to_value(&sidecar).unwrap();
		assert_eq!(value["parameters"]["entry_size"], 0x18);
		assert_eq!(value["parameters"]["key"], "key");
	}

	#[test]
	fn test_hex_blobs_are_lowercase() {
		let mut sidecar = Sidecar::new(params());
		sidecar.insert("a", &[0xDE, 0xAD, 0xBE, 0xEF]);
		let value = serde_json::to_value(&sidecar).unwrap();
		assert_eq!(value["a"], "deadbeef");
	}

	#[test]
	fn test_bad_hex_is_reported() {
		let mut sidecar = Sidecar::new(params());
		sidecar.entries.insert("a".into(), serde_json::Value::String("xyz".into()));
		assert!(matches!(sidecar.raw_record("a"), Err(MblError::BadHexBlob { .. })));
	}
}
