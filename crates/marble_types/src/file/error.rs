//! Error types for file format parsing and manipulation.

use thiserror::Error;

/// Errors that can occur when decoding or encoding PRS images
#[derive(Debug, Error)]
pub enum PrsError {
	/// Not enough data to parse
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Invalid magic number
	#[error("Invalid magic number: {0:02X?}")]
	InvalidMagic([u8; 2]),

	/// Bytes-per-pixel value other than 3 or 4
	#[error("Unsupported bytes-per-pixel value: {0}")]
	UnsupportedDepth(u8),

	/// Back reference pointing before the start of the output buffer
	#[error("Back reference distance {distance} exceeds decoded position {position}")]
	InvalidOffset {
		/// Distance the back reference points behind the write cursor
		distance: usize,
		/// Write cursor position when the reference was decoded
		position: usize,
	},

	/// Packed stream ends before the header's byte budget is satisfied
	#[error("Packed stream truncated at payload byte {position}")]
	TruncatedPayload {
		/// Payload offset at which the next byte was expected
		position: usize,
	},

	/// Pixel buffer does not match the dimensions it was declared with
	#[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual} bytes")]
	BufferSize {
		/// Expected number of bytes (`width * height * depth`)
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}

/// Errors that can occur when reading or writing `.mbl` archives
#[derive(Debug, Error)]
pub enum MblError {
	/// Not enough data
	#[error("Insufficient data: expected at least {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// XOR key must contain at least one byte
	#[error("XOR key must not be empty")]
	EmptyKey,

	/// Key string cannot be represented in cp932
	#[error("Key cannot be encoded as cp932")]
	KeyEncode,

	/// Entry name bytes are not valid cp932
	#[error("Entry {index} name is not valid cp932")]
	NameDecode {
		/// Index of the offending entry
		index: usize,
	},

	/// Entry name cannot be represented in cp932
	#[error("Name '{name}' cannot be encoded as cp932")]
	NameEncode {
		/// The offending name
		name: String,
	},

	/// No candidate index layout matched the archive
	#[error("No known index layout matches this archive")]
	UnrecognizedArchive,

	/// Entry data range lies outside the archive
	#[error("Entry '{name}' points outside the archive (offset {offset}, size {size})")]
	EntryOutOfBounds {
		/// Name of the offending entry
		name: String,
		/// Absolute data offset recorded in the index
		offset: u32,
		/// Data size recorded in the index
		size: u32,
	},

	/// Sidecar field offsets do not fit inside the entry record
	#[error("Index parameters place a field outside the {entry_size}-byte entry record")]
	InvalidParameters {
		/// Entry record size the parameters were checked against
		entry_size: usize,
	},

	/// Preserved entry bytes are not a valid hex string
	#[error("Invalid hex blob for entry '{name}'")]
	BadHexBlob {
		/// Name of the offending entry
		name: String,
		/// Underlying hex decode error
		source: hex::FromHexError,
	},

	/// Sidecar (de)serialization error
	#[error(transparent)]
	Json(#[from] serde_json::Error),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}
