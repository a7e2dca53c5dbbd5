//! Registry of known archive encryption keys.
//!
//! Keys are stored as the strings the engine derived them from and are
//! encoded to cp932 at the point of use. The on-disk cipher operates on the
//! cp932 bytes, so encoding the literal as UTF-8 would produce a different
//! (wrong) key stream.

/// XOR key used by the generic data archives (`mg_data*.mbl`).
pub const MG_DATA: &str = "女教師ゆうこ1968";

/// Encodes a key string to its cp932 byte representation.
///
/// Returns `None` when the string contains characters cp932 cannot
/// represent; such a key could never have produced the archives on disk.
pub fn to_bytes(key: &str) -> Option<Vec<u8>> {
	let (encoded, _, had_errors) = encoding_rs::SHIFT_JIS.encode(key);
	if had_errors {
		return None;
	}
	Some(encoded.into_owned())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_mg_data_key_is_cp932() {
		let bytes = to_bytes(MG_DATA).unwrap();
		// cp932 uses two bytes per kana/kanji and one per ASCII digit.
		assert_eq!(bytes.len(), 6 * 2 + 4);
		// Round-trips back to the same string.
		let (decoded, _, had_errors) = encoding_rs::SHIFT_JIS.decode(&bytes);
		assert!(!had_errors);
		assert_eq!(decoded, MG_DATA);
	}

	#[test]
	fn test_unencodable_key() {
		assert!(to_bytes("\u{1F980}").is_none());
	}
}
