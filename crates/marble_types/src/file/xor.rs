//! Keyed XOR stream cipher used by the generic `.mbl` archives.
//!
//! Every payload byte is combined with the key byte at the same position
//! modulo the key length. The transform is its own inverse, so the same
//! call both encrypts and decrypts.

use super::error::MblError;

/// Applies the repeating-key XOR transform to `data` in place.
///
/// Applying the transform twice with the same key restores the original
/// bytes. The only failure mode is an empty key.
pub fn apply(data: &mut [u8], key: &[u8]) -> Result<(), MblError> {
	if key.is_empty() {
		return Err(MblError::EmptyKey);
	}

	for (byte, k) in data.iter_mut().zip(key.iter().cycle()) {
		*byte ^= k;
	}

	Ok(())
}
