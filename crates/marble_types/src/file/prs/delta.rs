//! Per-channel delta predictor for PRS pixel data.
//!
//! Each byte is predicted by the byte one pixel earlier in the same
//! channel, i.e. at `i - stride` where the stride is the bytes-per-pixel
//! value. Flat gradients collapse to long runs of small values, which the
//! LZ stage then folds into cheap back references.

/// Replaces each byte with its difference from the previous pixel's byte
/// in the same channel. Must run before compression.
pub fn encode(buf: &mut [u8], stride: usize) {
	for i in (stride..buf.len()).rev() {
		buf[i] = buf[i].wrapping_sub(buf[i - stride]);
	}
}

/// Reverses [`encode`] by accumulating the differences back into absolute
/// values. Must run after decompression.
pub fn decode(buf: &mut [u8], stride: usize) {
	for i in stride..buf.len() {
		buf[i] = buf[i].wrapping_add(buf[i - stride]);
	}
}
