//! Benchmark helper utilities for `marble-rs`.
//!
//! Provides synthetic BGR(A) pixel buffers with tunable redundancy so the
//! PRS codec benchmarks exercise both the match-heavy and the
//! literal-heavy paths without shipping real game assets.

/// Generates a flat-shaded BGR test image that compresses extremely well.
pub fn generate_flat_image(width: u16, height: u16) -> Vec<u8> {
	let mut pixels = Vec::with_capacity(width as usize * height as usize * 3);
	for y in 0..height {
		for _ in 0..width {
			let shade = (y / 16) as u8;
			pixels.extend_from_slice(&[shade, shade.wrapping_mul(2), 0x40]);
		}
	}
	pixels
}

/// Generates a noisy BGRA test image that mostly defeats the match finder.
pub fn generate_noise_image(width: u16, height: u16) -> Vec<u8> {
	let mut state = 0x2545_F491u32;
	let count = width as usize * height as usize * 4;
	let mut pixels = Vec::with_capacity(count);
	for _ in 0..count {
		state = state.wrapping_mul(1664525).wrapping_add(1013904223);
		pixels.push((state >> 24) as u8);
	}
	pixels
}

/// Common benchmark sizes
pub mod sizes {
	/// Small image: 64x64
	pub const SMALL: (u16, u16) = (64, 64);
	/// Typical game asset size: 640x480
	pub const GAME: (u16, u16) = (640, 480);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generated_sizes() {
		assert_eq!(generate_flat_image(8, 4).len(), 8 * 4 * 3);
		assert_eq!(generate_noise_image(8, 4).len(), 8 * 4 * 4);
	}
}
