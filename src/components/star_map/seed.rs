//! Deterministic pseudo-random streams derived from string seeds.
//!
//! A seed string is folded into a 32-bit value with FNV-1a, which then drives a
//! mulberry32 generator. The same seed always yields the same infinite sequence
//! of values in `[0, 1)`, so anything generated from it is reproducible.

/// FNV-1a offset basis (32-bit).
const FNV_OFFSET: u32 = 0x811C_9DC5;
/// FNV-1a prime (32-bit).
const FNV_PRIME: u32 = 0x0100_0193;
/// Per-draw state increment of the mulberry32 generator.
const MULBERRY_INCREMENT: u32 = 0x6D2B_79F5;
/// 2^32, used to scale the 32-bit output into `[0, 1)`.
const U32_RANGE: f64 = 4_294_967_296.0;

/// Hash a seed string to 32 bits with an FNV-1a fold.
///
/// Characters are folded as UTF-16 code units so seeds hash identically to the
/// browser-side `charCodeAt` convention.
pub fn hash_seed(seed: &str) -> u32 {
	seed.encode_utf16().fold(FNV_OFFSET, |h, unit| {
		(h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
	})
}

/// Infinite mulberry32 stream of uniform values in `[0, 1)`.
///
/// The stream cannot be reseeded; build a new one instead.
#[derive(Clone, Debug)]
pub struct SeededRandom {
	state: u32,
}

impl SeededRandom {
	/// Start a stream from an already-hashed 32-bit seed.
	pub fn from_u32(seed: u32) -> Self {
		Self { state: seed }
	}

	/// Start a stream from a seed string.
	pub fn from_seed(seed: &str) -> Self {
		Self::from_u32(hash_seed(seed))
	}

	/// Next value in `[0, 1)`.
	pub fn next_f64(&mut self) -> f64 {
		self.state = self.state.wrapping_add(MULBERRY_INCREMENT);
		let mut t = self.state;
		t = (t ^ (t >> 15)).wrapping_mul(t | 1);
		t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
		f64::from(t ^ (t >> 14)) / U32_RANGE
	}

	/// Next value in the half-open range `[min, max)`.
	pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
		min + self.next_f64() * (max - min)
	}
}

impl Iterator for SeededRandom {
	type Item = f64;

	fn next(&mut self) -> Option<f64> {
		Some(self.next_f64())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hash_matches_fnv1a_reference_values() {
		assert_eq!(hash_seed(""), 0x811C_9DC5);
		assert_eq!(hash_seed("a"), 0xE40C_292C);
		assert_eq!(hash_seed("foobar"), 0xBF9C_F968);
	}

	#[test]
	fn stream_matches_mulberry32_reference_draws() {
		assert_eq!(hash_seed("constellation-connect-v3"), 2_518_931_957);
		let draws: Vec<f64> = SeededRandom::from_seed("constellation-connect-v3")
			.take(4)
			.collect();
		assert_eq!(
			draws,
			vec![
				0.6882049751002342,
				0.48921576607972383,
				0.6552842007949948,
				0.4792995494790375,
			]
		);
	}

	#[test]
	fn non_ascii_seeds_hash_utf16_units() {
		assert_eq!(hash_seed("ünïcødé ✨"), 2_456_620_476);
		let draws: Vec<f64> = SeededRandom::from_seed("ünïcødé ✨").take(2).collect();
		assert_eq!(draws, vec![0.738437622319907, 0.7357686450704932]);
	}

	#[test]
	fn same_seed_same_sequence() {
		let a: Vec<f64> = SeededRandom::from_seed("orion").take(64).collect();
		let b: Vec<f64> = SeededRandom::from_seed("orion").take(64).collect();
		assert_eq!(a, b);
	}

	#[test]
	fn different_seeds_diverge() {
		let a: Vec<f64> = SeededRandom::from_seed("orion").take(8).collect();
		let b: Vec<f64> = SeededRandom::from_seed("lyra").take(8).collect();
		assert_ne!(a, b);
	}

	#[test]
	fn values_stay_in_unit_interval() {
		let mut rng = SeededRandom::from_u32(0);
		for _ in 0..10_000 {
			let v = rng.next_f64();
			assert!((0.0..1.0).contains(&v), "{v} out of range");
		}
	}

	#[test]
	fn uniform_respects_half_open_range() {
		let mut rng = SeededRandom::from_seed("range");
		for _ in 0..1_000 {
			let v = rng.uniform(2.0, 8.0);
			assert!((2.0..8.0).contains(&v));
		}
	}
}
