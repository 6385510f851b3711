//! Procedural star field generation.
//!
//! Stars are placed in percent space (0..100 of the field's width and height)
//! so the same field can be projected onto any surface size.

use super::config::FieldConfig;
use super::seed::SeededRandom;

/// Rolls above this value produce a rare violet star.
const VIOLET_ROLL: f64 = 0.98;
/// Rolls above this value (and not violet) produce a rare blue star.
const BLUE_ROLL: f64 = 0.96;
/// Smallest star size in pixels.
const MIN_STAR_SIZE: f64 = 2.0;
/// Upper bound of the star size draw, before rounding.
const MAX_STAR_SIZE: f64 = 8.0;

/// Color class of a star.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StarColor {
	/// Warm white, the vast majority of stars.
	Common,
	/// Light blue.
	RareBlue,
	/// Rarest band.
	RareViolet,
}

impl StarColor {
	/// Band a uniform roll in `[0, 1)` into a color class.
	pub fn from_roll(roll: f64) -> Self {
		if roll > VIOLET_ROLL {
			StarColor::RareViolet
		} else if roll > BLUE_ROLL {
			StarColor::RareBlue
		} else {
			StarColor::Common
		}
	}
}

/// A single generated star. Immutable once generated.
#[derive(Clone, Debug, PartialEq)]
pub struct Star {
	/// Generation order, `0..N`.
	pub id: usize,
	/// Horizontal position in percent of field width.
	pub x: f64,
	/// Vertical position in percent of field height.
	pub y: f64,
	/// Base size in pixels (at scale 1).
	pub size: u32,
	/// Color band, rolled after position and size.
	pub color: StarColor,
}

/// An ordered, seed-determined set of stars.
#[derive(Clone, Debug, PartialEq)]
pub struct StarField {
	seed: String,
	stars: Vec<Star>,
}

impl StarField {
	/// Generate `config.count` stars from `seed`.
	///
	/// Each star draws x, y, size and color roll from the shared stream, in that
	/// order, so the field is bit-identical for identical inputs.
	pub fn generate(seed: &str, config: &FieldConfig) -> Self {
		let mut rng = SeededRandom::from_seed(seed);
		let (x_min, x_max) = percent_range(config.margin_x);
		let (y_min, y_max) = percent_range(config.margin_y);

		let stars = (0..config.count)
			.map(|id| {
				let x = rng.uniform(x_min, x_max);
				let y = rng.uniform(y_min, y_max);
				let size = rng.uniform(MIN_STAR_SIZE, MAX_STAR_SIZE).round() as u32;
				let color = StarColor::from_roll(rng.next_f64());
				Star {
					id,
					x,
					y,
					size,
					color,
				}
			})
			.collect();

		Self {
			seed: seed.to_string(),
			stars,
		}
	}

	/// Seed the field was generated from.
	pub fn seed(&self) -> &str {
		&self.seed
	}

	/// Stars in generation order; `stars()[i].id == i`.
	pub fn stars(&self) -> &[Star] {
		&self.stars
	}

	/// Star by id.
	pub fn get(&self, id: usize) -> Option<&Star> {
		self.stars.get(id)
	}

	/// Number of stars.
	pub fn len(&self) -> usize {
		self.stars.len()
	}

	/// Whether there are none.
	pub fn is_empty(&self) -> bool {
		self.stars.is_empty()
	}
}

/// Percent range left after removing `margin` from both ends.
fn percent_range(margin: f64) -> (f64, f64) {
	let margin = margin.clamp(0.0, 49.0);
	(margin, 100.0 - margin)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn config(count: usize) -> FieldConfig {
		FieldConfig {
			count,
			..FieldConfig::default()
		}
	}

	#[test]
	fn generation_is_deterministic() {
		let a = StarField::generate("andromeda", &config(400));
		let b = StarField::generate("andromeda", &config(400));
		assert_eq!(a, b);
	}

	#[test]
	fn different_seeds_produce_different_fields() {
		let a = StarField::generate("andromeda", &config(50));
		let b = StarField::generate("cassiopeia", &config(50));
		assert!(
			a.stars()
				.iter()
				.zip(b.stars())
				.any(|(s, t)| s.x != t.x || s.y != t.y || s.color != t.color)
		);
	}

	#[test]
	fn stars_respect_margins_and_sizes() {
		let field = StarField::generate("bounds", &config(1_000));
		assert_eq!(field.len(), 1_000);
		for (i, star) in field.stars().iter().enumerate() {
			assert_eq!(star.id, i);
			assert!((2.0..98.0).contains(&star.x));
			assert!((2.0..98.0).contains(&star.y));
			assert!((2..=8).contains(&star.size));
		}
	}

	#[test]
	fn color_banding_thresholds() {
		assert_eq!(StarColor::from_roll(0.5), StarColor::Common);
		assert_eq!(StarColor::from_roll(0.96), StarColor::Common);
		assert_eq!(StarColor::from_roll(0.97), StarColor::RareBlue);
		assert_eq!(StarColor::from_roll(0.98), StarColor::RareBlue);
		assert_eq!(StarColor::from_roll(0.99), StarColor::RareViolet);
	}

	#[test]
	fn rare_colors_are_rare() {
		let field = StarField::generate("census", &config(5_000));
		let rare = field
			.stars()
			.iter()
			.filter(|s| s.color != StarColor::Common)
			.count();
		// ~4% expected
		assert!(rare > 50 && rare < 500, "rare count {rare}");
	}

	#[test]
	fn empty_field() {
		let field = StarField::generate("void", &config(0));
		assert!(field.is_empty());
		assert!(field.get(0).is_none());
	}
}
