//! Binding of clubs to generated stars.

use std::collections::HashMap;

use super::field::StarField;
use super::types::Club;

/// Where a club sits on the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClubPosition {
	/// Percent of field width.
	pub x: f64,
	/// Percent of field height.
	pub y: f64,
	/// Star the club is bound to.
	pub star_index: usize,
}

/// Lookup tables between clubs and stars.
///
/// Club `i` is bound to star `i mod N`. When there are more clubs than stars,
/// several clubs share a star; the reverse lookup then reports the first club
/// bound to it, and the others stay reachable only by name.
#[derive(Clone, Debug, Default)]
pub struct ClubStarMap {
	positions: HashMap<String, ClubPosition>,
	star_to_club: HashMap<usize, usize>,
}

impl ClubStarMap {
	/// Bind each club to a star by ordinal.
	pub fn build(clubs: &[Club], field: &StarField) -> Self {
		let mut map = Self::default();
		if field.is_empty() {
			return map;
		}

		for (ordinal, club) in clubs.iter().enumerate() {
			let star_index = ordinal % field.len();
			let star = &field.stars()[star_index];
			map.positions.insert(
				club.name.clone(),
				ClubPosition {
					x: star.x,
					y: star.y,
					star_index,
				},
			);
			map.star_to_club.entry(star_index).or_insert(ordinal);
		}
		map
	}

	/// Position of the club named `name`.
	pub fn position(&self, name: &str) -> Option<ClubPosition> {
		self.positions.get(name).copied()
	}

	/// Ordinal of the first club bound to `star_index`.
	pub fn club_for_star(&self, star_index: usize) -> Option<usize> {
		self.star_to_club.get(&star_index).copied()
	}

	/// Number of distinct club names.
	pub fn len(&self) -> usize {
		self.positions.len()
	}

	/// Whether there are none.
	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::star_map::config::FieldConfig;

	fn clubs(n: usize) -> Vec<Club> {
		(0..n)
			.map(|i| Club {
				name: format!("club-{i}"),
				..Club::default()
			})
			.collect()
	}

	fn field(count: usize) -> StarField {
		StarField::generate(
			"mapping",
			&FieldConfig {
				count,
				..FieldConfig::default()
			},
		)
	}

	#[test]
	fn clubs_bind_to_star_index_modulo_field_size() {
		let field = field(4);
		let clubs = clubs(10);
		let map = ClubStarMap::build(&clubs, &field);
		for (i, club) in clubs.iter().enumerate() {
			let pos = map.position(&club.name).unwrap();
			assert_eq!(pos.star_index, i % 4);
			let star = field.get(pos.star_index).unwrap();
			assert_eq!((pos.x, pos.y), (star.x, star.y));
		}
	}

	#[test]
	fn reverse_lookup_first_club_wins() {
		let map = ClubStarMap::build(&clubs(10), &field(4));
		assert_eq!(map.club_for_star(0), Some(0));
		assert_eq!(map.club_for_star(3), Some(3));
		assert_eq!(map.club_for_star(4), None);
	}

	#[test]
	fn stars_without_clubs_have_no_reverse_entry() {
		let map = ClubStarMap::build(&clubs(3), &field(400));
		assert_eq!(map.club_for_star(2), Some(2));
		assert_eq!(map.club_for_star(3), None);
	}

	#[test]
	fn rebuild_is_stable() {
		let field = field(7);
		let clubs = clubs(20);
		let a = ClubStarMap::build(&clubs, &field);
		let b = ClubStarMap::build(&clubs, &field);
		for club in &clubs {
			assert_eq!(a.position(&club.name), b.position(&club.name));
		}
	}

	#[test]
	fn empty_field_maps_nothing() {
		let map = ClubStarMap::build(&clubs(3), &field(0));
		assert!(map.is_empty());
	}
}
