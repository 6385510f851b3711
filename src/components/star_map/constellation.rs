//! Constellation edges between related clubs.
//!
//! Only clubs whose category matches the configured keyword emit edges. Each
//! edge is an arc through a lifted midpoint, fitted with a centripetal
//! Catmull-Rom curve in pixel space, so the whole set is rebuilt whenever the
//! surface size changes.

use std::collections::HashSet;

use super::config::ConstellationConfig;
use super::curve::{CurvePath, Point};
use super::mapping::{ClubPosition, ClubStarMap};
use super::types::Club;

/// Pixel size of the surface the constellation overlay covers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
	/// Width in pixels.
	pub width: f64,
	/// Height in pixels.
	pub height: f64,
}

impl SurfaceSize {
	/// Surface of `width` x `height` pixels.
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Project percent-space coordinates onto this surface.
	pub fn project(&self, x_pct: f64, y_pct: f64) -> Point {
		Point::new(x_pct / 100.0 * self.width, y_pct / 100.0 * self.height)
	}

	/// Pixel position of a club on this surface.
	pub fn to_px(&self, pos: &ClubPosition) -> Point {
		self.project(pos.x, pos.y)
	}
}

/// A curved edge from a source club to one of its related clubs.
#[derive(Clone, Debug, PartialEq)]
pub struct ConstellationEdge {
	/// `"{src_star_index}-{dst_star_index}"`. Not unique: distinct club pairs
	/// that share stars produce the same id.
	pub id: String,
	/// Curve in field pixels.
	pub path: CurvePath,
	/// Star of `src_club`.
	pub src_star_index: usize,
	/// Star of `dst_club`.
	pub dst_star_index: usize,
	/// Club whose category matched.
	pub src_club: String,
	/// Related club the edge points to.
	pub dst_club: String,
}

impl ConstellationEdge {
	/// Tooltip text shown while the edge is hovered.
	pub fn label(&self) -> String {
		format!("{} → {}", self.dst_club, self.src_club)
	}
}

/// The full edge set for one surface size, in club order.
///
/// Duplicate ids are kept as separate entries and render stacked.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Constellations {
	edges: Vec<ConstellationEdge>,
	member_stars: HashSet<usize>,
}

impl Constellations {
	/// Build the edge set. Returns an empty set while the surface is unmeasured.
	///
	/// Related names that resolve to no known club are skipped.
	pub fn build(
		clubs: &[Club],
		positions: &ClubStarMap,
		surface: Option<SurfaceSize>,
		config: &ConstellationConfig,
	) -> Self {
		let Some(surface) = surface else {
			return Self::default();
		};

		let mut out = Self::default();
		for club in clubs
			.iter()
			.filter(|c| c.category_contains(&config.category_keyword))
		{
			let Some(src) = positions.position(&club.name) else {
				continue;
			};
			for related in &club.related {
				let Some(dst) = positions.position(related) else {
					continue;
				};
				let (p1, p2) = (surface.to_px(&src), surface.to_px(&dst));
				let apex = Point::new((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0 - config.arc_lift);
				out.push(ConstellationEdge {
					id: format!("{}-{}", src.star_index, dst.star_index),
					path: CurvePath::catmull_rom(&[p1, apex, p2], config.curve_alpha),
					src_star_index: src.star_index,
					dst_star_index: dst.star_index,
					src_club: club.name.clone(),
					dst_club: related.clone(),
				});
			}
		}
		out
	}

	fn push(&mut self, edge: ConstellationEdge) {
		self.member_stars.insert(edge.src_star_index);
		self.member_stars.insert(edge.dst_star_index);
		self.edges.push(edge);
	}

	/// Edges in build order, duplicates included.
	pub fn edges(&self) -> &[ConstellationEdge] {
		&self.edges
	}

	/// Whether `star_index` is an endpoint of any edge.
	pub fn is_member(&self, star_index: usize) -> bool {
		self.member_stars.contains(&star_index)
	}

	/// Stars at either end of some edge.
	pub fn member_stars(&self) -> &HashSet<usize> {
		&self.member_stars
	}

	/// Number of edges.
	pub fn len(&self) -> usize {
		self.edges.len()
	}

	/// Whether there are none.
	pub fn is_empty(&self) -> bool {
		self.edges.is_empty()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::star_map::config::FieldConfig;
	use crate::components::star_map::field::StarField;

	fn club(name: &str, category: Option<&str>, related: &[&str]) -> Club {
		Club {
			name: name.into(),
			category: category.map(Into::into),
			related: related.iter().map(|s| s.to_string()).collect(),
			..Club::default()
		}
	}

	fn build(clubs: &[Club], surface: Option<SurfaceSize>) -> Constellations {
		let field = StarField::generate("constellations", &FieldConfig::default());
		let positions = ClubStarMap::build(clubs, &field);
		Constellations::build(clubs, &positions, surface, &ConstellationConfig::default())
	}

	#[test]
	fn only_matching_categories_emit_edges() {
		let clubs = [
			club("A", Some("Computer Science"), &["B"]),
			club("B", Some("Art"), &["A"]),
		];
		let set = build(&clubs, Some(SurfaceSize::new(1200.0, 800.0)));
		assert_eq!(set.len(), 1);
		let edge = &set.edges()[0];
		assert_eq!(edge.src_club, "A");
		assert_eq!(edge.dst_club, "B");
		assert_eq!(edge.id, "0-1");
		assert_eq!(edge.label(), "B → A");
		assert!(set.is_member(0) && set.is_member(1));
		assert!(!set.is_member(2));
	}

	#[test]
	fn unknown_size_yields_no_edges() {
		let clubs = [club("A", Some("computer club"), &["B"]), club("B", None, &[])];
		assert!(build(&clubs, None).is_empty());
	}

	#[test]
	fn unknown_related_names_are_skipped() {
		let clubs = [
			club("A", Some("Computer Engineering"), &["Ghost", "B"]),
			club("B", None, &[]),
		];
		let set = build(&clubs, Some(SurfaceSize::new(100.0, 100.0)));
		assert_eq!(set.len(), 1);
		assert_eq!(set.edges()[0].dst_club, "B");
	}

	#[test]
	fn edge_arcs_between_projected_endpoints() {
		let clubs = [club("A", Some("COMPUTER"), &["B"]), club("B", None, &[])];
		let surface = SurfaceSize::new(1000.0, 500.0);
		let field = StarField::generate("constellations", &FieldConfig::default());
		let positions = ClubStarMap::build(&clubs, &field);
		let set = Constellations::build(&clubs, &positions, Some(surface), &ConstellationConfig::default());

		let edge = &set.edges()[0];
		let a = surface.to_px(&positions.position("A").unwrap());
		let b = surface.to_px(&positions.position("B").unwrap());
		assert!(edge.path.start().unwrap().distance(a) < 1e-9);
		assert!(edge.path.end().unwrap().distance(b) < 1e-9);
		let apex = edge.path.segments[0].to;
		assert!((apex.x - (a.x + b.x) / 2.0).abs() < 1e-9);
		assert!((apex.y - ((a.y + b.y) / 2.0 - 30.0)).abs() < 1e-9);
	}

	#[test]
	fn duplicate_ids_are_kept_in_order() {
		let clubs = [
			club("A", Some("Computer Science"), &["B", "B"]),
			club("B", None, &[]),
		];
		let set = build(&clubs, Some(SurfaceSize::new(100.0, 100.0)));
		assert_eq!(set.len(), 2);
		assert_eq!(set.edges()[0].id, set.edges()[1].id);
	}

	#[test]
	fn rebuild_for_same_size_is_identical() {
		let clubs = [club("A", Some("Computer Science"), &["B"]), club("B", None, &[])];
		let size = Some(SurfaceSize::new(640.0, 480.0));
		assert_eq!(build(&clubs, size), build(&clubs, size));
	}
}
