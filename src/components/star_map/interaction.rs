//! Hover and selection over stars and constellation edges.
//!
//! Hit regions are resolved in field-space: the pointer is mapped through the
//! inverse viewport transform, then tested against each star's hit radius and
//! each edge's sampled curve. Stars win over edges, since they are the smaller
//! targets.

use super::constellation::{ConstellationEdge, Constellations, SurfaceSize};
use super::curve::Point;
use super::field::StarField;
use super::mapping::ClubStarMap;
use super::scale::ScaledValues;
use super::types::Club;

/// Screen offset of the edge tooltip from the pointer.
const TOOLTIP_OFFSET: Point = Point::new(10.0, 6.0);

/// Text shown next to the pointer while an edge is hovered.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
	/// Screen position.
	pub at: Point,
	/// Tooltip text.
	pub text: String,
}

/// What the pointer is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
	/// Star id.
	Star(usize),
	/// Index into [`Constellations::edges`].
	Edge(usize),
}

/// Emitted whenever the selected club changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionEvent {
	/// Club ordinal now shown in the detail view, or `None` when closed.
	Changed(Option<usize>),
}

/// Hover and selection state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SelectionState {
	/// Star of the selected club.
	pub selected_star_id: Option<usize>,
	/// Club ordinal backing the current selection.
	pub selected_club: Option<usize>,
	/// Star under the pointer.
	pub hovered_star_id: Option<usize>,
	/// Id shared by every edge between the same two stars.
	pub hovered_edge_id: Option<String>,
	/// Shown only while an edge is hovered.
	pub tooltip: Option<Tooltip>,
}

/// Find the star whose hit region contains `p` (field-space), nearest first.
pub fn star_at(
	p: Point,
	field: &StarField,
	surface: SurfaceSize,
	constellations: &Constellations,
	scale: &ScaledValues,
) -> Option<usize> {
	field
		.stars()
		.iter()
		.filter_map(|star| {
			let center = surface.project(star.x, star.y);
			let member = constellations.is_member(star.id);
			let d = p.distance(center);
			(d <= scale.star_hit_radius(star.size, member)).then_some((star.id, d))
		})
		.min_by(|a, b| a.1.total_cmp(&b.1))
		.map(|(id, _)| id)
}

/// Find the topmost edge passing within the hit tolerance of `p` (field-space).
pub fn edge_at(p: Point, constellations: &Constellations, scale: &ScaledValues) -> Option<usize> {
	constellations
		.edges()
		.iter()
		.rposition(|edge| {
			edge.path.distance_to(p, scale.edge_hit_samples) <= scale.edge_hit_tolerance
		})
}

/// Applies pointer outcomes to [`SelectionState`] and queues selection events.
#[derive(Clone, Debug, Default)]
pub struct InteractionLayer {
	state: SelectionState,
	events: Vec<SelectionEvent>,
}

impl InteractionLayer {
	/// Current hover and selection.
	pub fn state(&self) -> &SelectionState {
		&self.state
	}

	/// Hover a star, or clear star hover with `None`.
	pub fn hover_star(&mut self, star: Option<usize>) {
		self.state.hovered_star_id = star;
	}

	/// Hover `edge` (or nothing) with the pointer at `pointer` (screen-space).
	pub fn hover_edge(&mut self, edge: Option<&ConstellationEdge>, pointer: Point) {
		match edge {
			Some(edge) => {
				self.state.hovered_edge_id = Some(edge.id.clone());
				self.state.tooltip = Some(Tooltip {
					at: tooltip_position(pointer),
					text: edge.label(),
				});
			}
			None => {
				self.state.hovered_edge_id = None;
				self.state.tooltip = None;
			}
		}
	}

	/// Drop star and edge hover and the tooltip.
	pub fn clear_hover(&mut self) {
		self.state.hovered_star_id = None;
		self.hover_edge(None, Point::default());
	}

	/// Click on a star. Ignored when the press was a drag.
	///
	/// The star resolves to the first club bound to it, or to `star_id` modulo
	/// the club count for stars that carry no club.
	pub fn click_star(
		&mut self,
		star_id: usize,
		club_count: usize,
		positions: &ClubStarMap,
		was_drag: bool,
	) {
		if was_drag {
			return;
		}
		let ordinal = positions.club_for_star(star_id).unwrap_or(star_id);
		self.select(Some(star_id), ordinal, club_count);
	}

	/// Click on an edge. Selects the edge's source club, resolved by name and
	/// falling back to the source star index. Ignored when the press was a drag.
	pub fn click_edge(&mut self, edge: &ConstellationEdge, clubs: &[Club], was_drag: bool) {
		if was_drag {
			return;
		}
		let ordinal = clubs
			.iter()
			.position(|c| c.name == edge.src_club)
			.unwrap_or(edge.src_star_index);
		self.select(Some(edge.src_star_index), ordinal, clubs.len());
	}

	/// Select a club directly by ordinal, e.g. from a search result.
	pub fn select_club(&mut self, ordinal: usize, clubs: &[Club], positions: &ClubStarMap) {
		let star = clubs
			.get(ordinal)
			.and_then(|c| positions.position(&c.name))
			.map(|p| p.star_index);
		self.select(star, ordinal, clubs.len());
	}

	fn select(&mut self, star: Option<usize>, ordinal: usize, club_count: usize) {
		if club_count == 0 {
			return;
		}
		let club = ordinal % club_count;
		self.state.selected_star_id = star;
		if self.state.selected_club != Some(club) {
			self.state.selected_club = Some(club);
			log::debug!("club-starmap: selected club #{club}");
			self.events.push(SelectionEvent::Changed(Some(club)));
		}
	}

	/// Close the selection (explicit close control or Escape).
	pub fn clear_selection(&mut self) {
		self.state.selected_star_id = None;
		if self.state.selected_club.take().is_some() {
			self.events.push(SelectionEvent::Changed(None));
		}
	}

	/// Take the selection changes since the last call.
	pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
		std::mem::take(&mut self.events)
	}
}

fn tooltip_position(pointer: Point) -> Point {
	Point::new(pointer.x + TOOLTIP_OFFSET.x, pointer.y + TOOLTIP_OFFSET.y)
}
