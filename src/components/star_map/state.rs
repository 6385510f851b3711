//! Star map state: cached scene graph, viewport, and an input queue.
//!
//! The scene graph (field, club positions, constellations) is derived data.
//! Each piece is cached against the revisions of its inputs and rebuilt only
//! when one of them changes: the field on seed change, positions on club or
//! field change, constellations on position or surface-size change.
//!
//! Raw input is queued by the DOM layer and applied in order by
//! [`StarMapState::frame`], which then advances the active viewport animation.
//! All transform writes for a frame therefore land before the frame is drawn.

use std::collections::VecDeque;

use super::config::{ConstellationConfig, FieldConfig, StarMapConfig};
use super::constellation::{Constellations, SurfaceSize};
use super::curve::Point;
use super::field::StarField;
use super::interaction::{self, Hit, InteractionLayer, SelectionEvent};
use super::mapping::ClubStarMap;
use super::scale::{ScaleConfig, ScaledValues};
use super::types::Club;
use super::viewport::ViewportController;

/// A raw input, in screen pixels where positional.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
	/// Primary button pressed.
	PointerDown(Point),
	/// Pointer moved.
	PointerMove(Point),
	/// Primary button released.
	PointerUp,
	/// Pointer left the canvas. Ends a drag and clears hover.
	PointerLeave,
	/// Click at a point.
	Click(Point),
	/// Wheel step. `browser_zoom` is set when ctrl or meta is held.
	Wheel { delta_y: f64, browser_zoom: bool },
	/// New viewport size in CSS pixels.
	Resize { width: f64, height: f64 },
	/// Escape key. Closes the detail view.
	Escape,
	/// Explicit close of the detail view.
	CloseDetail,
	/// Animate back to the initial view.
	ResetView,
	/// Select a club by ordinal from outside the map (e.g. search results).
	SelectClub(usize),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct ConstellationKey {
	positions: (u64, u64),
	surface: Option<SurfaceSize>,
}

/// Seed- and size-dependent scene data, cached by input revision.
#[derive(Clone, Debug)]
pub struct SceneGraph {
	clubs: Vec<Club>,
	clubs_rev: u64,
	field_config: FieldConfig,
	constellation_config: ConstellationConfig,
	field: StarField,
	field_rev: u64,
	positions: ClubStarMap,
	positions_key: (u64, u64),
	surface: Option<SurfaceSize>,
	constellations: Constellations,
	constellations_key: ConstellationKey,
}

impl SceneGraph {
	/// Build the field and club positions. Constellations wait for a surface size.
	pub fn new(clubs: Vec<Club>, seed: &str, config: &StarMapConfig) -> Self {
		let field = generate_field(seed, &config.field);
		let positions = ClubStarMap::build(&clubs, &field);
		Self {
			clubs,
			clubs_rev: 0,
			field_config: config.field.clone(),
			constellation_config: config.constellation.clone(),
			field,
			field_rev: 0,
			positions,
			positions_key: (0, 0),
			surface: None,
			constellations: Constellations::default(),
			constellations_key: ConstellationKey {
				positions: (0, 0),
				surface: None,
			},
		}
	}

	/// Clubs in load order.
	pub fn clubs(&self) -> &[Club] {
		&self.clubs
	}

	/// Club by ordinal.
	pub fn club(&self, ordinal: usize) -> Option<&Club> {
		self.clubs.get(ordinal)
	}

	/// Current star field.
	pub fn field(&self) -> &StarField {
		&self.field
	}

	/// Club to star bindings for the current clubs and field.
	pub fn positions(&self) -> &ClubStarMap {
		&self.positions
	}

	/// Edges for the current positions and surface. Empty before the first resize.
	pub fn constellations(&self) -> &Constellations {
		&self.constellations
	}

	/// Field size in pixels, once known.
	pub fn surface(&self) -> Option<SurfaceSize> {
		self.surface
	}

	/// Regenerate the field if `seed` differs from the current one.
	pub fn set_seed(&mut self, seed: &str) {
		if self.field.seed() != seed {
			self.field = generate_field(seed, &self.field_config);
			self.field_rev += 1;
			self.refresh();
		}
	}

	/// Replace the club list.
	pub fn set_clubs(&mut self, clubs: Vec<Club>) {
		if self.clubs != clubs {
			self.clubs = clubs;
			self.clubs_rev += 1;
			self.refresh();
		}
	}

	/// Record the surface size. Repeating the same size is a no-op.
	pub fn set_surface(&mut self, surface: Option<SurfaceSize>) {
		self.surface = surface;
		self.refresh();
	}

	/// Rebuild whatever is stale. Returns whether constellations were rebuilt.
	fn refresh(&mut self) -> bool {
		let positions_key = (self.clubs_rev, self.field_rev);
		if self.positions_key != positions_key {
			self.positions = ClubStarMap::build(&self.clubs, &self.field);
			self.positions_key = positions_key;
		}

		let key = ConstellationKey {
			positions: positions_key,
			surface: self.surface,
		};
		if self.constellations_key == key {
			return false;
		}
		self.constellations = Constellations::build(
			&self.clubs,
			&self.positions,
			self.surface,
			&self.constellation_config,
		);
		self.constellations_key = key;
		if let Some(size) = self.surface {
			log::info!(
				"club-starmap: {} constellation edges for {}x{} surface",
				self.constellations.len(),
				size.width,
				size.height
			);
		}
		true
	}
}

fn generate_field(seed: &str, config: &FieldConfig) -> StarField {
	let field = StarField::generate(seed, config);
	log::info!("club-starmap: generated {} stars from seed {:?}", field.len(), seed);
	field
}

/// Everything the star map needs between frames.
pub struct StarMapState {
	/// Clubs, field, positions and constellations.
	pub scene: SceneGraph,
	/// Pan and zoom.
	pub viewport: ViewportController,
	/// Hover, tooltip and selection.
	pub interaction: InteractionLayer,
	/// Zoom-dependent sizes for stars and edges.
	pub scale: ScaleConfig,
	queue: VecDeque<InputEvent>,
}

impl StarMapState {
	/// Build the map for a `width` x `height` viewport.
	///
	/// The constellation surface stays unmeasured until the first
	/// [`InputEvent::Resize`], so no edges exist before then.
	pub fn new(config: &StarMapConfig, clubs: Vec<Club>, width: f64, height: f64) -> Self {
		Self {
			scene: SceneGraph::new(clubs, &config.seed, config),
			viewport: ViewportController::new(config.viewport.clone(), width, height),
			interaction: InteractionLayer::default(),
			scale: ScaleConfig::default(),
			queue: VecDeque::new(),
		}
	}

	/// Queue an input for the next frame.
	pub fn push(&mut self, event: InputEvent) {
		self.queue.push_back(event);
	}

	/// Apply queued input, then advance animations by `dt_ms`.
	///
	/// Returns selection changes for the detail view.
	pub fn frame(&mut self, dt_ms: f64) -> Vec<SelectionEvent> {
		while let Some(event) = self.queue.pop_front() {
			self.apply(event);
		}
		self.viewport.tick(dt_ms);
		self.interaction.drain_events()
	}

	/// Scale values for the current zoom.
	pub fn scaled(&self) -> ScaledValues {
		ScaledValues::new(&self.scale, self.viewport.scale())
	}

	/// Resolve what lies under a screen position. Stars take priority.
	pub fn hit_test(&self, screen: Point) -> Option<Hit> {
		let surface = self.scene.surface()?;
		let local = self.viewport.screen_to_field(screen);
		let scale = self.scaled();
		let constellations = self.scene.constellations();
		interaction::star_at(local, self.scene.field(), surface, constellations, &scale)
			.map(Hit::Star)
			.or_else(|| interaction::edge_at(local, constellations, &scale).map(Hit::Edge))
	}

	fn apply(&mut self, event: InputEvent) {
		match event {
			InputEvent::PointerDown(at) => self.viewport.pointer_down(at),
			InputEvent::PointerMove(at) => {
				let dragging = self.viewport.pointer_move(at);
				if dragging && self.viewport.drag_exceeded_threshold() {
					// The field slides under the pointer while panning.
					self.interaction.clear_hover();
				} else {
					self.hover(at);
				}
			}
			InputEvent::PointerUp => self.viewport.pointer_up(),
			InputEvent::PointerLeave => {
				self.viewport.pointer_up();
				self.interaction.clear_hover();
			}
			InputEvent::Click(at) => self.click(at),
			InputEvent::Wheel {
				delta_y,
				browser_zoom,
			} => {
				self.viewport.wheel(delta_y, browser_zoom);
			}
			InputEvent::Resize { width, height } => {
				self.viewport.resize(width, height);
				self.scene.set_surface(Some(self.viewport.field_size()));
			}
			InputEvent::Escape | InputEvent::CloseDetail => self.interaction.clear_selection(),
			InputEvent::ResetView => {
				log::debug!("club-starmap: resetting view");
				self.viewport.reset();
			}
			InputEvent::SelectClub(ordinal) => {
				self.interaction
					.select_club(ordinal, self.scene.clubs(), self.scene.positions());
			}
		}
	}

	fn hover(&mut self, at: Point) {
		match self.hit_test(at) {
			Some(Hit::Star(id)) => {
				self.interaction.hover_star(Some(id));
				self.interaction.hover_edge(None, at);
			}
			Some(Hit::Edge(index)) => {
				self.interaction.hover_star(None);
				let edge = self.scene.constellations().edges().get(index);
				self.interaction.hover_edge(edge, at);
			}
			None => self.interaction.clear_hover(),
		}
	}

	fn click(&mut self, at: Point) {
		let was_drag = self.viewport.drag_exceeded_threshold();
		match self.hit_test(at) {
			Some(Hit::Star(id)) => self.interaction.click_star(
				id,
				self.scene.clubs().len(),
				self.scene.positions(),
				was_drag,
			),
			Some(Hit::Edge(index)) => {
				if let Some(edge) = self.scene.constellations().edges().get(index) {
					self.interaction
						.click_edge(edge, self.scene.clubs(), was_drag);
				}
			}
			None => {}
		}
	}

	/// The club currently shown in the detail view.
	pub fn selected_club(&self) -> Option<&Club> {
		self.interaction
			.state()
			.selected_club
			.and_then(|ordinal| self.scene.club(ordinal))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn clubs() -> Vec<Club> {
		vec![
			Club {
				name: "A".into(),
				category: Some("Computer Science".into()),
				related: vec!["B".into()],
				..Club::default()
			},
			Club {
				name: "B".into(),
				category: Some("Art".into()),
				related: vec!["A".into()],
				..Club::default()
			},
		]
	}

	fn state() -> StarMapState {
		let mut state = StarMapState::new(&StarMapConfig::default(), clubs(), 1000.0, 800.0);
		state.push(InputEvent::Resize {
			width: 1000.0,
			height: 800.0,
		});
		state.frame(16.0);
		state
	}

	fn star_screen(state: &StarMapState, id: usize) -> Point {
		let star = state.scene.field().get(id).unwrap();
		let local = state.viewport.field_size().project(star.x, star.y);
		state.viewport.field_to_screen(local)
	}

	#[test]
	fn no_edges_before_first_resize() {
		let state = StarMapState::new(&StarMapConfig::default(), clubs(), 1000.0, 800.0);
		assert!(state.scene.constellations().is_empty());
		assert!(state.hit_test(Point::new(10.0, 10.0)).is_none());
	}

	#[test]
	fn resize_builds_edges_for_field_surface() {
		let state = state();
		assert_eq!(state.scene.constellations().len(), 1);
		assert_eq!(
			state.scene.surface(),
			Some(SurfaceSize::new(1500.0, 1200.0))
		);
	}

	#[test]
	fn redundant_resizes_do_not_rebuild() {
		let mut state = state();
		let before = state.scene.constellations().clone();
		assert!(!state.scene.refresh());
		state.push(InputEvent::Resize {
			width: 1000.0,
			height: 800.0,
		});
		state.frame(16.0);
		assert_eq!(state.scene.constellations(), &before);
	}

	#[test]
	fn reseeding_moves_clubs() {
		let mut state = state();
		let before = state.scene.positions().position("A").unwrap();
		state.scene.set_seed("another-sky");
		let after = state.scene.positions().position("A").unwrap();
		assert_eq!(before.star_index, after.star_index);
		assert!(before.x != after.x || before.y != after.y);
		state.scene.set_seed("another-sky");
		assert_eq!(state.scene.positions().position("A"), Some(after));
	}

	#[test]
	fn click_on_star_selects_its_club() {
		let mut state = state();
		let at = star_screen(&state, 1);
		state.push(InputEvent::PointerDown(at));
		state.push(InputEvent::PointerUp);
		state.push(InputEvent::Click(at));
		let events = state.frame(16.0);
		assert_eq!(events, vec![SelectionEvent::Changed(Some(1))]);
		assert_eq!(state.interaction.state().selected_star_id, Some(1));
		assert_eq!(state.selected_club().map(|c| c.name.as_str()), Some("B"));
	}

	#[test]
	fn escape_closes_selection() {
		let mut state = state();
		state.push(InputEvent::SelectClub(0));
		state.frame(16.0);
		state.push(InputEvent::Escape);
		let events = state.frame(16.0);
		assert_eq!(events, vec![SelectionEvent::Changed(None)]);
		assert!(state.selected_club().is_none());
	}

	#[test]
	fn hovering_a_star_tracks_it() {
		let mut state = state();
		let at = star_screen(&state, 0);
		state.push(InputEvent::PointerMove(at));
		state.frame(16.0);
		assert_eq!(state.interaction.state().hovered_star_id, Some(0));
		state.push(InputEvent::PointerLeave);
		state.frame(16.0);
		assert_eq!(state.interaction.state().hovered_star_id, None);
	}

	#[test]
	fn panning_past_threshold_drops_edge_tooltip() {
		let mut state = state();
		for _ in 0..8 {
			state.push(InputEvent::Wheel {
				delta_y: -100.0,
				browser_zoom: false,
			});
		}
		state.frame(16.0);
		let at = state.scene.constellations().edges()[0]
			.path
			.sample(40)
			.into_iter()
			.map(|p| state.viewport.field_to_screen(p))
			.find(|&p| matches!(state.hit_test(p), Some(Hit::Edge(_))))
			.unwrap();
		state.push(InputEvent::PointerMove(at));
		state.frame(16.0);
		assert!(state.interaction.state().tooltip.is_some());
		assert_eq!(state.interaction.state().hovered_edge_id.as_deref(), Some("0-1"));

		state.push(InputEvent::PointerDown(at));
		state.push(InputEvent::PointerMove(Point::new(at.x + 30.0, at.y)));
		state.frame(16.0);
		assert!(state.viewport.drag_exceeded_threshold());
		assert!(state.interaction.state().tooltip.is_none());
		assert!(state.interaction.state().hovered_edge_id.is_none());
		assert!(state.interaction.state().hovered_star_id.is_none());
	}

	#[test]
	fn wheel_then_reset_view_returns_home() {
		let mut state = state();
		for _ in 0..5 {
			state.push(InputEvent::Wheel {
				delta_y: -100.0,
				browser_zoom: false,
			});
		}
		state.frame(16.0);
		assert!(state.viewport.has_moved());
		state.push(InputEvent::ResetView);
		for _ in 0..30 {
			state.frame(16.0);
		}
		assert_eq!(state.viewport.scale(), state.viewport.min_scale());
		assert!(!state.viewport.has_moved());
	}
}
