//! Zoom-dependent sizing for stars, edges and their hit regions.
//!
//! # Coordinate Spaces
//!
//! - **Field-space**: pixels of the unscaled field. Star and edge geometry
//!   lives here and grows with zoom.
//! - **Screen-space**: canvas pixels. Values in screen-space stay constant
//!   regardless of zoom.
//!
//! Rendering and hit-testing both happen in field-space after the viewport
//! transform, so every size here is returned in field units.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Constant field-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// Field-space scaling, clamped to min/max screen-space bounds.
	/// Use `f64::INFINITY` for an unbounded maximum.
	Clamped { min_screen: f64, max_screen: f64 },
}

impl ScaleBehavior {
	/// Field-space value for `base` at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = field_size * k
				let min_world = min_screen / k;
				let max_world = (max_screen / k).max(min_world);
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Star sizing.
#[derive(Clone, Debug)]
pub struct StarScaleConfig {
	/// Size multiplier for stars that belong to a constellation.
	pub member_emphasis: f64,
	/// Visible radius, from half the star's base size.
	pub radius_behavior: ScaleBehavior,
	/// Hit region radius. Larger than small stars so they stay clickable.
	pub hit_behavior: ScaleBehavior,
	/// Extra radius of the hover halo, in screen pixels.
	pub halo: f64,
}

/// Edge sizing.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Stroke width in screen pixels.
	pub line_width: f64,
	/// Stroke width of the hovered edge in screen pixels.
	pub hovered_line_width: f64,
	/// Pointer distance (screen px) within which an edge counts as hit.
	pub hit_tolerance: f64,
	/// Samples per curve segment used for hit-testing.
	pub hit_samples: usize,
}

/// Complete scale configuration.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Star sizing.
	pub star: StarScaleConfig,
	/// Edge sizing.
	pub edge: EdgeScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			star: StarScaleConfig {
				member_emphasis: 1.8,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 5.0,
					max_screen: f64::INFINITY,
				},
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 8.0,
					max_screen: f64::INFINITY,
				},
				halo: 4.0,
			},
			edge: EdgeScaleConfig {
				line_width: 1.6,
				hovered_line_width: 3.0,
				hit_tolerance: 6.0,
				hit_samples: 12,
			},
		}
	}
}

/// Scale values resolved for one zoom level.
///
/// Create this once per frame and share it between rendering and hit-testing
/// so both agree on what the user sees.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom factor these values were resolved for.
	pub k: f64,
	member_emphasis: f64,
	radius_behavior: ScaleBehavior,
	hit_behavior: ScaleBehavior,
	/// Halo ring width around the hovered or selected star.
	pub halo: f64,
	/// Edge stroke width.
	pub edge_line_width: f64,
	/// Stroke width of the hovered edge.
	pub hovered_edge_line_width: f64,
	/// Max distance from an edge that still counts as a hit.
	pub edge_hit_tolerance: f64,
	/// Points sampled per Bézier segment when hit-testing edges.
	pub edge_hit_samples: usize,
}

impl ScaledValues {
	/// Resolve `config` at zoom factor `k`.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		Self {
			k,
			member_emphasis: config.star.member_emphasis,
			radius_behavior: config.star.radius_behavior.clone(),
			hit_behavior: config.star.hit_behavior.clone(),
			halo: ScaleBehavior::Screen.apply(config.star.halo, k),
			edge_line_width: ScaleBehavior::Screen.apply(config.edge.line_width, k),
			hovered_edge_line_width: ScaleBehavior::Screen
				.apply(config.edge.hovered_line_width, k),
			edge_hit_tolerance: ScaleBehavior::Screen.apply(config.edge.hit_tolerance, k),
			edge_hit_samples: config.edge.hit_samples,
		}
	}

	fn base_radius(&self, size: u32, member: bool) -> f64 {
		let emphasis = if member { self.member_emphasis } else { 1.0 };
		f64::from(size) * emphasis / 2.0
	}

	/// Visible star radius in field units.
	pub fn star_radius(&self, size: u32, member: bool) -> f64 {
		self.radius_behavior
			.apply(self.base_radius(size, member), self.k)
	}

	/// Star hit radius in field units. Never smaller than the visible radius.
	pub fn star_hit_radius(&self, size: u32, member: bool) -> f64 {
		let base = self.base_radius(size, member);
		self.hit_behavior
			.apply(base, self.k)
			.max(self.radius_behavior.apply(base, self.k))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn behaviors() {
		assert_eq!(ScaleBehavior::World.apply(4.0, 2.0), 4.0);
		assert_eq!(ScaleBehavior::Screen.apply(4.0, 2.0), 2.0);
		let clamped = ScaleBehavior::Clamped {
			min_screen: 10.0,
			max_screen: 40.0,
		};
		assert_eq!(clamped.apply(1.0, 2.0), 5.0);
		assert_eq!(clamped.apply(8.0, 2.0), 8.0);
		assert_eq!(clamped.apply(50.0, 2.0), 20.0);
	}

	#[test]
	fn small_stars_get_a_minimum_hit_region() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 1.0);
		// 2px star: visible radius clamps to 5 screen px, hit radius to 8
		assert_eq!(scale.star_radius(2, false), 5.0);
		assert_eq!(scale.star_hit_radius(2, false), 8.0);
		assert!(scale.star_hit_radius(2, false) > scale.star_radius(2, false));
	}

	#[test]
	fn members_are_emphasized() {
		let scale = ScaledValues::new(&ScaleConfig::default(), 2.0);
		assert!(scale.star_radius(8, true) > scale.star_radius(8, false));
		assert_eq!(scale.star_radius(8, true), 7.2);
	}

	#[test]
	fn screen_space_edges_thin_out_when_zoomed() {
		let near = ScaledValues::new(&ScaleConfig::default(), 2.0);
		let far = ScaledValues::new(&ScaleConfig::default(), 0.5);
		assert!(near.edge_line_width < far.edge_line_width);
		assert_eq!(near.edge_hit_tolerance * 2.0, 6.0);
	}
}
