//! Tunable parameters for the star map engine.
//!
//! Every section derives `Deserialize` with `#[serde(default)]`, so a page can
//! override any subset of fields through a JSON blob and fall back to the
//! defaults for the rest.

use serde::Deserialize;

/// Seed used when the page does not provide one.
pub const DEFAULT_SEED: &str = "constellation-connect-v3";

/// Star field generation parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of stars in the field.
	pub count: usize,
	/// Horizontal margin in percent of field width kept free on both sides.
	pub margin_x: f64,
	/// Vertical margin in percent of field height kept free on both sides.
	pub margin_y: f64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			count: 400,
			margin_x: 2.0,
			margin_y: 2.0,
		}
	}
}

/// Pan, zoom, inertia and reset parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
	/// Field size as a multiple of the viewport size.
	pub map_scale: f64,
	/// Upper zoom limit. The lower limit is derived from the viewport.
	pub max_scale: f64,
	/// Scale change per wheel notch.
	pub zoom_step: f64,
	/// Pointer travel (px) after which a press counts as a drag, not a click.
	pub drag_threshold: f64,
	/// Per-frame velocity multiplier while coasting.
	pub friction: f64,
	/// Coasting stops once both velocity components fall below this (px/frame).
	pub rest_velocity: f64,
	/// Number of discrete steps in the reset tween.
	pub reset_steps: u32,
	/// Delay between reset tween steps, in milliseconds.
	pub reset_step_ms: f64,
}

impl Default for ViewportConfig {
	fn default() -> Self {
		Self {
			map_scale: 1.5,
			max_scale: 2.5,
			zoom_step: 0.1,
			drag_threshold: 5.0,
			friction: 0.95,
			rest_velocity: 0.2,
			reset_steps: 20,
			reset_step_ms: 10.0,
		}
	}
}

/// Constellation edge construction parameters.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConstellationConfig {
	/// Clubs whose category contains this text (case-insensitive) emit edges.
	pub category_keyword: String,
	/// Upward offset (px) of the arc control point above the midpoint.
	pub arc_lift: f64,
	/// Catmull-Rom parameterization exponent (0.5 = centripetal).
	pub curve_alpha: f64,
}

impl Default for ConstellationConfig {
	fn default() -> Self {
		Self {
			category_keyword: "computer".into(),
			arc_lift: 30.0,
			curve_alpha: 0.5,
		}
	}
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct StarMapConfig {
	/// Seed for the star field.
	pub seed: String,
	/// Star field generation.
	pub field: FieldConfig,
	/// Pan, zoom and reset.
	pub viewport: ViewportConfig,
	/// Constellation edges.
	pub constellation: ConstellationConfig,
}

impl Default for StarMapConfig {
	fn default() -> Self {
		Self {
			seed: DEFAULT_SEED.into(),
			field: FieldConfig::default(),
			viewport: ViewportConfig::default(),
			constellation: ConstellationConfig::default(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config: StarMapConfig =
			serde_json::from_str(r#"{ "seed": "lyra", "viewport": { "max_scale": 4.0 } }"#)
				.unwrap();
		assert_eq!(config.seed, "lyra");
		assert_eq!(config.viewport.max_scale, 4.0);
		assert_eq!(config.viewport.friction, 0.95);
		assert_eq!(config.field, FieldConfig::default());
		assert_eq!(config.constellation.category_keyword, "computer");
	}

	#[test]
	fn empty_object_is_default() {
		let config: StarMapConfig = serde_json::from_str("{}").unwrap();
		assert_eq!(config, StarMapConfig::default());
	}
}
