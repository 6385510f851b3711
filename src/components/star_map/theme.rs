//! Visual theming for the star map.
//!
//! Colors for the night-sky background, the three star bands, constellation
//! edges and the edge tooltip.

use super::field::StarColor;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Color with explicit alpha.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same color with alpha replaced.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white)
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// CSS color string: `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Star fill colors per rarity band.
#[derive(Clone, Debug)]
pub struct StarPalette {
	/// Most stars.
	pub common: Color,
	/// Blue band.
	pub rare_blue: Color,
	/// Violet band.
	pub rare_violet: Color,
	/// Ring drawn around the hovered or selected star.
	pub halo: Color,
}

impl StarPalette {
	/// Fill for a star band.
	pub fn get(&self, color: StarColor) -> Color {
		match color {
			StarColor::Common => self.common,
			StarColor::RareBlue => self.rare_blue,
			StarColor::RareViolet => self.rare_violet,
		}
	}
}

/// Background style configuration.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Outer sky color
	pub color: Color,
	/// Center color of the radial gradient
	pub color_secondary: Color,
	/// Vignette intensity (0.0 = none, 1.0 = strong)
	pub vignette: f64,
}

/// Constellation edge style.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Resting edge color.
	pub color: Color,
	/// Color of the hovered edge.
	pub hovered_color: Color,
	/// Alpha applied to every other edge while one is hovered.
	pub dimmed_alpha: f64,
}

/// Edge tooltip style.
#[derive(Clone, Debug)]
pub struct TooltipStyle {
	/// Box fill.
	pub background: Color,
	/// Text color.
	pub text: Color,
	/// Canvas font shorthand.
	pub font: &'static str,
	/// Inner padding in pixels.
	pub padding: f64,
	/// Box height for one line of text.
	pub line_height: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Sky gradient and vignette.
	pub background: BackgroundStyle,
	/// Star fills.
	pub stars: StarPalette,
	/// Constellation edges.
	pub edge: EdgeStyle,
	/// Edge tooltip.
	pub tooltip: TooltipStyle,
}

impl Theme {
	/// Deep blue night sky.
	pub fn night_sky() -> Self {
		Self {
			background: BackgroundStyle {
				color: Color::rgb(5, 8, 22),
				color_secondary: Color::rgb(18, 26, 58),
				vignette: 0.35,
			},
			stars: StarPalette {
				common: Color::rgb(0xff, 0xf9, 0xc4),
				rare_blue: Color::rgb(0x99, 0xcc, 0xff),
				rare_violet: Color::rgb(0xcc, 0x99, 0xff),
				halo: Color::rgba(255, 255, 255, 0.6),
			},
			edge: EdgeStyle {
				color: Color::rgba(100, 140, 255, 0.7),
				hovered_color: Color::rgb(0x7f, 0xb1, 0xff),
				dimmed_alpha: 0.12,
			},
			tooltip: TooltipStyle {
				background: Color::rgba(10, 14, 30, 0.9),
				text: Color::rgb(230, 236, 255),
				font: "12px sans-serif",
				padding: 6.0,
				line_height: 16.0,
			},
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::night_sky()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(0xff, 0xf9, 0xc4).to_css(), "#fff9c4");
		assert_eq!(
			Color::rgba(100, 140, 255, 0.7).to_css(),
			"rgba(100, 140, 255, 0.7)"
		);
		assert_eq!(Color::rgb(1, 2, 3).with_alpha(0.5).a, 0.5);
	}

	#[test]
	fn lighten_moves_toward_white() {
		assert_eq!(Color::rgb(0, 100, 255).lighten(1.0), Color::rgb(255, 255, 255));
		assert_eq!(Color::rgb(0, 100, 255).lighten(0.0), Color::rgb(0, 100, 255));
	}

	#[test]
	fn palette_matches_bands() {
		let theme = Theme::default();
		assert_eq!(theme.stars.get(StarColor::Common).to_css(), "#fff9c4");
		assert_eq!(theme.stars.get(StarColor::RareBlue).to_css(), "#99ccff");
		assert_eq!(theme.stars.get(StarColor::RareViolet).to_css(), "#cc99ff");
	}
}
