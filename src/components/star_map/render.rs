//! Canvas rendering for the star map.
//!
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background gradient (screen space)
//! 2. Constellation edges, then stars (field space, under the viewport transform)
//! 3. Vignette and the edge tooltip (screen space)

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::constellation::ConstellationEdge;
use super::scale::ScaledValues;
use super::state::StarMapState;
use super::theme::Theme;

/// Renders the complete star map to the canvas.
pub fn render(state: &StarMapState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let scale = state.scaled();
	let viewport = state.viewport.viewport_size();
	let field = state.viewport.field_size();
	let t = state.viewport.transform();

	draw_background(ctx, viewport.width, viewport.height, theme);

	ctx.save();
	let _ = ctx.translate(
		viewport.width / 2.0 + t.offset.x,
		viewport.height / 2.0 + t.offset.y,
	);
	let _ = ctx.scale(t.scale, t.scale);
	let _ = ctx.translate(-field.width / 2.0, -field.height / 2.0);

	draw_edges(state, ctx, &scale, theme);
	draw_stars(state, ctx, &scale, theme);

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(ctx, viewport.width, viewport.height, theme);
	}
	draw_tooltip(state, ctx, theme);
}

fn draw_background(ctx: &CanvasRenderingContext2d, width: f64, height: f64, theme: &Theme) {
	match ctx.create_radial_gradient(
		width / 2.0,
		height / 2.0,
		0.0,
		width / 2.0,
		height / 2.0,
		width.max(height) * 0.8,
	) {
		Ok(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		Err(_) => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_vignette(ctx: &CanvasRenderingContext2d, width: f64, height: f64, theme: &Theme) {
	let Ok(gradient) = ctx.create_radial_gradient(
		width / 2.0,
		height / 2.0,
		width.min(height) * 0.3,
		width / 2.0,
		height / 2.0,
		width.max(height) * 0.7,
	) else {
		return;
	};
	let _ = gradient.add_color_stop(0.0, "rgba(0, 0, 0, 0)");
	let _ = gradient.add_color_stop(
		1.0,
		&format!("rgba(0, 0, 0, {})", theme.background.vignette),
	);
	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, width, height);
}

fn draw_edges(
	state: &StarMapState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let hovered = state.interaction.state().hovered_edge_id.as_deref();
	let style = &theme.edge;

	// Hovered edges go last so they sit on top of the dimmed ones.
	let (active, rest): (Vec<&ConstellationEdge>, Vec<&ConstellationEdge>) = state
		.scene
		.constellations()
		.edges()
		.iter()
		.partition(|e| Some(e.id.as_str()) == hovered);

	let base = if hovered.is_some() {
		style.color.with_alpha(style.dimmed_alpha)
	} else {
		style.color
	};
	ctx.set_stroke_style_str(&base.to_css());
	ctx.set_line_width(scale.edge_line_width);
	for edge in rest {
		stroke_edge(ctx, edge);
	}

	ctx.set_stroke_style_str(&style.hovered_color.to_css());
	ctx.set_line_width(scale.hovered_edge_line_width);
	for edge in active {
		stroke_edge(ctx, edge);
	}
}

fn stroke_edge(ctx: &CanvasRenderingContext2d, edge: &ConstellationEdge) {
	let Some(start) = edge.path.start() else {
		return;
	};
	ctx.begin_path();
	ctx.move_to(start.x, start.y);
	for s in &edge.path.segments {
		ctx.bezier_curve_to(s.ctrl1.x, s.ctrl1.y, s.ctrl2.x, s.ctrl2.y, s.to.x, s.to.y);
	}
	ctx.stroke();
}

fn draw_stars(
	state: &StarMapState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let surface = state.viewport.field_size();
	let constellations = state.scene.constellations();
	let selection = state.interaction.state();

	for star in state.scene.field().stars() {
		let center = surface.project(star.x, star.y);
		let member = constellations.is_member(star.id);
		let radius = scale.star_radius(star.size, member);
		let color = theme.stars.get(star.color);
		let color = if member { color.lighten(0.2) } else { color };

		ctx.begin_path();
		let _ = ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&color.to_css());
		ctx.fill();

		let focused = selection.hovered_star_id == Some(star.id)
			|| selection.selected_star_id == Some(star.id);
		if focused {
			ctx.begin_path();
			let _ = ctx.arc(center.x, center.y, radius + scale.halo, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(&theme.stars.halo.to_css());
			ctx.set_line_width(scale.edge_line_width);
			ctx.stroke();
		}
	}
}

fn draw_tooltip(state: &StarMapState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Some(tooltip) = &state.interaction.state().tooltip else {
		return;
	};
	let style = &theme.tooltip;

	ctx.set_font(style.font);
	let text_width = ctx
		.measure_text(&tooltip.text)
		.map(|m| m.width())
		.unwrap_or(tooltip.text.chars().count() as f64 * 7.0);

	ctx.set_fill_style_str(&style.background.to_css());
	ctx.fill_rect(
		tooltip.at.x,
		tooltip.at.y,
		text_width + style.padding * 2.0,
		style.line_height + style.padding,
	);
	ctx.set_fill_style_str(&style.text.to_css());
	let _ = ctx.fill_text(
		&tooltip.text,
		tooltip.at.x + style.padding,
		tooltip.at.y + style.line_height,
	);
}
