//! Canvas rendering for the harvest.
//!
//! Draws the last layout frame in passes for correct z-ordering:
//! 1. Background (screen space)
//! 2. Vines, with arrow heads on directed ones (world space)
//! 3. Fruits, selection rings and titles (world space)
//! 4. Vignette (screen space)

use std::collections::HashMap;
use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::CanvasState;
use super::theme::Theme;
use crate::layout::{EdgePosition, VertexPosition};
use crate::model::{Edge, EdgeId, Graph, Selected, Vertex, VertexId};

fn smooth_step(t: f64) -> f64 {
	t * t * (3.0 - 2.0 * t)
}

/// Renders the complete harvest to the canvas.
pub fn render(
	state: &CanvasState,
	graph: &Graph,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
) {
	let scale = ScaledValues::new(config, state.transform.k);
	let vertices: HashMap<VertexId, &Vertex> = graph.vertices().iter().map(|v| (v.id(), v)).collect();
	let edges: HashMap<EdgeId, &Edge> = graph.edges().iter().map(|e| (e.id(), e)).collect();
	let selected_edge = match graph.selected() {
		Some(Selected::Edge(id)) => Some(id),
		_ => None,
	};

	draw_background(state, ctx, theme);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	for pos in &state.frame.edges {
		if let Some(edge) = edges.get(&pos.edge) {
			draw_edge(ctx, &scale, theme, pos, edge, selected_edge == Some(pos.edge));
		}
	}
	let _ = ctx.set_line_dash(&js_sys::Array::new());

	for pos in &state.frame.vertices {
		if let Some(vertex) = vertices.get(&pos.vertex) {
			let ring_t = smooth_step(state.highlight.intensity(pos.vertex));
			draw_vertex(ctx, &scale, theme, pos, vertex, ring_t);
		}
	}

	ctx.restore();

	if theme.background.vignette > 0.0 {
		draw_vignette(state, ctx, theme);
	}
}

fn draw_background(state: &CanvasState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let gradient = if theme.background.use_gradient {
		ctx.create_radial_gradient(
			state.width / 2.0,
			state.height / 2.0,
			0.0,
			state.width / 2.0,
			state.height / 2.0,
			state.width.max(state.height) * 0.8,
		)
		.ok()
	} else {
		None
	};

	match gradient {
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &theme.background.color_secondary.to_css());
			let _ = gradient.add_color_stop(1.0, &theme.background.color.to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&theme.background.color.to_css()),
	}

	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_vignette(state: &CanvasState, ctx: &CanvasRenderingContext2d, theme: &Theme) {
	let Ok(gradient) = ctx.create_radial_gradient(
		state.width / 2.0,
		state.height / 2.0,
		state.width.min(state.height) * 0.3,
		state.width / 2.0,
		state.height / 2.0,
		state.width.max(state.height) * 0.7,
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
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edge(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	pos: &EdgePosition,
	edge: &Edge,
	selected: bool,
) {
	let ((x1, y1), (x2, y2)) = (pos.source, pos.target);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = (dx * dx + dy * dy).sqrt();

	let color = if selected {
		theme.edge.selected_color
	} else {
		theme.edge.color
	};
	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_fill_style_str(&color.to_css());
	ctx.set_line_width(scale.line_width * if selected { 1.5 } else { 1.0 });

	if selected {
		let _ = ctx.set_line_dash(&js_sys::Array::of2(
			&JsValue::from_f64(scale.arrow_size),
			&JsValue::from_f64(scale.arrow_size * 0.5),
		));
	} else {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
	}

	if dist < 0.001 {
		// self-loop: a small circle above the fruit
		let r = scale.node_radius * 1.2;
		ctx.begin_path();
		let _ = ctx.arc(x1, y1 - scale.node_radius - r, r, 0.0, 2.0 * PI);
		ctx.stroke();
		return;
	}

	let (ux, uy) = (dx / dist, dy / dist);
	let tip_gap = if edge.bidirectional {
		scale.node_radius
	} else {
		scale.node_radius + scale.arrow_size
	};

	ctx.begin_path();
	ctx.move_to(x1 + ux * scale.node_radius, y1 + uy * scale.node_radius);
	ctx.line_to(x2 - ux * tip_gap, y2 - uy * tip_gap);
	ctx.stroke();

	if !edge.bidirectional {
		let _ = ctx.set_line_dash(&js_sys::Array::new());
		let (tip_x, tip_y) = (x2 - ux * scale.node_radius, y2 - uy * scale.node_radius);
		let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
		let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}
}

fn draw_vertex(
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	theme: &Theme,
	pos: &VertexPosition,
	vertex: &Vertex,
	ring_t: f64,
) {
	let (x, y) = (pos.x, pos.y);
	let radius = scale.node_radius;
	let base = vertex.color;

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius, 0.0, 2.0 * PI);
	match ctx
		.create_radial_gradient(x - radius * 0.3, y - radius * 0.3, 0.0, x, y, radius)
		.ok()
		.filter(|_| theme.node.use_gradient)
	{
		Some(gradient) => {
			let _ = gradient.add_color_stop(0.0, &base.lighten(0.6).to_css());
			let _ = gradient.add_color_stop(0.7, &base.to_css());
			let _ = gradient.add_color_stop(1.0, &base.darken(0.3).to_css());
			#[allow(deprecated)]
			ctx.set_fill_style(&gradient);
		}
		None => ctx.set_fill_style_str(&base.to_css()),
	}
	ctx.fill();

	// unselected fruits get the theme border, selected ones fade to the darker shade
	ctx.set_line_width(theme.node.border_width / scale.k);
	ctx.set_stroke_style_str(&theme.node.border_color.to_css());
	ctx.stroke();
	if ring_t > 0.01 {
		ctx.set_global_alpha(ring_t);
		ctx.set_stroke_style_str(&base.darken(0.6).to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
		ctx.set_global_alpha(1.0);
	}

	let title = vertex.title();
	if !title.is_empty() {
		ctx.set_fill_style_str(&theme.node.label_color.to_css());
		ctx.set_font(&scale.label_font);
		let _ = ctx.fill_text(title, x + radius + 4.0, y + 3.0);
	}
}
