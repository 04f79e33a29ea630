//! Canvas drawing for the network widget.
//!
//! Two surfaces are drawn per refresh:
//! 1. Scene: edges, then nodes (stage space, view transform applied)
//! 2. Overlay: labels and the hover ring (screen space)
//!
//! Geometry for a refresh is computed once into a [`Frame`], which is also
//! what hit testing runs against.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::renderer::RendererState;
use super::scale::{Fit, SizeRange};
use super::theme::Color;

/// Extra screen pixels around a node that still count as a hit.
const HIT_SLOP: f64 = 2.0;

/// Pan and zoom transform: `screen = stage * k + (x, y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self {
			x: 0.0,
			y: 0.0,
			k: 1.0,
		}
	}
}

impl ViewTransform {
	pub fn to_screen(&self, sx: f64, sy: f64) -> (f64, f64) {
		(sx * self.k + self.x, sy * self.k + self.y)
	}

	pub fn to_stage(&self, x: f64, y: f64) -> (f64, f64) {
		((x - self.x) / self.k, (y - self.y) / self.k)
	}

	/// Zoom by `factor` keeping the screen point `(x, y)` fixed.
	pub fn zoom_at(&mut self, x: f64, y: f64, factor: f64, min_k: f64, max_k: f64) {
		let new_k = (self.k * factor).clamp(min_k, max_k);
		let ratio = new_k / self.k;
		self.x = x - (x - self.x) * ratio;
		self.y = y - (y - self.y) * ratio;
		self.k = new_k;
	}
}

/// Per-refresh geometry in stage space.
#[derive(Clone, Debug, Default)]
pub struct Frame {
	pub positions: Vec<(f64, f64)>,
	pub radii: Vec<f64>,
	pub edge_widths: Vec<f64>,
	pub k: f64,
}

impl Frame {
	pub fn new(state: &RendererState, width: f64, height: f64, view: &ViewTransform) -> Self {
		let graph = &state.graph;
		let settings = &state.settings;
		let fit = Fit::new(graph, width, height, settings.side_margin);
		let node_sizes = SizeRange::new(
			graph.nodes().map(|n| n.record.size),
			settings.min_node_size,
			settings.max_node_size,
		);
		let edge_sizes = SizeRange::new(
			graph.edges().map(|e| e.record.size),
			settings.min_edge_size,
			settings.max_edge_size,
		);

		Self {
			positions: graph
				.nodes()
				.map(|n| fit.apply(n.record.x, n.record.y))
				.collect(),
			radii: graph
				.nodes()
				.map(|n| {
					settings
						.node_scaling
						.apply(node_sizes.apply(n.record.size), view.k)
				})
				.collect(),
			edge_widths: graph
				.edges()
				.map(|e| {
					settings
						.edge_scaling
						.apply(edge_sizes.apply(e.record.size), view.k)
				})
				.collect(),
			k: view.k,
		}
	}

	/// Topmost node under the screen point, if any.
	pub fn node_at(&self, view: &ViewTransform, x: f64, y: f64) -> Option<usize> {
		let (gx, gy) = view.to_stage(x, y);
		let slop = HIT_SLOP / view.k;
		let mut found = None;
		for (idx, (&(nx, ny), &r)) in self.positions.iter().zip(&self.radii).enumerate() {
			let (dx, dy) = (nx - gx, ny - gy);
			if (dx * dx + dy * dy).sqrt() <= r + slop {
				found = Some(idx);
			}
		}
		found
	}
}

/// Draws edges and nodes onto the scene surface.
pub fn draw_scene(
	ctx: &CanvasRenderingContext2d,
	state: &RendererState,
	frame: &Frame,
	view: &ViewTransform,
	width: f64,
	height: f64,
) {
	ctx.clear_rect(0.0, 0.0, width, height);
	ctx.save();
	let _ = ctx.translate(view.x, view.y);
	let _ = ctx.scale(view.k, view.k);

	draw_edges(ctx, state, frame);
	draw_nodes(ctx, state, frame);

	ctx.restore();
}

fn draw_edges(ctx: &CanvasRenderingContext2d, state: &RendererState, frame: &Frame) {
	let graph = &state.graph;
	let settings = &state.settings;

	for (edge, &width) in graph.edges().zip(&frame.edge_widths) {
		let (x1, y1) = frame.positions[edge.source];
		let (x2, y2) = frame.positions[edge.target];
		let target_radius = frame.radii[edge.target];
		let color = settings.edge_color(edge, graph);
		let shape = settings.edge_shape(edge);

		ctx.set_stroke_style_str(color);
		ctx.set_line_width(width);

		if edge.source == edge.target {
			draw_self_loop(ctx, x1, y1, frame.radii[edge.source]);
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let arrow_size = if shape.has_arrow() {
			(width * 2.5).max(3.0 / frame.k)
		} else {
			0.0
		};

		let (tip_x, tip_y, back_ux, back_uy) = if shape.is_curved() {
			draw_curved_edge(ctx, x1, y1, x2, y2, ux, uy, target_radius, arrow_size)
		} else {
			let end = target_radius + arrow_size;
			ctx.begin_path();
			ctx.move_to(x1, y1);
			ctx.line_to(x2 - ux * end, y2 - uy * end);
			ctx.stroke();
			(x2 - ux * target_radius, y2 - uy * target_radius, ux, uy)
		};

		if shape.has_arrow() {
			draw_arrow_head(ctx, color, tip_x, tip_y, back_ux, back_uy, arrow_size);
		}
	}
}

/// Quadratic curve bowed to the left of travel, stopping short of the
/// target by `radius + arrow_size`. Returns the arrow tip on the target's rim
/// and the unit direction the curve arrives with.
#[allow(clippy::too_many_arguments)]
fn draw_curved_edge(
	ctx: &CanvasRenderingContext2d,
	x1: f64,
	y1: f64,
	x2: f64,
	y2: f64,
	ux: f64,
	uy: f64,
	radius: f64,
	arrow_size: f64,
) -> (f64, f64, f64, f64) {
	let (dx, dy) = (x2 - x1, y2 - y1);
	let curve_offset = (dx * dx + dy * dy).sqrt() * 0.2;
	let (cx, cy) = (
		(x1 + x2) / 2.0 - uy * curve_offset,
		(y1 + y2) / 2.0 + ux * curve_offset,
	);

	let (ax, ay) = (x2 - cx, y2 - cy);
	let alen = (ax * ax + ay * ay).sqrt().max(0.001);
	let (aux, auy) = (ax / alen, ay / alen);
	let end = radius + arrow_size;

	ctx.begin_path();
	ctx.move_to(x1, y1);
	let _ = ctx.quadratic_curve_to(cx, cy, x2 - aux * end, y2 - auy * end);
	ctx.stroke();

	(x2 - aux * radius, y2 - auy * radius, aux, auy)
}

fn draw_arrow_head(
	ctx: &CanvasRenderingContext2d,
	color: &str,
	tip_x: f64,
	tip_y: f64,
	ux: f64,
	uy: f64,
	size: f64,
) {
	let (back_x, back_y) = (tip_x - ux * size, tip_y - uy * size);
	let (px, py) = (-uy * size * 0.5, ux * size * 0.5);

	ctx.set_fill_style_str(color);
	ctx.begin_path();
	ctx.move_to(tip_x, tip_y);
	ctx.line_to(back_x + px, back_y + py);
	ctx.line_to(back_x - px, back_y - py);
	ctx.close_path();
	ctx.fill();
}

fn draw_self_loop(ctx: &CanvasRenderingContext2d, x: f64, y: f64, radius: f64) {
	let loop_radius = radius * 1.5;
	ctx.begin_path();
	let _ = ctx.arc(x + loop_radius, y - loop_radius, loop_radius, 0.0, 2.0 * PI);
	ctx.stroke();
}

fn draw_nodes(ctx: &CanvasRenderingContext2d, state: &RendererState, frame: &Frame) {
	for (idx, node) in state.graph.nodes().enumerate() {
		let (x, y) = frame.positions[idx];
		ctx.begin_path();
		let _ = ctx.arc(x, y, frame.radii[idx], 0.0, 2.0 * PI);
		ctx.set_fill_style_str(state.settings.node_color(node));
		ctx.fill();
	}
}

/// Draws labels and the hover ring onto the overlay surface.
#[allow(clippy::too_many_arguments)]
pub fn draw_overlay(
	ctx: &CanvasRenderingContext2d,
	state: &RendererState,
	frame: &Frame,
	view: &ViewTransform,
	hovered: Option<usize>,
	width: f64,
	height: f64,
) {
	ctx.clear_rect(0.0, 0.0, width, height);
	let settings = &state.settings;
	ctx.set_font(&format!("{}px sans-serif", settings.default_label_size));

	for (idx, node) in state.graph.nodes().enumerate() {
		let Some(label) = node.record.label.as_deref() else {
			continue;
		};
		let screen_radius = frame.radii[idx] * view.k;
		if screen_radius < settings.label_threshold || hovered == Some(idx) {
			continue;
		}
		let (x, y) = view.to_screen(frame.positions[idx].0, frame.positions[idx].1);
		ctx.set_fill_style_str(&settings.default_label_color);
		let _ = ctx.fill_text(
			label,
			x + screen_radius + 3.0,
			y + settings.default_label_size / 3.0,
		);
	}

	let Some(idx) = hovered else {
		return;
	};
	let Some(node) = state.graph.node_at(idx) else {
		return;
	};
	let (x, y) = view.to_screen(frame.positions[idx].0, frame.positions[idx].1);
	let radius = frame.radii[idx] * view.k;
	let base = Color::parse(settings.node_color(node)).unwrap_or(Color::rgb(128, 128, 128));

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius + 2.0, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&base.darken(0.3).to_css());
	ctx.set_line_width(1.5);
	ctx.stroke();

	ctx.begin_path();
	let _ = ctx.arc(x, y, radius + 5.0, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&base.with_alpha(0.3).to_css());
	ctx.set_line_width(0.75);
	ctx.stroke();

	if let Some(label) = node.record.label.as_deref() {
		let text_x = x + radius + 6.0;
		let text_y = y + settings.default_label_size / 3.0;
		let text_w = ctx
			.measure_text(label)
			.map(|m| m.width())
			.unwrap_or(label.len() as f64 * settings.default_label_size * 0.6);
		ctx.set_fill_style_str(&Color::rgb(255, 255, 255).with_alpha(0.85).to_css());
		ctx.fill_rect(
			text_x - 2.0,
			text_y - settings.default_label_size,
			text_w + 4.0,
			settings.default_label_size * 1.3,
		);
		ctx.set_fill_style_str(&settings.default_label_color);
		let _ = ctx.fill_text(label, text_x, text_y);
	}
}
