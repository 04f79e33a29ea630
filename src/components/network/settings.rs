//! Renderer settings and the translation from host options onto them.
//!
//! [`Settings`] is the renderer's own store with its built-in defaults.
//! [`apply_options`] sets every option-backed field from [`RenderOptions`]:
//! present fields win, absent ones fall back to the built-in default, and
//! values that do not parse are logged and replaced by the default too.

use std::str::FromStr;

use log::warn;

use super::graph::{Edge, Graph, Node};
use super::renderer::InteractionKind;
use super::scale::ScaleBehavior;
use super::types::RenderOptions;

/// How an edge is drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeShape {
	#[default]
	Line,
	Arrow,
	Curve,
	CurvedArrow,
}

impl EdgeShape {
	pub fn has_arrow(self) -> bool {
		matches!(self, EdgeShape::Arrow | EdgeShape::CurvedArrow)
	}

	pub fn is_curved(self) -> bool {
		matches!(self, EdgeShape::Curve | EdgeShape::CurvedArrow)
	}
}

impl FromStr for EdgeShape {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"def" | "line" => Ok(EdgeShape::Line),
			"arrow" => Ok(EdgeShape::Arrow),
			"curve" => Ok(EdgeShape::Curve),
			"curvedArrow" => Ok(EdgeShape::CurvedArrow),
			other => Err(format!("unknown edge shape `{other}`")),
		}
	}
}

/// Where an edge without its own color takes its color from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeColorMode {
	#[default]
	Source,
	Target,
	/// Always the `default_edge_color` setting.
	Fixed,
}

/// Renderer settings store.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
	pub min_node_size: f64,
	pub max_node_size: f64,
	pub min_edge_size: f64,
	pub max_edge_size: f64,
	pub default_node_color: String,
	pub default_edge_color: String,
	pub edge_color_mode: EdgeColorMode,
	pub default_edge_shape: EdgeShape,
	pub default_label_color: String,
	/// Label font size in screen pixels.
	pub default_label_size: f64,
	/// Minimum on-screen node radius before its label is drawn.
	pub label_threshold: f64,
	pub double_click_enabled: bool,
	pub mouse_wheel_enabled: bool,
	/// Zoom multiplier per double click.
	pub double_click_zoom_ratio: f64,
	/// Zoom multiplier per wheel notch.
	pub wheel_zoom_ratio: f64,
	pub min_zoom: f64,
	pub max_zoom: f64,
	/// Padding kept around the fitted graph, in pixels.
	pub side_margin: f64,
	pub node_scaling: ScaleBehavior,
	pub edge_scaling: ScaleBehavior,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			min_node_size: 1.0,
			max_node_size: 8.0,
			min_edge_size: 0.5,
			max_edge_size: 1.0,
			default_node_color: "#3182bd".to_string(),
			default_edge_color: "#636363".to_string(),
			edge_color_mode: EdgeColorMode::Source,
			default_edge_shape: EdgeShape::Line,
			default_label_color: "#000".to_string(),
			default_label_size: 14.0,
			label_threshold: 8.0,
			double_click_enabled: true,
			mouse_wheel_enabled: true,
			double_click_zoom_ratio: 2.2,
			wheel_zoom_ratio: 1.1,
			min_zoom: 0.0625,
			max_zoom: 32.0,
			side_margin: 10.0,
			node_scaling: ScaleBehavior::Clamped {
				min_screen: 1.0,
				max_screen: f64::INFINITY,
			},
			edge_scaling: ScaleBehavior::Screen,
		}
	}
}

impl Settings {
	/// Display color of a node.
	pub fn node_color<'a>(&'a self, node: &'a Node) -> &'a str {
		node.color.as_deref().unwrap_or(&self.default_node_color)
	}

	/// Display color of an edge, falling back through `edge_color_mode`.
	pub fn edge_color<'a>(&'a self, edge: &'a Edge, graph: &'a Graph) -> &'a str {
		if let Some(color) = edge.color.as_deref() {
			return color;
		}
		let endpoint = match self.edge_color_mode {
			EdgeColorMode::Source => edge.source,
			EdgeColorMode::Target => edge.target,
			EdgeColorMode::Fixed => return &self.default_edge_color,
		};
		graph
			.node_at(endpoint)
			.map(|n| self.node_color(n))
			.unwrap_or(self.default_edge_color.as_str())
	}

	/// Shape of an edge: its own `type` if valid, else the default.
	pub fn edge_shape(&self, edge: &Edge) -> EdgeShape {
		edge.record
			.shape
			.as_deref()
			.and_then(|s| s.parse().ok())
			.unwrap_or(self.default_edge_shape)
	}
}

/// Set every option-backed setting from `options`, using the built-in
/// default for anything absent. Other settings are left alone.
pub fn apply_options(settings: &mut Settings, options: &RenderOptions) {
	let defaults = Settings::default();
	settings.min_node_size = options.min_node_size.unwrap_or(defaults.min_node_size);
	settings.max_node_size = options.max_node_size.unwrap_or(defaults.max_node_size);
	settings.min_edge_size = options.min_edge_size.unwrap_or(defaults.min_edge_size);
	settings.max_edge_size = options.max_edge_size.unwrap_or(defaults.max_edge_size);
	settings.default_node_color = options
		.node_color
		.clone()
		.unwrap_or(defaults.default_node_color);
	settings.default_edge_color = options
		.edge_color
		.clone()
		.unwrap_or(defaults.default_edge_color);
	settings.double_click_enabled = options
		.double_click_zoom
		.unwrap_or(defaults.double_click_enabled);
	settings.mouse_wheel_enabled = options
		.mouse_wheel_zoom
		.unwrap_or(defaults.mouse_wheel_enabled);
	settings.label_threshold = options.label_threshold.unwrap_or(defaults.label_threshold);

	settings.default_edge_shape = match &options.edge_arrows {
		Some(shape) => shape.parse().unwrap_or_else(|e| {
			warn!("net-widget: edgeArrows ignored: {}", e);
			defaults.default_edge_shape
		}),
		None => defaults.default_edge_shape,
	};
}

/// Focus and unfocus events for neighbor highlighting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborBinding {
	pub focus: InteractionKind,
	pub unfocus: InteractionKind,
}

/// Resolve the highlight events from `neighborEvent`/`neighborStart`/
/// `neighborEnd`. `None` when highlighting is off or unresolvable.
pub fn neighbor_binding(options: &RenderOptions) -> Option<NeighborBinding> {
	let preset = match options.neighbor_event.as_deref() {
		None | Some("None") => return None,
		Some("onClick") => Some((InteractionKind::ClickNode, InteractionKind::ClickStage)),
		Some("onHover") => Some((InteractionKind::OverNode, InteractionKind::OutNode)),
		Some(_) => None,
	};

	let resolve = |name: &Option<String>, fallback: Option<InteractionKind>| match name {
		Some(name) => name
			.parse::<InteractionKind>()
			.map_err(|e| warn!("net-widget: {}", e))
			.ok(),
		None => fallback,
	};

	let focus = resolve(&options.neighbor_start, preset.map(|p| p.0));
	let unfocus = resolve(&options.neighbor_end, preset.map(|p| p.1));
	match (focus, unfocus) {
		(Some(focus), Some(unfocus)) => Some(NeighborBinding { focus, unfocus }),
		_ => {
			warn!(
				"net-widget: neighbor highlighting `{}` has no usable focus/unfocus events",
				options.neighbor_event.as_deref().unwrap_or_default()
			);
			None
		}
	}
}

/// Interaction forwarded to the host from `sigmaEvents`.
pub fn forwarded_event(options: &RenderOptions) -> Option<InteractionKind> {
	match options.sigma_events.as_deref()? {
		"clickNode" => Some(InteractionKind::ClickNode),
		"hoverNode" => Some(InteractionKind::OverNode),
		other => {
			warn!("net-widget: sigmaEvents `{}` not supported", other);
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_absent_options_keep_defaults() {
		let mut settings = Settings::default();
		apply_options(&mut settings, &RenderOptions::default());
		assert_eq!(settings, Settings::default());
	}

	#[test]
	fn test_present_options_are_applied() {
		let mut settings = Settings::default();
		let options = RenderOptions {
			min_node_size: Some(2.0),
			max_node_size: Some(12.0),
			min_edge_size: Some(0.1),
			max_edge_size: Some(3.0),
			node_color: Some("#ff0000".into()),
			edge_color: Some("#00ff00".into()),
			edge_arrows: Some("curvedArrow".into()),
			double_click_zoom: Some(false),
			mouse_wheel_zoom: Some(false),
			label_threshold: Some(4.0),
			..Default::default()
		};
		apply_options(&mut settings, &options);

		assert_eq!(settings.min_node_size, 2.0);
		assert_eq!(settings.max_node_size, 12.0);
		assert_eq!(settings.min_edge_size, 0.1);
		assert_eq!(settings.max_edge_size, 3.0);
		assert_eq!(settings.default_node_color, "#ff0000");
		assert_eq!(settings.default_edge_color, "#00ff00");
		assert_eq!(settings.default_edge_shape, EdgeShape::CurvedArrow);
		assert!(!settings.double_click_enabled);
		assert!(!settings.mouse_wheel_enabled);
		assert_eq!(settings.label_threshold, 4.0);
	}

	#[test]
	fn test_absent_options_reset_to_defaults() {
		let mut settings = Settings::default();
		apply_options(
			&mut settings,
			&RenderOptions {
				max_node_size: Some(20.0),
				node_color: Some("#ff0000".into()),
				edge_arrows: Some("arrow".into()),
				mouse_wheel_zoom: Some(false),
				..Default::default()
			},
		);
		apply_options(
			&mut settings,
			&RenderOptions {
				min_node_size: Some(5.0),
				..Default::default()
			},
		);
		assert_eq!(settings.min_node_size, 5.0);
		assert_eq!(settings.max_node_size, 8.0);
		assert_eq!(settings.default_node_color, "#3182bd");
		assert_eq!(settings.default_edge_shape, EdgeShape::Line);
		assert!(settings.mouse_wheel_enabled);
	}

	#[test]
	fn test_settings_without_options_are_kept() {
		let mut settings = Settings {
			edge_color_mode: EdgeColorMode::Fixed,
			wheel_zoom_ratio: 1.5,
			..Default::default()
		};
		apply_options(&mut settings, &RenderOptions::default());
		assert_eq!(settings.edge_color_mode, EdgeColorMode::Fixed);
		assert_eq!(settings.wheel_zoom_ratio, 1.5);
	}

	#[test]
	fn test_bad_edge_shape_falls_back_to_default() {
		let mut settings = Settings::default();
		settings.default_edge_shape = EdgeShape::Arrow;
		apply_options(
			&mut settings,
			&RenderOptions {
				edge_arrows: Some("zigzag".into()),
				..Default::default()
			},
		);
		assert_eq!(settings.default_edge_shape, EdgeShape::Line);
	}

	#[test]
	fn test_neighbor_binding_presets() {
		let click = RenderOptions {
			neighbor_event: Some("onClick".into()),
			..Default::default()
		};
		assert_eq!(
			neighbor_binding(&click),
			Some(NeighborBinding {
				focus: InteractionKind::ClickNode,
				unfocus: InteractionKind::ClickStage,
			})
		);

		let hover = RenderOptions {
			neighbor_event: Some("onHover".into()),
			..Default::default()
		};
		assert_eq!(
			neighbor_binding(&hover),
			Some(NeighborBinding {
				focus: InteractionKind::OverNode,
				unfocus: InteractionKind::OutNode,
			})
		);
	}

	#[test]
	fn test_neighbor_binding_disabled() {
		assert_eq!(neighbor_binding(&RenderOptions::default()), None);
		let none = RenderOptions {
			neighbor_event: Some("None".into()),
			neighbor_start: Some("clickNode".into()),
			neighbor_end: Some("clickStage".into()),
			..Default::default()
		};
		assert_eq!(neighbor_binding(&none), None);
	}

	#[test]
	fn test_explicit_events_override_preset() {
		let options = RenderOptions {
			neighbor_event: Some("onClick".into()),
			neighbor_start: Some("doubleClickNode".into()),
			neighbor_end: Some("doubleClickStage".into()),
			..Default::default()
		};
		assert_eq!(
			neighbor_binding(&options),
			Some(NeighborBinding {
				focus: InteractionKind::DoubleClickNode,
				unfocus: InteractionKind::DoubleClickStage,
			})
		);

		let unknown = RenderOptions {
			neighbor_event: Some("onClick".into()),
			neighbor_start: Some("tapNode".into()),
			..Default::default()
		};
		assert_eq!(neighbor_binding(&unknown), None);
	}

	#[test]
	fn test_forwarded_event() {
		let mut options = RenderOptions::default();
		assert_eq!(forwarded_event(&options), None);
		options.sigma_events = Some("clickNode".into());
		assert_eq!(forwarded_event(&options), Some(InteractionKind::ClickNode));
		options.sigma_events = Some("hoverNode".into());
		assert_eq!(forwarded_event(&options), Some(InteractionKind::OverNode));
		options.sigma_events = Some("dragNode".into());
		assert_eq!(forwarded_event(&options), None);
	}

	#[test]
	fn test_color_resolution() {
		use crate::components::network::graph::tests::{edge, node, path_graph};
		use crate::components::network::types::GraphPayload;

		let mut payload = path_graph();
		payload.nodes[0].color = None;
		payload.edges[0].color = None;
		payload.edges[1].color = None;
		let mut graph = Graph::new();
		graph.read(&payload).unwrap();

		let mut settings = Settings::default();
		let first = graph.node_at(0).unwrap();
		assert_eq!(settings.node_color(first), "#3182bd");
		// Edge a: 1 -> 2, uncolored.
		assert_eq!(settings.edge_color(graph.edge_at(0).unwrap(), &graph), "#3182bd");
		settings.edge_color_mode = EdgeColorMode::Target;
		assert_eq!(settings.edge_color(graph.edge_at(0).unwrap(), &graph), "#00ff00");
		settings.edge_color_mode = EdgeColorMode::Fixed;
		assert_eq!(settings.edge_color(graph.edge_at(1).unwrap(), &graph), "#636363");

		let mut colored = Graph::new();
		colored
			.read(&GraphPayload {
				nodes: vec![node("x", "#000001"), node("y", "#000002")],
				edges: vec![edge("e", "x", "y", "#abcdef")],
			})
			.unwrap();
		assert_eq!(settings.edge_color(colored.edge_at(0).unwrap(), &colored), "#abcdef");
	}

	#[test]
	fn test_edge_shape_prefers_record() {
		use crate::components::network::graph::tests::path_graph;

		let mut payload = path_graph();
		payload.edges[0].shape = Some("curve".into());
		payload.edges[1].shape = Some("bogus".into());
		let mut graph = Graph::new();
		graph.read(&payload).unwrap();

		let settings = Settings {
			default_edge_shape: EdgeShape::Arrow,
			..Default::default()
		};
		assert_eq!(settings.edge_shape(graph.edge_at(0).unwrap()), EdgeShape::Curve);
		assert_eq!(settings.edge_shape(graph.edge_at(1).unwrap()), EdgeShape::Arrow);
	}

	#[test]
	fn test_edge_shape_names() {
		assert_eq!("def".parse(), Ok(EdgeShape::Line));
		assert_eq!("arrow".parse(), Ok(EdgeShape::Arrow));
		assert!("curve".parse::<EdgeShape>().unwrap().is_curved());
		assert!("curvedArrow".parse::<EdgeShape>().unwrap().has_arrow());
		assert!(!EdgeShape::Curve.has_arrow());
	}
}
