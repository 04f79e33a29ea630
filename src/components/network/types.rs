//! Payload structures sent by the host on every render call.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Accepts ids written either as JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
	D: Deserializer<'de>,
{
	#[derive(Deserialize)]
	#[serde(untagged)]
	enum RawId {
		Text(String),
		Int(i64),
		Float(f64),
	}

	Ok(match RawId::deserialize(deserializer)? {
		RawId::Text(s) => s,
		RawId::Int(i) => i.to_string(),
		RawId::Float(f) => f.to_string(),
	})
}

fn default_size() -> f64 {
	1.0
}

/// A node as delivered by the host.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct NodeRecord {
	/// Unique identifier. Edges reference nodes by this id.
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	/// Optional display label.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	#[serde(default)]
	pub x: f64,
	#[serde(default)]
	pub y: f64,
	/// Raw size, rescaled into `[minNodeSize, maxNodeSize]` when drawn.
	#[serde(default = "default_size")]
	pub size: f64,
	/// CSS color. Falls back to the `defaultNodeColor` setting when absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	/// Optional grouping used by [`GraphSummary`](super::GraphSummary).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	/// Everything else the host attached to the node.
	#[serde(flatten)]
	pub attributes: Map<String, Value>,
}

/// An edge as delivered by the host.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct EdgeRecord {
	#[serde(deserialize_with = "string_or_number")]
	pub id: String,
	/// Source node id.
	#[serde(deserialize_with = "string_or_number")]
	pub source: String,
	/// Target node id.
	#[serde(deserialize_with = "string_or_number")]
	pub target: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color: Option<String>,
	#[serde(default = "default_size")]
	pub size: f64,
	/// Per-edge shape override (`def`, `arrow`, `curve`, `curvedArrow`).
	#[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
	pub shape: Option<String>,
}

/// Complete graph data: nodes and edges.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct GraphPayload {
	#[serde(default)]
	pub nodes: Vec<NodeRecord>,
	#[serde(default)]
	pub edges: Vec<EdgeRecord>,
}

/// Flat option object accompanying each payload.
///
/// Every field is optional; anything absent falls back to the renderer's
/// built-in default on each render.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
	pub min_node_size: Option<f64>,
	pub max_node_size: Option<f64>,
	pub min_edge_size: Option<f64>,
	pub max_edge_size: Option<f64>,
	pub node_color: Option<String>,
	pub edge_color: Option<String>,
	pub edge_arrows: Option<String>,
	pub double_click_zoom: Option<bool>,
	pub mouse_wheel_zoom: Option<bool>,
	pub label_threshold: Option<f64>,
	/// `None`, `onClick` or `onHover`.
	pub neighbor_event: Option<String>,
	/// Interaction that focuses a node, e.g. `clickNode`.
	pub neighbor_start: Option<String>,
	/// Interaction that clears the focus, e.g. `clickStage`.
	pub neighbor_end: Option<String>,
	/// Interaction forwarded to the host: `clickNode` or `hoverNode`.
	pub sigma_events: Option<String>,
}

/// What the host sends on each render: `{ data, options }`.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct WidgetPayload {
	pub data: GraphPayload,
	#[serde(default)]
	pub options: RenderOptions,
}

impl WidgetPayload {
	/// Parse a payload from its JSON text.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_numeric_ids_become_strings() {
		let payload = WidgetPayload::from_json(
			r#"{"data":{"nodes":[{"id":1,"x":0,"y":0},{"id":"2","x":1,"y":1}],
			"edges":[{"id":0,"source":1,"target":"2"}]}}"#,
		)
		.unwrap();
		assert_eq!(payload.data.nodes[0].id, "1");
		assert_eq!(payload.data.nodes[1].id, "2");
		assert_eq!(payload.data.edges[0].id, "0");
		assert_eq!(payload.data.edges[0].source, "1");
	}

	#[test]
	fn test_extra_node_fields_land_in_attributes() {
		let payload = WidgetPayload::from_json(
			r#"{"data":{"nodes":[{"id":"a","category":"g1","degree":4,"community":"x"}],"edges":[]}}"#,
		)
		.unwrap();
		let node = &payload.data.nodes[0];
		assert_eq!(node.category.as_deref(), Some("g1"));
		assert_eq!(node.size, 1.0);
		assert_eq!(node.attributes.get("degree"), Some(&Value::from(4)));
		assert_eq!(node.attributes.get("community"), Some(&Value::from("x")));
		assert!(!node.attributes.contains_key("category"));
	}

	#[test]
	fn test_options_use_camel_case_and_ignore_unknown() {
		let payload = WidgetPayload::from_json(
			r##"{"data":{"nodes":[],"edges":[]},
			"options":{"minNodeSize":2,"nodeColor":"#ff0000","neighborEvent":"onClick",
			"doubleClickZoom":false,"somethingElse":true,"sigmaEvents":null}}"##,
		)
		.unwrap();
		let opts = payload.options;
		assert_eq!(opts.min_node_size, Some(2.0));
		assert_eq!(opts.node_color.as_deref(), Some("#ff0000"));
		assert_eq!(opts.neighbor_event.as_deref(), Some("onClick"));
		assert_eq!(opts.double_click_zoom, Some(false));
		assert_eq!(opts.sigma_events, None);
		assert_eq!(opts.max_node_size, None);
	}

	#[test]
	fn test_missing_options_default() {
		let payload = WidgetPayload::from_json(r#"{"data":{}}"#).unwrap();
		assert!(payload.data.nodes.is_empty());
		assert_eq!(payload.options, RenderOptions::default());
	}

	#[test]
	fn test_edge_type_maps_to_shape() {
		let payload = WidgetPayload::from_json(
			r#"{"data":{"edges":[{"id":"e","source":"a","target":"b","type":"arrow","size":3}]}}"#,
		)
		.unwrap();
		assert_eq!(payload.data.edges[0].shape.as_deref(), Some("arrow"));
		assert_eq!(payload.data.edges[0].size, 3.0);
	}
}
