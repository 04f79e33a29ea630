//! Error types for graph loading and widget operations.

use thiserror::Error;

/// Failures raised by the renderer while loading a graph.
///
/// The widget does not validate payloads itself; these come straight from
/// [`Graph::read`](crate::components::network::Graph::read) and are passed
/// through unchanged.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
	/// Two nodes in the payload share an id.
	#[error("node `{0}` already exists")]
	DuplicateNode(String),
	/// Two edges in the payload share an id.
	#[error("edge `{0}` already exists")]
	DuplicateEdge(String),
	/// An edge points at a source node that was never loaded.
	#[error("edge `{edge}`: source node `{node}` does not exist")]
	MissingSource { edge: String, node: String },
	/// An edge points at a target node that was never loaded.
	#[error("edge `{edge}`: target node `{node}` does not exist")]
	MissingTarget { edge: String, node: String },
}

/// Errors surfaced by the widget handle.
#[derive(Debug, Error)]
pub enum WidgetError {
	#[error(transparent)]
	Render(#[from] RenderError),
	#[error("invalid widget payload: {0}")]
	Payload(#[from] serde_json::Error),
	#[error("container element `{0}` not found")]
	ContainerNotFound(String),
	#[error("canvas 2d context unavailable")]
	CanvasContext,
	#[error("DOM operation failed: {0}")]
	Dom(String),
}

impl From<wasm_bindgen::JsValue> for WidgetError {
	fn from(value: wasm_bindgen::JsValue) -> Self {
		WidgetError::Dom(
			value
				.as_string()
				.unwrap_or_else(|| format!("{value:?}")),
		)
	}
}
