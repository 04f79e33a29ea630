//! net-widget: embeddable node-link graph widget with neighbor highlighting.
//!
//! This crate provides a WASM-based network diagram that a host page feeds
//! with nodes, edges and options. Clicking or hovering a node can spotlight
//! it together with its direct neighbors, and inside a reactive host the
//! selected node is forwarded back to the server.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod bindings;
pub mod components;
pub mod error;

pub use components::network::{
	DomContainer, EdgeRecord, GraphPayload, NetworkCanvas, NetworkWidget, NodeRecord,
	RenderOptions, WidgetPayload,
};
pub use error::{RenderError, WidgetError};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("net-widget: logging initialized");
}

/// Load the widget payload from a script element with id="widget-data".
/// Expected format: JSON with { data: { nodes: [...], edges: [...] }, options: {...} }
fn load_payload() -> Option<WidgetPayload> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("widget-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match WidgetPayload::from_json(&json_text) {
		Ok(payload) => {
			info!(
				"net-widget: loaded {} nodes, {} edges",
				payload.data.nodes.len(),
				payload.data.edges.len()
			);
			Some(payload)
		}
		Err(e) => {
			warn!("net-widget: failed to parse widget data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads the payload from the DOM and renders the network widget.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let payload = load_payload().unwrap_or_default();
	let payload_signal = Signal::derive(move || payload.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Network" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<NetworkCanvas payload=payload_signal fullscreen=true />
			<div class="graph-overlay">
				<p class="subtitle">"Click a node to highlight its neighbors. Scroll to zoom. Drag background to pan."</p>
			</div>
		</div>
	}
}
