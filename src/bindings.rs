//! JavaScript entry points for pages embedding the widget without leptos.

use std::rc::Rc;

use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use crate::components::network::{DomContainer, NetworkWidget, ShinyBus, WidgetPayload};
use crate::error::WidgetError;

fn to_js(err: WidgetError) -> JsValue {
	JsValue::from_str(&err.to_string())
}

/// A widget instance bound to one container element.
#[wasm_bindgen]
pub struct NetWidget {
	inner: NetworkWidget<DomContainer>,
}

#[wasm_bindgen]
impl NetWidget {
	/// Mount into the element with id `container_id`. Pages exposing a
	/// `Shiny` global get host mode.
	#[wasm_bindgen(constructor)]
	pub fn new(container_id: &str) -> Result<NetWidget, JsValue> {
		let container = DomContainer::by_id(container_id).map_err(to_js)?;
		let mut inner = NetworkWidget::initialize(container).map_err(to_js)?;
		if let Some(bus) = ShinyBus::detect() {
			inner = inner.with_host(Rc::new(bus));
		}
		Ok(Self { inner })
	}

	/// Render a `{ data, options }` object.
	pub fn render(&mut self, payload: JsValue) -> Result<(), JsValue> {
		let payload: WidgetPayload = serde_wasm_bindgen::from_value(payload)
			.map_err(|e| JsValue::from_str(&format!("invalid payload: {}", e)))?;
		self.inner.render(&payload).map_err(to_js)
	}

	pub fn resize(&self, width: f64, height: f64) {
		self.inner.resize(width, height);
	}

	/// Spotlight a node and its neighbors. Returns `false` for unknown ids.
	#[wasm_bindgen(js_name = focusNode)]
	pub fn focus_node(&self, id: &str) -> bool {
		self.inner.focus_node(id)
	}

	#[wasm_bindgen(js_name = clearFocus)]
	pub fn clear_focus(&self) {
		self.inner.clear_focus();
	}

	/// Node and edge counts, maximum degree and categories.
	pub fn summary(&self) -> Result<JsValue, JsValue> {
		self.inner
			.summary()
			.serialize(&Serializer::json_compatible())
			.map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
	}

	#[wasm_bindgen(js_name = nodeCount)]
	pub fn node_count(&self) -> usize {
		self.inner.summary().nodes
	}
}

/// Set up console logging and the panic hook from JavaScript.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging_js() {
	crate::init_logging();
}
