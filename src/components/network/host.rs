//! One-way notifications from the widget to its host application.

use js_sys::{Function, Reflect};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::{JsCast, JsValue};

use super::types::NodeRecord;

/// Channel carrying the last selected node.
pub const NODE_DATA_CHANNEL: &str = "node_data";

/// Publish side of the host's event bus. Fire-and-forget.
pub trait HostBus {
	fn publish(&self, channel: &str, value: &Value);
}

/// Forward a node's full record to the host on [`NODE_DATA_CHANNEL`].
pub fn publish_node(bus: &dyn HostBus, node: &NodeRecord) {
	match serde_json::to_value(node) {
		Ok(value) => bus.publish(NODE_DATA_CHANNEL, &value),
		Err(e) => warn!("net-widget: cannot serialize node `{}`: {}", node.id, e),
	}
}

/// Publishes through a Shiny-style `window.Shiny.onInputChange(name, value)`.
pub struct ShinyBus {
	shiny: JsValue,
}

impl ShinyBus {
	/// Returns a bus when the page exposes a `Shiny` global, i.e. when the
	/// widget is running inside a reactive host.
	pub fn detect() -> Option<Self> {
		let window = web_sys::window()?;
		let shiny = Reflect::get(&window, &JsValue::from_str("Shiny")).ok()?;
		if shiny.is_undefined() || shiny.is_null() {
			return None;
		}
		debug!("net-widget: host bus detected");
		Some(Self { shiny })
	}

	fn try_publish(&self, channel: &str, value: &Value) -> Result<(), JsValue> {
		// Plain objects rather than `Map`s, so the host can serialize them.
		let payload = value.serialize(&Serializer::json_compatible())?;
		let on_input_change: Function =
			Reflect::get(&self.shiny, &JsValue::from_str("onInputChange"))?.dyn_into()?;
		on_input_change.call2(&self.shiny, &JsValue::from_str(channel), &payload)?;
		Ok(())
	}
}

impl HostBus for ShinyBus {
	fn publish(&self, channel: &str, value: &Value) {
		if let Err(e) = self.try_publish(channel, value) {
			warn!("net-widget: publish to `{}` failed: {:?}", channel, e);
		}
	}
}
