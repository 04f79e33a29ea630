//! DOM-free renderer backend.
//!
//! Keeps the same state and subscriptions as the canvas renderer but tracks
//! surfaces as plain dimensions and counts redraws instead of painting.
//! Interactions are injected with [`HeadlessRenderer::emit`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde_json::Value;

use super::host::HostBus;
use super::renderer::{Container, InteractionEvent, Renderer, RendererState, SharedState, dispatch};
use crate::error::WidgetError;

/// In-memory renderer.
pub struct HeadlessRenderer {
	state: SharedState,
	surfaces: RefCell<Vec<(f64, f64)>>,
	redraws: Cell<usize>,
}

impl HeadlessRenderer {
	/// Fire an interaction as if the user produced it, redrawing when a
	/// handler asks for it.
	pub fn emit(&self, event: InteractionEvent) {
		if dispatch(&self.state, &event) {
			self.refresh();
		}
	}

	/// Number of redraws so far.
	pub fn redraws(&self) -> usize {
		self.redraws.get()
	}
}

impl Renderer for HeadlessRenderer {
	fn state(&self) -> &SharedState {
		&self.state
	}

	fn refresh(&self) {
		self.redraws.set(self.redraws.get() + 1);
	}

	fn resize(&self, width: f64, height: f64) {
		for surface in self.surfaces.borrow_mut().iter_mut() {
			*surface = (width, height);
		}
	}

	fn surfaces(&self) -> Vec<(f64, f64)> {
		self.surfaces.borrow().clone()
	}
}

/// Stand-in container that counts attached surfaces.
#[derive(Clone)]
pub struct HeadlessContainer {
	width: f64,
	height: f64,
	layers: usize,
	attached: Rc<Cell<usize>>,
	mounts: Rc<Cell<usize>>,
}

impl HeadlessContainer {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			layers: 2,
			attached: Rc::new(Cell::new(0)),
			mounts: Rc::new(Cell::new(0)),
		}
	}

	/// Surfaces currently attached to the container.
	pub fn attached_surfaces(&self) -> usize {
		self.attached.get()
	}

	/// Renderers constructed for this container so far.
	pub fn mounts(&self) -> usize {
		self.mounts.get()
	}
}

impl Container for HeadlessContainer {
	type Renderer = HeadlessRenderer;

	fn clear(&self) {
		self.attached.set(0);
	}

	fn mount(&self) -> Result<HeadlessRenderer, WidgetError> {
		self.mounts.set(self.mounts.get() + 1);
		self.attached.set(self.attached.get() + self.layers);
		Ok(HeadlessRenderer {
			state: Rc::new(RefCell::new(RendererState::default())),
			surfaces: RefCell::new(vec![(self.width, self.height); self.layers]),
			redraws: Cell::new(0),
		})
	}
}

/// Host bus that records every publication.
#[derive(Default)]
pub struct RecordingBus {
	messages: RefCell<Vec<(String, Value)>>,
}

impl RecordingBus {
	pub fn messages(&self) -> Vec<(String, Value)> {
		self.messages.borrow().clone()
	}
}

impl HostBus for RecordingBus {
	fn publish(&self, channel: &str, value: &Value) {
		self.messages
			.borrow_mut()
			.push((channel.to_string(), value.clone()));
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::network::renderer::InteractionKind;

	#[test]
	fn test_resize_updates_every_surface() {
		let container = HeadlessContainer::new(100.0, 50.0);
		let renderer = container.mount().unwrap();
		assert_eq!(renderer.surfaces(), vec![(100.0, 50.0), (100.0, 50.0)]);

		renderer.resize(300.0, 200.0);
		renderer.resize(300.0, 200.0);
		assert_eq!(renderer.surfaces(), vec![(300.0, 200.0), (300.0, 200.0)]);
		assert!(renderer.state().borrow().graph.is_empty());
		assert_eq!(renderer.redraws(), 0);
	}

	#[test]
	fn test_clear_detaches_surfaces() {
		let container = HeadlessContainer::new(10.0, 10.0);
		let _first = container.mount().unwrap();
		assert_eq!(container.attached_surfaces(), 2);
		container.clear();
		let _second = container.mount().unwrap();
		assert_eq!(container.attached_surfaces(), 2);
		assert_eq!(container.mounts(), 2);
	}

	#[test]
	fn test_emit_redraws_only_when_asked() {
		let renderer = HeadlessContainer::new(10.0, 10.0).mount().unwrap();
		renderer.on_interaction(InteractionKind::ClickStage, Box::new(|_, _| true));
		renderer.on_interaction(InteractionKind::OverNode, Box::new(|_, _| false));

		renderer.emit(InteractionEvent::node(InteractionKind::OverNode, "a"));
		assert_eq!(renderer.redraws(), 0);
		renderer.emit(InteractionEvent::stage(InteractionKind::ClickStage));
		assert_eq!(renderer.redraws(), 1);
	}

	#[test]
	fn test_recording_bus() {
		let bus = RecordingBus::default();
		bus.publish("chan", &Value::from(1));
		assert_eq!(bus.messages(), vec![("chan".to_string(), Value::from(1))]);
	}
}
