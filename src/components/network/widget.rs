//! The widget handle: turns host payloads into renderer calls.
//!
//! A [`NetworkWidget`] owns one renderer bound to one container. Each
//! [`render`](NetworkWidget::render) applies the options to the renderer's
//! settings, reloads the graph in full, wires neighbor highlighting the first
//! time it is asked for, and redraws. In host mode every render starts from a
//! cleared container and a freshly mounted renderer, since the host may push
//! payloads for an existing container at any time.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use super::graph::GraphSummary;
use super::highlight::{HighlightState, NeighborHighlight};
use super::host::{HostBus, publish_node};
use super::renderer::{Container, Renderer};
use super::settings::{NeighborBinding, apply_options, forwarded_event, neighbor_binding};
use super::types::{RenderOptions, WidgetPayload};
use crate::error::WidgetError;

/// Handle returned by [`NetworkWidget::initialize`].
pub struct NetworkWidget<C: Container> {
	container: C,
	renderer: C::Renderer,
	host: Option<Rc<dyn HostBus>>,
	highlight: Rc<RefCell<NeighborHighlight>>,
	highlight_bound: bool,
}

impl<C: Container> NetworkWidget<C> {
	/// Mount a renderer into `container`.
	pub fn initialize(container: C) -> Result<Self, WidgetError> {
		let renderer = container.mount()?;
		Ok(Self {
			container,
			renderer,
			host: None,
			highlight: Rc::new(RefCell::new(NeighborHighlight::new())),
			highlight_bound: false,
		})
	}

	/// Run inside a reactive host, publishing selections to `bus`.
	pub fn with_host(mut self, bus: Rc<dyn HostBus>) -> Self {
		self.host = Some(bus);
		self
	}

	pub fn is_host_mode(&self) -> bool {
		self.host.is_some()
	}

	/// The renderer currently drawing into the container.
	pub fn renderer(&self) -> &C::Renderer {
		&self.renderer
	}

	pub fn container(&self) -> &C {
		&self.container
	}

	/// Load `payload` and redraw. Graph errors come from the renderer as-is.
	pub fn render(&mut self, payload: &WidgetPayload) -> Result<(), WidgetError> {
		if self.host.is_some() {
			self.container.clear();
			self.renderer = self.container.mount()?;
			self.highlight_bound = false;
		}

		let binding = neighbor_binding(&payload.options);
		apply_options(
			&mut self.renderer.state().borrow_mut().settings,
			&payload.options,
		);
		self.renderer.read(&payload.data)?;
		if binding.is_some()
			&& let Some(shape) = &payload.options.edge_arrows
		{
			// Highlighting draws every edge with the `edgeArrows` shape.
			for edge in self.renderer.state().borrow_mut().graph.edges_mut() {
				edge.record.shape = Some(shape.clone());
			}
		}
		self.highlight.borrow_mut().reset();

		if !self.highlight_bound
			&& let Some(binding) = binding
		{
			self.bind_highlight(binding, &payload.options);
			self.highlight_bound = true;
		}

		self.renderer.refresh();
		info!(
			"net-widget: rendered {} nodes, {} edges",
			payload.data.nodes.len(),
			payload.data.edges.len()
		);
		Ok(())
	}

	/// Resize every drawing surface.
	pub fn resize(&self, width: f64, height: f64) {
		self.renderer.resize(width, height);
	}

	/// Spotlight `id` and its neighbors. Returns `false` for unknown ids.
	pub fn focus_node(&self, id: &str) -> bool {
		let changed = {
			let mut state = self.renderer.state().borrow_mut();
			self.highlight.borrow_mut().focus(&mut state.graph, id)
		};
		if changed {
			self.renderer.refresh();
		}
		changed
	}

	/// Restore all original colors.
	pub fn clear_focus(&self) {
		{
			let mut state = self.renderer.state().borrow_mut();
			self.highlight.borrow_mut().unfocus(&mut state.graph);
		}
		self.renderer.refresh();
	}

	pub fn highlight_state(&self) -> HighlightState {
		self.highlight.borrow().state().clone()
	}

	pub fn summary(&self) -> GraphSummary {
		self.renderer.state().borrow().graph.summary()
	}

	fn bind_highlight(&self, binding: NeighborBinding, options: &RenderOptions) {
		debug!(
			"net-widget: binding highlight to {} / {}",
			binding.focus, binding.unfocus
		);

		let highlight = self.highlight.clone();
		self.renderer.on_interaction(
			binding.focus,
			Box::new(move |event, graph| match event.node.as_deref() {
				Some(id) => highlight.borrow_mut().focus(graph, id),
				None => false,
			}),
		);

		let highlight = self.highlight.clone();
		self.renderer.on_interaction(
			binding.unfocus,
			Box::new(move |_, graph| highlight.borrow_mut().unfocus(graph)),
		);

		if let (Some(bus), Some(kind)) = (self.host.clone(), forwarded_event(options)) {
			self.renderer.on_interaction(
				kind,
				Box::new(move |event, graph| {
					if let Some(node) = event.node.as_deref().and_then(|id| graph.node(id)) {
						publish_node(bus.as_ref(), &node.record);
					}
					false
				}),
			);
		}
	}
}
