//! HTML canvas renderer.
//!
//! Mounts two stacked canvases (scene and overlay) into a container element
//! and turns mouse input into interaction events. Dragging the background
//! pans; the wheel and double clicks zoom when the corresponding settings
//! allow it. Handlers run synchronously on the event that fired them.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, HtmlElement, MouseEvent,
	WheelEvent,
};

use super::draw::{Frame, ViewTransform, draw_overlay, draw_scene};
use super::renderer::{
	Container, InteractionEvent, InteractionKind, Renderer, RendererState, SharedState, dispatch,
};
use super::types::GraphPayload;
use crate::error::{RenderError, WidgetError};

/// Pointer travel (pixels) after which a press becomes a pan, not a click.
const DRAG_THRESHOLD: f64 = 3.0;

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
struct PanState {
	active: bool,
	moved: bool,
	start_x: f64,
	start_y: f64,
	transform_start_x: f64,
	transform_start_y: f64,
}

/// Surfaces plus view and pointer state.
struct Stage {
	scene: HtmlCanvasElement,
	scene_ctx: CanvasRenderingContext2d,
	overlay: HtmlCanvasElement,
	overlay_ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
	view: ViewTransform,
	pan: PanState,
	hovered: Option<usize>,
}

impl Stage {
	fn draw(&self, state: &RendererState) {
		let frame = Frame::new(state, self.width, self.height, &self.view);
		draw_scene(
			&self.scene_ctx,
			state,
			&frame,
			&self.view,
			self.width,
			self.height,
		);
		draw_overlay(
			&self.overlay_ctx,
			state,
			&frame,
			&self.view,
			self.hovered,
			self.width,
			self.height,
		);
	}

	fn set_size(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		for canvas in [&self.scene, &self.overlay] {
			canvas.set_width(width as u32);
			canvas.set_height(height as u32);
		}
	}

	fn pointer(&self, ev: &MouseEvent) -> (f64, f64) {
		let rect = self.overlay.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	}

	fn node_at(&self, state: &RendererState, x: f64, y: f64) -> Option<usize> {
		Frame::new(state, self.width, self.height, &self.view).node_at(&self.view, x, y)
	}

	/// Move the hover to `hit`, returning the out/over events this causes.
	fn hover(&mut self, state: &RendererState, hit: Option<usize>) -> Vec<InteractionEvent> {
		if hit == self.hovered {
			return Vec::new();
		}
		let mut events = Vec::new();
		if let Some(id) = self.hovered.and_then(|idx| node_id(state, idx)) {
			events.push(InteractionEvent::node(InteractionKind::OutNode, id));
		}
		if let Some(id) = hit.and_then(|idx| node_id(state, idx)) {
			events.push(InteractionEvent::node(InteractionKind::OverNode, id));
		}
		self.hovered = hit;
		events
	}
}

fn node_id(state: &RendererState, idx: usize) -> Option<String> {
	state.graph.node_at(idx).map(|n| n.record.id.clone())
}

fn node_event(
	state: &RendererState,
	hit: Option<usize>,
	on_node: InteractionKind,
	on_stage: InteractionKind,
) -> InteractionEvent {
	match hit.and_then(|idx| node_id(state, idx)) {
		Some(id) => InteractionEvent::node(on_node, id),
		None => InteractionEvent::stage(on_stage),
	}
}

fn fire(state: &SharedState, events: &[InteractionEvent]) {
	for event in events {
		debug!("net-widget: {} {:?}", event.kind, event.node);
		dispatch(state, event);
	}
}

fn redraw(state: &SharedState, stage: &Rc<RefCell<Stage>>) {
	stage.borrow().draw(&state.borrow());
}

type Listener = (&'static str, Closure<dyn FnMut(MouseEvent)>);

/// Renderer drawing onto canvases inside a DOM element.
pub struct CanvasRenderer {
	state: SharedState,
	stage: Rc<RefCell<Stage>>,
	listeners: Vec<Listener>,
}

impl CanvasRenderer {
	/// Append the scene and overlay canvases to `container` and start
	/// listening for mouse input.
	pub fn new(container: &Element) -> Result<Self, WidgetError> {
		let document = container
			.owner_document()
			.ok_or_else(|| WidgetError::Dom("container is not attached to a document".into()))?;
		let (width, height) = container_size(container);
		if let Some(el) = container.dyn_ref::<HtmlElement>() {
			el.style().set_property("position", "relative")?;
		}

		let (scene, scene_ctx) = create_surface(&document, container, "scene", width, height)?;
		let (overlay, overlay_ctx) =
			create_surface(&document, container, "overlay", width, height)?;

		let mut renderer = Self {
			state: Rc::new(RefCell::new(RendererState::default())),
			stage: Rc::new(RefCell::new(Stage {
				scene,
				scene_ctx,
				overlay,
				overlay_ctx,
				width,
				height,
				view: ViewTransform::default(),
				pan: PanState::default(),
				hovered: None,
			})),
			listeners: Vec::new(),
		};
		renderer.attach_listeners()?;
		debug!("net-widget: canvas renderer mounted at {}x{}", width, height);
		Ok(renderer)
	}

	fn listen(
		&mut self,
		name: &'static str,
		handler: impl FnMut(MouseEvent) + 'static,
	) -> Result<(), WidgetError> {
		let closure = Closure::<dyn FnMut(MouseEvent)>::new(handler);
		self.stage
			.borrow()
			.overlay
			.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
		self.listeners.push((name, closure));
		Ok(())
	}

	fn attach_listeners(&mut self) -> Result<(), WidgetError> {
		let (state, stage) = (self.state.clone(), self.stage.clone());
		self.listen("mousedown", move |ev| {
			let mut st = stage.borrow_mut();
			let (x, y) = st.pointer(&ev);
			st.pan = PanState {
				active: true,
				moved: false,
				start_x: x,
				start_y: y,
				transform_start_x: st.view.x,
				transform_start_y: st.view.y,
			};
		})?;

		let stage_mm = self.stage.clone();
		let state_mm = state.clone();
		self.listen("mousemove", move |ev| {
			let (events, panned) = {
				let mut st = stage_mm.borrow_mut();
				let (x, y) = st.pointer(&ev);
				if st.pan.active {
					let (dx, dy) = (x - st.pan.start_x, y - st.pan.start_y);
					if dx.abs() + dy.abs() > DRAG_THRESHOLD {
						st.pan.moved = true;
					}
					if st.pan.moved {
						st.view.x = st.pan.transform_start_x + dx;
						st.view.y = st.pan.transform_start_y + dy;
					}
					(Vec::new(), st.pan.moved)
				} else {
					let current = state_mm.borrow();
					let hit = st.node_at(&current, x, y);
					(st.hover(&current, hit), false)
				}
			};
			fire(&state_mm, &events);
			if panned || !events.is_empty() {
				redraw(&state_mm, &stage_mm);
			}
		})?;

		let stage_mu = self.stage.clone();
		self.listen("mouseup", move |_| {
			stage_mu.borrow_mut().pan.active = false;
		})?;

		let (stage_cl, state_cl) = (self.stage.clone(), state.clone());
		self.listen("click", move |ev| {
			let event = {
				let mut st = stage_cl.borrow_mut();
				if std::mem::take(&mut st.pan.moved) {
					return;
				}
				let (x, y) = st.pointer(&ev);
				let current = state_cl.borrow();
				node_event(
					&current,
					st.node_at(&current, x, y),
					InteractionKind::ClickNode,
					InteractionKind::ClickStage,
				)
			};
			fire(&state_cl, &[event]);
			redraw(&state_cl, &stage_cl);
		})?;

		let (stage_dc, state_dc) = (self.stage.clone(), state.clone());
		self.listen("dblclick", move |ev| {
			ev.prevent_default();
			let (event, x, y) = {
				let st = stage_dc.borrow();
				let (x, y) = st.pointer(&ev);
				let current = state_dc.borrow();
				let event = node_event(
					&current,
					st.node_at(&current, x, y),
					InteractionKind::DoubleClickNode,
					InteractionKind::DoubleClickStage,
				);
				(event, x, y)
			};
			fire(&state_dc, &[event]);
			{
				let current = state_dc.borrow();
				let settings = &current.settings;
				if settings.double_click_enabled {
					stage_dc.borrow_mut().view.zoom_at(
						x,
						y,
						settings.double_click_zoom_ratio,
						settings.min_zoom,
						settings.max_zoom,
					);
				}
			}
			redraw(&state_dc, &stage_dc);
		})?;

		let (stage_wh, state_wh) = (self.stage.clone(), state.clone());
		self.listen("wheel", move |ev| {
			{
				let current = state_wh.borrow();
				let settings = &current.settings;
				if !settings.mouse_wheel_enabled {
					return;
				}
				ev.prevent_default();
				let delta = ev
					.dyn_ref::<WheelEvent>()
					.map(|w| w.delta_y())
					.unwrap_or(0.0);
				let factor = if delta > 0.0 {
					1.0 / settings.wheel_zoom_ratio
				} else {
					settings.wheel_zoom_ratio
				};
				let mut st = stage_wh.borrow_mut();
				let (x, y) = st.pointer(&ev);
				st.view
					.zoom_at(x, y, factor, settings.min_zoom, settings.max_zoom);
			}
			redraw(&state_wh, &stage_wh);
		})?;

		let (stage_ml, state_ml) = (self.stage.clone(), state);
		self.listen("mouseleave", move |_| {
			let events = {
				let mut st = stage_ml.borrow_mut();
				st.pan.active = false;
				st.hover(&state_ml.borrow(), None)
			};
			fire(&state_ml, &events);
			redraw(&state_ml, &stage_ml);
		})?;

		Ok(())
	}
}

impl Renderer for CanvasRenderer {
	fn state(&self) -> &SharedState {
		&self.state
	}

	fn refresh(&self) {
		redraw(&self.state, &self.stage);
	}

	fn resize(&self, width: f64, height: f64) {
		self.stage.borrow_mut().set_size(width, height);
		// Resizing a canvas wipes it.
		self.refresh();
	}

	fn surfaces(&self) -> Vec<(f64, f64)> {
		let st = self.stage.borrow();
		[&st.scene, &st.overlay]
			.iter()
			.map(|c| (c.width() as f64, c.height() as f64))
			.collect()
	}

	fn read(&self, payload: &GraphPayload) -> Result<(), RenderError> {
		self.state.borrow_mut().graph.read(payload)?;
		self.stage.borrow_mut().hovered = None;
		Ok(())
	}
}

impl Drop for CanvasRenderer {
	fn drop(&mut self) {
		let st = self.stage.borrow();
		for (name, closure) in &self.listeners {
			let _ = st
				.overlay
				.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
		}
	}
}

fn container_size(container: &Element) -> (f64, f64) {
	let (w, h) = (container.client_width(), container.client_height());
	(
		if w > 0 { w as f64 } else { 800.0 },
		if h > 0 { h as f64 } else { 600.0 },
	)
}

fn create_surface(
	document: &Document,
	container: &Element,
	layer: &str,
	width: f64,
	height: f64,
) -> Result<(HtmlCanvasElement, CanvasRenderingContext2d), WidgetError> {
	let canvas: HtmlCanvasElement = document
		.create_element("canvas")?
		.dyn_into()
		.map_err(|_| WidgetError::Dom("created element is not a canvas".into()))?;
	canvas.set_class_name(&format!("net-widget-{layer}"));
	canvas.set_width(width as u32);
	canvas.set_height(height as u32);
	let style = canvas.style();
	style.set_property("position", "absolute")?;
	style.set_property("top", "0")?;
	style.set_property("left", "0")?;
	container.append_child(&canvas)?;

	let ctx = canvas
		.get_context("2d")?
		.ok_or(WidgetError::CanvasContext)?
		.dyn_into::<CanvasRenderingContext2d>()
		.map_err(|_| WidgetError::CanvasContext)?;
	Ok((canvas, ctx))
}

/// A DOM element hosting canvas surfaces.
#[derive(Clone)]
pub struct DomContainer {
	element: Element,
}

impl DomContainer {
	pub fn new(element: Element) -> Self {
		Self { element }
	}

	/// Look up the container by element id.
	pub fn by_id(id: &str) -> Result<Self, WidgetError> {
		let document = web_sys::window()
			.and_then(|w| w.document())
			.ok_or_else(|| WidgetError::Dom("no document available".into()))?;
		document
			.get_element_by_id(id)
			.map(Self::new)
			.ok_or_else(|| WidgetError::ContainerNotFound(id.to_string()))
	}

	pub fn element(&self) -> &Element {
		&self.element
	}
}

impl Container for DomContainer {
	type Renderer = CanvasRenderer;

	fn clear(&self) {
		while let Some(child) = self.element.first_child() {
			if self.element.remove_child(&child).is_err() {
				break;
			}
		}
	}

	fn mount(&self) -> Result<CanvasRenderer, WidgetError> {
		CanvasRenderer::new(&self.element)
	}
}
