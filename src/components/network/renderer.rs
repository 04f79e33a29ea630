//! Renderer seam: shared renderer state, interaction subscriptions, and the
//! traits implemented by the canvas and headless backends.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use super::graph::Graph;
use super::settings::Settings;
use super::types::GraphPayload;
use crate::error::{RenderError, WidgetError};

/// Interaction events a renderer emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InteractionKind {
	OverNode,
	OutNode,
	ClickNode,
	DoubleClickNode,
	ClickStage,
	DoubleClickStage,
}

impl InteractionKind {
	pub fn as_str(self) -> &'static str {
		match self {
			InteractionKind::OverNode => "overNode",
			InteractionKind::OutNode => "outNode",
			InteractionKind::ClickNode => "clickNode",
			InteractionKind::DoubleClickNode => "doubleClickNode",
			InteractionKind::ClickStage => "clickStage",
			InteractionKind::DoubleClickStage => "doubleClickStage",
		}
	}
}

impl fmt::Display for InteractionKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Returned when an event name is not one the renderer emits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownInteraction(pub String);

impl fmt::Display for UnknownInteraction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "unknown interaction event `{}`", self.0)
	}
}

impl FromStr for InteractionKind {
	type Err = UnknownInteraction;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(match s {
			"overNode" => InteractionKind::OverNode,
			"outNode" => InteractionKind::OutNode,
			"clickNode" => InteractionKind::ClickNode,
			"doubleClickNode" => InteractionKind::DoubleClickNode,
			"clickStage" => InteractionKind::ClickStage,
			"doubleClickStage" => InteractionKind::DoubleClickStage,
			other => return Err(UnknownInteraction(other.to_string())),
		})
	}
}

/// A fired interaction. Node events carry the node id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionEvent {
	pub kind: InteractionKind,
	pub node: Option<String>,
}

impl InteractionEvent {
	pub fn node(kind: InteractionKind, id: impl Into<String>) -> Self {
		Self {
			kind,
			node: Some(id.into()),
		}
	}

	pub fn stage(kind: InteractionKind) -> Self {
		Self { kind, node: None }
	}
}

/// Handler signature. Receives the event and the loaded graph; returns
/// `true` when it changed something that needs a redraw.
pub type InteractionHandler = Box<dyn FnMut(&InteractionEvent, &mut Graph) -> bool>;

/// Opaque handle for removing a subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Registered interaction handlers, invoked in registration order.
#[derive(Default)]
pub struct Subscriptions {
	next_id: u64,
	handlers: Vec<(SubscriptionId, InteractionKind, InteractionHandler)>,
}

impl Subscriptions {
	pub fn subscribe(&mut self, kind: InteractionKind, handler: InteractionHandler) -> SubscriptionId {
		let id = SubscriptionId(self.next_id);
		self.next_id += 1;
		self.handlers.push((id, kind, handler));
		id
	}

	pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
		let before = self.handlers.len();
		self.handlers.retain(|(sid, _, _)| *sid != id);
		self.handlers.len() != before
	}

	pub fn len(&self) -> usize {
		self.handlers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.handlers.is_empty()
	}

	/// Run every handler bound to `event.kind`. Returns whether any asked
	/// for a redraw.
	pub fn dispatch(&mut self, event: &InteractionEvent, graph: &mut Graph) -> bool {
		let mut redraw = false;
		for (_, kind, handler) in &mut self.handlers {
			if *kind == event.kind {
				redraw |= handler(event, graph);
			}
		}
		redraw
	}
}

/// State every renderer backend shares with its event handlers.
#[derive(Default)]
pub struct RendererState {
	pub graph: Graph,
	pub settings: Settings,
	pub subscriptions: Subscriptions,
}

/// Single-threaded shared handle to [`RendererState`].
pub type SharedState = Rc<RefCell<RendererState>>;

/// Dispatch `event` against `state`, splitting the borrow between the
/// subscriptions and the graph they mutate.
pub fn dispatch(state: &SharedState, event: &InteractionEvent) -> bool {
	let mut guard = state.borrow_mut();
	let RendererState {
		graph,
		subscriptions,
		..
	} = &mut *guard;
	subscriptions.dispatch(event, graph)
}

/// A drawing backend bound to one container.
pub trait Renderer {
	/// Graph, settings and subscriptions.
	fn state(&self) -> &SharedState;

	/// Redraw every surface from the current state.
	fn refresh(&self);

	/// Resize every surface. Does not touch graph content.
	fn resize(&self, width: f64, height: f64);

	/// Current `(width, height)` of each surface.
	fn surfaces(&self) -> Vec<(f64, f64)>;

	/// Replace the loaded graph.
	fn read(&self, payload: &GraphPayload) -> Result<(), RenderError> {
		self.state().borrow_mut().graph.read(payload)
	}

	fn on_interaction(&self, kind: InteractionKind, handler: InteractionHandler) -> SubscriptionId {
		self.state().borrow_mut().subscriptions.subscribe(kind, handler)
	}

	fn off_interaction(&self, id: SubscriptionId) -> bool {
		self.state().borrow_mut().subscriptions.unsubscribe(id)
	}
}

/// The element a widget is bound to.
pub trait Container {
	type Renderer: Renderer;

	/// Remove every child surface.
	fn clear(&self);

	/// Construct a fresh renderer drawing into this container.
	fn mount(&self) -> Result<Self::Renderer, WidgetError>;
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::Cell;

	#[test]
	fn test_event_names_round_trip() {
		for kind in [
			InteractionKind::OverNode,
			InteractionKind::OutNode,
			InteractionKind::ClickNode,
			InteractionKind::DoubleClickNode,
			InteractionKind::ClickStage,
			InteractionKind::DoubleClickStage,
		] {
			assert_eq!(kind.as_str().parse::<InteractionKind>(), Ok(kind));
		}
		assert_eq!(
			"hoverNode".parse::<InteractionKind>(),
			Err(UnknownInteraction("hoverNode".into()))
		);
	}

	#[test]
	fn test_dispatch_only_matching_kind() {
		let hits = Rc::new(Cell::new(0));
		let mut subs = Subscriptions::default();
		let h = hits.clone();
		subs.subscribe(
			InteractionKind::ClickNode,
			Box::new(move |_, _| {
				h.set(h.get() + 1);
				true
			}),
		);

		let mut graph = Graph::new();
		assert!(!subs.dispatch(&InteractionEvent::stage(InteractionKind::ClickStage), &mut graph));
		assert!(subs.dispatch(
			&InteractionEvent::node(InteractionKind::ClickNode, "n"),
			&mut graph
		));
		assert_eq!(hits.get(), 1);
	}

	#[test]
	fn test_unsubscribe() {
		let mut subs = Subscriptions::default();
		let id = subs.subscribe(InteractionKind::OverNode, Box::new(|_, _| true));
		let other = subs.subscribe(InteractionKind::OutNode, Box::new(|_, _| false));
		assert_eq!(subs.len(), 2);

		assert!(subs.unsubscribe(id));
		assert!(!subs.unsubscribe(id));
		assert_eq!(subs.len(), 1);
		assert!(subs.unsubscribe(other));
		assert!(subs.is_empty());
	}

	#[test]
	fn test_redraw_if_any_handler_asks() {
		let mut subs = Subscriptions::default();
		subs.subscribe(InteractionKind::OutNode, Box::new(|_, _| false));
		subs.subscribe(InteractionKind::OutNode, Box::new(|_, _| true));
		let state: SharedState = Rc::new(RefCell::new(RendererState {
			subscriptions: subs,
			..Default::default()
		}));
		assert!(dispatch(
			&state,
			&InteractionEvent::node(InteractionKind::OutNode, "x")
		));
	}
}
