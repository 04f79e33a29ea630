//! Embeddable node-link diagram widget.
//!
//! Draws a graph handed over by a host page and spotlights a node together
//! with its direct neighbors on a configurable interaction:
//! - Full graph reload on every render call, with options applied first
//! - Neighbor highlighting on click or hover, or on custom interactions
//! - Forwarding of clicked or hovered nodes to a reactive host
//! - Canvas drawing with pan, wheel zoom and double-click zoom
//!
//! # Example
//!
//! ```ignore
//! use net_widget::{DomContainer, NetworkWidget, WidgetPayload};
//!
//! let payload = WidgetPayload::from_json(r##"{
//!     "data": {
//!         "nodes": [{ "id": "1", "x": 0, "y": 0 }, { "id": "2", "x": 1, "y": 1 }],
//!         "edges": [{ "id": "a", "source": "1", "target": "2" }]
//!     },
//!     "options": { "neighborEvent": "onClick" }
//! }"##)?;
//!
//! let mut widget = NetworkWidget::initialize(DomContainer::by_id("graph")?)?;
//! widget.render(&payload)?;
//! ```

pub mod canvas;
mod component;
mod draw;
pub mod graph;
pub mod headless;
pub mod highlight;
pub mod host;
pub mod renderer;
pub mod scale;
pub mod settings;
pub mod theme;
pub mod types;
pub mod widget;

pub use canvas::{CanvasRenderer, DomContainer};
pub use component::NetworkCanvas;
pub use graph::{Graph, GraphSummary};
pub use highlight::{HighlightState, NeighborHighlight};
pub use host::{HostBus, ShinyBus};
pub use renderer::{Container, InteractionEvent, InteractionKind, Renderer};
pub use types::{EdgeRecord, GraphPayload, NodeRecord, RenderOptions, WidgetPayload};
pub use widget::NetworkWidget;
