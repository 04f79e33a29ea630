//! Neighbor highlighting.
//!
//! Focusing a node keeps it and its one-hop neighbors in their original
//! colors and mutes everything else. Unfocusing restores every element from
//! the colors captured at load time, so repeated cycles never drift.
//!
//! The color computation is a pure function of the graph and the focused id
//! ([`focus_colors`], [`restore_colors`]); [`NeighborHighlight`] adds the
//! Idle/Focused state on top and applies the result. Redrawing is left to the
//! caller.

use std::collections::HashSet;

use log::debug;

use super::graph::Graph;

/// Color given to everything outside the focused neighborhood.
pub const MUTED_COLOR: &str = "#eee";

/// A display color for every node and edge, in graph index order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColorAssignments {
	pub nodes: Vec<Option<String>>,
	pub edges: Vec<Option<String>>,
}

impl ColorAssignments {
	/// Write the assignments into the graph's display colors.
	pub fn apply(self, graph: &mut Graph) {
		for (node, color) in graph.nodes_mut().zip(self.nodes) {
			node.color = color;
		}
		for (edge, color) in graph.edges_mut().zip(self.edges) {
			edge.color = color;
		}
	}
}

/// The focused node plus every node adjacent to it.
pub fn neighborhood(graph: &Graph, focused: usize) -> HashSet<usize> {
	let mut keep: HashSet<usize> = graph.neighbors(focused).collect();
	keep.insert(focused);
	keep
}

/// Colors for focusing the node `focused`, or `None` if it is not loaded.
pub fn focus_colors(graph: &Graph, focused: &str, muted: &str) -> Option<ColorAssignments> {
	let idx = graph.index_of(focused)?;
	let keep = neighborhood(graph, idx);
	let muted = Some(muted.to_string());

	let nodes = graph
		.nodes()
		.enumerate()
		.map(|(i, n)| {
			if keep.contains(&i) {
				n.original_color.clone()
			} else {
				muted.clone()
			}
		})
		.collect();
	let edges = graph
		.edges()
		.map(|e| {
			if keep.contains(&e.source) && keep.contains(&e.target) {
				e.original_color.clone()
			} else {
				muted.clone()
			}
		})
		.collect();

	Some(ColorAssignments { nodes, edges })
}

/// Colors that put every element back to its load-time color.
pub fn restore_colors(graph: &Graph) -> ColorAssignments {
	ColorAssignments {
		nodes: graph.nodes().map(|n| n.original_color.clone()).collect(),
		edges: graph.edges().map(|e| e.original_color.clone()).collect(),
	}
}

/// Whether a node is currently spotlighted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum HighlightState {
	#[default]
	Idle,
	Focused(String),
}

/// Two-state spotlight controller.
#[derive(Clone, Debug)]
pub struct NeighborHighlight {
	state: HighlightState,
	muted: String,
}

impl Default for NeighborHighlight {
	fn default() -> Self {
		Self::new()
	}
}

impl NeighborHighlight {
	pub fn new() -> Self {
		Self::with_muted_color(MUTED_COLOR)
	}

	pub fn with_muted_color(muted: impl Into<String>) -> Self {
		Self {
			state: HighlightState::Idle,
			muted: muted.into(),
		}
	}

	pub fn state(&self) -> &HighlightState {
		&self.state
	}

	/// Idle/Focused -> Focused. Returns whether colors changed and a redraw
	/// is due. Unknown ids leave the graph and state untouched.
	pub fn focus(&mut self, graph: &mut Graph, id: &str) -> bool {
		let Some(colors) = focus_colors(graph, id, &self.muted) else {
			debug!("net-widget: focus on unknown node `{}` ignored", id);
			return false;
		};
		colors.apply(graph);
		self.state = HighlightState::Focused(id.to_string());
		true
	}

	/// Any state -> Idle, restoring every original color.
	pub fn unfocus(&mut self, graph: &mut Graph) -> bool {
		restore_colors(graph).apply(graph);
		self.state = HighlightState::Idle;
		true
	}

	/// Forget the focus without touching colors; used after a reload.
	pub fn reset(&mut self) {
		self.state = HighlightState::Idle;
	}
}


#[cfg(test)]
mod proptests {
	use std::collections::HashSet;

	use super::*;
	use crate::components::network::types::{EdgeRecord, GraphPayload, NodeRecord};
	use proptest::prelude::*;

	/// Up to 10 nodes, some uncolored, and up to 20 edges drawn from
	/// arbitrary endpoint pairs, so self-loops and repeated pairs show up.
	fn arb_graph() -> impl Strategy<Value = GraphPayload> {
		(1usize..10)
			.prop_flat_map(|n| {
				(
					prop::collection::vec(any::<bool>(), n),
					prop::collection::vec((0..n, 0..n, any::<bool>()), 0..20),
				)
			})
			.prop_map(|(colored, edges)| GraphPayload {
				nodes: colored
					.iter()
					.enumerate()
					.map(|(i, &c)| NodeRecord {
						id: format!("n{i}"),
						color: c.then(|| format!("#{:06x}", 0x100 + i)),
						size: 1.0,
						..Default::default()
					})
					.collect(),
				edges: edges
					.into_iter()
					.enumerate()
					.map(|(j, (s, t, c))| EdgeRecord {
						id: format!("e{j}"),
						source: format!("n{s}"),
						target: format!("n{t}"),
						color: c.then(|| format!("#{:06x}", 0x200 + j)),
						size: 1.0,
						shape: None,
					})
					.collect(),
			})
	}

	/// `focused` plus every id sharing an edge with it, read off the payload.
	fn expected_neighborhood(payload: &GraphPayload, focused: &str) -> HashSet<String> {
		let mut keep: HashSet<String> = HashSet::from([focused.to_string()]);
		for e in &payload.edges {
			if e.source == focused {
				keep.insert(e.target.clone());
			}
			if e.target == focused {
				keep.insert(e.source.clone());
			}
		}
		keep
	}

	fn snapshot(graph: &Graph) -> (Vec<Option<String>>, Vec<Option<String>>) {
		(
			graph.nodes().map(|n| n.color.clone()).collect(),
			graph.edges().map(|e| e.color.clone()).collect(),
		)
	}

	proptest! {
		#![proptest_config(ProptestConfig::with_cases(100))]

		#[test]
		fn prop_focus_colors_follow_neighborhood(payload in arb_graph()) {
			let mut graph = Graph::new();
			graph.read(&payload).unwrap();
			let mut hl = NeighborHighlight::new();
			let muted = Some(MUTED_COLOR.to_string());

			for focused in payload.nodes.iter().map(|n| n.id.as_str()) {
				prop_assert!(hl.focus(&mut graph, focused));
				let keep = expected_neighborhood(&payload, focused);

				for n in graph.nodes() {
					if keep.contains(&n.record.id) {
						prop_assert_eq!(&n.color, &n.original_color);
					} else {
						prop_assert_eq!(&n.color, &muted);
					}
				}
				for e in graph.edges() {
					if keep.contains(&e.record.source) && keep.contains(&e.record.target) {
						prop_assert_eq!(&e.color, &e.original_color);
					} else {
						prop_assert_eq!(&e.color, &muted);
					}
				}
			}
		}

		#[test]
		fn prop_unfocus_restores_and_is_idempotent(payload in arb_graph(), pick in any::<prop::sample::Index>()) {
			let mut graph = Graph::new();
			graph.read(&payload).unwrap();
			let loaded = snapshot(&graph);
			let mut hl = NeighborHighlight::new();

			let focused = &payload.nodes[pick.index(payload.nodes.len())].id;
			hl.focus(&mut graph, focused);
			hl.unfocus(&mut graph);
			let once = snapshot(&graph);
			prop_assert_eq!(&once, &loaded);

			hl.unfocus(&mut graph);
			prop_assert_eq!(snapshot(&graph), once);
			prop_assert_eq!(hl.state(), &HighlightState::Idle);
		}
	}
}
