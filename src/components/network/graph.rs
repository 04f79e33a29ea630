//! Renderer-side graph storage.
//!
//! Holds the loaded nodes and edges in a petgraph [`DiGraph`] together with
//! their current display colors and the original colors captured at load
//! time. Node ids map to [`NodeIndex`]es; the one-hop neighbor lookup used by
//! the highlight controller walks the graph in both directions.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::Direction;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use serde::Serialize;

use super::types::{EdgeRecord, GraphPayload, NodeRecord};
use crate::error::RenderError;

/// A loaded node.
#[derive(Clone, Debug)]
pub struct Node {
	pub record: NodeRecord,
	/// Color currently drawn. `None` means the `defaultNodeColor` setting.
	pub color: Option<String>,
	/// Color at load time; restoration target after highlighting.
	pub original_color: Option<String>,
}

/// A loaded edge with resolved endpoint indices.
#[derive(Clone, Debug)]
pub struct Edge {
	pub record: EdgeRecord,
	pub source: usize,
	pub target: usize,
	/// Color currently drawn. `None` means resolve through the edge color mode.
	pub color: Option<String>,
	pub original_color: Option<String>,
}

/// Degree and category overview of the loaded graph.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
	pub nodes: usize,
	pub edges: usize,
	pub max_degree: usize,
	/// Distinct node categories, sorted.
	pub categories: Vec<String>,
}

/// Directed graph of loaded nodes and edges, indexed by node id.
///
/// Nodes and edges are never removed individually, so their petgraph indices
/// stay dense and match payload order.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	inner: DiGraph<Node, Edge>,
	node_map: HashMap<String, NodeIndex>,
}

impl Graph {
	pub fn new() -> Self {
		Self::default()
	}

	/// Replace the current graph with `payload`.
	///
	/// Either the whole payload loads or the previous graph is left in place.
	pub fn read(&mut self, payload: &GraphPayload) -> Result<(), RenderError> {
		let mut inner = DiGraph::with_capacity(payload.nodes.len(), payload.edges.len());
		let mut node_map = HashMap::with_capacity(payload.nodes.len());

		for record in &payload.nodes {
			if node_map.contains_key(&record.id) {
				return Err(RenderError::DuplicateNode(record.id.clone()));
			}
			let idx = inner.add_node(Node {
				record: record.clone(),
				color: record.color.clone(),
				original_color: record.color.clone(),
			});
			node_map.insert(record.id.clone(), idx);
		}

		let mut edge_ids = HashSet::with_capacity(payload.edges.len());
		for record in &payload.edges {
			if !edge_ids.insert(record.id.as_str()) {
				return Err(RenderError::DuplicateEdge(record.id.clone()));
			}
			let source = *node_map.get(&record.source).ok_or_else(|| {
				RenderError::MissingSource {
					edge: record.id.clone(),
					node: record.source.clone(),
				}
			})?;
			let target = *node_map.get(&record.target).ok_or_else(|| {
				RenderError::MissingTarget {
					edge: record.id.clone(),
					node: record.target.clone(),
				}
			})?;

			inner.add_edge(
				source,
				target,
				Edge {
					record: record.clone(),
					source: source.index(),
					target: target.index(),
					color: record.color.clone(),
					original_color: record.color.clone(),
				},
			);
		}

		self.inner = inner;
		self.node_map = node_map;
		Ok(())
	}

	pub fn node_count(&self) -> usize {
		self.inner.node_count()
	}

	pub fn edge_count(&self) -> usize {
		self.inner.edge_count()
	}

	/// Nodes in payload order.
	pub fn nodes(&self) -> impl ExactSizeIterator<Item = &Node> + '_ {
		self.inner.raw_nodes().iter().map(|n| &n.weight)
	}

	/// Edges in payload order.
	pub fn edges(&self) -> impl ExactSizeIterator<Item = &Edge> + '_ {
		self.inner.raw_edges().iter().map(|e| &e.weight)
	}

	pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> + '_ {
		self.inner.node_weights_mut()
	}

	pub fn edges_mut(&mut self) -> impl Iterator<Item = &mut Edge> + '_ {
		self.inner.edge_weights_mut()
	}

	/// Node at position `idx` in payload order.
	pub fn node_at(&self, idx: usize) -> Option<&Node> {
		self.inner.node_weight(NodeIndex::new(idx))
	}

	/// Edge at position `idx` in payload order.
	pub fn edge_at(&self, idx: usize) -> Option<&Edge> {
		self.inner.edge_weight(EdgeIndex::new(idx))
	}

	pub fn is_empty(&self) -> bool {
		self.inner.node_count() == 0
	}

	/// Index of the node with the given id.
	pub fn index_of(&self, id: &str) -> Option<usize> {
		self.node_map.get(id).map(|idx| idx.index())
	}

	pub fn node(&self, id: &str) -> Option<&Node> {
		self.node_map
			.get(id)
			.and_then(|&idx| self.inner.node_weight(idx))
	}

	/// Nodes sharing at least one edge with `idx`, in either direction,
	/// ascending and without repeats. Self-loops list the node itself.
	pub fn neighbors(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
		let unique: BTreeSet<usize> = self
			.inner
			.neighbors_undirected(NodeIndex::new(idx))
			.map(|n| n.index())
			.collect();
		unique.into_iter()
	}

	/// Number of incident edges (self-loops count twice).
	pub fn degree(&self, idx: usize) -> usize {
		let node = NodeIndex::new(idx);
		self.inner.edges_directed(node, Direction::Outgoing).count()
			+ self.inner.edges_directed(node, Direction::Incoming).count()
	}

	pub fn summary(&self) -> GraphSummary {
		let categories: BTreeSet<&str> = self
			.nodes()
			.filter_map(|n| n.record.category.as_deref())
			.collect();

		GraphSummary {
			nodes: self.node_count(),
			edges: self.edge_count(),
			max_degree: self
				.inner
				.node_indices()
				.map(|idx| self.degree(idx.index()))
				.max()
				.unwrap_or(0),
			categories: categories.into_iter().map(str::to_string).collect(),
		}
	}
}
