//! Layout bridge between the graph model and a force simulation.
//!
//! The bridge keeps the simulation's node and link sets equal to the
//! graph's vertices and complete edges, and turns simulation steps into
//! [`Frame`]s for the renderer. It only ever reads the graph.

mod force;

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::model::{EdgeId, Graph, VertexId};
use crate::protocol::Instruction;

pub use force::ForceSimulation;

/// Physics backend driven by the [`LayoutBridge`].
///
/// Implementations own node positions and velocities. New nodes get a
/// position chosen by the simulation.
pub trait Simulation {
	/// Bind a vertex. The simulation picks its starting position.
	fn insert_node(&mut self, vertex: VertexId);
	/// Unbind a vertex and any link touching it.
	fn remove_node(&mut self, vertex: VertexId);
	/// Bind a link between two bound vertices.
	fn insert_link(&mut self, edge: EdgeId, source: VertexId, target: VertexId);
	/// Unbind a link.
	fn remove_link(&mut self, edge: EdgeId);
	/// Advance the simulation by `dt` seconds.
	fn step(&mut self, dt: f32);
	/// Current position of a bound vertex.
	fn position(&self, vertex: VertexId) -> Option<(f64, f64)>;
	/// Place a node by hand. Anchored nodes stop moving under the forces.
	fn move_node(&mut self, vertex: VertexId, x: f64, y: f64, anchored: bool);
	/// Area new nodes are placed in.
	fn set_bounds(&mut self, width: f64, height: f64);
	/// Resume iterating after a pause or bounds change.
	fn restart(&mut self);
}

/// Position of one vertex in a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VertexPosition {
	/// The vertex.
	pub vertex: VertexId,
	/// Horizontal position.
	pub x: f64,
	/// Vertical position.
	pub y: f64,
}

/// End coordinates of one complete edge in a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgePosition {
	/// The edge.
	pub edge: EdgeId,
	/// Position of the from-vertex.
	pub source: (f64, f64),
	/// Position of the to-vertex.
	pub target: (f64, f64),
}

/// Everything the renderer needs to place primitives for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Frame {
	/// Bound vertices, in graph order.
	pub vertices: Vec<VertexPosition>,
	/// Bound edges, in graph order.
	pub edges: Vec<EdgePosition>,
}

/// Keeps a [`Simulation`] bound to a [`Graph`].
pub struct LayoutBridge<S: Simulation> {
	simulation: S,
	nodes: HashSet<VertexId>,
	links: HashMap<EdgeId, (VertexId, VertexId)>,
	width: f64,
	height: f64,
}

impl<S: Simulation> LayoutBridge<S> {
	/// Wrap a simulation and hand it the initial bounds.
	pub fn new(mut simulation: S, width: f64, height: f64) -> Self {
		simulation.set_bounds(width, height);
		Self {
			simulation,
			nodes: HashSet::new(),
			links: HashMap::new(),
			width,
			height,
		}
	}

	/// The wrapped simulation.
	pub fn simulation(&self) -> &S {
		&self.simulation
	}

	/// Current `(width, height)`.
	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Re-bind the simulation to the graph's current vertices and complete edges.
	///
	/// Bound nodes keep their simulation state. Calling this again without
	/// graph changes does nothing but re-issue the bind instruction.
	pub fn sync(&mut self, graph: &Graph) -> Instruction {
		let wanted_links: HashMap<EdgeId, (VertexId, VertexId)> = graph
			.edges()
			.iter()
			.filter_map(|e| Some((e.id(), e.endpoints()?)))
			.collect();

		let stale_links: Vec<EdgeId> = self
			.links
			.iter()
			.filter(|&(id, ends)| wanted_links.get(id) != Some(ends))
			.map(|(&id, _)| id)
			.collect();
		for id in stale_links {
			self.links.remove(&id);
			self.simulation.remove_link(id);
		}

		let present: HashSet<VertexId> = graph.vertices().iter().map(|v| v.id()).collect();
		let stale_nodes: Vec<VertexId> = self.nodes.difference(&present).copied().collect();
		for id in stale_nodes {
			self.nodes.remove(&id);
			self.simulation.remove_node(id);
		}

		for v in graph.vertices() {
			if self.nodes.insert(v.id()) {
				self.simulation.insert_node(v.id());
			}
		}

		let mut bound_edges = Vec::new();
		for e in graph.edges() {
			let Some(ends) = e.endpoints() else {
				continue;
			};
			if !self.links.contains_key(&e.id()) {
				self.simulation.insert_link(e.id(), ends.0, ends.1);
				self.links.insert(e.id(), ends);
			}
			bound_edges.push(e.id());
		}

		debug!(
			"harvest: layout bound {} nodes, {} links",
			self.nodes.len(),
			self.links.len()
		);
		Instruction::LayoutBind {
			vertices: graph.vertices().iter().map(|v| v.id()).collect(),
			edges: bound_edges,
		}
	}

	/// Step the simulation and report positions for every bound vertex and link.
	pub fn on_tick(&mut self, graph: &Graph, dt: f32) -> Frame {
		self.simulation.step(dt);

		let vertices = graph
			.vertices()
			.iter()
			.filter_map(|v| {
				let (x, y) = self.simulation.position(v.id())?;
				Some(VertexPosition {
					vertex: v.id(),
					x,
					y,
				})
			})
			.collect();

		let edges = graph
			.edges()
			.iter()
			.filter(|e| self.links.contains_key(&e.id()))
			.filter_map(|e| {
				let (from, to) = e.endpoints()?;
				Some(EdgePosition {
					edge: e.id(),
					source: self.simulation.position(from)?,
					target: self.simulation.position(to)?,
				})
			})
			.collect();

		Frame { vertices, edges }
	}

	/// Forward new bounds and restart iteration. The graph is not touched.
	pub fn resize(&mut self, width: f64, height: f64) -> Instruction {
		self.width = width;
		self.height = height;
		self.simulation.set_bounds(width, height);
		self.simulation.restart();
		Instruction::LayoutResize { width, height }
	}

	/// Drag a bound vertex to `(x, y)` and pin it there.
	pub fn drag(&mut self, vertex: VertexId, x: f64, y: f64) {
		if self.nodes.contains(&vertex) {
			self.simulation.move_node(vertex, x, y, true);
		}
	}
}

#[cfg(test)]
pub(crate) mod testing {
	//! In-memory simulation that records every call.

	use super::*;

	#[derive(Debug, Clone, PartialEq)]
	pub enum Call {
		InsertNode(VertexId),
		RemoveNode(VertexId),
		InsertLink(EdgeId),
		RemoveLink(EdgeId),
		Bounds(f64, f64),
		Restart,
	}

	#[derive(Debug, Default)]
	pub struct RecordingSimulation {
		pub calls: Vec<Call>,
		pub positions: HashMap<VertexId, (f64, f64)>,
	}

	impl Simulation for RecordingSimulation {
		fn insert_node(&mut self, vertex: VertexId) {
			let n = self.positions.len() as f64;
			self.positions.insert(vertex, (n, n));
			self.calls.push(Call::InsertNode(vertex));
		}

		fn remove_node(&mut self, vertex: VertexId) {
			self.positions.remove(&vertex);
			self.calls.push(Call::RemoveNode(vertex));
		}

		fn insert_link(&mut self, edge: EdgeId, _: VertexId, _: VertexId) {
			self.calls.push(Call::InsertLink(edge));
		}

		fn remove_link(&mut self, edge: EdgeId) {
			self.calls.push(Call::RemoveLink(edge));
		}

		fn step(&mut self, _: f32) {
			for p in self.positions.values_mut() {
				p.0 += 1.0;
			}
		}

		fn position(&self, vertex: VertexId) -> Option<(f64, f64)> {
			self.positions.get(&vertex).copied()
		}

		fn move_node(&mut self, vertex: VertexId, x: f64, y: f64, _: bool) {
			self.positions.insert(vertex, (x, y));
		}

		fn set_bounds(&mut self, width: f64, height: f64) {
			self.calls.push(Call::Bounds(width, height));
		}

		fn restart(&mut self) {
			self.calls.push(Call::Restart);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::testing::{Call, RecordingSimulation};
	use super::*;

	fn bridge() -> LayoutBridge<RecordingSimulation> {
		LayoutBridge::new(RecordingSimulation::default(), 800.0, 600.0)
	}

	#[test]
	fn sync_is_incremental_and_idempotent() {
		let mut g = Graph::new();
		let a = g.add_vertex(None, None);
		let mut layout = bridge();
		layout.sync(&g);

		let b = g.add_vertex(None, None);
		let e = g.add_edge(Some(a), Some(b), None);
		let bind = layout.sync(&g);
		assert_eq!(
			bind,
			Instruction::LayoutBind {
				vertices: vec![a, b],
				edges: vec![e],
			}
		);

		let before = layout.simulation().calls.len();
		layout.sync(&g);
		assert_eq!(layout.simulation().calls.len(), before);
		assert_eq!(
			layout
				.simulation()
				.calls
				.iter()
				.filter(|c| **c == Call::InsertNode(a))
				.count(),
			1
		);
	}

	#[test]
	fn incomplete_edges_are_not_linked() {
		let mut g = Graph::new();
		let a = g.add_vertex(None, None);
		let e = g.add_edge(Some(a), None, None);
		let mut layout = bridge();
		assert_eq!(
			layout.sync(&g),
			Instruction::LayoutBind {
				vertices: vec![a],
				edges: vec![],
			}
		);
		assert!(!layout.simulation().calls.contains(&Call::InsertLink(e)));
	}

	#[test]
	fn removal_unbinds_node_and_link() {
		let mut g = Graph::new();
		let a = g.add_vertex(None, None);
		let b = g.add_vertex(None, None);
		let e = g.add_edge(Some(a), Some(b), None);
		let mut layout = bridge();
		layout.sync(&g);

		g.remove_vertex(a);
		layout.sync(&g);
		let calls = &layout.simulation().calls;
		assert!(calls.contains(&Call::RemoveLink(e)));
		assert!(calls.contains(&Call::RemoveNode(a)));
		assert!(layout.on_tick(&g, 0.016).edges.is_empty());
	}

	#[test]
	fn tick_reports_positions_without_touching_the_graph() {
		let mut g = Graph::new();
		let a = g.add_vertex(None, None);
		let b = g.add_vertex(None, None);
		let e = g.add_edge(Some(a), Some(b), None);
		let mut layout = bridge();
		layout.sync(&g);

		let frame = layout.on_tick(&g, 0.016);
		assert_eq!(frame.vertices.len(), 2);
		assert_eq!(frame.vertices[0].vertex, a);
		assert_eq!(frame.edges.len(), 1);
		assert_eq!(frame.edges[0].edge, e);
		assert_eq!(frame.edges[0].source, (frame.vertices[0].x, frame.vertices[0].y));
	}

	#[test]
	fn resize_forwards_bounds_and_restarts() {
		let mut layout = bridge();
		assert_eq!(
			layout.resize(1024.0, 768.0),
			Instruction::LayoutResize {
				width: 1024.0,
				height: 768.0
			}
		);
		let calls = &layout.simulation().calls;
		assert_eq!(
			calls[calls.len() - 2..],
			[Call::Bounds(1024.0, 768.0), Call::Restart]
		);
		assert_eq!(layout.bounds(), (1024.0, 768.0));
	}
}
