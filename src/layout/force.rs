//! [`Simulation`] backed by the `force_graph` crate.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};
use log::debug;

use super::Simulation;
use crate::config::SimulationConfig;
use crate::model::{EdgeId, VertexId};

/// Angle between consecutive spawn points, so new vertices never stack.
const GOLDEN_ANGLE: f64 = PI * (3.0 - 2.236_067_977_499_79);

fn parameters(config: &SimulationConfig) -> SimulationParameters {
	SimulationParameters {
		force_charge: config.force_charge,
		force_spring: config.force_spring,
		force_max: config.force_max,
		node_speed: config.node_speed,
		damping_factor: config.damping_factor,
	}
}

/// Force-directed physics over the graph's vertices.
///
/// `force_graph` can add but not drop links, so removals rebuild the
/// simulation from the surviving nodes at their current positions. A
/// rebuild keeps positions and anchors but resets every velocity; this also
/// happens when an edge is re-pointed, since that is a remove plus an insert.
/// Self-loops are tracked but never reach the physics graph.
pub struct ForceSimulation {
	graph: ForceGraph<VertexId, ()>,
	config: SimulationConfig,
	nodes: HashMap<VertexId, DefaultNodeIdx>,
	links: HashMap<EdgeId, (VertexId, VertexId)>,
	positions: HashMap<VertexId, (f64, f64)>,
	anchored: HashMap<VertexId, bool>,
	width: f64,
	height: f64,
	spawned: u32,
	/// Paused simulations keep reporting positions but stop moving.
	pub running: bool,
}

impl ForceSimulation {
	/// Empty simulation. Bounds are set by the [`LayoutBridge`](super::LayoutBridge).
	pub fn new(config: &SimulationConfig) -> Self {
		Self {
			graph: ForceGraph::new(parameters(config)),
			config: config.clone(),
			nodes: HashMap::new(),
			links: HashMap::new(),
			positions: HashMap::new(),
			anchored: HashMap::new(),
			width: 0.0,
			height: 0.0,
			spawned: 0,
			running: true,
		}
	}

	/// Bound vertices.
	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	/// Bound edges, self-loops included.
	pub fn link_count(&self) -> usize {
		self.links.len()
	}

	fn spawn_point(&mut self) -> (f64, f64) {
		let angle = self.spawned as f64 * GOLDEN_ANGLE;
		self.spawned += 1;
		(
			self.width / 2.0 + self.config.spawn_radius * angle.cos(),
			self.height / 2.0 + self.config.spawn_radius * angle.sin(),
		)
	}

	fn add_to_graph(&mut self, vertex: VertexId, (x, y): (f64, f64), anchored: bool) {
		let idx = self.graph.add_node(NodeData {
			x: x as f32,
			y: y as f32,
			mass: self.config.node_mass,
			is_anchor: anchored,
			user_data: vertex,
		});
		self.nodes.insert(vertex, idx);
		self.positions.insert(vertex, (x, y));
		self.anchored.insert(vertex, anchored);
	}

	/// Add a link to the physics graph. False if either end is unbound.
	fn add_link_to_graph(&mut self, source: VertexId, target: VertexId) -> bool {
		match (self.nodes.get(&source), self.nodes.get(&target)) {
			// a spring from a node to itself has no length; force_graph panics on it
			(Some(_), Some(_)) if source == target => true,
			(Some(&s), Some(&t)) => {
				self.graph.add_edge(s, t, EdgeData::default());
				true
			}
			_ => false,
		}
	}

	fn refresh_positions(&mut self) {
		let positions = &mut self.positions;
		self.graph.visit_nodes(|node| {
			positions.insert(node.data.user_data, (node.x() as f64, node.y() as f64));
		});
	}

	/// Recreate the physics graph from the tracked nodes and links.
	fn rebuild(&mut self) {
		self.refresh_positions();
		let mut survivors: Vec<(VertexId, (f64, f64), bool)> = self
			.nodes
			.keys()
			.filter_map(|&v| {
				let pos = *self.positions.get(&v)?;
				Some((v, pos, self.anchored.get(&v).copied().unwrap_or(false)))
			})
			.collect();
		survivors.sort_by_key(|(v, _, _)| *v);
		let mut links: Vec<(EdgeId, (VertexId, VertexId))> =
			self.links.iter().map(|(&e, &ends)| (e, ends)).collect();
		links.sort_by_key(|(e, _)| *e);

		self.graph = ForceGraph::new(parameters(&self.config));
		self.nodes.clear();
		self.positions.clear();
		self.anchored.clear();
		for (vertex, pos, anchored) in survivors {
			self.add_to_graph(vertex, pos, anchored);
		}
		for (_, (source, target)) in links {
			self.add_link_to_graph(source, target);
		}
		debug!(
			"harvest: rebuilt simulation with {} nodes, {} links",
			self.nodes.len(),
			self.links.len()
		);
	}
}

impl Simulation for ForceSimulation {
	fn insert_node(&mut self, vertex: VertexId) {
		if self.nodes.contains_key(&vertex) {
			return;
		}
		let pos = self.spawn_point();
		self.add_to_graph(vertex, pos, false);
	}

	fn remove_node(&mut self, vertex: VertexId) {
		if self.nodes.remove(&vertex).is_none() {
			return;
		}
		self.links
			.retain(|_, (s, t)| *s != vertex && *t != vertex);
		self.rebuild();
	}

	fn insert_link(&mut self, edge: EdgeId, source: VertexId, target: VertexId) {
		if self.links.contains_key(&edge) {
			return;
		}
		if self.add_link_to_graph(source, target) {
			self.links.insert(edge, (source, target));
		}
	}

	fn remove_link(&mut self, edge: EdgeId) {
		match self.links.remove(&edge) {
			Some((source, target)) if source != target => self.rebuild(),
			_ => {}
		}
	}

	fn step(&mut self, dt: f32) {
		if self.running {
			self.graph.update(dt);
		}
		self.refresh_positions();
	}

	fn position(&self, vertex: VertexId) -> Option<(f64, f64)> {
		self.positions.get(&vertex).copied()
	}

	fn move_node(&mut self, vertex: VertexId, x: f64, y: f64, anchored: bool) {
		if !self.nodes.contains_key(&vertex) {
			return;
		}
		self.graph.visit_nodes_mut(|node| {
			if node.data.user_data == vertex {
				node.data.x = x as f32;
				node.data.y = y as f32;
				node.data.is_anchor = anchored;
			}
		});
		self.positions.insert(vertex, (x, y));
		self.anchored.insert(vertex, anchored);
	}

	fn set_bounds(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	fn restart(&mut self) {
		self.running = true;
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sim() -> ForceSimulation {
		let mut s = ForceSimulation::new(&SimulationConfig::default());
		s.set_bounds(800.0, 600.0);
		s
	}

	#[test]
	fn new_nodes_get_distinct_positions() {
		let mut s = sim();
		s.insert_node(VertexId(1));
		s.insert_node(VertexId(2));
		s.insert_node(VertexId(1));
		assert_eq!(s.node_count(), 2);
		assert_ne!(s.position(VertexId(1)), s.position(VertexId(2)));
	}

	#[test]
	fn links_need_both_nodes() {
		let mut s = sim();
		s.insert_node(VertexId(1));
		s.insert_link(EdgeId(9), VertexId(1), VertexId(2));
		assert_eq!(s.link_count(), 0);
		s.insert_node(VertexId(2));
		s.insert_link(EdgeId(9), VertexId(1), VertexId(2));
		assert_eq!(s.link_count(), 1);
	}

	#[test]
	fn removal_keeps_survivor_positions() {
		let mut s = sim();
		for i in 1..=3 {
			s.insert_node(VertexId(i));
		}
		s.insert_link(EdgeId(10), VertexId(1), VertexId(2));
		s.insert_link(EdgeId(11), VertexId(2), VertexId(3));
		for _ in 0..5 {
			s.step(0.016);
		}
		let kept = s.position(VertexId(3));

		s.remove_node(VertexId(1));
		assert_eq!(s.node_count(), 2);
		assert_eq!(s.link_count(), 1);
		assert!(s.position(VertexId(1)).is_none());
		let (kx, ky) = kept.unwrap();
		let (nx, ny) = s.position(VertexId(3)).unwrap();
		assert!((kx - nx).abs() < 1e-3 && (ky - ny).abs() < 1e-3);

		s.remove_link(EdgeId(11));
		assert_eq!(s.link_count(), 0);
		assert_eq!(s.node_count(), 2);
	}

	#[test]
	fn self_loop_is_bound_but_not_simulated() {
		let mut s = sim();
		s.insert_node(VertexId(1));
		s.insert_node(VertexId(2));
		s.insert_link(EdgeId(5), VertexId(1), VertexId(1));
		s.insert_link(EdgeId(6), VertexId(1), VertexId(2));
		assert_eq!(s.link_count(), 2);
		for _ in 0..10 {
			s.step(0.016);
		}
		let (x, y) = s.position(VertexId(1)).unwrap();
		assert!(x.is_finite() && y.is_finite());

		// a rebuild must not bring the loop into the physics graph
		s.remove_link(EdgeId(6));
		assert_eq!(s.link_count(), 1);
		s.step(0.016);
		s.remove_link(EdgeId(5));
		assert_eq!(s.link_count(), 0);
		s.step(0.016);
	}

	#[test]
	fn repointing_keeps_positions_and_anchors() {
		let mut s = sim();
		for i in 1..=3 {
			s.insert_node(VertexId(i));
		}
		s.insert_link(EdgeId(7), VertexId(1), VertexId(2));
		s.move_node(VertexId(3), 50.0, 60.0, true);
		for _ in 0..3 {
			s.step(0.016);
		}
		let before = s.position(VertexId(2));

		s.remove_link(EdgeId(7));
		s.insert_link(EdgeId(7), VertexId(1), VertexId(3));
		assert_eq!(s.position(VertexId(2)), before);
		s.step(0.016);
		assert_eq!(s.position(VertexId(3)), Some((50.0, 60.0)));
		assert_eq!(s.link_count(), 1);
	}

	#[test]
	fn dragged_node_is_pinned() {
		let mut s = sim();
		s.insert_node(VertexId(1));
		s.insert_node(VertexId(2));
		s.move_node(VertexId(1), 10.0, 20.0, true);
		s.step(0.016);
		assert_eq!(s.position(VertexId(1)), Some((10.0, 20.0)));
	}
}
