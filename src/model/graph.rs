//! The graph aggregate ("harvest"): owns every vertex, edge and group plus
//! the current selection.

use log::debug;

use super::attribute::Attribute;
use super::color::Hsl;
use super::edge::{Edge, EdgeId, EndpointSlot};
use super::group::{Group, GroupId};
use super::vertex::{Vertex, VertexId};

/// The currently selected entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selected {
	/// A vertex; its picker shows tags.
	Vertex(VertexId),
	/// An edge; its picker shows ends and direction.
	Edge(EdgeId),
}

/// Aggregate root for one editing session.
///
/// Entities are addressed by ids handed out here; ids are never reused, so
/// a stale id simply stops resolving after removal.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	vertices: Vec<Vertex>,
	edges: Vec<Edge>,
	groups: Vec<Group>,
	selection: Option<Selected>,
	next_id: u64,
}

impl Graph {
	/// Empty graph with nothing selected.
	pub fn new() -> Self {
		Self::default()
	}

	fn allocate(&mut self) -> u64 {
		self.next_id += 1;
		self.next_id
	}

	/// Vertices in creation order.
	pub fn vertices(&self) -> &[Vertex] {
		&self.vertices
	}

	/// Edges in creation order, complete or not.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Groups in creation order.
	pub fn groups(&self) -> &[Group] {
		&self.groups
	}

	/// Current selection; at most one entity.
	pub fn selection(&self) -> &[Selected] {
		self.selection.as_slice()
	}

	/// The selected entity, if any.
	pub fn selected(&self) -> Option<Selected> {
		self.selection
	}

	/// Look up a vertex by id.
	pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
		self.vertices.iter().find(|v| v.id() == id)
	}

	/// Mutable access for attribute edits and recoloring.
	pub fn vertex_mut(&mut self, id: VertexId) -> Option<&mut Vertex> {
		self.vertices.iter_mut().find(|v| v.id() == id)
	}

	/// Look up an edge by id.
	pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id() == id)
	}

	/// Mutable access for direction changes. Ends go through [`Graph::set_endpoint`].
	pub fn edge_mut(&mut self, id: EdgeId) -> Option<&mut Edge> {
		self.edges.iter_mut().find(|e| e.id() == id)
	}

	/// Look up a group by id.
	pub fn group(&self, id: GroupId) -> Option<&Group> {
		self.groups.iter().find(|g| g.id() == id)
	}

	/// True if the entity still exists.
	pub fn contains(&self, selected: Selected) -> bool {
		match selected {
			Selected::Vertex(id) => self.vertex(id).is_some(),
			Selected::Edge(id) => self.edge(id).is_some(),
		}
	}

	/// Append a vertex titled `title` (empty when `None`).
	pub fn add_vertex(&mut self, title: Option<Attribute>, color: Option<Hsl>) -> VertexId {
		let id = VertexId(self.allocate());
		self.vertices
			.push(Vertex::new(id, Some(vec![title.unwrap_or_default()]), color));
		id
	}

	/// Append a vertex with a full attribute list, e.g. when restoring saved state.
	pub(crate) fn push_vertex(&mut self, attributes: Vec<Attribute>, color: Hsl) -> VertexId {
		let id = VertexId(self.allocate());
		self.vertices.push(Vertex::new(id, Some(attributes), Some(color)));
		id
	}

	/// Append an edge. Unset ends are allowed while the user is still picking.
	///
	/// Ends naming a vertex this graph does not own are left unset.
	pub fn add_edge(
		&mut self,
		from: Option<VertexId>,
		to: Option<VertexId>,
		bidirectional: Option<bool>,
	) -> EdgeId {
		let from = from.filter(|&v| self.vertex(v).is_some());
		let to = to.filter(|&v| self.vertex(v).is_some());
		let id = EdgeId(self.allocate());
		self.edges
			.push(Edge::new(id, from, to, bidirectional.unwrap_or(true)));
		id
	}

	/// Append an empty group carrying `labels`.
	pub fn add_group(&mut self, labels: Vec<String>) -> GroupId {
		let id = GroupId(self.allocate());
		self.groups.push(Group::new(id, labels));
		id
	}

	/// Put a vertex in a group. Fails for unknown ids and existing members.
	pub fn add_to_group(&mut self, group: GroupId, vertex: VertexId) -> bool {
		if self.vertex(vertex).is_none() {
			return false;
		}
		match self.groups.iter_mut().find(|g| g.id() == group) {
			Some(g) => g.insert(vertex),
			None => false,
		}
	}

	/// Point one end of an edge at a vertex, or unset it with `None`.
	///
	/// Fails for an unknown edge or a vertex this graph does not own.
	pub fn set_endpoint(
		&mut self,
		edge: EdgeId,
		slot: EndpointSlot,
		vertex: Option<VertexId>,
	) -> bool {
		if vertex.is_some_and(|v| self.vertex(v).is_none()) {
			return false;
		}
		match self.edge_mut(edge) {
			Some(e) => {
				e.set_endpoint(slot, vertex);
				true
			}
			None => false,
		}
	}

	/// Make `target` the only selected entity.
	pub fn select(&mut self, target: Selected) -> bool {
		if !self.contains(target) {
			return false;
		}
		self.deselect();
		if let Selected::Vertex(id) = target {
			if let Some(v) = self.vertex_mut(id) {
				v.set_selected(true);
			}
		}
		self.selection = Some(target);
		true
	}

	/// Clear the selection, returning what was selected.
	pub fn deselect(&mut self) -> Option<Selected> {
		let previous = self.selection.take();
		if let Some(Selected::Vertex(id)) = previous {
			if let Some(v) = self.vertex_mut(id) {
				v.set_selected(false);
			}
		}
		previous
	}

	/// Remove a vertex and every reference to it.
	///
	/// Edges that pointed at the vertex stay in the graph with that end unset.
	pub fn remove_vertex(&mut self, id: VertexId) -> Option<Vertex> {
		let pos = self.vertices.iter().position(|v| v.id() == id)?;
		if self.selection == Some(Selected::Vertex(id)) {
			self.selection = None;
		}
		for group in &mut self.groups {
			group.remove(id);
		}
		let detached = self
			.edges
			.iter_mut()
			.map(|e| e.detach(id))
			.filter(|&changed| changed)
			.count();
		debug!("harvest: removed vertex {:?}, detached {} edge end(s)", id, detached);
		let mut vertex = self.vertices.remove(pos);
		vertex.set_selected(false);
		Some(vertex)
	}

	/// Remove an edge, clearing the selection if it was selected.
	pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
		let pos = self.edges.iter().position(|e| e.id() == id)?;
		if self.selection == Some(Selected::Edge(id)) {
			self.selection = None;
		}
		Some(self.edges.remove(pos))
	}

	/// Remove a group. Its vertices stay.
	pub fn remove_group(&mut self, id: GroupId) -> Option<Group> {
		let pos = self.groups.iter().position(|g| g.id() == id)?;
		Some(self.groups.remove(pos))
	}

	/// Edge picker label for one end: the vertex title, or "+" when unset.
	pub fn endpoint_label(&self, vertex: Option<VertexId>) -> String {
		vertex
			.and_then(|id| self.vertex(id))
			.map(|v| v.title().to_owned())
			.unwrap_or_else(|| super::ADD_GLYPH.to_owned())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::attribute::text_selection;

	fn titled(text: &str) -> Option<Attribute> {
		Some(Attribute::create(Some(text_selection(text))))
	}

	#[test]
	fn add_vertex_defaults() {
		let mut g = Graph::new();
		let id = g.add_vertex(None, None);
		let v = g.vertex(id).unwrap();
		assert_eq!(v.attributes().len(), 1);
		assert_eq!(v.title(), "");
		assert!((0.0..360.0).contains(&v.color.h));
	}

	#[test]
	fn edit_title_after_creation() {
		let mut g = Graph::new();
		let id = g.add_vertex(None, None);
		assert!(g.vertex_mut(id).unwrap().update_attribute(0, titled("Paris")));
		assert_eq!(g.vertex(id).unwrap().attributes()[0].text(), "Paris");
	}

	#[test]
	fn directed_edge_between_two_vertices() {
		let mut g = Graph::new();
		let paris = g.add_vertex(titled("Paris"), None);
		let lyon = g.add_vertex(titled("Lyon"), None);
		let e = g.add_edge(Some(paris), Some(lyon), Some(false));
		let edge = g.edge(e).unwrap();
		assert!(!edge.bidirectional);
		assert_eq!(edge.direction_glyph(), "\u{2192}");
		assert_eq!(g.endpoint_label(edge.from()), "Paris");
	}

	#[test]
	fn unset_endpoint_label_is_plus() {
		let mut g = Graph::new();
		let e = g.add_edge(None, None, None);
		assert!(g.edge(e).unwrap().bidirectional);
		assert_eq!(g.endpoint_label(g.edge(e).unwrap().from()), "+");

		let alice = g.add_vertex(titled("Alice"), None);
		assert!(g.set_endpoint(e, EndpointSlot::From, Some(alice)));
		assert_eq!(g.endpoint_label(g.edge(e).unwrap().from()), "Alice");
	}

	#[test]
	fn selection_replaces_never_accumulates() {
		let mut g = Graph::new();
		let a = g.add_vertex(None, None);
		let b = g.add_vertex(None, None);
		let e = g.add_edge(None, None, None);

		assert!(g.select(Selected::Vertex(a)));
		assert_eq!(g.selection(), &[Selected::Vertex(a)]);
		assert!(g.vertex(a).unwrap().is_selected());

		assert!(g.select(Selected::Vertex(b)));
		assert_eq!(g.selection().len(), 1);
		assert!(!g.vertex(a).unwrap().is_selected());
		assert!(g.vertex(b).unwrap().is_selected());

		assert!(g.select(Selected::Edge(e)));
		assert_eq!(g.selection(), &[Selected::Edge(e)]);
		assert!(!g.vertex(b).unwrap().is_selected());
	}

	#[test]
	fn selecting_unknown_entity_is_refused() {
		let mut g = Graph::new();
		let a = g.add_vertex(None, None);
		g.select(Selected::Vertex(a));
		assert!(!g.select(Selected::Edge(EdgeId(999))));
		assert_eq!(g.selection(), &[Selected::Vertex(a)]);
	}

	#[test]
	fn removing_a_vertex_cleans_every_reference() {
		let mut g = Graph::new();
		let a = g.add_vertex(titled("a"), None);
		let b = g.add_vertex(titled("b"), None);
		let e = g.add_edge(Some(a), Some(b), None);
		let basket = g.add_group(vec!["kind".into()]);
		assert!(g.add_to_group(basket, a));
		assert!(!g.add_to_group(basket, a));
		g.select(Selected::Vertex(a));

		assert!(g.remove_vertex(a).is_some());
		assert!(g.selection().is_empty());
		assert!(g.group(basket).unwrap().vertices().is_empty());
		let edge = g.edge(e).unwrap();
		assert_eq!((edge.from(), edge.to()), (None, Some(b)));
		assert!(g.remove_vertex(a).is_none());
	}

	#[test]
	fn removing_the_selected_edge_clears_selection() {
		let mut g = Graph::new();
		let e = g.add_edge(None, None, None);
		g.select(Selected::Edge(e));
		assert!(g.remove_edge(e).is_some());
		assert!(g.selection().is_empty());
		assert!(g.edges().is_empty());
	}

	#[test]
	fn edges_only_point_at_owned_vertices() {
		let mut g = Graph::new();
		let a = g.add_vertex(titled("a"), None);
		let e = g.add_edge(Some(VertexId(99)), Some(a), None);
		assert_eq!(g.edge(e).unwrap().from(), None);
		assert_eq!(g.edge(e).unwrap().to(), Some(a));

		assert!(!g.set_endpoint(e, EndpointSlot::From, Some(VertexId(99))));
		assert!(!g.set_endpoint(EdgeId(98), EndpointSlot::From, Some(a)));
		assert_eq!(g.edge(e).unwrap().from(), None);
		assert!(g.set_endpoint(e, EndpointSlot::To, None));
		assert_eq!(g.edge(e).unwrap().endpoints(), None);
	}

	#[test]
	fn only_the_selected_vertex_reports_selected() {
		let mut g = Graph::new();
		let a = g.add_vertex(None, None);
		let b = g.add_vertex(None, None);
		g.select(Selected::Vertex(a));
		let flagged: Vec<VertexId> = g
			.vertices()
			.iter()
			.filter(|v| v.is_selected())
			.map(|v| v.id())
			.collect();
		assert_eq!(flagged, [a]);
		assert_eq!(g.deselect(), Some(Selected::Vertex(a)));
		assert!(g.vertices().iter().all(|v| !v.is_selected()));
		assert!(!g.vertex(b).unwrap().is_selected());
	}

	#[test]
	fn group_rejects_strangers() {
		let mut g = Graph::new();
		let basket = g.add_group(Vec::new());
		assert!(!g.add_to_group(basket, VertexId(42)));
		assert!(g.remove_group(basket).is_some());
		assert!(g.groups().is_empty());
	}
}
