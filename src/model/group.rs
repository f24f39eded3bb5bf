//! Groups ("baskets"): vertices sharing a labeling scheme.

use super::vertex::VertexId;

/// Stable handle to a group inside a [`Graph`](super::Graph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub(crate) u64);

/// A classification bucket over vertices. Members keep insertion order and
/// never repeat.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
	id: GroupId,
	vertices: Vec<VertexId>,
	/// Free-form labels shown with the group.
	pub labels: Vec<String>,
}

impl Group {
	pub(crate) fn new(id: GroupId, labels: Vec<String>) -> Self {
		Self {
			id,
			vertices: Vec::new(),
			labels,
		}
	}

	/// This group's handle.
	pub fn id(&self) -> GroupId {
		self.id
	}

	/// Members in insertion order.
	pub fn vertices(&self) -> &[VertexId] {
		&self.vertices
	}

	/// True if `vertex` is a member.
	pub fn contains(&self, vertex: VertexId) -> bool {
		self.vertices.contains(&vertex)
	}

	pub(crate) fn insert(&mut self, vertex: VertexId) -> bool {
		if self.contains(vertex) {
			return false;
		}
		self.vertices.push(vertex);
		true
	}

	pub(crate) fn remove(&mut self, vertex: VertexId) -> bool {
		let before = self.vertices.len();
		self.vertices.retain(|&v| v != vertex);
		self.vertices.len() != before
	}
}
