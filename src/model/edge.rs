//! Edges ("vines") between vertices.

use super::vertex::VertexId;

/// Stable handle to an edge inside a [`Graph`](super::Graph).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) u64);

/// Which end of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndpointSlot {
	/// The source end.
	From,
	/// The target end.
	To,
}

/// A relation between two vertices.
///
/// Either end may be unset while the user is still picking endpoints. Only
/// complete edges are handed to the layout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge {
	id: EdgeId,
	from: Option<VertexId>,
	to: Option<VertexId>,
	/// Drawn without an arrow head when true.
	pub bidirectional: bool,
}

impl Edge {
	pub(crate) fn new(
		id: EdgeId,
		from: Option<VertexId>,
		to: Option<VertexId>,
		bidirectional: bool,
	) -> Self {
		Self {
			id,
			from,
			to,
			bidirectional,
		}
	}

	/// This edge's handle.
	pub fn id(&self) -> EdgeId {
		self.id
	}

	/// Source vertex, if picked.
	pub fn from(&self) -> Option<VertexId> {
		self.from
	}

	/// Target vertex, if picked.
	pub fn to(&self) -> Option<VertexId> {
		self.to
	}

	/// True once both ends are set.
	pub fn is_complete(&self) -> bool {
		self.from.is_some() && self.to.is_some()
	}

	/// A complete edge whose ends are the same vertex.
	pub fn is_self_loop(&self) -> bool {
		self.is_complete() && self.from == self.to
	}

	/// Both ends, when set.
	pub fn endpoints(&self) -> Option<(VertexId, VertexId)> {
		Some((self.from?, self.to?))
	}

	/// The vertex at one end.
	pub fn endpoint(&self, slot: EndpointSlot) -> Option<VertexId> {
		match slot {
			EndpointSlot::From => self.from,
			EndpointSlot::To => self.to,
		}
	}

	/// Point one end at `vertex`. [`Graph::set_endpoint`](super::Graph::set_endpoint)
	/// checks that the vertex exists.
	pub(crate) fn set_endpoint(&mut self, slot: EndpointSlot, vertex: Option<VertexId>) {
		match slot {
			EndpointSlot::From => self.from = vertex,
			EndpointSlot::To => self.to = vertex,
		}
	}

	/// Flip between bidirectional and directed.
	pub fn toggle_direction(&mut self) {
		self.bidirectional = !self.bidirectional;
	}

	/// Picker glyph: "↔" for bidirectional, "→" for directed.
	pub fn direction_glyph(&self) -> &'static str {
		if self.bidirectional {
			super::BIDIRECTIONAL_GLYPH
		} else {
			super::DIRECTED_GLYPH
		}
	}

	/// Unset any end that points at `vertex`. Returns true if anything changed.
	pub(crate) fn detach(&mut self, vertex: VertexId) -> bool {
		let mut changed = false;
		if self.from == Some(vertex) {
			self.from = None;
			changed = true;
		}
		if self.to == Some(vertex) {
			self.to = None;
			changed = true;
		}
		changed
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn incomplete_until_both_ends_are_set() {
		let mut e = Edge::new(EdgeId(1), None, None, true);
		assert!(!e.is_complete());
		e.set_endpoint(EndpointSlot::From, Some(VertexId(1)));
		assert!(!e.is_complete());
		assert_eq!(e.endpoints(), None);
		e.set_endpoint(EndpointSlot::To, Some(VertexId(2)));
		assert_eq!(e.endpoints(), Some((VertexId(1), VertexId(2))));
		assert!(!e.is_self_loop());
	}

	#[test]
	fn glyph_follows_direction() {
		let mut e = Edge::new(EdgeId(1), None, None, true);
		assert_eq!(e.direction_glyph(), "\u{2194}");
		e.toggle_direction();
		assert_eq!(e.direction_glyph(), "\u{2192}");
	}

	#[test]
	fn detach_clears_both_ends_of_a_loop() {
		let v = VertexId(3);
		let mut e = Edge::new(EdgeId(1), Some(v), Some(v), false);
		assert!(e.is_self_loop());
		assert!(e.detach(v));
		assert_eq!(e.endpoints(), None);
		assert!(!e.detach(v));
	}
}
