//! Selection controller: turns picker and canvas actions into graph
//! mutations and picker instructions.
//!
//! The controller holds no copy of the selection; the mode is always read
//! back from the [`Graph`], so the two cannot drift apart.

use log::debug;

use crate::config::HarvestConfig;
use crate::model::{
	ADD_GLYPH, Attribute, EdgeId, EndpointSlot, Graph, Selected, SharedSelection, VertexId,
};
use crate::protocol::{Instruction, PickerColors, PickerKind};

/// Which picker is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
	/// Nothing selected; no picker shown.
	Idle,
	/// A vertex is selected; the vertex picker is shown.
	VertexSelected(VertexId),
	/// An edge is selected; the edge picker is shown.
	EdgeSelected(EdgeId),
}

/// Result of one transition.
#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
	/// What the host should display, in order.
	pub instructions: Vec<Instruction>,
	/// Vertex/edge membership or edge ends changed; the layout must re-bind.
	pub resync: bool,
}

impl Outcome {
	fn none() -> Self {
		Self::default()
	}
}

/// State machine over Idle / VertexSelected / EdgeSelected.
#[derive(Clone, Debug)]
pub struct SelectionController {
	armed: Option<EndpointSlot>,
	allow_self_loops: bool,
	picker_shade: f64,
}

impl SelectionController {
	/// Fresh controller with nothing armed.
	pub fn new(config: &HarvestConfig) -> Self {
		Self {
			armed: None,
			allow_self_loops: config.allow_self_loops,
			picker_shade: config.picker_shade,
		}
	}

	/// Current mode, read from the graph's selection.
	pub fn mode(graph: &Graph) -> Mode {
		match graph.selected() {
			None => Mode::Idle,
			Some(Selected::Vertex(id)) => Mode::VertexSelected(id),
			Some(Selected::Edge(id)) => Mode::EdgeSelected(id),
		}
	}

	/// End slot waiting for a vertex while an edge is selected.
	pub fn armed(&self) -> Option<EndpointSlot> {
		self.armed
	}

	/// Add a vertex titled with the selection text and select it.
	pub fn create_vertex(&mut self, graph: &mut Graph, raw: Option<SharedSelection>) -> Outcome {
		let id = graph.add_vertex(Some(Attribute::create(raw)), None);
		debug!("harvest: created vertex {:?}", id);
		let mut outcome = self.select_vertex(graph, id);
		outcome.resync = true;
		outcome
	}

	/// Add an edge with both ends unset and select it.
	pub fn create_edge(&mut self, graph: &mut Graph) -> Outcome {
		let id = graph.add_edge(None, None, None);
		debug!("harvest: created edge {:?}", id);
		let mut outcome = self.select_edge(graph, id);
		outcome.resync = true;
		outcome
	}

	/// A vertex was clicked. Fills the armed edge end if there is one,
	/// otherwise selects the vertex.
	pub fn vertex_chosen(&mut self, graph: &mut Graph, vertex: VertexId) -> Outcome {
		if graph.vertex(vertex).is_none() {
			debug!("harvest: ignoring click on unknown vertex {:?}", vertex);
			return Outcome::none();
		}
		if let (Mode::EdgeSelected(edge), Some(slot)) = (Self::mode(graph), self.armed) {
			return self.assign_endpoint(graph, edge, slot, vertex);
		}
		self.select_vertex(graph, vertex)
	}

	/// A picker slot was clicked with `raw` as the current text selection.
	///
	/// Only valid for the selected vertex. Empty text is a no-op.
	pub fn attribute_clicked(
		&mut self,
		graph: &mut Graph,
		vertex: VertexId,
		index: isize,
		raw: Option<SharedSelection>,
	) -> Outcome {
		if Self::mode(graph) != Mode::VertexSelected(vertex) {
			debug!("harvest: attribute click on unselected vertex {:?}", vertex);
			return Outcome::none();
		}
		let attr = Attribute::create(raw);
		if attr.is_empty() {
			// TODO: scroll the source back to the text this slot came from.
			debug!("harvest: empty selection, attribute {} unchanged", index);
			return Outcome::none();
		}
		let updated = graph
			.vertex_mut(vertex)
			.is_some_and(|v| v.update_attribute(index, Some(attr)));
		if !updated {
			return Outcome::none();
		}
		Outcome {
			instructions: self.vertex_picker(graph, vertex).into_iter().collect(),
			resync: false,
		}
	}

	/// Arm an end of the selected edge; the next chosen vertex fills it.
	pub fn endpoint_slot_clicked(&mut self, graph: &Graph, slot: EndpointSlot) -> Outcome {
		let Mode::EdgeSelected(edge) = Self::mode(graph) else {
			return Outcome::none();
		};
		self.armed = Some(slot);
		Outcome {
			instructions: self.edge_picker(graph, edge).into_iter().collect(),
			resync: false,
		}
	}

	/// Flip the selected edge between bidirectional and directed.
	pub fn direction_toggled(&mut self, graph: &mut Graph) -> Outcome {
		let Mode::EdgeSelected(edge) = Self::mode(graph) else {
			return Outcome::none();
		};
		if let Some(e) = graph.edge_mut(edge) {
			e.toggle_direction();
		}
		Outcome {
			instructions: self.edge_picker(graph, edge).into_iter().collect(),
			resync: false,
		}
	}

	/// Remove the selected entity and return to Idle.
	pub fn delete_selection(&mut self, graph: &mut Graph) -> Outcome {
		self.armed = None;
		let instructions = match Self::mode(graph) {
			Mode::Idle => return Outcome::none(),
			Mode::VertexSelected(id) => {
				graph.remove_vertex(id);
				vec![
					Instruction::SetVertexHighlight {
						vertex: id,
						highlighted: false,
					},
					Instruction::ClearPicker(PickerKind::Vertex),
				]
			}
			Mode::EdgeSelected(id) => {
				graph.remove_edge(id);
				vec![Instruction::ClearPicker(PickerKind::Edge)]
			}
		};
		Outcome {
			instructions,
			resync: true,
		}
	}

	fn select_vertex(&mut self, graph: &mut Graph, vertex: VertexId) -> Outcome {
		self.armed = None;
		let mut instructions = Vec::new();
		match Self::mode(graph) {
			Mode::EdgeSelected(_) => instructions.push(Instruction::ClearPicker(PickerKind::Edge)),
			Mode::VertexSelected(prev) if prev != vertex => {
				instructions.push(Instruction::SetVertexHighlight {
					vertex: prev,
					highlighted: false,
				})
			}
			_ => {}
		}
		if !graph.select(Selected::Vertex(vertex)) {
			return Outcome::none();
		}
		instructions.push(Instruction::SetVertexHighlight {
			vertex,
			highlighted: true,
		});
		instructions.extend(self.vertex_picker(graph, vertex));
		Outcome {
			instructions,
			resync: false,
		}
	}

	fn select_edge(&mut self, graph: &mut Graph, edge: EdgeId) -> Outcome {
		self.armed = None;
		let mut instructions = Vec::new();
		if let Mode::VertexSelected(prev) = Self::mode(graph) {
			instructions.push(Instruction::SetVertexHighlight {
				vertex: prev,
				highlighted: false,
			});
			instructions.push(Instruction::ClearPicker(PickerKind::Vertex));
		}
		if !graph.select(Selected::Edge(edge)) {
			return Outcome::none();
		}
		instructions.extend(self.edge_picker(graph, edge));
		Outcome {
			instructions,
			resync: false,
		}
	}

	fn assign_endpoint(
		&mut self,
		graph: &mut Graph,
		edge: EdgeId,
		slot: EndpointSlot,
		vertex: VertexId,
	) -> Outcome {
		let Some(e) = graph.edge(edge) else {
			return Outcome::none();
		};
		let other = match slot {
			EndpointSlot::From => e.to(),
			EndpointSlot::To => e.from(),
		};
		if !self.allow_self_loops && other == Some(vertex) {
			debug!("harvest: self-loops disabled, edge {:?} unchanged", edge);
			return Outcome::none();
		}
		if !graph.set_endpoint(edge, slot, Some(vertex)) {
			return Outcome::none();
		}
		self.armed = None;
		Outcome {
			instructions: self.edge_picker(graph, edge).into_iter().collect(),
			resync: true,
		}
	}

	fn vertex_picker(&self, graph: &Graph, vertex: VertexId) -> Option<Instruction> {
		let v = graph.vertex(vertex)?;
		Some(Instruction::RenderVertexPicker {
			vertex,
			labels: v.picker_labels(),
			append_slot: ADD_GLYPH,
			colors: PickerColors::new(v.color, self.picker_shade),
		})
	}

	fn edge_picker(&self, graph: &Graph, edge: EdgeId) -> Option<Instruction> {
		let e = graph.edge(edge)?;
		Some(Instruction::RenderEdgePicker {
			edge,
			from_label: graph.endpoint_label(e.from()),
			direction_glyph: e.direction_glyph(),
			to_label: graph.endpoint_label(e.to()),
			armed: self.armed,
		})
	}
}
