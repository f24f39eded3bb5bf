//! Bridges the [`GraphSession`] into the reactive UI.
//!
//! Inputs go in through [`HarvestHandle::dispatch`]; the returned
//! instructions are interpreted here into signals the picker and canvas
//! read from.

use std::collections::HashSet;
use std::rc::Rc;

use leptos::prelude::*;
use log::debug;

use crate::layout::Frame;
use crate::model::{EndpointSlot, Graph, SelectionHandle, SharedSelection, VertexId};
use crate::protocol::{Input, Instruction, PickerKind};
use crate::session::GraphSession;

/// Live browser text selection.
struct DomSelection(web_sys::Selection);

impl SelectionHandle for DomSelection {
	fn to_display_string(&self) -> String {
		String::from(self.0.to_string())
	}
}

/// Snapshot the page's current text selection, if there is one.
pub fn current_selection() -> Option<SharedSelection> {
	let selection = web_sys::window()?.get_selection().ok()??;
	Some(Rc::new(DomSelection(selection)))
}

/// What the vertex picker shows.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexPickerView {
	/// The vertex the slots edit.
	pub vertex: VertexId,
	/// One label per attribute; empty ones show as "+".
	pub labels: Vec<String>,
	/// Label of the trailing append slot.
	pub append_slot: &'static str,
	/// CSS background for every slot.
	pub background: String,
	/// CSS border color for every slot.
	pub border: String,
}

/// What the edge picker shows.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgePickerView {
	/// Title of the from-vertex, or "+".
	pub from_label: String,
	/// "↔" or "→".
	pub direction_glyph: &'static str,
	/// Title of the to-vertex, or "+".
	pub to_label: String,
	/// End waiting for a vertex click.
	pub armed: Option<EndpointSlot>,
}

/// Copyable handle to the session and the signals its instructions drive.
#[derive(Clone, Copy)]
pub struct HarvestHandle {
	session: StoredValue<GraphSession, LocalStorage>,
	/// Shown while a vertex is selected.
	pub vertex_picker: RwSignal<Option<VertexPickerView>>,
	/// Shown while an edge is selected.
	pub edge_picker: RwSignal<Option<EdgePickerView>>,
	/// Vertices whose selection ring should be drawn.
	pub highlighted: RwSignal<HashSet<VertexId>>,
}

impl HarvestHandle {
	/// Take ownership of a session. Must be called inside a reactive owner.
	pub fn new(session: GraphSession) -> Self {
		Self {
			session: StoredValue::new_local(session),
			vertex_picker: RwSignal::new(None),
			edge_picker: RwSignal::new(None),
			highlighted: RwSignal::new(HashSet::new()),
		}
	}

	/// Run one input through the session and apply the resulting instructions.
	pub fn dispatch(&self, input: Input) {
		let instructions = self
			.session
			.try_update_value(|s| s.handle(input))
			.unwrap_or_default();
		self.apply(instructions);
	}

	/// Step the layout; returns the new frame.
	pub fn advance(&self, dt: f32) -> Option<Frame> {
		let instructions = self.session.try_update_value(|s| s.advance(dt))?;
		instructions.into_iter().find_map(|i| match i {
			Instruction::LayoutTick(frame) => Some(frame),
			_ => None,
		})
	}

	/// Pin a vertex at graph coordinates `(x, y)`.
	pub fn drag_vertex(&self, vertex: VertexId, x: f64, y: f64) {
		self.session
			.try_update_value(|s| s.drag_vertex(vertex, x, y));
	}

	/// Read the graph without cloning it.
	pub fn with_graph<R>(&self, f: impl FnOnce(&Graph) -> R) -> Option<R> {
		self.session.try_with_value(|s| f(s.graph()))
	}

	fn apply(&self, instructions: Vec<Instruction>) {
		for instruction in instructions {
			match instruction {
				Instruction::RenderVertexPicker {
					vertex,
					labels,
					append_slot,
					colors,
				} => {
					let gradient = format!(
						"linear-gradient({}, {})",
						colors.lighter.to_css(),
						colors.base.to_css()
					);
					self.vertex_picker.set(Some(VertexPickerView {
						vertex,
						labels,
						append_slot,
						background: gradient,
						border: colors.darker.to_css(),
					}));
				}
				Instruction::RenderEdgePicker {
					from_label,
					direction_glyph,
					to_label,
					armed,
					..
				} => self.edge_picker.set(Some(EdgePickerView {
					from_label,
					direction_glyph,
					to_label,
					armed,
				})),
				Instruction::ClearPicker(PickerKind::Vertex) => self.vertex_picker.set(None),
				Instruction::ClearPicker(PickerKind::Edge) => self.edge_picker.set(None),
				Instruction::SetVertexHighlight {
					vertex,
					highlighted,
				} => self.highlighted.update(|set| {
					if highlighted {
						set.insert(vertex);
					} else {
						set.remove(&vertex);
					}
				}),
				Instruction::LayoutBind { vertices, edges } => {
					debug!(
						"harvest: bound {} vertices, {} edges",
						vertices.len(),
						edges.len()
					);
				}
				Instruction::LayoutResize { width, height } => {
					debug!("harvest: layout bounds {}x{}", width, height);
				}
				Instruction::LayoutTick(_) => {}
			}
		}
	}
}
