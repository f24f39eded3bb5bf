//! Messages crossing the boundary between the session and its host.
//!
//! The host (the canvas component, or a test) feeds [`Input`]s in and
//! interprets the declarative [`Instruction`]s that come back. Nothing in
//! the session draws directly.

use crate::layout::Frame;
use crate::model::{EdgeId, EndpointSlot, Hsl, SharedSelection, VertexId};

/// A user action or host event.
#[derive(Clone)]
pub enum Input {
	/// Promote the current text selection (if any) into a new vertex.
	CreateVertexRequested(Option<SharedSelection>),
	/// Start a new edge with both ends unset.
	CreateEdgeRequested,
	/// A rendered vertex was clicked.
	VertexChosen(VertexId),
	/// A picker slot of a vertex was clicked. `index == -1` is the "+" slot.
	AttributeClicked {
		/// The vertex whose picker was clicked.
		vertex: VertexId,
		/// Slot index; -1 appends.
		index: isize,
		/// Page text selection at the time of the click.
		selection: Option<SharedSelection>,
	},
	/// An end slot of the edge picker was clicked; the next chosen vertex fills it.
	EndpointSlotClicked(EndpointSlot),
	/// The edge picker's direction glyph was clicked.
	DirectionToggled,
	/// Remove whatever is selected.
	DeleteSelectionRequested,
	/// The canvas changed size.
	ViewportResized {
		/// New width in pixels.
		width: f64,
		/// New height in pixels.
		height: f64,
	},
}

/// Which picker panel an instruction refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickerKind {
	/// The vertex picker.
	Vertex,
	/// The edge picker.
	Edge,
}

/// Shades of a vertex color used to style its picker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickerColors {
	/// The vertex color.
	pub base: Hsl,
	/// Slot background highlight.
	pub lighter: Hsl,
	/// Slot border.
	pub darker: Hsl,
}

impl PickerColors {
	/// Derive both shades from `base`.
	pub fn new(base: Hsl, shade: f64) -> Self {
		Self {
			base,
			lighter: base.lighten(shade),
			darker: base.darken(shade),
		}
	}
}

/// What the host should display next.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
	/// Show the vertex picker: one slot per attribute, then the append slot.
	RenderVertexPicker {
		/// The selected vertex.
		vertex: VertexId,
		/// One label per attribute.
		labels: Vec<String>,
		/// The trailing append slot, always "+".
		append_slot: &'static str,
		/// Shades derived from the vertex color.
		colors: PickerColors,
	},
	/// Show the edge picker: from label, direction glyph, to label.
	RenderEdgePicker {
		/// The selected edge.
		edge: EdgeId,
		/// Title of the from-vertex, or "+".
		from_label: String,
		/// "↔" or "→".
		direction_glyph: &'static str,
		/// Title of the to-vertex, or "+".
		to_label: String,
		/// End slot waiting for a vertex, if any.
		armed: Option<EndpointSlot>,
	},
	/// Hide a picker panel and drop its slots.
	ClearPicker(PickerKind),
	/// Draw or fade out the selection ring on a vertex.
	SetVertexHighlight {
		/// The vertex.
		vertex: VertexId,
		/// True to show the ring.
		highlighted: bool,
	},
	/// The simulation now holds exactly these vertices and links, in graph order.
	LayoutBind {
		/// Bound vertices in graph order.
		vertices: Vec<VertexId>,
		/// Bound edges in graph order.
		edges: Vec<EdgeId>,
	},
	/// Fresh positions for the current frame.
	LayoutTick(Frame),
	/// The simulation bounds changed.
	LayoutResize {
		/// New width.
		width: f64,
		/// New height.
		height: f64,
	},
}
