//! Logical graph model: attributes, vertices, edges, groups and the graph
//! aggregate that keeps them consistent.
//!
//! Nothing here knows about layout or drawing. Positions live in the
//! simulation; colors are plain values the renderer interprets.

mod attribute;
mod color;
mod edge;
mod graph;
mod group;
mod persist;
mod vertex;

pub use attribute::{Attribute, SelectionHandle, SharedSelection, text_selection};
pub use color::Hsl;
pub use edge::{Edge, EdgeId, EndpointSlot};
pub use graph::{Graph, Selected};
pub use group::{Group, GroupId};
pub use persist::{PersistError, SavedEdge, SavedGraph, SavedVertex};
pub use vertex::{Vertex, VertexId};

/// Picker glyph for an empty slot or "add new".
pub const ADD_GLYPH: &str = "+";
/// Direction glyph for an undirected edge.
pub const BIDIRECTIONAL_GLYPH: &str = "\u{2194}";
/// Direction glyph for a directed edge.
pub const DIRECTED_GLYPH: &str = "\u{2192}";
