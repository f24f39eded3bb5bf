//! Saved-state shape for a graph and conversion to and from [`Graph`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::attribute::Attribute;
use super::color::Hsl;
use super::graph::Graph;
use super::vertex::VertexId;

/// Reasons a saved graph cannot be restored or written.
#[derive(Debug, Error)]
pub enum PersistError {
	/// The payload did not parse or did not match the saved shape.
	#[error("saved graph is not valid JSON: {0}")]
	Json(#[from] serde_json::Error),
	/// An edge end refers past the end of the vertex list.
	#[error("edge {edge} points at vertex #{index}, but only {count} vertices were saved")]
	DanglingEndpoint {
		/// Position of the edge in the saved list.
		edge: usize,
		/// The vertex position it refers to.
		index: usize,
		/// How many vertices were saved.
		count: usize,
	},
}

/// A vertex as written to storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SavedVertex {
	/// Attribute texts; the first is the title.
	pub attributes: Vec<String>,
	/// Missing colors are re-rolled on load; out-of-range ones are wrapped
	/// and clamped.
	#[serde(default)]
	pub color: Option<Hsl>,
}

/// An edge as written to storage. Ends are positions in [`SavedGraph::vertices`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SavedEdge {
	/// Source vertex position, if set.
	pub from: Option<usize>,
	/// Target vertex position, if set.
	pub to: Option<usize>,
	/// Defaults to true when absent.
	#[serde(default = "bidirectional_default")]
	pub bidirectional: bool,
}

fn bidirectional_default() -> bool {
	true
}

/// Complete saved graph: vertices and edges, each from its own field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedGraph {
	/// Vertices in order.
	pub vertices: Vec<SavedVertex>,
	/// Edges in order.
	pub edges: Vec<SavedEdge>,
}

impl Graph {
	/// Snapshot vertices and edges. Groups and the selection are session-only.
	pub fn to_saved(&self) -> SavedGraph {
		let index: HashMap<VertexId, usize> = self
			.vertices()
			.iter()
			.enumerate()
			.map(|(i, v)| (v.id(), i))
			.collect();

		SavedGraph {
			vertices: self
				.vertices()
				.iter()
				.map(|v| SavedVertex {
					attributes: v.attributes().iter().map(|a| a.text().to_owned()).collect(),
					color: Some(v.color),
				})
				.collect(),
			edges: self
				.edges()
				.iter()
				.map(|e| SavedEdge {
					from: e.from().and_then(|id| index.get(&id).copied()),
					to: e.to().and_then(|id| index.get(&id).copied()),
					bidirectional: e.bidirectional,
				})
				.collect(),
		}
	}

	/// Rebuild a graph, rejecting edges that point past the vertex list.
	pub fn from_saved(saved: SavedGraph) -> Result<Self, PersistError> {
		let count = saved.vertices.len();
		for (edge, e) in saved.edges.iter().enumerate() {
			for index in [e.from, e.to].into_iter().flatten() {
				if index >= count {
					return Err(PersistError::DanglingEndpoint { edge, index, count });
				}
			}
		}

		let mut graph = Graph::new();
		let ids: Vec<VertexId> = saved
			.vertices
			.into_iter()
			.map(|v| {
				let attributes = v.attributes.into_iter().map(Attribute::restored).collect();
				let color = v
					.color
					.map(|c| Hsl::new(c.h, c.s, c.l))
					.unwrap_or_else(Hsl::random);
				graph.push_vertex(attributes, color)
			})
			.collect();
		for e in saved.edges {
			graph.add_edge(
				e.from.map(|i| ids[i]),
				e.to.map(|i| ids[i]),
				Some(e.bidirectional),
			);
		}
		Ok(graph)
	}

	/// Parse and rebuild a saved graph.
	pub fn from_json(json: &str) -> Result<Self, PersistError> {
		let saved: SavedGraph = serde_json::from_str(json)?;
		Self::from_saved(saved)
	}

	/// Serialize vertices and edges.
	pub fn to_json(&self) -> Result<String, PersistError> {
		Ok(serde_json::to_string(&self.to_saved())?)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::attribute::text_selection;

	fn sample() -> Graph {
		let mut g = Graph::new();
		let paris = g.add_vertex(
			Some(Attribute::create(Some(text_selection("Paris")))),
			Some(Hsl::new(10.0, 0.5, 0.5)),
		);
		let lyon = g.add_vertex(Some(Attribute::restored("Lyon")), None);
		g.vertex_mut(lyon)
			.unwrap()
			.update_attribute(-1, Some(Attribute::restored("Rhône")));
		g.add_edge(Some(paris), Some(lyon), Some(false));
		g.add_edge(Some(lyon), None, None);
		g
	}

	#[test]
	fn saved_state_restores_structure() {
		let g = sample();
		let json = g.to_json().unwrap();
		let restored = Graph::from_json(&json).unwrap();

		let titles: Vec<&str> = restored.vertices().iter().map(|v| v.title()).collect();
		assert_eq!(titles, vec!["Paris", "Lyon"]);
		assert_eq!(restored.vertices()[0].color, Hsl::new(10.0, 0.5, 0.5));
		assert_eq!(restored.vertices()[1].attributes().len(), 2);

		assert_eq!(restored.edges().len(), 2);
		let first = &restored.edges()[0];
		assert!(!first.bidirectional);
		assert_eq!(first.from(), Some(restored.vertices()[0].id()));
		assert_eq!(first.to(), Some(restored.vertices()[1].id()));
		assert_eq!(restored.edges()[1].to(), None);
		assert!(restored.selection().is_empty());
	}

	#[test]
	fn edges_are_not_read_from_vertices() {
		let json = r#"{
			"vertices": [{ "attributes": ["Paris"] }],
			"edges": [{ "attributes": ["Paris"] }]
		}"#;
		assert!(matches!(Graph::from_json(json), Err(PersistError::Json(_))));
	}

	#[test]
	fn dangling_endpoint_is_malformed() {
		let json = r#"{
			"vertices": [{ "attributes": ["a"] }],
			"edges": [{ "from": 0, "to": 3 }]
		}"#;
		assert!(matches!(
			Graph::from_json(json),
			Err(PersistError::DanglingEndpoint { edge: 0, index: 3, count: 1 })
		));
	}

	#[test]
	fn saved_color_is_normalized() {
		let json = r#"{
			"vertices": [{ "attributes": ["a"], "color": { "h": 720.0, "s": 3.0, "l": -1.0 } }],
			"edges": []
		}"#;
		let c = Graph::from_json(json).unwrap().vertices()[0].color;
		assert!((0.0..360.0).contains(&c.h));
		assert_eq!(c, Hsl::new(0.0, 1.0, 0.0));

		let json = r#"{ "vertices": [{ "attributes": ["a"], "color": { "h": -30.0, "s": 0.5, "l": 0.5 } }], "edges": [] }"#;
		assert_eq!(Graph::from_json(json).unwrap().vertices()[0].color.h, 330.0);
	}

	#[test]
	fn vertex_without_attributes_gets_a_title() {
		let json = r#"{ "vertices": [{ "attributes": [] }], "edges": [] }"#;
		let g = Graph::from_json(json).unwrap();
		assert_eq!(g.vertices()[0].attributes().len(), 1);
		assert!(g.edges().is_empty());
	}
}
