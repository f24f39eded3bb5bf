//! Vertices ("fruits"): titled bags of attributes.

use super::attribute::Attribute;
use super::color::Hsl;

/// Stable handle to a vertex inside a [`Graph`](super::Graph).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) u64);

/// A graph node.
///
/// `attributes[0]` is the title and always exists; the rest are unordered
/// tags.
#[derive(Clone, Debug)]
pub struct Vertex {
	id: VertexId,
	attributes: Vec<Attribute>,
	/// Fill color; the picker derives its shades from it.
	pub color: Hsl,
	selected: bool,
}

impl Vertex {
	pub(crate) fn new(id: VertexId, attributes: Option<Vec<Attribute>>, color: Option<Hsl>) -> Self {
		let attributes = match attributes {
			Some(list) if !list.is_empty() => list,
			_ => vec![Attribute::empty()],
		};
		Self {
			id,
			attributes,
			color: color.unwrap_or_else(Hsl::random),
			selected: false,
		}
	}

	/// This vertex's handle.
	pub fn id(&self) -> VertexId {
		self.id
	}

	/// Title first, then tags.
	pub fn attributes(&self) -> &[Attribute] {
		&self.attributes
	}

	/// Text of the first attribute.
	pub fn title(&self) -> &str {
		self.attributes[0].text()
	}

	/// True while this is the graph's selected vertex.
	pub fn is_selected(&self) -> bool {
		self.selected
	}

	pub(crate) fn set_selected(&mut self, selected: bool) {
		self.selected = selected;
	}

	/// Replace the attribute at `index`, or append it as a new tag.
	///
	/// Any index outside `0..len` appends; the picker's "+" slot sends -1.
	/// Missing or empty attributes are rejected without touching the vertex.
	pub fn update_attribute(&mut self, index: isize, attr: Option<Attribute>) -> bool {
		let Some(attr) = attr else {
			return false;
		};
		if attr.is_empty() {
			return false;
		}
		match usize::try_from(index) {
			Ok(i) if i < self.attributes.len() => self.attributes[i] = attr,
			_ => self.attributes.push(attr),
		}
		true
	}

	/// Drop a tag. The title slot cannot be removed.
	pub fn remove_attribute(&mut self, index: usize) -> bool {
		if index == 0 || index >= self.attributes.len() {
			return false;
		}
		self.attributes.remove(index);
		true
	}

	/// Labels for the vertex picker, one per attribute.
	pub fn picker_labels(&self) -> Vec<String> {
		self.attributes
			.iter()
			.map(|a| a.picker_label().to_owned())
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::attribute::text_selection;

	fn vertex() -> Vertex {
		Vertex::new(VertexId(1), None, None)
	}

	fn attr(text: &str) -> Option<Attribute> {
		Some(Attribute::create(Some(text_selection(text))))
	}

	#[test]
	fn defaults_to_empty_title() {
		let v = vertex();
		assert_eq!(v.attributes().len(), 1);
		assert_eq!(v.title(), "");
		assert!((0.0..360.0).contains(&v.color.h));
		assert!(!v.is_selected());
	}

	#[test]
	fn empty_list_still_gets_a_title() {
		let v = Vertex::new(VertexId(1), Some(Vec::new()), None);
		assert_eq!(v.attributes().len(), 1);
	}

	#[test]
	fn empty_or_missing_attribute_is_rejected() {
		let mut v = vertex();
		for index in [-1, 0, 1, 42] {
			assert!(!v.update_attribute(index, attr("")));
			assert!(!v.update_attribute(index, None));
		}
		assert_eq!(v.attributes(), &[Attribute::empty()]);
	}

	#[test]
	fn in_range_index_replaces() {
		let mut v = vertex();
		assert!(v.update_attribute(0, attr("Paris")));
		assert_eq!(v.title(), "Paris");
		assert_eq!(v.attributes().len(), 1);
	}

	#[test]
	fn out_of_range_index_appends() {
		let mut v = vertex();
		assert!(v.update_attribute(-1, attr("capital")));
		assert!(v.update_attribute(7, attr("river")));
		assert_eq!(v.attributes().len(), 3);
		assert_eq!(v.attributes()[2].text(), "river");
		assert_eq!(v.picker_labels(), vec!["+", "capital", "river"]);
	}

	#[test]
	fn title_cannot_be_removed() {
		let mut v = vertex();
		v.update_attribute(-1, attr("tag"));
		assert!(!v.remove_attribute(0));
		assert!(!v.remove_attribute(5));
		assert!(v.remove_attribute(1));
		assert_eq!(v.attributes().len(), 1);
	}
}
