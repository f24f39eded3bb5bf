//! Attributes: pieces of user-selected text attached to vertices.

use std::fmt;
use std::rc::Rc;

/// Opaque capture of a text range in the source.
///
/// The only thing the graph ever asks of a selection is its display text;
/// the renderer decides what a selection actually is.
pub trait SelectionHandle {
	/// Text shown for this selection.
	fn to_display_string(&self) -> String;
}

impl SelectionHandle for str {
	fn to_display_string(&self) -> String {
		self.to_owned()
	}
}

impl SelectionHandle for String {
	fn to_display_string(&self) -> String {
		self.clone()
	}
}

/// Shared handle to a selection, as stored on an [`Attribute`].
pub type SharedSelection = Rc<dyn SelectionHandle>;

/// A piece of text promoted from a selection.
///
/// The text is captured once when the attribute is built. Editing a vertex
/// never changes an attribute; it swaps in a new one.
#[derive(Clone, Default)]
pub struct Attribute {
	text: String,
	source: Option<SharedSelection>,
}

impl Attribute {
	/// Build an attribute from an optional selection.
	pub fn create(selection: Option<SharedSelection>) -> Self {
		match selection {
			Some(sel) => Self {
				text: sel.to_display_string(),
				source: Some(sel),
			},
			None => Self::empty(),
		}
	}

	/// The empty attribute used to fill a vertex's title slot.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Rebuild an attribute from persisted text; there is no live selection behind it.
	pub fn restored(text: impl Into<String>) -> Self {
		Self {
			text: text.into(),
			source: None,
		}
	}

	/// Display text, fixed at construction.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// True for the empty placeholder.
	pub fn is_empty(&self) -> bool {
		self.text.is_empty()
	}

	/// The selection this attribute was captured from, if any.
	pub fn source(&self) -> Option<&SharedSelection> {
		self.source.as_ref()
	}

	/// Label shown in the picker. Empty text renders as the add glyph.
	pub fn picker_label(&self) -> &str {
		if self.text.is_empty() {
			super::ADD_GLYPH
		} else {
			&self.text
		}
	}
}

impl PartialEq for Attribute {
	fn eq(&self, other: &Self) -> bool {
		self.text == other.text
	}
}

impl Eq for Attribute {}

impl fmt::Debug for Attribute {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Attribute")
			.field("text", &self.text)
			.field("has_source", &self.source.is_some())
			.finish()
	}
}

/// Wrap plain text as a selection handle.
pub fn text_selection(text: impl Into<String>) -> SharedSelection {
	let text: String = text.into();
	Rc::new(text)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_selection_gives_empty_text() {
		let attr = Attribute::create(None);
		assert_eq!(attr.text(), "");
		assert!(attr.source().is_none());
		assert_eq!(attr.picker_label(), "+");
	}

	#[test]
	fn text_comes_from_the_selection() {
		let attr = Attribute::create(Some(text_selection("Paris")));
		assert_eq!(attr.text(), "Paris");
		assert!(attr.source().is_some());
		assert_eq!(attr.picker_label(), "Paris");
	}

	#[test]
	fn equality_ignores_the_source() {
		assert_eq!(
			Attribute::create(Some(text_selection("Lyon"))),
			Attribute::restored("Lyon")
		);
	}
}
