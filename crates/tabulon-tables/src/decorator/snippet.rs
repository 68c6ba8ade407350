//! Decorator rendering a caller-supplied markup fragment.

use crate::decorator::{CellDecorator, TagAttributes};
use crate::source::Field;

/// A fixed markup fragment used verbatim as the cell.
///
/// The fragment supplies its own cell tag and may reference row slots
/// (`{$_id}`, field names), which bind per row. This is the usual decorator
/// for positional columns — action buttons, row controls, computed markup.
#[derive(Debug, Clone)]
pub struct Snippet {
	content: String,
}

impl Snippet {
	/// Create a snippet decorator from a markup fragment.
	pub fn of(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
		}
	}
}

impl CellDecorator for Snippet {
	fn data_cell_template(&self, _field: Option<&Field>) -> String {
		self.content.clone()
	}

	fn data_cell(&self, _field: Option<&Field>, _attrs: &TagAttributes) -> String {
		self.content.clone()
	}
}
