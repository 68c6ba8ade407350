//! Decorator wrapping the cell value in an anchor.

use crate::decorator::{CellDecorator, Region, TagAttributes, cell_tag, value_slot};
use crate::source::Field;

/// Wraps the value in `<a href="...">`.
///
/// The href is itself a fragment and may reference row slots, e.g.
/// `Link::to("/users/{$_id}")`; they are bound per row like any other slot.
/// Typically registered first in a chain, with a terminal decorator
/// rendering the cell tag.
#[derive(Debug, Clone)]
pub struct Link {
	href: String,
}

impl Link {
	/// Create a link decorator with an href fragment.
	pub fn to(href: impl Into<String>) -> Self {
		Self { href: href.into() }
	}
}

impl CellDecorator for Link {
	fn data_cell_template(&self, field: Option<&Field>) -> String {
		format!("<a href=\"{}\">{}</a>", self.href, value_slot(field))
	}

	fn data_cell(&self, field: Option<&Field>, attrs: &TagAttributes) -> String {
		cell_tag(Region::Body, attrs, &self.data_cell_template(field))
	}
}
