//! Decorator for free-form, possibly multi-line text.

use tabulon_markup::escape_html;

use crate::decorator::{CellDecorator, Region, TagAttributes, cell_tag, value_slot};
use crate::source::{Field, Row};

/// Renders text values, preserving line breaks as `<br/>`.
///
/// Single-line values bind through the value slot as usual; multi-line
/// values are injected per row (pre-escaped) so the line breaks survive.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Text {
	/// Create a text decorator.
	pub fn new() -> Self {
		Self
	}
}

impl CellDecorator for Text {
	fn data_cell_template(&self, field: Option<&Field>) -> String {
		value_slot(field)
	}

	fn data_cell(&self, field: Option<&Field>, attrs: &TagAttributes) -> String {
		cell_tag(Region::Body, attrs, &value_slot(field))
	}

	fn row_html_tags(&self, row: &Row, field: Option<&Field>) -> Vec<(String, String)> {
		let Some(field) = field else {
			return Vec::new();
		};
		match row.get(&field.name) {
			Some(serde_json::Value::String(s)) if s.contains('\n') => {
				vec![(field.name.clone(), escape_html(s).replace('\n', "<br/>"))]
			}
			_ => Vec::new(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::source::FieldType;

	#[test]
	fn test_single_line_values_are_not_injected() {
		let f = Field::new("note", FieldType::Text);
		let row = Row::new(1).with("note", "plain");
		assert!(Text::new().row_html_tags(&row, Some(&f)).is_empty());
	}

	#[test]
	fn test_multiline_value_injected_with_breaks() {
		let f = Field::new("note", FieldType::Text);
		let row = Row::new(1).with("note", "a\nb & c");
		let tags = Text::new().row_html_tags(&row, Some(&f));
		assert_eq!(tags, vec![("note".to_string(), "a<br/>b &amp; c".to_string())]);
	}
}
