//! Default decorator: a plain cell around the field's value slot.

use crate::decorator::{CellDecorator, Region, TagAttributes, cell_tag, value_slot};
use crate::source::Field;

/// The decorator used when a column declares nothing more specific.
///
/// Static attributes can be attached up front and are merged with whatever
/// earlier decorators in a chain collected.
#[derive(Debug, Clone, Default)]
pub struct Generic {
	attributes: TagAttributes,
}

impl Generic {
	/// A generic decorator with no extra attributes.
	pub fn new() -> Self {
		Self::default()
	}

	/// A generic decorator carrying static cell attributes.
	pub fn with_attributes(attributes: TagAttributes) -> Self {
		Self { attributes }
	}
}

impl CellDecorator for Generic {
	fn data_cell_template(&self, field: Option<&Field>) -> String {
		value_slot(field)
	}

	fn data_cell(&self, field: Option<&Field>, attrs: &TagAttributes) -> String {
		let merged = self.attributes.clone().merge(attrs.clone());
		cell_tag(Region::Body, &merged, &value_slot(field))
	}

	fn tag_attributes(&self, _region: Region, prior: TagAttributes) -> TagAttributes {
		prior.merge(self.attributes.clone())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::source::FieldType;

	#[test]
	fn test_data_cell_has_value_slot() {
		let f = Field::new("name", FieldType::Text);
		let d = Generic::new();
		assert_eq!(d.data_cell(Some(&f), &TagAttributes::new()), "<td>{$name}</td>");
	}

	#[test]
	fn test_positional_data_cell_is_empty() {
		let d = Generic::new();
		assert_eq!(d.data_cell(None, &TagAttributes::new()), "<td></td>");
	}

	#[test]
	fn test_header_cell_uses_caption() {
		let f = Field::new("unit_price", FieldType::Float);
		let d = Generic::new();
		assert_eq!(d.header_cell(Some(&f)), "<th>Unit Price</th>");
		assert_eq!(d.header_cell(None), "<th></th>");
	}

	#[test]
	fn test_static_attributes_are_merged() {
		let f = Field::new("n", FieldType::Integer);
		let d = Generic::with_attributes(TagAttributes::new().class("collapsing"));
		assert_eq!(
			d.data_cell(Some(&f), &TagAttributes::new().class("right aligned")),
			"<td class=\"collapsing right aligned\">{$n}</td>"
		);
	}
}
