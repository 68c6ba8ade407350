//! Decorator for sensitive fields: never renders the value.

use serde_json::Value;

use crate::decorator::{CellDecorator, Region, TagAttributes, cell_tag};
use crate::source::Field;

const MASK: &str = "***";

/// Renders a fixed mask instead of the field value.
///
/// The cell fragment carries no value slot, so the value never reaches the
/// output even though the renderer binds every field of the row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Password;

impl Password {
	/// Create a password decorator.
	pub fn new() -> Self {
		Self
	}
}

impl CellDecorator for Password {
	fn data_cell_template(&self, _field: Option<&Field>) -> String {
		MASK.to_string()
	}

	fn data_cell(&self, _field: Option<&Field>, attrs: &TagAttributes) -> String {
		cell_tag(Region::Body, attrs, MASK)
	}

	fn totals_cell(&self, _field: Option<&Field>, _value: &Value) -> String {
		self.tag(Region::Foot, "")
	}
}
