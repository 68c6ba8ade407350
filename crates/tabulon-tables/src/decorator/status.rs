//! Decorator mapping field values onto positive/negative status icons.

use serde_json::Value;

use crate::decorator::{CellDecorator, Region, TagAttributes, cell_tag, value_slot};
use crate::source::{Field, Row};

/// Shows an icon next to the value: green check for values in the positive
/// set, red close for the negative set, nothing otherwise.
///
/// The icon class is a per-row markup injection; with the table's row-markup
/// flag off the icon stays empty and only the value renders.
#[derive(Debug, Clone, Default)]
pub struct Status {
	positive: Vec<Value>,
	negative: Vec<Value>,
}

impl Status {
	/// Create a status decorator with explicit value sets.
	pub fn new(positive: Vec<Value>, negative: Vec<Value>) -> Self {
		Self { positive, negative }
	}

	/// Status for boolean fields: `true` positive, `false` negative.
	pub fn boolean() -> Self {
		Self::new(vec![Value::Bool(true)], vec![Value::Bool(false)])
	}

	fn icon_slot(field: &Field) -> String {
		format!("{}__status", field.name)
	}

	fn icon_class(&self, value: &Value) -> &'static str {
		if self.positive.contains(value) {
			"green check"
		} else if self.negative.contains(value) {
			"red close"
		} else {
			""
		}
	}

	fn cell_content(&self, field: Option<&Field>) -> String {
		match field {
			Some(field) => format!(
				"<i class=\"{{${}}} icon\"></i> {}",
				Self::icon_slot(field),
				value_slot(Some(field))
			),
			None => String::new(),
		}
	}
}

impl CellDecorator for Status {
	fn data_cell_template(&self, field: Option<&Field>) -> String {
		self.cell_content(field)
	}

	fn data_cell(&self, field: Option<&Field>, attrs: &TagAttributes) -> String {
		let attrs = attrs.clone().class("single line");
		cell_tag(Region::Body, &attrs, &self.cell_content(field))
	}

	fn row_html_tags(&self, row: &Row, field: Option<&Field>) -> Vec<(String, String)> {
		let Some(field) = field else {
			return Vec::new();
		};
		let value = row.get(&field.name).unwrap_or(&Value::Null);
		vec![(Self::icon_slot(field), self.icon_class(value).to_string())]
	}
}
