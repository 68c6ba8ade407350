//! Decorator for monetary amounts: right-aligned, negative values flagged.

use serde_json::Value;

use crate::decorator::{CellDecorator, Region, TagAttributes, cell_tag, value_slot};
use crate::source::{Field, Row, display_value};

/// Renders amounts with two decimal places, right-aligned; negative amounts
/// get a `negative` class injected per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct Money;

impl Money {
	/// Create a money decorator.
	pub fn new() -> Self {
		Self
	}

	fn align() -> TagAttributes {
		TagAttributes::new().class("right aligned").class("single line")
	}

	fn sign_slot(field: &Field) -> String {
		format!("{}__negative", field.name)
	}

	fn format(value: &Value) -> String {
		match value.as_f64() {
			Some(amount) => format!("{amount:.2}"),
			None => display_value(value),
		}
	}
}

impl CellDecorator for Money {
	fn data_cell_template(&self, field: Option<&Field>) -> String {
		value_slot(field)
	}

	fn data_cell(&self, field: Option<&Field>, attrs: &TagAttributes) -> String {
		let mut merged = Self::align().merge(attrs.clone());
		if let Some(field) = field {
			merged = merged.class(format!("{{${}}}", Self::sign_slot(field)));
		}
		cell_tag(Region::Body, &merged, &value_slot(field))
	}

	fn totals_cell(&self, _field: Option<&Field>, value: &Value) -> String {
		cell_tag(Region::Foot, &Self::align(), &Self::format(value))
	}

	fn tag_attributes(&self, _region: Region, prior: TagAttributes) -> TagAttributes {
		prior.merge(Self::align())
	}

	fn row_html_tags(&self, row: &Row, field: Option<&Field>) -> Vec<(String, String)> {
		let Some(field) = field else {
			return Vec::new();
		};
		let value = row.get(&field.name).unwrap_or(&Value::Null);
		let sign = match value.as_f64() {
			Some(amount) if amount < 0.0 => "negative",
			_ => "",
		};
		vec![
			(Self::sign_slot(field), sign.to_string()),
			(field.name.clone(), Self::format(value)),
		]
	}
}
