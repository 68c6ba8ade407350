//! The row-sequence protocol the renderer consumes.
//!
//! A [`DataSource`] exposes field descriptors and a forward-only row
//! iterator; the renderer only ever reads. Field values are
//! [`serde_json::Value`], so sources can carry whatever the backing store
//! produced without committing to a static row type.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Declared data type of a field, used to pick a decorator when a column is
/// registered without one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
	/// No particular type; rendered by the generic decorator.
	#[default]
	Generic,
	/// Free-form text, possibly multi-line.
	Text,
	/// Sensitive value; never rendered verbatim.
	Password,
	/// True/false flag.
	Boolean,
	/// Whole number.
	Integer,
	/// Floating-point number.
	Float,
}

/// Descriptor for one field of a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
	/// Field identifier, used as the column key and the value-slot name.
	pub name: String,
	/// Human-readable caption shown in the header cell.
	pub caption: String,
	/// Declared data type.
	pub field_type: FieldType,
	/// Whether the field participates in automatic column registration.
	pub visible: bool,
}

impl Field {
	/// Create a field with a caption derived from its name
	/// (`unit_price` → `Unit Price`).
	pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
		let name = name.into();
		let caption = caption_from_name(&name);
		Self {
			name,
			caption,
			field_type,
			visible: true,
		}
	}

	/// Override the derived caption.
	pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
		self.caption = caption.into();
		self
	}

	/// Mark the field as hidden for automatic column registration.
	pub fn hidden(mut self) -> Self {
		self.visible = false;
		self
	}
}

fn caption_from_name(name: &str) -> String {
	name.split('_')
		.filter(|part| !part.is_empty())
		.map(|part| {
			let mut chars = part.chars();
			match chars.next() {
				Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
				None => String::new(),
			}
		})
		.collect::<Vec<_>>()
		.join(" ")
}

/// One record of a data source: an identifier plus named field values, in
/// field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
	id: Value,
	values: Vec<(String, Value)>,
}

impl Row {
	/// Create a row with the given identifier.
	pub fn new(id: impl Into<Value>) -> Self {
		Self {
			id: id.into(),
			values: Vec::new(),
		}
	}

	/// Add or replace a field value.
	pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		let name = name.into();
		let value = value.into();
		match self.values.iter_mut().find(|(n, _)| *n == name) {
			Some(slot) => slot.1 = value,
			None => self.values.push((name, value)),
		}
		self
	}

	/// The row identifier.
	pub fn id(&self) -> &Value {
		&self.id
	}

	/// Look up a field value by name.
	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v)
	}

	/// Iterate field values in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
		self.values.iter().map(|(n, v)| (n.as_str(), v))
	}
}

/// A row-oriented data source.
///
/// The renderer consumes the row iterator eagerly, exactly once per render
/// pass, in strict forward order; it never rewinds and never mutates.
pub trait DataSource {
	/// Field descriptors, in presentation order.
	fn fields(&self) -> &[Field];

	/// Look up a field descriptor by name.
	fn field(&self, name: &str) -> Option<&Field> {
		self.fields().iter().find(|f| f.name == name)
	}

	/// Iterate the rows.
	fn rows(&self) -> Box<dyn Iterator<Item = Row> + '_>;
}

/// An in-memory [`DataSource`] backed by a `Vec` of rows.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
	fields: Vec<Field>,
	rows: Vec<Row>,
}

impl MemorySource {
	/// Create a source with the given field descriptors and no rows.
	pub fn new(fields: Vec<Field>) -> Self {
		Self {
			fields,
			rows: Vec::new(),
		}
	}

	/// Replace the row set.
	pub fn with_rows(mut self, rows: Vec<Row>) -> Self {
		self.rows = rows;
		self
	}

	/// Append one row.
	pub fn push(&mut self, row: Row) {
		self.rows.push(row);
	}

	/// Number of rows currently held.
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	/// Whether the source holds no rows.
	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

impl DataSource for MemorySource {
	fn fields(&self) -> &[Field] {
		&self.fields
	}

	fn rows(&self) -> Box<dyn Iterator<Item = Row> + '_> {
		Box::new(self.rows.iter().cloned())
	}
}

/// Render a field value as display text.
///
/// `Null` renders empty, strings render verbatim, scalars via their usual
/// formatting; arrays and objects fall back to their JSON form.
pub fn display_value(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => n.to_string(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_caption_from_name() {
		assert_eq!(Field::new("unit_price", FieldType::Float).caption, "Unit Price");
		assert_eq!(Field::new("name", FieldType::Text).caption, "Name");
	}

	#[test]
	fn test_row_builder_and_lookup() {
		let row = Row::new(1).with("name", "Alice").with("amount", 10);
		assert_eq!(row.get("name"), Some(&json!("Alice")));
		assert_eq!(row.get("amount"), Some(&json!(10)));
		assert_eq!(row.get("missing"), None);
		assert_eq!(row.id(), &json!(1));
	}

	#[test]
	fn test_row_with_replaces_existing_value() {
		let row = Row::new(1).with("name", "a").with("name", "b");
		assert_eq!(row.get("name"), Some(&json!("b")));
		assert_eq!(row.iter().count(), 1);
	}

	#[test]
	fn test_memory_source_iterates_in_order() {
		let source = MemorySource::new(vec![Field::new("n", FieldType::Integer)]).with_rows(vec![
			Row::new(1).with("n", 1),
			Row::new(2).with("n", 2),
		]);
		let ns: Vec<_> = source.rows().map(|r| r.get("n").cloned().unwrap()).collect();
		assert_eq!(ns, vec![json!(1), json!(2)]);
	}

	#[test]
	fn test_display_value() {
		assert_eq!(display_value(&Value::Null), "");
		assert_eq!(display_value(&json!("x")), "x");
		assert_eq!(display_value(&json!(10)), "10");
		assert_eq!(display_value(&json!(10.5)), "10.5");
		assert_eq!(display_value(&json!(true)), "true");
	}
}
