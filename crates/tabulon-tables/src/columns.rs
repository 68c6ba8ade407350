//! The ordered column registry.
//!
//! Columns map a key — a field name, or a positional slot for unnamed
//! columns — to an ordered, non-empty chain of decorators. A bare decorator
//! is a length-1 chain; attaching another converts it into a sequence.

use crate::decorator::{CellDecorator, Generic, Money, Password, Status, Text};
use crate::error::{Result, TableError};
use crate::source::{Field, FieldType};

/// How a column's decorator is chosen at registration time.
#[derive(Debug)]
pub enum DecoratorSpec {
	/// Pick from the field-type lookup table (`password` → [`Password`],
	/// `text` → [`Text`], `boolean` → [`Status::boolean`]), falling back to
	/// [`Generic`].
	Auto,
	/// Look up a decorator kind by name in the factory.
	Kind(String),
	/// Use the supplied decorator as-is.
	Custom(Box<dyn CellDecorator>),
}

impl DecoratorSpec {
	/// A [`DecoratorSpec::Kind`] from a name.
	pub fn kind(name: impl Into<String>) -> Self {
		Self::Kind(name.into())
	}

	/// A [`DecoratorSpec::Custom`] from a decorator value.
	pub fn custom(decorator: impl CellDecorator + 'static) -> Self {
		Self::Custom(Box::new(decorator))
	}

	/// Resolve the spec against the field the column is registered for.
	pub fn resolve(self, field: Option<&Field>) -> Result<Box<dyn CellDecorator>> {
		match self {
			Self::Custom(decorator) => Ok(decorator),
			Self::Kind(name) => decorator_by_kind(&name),
			Self::Auto => Ok(match field.map(|f| f.field_type) {
				Some(FieldType::Password) => Box::new(Password::new()),
				Some(FieldType::Text) => Box::new(Text::new()),
				Some(FieldType::Boolean) => Box::new(Status::boolean()),
				_ => Box::new(Generic::new()),
			}),
		}
	}
}

/// Factory for decorator kinds that need no configuration.
///
/// Configurable kinds ([`crate::decorator::Link`],
/// [`crate::decorator::Snippet`], a configured [`Status`]) are registered
/// through [`DecoratorSpec::Custom`] instead.
fn decorator_by_kind(name: &str) -> Result<Box<dyn CellDecorator>> {
	match name {
		"generic" => Ok(Box::new(Generic::new())),
		"text" => Ok(Box::new(Text::new())),
		"password" => Ok(Box::new(Password::new())),
		"status" => Ok(Box::new(Status::default())),
		"money" => Ok(Box::new(Money::new())),
		other => Err(TableError::InvalidDecorator {
			name: other.to_string(),
		}),
	}
}

/// One registered column: an optional key plus its decorator chain.
#[derive(Debug)]
pub struct ColumnEntry {
	key: Option<String>,
	decorators: Vec<Box<dyn CellDecorator>>,
}

impl ColumnEntry {
	/// The column key, `None` for positional columns.
	pub fn key(&self) -> Option<&str> {
		self.key.as_deref()
	}

	/// The decorator chain, in registration order.
	pub fn decorators(&self) -> &[Box<dyn CellDecorator>] {
		&self.decorators
	}

	/// The first decorator of the chain, used for header and totals cells.
	pub fn first(&self) -> &dyn CellDecorator {
		self.decorators[0].as_ref()
	}
}

/// Ordered mapping from column keys to decorator chains.
#[derive(Debug, Default)]
pub struct Columns {
	entries: Vec<ColumnEntry>,
}

impl Columns {
	/// An empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a column. A named key may only be registered once; `None`
	/// appends a positional column and never conflicts.
	///
	/// Returns the decorator now serving the column.
	pub fn register(
		&mut self,
		key: Option<String>,
		decorator: Box<dyn CellDecorator>,
	) -> Result<&dyn CellDecorator> {
		if let Some(name) = &key {
			if self.get(name).is_some() {
				return Err(TableError::DuplicateColumn { name: name.clone() });
			}
		}
		self.entries.push(ColumnEntry {
			key,
			decorators: vec![decorator],
		});
		Ok(self.entries[self.entries.len() - 1].first())
	}

	/// Append a decorator to an existing named column, turning a singleton
	/// into a chain.
	pub fn attach(&mut self, key: &str, decorator: Box<dyn CellDecorator>) -> Result<()> {
		let entry = self
			.entries
			.iter_mut()
			.find(|e| e.key.as_deref() == Some(key))
			.ok_or_else(|| TableError::UnknownColumn {
				name: key.to_string(),
			})?;
		entry.decorators.push(decorator);
		Ok(())
	}

	/// Append a decorator to the column at a registry position; the way to
	/// chain onto positional columns, which have no key to attach by.
	pub fn attach_at(&mut self, index: usize, decorator: Box<dyn CellDecorator>) -> Result<()> {
		let entry = self
			.entries
			.get_mut(index)
			.ok_or_else(|| TableError::UnknownColumn {
				name: format!("#{index}"),
			})?;
		entry.decorators.push(decorator);
		Ok(())
	}

	/// Look up a named column.
	pub fn get(&self, key: &str) -> Option<&ColumnEntry> {
		self.entries.iter().find(|e| e.key.as_deref() == Some(key))
	}

	/// Iterate entries in registration order.
	pub fn iter(&self) -> impl Iterator<Item = &ColumnEntry> {
		self.entries.iter()
	}

	/// Number of registered columns.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether no columns are registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
