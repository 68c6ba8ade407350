//! Table error types.

use tabulon_markup::MarkupError;
use thiserror::Error;

/// Result type for table operations.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors raised while declaring columns, folding totals, or rendering.
///
/// All of these are fatal at the point of detection: registration errors
/// abort the registration call, and render-time errors abort the render pass
/// with no usable partial output.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TableError {
	/// Render was attempted with zero registered columns.
	#[error("table does not have any columns defined")]
	NoColumns,

	/// A named column was registered twice.
	#[error("table already has a column named '{name}', use add_decorator() to chain")]
	DuplicateColumn {
		/// Column key that was registered twice.
		name: String,
	},

	/// A decorator was attached to a column key that does not exist.
	#[error("no such column: '{name}'")]
	UnknownColumn {
		/// The missing column key.
		name: String,
	},

	/// A totals directive named a built-in aggregation that does not exist.
	#[error("aggregation method '{method}' does not exist (column '{column}')")]
	UnknownAggregation {
		/// Column the directive was declared for.
		column: String,
		/// The unrecognized method name.
		method: String,
	},

	/// A decorator kind name has no entry in the decorator factory.
	#[error("unknown decorator kind: '{name}'")]
	InvalidDecorator {
		/// The unrecognized kind name.
		name: String,
	},

	/// The table template could not be parsed or is missing a region.
	#[error("markup error: {0}")]
	Markup(#[from] MarkupError),
}
