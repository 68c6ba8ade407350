//! Template error types.

use thiserror::Error;

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, MarkupError>;

/// Errors raised while parsing or manipulating a template.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum MarkupError {
	/// A region tag was opened but never closed.
	#[error("region '{name}' is never closed")]
	UnclosedRegion {
		/// Region name.
		name: String,
	},

	/// A closing tag appeared with no matching open region.
	#[error("unexpected closing tag for region '{name}'")]
	UnexpectedClose {
		/// Name carried by the closing tag (empty for the `{{/}}` shorthand).
		name: String,
	},

	/// A region was requested by name but does not exist in the template.
	#[error("template has no region named '{name}'")]
	UnknownRegion {
		/// Requested region name.
		name: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unclosed_region_display() {
		let err = MarkupError::UnclosedRegion {
			name: "Body".to_string(),
		};
		assert_eq!(err.to_string(), "region 'Body' is never closed");
	}

	#[test]
	fn test_unknown_region_display() {
		let err = MarkupError::UnknownRegion {
			name: "Foot".to_string(),
		};
		assert_eq!(err.to_string(), "template has no region named 'Foot'");
	}
}
