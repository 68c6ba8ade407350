//! Column decorators: per-column formatting units.
//!
//! A decorator turns one field's value (or the whole row, for positional
//! columns) into a markup fragment for a given region of the table. Columns
//! carry an ordered chain of one or more decorators; [`compose_data_cell`]
//! implements the splice rule that folds a chain into a single cell
//! fragment.
//!
//! Cell fragments are *templates*, not final markup: the field's value slot
//! (`{$name}`) stays in the fragment and is bound per row by the renderer.

use std::fmt::Debug;

use serde_json::Value;
use tabulon_markup::escape_html;

use crate::source::{Field, Row, display_value};

mod generic;
mod link;
mod money;
mod password;
mod snippet;
mod status;
mod text;

pub use generic::Generic;
pub use link::Link;
pub use money::Money;
pub use password::Password;
pub use snippet::Snippet;
pub use status::Status;
pub use text::Text;

/// Output region a fragment is destined for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
	/// Header row.
	Head,
	/// Data rows.
	Body,
	/// Totals rows.
	Foot,
	/// Empty-state fragment.
	Empty,
}

/// Attributes accumulated for a cell tag.
///
/// Non-terminal decorators in a chain contribute attributes here instead of
/// emitting their own tag; the terminal decorator merges the collected set
/// onto the cell tag it renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagAttributes {
	classes: Vec<String>,
	extra: Vec<(String, String)>,
}

impl TagAttributes {
	/// An empty attribute set.
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a CSS class (duplicates are dropped).
	pub fn class(mut self, class: impl Into<String>) -> Self {
		let class = class.into();
		if !self.classes.contains(&class) {
			self.classes.push(class);
		}
		self
	}

	/// Add an arbitrary attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.extra.push((name.into(), value.into()));
		self
	}

	/// Merge another attribute set into this one.
	pub fn merge(mut self, other: TagAttributes) -> Self {
		for class in other.classes {
			if !self.classes.contains(&class) {
				self.classes.push(class);
			}
		}
		self.extra.extend(other.extra);
		self
	}

	/// Whether no attributes have been collected.
	pub fn is_empty(&self) -> bool {
		self.classes.is_empty() && self.extra.is_empty()
	}

	/// Render as a tag-attribute suffix, with a leading space when
	/// non-empty.
	pub fn render(&self) -> String {
		let mut out = String::new();
		if !self.classes.is_empty() {
			out.push_str(" class=\"");
			out.push_str(&escape_html(&self.classes.join(" ")));
			out.push('"');
		}
		for (name, value) in &self.extra {
			out.push(' ');
			out.push_str(name);
			out.push_str("=\"");
			out.push_str(&escape_html(value));
			out.push('"');
		}
		out
	}
}

/// Build a `<th>`/`<td>` cell tag for a region.
pub fn cell_tag(region: Region, attrs: &TagAttributes, content: &str) -> String {
	let element = match region {
		Region::Head => "th",
		_ => "td",
	};
	format!("<{element}{}>{content}</{element}>", attrs.render())
}

/// The field's value-slot marker, or an empty string for positional
/// columns.
pub(crate) fn value_slot(field: Option<&Field>) -> String {
	match field {
		Some(field) => format!("{{${}}}", field.name),
		None => String::new(),
	}
}

/// The capability contract every column decorator satisfies.
pub trait CellDecorator: Debug {
	/// Caption cell for the header row. Positional columns are called with
	/// no field context.
	fn header_cell(&self, field: Option<&Field>) -> String {
		let caption = field.map(|f| escape_html(&f.caption)).unwrap_or_default();
		self.tag(Region::Head, &caption)
	}

	/// Cell fragment used when this decorator is *not* the last in its
	/// chain. The fragment must contain the column's value slot so the next
	/// decorator's output can be spliced into it.
	fn data_cell_template(&self, field: Option<&Field>) -> String;

	/// Full cell markup used when this decorator is the last (or only) one
	/// in the chain, merging attributes collected from earlier decorators.
	fn data_cell(&self, field: Option<&Field>, attrs: &TagAttributes) -> String;

	/// Footer cell for an accumulated totals value.
	fn totals_cell(&self, field: Option<&Field>, value: &Value) -> String {
		let _ = field;
		self.tag(Region::Foot, &escape_html(&display_value(value)))
	}

	/// Bare cell tag for a region. An empty footer cell renders as a dash,
	/// which is what a totals row shows for columns its plan omits.
	fn tag(&self, region: Region, content: &str) -> String {
		let content = if region == Region::Foot && content.is_empty() {
			"-"
		} else {
			content
		};
		cell_tag(region, &TagAttributes::new(), content)
	}

	/// Contribute tag attributes when this decorator sits before the
	/// terminal one in a chain.
	fn tag_attributes(&self, region: Region, prior: TagAttributes) -> TagAttributes {
		let _ = region;
		prior
	}

	/// Per-row markup injections: a mapping of slot name to fragment,
	/// spliced into the row template for this row only. Consulted only when
	/// the table's row-markup feature flag is on.
	fn row_html_tags(&self, row: &Row, field: Option<&Field>) -> Vec<(String, String)> {
		let _ = (row, field);
		Vec::new()
	}
}

/// Fold a decorator chain into one cell fragment.
///
/// The first N−1 decorators contribute their cell template and attribute
/// hints; the last renders the full cell with the merged attributes. Each
/// later fragment has the accumulated fragment substituted into its value
/// slot, so the terminal tag ends up outermost. Positional columns have no
/// slot to substitute into and concatenate with a single space instead.
pub fn compose_data_cell(
	key: Option<&str>,
	decorators: &[Box<dyn CellDecorator>],
	field: Option<&Field>,
) -> String {
	let mut cell: Option<String> = None;
	let mut attrs = TagAttributes::new();
	let count = decorators.len();
	for (index, decorator) in decorators.iter().enumerate() {
		let html = if index + 1 < count {
			attrs = decorator.tag_attributes(Region::Body, attrs);
			decorator.data_cell_template(field)
		} else {
			decorator.data_cell(field, &attrs)
		};
		cell = Some(match (cell, key) {
			(None, _) => html,
			(Some(prev), Some(name)) => html.replace(&format!("{{${name}}}"), &prev),
			(Some(prev), None) => format!("{prev} {html}"),
		});
	}
	cell.unwrap_or_default()
}
