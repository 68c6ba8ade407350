//! The table renderer: orchestrates header, body, and footer output.

use std::fmt;

use serde_json::Value;
use tabulon_markup::{Template, escape_html};
use tracing::debug;

use crate::columns::{Columns, DecoratorSpec};
use crate::decorator::{Region, compose_data_cell};
use crate::error::{Result, TableError};
use crate::source::{DataSource, Field, FieldType, Row, display_value};
use crate::totals::{Accumulators, PlanEntry, TotalsEngine, TotalsPlan};

/// The built-in table skeleton.
///
/// `Head`, `Body`, and `Foot` are the output regions; `Row`, `Totals`, and
/// `Empty` are masters the renderer clones, fills, and appends. A custom
/// template passed to [`Table::set_template`] must provide the same regions.
pub const TABLE_HTML: &str = "<table class=\"ui {$class} table\">\n\
	<thead>\n\
	{Head}<tr>{$cells}</tr>{/Head}\n\
	</thead>\n\
	<tbody>\n\
	{Body}{Row}<tr data-id=\"{$_id}\">{$cells}</tr>\n\
	{/Row}{Empty}<tr class=\"empty\"><td colspan=\"{$span}\">No records found</td></tr>\n\
	{/Empty}{/Body}</tbody>\n\
	<tfoot>\n\
	{Foot}{Totals}<tr>{$cells}</tr>\n\
	{/Totals}{/Foot}</tfoot>\n\
	</table>\n";

/// Outcome of the pre-row hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
	/// Render the row and fold it into totals.
	Render,
	/// Drop the row: not rendered, not folded, not counted.
	Skip,
}

type BeforeRowHook = Box<dyn Fn(&Row) -> RowAction>;
type RowTagsHook = Box<dyn Fn(&Row) -> Vec<(String, String)>>;

/// A renderable table: column registry, totals plans, hooks, and the render
/// entry point.
///
/// Rendering borrows the table immutably — the registry cannot change while
/// a pass is in progress, and accumulator state lives and dies inside one
/// [`Table::render`] call.
pub struct Table {
	fields: Vec<Field>,
	columns: Columns,
	totals: TotalsEngine,
	header: bool,
	use_html_tags: bool,
	class: Option<String>,
	template_src: String,
	before_row: Option<BeforeRowHook>,
	row_tags: Option<RowTagsHook>,
}

impl Default for Table {
	fn default() -> Self {
		Self {
			fields: Vec::new(),
			columns: Columns::new(),
			totals: TotalsEngine::default(),
			header: true,
			use_html_tags: true,
			class: None,
			template_src: TABLE_HTML.to_string(),
			before_row: None,
			row_tags: None,
		}
	}
}

impl fmt::Debug for Table {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Table")
			.field("fields", &self.fields.len())
			.field("columns", &self.columns.len())
			.field("totals_plans", &self.totals.len())
			.field("header", &self.header)
			.field("use_html_tags", &self.use_html_tags)
			.finish_non_exhaustive()
	}
}

impl Table {
	/// A table with the built-in template and no columns.
	pub fn new() -> Self {
		Self::default()
	}

	/// Show or hide the header row.
	pub fn header(&mut self, enabled: bool) -> &mut Self {
		self.header = enabled;
		self
	}

	/// Enable or disable per-row markup injection (the table-level hook and
	/// decorator [`crate::decorator::CellDecorator::row_html_tags`]).
	/// Switching it off trades row-specific markup for render throughput.
	pub fn use_html_tags(&mut self, enabled: bool) -> &mut Self {
		self.use_html_tags = enabled;
		self
	}

	/// Add a CSS class to the table tag.
	pub fn with_class(&mut self, class: impl Into<String>) -> &mut Self {
		self.class = Some(class.into());
		self
	}

	/// Replace the table skeleton. The template must parse and is expected
	/// to provide the `Head`/`Body`/`Foot` regions and the `Row`/`Totals`/
	/// `Empty` masters.
	pub fn set_template(&mut self, src: &str) -> Result<&mut Self> {
		Template::parse(src)?;
		self.template_src = src.to_string();
		Ok(self)
	}

	/// Register a named column. The field declaration is synthesized if the
	/// name is not yet known; use [`Table::add_column_with`] to declare a
	/// type.
	pub fn add_column(&mut self, name: &str, spec: DecoratorSpec) -> Result<&mut Self> {
		if self.field(name).is_none() {
			self.fields.push(Field::new(name, FieldType::Generic));
		}
		let field = self.fields.iter().find(|f| f.name == name);
		let decorator = spec.resolve(field)?;
		self.columns.register(Some(name.to_string()), decorator)?;
		Ok(self)
	}

	/// Register a named column together with its field declaration.
	pub fn add_column_with(&mut self, field: Field, spec: DecoratorSpec) -> Result<&mut Self> {
		let decorator = spec.resolve(Some(&field))?;
		let name = field.name.clone();
		match self.fields.iter_mut().find(|f| f.name == name) {
			Some(slot) => *slot = field,
			None => self.fields.push(field),
		}
		self.columns.register(Some(name), decorator)?;
		Ok(self)
	}

	/// Register a positional (unnamed) column. Positional columns never
	/// conflict and render whole-row fragments.
	pub fn add_positional(&mut self, spec: DecoratorSpec) -> Result<&mut Self> {
		let decorator = spec.resolve(None)?;
		self.columns.register(None, decorator)?;
		Ok(self)
	}

	/// Chain another decorator onto an existing named column.
	pub fn add_decorator(&mut self, name: &str, spec: DecoratorSpec) -> Result<&mut Self> {
		if self.columns.get(name).is_none() {
			return Err(TableError::UnknownColumn {
				name: name.to_string(),
			});
		}
		let field = self.fields.iter().find(|f| f.name == name);
		let decorator = spec.resolve(field)?;
		self.columns.attach(name, decorator)?;
		Ok(self)
	}

	/// Chain another decorator onto the column at a registry position; the
	/// way to chain onto positional columns.
	pub fn add_decorator_at(&mut self, index: usize, spec: DecoratorSpec) -> Result<&mut Self> {
		let decorator = spec.resolve(None)?;
		self.columns.attach_at(index, decorator)?;
		Ok(self)
	}

	/// Register one auto-decorated column per visible field of the source,
	/// in field order.
	pub fn add_columns_for(&mut self, source: &dyn DataSource) -> Result<&mut Self> {
		let visible: Vec<Field> = source
			.fields()
			.iter()
			.filter(|f| f.visible)
			.cloned()
			.collect();
		for field in visible {
			self.add_column_with(field, DecoratorSpec::Auto)?;
		}
		Ok(self)
	}

	/// The column registry.
	pub fn columns(&self) -> &Columns {
		&self.columns
	}

	/// Append a totals plan; each plan renders one footer row per pass.
	pub fn add_totals(&mut self, plan: TotalsPlan) -> &mut Self {
		self.totals.add(plan);
		self
	}

	/// Replace all totals plans with the given one.
	pub fn set_totals(&mut self, plan: TotalsPlan) -> &mut Self {
		self.totals.set(plan);
		self
	}

	/// Install the pre-row hook, called once per candidate row. Returning
	/// [`RowAction::Skip`] drops the row without counting it or folding it
	/// into totals.
	pub fn on_before_row(&mut self, hook: impl Fn(&Row) -> RowAction + 'static) -> &mut Self {
		self.before_row = Some(Box::new(hook));
		self
	}

	/// Install the per-row markup hook, returning slot → fragment pairs to
	/// splice into the row template for that row only. Entries from this
	/// hook win over decorator-provided ones.
	pub fn on_row_html_tags(
		&mut self,
		hook: impl Fn(&Row) -> Vec<(String, String)> + 'static,
	) -> &mut Self {
		self.row_tags = Some(Box::new(hook));
		self
	}

	/// Render the table over the source's rows.
	///
	/// The row sequence is consumed eagerly, exactly once, in forward
	/// order. With zero rows the empty-state fragment is emitted instead of
	/// any footer; otherwise one footer row per totals plan, in declaration
	/// order.
	pub fn render(&self, source: &dyn DataSource) -> Result<String> {
		if self.columns.is_empty() {
			return Err(TableError::NoColumns);
		}

		let mut template = Template::parse(&self.template_src)?;
		let mut t_head = template.clone_region("Head")?;
		let mut t_row_master = template.clone_region("Row")?;
		let mut t_totals = template.clone_region("Totals")?;
		let mut t_empty = template.clone_region("Empty")?;
		template.del("Head");
		template.del("Body");
		template.del("Foot");

		if let Some(class) = &self.class {
			template.set("class", class);
		}

		if self.header {
			t_head.set_html("cells", &self.header_row_cells());
			template.set_html("Head", &t_head.render());
		}

		// The row template is composed once and re-parsed so the per-column
		// composition cost is paid per render, not per row.
		t_row_master.set_html("cells", &self.data_row_cells());
		t_row_master.set_html("_id", "{$_id}");
		let mut t_row = Template::parse(&t_row_master.render())?;

		let mut rows = 0usize;
		let mut accumulators = Accumulators::for_plans(self.totals.len());
		for row in source.rows() {
			if let Some(hook) = &self.before_row {
				if hook(&row) == RowAction::Skip {
					continue;
				}
			}
			if !self.totals.is_empty() {
				self.totals.fold_row(&mut accumulators, &row)?;
			}
			self.render_row(&mut template, &mut t_row, &row);
			rows += 1;
		}

		if rows == 0 {
			t_empty.set("span", &self.columns.len().to_string());
			template.append_html("Body", &t_empty.render());
			debug!("rendered empty state");
		} else if !self.totals.is_empty() {
			for plan_index in 0..self.totals.len() {
				t_totals.set_html("cells", &self.totals_row_cells(plan_index, &accumulators));
				template.append_html("Foot", &t_totals.render());
			}
		}
		debug!(rows, plans = self.totals.len(), "table rendered");

		Ok(template.render())
	}

	fn field(&self, name: &str) -> Option<&Field> {
		self.fields.iter().find(|f| f.name == name)
	}

	/// Header cells in registry order, each from the first decorator of its
	/// column's chain.
	fn header_row_cells(&self) -> String {
		let mut out = String::new();
		for entry in self.columns.iter() {
			let field = entry.key().and_then(|key| self.field(key));
			out.push_str(&entry.first().header_cell(field));
		}
		out
	}

	/// Composed data cells for the row template, in registry order.
	fn data_row_cells(&self) -> String {
		let mut out = String::new();
		for entry in self.columns.iter() {
			let field = entry.key().and_then(|key| self.field(key));
			out.push_str(&compose_data_cell(entry.key(), entry.decorators(), field));
		}
		out
	}

	/// Footer cells for one plan: dash for columns the plan omits, caption
	/// cells for labels, totals cells for aggregates.
	fn totals_row_cells(&self, plan_index: usize, accumulators: &Accumulators) -> String {
		let plan = &self.totals.plans()[plan_index];
		let mut out = String::new();
		for entry in self.columns.iter() {
			let first = entry.first();
			let Some(key) = entry.key() else {
				out.push_str(&first.tag(Region::Foot, ""));
				continue;
			};
			match plan.get(key) {
				None => out.push_str(&first.tag(Region::Foot, "")),
				Some(PlanEntry::Label(text)) => {
					out.push_str(&first.tag(Region::Foot, &escape_html(text)));
				}
				Some(_) => {
					let value = accumulators
						.get(plan_index, key)
						.cloned()
						.unwrap_or(Value::Null);
					out.push_str(&first.totals_cell(self.field(key), &value));
				}
			}
		}
		out
	}

	fn render_row(&self, template: &mut Template, t_row: &mut Template, row: &Row) {
		for (name, value) in row.iter() {
			t_row.set(name, &display_value(value));
		}
		// Registered fields the row did not carry must not leak the
		// previous row's value.
		for field in &self.fields {
			if row.get(&field.name).is_none() {
				t_row.set(&field.name, "");
			}
		}
		t_row.set("_id", &display_value(row.id()));

		if self.use_html_tags {
			let mut tags: Vec<(String, String)> = Vec::new();
			if let Some(hook) = &self.row_tags {
				tags.extend(hook(row));
			}
			for entry in self.columns.iter() {
				let field = entry.key().and_then(|key| self.field(key));
				for decorator in entry.decorators() {
					for (slot, html) in decorator.row_html_tags(row, field) {
						if !tags.iter().any(|(existing, _)| existing == &slot) {
							tags.push((slot, html));
						}
					}
				}
			}
			for (slot, html) in &tags {
				t_row.set_html(slot, html);
			}
			template.append_html("Body", &t_row.render());
			// Clear injected slots so they cannot leak into the next row.
			for (slot, _) in &tags {
				t_row.del(slot);
			}
		} else {
			template.append_html("Body", &t_row.render());
		}
	}
}
