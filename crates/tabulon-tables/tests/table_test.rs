use std::cell::Cell;

use rstest::*;
use serde_json::Value;
use tabulon_tables::{
	CellDecorator, DataSource, DecoratorSpec, Field, FieldType, MemorySource, Money, PlanEntry,
	Row, RowAction, Snippet, Table, TableError, TagAttributes, TotalsPlan, cell_tag,
};

#[fixture]
fn invoices() -> MemorySource {
	MemorySource::new(vec![
		Field::new("name", FieldType::Text),
		Field::new("amount", FieldType::Integer),
		Field::new("active", FieldType::Boolean),
	])
	.with_rows(vec![
		Row::new(1)
			.with("name", "Alice")
			.with("amount", 10)
			.with("active", true),
		Row::new(2)
			.with("name", "Bob")
			.with("amount", 20)
			.with("active", false),
		Row::new(3)
			.with("name", "Charlie")
			.with("amount", 30)
			.with("active", true),
	])
}

fn auto_table(source: &MemorySource) -> Table {
	let mut table = Table::new();
	table.add_columns_for(source).unwrap();
	table
}

/// Everything from the first `<tfoot>` on.
fn foot(html: &str) -> &str {
	&html[html.find("<tfoot>").unwrap()..]
}

/// A source that must never be asked for rows.
#[derive(Debug)]
struct PanickySource {
	fields: Vec<Field>,
}

impl DataSource for PanickySource {
	fn fields(&self) -> &[Field] {
		&self.fields
	}

	fn rows(&self) -> Box<dyn Iterator<Item = Row> + '_> {
		panic!("rows() must not be called");
	}
}

/// A source that counts how often its row iterator is requested.
#[derive(Debug)]
struct CountingSource {
	inner: MemorySource,
	calls: Cell<usize>,
}

impl DataSource for CountingSource {
	fn fields(&self) -> &[Field] {
		self.inner.fields()
	}

	fn rows(&self) -> Box<dyn Iterator<Item = Row> + '_> {
		self.calls.set(self.calls.get() + 1);
		self.inner.rows()
	}
}

// ==========================================================================
// Registration errors
// ==========================================================================

#[rstest]
fn test_render_without_columns_fails_before_iteration() {
	let table = Table::new();
	let source = PanickySource { fields: Vec::new() };
	let err = table.render(&source).unwrap_err();
	assert!(matches!(err, TableError::NoColumns));
}

#[rstest]
fn test_duplicate_named_column_fails(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	let err = table.add_column("name", DecoratorSpec::Auto).unwrap_err();
	assert!(matches!(err, TableError::DuplicateColumn { name } if name == "name"));
}

#[rstest]
fn test_decorator_on_unknown_column_fails() {
	let mut table = Table::new();
	let err = table
		.add_decorator("missing", DecoratorSpec::Auto)
		.unwrap_err();
	assert!(matches!(err, TableError::UnknownColumn { name } if name == "missing"));
}

#[rstest]
fn test_unknown_decorator_kind_fails() {
	let mut table = Table::new();
	let err = table
		.add_column("name", DecoratorSpec::kind("sparkline"))
		.unwrap_err();
	assert!(matches!(err, TableError::InvalidDecorator { name } if name == "sparkline"));
}

// ==========================================================================
// Header and body rendering
// ==========================================================================

#[rstest]
fn test_header_row_in_registration_order(invoices: MemorySource) {
	let html = auto_table(&invoices).render(&invoices).unwrap();
	assert!(html.contains("<tr><th>Name</th><th>Amount</th><th>Active</th></tr>"));
}

#[rstest]
fn test_header_can_be_disabled(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table.header(false);
	let html = table.render(&invoices).unwrap();
	assert!(!html.contains("<th>"));
	assert!(html.contains("<td>Alice</td>"));
}

#[rstest]
fn test_body_rows_bind_values_and_ids(invoices: MemorySource) {
	let html = auto_table(&invoices).render(&invoices).unwrap();
	assert!(html.contains("<tr data-id=\"1\"><td>Alice</td><td>10</td>"));
	assert!(html.contains("<tr data-id=\"2\"><td>Bob</td><td>20</td>"));
	assert!(html.contains("<tr data-id=\"3\"><td>Charlie</td><td>30</td>"));
}

#[rstest]
fn test_boolean_column_renders_status_icons(invoices: MemorySource) {
	let html = auto_table(&invoices).render(&invoices).unwrap();
	assert!(html.contains("<i class=\"green check icon\"></i> true"));
	assert!(html.contains("<i class=\"red close icon\"></i> false"));
}

#[rstest]
fn test_values_are_escaped() {
	let source = MemorySource::new(vec![Field::new("name", FieldType::Generic)])
		.with_rows(vec![Row::new(1).with("name", "<b>Bob & Co</b>")]);
	let html = auto_table(&source).render(&source).unwrap();
	assert!(html.contains("&lt;b&gt;Bob &amp; Co&lt;/b&gt;"));
	assert!(!html.contains("<b>Bob"));
}

#[rstest]
fn test_table_class_is_merged() {
	let source = MemorySource::new(vec![Field::new("n", FieldType::Integer)])
		.with_rows(vec![Row::new(1).with("n", 1)]);
	let mut table = auto_table(&source);
	table.with_class("selectable");
	let html = table.render(&source).unwrap();
	assert!(html.contains("class=\"ui selectable table\""));
}

#[rstest]
fn test_hidden_fields_are_not_auto_registered() {
	let source = MemorySource::new(vec![
		Field::new("name", FieldType::Text),
		Field::new("secret", FieldType::Password).hidden(),
	])
	.with_rows(vec![Row::new(1).with("name", "Alice").with("secret", "hunter2")]);
	let html = auto_table(&source).render(&source).unwrap();
	assert!(!html.contains("Secret"));
	assert!(!html.contains("hunter2"));
}

#[rstest]
fn test_password_column_masks_values() {
	let source = MemorySource::new(vec![Field::new("secret", FieldType::Password)])
		.with_rows(vec![Row::new(1).with("secret", "hunter2")]);
	let html = auto_table(&source).render(&source).unwrap();
	assert!(html.contains("<td>***</td>"));
	assert!(!html.contains("hunter2"));
}

#[rstest]
fn test_rows_are_consumed_exactly_once(invoices: MemorySource) {
	let source = CountingSource {
		inner: invoices,
		calls: Cell::new(0),
	};
	let mut table = Table::new();
	table.add_columns_for(&source).unwrap();
	table.render(&source).unwrap();
	assert_eq!(source.calls.get(), 1);
}

// ==========================================================================
// Empty state
// ==========================================================================

#[rstest]
fn test_zero_rows_render_empty_state_and_no_footers() {
	let source = MemorySource::new(vec![
		Field::new("name", FieldType::Text),
		Field::new("amount", FieldType::Integer),
		Field::new("active", FieldType::Boolean),
	]);
	let mut table = auto_table(&source);
	table.add_totals(
		TotalsPlan::new()
			.set("name", PlanEntry::label("Totals:"))
			.set("amount", PlanEntry::sum()),
	);
	let html = table.render(&source).unwrap();
	assert!(html.contains("colspan=\"3\""));
	assert!(html.contains("No records found"));
	assert!(!html.contains("Totals:"));
	assert!(!foot(&html).contains("<td>"));
}

// ==========================================================================
// Totals
// ==========================================================================

#[rstest]
fn test_totals_row_with_label_sum_and_dash(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table.add_totals(
		TotalsPlan::new()
			.set("name", PlanEntry::label("Totals:"))
			.set("amount", PlanEntry::sum()),
	);
	let html = table.render(&invoices).unwrap();
	assert!(html.contains("<tr><td>Totals:</td><td>60</td><td>-</td></tr>"));
}

#[rstest]
fn test_count_min_max_builtins(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table
		.add_totals(TotalsPlan::new().set("amount", PlanEntry::count()))
		.add_totals(TotalsPlan::new().set("amount", PlanEntry::min()))
		.add_totals(TotalsPlan::new().set("amount", PlanEntry::max()));
	let html = table.render(&invoices).unwrap();
	let foot = foot(&html);
	assert!(foot.contains("<td>3</td>"));
	assert!(foot.contains("<td>10</td>"));
	assert!(foot.contains("<td>30</td>"));
}

#[rstest]
fn test_two_plans_render_two_footer_rows_in_order(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table
		.add_totals(TotalsPlan::new().set("name", PlanEntry::label("Totals:")))
		.add_totals(TotalsPlan::new().set("name", PlanEntry::label("Count:")));
	let html = table.render(&invoices).unwrap();
	let foot = foot(&html);
	assert_eq!(foot.matches("<tr>").count(), 2);
	assert!(foot.find("Totals:").unwrap() < foot.find("Count:").unwrap());
}

#[rstest]
fn test_set_totals_replaces_earlier_plans(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table
		.add_totals(TotalsPlan::new().set("name", PlanEntry::label("One")))
		.add_totals(TotalsPlan::new().set("name", PlanEntry::label("Two")))
		.set_totals(TotalsPlan::new().set("name", PlanEntry::label("Only")));
	let html = table.render(&invoices).unwrap();
	let foot = foot(&html);
	assert_eq!(foot.matches("<tr>").count(), 1);
	assert!(foot.contains("Only"));
}

#[rstest]
fn test_unknown_aggregation_method_aborts_render(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table.add_totals(TotalsPlan::new().set("amount", PlanEntry::reduce("median")));
	let err = table.render(&invoices).unwrap_err();
	assert!(matches!(
		err,
		TableError::UnknownAggregation { column, method }
			if column == "amount" && method == "median"
	));
}

#[rstest]
fn test_skipped_rows_neither_count_nor_fold(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table
		.on_before_row(|row| {
			if row.get("name") == Some(&Value::String("Bob".to_string())) {
				RowAction::Skip
			} else {
				RowAction::Render
			}
		})
		.add_totals(
			TotalsPlan::new()
				.set("name", PlanEntry::reduce("count"))
				.set("amount", PlanEntry::sum()),
		);
	let html = table.render(&invoices).unwrap();
	assert!(!html.contains("Bob"));
	let foot = foot(&html);
	assert!(foot.contains("<td>2</td>"));
	assert!(foot.contains("<td>40</td>"));
}

#[rstest]
fn test_fold_function_totals_cell(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table.add_totals(TotalsPlan::new().set(
		"name",
		PlanEntry::fold(|acc, value, _row| {
			let value = value.as_str().unwrap_or_default();
			match acc.and_then(Value::as_str) {
				None => Value::String(value.to_string()),
				Some(prev) => Value::String(format!("{prev}, {value}")),
			}
		}),
	));
	let html = table.render(&invoices).unwrap();
	assert!(foot(&html).contains("<td>Alice, Bob, Charlie</td>"));
}

// ==========================================================================
// Decorator chains and positional columns
// ==========================================================================

/// A header-overriding wrapper used to show that chains take the header
/// (and only the header) from their first decorator.
#[derive(Debug)]
struct Emphasis;

impl CellDecorator for Emphasis {
	fn header_cell(&self, _field: Option<&Field>) -> String {
		"<th>Emphasized</th>".to_string()
	}

	fn data_cell_template(&self, field: Option<&Field>) -> String {
		format!("<em>{{${}}}</em>", field.map(|f| f.name.as_str()).unwrap_or_default())
	}

	fn data_cell(&self, field: Option<&Field>, attrs: &TagAttributes) -> String {
		cell_tag(
			tabulon_tables::Region::Body,
			attrs,
			&self.data_cell_template(field),
		)
	}
}

#[rstest]
fn test_chain_nests_inner_fragment_once_and_header_uses_first(invoices: MemorySource) {
	let mut table = Table::new();
	table
		.add_column("name", DecoratorSpec::custom(Emphasis))
		.unwrap()
		.add_decorator("name", DecoratorSpec::kind("generic"))
		.unwrap();
	let html = table.render(&invoices).unwrap();
	assert!(html.contains("<th>Emphasized</th>"));
	assert!(html.contains("<td><em>Alice</em></td>"));
	// One level of nesting per row, never more.
	assert_eq!(html.matches("<em>").count(), 3);
}

#[rstest]
fn test_positional_snippet_binds_row_slots(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table
		.add_positional(DecoratorSpec::custom(Snippet::of(
			"<td><button data-id=\"{$_id}\">Edit</button></td>",
		)))
		.unwrap();
	let html = table.render(&invoices).unwrap();
	assert!(html.contains("<button data-id=\"2\">Edit</button>"));
}

#[rstest]
fn test_positional_chain_concatenates_fragments(invoices: MemorySource) {
	let mut table = Table::new();
	table
		.add_positional(DecoratorSpec::custom(Snippet::of("<td>view</td>")))
		.unwrap()
		.add_decorator_at(0, DecoratorSpec::custom(Snippet::of("<td>edit</td>")))
		.unwrap();
	let html = table.render(&invoices).unwrap();
	assert!(html.contains("<td>view</td> <td>edit</td>"));
}

#[rstest]
fn test_money_column_formats_and_flags_negatives() {
	let source = MemorySource::new(vec![Field::new("amount", FieldType::Float)]).with_rows(vec![
		Row::new(1).with("amount", 10.0),
		Row::new(2).with("amount", -5.5),
	]);
	let mut table = Table::new();
	table
		.add_column_with(
			Field::new("amount", FieldType::Float),
			DecoratorSpec::custom(Money::new()),
		)
		.unwrap()
		.add_totals(TotalsPlan::new().set("amount", PlanEntry::sum()));
	let html = table.render(&source).unwrap();
	assert!(html.contains("10.00"));
	assert!(html.contains("-5.50"));
	assert!(html.contains("right aligned single line negative"));
	assert!(foot(&html).contains("4.50"));
}

// ==========================================================================
// Row markup injection
// ==========================================================================

#[rstest]
fn test_injected_slots_do_not_leak_between_rows(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table
		.add_positional(DecoratorSpec::custom(Snippet::of(
			"<td class=\"badge {$badge}\">x</td>",
		)))
		.unwrap()
		.on_row_html_tags(|row| {
			if row.get("name") == Some(&Value::String("Alice".to_string())) {
				vec![("badge".to_string(), "gold".to_string())]
			} else {
				Vec::new()
			}
		});
	let html = table.render(&invoices).unwrap();
	assert_eq!(html.matches("gold").count(), 1);
	assert!(html.contains("class=\"badge gold\""));
}

#[rstest]
fn test_html_tags_flag_disables_injection(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table.use_html_tags(false);
	let html = table.render(&invoices).unwrap();
	assert!(!html.contains("green check"));
	assert!(!html.contains("red close"));
	assert!(html.contains("<td>Alice</td>"));
}

// ==========================================================================
// Custom templates
// ==========================================================================

#[rstest]
fn test_custom_template_drives_output_shape(invoices: MemorySource) {
	let mut table = auto_table(&invoices);
	table
		.set_template(
			"<div>{Head}<span>{$cells}</span>{/Head}\
			{Body}{Row}<p id=\"{$_id}\">{$cells}</p>{/Row}\
			{Empty}<p>none</p>{/Empty}{/Body}\
			{Foot}{Totals}<div>{$cells}</div>{/Totals}{/Foot}</div>",
		)
		.unwrap();
	let html = table.render(&invoices).unwrap();
	assert!(html.contains("<p id=\"1\">"));
	assert!(!html.contains("<table"));
}

#[rstest]
fn test_malformed_template_is_rejected() {
	let mut table = Table::new();
	let err = table.set_template("{Body}<tr>").unwrap_err();
	assert!(matches!(err, TableError::Markup(_)));
}
