//! # Tabulon
//!
//! A streaming HTML table renderer for Rust.
//!
//! Tabulon turns a row-oriented data source and a set of per-column
//! presentation rules ("decorators") into header, body, and footer markup,
//! computing running aggregates ("totals") while the rows stream by. It is
//! split into two crates, re-exported here:
//!
//! - [`tables`] — the core engine: column registry, decorator composition,
//!   totals plans, and the table renderer.
//! - [`markup`] — the named-slot fragment templates the renderer emits into.
//!
//! ## Example
//!
//! ```rust
//! use tabulon::tables::{Field, FieldType, MemorySource, PlanEntry, Row, Table, TotalsPlan};
//!
//! let source = MemorySource::new(vec![
//! 	Field::new("name", FieldType::Text),
//! 	Field::new("amount", FieldType::Integer),
//! ])
//! .with_rows(vec![
//! 	Row::new(1).with("name", "Widget").with("amount", 10),
//! 	Row::new(2).with("name", "Gadget").with("amount", 20),
//! ]);
//!
//! let mut table = Table::new();
//! table.add_columns_for(&source)?;
//! table.add_totals(
//! 	TotalsPlan::new()
//! 		.set("name", PlanEntry::label("Totals:"))
//! 		.set("amount", PlanEntry::sum()),
//! );
//!
//! let html = table.render(&source)?;
//! assert!(html.contains("<td>30</td>"));
//! # Ok::<(), tabulon::tables::TableError>(())
//! ```

pub use tabulon_markup as markup;
pub use tabulon_tables as tables;

pub use tabulon_markup::{MarkupError, Template, escape_html};
pub use tabulon_tables::{
	CellDecorator, Columns, DataSource, DecoratorSpec, Field, FieldType, MemorySource, PlanEntry,
	Region, Row, RowAction, Table, TableError, TagAttributes, TotalsPlan,
};
