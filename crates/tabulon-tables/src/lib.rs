//! Streaming HTML table rendering for Tabulon
//!
//! This crate turns a row-oriented data source and a set of per-column
//! decorators into table markup, computing running totals while the rows
//! stream by.
//!
//! # Features
//!
//! - **Column registry**: ordered columns keyed by field name, plus
//!   positional columns for computed markup
//! - **Decorator chains**: N decorators per column, composed into a single
//!   cell fragment with attribute threading
//! - **Totals plans**: per-column `sum`/`count`/`min`/`max` built-ins, fold
//!   functions, captions, and seeded accumulators; one footer row per plan
//! - **Row hooks**: pre-row filtering and per-row markup injection
//! - **Empty state**: a dedicated fragment when the source yields no rows
//!
//! # Architecture
//!
//! ```mermaid
//! graph TD
//!     A[Table] --> B[Columns]
//!     B --> C[CellDecorator chains]
//!     C --> D[Generic]
//!     C --> E[Status / Money / Link / ...]
//!     A --> F[TotalsEngine]
//!     F --> G[TotalsPlan]
//!     F --> H[Accumulators]
//!     A --> I[DataSource]
//!     A --> J[tabulon-markup Template]
//! ```
//!
//! # Example
//!
//! ```rust
//! use tabulon_tables::{Field, FieldType, MemorySource, PlanEntry, Row, Table, TotalsPlan};
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
//! let html = table.render(&source)?;
//! assert!(html.contains("<td>30</td>"));
//! # Ok::<(), tabulon_tables::TableError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod columns;
pub mod decorator;
pub mod error;
pub mod source;
pub mod table;
pub mod totals;

// Re-exports for convenience
pub use columns::{ColumnEntry, Columns, DecoratorSpec};
pub use decorator::{
	CellDecorator, Generic, Link, Money, Password, Region, Snippet, Status, TagAttributes, Text,
	cell_tag, compose_data_cell,
};
pub use error::{Result, TableError};
pub use source::{DataSource, Field, FieldType, MemorySource, Row, display_value};
pub use table::{RowAction, TABLE_HTML, Table};
pub use totals::{Accumulators, FoldFn, PlanEntry, Seed, SeedFn, TotalsEngine, TotalsPlan};
