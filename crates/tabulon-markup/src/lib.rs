//! Named-slot markup fragments for Tabulon
//!
//! This crate implements the templating collaborator the table renderer
//! writes into: a [`Template`] is a parsed markup fragment with named value
//! slots (`{$name}`) and named regions (`{Body}...{/Body}`), supporting
//! get/set/append/delete/clone by name and rendering back to a flat string.
//!
//! Data values set through [`Template::set`] are HTML-escaped; markup
//! produced by the renderer itself goes through [`Template::set_html`] and
//! [`Template::append_html`].
//!
//! # Example
//!
//! ```rust
//! use tabulon_markup::Template;
//!
//! let mut t = Template::parse("<ul>{Items}<li>{$name}</li>{/Items}</ul>")?;
//! let mut item = t.clone_region("Items")?;
//! item.set("name", "a < b");
//! t.del("Items");
//! t.append_html("Items", &item.render());
//! assert_eq!(t.render(), "<ul><li>a &lt; b</li></ul>");
//! # Ok::<(), tabulon_markup::MarkupError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]

pub mod error;
pub mod escape;
pub mod template;

pub use error::{MarkupError, Result};
pub use escape::escape_html;
pub use template::Template;
